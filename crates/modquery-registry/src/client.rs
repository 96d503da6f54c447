// SPDX-FileCopyrightText: 2026 Modquery Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the package registry and its CDN mirror.
//!
//! Provides [`RegistryClient`] covering the four remote operations: keyword
//! search, package manifest fetch, version-list fetch, and readme fetch.
//! Non-2xx responses and malformed response shapes become typed
//! [`ModqueryError::Registry`] errors; transport-level connection failures
//! are reported with status 500.

use std::time::Duration;

use modquery_core::{ModqueryConfig, ModqueryError, ModuleManifest};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

/// Response shape of the registry's search endpoint.
#[derive(Debug, Deserialize)]
struct SearchResponse {
    objects: Vec<SearchObject>,
}

#[derive(Debug, Deserialize)]
struct SearchObject {
    package: PackageRef,
}

#[derive(Debug, Deserialize)]
struct PackageRef {
    name: String,
}

/// Response shape of the registry's per-package version index.
#[derive(Debug, Deserialize)]
struct VersionIndex {
    versions: serde_json::Map<String, Value>,
}

/// Client for registry and CDN communication.
///
/// Holds one pooled `reqwest::Client` with a bounded per-request timeout;
/// cheap to clone and safe to share across concurrent searches.
#[derive(Debug, Clone)]
pub struct RegistryClient {
    client: reqwest::Client,
    registry_url: String,
    cdn_url: String,
}

impl RegistryClient {
    /// Creates a new registry client.
    ///
    /// # Arguments
    /// * `registry_url` - base URL of the registry (search, version index)
    /// * `cdn_url` - base URL of the CDN mirror (raw manifests, readmes)
    /// * `timeout` - per-request timeout applied to every call
    pub fn new(
        registry_url: impl Into<String>,
        cdn_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ModqueryError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ModqueryError::Internal(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            registry_url: registry_url.into().trim_end_matches('/').to_string(),
            cdn_url: cdn_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Creates a client from loaded configuration.
    pub fn from_config(config: &ModqueryConfig) -> Result<Self, ModqueryError> {
        Self::new(
            &config.registry_url,
            &config.cdn_url,
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    /// Searches the registry for package names matching `query`.
    ///
    /// Keyword filters are comma-joined and appended to the query text.
    /// Unless `include_scoped` is set, scoped names (leading `@`) are
    /// filtered out of the result.
    pub async fn search(
        &self,
        query: &str,
        keywords: &[String],
        include_scoped: bool,
    ) -> Result<Vec<String>, ModqueryError> {
        let text = if keywords.is_empty() {
            query.to_string()
        } else {
            format!("{query} keywords:{}", keywords.join(","))
        };

        let url = format!("{}/-/v1/search", self.registry_url);
        let response = self
            .client
            .get(&url)
            .query(&[("text", text.as_str())])
            .send()
            .await
            .map_err(|e| ModqueryError::transport(format!("search request failed: {e}")))?;

        let status = response.status();
        debug!(status = %status, query, "registry search response");
        if !status.is_success() {
            return Err(ModqueryError::Registry {
                status: status.as_u16(),
                message: format!("search for {query:?} failed"),
            });
        }

        let body: SearchResponse = response.json().await.map_err(|e| ModqueryError::Registry {
            status: 500,
            message: format!("malformed search response: {e}"),
        })?;

        let names = body.objects.into_iter().map(|o| o.package.name);
        Ok(if include_scoped {
            names.collect()
        } else {
            names.filter(|name| !name.starts_with('@')).collect()
        })
    }

    /// Fetches a package's manifest from the CDN mirror.
    pub async fn manifest(&self, name: &str) -> Result<ModuleManifest, ModqueryError> {
        let url = format!("{}/{name}/package.json", self.cdn_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ModqueryError::transport(format!("manifest request failed: {e}")))?;

        let status = response.status();
        debug!(status = %status, name, "manifest response");
        if !status.is_success() {
            return Err(ModqueryError::Registry {
                status: status.as_u16(),
                message: format!("manifest fetch for {name:?} failed"),
            });
        }

        response.json().await.map_err(|e| ModqueryError::Registry {
            status: 500,
            message: format!("malformed manifest for {name:?}: {e}"),
        })
    }

    /// Fetches the list of published versions for a package.
    ///
    /// The registry's package document carries a `versions` mapping keyed by
    /// version string; the result is that mapping's keys.
    pub async fn versions(&self, name: &str) -> Result<Vec<String>, ModqueryError> {
        let url = format!("{}/{name}", self.registry_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ModqueryError::transport(format!("version request failed: {e}")))?;

        let status = response.status();
        debug!(status = %status, name, "version index response");
        if !status.is_success() {
            return Err(ModqueryError::Registry {
                status: status.as_u16(),
                message: format!("version fetch for {name:?} failed"),
            });
        }

        let index: VersionIndex = response.json().await.map_err(|e| ModqueryError::Registry {
            status: 500,
            message: format!("malformed version index for {name:?}: {e}"),
        })?;

        Ok(index.versions.into_iter().map(|(version, _)| version).collect())
    }

    /// Fetches a package's raw readme from the CDN mirror.
    ///
    /// A 404 means the package has no readme and yields `Ok(None)`; any
    /// other non-2xx status is fatal.
    pub async fn readme(&self, name: &str) -> Result<Option<String>, ModqueryError> {
        let url = format!("{}/{name}/README.md", self.cdn_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ModqueryError::transport(format!("readme request failed: {e}")))?;

        let status = response.status();
        debug!(status = %status, name, "readme response");
        if status.as_u16() == 404 {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(ModqueryError::Registry {
                status: status.as_u16(),
                message: format!("readme fetch for {name:?} failed"),
            });
        }

        let text = response
            .text()
            .await
            .map_err(|e| ModqueryError::transport(format!("failed to read readme body: {e}")))?;
        Ok(Some(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(registry_url: &str, cdn_url: &str) -> RegistryClient {
        RegistryClient::new(registry_url, cdn_url, Duration::from_secs(5)).unwrap()
    }

    fn search_body(names: &[&str]) -> serde_json::Value {
        serde_json::json!({
            "objects": names
                .iter()
                .map(|n| serde_json::json!({"package": {"name": n}}))
                .collect::<Vec<_>>()
        })
    }

    #[tokio::test]
    async fn search_returns_names_in_registry_order() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/-/v1/search"))
            .and(query_param("text", "foo"))
            .respond_with(ResponseTemplate::new(200).set_body_json(search_body(&["zeta", "alpha"])))
            .mount(&server)
            .await;

        let client = test_client(&server.uri(), &server.uri());
        let names = client.search("foo", &[], false).await.unwrap();
        assert_eq!(names, vec!["zeta", "alpha"]);
    }

    #[tokio::test]
    async fn search_joins_keywords_into_query_text() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/-/v1/search"))
            .and(query_param("text", "vr keywords:webvr,plugin"))
            .respond_with(ResponseTemplate::new(200).set_body_json(search_body(&["a"])))
            .mount(&server)
            .await;

        let client = test_client(&server.uri(), &server.uri());
        let keywords = vec!["webvr".to_string(), "plugin".to_string()];
        let names = client.search("vr", &keywords, false).await.unwrap();
        assert_eq!(names, vec!["a"]);
    }

    #[tokio::test]
    async fn search_filters_scoped_names_by_default() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/-/v1/search"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(search_body(&["@scope/tool", "plain-tool"])),
            )
            .mount(&server)
            .await;

        let client = test_client(&server.uri(), &server.uri());
        let names = client.search("tool", &[], false).await.unwrap();
        assert_eq!(names, vec!["plain-tool"]);

        let names = client.search("tool", &[], true).await.unwrap();
        assert_eq!(names, vec!["@scope/tool", "plain-tool"]);
    }

    #[tokio::test]
    async fn search_rejects_malformed_objects_field() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/-/v1/search"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"objects": "not-an-array"})),
            )
            .mount(&server)
            .await;

        let client = test_client(&server.uri(), &server.uri());
        let err = client.search("q", &[], false).await.unwrap_err();
        match err {
            ModqueryError::Registry { status, .. } => assert_eq!(status, 500),
            other => panic!("expected Registry, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn search_surfaces_http_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/-/v1/search"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let client = test_client(&server.uri(), &server.uri());
        let err = client.search("q", &[], false).await.unwrap_err();
        match err {
            ModqueryError::Registry { status, .. } => assert_eq!(status, 503),
            other => panic!("expected Registry, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn manifest_parses_package_json() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/foo/package.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "name": "foo",
                "version": "1.0.0",
                "server": "server.js"
            })))
            .mount(&server)
            .await;

        let client = test_client(&server.uri(), &server.uri());
        let manifest = client.manifest("foo").await.unwrap();
        assert_eq!(manifest.name.as_deref(), Some("foo"));
        assert_eq!(manifest.version.as_deref(), Some("1.0.0"));
    }

    #[tokio::test]
    async fn manifest_rejects_non_object_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/foo/package.json"))
            .respond_with(ResponseTemplate::new(200).set_body_string("\"not an object\""))
            .mount(&server)
            .await;

        let client = test_client(&server.uri(), &server.uri());
        let err = client.manifest("foo").await.unwrap_err();
        match err {
            ModqueryError::Registry { status, .. } => assert_eq!(status, 500),
            other => panic!("expected Registry, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn versions_returns_mapping_keys() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/foo"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "versions": {"1.0.0": {}, "1.1.0": {}, "2.0.0": {}}
            })))
            .mount(&server)
            .await;

        let client = test_client(&server.uri(), &server.uri());
        let mut versions = client.versions("foo").await.unwrap();
        versions.sort();
        assert_eq!(versions, vec!["1.0.0", "1.1.0", "2.0.0"]);
    }

    #[tokio::test]
    async fn versions_rejects_missing_mapping() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/foo"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "name": "foo"
            })))
            .mount(&server)
            .await;

        let client = test_client(&server.uri(), &server.uri());
        let err = client.versions("foo").await.unwrap_err();
        match err {
            ModqueryError::Registry { status, .. } => assert_eq!(status, 500),
            other => panic!("expected Registry, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn readme_404_is_absent_not_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/foo/README.md"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = test_client(&server.uri(), &server.uri());
        assert!(client.readme("foo").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn readme_other_failure_is_fatal() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/foo/README.md"))
            .respond_with(ResponseTemplate::new(502))
            .mount(&server)
            .await;

        let client = test_client(&server.uri(), &server.uri());
        let err = client.readme("foo").await.unwrap_err();
        match err {
            ModqueryError::Registry { status, .. } => assert_eq!(status, 502),
            other => panic!("expected Registry, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn readme_success_returns_raw_text() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/foo/README.md"))
            .respond_with(ResponseTemplate::new(200).set_body_string("# Foo\n\nhello"))
            .mount(&server)
            .await;

        let client = test_client(&server.uri(), &server.uri());
        let readme = client.readme("foo").await.unwrap();
        assert_eq!(readme.as_deref(), Some("# Foo\n\nhello"));
    }

    #[tokio::test]
    async fn connection_failure_reports_status_500() {
        // Nothing listens on this port.
        let client = test_client("http://127.0.0.1:1", "http://127.0.0.1:1");
        let err = client.search("q", &[], false).await.unwrap_err();
        match err {
            ModqueryError::Registry { status, .. } => assert_eq!(status, 500),
            other => panic!("expected Registry, got {other:?}"),
        }
    }
}
