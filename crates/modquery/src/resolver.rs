// SPDX-FileCopyrightText: 2026 Modquery Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Single-identifier resolution.
//!
//! [`ModuleResolver`] parses the identifier into a [`ModuleRef`] once, then
//! runs the three sub-fetches (manifest, versions, readme) concurrently
//! against the source the variant selects. Any sub-fetch failure fails the
//! whole resolution; there are no partial descriptors.

use futures::future::try_join3;
use modquery_core::{ModqueryError, ModuleDescriptor, ModuleRef};
use modquery_registry::RegistryClient;

use crate::local::LocalModuleReader;
use crate::render::render_markdown;

/// Resolves one module identifier into a normalized descriptor.
#[derive(Debug, Clone)]
pub struct ModuleResolver {
    reader: LocalModuleReader,
    registry: RegistryClient,
}

impl ModuleResolver {
    /// Creates a resolver over the given local reader and registry client.
    pub fn new(reader: LocalModuleReader, registry: RegistryClient) -> Self {
        Self { reader, registry }
    }

    /// Resolves `identifier` into a [`ModuleDescriptor`].
    ///
    /// Absolute paths resolve locally; bare names resolve against the
    /// registry. The readme, when present, is rendered to HTML before being
    /// stored on the descriptor.
    pub async fn resolve(&self, identifier: &str) -> Result<ModuleDescriptor, ModqueryError> {
        let mref = ModuleRef::parse(identifier);

        let (manifest, versions, readme) = match &mref {
            ModuleRef::Local(path) => {
                try_join3(
                    self.reader.manifest(path),
                    self.reader.versions(path),
                    self.reader.readme(path),
                )
                .await?
            }
            ModuleRef::Registry(name) => {
                try_join3(
                    self.registry.manifest(name),
                    self.registry.versions(name),
                    self.registry.readme(name),
                )
                .await?
            }
        };

        let readme_html = readme.map(|raw| render_markdown(&raw));
        Ok(ModuleDescriptor::from_parts(&mref, &manifest, versions, readme_html))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use modquery_core::ModqueryConfig;
    use tempfile::TempDir;

    fn local_resolver(tmp: &TempDir) -> ModuleResolver {
        let config = ModqueryConfig {
            root_dir: tmp.path().to_path_buf(),
            ..ModqueryConfig::default()
        };
        // Registry side is unused by these tests; point it nowhere.
        let registry =
            RegistryClient::new("http://127.0.0.1:1", "http://127.0.0.1:1", Duration::from_secs(1))
                .unwrap();
        ModuleResolver::new(LocalModuleReader::new(&config), registry)
    }

    fn write_module(tmp: &TempDir, name: &str, manifest: &str, readme: Option<&str>) {
        let dir = tmp.path().join("plugins").join(name);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("package.json"), manifest).unwrap();
        if let Some(readme) = readme {
            std::fs::write(dir.join("README.md"), readme).unwrap();
        }
    }

    #[tokio::test]
    async fn resolves_local_module_with_rendered_readme() {
        let tmp = TempDir::new().unwrap();
        write_module(
            &tmp,
            "foo-plugin",
            r#"{"name": "foo-plugin", "version": "1.0.0", "client": "client.js"}"#,
            Some("# Foo Plugin\n\ndoes things"),
        );

        let resolver = local_resolver(&tmp);
        let desc = resolver.resolve("/plugins/foo-plugin").await.unwrap();

        assert_eq!(desc.id, "/plugins/foo-plugin");
        assert_eq!(desc.name, "foo-plugin");
        assert_eq!(desc.versions, vec!["1.0.0"]);
        assert!(desc.is_local);
        assert!(desc.has_client);
        let readme = desc.readme.unwrap();
        assert!(readme.contains("<h1>"), "expected rendered HTML, got {readme}");
    }

    #[tokio::test]
    async fn local_module_without_version_gets_fallback() {
        let tmp = TempDir::new().unwrap();
        write_module(&tmp, "unversioned", r#"{"name": "unversioned"}"#, None);

        let resolver = local_resolver(&tmp);
        let desc = resolver.resolve("/plugins/unversioned").await.unwrap();
        assert_eq!(desc.version, "0.0.1");
        assert_eq!(desc.versions, vec!["0.0.1"]);
    }

    #[tokio::test]
    async fn local_module_without_readme_resolves_with_none() {
        let tmp = TempDir::new().unwrap();
        write_module(&tmp, "plain", r#"{"name": "plain", "version": "0.1.0"}"#, None);

        let resolver = local_resolver(&tmp);
        let desc = resolver.resolve("/plugins/plain").await.unwrap();
        assert!(desc.readme.is_none());
    }

    #[tokio::test]
    async fn broken_manifest_fails_whole_resolution() {
        let tmp = TempDir::new().unwrap();
        write_module(&tmp, "broken", "not json", Some("# readme exists"));

        let resolver = local_resolver(&tmp);
        let result = resolver.resolve("/plugins/broken").await;
        assert!(matches!(result, Err(ModqueryError::Manifest { .. })));
    }
}
