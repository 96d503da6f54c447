// SPDX-FileCopyrightText: 2026 Modquery Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model and Figment-based loader.
//!
//! Loads `modquery.toml` from the XDG config directory and the working
//! directory, with `MODQUERY_` environment variable overrides. The config
//! struct is immutable for its lifetime and safely shared across concurrent
//! searches.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

/// Top-level modquery configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ModqueryConfig {
    /// Base directory local module paths are anchored under.
    #[serde(default = "default_root_dir")]
    pub root_dir: PathBuf,

    /// Subdirectory of `root_dir` holding installed modules. Local
    /// identifiers take the shape `/<module_path>/<name>`.
    #[serde(default = "default_module_path")]
    pub module_path: String,

    /// Base URL of the package registry (search and version index).
    #[serde(default = "default_registry_url")]
    pub registry_url: String,

    /// Base URL of the CDN mirror serving raw manifest and readme files.
    #[serde(default = "default_cdn_url")]
    pub cdn_url: String,

    /// Per-request timeout for registry and CDN calls, in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Upper bound on concurrently resolving identifiers within one branch
    /// of a search.
    #[serde(default = "default_max_concurrent_resolutions")]
    pub max_concurrent_resolutions: usize,
}

impl Default for ModqueryConfig {
    fn default() -> Self {
        Self {
            root_dir: default_root_dir(),
            module_path: default_module_path(),
            registry_url: default_registry_url(),
            cdn_url: default_cdn_url(),
            request_timeout_secs: default_request_timeout_secs(),
            max_concurrent_resolutions: default_max_concurrent_resolutions(),
        }
    }
}

fn default_root_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_module_path() -> String {
    "plugins".to_string()
}

fn default_registry_url() -> String {
    "https://registry.npmjs.org".to_string()
}

fn default_cdn_url() -> String {
    "https://unpkg.com".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_max_concurrent_resolutions() -> usize {
    8
}

/// Load configuration from the standard hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `~/.config/modquery/modquery.toml` (user XDG config)
/// 3. `./modquery.toml` (local directory)
/// 4. `MODQUERY_*` environment variables
pub fn load_config() -> Result<ModqueryConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(ModqueryConfig::default()))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("modquery/modquery.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("modquery.toml"))
        .merge(Env::prefixed("MODQUERY_"))
        .extract()
}

/// Load configuration from inline TOML content only (no file lookup).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<ModqueryConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(ModqueryConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}
