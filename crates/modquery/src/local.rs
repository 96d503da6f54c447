// SPDX-FileCopyrightText: 2026 Modquery Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Local module discovery and metadata reads.
//!
//! [`LocalModuleLister`] enumerates installed module directories under the
//! configured root; [`LocalModuleReader`] reads one module's manifest,
//! version, and optional readme. Local identifiers take the shape
//! `/<module_path>/<name>` and are mapped back onto `root_dir` before any
//! file is touched.

use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use modquery_core::{ModqueryConfig, ModqueryError, ModuleManifest};
use tracing::warn;

/// Manifest filename inside each module directory.
const MANIFEST_FILE: &str = "package.json";
/// Readme filename inside each module directory.
const README_FILE: &str = "README.md";

/// Enumerates installed local modules.
#[derive(Debug, Clone)]
pub struct LocalModuleLister {
    root_dir: PathBuf,
    module_path: String,
}

impl LocalModuleLister {
    /// Creates a lister over `root_dir/module_path`.
    pub fn new(config: &ModqueryConfig) -> Self {
        Self {
            root_dir: config.root_dir.clone(),
            module_path: config.module_path.trim_matches('/').to_string(),
        }
    }

    /// Lists installed module identifiers, sorted ascending by final path
    /// segment.
    ///
    /// An absent module directory is the expected steady state before any
    /// module is installed and yields an empty list. A stat failure on one
    /// entry is logged and that entry skipped; it never fails the listing.
    pub async fn list(&self) -> Result<Vec<String>, ModqueryError> {
        let dir = self.root_dir.join(&self.module_path);
        let mut entries = match tokio::fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(ModqueryError::Io {
                    message: format!("failed to read module directory {}", dir.display()),
                    source: e,
                })
            }
        };

        let mut names = Vec::new();
        loop {
            let entry = match entries.next_entry().await {
                Ok(Some(entry)) => entry,
                Ok(None) => break,
                Err(e) => {
                    return Err(ModqueryError::Io {
                        message: format!("failed to enumerate {}", dir.display()),
                        source: e,
                    })
                }
            };

            // Non-following stat: a symlink to a directory is not a module.
            match tokio::fs::symlink_metadata(entry.path()).await {
                Ok(meta) if meta.is_dir() => {
                    names.push(entry.file_name().to_string_lossy().into_owned());
                }
                Ok(_) => {}
                Err(e) => {
                    warn!(entry = %entry.path().display(), error = %e, "skipping unreadable entry");
                }
            }
        }

        names.sort();
        Ok(names
            .into_iter()
            .map(|name| format!("/{}/{name}", self.module_path))
            .collect())
    }
}

/// Reads a local module's manifest, version, and optional readme from disk.
#[derive(Debug, Clone)]
pub struct LocalModuleReader {
    root_dir: PathBuf,
    module_path: String,
}

impl LocalModuleReader {
    /// Creates a reader anchored at `root_dir/module_path`.
    pub fn new(config: &ModqueryConfig) -> Self {
        Self {
            root_dir: config.root_dir.clone(),
            module_path: config.module_path.trim_matches('/').to_string(),
        }
    }

    /// Maps a local identifier onto the configured root.
    ///
    /// Identifiers outside the module path, and identifiers carrying
    /// traversal segments, are rejected as [`ModqueryError::InvalidPath`].
    fn module_dir(&self, path: &Path) -> Result<PathBuf, ModqueryError> {
        let invalid = || ModqueryError::InvalidPath {
            path: path.to_string_lossy().into_owned(),
        };

        let rel = path.strip_prefix("/").map_err(|_| invalid())?;
        if !rel.starts_with(&self.module_path) {
            return Err(invalid());
        }
        if !rel.components().all(|c| matches!(c, Component::Normal(_))) {
            return Err(invalid());
        }
        Ok(self.root_dir.join(rel))
    }

    /// Reads and parses the module's manifest.
    ///
    /// A missing or unparsable manifest is fatal for this identifier.
    pub async fn manifest(&self, path: &Path) -> Result<ModuleManifest, ModqueryError> {
        let dir = self.module_dir(path)?;
        let identifier = path.to_string_lossy().into_owned();

        let raw = tokio::fs::read_to_string(dir.join(MANIFEST_FILE))
            .await
            .map_err(|e| ModqueryError::Manifest {
                identifier: identifier.clone(),
                message: e.to_string(),
            })?;

        ModuleManifest::parse(&raw).map_err(|e| ModqueryError::Manifest {
            identifier,
            message: e.to_string(),
        })
    }

    /// Returns the module's version list: the declared manifest version, or
    /// the fallback when the manifest omits one. Always one element.
    pub async fn versions(&self, path: &Path) -> Result<Vec<String>, ModqueryError> {
        let manifest = self.manifest(path).await?;
        Ok(vec![manifest.version_or_default().to_string()])
    }

    /// Reads the module's raw readme. A missing readme file yields
    /// `Ok(None)`; any other I/O failure is fatal.
    pub async fn readme(&self, path: &Path) -> Result<Option<String>, ModqueryError> {
        let dir = self.module_dir(path)?;
        match tokio::fs::read_to_string(dir.join(README_FILE)).await {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ModqueryError::Io {
                message: format!("failed to read readme for {}", path.display()),
                source: e,
            }),
        }
    }
}
