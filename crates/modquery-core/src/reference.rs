// SPDX-FileCopyrightText: 2026 Modquery Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tagged module references.
//!
//! A module identifier is either an absolute filesystem path (a locally
//! installed module) or a bare registry package name. The variant is decided
//! once, at the edge, by [`ModuleRef::parse`]; everything downstream
//! dispatches on the variant instead of re-testing the string.

use std::path::{Path, PathBuf};

/// A parsed module identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModuleRef {
    /// Locally installed module, addressed by absolute path.
    Local(PathBuf),
    /// Package published on the remote registry, addressed by bare name.
    Registry(String),
}

impl ModuleRef {
    /// Parse an identifier. Absolute paths are local; everything else is a
    /// registry name.
    pub fn parse(identifier: &str) -> Self {
        if Path::new(identifier).is_absolute() {
            ModuleRef::Local(PathBuf::from(identifier))
        } else {
            ModuleRef::Registry(identifier.to_string())
        }
    }

    /// The original identifier string, used as the descriptor's resolution key.
    pub fn id(&self) -> String {
        match self {
            ModuleRef::Local(path) => path.to_string_lossy().into_owned(),
            ModuleRef::Registry(name) => name.clone(),
        }
    }

    /// True iff this reference names a locally installed module.
    pub fn is_local(&self) -> bool {
        matches!(self, ModuleRef::Local(_))
    }
}

impl std::fmt::Display for ModuleRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModuleRef::Local(path) => write!(f, "{}", path.display()),
            ModuleRef::Registry(name) => write!(f, "{name}"),
        }
    }
}
