// SPDX-FileCopyrightText: 2026 Modquery Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the modquery module resolution engine.
//!
//! This crate provides the foundational types shared across the workspace:
//! the error type, the tagged module reference, the manifest and descriptor
//! models, and configuration loading.

pub mod config;
pub mod descriptor;
pub mod error;
pub mod manifest;
pub mod reference;

// Re-export key items at crate root for ergonomic imports.
pub use config::{load_config, load_config_from_str, ModqueryConfig};
pub use descriptor::{ModuleDescriptor, DEFAULT_TAG_MATRIX};
pub use error::ModqueryError;
pub use manifest::{is_truthy, ModuleManifest, FALLBACK_VERSION};
pub use reference::ModuleRef;
