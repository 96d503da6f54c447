// SPDX-FileCopyrightText: 2026 Modquery Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dual-source module resolution and search.
//!
//! Resolves a module identifier -- an absolute path to a locally installed
//! module, or the name of a package on the remote registry -- into a
//! normalized [`ModuleDescriptor`], and merges fuzzy search results from
//! both sources into one local-first list.
//!
//! # Example
//!
//! ```no_run
//! use modquery::{ModqueryConfig, SearchCoordinator, SearchOptions};
//!
//! # async fn run() -> Result<(), modquery::ModqueryError> {
//! let config = ModqueryConfig::default();
//! let coordinator = SearchCoordinator::new(&config)?;
//!
//! let descriptor = coordinator.resolve("left-pad").await?;
//! println!("{} {}", descriptor.name, descriptor.version);
//!
//! let outcome = coordinator.search("plugin", &SearchOptions::default()).await?;
//! for desc in &outcome.descriptors {
//!     println!("{} (local: {})", desc.id, desc.is_local);
//! }
//! # Ok(())
//! # }
//! ```

pub mod local;
pub mod render;
pub mod resolver;
pub mod search;

// Re-export the shared core and registry types at crate root.
pub use modquery_core::{
    load_config, load_config_from_str, ModqueryConfig, ModqueryError, ModuleDescriptor,
    ModuleManifest, ModuleRef,
};
pub use modquery_registry::RegistryClient;

pub use local::{LocalModuleLister, LocalModuleReader};
pub use resolver::ModuleResolver;
pub use search::{ResolveFailure, SearchCoordinator, SearchOptions, SearchOutcome};
