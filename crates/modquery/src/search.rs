// SPDX-FileCopyrightText: 2026 Modquery Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dual-source search coordination.
//!
//! [`SearchCoordinator`] fans a query out to the local module directory and
//! the remote registry concurrently, resolves every matched identifier
//! through [`ModuleResolver`] with bounded concurrency, and concatenates
//! local results before remote results. A failure at the listing or
//! registry-search stage fails the whole search; a failure resolving one
//! identifier is isolated into [`SearchOutcome::failures`] so the caller
//! decides whether to drop it.

use futures::stream::{self, StreamExt};
use modquery_core::{ModqueryConfig, ModqueryError, ModuleDescriptor};
use modquery_registry::RegistryClient;

use crate::local::{LocalModuleLister, LocalModuleReader};
use crate::resolver::ModuleResolver;

/// Options for one search call.
#[derive(Debug, Clone, Default)]
pub struct SearchOptions {
    /// Keyword filters forwarded to the registry's search endpoint.
    pub keywords: Vec<String>,
    /// Include scoped packages (leading `@`) in remote results.
    pub include_scoped: bool,
}

/// One identifier whose resolution failed during a search.
#[derive(Debug)]
pub struct ResolveFailure {
    pub identifier: String,
    pub error: ModqueryError,
}

/// Result of one search: resolved descriptors plus isolated per-identifier
/// failures, each ordered local-first then registry order.
#[derive(Debug)]
pub struct SearchOutcome {
    pub descriptors: Vec<ModuleDescriptor>,
    pub failures: Vec<ResolveFailure>,
}

/// Coordinates concurrent local and remote search branches.
#[derive(Debug, Clone)]
pub struct SearchCoordinator {
    lister: LocalModuleLister,
    registry: RegistryClient,
    resolver: ModuleResolver,
    max_concurrent: usize,
}

impl SearchCoordinator {
    /// Creates a coordinator from loaded configuration.
    pub fn new(config: &ModqueryConfig) -> Result<Self, ModqueryError> {
        let registry = RegistryClient::from_config(config)?;
        let resolver = ModuleResolver::new(LocalModuleReader::new(config), registry.clone());
        Ok(Self {
            lister: LocalModuleLister::new(config),
            registry,
            resolver,
            max_concurrent: config.max_concurrent_resolutions.max(1),
        })
    }

    /// Resolves a single identifier. Convenience passthrough to the
    /// underlying [`ModuleResolver`].
    pub async fn resolve(&self, identifier: &str) -> Result<ModuleDescriptor, ModqueryError> {
        self.resolver.resolve(identifier).await
    }

    /// Searches both sources for modules matching `query`.
    ///
    /// Local matches are returned first, in listing order; remote matches
    /// follow in the registry's order. No de-duplication is performed:
    /// local-first ordering alone establishes precedence.
    pub async fn search(
        &self,
        query: &str,
        options: &SearchOptions,
    ) -> Result<SearchOutcome, ModqueryError> {
        let (local, remote) = tokio::try_join!(
            self.local_branch(query),
            self.remote_branch(query, options),
        )?;

        let (mut descriptors, mut failures) = local;
        let (remote_descriptors, remote_failures) = remote;
        descriptors.extend(remote_descriptors);
        failures.extend(remote_failures);

        Ok(SearchOutcome {
            descriptors,
            failures,
        })
    }

    /// Lists local modules and resolves those whose final path segment
    /// contains `query` (case-sensitive; empty query matches everything).
    async fn local_branch(
        &self,
        query: &str,
    ) -> Result<(Vec<ModuleDescriptor>, Vec<ResolveFailure>), ModqueryError> {
        let identifiers = self.lister.list().await?;
        let matched: Vec<String> = identifiers
            .into_iter()
            .filter(|id| final_segment(id).contains(query))
            .collect();
        Ok(self.resolve_all(matched).await)
    }

    /// Queries the registry and resolves every returned name.
    async fn remote_branch(
        &self,
        query: &str,
        options: &SearchOptions,
    ) -> Result<(Vec<ModuleDescriptor>, Vec<ResolveFailure>), ModqueryError> {
        let names = self
            .registry
            .search(query, &options.keywords, options.include_scoped)
            .await?;
        Ok(self.resolve_all(names).await)
    }

    /// Resolves identifiers with bounded concurrency, preserving input
    /// order. Per-identifier failures are collected, not propagated.
    async fn resolve_all(
        &self,
        identifiers: Vec<String>,
    ) -> (Vec<ModuleDescriptor>, Vec<ResolveFailure>) {
        let results: Vec<(String, Result<ModuleDescriptor, ModqueryError>)> =
            stream::iter(identifiers)
                .map(|identifier| async move {
                    let result = self.resolver.resolve(&identifier).await;
                    (identifier, result)
                })
                .buffered(self.max_concurrent)
                .collect()
                .await;

        let mut descriptors = Vec::new();
        let mut failures = Vec::new();
        for (identifier, result) in results {
            match result {
                Ok(descriptor) => descriptors.push(descriptor),
                Err(error) => failures.push(ResolveFailure { identifier, error }),
            }
        }
        (descriptors, failures)
    }
}

/// Final path segment of an identifier, used for local substring matching.
fn final_segment(identifier: &str) -> &str {
    identifier.rsplit('/').next().unwrap_or(identifier)
}
