// SPDX-FileCopyrightText: 2026 Modquery Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Registry client crate for the modquery engine.
//!
//! Wraps the package registry's JSON API and its CDN mirror behind
//! [`RegistryClient`]. The registry serves search and the per-package
//! version index; the CDN serves raw `package.json` manifests and readmes.

pub mod client;

pub use client::RegistryClient;
