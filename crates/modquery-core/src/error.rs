// SPDX-FileCopyrightText: 2026 Modquery Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the modquery resolution engine.

use thiserror::Error;

/// The primary error type used across all modquery resolution and search operations.
#[derive(Debug, Error)]
pub enum ModqueryError {
    /// Local manifest missing or unparsable for the named identifier.
    #[error("failed to read manifest for {identifier}: {message}")]
    Manifest { identifier: String, message: String },

    /// An identifier claims to be local but falls outside the configured module root.
    #[error("invalid local module path: {path}")]
    InvalidPath { path: String },

    /// Non-2xx registry/CDN response, malformed response shape, or
    /// transport-level connection failure (reported with status 500).
    #[error("registry error ({status}): {message}")]
    Registry { status: u16, message: String },

    /// Filesystem errors other than the "absent is not an error" cases.
    #[error("i/o error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ModqueryError {
    /// Registry error for a transport-level failure, before any status line
    /// was received. The contract maps these to status 500.
    pub fn transport(message: impl Into<String>) -> Self {
        ModqueryError::Registry {
            status: 500,
            message: message.into(),
        }
    }
}
