// SPDX-FileCopyrightText: 2026 Modquery Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Module manifest parsing (`package.json`-equivalent).
//!
//! Manifests are external documents: every field is optional and unknown
//! fields are ignored. Capability fields (`client`, `server`, `worker`) are
//! free-form in the wild -- booleans in some modules, entrypoint path strings
//! in others -- so they are kept as raw JSON values and collapsed to booleans
//! via [`is_truthy`].

use serde::Deserialize;
use serde_json::Value;

/// Version reported for a local module whose manifest omits `version`.
pub const FALLBACK_VERSION: &str = "0.0.1";

/// Parsed module manifest.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ModuleManifest {
    /// Declared name of the module.
    #[serde(default)]
    pub name: Option<String>,
    /// Declared version. Absence is not an error; see [`FALLBACK_VERSION`].
    #[serde(default)]
    pub version: Option<String>,
    /// Human-readable description.
    #[serde(default)]
    pub description: Option<String>,
    /// Client-side capability declaration (any truthy value enables it).
    #[serde(default)]
    pub client: Option<Value>,
    /// Server-side capability declaration.
    #[serde(default)]
    pub server: Option<Value>,
    /// Background-worker capability declaration.
    #[serde(default)]
    pub worker: Option<Value>,
}

impl ModuleManifest {
    /// Parse a manifest from raw JSON text. Fails when the text is not a
    /// JSON object.
    pub fn parse(raw: &str) -> Result<Self, serde_json::Error> {
        use serde::de::Error;

        // Derived Deserialize would also accept a JSON array (all fields
        // are defaulted); manifests must be objects.
        let value: Value = serde_json::from_str(raw)?;
        if !value.is_object() {
            return Err(serde_json::Error::custom("manifest must be a JSON object"));
        }
        serde_json::from_value(value)
    }

    /// Declared version, or the fallback when the manifest omits one.
    pub fn version_or_default(&self) -> &str {
        self.version.as_deref().unwrap_or(FALLBACK_VERSION)
    }
}

/// JavaScript-style truthiness for capability fields: absent, `null`,
/// `false`, numeric zero, and the empty string are falsy; everything else
/// is truthy.
pub fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_) | Value::Object(_)) => true,
    }
}
