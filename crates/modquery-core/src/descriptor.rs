// SPDX-FileCopyrightText: 2026 Modquery Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Normalized module descriptors.
//!
//! A [`ModuleDescriptor`] is the single output shape of resolution,
//! regardless of whether the module came from the local filesystem or the
//! remote registry. Descriptors are constructed fresh per query and owned by
//! the caller; there is no persistence or update path.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::manifest::{is_truthy, ModuleManifest};
use crate::reference::ModuleRef;

/// Reserved classifier vector attached to every descriptor. Opaque: its
/// values carry no semantics inside this engine.
pub const DEFAULT_TAG_MATRIX: [u8; 10] = [0, 0, 0, 0, 0, 0, 1, 1, 1, 1];

/// Normalized descriptor for one resolved module.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleDescriptor {
    /// Resolution key: absolute path for local modules, bare name for
    /// registry packages.
    pub id: String,
    /// Manifest's declared name (identifier when the manifest omits one).
    pub name: String,
    /// Same value as `name`, kept for historical compatibility.
    pub display_name: String,
    /// Manifest's declared version.
    pub version: String,
    /// Known published versions. Never empty.
    pub versions: Vec<String>,
    /// Manifest description, if declared.
    pub description: Option<String>,
    /// Rendered HTML readme, or `None` when the module has no readme.
    pub readme: Option<String>,
    /// Module declares client-side functionality.
    pub has_client: bool,
    /// Module declares server-side functionality.
    pub has_server: bool,
    /// Module declares background-worker functionality.
    pub has_worker: bool,
    /// True iff the module was resolved from the local filesystem.
    pub is_local: bool,
    /// Reserved field for a downstream classifier.
    pub tag_matrix: [u8; 10],
    /// Reserved extensible annotation map. Always empty.
    pub metadata: Map<String, Value>,
}

impl ModuleDescriptor {
    /// Assemble a descriptor from the three sub-fetch results.
    ///
    /// `readme_html` must already be rendered; raw markdown never reaches
    /// the descriptor.
    pub fn from_parts(
        mref: &ModuleRef,
        manifest: &ModuleManifest,
        versions: Vec<String>,
        readme_html: Option<String>,
    ) -> Self {
        let id = mref.id();
        let name = manifest.name.clone().unwrap_or_else(|| id.clone());
        let version = manifest.version_or_default().to_string();
        // Guarantees the never-empty invariant even for a registry response
        // with an empty version map.
        let versions = if versions.is_empty() {
            vec![version.clone()]
        } else {
            versions
        };

        Self {
            id,
            display_name: name.clone(),
            name,
            version,
            versions,
            description: manifest.description.clone(),
            readme: readme_html,
            has_client: is_truthy(manifest.client.as_ref()),
            has_server: is_truthy(manifest.server.as_ref()),
            has_worker: is_truthy(manifest.worker.as_ref()),
            is_local: mref.is_local(),
            tag_matrix: DEFAULT_TAG_MATRIX,
            metadata: Map::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manifest(raw: &str) -> ModuleManifest {
        ModuleManifest::parse(raw).unwrap()
    }

    #[test]
    fn local_descriptor_from_full_manifest() {
        let mref = ModuleRef::parse("/plugins/foo-plugin");
        let m = manifest(
            r#"{"name": "foo-plugin", "version": "2.0.0", "description": "d", "client": "client.js"}"#,
        );
        let desc = ModuleDescriptor::from_parts(&mref, &m, vec!["2.0.0".into()], None);

        assert_eq!(desc.id, "/plugins/foo-plugin");
        assert_eq!(desc.name, "foo-plugin");
        assert_eq!(desc.display_name, desc.name);
        assert_eq!(desc.version, "2.0.0");
        assert_eq!(desc.versions, vec!["2.0.0"]);
        assert!(desc.has_client);
        assert!(!desc.has_server);
        assert!(desc.is_local);
        assert_eq!(desc.tag_matrix, DEFAULT_TAG_MATRIX);
        assert!(desc.metadata.is_empty());
    }

    #[test]
    fn name_falls_back_to_identifier() {
        let mref = ModuleRef::parse("some-package");
        let desc = ModuleDescriptor::from_parts(&mref, &manifest("{}"), vec!["1.0.0".into()], None);
        assert_eq!(desc.name, "some-package");
        assert!(!desc.is_local);
    }

    #[test]
    fn versions_never_empty() {
        let mref = ModuleRef::parse("empty-versions");
        let desc = ModuleDescriptor::from_parts(&mref, &manifest("{}"), Vec::new(), None);
        assert_eq!(desc.versions, vec!["0.0.1"]);
    }

    #[test]
    fn serializes_with_historical_field_names() {
        let mref = ModuleRef::parse("/plugins/x");
        let m = manifest(r#"{"name": "x", "version": "1.0.0"}"#);
        let desc = ModuleDescriptor::from_parts(&mref, &m, vec!["1.0.0".into()], Some("<p>hi</p>".into()));

        let json = serde_json::to_value(&desc).unwrap();
        assert_eq!(json["displayName"], "x");
        assert_eq!(json["hasClient"], false);
        assert_eq!(json["isLocal"], true);
        assert_eq!(json["tagMatrix"].as_array().unwrap().len(), 10);
        assert_eq!(json["readme"], "<p>hi</p>");
    }
}
