//! Ship manifests (`.shp`).

use crate::error::DbError;
use crate::json_io::{self, Dialect};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;

/// Manifest members that name asset files, in check order.
pub const ASSET_FIELDS: [&str; 4] = [
    "structure_image",
    "electrical_image",
    "ropes_image",
    "texture_image",
];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShipManifest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub structure_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub electrical_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ropes_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub texture_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ship_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    /// Either a number or free text in existing manifests.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year_built: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ShipManifest {
    /// Manifests are hand-written and may carry `//` comments.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DbError> {
        json_io::load_document(path, Dialect::Commented)
    }

    /// `(field, file name)` for every asset the manifest names.
    pub fn asset_references(&self) -> Vec<(&'static str, &str)> {
        let slots = [
            &self.structure_image,
            &self.electrical_image,
            &self.ropes_image,
            &self.texture_image,
        ];
        ASSET_FIELDS
            .iter()
            .zip(slots)
            .filter_map(|(field, value)| value.as_deref().map(|file| (*field, file)))
            .collect()
    }
}
