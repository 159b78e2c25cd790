//! NPC database: human and furniture kinds and the textures they are drawn with.

use crate::error::DbError;
use crate::json_io::{self, Dialect};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::Path;

/// A kind that is drawn from one or more texture files.
pub trait TexturedKind {
    /// Human-readable name for messages.
    fn label(&self) -> String;

    /// Texture file stems, in a stable order.
    fn texture_stems(&self) -> Vec<&str>;

    fn render_color(&self) -> Option<&str>;

    fn set_render_color(&mut self, color: String);
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NpcDatabase {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub humans: Option<NpcSection<HumanKind>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub furniture: Option<NpcSection<FurnitureKind>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NpcSection<K> {
    #[serde(default = "Vec::new")]
    pub kinds: Vec<K>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HumanKind {
    #[serde(default)]
    pub name: Value,
    /// Body part (`head_f`, `torso_b`, ...) → texture file stem.
    pub texture_filename_stems: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub render_color: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FurnitureKind {
    #[serde(default)]
    pub name: Value,
    pub texture_filename_stem: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub render_color: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl NpcDatabase {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DbError> {
        json_io::load_document(path, Dialect::Strict)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), DbError> {
        json_io::save_document(path, self)
    }

    /// Every kind, humans first.
    pub fn kinds_mut(&mut self) -> Vec<&mut dyn TexturedKind> {
        let mut kinds: Vec<&mut dyn TexturedKind> = Vec::new();
        if let Some(humans) = self.humans.as_mut() {
            kinds.extend(humans.kinds.iter_mut().map(|k| k as &mut dyn TexturedKind));
        }
        if let Some(furniture) = self.furniture.as_mut() {
            kinds.extend(furniture.kinds.iter_mut().map(|k| k as &mut dyn TexturedKind));
        }
        kinds
    }
}

/// Names are either a plain string or a list of `{language, value}` entries;
/// prefer English, then the first entry.
fn display_name(name: &Value) -> String {
    match name {
        Value::String(text) => text.clone(),
        Value::Array(entries) => {
            let value_of = |entry: &Value| entry.get("value").and_then(Value::as_str).map(str::to_string);
            entries
                .iter()
                .find(|entry| {
                    entry
                        .get("language")
                        .and_then(Value::as_str)
                        .is_some_and(|language| language.eq_ignore_ascii_case("en"))
                })
                .and_then(value_of)
                .or_else(|| entries.first().and_then(value_of))
                .unwrap_or_else(|| "<unnamed>".to_string())
        }
        _ => "<unnamed>".to_string(),
    }
}

impl TexturedKind for HumanKind {
    fn label(&self) -> String {
        display_name(&self.name)
    }

    fn texture_stems(&self) -> Vec<&str> {
        self.texture_filename_stems.values().map(String::as_str).collect()
    }

    fn render_color(&self) -> Option<&str> {
        self.render_color.as_deref()
    }

    fn set_render_color(&mut self, color: String) {
        self.render_color = Some(color);
    }
}

impl TexturedKind for FurnitureKind {
    fn label(&self) -> String {
        display_name(&self.name)
    }

    fn texture_stems(&self) -> Vec<&str> {
        vec![self.texture_filename_stem.as_str()]
    }

    fn render_color(&self) -> Option<&str> {
        self.render_color.as_deref()
    }

    fn set_render_color(&mut self, color: String) {
        self.render_color = Some(color);
    }
}
