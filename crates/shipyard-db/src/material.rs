//! Material records and the materials database document.
//!
//! A `Material` keeps its JSON object as-is so that fields no tool knows about,
//! and the integer/float spelling of numbers, survive a load/save cycle. Typed
//! accessors cover the fields the tools read and write.

use crate::color::{ColorSet, Rgb};
use crate::error::DbError;
use crate::json_io::{self, Dialect};
use crate::palette::Palettes;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;

/// Fields every material must carry.
pub const MANDATORY_FIELDS: [&str; 2] = ["color_key", "name"];

const UNNAMED: &str = "<unnamed>";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Material(Map<String, Value>);

/// UI placement of a material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaletteCoordinates {
    pub category: String,
    pub sub_category: String,
    #[serde(default)]
    pub sub_category_ordinal: i64,
}

impl Material {
    pub fn from_map(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn set(&mut self, field: &str, value: impl Into<Value>) {
        self.0.insert(field.to_string(), value.into());
    }

    pub fn name(&self) -> Option<&str> {
        self.get("name").and_then(Value::as_str)
    }

    /// The name, or a placeholder for diagnostics on unnamed records.
    pub fn label(&self) -> &str {
        self.name().unwrap_or(UNNAMED)
    }

    pub fn set_name(&mut self, name: &str) {
        self.set("name", name);
    }

    /// Color keys as written, normalized to a list. `None` when absent.
    ///
    /// Non-string entries come back as their JSON text so that they fail
    /// color parsing downstream instead of vanishing.
    pub fn color_keys(&self) -> Option<Vec<String>> {
        let as_text = |value: &Value| match value {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        };
        match self.get("color_key")? {
            Value::Array(items) => Some(items.iter().map(as_text).collect()),
            other => Some(vec![as_text(other)]),
        }
    }

    /// Whether `color_key` is spelled as a list.
    pub fn has_color_key_list(&self) -> bool {
        matches!(self.get("color_key"), Some(Value::Array(_)))
    }

    /// Parsed color keys; fails on the first malformed key.
    pub fn colors(&self) -> Result<Vec<Rgb>, DbError> {
        let keys = self
            .color_keys()
            .ok_or_else(|| DbError::field(self.label(), "missing `color_key`"))?;
        keys.iter().map(|key| Rgb::parse_hex(key)).collect()
    }

    /// Replace the color keys. A single key is written as a plain string
    /// unless `as_list` is set.
    pub fn set_colors(&mut self, colors: &[Rgb], as_list: bool) {
        let hex: Vec<Value> = colors.iter().map(|c| Value::String(c.to_hex())).collect();
        if !as_list && hex.len() == 1 {
            self.set("color_key", hex[0].clone());
        } else {
            self.set("color_key", hex);
        }
    }

    /// A boolean flag; absent or non-boolean reads as `false`.
    pub fn flag(&self, field: &str) -> bool {
        self.get(field).and_then(Value::as_bool).unwrap_or(false)
    }

    pub fn is_legacy_electrical(&self) -> bool {
        self.flag("is_legacy_electrical")
    }

    pub fn is_exempt_from_palette(&self) -> bool {
        self.flag("is_exempt_from_palette")
    }

    pub fn unique_type(&self) -> Option<&str> {
        self.get("unique_type").and_then(Value::as_str)
    }

    pub fn number(&self, field: &str) -> Option<f64> {
        self.get(field).and_then(Value::as_f64)
    }

    pub fn require_number(&self, field: &str) -> Result<f64, DbError> {
        self.number(field)
            .ok_or_else(|| DbError::field(self.label(), format!("missing numeric `{field}`")))
    }

    fn mass_member(&self, member: &str) -> Option<f64> {
        self.get("mass")?.get(member)?.as_f64()
    }

    pub fn nominal_mass(&self) -> Option<f64> {
        self.mass_member("nominal_mass")
    }

    pub fn density(&self) -> Option<f64> {
        self.mass_member("density")
    }

    /// `(nominal_mass, density)`; fails when either is missing.
    pub fn require_mass(&self) -> Result<(f64, f64), DbError> {
        match (self.nominal_mass(), self.density()) {
            (Some(nominal_mass), Some(density)) => Ok((nominal_mass, density)),
            _ => Err(DbError::field(
                self.label(),
                "missing `mass.nominal_mass` or `mass.density`",
            )),
        }
    }

    /// Set both mass members, keeping any other members of `mass`.
    pub fn set_mass(&mut self, nominal_mass: f64, density: f64) {
        let mass = self
            .0
            .entry("mass")
            .or_insert_with(|| Value::Object(Map::new()));
        if !mass.is_object() {
            *mass = Value::Object(Map::new());
        }
        if let Value::Object(members) = mass {
            members.insert("nominal_mass".to_string(), Value::from(nominal_mass));
            members.insert("density".to_string(), Value::from(density));
        }
    }

    /// Parsed palette coordinates; `None` when absent or malformed.
    pub fn palette_coordinates(&self) -> Option<PaletteCoordinates> {
        self.parse_palette_coordinates()?.ok()
    }

    /// Typed parse of `palette_coordinates`; `None` when the member is absent.
    pub fn parse_palette_coordinates(
        &self,
    ) -> Option<Result<PaletteCoordinates, serde_json::Error>> {
        let raw = self.get("palette_coordinates")?;
        Some(serde_json::from_value(raw.clone()))
    }

    /// `(category, sub_category)` read as plain strings, whatever the other
    /// coordinate members hold.
    pub fn palette_slot(&self) -> Option<(&str, &str)> {
        let coordinates = self.get("palette_coordinates")?;
        Some((
            coordinates.get("category")?.as_str()?,
            coordinates.get("sub_category")?.as_str()?,
        ))
    }

    pub fn set_palette_sub_category(&mut self, sub_category: &str) -> Result<(), DbError> {
        let label = self.label().to_string();
        match self.0.get_mut("palette_coordinates") {
            Some(Value::Object(coordinates)) => {
                coordinates.insert(
                    "sub_category".to_string(),
                    Value::String(sub_category.to_string()),
                );
                Ok(())
            }
            _ => Err(DbError::field(&label, "missing `palette_coordinates`")),
        }
    }
}

/// A materials file: `{"materials": [...], "palettes": {...}}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MaterialDatabase {
    pub materials: Vec<Material>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub palettes: Option<Palettes>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl MaterialDatabase {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DbError> {
        Self::load_with(path, Dialect::Strict)
    }

    pub fn load_with(path: impl AsRef<Path>, dialect: Dialect) -> Result<Self, DbError> {
        let db: Self = json_io::load_document(path.as_ref(), dialect)?;
        tracing::debug!(
            path = %path.as_ref().display(),
            materials = db.materials.len(),
            "loaded materials"
        );
        Ok(db)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), DbError> {
        json_io::save_document(path, self)
    }

    /// Every well-formed color key in the database. Malformed keys are
    /// skipped; `shipyard-check` reports them.
    pub fn color_set(&self) -> ColorSet {
        let mut colors = ColorSet::new();
        for material in &self.materials {
            for key in material.color_keys().unwrap_or_default() {
                match Rgb::parse_hex(&key) {
                    Ok(color) => {
                        if !colors.insert(color) {
                            tracing::warn!(material = material.label(), color = %key, "duplicate color key");
                        }
                    }
                    Err(_) => {
                        tracing::warn!(material = material.label(), color = %key, "skipping malformed color key");
                    }
                }
            }
        }
        colors
    }

    /// Indices of materials named exactly `name`.
    pub fn positions_by_name(&self, name: &str) -> Vec<usize> {
        self.materials
            .iter()
            .enumerate()
            .filter(|(_, material)| material.name() == Some(name))
            .map(|(index, _)| index)
            .collect()
    }
}
