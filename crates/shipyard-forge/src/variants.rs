//! Material family synthesis.
//!
//! A family is six materials sharing a stem (`Steel Hull`, `Light Steel
//! I-Beam`, ...). Existing members are claimed out of the database, missing
//! ones are derived from the Light I-Beam base, and the whole family is put
//! back as one contiguous block.

use crate::error::ForgeError;
use shipyard_db::{ColorSet, Material, MaterialDatabase, Rgb, RgbOffset};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum VariantKind {
    Hull,
    LightIBeam,
    SolidIBeam,
    LightBulkhead,
    SolidBulkhead,
    LowGrade,
}

impl VariantKind {
    /// Order of the family once written back.
    pub const INSERTION_ORDER: [VariantKind; 6] = [
        VariantKind::Hull,
        VariantKind::SolidBulkhead,
        VariantKind::LightBulkhead,
        VariantKind::SolidIBeam,
        VariantKind::LightIBeam,
        VariantKind::LowGrade,
    ];

    pub fn label(self) -> &'static str {
        match self {
            VariantKind::Hull => "Hull",
            VariantKind::LightIBeam => "Light I-Beam",
            VariantKind::SolidIBeam => "Solid I-Beam",
            VariantKind::LightBulkhead => "Light Bulkhead",
            VariantKind::SolidBulkhead => "Solid Bulkhead",
            VariantKind::LowGrade => "Low-Grade",
        }
    }

    pub fn canonical_name(self, stem: &str) -> String {
        match self {
            VariantKind::Hull => format!("{stem} Hull"),
            VariantKind::LightIBeam => format!("Light {stem} I-Beam"),
            VariantKind::SolidIBeam => format!("Solid {stem} I-Beam"),
            VariantKind::LightBulkhead => format!("Light {stem} Bulkhead"),
            VariantKind::SolidBulkhead => format!("Solid {stem} Bulkhead"),
            VariantKind::LowGrade => format!("Low-Grade {stem}"),
        }
    }
}

impl fmt::Display for VariantKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How a synthesized variant's color keys relate to the base's.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorOffset {
    /// The same offset on every channel.
    Uniform(i32),
    /// `n/5` of the per-key hull delta (hull - base), truncated.
    HullFifths(i32),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VariantSpec {
    pub kind: VariantKind,
    pub nominal_mass_offset: f64,
    pub density_multiplier: f64,
    pub impermeable: bool,
    pub strength_multiplier: f64,
    pub color_offset: ColorOffset,
}

/// Resolution order: Hull first, since the other colors derive from it.
pub const VARIANT_TABLE: [VariantSpec; 6] = [
    VariantSpec {
        kind: VariantKind::Hull,
        nominal_mass_offset: 100.0,
        density_multiplier: 10.0,
        impermeable: true,
        strength_multiplier: 1.0,
        color_offset: ColorOffset::Uniform(-64),
    },
    VariantSpec {
        kind: VariantKind::LightIBeam,
        nominal_mass_offset: 0.0,
        density_multiplier: 1.0,
        impermeable: false,
        strength_multiplier: 1.0,
        color_offset: ColorOffset::Uniform(0),
    },
    VariantSpec {
        kind: VariantKind::SolidIBeam,
        nominal_mass_offset: 100.0,
        density_multiplier: 10.0,
        impermeable: false,
        strength_multiplier: 1.07,
        color_offset: ColorOffset::HullFifths(2),
    },
    VariantSpec {
        kind: VariantKind::LightBulkhead,
        nominal_mass_offset: 0.0,
        density_multiplier: 1.0,
        impermeable: true,
        strength_multiplier: 1.0,
        color_offset: ColorOffset::HullFifths(3),
    },
    VariantSpec {
        kind: VariantKind::SolidBulkhead,
        nominal_mass_offset: 0.0,
        density_multiplier: 4.0,
        impermeable: true,
        strength_multiplier: 1.07,
        color_offset: ColorOffset::HullFifths(4),
    },
    VariantSpec {
        kind: VariantKind::LowGrade,
        nominal_mass_offset: 0.0,
        density_multiplier: 1.0,
        impermeable: false,
        strength_multiplier: 0.3,
        color_offset: ColorOffset::HullFifths(1),
    },
];

impl VariantSpec {
    /// Derive this variant from `base`, claiming fresh color keys.
    fn synthesize(
        &self,
        base: &Material,
        name: &str,
        offsets: &[RgbOffset],
        colors: &mut ColorSet,
    ) -> Result<Material, ForgeError> {
        let (nominal_mass, density) = base.require_mass()?;
        let strength = base.require_number("strength")?;
        let base_colors = base.colors()?;

        let mut material = base.clone();
        material.set_name(name);
        material.set_palette_sub_category(name)?;
        material.set_mass(
            nominal_mass + self.nominal_mass_offset,
            density * self.density_multiplier,
        );
        let new_colors = base_colors
            .iter()
            .zip(offsets)
            .map(|(color, offset)| colors.claim_derived(*color, *offset))
            .collect::<Result<Vec<_>, _>>()?;
        material.set_colors(&new_colors, base.has_color_key_list());
        material.set("is_hull", self.impermeable);
        material.set(
            "buoyancy_volume_fill",
            if self.impermeable { 0.0 } else { 1.0 },
        );
        material.set("strength", strength * self.strength_multiplier);
        Ok(material)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotAction {
    Synthesized,
    Renamed { from: String },
    Kept,
}

/// The fields printed for each family member after synthesis.
#[derive(Debug, Clone, PartialEq)]
pub struct VariantDump {
    pub name: String,
    pub nominal_mass: Option<f64>,
    pub density: Option<f64>,
    pub is_hull: Option<bool>,
    pub buoyancy_volume_fill: Option<f64>,
    pub strength: Option<f64>,
}

impl VariantDump {
    fn of(material: &Material) -> Self {
        Self {
            name: material.label().to_string(),
            nominal_mass: material.nominal_mass(),
            density: material.density(),
            is_hull: material.get("is_hull").and_then(|v| v.as_bool()),
            buoyancy_volume_fill: material.number("buoyancy_volume_fill"),
            strength: material.number("strength"),
        }
    }

    pub fn total_mass(&self) -> Option<f64> {
        Some(self.nominal_mass? * self.density?)
    }
}

fn or_dash<T: fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

impl fmt::Display for VariantDump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: n_mass={} density={} mass={} is_hull={} buoyancy_volume_fill={} strength={}",
            self.name,
            or_dash(self.nominal_mass),
            or_dash(self.density),
            or_dash(self.total_mass()),
            or_dash(self.is_hull),
            or_dash(self.buoyancy_volume_fill),
            or_dash(self.strength),
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VariantReport {
    pub stem: String,
    /// Names of the claimed materials, in database order.
    pub found: Vec<String>,
    /// One entry per slot, in resolution order.
    pub actions: Vec<(VariantKind, SlotAction)>,
    pub dump: Vec<VariantDump>,
}

enum Classification {
    Unrelated,
    Unrecognized,
    Variant(VariantKind),
}

fn classify(name: &str, stem: &str) -> Classification {
    let words: Vec<&str> = name.split(' ').collect();
    if !words.contains(&stem) {
        return Classification::Unrelated;
    }
    let is = |kind: VariantKind| name == kind.canonical_name(stem);
    let has_word = |word: &str| words.contains(&word);

    let kind = if words.len() == 2 && words[1] == "Hull" {
        VariantKind::Hull
    } else if words.len() == 1 || is(VariantKind::LightIBeam) {
        VariantKind::LightIBeam
    } else if is(VariantKind::SolidIBeam) || has_word("Structural") {
        VariantKind::SolidIBeam
    } else if is(VariantKind::LightBulkhead) {
        VariantKind::LightBulkhead
    } else if is(VariantKind::SolidBulkhead) {
        VariantKind::SolidBulkhead
    } else if is(VariantKind::LowGrade) || has_word("Cheap") {
        VariantKind::LowGrade
    } else {
        return Classification::Unrecognized;
    };
    Classification::Variant(kind)
}

fn slot_offsets(
    spec: &VariantSpec,
    base_colors: &[Rgb],
    claimed: &BTreeMap<VariantKind, Material>,
) -> Result<Vec<RgbOffset>, ForgeError> {
    match spec.color_offset {
        ColorOffset::Uniform(value) => Ok(vec![RgbOffset::uniform(value); base_colors.len()]),
        ColorOffset::HullFifths(fifths) => {
            let hull_colors = match claimed.get(&VariantKind::Hull) {
                Some(hull) => hull.colors()?,
                None => Vec::new(),
            };
            Ok(base_colors
                .iter()
                .zip(&hull_colors)
                .map(|(base, hull)| base.delta_to(*hull).scaled(fifths, 5))
                .collect())
        }
    }
}

/// Complete the `stem` family in `db`.
pub fn synthesize_variants(
    db: &mut MaterialDatabase,
    stem: &str,
) -> Result<VariantReport, ForgeError> {
    // Claimed variants stay in the set so their colors are never reissued.
    let mut colors = db.color_set();

    let group = db
        .palettes
        .as_mut()
        .and_then(|palettes| palettes.find_group_mut(stem))
        .ok_or_else(|| ForgeError::PaletteGroupNotFound(stem.to_string()))?;

    let mut claimed: BTreeMap<VariantKind, Material> = BTreeMap::new();
    let mut found = Vec::new();
    let mut first_index = None;
    let mut index = 0;
    while index < db.materials.len() {
        let name = db.materials[index].label().to_string();
        let kind = match classify(&name, stem) {
            Classification::Unrelated => {
                index += 1;
                continue;
            }
            Classification::Unrecognized => {
                tracing::warn!(material = %name, "found unrecognized variant");
                index += 1;
                continue;
            }
            Classification::Variant(kind) => kind,
        };
        if claimed.contains_key(&kind) {
            return Err(ForgeError::DuplicateVariant {
                variant: kind.label().to_string(),
                material: name,
            });
        }
        let material = db.materials.remove(index);
        if !group.remove_sub_category(&name) {
            tracing::debug!(material = %name, group = stem, "sub-category was not listed");
        }
        first_index.get_or_insert(index);
        found.push(name);
        claimed.insert(kind, material);
    }

    let Some(first_index) = first_index else {
        return Err(ForgeError::NoVariants(stem.to_string()));
    };
    tracing::info!(stem, count = found.len(), "found variants");

    let base = claimed
        .get(&VariantKind::LightIBeam)
        .cloned()
        .ok_or_else(|| ForgeError::MissingBase(stem.to_string()))?;
    let base_colors = base.colors()?;

    let mut actions = Vec::with_capacity(VARIANT_TABLE.len());
    for spec in &VARIANT_TABLE {
        let name = spec.kind.canonical_name(stem);
        let action = match claimed.get_mut(&spec.kind) {
            Some(material) => {
                let action = if material.name() == Some(name.as_str()) {
                    SlotAction::Kept
                } else {
                    SlotAction::Renamed {
                        from: material.label().to_string(),
                    }
                };
                material.set_name(&name);
                material.set_palette_sub_category(&name)?;
                action
            }
            None => {
                let offsets = slot_offsets(spec, &base_colors, &claimed)?;
                let material = spec.synthesize(&base, &name, &offsets, &mut colors)?;
                claimed.insert(spec.kind, material);
                SlotAction::Synthesized
            }
        };
        tracing::debug!(variant = %spec.kind, ?action, "resolved slot");
        actions.push((spec.kind, action));
    }

    let dump = VARIANT_TABLE
        .iter()
        .filter_map(|spec| claimed.get(&spec.kind))
        .map(VariantDump::of)
        .collect();

    let mut names = Vec::with_capacity(VariantKind::INSERTION_ORDER.len());
    let mut at = first_index;
    for kind in VariantKind::INSERTION_ORDER {
        if let Some(material) = claimed.remove(&kind) {
            names.push(material.label().to_string());
            db.materials.insert(at, material);
            at += 1;
        }
    }
    group.sub_categories.splice(0..0, names);

    Ok(VariantReport {
        stem: stem.to_string(),
        found,
        actions,
        dump,
    })
}
