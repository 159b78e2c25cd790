//! Physical-property adjusters.
//!
//! Presence rules fill absent fields with fixed defaults and never touch a
//! value that is already there. Thermal rules classify each material by name
//! and assign its thermal properties; a name no rule recognizes fails the
//! whole run before anything is changed.

use crate::error::ForgeError;
use serde_json::Value;
use shipyard_db::MaterialDatabase;
use std::collections::BTreeMap;

/// Set `field` to `default` when absent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PresenceRule {
    pub field: &'static str,
    pub default: f64,
}

pub const STRUCTURAL_DEFAULTS: [PresenceRule; 3] = [
    PresenceRule {
        field: "elasticity_coefficient",
        default: 0.5,
    },
    PresenceRule {
        field: "friction_static_coefficient",
        default: 0.25,
    },
    PresenceRule {
        field: "friction_kinetic_coefficient",
        default: 0.25,
    },
];

/// Heat generation and operating range of electrical materials (Kelvin).
pub const ELECTRICAL_DEFAULTS: [PresenceRule; 3] = [
    PresenceRule {
        field: "heat_generated",
        default: 0.0,
    },
    PresenceRule {
        field: "minimum_operating_temperature",
        default: 233.15,
    },
    PresenceRule {
        field: "maximum_operating_temperature",
        default: 373.15,
    },
];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdjustSummary {
    pub materials: usize,
    /// Field → number of materials it was added to.
    pub filled: BTreeMap<&'static str, usize>,
}

pub fn apply_presence_rules(db: &mut MaterialDatabase, rules: &[PresenceRule]) -> AdjustSummary {
    let mut summary = AdjustSummary {
        materials: db.materials.len(),
        filled: rules.iter().map(|rule| (rule.field, 0)).collect(),
    };
    for material in &mut db.materials {
        for rule in rules {
            if !material.contains(rule.field) {
                material.set(rule.field, rule.default);
                *summary.filled.entry(rule.field).or_insert(0) += 1;
                tracing::debug!(material = material.label(), field = rule.field, "filled default");
            }
        }
    }
    summary
}

/// Temperatures in Kelvin, conductivity in W/(m·K), specific heat in J/(kg·K).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThermalProperties {
    pub ignition_temperature: f64,
    pub melting_temperature: f64,
    pub thermal_conductivity: f64,
    pub specific_heat: f64,
}

/// Materials whose name contains any of `keywords` get `properties`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThermalRule {
    pub keywords: &'static [&'static str],
    pub properties: ThermalProperties,
}

impl ThermalRule {
    pub fn matches(&self, name: &str) -> bool {
        self.keywords.iter().any(|keyword| name.contains(keyword))
    }

    /// The rule's first keyword, used as its name in summaries.
    pub fn label(&self) -> &'static str {
        self.keywords.first().copied().unwrap_or("")
    }
}

const fn thermal(
    ignition_temperature: f64,
    melting_temperature: f64,
    thermal_conductivity: f64,
    specific_heat: f64,
) -> ThermalProperties {
    ThermalProperties {
        ignition_temperature,
        melting_temperature,
        thermal_conductivity,
        specific_heat,
    }
}

/// Evaluated in order; the first match wins.
///
/// Metal rows carry ignition and melting swapped: the engine ignites a point
/// as soon as it passes its ignition temperature, and metals must melt first.
pub const THERMAL_RULES: [ThermalRule; 15] = [
    // Metals (swapped).
    ThermalRule {
        keywords: &["Titanium"],
        properties: thermal(1941.0, 1473.0, 21.9, 523.0),
    },
    ThermalRule {
        keywords: &["Aluminium", "Aluminum"],
        properties: thermal(933.0, 883.0, 237.0, 897.0),
    },
    ThermalRule {
        keywords: &["Copper", "Brass", "Bronze"],
        properties: thermal(1358.0, 1273.0, 401.0, 385.0),
    },
    ThermalRule {
        keywords: &["Gold", "Silver"],
        properties: thermal(1337.0, 1273.0, 318.0, 129.0),
    },
    ThermalRule {
        keywords: &["Lead"],
        properties: thermal(600.0, 563.0, 35.3, 129.0),
    },
    ThermalRule {
        keywords: &["Steel", "Iron", "Metal"],
        properties: thermal(1643.0, 1588.0, 50.2, 490.0),
    },
    // Everything else.
    ThermalRule {
        keywords: &["Glass"],
        properties: thermal(2273.0, 1773.0, 1.0, 840.0),
    },
    ThermalRule {
        keywords: &["Ceramic", "Porcelain"],
        properties: thermal(2273.0, 1873.0, 1.5, 850.0),
    },
    ThermalRule {
        keywords: &["Concrete", "Stone", "Brick", "Rock", "Marble"],
        properties: thermal(2273.0, 1773.0, 1.7, 880.0),
    },
    ThermalRule {
        keywords: &["Carbon", "Graphite"],
        properties: thermal(973.0, 3773.0, 150.0, 710.0),
    },
    ThermalRule {
        keywords: &["Rubber"],
        properties: thermal(533.0, 453.0, 0.16, 2010.0),
    },
    ThermalRule {
        keywords: &["Plastic", "Nylon"],
        properties: thermal(723.0, 533.0, 0.2, 1670.0),
    },
    ThermalRule {
        keywords: &["Wood", "Bamboo", "Timber"],
        properties: thermal(573.0, 2273.0, 0.15, 1700.0),
    },
    ThermalRule {
        keywords: &["Paper", "Cardboard"],
        properties: thermal(506.0, 1273.0, 0.05, 1400.0),
    },
    ThermalRule {
        keywords: &["Cloth", "Fabric", "Canvas", "Rope"],
        properties: thermal(528.0, 1273.0, 0.04, 1300.0),
    },
];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThermalSummary {
    /// Rule label → number of materials it was applied to.
    pub applied: BTreeMap<&'static str, usize>,
}

fn classify<'r>(rules: &'r [ThermalRule], name: &str) -> Option<&'r ThermalRule> {
    rules.iter().find(|rule| rule.matches(name))
}

/// Assign thermal properties from `rules` to every material.
pub fn apply_thermal_rules(
    db: &mut MaterialDatabase,
    rules: &[ThermalRule],
) -> Result<ThermalSummary, ForgeError> {
    let mut assignments = Vec::with_capacity(db.materials.len());
    for material in &db.materials {
        let name = material.label();
        let rule = classify(rules, name)
            .ok_or_else(|| ForgeError::UnrecognizedMaterial(name.to_string()))?;
        assignments.push(*rule);
    }

    let mut summary = ThermalSummary::default();
    for (material, rule) in db.materials.iter_mut().zip(assignments) {
        let p = rule.properties;
        material.set("ignition_temperature", Value::from(p.ignition_temperature));
        material.set("melting_temperature", Value::from(p.melting_temperature));
        material.set("thermal_conductivity", Value::from(p.thermal_conductivity));
        material.set("specific_heat", Value::from(p.specific_heat));
        *summary.applied.entry(rule.label()).or_insert(0) += 1;
    }
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn db(value: Value) -> MaterialDatabase {
        serde_json::from_value(value).expect("database parses")
    }

    #[test]
    fn presence_rules_fill_only_missing_fields() {
        let mut db = db(json!({"materials": [
            {"name": "Steel", "color_key": "#808080"},
            {"name": "Rubber", "color_key": "#101010", "elasticity_coefficient": 0.9}
        ]}));

        let summary = apply_presence_rules(&mut db, &STRUCTURAL_DEFAULTS);

        assert_eq!(db.materials[0].number("elasticity_coefficient"), Some(0.5));
        assert_eq!(db.materials[0].number("friction_static_coefficient"), Some(0.25));
        assert_eq!(db.materials[0].number("friction_kinetic_coefficient"), Some(0.25));
        assert_eq!(db.materials[1].number("elasticity_coefficient"), Some(0.9));
        assert_eq!(summary.filled["elasticity_coefficient"], 1);
        assert_eq!(summary.filled["friction_static_coefficient"], 2);
    }

    #[test]
    fn presence_rules_are_idempotent() {
        let mut db = db(json!({"materials": [{"name": "Lamp", "color_key": "#FF0000"}]}));
        apply_presence_rules(&mut db, &ELECTRICAL_DEFAULTS);
        let once = db.clone();
        let summary = apply_presence_rules(&mut db, &ELECTRICAL_DEFAULTS);
        assert_eq!(db, once);
        assert!(summary.filled.values().all(|count| *count == 0));
    }

    #[test]
    fn thermal_rules_pick_first_match_and_keep_metal_swap() {
        let mut db = db(json!({"materials": [
            {"name": "Light Steel I-Beam", "color_key": "#808080"},
            {"name": "Oak Wood", "color_key": "#804000"}
        ]}));

        let summary = apply_thermal_rules(&mut db, &THERMAL_RULES).expect("all recognized");

        let steel = &db.materials[0];
        assert_eq!(steel.number("ignition_temperature"), Some(1643.0));
        assert_eq!(steel.number("melting_temperature"), Some(1588.0));
        assert!(steel.number("ignition_temperature") > steel.number("melting_temperature"));
        assert_eq!(db.materials[1].number("specific_heat"), Some(1700.0));
        assert_eq!(summary.applied["Steel"], 1);
        assert_eq!(summary.applied["Wood"], 1);
    }

    #[test]
    fn unrecognized_name_fails_without_changes() {
        let mut db = db(json!({"materials": [
            {"name": "Steel", "color_key": "#808080"},
            {"name": "Unobtainium", "color_key": "#00FF00"}
        ]}));
        let before = db.clone();

        let err = apply_thermal_rules(&mut db, &THERMAL_RULES).expect_err("unknown material");

        assert!(matches!(err, ForgeError::UnrecognizedMaterial(ref name) if name == "Unobtainium"));
        assert_eq!(db, before);
    }

    #[test]
    fn rule_order_decides_overlaps() {
        let rules = [
            ThermalRule {
                keywords: &["Copper"],
                properties: thermal(1.0, 1.0, 1.0, 1.0),
            },
            ThermalRule {
                keywords: &["Steel"],
                properties: thermal(2.0, 2.0, 2.0, 2.0),
            },
        ];
        assert_eq!(classify(&rules, "Copper Clad Steel").map(ThermalRule::label), Some("Copper"));
    }
}
