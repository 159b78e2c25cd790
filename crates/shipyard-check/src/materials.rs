//! Materials database verification.

use crate::report::{CheckReport, DiagnosticKind};
use shipyard_db::{MANDATORY_FIELDS, MaterialDatabase, Rgb};
use std::collections::{BTreeMap, BTreeSet};

pub const MATERIALS_CHECK_KIND: &str = "shipyard.materials.verify.v1";

const ROPE_UNIQUE_TYPE: &str = "Rope";

/// Run every materials check over `db`.
pub fn verify_materials(db: &MaterialDatabase) -> CheckReport {
    let mut report = CheckReport::new(MATERIALS_CHECK_KIND);
    report.scanned = db.materials.len();

    check_colors(db, &mut report);
    check_names(db, &mut report);
    check_records(db, &mut report);
    if db.palettes.is_some() {
        check_palette_sync(db, &mut report);
    }

    report
}

fn subject(db: &MaterialDatabase, index: usize) -> String {
    match db.materials[index].name() {
        Some(name) => name.to_string(),
        None => format!("material #{index}"),
    }
}

fn check_colors(db: &MaterialDatabase, report: &mut CheckReport) {
    let mut owners: BTreeMap<Rgb, String> = BTreeMap::new();
    for (index, material) in db.materials.iter().enumerate() {
        for key in material.color_keys().unwrap_or_default() {
            match Rgb::parse_hex(&key) {
                Ok(color) => {
                    if let Some(owner) = owners.get(&color) {
                        report.push(
                            DiagnosticKind::DuplicateColor,
                            subject(db, index),
                            format!("color '{key}' is a duplicate of a color of '{owner}'"),
                        );
                    } else {
                        owners.insert(color, subject(db, index));
                    }
                }
                Err(err) => report.push(DiagnosticKind::InvalidColor, subject(db, index), err.to_string()),
            }
        }
    }
}

fn check_names(db: &MaterialDatabase, report: &mut CheckReport) {
    let mut names = BTreeSet::new();
    for (index, material) in db.materials.iter().enumerate() {
        match material.name() {
            None => report.push(
                DiagnosticKind::MissingName,
                subject(db, index),
                "missing 'name' field",
            ),
            Some(name) => {
                if !names.insert(name) {
                    report.push(
                        DiagnosticKind::DuplicateName,
                        name,
                        format!("material name '{name}' is duplicate"),
                    );
                }
            }
        }
    }
}

fn check_records(db: &MaterialDatabase, report: &mut CheckReport) {
    for (index, material) in db.materials.iter().enumerate() {
        let subject = subject(db, index);
        let legacy_electrical = material.is_legacy_electrical();

        // `name` is covered by check_names.
        for field in MANDATORY_FIELDS.iter().filter(|field| **field != "name") {
            if !material.contains(field) {
                report.push(
                    DiagnosticKind::MissingField,
                    &subject,
                    format!("missing '{field}' field"),
                );
            }
        }
        if !legacy_electrical
            && !material.contains("render_color")
            && !material.contains("texture_name")
        {
            report.push(
                DiagnosticKind::MissingField,
                &subject,
                "missing 'render_color' or 'texture_name' field",
            );
        }

        if material.unique_type() != Some(ROPE_UNIQUE_TYPE) {
            let clashes = material
                .color_keys()
                .unwrap_or_default()
                .iter()
                .filter_map(|key| Rgb::parse_hex(key).ok())
                .filter(|color| color.is_legacy_rope())
                .collect::<Vec<_>>();
            for color in clashes {
                report.push(
                    DiagnosticKind::RopeColorClash,
                    &subject,
                    format!("color key {color} clashes with legacy ropes' color keys"),
                );
            }
        }

        if !material.contains("palette_coordinates") {
            if !material.is_exempt_from_palette() && !legacy_electrical {
                report.push(
                    DiagnosticKind::MissingPaletteCoordinates,
                    &subject,
                    "has no 'palette_coordinates' but is not exempt from palette",
                );
            }
        } else if let Some(Err(err)) = material.parse_palette_coordinates() {
            report.push(
                DiagnosticKind::MissingField,
                &subject,
                format!("'palette_coordinates' is malformed: {err}"),
            );
        }
    }
}

fn check_palette_sync(db: &MaterialDatabase, report: &mut CheckReport) {
    let Some(palettes) = db.palettes.as_ref() else {
        return;
    };

    for name in palettes.unreadable_palettes() {
        report.push(
            DiagnosticKind::PaletteMismatch,
            name,
            "palette is not a list of categories with named groups",
        );
    }

    let listed: BTreeSet<(&str, &str)> = palettes
        .groups()
        .flat_map(|(category, group)| {
            group
                .sub_categories
                .iter()
                .map(move |sub| (category.category.as_str(), sub.as_str()))
        })
        .collect();

    let mut used: BTreeSet<(String, String)> = BTreeSet::new();
    for (index, material) in db.materials.iter().enumerate() {
        let Some((category, sub_category)) = material.palette_slot() else {
            continue;
        };
        if !palettes.has_category(category) {
            report.push(
                DiagnosticKind::PaletteMismatch,
                subject(db, index),
                format!("category '{category}' is not in any palette"),
            );
        } else if !listed.contains(&(category, sub_category)) {
            report.push(
                DiagnosticKind::PaletteMismatch,
                subject(db, index),
                format!(
                    "sub-category '{sub_category}' is not listed in any group of category '{category}'"
                ),
            );
        }
        used.insert((category.to_string(), sub_category.to_string()));
    }

    for (category, group) in palettes.groups() {
        for sub in &group.sub_categories {
            if !used.contains(&(category.category.clone(), sub.clone())) {
                report.push(
                    DiagnosticKind::PaletteMismatch,
                    &group.name,
                    format!("group lists sub-category '{sub}' which no material uses"),
                );
            }
        }
    }
}
