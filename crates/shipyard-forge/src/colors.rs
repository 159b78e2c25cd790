//! Extra color keys for one material, derived from a reference pair.
//!
//! The offset between a reference material's color and the target material's
//! color is applied to a list of base colors; each result is bumped until it
//! is free and then appended to the target's keys.

use crate::error::ForgeError;
use serde_json::Value;
use shipyard_db::{MaterialDatabase, Rgb};

/// Used when no base colors are given.
pub const DEFAULT_BASE_COLORS: [Rgb; 9] = [
    Rgb::new(0x84, 0x0E, 0x00),
    Rgb::new(0xDB, 0xCF, 0x4D),
    Rgb::new(0x80, 0x62, 0x00),
    Rgb::new(0x46, 0x7B, 0x00),
    Rgb::new(0x00, 0x6A, 0x76),
    Rgb::new(0x1B, 0x32, 0x61),
    Rgb::new(0x86, 0x00, 0x80),
    Rgb::new(0xA8, 0x4F, 0x00),
    Rgb::new(0x11, 0x11, 0x11),
];

/// Append one derived color per base color to the material named
/// `material_name`; returns the colors added.
pub fn add_colors(
    db: &mut MaterialDatabase,
    material_name: &str,
    base_reference: Rgb,
    target_reference: Rgb,
    base_colors: &[Rgb],
) -> Result<Vec<Rgb>, ForgeError> {
    let index = match db.positions_by_name(material_name).as_slice() {
        [index] => *index,
        [] => return Err(ForgeError::MaterialNotFound(material_name.to_string())),
        many => {
            return Err(ForgeError::AmbiguousMaterial {
                name: material_name.to_string(),
                count: many.len(),
            });
        }
    };

    let mut colors = db.color_set();
    let offset = base_reference.delta_to(target_reference);
    let added = base_colors
        .iter()
        .map(|base| colors.claim_derived(*base, offset))
        .collect::<Result<Vec<_>, _>>()?;

    let material = &mut db.materials[index];
    let mut keys: Vec<Value> = material
        .color_keys()
        .unwrap_or_default()
        .into_iter()
        .map(Value::String)
        .collect();
    keys.extend(added.iter().map(|color| Value::String(color.to_hex())));
    material.set("color_key", keys);
    tracing::info!(material = material_name, added = added.len(), "added color keys");
    Ok(added)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn db() -> MaterialDatabase {
        serde_json::from_value(json!({"materials": [
            {"name": "Paint", "color_key": "#202020"},
            {"name": "Tar", "color_key": "#141414"},
            {"name": "Twin", "color_key": "#A0A0A0"},
            {"name": "Twin", "color_key": "#B0B0B0"}
        ]}))
        .expect("database parses")
    }

    #[test]
    fn appends_offset_colors_as_list() {
        let mut db = db();
        let added = add_colors(
            &mut db,
            "Paint",
            Rgb::new(0x10, 0x10, 0x10),
            Rgb::new(0x20, 0x20, 0x20),
            &[Rgb::new(0x00, 0x00, 0x00), Rgb::new(0x04, 0x04, 0x04)],
        )
        .expect("material exists");

        // #101010 is free; #141414 is Tar's, so the second bumps to #151515.
        assert_eq!(added, vec![Rgb::new(0x10, 0x10, 0x10), Rgb::new(0x15, 0x15, 0x15)]);
        assert_eq!(
            db.materials[0].get("color_key"),
            Some(&json!(["#202020", "#101010", "#151515"]))
        );
    }

    #[test]
    fn target_must_be_unique() {
        let mut db = db();
        let same = Rgb::new(0, 0, 0);
        assert!(matches!(
            add_colors(&mut db, "Nothing", same, same, &DEFAULT_BASE_COLORS),
            Err(ForgeError::MaterialNotFound(_))
        ));
        assert!(matches!(
            add_colors(&mut db, "Twin", same, same, &DEFAULT_BASE_COLORS),
            Err(ForgeError::AmbiguousMaterial { count: 2, .. })
        ));
    }

    #[test]
    fn default_base_colors_are_distinct() {
        let mut db = db();
        let added = add_colors(
            &mut db,
            "Tar",
            Rgb::new(0, 0, 0),
            Rgb::new(0, 0, 0),
            &DEFAULT_BASE_COLORS,
        )
        .expect("material exists");
        assert_eq!(added, DEFAULT_BASE_COLORS.to_vec());
        assert_eq!(db.color_set().len(), 4 + DEFAULT_BASE_COLORS.len());
    }
}
