//! HTML preview of the material palette.
//!
//! Materials with palette coordinates are laid out by category, then
//! sub-category. Each sub-category gets a row of color swatches and a row of
//! name/mass/strength cells, wrapped at `WRAP_WIDTH` cells.

use crate::error::ForgeError;
use shipyard_db::{Material, MaterialDatabase};
use std::fmt::Write as _;

pub const TABLE_PLACEHOLDER: &str = "{{materials_table}}";

/// Cells per row before wrapping.
pub const WRAP_WIDTH: usize = 16;

const DEFAULT_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>Materials</title>
<style>
table { border-collapse: collapse; font-family: sans-serif; font-size: 11px; }
td, th { border: 1px solid #888; padding: 2px 4px; vertical-align: top; }
th.category { text-align: left; background: #DDD; }
td.swatch { height: 24px; min-width: 64px; }
</style>
</head>
<body>
{{materials_table}}
</body>
</html>
"#;

struct SubCategory<'a> {
    name: String,
    members: Vec<(i64, &'a Material)>,
}

struct Section<'a> {
    category: String,
    sub_categories: Vec<SubCategory<'a>>,
}

fn section_mut<'s, 'a>(sections: &'s mut Vec<Section<'a>>, category: &str) -> &'s mut Section<'a> {
    let index = match sections.iter().position(|s| s.category == category) {
        Some(index) => index,
        None => {
            sections.push(Section {
                category: category.to_string(),
                sub_categories: Vec::new(),
            });
            sections.len() - 1
        }
    };
    &mut sections[index]
}

impl<'a> Section<'a> {
    fn sub_category_mut(&mut self, name: &str) -> &mut SubCategory<'a> {
        let index = match self.sub_categories.iter().position(|s| s.name == name) {
            Some(index) => index,
            None => {
                self.sub_categories.push(SubCategory {
                    name: name.to_string(),
                    members: Vec::new(),
                });
                self.sub_categories.len() - 1
            }
        };
        &mut self.sub_categories[index]
    }
}

/// Palette-tree order first, then first appearance in the materials list.
fn layout(db: &MaterialDatabase) -> Vec<Section<'_>> {
    let placed: Vec<(String, String, i64, &Material)> = db
        .materials
        .iter()
        .filter_map(|material| {
            let c = material.palette_coordinates()?;
            Some((c.category, c.sub_category, c.sub_category_ordinal, material))
        })
        .collect();

    let mut sections: Vec<Section<'_>> = Vec::new();
    if let Some(palettes) = db.palettes.as_ref() {
        for (category, group) in palettes.groups() {
            for sub in &group.sub_categories {
                let used = placed
                    .iter()
                    .any(|(c, s, _, _)| *c == category.category && s == sub);
                if used {
                    section_mut(&mut sections, &category.category).sub_category_mut(sub);
                }
            }
        }
    }
    for (category, sub, ordinal, material) in placed {
        section_mut(&mut sections, &category)
            .sub_category_mut(&sub)
            .members
            .push((ordinal, material));
    }
    for section in &mut sections {
        for sub in &mut section.sub_categories {
            sub.members.sort_by_key(|(ordinal, _)| *ordinal);
        }
    }
    sections
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

fn number_text(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

fn swatch_cell(material: &Material) -> String {
    let color = material
        .color_keys()
        .and_then(|keys| keys.into_iter().next())
        .unwrap_or_else(|| "transparent".to_string());
    format!(
        "<td class=\"swatch\" style=\"background-color:{}\"></td>",
        escape_html(&color)
    )
}

fn data_cell(material: &Material) -> String {
    format!(
        "<td>{}<br>mass: {}<br>density: {}<br>strength: {}</td>",
        escape_html(material.label()),
        number_text(material.nominal_mass()),
        number_text(material.density()),
        number_text(material.number("strength")),
    )
}

/// The `<table>` element alone.
pub fn render_table(db: &MaterialDatabase) -> String {
    let mut html = String::from("<table>\n");
    for section in layout(db) {
        let _ = writeln!(
            html,
            "<tr><th class=\"category\" colspan=\"{WRAP_WIDTH}\">{}</th></tr>",
            escape_html(&section.category)
        );
        for sub in &section.sub_categories {
            for chunk in sub.members.chunks(WRAP_WIDTH) {
                html.push_str("<tr>");
                for (_, material) in chunk {
                    html.push_str(&swatch_cell(material));
                }
                html.push_str("</tr>\n<tr>");
                for (_, material) in chunk {
                    html.push_str(&data_cell(material));
                }
                html.push_str("</tr>\n");
            }
        }
    }
    html.push_str("</table>");
    html
}

/// Substitute the table into `template`, or into a plain page when `None`.
pub fn render_page(db: &MaterialDatabase, template: Option<&str>) -> Result<String, ForgeError> {
    let template = template.unwrap_or(DEFAULT_PAGE);
    if !template.contains(TABLE_PLACEHOLDER) {
        return Err(ForgeError::TemplatePlaceholder(TABLE_PLACEHOLDER));
    }
    Ok(template.replace(TABLE_PLACEHOLDER, &render_table(db)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn material(name: &str, category: &str, sub: &str, ordinal: i64, color: &str) -> Value {
        json!({
            "name": name,
            "color_key": color,
            "mass": {"nominal_mass": 100, "density": 1.5},
            "strength": 0.5,
            "palette_coordinates": {"category": category, "sub_category": sub, "sub_category_ordinal": ordinal}
        })
    }

    fn db(value: Value) -> MaterialDatabase {
        serde_json::from_value(value).expect("database parses")
    }

    #[test]
    fn layout_follows_palette_then_appearance_and_ordinals() {
        let db = db(json!({
            "materials": [
                material("Oak", "Wood", "Oak", 0, "#804000"),
                material("Steel B", "Metals", "Steel", 1, "#808080"),
                material("Steel A", "Metals", "Steel", 0, "#818181"),
                material("Iron", "Metals", "Iron", 0, "#606060"),
                material("Steel C", "Metals", "Steel", 1, "#828282"),
                {"name": "Loose", "color_key": "#FFFFFF"}
            ],
            "palettes": {"structural_palette": [
                {"category": "Metals", "groups": [{"name": "Metals", "sub_categories": ["Iron", "Steel"]}]}
            ]}
        }));

        let sections = layout(&db);
        let categories: Vec<&str> = sections.iter().map(|s| s.category.as_str()).collect();
        assert_eq!(categories, vec!["Metals", "Wood"]);
        let subs: Vec<&str> = sections[0].sub_categories.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(subs, vec!["Iron", "Steel"]);
        let steel: Vec<&str> = sections[0].sub_categories[1]
            .members
            .iter()
            .map(|(_, m)| m.label())
            .collect();
        assert_eq!(steel, vec!["Steel A", "Steel B", "Steel C"]);
    }

    #[test]
    fn rows_wrap_at_width() {
        let materials: Vec<Value> = (0..WRAP_WIDTH + 1)
            .map(|i| material(&format!("M{i}"), "Metals", "Steel", i as i64, &format!("#0000{i:02X}")))
            .collect();
        let table = render_table(&db(json!({"materials": materials})));

        assert_eq!(table.matches("class=\"category\"").count(), 1);
        assert_eq!(table.matches("class=\"swatch\"").count(), WRAP_WIDTH + 1);
        // Two swatch rows plus two data rows plus the header.
        assert_eq!(table.matches("<tr>").count(), 5);
        assert!(table.contains("background-color:#000000"));
    }

    #[test]
    fn names_are_escaped() {
        let table = render_table(&db(json!({
            "materials": [material("Nuts & <Bolts>", "Metals", "Nuts", 0, "#123456")]
        })));
        assert!(table.contains("Nuts &amp; &lt;Bolts&gt;<br>mass: 100<br>density: 1.5<br>strength: 0.5"));
    }

    #[test]
    fn page_uses_placeholder() {
        let db = db(json!({"materials": [material("Oak", "Wood", "Oak", 0, "#804000")]}));

        let page = render_page(&db, Some("<body>{{materials_table}}</body>")).expect("placeholder present");
        assert!(page.starts_with("<body><table>"));
        assert!(page.ends_with("</table></body>"));

        let default = render_page(&db, None).expect("built-in page has placeholder");
        assert!(default.contains("<title>Materials</title>"));
        assert!(!default.contains(TABLE_PLACEHOLDER));

        assert!(matches!(
            render_page(&db, Some("<body></body>")),
            Err(ForgeError::TemplatePlaceholder(_))
        ));
    }
}
