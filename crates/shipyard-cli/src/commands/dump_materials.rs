use crate::support::load_materials_or_exit;

const MISSING: &str = "<missing>";

pub fn run(input: String, fields: Vec<String>) {
    let db = load_materials_or_exit(&input);
    for material in &db.materials {
        println!("{}:", material.label());
        let values: Vec<String> = fields
            .iter()
            .map(|field| {
                let value = material
                    .get(field)
                    .map_or_else(|| MISSING.to_string(), |v| v.to_string());
                format!("{field}={value}")
            })
            .collect();
        println!("   {}", values.join(" "));
    }
}
