use crate::support::{load_materials_or_exit, save_materials_or_exit};
use shipyard_forge::{ELECTRICAL_DEFAULTS, STRUCTURAL_DEFAULTS, apply_presence_rules};

pub fn run(input: String, output: String, electrical: bool) {
    let rules = if electrical {
        &ELECTRICAL_DEFAULTS
    } else {
        &STRUCTURAL_DEFAULTS
    };
    let mut db = load_materials_or_exit(&input);
    let summary = apply_presence_rules(&mut db, rules);
    save_materials_or_exit(&db, &output);

    println!("Adjusted {} material(s):", summary.materials);
    for (field, count) in &summary.filled {
        println!("  {field}: filled {count}");
    }
}
