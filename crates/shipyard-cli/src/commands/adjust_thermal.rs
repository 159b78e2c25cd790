use crate::support::{load_materials_or_exit, or_exit, save_materials_or_exit};
use shipyard_forge::{THERMAL_RULES, apply_thermal_rules};

pub fn run(input: String, output: String) {
    let mut db = load_materials_or_exit(&input);
    let summary = or_exit(apply_thermal_rules(&mut db, &THERMAL_RULES));
    save_materials_or_exit(&db, &output);

    println!("Assigned thermal properties to {} material(s):", db.materials.len());
    for (rule, count) in &summary.applied {
        println!("  {rule}: {count}");
    }
}
