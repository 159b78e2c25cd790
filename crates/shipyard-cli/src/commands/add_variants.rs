use crate::support::{load_materials_or_exit, or_exit, save_materials_or_exit};
use shipyard_forge::{SlotAction, synthesize_variants};

pub fn run(stem: String, input: String, output: String) {
    let mut db = load_materials_or_exit(&input);
    let report = or_exit(synthesize_variants(&mut db, &stem));
    save_materials_or_exit(&db, &output);

    println!(
        "Found {} variants: {}",
        report.found.len(),
        report.found.join(", ")
    );
    for (kind, action) in &report.actions {
        let name = kind.canonical_name(&report.stem);
        match action {
            SlotAction::Synthesized => println!("    Synthesize: {kind} ('{name}')"),
            SlotAction::Renamed { from } => println!("    Rename: {kind} ('{from}' -> '{name}')"),
            SlotAction::Kept => {}
        }
    }
    println!("All variants:");
    for line in &report.dump {
        println!("  {line}");
    }
}
