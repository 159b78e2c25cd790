use crate::support::{load_npcs_or_exit, or_exit, save_npcs_or_exit};
use shipyard_forge::annotate_render_colors;
use std::path::PathBuf;

pub fn run(input: String, textures: String, output: String) {
    let mut db = load_npcs_or_exit(&input);
    let report = or_exit(annotate_render_colors(&mut db, &PathBuf::from(textures)));
    save_npcs_or_exit(&db, &output);

    for (kind, color) in &report.annotated {
        println!("{kind}: {color}");
    }
}
