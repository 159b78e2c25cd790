use crate::support::{load_materials_or_exit, or_exit};
use shipyard_forge::render_page;
use std::fs;
use std::path::Path;

pub fn run(input: String, output: String, template: Option<String>) {
    let db = load_materials_or_exit(&input);
    let template_text = template.as_deref().map(|path| {
        fs::read_to_string(path).unwrap_or_else(|err| {
            eprintln!("error: failed reading {path}: {err}");
            std::process::exit(1);
        })
    });
    let page = or_exit(render_page(&db, template_text.as_deref()));

    let output = Path::new(&output);
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        or_exit(fs::create_dir_all(parent));
    }
    fs::write(output, page).unwrap_or_else(|err| {
        eprintln!("error: failed writing {}: {err}", output.display());
        std::process::exit(1);
    });
    println!("Rendered {} material(s) to {}", db.materials.len(), output.display());
}
