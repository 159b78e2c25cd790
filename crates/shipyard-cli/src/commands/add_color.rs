use crate::support::{load_materials_or_exit, or_exit, save_materials_or_exit};
use shipyard_db::Rgb;
use shipyard_forge::{DEFAULT_BASE_COLORS, add_colors};

pub struct Args {
    pub material: String,
    pub input: String,
    pub output: String,
    pub base_reference: Rgb,
    pub target_reference: Rgb,
    pub base_colors: Vec<Rgb>,
}

pub fn run(args: Args) {
    let base_colors: &[Rgb] = if args.base_colors.is_empty() {
        &DEFAULT_BASE_COLORS
    } else {
        &args.base_colors
    };
    let mut db = load_materials_or_exit(&args.input);
    let added = or_exit(add_colors(
        &mut db,
        &args.material,
        args.base_reference,
        args.target_reference,
        base_colors,
    ));
    save_materials_or_exit(&db, &args.output);

    let added: Vec<String> = added.iter().copied().map(Rgb::to_hex).collect();
    println!("{}: added {}", args.material, added.join(", "));
}
