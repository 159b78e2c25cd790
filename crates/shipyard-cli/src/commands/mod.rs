pub mod add_color;
pub mod add_variants;
pub mod adjust_properties;
pub mod adjust_thermal;
pub mod annotate_npcs;
pub mod dump_materials;
pub mod render_template;
pub mod verify;
pub mod verify_ships;
