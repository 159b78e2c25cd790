//! Shipyard CLI: the `shipyard` command.

mod cli;
mod commands;
mod support;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    support::init_logging(cli.verbose);

    match cli.command {
        Commands::Verify { input, json } => commands::verify::run(input, json),

        Commands::VerifyShips { dir, json } => commands::verify_ships::run(dir, json),

        Commands::AddVariants {
            stem,
            input,
            output,
        } => commands::add_variants::run(stem, input, output),

        Commands::AddColor {
            material,
            input,
            output,
            base_reference,
            target_reference,
            base_colors,
        } => commands::add_color::run(commands::add_color::Args {
            material,
            input,
            output,
            base_reference,
            target_reference,
            base_colors,
        }),

        Commands::DumpMaterials { input, fields } => commands::dump_materials::run(input, fields),

        Commands::AdjustProperties {
            input,
            output,
            electrical,
        } => commands::adjust_properties::run(input, output, electrical),

        Commands::AdjustThermal { input, output } => commands::adjust_thermal::run(input, output),

        Commands::RenderTemplate {
            input,
            output,
            template,
        } => commands::render_template::run(input, output, template),

        Commands::AnnotateNpcs {
            input,
            textures,
            output,
        } => commands::annotate_npcs::run(input, textures, output),
    }
}
