use clap::{ArgAction, Parser, Subcommand};
use shipyard_db::Rgb;

#[derive(Parser)]
#[command(
    name = "shipyard",
    about = "Shipyard: verify and transform physics-sandbox asset databases",
    version
)]
pub struct Cli {
    /// Log more (-v info, -vv debug, -vvv trace); logs go to stderr
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check a materials database for color, name, field and palette problems
    Verify {
        /// Materials JSON file
        input: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check every ship manifest in a directory against its asset files
    VerifyShips {
        /// Directory holding .shp manifests and their assets
        dir: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Complete a Hull / I-Beam / Bulkhead / Low-Grade material family
    AddVariants {
        /// Family stem, also the palette group name (e.g. `Steel`)
        stem: String,

        /// Materials JSON file to read
        input: String,

        /// Materials JSON file to write
        output: String,
    },

    /// Append color keys to one material, offset by a reference color pair
    AddColor {
        /// Name of the material to extend
        material: String,

        /// Materials JSON file to read
        input: String,

        /// Materials JSON file to write
        output: String,

        /// Reference color of the base (`#RRGGBB`)
        base_reference: Rgb,

        /// Reference color of the target material (`#RRGGBB`)
        target_reference: Rgb,

        /// Base colors to offset (default: the built-in set of nine)
        base_colors: Vec<Rgb>,
    },

    /// Print selected fields of every material
    DumpMaterials {
        /// Materials JSON file
        input: String,

        /// Field names to print
        #[arg(required = true)]
        fields: Vec<String>,
    },

    /// Fill in missing physical-property defaults
    AdjustProperties {
        /// Materials JSON file to read
        input: String,

        /// Materials JSON file to write
        output: String,

        /// Use the electrical defaults (heat, operating temperatures)
        #[arg(long)]
        electrical: bool,
    },

    /// Assign thermal properties by material name
    AdjustThermal {
        /// Materials JSON file to read
        input: String,

        /// Materials JSON file to write
        output: String,
    },

    /// Render the material palette as an HTML page
    RenderTemplate {
        /// Materials JSON file
        input: String,

        /// HTML file to write
        output: String,

        /// Template containing a `{{materials_table}}` placeholder
        #[arg(long)]
        template: Option<String>,
    },

    /// Set NPC render colors from the average color of their textures
    AnnotateNpcs {
        /// NPC JSON file to read
        input: String,

        /// Directory searched recursively for `<stem>.png` textures
        textures: String,

        /// NPC JSON file to write
        output: String,
    },
}
