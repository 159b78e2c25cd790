//! # shipyard-forge
//!
//! Transformations over asset databases. Each entry point takes a loaded
//! document, mutates it in memory, and returns a summary for the caller to
//! print; saving is left to the caller.
//!
//! - `adjust`: presence defaults and name-driven thermal properties
//! - `variants`: Hull / I-Beam / Bulkhead / Low-Grade family synthesis
//! - `colors`: extra color keys derived from a reference pair
//! - `template`: HTML palette preview
//! - `npc`: average texture colors for NPC kinds

pub mod adjust;
pub mod colors;
pub mod error;
pub mod npc;
pub mod template;
pub mod variants;

pub use adjust::{
    AdjustSummary, ELECTRICAL_DEFAULTS, PresenceRule, STRUCTURAL_DEFAULTS, THERMAL_RULES,
    ThermalProperties, ThermalRule, ThermalSummary, apply_presence_rules, apply_thermal_rules,
};
pub use colors::{DEFAULT_BASE_COLORS, add_colors};
pub use error::ForgeError;
pub use npc::{NpcReport, annotate_render_colors, average_color};
pub use template::{TABLE_PLACEHOLDER, WRAP_WIDTH, render_page, render_table};
pub use variants::{
    ColorOffset, SlotAction, VARIANT_TABLE, VariantDump, VariantKind, VariantReport, VariantSpec,
    synthesize_variants,
};
