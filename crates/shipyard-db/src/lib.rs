//! # shipyard-db
//!
//! Record layer for the asset databases of the physics sandbox.
//!
//! This crate provides:
//! - `Material` and `MaterialDatabase` (the materials documents)
//! - `Palettes` (the UI palette tree the materials are filed under)
//! - `ShipManifest` (`.shp` ship definitions)
//! - `NpcDatabase` (human and furniture NPC kinds)
//! - `Rgb` / `ColorSet` color-key arithmetic
//! - deterministic JSON load/save, with an optional `//`-comment dialect
//!
//! It intentionally does not check or transform records.
//! Those concerns live in `shipyard-check` and `shipyard-forge`.
//!
//! ## Data model
//!
//! ```text
//! JSON (on disk, optionally with // comments)
//!     ↕  load_document / save_document
//! typed documents (unknown members preserved verbatim)
//! ```

pub mod color;
pub mod error;
pub mod json_io;
pub mod material;
pub mod npc;
pub mod palette;
pub mod ship;

pub use color::{ColorSet, MAX_COLOR_SEARCH_STEPS, Rgb, RgbOffset};
pub use error::DbError;
pub use json_io::{Dialect, load_document, parse_document, save_document, to_pretty_string};
pub use material::{MANDATORY_FIELDS, Material, MaterialDatabase, PaletteCoordinates};
pub use npc::{FurnitureKind, HumanKind, NpcDatabase, NpcSection, TexturedKind};
pub use palette::{PALETTE_SEARCH_ORDER, PaletteCategory, PaletteGroup, PaletteMember, Palettes};
pub use ship::{ASSET_FIELDS, ShipManifest};
