//! # shipyard-check
//!
//! Verifiers for asset databases. Every check accumulates diagnostics and
//! returns a `CheckReport`; nothing here modifies its input or aborts on a
//! data-quality problem.

pub mod materials;
pub mod report;
pub mod ships;

pub use materials::{MATERIALS_CHECK_KIND, verify_materials};
pub use report::{CheckReport, Diagnostic, DiagnosticKind};
pub use ships::{ALLOWED_ASSET_EXTENSIONS, SHIPS_CHECK_KIND, verify_ships};
