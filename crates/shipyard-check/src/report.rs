//! Diagnostics and the per-kind tally.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    DuplicateColor,
    InvalidColor,
    RopeColorClash,
    MissingName,
    DuplicateName,
    MissingField,
    MissingPaletteCoordinates,
    PaletteMismatch,
    MalformedManifest,
    MissingFiles,
    BadExtension,
    MissingMetadata,
    NameMismatch,
    OrphanFiles,
}

impl DiagnosticKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DiagnosticKind::DuplicateColor => "duplicate_color",
            DiagnosticKind::InvalidColor => "invalid_color",
            DiagnosticKind::RopeColorClash => "rope_color_clash",
            DiagnosticKind::MissingName => "missing_name",
            DiagnosticKind::DuplicateName => "duplicate_name",
            DiagnosticKind::MissingField => "missing_field",
            DiagnosticKind::MissingPaletteCoordinates => "missing_palette_coordinates",
            DiagnosticKind::PaletteMismatch => "palette_mismatch",
            DiagnosticKind::MalformedManifest => "malformed_manifest",
            DiagnosticKind::MissingFiles => "missing_files",
            DiagnosticKind::BadExtension => "bad_extension",
            DiagnosticKind::MissingMetadata => "missing_metadata",
            DiagnosticKind::NameMismatch => "name_mismatch",
            DiagnosticKind::OrphanFiles => "orphan_files",
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One violation. `subject` is the material name or file the violation is about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub subject: String,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ERROR: {}: {}", self.subject, self.message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckReport {
    pub check_kind: String,
    /// Records (materials or manifests) examined.
    pub scanned: usize,
    /// In discovery order.
    pub diagnostics: Vec<Diagnostic>,
    pub tally: BTreeMap<DiagnosticKind, usize>,
}

impl CheckReport {
    pub fn new(check_kind: &str) -> Self {
        Self {
            check_kind: check_kind.to_string(),
            scanned: 0,
            diagnostics: Vec::new(),
            tally: BTreeMap::new(),
        }
    }

    pub fn push(
        &mut self,
        kind: DiagnosticKind,
        subject: impl Into<String>,
        message: impl Into<String>,
    ) {
        let diagnostic = Diagnostic {
            kind,
            subject: subject.into(),
            message: message.into(),
        };
        tracing::debug!(kind = %kind, subject = %diagnostic.subject, "diagnostic");
        *self.tally.entry(kind).or_insert(0) += 1;
        self.diagnostics.push(diagnostic);
    }

    pub fn count(&self, kind: DiagnosticKind) -> usize {
        self.tally.get(&kind).copied().unwrap_or(0)
    }

    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn of_kind(&self, kind: DiagnosticKind) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(move |d| d.kind == kind)
    }
}
