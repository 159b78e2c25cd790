//! Ship directory verification: manifests against the files next to them.

use crate::report::{CheckReport, DiagnosticKind};
use shipyard_db::{DbError, ShipManifest};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

pub const SHIPS_CHECK_KIND: &str = "shipyard.ships.verify.v1";

/// Extensions a manifest may reference.
pub const ALLOWED_ASSET_EXTENSIONS: [&str; 2] = ["png", "dat"];

const MANIFEST_EXTENSION: &str = "shp";
const DATA_EXTENSION: &str = "dat";

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(extension))
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn canonical(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Lower-cased alphanumerics only, so `R.M.S. Titanic` matches `rms_titanic`.
fn name_key(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

fn list_directory(dir: &Path) -> Result<Vec<PathBuf>, DbError> {
    let io_error = |e: std::io::Error| DbError::Io {
        path: dir.display().to_string(),
        message: e.to_string(),
    };
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_error)? {
        let path = entry.map_err(io_error)?.path();
        if path.is_file() {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

/// Check every `.shp` manifest in `dir` and look for unreferenced `.dat` files.
///
/// Fails only when the directory itself cannot be listed.
pub fn verify_ships(dir: &Path) -> Result<CheckReport, DbError> {
    let mut report = CheckReport::new(SHIPS_CHECK_KIND);
    let files = list_directory(dir)?;
    let mut referenced: BTreeSet<PathBuf> = BTreeSet::new();

    for manifest_path in files.iter().filter(|p| has_extension(p, MANIFEST_EXTENSION)) {
        report.scanned += 1;
        let subject = file_label(manifest_path);
        let manifest = match ShipManifest::load(manifest_path) {
            Ok(manifest) => manifest,
            Err(err) => {
                report.push(DiagnosticKind::MalformedManifest, subject, err.to_string());
                continue;
            }
        };
        let base_dir = manifest_path.parent().unwrap_or(dir);

        if manifest.structure_image.is_none() {
            report.push(
                DiagnosticKind::MissingFiles,
                &subject,
                "manifest has no 'structure_image'",
            );
        }

        for (field, file) in manifest.asset_references() {
            let asset_path = base_dir.join(file);
            let allowed = ALLOWED_ASSET_EXTENSIONS
                .iter()
                .any(|extension| has_extension(&asset_path, extension));
            if !allowed {
                report.push(
                    DiagnosticKind::BadExtension,
                    &subject,
                    format!(
                        "'{field}' references '{file}', expected one of: {}",
                        ALLOWED_ASSET_EXTENSIONS.join(", ")
                    ),
                );
            }
            if !asset_path.is_file() {
                report.push(
                    DiagnosticKind::MissingFiles,
                    &subject,
                    format!("'{field}' references missing file '{file}'"),
                );
            }
            referenced.insert(canonical(&asset_path));
        }

        let stem = manifest_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        match manifest.ship_name.as_deref() {
            None => report.push(
                DiagnosticKind::MissingMetadata,
                &subject,
                "missing 'ship_name'",
            ),
            Some(ship_name) if name_key(ship_name) != name_key(&stem) => report.push(
                DiagnosticKind::NameMismatch,
                &subject,
                format!("ship name '{ship_name}' does not match file name '{stem}'"),
            ),
            Some(_) => {}
        }
    }

    for data_path in files.iter().filter(|p| has_extension(p, DATA_EXTENSION)) {
        if !referenced.contains(&canonical(data_path)) {
            report.push(
                DiagnosticKind::OrphanFiles,
                file_label(data_path),
                "not referenced by any ship manifest",
            );
        }
    }

    Ok(report)
}
