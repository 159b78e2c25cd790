use shipyard_check::CheckReport;
use shipyard_db::{MaterialDatabase, NpcDatabase};
use std::fmt::Display;
use tracing::Level;

/// Logs go to stderr so stdout stays clean for reports and JSON.
pub fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init();
}

/// Unwrap a fatal result: print `error: ...` and exit 1.
pub fn or_exit<T, E: Display>(result: Result<T, E>) -> T {
    result.unwrap_or_else(|e| {
        eprintln!("error: {e}");
        std::process::exit(1);
    })
}

pub fn load_materials_or_exit(path: &str) -> MaterialDatabase {
    or_exit(MaterialDatabase::load(path))
}

pub fn save_materials_or_exit(db: &MaterialDatabase, path: &str) {
    or_exit(db.save(path));
    tracing::info!(path, materials = db.materials.len(), "saved materials");
}

pub fn load_npcs_or_exit(path: &str) -> NpcDatabase {
    or_exit(NpcDatabase::load(path))
}

pub fn save_npcs_or_exit(db: &NpcDatabase, path: &str) {
    or_exit(db.save(path));
    tracing::info!(path, "saved npcs");
}

/// One `ERROR:` line per diagnostic, then the tally; or the report as JSON.
///
/// Diagnostics never change the exit code.
pub fn print_report(label: &str, report: &CheckReport, json_output: bool) {
    if json_output {
        let rendered = serde_json::to_string_pretty(report).unwrap_or_else(|err| {
            eprintln!("error: failed to render {label} payload: {err}");
            std::process::exit(1);
        });
        println!("{rendered}");
        return;
    }

    for diagnostic in &report.diagnostics {
        println!("{diagnostic}");
    }
    if report.is_clean() {
        println!("[{label}] OK (scanned={})", report.scanned);
    } else {
        println!(
            "[{label}] {} problem(s) (scanned={})",
            report.diagnostics.len(),
            report.scanned
        );
        for (kind, count) in &report.tally {
            println!("  {kind}: {count}");
        }
    }
}
