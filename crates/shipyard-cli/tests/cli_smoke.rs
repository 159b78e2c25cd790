use serde_json::{Value, json};
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::time::{SystemTime, UNIX_EPOCH};

struct TempDirGuard {
    path: PathBuf,
}

impl TempDirGuard {
    fn new(prefix: &str) -> Self {
        let unique = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock should be after unix epoch")
            .as_nanos();
        let path = std::env::temp_dir().join(format!(
            "shipyard-cli-{prefix}-{}-{unique}",
            std::process::id()
        ));
        fs::create_dir_all(&path).expect("temp dir should be created");
        Self { path }
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn file(&self, name: &str) -> String {
        self.path.join(name).display().to_string()
    }
}

impl Drop for TempDirGuard {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

fn run_shipyard<I, S>(args: I) -> Output
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let bin = env!("CARGO_BIN_EXE_shipyard");
    Command::new(bin)
        .args(args)
        .output()
        .expect("shipyard command should execute")
}

fn assert_success(output: &Output) {
    if !output.status.success() {
        panic!(
            "command failed with status {:?}\nstdout:\n{}\nstderr:\n{}",
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr),
        );
    }
}

fn assert_failure(output: &Output) {
    if output.status.success() {
        panic!(
            "command unexpectedly succeeded\nstdout:\n{}\nstderr:\n{}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr),
        );
    }
}

fn stdout_text(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr_text(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn parse_json_stdout(output: &Output) -> Value {
    serde_json::from_slice::<Value>(&output.stdout).unwrap_or_else(|e| {
        panic!(
            "expected valid JSON stdout, got error: {e}\nstdout:\n{}",
            String::from_utf8_lossy(&output.stdout)
        )
    })
}

fn write_json(path: &str, value: &Value) {
    let text = serde_json::to_string_pretty(value).expect("fixture should serialize");
    fs::write(path, text).expect("fixture should be written");
}

fn read_json(path: &str) -> Value {
    let text = fs::read_to_string(path).expect("output should exist");
    serde_json::from_str(&text).expect("output should be JSON")
}

fn steel_database() -> Value {
    json!({
        "materials": [
            {
                "name": "Steel",
                "color_key": "#808080",
                "render_color": "#808080",
                "mass": {"nominal_mass": 500, "density": 2},
                "strength": 100,
                "palette_coordinates": {"category": "Metals", "sub_category": "Steel", "sub_category_ordinal": 0}
            },
            {
                "name": "Oak Wood",
                "color_key": "#804000",
                "render_color": "#804000",
                "mass": {"nominal_mass": 80, "density": 0.7},
                "strength": 20,
                "elasticity_coefficient": 0.8,
                "palette_coordinates": {"category": "Wood", "sub_category": "Oak Wood", "sub_category_ordinal": 0}
            }
        ],
        "palettes": {"structural_palette": [
            {"category": "Metals", "groups": [{"name": "Steel", "sub_categories": ["Steel"]}]},
            {"category": "Wood", "groups": [{"name": "Wood", "sub_categories": ["Oak Wood"]}]}
        ]}
    })
}

#[test]
fn verify_reports_duplicate_color_and_exits_zero() {
    let dir = TempDirGuard::new("verify-dup");
    let input = dir.file("materials.json");
    write_json(
        &input,
        &json!({"materials": [
            {"name": "A", "color_key": "#112233", "render_color": "#112233", "is_exempt_from_palette": true},
            {"name": "B", "color_key": "#112233", "render_color": "#112233", "is_exempt_from_palette": true}
        ]}),
    );

    let output = run_shipyard(["verify", input.as_str()]);
    assert_success(&output);
    let stdout = stdout_text(&output);
    assert!(stdout.contains("ERROR: B: color '#112233' is a duplicate"));
    assert!(stdout.contains("duplicate_color: 1"));

    let output = run_shipyard(["verify", input.as_str(), "--json"]);
    assert_success(&output);
    let payload = parse_json_stdout(&output);
    assert_eq!(payload["checkKind"], "shipyard.materials.verify.v1");
    assert_eq!(payload["tally"]["duplicate_color"], 1);
    assert_eq!(payload["diagnostics"].as_array().map(Vec::len), Some(1));
}

#[test]
fn verify_tolerates_non_palette_members() {
    let dir = TempDirGuard::new("verify-palette-extra");
    let input = dir.file("materials.json");
    write_json(
        &input,
        &json!({
            "materials": [
                {"name": "A", "color_key": "#112233", "render_color": "#112233", "is_exempt_from_palette": true}
            ],
            "palettes": {"structural_palette": [], "version": 2}
        }),
    );

    let output = run_shipyard(["verify", input.as_str(), "--json"]);
    assert_success(&output);
    let payload = parse_json_stdout(&output);
    assert_eq!(payload["diagnostics"].as_array().map(Vec::len), Some(0));
}

#[test]
fn verify_fails_on_unparseable_input() {
    let dir = TempDirGuard::new("verify-bad");
    let input = dir.file("materials.json");
    fs::write(&input, "{ not json").expect("fixture should be written");

    let output = run_shipyard(["verify", input.as_str()]);
    assert_failure(&output);
    assert!(stderr_text(&output).starts_with("error: "));
}

#[test]
fn verify_ships_reports_missing_structure_image() {
    let dir = TempDirGuard::new("ships");
    fs::write(
        dir.path().join("Raft.shp"),
        r#"{"structure_image": "raft.png", "ship_name": "Raft"}"#,
    )
    .expect("manifest should be written");

    let ships_dir = dir.path().display().to_string();
    let output = run_shipyard(["verify-ships", ships_dir.as_str(), "--json"]);
    assert_success(&output);
    let payload = parse_json_stdout(&output);
    assert_eq!(payload["tally"], json!({"missing_files": 1}));
    assert_eq!(payload["scanned"], 1);
}

#[test]
fn add_variants_writes_full_family() {
    let dir = TempDirGuard::new("variants");
    let input = dir.file("in.json");
    let output_path = dir.file("out.json");
    write_json(&input, &steel_database());

    let output = run_shipyard(["add-variants", "Steel", input.as_str(), output_path.as_str()]);
    assert_success(&output);
    assert!(stdout_text(&output).contains("Found 1 variants: Steel"));
    assert!(stdout_text(&output).contains("Synthesize: Hull ('Steel Hull')"));

    let written = read_json(&output_path);
    let hull = &written["materials"][0];
    assert_eq!(hull["name"], "Steel Hull");
    assert_eq!(hull["mass"]["density"], json!(20.0));
    assert_eq!(hull["mass"]["nominal_mass"], json!(600.0));
    let solid_bulkhead = &written["materials"][1];
    assert_eq!(solid_bulkhead["name"], "Solid Steel Bulkhead");
    assert_eq!(solid_bulkhead["mass"]["density"], json!(8.0));
    assert_eq!(written["materials"][6]["name"], "Oak Wood");

    // The written family verifies clean.
    let verify = run_shipyard(["verify", output_path.as_str(), "--json"]);
    assert_success(&verify);
    assert_eq!(parse_json_stdout(&verify)["diagnostics"], json!([]));
}

#[test]
fn add_variants_fails_on_unknown_group() {
    let dir = TempDirGuard::new("variants-missing");
    let input = dir.file("in.json");
    write_json(&input, &steel_database());

    let output_path = dir.file("out.json");
    let output = run_shipyard(["add-variants", "Copper", input.as_str(), output_path.as_str()]);
    assert_failure(&output);
    assert!(stderr_text(&output).contains("cannot find group 'Copper'"));
    assert!(!Path::new(&output_path).exists());
}

#[test]
fn adjust_properties_fills_defaults_only() {
    let dir = TempDirGuard::new("adjust");
    let input = dir.file("in.json");
    let output_path = dir.file("out.json");
    write_json(&input, &steel_database());

    let output = run_shipyard(["adjust-properties", input.as_str(), output_path.as_str()]);
    assert_success(&output);

    let written = read_json(&output_path);
    assert_eq!(written["materials"][0]["elasticity_coefficient"], json!(0.5));
    assert_eq!(written["materials"][1]["elasticity_coefficient"], json!(0.8));
    assert_eq!(written["materials"][0]["friction_kinetic_coefficient"], json!(0.25));

    let electrical = dir.file("electrical.json");
    let output = run_shipyard([
        "adjust-properties",
        input.as_str(),
        electrical.as_str(),
        "--electrical",
    ]);
    assert_success(&output);
    let written = read_json(&electrical);
    assert_eq!(written["materials"][0]["maximum_operating_temperature"], json!(373.15));
    assert!(written["materials"][0].get("elasticity_coefficient").is_none());
}

#[test]
fn adjust_thermal_rejects_unrecognized_material() {
    let dir = TempDirGuard::new("thermal");
    let input = dir.file("in.json");
    let output_path = dir.file("out.json");
    write_json(
        &input,
        &json!({"materials": [{"name": "Unobtainium", "color_key": "#010203"}]}),
    );

    let output = run_shipyard(["adjust-thermal", input.as_str(), output_path.as_str()]);
    assert_failure(&output);
    assert!(stderr_text(&output).contains("Unobtainium"));
    assert!(!Path::new(&output_path).exists());

    write_json(&input, &steel_database());
    let output = run_shipyard(["adjust-thermal", input.as_str(), output_path.as_str()]);
    assert_success(&output);
    let written = read_json(&output_path);
    assert_eq!(written["materials"][0]["specific_heat"], json!(490.0));
}

#[test]
fn add_color_appends_keys() {
    let dir = TempDirGuard::new("add-color");
    let input = dir.file("in.json");
    let output_path = dir.file("out.json");
    write_json(&input, &steel_database());

    let output = run_shipyard([
        "add-color",
        "Oak Wood",
        input.as_str(),
        output_path.as_str(),
        "#000000",
        "#010101",
        "#100000",
    ]);
    assert_success(&output);
    let written = read_json(&output_path);
    assert_eq!(
        written["materials"][1]["color_key"],
        json!(["#804000", "#110101"])
    );

    let output = run_shipyard([
        "add-color",
        "Oak Wood",
        input.as_str(),
        output_path.as_str(),
        "not-a-color",
        "#010101",
    ]);
    assert_failure(&output);
}

#[test]
fn dump_materials_prints_fields() {
    let dir = TempDirGuard::new("dump");
    let input = dir.file("in.json");
    write_json(&input, &steel_database());

    let output = run_shipyard(["dump-materials", input.as_str(), "strength", "is_hull"]);
    assert_success(&output);
    let stdout = stdout_text(&output);
    assert!(stdout.contains("Steel:\n   strength=100 is_hull=<missing>\n"));

    let output = run_shipyard(["dump-materials", input.as_str()]);
    assert_failure(&output);
}

#[test]
fn render_template_substitutes_table() {
    let dir = TempDirGuard::new("template");
    let input = dir.file("in.json");
    let template = dir.file("page.html");
    let output_path = dir.file("out/page.html");
    write_json(&input, &steel_database());
    fs::write(&template, "<h1>Palette</h1>\n{{materials_table}}\n").expect("template should be written");

    let output = run_shipyard([
        "render-template",
        input.as_str(),
        output_path.as_str(),
        "--template",
        template.as_str(),
    ]);
    assert_success(&output);
    let page = fs::read_to_string(&output_path).expect("page should exist");
    assert!(page.starts_with("<h1>Palette</h1>\n<table>"));
    assert!(page.contains("background-color:#808080"));
    assert!(page.find(">Metals<") < page.find(">Wood<"));
}

#[test]
fn annotate_npcs_sets_render_color() {
    let dir = TempDirGuard::new("npcs");
    let input = dir.file("npcs.json");
    let output_path = dir.file("npcs.out.json");
    let textures = dir.path().join("textures");
    fs::create_dir_all(&textures).expect("texture dir should be created");
    image::RgbaImage::from_pixel(2, 2, image::Rgba([10, 20, 30, 255]))
        .save(textures.join("crate.png"))
        .expect("texture should be written");
    write_json(
        &input,
        &json!({"furniture": {"kinds": [{"name": "Crate", "texture_filename_stem": "crate"}]}}),
    );

    let texture_root = textures.display().to_string();
    let output = run_shipyard([
        "annotate-npcs",
        input.as_str(),
        texture_root.as_str(),
        output_path.as_str(),
    ]);
    assert_success(&output);
    assert!(stdout_text(&output).contains("Crate: #0A141E"));
    let written = read_json(&output_path);
    assert_eq!(written["furniture"]["kinds"][0]["render_color"], "#0A141E");
}

#[test]
fn save_is_byte_stable() {
    let dir = TempDirGuard::new("stable");
    let input = dir.file("in.json");
    let once = dir.file("once.json");
    let twice = dir.file("twice.json");
    write_json(&input, &steel_database());

    assert_success(&run_shipyard(["adjust-properties", input.as_str(), once.as_str()]));
    assert_success(&run_shipyard(["adjust-properties", once.as_str(), twice.as_str()]));

    let first = fs::read(&once).expect("first output should exist");
    let second = fs::read(&twice).expect("second output should exist");
    assert_eq!(first, second);
    assert!(first.ends_with(b"}\n"));
}
