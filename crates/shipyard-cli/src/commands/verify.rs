use crate::support::{load_materials_or_exit, print_report};
use shipyard_check::verify_materials;

pub fn run(input: String, json_output: bool) {
    let db = load_materials_or_exit(&input);
    let report = verify_materials(&db);
    print_report("verify", &report, json_output);
}
