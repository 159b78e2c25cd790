use crate::support::{or_exit, print_report};
use shipyard_check::verify_ships;
use std::path::PathBuf;

pub fn run(dir: String, json_output: bool) {
    let dir = PathBuf::from(dir);
    let report = or_exit(verify_ships(&dir));
    print_report("verify-ships", &report, json_output);
}
