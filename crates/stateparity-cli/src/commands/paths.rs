//! Paths command implementation.

use crate::error::CliError;
use crate::output;
use serde_json::json;
use stateparity_store::{FixtureSet, PathCatalog};

pub fn run(fixtures: &FixtureSet, json_output: bool) -> Result<(), CliError> {
    if json_output {
        let entries: Vec<_> = fixtures
            .iter()
            .map(|f| json!({ "path": f.path, "commands": f.commands }))
            .collect();
        println!("{}", output::format_json(&entries)?);
        return Ok(());
    }

    output::print_paths_header();
    for path in fixtures.paths() {
        let commands = fixtures.commands(&path).unwrap_or_default();
        println!("{}", output::format_path_row(&path, &commands));
    }
    Ok(())
}
