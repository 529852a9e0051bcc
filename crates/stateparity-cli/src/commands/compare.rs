//! Compare command implementation.

use crate::error::CliError;
use crate::output::{self, JsonReport, JsonRun, PathFailure};
use stateparity_store::{PathCatalog, PathReconciler, RecordSource};
use std::io::{self, BufRead, Write};

const PROMPT: &str = "Enter the telemetry path for comparison: ";

pub fn run<C: PathCatalog, S: RecordSource>(
    reconciler: &PathReconciler<C, S>,
    path: Option<String>,
    all: bool,
    json_output: bool,
    strict: bool,
) -> Result<(), CliError> {
    if all {
        return run_all(reconciler, json_output, strict);
    }

    let path = match path {
        Some(path) => path,
        None => prompt_for_path(json_output)?,
    };
    let report = reconciler.check(&path)?;

    if json_output {
        println!("{}", output::format_json(&JsonReport::new(&report))?);
    } else {
        println!("{}", output::render_report(&report));
    }

    if strict && !report.all_match {
        std::process::exit(1);
    }
    Ok(())
}

fn run_all<C: PathCatalog, S: RecordSource>(
    reconciler: &PathReconciler<C, S>,
    json_output: bool,
    strict: bool,
) -> Result<(), CliError> {
    let mut reports = Vec::new();
    let mut failures = Vec::new();
    for (path, result) in reconciler.check_all() {
        match result {
            Ok(report) => reports.push(report),
            Err(e) => failures.push(PathFailure {
                path,
                error: e.to_string(),
            }),
        }
    }
    let all_match = reports.iter().all(|r| r.all_match);
    let failed = failures.len();

    if json_output {
        let run = JsonRun::new(reports.iter().collect(), failures);
        println!("{}", output::format_json(&run)?);
    } else {
        let rendered: Vec<String> = reports.iter().map(output::render_report).collect();
        println!("{}", rendered.join("\n\n"));
        for failure in &failures {
            eprintln!("Error: {}", failure.error);
        }
    }

    if failed > 0 {
        return Err(CliError::Incomplete(failed));
    }
    if strict && !all_match {
        std::process::exit(1);
    }
    Ok(())
}

/// Asks for a path on stdin. The prompt goes to stderr when stdout carries
/// JSON.
fn prompt_for_path(json_output: bool) -> Result<String, CliError> {
    if json_output {
        eprint!("{PROMPT}");
        io::stderr().flush()?;
    } else {
        print!("{PROMPT}");
        io::stdout().flush()?;
    }
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(strip_line_ending(&line).to_string())
}

/// Drops the line terminator only; other whitespace is part of the path.
fn strip_line_ending(line: &str) -> &str {
    line.trim_end_matches(['\r', '\n'])
}
