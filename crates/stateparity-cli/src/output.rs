//! Output formatting utilities.

use chrono::Utc;
use serde::Serialize;
use stateparity_core::{Mismatch, SubRecord};
use stateparity_store::PathReport;

/// Single-path JSON document.
#[derive(Serialize)]
pub struct JsonReport<'a> {
    pub generated_at: String,
    #[serde(flatten)]
    pub report: &'a PathReport,
}

impl<'a> JsonReport<'a> {
    pub fn new(report: &'a PathReport) -> Self {
        Self {
            generated_at: timestamp(),
            report,
        }
    }
}

/// A path that could not be reconciled.
#[derive(Serialize)]
pub struct PathFailure {
    pub path: String,
    pub error: String,
}

/// Multi-path JSON document.
#[derive(Serialize)]
pub struct JsonRun<'a> {
    pub generated_at: String,
    pub all_match: bool,
    pub paths: Vec<&'a PathReport>,
    pub failures: Vec<PathFailure>,
}

impl<'a> JsonRun<'a> {
    pub fn new(paths: Vec<&'a PathReport>, failures: Vec<PathFailure>) -> Self {
        let all_match = failures.is_empty() && paths.iter().all(|p| p.all_match);
        Self {
            generated_at: timestamp(),
            all_match,
            paths,
            failures,
        }
    }
}

fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
}

/// Formats any serializable value as pretty JSON.
pub fn format_json<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(value)
}

/// Renders the text report for one path.
pub fn render_report(report: &PathReport) -> String {
    let path = &report.path;
    let findings = &report.report;
    let mut lines = vec![
        format!("### Report for Path: {path} ###"),
        format!("Commands: {}", report.commands.join("; ")),
        format!("Structured Output: {}", report.structured_raw),
        format!("Flat Output: {}", report.flat_raw),
    ];

    if !findings.missing_in_flat.is_empty() {
        lines.push(format!(
            "Keys missing in flat output for path {path}: {}",
            format_list(&findings.missing_in_flat)
        ));
    }
    if !findings.missing_in_structured.is_empty() {
        lines.push(format!(
            "Keys missing in structured output for path {path}: {}",
            format_list(&findings.missing_in_structured)
        ));
    }
    if !findings.mismatches.is_empty() {
        lines.push(format!("Mismatches for path {path}:"));
        lines.extend(findings.mismatches.iter().map(format_mismatch));
    }
    if report.all_match {
        lines.push(format!("All values match for path {path}."));
    }
    lines.join("\n")
}

fn format_mismatch(mismatch: &Mismatch) -> String {
    match mismatch {
        Mismatch::Value {
            field,
            structured,
            flat,
            structured_normalized,
            flat_normalized,
        } => format!(
            "{field}: structured={structured} (normalized: {structured_normalized}), \
             flat={flat} (normalized: {flat_normalized})"
        ),
        Mismatch::SubRecords {
            field,
            structured,
            flat,
        } => format!(
            "{field}: structured={}, flat={}",
            format_sub_records(structured),
            format_sub_records(flat)
        ),
    }
}

fn format_list(items: &[String]) -> String {
    format!("[{}]", items.join(", "))
}

fn format_sub_records(records: &[SubRecord]) -> String {
    let rendered: Vec<String> = records
        .iter()
        .map(|record| {
            let fields: Vec<String> = record.iter().map(|(k, v)| format!("{k}: {v}")).collect();
            format!("{{{}}}", fields.join(", "))
        })
        .collect();
    format_list(&rendered)
}

/// Prints the header of the path table.
#[allow(clippy::print_literal)]
pub fn print_paths_header() {
    println!("{:<60} {}", "PATH", "COMMANDS");
    println!("{}", "-".repeat(100));
}

/// Formats one row of the path table.
pub fn format_path_row(path: &str, commands: &[String]) -> String {
    format!("{:<60} {}", path, commands.join("; "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use stateparity_core::{ReconciliationReport, Scalar};

    fn path_report(report: ReconciliationReport) -> PathReport {
        PathReport {
            path: "/p".to_string(),
            commands: vec!["show a".to_string(), "show b".to_string()],
            structured_raw: r#"{"a": 1}"#.to_string(),
            flat_raw: "a: 1".to_string(),
            all_match: report.all_match(),
            report,
        }
    }

    #[test]
    fn matching_report_ends_with_verdict() {
        let text = render_report(&path_report(ReconciliationReport {
            matched: vec!["a".to_string()],
            ..ReconciliationReport::default()
        }));
        assert_eq!(
            text,
            "### Report for Path: /p ###\n\
             Commands: show a; show b\n\
             Structured Output: {\"a\": 1}\n\
             Flat Output: a: 1\n\
             All values match for path /p."
        );
    }

    #[test]
    fn findings_are_listed_by_section() {
        let mut sub_record = SubRecord::new();
        sub_record.insert("neighbor_id".to_string(), Scalar::from("1.1.1.1"));
        sub_record.insert("state".to_string(), Scalar::from("full"));
        let text = render_report(&path_report(ReconciliationReport {
            missing_in_flat: vec!["in_errors".to_string()],
            missing_in_structured: vec!["uptime".to_string()],
            mismatches: vec![
                Mismatch::Value {
                    field: "ospf_state".to_string(),
                    structured: Scalar::from("up"),
                    flat: "down".to_string(),
                    structured_normalized: "up".to_string(),
                    flat_normalized: "down".to_string(),
                },
                Mismatch::SubRecords {
                    field: "adjacencies".to_string(),
                    structured: vec![sub_record],
                    flat: vec![],
                },
            ],
            ..ReconciliationReport::default()
        }));
        assert!(text.contains("Keys missing in flat output for path /p: [in_errors]"));
        assert!(text.contains("Keys missing in structured output for path /p: [uptime]"));
        assert!(text.contains("Mismatches for path /p:\nospf_state: structured=up (normalized: up), flat=down (normalized: down)"));
        assert!(text.contains("adjacencies: structured=[{neighbor_id: 1.1.1.1, state: full}], flat=[]"));
        assert!(!text.contains("All values match"));
    }

    #[test]
    fn path_rows_are_padded() {
        let row = format_path_row("/system/cpu/state", &["show cpu".to_string()]);
        assert!(row.starts_with("/system/cpu/state "));
        assert!(row.ends_with(" show cpu"));
    }
}
