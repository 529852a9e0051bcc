//! Per-path reconciliation over a catalog and a record source.

use serde::Serialize;
use stateparity_core::{ReconcileError, ReconciliationEngine, ReconciliationReport};
use tracing::{info, warn};

use crate::error::StoreError;
use crate::traits::{PathCatalog, RecordKind, RecordSource};

/// Everything known about one checked path.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathReport {
    /// Telemetry path.
    pub path: String,
    /// Commands that produced the flat record.
    pub commands: Vec<String>,
    /// Structured payload as fetched.
    pub structured_raw: String,
    /// Flat output as fetched.
    pub flat_raw: String,
    /// Field-level findings.
    pub report: ReconciliationReport,
    /// True when the report has no findings.
    pub all_match: bool,
}

/// Fetches both records for a path and reconciles them.
///
/// Paths are independent: a failure on one never affects another.
#[derive(Debug, Clone)]
pub struct PathReconciler<C, S> {
    catalog: C,
    source: S,
    engine: ReconciliationEngine,
}

impl<C: PathCatalog, S: RecordSource> PathReconciler<C, S> {
    /// Creates a reconciler.
    pub fn new(catalog: C, source: S, engine: ReconciliationEngine) -> Self {
        Self {
            catalog,
            source,
            engine,
        }
    }

    /// The catalog this reconciler resolves paths against.
    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Checks a single path.
    ///
    /// Unknown paths fail with [`StoreError::UnrecognizedPath`]; a known path
    /// whose structured or flat record is absent or empty fails with
    /// [`StoreError::MissingData`].
    pub fn check(&self, path: &str) -> Result<PathReport, StoreError> {
        let commands = self
            .catalog
            .commands(path)
            .ok_or_else(|| StoreError::UnrecognizedPath(path.to_string()))?;

        let structured_raw = self.fetch_present(path, RecordKind::Structured)?;
        let flat_raw = self.fetch_present(path, RecordKind::Flat)?;

        let structured = self.engine.decode(&structured_raw)?;
        let report = match self.engine.reconcile(&structured, &flat_raw) {
            Ok(report) => report,
            Err(ReconcileError::MissingData { side }) => {
                warn!(path, %side, "record has no fields");
                return Err(StoreError::MissingData {
                    path: path.to_string(),
                });
            }
            Err(e) => return Err(e.into()),
        };

        let all_match = report.all_match();
        info!(
            path,
            all_match,
            findings = report.finding_count(),
            "reconciled path"
        );
        Ok(PathReport {
            path: path.to_string(),
            commands,
            structured_raw,
            flat_raw,
            report,
            all_match,
        })
    }

    /// Checks every catalog path, in catalog order.
    pub fn check_all(&self) -> Vec<(String, Result<PathReport, StoreError>)> {
        self.catalog
            .paths()
            .into_iter()
            .map(|path| {
                let result = self.check(&path);
                (path, result)
            })
            .collect()
    }

    fn fetch_present(&self, path: &str, kind: RecordKind) -> Result<String, StoreError> {
        match self.source.fetch(path, kind)? {
            Some(raw) if !raw.trim().is_empty() => Ok(raw),
            _ => {
                warn!(path, ?kind, "record missing");
                Err(StoreError::MissingData {
                    path: path.to_string(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct MapSource(HashMap<(&'static str, RecordKind), &'static str>);

    impl RecordSource for MapSource {
        fn fetch(&self, path: &str, kind: RecordKind) -> Result<Option<String>, StoreError> {
            Ok(self
                .0
                .iter()
                .find(|((p, k), _)| *p == path && *k == kind)
                .map(|(_, v)| v.to_string()))
        }
    }

    struct OnePath;

    impl PathCatalog for OnePath {
        fn commands(&self, path: &str) -> Option<Vec<String>> {
            (path == "/cpu").then(|| vec!["show cpu".to_string()])
        }

        fn paths(&self) -> Vec<String> {
            vec!["/cpu".to_string()]
        }
    }

    fn source(structured: &'static str, flat: &'static str) -> MapSource {
        let mut map = HashMap::new();
        map.insert(("/cpu", RecordKind::Structured), structured);
        map.insert(("/cpu", RecordKind::Flat), flat);
        MapSource(map)
    }

    #[test]
    fn injected_source_is_reconciled() {
        let reconciler = PathReconciler::new(
            OnePath,
            source(r#"{"cpu_usage": 65}"#, "cpu_usage: 65"),
            ReconciliationEngine::default(),
        );
        let report = reconciler.check("/cpu").unwrap();
        assert!(report.all_match);
        assert_eq!(report.commands, ["show cpu"]);
    }

    #[test]
    fn empty_object_is_missing_data() {
        let reconciler =
            PathReconciler::new(OnePath, source("{}", "cpu_usage: 65"), ReconciliationEngine::default());
        assert!(matches!(
            reconciler.check("/cpu"),
            Err(StoreError::MissingData { .. })
        ));
    }

    #[test]
    fn blank_flat_record_is_missing_data() {
        let reconciler = PathReconciler::new(
            OnePath,
            source(r#"{"cpu_usage": 65}"#, "  "),
            ReconciliationEngine::default(),
        );
        let err = reconciler.check("/cpu").unwrap_err();
        assert_eq!(err.to_string(), "Missing data for path /cpu");
    }

    #[test]
    fn malformed_payload_is_a_reconcile_error() {
        let reconciler =
            PathReconciler::new(OnePath, source("[1, 2]", "a: 1"), ReconciliationEngine::default());
        assert!(matches!(
            reconciler.check("/cpu"),
            Err(StoreError::Reconcile(ReconcileError::InvalidStructured(_)))
        ));
    }
}
