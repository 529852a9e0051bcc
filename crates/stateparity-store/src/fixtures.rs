//! Fixture sets: static device records keyed by telemetry path.
//!
//! A fixture file is TOML with one `[[paths]]` table per path:
//!
//! ```toml
//! [[paths]]
//! path = "/system/cpu/state/usage"
//! commands = ["show cpu"]
//! structured = '{"cpu_usage": 65}'
//! flat = "cpu_usage: 65"
//! ```
//!
//! `structured` and `flat` may be omitted; a path with no record is still
//! recognized but cannot be reconciled.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::StoreError;
use crate::traits::{PathCatalog, RecordKind, RecordSource};

const BUILTIN_FIXTURES: &str = include_str!("../fixtures/default.toml");

/// Records and commands for one telemetry path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fixture {
    /// Telemetry path this entry describes.
    pub path: String,
    /// Commands whose output makes up the flat record.
    #[serde(default)]
    pub commands: Vec<String>,
    /// Structured payload (a JSON object).
    #[serde(default)]
    pub structured: Option<String>,
    /// Flat command output.
    #[serde(default)]
    pub flat: Option<String>,
}

/// An ordered collection of fixtures, acting as both catalog and source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixtureSet {
    #[serde(default)]
    paths: Vec<Fixture>,
}

impl FixtureSet {
    /// Builds a set from fixtures, rejecting duplicate or blank paths.
    pub fn new(fixtures: Vec<Fixture>) -> Result<Self, StoreError> {
        let mut seen = HashSet::new();
        for fixture in &fixtures {
            if fixture.path.trim().is_empty() {
                return Err(StoreError::InvalidFixtures(
                    "fixture path must not be empty".to_string(),
                ));
            }
            if !seen.insert(fixture.path.as_str()) {
                return Err(StoreError::InvalidFixtures(format!(
                    "duplicate fixture path '{}'",
                    fixture.path
                )));
            }
        }
        Ok(Self { paths: fixtures })
    }

    /// Parses a fixture set from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, StoreError> {
        let parsed: FixtureSet = toml::from_str(content)?;
        Self::new(parsed.paths)
    }

    /// Reads and parses a fixture file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let set = Self::from_toml(&content)?;
        debug!(file = %path.display(), paths = set.len(), "loaded fixtures");
        Ok(set)
    }

    /// The embedded device fixtures.
    pub fn builtin() -> Result<Self, StoreError> {
        Self::from_toml(BUILTIN_FIXTURES)
    }

    /// Fixture for `path`, if any.
    pub fn get(&self, path: &str) -> Option<&Fixture> {
        self.paths.iter().find(|f| f.path == path)
    }

    /// Fixtures in file order.
    pub fn iter(&self) -> impl Iterator<Item = &Fixture> {
        self.paths.iter()
    }

    /// Number of paths.
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// True if the set has no paths.
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

impl RecordSource for FixtureSet {
    fn fetch(&self, path: &str, kind: RecordKind) -> Result<Option<String>, StoreError> {
        let record = self.get(path).and_then(|f| match kind {
            RecordKind::Structured => f.structured.clone(),
            RecordKind::Flat => f.flat.clone(),
        });
        Ok(record)
    }
}

impl PathCatalog for FixtureSet {
    fn commands(&self, path: &str) -> Option<Vec<String>> {
        self.get(path).map(|f| f.commands.clone())
    }

    fn paths(&self) -> Vec<String> {
        self.paths.iter().map(|f| f.path.clone()).collect()
    }
}
