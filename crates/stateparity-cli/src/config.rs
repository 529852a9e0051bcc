//! `stateparity.toml` settings.
//!
//! ```toml
//! [engine]
//! tolerance = 1e-6
//!
//! [engine.sub_records]
//! fields = ["adjacencies"]
//! id_field = "neighbor_id"
//! state_field = "state"
//!
//! [fixtures]
//! path = "lab-fixtures.toml"
//!
//! [logging]
//! level = "warn"
//! ```
//!
//! A relative fixtures path is resolved against the config file's directory.

use serde::Deserialize;
use stateparity_core::ReconcileOptions;
use stateparity_store::FixtureSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::CliError;

/// Environment variable naming a config file when `--config` is absent.
pub const CONFIG_ENV: &str = "STATEPARITY_CONFIG";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub engine: ReconcileOptions,
    pub fixtures: FixtureSettings,
    pub logging: LoggingSettings,
    #[serde(skip)]
    base_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FixtureSettings {
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingSettings {
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

impl Settings {
    pub fn from_toml(input: &str) -> Result<Self, CliError> {
        let settings: Settings = toml::from_str(input)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Loads `explicit`, else the file named by `STATEPARITY_CONFIG`, else
    /// defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, CliError> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => match std::env::var_os(CONFIG_ENV) {
                Some(value) if !value.is_empty() => PathBuf::from(value),
                _ => return Ok(Self::default()),
            },
        };
        let content = fs::read_to_string(&path).map_err(|source| CliError::ConfigRead {
            path: path.clone(),
            source,
        })?;
        let mut settings = Self::from_toml(&content)?;
        settings.base_dir = path.parent().map(Path::to_path_buf);
        Ok(settings)
    }

    /// Fixture set to reconcile against: `override_path`, else the configured
    /// file, else the builtin set.
    pub fn fixture_set(&self, override_path: Option<&Path>) -> Result<FixtureSet, CliError> {
        let set = match (override_path, &self.fixtures.path) {
            (Some(path), _) => FixtureSet::load(path)?,
            (None, Some(path)) => FixtureSet::load(self.resolve(path))?,
            (None, None) => FixtureSet::builtin()?,
        };
        Ok(set)
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        match &self.base_dir {
            Some(dir) if path.is_relative() => dir.join(path),
            _ => path.to_path_buf(),
        }
    }

    fn validate(&self) -> Result<(), CliError> {
        let tolerance = self.engine.tolerance;
        if !tolerance.is_finite() || tolerance < 0.0 {
            return Err(CliError::Config(format!(
                "engine.tolerance must be a non-negative number, got {tolerance}"
            )));
        }
        let policy = &self.engine.sub_records;
        if policy.id_field.is_empty() || policy.state_field.is_empty() {
            return Err(CliError::Config(
                "engine.sub_records id_field and state_field must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stateparity_canonical::DEFAULT_TOLERANCE;

    #[test]
    fn empty_file_gives_defaults() {
        let settings = Settings::from_toml("").unwrap();
        assert_eq!(settings.engine.tolerance, DEFAULT_TOLERANCE);
        assert_eq!(settings.engine.sub_records.fields, ["adjacencies"]);
        assert_eq!(settings.logging.level, "warn");
        assert!(settings.fixtures.path.is_none());
    }

    #[test]
    fn nested_engine_tables_are_read() {
        let settings = Settings::from_toml(
            r#"
[engine]
tolerance = 0.01

[engine.sub_records]
fields = ["peers"]
id_field = "peer_id"
"#,
        )
        .unwrap();
        assert_eq!(settings.engine.tolerance, 0.01);
        assert_eq!(settings.engine.sub_records.fields, ["peers"]);
        assert_eq!(settings.engine.sub_records.id_field, "peer_id");
        assert_eq!(settings.engine.sub_records.state_field, "state");
    }

    #[test]
    fn negative_tolerance_is_rejected() {
        let err = Settings::from_toml("[engine]\ntolerance = -1.0").unwrap_err();
        assert!(matches!(err, CliError::Config(_)));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = Settings::from_toml("[logging]\nlevle = \"debug\"").unwrap_err();
        assert!(matches!(err, CliError::ConfigParse(_)));
    }

    #[test]
    fn misspelled_engine_keys_are_rejected() {
        let err = Settings::from_toml("[engine]\ntolerence = 0.5\n").unwrap_err();
        assert!(matches!(err, CliError::ConfigParse(_)));

        let err = Settings::from_toml("[engine.sub_records]\nid_feild = \"peer_id\"\n").unwrap_err();
        assert!(matches!(err, CliError::ConfigParse(_)));
    }

    #[test]
    fn zero_tolerance_is_accepted() {
        let settings = Settings::from_toml("[engine]\ntolerance = 0.0\n").unwrap();
        assert_eq!(settings.engine.tolerance, 0.0);
    }

    #[test]
    fn relative_fixture_path_follows_config_dir() {
        let settings = Settings {
            base_dir: Some(PathBuf::from("/etc/stateparity")),
            ..Settings::default()
        };
        assert_eq!(
            settings.resolve(Path::new("lab.toml")),
            PathBuf::from("/etc/stateparity/lab.toml")
        );
        assert_eq!(settings.resolve(Path::new("/tmp/lab.toml")), PathBuf::from("/tmp/lab.toml"));
    }
}
