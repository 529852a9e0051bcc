//! Data provider traits.

use crate::error::StoreError;

/// Which representation of a path's state to fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    /// The structured telemetry payload (a JSON object).
    Structured,
    /// The flat command output (`key: value` lines).
    Flat,
}

/// Supplies raw records for a telemetry path.
///
/// `Ok(None)` means the source has nothing for that path and kind; callers
/// treat it the same as an empty record.
pub trait RecordSource {
    /// Fetches the raw record text for `path`.
    fn fetch(&self, path: &str, kind: RecordKind) -> Result<Option<String>, StoreError>;
}

/// Lists the known telemetry paths and the commands that produce their flat
/// output. Commands are for display only.
pub trait PathCatalog {
    /// Commands for `path`, or `None` if the path is unknown.
    fn commands(&self, path: &str) -> Option<Vec<String>>;

    /// All known paths, in catalog order.
    fn paths(&self) -> Vec<String>;

    /// Whether `path` is in the catalog.
    fn contains(&self, path: &str) -> bool {
        self.commands(path).is_some()
    }
}

impl<T: RecordSource + ?Sized> RecordSource for &T {
    fn fetch(&self, path: &str, kind: RecordKind) -> Result<Option<String>, StoreError> {
        (**self).fetch(path, kind)
    }
}

impl<T: PathCatalog + ?Sized> PathCatalog for &T {
    fn commands(&self, path: &str) -> Option<Vec<String>> {
        (**self).commands(path)
    }

    fn paths(&self) -> Vec<String> {
        (**self).paths()
    }
}
