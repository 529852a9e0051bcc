use serde::{Deserialize, Serialize};
use serde_json::Value;
use stateparity_canonical::Scalar;
use std::collections::BTreeMap;
use std::fmt;

use crate::errors::ReconcileError;

/// One entry of a repeated group, e.g. a single OSPF neighbor.
pub type SubRecord = BTreeMap<String, Scalar>;

/// Decides which payload fields hold sub-record lists and how those
/// sub-records appear in command output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SubRecordPolicy {
    /// Payload field names decoded as sub-record lists.
    pub fields: Vec<String>,
    /// Field identifying a sub-record; matching is keyed on it.
    pub id_field: String,
    /// Field carrying the sub-record state.
    pub state_field: String,
}

impl Default for SubRecordPolicy {
    fn default() -> Self {
        Self {
            fields: vec!["adjacencies".to_string()],
            id_field: "neighbor_id".to_string(),
            state_field: "state".to_string(),
        }
    }
}

impl SubRecordPolicy {
    /// Whether `key` is decoded as a sub-record list.
    pub fn is_sub_record_field(&self, key: &str) -> bool {
        self.fields.iter().any(|f| f == key)
    }

    /// Sort key for a sub-record: its identifying value, if present.
    pub fn sort_key(&self, record: &SubRecord) -> Option<String> {
        record.get(&self.id_field).map(|v| v.to_string())
    }

    /// Stable sort by identifying field. Records sharing an identifier keep
    /// their order of appearance.
    pub fn sorted(&self, records: &[SubRecord]) -> Vec<SubRecord> {
        let mut sorted = records.to_vec();
        sorted.sort_by_key(|r| self.sort_key(r));
        sorted
    }
}

/// Value of a structured record field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// A single comparable value.
    Scalar(Scalar),
    /// A list of sub-records compared as a set keyed by identifier.
    SubRecords(Vec<SubRecord>),
}

impl From<Scalar> for FieldValue {
    fn from(value: Scalar) -> Self {
        FieldValue::Scalar(value)
    }
}

/// Telemetry-shaped record: ordered field name to value mapping.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StructuredRecord {
    fields: Vec<(String, FieldValue)>,
}

impl StructuredRecord {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a field. Re-inserting a key replaces its value in place.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<FieldValue>) {
        let key = key.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((key, value)),
        }
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Looks up a field.
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Whether the record has a field named `key`.
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Fields in payload order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Decodes a JSON payload. Fields named by `policy` must be lists of
    /// objects and become [`FieldValue::SubRecords`]; everything else becomes
    /// a scalar.
    pub fn from_json(payload: &str, policy: &SubRecordPolicy) -> Result<Self, ReconcileError> {
        let value: Value = serde_json::from_str(payload)
            .map_err(|e| ReconcileError::InvalidStructured(e.to_string()))?;
        Self::from_value(&value, policy)
    }

    /// Decodes an already parsed JSON value.
    pub fn from_value(value: &Value, policy: &SubRecordPolicy) -> Result<Self, ReconcileError> {
        let Value::Object(map) = value else {
            return Err(ReconcileError::InvalidStructured(format!(
                "{}: expected an object, found {}",
                FieldPath::root(),
                json_kind(value)
            )));
        };

        let mut record = Self::new();
        for (key, child) in map {
            let path = FieldPath::root().push_field(key);
            let field = if policy.is_sub_record_field(key) {
                FieldValue::SubRecords(decode_sub_records(child, &path)?)
            } else {
                FieldValue::Scalar(decode_scalar(child))
            };
            record.insert(key.clone(), field);
        }
        Ok(record)
    }
}

fn decode_sub_records(value: &Value, path: &FieldPath) -> Result<Vec<SubRecord>, ReconcileError> {
    let Value::Array(items) = value else {
        return Err(ReconcileError::InvalidStructured(format!(
            "{path}: expected a list of objects, found {}",
            json_kind(value)
        )));
    };

    items
        .iter()
        .enumerate()
        .map(|(idx, item)| match item {
            Value::Object(entry) => Ok(entry
                .iter()
                .map(|(k, v)| (k.clone(), decode_scalar(v)))
                .collect::<SubRecord>()),
            other => Err(ReconcileError::InvalidStructured(format!(
                "{}: expected an object, found {}",
                path.push_index(idx),
                json_kind(other)
            ))),
        })
        .collect()
}

/// Leaves map directly; anything else is carried as its JSON text.
fn decode_scalar(value: &Value) -> Scalar {
    match value {
        Value::String(s) => Scalar::Text(s.clone()),
        Value::Number(n) => Scalar::Number(n.clone()),
        Value::Bool(b) => Scalar::Text(b.to_string()),
        Value::Null => Scalar::Text("null".to_string()),
        Value::Array(_) | Value::Object(_) => Scalar::Text(value.to_string()),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

/// Location inside a payload, for decode errors.
#[derive(Debug, Clone)]
struct FieldPath {
    segments: Vec<String>,
}

impl FieldPath {
    fn root() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    fn push_field(&self, field: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(field.to_string());
        Self { segments }
    }

    fn push_index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        match segments.last_mut() {
            Some(last) => last.push_str(&format!("[{index}]")),
            None => segments.push(format!("[{index}]")),
        }
        Self { segments }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            write!(f, "root")
        } else {
            write!(f, "{}", self.segments.join("."))
        }
    }
}
