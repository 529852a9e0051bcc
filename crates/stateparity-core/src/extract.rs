use regex::Regex;
use serde::Serialize;
use stateparity_canonical::Scalar;

use crate::record::{SubRecord, SubRecordPolicy};

/// Field name to raw value mapping parsed from command output.
///
/// Keys keep the position of their first appearance; a repeated key
/// overwrites the earlier value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldMap {
    entries: Vec<(String, String)>,
}

impl FieldMap {
    /// Inserts or overwrites a field.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Raw value of a field.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Whether `key` was present in the output.
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Keys in order of first appearance.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Entries in order of first appearance.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no line produced a field.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Parses line-oriented `key: value` output.
#[derive(Debug, Clone)]
pub struct RecordExtractor {
    field_re: Regex,
    sub_record_re: Regex,
    id_field: String,
    state_field: String,
}

impl Default for RecordExtractor {
    fn default() -> Self {
        Self::new(&SubRecordPolicy::default())
    }
}

impl RecordExtractor {
    /// Builds an extractor whose sub-record pattern is
    /// `<id_field>: X, <state_field>: Y`.
    pub fn new(policy: &SubRecordPolicy) -> Self {
        let field_re = Regex::new(r"^(\w+): (.+)").expect("invalid regex");
        let sub_record_re = Regex::new(&format!(
            r"{}: (.+), {}: (.+)",
            regex::escape(&policy.id_field),
            regex::escape(&policy.state_field)
        ))
        .expect("invalid regex");
        Self {
            field_re,
            sub_record_re,
            id_field: policy.id_field.clone(),
            state_field: policy.state_field.clone(),
        }
    }

    /// Identifying field of extracted sub-records.
    pub fn id_field(&self) -> &str {
        &self.id_field
    }

    /// One field per line starting with `<word>: <value>`. The first `: `
    /// splits key from value, so values may contain colons. Other lines are
    /// skipped.
    pub fn extract_fields(&self, text: &str) -> FieldMap {
        let mut fields = FieldMap::default();
        for line in text.lines() {
            if let Some(caps) = self.field_re.captures(line) {
                fields.insert(&caps[1], &caps[2]);
            }
        }
        fields
    }

    /// Every line containing the sub-record pattern yields one sub-record, in
    /// scan order.
    pub fn extract_sub_records(&self, text: &str) -> Vec<SubRecord> {
        text.lines()
            .filter_map(|line| self.sub_record_re.captures(line))
            .map(|caps| {
                SubRecord::from([
                    (self.id_field.clone(), Scalar::from(&caps[1])),
                    (self.state_field.clone(), Scalar::from(&caps[2])),
                ])
            })
            .collect()
    }
}
