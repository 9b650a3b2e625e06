// File: src/rules.rs
// Purpose: Declarative rule sets and the form values they are checked against

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Format check applied to a field once it has a value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FormatKind {
    #[default]
    None,
    Email,
    Password,
    Phone,
    ZipCode,
}

/// Validation requirements for a single field
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FieldRule {
    #[serde(default)]
    pub required: bool,

    #[serde(default)]
    pub format: FormatKind,

    /// Name of another field this one must equal (e.g. password confirmation)
    #[serde(default, rename = "match", skip_serializing_if = "Option::is_none")]
    pub match_field: Option<String>,

    /// Human readable name used in messages
    #[serde(default)]
    pub label: String,
}

impl FieldRule {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn format(mut self, format: FormatKind) -> Self {
        self.format = format;
        self
    }

    pub fn matches(mut self, field: impl Into<String>) -> Self {
        self.match_field = Some(field.into());
        self
    }

    /// Label for messages, falling back to the field name when none was given
    pub fn display_label<'a>(&'a self, field: &'a str) -> &'a str {
        if self.label.is_empty() {
            field
        } else {
            &self.label
        }
    }
}

/// A field name paired with its rule, as it appears in serialized rule sets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleEntry {
    pub field: String,
    #[serde(flatten)]
    pub rule: FieldRule,
}

/// Ordered mapping from field name to rule
///
/// Fields are validated in the order they were declared. Declaring a field a
/// second time replaces its rule but keeps its original position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<RuleEntry>", into = "Vec<RuleEntry>")]
pub struct RuleSet {
    entries: Vec<RuleEntry>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`RuleSet::insert`]
    pub fn field(mut self, name: impl Into<String>, rule: FieldRule) -> Self {
        self.insert(name, rule);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, rule: FieldRule) {
        let name = name.into();
        match self.entries.iter_mut().find(|entry| entry.field == name) {
            Some(entry) => entry.rule = rule,
            None => self.entries.push(RuleEntry { field: name, rule }),
        }
    }

    pub fn get(&self, name: &str) -> Option<&FieldRule> {
        self.entries
            .iter()
            .find(|entry| entry.field == name)
            .map(|entry| &entry.rule)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldRule)> {
        self.entries
            .iter()
            .map(|entry| (entry.field.as_str(), &entry.rule))
    }

    pub fn field_names(&self) -> Vec<&str> {
        self.entries.iter().map(|entry| entry.field.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<Vec<RuleEntry>> for RuleSet {
    fn from(entries: Vec<RuleEntry>) -> Self {
        let mut rules = RuleSet::new();
        for entry in entries {
            rules.insert(entry.field, entry.rule);
        }
        rules
    }
}

impl From<RuleSet> for Vec<RuleEntry> {
    fn from(rules: RuleSet) -> Self {
        rules.entries
    }
}

/// Current values of a form, keyed by field name
///
/// Reading a field that was never set yields the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormValues {
    values: HashMap<String, String>,
}

impl FormValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: &str) -> &str {
        self.values.get(field).map(String::as_str).unwrap_or("")
    }

    pub fn set(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.values.insert(field.into(), value.into());
    }

    /// Builder-style [`FormValues::set`]
    pub fn with(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    pub fn contains(&self, field: &str) -> bool {
        self.values.contains_key(field)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for FormValues
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl From<HashMap<String, String>> for FormValues {
    fn from(values: HashMap<String, String>) -> Self {
        Self { values }
    }
}
