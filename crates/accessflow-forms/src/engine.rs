// File: src/engine.rs
// Purpose: Apply a rule set to form values and collect per-field errors

use crate::rules::{FieldRule, FormValues, FormatKind, RuleSet};
use crate::validators::{
    validate_email, validate_password, validate_phone, validate_required, validate_zip_code,
};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// The first check a field failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    Required { label: String },
    InvalidEmail,
    WeakPassword,
    InvalidPhone,
    InvalidZipCode,
    Mismatch { label: String },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::Required { label } => write!(f, "{} is required", label),
            Violation::InvalidEmail => f.write_str("Please enter a valid email address"),
            Violation::WeakPassword => f.write_str("Password must be at least 6 characters"),
            Violation::InvalidPhone => f.write_str("Please enter a valid phone number"),
            Violation::InvalidZipCode => f.write_str("Please enter a valid zip code"),
            Violation::Mismatch { label } => write!(f, "{} does not match", label),
        }
    }
}

/// Outcome of validating a whole form
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: HashMap<String, String>,
}

impl ValidationResult {
    /// Create a successful validation result
    pub fn success() -> Self {
        Self {
            is_valid: true,
            errors: HashMap::new(),
        }
    }

    /// Build a result from collected errors; valid exactly when there are none
    pub fn from_errors(errors: HashMap<String, String>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Get the error message for a specific field
    pub fn get_error(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::success()
    }
}

/// Check one field against its rule
///
/// Checks run in a fixed order and stop at the first failure: required,
/// then format, then match. Format and match only look at non-empty values.
pub fn validate_field(field: &str, rule: &FieldRule, values: &FormValues) -> Option<Violation> {
    let value = values.get(field);
    let label = rule.display_label(field);

    if rule.required && !validate_required(value) {
        return Some(Violation::Required {
            label: label.to_string(),
        });
    }

    if value.is_empty() {
        return None;
    }

    let format_violation = match rule.format {
        FormatKind::None => None,
        FormatKind::Email => (!validate_email(value)).then_some(Violation::InvalidEmail),
        FormatKind::Password => (!validate_password(value)).then_some(Violation::WeakPassword),
        FormatKind::Phone => (!validate_phone(value)).then_some(Violation::InvalidPhone),
        FormatKind::ZipCode => (!validate_zip_code(value)).then_some(Violation::InvalidZipCode),
    };
    if format_violation.is_some() {
        return format_violation;
    }

    match &rule.match_field {
        Some(other) if value != values.get(other) => Some(Violation::Mismatch {
            label: label.to_string(),
        }),
        _ => None,
    }
}

/// Validate every field named in `rules` against `values`
///
/// Fields present in `values` but absent from `rules` are ignored.
pub fn validate(values: &FormValues, rules: &RuleSet) -> ValidationResult {
    let errors: HashMap<String, String> = rules
        .iter()
        .filter_map(|(field, rule)| {
            validate_field(field, rule, values).map(|violation| (field.to_string(), violation.to_string()))
        })
        .collect();

    tracing::debug!(
        fields = rules.len(),
        errors = errors.len(),
        "validated form"
    );

    ValidationResult::from_errors(errors)
}
