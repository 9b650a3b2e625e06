//! AccessFlow form validation
//!
//! Rule-driven validation for storefront forms. A [`RuleSet`] declares, per
//! field, whether a value is required, which format it must have and which
//! other field it must equal. [`validate`] applies the rules to a set of
//! [`FormValues`] and reports at most one message per field.
//!
//! ```
//! use accessflow_forms::{validate, FieldRule, FormValues, FormatKind, RuleSet};
//!
//! let rules = RuleSet::new()
//!     .field("email", FieldRule::new("Email").required().format(FormatKind::Email));
//!
//! let result = validate(&FormValues::new().with("email", "a@b"), &rules);
//! assert!(!result.is_valid);
//! assert_eq!(result.get_error("email"), Some("Please enter a valid email address"));
//! ```

pub mod engine;
pub mod forms;
pub mod rules;
pub mod validators;

pub use engine::{validate, validate_field, ValidationResult, Violation};
pub use forms::{checkout_rules, login_rules, profile_rules, register_rules, FormKind};
pub use rules::{FieldRule, FormValues, FormatKind, RuleEntry, RuleSet};
pub use validators::{
    validate_email, validate_password, validate_phone, validate_required, validate_zip_code,
};
