// File: src/forms.rs
// Purpose: Rule sets for the storefront's built-in forms

use crate::rules::{FieldRule, FormatKind, RuleSet};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The forms the storefront ships with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormKind {
    Login,
    Register,
    Profile,
    Checkout,
}

impl FormKind {
    pub const ALL: [FormKind; 4] = [
        FormKind::Login,
        FormKind::Register,
        FormKind::Profile,
        FormKind::Checkout,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FormKind::Login => "login",
            FormKind::Register => "register",
            FormKind::Profile => "profile",
            FormKind::Checkout => "checkout",
        }
    }

    pub fn rules(&self) -> RuleSet {
        match self {
            FormKind::Login => login_rules(),
            FormKind::Register => register_rules(),
            FormKind::Profile => profile_rules(),
            FormKind::Checkout => checkout_rules(),
        }
    }
}

impl fmt::Display for FormKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FormKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FormKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                format!(
                    "unknown form '{}', expected one of: login, register, profile, checkout",
                    s
                )
            })
    }
}

pub fn login_rules() -> RuleSet {
    RuleSet::new()
        .field(
            "email",
            FieldRule::new("Email").required().format(FormatKind::Email),
        )
        .field("password", FieldRule::new("Password").required())
}

pub fn register_rules() -> RuleSet {
    RuleSet::new()
        .field("name", FieldRule::new("Name").required())
        .field(
            "email",
            FieldRule::new("Email").required().format(FormatKind::Email),
        )
        .field(
            "password",
            FieldRule::new("Password")
                .required()
                .format(FormatKind::Password),
        )
        .field(
            "confirmPassword",
            FieldRule::new("Confirm Password")
                .required()
                .matches("password"),
        )
}

pub fn profile_rules() -> RuleSet {
    RuleSet::new()
        .field("name", FieldRule::new("Name").required())
        .field(
            "email",
            FieldRule::new("Email").required().format(FormatKind::Email),
        )
}

/// Shipping and payment details collected at checkout
pub fn checkout_rules() -> RuleSet {
    RuleSet::new()
        .field("fullName", FieldRule::new("Full Name").required())
        .field(
            "email",
            FieldRule::new("Email").required().format(FormatKind::Email),
        )
        .field(
            "phone",
            FieldRule::new("Phone").required().format(FormatKind::Phone),
        )
        .field("address", FieldRule::new("Address").required())
        .field("city", FieldRule::new("City").required())
        .field("state", FieldRule::new("State").required())
        .field(
            "zipCode",
            FieldRule::new("Zip Code")
                .required()
                .format(FormatKind::ZipCode),
        )
        .field("cardNumber", FieldRule::new("Card Number").required())
        .field("cardExpiry", FieldRule::new("Expiry Date").required())
        .field("cardCVV", FieldRule::new("CVV").required())
}
