pub mod checkout;
pub mod products;
pub mod validate;

use accessflow::{Catalog, StoreConfig};
use accessflow_forms::FormValues;
use anyhow::Result;
use std::path::Path;

/// Everything a command needs: configuration plus the loaded catalog
pub struct Context {
    pub config: StoreConfig,
    pub catalog: Catalog,
}

impl Context {
    pub fn load(config_path: &Path, catalog_override: Option<&Path>) -> Result<Self> {
        let config = StoreConfig::load(config_path)?;

        let catalog = match catalog_override.or(config.catalog.path.as_deref()) {
            Some(path) => Catalog::load(path)?,
            None => Catalog::demo()?,
        };
        tracing::debug!(products = catalog.products().len(), "catalog loaded");

        Ok(Self { config, catalog })
    }
}

/// Parse `NAME=VALUE`; the value may be empty or contain further `=`
pub fn parse_field(arg: &str) -> Result<(String, String), String> {
    let (name, value) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{}'", arg))?;
    if name.is_empty() {
        return Err(format!("missing field name in '{}'", arg));
    }
    Ok((name.to_string(), value.to_string()))
}

/// Parse `ID` or `ID:QTY`
pub fn parse_item(arg: &str) -> Result<(u32, u32), String> {
    let parse = |s: &str, what: &str| {
        s.trim()
            .parse::<u32>()
            .map_err(|_| format!("invalid {} in '{}'", what, arg))
    };
    match arg.split_once(':') {
        Some((id, qty)) => Ok((parse(id, "product id")?, parse(qty, "quantity")?)),
        None => Ok((parse(arg, "product id")?, 1)),
    }
}

pub fn form_values(fields: Vec<(String, String)>) -> FormValues {
    fields.into_iter().collect()
}

pub fn money(amount: f64) -> String {
    format!("${:.2}", amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_field() {
        assert_eq!(
            parse_field("email=a@b.com"),
            Ok(("email".to_string(), "a@b.com".to_string()))
        );
        assert_eq!(
            parse_field("cardCVV="),
            Ok(("cardCVV".to_string(), String::new()))
        );
        assert_eq!(
            parse_field("note=a=b"),
            Ok(("note".to_string(), "a=b".to_string()))
        );
        assert!(parse_field("email").is_err());
        assert!(parse_field("=value").is_err());
    }

    #[test]
    fn test_parse_item() {
        assert_eq!(parse_item("3"), Ok((3, 1)));
        assert_eq!(parse_item("3:4"), Ok((3, 4)));
        assert!(parse_item("x").is_err());
        assert!(parse_item("3:-1").is_err());
    }

    #[test]
    fn test_money() {
        assert_eq!(money(5.99), "$5.99");
        assert_eq!(money(10.0), "$10.00");
    }
}
