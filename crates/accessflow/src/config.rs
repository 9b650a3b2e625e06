// File: src/config.rs
// Purpose: Store configuration parsed from accessflow.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default config file name, looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "accessflow.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct StoreConfig {
    #[serde(default)]
    pub catalog: CatalogConfig,

    #[serde(default)]
    pub pricing: PricingConfig,

    #[serde(default)]
    pub checkout: CheckoutConfig,

    #[serde(default)]
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// JSON catalog to load instead of the bundled demo data
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// How many products the home page features
    #[serde(default = "default_featured_count")]
    pub featured_count: usize,
}

/// Shipping and tax applied to an order's subtotal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Shipping is free when the subtotal is strictly above this
    #[serde(default = "default_free_shipping_threshold")]
    pub free_shipping_threshold: f64,

    #[serde(default = "default_flat_shipping")]
    pub flat_shipping: f64,

    #[serde(default = "default_tax_rate")]
    pub tax_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutConfig {
    /// Simulated payment processing time
    #[serde(default = "default_payment_delay_ms")]
    pub payment_delay_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Sign in any unknown email by creating an account for it
    #[serde(default = "default_false")]
    pub allow_unknown_login: bool,
}

// Default values
fn default_featured_count() -> usize {
    6
}

fn default_free_shipping_threshold() -> f64 {
    50.0
}

fn default_flat_shipping() -> f64 {
    5.99
}

fn default_tax_rate() -> f64 {
    0.08
}

fn default_payment_delay_ms() -> u64 {
    2000
}

fn default_false() -> bool {
    false
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: None,
            featured_count: default_featured_count(),
        }
    }
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            free_shipping_threshold: default_free_shipping_threshold(),
            flat_shipping: default_flat_shipping(),
            tax_rate: default_tax_rate(),
        }
    }
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            payment_delay_ms: default_payment_delay_ms(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            allow_unknown_login: default_false(),
        }
    }
}

impl CheckoutConfig {
    pub fn payment_delay(&self) -> Duration {
        Duration::from_millis(self.payment_delay_ms)
    }
}

impl StoreConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // If file doesn't exist or is empty, return default config
        if !path.exists() {
            tracing::debug!(?path, "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: StoreConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        Ok(config)
    }

    /// Load configuration from default path (./accessflow.toml)
    pub fn load_default() -> Result<Self> {
        Self::load(DEFAULT_CONFIG_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = StoreConfig::default();
        assert_eq!(config.catalog.featured_count, 6);
        assert_eq!(config.catalog.path, None);
        assert_eq!(config.pricing.free_shipping_threshold, 50.0);
        assert_eq!(config.pricing.flat_shipping, 5.99);
        assert_eq!(config.pricing.tax_rate, 0.08);
        assert_eq!(config.checkout.payment_delay(), Duration::from_secs(2));
        assert!(!config.auth.allow_unknown_login);
    }

    #[test]
    fn test_empty_config() {
        let config = toml::from_str::<StoreConfig>("").unwrap_or_default();
        assert_eq!(config, StoreConfig::default());
    }

    #[test]
    fn test_partial_sections() {
        let toml = r#"
            [pricing]
            tax_rate = 0.1

            [auth]
            allow_unknown_login = true
        "#;
        let config: StoreConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.pricing.tax_rate, 0.1);
        assert_eq!(config.pricing.flat_shipping, 5.99);
        assert!(config.auth.allow_unknown_login);
        assert_eq!(config.checkout.payment_delay_ms, 2000);
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = StoreConfig::load(dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, StoreConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[checkout]\npayment_delay_ms = 10").unwrap();

        let config = StoreConfig::load(file.path()).unwrap();
        assert_eq!(config.checkout.payment_delay(), Duration::from_millis(10));
    }

    #[test]
    fn test_load_reports_parse_errors() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[pricing\ntax_rate = ").unwrap();

        let err = StoreConfig::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
