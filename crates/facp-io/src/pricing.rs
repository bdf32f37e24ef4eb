//! Pricing-override document.
//!
//! An optional JSON document supplies explicit per-model prices and
//! per-category defaults. Without one, the catalog falls back to the
//! built-in conservative category defaults.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use facp_core::{ConfigResult, PricingTables};

/// Structured pricing override document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingOverrides {
    /// model number → unit price
    pub module_overrides: HashMap<String, f64>,
    /// category → default unit price
    pub category_defaults: HashMap<String, f64>,
}

impl PricingOverrides {
    /// Convert into the tables the catalog builder consumes.
    ///
    /// The document replaces both tables wholesale; it does not merge with
    /// the built-in defaults.
    pub fn into_tables(self) -> PricingTables {
        PricingTables {
            module_prices: self.module_overrides,
            category_prices: self.category_defaults,
        }
    }
}

/// Load a pricing-override document from a JSON file.
pub fn load_pricing_overrides(path: impl AsRef<Path>) -> ConfigResult<PricingOverrides> {
    let contents = std::fs::read_to_string(path.as_ref())?;
    let overrides: PricingOverrides = serde_json::from_str(&contents)?;
    Ok(overrides)
}
