//! Basket controller configuration.

use serde::{Deserialize, Serialize};

use crate::error::{BasketError, BasketResult};

/// Basket controller configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BasketConfig {
    /// Decorators wrapped around the standard controller, innermost first.
    pub decorators: Vec<String>,
    /// Product type tag that marks bundle products.
    pub bundle_type: String,
    /// Stock type used when a caller does not name one.
    pub default_stock_type: String,
    /// Largest quantity accepted for a single line.
    pub max_quantity: f64,
    /// Number of coupon codes a basket may hold.
    pub coupons_allowed: usize,
}

impl Default for BasketConfig {
    fn default() -> Self {
        Self {
            decorators: Vec::new(),
            bundle_type: "bundle".to_string(),
            default_stock_type: "default".to_string(),
            max_quantity: 2_147_483_647.0,
            coupons_allowed: 1,
        }
    }
}

impl BasketConfig {
    pub fn with_decorator(mut self, name: impl Into<String>) -> Self {
        self.decorators.push(name.into());
        self
    }

    pub fn with_coupons_allowed(mut self, allowed: usize) -> Self {
        self.coupons_allowed = allowed;
        self
    }

    pub fn with_max_quantity(mut self, max: f64) -> Self {
        self.max_quantity = max;
        self
    }

    /// The requested stock type, or the configured default when none was named.
    pub fn stock_type<'a>(&'a self, requested: &'a str) -> &'a str {
        if requested.trim().is_empty() {
            &self.default_stock_type
        } else {
            requested
        }
    }

    /// Parses a JSON document; missing keys fall back to defaults.
    pub fn from_json_str(json: &str) -> BasketResult<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| BasketError::Config(format!("invalid basket config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads `BASKETRY_*` environment variables on top of the defaults.
    ///
    /// Unparsable numbers are logged and ignored.
    pub fn from_env() -> BasketResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> BasketResult<Self> {
        let mut config = Self::default();

        if let Some(list) = lookup("BASKETRY_DECORATORS") {
            config.decorators = list
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect();
        }
        if let Some(bundle_type) = lookup("BASKETRY_BUNDLE_TYPE") {
            config.bundle_type = bundle_type;
        }
        if let Some(stock_type) = lookup("BASKETRY_DEFAULT_STOCK_TYPE") {
            config.default_stock_type = stock_type;
        }
        if let Some(raw) = lookup("BASKETRY_MAX_QUANTITY") {
            match raw.parse::<f64>() {
                Ok(max) => config.max_quantity = max,
                Err(_) => tracing::warn!(value = %raw, "BASKETRY_MAX_QUANTITY is not a number; using default"),
            }
        }
        if let Some(raw) = lookup("BASKETRY_COUPONS_ALLOWED") {
            match raw.parse::<usize>() {
                Ok(allowed) => config.coupons_allowed = allowed,
                Err(_) => tracing::warn!(value = %raw, "BASKETRY_COUPONS_ALLOWED is not a number; using default"),
            }
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> BasketResult<()> {
        if self.bundle_type.trim().is_empty() {
            return Err(BasketError::Config("bundle_type cannot be empty".to_string()));
        }
        if self.default_stock_type.trim().is_empty() {
            return Err(BasketError::Config("default_stock_type cannot be empty".to_string()));
        }
        if !(self.max_quantity.is_finite() && self.max_quantity > 0.0) {
            return Err(BasketError::Config(format!(
                "max_quantity must be a positive number, got {}",
                self.max_quantity
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_match_shop_conventions() {
        let config = BasketConfig::default();
        assert!(config.decorators.is_empty());
        assert_eq!(config.bundle_type, "bundle");
        assert_eq!(config.default_stock_type, "default");
        assert_eq!(config.coupons_allowed, 1);
    }

    #[test]
    fn json_overrides_only_given_keys() {
        let config = BasketConfig::from_json_str(r#"{"decorators":["bundle"],"coupons_allowed":3}"#)
            .unwrap();
        assert_eq!(config.decorators, vec!["bundle".to_string()]);
        assert_eq!(config.coupons_allowed, 3);
        assert_eq!(config.bundle_type, "bundle");
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        let err = BasketConfig::from_json_str("{decorators").unwrap_err();
        assert!(matches!(err, BasketError::Config(_)));
    }

    #[test]
    fn env_list_is_split_and_trimmed() {
        let config = BasketConfig::from_lookup(lookup(&[
            ("BASKETRY_DECORATORS", " bundle , ,audit"),
            ("BASKETRY_COUPONS_ALLOWED", "2"),
        ]))
        .unwrap();
        assert_eq!(config.decorators, vec!["bundle".to_string(), "audit".to_string()]);
        assert_eq!(config.coupons_allowed, 2);
    }

    #[test]
    fn bad_env_numbers_fall_back_to_defaults() {
        let config = BasketConfig::from_lookup(lookup(&[("BASKETRY_MAX_QUANTITY", "lots")])).unwrap();
        assert_eq!(config.max_quantity, BasketConfig::default().max_quantity);
    }

    #[test]
    fn blank_stock_type_falls_back_to_default() {
        let config = BasketConfig::from_lookup(lookup(&[("BASKETRY_DEFAULT_STOCK_TYPE", "warehouse")])).unwrap();
        assert_eq!(config.stock_type(" "), "warehouse");
        assert_eq!(config.stock_type("outlet"), "outlet");
    }

    #[test]
    fn empty_bundle_type_is_rejected() {
        let err = BasketConfig::from_lookup(lookup(&[("BASKETRY_BUNDLE_TYPE", "")])).unwrap_err();
        assert!(matches!(err, BasketError::Config(_)));
    }
}
