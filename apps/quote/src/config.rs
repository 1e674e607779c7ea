//! Quote configuration.
//!
//! Loaded from environment variables with fallback to defaults.
//!
//! | Variable                       | Default   |
//! |--------------------------------|-----------|
//! | `POWDERBOOK_CURRENCY_SYMBOL`   | `$`       |
//! | `POWDERBOOK_CURRENCY_DECIMALS` | `3`       |
//! | `POWDERBOOK_ROUNDING`          | `half_up` |
//! | `POWDERBOOK_OUTPUT`            | `text`    |

use powderbook_core::format::{CurrencyFormat, DEFAULT_DECIMALS, MAX_DECIMALS};
use powderbook_core::RoundingMode;
use serde::{Deserialize, Serialize};
use std::env;

/// How results are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    #[default]
    Text,
    Json,
}

/// Quote configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteConfig {
    /// Currency display settings passed to the core formatter
    pub currency: CurrencyFormat,

    /// Text or JSON output
    pub output: OutputMode,
}

impl Default for QuoteConfig {
    fn default() -> Self {
        QuoteConfig {
            currency: CurrencyFormat::default(),
            output: OutputMode::Text,
        }
    }
}

impl QuoteConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let symbol = lookup("POWDERBOOK_CURRENCY_SYMBOL").unwrap_or_else(|| "$".to_string());

        let decimals: u32 = lookup("POWDERBOOK_CURRENCY_DECIMALS")
            .unwrap_or_else(|| DEFAULT_DECIMALS.to_string())
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue("POWDERBOOK_CURRENCY_DECIMALS".to_string()))?;

        if decimals > MAX_DECIMALS {
            return Err(ConfigError::InvalidValue(
                "POWDERBOOK_CURRENCY_DECIMALS".to_string(),
            ));
        }

        let rounding: RoundingMode = match lookup("POWDERBOOK_ROUNDING") {
            Some(value) => value
                .parse()
                .map_err(|_| ConfigError::InvalidValue("POWDERBOOK_ROUNDING".to_string()))?,
            None => RoundingMode::default(),
        };

        let output = match lookup("POWDERBOOK_OUTPUT")
            .map(|v| v.trim().to_ascii_lowercase())
            .as_deref()
        {
            None | Some("text") => OutputMode::Text,
            Some("json") => OutputMode::Json,
            Some(_) => return Err(ConfigError::InvalidValue("POWDERBOOK_OUTPUT".to_string())),
        };

        Ok(QuoteConfig {
            currency: CurrencyFormat::new(symbol, decimals, rounding),
            output,
        })
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = QuoteConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, QuoteConfig::default());
        assert_eq!(config.currency.format(0.1416), "$0.142");
    }

    #[test]
    fn test_overrides() {
        let config = QuoteConfig::from_lookup(lookup(&[
            ("POWDERBOOK_CURRENCY_SYMBOL", "€"),
            ("POWDERBOOK_CURRENCY_DECIMALS", "2"),
            ("POWDERBOOK_ROUNDING", "half_even"),
            ("POWDERBOOK_OUTPUT", "JSON"),
        ]))
        .unwrap();

        assert_eq!(config.currency.symbol, "€");
        assert_eq!(config.currency.decimals, 2);
        assert_eq!(config.currency.rounding, RoundingMode::HalfEven);
        assert_eq!(config.output, OutputMode::Json);
    }

    #[test]
    fn test_invalid_values() {
        for (key, value) in [
            ("POWDERBOOK_CURRENCY_DECIMALS", "three"),
            ("POWDERBOOK_CURRENCY_DECIMALS", "12"),
            ("POWDERBOOK_ROUNDING", "ceiling"),
            ("POWDERBOOK_OUTPUT", "xml"),
        ] {
            let err = QuoteConfig::from_lookup(lookup(&[(key, value)])).unwrap_err();
            assert_eq!(err.to_string(), format!("Invalid value for {}", key));
        }
    }
}
