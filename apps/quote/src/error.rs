//! # Quote Error Type
//!
//! Everything that can stop a quote before the core math runs.

use powderbook_core::{CostError, ValidationError};
use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced to the user on stderr.
#[derive(Debug, Error)]
pub enum QuoteError {
    /// Bad `POWDERBOOK_*` environment value.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// No subcommand, or one we don't know.
    #[error("Unknown command '{0}' (expected 'unit', 'round' or 'spent')")]
    UnknownCommand(String),

    /// A flag was given without its value.
    #[error("Missing value for {0}")]
    MissingValue(String),

    /// A required flag was not given.
    #[error("Missing required option {0}")]
    MissingOption(String),

    /// A flag value could not be parsed.
    #[error("Invalid value '{value}' for {flag}")]
    InvalidValue { flag: String, value: String },

    /// A purchases file could not be read.
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A purchases file is not a JSON array of purchase records.
    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Cost(#[from] CostError),

    #[error("Failed to serialize output: {0}")]
    Output(#[from] serde_json::Error),
}

pub type QuoteResult<T> = Result<T, QuoteError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = QuoteError::InvalidValue {
            flag: "--qty".to_string(),
            value: "lots".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid value 'lots' for --qty");

        let err: QuoteError = CostError::NonPositiveQuantity.into();
        assert_eq!(
            err.to_string(),
            "Quantity must be greater than zero to compute a per-unit cost"
        );
    }
}
