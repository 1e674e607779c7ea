//! # Currency Formatting
//!
//! Display strings for per-unit figures.
//!
//! Reloading costs live below the cent (a primer is ~$0.09, a grain of powder
//! ~$0.005), so the default shows three decimals: `$0.142`, `$2.000`.
//!
//! ## Rounding
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  f64 ──► exact binary value (rust_decimal) ──► round to N places ──►   │
//! │                                                 │                       │
//! │            HalfUp    0.0625 → 0.063   (default, like toFixed)           │
//! │            HalfEven  0.0625 → 0.062                                     │
//! │            Truncate  0.1419 → 0.141                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//! Rounding the exact binary value (rather than the shortest decimal that
//! prints back to the same float) is what makes `HalfUp` agree with the
//! browser's `Number.prototype.toFixed`.

use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::cost::coerce_number;
use crate::error::ValidationError;

/// Decimal places shown by default.
pub const DEFAULT_DECIMALS: u32 = 3;

/// Largest number of decimal places a format may request.
pub const MAX_DECIMALS: u32 = 8;

// =============================================================================
// Rounding Mode
// =============================================================================

/// How a figure is brought to the displayed number of decimals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum RoundingMode {
    /// Ties away from zero.
    HalfUp,
    /// Ties to the even digit (banker's rounding).
    HalfEven,
    /// Drop extra digits (toward zero).
    Truncate,
}

impl RoundingMode {
    fn strategy(self) -> RoundingStrategy {
        match self {
            RoundingMode::HalfUp => RoundingStrategy::MidpointAwayFromZero,
            RoundingMode::HalfEven => RoundingStrategy::MidpointNearestEven,
            RoundingMode::Truncate => RoundingStrategy::ToZero,
        }
    }
}

impl Default for RoundingMode {
    fn default() -> Self {
        RoundingMode::HalfUp
    }
}

impl FromStr for RoundingMode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "half_up" => Ok(RoundingMode::HalfUp),
            "half_even" | "bankers" => Ok(RoundingMode::HalfEven),
            "truncate" => Ok(RoundingMode::Truncate),
            _ => Err(ValidationError::NotAllowed {
                field: "rounding".to_string(),
                allowed: vec![
                    "half_up".to_string(),
                    "half_even".to_string(),
                    "truncate".to_string(),
                ],
            }),
        }
    }
}

impl fmt::Display for RoundingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RoundingMode::HalfUp => "half_up",
            RoundingMode::HalfEven => "half_even",
            RoundingMode::Truncate => "truncate",
        })
    }
}

// =============================================================================
// Currency Format
// =============================================================================

/// Currency display settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CurrencyFormat {
    /// Prefix, e.g. `$`.
    pub symbol: String,
    /// Digits after the decimal point (at most [`MAX_DECIMALS`]).
    pub decimals: u32,
    pub rounding: RoundingMode,
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        CurrencyFormat {
            symbol: "$".to_string(),
            decimals: DEFAULT_DECIMALS,
            rounding: RoundingMode::HalfUp,
        }
    }
}

impl CurrencyFormat {
    /// Creates a format, clamping `decimals` to [`MAX_DECIMALS`].
    pub fn new(symbol: impl Into<String>, decimals: u32, rounding: RoundingMode) -> Self {
        CurrencyFormat {
            symbol: symbol.into(),
            decimals: decimals.min(MAX_DECIMALS),
            rounding,
        }
    }

    /// Formats an amount. Never panics.
    ///
    /// ## Example
    /// ```rust
    /// use powderbook_core::format::{CurrencyFormat, RoundingMode};
    ///
    /// let cents = CurrencyFormat::new("$", 2, RoundingMode::HalfEven);
    /// assert_eq!(cents.format(10.125), "$10.12");
    ///
    /// let euro = CurrencyFormat::new("€", 3, RoundingMode::Truncate);
    /// assert_eq!(euro.format(0.1419), "€0.141");
    /// ```
    pub fn format(&self, amount: f64) -> String {
        format!("{}{}", self.symbol, self.format_number(amount))
    }

    fn format_number(&self, amount: f64) -> String {
        let places = self.decimals.min(MAX_DECIMALS);

        if amount.is_nan() {
            return "NaN".to_string();
        }
        if amount.is_infinite() {
            return if amount > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
        }

        let exact = if amount.abs() < decimal_limit(places) {
            Decimal::from_f64_retain(amount)
        } else {
            None
        };

        match exact {
            Some(exact) => {
                let rounded = exact.round_dp_with_strategy(places, self.rounding.strategy());
                if rounded.is_zero() {
                    // -0.0 and negatives that round away still print a plain zero
                    return unsigned_zero(places);
                }
                format!("{:.*}", places as usize, rounded)
            }
            // Past 2^53 an f64 has no fractional digits left to round
            None => {
                let whole = amount.trunc();
                if whole == 0.0 {
                    return unsigned_zero(places);
                }
                format!("{:.*}", places as usize, whole)
            }
        }
    }

    /// Formats a raw form value, coercing it first.
    pub fn format_raw(&self, raw: &str) -> String {
        self.format(coerce_number(raw))
    }
}

/// Magnitude below which `places` decimals plus the whole part fit in the
/// 28 significant digits `Decimal` can print.
fn decimal_limit(places: u32) -> f64 {
    10f64.powi(28 - places as i32)
}

fn unsigned_zero(places: u32) -> String {
    format!("{:.*}", places as usize, 0.0_f64)
}

// =============================================================================
// Convenience Functions
// =============================================================================

/// Formats a per-unit figure as `$` plus three decimals.
///
/// ## Example
/// ```rust
/// use powderbook_core::format::format_currency;
///
/// assert_eq!(format_currency(0.1416), "$0.142");
/// assert_eq!(format_currency(2.0), "$2.000");
/// assert_eq!(format_currency(f64::NAN), "$NaN");
/// ```
pub fn format_currency(amount: f64) -> String {
    CurrencyFormat::default().format(amount)
}

/// [`format_currency`] over a raw form value; malformed input shows `$NaN`.
pub fn format_currency_raw(raw: &str) -> String {
    CurrencyFormat::default().format_raw(raw)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_decimals() {
        assert_eq!(format_currency(0.1416), "$0.142");
        assert_eq!(format_currency(2.0), "$2.000");
        assert_eq!(format_currency(0.53), "$0.530");
        assert_eq!(format_currency(0.192), "$0.192");
        assert_eq!(format_currency(1234.5), "$1234.500");
    }

    #[test]
    fn test_zero_and_negative() {
        assert_eq!(format_currency(0.0), "$0.000");
        assert_eq!(format_currency(-0.0), "$0.000");
        assert_eq!(format_currency(-1.25), "$-1.250");
    }

    #[test]
    fn test_non_finite() {
        assert_eq!(format_currency(f64::NAN), "$NaN");
        assert_eq!(format_currency(f64::INFINITY), "$Infinity");
        assert_eq!(format_currency(f64::NEG_INFINITY), "$-Infinity");
        assert_eq!(format_currency_raw("abc"), "$NaN");
        assert_eq!(format_currency_raw(" 0.5 "), "$0.500");
    }

    #[test]
    fn test_rounding_modes_on_exact_tie() {
        // 0.0625 is exactly representable, so this is a true tie
        let up = CurrencyFormat::new("$", 3, RoundingMode::HalfUp);
        let even = CurrencyFormat::new("$", 3, RoundingMode::HalfEven);
        let trunc = CurrencyFormat::new("$", 3, RoundingMode::Truncate);

        assert_eq!(up.format(0.0625), "$0.063");
        assert_eq!(even.format(0.0625), "$0.062");
        assert_eq!(trunc.format(0.0625), "$0.062");
        assert_eq!(up.format(-0.0625), "$-0.063");
    }

    #[test]
    fn test_binary_value_decides_near_ties() {
        // 1.0005 is stored slightly below the tie
        assert_eq!(format_currency(1.0005), "$1.000");
    }

    #[test]
    fn test_huge_values_fall_back() {
        let formatted = format_currency(1e30);
        assert!(formatted.starts_with('$'));
        assert!(formatted.ends_with(".000"));
        assert_eq!(format_currency(5e28), format!("${:.3}", 5e28_f64));
    }

    #[test]
    fn test_every_power_of_ten_formats() {
        for decimals in [3, MAX_DECIMALS] {
            let format = CurrencyFormat::new("$", decimals, RoundingMode::HalfUp);
            for k in 0..=308 {
                for amount in [10f64.powi(k), -(10f64.powi(k))] {
                    let formatted = format.format(amount);
                    let (_, fraction) = formatted.split_once('.').unwrap();
                    assert_eq!(fraction.len(), decimals as usize, "{formatted}");
                }
            }
        }
        // Near Decimal's upper bound, where its Display buffer runs out
        assert!(format_currency(7.9e28).starts_with("$79"));
        let eight = CurrencyFormat::new("$", 8, RoundingMode::HalfUp);
        assert!(eight.format(1e24).ends_with(".00000000"));
    }

    #[test]
    fn test_negative_that_rounds_to_zero() {
        assert_eq!(format_currency(-0.0001), "$0.000");
        assert_eq!(format_currency(-1e-30), "$0.000");
        assert_eq!(format_currency(-5e-324), "$0.000");
        assert_eq!(format_currency(-0.0006), "$-0.001");
    }

    #[test]
    fn test_decimals_are_clamped() {
        let format = CurrencyFormat::new("$", 40, RoundingMode::HalfUp);
        assert_eq!(format.decimals, MAX_DECIMALS);
        assert_eq!(format.format(1.0), "$1.00000000");
    }

    #[test]
    fn test_rounding_mode_parse() {
        assert_eq!("half-up".parse::<RoundingMode>().unwrap(), RoundingMode::HalfUp);
        assert_eq!("Bankers".parse::<RoundingMode>().unwrap(), RoundingMode::HalfEven);
        assert_eq!("truncate".parse::<RoundingMode>().unwrap(), RoundingMode::Truncate);
        assert!("ceiling".parse::<RoundingMode>().is_err());
        assert_eq!(RoundingMode::HalfEven.to_string(), "half_even");
    }
}
