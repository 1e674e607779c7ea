//! # Unit Cost Calculator
//!
//! Landed cost per unit for a component purchase.
//!
//! ## Calculation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  price ──┐                                                              │
//! │  ship  ──┼──► total ──► qty > 0 ? ──yes──► total / qty                 │
//! │  tax   ──┘                  │                                          │
//! │                             no ──────────► UNKNOWN_COST (0)            │
//! │                                                                         │
//! │  Missing shipping / tax count as zero.                                  │
//! │  NaN in any amount flows through to a NaN result.                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Two Views of the Same Number
//! - [`calculate_per_unit`] keeps the sentinel contract the list views rely
//!   on: it always returns a number, `0` meaning "cost unknown" and NaN
//!   meaning "garbage in".
//! - [`PerUnitCost`] / [`try_per_unit`] name those outcomes instead, for
//!   callers that need to tell "free" from "unknown".
//!
//! ## Example
//! ```rust
//! use powderbook_core::cost::{calculate_per_unit, PerUnitCost};
//!
//! // 500 bullets for $250 plus $15 shipping
//! assert_eq!(calculate_per_unit(250.0, Some(15.0), None, 500.0), 0.53);
//!
//! // No quantity entered yet
//! assert_eq!(calculate_per_unit(100.0, None, None, 0.0), 0.0);
//! assert_eq!(
//!     PerUnitCost::evaluate(100.0, None, None, 0.0),
//!     PerUnitCost::UnknownQuantity
//! );
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreResult, CostError};
use crate::money::Money;
use crate::types::PurchaseLineItem;

/// Returned when the quantity is zero or negative.
///
/// Means "cost unknown", never "free".
pub const UNKNOWN_COST: f64 = 0.0;

// =============================================================================
// Sentinel Calculator
// =============================================================================

/// Computes the landed cost per unit.
///
/// `total = price + shipping + tax`, divided by `qty` when `qty > 0`,
/// otherwise [`UNKNOWN_COST`]. A NaN quantity is not `> 0` and also yields
/// [`UNKNOWN_COST`].
///
/// Finite inputs can still overflow: a subnormal quantity such as `1e-310`
/// divides `1.0` to infinity. [`PerUnitCost::evaluate`] reports that case as
/// `InvalidInput(CostField::Total)`.
///
/// ## Example
/// ```rust
/// use powderbook_core::cost::calculate_per_unit;
///
/// assert_eq!(calculate_per_unit(180.0, Some(0.0), Some(12.0), 1000.0), 0.192);
/// assert!(calculate_per_unit(f64::NAN, None, None, 10.0).is_nan());
/// assert!(calculate_per_unit(1.0, None, None, 1e-310).is_infinite());
/// ```
pub fn calculate_per_unit(price: f64, shipping: Option<f64>, tax: Option<f64>, qty: f64) -> f64 {
    let total = price + shipping.unwrap_or(0.0) + tax.unwrap_or(0.0);

    if qty > 0.0 {
        total / qty
    } else {
        UNKNOWN_COST
    }
}

/// Interprets a form field as a number.
///
/// Plain decimal notation only (`12`, `-3.5`, `.25`, `1e3`); anything else,
/// including an empty field, is NaN.
///
/// ## Example
/// ```rust
/// use powderbook_core::cost::coerce_number;
///
/// assert_eq!(coerce_number(" 42.5 "), 42.5);
/// assert!(coerce_number("").is_nan());
/// assert!(coerce_number("12 rounds").is_nan());
/// ```
pub fn coerce_number(raw: &str) -> f64 {
    let trimmed = raw.trim();

    let numeric = !trimmed.is_empty()
        && trimmed
            .bytes()
            .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'-' | b'+' | b'e' | b'E'));

    if !numeric {
        return f64::NAN;
    }

    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

/// Optional fee fields: absent or blank means zero, before coercion.
fn coerce_optional(raw: Option<&str>) -> f64 {
    match raw.map(str::trim) {
        None | Some("") => 0.0,
        Some(value) => coerce_number(value),
    }
}

/// [`calculate_per_unit`] over raw form strings.
///
/// ## Example
/// ```rust
/// use powderbook_core::cost::calculate_per_unit_raw;
///
/// assert_eq!(calculate_per_unit_raw("250", Some("15"), None, "500"), 0.53);
/// assert_eq!(calculate_per_unit_raw("250", Some(""), Some(" "), "500"), 0.5);
/// assert!(calculate_per_unit_raw("abc", None, None, "500").is_nan());
/// ```
pub fn calculate_per_unit_raw(
    price: &str,
    shipping: Option<&str>,
    tax: Option<&str>,
    qty: &str,
) -> f64 {
    calculate_per_unit(
        coerce_number(price),
        Some(coerce_optional(shipping)),
        Some(coerce_optional(tax)),
        coerce_number(qty),
    )
}

// =============================================================================
// Typed Result
// =============================================================================

/// Which input made a per-unit cost uncomputable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum CostField {
    Price,
    Shipping,
    Tax,
    Quantity,
    /// The inputs were finite but their quotient overflowed.
    Total,
}

impl CostField {
    pub const fn as_str(&self) -> &'static str {
        match self {
            CostField::Price => "price",
            CostField::Shipping => "shipping",
            CostField::Tax => "tax",
            CostField::Quantity => "qty",
            CostField::Total => "total",
        }
    }
}

/// Outcome of a per-unit cost calculation.
///
/// | Variant           | `calculate_per_unit` shows |
/// |-------------------|----------------------------|
/// | `Known(x)`        | `x`                        |
/// | `UnknownQuantity` | `0`                        |
/// | `InvalidInput`    | NaN                        |
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum PerUnitCost {
    /// A finite per-unit figure.
    Known(f64),
    /// Quantity was zero, negative or NaN.
    UnknownQuantity,
    /// An amount was NaN or infinite.
    InvalidInput(CostField),
}

impl PerUnitCost {
    /// Evaluates the same inputs as [`calculate_per_unit`].
    ///
    /// The quantity guard runs first, as it does in the sentinel calculator,
    /// so a zero quantity with a garbage price is still `UnknownQuantity`.
    pub fn evaluate(price: f64, shipping: Option<f64>, tax: Option<f64>, qty: f64) -> Self {
        if qty.is_nan() || qty <= 0.0 {
            return PerUnitCost::UnknownQuantity;
        }

        let amounts = [
            (CostField::Price, price),
            (CostField::Shipping, shipping.unwrap_or(0.0)),
            (CostField::Tax, tax.unwrap_or(0.0)),
            (CostField::Quantity, qty),
        ];
        if let Some((field, _)) = amounts.iter().find(|(_, value)| !value.is_finite()) {
            return PerUnitCost::InvalidInput(*field);
        }

        let per_unit = calculate_per_unit(price, shipping, tax, qty);
        if per_unit.is_finite() {
            PerUnitCost::Known(per_unit)
        } else {
            PerUnitCost::InvalidInput(CostField::Total)
        }
    }

    /// The display number for this outcome.
    pub fn amount(&self) -> f64 {
        match self {
            PerUnitCost::Known(value) => *value,
            PerUnitCost::UnknownQuantity => UNKNOWN_COST,
            PerUnitCost::InvalidInput(_) => f64::NAN,
        }
    }

    /// The figure, if one could be computed.
    pub fn known(&self) -> Option<f64> {
        match self {
            PerUnitCost::Known(value) => Some(*value),
            _ => None,
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, PerUnitCost::Known(_))
    }

    /// Converts the outcome into the validated error path.
    pub fn into_result(self) -> CoreResult<f64> {
        match self {
            PerUnitCost::Known(value) => Ok(value),
            PerUnitCost::UnknownQuantity | PerUnitCost::InvalidInput(CostField::Quantity) => {
                Err(CostError::NonPositiveQuantity)
            }
            PerUnitCost::InvalidInput(field) => Err(CostError::InvalidAmount {
                field: field.as_str().to_string(),
            }),
        }
    }
}

/// Validated per-unit cost: an error instead of a sentinel.
///
/// ## Example
/// ```rust
/// use powderbook_core::cost::try_per_unit;
/// use powderbook_core::CostError;
///
/// assert_eq!(try_per_unit(250.0, Some(15.0), None, 500.0), Ok(0.53));
/// assert_eq!(
///     try_per_unit(250.0, None, None, 0.0),
///     Err(CostError::NonPositiveQuantity)
/// );
/// ```
pub fn try_per_unit(
    price: f64,
    shipping: Option<f64>,
    tax: Option<f64>,
    qty: f64,
) -> CoreResult<f64> {
    PerUnitCost::evaluate(price, shipping, tax, qty).into_result()
}

// =============================================================================
// Purchase Summaries
// =============================================================================

/// Total landed spend across purchases.
pub fn total_spent(purchases: &[PurchaseLineItem]) -> Money {
    purchases.iter().map(PurchaseLineItem::landed_cost).sum()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ComponentKind, Unit};

    #[test]
    fn test_landed_cost_divided_by_quantity() {
        assert_eq!(calculate_per_unit(250.0, Some(15.0), Some(0.0), 500.0), 0.53);
        assert_eq!(calculate_per_unit(180.0, Some(0.0), Some(12.0), 1000.0), 0.192);
    }

    #[test]
    fn test_non_positive_quantity_is_unknown_cost() {
        assert_eq!(calculate_per_unit(100.0, Some(0.0), Some(0.0), 0.0), 0.0);
        assert_eq!(calculate_per_unit(100.0, None, None, -5.0), 0.0);
        assert_eq!(calculate_per_unit(100.0, None, None, f64::NAN), 0.0);
        assert_eq!(calculate_per_unit(f64::NAN, None, None, 0.0), 0.0);
    }

    #[test]
    fn test_missing_fees_default_to_zero() {
        for (price, qty) in [(0.0, 1.0), (35.0, 1.0), (42.99, 8.0), (1234.5, 0.3)] {
            assert_eq!(
                calculate_per_unit(price, None, None, qty),
                calculate_per_unit(price, Some(0.0), Some(0.0), qty)
            );
        }
    }

    #[test]
    fn test_nan_propagates() {
        assert!(calculate_per_unit(f64::NAN, None, None, 10.0).is_nan());
        assert!(calculate_per_unit(10.0, Some(f64::NAN), None, 10.0).is_nan());
        assert!(calculate_per_unit(10.0, None, Some(f64::NAN), 10.0).is_nan());
    }

    #[test]
    fn test_coerce_number() {
        assert_eq!(coerce_number("12"), 12.0);
        assert_eq!(coerce_number("-3.5"), -3.5);
        assert_eq!(coerce_number(".25"), 0.25);
        assert_eq!(coerce_number("1e3"), 1000.0);
        assert!(coerce_number("").is_nan());
        assert!(coerce_number("inf").is_nan());
        assert!(coerce_number("NaN").is_nan());
        assert!(coerce_number("$12").is_nan());
        assert!(coerce_number("1.2.3").is_nan());
    }

    #[test]
    fn test_raw_calculation() {
        assert_eq!(calculate_per_unit_raw("180", Some("0"), Some("12"), "1000"), 0.192);
        assert_eq!(calculate_per_unit_raw("100", None, None, "0"), 0.0);
        assert_eq!(calculate_per_unit_raw("100", None, None, "lots"), 0.0);
        assert!(calculate_per_unit_raw("100", Some("free"), None, "4").is_nan());
    }

    #[test]
    fn test_typed_outcomes() {
        assert_eq!(
            PerUnitCost::evaluate(250.0, Some(15.0), None, 500.0),
            PerUnitCost::Known(0.53)
        );
        assert_eq!(
            PerUnitCost::evaluate(250.0, None, None, -1.0),
            PerUnitCost::UnknownQuantity
        );
        assert_eq!(
            PerUnitCost::evaluate(250.0, None, Some(f64::NAN), 2.0),
            PerUnitCost::InvalidInput(CostField::Tax)
        );
        assert_eq!(
            PerUnitCost::evaluate(250.0, None, None, f64::INFINITY),
            PerUnitCost::InvalidInput(CostField::Quantity)
        );
        assert_eq!(
            PerUnitCost::evaluate(f64::MAX, Some(f64::MAX), None, 0.5),
            PerUnitCost::InvalidInput(CostField::Total)
        );
    }

    #[test]
    fn test_subnormal_quantity_overflows() {
        assert!(calculate_per_unit(1.0, None, None, 1e-310).is_infinite());
        assert_eq!(
            PerUnitCost::evaluate(1.0, None, None, 1e-310),
            PerUnitCost::InvalidInput(CostField::Total)
        );
    }

    #[test]
    fn test_typed_amount_matches_sentinel() {
        let cases = [
            (250.0, Some(15.0), None, 500.0),
            (100.0, None, None, 0.0),
            (100.0, None, None, -2.0),
            (f64::NAN, None, None, 3.0),
            (f64::NAN, None, None, 0.0),
        ];
        for (price, shipping, tax, qty) in cases {
            let typed = PerUnitCost::evaluate(price, shipping, tax, qty).amount();
            let sentinel = calculate_per_unit(price, shipping, tax, qty);
            assert!(typed == sentinel || (typed.is_nan() && sentinel.is_nan()));
        }
    }

    #[test]
    fn test_try_per_unit_errors() {
        assert_eq!(
            try_per_unit(10.0, Some(f64::NAN), None, 1.0),
            Err(CostError::InvalidAmount {
                field: "shipping".to_string()
            })
        );
        assert_eq!(
            try_per_unit(10.0, None, None, 0.0),
            Err(CostError::NonPositiveQuantity)
        );
    }

    #[test]
    fn test_per_unit_cost_serializes_with_status() {
        let json = serde_json::to_string(&PerUnitCost::Known(0.5)).unwrap();
        assert_eq!(json, r#"{"status":"known","value":0.5}"#);
        let json = serde_json::to_string(&PerUnitCost::UnknownQuantity).unwrap();
        assert_eq!(json, r#"{"status":"unknown_quantity"}"#);
    }

    #[test]
    fn test_total_spent() {
        let purchases = vec![
            PurchaseLineItem::new(
                "Hornady 147gr ELD",
                ComponentKind::Projectile,
                Money::from_cents(25000),
                500.0,
                Unit::Each,
            )
            .with_shipping(Money::from_cents(1500)),
            PurchaseLineItem::new(
                "Varget",
                ComponentKind::Powder,
                Money::from_cents(18000),
                8.0,
                Unit::Pound,
            )
            .with_tax(Money::from_cents(1200)),
        ];
        assert_eq!(total_spent(&purchases).cents(), 45700);
        assert!(total_spent(&[]).is_zero());
    }
}
