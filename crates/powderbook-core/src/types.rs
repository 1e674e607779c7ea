//! # Domain Types
//!
//! Core domain types shared with the Powderbook frontend.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌──────────────────────┐   ┌─────────────────┐   ┌─────────────────┐  │
//! │  │  PurchaseLineItem    │   │      Unit       │   │  ComponentKind  │  │
//! │  │  ──────────────────  │   │  ─────────────  │   │  ─────────────  │  │
//! │  │  id (UUID)           │   │  Each  ("ea")   │   │  Powder         │  │
//! │  │  description         │   │  Pound ("lb")   │   │  Primer         │  │
//! │  │  price/ship/tax (¢)  │   └─────────────────┘   │  Projectile     │  │
//! │  │  qty + unit          │                         │  Case           │  │
//! │  │  purchased_on        │                         │  Other          │  │
//! │  └──────────────────────┘                         └─────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Records are created and stored by the frontend (IndexedDB); the core only
//! defines their shape and the math on top of them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;
use uuid::Uuid;

use crate::cost::{calculate_per_unit, PerUnitCost};
use crate::error::ValidationError;
use crate::money::Money;
use crate::GRAINS_PER_POUND;

// =============================================================================
// Unit
// =============================================================================

/// The quantity dimension of a purchase.
///
/// The calculator is unit-agnostic; this only labels what "per unit" means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Unit {
    /// Discrete items: primers, bullets, brass.
    #[serde(rename = "ea")]
    Each,
    /// Weight-based purchases: powder.
    #[serde(rename = "lb")]
    Pound,
}

impl Unit {
    /// Short label used in the UI and in serialized records.
    pub const fn label(&self) -> &'static str {
        match self {
            Unit::Each => "ea",
            Unit::Pound => "lb",
        }
    }

    /// How many grains one unit holds, for weight units.
    pub fn grains(&self) -> Option<f64> {
        match self {
            Unit::Each => None,
            Unit::Pound => Some(GRAINS_PER_POUND),
        }
    }
}

impl Default for Unit {
    fn default() -> Self {
        Unit::Each
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Unit {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ea" | "each" => Ok(Unit::Each),
            "lb" | "lbs" | "pound" | "pounds" => Ok(Unit::Pound),
            _ => Err(ValidationError::NotAllowed {
                field: "unit".to_string(),
                allowed: vec!["ea".to_string(), "lb".to_string()],
            }),
        }
    }
}

// =============================================================================
// Component Kind
// =============================================================================

/// What a purchase contributes to a loaded round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ComponentKind {
    Powder,
    Primer,
    Projectile,
    Case,
    /// Dies, tumbling media, anything not consumed per round.
    Other,
}

impl Default for ComponentKind {
    fn default() -> Self {
        ComponentKind::Other
    }
}

// =============================================================================
// Purchase Line Item
// =============================================================================

/// A recorded component purchase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PurchaseLineItem {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// What was bought, e.g. "CCI 400 Small Rifle Primers".
    pub description: String,

    /// Which recipe component this purchase supplies.
    #[serde(default)]
    pub component: ComponentKind,

    /// Sticker price in cents.
    pub price_cents: i64,

    /// Shipping in cents; absent means zero.
    #[serde(default)]
    pub shipping_cents: Option<i64>,

    /// Sales tax / hazmat fees in cents; absent means zero.
    #[serde(default)]
    pub tax_cents: Option<i64>,

    /// Units purchased: a count for `ea`, a weight for `lb`.
    pub qty: f64,

    /// Quantity dimension.
    #[serde(default)]
    pub unit: Unit,

    /// When the purchase was made.
    #[serde(default)]
    #[ts(as = "Option<String>")]
    pub purchased_on: Option<NaiveDate>,
}

impl PurchaseLineItem {
    /// Creates a purchase with a fresh id and no shipping, tax or date.
    pub fn new(
        description: impl Into<String>,
        component: ComponentKind,
        price: Money,
        qty: f64,
        unit: Unit,
    ) -> Self {
        PurchaseLineItem {
            id: Uuid::new_v4().to_string(),
            description: description.into(),
            component,
            price_cents: price.cents(),
            shipping_cents: None,
            tax_cents: None,
            qty,
            unit,
            purchased_on: None,
        }
    }

    /// Sets shipping.
    pub fn with_shipping(mut self, shipping: Money) -> Self {
        self.shipping_cents = Some(shipping.cents());
        self
    }

    /// Sets tax.
    pub fn with_tax(mut self, tax: Money) -> Self {
        self.tax_cents = Some(tax.cents());
        self
    }

    /// Sets the purchase date.
    pub fn bought_on(mut self, date: NaiveDate) -> Self {
        self.purchased_on = Some(date);
        self
    }

    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    #[inline]
    pub fn shipping(&self) -> Money {
        Money::from_cents(self.shipping_cents.unwrap_or(0))
    }

    #[inline]
    pub fn tax(&self) -> Money {
        Money::from_cents(self.tax_cents.unwrap_or(0))
    }

    /// Price + shipping + tax.
    pub fn landed_cost(&self) -> Money {
        self.price() + self.shipping() + self.tax()
    }

    /// Typed per-unit cost for this purchase.
    pub fn per_unit_cost(&self) -> PerUnitCost {
        PerUnitCost::evaluate(
            self.price().to_major(),
            self.shipping_cents.map(|c| Money::from_cents(c).to_major()),
            self.tax_cents.map(|c| Money::from_cents(c).to_major()),
            self.qty,
        )
    }

    /// Per-unit cost with the display sentinels (`0` for unknown quantity).
    pub fn per_unit_amount(&self) -> f64 {
        calculate_per_unit(
            self.price().to_major(),
            self.shipping_cents.map(|c| Money::from_cents(c).to_major()),
            self.tax_cents.map(|c| Money::from_cents(c).to_major()),
            self.qty,
        )
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn primers() -> PurchaseLineItem {
        PurchaseLineItem::new(
            "CCI 400 Small Rifle",
            ComponentKind::Primer,
            Money::from_cents(9000),
            1000.0,
            Unit::Each,
        )
        .with_shipping(Money::from_cents(3000))
        .with_tax(Money::from_cents(720))
    }

    #[test]
    fn test_unit_parse() {
        assert_eq!("ea".parse::<Unit>().unwrap(), Unit::Each);
        assert_eq!(" LBS ".parse::<Unit>().unwrap(), Unit::Pound);
        assert!(matches!(
            "kg".parse::<Unit>(),
            Err(ValidationError::NotAllowed { .. })
        ));
    }

    #[test]
    fn test_unit_serializes_as_label() {
        assert_eq!(serde_json::to_string(&Unit::Pound).unwrap(), "\"lb\"");
        let unit: Unit = serde_json::from_str("\"ea\"").unwrap();
        assert_eq!(unit, Unit::Each);
        assert_eq!(Unit::Pound.grains(), Some(7000.0));
        assert_eq!(Unit::Each.grains(), None);
    }

    #[test]
    fn test_landed_cost() {
        let purchase = primers();
        assert_eq!(purchase.landed_cost().cents(), 12720);
        assert!((purchase.per_unit_amount() - 0.1272).abs() < 1e-12);
        assert!(matches!(purchase.per_unit_cost(), PerUnitCost::Known(_)));
    }

    #[test]
    fn test_zero_quantity_is_unknown() {
        let mut purchase = primers();
        purchase.qty = 0.0;
        assert_eq!(purchase.per_unit_amount(), 0.0);
        assert_eq!(purchase.per_unit_cost(), PerUnitCost::UnknownQuantity);
    }

    #[test]
    fn test_deserialize_frontend_record() {
        let json = r#"{
            "id": "550e8400-e29b-41d4-a716-446655440000",
            "description": "Varget 1 lb",
            "component": "powder",
            "price_cents": 4299,
            "qty": 1,
            "unit": "lb",
            "purchased_on": "2024-03-02"
        }"#;
        let purchase: PurchaseLineItem = serde_json::from_str(json).unwrap();
        assert_eq!(purchase.component, ComponentKind::Powder);
        assert_eq!(purchase.shipping().cents(), 0);
        assert_eq!(purchase.unit, Unit::Pound);
        assert_eq!(
            purchase.purchased_on,
            NaiveDate::from_ymd_opt(2024, 3, 2)
        );
    }
}
