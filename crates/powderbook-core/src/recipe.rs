//! # Recipe Costing
//!
//! Cost per loaded round, built from per-unit component costs.
//!
//! ## Cost Breakdown
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Recipe: 6.5 Creedmoor, 41.5 gr H4350, 5 firings per case               │
//! │                                                                         │
//! │  powder      $/lb ÷ 7000 × 41.5 gr ──┐                                 │
//! │  primer      $/ea                  ──┤                                 │
//! │  projectile  $/ea                  ──┼──► cost per round               │
//! │  case        $/ea ÷ 5 firings      ──┘                                 │
//! │                                                                         │
//! │  Component prices come from the latest dated purchase of each kind.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//! ```rust
//! use powderbook_core::recipe::{cost_per_round, ComponentPrices, Recipe};
//!
//! let recipe = Recipe::new("Match load", "6.5 Creedmoor", 41.5).with_case_reloads(5);
//! let prices = ComponentPrices {
//!     powder_per_lb: Some(35.0),
//!     primer_each: Some(0.09),
//!     projectile_each: Some(0.60),
//!     case_each: Some(1.00),
//! };
//!
//! let cost = cost_per_round(&recipe, &prices);
//! assert!(cost.missing.is_empty());
//! assert!((cost.total - (0.2075 + 0.09 + 0.60 + 0.20)).abs() < 1e-9);
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::types::{ComponentKind, PurchaseLineItem, Unit};
use crate::GRAINS_PER_POUND;

// =============================================================================
// Recipe
// =============================================================================

/// A load recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Recipe {
    /// Unique identifier (UUID v4).
    pub id: String,
    pub name: String,
    pub caliber: String,
    /// Powder charge weight in grains.
    pub powder_charge_grains: f64,
    /// Firings each case is expected to survive; 0 leaves brass uncosted.
    #[serde(default)]
    pub case_reloads: u32,
}

impl Recipe {
    /// Creates a recipe with a fresh id and uncosted brass.
    pub fn new(name: impl Into<String>, caliber: impl Into<String>, charge_grains: f64) -> Self {
        Recipe {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            caliber: caliber.into(),
            powder_charge_grains: charge_grains,
            case_reloads: 0,
        }
    }

    pub fn with_case_reloads(mut self, reloads: u32) -> Self {
        self.case_reloads = reloads;
        self
    }
}

// =============================================================================
// Component Prices
// =============================================================================

/// Per-unit prices for each consumable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ComponentPrices {
    pub powder_per_lb: Option<f64>,
    pub primer_each: Option<f64>,
    pub projectile_each: Option<f64>,
    pub case_each: Option<f64>,
}

impl ComponentPrices {
    /// Picks the latest usable purchase of each component kind.
    ///
    /// Later `purchased_on` wins; undated purchases lose to dated ones and,
    /// among themselves, the later entry in the slice wins. Purchases without
    /// a known per-unit cost are skipped. Powder counted by the `ea` is taken
    /// to be one-pound containers.
    pub fn from_purchases(purchases: &[PurchaseLineItem]) -> Self {
        let mut prices = ComponentPrices::default();
        let mut dates: [Option<Option<NaiveDate>>; 4] = [None; 4];

        for purchase in purchases {
            let Some(per_unit) = purchase.per_unit_cost().known() else {
                continue;
            };

            let slot = match purchase.component {
                ComponentKind::Powder => 0,
                ComponentKind::Primer => 1,
                ComponentKind::Projectile => 2,
                ComponentKind::Case => 3,
                ComponentKind::Other => continue,
            };

            // Option<NaiveDate> orders None before any date
            let newer = match dates[slot] {
                None => true,
                Some(seen) => purchase.purchased_on >= seen,
            };
            if !newer {
                continue;
            }
            dates[slot] = Some(purchase.purchased_on);

            let price = Some(per_unit);
            match slot {
                0 => prices.powder_per_lb = price,
                1 => prices.primer_each = price,
                2 => prices.projectile_each = price,
                _ => prices.case_each = price,
            }
        }

        prices
    }
}

// =============================================================================
// Round Cost
// =============================================================================

/// Cost of one loaded round, per component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RoundCost {
    pub powder: f64,
    pub primer: f64,
    pub projectile: f64,
    pub case: f64,
    pub total: f64,
    /// Components without a price; they contribute zero to `total`.
    pub missing: Vec<ComponentKind>,
}

impl RoundCost {
    /// Cost of loading or shooting `rounds` rounds.
    pub fn for_rounds(&self, rounds: u32) -> f64 {
        self.total * f64::from(rounds)
    }

    /// True when every component had a price.
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Powder cost of one charge, from a per-pound price.
pub fn powder_cost(per_lb: f64, charge_grains: f64) -> f64 {
    let per_grain = per_lb / Unit::Pound.grains().unwrap_or(GRAINS_PER_POUND);
    per_grain * charge_grains
}

/// Computes the cost of one round of `recipe`.
pub fn cost_per_round(recipe: &Recipe, prices: &ComponentPrices) -> RoundCost {
    let mut missing = Vec::new();
    let mut take = |price: Option<f64>, kind: ComponentKind| match price {
        Some(value) => value,
        None => {
            missing.push(kind);
            0.0
        }
    };

    let powder_per_lb = take(prices.powder_per_lb, ComponentKind::Powder);
    let primer = take(prices.primer_each, ComponentKind::Primer);
    let projectile = take(prices.projectile_each, ComponentKind::Projectile);

    let case = if recipe.case_reloads == 0 {
        0.0
    } else {
        take(prices.case_each, ComponentKind::Case) / f64::from(recipe.case_reloads)
    };

    let powder = powder_cost(powder_per_lb, recipe.powder_charge_grains);

    RoundCost {
        powder,
        primer,
        projectile,
        case,
        total: powder + primer + projectile + case,
        missing,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
