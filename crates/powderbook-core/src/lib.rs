//! # powderbook-core: Pure Cost Logic for Powderbook
//!
//! Powderbook helps ammunition reloaders track purchases, recipes, inventory
//! and range logs. This crate holds the arithmetic behind those screens as
//! pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Powderbook Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │             Web frontend (IndexedDB, forms, lists)              │   │
//! │  │    Purchases ──► Lots ──► Recipes ──► Range log                 │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ validated numbers                      │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ powderbook-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐  ┌─────────┐  ┌─────────┐  ┌──────────────────┐  │   │
//! │  │   │  cost   │  │ format  │  │ recipe  │  │ types/validation │  │   │
//! │  │   │per unit │  │ $0.142  │  │per round│  │  PurchaseLineItem│  │   │
//! │  │   └─────────┘  └─────────┘  └─────────┘  └──────────────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO NETWORK • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`cost`] - Per-unit landed cost (sentinel and typed views)
//! - [`format`] - Currency display with sub-cent precision
//! - [`recipe`] - Cost per loaded round
//! - [`money`] - Integer-cent money for stored amounts
//! - [`types`] - Purchase records, units, component kinds
//! - [`validation`] - Opt-in record validation
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use powderbook_core::{calculate_per_unit, format_currency};
//!
//! // 1000 primers: $180 + $12 hazmat/tax
//! let each = calculate_per_unit(180.0, None, Some(12.0), 1000.0);
//! assert_eq!(format_currency(each), "$0.192");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cost;
pub mod error;
pub mod format;
pub mod money;
pub mod recipe;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cost::{calculate_per_unit, calculate_per_unit_raw, try_per_unit, PerUnitCost};
pub use error::{CostError, ValidationError};
pub use format::{format_currency, CurrencyFormat, RoundingMode};
pub use money::Money;
pub use recipe::{cost_per_round, ComponentPrices, Recipe, RoundCost};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Grains in one avoirdupois pound.
pub const GRAINS_PER_POUND: f64 = 7000.0;

/// Heaviest powder charge a recipe may specify, in grains.
pub const MAX_CHARGE_GRAINS: f64 = 200.0;

/// Longest description or name accepted on a record.
pub const MAX_DESCRIPTION_LEN: usize = 200;
