//! # Validation Module
//!
//! Input validation for purchase and recipe records.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Frontend forms                                               │
//! │  ├── Required fields, numeric inputs                                   │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  └── Business rules (positive quantity, sane charge weight)            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Calculator: accepts anything, degrades to 0 / NaN                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Validation is opt-in. `cost::calculate_per_unit` never calls it.
//!
//! ## Usage
//! ```rust
//! use powderbook_core::validation::{validate_quantity, validate_charge_grains};
//!
//! assert!(validate_quantity(500.0).is_ok());
//! assert!(validate_charge_grains(41.5).is_ok());
//! assert!(validate_charge_grains(0.0).is_err());
//! ```

use crate::error::ValidationError;
use crate::recipe::Recipe;
use crate::types::PurchaseLineItem;
use crate::{MAX_CHARGE_GRAINS, MAX_DESCRIPTION_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a purchase description or recipe name.
///
/// ## Rules
/// - Must not be empty
/// - At most 200 characters
pub fn validate_description(field: &str, value: &str) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_DESCRIPTION_LEN,
        });
    }

    Ok(())
}

/// Validates a UUID string.
///
/// ## Example
/// ```rust
/// use powderbook_core::validation::validate_uuid;
///
/// assert!(validate_uuid("550e8400-e29b-41d4-a716-446655440000").is_ok());
/// assert!(validate_uuid("not-a-uuid").is_err());
/// ```
pub fn validate_uuid(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    uuid::Uuid::parse_str(id).map_err(|_| ValidationError::InvalidFormat {
        field: "id".to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a stored amount (price, shipping, tax) in cents.
///
/// Zero is allowed: free shipping, tax-exempt purchases.
pub fn validate_amount_cents(field: &str, cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0.0,
            max: i64::MAX as f64,
        });
    }

    Ok(())
}

/// Validates a purchase quantity (count or weight).
///
/// ## Rules
/// - Must be a finite number
/// - Must be positive (> 0); fractional weights are fine
pub fn validate_quantity(qty: f64) -> ValidationResult<()> {
    if !qty.is_finite() {
        return Err(ValidationError::InvalidFormat {
            field: "qty".to_string(),
            reason: "must be a number".to_string(),
        });
    }

    if qty <= 0.0 {
        return Err(ValidationError::MustBePositive {
            field: "qty".to_string(),
        });
    }

    Ok(())
}

/// Validates a powder charge in grains.
///
/// ## Rules
/// - Must be a finite number
/// - 0 < charge ≤ 200 gr (past anything short of a .50 BMG case)
pub fn validate_charge_grains(grains: f64) -> ValidationResult<()> {
    if !grains.is_finite() || grains <= 0.0 || grains > MAX_CHARGE_GRAINS {
        return Err(ValidationError::OutOfRange {
            field: "powder_charge_grains".to_string(),
            min: 0.0,
            max: MAX_CHARGE_GRAINS,
        });
    }

    Ok(())
}

// =============================================================================
// Record Validators
// =============================================================================

/// Validates a whole purchase record, stopping at the first problem.
pub fn validate_purchase(purchase: &PurchaseLineItem) -> ValidationResult<()> {
    validate_uuid(&purchase.id)?;
    validate_description("description", &purchase.description)?;
    validate_amount_cents("price", purchase.price_cents)?;
    validate_amount_cents("shipping", purchase.shipping_cents.unwrap_or(0))?;
    validate_amount_cents("tax", purchase.tax_cents.unwrap_or(0))?;
    validate_quantity(purchase.qty)?;
    Ok(())
}

/// Validates a recipe record.
pub fn validate_recipe(recipe: &Recipe) -> ValidationResult<()> {
    validate_uuid(&recipe.id)?;
    validate_description("name", &recipe.name)?;
    validate_description("caliber", &recipe.caliber)?;
    validate_charge_grains(recipe.powder_charge_grains)?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
