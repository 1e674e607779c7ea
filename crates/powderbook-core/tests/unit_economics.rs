//! Behaviour of the public calculator and formatter as the frontend sees it.

use powderbook_core::cost::{calculate_per_unit, calculate_per_unit_raw};
use powderbook_core::format::format_currency;
use powderbook_core::recipe::{cost_per_round, ComponentPrices, Recipe};
use powderbook_core::{ComponentKind, Money, PurchaseLineItem, Unit};
use proptest::prelude::*;

fn has_three_decimals(formatted: &str) -> bool {
    match formatted.strip_prefix('$').and_then(|rest| rest.split_once('.')) {
        Some((whole, fraction)) => {
            !whole.is_empty()
                && whole.bytes().all(|b| b.is_ascii_digit())
                && fraction.len() == 3
                && fraction.bytes().all(|b| b.is_ascii_digit())
        }
        None => false,
    }
}

#[test]
fn test_reference_scenarios() {
    assert_eq!(calculate_per_unit(250.0, Some(15.0), Some(0.0), 500.0), 0.53);
    assert_eq!(calculate_per_unit(180.0, Some(0.0), Some(12.0), 1000.0), 0.192);
    assert_eq!(calculate_per_unit(100.0, Some(0.0), Some(0.0), 0.0), 0.0);
    assert_eq!(format_currency(0.1416), "$0.142");
    assert_eq!(format_currency(2.0), "$2.000");
}

/// Any finite value, including subnormals, zeros and both signs.
fn finite_amount() -> impl Strategy<Value = f64> {
    prop::num::f64::NORMAL | prop::num::f64::SUBNORMAL | prop::num::f64::ZERO
}

proptest! {
    #[test]
    fn test_per_unit_equals_total_over_quantity(
        price in 0.0..1.0e7_f64,
        shipping in 0.0..1.0e4_f64,
        tax in 0.0..1.0e4_f64,
        qty in 1.0e-3..1.0e7_f64,
    ) {
        let actual = calculate_per_unit(price, Some(shipping), Some(tax), qty);
        prop_assert_eq!(actual, (price + shipping + tax) / qty);
        prop_assert!(actual.is_finite() && actual >= 0.0);
    }

    #[test]
    fn test_non_positive_quantity_always_zero(
        price in finite_amount(),
        shipping in finite_amount(),
        tax in finite_amount(),
        qty in prop_oneof![Just(0.0), Just(-0.0), -1.0e12..0.0_f64, Just(f64::NEG_INFINITY)],
    ) {
        prop_assert_eq!(calculate_per_unit(price, Some(shipping), Some(tax), qty), 0.0);
    }

    #[test]
    fn test_omitted_fees_match_explicit_zero(
        price in -1.0e6..1.0e6_f64,
        qty in -10.0..1.0e6_f64,
    ) {
        let explicit = calculate_per_unit(price, Some(0.0), Some(0.0), qty);
        prop_assert_eq!(calculate_per_unit(price, None, None, qty), explicit);
        prop_assert_eq!(
            calculate_per_unit_raw(&price.to_string(), None, None, &qty.to_string()),
            explicit
        );
    }

    #[test]
    fn test_format_shape_and_purity(amount in finite_amount()) {
        let first = format_currency(amount);
        prop_assert!(has_three_decimals(&first.replacen("$-", "$", 1)), "{}", first);
        prop_assert_eq!(&first, &format_currency(amount));
    }

    #[test]
    fn test_tiny_negatives_print_plain_zero(amount in -4.9e-4..=0.0_f64) {
        prop_assert_eq!(format_currency(amount), "$0.000");
    }
}

#[test]
fn test_unknown_cost_renders_as_zero() {
    let mut purchase = PurchaseLineItem::new(
        "Lapua .308 brass",
        ComponentKind::Case,
        Money::from_cents(12000),
        0.0,
        Unit::Each,
    );
    assert_eq!(format_currency(purchase.per_unit_amount()), "$0.000");

    purchase.qty = 100.0;
    assert_eq!(format_currency(purchase.per_unit_amount()), "$1.200");
}

#[test]
fn test_malformed_input_renders_nan() {
    let per_unit = calculate_per_unit_raw("n/a", Some("5"), None, "100");
    assert_eq!(format_currency(per_unit), "$NaN");
}

#[test]
fn test_round_cost_from_purchases() {
    let purchase = |name: &str, kind, cents, qty, unit| {
        PurchaseLineItem::new(name, kind, Money::from_cents(cents), qty, unit)
    };
    let purchases = vec![
        purchase("H4350 1 lb", ComponentKind::Powder, 3500, 1.0, Unit::Pound),
        purchase("CCI BR-2", ComponentKind::Primer, 9000, 1000.0, Unit::Each),
        purchase("Berger 140gr", ComponentKind::Projectile, 6000, 100.0, Unit::Each),
        purchase("Starline brass", ComponentKind::Case, 5000, 100.0, Unit::Each),
    ];
    let prices = ComponentPrices::from_purchases(&purchases);
    let recipe = Recipe::new("Match", "6.5 Creedmoor", 24.0).with_case_reloads(5);

    let cost = cost_per_round(&recipe, &prices);
    assert!(cost.is_complete());
    // 0.12 powder + 0.09 primer + 0.60 projectile + 0.10 case
    assert_eq!(format_currency(cost.total), "$0.910");
    assert_eq!(format_currency(cost.for_rounds(50)), "$45.500");
}
