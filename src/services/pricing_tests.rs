use super::*;
use proptest::prelude::*;

#[test]
fn line_total_rejects_zero_price() {
    assert_eq!(
        compute_line_total(0.0, 5),
        Err(PricingError::InvalidPrice(0.0))
    );
}

#[test]
fn line_total_rejects_negative_price() {
    assert_eq!(
        compute_line_total(-10.0, 5),
        Err(PricingError::InvalidPrice(-10.0))
    );
}

#[test]
fn line_total_rejects_zero_quantity() {
    assert_eq!(
        compute_line_total(100.0, 0),
        Err(PricingError::InvalidQuantity(0))
    );
}

#[test]
fn line_total_multiplies() {
    assert_eq!(compute_line_total(100.0, 2), Ok(200.0));
    assert_eq!(compute_line_total(19.99, 3), Ok(59.97));
}

#[test]
fn food_total_of_empty_list_is_zero() {
    assert_eq!(compute_food_total(&[]), Ok(0.0));
    assert_eq!(compute_charges_total(&[]), Ok(0.0));
}

#[test]
fn food_total_sums_lines() {
    assert_eq!(compute_food_total(&[(50.0, 2), (25.5, 4)]), Ok(202.0));
}

#[test]
fn food_total_propagates_line_errors() {
    assert_eq!(
        compute_food_total(&[(50.0, 2), (0.0, 1)]),
        Err(PricingError::InvalidPrice(0.0))
    );
}

#[test]
fn discount_amount_is_rounded_fraction() {
    assert_eq!(compute_discount_amount(1000.0, 0.15), Ok(150.0));
    // 333.33 * 0.1 = 33.333 rounds to 33.33
    assert_eq!(compute_discount_amount(333.33, 0.1), Ok(33.33));
    // Half-up at the third decimal
    assert_eq!(compute_discount_amount(1.25, 0.1), Ok(0.13));
}

#[test]
fn discount_rate_bounds() {
    assert_eq!(compute_discount_amount(100.0, 0.0), Ok(0.0));
    assert_eq!(
        compute_discount_amount(100.0, 1.0),
        Err(PricingError::InvalidDiscountRate(1.0))
    );
    assert_eq!(
        compute_discount_amount(100.0, -0.1),
        Err(PricingError::InvalidDiscountRate(-0.1))
    );
}

#[test]
fn grand_total_combines_fields() {
    assert_eq!(compute_grand_total(1000.0, 200.0, 0.0, 150.0), Ok(1050.0));
}

#[test]
fn grand_total_rejects_negative_result() {
    assert!(matches!(
        compute_grand_total(100.0, 0.0, 0.0, 200.0),
        Err(PricingError::NegativeTotal(_))
    ));
}

#[test]
fn price_event_full_breakdown() {
    let priced = price_event(
        1000.0,
        &[(50.0, 2)],   // 100.00 food
        &[(200.0, 1)],  // 200.00 charges
        &[0.15],        // 15% of 1300 gross = 195.00
    )
    .unwrap();

    assert_eq!(priced.totals.packages, 1000.0);
    assert_eq!(priced.totals.food, 100.0);
    assert_eq!(priced.totals.charges, 200.0);
    assert_eq!(priced.totals.discounts, 195.0);
    assert_eq!(priced.totals.all, 1105.0);
    assert_eq!(priced.food_line_costs, vec![100.0]);
    assert_eq!(priced.discount_amounts, vec![195.0]);
}

#[test]
fn price_event_without_extras() {
    let priced = price_event(750.0, &[], &[], &[]).unwrap();
    assert_eq!(priced.totals.food, 0.0);
    assert_eq!(priced.totals.charges, 0.0);
    assert_eq!(priced.totals.discounts, 0.0);
    assert_eq!(priced.totals.all, 750.0);
}

#[test]
fn price_event_rejects_bad_package_price() {
    assert_eq!(
        price_event(0.0, &[], &[], &[]),
        Err(PricingError::InvalidPrice(0.0))
    );
}

#[test]
fn breakdown_reconciles_exactly() {
    let priced = price_event(999.99, &[(3.33, 7), (12.5, 3)], &[(45.0, 2)], &[0.125]).unwrap();
    let t = priced.totals;
    assert_eq!(
        t.all,
        round2(t.packages + t.food + t.charges - t.discounts)
    );
}

proptest! {
    // Grand total is monotone: non-decreasing in each additive component,
    // non-increasing in the discount, for fixed other inputs.
    #[test]
    fn grand_total_monotone(
        package in 1.0f64..10_000.0,
        food in 0.0f64..10_000.0,
        charges in 0.0f64..10_000.0,
        discount in 0.0f64..1_000.0,
        bump in 0.01f64..1_000.0,
    ) {
        prop_assume!(package + food + charges - discount >= 0.0);
        let base = compute_grand_total(package, food, charges, discount).unwrap();
        let more_food = compute_grand_total(package, food + bump, charges, discount).unwrap();
        let more_charges = compute_grand_total(package, food, charges + bump, discount).unwrap();
        let more_package = compute_grand_total(package + bump, food, charges, discount).unwrap();
        prop_assert!(more_food >= base);
        prop_assert!(more_charges >= base);
        prop_assert!(more_package >= base);

        if package + food + charges - discount - bump >= 0.0 {
            let more_discount =
                compute_grand_total(package, food, charges, discount + bump).unwrap();
            prop_assert!(more_discount <= base);
        }
    }
}
