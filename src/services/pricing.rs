//! Pricing engine: pure computation of itemized and total event cost.
//!
//! All functions are deterministic and side-effect free; catalog prices
//! are passed in by the caller as snapshots. Monetary sub-totals and the
//! grand total are rounded to 2 decimal places using round-half-up,
//! applied once per computed field so rounding never compounds.
//!
//! Zero or negative prices and quantities are rejected as a business
//! rule: a line that costs nothing is a data-entry mistake, not a free
//! item.

use crate::models::TotalPrices;

/// Result type for pricing computations.
pub type PricingResult<T> = Result<T, PricingError>;

/// Error type for pricing computations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PricingError {
    #[error("Quantity must be positive (got {0})")]
    InvalidQuantity(u32),

    #[error("Price must be positive (got {0})")]
    InvalidPrice(f64),

    #[error("Discount rate must be a fraction in [0, 1) (got {0})")]
    InvalidDiscountRate(f64),

    #[error("Discount exceeds gross subtotal (total {0})")]
    NegativeTotal(f64),
}

/// Round a monetary value to 2 decimal places, half-up.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Cost of a single line: unit price times quantity.
pub fn compute_line_total(unit_price: f64, quantity: u32) -> PricingResult<f64> {
    if quantity == 0 {
        return Err(PricingError::InvalidQuantity(quantity));
    }
    if unit_price <= 0.0 {
        return Err(PricingError::InvalidPrice(unit_price));
    }
    Ok(round2(unit_price * quantity as f64))
}

/// Total cost of additional food lines. An empty list yields 0.
pub fn compute_food_total(items: &[(f64, u32)]) -> PricingResult<f64> {
    let mut total = 0.0;
    for &(price, quantity) in items {
        total += compute_line_total(price, quantity)?;
    }
    Ok(round2(total))
}

/// Total cost of extra charge lines. An empty list yields 0.
pub fn compute_charges_total(charges: &[(f64, u32)]) -> PricingResult<f64> {
    let mut total = 0.0;
    for &(price, quantity) in charges {
        total += compute_line_total(price, quantity)?;
    }
    Ok(round2(total))
}

/// Amount deducted by a discount applied to the gross subtotal.
pub fn compute_discount_amount(gross_subtotal: f64, discount_rate: f64) -> PricingResult<f64> {
    if !(0.0..1.0).contains(&discount_rate) {
        return Err(PricingError::InvalidDiscountRate(discount_rate));
    }
    Ok(round2(gross_subtotal * discount_rate))
}

/// Grand total: package + food + charges − discounts.
///
/// Fails with [`PricingError::NegativeTotal`] if the discounts exceed
/// the gross subtotal.
pub fn compute_grand_total(
    package_price: f64,
    food_total: f64,
    charges_total: f64,
    discount_amount: f64,
) -> PricingResult<f64> {
    let total = round2(package_price + food_total + charges_total - discount_amount);
    if total < 0.0 {
        return Err(PricingError::NegativeTotal(total));
    }
    Ok(total)
}

/// Priced selections: the stored breakdown plus the per-line amounts the
/// lifecycle copies onto the event.
#[derive(Debug, Clone, PartialEq)]
pub struct PricedSelections {
    pub totals: TotalPrices,
    /// Cost of each food line, in input order.
    pub food_line_costs: Vec<f64>,
    /// Amount of each discount, in input order.
    pub discount_amounts: Vec<f64>,
}

/// Price a full event selection in one pass.
///
/// `food` and `charges` are (unit price, quantity) pairs; `discount_rates`
/// are fractions applied to the gross subtotal (package + food + charges).
pub fn price_event(
    package_price: f64,
    food: &[(f64, u32)],
    charges: &[(f64, u32)],
    discount_rates: &[f64],
) -> PricingResult<PricedSelections> {
    // The package is a line with quantity 1; this rejects non-positive
    // package prices with the same error shape as any other line.
    let package_total = compute_line_total(package_price, 1)?;

    let mut food_line_costs = Vec::with_capacity(food.len());
    for &(price, quantity) in food {
        food_line_costs.push(compute_line_total(price, quantity)?);
    }
    let food_total = compute_food_total(food)?;
    let charges_total = compute_charges_total(charges)?;

    let gross = package_total + food_total + charges_total;
    let mut discount_amounts = Vec::with_capacity(discount_rates.len());
    for &rate in discount_rates {
        discount_amounts.push(compute_discount_amount(gross, rate)?);
    }
    let discounts_total = round2(discount_amounts.iter().sum());

    let all = compute_grand_total(package_total, food_total, charges_total, discounts_total)?;

    Ok(PricedSelections {
        totals: TotalPrices {
            packages: package_total,
            food: food_total,
            charges: charges_total,
            discounts: discounts_total,
            all,
        },
        food_line_costs,
        discount_amounts,
    })
}

#[cfg(test)]
#[path = "pricing_tests.rs"]
mod tests;
