//! Discount arithmetic.
//!
//! Every page that puts a product or an offer into the cart resolves the
//! discounted unit price first; the cart itself never computes discounts.
//! Keep that arithmetic here so all pages agree on it.

/// Apply a percentage discount to a unit price.
///
/// `discount_percent` is clamped to `0..=100`. `None` or a non-finite
/// percentage leaves the price unchanged. No rounding is applied; format for
/// display with [`format_price`].
///
/// ```
/// use glowvita_core::pricing::apply_discount;
///
/// assert_eq!(apply_discount(200.0, Some(25.0)), 150.0);
/// assert_eq!(apply_discount(200.0, None), 200.0);
/// assert_eq!(apply_discount(200.0, Some(150.0)), 0.0);
/// ```
#[must_use]
pub fn apply_discount(price: f64, discount_percent: Option<f64>) -> f64 {
    match discount_percent {
        Some(pct) if pct.is_finite() => {
            let pct = pct.clamp(0.0, 100.0);
            price - price * pct / 100.0
        }
        _ => price,
    }
}

/// Returns `true` when a discount percentage actually lowers the price.
#[must_use]
pub fn has_discount(discount_percent: Option<f64>) -> bool {
    discount_percent.is_some_and(|pct| pct.is_finite() && pct > 0.0)
}

/// Format an amount with two decimals for display.
#[must_use]
pub fn format_price(amount: f64) -> String {
    format!("{amount:.2}")
}
