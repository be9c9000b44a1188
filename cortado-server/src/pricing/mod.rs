//! Money calculation utilities using rust_decimal for precision
//!
//! The pricing resolver is a pure function over the line-item
//! components: `(base + variant + Σaddons) × quantity`. Missing
//! variant/addons count as zero. All arithmetic is done in `Decimal`
//! internally, then converted to `f64` (2 decimal places, midpoint
//! away from zero) for storage and serialization.

use rust_decimal::prelude::*;

use crate::utils::{EngineError, EngineResult};

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Maximum allowed price per component
pub const MAX_PRICE: f64 = 1_000_000.0;
/// Maximum allowed quantity per line item
pub const MAX_QUANTITY: u32 = 9_999;

/// Validate that a f64 value is finite (not NaN, not Infinity)
#[inline]
fn require_finite(value: f64, field: &str) -> EngineResult<()> {
    if !value.is_finite() {
        return Err(EngineError::validation(format!(
            "{} must be a finite number, got {}",
            field, value
        )));
    }
    Ok(())
}

/// Validate a monetary component: finite, non-negative, within bounds
pub fn validate_price(value: f64, field: &str) -> EngineResult<()> {
    require_finite(value, field)?;
    if value < 0.0 {
        return Err(EngineError::validation(format!(
            "{} must be non-negative, got {}",
            field, value
        )));
    }
    if value > MAX_PRICE {
        return Err(EngineError::validation(format!(
            "{} exceeds maximum allowed ({}), got {}",
            field, MAX_PRICE, value
        )));
    }
    Ok(())
}

/// Validate a line-item quantity: positive, within bounds
pub fn validate_quantity(quantity: u32) -> EngineResult<()> {
    if quantity == 0 {
        return Err(EngineError::validation("quantity must be positive"));
    }
    if quantity > MAX_QUANTITY {
        return Err(EngineError::validation(format!(
            "quantity exceeds maximum allowed ({}), got {}",
            MAX_QUANTITY, quantity
        )));
    }
    Ok(())
}

/// Convert f64 to Decimal for calculation
///
/// Input values should be pre-validated via `validate_price()` at the
/// boundary. If NaN/Infinity somehow reaches here, logs an error and
/// returns ZERO to avoid silent corruption in monetary math.
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_else(|| {
        tracing::error!(value = ?value, "Non-finite f64 in monetary calculation, defaulting to zero");
        Decimal::ZERO
    })
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_money(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        // SAFETY: Decimal rounded to 2dp with components bounded by
        // MAX_PRICE is always representable as f64
        .expect("Decimal rounded to 2dp is always representable as f64")
}

/// Resolve one line item's price from its components
///
/// `price = (base + variant + Σaddons) × quantity`, missing components
/// treated as zero. Components and quantity must already satisfy the
/// validation limits; this revalidates them so the resolver is safe to
/// call on its own.
pub fn resolve_line_price(
    base_price: f64,
    variant_price: Option<f64>,
    addon_prices: &[f64],
    quantity: u32,
) -> EngineResult<f64> {
    validate_price(base_price, "base_price")?;
    if let Some(v) = variant_price {
        validate_price(v, "variant price")?;
    }
    for (i, a) in addon_prices.iter().enumerate() {
        validate_price(*a, &format!("addon[{}] price", i))?;
    }
    validate_quantity(quantity)?;

    let unit = to_decimal(base_price)
        + variant_price.map(to_decimal).unwrap_or(Decimal::ZERO)
        + addon_prices.iter().map(|a| to_decimal(*a)).sum::<Decimal>();
    Ok(to_money(unit * Decimal::from(quantity)))
}

/// Scale an existing line price to a new quantity
///
/// The per-unit price is derived from the current line price, then
/// multiplied by the new quantity. Used by `set_quantity` when no
/// explicit override price is supplied.
pub fn scale_to_quantity(price: f64, old_quantity: u32, new_quantity: u32) -> EngineResult<f64> {
    validate_quantity(old_quantity)?;
    validate_quantity(new_quantity)?;
    require_finite(price, "price")?;
    let per_unit = to_decimal(price) / Decimal::from(old_quantity);
    Ok(to_money(per_unit * Decimal::from(new_quantity)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_base_variant_addons_times_quantity() {
        // base 100, variant +20, addons 15+15, quantity 2 → 300
        let price = resolve_line_price(100.0, Some(20.0), &[15.0, 15.0], 2).unwrap();
        assert_eq!(price, 300.0);
    }

    #[test]
    fn missing_components_count_as_zero() {
        assert_eq!(resolve_line_price(50.0, None, &[], 1).unwrap(), 50.0);
        assert_eq!(resolve_line_price(50.0, None, &[], 3).unwrap(), 150.0);
    }

    #[test]
    fn rejects_negative_base_price() {
        assert!(resolve_line_price(-1.0, None, &[], 1).is_err());
    }

    #[test]
    fn rejects_non_finite_components() {
        assert!(resolve_line_price(f64::NAN, None, &[], 1).is_err());
        assert!(resolve_line_price(10.0, Some(f64::INFINITY), &[], 1).is_err());
    }

    #[test]
    fn rejects_zero_and_oversized_quantity() {
        assert!(resolve_line_price(10.0, None, &[], 0).is_err());
        assert!(resolve_line_price(10.0, None, &[], MAX_QUANTITY + 1).is_err());
    }

    #[test]
    fn rejects_over_limit_price() {
        assert!(resolve_line_price(MAX_PRICE + 0.01, None, &[], 1).is_err());
    }

    #[test]
    fn scaling_preserves_per_unit_price() {
        // 3 units at 10.50 each → 2 units
        let scaled = scale_to_quantity(31.50, 3, 2).unwrap();
        assert_eq!(scaled, 21.0);
    }

    #[test]
    fn scaling_rounds_to_two_decimals() {
        // 10.00 / 3 per unit = 3.333... → ×7 = 23.33
        let scaled = scale_to_quantity(10.0, 3, 7).unwrap();
        assert_eq!(scaled, 23.33);
    }
}
