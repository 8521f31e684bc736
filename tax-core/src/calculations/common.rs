//! Rounding helpers shared by the tax computation.

/// Tax bases are rounded to whole hundreds.
pub const TAX_BASE_ROUNDING_UNIT: f64 = 100.0;

/// Flat personal income tax rate.
pub const TAX_RATE: f64 = 0.15;

/// Truncates a value toward zero to a multiple of [`TAX_BASE_ROUNDING_UNIT`].
///
/// This drops the remainder rather than flooring, so negative values move
/// toward zero too. Bases that truncate to zero yield positive zero.
///
/// # Examples
///
/// ```
/// use tax_core::calculations::common::truncate_to_hundreds;
///
/// assert_eq!(truncate_to_hundreds(1050.0), 1000.0);
/// assert_eq!(truncate_to_hundreds(-150.0), -100.0);
/// ```
pub fn truncate_to_hundreds(value: f64) -> f64 {
    (value / TAX_BASE_ROUNDING_UNIT).trunc() * TAX_BASE_ROUNDING_UNIT + 0.0
}

/// Applies [`TAX_RATE`] to a rounded tax base and rounds the result up.
///
/// # Examples
///
/// ```
/// use tax_core::calculations::common::tax_from_base;
///
/// assert_eq!(tax_from_base(6500.0), 975.0);
/// assert_eq!(tax_from_base(-100.0), -15.0);
/// ```
pub fn tax_from_base(rounded_base: f64) -> f64 {
    (rounded_base * TAX_RATE).ceil()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    // =========================================================================
    // truncate_to_hundreds tests
    // =========================================================================

    #[test]
    fn truncate_drops_remainder() {
        assert_eq!(truncate_to_hundreds(1050.0), 1000.0);
    }

    #[test]
    fn truncate_does_not_round_up() {
        assert_eq!(truncate_to_hundreds(1099.99), 1000.0);
    }

    #[test]
    fn truncate_preserves_exact_hundreds() {
        assert_eq!(truncate_to_hundreds(7000.0), 7000.0);
    }

    #[test]
    fn truncate_moves_negative_values_toward_zero() {
        assert_eq!(truncate_to_hundreds(-150.0), -100.0);
        assert_eq!(truncate_to_hundreds(-1099.0), -1000.0);
    }

    #[test]
    fn truncate_small_values_to_zero() {
        assert_eq!(truncate_to_hundreds(99.0), 0.0);
        assert_eq!(truncate_to_hundreds(-99.0), 0.0);
    }

    #[test]
    fn truncate_small_negative_values_to_positive_zero() {
        assert!(truncate_to_hundreds(-50.0).is_sign_positive());
        assert!(truncate_to_hundreds(-0.0).is_sign_positive());
    }

    #[test]
    fn tax_of_truncated_small_negative_base_is_positive_zero() {
        assert!(tax_from_base(truncate_to_hundreds(-99.0)).is_sign_positive());
    }

    // =========================================================================
    // tax_from_base tests
    // =========================================================================

    #[test]
    fn tax_is_fifteen_percent() {
        assert_eq!(tax_from_base(10000.0), 1500.0);
    }

    #[test]
    fn tax_rounds_fractions_up() {
        assert_eq!(tax_from_base(100.0), 15.0);
        assert_eq!(tax_from_base(1100.0), 165.0);
        assert_eq!(tax_from_base(110.0), 17.0); // 16.5
    }

    #[test]
    fn tax_of_zero_base_is_zero() {
        assert_eq!(tax_from_base(0.0), 0.0);
    }
}
