//! Tax credits subtracted from the computed tax.
//!
//! The calculator depends only on the [`TaxCredit`] trait. Callers supply
//! their own credit kinds by implementing it; [`TaxpayerCredit`] is the one
//! built-in kind.

pub mod registry;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use registry::{CreditConstructor, CreditRegistry};

/// Upper bound on the number of credits of one kind in a calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaxCount {
    Limited(usize),
    Unlimited,
}

impl MaxCount {
    /// Whether one more credit fits next to `present` existing ones.
    pub fn admits(&self, present: usize) -> bool {
        match self {
            Self::Limited(max) => present < *max,
            Self::Unlimited => true,
        }
    }
}

impl Default for MaxCount {
    fn default() -> Self {
        Self::Limited(1)
    }
}

impl fmt::Display for MaxCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Limited(max) => write!(f, "{max}"),
            Self::Unlimited => f.write_str("unlimited"),
        }
    }
}

/// A fixed deduction from the computed tax.
///
/// Credits are grouped by [`kind`](TaxCredit::kind); the calculator refuses
/// to hold more credits of one kind than [`max_count`](TaxCredit::max_count)
/// allows.
pub trait TaxCredit: fmt::Debug + Send + Sync {
    /// Stable identifier shared by all credits of this kind.
    fn kind(&self) -> &str;

    /// Amount subtracted from the tax.
    fn amount(&self) -> f64;

    /// Whether the amount may be subtracted even if the tax is already zero.
    fn is_subtractable_below_zero(&self) -> bool {
        false
    }

    /// Maximum number of credits of this kind in one calculator.
    fn max_count(&self) -> MaxCount {
        MaxCount::default()
    }
}

/// Basic credit every taxpayer is entitled to, once per year.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaxpayerCredit;

impl TaxpayerCredit {
    pub const KIND: &'static str = "taxpayer";
    pub const AMOUNT: f64 = 24_840.0;
}

impl TaxCredit for TaxpayerCredit {
    fn kind(&self) -> &str {
        Self::KIND
    }

    fn amount(&self) -> f64 {
        Self::AMOUNT
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    // =========================================================================
    // MaxCount tests
    // =========================================================================

    #[test]
    fn limited_admits_below_limit_only() {
        let max = MaxCount::Limited(2);

        assert!(max.admits(0));
        assert!(max.admits(1));
        assert!(!max.admits(2));
    }

    #[test]
    fn limited_zero_admits_nothing() {
        assert!(!MaxCount::Limited(0).admits(0));
    }

    #[test]
    fn unlimited_admits_anything() {
        assert!(MaxCount::Unlimited.admits(usize::MAX));
    }

    #[test]
    fn default_max_count_is_one() {
        assert_eq!(MaxCount::default(), MaxCount::Limited(1));
    }

    #[test]
    fn display_shows_limit_or_unlimited() {
        assert_eq!(MaxCount::Limited(3).to_string(), "3");
        assert_eq!(MaxCount::Unlimited.to_string(), "unlimited");
    }

    // =========================================================================
    // TaxpayerCredit tests
    // =========================================================================

    #[test]
    fn taxpayer_amount_is_24840() {
        assert_eq!(TaxpayerCredit.amount(), 24_840.0);
    }

    #[test]
    fn taxpayer_is_not_subtractable_below_zero() {
        assert!(!TaxpayerCredit.is_subtractable_below_zero());
    }

    #[test]
    fn taxpayer_can_be_used_only_once() {
        assert_eq!(TaxpayerCredit.max_count(), MaxCount::Limited(1));
    }

    #[test]
    fn taxpayer_kind_is_stable() {
        assert_eq!(TaxpayerCredit.kind(), "taxpayer");
    }
}
