use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LogicError;

/// Flat-rate expenses expressed as a fixed share of income.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PercentExpense {
    #[serde(rename = "30%")]
    Percent30,
    #[serde(rename = "40%")]
    Percent40,
    #[serde(rename = "60%")]
    Percent60,
    #[serde(rename = "80%")]
    Percent80,
}

impl PercentExpense {
    /// Every percent constant, in ascending order.
    pub const ALL: [Self; 4] = [
        Self::Percent30,
        Self::Percent40,
        Self::Percent60,
        Self::Percent80,
    ];

    pub(crate) const ALLOWED: &'static str = "30%, 40%, 60%, 80%";

    /// Share of income counted as expenses.
    pub fn rate(&self) -> f64 {
        match self {
            Self::Percent30 => 0.3,
            Self::Percent40 => 0.4,
            Self::Percent60 => 0.6,
            Self::Percent80 => 0.8,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Percent30 => "30%",
            Self::Percent40 => "40%",
            Self::Percent60 => "60%",
            Self::Percent80 => "80%",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "30%" => Some(Self::Percent30),
            "40%" => Some(Self::Percent40),
            "60%" => Some(Self::Percent60),
            "80%" => Some(Self::Percent80),
            _ => None,
        }
    }
}

impl fmt::Display for PercentExpense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How expenses are specified: an absolute amount or a share of income.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Expenses {
    Absolute(f64),
    Percent(PercentExpense),
}

impl Expenses {
    /// Resolves the expenses against `income`.
    ///
    /// Percent expenses are evaluated on every call, so they follow the
    /// income the caller passes in rather than the income at the time the
    /// percentage was chosen.
    pub fn amount(&self, income: f64) -> f64 {
        match self {
            Self::Absolute(amount) => *amount,
            Self::Percent(percent) => income * percent.rate(),
        }
    }

    pub fn is_percent(&self) -> bool {
        matches!(self, Self::Percent(_))
    }
}

impl Default for Expenses {
    fn default() -> Self {
        Self::Absolute(0.0)
    }
}

impl From<f64> for Expenses {
    fn from(amount: f64) -> Self {
        Self::Absolute(amount)
    }
}

impl From<PercentExpense> for Expenses {
    fn from(percent: PercentExpense) -> Self {
        Self::Percent(percent)
    }
}

impl FromStr for Expenses {
    type Err = LogicError;

    /// Parses a finite number or one of the percent constants (`"30%"`,
    /// `"40%"`, `"60%"`, `"80%"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Some(percent) = PercentExpense::parse(trimmed) {
            return Ok(Self::Percent(percent));
        }
        match trimmed.parse::<f64>() {
            Ok(amount) if amount.is_finite() => Ok(Self::Absolute(amount)),
            _ => Err(LogicError::InvalidExpenses(s.to_string())),
        }
    }
}

impl fmt::Display for Expenses {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absolute(amount) => write!(f, "{amount}"),
            Self::Percent(percent) => write!(f, "{percent}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    // =========================================================================
    // PercentExpense tests
    // =========================================================================

    #[test]
    fn percent_rates_match_constants() {
        let rates: Vec<f64> = PercentExpense::ALL.iter().map(|p| p.rate()).collect();

        assert_eq!(rates, vec![0.3, 0.4, 0.6, 0.8]);
    }

    #[test]
    fn percent_parse_round_trips_as_str() {
        for percent in PercentExpense::ALL {
            assert_eq!(PercentExpense::parse(percent.as_str()), Some(percent));
        }
    }

    #[test]
    fn percent_parse_rejects_other_values() {
        assert_eq!(PercentExpense::parse("50%"), None);
        assert_eq!(PercentExpense::parse("80"), None);
    }

    // =========================================================================
    // Expenses::amount tests
    // =========================================================================

    #[test]
    fn absolute_amount_ignores_income() {
        let expenses = Expenses::Absolute(500.0);

        assert_eq!(expenses.amount(100.0), 500.0);
    }

    #[test]
    fn percent_amount_scales_with_income() {
        let expenses = Expenses::Percent(PercentExpense::Percent60);

        assert_eq!(expenses.amount(100.0), 100.0 * 0.6);
        assert_eq!(expenses.amount(1000.0), 1000.0 * 0.6);
    }

    #[test]
    fn default_is_zero_absolute() {
        assert_eq!(Expenses::default(), Expenses::Absolute(0.0));
    }

    // =========================================================================
    // Expenses::from_str tests
    // =========================================================================

    #[test]
    fn from_str_accepts_numbers() {
        assert_eq!("3000".parse::<Expenses>(), Ok(Expenses::Absolute(3000.0)));
        assert_eq!(" -12.5 ".parse::<Expenses>(), Ok(Expenses::Absolute(-12.5)));
    }

    #[test]
    fn from_str_accepts_percent_constants() {
        assert_eq!(
            "40%".parse::<Expenses>(),
            Ok(Expenses::Percent(PercentExpense::Percent40))
        );
    }

    #[test]
    fn from_str_rejects_non_numeric_string() {
        assert_eq!(
            "non-numeric-string".parse::<Expenses>(),
            Err(LogicError::InvalidExpenses("non-numeric-string".to_string()))
        );
    }

    #[test]
    fn from_str_rejects_non_finite_numbers() {
        assert!("NaN".parse::<Expenses>().is_err());
        assert!("inf".parse::<Expenses>().is_err());
    }
}
