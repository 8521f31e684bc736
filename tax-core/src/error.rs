//! Error types returned by the tax calculator.
//!
//! Two failure kinds are kept apart so callers can handle one without
//! catching the other:
//!
//! - [`LogicError`]: a business-rule violation (malformed expenses, adding
//!   an expense in percent mode, too many credits of one kind).
//! - [`ArgumentTypeError`]: a supplied value does not denote a tax credit
//!   at all.

use thiserror::Error;

use crate::credits::MaxCount;
use crate::models::PercentExpense;

/// A state or business-rule violation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LogicError {
    /// The expense value is neither numeric nor a percent constant.
    #[error("expenses must be a number or one of {allowed}, got '{0}'", allowed = PercentExpense::ALLOWED)]
    InvalidExpenses(String),

    /// An expense was added while expenses are a percentage of income.
    #[error(
        "cannot add an expense while expenses are set to {0} of income; \
         set expenses to a number before calling add_expense"
    )]
    PercentExpenseMode(PercentExpense),

    /// A credit kind already holds its maximum number of instances.
    #[error("there can only be {max_count} instances of {kind}")]
    TooManyCredits { kind: String, max_count: MaxCount },
}

/// A supplied element does not satisfy the tax credit contract.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ArgumentTypeError {
    #[error("all tax credits must be known credit kinds; '{kind}' is not one of {available:?}")]
    UnknownCreditKind {
        kind: String,
        available: Vec<String>,
    },
}

/// Either failure kind, for operations that can produce both.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CalculatorError {
    #[error(transparent)]
    Logic(#[from] LogicError),

    #[error(transparent)]
    ArgumentType(#[from] ArgumentTypeError),
}

impl CalculatorError {
    /// Returns `true` for business-rule violations.
    pub fn is_logic_error(&self) -> bool {
        matches!(self, Self::Logic(_))
    }
}
