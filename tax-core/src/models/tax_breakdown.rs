use serde::{Deserialize, Serialize};

/// Every line of a tax computation, in the order the lines are derived.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxBreakdown {
    /// Accumulated income.
    pub income: f64,

    /// Expenses resolved against the income.
    pub expenses: f64,

    /// Income minus expenses.
    pub tax_base: f64,

    /// Tax base truncated toward zero to whole hundreds.
    pub rounded_tax_base: f64,

    /// 15 % of the rounded base, rounded up.
    pub tax_before_credits: f64,

    /// Tax after credits that may not push it below zero, clamped at zero.
    pub tax_after_credits: f64,

    /// Tax after credits that may push it below zero.
    pub tax_after_below_zero_credits: f64,

    /// Sum of advance payments.
    pub advance_tax: f64,

    /// Final figure; negative means a refund.
    pub calculated_tax: f64,
}
