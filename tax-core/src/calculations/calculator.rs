//! Personal income tax calculator.
//!
//! A [`TaxCalculator`] accumulates one filer's yearly figures and derives the
//! tax still due from them.
//!
//! # Computation
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Tax base: income minus expenses |
//! | 2    | Truncate the base toward zero to whole hundreds |
//! | 3    | Tax: 15 % of the truncated base, rounded up |
//! | 4    | Subtract credits that may not push the tax below zero |
//! | 5    | Clamp the tax at zero |
//! | 6    | Subtract credits that may push the tax below zero |
//! | 7    | Subtract advance tax already paid |
//!
//! Steps 4 to 6 are order sensitive: only credits applied before the clamp
//! are protected by it. A negative result is a refund.
//!
//! # Example
//!
//! ```
//! use tax_core::{PercentExpense, TaxCalculator, TaxpayerCredit};
//!
//! let mut calculator = TaxCalculator::new();
//! calculator
//!     .set_income(10_000.0)
//!     .set_expenses(PercentExpense::Percent30)
//!     .add_advance_tax(5_000.0);
//! calculator.add_tax_credit(Box::new(TaxpayerCredit)).unwrap();
//!
//! assert_eq!(calculator.calculated_tax(), -5_000.0);
//! ```

use tracing::{debug, warn};

use crate::calculations::common::{tax_from_base, truncate_to_hundreds};
use crate::credits::{CreditRegistry, TaxCredit};
use crate::error::{CalculatorError, LogicError};
use crate::models::{Expenses, TaxBreakdown};

/// Credits of one kind, in insertion order.
#[derive(Debug)]
struct CreditGroup {
    kind: String,
    credits: Vec<Box<dyn TaxCredit>>,
}

/// Appends `credit` to its kind's group unless the kind is already full.
fn push_credit(
    groups: &mut Vec<CreditGroup>,
    credit: Box<dyn TaxCredit>,
) -> Result<(), LogicError> {
    let max_count = credit.max_count();
    let position = groups.iter().position(|g| g.kind == credit.kind());
    let present = position.map_or(0, |i| groups[i].credits.len());

    if !max_count.admits(present) {
        warn!(
            kind = credit.kind(),
            %max_count,
            present,
            "tax credit rejected; kind is at its maximum count"
        );
        return Err(LogicError::TooManyCredits {
            kind: credit.kind().to_string(),
            max_count,
        });
    }

    match position {
        Some(i) => groups[i].credits.push(credit),
        None => groups.push(CreditGroup {
            kind: credit.kind().to_string(),
            credits: vec![credit],
        }),
    }
    Ok(())
}

/// Income tax calculator for one filer and one year.
#[derive(Debug, Default)]
pub struct TaxCalculator {
    income: f64,
    expenses: Expenses,
    tax_credits: Vec<CreditGroup>,
    advance_taxes: Vec<f64>,
}

impl TaxCalculator {
    /// Creates an empty calculator: no income, zero expenses, no credits and
    /// no advance tax.
    pub fn new() -> Self {
        Self::default()
    }

    // ── income ───────────────────────────────────────────────────────────

    pub fn income(&self) -> f64 {
        self.income
    }

    /// Adds to the income. A negative `income` acts as a correction.
    pub fn add_income(
        &mut self,
        income: f64,
    ) -> &mut Self {
        self.income += income;
        self
    }

    pub fn set_income(
        &mut self,
        income: f64,
    ) -> &mut Self {
        self.income = income;
        self
    }

    // ── expenses ─────────────────────────────────────────────────────────

    /// Expenses as an amount.
    ///
    /// Percent expenses are resolved against the current income, so changing
    /// the income afterwards changes the result.
    pub fn expenses(&self) -> f64 {
        self.expenses.amount(self.income)
    }

    /// The expenses as they were specified.
    pub fn expense_spec(&self) -> Expenses {
        self.expenses
    }

    /// Adds to absolute expenses. A negative `expense` acts as a correction.
    ///
    /// # Errors
    ///
    /// [`LogicError::PercentExpenseMode`] if expenses are currently a share
    /// of income; set them to a number first.
    pub fn add_expense(
        &mut self,
        expense: f64,
    ) -> Result<&mut Self, LogicError> {
        match self.expenses {
            Expenses::Absolute(amount) => {
                self.expenses = Expenses::Absolute(amount + expense);
                Ok(self)
            }
            Expenses::Percent(percent) => {
                warn!(%percent, expense, "expense rejected; expenses are a percentage of income");
                Err(LogicError::PercentExpenseMode(percent))
            }
        }
    }

    /// Replaces the expenses and their mode.
    pub fn set_expenses(
        &mut self,
        expenses: impl Into<Expenses>,
    ) -> &mut Self {
        self.expenses = expenses.into();
        self
    }

    // ── tax credits ──────────────────────────────────────────────────────

    /// All credits, grouped by kind in the order each kind was first added,
    /// and in insertion order within a kind.
    pub fn tax_credits(&self) -> Vec<&dyn TaxCredit> {
        self.iter_tax_credits().collect()
    }

    fn iter_tax_credits(&self) -> impl Iterator<Item = &dyn TaxCredit> + '_ {
        self.tax_credits
            .iter()
            .flat_map(|group| group.credits.iter().map(|credit| credit.as_ref()))
    }

    /// Adds one credit.
    ///
    /// # Errors
    ///
    /// [`LogicError::TooManyCredits`] if the credit's kind already holds
    /// [`TaxCredit::max_count`] credits.
    pub fn add_tax_credit(
        &mut self,
        credit: Box<dyn TaxCredit>,
    ) -> Result<&mut Self, LogicError> {
        push_credit(&mut self.tax_credits, credit)?;
        Ok(self)
    }

    /// Replaces all credits.
    ///
    /// The credits are checked against their kinds' maximum counts in order.
    /// On failure the calculator keeps its previous credits.
    ///
    /// # Errors
    ///
    /// [`LogicError::TooManyCredits`] if any kind would exceed its limit.
    pub fn set_tax_credits<I>(
        &mut self,
        credits: I,
    ) -> Result<&mut Self, LogicError>
    where
        I: IntoIterator<Item = Box<dyn TaxCredit>>,
    {
        let mut groups = Vec::new();
        for credit in credits {
            push_credit(&mut groups, credit)?;
        }
        self.tax_credits = groups;
        Ok(self)
    }

    /// Replaces all credits with credits built from their kind names.
    ///
    /// Every name is resolved through `registry` before any maximum count is
    /// checked. On failure the calculator keeps its previous credits.
    ///
    /// # Errors
    ///
    /// - [`CalculatorError::ArgumentType`] if a name is not a registered kind.
    /// - [`CalculatorError::Logic`] if any kind would exceed its limit.
    pub fn set_tax_credits_by_kind<I, S>(
        &mut self,
        registry: &CreditRegistry,
        kinds: I,
    ) -> Result<&mut Self, CalculatorError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let credits = registry.resolve_all(kinds)?;
        Ok(self.set_tax_credits(credits)?)
    }

    // ── advance tax ──────────────────────────────────────────────────────

    /// Total advance tax paid; zero when none was recorded.
    pub fn advance_tax(&self) -> f64 {
        self.advance_taxes.iter().fold(0.0, |total, payment| total + payment)
    }

    /// Records one advance payment. A negative amount acts as a correction.
    pub fn add_advance_tax(
        &mut self,
        advance_tax: f64,
    ) -> &mut Self {
        self.advance_taxes.push(advance_tax);
        self
    }

    /// Replaces every recorded payment with a single one.
    pub fn set_advance_tax(
        &mut self,
        advance_tax: f64,
    ) -> &mut Self {
        self.advance_taxes = vec![advance_tax];
        self
    }

    // ── computation ──────────────────────────────────────────────────────

    /// Final tax due; negative means a refund.
    pub fn calculated_tax(&self) -> f64 {
        self.calculate().calculated_tax
    }

    /// Computes the tax and reports every intermediate line.
    pub fn calculate(&self) -> TaxBreakdown {
        let income = self.income();
        let expenses = self.expenses();

        // Step 1: tax base
        let tax_base = income - expenses;

        // Step 2: truncate toward zero to whole hundreds
        let rounded_tax_base = truncate_to_hundreds(tax_base);

        // Step 3: 15 %, rounded up
        let tax_before_credits = tax_from_base(rounded_tax_base);
        debug!(
            income,
            expenses,
            tax_base,
            rounded_tax_base,
            tax_before_credits,
            "computed tax before credits"
        );

        // Step 4: credits protected by the clamp
        let mut tax = tax_before_credits;
        for credit in self.iter_tax_credits() {
            if !credit.is_subtractable_below_zero() {
                tax -= credit.amount();
            }
        }

        // Step 5: clamp
        let tax_after_credits = if tax < 0.0 { 0.0 } else { tax };

        // Step 6: credits that may push the tax below zero
        let mut tax = tax_after_credits;
        for credit in self.iter_tax_credits() {
            if credit.is_subtractable_below_zero() {
                tax -= credit.amount();
            }
        }
        let tax_after_below_zero_credits = tax;

        // Step 7: advance tax
        let advance_tax = self.advance_tax();
        let calculated_tax = tax_after_below_zero_credits - advance_tax;
        debug!(
            tax_after_credits,
            tax_after_below_zero_credits,
            advance_tax,
            calculated_tax,
            "computed tax after credits and advance tax"
        );

        TaxBreakdown {
            income,
            expenses,
            tax_base,
            rounded_tax_base,
            tax_before_credits,
            tax_after_credits,
            tax_after_below_zero_credits,
            advance_tax,
            calculated_tax,
        }
    }
}
