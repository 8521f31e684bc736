mod expenses;
mod tax_breakdown;

pub use expenses::{Expenses, PercentExpense};
pub use tax_breakdown::TaxBreakdown;
