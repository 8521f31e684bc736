pub mod calculations;
pub mod credits;
pub mod error;
pub mod models;

pub use calculations::TaxCalculator;
pub use credits::{CreditRegistry, MaxCount, TaxCredit, TaxpayerCredit};
pub use error::{ArgumentTypeError, CalculatorError, LogicError};
pub use models::*;
