//! Tax calculation modules.
//!
//! This module provides the income tax calculator and the rounding rules it
//! applies.

pub mod calculator;
pub mod common;

pub use calculator::TaxCalculator;
