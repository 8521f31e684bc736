use std::io::Read;

use serde::Deserialize;
use tax_core::{CalculatorError, CreditRegistry, Expenses, LogicError, TaxCalculator};
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur when loading a ledger.
#[derive(Debug, Error)]
pub enum LedgerLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("record {record}: invalid amount '{value}'")]
    InvalidAmount { record: usize, value: String },

    #[error("record {record}: {source}")]
    Calculator {
        record: usize,
        #[source]
        source: CalculatorError,
    },
}

impl From<csv::Error> for LedgerLoaderError {
    fn from(err: csv::Error) -> Self {
        LedgerLoaderError::CsvParse(err.to_string())
    }
}

/// Calculator operation named by a ledger row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LedgerEntry {
    Income,
    SetIncome,
    Expense,
    Expenses,
    AdvanceTax,
    SetAdvanceTax,
    Credit,
    Credits,
}

/// A single row of a ledger CSV file.
///
/// - `entry`: the operation to apply (see [`LedgerEntry`])
/// - `value`: an amount, an expense specification (`3000`, `60%`), a credit
///   kind, or a `;`-separated list of credit kinds
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LedgerRecord {
    pub entry: LedgerEntry,
    #[serde(default)]
    pub value: String,
}

/// Replays ledger files into a [`TaxCalculator`].
///
/// Rows are applied in file order, so the ledger behaves exactly like the
/// equivalent sequence of calculator calls.
pub struct LedgerLoader;

impl LedgerLoader {
    /// Parse ledger records from a CSV reader.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<LedgerRecord>, LedgerLoaderError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: LedgerRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// Apply `records` to `calculator`, resolving credit kinds through
    /// `registry`.
    ///
    /// Returns the number of records applied. Stops at the first failing
    /// record; records before it stay applied.
    pub fn apply(
        calculator: &mut TaxCalculator,
        registry: &CreditRegistry,
        records: &[LedgerRecord],
    ) -> Result<usize, LedgerLoaderError> {
        for (index, record) in records.iter().enumerate() {
            let number = index + 1;
            debug!(record = number, entry = ?record.entry, value = %record.value, "applying ledger record");
            Self::apply_record(calculator, registry, record).map_err(|err| match err {
                ApplyError::Amount => LedgerLoaderError::InvalidAmount {
                    record: number,
                    value: record.value.clone(),
                },
                ApplyError::Calculator(source) => LedgerLoaderError::Calculator {
                    record: number,
                    source,
                },
            })?;
        }

        info!(records = records.len(), "ledger applied");
        Ok(records.len())
    }

    /// Parse a ledger and apply it to a fresh calculator.
    pub fn load<R: Read>(
        reader: R,
        registry: &CreditRegistry,
    ) -> Result<TaxCalculator, LedgerLoaderError> {
        let records = Self::parse(reader)?;
        let mut calculator = TaxCalculator::new();
        Self::apply(&mut calculator, registry, &records)?;
        Ok(calculator)
    }

    fn apply_record(
        calculator: &mut TaxCalculator,
        registry: &CreditRegistry,
        record: &LedgerRecord,
    ) -> Result<(), ApplyError> {
        match record.entry {
            LedgerEntry::Income => {
                calculator.add_income(parse_amount(&record.value)?);
            }
            LedgerEntry::SetIncome => {
                calculator.set_income(parse_amount(&record.value)?);
            }
            LedgerEntry::Expense => {
                calculator.add_expense(parse_amount(&record.value)?)?;
            }
            LedgerEntry::Expenses => {
                calculator.set_expenses(record.value.parse::<Expenses>()?);
            }
            LedgerEntry::AdvanceTax => {
                calculator.add_advance_tax(parse_amount(&record.value)?);
            }
            LedgerEntry::SetAdvanceTax => {
                calculator.set_advance_tax(parse_amount(&record.value)?);
            }
            LedgerEntry::Credit => {
                let credit = registry
                    .create(&record.value)
                    .map_err(CalculatorError::from)?;
                calculator.add_tax_credit(credit)?;
            }
            LedgerEntry::Credits => {
                calculator.set_tax_credits_by_kind(registry, split_kinds(&record.value))?;
            }
        }
        Ok(())
    }
}

/// Failure of one record, before the record number is attached.
enum ApplyError {
    Amount,
    Calculator(CalculatorError),
}

impl From<CalculatorError> for ApplyError {
    fn from(err: CalculatorError) -> Self {
        ApplyError::Calculator(err)
    }
}

impl From<LogicError> for ApplyError {
    fn from(err: LogicError) -> Self {
        ApplyError::Calculator(err.into())
    }
}

fn parse_amount(value: &str) -> Result<f64, ApplyError> {
    match value.trim().parse::<f64>() {
        Ok(amount) if amount.is_finite() => Ok(amount),
        _ => Err(ApplyError::Amount),
    }
}

fn split_kinds(value: &str) -> Vec<&str> {
    value
        .split(';')
        .map(str::trim)
        .filter(|kind| !kind.is_empty())
        .collect()
}
