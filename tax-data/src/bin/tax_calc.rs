use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tax_core::CreditRegistry;
use tax_data::LedgerLoader;
use tax_data::logging::init_logging;
use tracing::info;

/// Calculate income tax from a ledger CSV file.
///
/// The CSV file should have the following columns:
/// - entry: income, set_income, expense, expenses, advance_tax,
///   set_advance_tax, credit or credits
/// - value: an amount, an expense specification (e.g. 3000 or 60%),
///   a credit kind, or a ';'-separated list of credit kinds
#[derive(Parser, Debug)]
#[command(name = "tax-calc")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the ledger CSV file
    #[arg(short, long)]
    file: PathBuf,

    /// Print every line of the computation, not just the final tax
    #[arg(short, long, default_value_t = false)]
    breakdown: bool,

    /// Log filter directive (e.g. "debug" or "tax_core=debug"); defaults to RUST_LOG
    #[arg(long)]
    log_level: Option<String>,

    /// Also append log records to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(args.log_level.as_deref(), args.log_file.as_deref())?;

    info!(file = %args.file.display(), "loading ledger");

    let file = File::open(&args.file)
        .with_context(|| format!("Failed to open: {}", args.file.display()))?;

    let registry = CreditRegistry::with_builtin();
    let calculator = LedgerLoader::load(file, &registry)
        .with_context(|| format!("Failed to apply ledger: {}", args.file.display()))?;

    let breakdown = calculator.calculate();

    if args.breakdown {
        println!("Income:                        {:>12.2}", breakdown.income);
        println!("Expenses:                      {:>12.2}", breakdown.expenses);
        println!("Tax base:                      {:>12.2}", breakdown.tax_base);
        println!("Rounded tax base:              {:>12.2}", breakdown.rounded_tax_base);
        println!("Tax before credits:            {:>12.2}", breakdown.tax_before_credits);
        println!("Tax after credits:             {:>12.2}", breakdown.tax_after_credits);
        println!(
            "Tax after below-zero credits:  {:>12.2}",
            breakdown.tax_after_below_zero_credits
        );
        println!("Advance tax:                   {:>12.2}", breakdown.advance_tax);
        println!("Calculated tax:                {:>12.2}", breakdown.calculated_tax);
    } else {
        println!("{}", breakdown.calculated_tax);
    }

    Ok(())
}
