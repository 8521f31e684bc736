pub mod ledger;
pub mod logging;

pub use ledger::{LedgerEntry, LedgerLoader, LedgerLoaderError, LedgerRecord};
