use std::collections::HashMap;

use tracing::warn;

use super::{TaxCredit, TaxpayerCredit};
use crate::error::ArgumentTypeError;

/// Builds a fresh credit of one kind.
pub type CreditConstructor = fn() -> Box<dyn TaxCredit>;

/// Registry of credit constructors, keyed by credit kind.
///
/// Used wherever credits arrive as names rather than typed values (ledger
/// files, command lines). Typical lifetime:
/// 1. Create with [`CreditRegistry::with_builtin`] (or `new` for an empty one).
/// 2. Call `register` once per caller-defined kind.
/// 3. Call `create` or `resolve_all` whenever credits are needed.
#[derive(Debug, Clone)]
pub struct CreditRegistry {
    constructors: HashMap<String, CreditConstructor>,
}

impl CreditRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            constructors: HashMap::new(),
        }
    }

    /// Create a registry holding every built-in credit kind.
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.register(TaxpayerCredit::KIND, || Box::new(TaxpayerCredit));
        registry
    }

    /// Register a constructor for `kind`.
    ///
    /// If the kind is already registered its constructor is replaced.
    pub fn register(
        &mut self,
        kind: impl Into<String>,
        constructor: CreditConstructor,
    ) {
        self.constructors.insert(kind.into(), constructor);
    }

    /// Names of every registered kind, sorted alphabetically.
    pub fn available_kinds(&self) -> Vec<&str> {
        let mut kinds: Vec<_> = self.constructors.keys().map(String::as_str).collect();
        kinds.sort_unstable();
        kinds
    }

    /// Build a credit of `kind`.
    ///
    /// # Errors
    /// [`ArgumentTypeError::UnknownCreditKind`] when no constructor is
    /// registered for `kind`.
    pub fn create(
        &self,
        kind: &str,
    ) -> Result<Box<dyn TaxCredit>, ArgumentTypeError> {
        let constructor = self.constructors.get(kind).ok_or_else(|| {
            warn!(kind, "unknown tax credit kind");
            ArgumentTypeError::UnknownCreditKind {
                kind: kind.to_string(),
                available: self
                    .available_kinds()
                    .into_iter()
                    .map(str::to_string)
                    .collect(),
            }
        })?;

        Ok(constructor())
    }

    /// Build one credit per element of `kinds`, failing on the first
    /// unknown kind without returning any of the others.
    pub fn resolve_all<I, S>(
        &self,
        kinds: I,
    ) -> Result<Vec<Box<dyn TaxCredit>>, ArgumentTypeError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        kinds
            .into_iter()
            .map(|kind| self.create(kind.as_ref()))
            .collect()
    }
}

impl Default for CreditRegistry {
    fn default() -> Self {
        Self::with_builtin()
    }
}
