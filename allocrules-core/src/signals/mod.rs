//! Signal catalog — explicitly registered technical signals.
//!
//! Each entry carries the signal implementation (`class`), the rule name it is
//! exported under (`function_names`), its default parameters, and the input
//! columns it reads (`series`). Entries are keyed by `SignalId`.
//!
//! `ta_adaptor` turns a catalog signal into a `TableTransform` that writes the
//! `signal` column, ready to be the first stage of a regression pipeline.

pub mod adaptor;
pub mod technical;

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use polars::prelude::DataFrame;

use crate::params::Params;
use crate::rules::RuleError;

pub use adaptor::{ta_adaptor, SignalTransformer};

/// A signal computation: table in, one value per row out.
pub trait SignalFunction: Send + Sync {
    fn compute(&self, table: &DataFrame, params: &Params) -> Result<Vec<f64>, RuleError>;
}

impl<F> SignalFunction for F
where
    F: Fn(&DataFrame, &Params) -> Result<Vec<f64>, RuleError> + Send + Sync,
{
    fn compute(&self, table: &DataFrame, params: &Params) -> Result<Vec<f64>, RuleError> {
        self(table, params)
    }
}

/// Catalog key, e.g. `"RSIIndicator"`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SignalId(String);

impl SignalId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SignalId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl fmt::Display for SignalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A registered signal.
#[derive(Clone)]
pub struct SignalEntry {
    pub class: Arc<dyn SignalFunction>,
    pub function_names: String,
    pub parameters: Params,
    pub series: Vec<String>,
}

impl SignalEntry {
    pub fn new(
        class: Arc<dyn SignalFunction>,
        function_names: impl Into<String>,
        parameters: Params,
        series: &[&str],
    ) -> Self {
        Self {
            class,
            function_names: function_names.into(),
            parameters,
            series: series.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl fmt::Debug for SignalEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignalEntry")
            .field("function_names", &self.function_names)
            .field("parameters", &self.parameters)
            .field("series", &self.series)
            .finish_non_exhaustive()
    }
}

/// Ordered collection of signals, iterated by `SignalId`.
#[derive(Debug, Clone, Default)]
pub struct SignalCatalog {
    entries: BTreeMap<SignalId, SignalEntry>,
}

impl SignalCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `entry` under `id`, returning any entry it replaced.
    pub fn register(&mut self, id: impl Into<SignalId>, entry: SignalEntry) -> Option<SignalEntry> {
        self.entries.insert(id.into(), entry)
    }

    pub fn get(&self, id: &SignalId) -> Result<&SignalEntry, RuleError> {
        self.entries
            .get(id)
            .ok_or_else(|| RuleError::UnknownSignal(id.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SignalId, &SignalEntry)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::params;

    fn zeros(table: &DataFrame, _params: &Params) -> Result<Vec<f64>, RuleError> {
        Ok(vec![0.0; table.height()])
    }

    #[test]
    fn register_and_get() {
        let mut catalog = SignalCatalog::new();
        assert!(catalog.is_empty());
        let replaced = catalog.register(
            "Zeros",
            SignalEntry::new(Arc::new(zeros), "zeros", params(&[("window", 3.0)]), &["price"]),
        );
        assert!(replaced.is_none());

        let entry = catalog.get(&SignalId::from("Zeros")).unwrap();
        assert_eq!(entry.function_names, "zeros");
        assert_eq!(entry.series, vec!["price".to_string()]);
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn unknown_signal_is_typed_error() {
        let catalog = SignalCatalog::new();
        let err = catalog.get(&SignalId::from("Missing")).unwrap_err();
        assert!(matches!(err, RuleError::UnknownSignal(ref id) if id == "Missing"));
    }

    #[test]
    fn iteration_is_ordered_by_id() {
        let mut catalog = SignalCatalog::new();
        for id in ["b", "c", "a"] {
            catalog.register(id, SignalEntry::new(Arc::new(zeros), id, Params::new(), &[]));
        }
        let ids: Vec<&str> = catalog.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }
}
