//! allocrules core — allocation rules, rule registries, and regression pipelines.
//!
//! This crate contains:
//! - Canonical column names and table (polars `DataFrame`) helpers
//! - Simple allocation rules (constant, high/low spread, SMA crossover)
//! - The allocation rule registry and its descriptors
//! - A fit/transform pipeline abstraction with a transformer factory
//! - A technical signal catalog and the adaptor that turns signals into table transforms
//! - Regression and position-sizing stages, and the regression rule registry builder
//! - TOML configuration, CSV I/O, and synthetic price tables

pub mod columns;
pub mod config;
pub mod data;
pub mod indicators;
pub mod operations;
pub mod params;
pub mod registry;
pub mod regression_rules;
pub mod rules;
pub mod signals;
pub mod synthetic;
pub mod table;
pub mod transform;

pub use columns::ColumnName;
pub use params::Params;
pub use registry::{allocation_rules, Registries, Registry, RegistryError, RuleDescriptor, RuleId};
pub use regression_rules::{create_allocation_function, ta_rules_with_regression};
pub use rules::{AllocationFn, RuleError};
pub use signals::{SignalCatalog, SignalEntry, SignalId};

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: registries and catalogs can be shared across threads.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<Registry>();
        require_sync::<Registry>();
        require_send::<RuleDescriptor>();
        require_sync::<RuleDescriptor>();
        require_send::<Registries>();
        require_sync::<Registries>();
        require_send::<SignalCatalog>();
        require_sync::<SignalCatalog>();
        require_send::<SignalEntry>();
        require_sync::<SignalEntry>();
        require_send::<AllocationFn>();
        require_sync::<AllocationFn>();

        require_send::<transform::Pipeline>();
        require_send::<operations::PricePredictionFromSignalRegression>();
        require_sync::<operations::PricePredictionFromSignalRegression>();
        require_send::<operations::PositionsFromPricePrediction>();
        require_sync::<operations::PositionsFromPricePrediction>();
    }
}
