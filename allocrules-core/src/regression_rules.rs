//! Allocation rules derived from signals by regression.
//!
//! For every catalog signal, `create_allocation_function` builds an allocation
//! function running a three-stage pipeline:
//!
//! 1. `ta_adaptor` — compute the signal into the `signal` column
//! 2. `PricePredictionFromSignalRegression` — regress next-period price changes
//!    on the signal, writing `forecast_price_change`
//! 3. `PositionsFromPricePrediction` — size the allocation from the forecast
//!
//! `ta_rules_with_regression` collects one such rule per signal, named
//! `<function_names>_regression`, into a `Registry`.

use std::sync::Arc;

use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};

use crate::columns::ColumnName;
use crate::operations::{PositionsFromPricePrediction, PricePredictionFromSignalRegression};
use crate::params::Params;
use crate::registry::{Registry, RegistryError, RepresentationTypes, RuleDescriptor};
use crate::rules::{AllocationFn, RuleError};
use crate::signals::{ta_adaptor, SignalCatalog, SignalId};
use crate::transform::Pipeline;

/// Appended to a signal's rule name to form its regression rule name.
pub const REGRESSION_SUFFIX: &str = "_regression";

const REGRESSION_PERMALINK: &str =
    "https://github.com/ta-oliver/infertrade/blob/f571d052d9261b7dedfcd23b72d925e75837ee9c/infertrade/algos/community/allocations.py#L282";

/// Settings for the regression and sizing stages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegressionSettings {
    /// Price column the regression target is computed from.
    pub price_column: String,
    pub sizing: PositionsFromPricePrediction,
}

impl Default for RegressionSettings {
    fn default() -> Self {
        Self {
            price_column: ColumnName::Price.as_str().to_string(),
            sizing: PositionsFromPricePrediction::default(),
        }
    }
}

/// Build the allocation function for catalog signal `raw_signal`, tagged `signal_name`.
///
/// The catalog lookup happens on every call, so an id missing from the catalog
/// surfaces as `RuleError::UnknownSignal` when the function runs. Parameters
/// passed at call time go to the signal computation.
pub fn create_allocation_function(
    signal_name: impl Into<String>,
    raw_signal: SignalId,
    catalog: Arc<SignalCatalog>,
    settings: RegressionSettings,
) -> AllocationFn {
    let signal_name = signal_name.into();
    Arc::new(move |table: &mut DataFrame, params: &Params| -> Result<(), RuleError> {
        let class = Arc::clone(&catalog.get(&raw_signal)?.class);
        let adapted = ta_adaptor(class, signal_name.clone(), params.clone())
            .with_price_column(settings.price_column.clone());

        let mut pipeline = Pipeline::new()
            .stage(adapted)
            .stage(PricePredictionFromSignalRegression::for_market(
                settings.price_column.clone(),
            ))
            .stage(settings.sizing);

        tracing::debug!(signal = %signal_name, rows = table.height(), "running regression rule");
        pipeline.fit_transform(table)
    })
}

/// Builds a regression rule registry from a signal catalog.
#[derive(Debug, Clone)]
pub struct RegressionRuleBuilder {
    catalog: Arc<SignalCatalog>,
    settings: RegressionSettings,
}

impl RegressionRuleBuilder {
    pub fn new(catalog: Arc<SignalCatalog>) -> Self {
        Self {
            catalog,
            settings: RegressionSettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: RegressionSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_price_column(mut self, price_column: impl Into<String>) -> Self {
        self.settings.price_column = price_column.into();
        self
    }

    pub fn with_sizing(mut self, sizing: PositionsFromPricePrediction) -> Self {
        self.settings.sizing = sizing;
        self
    }

    /// One rule per catalog entry. Two entries exporting the same rule name
    /// fail with `DuplicateRule`.
    pub fn build(&self) -> Result<Registry, RegistryError> {
        let mut registry = Registry::new();
        for (id, entry) in self.catalog.iter() {
            let name = format!("{}{REGRESSION_SUFFIX}", entry.function_names);
            tracing::debug!(signal = %id, rule = %name, "registering regression rule");
            registry.insert(RuleDescriptor {
                name,
                function: create_allocation_function(
                    entry.function_names.clone(),
                    id.clone(),
                    Arc::clone(&self.catalog),
                    self.settings.clone(),
                ),
                parameters: entry.parameters.clone(),
                series: rule_series(&entry.series, &self.settings.price_column),
                available_representation_types: RepresentationTypes {
                    github_permalink: REGRESSION_PERMALINK.to_string(),
                },
            })?;
        }
        Ok(registry)
    }
}

/// Columns a regression rule reads: the signal's series with `price` moved to
/// `price_column`, plus `price_column` itself for the regression target.
fn rule_series(signal_series: &[String], price_column: &str) -> Vec<String> {
    let price = ColumnName::Price.as_str();
    if price_column == price {
        return signal_series.to_vec();
    }
    let mut series: Vec<String> = signal_series
        .iter()
        .map(|s| if s == price { price_column.to_string() } else { s.clone() })
        .collect();
    if !series.iter().any(|s| s == price_column) {
        series.push(price_column.to_string());
    }
    series
}

/// Regression rules for every signal in `catalog`, with default stages.
pub fn ta_rules_with_regression(catalog: &Arc<SignalCatalog>) -> Result<Registry, RegistryError> {
    RegressionRuleBuilder::new(Arc::clone(catalog)).build()
}
