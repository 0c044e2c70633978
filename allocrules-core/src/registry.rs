//! Rule registries — rule name → descriptor bundle.
//!
//! - `RuleId`: the built-in allocation rules as a tagged enum.
//! - `RuleDescriptor`: function, default parameters, required series, doc links.
//! - `Registry`: name-keyed, ordered, insert-only collection of descriptors.
//! - `allocation_rules`: the static allocation registry.
//! - `Registries`: the allocation registry, the signal catalog, and the
//!   regression registry built from that catalog, constructed in that order.
//!
//! Registries are plain values: build them once and share them read-only.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};

use crate::params::{merge_params, params, Params};
use crate::regression_rules::{RegressionRuleBuilder, RegressionSettings};
use crate::rules::{
    buy_and_hold, constant_allocation_size, fifty_fifty, high_low_difference,
    sma_crossover_strategy, AllocationFn, RuleError,
};
use crate::signals::SignalCatalog;

const PERMALINK_BASE: &str =
    "https://github.com/ta-oliver/infertrade/blob/5aa01970fc4277774bd14f0823043b4657e3a57f/infertrade/algos/community/allocations.py";

// ─── Errors ──────────────────────────────────────────────────────────

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("Duplicate rule name: {0}")]
    DuplicateRule(String),
}

// ─── RuleId ──────────────────────────────────────────────────────────

/// The built-in allocation rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleId {
    FiftyFifty,
    BuyAndHold,
    ConstantAllocationSize,
    HighLowDifference,
    SmaCrossoverStrategy,
}

impl RuleId {
    pub const ALL: [RuleId; 5] = [
        RuleId::FiftyFifty,
        RuleId::BuyAndHold,
        RuleId::ConstantAllocationSize,
        RuleId::HighLowDifference,
        RuleId::SmaCrossoverStrategy,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            RuleId::FiftyFifty => "fifty_fifty",
            RuleId::BuyAndHold => "buy_and_hold",
            RuleId::ConstantAllocationSize => "constant_allocation_size",
            RuleId::HighLowDifference => "high_low_difference",
            RuleId::SmaCrossoverStrategy => "sma_crossover_strategy",
        }
    }

    pub fn function(self) -> AllocationFn {
        match self {
            RuleId::FiftyFifty => Arc::new(fifty_fifty),
            RuleId::BuyAndHold => Arc::new(buy_and_hold),
            RuleId::ConstantAllocationSize => Arc::new(constant_allocation_size),
            RuleId::HighLowDifference => Arc::new(high_low_difference),
            RuleId::SmaCrossoverStrategy => Arc::new(sma_crossover_strategy),
        }
    }

    pub fn default_parameters(self) -> Params {
        match self {
            RuleId::FiftyFifty | RuleId::BuyAndHold => Params::new(),
            RuleId::ConstantAllocationSize => params(&[("fixed_allocation_size", 1.0)]),
            RuleId::HighLowDifference => params(&[("scale", 1.0), ("constant", 0.0)]),
            RuleId::SmaCrossoverStrategy => params(&[("fast", 0.0), ("slow", 0.0)]),
        }
    }

    pub fn series(self) -> &'static [&'static str] {
        match self {
            RuleId::FiftyFifty | RuleId::BuyAndHold | RuleId::ConstantAllocationSize => &[],
            RuleId::HighLowDifference => &["high", "low"],
            RuleId::SmaCrossoverStrategy => &["price"],
        }
    }

    fn permalink(self) -> String {
        match self {
            RuleId::FiftyFifty => format!("{PERMALINK_BASE}#L28"),
            RuleId::BuyAndHold => format!("{PERMALINK_BASE}#L34"),
            RuleId::ConstantAllocationSize => format!("{PERMALINK_BASE}#L46"),
            RuleId::HighLowDifference => format!("{PERMALINK_BASE}#L57"),
            RuleId::SmaCrossoverStrategy => String::new(),
        }
    }

    pub fn descriptor(self) -> RuleDescriptor {
        RuleDescriptor {
            name: self.as_str().to_string(),
            function: self.function(),
            parameters: self.default_parameters(),
            series: self.series().iter().map(|s| s.to_string()).collect(),
            available_representation_types: RepresentationTypes {
                github_permalink: self.permalink(),
            },
        }
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RuleId {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Older exports keyed the crossover rule in camel case.
        if s == "smaCrossoverStrategy" {
            return Ok(RuleId::SmaCrossoverStrategy);
        }
        RuleId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| RuleError::UnknownRule(s.to_string()))
    }
}

// ─── RuleDescriptor ──────────────────────────────────────────────────

/// Documentation-only metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepresentationTypes {
    pub github_permalink: String,
}

/// Everything a caller needs to select, parametrize, and run a rule.
#[derive(Clone)]
pub struct RuleDescriptor {
    pub name: String,
    pub function: AllocationFn,
    pub parameters: Params,
    pub series: Vec<String>,
    pub available_representation_types: RepresentationTypes,
}

impl RuleDescriptor {
    /// Run the rule on `table` with `overrides` applied over the default parameters.
    pub fn invoke(&self, table: &mut DataFrame, overrides: &Params) -> Result<(), RuleError> {
        let params = merge_params(&self.name, &self.parameters, overrides)?;
        (self.function)(table, &params)
    }

    pub fn summary(&self) -> RuleSummary {
        RuleSummary {
            name: self.name.clone(),
            parameters: self.parameters.clone(),
            series: self.series.clone(),
            available_representation_types: self.available_representation_types.clone(),
        }
    }
}

impl fmt::Debug for RuleDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleDescriptor")
            .field("name", &self.name)
            .field("parameters", &self.parameters)
            .field("series", &self.series)
            .field(
                "available_representation_types",
                &self.available_representation_types,
            )
            .finish_non_exhaustive()
    }
}

/// Serializable view of a descriptor (everything except the function).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleSummary {
    pub name: String,
    pub parameters: Params,
    pub series: Vec<String>,
    pub available_representation_types: RepresentationTypes,
}

// ─── Registry ────────────────────────────────────────────────────────

/// Name-keyed rule descriptors, iterated in name order.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    rules: BTreeMap<String, RuleDescriptor>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a descriptor; a name already present is rejected.
    pub fn insert(&mut self, descriptor: RuleDescriptor) -> Result<(), RegistryError> {
        if self.rules.contains_key(&descriptor.name) {
            return Err(RegistryError::DuplicateRule(descriptor.name));
        }
        self.rules.insert(descriptor.name.clone(), descriptor);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Result<&RuleDescriptor, RuleError> {
        self.rules
            .get(name)
            .ok_or_else(|| RuleError::UnknownRule(name.to_string()))
    }

    pub fn names(&self) -> Vec<&str> {
        self.rules.keys().map(|k| k.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RuleDescriptor> {
        self.rules.values()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn summaries(&self) -> Vec<RuleSummary> {
        self.iter().map(RuleDescriptor::summary).collect()
    }

    /// Union of two registries; any shared name is an error.
    pub fn merged(&self, other: &Registry) -> Result<Registry, RegistryError> {
        let mut merged = self.clone();
        for descriptor in other.iter() {
            merged.insert(descriptor.clone())?;
        }
        Ok(merged)
    }
}

/// The static allocation rule registry.
pub fn allocation_rules() -> Registry {
    let rules = RuleId::ALL
        .into_iter()
        .map(|id| (id.as_str().to_string(), id.descriptor()))
        .collect();
    Registry { rules }
}

// ─── Registries ──────────────────────────────────────────────────────

/// Every registry the crate exposes, built together.
#[derive(Debug, Clone)]
pub struct Registries {
    pub allocation: Registry,
    pub signals: Arc<SignalCatalog>,
    pub regression: Registry,
}

impl Registries {
    /// Built-in rules, the technical signal catalog, and default regression stages.
    pub fn standard() -> Result<Self, RegistryError> {
        Self::with_settings(RegressionSettings::default())
    }

    pub fn with_settings(settings: RegressionSettings) -> Result<Self, RegistryError> {
        let allocation = allocation_rules();
        let signals = Arc::new(SignalCatalog::technical());
        let regression = RegressionRuleBuilder::new(Arc::clone(&signals))
            .with_settings(settings)
            .build()?;
        tracing::debug!(
            allocation_rules = allocation.len(),
            signals = signals.len(),
            regression_rules = regression.len(),
            "registries built"
        );
        Ok(Self {
            allocation,
            signals,
            regression,
        })
    }

    /// Look a rule up by name, allocation rules first. Accepts `RuleId` aliases.
    pub fn get(&self, name: &str) -> Result<&RuleDescriptor, RuleError> {
        if let Ok(descriptor) = self.allocation.get(name) {
            return Ok(descriptor);
        }
        if let Ok(id) = name.parse::<RuleId>() {
            return self.allocation.get(id.as_str());
        }
        self.regression.get(name)
    }

    /// Both rule registries as one.
    pub fn all(&self) -> Result<Registry, RegistryError> {
        self.allocation.merged(&self.regression)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::allocation;
    use polars::prelude::*;

    fn market() -> DataFrame {
        df!(
            "price" => &[100.0, 101.0, 102.5, 101.0, 103.0],
            "high" => &[101.0, 102.0, 103.0, 102.0, 104.0],
            "low" => &[99.0, 100.0, 101.0, 100.5, 102.0],
        )
        .unwrap()
    }

    #[test]
    fn static_registry_has_five_rules() {
        let registry = allocation_rules();
        assert_eq!(
            registry.names(),
            vec![
                "buy_and_hold",
                "constant_allocation_size",
                "fifty_fifty",
                "high_low_difference",
                "sma_crossover_strategy",
            ]
        );
    }

    #[test]
    fn descriptor_fields() {
        let registry = allocation_rules();
        let hld = registry.get("high_low_difference").unwrap();
        assert_eq!(hld.parameters, params(&[("scale", 1.0), ("constant", 0.0)]));
        assert_eq!(hld.series, vec!["high", "low"]);
        assert!(hld
            .available_representation_types
            .github_permalink
            .ends_with("#L57"));

        let ff = registry.get("fifty_fifty").unwrap();
        assert!(ff.parameters.is_empty());
        assert!(ff.series.is_empty());
    }

    #[test]
    fn every_rule_runs_with_its_defaults() {
        for descriptor in allocation_rules().iter() {
            let mut df = market();
            descriptor.invoke(&mut df, &Params::new()).unwrap();
            let alloc = allocation(&df).unwrap();
            assert_eq!(alloc.len(), 5, "{}", descriptor.name);
        }
    }

    #[test]
    fn invoke_applies_overrides() {
        let registry = allocation_rules();
        let mut df = df!("high" => &[2.0, 4.0], "low" => &[1.0, 1.0]).unwrap();
        registry
            .get("high_low_difference")
            .unwrap()
            .invoke(&mut df, &params(&[("scale", 2.0), ("constant", 1.0)]))
            .unwrap();
        assert_eq!(allocation(&df).unwrap(), vec![3.0, 7.0]);
    }

    #[test]
    fn invoke_rejects_undeclared_parameter() {
        let registry = allocation_rules();
        let mut df = market();
        let err = registry
            .get("fifty_fifty")
            .unwrap()
            .invoke(&mut df, &params(&[("scale", 2.0)]))
            .unwrap_err();
        assert!(matches!(err, RuleError::UnknownParameter { .. }));
    }

    #[test]
    fn unknown_rule_lookup() {
        let err = allocation_rules().get("martingale").unwrap_err();
        assert!(matches!(err, RuleError::UnknownRule(ref n) if n == "martingale"));
    }

    #[test]
    fn rule_id_round_trips_through_str() {
        for id in RuleId::ALL {
            assert_eq!(id.as_str().parse::<RuleId>().unwrap(), id);
        }
        assert_eq!(
            "smaCrossoverStrategy".parse::<RuleId>().unwrap(),
            RuleId::SmaCrossoverStrategy
        );
        assert!("nope".parse::<RuleId>().is_err());
    }

    #[test]
    fn insert_rejects_duplicates() {
        let mut registry = allocation_rules();
        let err = registry.insert(RuleId::BuyAndHold.descriptor()).unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateRule(ref n) if n == "buy_and_hold"));
        assert_eq!(registry.len(), 5);
    }

    #[test]
    fn merged_rejects_overlap() {
        let registry = allocation_rules();
        assert!(registry.merged(&registry).is_err());
        assert_eq!(registry.merged(&Registry::new()).unwrap().len(), 5);
    }

    #[test]
    fn standard_registries() {
        let registries = Registries::standard().unwrap();
        assert_eq!(registries.allocation.len(), 5);
        assert_eq!(registries.regression.len(), registries.signals.len());
        assert!(registries.get("rsi_regression").is_ok());
        assert!(registries.get("smaCrossoverStrategy").is_ok());
        assert_eq!(registries.all().unwrap().len(), 5 + registries.signals.len());
    }

    #[test]
    fn summary_serializes() {
        let summary = RuleId::ConstantAllocationSize.descriptor().summary();
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["name"], "constant_allocation_size");
        assert_eq!(json["parameters"]["fixed_allocation_size"], 1.0);
    }
}
