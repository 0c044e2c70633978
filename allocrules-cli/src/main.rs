//! allocrules CLI — list allocation rules and run them over tables.
//!
//! Commands:
//! - `list` — print the allocation and regression registries
//! - `run` — apply a rule to a CSV file (or a synthetic random walk) and write the result

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use polars::prelude::DataFrame;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use allocrules_core::config::AllocationConfig;
use allocrules_core::data::{read_csv, write_csv};
use allocrules_core::params::Params;
use allocrules_core::registry::{Registries, Registry};
use allocrules_core::synthetic::random_walk;
use allocrules_core::table::allocation;

#[derive(Parser)]
#[command(
    name = "allocrules",
    about = "allocrules CLI — allocation rules and signal regression rules"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List available rules with their default parameters and required series.
    List {
        /// Emit JSON instead of a table.
        #[arg(long, default_value_t = false)]
        json: bool,

        /// Only list the signal regression rules.
        #[arg(long, default_value_t = false, conflicts_with = "allocation_only")]
        regression: bool,

        /// Only list the static allocation rules.
        #[arg(long = "allocation", default_value_t = false)]
        allocation_only: bool,
    },
    /// Apply a rule to a table and write the table with its allocation column.
    Run {
        /// Rule name (e.g. high_low_difference, rsi_regression). Overrides the config file.
        #[arg(long)]
        rule: Option<String>,

        /// Path to a TOML config file.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Input CSV with a header row.
        #[arg(long, conflicts_with = "synthetic")]
        input: Option<PathBuf>,

        /// Generate a synthetic random walk with this many rows instead of reading input.
        #[arg(long)]
        synthetic: Option<usize>,

        /// Seed for --synthetic.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Parameter override, repeatable (e.g. --param scale=2.0).
        #[arg(long = "param", value_parser = parse_param)]
        params: Vec<(String, f64)>,

        /// Output CSV. Without it, a summary is printed.
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn parse_param(s: &str) -> Result<(String, f64), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{s}'"))?;
    let value: f64 = value
        .trim()
        .parse()
        .map_err(|e| format!("invalid value for '{name}': {e}"))?;
    Ok((name.trim().to_string(), value))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::List {
            json,
            regression,
            allocation_only,
        } => run_list(json, regression, allocation_only),
        Commands::Run {
            rule,
            config,
            input,
            synthetic,
            seed,
            params,
            output,
        } => run_rule(rule, config, input, synthetic, seed, params, output),
    }
}

fn run_list(json: bool, regression_only: bool, allocation_only: bool) -> Result<()> {
    let registries = Registries::standard()?;
    let registry: Registry = if regression_only {
        registries.regression.clone()
    } else if allocation_only {
        registries.allocation.clone()
    } else {
        registries.all()?
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&registry.summaries())?);
        return Ok(());
    }

    for summary in registry.summaries() {
        let params: Vec<String> = summary
            .parameters
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect();
        println!(
            "{:<32} params: [{}]  series: [{}]",
            summary.name,
            params.join(", "),
            summary.series.join(", ")
        );
    }
    Ok(())
}

fn run_rule(
    rule: Option<String>,
    config_path: Option<PathBuf>,
    input: Option<PathBuf>,
    synthetic: Option<usize>,
    seed: u64,
    params: Vec<(String, f64)>,
    output: Option<PathBuf>,
) -> Result<()> {
    let mut config = match (&config_path, rule) {
        (Some(path), rule) => {
            let mut loaded = AllocationConfig::load(path)?;
            if let Some(rule) = rule {
                loaded.rule = rule;
            }
            loaded
        }
        (None, Some(rule)) => AllocationConfig::new(rule),
        (None, None) => bail!("--rule or --config is required"),
    };
    config.params.extend(params);

    let registries = Registries::with_settings(config.regression.clone())?;
    let descriptor = registries.get(&config.rule)?;

    let mut table = match (input, synthetic) {
        (Some(path), _) => read_csv(&path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        (None, Some(rows)) => {
            let start = NaiveDate::from_ymd_opt(2020, 1, 2).context("invalid start date")?;
            random_walk(rows, seed, start)?
        }
        (None, None) => bail!("--input or --synthetic is required"),
    };

    tracing::info!(
        rule = %descriptor.name,
        rows = table.height(),
        params = ?config.params,
        "running rule"
    );
    descriptor
        .invoke(&mut table, &config.params)
        .with_context(|| format!("rule '{}' failed", descriptor.name))?;

    match output {
        Some(path) => {
            write_csv(&mut table, &path)?;
            println!("Wrote {} rows to {}", table.height(), path.display());
        }
        None => print_summary(&descriptor.name, &config.params, &table)?,
    }
    Ok(())
}

fn print_summary(
    name: &str,
    params: &Params,
    table: &DataFrame,
) -> Result<()> {
    let alloc = allocation(table)?;
    let n = alloc.len().max(1) as f64;
    let mean = alloc.iter().sum::<f64>() / n;
    let long = alloc.iter().filter(|a| **a > 0.0).count();

    println!("Rule:        {name}");
    println!("Params:      {params:?}");
    println!("Rows:        {}", alloc.len());
    println!("Mean alloc:  {mean:.4}");
    println!("Long rows:   {long}");
    println!("{}", table.tail(Some(5)));
    Ok(())
}
