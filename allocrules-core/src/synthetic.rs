//! Synthetic price tables for demos, tests, and benchmarks.
//!
//! A seeded random walk from 100.0 with daily returns in [-3%, 3%), plus high
//! and low around each price. The same seed always produces the same table.

use chrono::{Duration, NaiveDate};
use polars::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::columns::ColumnName;

/// Generate `rows` daily observations starting at `start` with columns
/// `date`, `price`, `high`, `low`.
pub fn random_walk(rows: usize, seed: u64, start: NaiveDate) -> PolarsResult<DataFrame> {
    let mut rng = StdRng::seed_from_u64(seed);

    let mut dates = Vec::with_capacity(rows);
    let mut prices = Vec::with_capacity(rows);
    let mut highs = Vec::with_capacity(rows);
    let mut lows = Vec::with_capacity(rows);

    let mut price = 100.0_f64;
    for i in 0..rows {
        if i > 0 {
            let daily_return: f64 = rng.gen_range(-0.03..0.03);
            price *= 1.0 + daily_return;
        }
        let high = price * (1.0 + rng.gen_range(0.0..0.01));
        let low = price * (1.0 - rng.gen_range(0.0..0.01));

        dates.push((start + Duration::days(i as i64)).format("%Y-%m-%d").to_string());
        prices.push(price);
        highs.push(high);
        lows.push(low);
    }

    DataFrame::new(vec![
        Column::new("date".into(), dates),
        Column::new(ColumnName::Price.as_str().into(), prices),
        Column::new(ColumnName::High.as_str().into(), highs),
        Column::new(ColumnName::Low.as_str().into(), lows),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::read_f64;

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()
    }

    #[test]
    fn shape_and_bounds() {
        let df = random_walk(50, 7, start()).unwrap();
        assert_eq!(df.height(), 50);
        let price = read_f64(&df, "price").unwrap();
        let high = read_f64(&df, "high").unwrap();
        let low = read_f64(&df, "low").unwrap();
        assert_eq!(price[0], 100.0);
        for i in 0..50 {
            assert!(low[i] <= price[i] && price[i] <= high[i]);
        }
    }

    #[test]
    fn deterministic_per_seed() {
        let a = random_walk(20, 42, start()).unwrap();
        let b = random_walk(20, 42, start()).unwrap();
        let c = random_walk(20, 43, start()).unwrap();
        assert!(a.equals(&b));
        assert!(!a.equals(&c));
    }

    #[test]
    fn dates_are_consecutive() {
        let df = random_walk(3, 1, start()).unwrap();
        let dates = df.column("date").unwrap().str().unwrap();
        assert_eq!(dates.get(0), Some("2024-01-02"));
        assert_eq!(dates.get(2), Some("2024-01-04"));
    }
}
