//! # Performance Attribution
//!
//! $$
//! V_T = \prod_{t \le T} \left(1 + r_{p,t}\right)
//! $$
//!
//! Trailing one-year cumulative growth of a blended stock/cash portfolio
//! against the benchmark index.

use chrono::Duration;
use chrono::NaiveDate;

use crate::config::TRADING_DAYS_PER_YEAR;

use super::stats::ReturnMatrix;

/// Cumulative growth paths over the trailing window, both starting from 1.
#[derive(Clone, Debug)]
pub struct PerformanceSeries {
  pub dates: Vec<NaiveDate>,
  /// Blended stock/cash portfolio growth.
  pub portfolio: Vec<f64>,
  /// Benchmark index growth.
  pub benchmark: Vec<f64>,
}

/// Trailing one-year cumulative performance of `weights` blended with cash.
///
/// `weights` are the stock sub-portfolio weights summing to one; the stock
/// sleeve is scaled by `1 - cash_weight` and the cash sleeve compounds at the
/// daily risk-free rate `(1 + r_f)^{1/252} - 1`. Returns `None` when the
/// window holds no data.
pub fn cumulative_performance(
  returns: &ReturnMatrix,
  weights: &[f64],
  cash_weight: f64,
  risk_free_rate: f64,
) -> Option<PerformanceSeries> {
  let last = *returns.dates.last()?;
  let cutoff = last - Duration::days(365);
  let start = returns.dates.iter().position(|d| *d >= cutoff)?;

  let daily_rf = (1.0 + risk_free_rate).powf(1.0 / TRADING_DAYS_PER_YEAR) - 1.0;
  let invested = (1.0 - cash_weight).clamp(0.0, 1.0);
  let stocks = returns.stock_series();
  let bench = returns.benchmark_series();

  let rows = returns.len();
  let mut dates = Vec::with_capacity(rows - start);
  let mut portfolio = Vec::with_capacity(rows - start);
  let mut benchmark = Vec::with_capacity(rows - start);

  let mut port_level = 1.0;
  let mut bench_level = 1.0;
  for t in start..rows {
    let stock_ret: f64 = weights
      .iter()
      .zip(stocks.iter())
      .map(|(w, series)| w * invested * series[t])
      .sum();

    port_level *= 1.0 + stock_ret + cash_weight * daily_rf;
    bench_level *= 1.0 + bench[t];

    dates.push(returns.dates[t]);
    portfolio.push(port_level);
    benchmark.push(bench_level);
  }

  Some(PerformanceSeries {
    dates,
    portfolio,
    benchmark,
  })
}

#[cfg(test)]
mod tests {
  use super::*;
  use approx::assert_abs_diff_eq;

  fn returns(days: usize, stock: f64, bench: f64) -> ReturnMatrix {
    let first = NaiveDate::from_ymd_opt(2023, 1, 2).unwrap();
    ReturnMatrix {
      dates: (0..days)
        .map(|i| first + Duration::days(i as i64))
        .collect(),
      symbols: vec!["FPT".to_string()],
      benchmark: "VNINDEX".to_string(),
      series: vec![vec![stock; days], vec![bench; days]],
    }
  }

  #[test]
  fn all_cash_portfolio_compounds_at_the_daily_risk_free_rate() {
    let rets = returns(100, 0.01, 0.002);
    let series = cumulative_performance(&rets, &[1.0], 1.0, 0.04).unwrap();

    let daily_rf = (1.0f64 + 0.04).powf(1.0 / 252.0) - 1.0;
    for (i, level) in series.portfolio.iter().enumerate() {
      assert_abs_diff_eq!(*level, (1.0 + daily_rf).powi(i as i32 + 1), epsilon = 1e-12);
    }
  }

  #[test]
  fn all_stock_portfolio_tracks_the_single_asset() {
    let rets = returns(10, 0.01, 0.002);
    let series = cumulative_performance(&rets, &[1.0], 0.0, 0.04).unwrap();

    assert_abs_diff_eq!(series.portfolio[9], 1.01f64.powi(10), epsilon = 1e-12);
    assert_abs_diff_eq!(series.benchmark[9], 1.002f64.powi(10), epsilon = 1e-12);
  }

  #[test]
  fn window_is_restricted_to_the_trailing_year() {
    // Two years of daily rows; only those within 365 days of the last date
    // may appear in the output.
    let rets = returns(730, 0.001, 0.001);
    let series = cumulative_performance(&rets, &[1.0], 0.0, 0.04).unwrap();

    let last = *rets.dates.last().unwrap();
    assert!(series.dates.iter().all(|d| last - *d <= Duration::days(365)));
    assert!(series.dates.len() < rets.dates.len());
  }

  #[test]
  fn empty_history_reports_no_data() {
    let rets = ReturnMatrix {
      dates: Vec::new(),
      symbols: vec!["FPT".to_string()],
      benchmark: "VNINDEX".to_string(),
      series: vec![Vec::new(), Vec::new()],
    };
    assert!(cumulative_performance(&rets, &[1.0], 0.0, 0.04).is_none());
  }
}
