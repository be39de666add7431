//! # Portfolio Engine
//!
//! $$
//! \mathbf{w}^\* = \operatorname{Optimize}(\mu, \Sigma)
//! $$
//!
//! Orchestration facade: data fetch plus statistics, Monte Carlo search,
//! exact optimization and performance attribution behind one handle. Each
//! engine owns the statistics of a single analysis run; the data source is
//! passed in per construction instead of held as ambient state.

use anyhow::Result;
use chrono::NaiveDate;
use rand::Rng;
use tracing::debug;

use crate::market::StockDataSource;
use crate::market::fetch_price_table;
use crate::market::fetch_trailing_history;

use super::monte_carlo::MonteCarloConfig;
use super::monte_carlo::run_monte_carlo;
use super::optimizer::minimum_variance;
use super::performance::PerformanceSeries;
use super::performance::cumulative_performance;
use super::stats::PortfolioStats;
use super::types::MonteCarloOutcome;
use super::types::OptimizationResult;

/// One analysis run over a fixed set of tickers.
#[derive(Clone, Debug)]
pub struct PortfolioEngine {
  stats: PortfolioStats,
}

impl PortfolioEngine {
  /// Wrap precomputed statistics.
  pub fn new(stats: PortfolioStats) -> Self {
    Self { stats }
  }

  /// Fetch aligned history from `source` over `[start, end]` and compute
  /// statistics, failing fast when any required symbol cannot be retrieved.
  pub fn from_source(
    source: &dyn StockDataSource,
    symbols: &[String],
    benchmark: &str,
    start: NaiveDate,
    end: NaiveDate,
  ) -> Result<Self> {
    let table = fetch_price_table(source, symbols, benchmark, start, end)?;
    let stats = PortfolioStats::from_table(&table)?;
    debug!(
      assets = stats.num_assets(),
      rows = stats.returns.len(),
      "portfolio statistics ready"
    );
    Ok(Self::new(stats))
  }

  /// Same as [`PortfolioEngine::from_source`] over a trailing `years` window.
  pub fn from_trailing_history(
    source: &dyn StockDataSource,
    symbols: &[String],
    benchmark: &str,
    years: u32,
  ) -> Result<Self> {
    let table = fetch_trailing_history(source, symbols, benchmark, years)?;
    Ok(Self::new(PortfolioStats::from_table(&table)?))
  }

  /// Borrow the computed statistics.
  pub fn stats(&self) -> &PortfolioStats {
    &self.stats
  }

  /// Monte Carlo frontier search with a thread-local RNG.
  pub fn run_monte_carlo(&self, config: &MonteCarloConfig) -> MonteCarloOutcome {
    run_monte_carlo(&self.stats, config, &mut rand::thread_rng())
  }

  /// Monte Carlo frontier search with a caller-supplied RNG.
  pub fn run_monte_carlo_with_rng<R: Rng>(
    &self,
    config: &MonteCarloConfig,
    rng: &mut R,
  ) -> MonteCarloOutcome {
    run_monte_carlo(&self.stats, config, rng)
  }

  /// Exact minimum-variance weights for a whole-portfolio target return.
  pub fn optimize(
    &self,
    target_return: f64,
    risk_free_rate: f64,
    cash_weight: f64,
  ) -> OptimizationResult {
    minimum_variance(&self.stats, target_return, risk_free_rate, cash_weight)
  }

  /// Trailing one-year growth of the blended portfolio against the benchmark.
  /// `weights` are the stock sub-portfolio weights summing to one.
  pub fn cumulative_performance(
    &self,
    weights: &[f64],
    cash_weight: f64,
    risk_free_rate: f64,
  ) -> Option<PerformanceSeries> {
    cumulative_performance(&self.stats.returns, weights, cash_weight, risk_free_rate)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::market::FixedPriceSource;
  use chrono::Datelike;
  use chrono::Duration;
  use rand::SeedableRng;
  use rand::rngs::StdRng;

  /// Three years of weekday closes with per-day growth `rate`, plus a tiny
  /// alternating perturbation so the covariance matrix stays non-singular.
  fn synthetic_closes(rate: f64, noise: f64) -> Vec<(NaiveDate, f64)> {
    let start = NaiveDate::from_ymd_opt(2021, 1, 4).unwrap();
    let mut out = Vec::new();
    let mut price = 100.0;
    let mut date = start;
    let mut flip = 1.0;
    while out.len() < 756 {
      if date.weekday().num_days_from_monday() < 5 {
        price *= 1.0 + rate + flip * noise;
        flip = -flip;
        out.push((date, price));
      }
      date += Duration::days(1);
    }
    out
  }

  fn engine() -> PortfolioEngine {
    let mut source = FixedPriceSource::new();
    source.insert_closes("AAA", &synthetic_closes(0.001, 5e-5));
    source.insert_closes("BBB", &synthetic_closes(0.0005, 7e-5));
    source.insert_closes("VNINDEX", &synthetic_closes(0.0007, 3e-5));

    let symbols = vec!["AAA".to_string(), "BBB".to_string()];
    PortfolioEngine::from_source(
      &source,
      &symbols,
      "VNINDEX",
      NaiveDate::from_ymd_opt(2021, 1, 1).unwrap(),
      NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
    )
    .unwrap()
  }

  #[test]
  fn end_to_end_statistics_match_the_constructed_drift() {
    let engine = engine();
    let stats = engine.stats();
    assert_eq!(stats.symbols, vec!["AAA", "BBB"]);
    // Mean daily returns were built as 0.001 and 0.0005.
    assert!((stats.mean_returns[0] - 0.001 * 252.0).abs() < 1e-3);
    assert!((stats.mean_returns[1] - 0.0005 * 252.0).abs() < 1e-3);
  }

  #[test]
  fn end_to_end_optimization_between_the_asset_returns_is_feasible() {
    let engine = engine();
    let target = 0.00075 * 252.0;
    let result = engine.optimize(target, 0.04, 0.0);
    assert!(result.status.is_success());

    let w = result.weights.unwrap();
    let sum: f64 = w.iter().sum();
    assert!((sum - 1.0).abs() < 1e-6);
  }

  #[test]
  fn end_to_end_monte_carlo_and_performance() {
    let engine = engine();
    let mut rng = StdRng::seed_from_u64(99);
    let config = MonteCarloConfig {
      iterations: 300,
      ..MonteCarloConfig::default()
    };

    let outcome = engine.run_monte_carlo_with_rng(&config, &mut rng);
    assert_eq!(outcome.portfolios.len(), 300);
    let best = outcome.max_sharpe().unwrap();

    let series = engine
      .cumulative_performance(&best.weights, 0.2, 0.04)
      .unwrap();
    assert_eq!(series.portfolio.len(), series.benchmark.len());
    assert!(series.portfolio.iter().all(|v| v.is_finite()));
  }

  #[test]
  fn missing_symbol_aborts_the_whole_analysis() {
    let mut source = FixedPriceSource::new();
    source.insert_closes("AAA", &synthetic_closes(0.001, 5e-5));
    source.insert_closes("VNINDEX", &synthetic_closes(0.0007, 3e-5));

    let symbols = vec!["AAA".to_string(), "ZZZ".to_string()];
    let result = PortfolioEngine::from_source(
      &source,
      &symbols,
      "VNINDEX",
      NaiveDate::from_ymd_opt(2021, 1, 1).unwrap(),
      NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
    );
    assert!(result.is_err());
  }
}
