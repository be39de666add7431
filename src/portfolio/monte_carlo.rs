//! # Monte Carlo Frontier Search
//!
//! $$
//! w_i = \frac{u_i}{\sum_j u_j}, \qquad u_i \sim \mathcal{U}(0,1)
//! $$
//!
//! Rejection sampling over the (optionally box-constrained) weight simplex to
//! approximate the efficient frontier. Acceptance probability collapses as
//! per-asset bounds tighten, so every run carries a hard attempt budget and
//! returns a partial sample set instead of looping unbounded.

use rand::Rng;
use rand_distr::Uniform;
use tracing::warn;

use crate::config::ATTEMPT_BUDGET_FACTOR;
use crate::config::DEFAULT_RISK_FREE_RATE;
use crate::config::MONTE_CARLO_ITERATIONS;

use super::stats::PortfolioStats;
use super::types::MonteCarloOutcome;
use super::types::SimulatedPortfolio;

/// Configuration of one Monte Carlo run.
#[derive(Clone, Copy, Debug)]
pub struct MonteCarloConfig {
  /// Target count of valid samples.
  pub iterations: usize,
  /// Annualized risk-free rate for Sharpe ratios.
  pub risk_free_rate: f64,
  /// Per-asset lower weight bound.
  pub min_weight: f64,
  /// Per-asset upper weight bound.
  pub max_weight: f64,
}

impl Default for MonteCarloConfig {
  fn default() -> Self {
    Self {
      iterations: MONTE_CARLO_ITERATIONS,
      risk_free_rate: DEFAULT_RISK_FREE_RATE,
      min_weight: 0.0,
      max_weight: 1.0,
    }
  }
}

/// Sample the feasible weight simplex until `config.iterations` valid draws
/// are collected or the attempt budget (`iterations x 200`) is exhausted.
/// A truncated outcome signals that the weight bounds are too tight.
pub fn run_monte_carlo<R: Rng>(
  stats: &PortfolioStats,
  config: &MonteCarloConfig,
  rng: &mut R,
) -> MonteCarloOutcome {
  let n = stats.num_assets();
  if n == 0 || config.iterations == 0 {
    return MonteCarloOutcome::default();
  }

  let uniform = Uniform::new(0.0f64, 1.0);
  let attempt_limit = config.iterations.saturating_mul(ATTEMPT_BUDGET_FACTOR);
  let bounded = config.min_weight > 0.0 || config.max_weight < 1.0;

  let mut outcome = MonteCarloOutcome::default();
  while outcome.portfolios.len() < config.iterations && outcome.attempts < attempt_limit {
    outcome.attempts += 1;

    let mut weights: Vec<f64> = (0..n).map(|_| rng.sample(uniform)).collect();
    let total: f64 = weights.iter().sum();
    if total < 1e-15 {
      continue;
    }
    for w in &mut weights {
      *w /= total;
    }

    if bounded
      && weights
        .iter()
        .any(|&w| w < config.min_weight || w > config.max_weight)
    {
      continue;
    }

    let expected_return = dot(&weights, &stats.mean_returns);
    let variance = quadratic_form(&weights, &stats.covariance);
    let volatility = variance.max(0.0).sqrt();
    // Degenerate covariance leaves the Sharpe ratio undefined; keep the
    // sample but mark it NaN so extractors skip it.
    let sharpe = if volatility > 1e-15 {
      (expected_return - config.risk_free_rate) / volatility
    } else {
      f64::NAN
    };

    outcome.portfolios.push(SimulatedPortfolio {
      expected_return,
      volatility,
      sharpe,
      weights,
    });
  }

  if outcome.portfolios.len() < config.iterations {
    outcome.truncated = true;
    warn!(
      accepted = outcome.portfolios.len(),
      attempts = outcome.attempts,
      min_weight = config.min_weight,
      max_weight = config.max_weight,
      "weight bounds too tight, returning partial sample set"
    );
  }

  outcome
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
  a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

fn quadratic_form(w: &[f64], cov: &[Vec<f64>]) -> f64 {
  let mut acc = 0.0;
  for (i, row) in cov.iter().enumerate() {
    for (j, &c) in row.iter().enumerate() {
      acc += w[i] * c * w[j];
    }
  }
  acc
}
