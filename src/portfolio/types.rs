//! # Portfolio Types
//!
//! $$
//! \text{Sharpe} = \frac{\mathbb{E}[R_p] - r_f}{\sigma_p}
//! $$
//!
//! Result containers and solver statuses shared by the allocation engines.

use std::fmt::Display;

/// One Monte Carlo trial over the weight simplex.
#[derive(Clone, Debug)]
pub struct SimulatedPortfolio {
  /// Annualized expected return.
  pub expected_return: f64,
  /// Annualized volatility.
  pub volatility: f64,
  /// Sharpe ratio; NaN when volatility is degenerate.
  pub sharpe: f64,
  /// Stock weights summing to one.
  pub weights: Vec<f64>,
}

/// Full sample set from one Monte Carlo run.
#[derive(Clone, Debug, Default)]
pub struct MonteCarloOutcome {
  /// Accepted samples, in draw order.
  pub portfolios: Vec<SimulatedPortfolio>,
  /// Total draws spent, accepted or rejected.
  pub attempts: usize,
  /// True when the attempt budget ran out before enough valid samples.
  pub truncated: bool,
}

impl MonteCarloOutcome {
  /// Sample with the highest finite Sharpe ratio; earlier draws win ties.
  pub fn max_sharpe(&self) -> Option<&SimulatedPortfolio> {
    self
      .portfolios
      .iter()
      .filter(|p| p.sharpe.is_finite())
      .fold(None, |best, p| match best {
        Some(b) if b.sharpe >= p.sharpe => Some(b),
        _ => Some(p),
      })
  }

  /// Sample with the highest finite expected return; earlier draws win ties.
  pub fn max_return(&self) -> Option<&SimulatedPortfolio> {
    self
      .portfolios
      .iter()
      .filter(|p| p.expected_return.is_finite())
      .fold(None, |best, p| match best {
        Some(b) if b.expected_return >= p.expected_return => Some(b),
        _ => Some(p),
      })
  }

  /// Sample with the lowest finite volatility; earlier draws win ties.
  pub fn min_volatility(&self) -> Option<&SimulatedPortfolio> {
    self
      .portfolios
      .iter()
      .filter(|p| p.volatility.is_finite())
      .fold(None, |best, p| match best {
        Some(b) if b.volatility <= p.volatility => Some(b),
        _ => Some(p),
      })
  }
}

/// Solve status mapped from the QP backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SolveStatus {
  /// Exact solution found.
  Optimal,
  /// Solved to numerical tolerance; treated as success.
  OptimalInaccurate,
  /// No weight vector satisfies the constraints.
  Infeasible,
  /// Any other terminal state (unbounded, iteration cap, numerical error).
  Other,
}

impl SolveStatus {
  /// Whether the returned weights can be used.
  pub fn is_success(&self) -> bool {
    matches!(self, SolveStatus::Optimal | SolveStatus::OptimalInaccurate)
  }
}

impl Display for SolveStatus {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      SolveStatus::Optimal => write!(f, "optimal"),
      SolveStatus::OptimalInaccurate => write!(f, "optimal (inaccurate)"),
      SolveStatus::Infeasible => write!(f, "infeasible"),
      SolveStatus::Other => write!(f, "not solved"),
    }
  }
}

/// Output of one minimum-variance optimization run. Consumed immediately by
/// the caller; `weights` is absent whenever the problem has no solution.
#[derive(Clone, Debug)]
pub struct OptimizationResult {
  /// Stock weights summing to `1 - cash_weight`, if solved.
  pub weights: Option<Vec<f64>>,
  pub status: SolveStatus,
}
