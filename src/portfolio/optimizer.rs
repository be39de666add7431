//! # Minimum-Variance Optimizer
//!
//! $$
//! \min_{\mathbf{w}}\ \mathbf{w}^\top \Sigma \mathbf{w}
//! \quad \text{s.t.} \quad
//! \mathbf{1}^\top \mathbf{w} = 1 - w_c,\ \mu^\top \mathbf{w} \ge r^\*,\ \mathbf{w} \ge 0
//! $$
//!
//! Exact quadratic program for the target-return minimum-variance portfolio,
//! solved with the Clarabel interior-point solver. The covariance matrix is
//! positive-semidefinite, so any feasible solve is a global optimum.

use clarabel::algebra::CscMatrix;
use clarabel::solver::DefaultSettings;
use clarabel::solver::DefaultSolver;
use clarabel::solver::IPSolver;
use clarabel::solver::SolverStatus;
use clarabel::solver::SupportedConeT;
use tracing::debug;

use super::stats::PortfolioStats;
use super::types::OptimizationResult;
use super::types::SolveStatus;

impl From<SolverStatus> for SolveStatus {
  fn from(status: SolverStatus) -> Self {
    match status {
      SolverStatus::Solved => SolveStatus::Optimal,
      SolverStatus::AlmostSolved => SolveStatus::OptimalInaccurate,
      SolverStatus::PrimalInfeasible | SolverStatus::AlmostPrimalInfeasible => {
        SolveStatus::Infeasible
      }
      _ => SolveStatus::Other,
    }
  }
}

/// Minimize portfolio variance for a whole-portfolio `target_return` with a
/// fixed cash sleeve of `cash_weight`. Returned weights sum to
/// `1 - cash_weight`; on infeasibility the weights are absent and the caller
/// must not treat that as zero risk.
pub fn minimum_variance(
  stats: &PortfolioStats,
  target_return: f64,
  risk_free_rate: f64,
  cash_weight: f64,
) -> OptimizationResult {
  let n = stats.num_assets();
  if n == 0 {
    return OptimizationResult {
      weights: None,
      status: SolveStatus::Infeasible,
    };
  }

  // Entire portfolio in cash: nothing to optimize.
  if cash_weight >= 1.0 {
    return OptimizationResult {
      weights: Some(vec![0.0; n]),
      status: SolveStatus::Optimal,
    };
  }

  let invested = 1.0 - cash_weight;
  // The target is quoted for stocks plus cash; rescale it to the stock
  // sub-portfolio. `invested` is positive here but guard the division anyway.
  let adjusted_target = if invested.abs() < 1e-12 {
    0.0
  } else {
    (target_return - cash_weight * risk_free_rate) / invested
  };

  let p = quadratic_objective(&stats.covariance);
  let q = vec![0.0; n];
  let (a, b) = constraint_rows(&stats.mean_returns, invested, adjusted_target);
  let cones = vec![
    SupportedConeT::ZeroConeT(1),
    SupportedConeT::NonnegativeConeT(n + 1),
  ];

  let settings = DefaultSettings {
    verbose: false,
    ..DefaultSettings::default()
  };
  let mut solver = DefaultSolver::new(&p, &q, &a, &b, &cones, settings);
  solver.solve();

  let status: SolveStatus = solver.solution.status.into();
  debug!(
    %status,
    target_return, cash_weight, "minimum-variance solve finished"
  );

  if status.is_success() {
    OptimizationResult {
      weights: Some(solver.solution.x.clone()),
      status,
    }
  } else {
    OptimizationResult {
      weights: None,
      status,
    }
  }
}

/// Upper-triangular CSC of `2 Sigma`, matching Clarabel's `(1/2) x' P x`
/// objective so the solved objective equals the portfolio variance.
fn quadratic_objective(cov: &[Vec<f64>]) -> CscMatrix<f64> {
  let n = cov.len();
  let mut colptr = Vec::with_capacity(n + 1);
  let mut rowval = Vec::new();
  let mut nzval = Vec::new();

  colptr.push(0);
  for j in 0..n {
    for i in 0..=j {
      rowval.push(i);
      nzval.push(2.0 * cov[i][j]);
    }
    colptr.push(rowval.len());
  }

  CscMatrix::new(n, n, colptr, rowval, nzval)
}

/// Stacked constraint rows in Clarabel's `Ax + s = b` form:
/// row 0 (zero cone) pins `1'w = invested`; row 1 and the identity block
/// (nonnegative cone) encode `mu'w >= target` and `w >= 0`.
fn constraint_rows(mu: &[f64], invested: f64, adjusted_target: f64) -> (CscMatrix<f64>, Vec<f64>) {
  let n = mu.len();
  let mut colptr = Vec::with_capacity(n + 1);
  let mut rowval = Vec::new();
  let mut nzval = Vec::new();

  colptr.push(0);
  for (j, &mu_j) in mu.iter().enumerate() {
    rowval.push(0);
    nzval.push(1.0);
    rowval.push(1);
    nzval.push(-mu_j);
    rowval.push(2 + j);
    nzval.push(-1.0);
    colptr.push(rowval.len());
  }

  let a = CscMatrix::new(n + 2, n, colptr, rowval, nzval);

  let mut b = vec![invested, -adjusted_target];
  b.extend(std::iter::repeat(0.0).take(n));
  (a, b)
}
