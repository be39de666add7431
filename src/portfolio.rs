//! # Portfolio
//!
//! $$
//! \sigma_p^2 = \mathbf{w}^\top \Sigma \mathbf{w}
//! $$
//!
//! Markowitz portfolio construction: annualized statistics, Monte Carlo
//! frontier search, exact minimum-variance optimization and performance
//! attribution.

pub mod engine;
pub mod monte_carlo;
pub mod optimizer;
pub mod performance;
pub mod stats;
pub mod types;

pub use engine::PortfolioEngine;
pub use monte_carlo::MonteCarloConfig;
pub use monte_carlo::run_monte_carlo;
pub use optimizer::minimum_variance;
pub use performance::PerformanceSeries;
pub use performance::cumulative_performance;
pub use stats::PortfolioStats;
pub use stats::ReturnMatrix;
pub use stats::annualized_means;
pub use stats::compute_returns;
pub use stats::covariance_matrix;
pub use types::MonteCarloOutcome;
pub use types::OptimizationResult;
pub use types::SimulatedPortfolio;
pub use types::SolveStatus;
