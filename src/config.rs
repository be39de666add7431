//! # Config
//!
//! Application-level defaults shared by the engines and the demo binary.

/// Default tickers offered by the portfolio tools.
pub const DEFAULT_STOCK_SYMBOLS: [&str; 5] = ["FPT", "HPG", "ACB", "VCB", "MWG"];

/// Benchmark index used for performance comparison.
pub const DEFAULT_BENCHMARK: &str = "VNINDEX";

/// Default number of valid Monte Carlo samples per run.
pub const MONTE_CARLO_ITERATIONS: usize = 10_000;

/// Default annualized risk-free rate.
pub const DEFAULT_RISK_FREE_RATE: f64 = 0.04;

/// Default trailing price-history window in years.
pub const DEFAULT_HISTORY_YEARS: u32 = 3;

/// Approximate trading days per year used to annualize daily statistics.
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Rejection-sampling attempt budget per requested Monte Carlo sample.
/// Bounds worst-case runtime when per-asset weight bounds are tight.
pub const ATTEMPT_BUDGET_FACTOR: usize = 200;
