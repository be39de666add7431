//! # Goldenkey
//!
//! $$
//! \min_{\mathbf{w}}\ \mathbf{w}^\top \Sigma \mathbf{w}
//! \quad \text{s.t.} \quad
//! \mathbf{1}^\top \mathbf{w} = 1 - w_c,\ \mu^\top \mathbf{w} \ge r^\*,\ \mathbf{w} \ge 0
//! $$
//!
//! Vietnamese-equity portfolio analytics: aligned close-price history,
//! annualized return and covariance statistics, Monte Carlo frontier search
//! and exact minimum-variance optimization with a cash sleeve.

pub mod config;
pub mod indicators;
pub mod market;
pub mod portfolio;
