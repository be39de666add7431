//! # Portfolio Statistics
//!
//! $$
//! r_t = \frac{p_t - p_{t-1}}{p_{t-1}}, \qquad
//! \Sigma = 252\,\widehat{\mathrm{Cov}}(r)
//! $$
//!
//! Converts aligned close prices into daily simple returns, annualized mean
//! returns and an annualized sample covariance matrix over the stock columns
//! (benchmark excluded). Deterministic given identical input.

use anyhow::Result;
use anyhow::bail;
use chrono::NaiveDate;

use crate::config::TRADING_DAYS_PER_YEAR;
use crate::market::PriceTable;

/// Daily simple returns per aligned series.
#[derive(Clone, Debug)]
pub struct ReturnMatrix {
  /// Date of each return row; the undefined leading price row is dropped.
  pub dates: Vec<NaiveDate>,
  /// Stock tickers, benchmark excluded.
  pub symbols: Vec<String>,
  /// Benchmark index symbol.
  pub benchmark: String,
  /// One return series per stock, benchmark series last; every series has
  /// `dates.len()` entries.
  pub series: Vec<Vec<f64>>,
}

impl ReturnMatrix {
  /// Number of return rows.
  pub fn len(&self) -> usize {
    self.dates.len()
  }

  pub fn is_empty(&self) -> bool {
    self.dates.is_empty()
  }

  /// Return series of the stock columns only.
  pub fn stock_series(&self) -> &[Vec<f64>] {
    &self.series[..self.symbols.len()]
  }

  /// Return series of the benchmark column.
  pub fn benchmark_series(&self) -> &[f64] {
    self.series.last().map(Vec::as_slice).unwrap_or(&[])
  }
}

/// Daily percentage change per column. With fewer than 2 aligned price rows
/// the result is empty and downstream consumers must treat the run as
/// infeasible rather than compute on it.
pub fn compute_returns(table: &PriceTable) -> ReturnMatrix {
  let rows = table.dates.len();
  if rows < 2 {
    return ReturnMatrix {
      dates: Vec::new(),
      symbols: table.symbols.clone(),
      benchmark: table.benchmark.clone(),
      series: vec![Vec::new(); table.closes.len()],
    };
  }

  let series = table
    .closes
    .iter()
    .map(|closes| {
      (1..rows)
        .map(|t| (closes[t] - closes[t - 1]) / closes[t - 1])
        .collect()
    })
    .collect();

  ReturnMatrix {
    dates: table.dates[1..].to_vec(),
    symbols: table.symbols.clone(),
    benchmark: table.benchmark.clone(),
    series,
  }
}

/// Sample covariance of the stock columns, annualized by 252.
pub fn covariance_matrix(returns: &ReturnMatrix) -> Vec<Vec<f64>> {
  let stocks = returns.stock_series();
  let n = stocks.len();
  let rows = returns.len();
  let mut cov = vec![vec![0.0; n]; n];
  if rows < 2 {
    return cov;
  }

  let means: Vec<f64> = stocks.iter().map(|s| sample_mean(s)).collect();
  for i in 0..n {
    for j in i..n {
      let mut acc = 0.0;
      for t in 0..rows {
        acc += (stocks[i][t] - means[i]) * (stocks[j][t] - means[j]);
      }
      let c = acc / (rows - 1) as f64 * TRADING_DAYS_PER_YEAR;
      cov[i][j] = c;
      cov[j][i] = c;
    }
  }

  cov
}

/// Mean daily return per stock column, annualized by 252.
pub fn annualized_means(returns: &ReturnMatrix) -> Vec<f64> {
  returns
    .stock_series()
    .iter()
    .map(|s| sample_mean(s) * TRADING_DAYS_PER_YEAR)
    .collect()
}

/// Annualized statistics bundle consumed by the allocation engines.
#[derive(Clone, Debug)]
pub struct PortfolioStats {
  /// Stock tickers, benchmark excluded.
  pub symbols: Vec<String>,
  /// Daily return history, benchmark included as the last series.
  pub returns: ReturnMatrix,
  /// Annualized mean return per stock.
  pub mean_returns: Vec<f64>,
  /// Annualized covariance matrix over the stocks.
  pub covariance: Vec<Vec<f64>>,
}

impl PortfolioStats {
  /// Build statistics from an aligned price table.
  ///
  /// Fails with an explicit insufficient-data error when fewer than 2 return
  /// rows exist, so no downstream routine divides by an empty window.
  pub fn from_table(table: &PriceTable) -> Result<Self> {
    let returns = compute_returns(table);
    if returns.len() < 2 {
      bail!(
        "insufficient overlapping price history: {} aligned rows",
        table.dates.len()
      );
    }

    let mean_returns = annualized_means(&returns);
    let covariance = covariance_matrix(&returns);

    Ok(Self {
      symbols: table.symbols.clone(),
      returns,
      mean_returns,
      covariance,
    })
  }

  /// Number of stock columns.
  pub fn num_assets(&self) -> usize {
    self.symbols.len()
  }
}

fn sample_mean(xs: &[f64]) -> f64 {
  if xs.is_empty() {
    0.0
  } else {
    xs.iter().sum::<f64>() / xs.len() as f64
  }
}
