//! # Price Table
//!
//! $$
//! \mathcal{T} = \bigcap_i \mathcal{T}_i
//! $$
//!
//! Inner-joined close-price table over a set of stocks plus one benchmark.

use std::collections::BTreeMap;

use anyhow::Context;
use anyhow::Result;
use anyhow::bail;
use chrono::Duration;
use chrono::NaiveDate;
use chrono::Utc;
use tracing::debug;

use super::source::StockDataSource;

/// Aligned daily close prices. Immutable once fetched for a session.
#[derive(Clone, Debug)]
pub struct PriceTable {
  /// Trading dates common to every symbol, ascending.
  pub dates: Vec<NaiveDate>,
  /// Stock tickers, benchmark excluded.
  pub symbols: Vec<String>,
  /// Benchmark index symbol.
  pub benchmark: String,
  /// One close series per stock, benchmark series last.
  pub closes: Vec<Vec<f64>>,
}

impl PriceTable {
  /// Number of aligned rows.
  pub fn len(&self) -> usize {
    self.dates.len()
  }

  pub fn is_empty(&self) -> bool {
    self.dates.is_empty()
  }

  /// Close series for the benchmark column.
  pub fn benchmark_closes(&self) -> &[f64] {
    self.closes.last().map(Vec::as_slice).unwrap_or(&[])
  }
}

/// Fetch and align close prices for `symbols` plus `benchmark` over
/// `[start, end]`. Rows where any symbol lacks a finite close are dropped.
/// Fails fast when any required symbol cannot be retrieved.
pub fn fetch_price_table(
  source: &dyn StockDataSource,
  symbols: &[String],
  benchmark: &str,
  start: NaiveDate,
  end: NaiveDate,
) -> Result<PriceTable> {
  let mut names: Vec<String> = symbols.iter().map(|s| s.trim().to_uppercase()).collect();
  names.push(benchmark.trim().to_uppercase());

  let mut per_symbol: Vec<BTreeMap<NaiveDate, f64>> = Vec::with_capacity(names.len());
  for name in &names {
    let candles = source
      .quote_history(name, start, end)
      .with_context(|| format!("cannot fetch price history for {name}"))?;

    let closes: BTreeMap<NaiveDate, f64> = candles
      .iter()
      .filter(|c| c.close.is_finite())
      .map(|c| (c.time, c.close))
      .collect();

    if closes.is_empty() {
      bail!("no usable price history for {name}");
    }
    per_symbol.push(closes);
  }

  // Inner join on the trading calendar: keep dates present in every series.
  let dates: Vec<NaiveDate> = per_symbol[0]
    .keys()
    .filter(|d| per_symbol[1..].iter().all(|m| m.contains_key(d)))
    .copied()
    .collect();

  debug!(
    rows = dates.len(),
    columns = names.len(),
    "aligned close-price table"
  );

  let closes: Vec<Vec<f64>> = per_symbol
    .iter()
    .map(|m| dates.iter().map(|d| m[d]).collect())
    .collect();

  let benchmark = names.pop().unwrap_or_default();
  Ok(PriceTable {
    dates,
    symbols: names,
    benchmark,
    closes,
  })
}

/// Trailing window ending today, mirroring a `years`-year history slider.
pub fn fetch_trailing_history(
  source: &dyn StockDataSource,
  symbols: &[String],
  benchmark: &str,
  years: u32,
) -> Result<PriceTable> {
  let end = Utc::now().date_naive();
  let start = end - Duration::days((years as f64 * 365.25) as i64);
  fetch_price_table(source, symbols, benchmark, start, end)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::market::source::FixedPriceSource;

  fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
  }

  fn symbols(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
  }

  #[test]
  fn alignment_drops_rows_missing_from_any_symbol() {
    let mut source = FixedPriceSource::new();
    source.insert_closes("FPT", &[(day(1), 100.0), (day(4), 101.0), (day(5), 102.0)]);
    source.insert_closes("HPG", &[(day(1), 25.0), (day(5), 26.0)]);
    source.insert_closes("VNINDEX", &[(day(1), 1200.0), (day(4), 1210.0), (day(5), 1220.0)]);

    let table =
      fetch_price_table(&source, &symbols(&["FPT", "HPG"]), "VNINDEX", day(1), day(31)).unwrap();

    assert_eq!(table.dates, vec![day(1), day(5)]);
    assert_eq!(table.symbols, vec!["FPT", "HPG"]);
    assert_eq!(table.closes[1], vec![25.0, 26.0]);
    assert_eq!(table.benchmark_closes(), &[1200.0, 1220.0]);
  }

  #[test]
  fn fetch_fails_fast_when_a_symbol_is_missing() {
    let mut source = FixedPriceSource::new();
    source.insert_closes("FPT", &[(day(1), 100.0)]);
    source.insert_closes("VNINDEX", &[(day(1), 1200.0)]);

    let err = fetch_price_table(&source, &symbols(&["FPT", "ACB"]), "VNINDEX", day(1), day(31))
      .unwrap_err();
    assert!(format!("{err:#}").contains("ACB"));
  }

  #[test]
  fn fetch_fails_when_window_holds_no_data() {
    let mut source = FixedPriceSource::new();
    source.insert_closes("FPT", &[(day(1), 100.0)]);
    source.insert_closes("VNINDEX", &[(day(1), 1200.0)]);

    let result = fetch_price_table(&source, &symbols(&["FPT"]), "VNINDEX", day(10), day(20));
    assert!(result.is_err());
  }
}
