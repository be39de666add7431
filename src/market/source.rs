//! # Market Data Sources
//!
//! Provider contract for daily quotes and financial statements. Engines take
//! a source handle per call instead of holding a shared client, so tests and
//! offline runs plug in [`FixedPriceSource`] without touching the network.

use std::collections::BTreeMap;

use anyhow::Result;
use anyhow::anyhow;
use anyhow::bail;
use chrono::NaiveDate;

/// Single daily OHLCV bar.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Candle {
  /// Trading date.
  pub time: NaiveDate,
  pub open: f64,
  pub high: f64,
  pub low: f64,
  pub close: f64,
  pub volume: f64,
}

/// Financial statement kinds a data source can serve.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ReportKind {
  IncomeStatement,
  BalanceSheet,
  CashFlow,
  Ratios,
}

impl ReportKind {
  /// Every report kind, in display order.
  pub const ALL: [ReportKind; 4] = [
    ReportKind::IncomeStatement,
    ReportKind::BalanceSheet,
    ReportKind::CashFlow,
    ReportKind::Ratios,
  ];

  /// Collaborator-side endpoint name for the report.
  pub fn endpoint(&self) -> &'static str {
    match self {
      ReportKind::IncomeStatement => "income_statement",
      ReportKind::BalanceSheet => "balance_sheet",
      ReportKind::CashFlow => "cash_flow",
      ReportKind::Ratios => "ratio",
    }
  }
}

/// Reporting period granularity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReportPeriod {
  Quarter,
  Year,
}

/// Tabular financial report: line items across reporting periods.
#[derive(Clone, Debug)]
pub struct FinancialReport {
  pub symbol: String,
  pub kind: ReportKind,
  /// Period labels, most recent first (e.g. `2024-Q3`).
  pub periods: Vec<String>,
  /// Line-item name and one value per period.
  pub rows: Vec<(String, Vec<f64>)>,
}

/// Quote and fundamentals provider injected into the engines.
pub trait StockDataSource {
  /// Daily bars for `symbol` within `[start, end]`, ascending by date.
  fn quote_history(&self, symbol: &str, start: NaiveDate, end: NaiveDate) -> Result<Vec<Candle>>;

  /// Financial statements; price-only sources may leave this unimplemented.
  fn financial_report(
    &self,
    symbol: &str,
    kind: ReportKind,
    _period: ReportPeriod,
  ) -> Result<FinancialReport> {
    bail!(
      "{} report for {symbol} is not supported by this data source",
      kind.endpoint()
    )
  }
}

/// In-memory source backed by preloaded candle series. Symbols are keyed
/// case-insensitively, matching exchange ticker conventions.
#[derive(Clone, Debug, Default)]
pub struct FixedPriceSource {
  series: BTreeMap<String, Vec<Candle>>,
}

impl FixedPriceSource {
  pub fn new() -> Self {
    Self::default()
  }

  /// Register a candle series for `symbol`; candles are kept sorted by date.
  pub fn insert_series(&mut self, symbol: &str, mut candles: Vec<Candle>) {
    candles.sort_by_key(|c| c.time);
    self.series.insert(normalize(symbol), candles);
  }

  /// Register a close-only series with flat OHLC bars and unit volume.
  pub fn insert_closes(&mut self, symbol: &str, closes: &[(NaiveDate, f64)]) {
    let candles = closes
      .iter()
      .map(|&(time, close)| Candle {
        time,
        open: close,
        high: close,
        low: close,
        close,
        volume: 1.0,
      })
      .collect();
    self.insert_series(symbol, candles);
  }
}

impl StockDataSource for FixedPriceSource {
  fn quote_history(&self, symbol: &str, start: NaiveDate, end: NaiveDate) -> Result<Vec<Candle>> {
    let key = normalize(symbol);
    let series = self
      .series
      .get(&key)
      .ok_or_else(|| anyhow!("no price history for symbol {key}"))?;

    Ok(
      series
        .iter()
        .filter(|c| c.time >= start && c.time <= end)
        .copied()
        .collect(),
    )
  }
}

fn normalize(symbol: &str) -> String {
  symbol.trim().to_uppercase()
}

#[cfg(test)]
mod tests {
  use super::*;

  fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
  }

  #[test]
  fn quote_history_filters_by_range_and_ignores_case() {
    let mut source = FixedPriceSource::new();
    source.insert_closes("fpt", &[(day(2), 100.0), (day(3), 101.0), (day(4), 102.0)]);

    let candles = source.quote_history(" FPT ", day(3), day(4)).unwrap();
    assert_eq!(candles.len(), 2);
    assert_eq!(candles[0].close, 101.0);
  }

  #[test]
  fn unknown_symbol_is_an_error() {
    let source = FixedPriceSource::new();
    assert!(source.quote_history("HPG", day(1), day(31)).is_err());
  }

  #[test]
  fn report_endpoints_are_total() {
    let endpoints: Vec<&str> = ReportKind::ALL.iter().map(|k| k.endpoint()).collect();
    assert_eq!(
      endpoints,
      vec!["income_statement", "balance_sheet", "cash_flow", "ratio"]
    );
  }

  #[test]
  fn financial_reports_default_to_unsupported() {
    let source = FixedPriceSource::new();
    let err = source
      .financial_report("FPT", ReportKind::CashFlow, ReportPeriod::Quarter)
      .unwrap_err();
    assert!(err.to_string().contains("cash_flow"));
  }
}
