use std::error::Error;

use chrono::Datelike;
use chrono::Duration;
use chrono::NaiveDate;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

use goldenkey::config::DEFAULT_BENCHMARK;
use goldenkey::config::DEFAULT_RISK_FREE_RATE;
use goldenkey::market::FixedPriceSource;
use goldenkey::portfolio::MonteCarloConfig;
use goldenkey::portfolio::PortfolioEngine;

fn main() -> Result<(), Box<dyn Error>> {
  tracing_subscriber::fmt()
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
    .init();

  let symbols: Vec<String> = ["FPT", "HPG", "ACB"].iter().map(|s| s.to_string()).collect();
  let start = NaiveDate::from_ymd_opt(2022, 1, 3).ok_or("invalid start date")?;
  let end = NaiveDate::from_ymd_opt(2024, 12, 31).ok_or("invalid end date")?;

  // Offline demo data: three years of synthetic weekday closes per ticker.
  let mut rng = StdRng::seed_from_u64(20240101);
  let mut source = FixedPriceSource::new();
  let params = [
    ("FPT", 0.0009, 0.018),
    ("HPG", 0.0006, 0.024),
    ("ACB", 0.0004, 0.015),
    (DEFAULT_BENCHMARK, 0.0005, 0.011),
  ];
  for (symbol, drift, vol) in params {
    source.insert_closes(symbol, &synthetic_closes(start, 756, drift, vol, &mut rng));
  }

  let engine = PortfolioEngine::from_source(&source, &symbols, DEFAULT_BENCHMARK, start, end)?;

  println!("Annualized mean returns:");
  let stats = engine.stats();
  for (symbol, mean) in stats.symbols.iter().zip(&stats.mean_returns) {
    println!("  {symbol}: {:.2}%", mean * 100.0);
  }

  let outcome = engine.run_monte_carlo_with_rng(&MonteCarloConfig::default(), &mut rng);
  println!(
    "\nMonte Carlo: {} samples in {} attempts{}",
    outcome.portfolios.len(),
    outcome.attempts,
    if outcome.truncated { " (truncated)" } else { "" },
  );
  if let Some(best) = outcome.max_sharpe() {
    println!(
      "  max Sharpe {:.2}: return {:.2}%, volatility {:.2}%",
      best.sharpe,
      best.expected_return * 100.0,
      best.volatility * 100.0
    );
  }
  if let Some(best) = outcome.max_return() {
    println!(
      "  max return {:.2}%: volatility {:.2}%",
      best.expected_return * 100.0,
      best.volatility * 100.0
    );
  }

  let target_return = 0.08;
  let cash_weight = 0.2;
  let result = engine.optimize(target_return, DEFAULT_RISK_FREE_RATE, cash_weight);
  match result.weights {
    Some(weights) => {
      println!(
        "\nMinimum-variance weights for {:.0}% target, {:.0}% cash ({}):",
        target_return * 100.0,
        cash_weight * 100.0,
        result.status
      );
      for (symbol, w) in stats.symbols.iter().zip(&weights) {
        println!("  {symbol}: {:.2}%", w * 100.0);
      }

      let invested: f64 = weights.iter().sum();
      let normalized: Vec<f64> = weights.iter().map(|w| w / invested).collect();
      if let Some(series) =
        engine.cumulative_performance(&normalized, cash_weight, DEFAULT_RISK_FREE_RATE)
      {
        let last = series.dates.len() - 1;
        println!(
          "\nTrailing-year growth: portfolio {:.2}% vs {} {:.2}%",
          (series.portfolio[last] - 1.0) * 100.0,
          DEFAULT_BENCHMARK,
          (series.benchmark[last] - 1.0) * 100.0
        );
      }
    }
    None => println!("\nNo feasible allocation for the target return: {}", result.status),
  }

  Ok(())
}

fn synthetic_closes(
  start: NaiveDate,
  days: usize,
  drift: f64,
  vol: f64,
  rng: &mut StdRng,
) -> Vec<(NaiveDate, f64)> {
  let mut out = Vec::with_capacity(days);
  let mut price = 100.0;
  let mut date = start;
  while out.len() < days {
    if date.weekday().num_days_from_monday() < 5 {
      let shock: f64 = rng.gen::<f64>() - 0.5;
      price *= 1.0 + drift + vol * shock;
      out.push((date, price));
    }
    date += Duration::days(1);
  }
  out
}
