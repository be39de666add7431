//! # Technical Indicators
//!
//! $$
//! \mathrm{RSI} = 100 - \frac{100}{1 + \mathrm{RS}}
//! $$
//!
//! Moving averages, MACD, RSI and Fibonacci retracement levels over close
//! prices. Warmup entries are NaN so outputs stay index-aligned with the
//! input series.

/// Simple moving average; NaN before index `period - 1`.
pub fn sma(data: &[f64], period: usize) -> Vec<f64> {
  let n = data.len();
  let mut out = vec![f64::NAN; n];
  if period == 0 || period > n {
    return out;
  }

  let mut sum: f64 = data[..period].iter().sum();
  out[period - 1] = sum / period as f64;
  for i in period..n {
    sum += data[i] - data[i - period];
    out[i] = sum / period as f64;
  }
  out
}

/// Exponential moving average seeded with the SMA of the first `period`
/// values; NaN before index `period - 1`.
pub fn ema(data: &[f64], period: usize) -> Vec<f64> {
  let n = data.len();
  let mut out = vec![f64::NAN; n];
  if period == 0 || period > n {
    return out;
  }

  let alpha = 2.0 / (period as f64 + 1.0);
  let mut level = data[..period].iter().sum::<f64>() / period as f64;
  out[period - 1] = level;
  for i in period..n {
    level = alpha * data[i] + (1.0 - alpha) * level;
    out[i] = level;
  }
  out
}

/// MACD line, signal line and histogram, index-aligned with the input.
#[derive(Clone, Debug)]
pub struct Macd {
  pub macd: Vec<f64>,
  pub signal: Vec<f64>,
  pub histogram: Vec<f64>,
}

/// MACD over close prices; the conventional parameters are 12/26/9.
pub fn macd(data: &[f64], fast: usize, slow: usize, signal_period: usize) -> Macd {
  let ema_fast = ema(data, fast);
  let ema_slow = ema(data, slow);
  let macd_line: Vec<f64> = ema_fast
    .iter()
    .zip(&ema_slow)
    .map(|(f, s)| f - s)
    .collect();

  // The signal EMA runs on the defined part of the MACD line only.
  let start = macd_line
    .iter()
    .position(|v| v.is_finite())
    .unwrap_or(macd_line.len());
  let mut signal = vec![f64::NAN; data.len()];
  for (i, v) in ema(&macd_line[start..], signal_period).into_iter().enumerate() {
    signal[start + i] = v;
  }

  let histogram = macd_line.iter().zip(&signal).map(|(m, s)| m - s).collect();
  Macd {
    macd: macd_line,
    signal,
    histogram,
  }
}

/// Wilder-smoothed RSI on a 0-100 scale; NaN before index `period`.
pub fn rsi(data: &[f64], period: usize) -> Vec<f64> {
  let n = data.len();
  let mut out = vec![f64::NAN; n];
  if period == 0 || n < 2 || period >= n {
    return out;
  }

  let mut gains = vec![0.0; n];
  let mut losses = vec![0.0; n];
  for i in 1..n {
    let change = data[i] - data[i - 1];
    if change > 0.0 {
      gains[i] = change;
    } else {
      losses[i] = -change;
    }
  }

  let mut avg_gain: f64 = gains[1..=period].iter().sum::<f64>() / period as f64;
  let mut avg_loss: f64 = losses[1..=period].iter().sum::<f64>() / period as f64;
  out[period] = rsi_value(avg_gain, avg_loss);

  for i in (period + 1)..n {
    avg_gain = (avg_gain * (period as f64 - 1.0) + gains[i]) / period as f64;
    avg_loss = (avg_loss * (period as f64 - 1.0) + losses[i]) / period as f64;
    out[i] = rsi_value(avg_gain, avg_loss);
  }

  out
}

fn rsi_value(avg_gain: f64, avg_loss: f64) -> f64 {
  if avg_loss <= 0.0 {
    100.0
  } else {
    100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
  }
}

/// Fibonacci retracement levels off the close-price range.
#[derive(Clone, Debug)]
pub struct FibonacciLevels {
  /// Retracement ratio and the price level it maps to, shallow to deep.
  pub levels: Vec<(f64, f64)>,
  pub highest: f64,
  pub lowest: f64,
}

/// Conventional retracement ratios.
pub const FIBONACCI_RATIOS: [f64; 5] = [0.236, 0.382, 0.5, 0.618, 0.786];

/// Retracement levels over `closes`; `None` when the price range is
/// degenerate (empty series or flat prices).
pub fn fibonacci_levels(closes: &[f64]) -> Option<FibonacciLevels> {
  let mut highest = f64::NEG_INFINITY;
  let mut lowest = f64::INFINITY;
  for &c in closes.iter().filter(|c| c.is_finite()) {
    highest = highest.max(c);
    lowest = lowest.min(c);
  }

  let range = highest - lowest;
  if !range.is_finite() || range <= 0.0 {
    return None;
  }

  let levels = FIBONACCI_RATIOS
    .iter()
    .map(|&r| (r, highest - range * r))
    .collect();

  Some(FibonacciLevels {
    levels,
    highest,
    lowest,
  })
}
