// Technical indicators module
pub mod rsi;
pub mod sma;

pub use rsi::Rsi;
pub use sma::Sma;

use serde_json::Value;
use shared::models::Candle;

/// One value per input bar. `None` marks positions without enough history,
/// or where the value is undefined (e.g. RSI over a flat window).
pub type IndicatorSeries = Vec<Option<f64>>;

// Common trait for all indicators
pub trait IndicatorCalculator {
    fn name(&self) -> &str;
    fn parameters(&self) -> Value;
    fn calculate(&self, data: &[Candle]) -> IndicatorSeries;
}

pub fn calculate_rsi(data: &[Candle], period: usize) -> IndicatorSeries {
    Rsi::new(period).calculate(data)
}

/// Returns `(short, long)` simple moving averages of the close.
pub fn calculate_moving_averages(
    data: &[Candle],
    short_window: usize,
    long_window: usize,
) -> (IndicatorSeries, IndicatorSeries) {
    (
        Sma::new(short_window).calculate(data),
        Sma::new(long_window).calculate(data),
    )
}

// Trailing mean over `window` items, aligned to the input. Each window is summed
// on its own so identical inputs always produce identical means.
pub(crate) fn rolling_mean(values: &[f64], window: usize) -> IndicatorSeries {
    if window == 0 || values.len() < window {
        return vec![None; values.len()];
    }
    let mut results = vec![None; window - 1];
    results.extend(
        values
            .windows(window)
            .map(|w| Some(w.iter().sum::<f64>() / window as f64)),
    );
    results
}

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::{TimeZone, Utc};
    use shared::models::Candle;

    pub fn create_candle(close: f64) -> Candle {
        Candle {
            symbol: "TEST".to_string(),
            timestamp: Utc.timestamp_opt(0, 0).unwrap(),
            open: close,
            high: close,
            low: close,
            close,
            volume: 0.0,
            trades: 0,
        }
    }

    pub fn candles_from_closes(closes: &[f64]) -> Vec<Candle> {
        closes
            .iter()
            .enumerate()
            .map(|(i, &close)| Candle {
                timestamp: Utc.timestamp_opt(i as i64 * 3600, 0).unwrap(),
                ..create_candle(close)
            })
            .collect()
    }
}
