// Moving-average crossover strategy
use crate::config::settings::MovingAverageSettings;
use crate::data::MarketDataSource;
use crate::error::Result;
use crate::indicators::calculate_moving_averages;
use shared::models::Signal;

// Comparisons against an undefined average are false.
fn above(a: Option<f64>, b: Option<f64>) -> bool {
    matches!((a, b), (Some(a), Some(b)) if a > b)
}

fn below(a: Option<f64>, b: Option<f64>) -> bool {
    matches!((a, b), (Some(a), Some(b)) if a < b)
}

fn at_or_below(a: Option<f64>, b: Option<f64>) -> bool {
    matches!((a, b), (Some(a), Some(b)) if a <= b)
}

fn at_or_above(a: Option<f64>, b: Option<f64>) -> bool {
    matches!((a, b), (Some(a), Some(b)) if a >= b)
}

/// Looks at the last two points of each series: an upward cross of the short
/// average buys, a downward cross sells.
pub fn evaluate_crossover(short: &[Option<f64>], long: &[Option<f64>]) -> Signal {
    let n = short.len().min(long.len());
    if n < 2 {
        return Signal::Hold;
    }
    let (short_now, short_prev) = (short[short.len() - 1], short[short.len() - 2]);
    let (long_now, long_prev) = (long[long.len() - 1], long[long.len() - 2]);

    if above(short_now, long_now) && at_or_below(short_prev, long_prev) {
        Signal::Buy
    } else if below(short_now, long_now) && at_or_above(short_prev, long_prev) {
        Signal::Sell
    } else {
        Signal::Hold
    }
}

pub fn handle_ma_strategy<S: MarketDataSource + ?Sized>(
    pair: &str,
    interval: u32,
    source: &S,
    settings: &MovingAverageSettings,
) -> Result<Signal> {
    let candles = source.get_ohlc(pair, interval)?;
    if candles.is_empty() {
        tracing::error!(pair = %pair, interval, "No data available for MA strategy");
        return Ok(Signal::Hold);
    }

    let (short, long) =
        calculate_moving_averages(&candles, settings.short_window, settings.long_window);
    let signal = evaluate_crossover(&short, &long);
    tracing::debug!(
        pair = %pair,
        short_ma = ?short.last().copied().flatten(),
        long_ma = ?long.last().copied().flatten(),
        %signal,
        "Evaluated MA crossover"
    );
    Ok(signal)
}
