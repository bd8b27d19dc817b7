// RSI threshold strategy
use crate::config::settings::RsiSettings;
use crate::data::MarketDataSource;
use crate::error::Result;
use crate::indicators::calculate_rsi;
use shared::models::Signal;

/// Oversold buys, overbought sells. An undefined reading holds.
pub fn evaluate_rsi(latest: Option<f64>, settings: &RsiSettings) -> Signal {
    match latest {
        Some(rsi) if rsi < settings.oversold => Signal::Buy,
        Some(rsi) if rsi > settings.overbought => Signal::Sell,
        _ => Signal::Hold,
    }
}

pub fn handle_rsi_strategy<S: MarketDataSource + ?Sized>(
    pair: &str,
    interval: u32,
    source: &S,
    settings: &RsiSettings,
) -> Result<Signal> {
    let candles = source.get_ohlc(pair, interval)?;
    if candles.is_empty() {
        tracing::error!(pair = %pair, interval, "No data available for RSI strategy");
        return Ok(Signal::Hold);
    }

    let latest = calculate_rsi(&candles, settings.period).last().copied().flatten();
    match latest {
        Some(rsi) => tracing::info!(pair = %pair, rsi, "Latest RSI for {}: {:.2}", pair, rsi),
        None => tracing::info!(pair = %pair, bars = candles.len(), "Latest RSI for {} is undefined", pair),
    }

    Ok(evaluate_rsi(latest, settings))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evaluate_rsi_thresholds() {
        let settings = RsiSettings::default();
        assert_eq!(evaluate_rsi(Some(29.99), &settings), Signal::Buy);
        assert_eq!(evaluate_rsi(Some(70.01), &settings), Signal::Sell);
        assert_eq!(evaluate_rsi(Some(30.0), &settings), Signal::Hold);
        assert_eq!(evaluate_rsi(Some(70.0), &settings), Signal::Hold);
        assert_eq!(evaluate_rsi(Some(50.0), &settings), Signal::Hold);
        assert_eq!(evaluate_rsi(None, &settings), Signal::Hold);
    }

    #[test]
    fn test_evaluate_rsi_custom_thresholds() {
        let settings = RsiSettings { period: 14, oversold: 20.0, overbought: 80.0 };
        assert_eq!(evaluate_rsi(Some(25.0), &settings), Signal::Hold);
        assert_eq!(evaluate_rsi(Some(19.0), &settings), Signal::Buy);
        assert_eq!(evaluate_rsi(Some(75.0), &settings), Signal::Hold);
    }
}
