// Signal evaluation over a market data source.
// SignalService holds the source and the settings; each strategy lives in its own
// sibling module and fetches its own bars on every call.
use crate::config::settings::{EngineSettings, MovingAverageSettings, RsiSettings};
use crate::data::MarketDataSource;
use crate::error::Result;
use shared::models::Signal;

pub mod ma_signal;
pub mod rsi_signal;

pub use ma_signal::evaluate_crossover;
pub use rsi_signal::evaluate_rsi;

pub struct SignalService<S> {
    source: S,
    interval: u32,
    rsi: RsiSettings,
    moving_average: MovingAverageSettings,
}

impl<S: MarketDataSource> SignalService<S> {
    pub fn new(source: S, settings: &EngineSettings) -> Self {
        SignalService {
            source,
            interval: settings.interval,
            rsi: settings.rsi.clone(),
            moving_average: settings.moving_average.clone(),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn rsi_strategy(&self, pair: &str) -> Result<Signal> {
        rsi_signal::handle_rsi_strategy(pair, self.interval, &self.source, &self.rsi)
    }

    pub fn ma_strategy(&self, pair: &str) -> Result<Signal> {
        ma_signal::handle_ma_strategy(pair, self.interval, &self.source, &self.moving_average)
    }

    /// Both strategies must agree. Each one fetches independently, so the source
    /// is queried twice per call.
    pub fn combined_strategy(&self, pair: &str) -> Result<Signal> {
        let rsi_signal = self.rsi_strategy(pair)?;
        let ma_signal = self.ma_strategy(pair)?;
        tracing::info!(pair = %pair, %rsi_signal, %ma_signal, "RSI Signal: {}, MA Signal: {}", rsi_signal, ma_signal);
        Ok(rsi_signal.combine(ma_signal))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::MarketDataStore;
    use crate::error::EngineError;
    use crate::indicators::test_support::candles_from_closes;
    use shared::models::{Candle, TimeFrame};
    use std::cell::Cell;

    struct MockSource {
        candles: Vec<Candle>,
        fetches: Cell<usize>,
    }

    impl MockSource {
        fn with_closes(closes: &[f64]) -> Self {
            MockSource {
                candles: candles_from_closes(closes),
                fetches: Cell::new(0),
            }
        }
    }

    impl MarketDataSource for MockSource {
        fn get_ohlc(&self, _pair: &str, interval: u32) -> Result<Vec<Candle>> {
            assert_eq!(interval, 60);
            self.fetches.set(self.fetches.get() + 1);
            Ok(self.candles.clone())
        }
    }

    struct FailingSource;

    impl MarketDataSource for FailingSource {
        fn get_ohlc(&self, pair: &str, _interval: u32) -> Result<Vec<Candle>> {
            Err(EngineError::MarketDataError(format!("connection refused for {}", pair)))
        }
    }

    fn small_window_settings() -> EngineSettings {
        EngineSettings {
            rsi: RsiSettings { period: 3, ..RsiSettings::default() },
            moving_average: MovingAverageSettings { short_window: 1, long_window: 2 },
            ..EngineSettings::default()
        }
    }

    fn create_test_service(closes: &[f64]) -> SignalService<MockSource> {
        SignalService::new(MockSource::with_closes(closes), &small_window_settings())
    }

    #[test]
    fn test_rsi_strategy_empty_data_holds() {
        let service = create_test_service(&[]);
        assert_eq!(service.rsi_strategy("ADAUSD").unwrap(), Signal::Hold);
        assert_eq!(service.ma_strategy("ADAUSD").unwrap(), Signal::Hold);
        assert_eq!(service.combined_strategy("ADAUSD").unwrap(), Signal::Hold);
    }

    #[test]
    fn test_rsi_strategy_rising_prices_sell() {
        let service = create_test_service(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(service.rsi_strategy("ADAUSD").unwrap(), Signal::Sell);
    }

    #[test]
    fn test_rsi_strategy_falling_prices_buy() {
        let service = create_test_service(&[6.0, 5.0, 4.0, 3.0, 2.0, 1.0]);
        assert_eq!(service.rsi_strategy("ADAUSD").unwrap(), Signal::Buy);
    }

    #[test]
    fn test_rsi_strategy_short_history_holds() {
        let service = create_test_service(&[6.0, 5.0, 4.0]);
        assert_eq!(service.rsi_strategy("ADAUSD").unwrap(), Signal::Hold);
    }

    #[test]
    fn test_ma_strategy_upward_cross_buys() {
        // short = close, long = 2-bar mean: [.., 9, 11] vs [.., 9.5, 10]
        let service = create_test_service(&[10.0, 10.0, 9.0, 11.0]);
        assert_eq!(service.ma_strategy("ADAUSD").unwrap(), Signal::Buy);
    }

    #[test]
    fn test_ma_strategy_downward_cross_sells() {
        let service = create_test_service(&[10.0, 10.0, 11.0, 9.0]);
        assert_eq!(service.ma_strategy("ADAUSD").unwrap(), Signal::Sell);
    }

    #[test]
    fn test_ma_strategy_single_bar_holds() {
        let service = create_test_service(&[10.0]);
        assert_eq!(service.ma_strategy("ADAUSD").unwrap(), Signal::Hold);
    }

    #[test]
    fn test_ma_strategy_default_windows_need_history() {
        let source = MockSource::with_closes(&(1..=150).map(|i| i as f64).collect::<Vec<_>>());
        let service = SignalService::new(source, &EngineSettings::default());
        assert_eq!(service.ma_strategy("ADAUSD").unwrap(), Signal::Hold);
    }

    #[test]
    fn test_combined_strategy_both_buy() {
        // RSI(3) over changes -2, -1, +0.5 is about 14; the close ticks above its 2-bar mean
        let service = create_test_service(&[20.0, 18.0, 16.0, 14.0, 12.0, 10.0, 9.0, 9.5]);
        assert_eq!(service.rsi_strategy("ADAUSD").unwrap(), Signal::Buy);
        assert_eq!(service.ma_strategy("ADAUSD").unwrap(), Signal::Buy);
        assert_eq!(service.combined_strategy("ADAUSD").unwrap(), Signal::Buy);
    }

    #[test]
    fn test_combined_strategy_disagreement_holds() {
        // No losses over the last three changes, and the close lifts off a flat bar
        let service = create_test_service(&[8.0, 10.0, 15.0, 15.0, 16.0]);
        assert_eq!(service.rsi_strategy("ADAUSD").unwrap(), Signal::Sell);
        assert_eq!(service.ma_strategy("ADAUSD").unwrap(), Signal::Buy);
        assert_eq!(service.combined_strategy("ADAUSD").unwrap(), Signal::Hold);
    }

    #[test]
    fn test_combined_strategy_fetches_twice() {
        let service = create_test_service(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        service.combined_strategy("ADAUSD").unwrap();
        assert_eq!(service.source().fetches.get(), 2);
        service.combined_strategy("ADAUSD").unwrap();
        assert_eq!(service.source().fetches.get(), 4);
    }

    #[test]
    fn test_strategies_are_idempotent() {
        let service = create_test_service(&[20.0, 18.0, 16.0, 14.0, 12.0, 10.0, 9.0, 9.5]);
        for _ in 0..2 {
            assert_eq!(service.rsi_strategy("ADAUSD").unwrap(), Signal::Buy);
            assert_eq!(service.ma_strategy("ADAUSD").unwrap(), Signal::Buy);
            assert_eq!(service.combined_strategy("ADAUSD").unwrap(), Signal::Buy);
        }
    }

    #[test]
    fn test_source_errors_propagate() {
        let service = SignalService::new(FailingSource, &EngineSettings::default());
        assert!(matches!(service.rsi_strategy("ADAUSD"), Err(EngineError::MarketDataError(_))));
        assert!(service.combined_strategy("ADAUSD").is_err());
    }

    #[test]
    fn test_service_over_memory_store() {
        let mut store = MarketDataStore::new();
        store.add_candles("ADAUSD", TimeFrame::Hour1, candles_from_closes(&[6.0, 5.0, 4.0, 3.0, 2.0]));
        let service = SignalService::new(&store, &small_window_settings());
        assert_eq!(service.rsi_strategy("ADAUSD").unwrap(), Signal::Buy);
        assert_eq!(service.rsi_strategy("XBTUSD").unwrap(), Signal::Hold);
        drop(service);
        assert_eq!(store.get_ohlc("ADAUSD", 60).unwrap().len(), 5);
    }
}
