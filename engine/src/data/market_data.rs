// In-memory market data, per pair and timeframe
use super::MarketDataSource;
use crate::error::{EngineError, Result};
use shared::models::{Candle, TimeFrame};
use std::collections::HashMap;

pub struct MarketDataStore {
    data: HashMap<String, HashMap<TimeFrame, Vec<Candle>>>,
}

impl MarketDataStore {
    pub fn new() -> Self {
        MarketDataStore {
            data: HashMap::new(),
        }
    }

    pub fn add_candles(&mut self, pair: &str, timeframe: TimeFrame, new_candles: Vec<Candle>) {
        let pair_data = self.data.entry(pair.to_string()).or_default();
        let timeframe_data = pair_data.entry(timeframe).or_default();

        timeframe_data.extend(new_candles);
        timeframe_data.sort_by_key(|c| c.timestamp);
        timeframe_data.dedup_by_key(|c| c.timestamp);
    }

    fn candles(&self, pair: &str, timeframe: TimeFrame) -> &[Candle] {
        self.data
            .get(pair)
            .and_then(|pair_data| pair_data.get(&timeframe))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

impl Default for MarketDataStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MarketDataSource for MarketDataStore {
    fn get_ohlc(&self, pair: &str, interval: u32) -> Result<Vec<Candle>> {
        let timeframe = TimeFrame::from_minutes(interval).ok_or_else(|| {
            EngineError::MarketDataError(format!(
                "Unsupported interval {} for pair '{}'",
                interval, pair
            ))
        })?;
        let candles = self.candles(pair, timeframe).to_vec();
        tracing::debug!(
            pair = %pair,
            ?timeframe,
            count = candles.len(),
            "Served candles from memory store"
        );
        Ok(candles)
    }
}
