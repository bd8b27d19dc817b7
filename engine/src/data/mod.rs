// Market data access: the boundary every strategy fetches its bars through
pub mod csv_parser;
pub mod market_data;

use crate::error::Result;
use shared::models::Candle;

pub use csv_parser::{CsvDataSource, KrakenCsvParser};
pub use market_data::MarketDataStore;

/// Supplies OHLC bars for a trading pair.
///
/// `interval` is the bar length in minutes. Implementations return bars ordered by
/// timestamp ascending, and an empty vector when they have nothing for the pair.
pub trait MarketDataSource {
    fn get_ohlc(&self, pair: &str, interval: u32) -> Result<Vec<Candle>>;
}

impl<T: MarketDataSource + ?Sized> MarketDataSource for &T {
    fn get_ohlc(&self, pair: &str, interval: u32) -> Result<Vec<Candle>> {
        (**self).get_ohlc(pair, interval)
    }
}

