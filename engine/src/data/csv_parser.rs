use super::MarketDataSource;
use crate::error::{EngineError, Result};
use anyhow::{anyhow, Context};
use chrono::{DateTime, Utc};
use csv::{ReaderBuilder, StringRecord, Trim};
use shared::models::Candle;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

pub struct KrakenCsvParser;

impl KrakenCsvParser {
    // Kraken OHLCVT export, no header row:
    // timestamp,open,high,low,close,volume,trades
    // 1617235200,1.2012,1.2150,1.1987,1.2101,183422.51,412
    pub fn load_candles_from_csv(file_path: &Path, symbol: &str) -> Result<Vec<Candle>> {
        let file = File::open(file_path)?;
        let mut rdr = ReaderBuilder::new()
            .delimiter(b',')
            .has_headers(false)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(BufReader::new(file));

        let mut candles = Vec::new();
        for (idx, result) in rdr.records().enumerate() {
            let record = result?;
            let candle = Self::parse_record(&record, symbol).map_err(|e| {
                EngineError::CsvDataFormatError(format!(
                    "{} line {}: {:#}",
                    file_path.display(),
                    idx + 1,
                    e
                ))
            })?;
            candles.push(candle);
        }
        candles.sort_by_key(|c| c.timestamp);
        Ok(candles)
    }

    fn parse_record(record: &StringRecord, symbol: &str) -> anyhow::Result<Candle> {
        if record.len() < 7 {
            return Err(anyhow!("expected 7 fields, found {}", record.len()));
        }
        let secs: i64 = Self::field(record, 0, "timestamp")?;
        let timestamp = DateTime::<Utc>::from_timestamp(secs, 0)
            .ok_or_else(|| anyhow!("timestamp {} out of range", secs))?;

        Ok(Candle {
            symbol: symbol.to_string(),
            timestamp,
            open: Self::field(record, 1, "open")?,
            high: Self::field(record, 2, "high")?,
            low: Self::field(record, 3, "low")?,
            close: Self::field(record, 4, "close")?,
            volume: Self::field(record, 5, "volume")?,
            trades: Self::field(record, 6, "trades")?,
        })
    }

    fn field<T>(record: &StringRecord, pos: usize, name: &str) -> anyhow::Result<T>
    where
        T: std::str::FromStr,
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        let raw = record.get(pos).unwrap_or_default();
        raw.parse::<T>()
            .with_context(|| format!("invalid {} '{}'", name, raw))
    }
}

/// Reads `<data_dir>/<PAIR>_<interval>.csv` on every fetch.
pub struct CsvDataSource {
    data_dir: PathBuf,
}

impl CsvDataSource {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn file_for(&self, pair: &str, interval: u32) -> PathBuf {
        self.data_dir.join(format!("{}_{}.csv", pair, interval))
    }
}

impl MarketDataSource for CsvDataSource {
    fn get_ohlc(&self, pair: &str, interval: u32) -> Result<Vec<Candle>> {
        let path = self.file_for(pair, interval);
        if !path.is_file() {
            tracing::warn!(pair = %pair, interval, path = %path.display(), "No OHLC file for pair");
            return Ok(Vec::new());
        }
        let candles = KrakenCsvParser::load_candles_from_csv(&path, pair)?;
        tracing::debug!(pair = %pair, interval, count = candles.len(), "Loaded candles from CSV");
        Ok(candles)
    }
}
