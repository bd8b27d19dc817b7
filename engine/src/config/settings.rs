// Engine settings, loaded from a JSON file or taken from defaults
use crate::error::{EngineError, Result};
use serde::Deserialize;
use shared::models::TimeFrame;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct RsiSettings {
    pub period: usize,
    pub oversold: f64,
    pub overbought: f64,
}

impl Default for RsiSettings {
    fn default() -> Self {
        RsiSettings {
            period: 14,
            oversold: 30.0,
            overbought: 70.0,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct MovingAverageSettings {
    pub short_window: usize,
    pub long_window: usize,
}

impl Default for MovingAverageSettings {
    fn default() -> Self {
        MovingAverageSettings {
            short_window: 50,
            long_window: 200,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct EngineSettings {
    /// Trading pair the binary evaluates, e.g. "ADAUSD".
    pub pair: String,
    /// Bar interval in minutes.
    pub interval: u32,
    /// Directory holding `<PAIR>_<interval>.csv` OHLCVT files.
    pub data_dir: PathBuf,
    pub log_level: String,
    pub rsi: RsiSettings,
    pub moving_average: MovingAverageSettings,
}

impl Default for EngineSettings {
    fn default() -> Self {
        EngineSettings {
            pair: "ADAUSD".to_string(),
            interval: 60,
            data_dir: PathBuf::from("data"),
            log_level: "info".to_string(),
            rsi: RsiSettings::default(),
            moving_average: MovingAverageSettings::default(),
        }
    }
}

impl EngineSettings {
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let settings: EngineSettings = serde_json::from_str(raw)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Settings bundled with the binary.
    pub fn load_default() -> Result<Self> {
        Self::from_json_str(include_str!("../../assets/config/default.json"))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), "Loaded settings file");
        Self::from_json_str(&raw)
    }

    pub fn validate(&self) -> Result<()> {
        if self.pair.trim().is_empty() {
            return Err(EngineError::ConfigError("pair cannot be empty".to_string()));
        }
        if TimeFrame::from_minutes(self.interval).is_none() {
            return Err(EngineError::ConfigError(format!(
                "unsupported interval {} (minutes)",
                self.interval
            )));
        }
        if self.rsi.period == 0 {
            return Err(EngineError::ConfigError("RSI period cannot be 0".to_string()));
        }
        if self.rsi.oversold >= self.rsi.overbought {
            return Err(EngineError::ConfigError(format!(
                "RSI oversold threshold {} must be below overbought threshold {}",
                self.rsi.oversold, self.rsi.overbought
            )));
        }
        if self.moving_average.short_window == 0 || self.moving_average.long_window == 0 {
            return Err(EngineError::ConfigError(
                "moving average windows cannot be 0".to_string(),
            ));
        }
        Ok(())
    }
}
