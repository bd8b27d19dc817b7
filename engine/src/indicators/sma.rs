// Simple Moving Average (SMA) indicator implementation
use super::{rolling_mean, IndicatorCalculator, IndicatorSeries};
use serde_json::Value;
use shared::models::Candle;

pub struct Sma {
    name: String,
    period: usize,
}

impl Sma {
    pub fn new(period: usize) -> Self {
        Self {
            name: format!("SMA({})", period),
            period,
        }
    }
}

impl IndicatorCalculator for Sma {
    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "period": self.period })
    }

    fn calculate(&self, data: &[Candle]) -> IndicatorSeries {
        let closes: Vec<f64> = data.iter().map(|c| c.close).collect();
        rolling_mean(&closes, self.period)
    }
}
