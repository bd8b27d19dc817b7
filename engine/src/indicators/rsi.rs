// Relative Strength Index (RSI) over simple averages of gains and losses
use super::{rolling_mean, IndicatorCalculator, IndicatorSeries};
use serde_json::Value;
use shared::models::Candle;

pub struct Rsi {
    name: String,
    period: usize,
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        Self {
            name: format!("RSI({})", period),
            period,
        }
    }
}

impl IndicatorCalculator for Rsi {
    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "period": self.period })
    }

    fn calculate(&self, data: &[Candle]) -> IndicatorSeries {
        if data.len() <= self.period || self.period == 0 {
            return vec![None; data.len()];
        }

        // changes[j] is the move into bar j + 1
        let changes: Vec<f64> = data.windows(2).map(|w| w[1].close - w[0].close).collect();
        let gains: Vec<f64> = changes.iter().map(|&c| if c > 0.0 { c } else { 0.0 }).collect();
        let losses: Vec<f64> = changes.iter().map(|&c| if c < 0.0 { -c } else { 0.0 }).collect();

        let avg_gains = rolling_mean(&gains, self.period);
        let avg_losses = rolling_mean(&losses, self.period);

        let mut results = Vec::with_capacity(data.len());
        results.push(None);
        results.extend(
            avg_gains
                .into_iter()
                .zip(avg_losses)
                .map(|(gain, loss)| match (gain, loss) {
                    (Some(gain), Some(loss)) => {
                        // No losses gives an infinite RS and an RSI of 100; a flat window is 0/0.
                        let rs = gain / loss;
                        let rsi = 100.0 - 100.0 / (1.0 + rs);
                        (!rsi.is_nan()).then_some(rsi)
                    }
                    _ => None,
                }),
        );
        results
    }
}
