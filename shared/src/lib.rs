pub mod models;

pub use models::{Candle, Signal, TimeFrame};
