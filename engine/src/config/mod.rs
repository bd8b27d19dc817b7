pub mod settings;

pub use settings::{EngineSettings, MovingAverageSettings, RsiSettings};
