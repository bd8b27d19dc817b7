// Engine main entry point
use anyhow::{Context, Result};
use clap::Parser;
use engine::config::settings::EngineSettings;
use engine::data::CsvDataSource;
use engine::services::SignalService;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "Computes RSI and moving-average crossover signals from OHLC data.")]
struct Cli {
    /// JSON settings file. The bundled defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Trading pair to evaluate (e.g. "ADAUSD").
    #[arg(short, long)]
    pair: Option<String>,

    /// Bar interval in minutes.
    #[arg(short, long)]
    interval: Option<u32>,

    /// Directory containing `<PAIR>_<interval>.csv` files.
    #[arg(short = 'd', long)]
    data_dir: Option<PathBuf>,
}

fn load_settings(cli: &Cli) -> Result<EngineSettings> {
    let mut settings = match &cli.config {
        Some(path) => EngineSettings::load(path)
            .with_context(|| format!("failed to load settings from {}", path.display()))?,
        None => EngineSettings::load_default()?,
    };
    if let Some(pair) = &cli.pair {
        settings.pair = pair.clone();
    }
    if let Some(interval) = cli.interval {
        settings.interval = interval;
    }
    if let Some(data_dir) = &cli.data_dir {
        settings.data_dir = data_dir.clone();
    }
    settings.validate()?;
    Ok(settings)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = load_settings(&cli)?;

    let level: tracing::Level = settings
        .log_level
        .parse()
        .with_context(|| format!("invalid log level '{}'", settings.log_level))?;
    tracing_subscriber::fmt().with_max_level(level).init();

    info!(pair = %settings.pair, interval = settings.interval, data_dir = %settings.data_dir.display(), "Starting signal engine");

    let service = SignalService::new(CsvDataSource::new(&settings.data_dir), &settings);
    let pair = settings.pair.as_str();

    println!("\nRunning RSI Strategy on {}...", pair);
    let rsi_decision = service.rsi_strategy(pair)?;
    println!("RSI Strategy Decision: {}", rsi_decision);

    println!("\nRunning Moving Average Strategy on {}...", pair);
    let ma_decision = service.ma_strategy(pair)?;
    println!("MA Strategy Decision: {}", ma_decision);

    println!("\nRunning Combined Strategy on {}...", pair);
    let combined_decision = service.combined_strategy(pair)?;
    println!("Combined Strategy Decision: {}", combined_decision);

    Ok(())
}
