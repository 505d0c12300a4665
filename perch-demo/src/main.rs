mod config;
mod error;
mod host;
mod paths;
mod shell;

use std::fs::{self, File};

use log::info;
use simplelog::{Config, LevelFilter, WriteLogger};

use crate::config::DemoConfig;
use crate::error::DemoError;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), DemoError> {
    let config = DemoConfig::from_env();
    init_logging(config.log_level)?;
    info!("perch-demo {} starting", env!("CARGO_PKG_VERSION"));

    host::run(config).await?;

    info!("perch-demo exited cleanly");
    Ok(())
}

fn init_logging(level: LevelFilter) -> Result<(), DemoError> {
    paths::rotate_logs();
    let path = paths::log_file().ok_or(DemoError::NoCacheDir)?;
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let file = File::create(&path)?;
    WriteLogger::init(level, Config::default(), file)?;
    Ok(())
}
