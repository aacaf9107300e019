mod cli;
mod config;
mod error;
mod extractor;
mod gps;
mod hashing;
mod manifest;
mod metadata;
mod processor;
mod rational;
mod report;
mod tags;
mod walker;

use crate::cli::Cli;
use crate::config::AppConfig;
use crate::error::AppError;
use crate::manifest::Manifest;
use anyhow::Result;
use clap::Parser;
use log::info;
use std::path::{Path, PathBuf};

fn ensure_scan_directory(dir: &str) -> Result<(), AppError> {
    let path = PathBuf::from(dir);
    let stat = std::fs::metadata(&path).map_err(|e| AppError::InvalidScanDirectory {
        path: path.clone(),
        reason: e.to_string(),
    })?;
    if !stat.is_dir() {
        return Err(AppError::InvalidScanDirectory {
            path,
            reason: "not a directory".to_string(),
        });
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::new(&cli)?;

    // Initialize env_logger based on config.log_level
    env_logger::Builder::new()
        .filter_level(config.log_level.parse().unwrap_or(log::LevelFilter::Info))
        .init();

    info!("Starting metascan");
    ensure_scan_directory(&config.scan_directory)?;

    let summary = processor::start_processing(&config);

    let report_path = config.report_path();
    report::write_report(Path::new(&report_path), config.format, &summary.records)?;

    let manifest = Manifest::build(Path::new(&report_path), config.format, &summary);
    manifest.write(Path::new(&config.manifest_path()), config.format)?;

    info!(
        "Processing complete. Files attempted: {}. Files included: {}. Errors: {}.",
        summary.attempted, summary.processed, summary.errored
    );

    Ok(())
}
