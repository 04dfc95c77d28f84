// ABOUTME: Command-line harness that runs the forecast engine over a JSON record snapshot
// ABOUTME: Prints predictions, statistics, and cycle-day info as JSON on stdout
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Predict the next cycle using statistics only
//! cycle-forecast predict --records snapshot.json --today 2024-03-25
//!
//! # Predict with a local model directory holding model.json and scaler.json
//! cycle-forecast predict --records snapshot.json --model-dir ./model
//!
//! # Summary statistics
//! cycle-forecast stats --records snapshot.json
//!
//! # Cycle day and phase for a date
//! cycle-forecast day --records snapshot.json --date 2024-03-10
//! ```

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use cycle_forecast::config::PredictionConfig;
use cycle_forecast::logging::LoggingConfig;
use cycle_forecast::model::{source_from_config, ModelStore};
use cycle_forecast::models::RecordSnapshot;
use cycle_forecast::prediction::PredictionOrchestrator;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tracing::{debug, info};

#[derive(Parser)]
#[command(
    name = "cycle-forecast",
    about = "Menstrual cycle forecast engine",
    long_about = "Runs the cycle forecast engine over a JSON snapshot of cycle and symptom records."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Predict the next period, ovulation, and fertile window
    Predict {
        /// Snapshot file with `cycles` and `symptoms`
        #[arg(long)]
        records: PathBuf,

        /// Date to predict from (defaults to the local date)
        #[arg(long)]
        today: Option<NaiveDate>,

        /// Directory holding model.json and scaler.json
        #[arg(long, conflicts_with = "model_url")]
        model_dir: Option<PathBuf>,

        /// Base URL serving model.json and scaler.json
        #[arg(long)]
        model_url: Option<String>,
    },

    /// Show cycle statistics
    Stats {
        /// Snapshot file with `cycles` and `symptoms`
        #[arg(long)]
        records: PathBuf,
    },

    /// Show the cycle day and phase for a date
    Day {
        /// Snapshot file with `cycles` and `symptoms`
        #[arg(long)]
        records: PathBuf,

        /// Date to describe (defaults to the local date)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let logging = LoggingConfig::from_env();
    let logging = if cli.verbose {
        logging.with_level("debug")
    } else {
        logging
    };
    logging.init()?;

    let mut config = PredictionConfig::load()?;

    match cli.command {
        Command::Predict {
            records,
            today,
            model_dir,
            model_url,
        } => {
            if model_dir.is_some() {
                config.model.dir = model_dir;
            }
            if model_url.is_some() {
                config.model.url = model_url;
                config.model.dir = None;
            }
            let snapshot = read_snapshot(&records).await?;
            let today = today.unwrap_or_else(|| Local::now().date_naive());

            let orchestrator = match source_from_config(&config.model) {
                Some(source) => {
                    info!(source = %source.describe(), "Using cycle model");
                    PredictionOrchestrator::new(Arc::new(ModelStore::new(source)), &config)
                }
                None => {
                    debug!("No model configured, predicting from statistics only");
                    PredictionOrchestrator::statistical_only(&config)
                }
            };

            let prediction = orchestrator
                .predict(&snapshot.cycles, &snapshot.symptoms, today)
                .await?;
            print_json(&prediction)?;
        }
        Command::Stats { records } => {
            let snapshot = read_snapshot(&records).await?;
            let orchestrator = PredictionOrchestrator::statistical_only(&config);
            print_json(&orchestrator.cycle_stats(&snapshot.cycles))?;
        }
        Command::Day { records, date } => {
            let snapshot = read_snapshot(&records).await?;
            let date = date.unwrap_or_else(|| Local::now().date_naive());
            let orchestrator = PredictionOrchestrator::statistical_only(&config);
            print_json(&orchestrator.cycle_day_info(&snapshot.cycles, date))?;
        }
    }

    Ok(())
}

async fn read_snapshot(path: &Path) -> Result<RecordSnapshot> {
    let bytes = fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let snapshot: RecordSnapshot = serde_json::from_slice(&bytes)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    debug!(
        cycles = snapshot.cycles.len(),
        symptoms = snapshot.symptoms.len(),
        "Loaded record snapshot"
    );
    Ok(snapshot)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
