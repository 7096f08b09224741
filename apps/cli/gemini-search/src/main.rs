use gemini_search::app::{App, log_dir};
use gemini_search::cli::Cli;
use gemini_search::commands;
use gemini_search::error::AppError;
use gemini_search::logger::initialize as LoggerInitialize;

use common::ErrorLocation;
use search_core::config::resolve_config_dir;

use std::fs::create_dir_all;
use std::panic::Location;
use std::process::ExitCode;

use clap::Parser;
use log::{error, info};
use serde::Serialize;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            error!("{}", e);
            eprintln!("{}", to_json(&e));
            ExitCode::from(e.exit_code())
        }
    }
}

async fn run(cli: Cli) -> Result<u8, AppError> {
    let config_dir = resolve_config_dir(cli.config_dir.as_deref())?;
    let log_dir = log_dir(&config_dir);

    create_dir_all(&log_dir).map_err(|e| AppError::Logger {
        message: format!("Failed to create log directory {}: {e}", log_dir.display()),
        location: ErrorLocation::from(Location::caller()),
    })?;

    // Initialize logger FIRST
    LoggerInitialize(&log_dir)?;

    info!("gemini-search starting");
    info!("Log directory: {}", log_dir.display());

    let app = App::load(&config_dir, cli.locale.map(Into::into))?;
    let output = commands::run(&app, cli.command).await?;

    println!("{}", to_json(&output));
    Ok(output.exit_code())
}

fn to_json(value: &impl Serialize) -> String {
    serde_json::to_string_pretty(value)
        .unwrap_or_else(|e| format!("{{\"error\":{:?}}}", e.to_string()))
}
