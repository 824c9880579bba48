//! Surplus CLI - surplus food forecasts and insights
//!
//! Usage:
//!   surplus series -g week          Show historical points
//!   surplus forecast -g month       Project upcoming surplus
//!   surplus insight                 Peak, trough, trend and summary
//!   surplus ask "Which day had the highest surplus?"
//!   surplus serve --port 3000       Start web server

mod cli;
mod commands;
mod voice;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Series { granularity } => {
            let ws = commands::open_workspace(cli.data.as_deref(), cli.config.as_deref(), &cli.store)?;
            commands::cmd_series(&ws, granularity.as_deref())
        }
        Commands::Forecast {
            granularity,
            no_confidence,
            json,
        } => {
            let ws = commands::open_workspace(cli.data.as_deref(), cli.config.as_deref(), &cli.store)?;
            commands::cmd_forecast(&ws, granularity.as_deref(), no_confidence, json)
        }
        Commands::Insight { granularity, json } => {
            let ws = commands::open_workspace(cli.data.as_deref(), cli.config.as_deref(), &cli.store)?;
            commands::cmd_insight(&ws, granularity.as_deref(), json)
        }
        Commands::Ask {
            question,
            granularity,
            forecast,
            no_forecast,
        } => {
            let ws = commands::open_workspace(cli.data.as_deref(), cli.config.as_deref(), &cli.store)?;
            let forecast_override = match (forecast, no_forecast) {
                (true, _) => Some(true),
                (_, true) => Some(false),
                _ => None,
            };
            commands::cmd_ask(&ws, &question, granularity.as_deref(), forecast_override).map(|_| ())
        }
        Commands::Chat { granularity } => {
            let ws = commands::open_workspace(cli.data.as_deref(), cli.config.as_deref(), &cli.store)?;
            let mut speech = voice::ConsoleSpeech::stdio();
            commands::cmd_chat(&ws, granularity.as_deref(), &mut speech).map(|_| ())
        }
        Commands::Prefs { action } => {
            let store = commands::open_store(&cli.store);
            match action {
                None | Some(PrefsAction::Show) => commands::cmd_prefs_show(&store),
                Some(PrefsAction::Set {
                    granularity,
                    forecast,
                    confidence,
                }) => commands::cmd_prefs_set(&store, granularity.as_deref(), forecast, confidence),
                Some(PrefsAction::Reset) => commands::cmd_prefs_reset(&store),
            }
        }
        Commands::Config => commands::cmd_config(cli.config.as_deref()),
        Commands::Serve {
            port,
            host,
            static_dir,
        } => {
            let ws = commands::open_workspace(cli.data.as_deref(), cli.config.as_deref(), &cli.store)?;
            commands::cmd_serve(ws, &host, port, static_dir.as_deref()).await
        }
    }
}
