//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Surplus - forecast and explain surplus food
#[derive(Parser)]
#[command(name = "surplus")]
#[command(about = "Surplus food forecasts, insights and Q&A", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Series file (.toml, .json or .csv); uses built-in sample data if omitted
    #[arg(long, global = true)]
    pub data: Option<PathBuf>,

    /// Forecast config file (defaults to ~/.local/share/surplus/config/forecast.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Preference store file
    #[arg(long, default_value = "surplus-prefs.json", global = true)]
    pub store: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show historical surplus points
    Series {
        /// week, month or year (defaults to saved preference)
        #[arg(short, long)]
        granularity: Option<String>,
    },

    /// Project upcoming surplus
    Forecast {
        /// week, month or year (defaults to saved preference)
        #[arg(short, long)]
        granularity: Option<String>,

        /// Hide the confidence band
        #[arg(long)]
        no_confidence: bool,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show peak, trough, trend and summary
    Insight {
        /// week, month or year (defaults to saved preference)
        #[arg(short, long)]
        granularity: Option<String>,

        /// Print the full analysis (series, forecast, insight) as JSON
        #[arg(long)]
        json: bool,
    },

    /// Ask a question about the surplus chart
    Ask {
        /// Question, e.g. "Which day had the highest surplus?"
        question: String,

        /// week, month or year (defaults to saved preference)
        #[arg(short, long)]
        granularity: Option<String>,

        /// Answer forecast questions even if the forecast toggle is off
        #[arg(long, conflicts_with = "no_forecast")]
        forecast: bool,

        /// Treat the forecast toggle as off
        #[arg(long)]
        no_forecast: bool,
    },

    /// Interactive question loop (type "quit" to exit)
    Chat {
        /// week, month or year (defaults to saved preference)
        #[arg(short, long)]
        granularity: Option<String>,
    },

    /// Show or change chart preferences
    Prefs {
        #[command(subcommand)]
        action: Option<PrefsAction>,
    },

    /// Show the resolved forecast configuration
    Config,

    /// Start the web server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Directory containing static files to serve (e.g., ui/dist)
        #[arg(long)]
        static_dir: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum PrefsAction {
    /// Show saved preferences
    Show,

    /// Update saved preferences
    Set {
        /// Default chart view: week, month or year
        #[arg(short, long)]
        granularity: Option<String>,

        /// Show the forecast line
        #[arg(long)]
        forecast: Option<bool>,

        /// Show the confidence band
        #[arg(long)]
        confidence: Option<bool>,
    },

    /// Restore default preferences
    Reset,
}
