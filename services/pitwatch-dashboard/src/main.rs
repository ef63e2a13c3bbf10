//! PitWatch operator CLI
//!
//! Loads configuration, sets up logging, seeds the in-memory stores and
//! runs one dashboard command against them.

use anyhow::Context;
use clap::{Parser, Subcommand};
use pitwatch_core::{logging, ConfigManager};
use pitwatch_domain::{HealthStatus, MachineStatus, MachineType, NotificationTab};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(name = "pitwatch-dashboard")]
#[command(about = "Mining machine monitoring dashboard", version)]
struct Cli {
    /// Configuration file (TOML or JSON); created with defaults when missing
    #[arg(long, global = true, default_value = "pitwatch.toml")]
    config: PathBuf,

    /// Print JSON instead of text lines
    #[arg(long, global = true, default_value_t = false)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List machines with optional search and filters
    Machines {
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long = "type")]
        machine_type: Option<MachineType>,
        #[arg(long)]
        status: Option<MachineStatus>,
        #[arg(long)]
        health: Option<HealthStatus>,
        #[arg(long)]
        location: Option<String>,
    },
    /// Show one machine with its performance analysis
    Machine { id: String },
    /// List user accounts
    Users {
        #[arg(long, default_value = "")]
        search: String,
    },
    /// List projects with their progress
    Projects {
        #[arg(long, default_value = "")]
        search: String,
    },
    /// List notifications for a tab (all, unread, today or a type)
    Notifications {
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long, default_value = "all")]
        tab: NotificationTab,
    },
    /// Open a notification (marks it read)
    Notification { id: u32 },
    /// Request a failure prediction for one set of readings
    Predict {
        /// Temperature in °C (-50 to 200)
        #[arg(long, allow_hyphen_values = true, conflicts_with = "sample")]
        temperature: Option<f64>,
        /// Pressure in Pa (0 to 1000)
        #[arg(long, conflicts_with = "sample")]
        pressure: Option<f64>,
        /// Vibration in mm/s (0 to 100)
        #[arg(long, conflicts_with = "sample")]
        vibration: Option<f64>,
        /// Use the built-in sample readings
        #[arg(long, default_value_t = false)]
        sample: bool,
    },
    /// Check backend connectivity once
    Status,
    /// Run the connectivity probe until interrupted
    Watch,
    /// Sign in with the demo credential policy
    SignIn { email: String, password: String },
    /// Sign out and forget the stored session
    SignOut,
    /// Show the signed-in identity
    Whoami,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = ConfigManager::new(&cli.config)
        .load()
        .with_context(|| format!("loading configuration from {}", cli.config.display()))?;
    logging::init_with(config.logging.format);

    tracing::debug!(api = %config.api_base(), "configuration loaded");

    let mut app = commands::App::new(config, cli.json);
    app.run(cli.command).await
}
