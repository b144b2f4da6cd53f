//! Personio CLI - attendance tracking from the terminal
//!
//! Thin client over the Personio attendance API: list a month's attendances,
//! submit working time, look up employee numbers.

mod api;
mod auth;
mod config;
mod error;
mod models;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "personio-cli")]
#[command(about = "Command-line client for the Personio attendance API", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Store API credentials and verify them against the auth endpoint
    Login {
        /// Personio API client id
        #[arg(long)]
        client_id: String,

        /// Personio API client secret
        #[arg(long)]
        client_secret: String,

        /// Your employee number (see `employees`)
        #[arg(long)]
        employee_id: Option<u64>,
    },

    /// Clear the cached token
    Logout {
        /// Also remove stored credentials and employee id
        #[arg(long)]
        all: bool,
    },

    /// Show credential and token status
    Status,

    /// List attendance records for a month (defaults to the current month)
    Attendances {
        /// Year, e.g. 2024
        #[arg(short, long)]
        year: Option<i32>,

        /// Month 1-12
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=12))]
        month: Option<u32>,
    },

    /// Submit working time for a day
    Track {
        /// Date as YYYY-MM-DD, or "today"
        #[arg(short, long, default_value = "today")]
        date: String,

        /// Start of the working day, HH:MM
        #[arg(short, long)]
        start: String,

        /// End of the working day, HH:MM
        #[arg(short, long)]
        end: String,

        /// Break in minutes
        #[arg(short, long, default_value = "60")]
        break_minutes: u32,
    },

    /// List company employees (to find your employee number)
    Employees,

    /// Show the configured employee's id and name (verify auth works)
    Whoami,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    match cli.command {
        Commands::Login {
            client_id,
            client_secret,
            employee_id,
        } => {
            tracing::info!("Verifying credentials...");
            auth::login(client_id, client_secret, employee_id).await?;
        }
        Commands::Logout { all } => {
            auth::logout(all).await?;
        }
        Commands::Status => {
            auth::status().await?;
        }
        Commands::Attendances { year, month } => {
            api::list_attendances(year, month).await?;
        }
        Commands::Track {
            date,
            start,
            end,
            break_minutes,
        } => {
            api::track_time(&date, &start, &end, break_minutes).await?;
        }
        Commands::Employees => {
            api::list_employees().await?;
        }
        Commands::Whoami => {
            api::whoami().await?;
        }
    }

    Ok(())
}
