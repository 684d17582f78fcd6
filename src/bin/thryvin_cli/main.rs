// ABOUTME: Thryvin CLI - drives the client core against the backend and a file-backed store
// ABOUTME: Plan generation and edits, workout completion, coach chat, settings, and stats
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Thryvin
//!
//! Usage:
//! ```bash
//! # Store the access token used for authenticated endpoints
//! thryvin-cli login --token "$THRYVIN_TOKEN"
//!
//! # Import the onboarding profile used for generation
//! thryvin-cli profile import profile.json
//!
//! # Show (and generate if needed) this week's plan
//! thryvin-cli plan show
//!
//! # Regenerate ignoring the cache
//! thryvin-cli plan generate --force
//!
//! # Swap two days and finish a workout
//! thryvin-cli plan swap 2025-03-03 2025-03-05
//! thryvin-cli plan complete 2025-03-03 --effort 7 --minutes 45
//!
//! # Ask the coach
//! thryvin-cli ask "what's today's workout?"
//! ```

mod commands;
mod helpers;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use chrono::NaiveDate;
use std::sync::Arc;
use thryvin::api::ThryvinApiClient;
use thryvin::clock::{Clock, SystemClock};
use thryvin::config::ClientConfig;
use thryvin::logging::LoggingConfig;
use thryvin::schedule::WorkoutStore;
use thryvin::storage::{FileStorage, LocalStore};
use tracing::info;

#[derive(Parser)]
#[command(
    name = "thryvin-cli",
    about = "Thryvin fitness client",
    long_about = "Command-line front end for the Thryvin client core: rolling workout plan, coach chat, settings, and stats."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Local user id override
    #[arg(long, global = true)]
    user: Option<String>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Store the API access token
    Login {
        /// Bearer token
        #[arg(long)]
        token: String,
    },

    /// Onboarding profile commands
    Profile {
        #[command(subcommand)]
        action: ProfileCommand,
    },

    /// Workout plan commands
    Plan {
        #[command(subcommand)]
        action: PlanCommand,
    },

    /// Ask the coach a question
    Ask {
        /// Message text
        message: String,
    },

    /// Settings commands
    Settings {
        #[command(subcommand)]
        action: SettingsCommand,
    },

    /// Show workout stats and personal bests
    Stats,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum ProfileCommand {
    /// Import a profile from a JSON file
    Import {
        /// Path to the profile JSON
        path: std::path::PathBuf,
    },
    /// Show the stored profile
    Show,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum PlanCommand {
    /// Show the plan, generating it if the cache is missing or outdated
    Show,
    /// Generate the plan
    Generate {
        /// Ignore the cached plan
        #[arg(long)]
        force: bool,
    },
    /// Swap the content of two days
    Swap {
        /// First date (YYYY-MM-DD)
        first: NaiveDate,
        /// Second date (YYYY-MM-DD)
        second: NaiveDate,
    },
    /// Mark a day's workout as finished
    Complete {
        /// Date of the workout (YYYY-MM-DD)
        date: NaiveDate,
        /// Perceived effort 1-10
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=10))]
        effort: Option<u8>,
        /// Minutes actually trained
        #[arg(long)]
        minutes: Option<u32>,
    },
}

#[non_exhaustive]
#[derive(Subcommand)]
enum SettingsCommand {
    /// Show the current settings
    Show,
    /// Set one setting (notifications, reminders, biometrics, theme, units, pin)
    Set {
        /// Setting name
        name: String,
        /// New value
        value: String,
    },
    /// Move settings saved by older versions into this user's scope
    Migrate,
}

/// Shared handles for command implementations
pub struct App {
    /// Loaded configuration
    pub config: ClientConfig,
    /// File-backed local store
    pub store: LocalStore,
    /// Backend client
    pub api: Arc<ThryvinApiClient>,
    /// Wall clock
    pub clock: Arc<dyn Clock>,
}

impl App {
    /// Schedule store for the configured user
    pub fn workout_store(&self) -> WorkoutStore {
        WorkoutStore::new(
            &self.config.user_id,
            self.store.clone(),
            self.api.clone(),
            self.api.clone(),
            Arc::clone(&self.clock),
            self.config.schedule_options(),
        )
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut logging = LoggingConfig::from_env();
    if cli.verbose {
        logging.level = "debug".into();
    }
    logging.init()?;

    let mut config = ClientConfig::from_env().context("Failed to load configuration")?;
    if let Some(user) = cli.user {
        config.user_id = user;
        config.validate()?;
    }

    let backend = FileStorage::new(&config.data_dir)
        .await
        .context("Failed to open local storage")?;
    let store = LocalStore::new(Arc::new(backend));
    let api = Arc::new(ThryvinApiClient::new(&config, store.clone())?);
    let app = App {
        config,
        store,
        api,
        clock: Arc::new(SystemClock),
    };
    info!(user.id = %app.config.user_id, "Thryvin CLI");

    match cli.command {
        Command::Login { token } => {
            app.api.set_access_token(&token).await;
            println!("Access token saved.");
        }
        Command::Profile { action } => match action {
            ProfileCommand::Import { path } => commands::plan::import_profile(&app, &path).await?,
            ProfileCommand::Show => commands::plan::show_profile(&app).await?,
        },
        Command::Plan { action } => match action {
            PlanCommand::Show => commands::plan::generate(&app, false).await,
            PlanCommand::Generate { force } => commands::plan::generate(&app, force).await,
            PlanCommand::Swap { first, second } => {
                commands::plan::swap(&app, first, second).await?;
            }
            PlanCommand::Complete {
                date,
                effort,
                minutes,
            } => commands::plan::complete(&app, date, effort, minutes).await?,
        },
        Command::Ask { message } => commands::coach::ask(&app, &message).await,
        Command::Settings { action } => match action {
            SettingsCommand::Show => commands::settings::show(&app).await,
            SettingsCommand::Set { name, value } => {
                commands::settings::set(&app, &name, &value).await?;
            }
            SettingsCommand::Migrate => commands::settings::migrate(&app).await,
        },
        Command::Stats => commands::coach::stats(&app).await,
    }

    Ok(())
}
