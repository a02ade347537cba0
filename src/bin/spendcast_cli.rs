//! Spendcast command line entry point.

use std::{path::PathBuf, process::ExitCode};

use chrono::{DateTime, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use serde::Serialize;
use thiserror::Error;

use spendcast_core::{
    config::{Config, ConfigManager, FrequencyPolicy, ProjectionSettings},
    core::{
        projection::{instant_from_millis, ProjectionWindow},
        services::{
            AccountService, ProjectionService, RecurringPaymentService, ServiceError,
            TransactionService,
        },
        utils::PathResolver,
    },
    errors::{ConfigError, ProjectionError, StoreError},
    storage::JsonStore,
    utils::build_info,
};

#[derive(Parser, Debug)]
#[command(name = "spendcast")]
#[command(version)]
#[command(about = "Inspect accounts and project outstanding recurring payments", long_about = None)]
struct Args {
    /// Application directory (defaults to $SPENDCAST_HOME or ~/.spendcast)
    #[arg(long, global = true)]
    home: Option<PathBuf>,

    /// Data directory holding db.json, overriding the configured one
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Summaries of every bank account
    Accounts,
    /// Transactions booked on one account
    Transactions {
        #[arg(long)]
        account: String,
    },
    /// Recurring payments, optionally limited to one account
    Recurring {
        #[arg(long)]
        account: Option<String>,
    },
    /// Occurrences in [from, to) with no matching transaction
    Outstanding {
        #[arg(long)]
        account: String,
        /// Window start (RFC 3339, YYYY-MM-DD or epoch milliseconds)
        #[arg(long)]
        from: String,
        /// Window end, exclusive
        #[arg(long)]
        to: String,
        /// Fail instead of skipping payments with an unrecognized frequency
        #[arg(long)]
        strict: bool,
    },
    /// Build metadata
    Version,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Service(#[from] ServiceError),
    #[error(transparent)]
    Projection(#[from] ProjectionError),
    #[error("Invalid date `{0}`: expected RFC 3339, YYYY-MM-DD or epoch milliseconds")]
    InvalidDate(String),
    #[error("Failed to render output: {0}")]
    Output(#[from] serde_json::Error),
}

fn main() -> ExitCode {
    spendcast_core::init();
    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), CliError> {
    let command = match args.command {
        Command::Version => return print_json(&build_info::current()),
        command => command,
    };

    let base = PathResolver::resolve_base(args.home);
    let mut config = ConfigManager::with_base_dir(base.clone())?.load()?;
    if let Some(db) = args.db {
        config.data_dir = Some(db);
    }
    let store = JsonStore::from_config(&config, &base)?;

    match command {
        Command::Accounts => {
            let database = store.database()?;
            print_json(&AccountService::summaries(database, store.clock()))
        }
        Command::Transactions { account } => {
            let database = store.database()?;
            let transactions = TransactionService::for_account(database, &account, None)
                .ok_or(ProjectionError::AccountNotFound(account))?;
            print_json(&transactions)
        }
        Command::Recurring { account: None } => {
            print_json(&RecurringPaymentService::list_all(&store)?)
        }
        Command::Recurring {
            account: Some(account),
        } => {
            let payments = RecurringPaymentService::for_account(&store, &account)?
                .ok_or(ProjectionError::AccountNotFound(account))?;
            print_json(&payments)
        }
        Command::Outstanding {
            account,
            from,
            to,
            strict,
        } => {
            let window = ProjectionWindow::new(parse_instant(&from)?, parse_instant(&to)?)?;
            let settings = projection_settings(&config, strict);
            let report =
                ProjectionService::outstanding(&store, &settings, &account, window, None)?;
            print_json(&report)
        }
        Command::Version => print_json(&build_info::current()),
    }
}

fn projection_settings(config: &Config, strict: bool) -> ProjectionSettings {
    let mut settings = config.projection.clone();
    if strict {
        settings.frequency_policy = FrequencyPolicy::Strict;
    }
    settings
}

fn parse_instant(raw: &str) -> Result<DateTime<Utc>, CliError> {
    let raw = raw.trim();
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Ok(instant.with_timezone(&Utc));
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(midnight.and_utc());
        }
    }
    if let Ok(millis) = raw.parse::<i64>() {
        return Ok(instant_from_millis(millis)?);
    }
    Err(CliError::InvalidDate(raw.to_string()))
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
