//! Command-line front end for watch list management.
//!
//! Runs the watch list operations directly against PostgreSQL.
//!
//! # Usage
//!
//! ```bash
//! # Show a user's watch list
//! cargo run -- show --user <USER_ID>
//!
//! # Track a series
//! cargo run -- add --user <USER_ID> --category watching --series <SERIES_ID> --season 1 --episode 3
//!
//! # Move an entry between categories
//! cargo run -- move --user <USER_ID> --from watching --to completed --entry <ENTRY_ID>
//!
//! # Apply migrations
//! cargo run -- db migrate
//! ```
//!
//! Every watch list command accepts `--json` to print a `{data, error}` envelope.

use watchlist_service::application::read_model::{DenormalizedWatchList, PopulatedEntry};
use watchlist_service::config;
use watchlist_service::domain::entities::{Category, SeriesStateEntry};
use watchlist_service::error::{AppError, Envelope};
use watchlist_service::infrastructure::persistence;
use watchlist_service::state::AppState;
use watchlist_service::telemetry;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use serde::Serialize;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

/// Manage per-user series watch lists.
#[derive(Parser)]
#[command(name = "watchlist")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    WatchList(WatchListCommand),

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum WatchListCommand {
    /// Show a user's watch list
    Show {
        #[command(flatten)]
        target: UserArg,

        #[arg(long)]
        json: bool,
    },

    /// Start tracking a series in a category
    Add {
        #[command(flatten)]
        target: UserArg,

        /// watching, completed, on_hold, dropped or plan_to_watch
        #[arg(short, long, value_parser = parse_category)]
        category: Category,

        #[arg(short, long)]
        series: Uuid,

        #[command(flatten)]
        progress: ProgressArgs,

        #[arg(long)]
        json: bool,
    },

    /// Stop tracking an entry
    Remove {
        #[command(flatten)]
        target: UserArg,

        #[arg(short, long, value_parser = parse_category)]
        category: Category,

        #[arg(short, long)]
        entry: Uuid,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,

        #[arg(long)]
        json: bool,
    },

    /// Overwrite series and progress of an entry
    Update {
        #[command(flatten)]
        target: UserArg,

        #[arg(short, long, value_parser = parse_category)]
        category: Category,

        #[arg(short, long)]
        entry: Uuid,

        #[arg(short, long)]
        series: Uuid,

        #[command(flatten)]
        progress: ProgressArgs,

        #[arg(long)]
        json: bool,
    },

    /// Move an entry to another category
    Move {
        #[command(flatten)]
        target: UserArg,

        #[arg(long, value_parser = parse_category)]
        from: Category,

        #[arg(long, value_parser = parse_category)]
        to: Category,

        #[arg(short, long)]
        entry: Uuid,

        #[arg(long)]
        json: bool,
    },
}

#[derive(Args)]
struct UserArg {
    /// User id
    #[arg(short, long)]
    user: Uuid,
}

#[derive(Args)]
struct ProgressArgs {
    /// Season number (1-based)
    #[arg(long)]
    season: Option<i32>,

    /// Episode number (0-based)
    #[arg(long)]
    episode: Option<i32>,
}

#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,

    /// Apply pending migrations
    Migrate,
}

fn parse_category(value: &str) -> Result<Category, String> {
    value.parse().map_err(|e: AppError| e.to_string())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env()?;
    telemetry::init(&config);
    config.print_summary();

    let pool = persistence::connect(&config)
        .await
        .context("Failed to connect to database")?;

    let state = AppState::new(Arc::new(pool), &config);

    match cli.command {
        Commands::WatchList(command) => handle_watch_list_command(command, &state).await,
        Commands::Db { action } => handle_db_action(action, &state.pool).await,
    }
}

/// Dispatches watch list commands to the service.
async fn handle_watch_list_command(command: WatchListCommand, state: &AppState) -> Result<()> {
    let service = &state.watch_list_service;

    match command {
        WatchListCommand::Show { target, json } => {
            let result = service.get_watch_list(target.user).await;
            report(result, json, print_watch_list)
        }
        WatchListCommand::Add {
            target,
            category,
            series,
            progress,
            json,
        } => {
            let result = service
                .add_to_category(
                    target.user,
                    category,
                    series,
                    progress.season,
                    progress.episode,
                )
                .await;
            report(result, json, |entry| {
                print_entry_outcome("Added to", category, entry)
            })
        }
        WatchListCommand::Remove {
            target,
            category,
            entry,
            yes,
            json,
        } => {
            if !yes && !json {
                let confirmed = Confirm::new()
                    .with_prompt(format!("Remove entry {entry} from {category}?"))
                    .default(false)
                    .interact()?;

                if !confirmed {
                    println!("{}", "Cancelled".red());
                    return Ok(());
                }
            }

            let result = service
                .remove_from_category(target.user, category, entry)
                .await;
            report(result, json, |_| {
                println!(
                    "{} {} {}",
                    "Removed".green().bold(),
                    entry.to_string().bright_black(),
                    format!("from {category}").cyan()
                );
            })
        }
        WatchListCommand::Update {
            target,
            category,
            entry,
            series,
            progress,
            json,
        } => {
            let result = service
                .update_in_category(
                    target.user,
                    category,
                    entry,
                    series,
                    progress.season,
                    progress.episode,
                )
                .await;
            report(result, json, |entry| {
                print_entry_outcome("Updated in", category, entry)
            })
        }
        WatchListCommand::Move {
            target,
            from,
            to,
            entry,
            json,
        } => {
            let result = service.move_to_category(target.user, from, to, entry).await;
            report(result, json, |entry| print_entry_outcome("Moved to", to, entry))
        }
    }
}

/// Prints a service result either as a JSON envelope or through `render`.
///
/// Failures are reported and turned into a non-zero exit status.
fn report<T: Serialize>(
    result: Result<T, AppError>,
    json: bool,
    render: impl FnOnce(&T),
) -> Result<()> {
    let failed = result.as_ref().err().map(|e| e.code());

    if json {
        let envelope: Envelope<T> = result.into();
        println!("{}", serde_json::to_string_pretty(&envelope)?);
    } else {
        match &result {
            Ok(value) => render(value),
            Err(e) => eprintln!("{} {}", "Error:".red().bold(), e),
        }
    }

    match failed {
        Some(code) => anyhow::bail!("command failed ({code})"),
        None => Ok(()),
    }
}

fn print_entry_outcome(action: &str, category: Category, entry: &SeriesStateEntry) {
    println!(
        "{} {}",
        action.green().bold(),
        category.to_string().cyan().bold()
    );
    println!("  Entry:    {}", entry.id.to_string().bright_black());
    println!("  Series:   {}", entry.series_id.to_string().bright_white());
    println!("  Progress: {}", format_progress(entry.season_number, entry.episode_number));
}

/// Renders every category with its entries in stored order.
///
/// ```text
/// watching (2)
///   0f6c...  Severance                      S1 E3
///   9a1d...  Andor                          -
/// completed (0)
/// ```
fn print_watch_list(view: &DenormalizedWatchList) {
    println!(
        "{} {}",
        "Watch list".bright_blue().bold(),
        view.watch_list_id.to_string().bright_black()
    );
    println!();

    for category in Category::ALL {
        let entries = view.sequence(category);
        println!(
            "{} ({})",
            category.to_string().bright_white().bold(),
            entries.len()
        );

        for entry in entries {
            print_populated_entry(entry);
        }
    }

    println!();
    println!("  Total: {}", view.len().to_string().bright_white().bold());
}

fn print_populated_entry(entry: &PopulatedEntry) {
    let title = match &entry.series {
        Some(series) => series.title.cyan(),
        None => format!("<missing {}>", entry.series_id).yellow(),
    };

    println!(
        "  {}  {:<30} {}",
        entry.id.to_string().bright_black(),
        title,
        format_progress(entry.season_number, entry.episode_number)
    );
}

fn format_progress(season: Option<i32>, episode: Option<i32>) -> String {
    match (season, episode) {
        (None, None) => "-".to_string(),
        (Some(s), None) => format!("S{s}"),
        (None, Some(e)) => format!("E{e}"),
        (Some(s), Some(e)) => format!("S{s} E{e}"),
    }
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            let users: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
                .fetch_one(pool)
                .await?;

            let entries: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM series_state_entries")
                .fetch_one(pool)
                .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!("  Users:      {}", users.to_string().bright_green().bold());
            println!("  Entries:    {}", entries.to_string().bright_green().bold());
            println!();
        }
        DbAction::Migrate => {
            persistence::migrate(pool)
                .await
                .context("Failed to apply migrations")?;

            println!("{}", "Migrations applied".green().bold());
        }
    }

    Ok(())
}
