mod commands;
mod render;

use anyhow::Result;
use calpick_core::config::CalpickConfig;
use calpick_core::date_range::DateRange;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "calpick")]
#[command(about = "Pick date ranges in the terminal and keep a small calendar of events")]
struct Cli {
    /// Locale for week layout and weekday names (e.g. "en-GB", "de_DE.UTF-8")
    #[arg(long, global = true)]
    locale: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a month with an optional range highlighted
    Grid {
        /// Month to show (YYYY-MM), defaults to the range start or today
        #[arg(short, long)]
        month: Option<String>,

        /// Range start (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,

        /// Range end (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
    },
    /// Pick a date range interactively
    Pick {
        /// Range start to begin with (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,

        /// Range end to begin with (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
    },
    /// Apply a JSON list of picker actions and print the resulting state
    Replay {
        /// File with the actions, or "-" for stdin
        file: PathBuf,
    },
    /// Manage saved events
    Events {
        #[command(subcommand)]
        command: EventsCommand,
    },
    /// Show the effective configuration
    Config,
}

#[derive(Subcommand)]
enum EventsCommand {
    /// List saved events
    List,
    /// Save a new event
    Add {
        title: String,

        /// Start (e.g. "2025-03-20T15:00" or RFC 3339)
        #[arg(short, long)]
        start: String,

        /// End (e.g. "2025-03-20T16:00" or RFC 3339)
        #[arg(short, long)]
        end: String,

        #[arg(short, long)]
        description: Option<String>,
    },
    /// Change a saved event
    Edit {
        id: String,

        #[arg(short, long)]
        title: Option<String>,

        /// New start (e.g. "2025-03-20T15:00" or RFC 3339)
        #[arg(short, long)]
        start: Option<String>,

        /// New end (e.g. "2025-03-20T16:00" or RFC 3339)
        #[arg(short, long)]
        end: Option<String>,

        /// New description, empty to clear it
        #[arg(short, long)]
        description: Option<String>,
    },
    /// Show one event
    Show { id: String },
    /// Delete an event
    Delete { id: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("CALPICK_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = CalpickConfig::load()?;
    let locale = cli.locale.unwrap_or_else(|| config.locale());
    tracing::debug!("Using locale {}", locale);

    match cli.command {
        Commands::Grid { month, from, to } => {
            let range = DateRange::from_args(from.as_deref(), to.as_deref())
                .map_err(|e| anyhow::anyhow!(e))?;
            commands::grid::run(&locale, month.as_deref(), range)
        }
        Commands::Pick { from, to } => {
            let range = DateRange::from_args(from.as_deref(), to.as_deref())
                .map_err(|e| anyhow::anyhow!(e))?;
            commands::pick::run(&config, &locale, range).await
        }
        Commands::Replay { file } => commands::replay::run(&locale, &file),
        Commands::Events { command } => {
            let client = commands::events::client(&config);
            match command {
                EventsCommand::List => commands::events::list(&client).await,
                EventsCommand::Add {
                    title,
                    start,
                    end,
                    description,
                } => commands::events::add(&client, title, &start, &end, description).await,
                EventsCommand::Edit {
                    id,
                    title,
                    start,
                    end,
                    description,
                } => {
                    let changes = commands::events::EventEdit {
                        title,
                        start,
                        end,
                        description,
                    };
                    commands::events::edit(&client, &id, changes).await
                }
                EventsCommand::Show { id } => commands::events::show(&client, &id).await,
                EventsCommand::Delete { id } => commands::events::delete(&client, &id).await,
            }
        }
        Commands::Config => commands::config::run(&config),
    }
}
