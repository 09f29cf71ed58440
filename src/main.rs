mod commands;
mod input;
mod render;
mod terminal;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use elderease_core::config::ElderEaseConfig;
use tracing_subscriber::EnvFilter;

use crate::input::parse_degrees;

#[derive(Parser)]
#[command(name = "elderease")]
#[command(about = "Organise ElderEase community events from your terminal")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all events
    List {
        /// Print the raw event list as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show one event in detail
    Show { id: String },
    /// Create a new event (prompts for anything not given)
    New {
        #[command(flatten)]
        fields: EventArgs,
    },
    /// Edit an existing event (prompts when no fields are given)
    Edit {
        id: String,

        #[command(flatten)]
        fields: EventArgs,
    },
    /// Delete an event
    Delete {
        id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
    /// Open an event's location in the browser
    Maps { id: String },
    /// Show where configuration and events are stored
    Config,
}

/// Event fields that can be given on the command line.
#[derive(Args, Debug, Default)]
pub struct EventArgs {
    /// Event title
    #[arg(short, long)]
    pub title: Option<String>,

    /// What the event is about
    #[arg(short, long)]
    pub description: Option<String>,

    /// Date (e.g. "2025-06-01", "next friday")
    #[arg(long)]
    pub date: Option<String>,

    /// Start time (e.g. "18:00", "6pm")
    #[arg(long)]
    pub time: Option<String>,

    /// Address or place name
    #[arg(short, long)]
    pub location: Option<String>,

    /// Latitude of the location
    #[arg(long, requires = "lng", allow_negative_numbers = true, value_parser = parse_degrees)]
    pub lat: Option<f64>,

    /// Longitude of the location
    #[arg(long, requires = "lat", allow_negative_numbers = true, value_parser = parse_degrees)]
    pub lng: Option<f64>,

    /// Maximum number of attendees
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    pub max_attendees: Option<u32>,
}

impl EventArgs {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.date.is_none()
            && self.time.is_none()
            && self.location.is_none()
            && self.lat.is_none()
            && self.max_attendees.is_none()
    }

    /// True when at least one required field was left off.
    pub fn has_missing_required(&self) -> bool {
        self.title.is_none()
            || self.description.is_none()
            || self.date.is_none()
            || self.time.is_none()
            || self.location.is_none()
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let config = ElderEaseConfig::load()?;

    match cli.command {
        Commands::List { json } => commands::list::run(&config, json),
        Commands::Show { id } => commands::show::run(&config, &id),
        Commands::New { fields } => commands::new::run(&config, fields),
        Commands::Edit { id, fields } => commands::edit::run(&config, &id, fields),
        Commands::Delete { id, force } => commands::delete::run(&config, &id, force),
        Commands::Maps { id } => commands::maps::run(&config, &id),
        Commands::Config => commands::config::run(&config),
    }
}
