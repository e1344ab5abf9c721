mod api;
mod cli;
mod config;
mod models;
mod services;
mod store;
mod utils;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::Config;
use crate::store::RecordStore;

#[derive(Parser)]
#[command(name = "iplboard")]
#[command(about = "IPL team performance dashboard")]
struct Cli {
    /// Match table to load (overrides IPL_DATA_PATH)
    #[arg(short, long, global = true)]
    data: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the API server
    Serve {
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// List every team in the match table
    Teams,
    /// Print the dashboard for one team
    Team {
        #[arg(short, long)]
        name: String,
    },
    /// Print the league-wide leaderboards
    Leaders,
}

fn load_store(config: &Config) -> Result<RecordStore> {
    let store = RecordStore::load(&config.data_path).context("Could not load the match table")?;
    if store.invalid_cells() > 0 {
        tracing::warn!("{} cells could not be parsed and were left empty", store.invalid_cells());
    }
    if store.is_empty() {
        tracing::warn!("{} contains no usable match records", config.data_path.display());
    }
    Ok(store)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load environment variables
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    let port = match &cli.command {
        Some(Commands::Serve { port }) => *port,
        _ => None,
    };
    let config = Config::from_env().with_overrides(cli.data, port);
    let store = load_store(&config)?;

    match cli.command {
        Some(Commands::Teams) => cli::list_teams(&store)?,
        Some(Commands::Team { name }) => {
            tracing::info!("Querying team: {}", name);
            cli::show_team(&store, &name)?;
        }
        Some(Commands::Leaders) => cli::show_leaders(&store)?,
        Some(Commands::Serve { .. }) | None => {
            tracing::info!("Starting IPL dashboard API server on port {}", config.port);
            api::serve(store, config.port).await?;
        }
    }

    Ok(())
}
