// src/main.rs

use std::sync::Arc;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};

use repomuseum::application::commands::*;
use repomuseum::application::state::AppState;
use repomuseum::config::MuseumConfig;
use repomuseum::integrations::GitHubClient;

#[derive(Parser)]
#[command(name = "repomuseum")]
#[command(about = "Exhibitions of abandoned GitHub repositories", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Months without activity before a repository counts as abandoned
    #[arg(short, long, global = true)]
    months: Option<u32>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List the curated collections
    Collections,

    /// Find one account's abandoned repositories
    Explore {
        /// GitHub account name
        account: String,
    },

    /// Browse a curated collection (top exhibits across its accounts)
    Collection {
        /// Collection key, see `collections`
        key: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .target(env_logger::Target::Stderr)
        .init();

    // 1. CONFIGURATION
    let config = MuseumConfig::from_env()?;

    // 2. INFRASTRUCTURE
    let client = Arc::new(GitHubClient::new(&config)?);

    // 3. APPLICATION STATE
    let caption_seed = chrono::Utc::now().timestamp_subsec_nanos() as usize;
    let state = AppState::from_config(&config, client, caption_seed);

    if let Some(months) = cli.months {
        change_threshold(&state, months).await.map_err(|e| anyhow!(e))?;
    }

    // 4. COMMAND
    let output = match cli.command {
        Commands::Collections => serde_json::to_string_pretty(&list_collections())?,
        Commands::Explore { account } => {
            let session = explore_account(&state, &account).await.map_err(|e| anyhow!(e))?;
            serde_json::to_string_pretty(&session)?
        }
        Commands::Collection { key } => {
            let session = open_collection(&state, &key).await.map_err(|e| anyhow!(e))?;
            serde_json::to_string_pretty(&session)?
        }
    };

    println!("{}", output);
    Ok(())
}
