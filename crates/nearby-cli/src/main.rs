mod commands;
mod render;
mod wiring;

use clap::{Parser, Subcommand};
use nearby_core::SortKey;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "nearby")]
#[command(about = "Find, rank and save places around you")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search for places near the current location
    Search {
        /// Place type to search for (e.g. cafe, restaurant, bar)
        #[arg(long, default_value = "cafe")]
        category: String,
        /// Search radius in meters
        #[arg(long, default_value_t = 1500)]
        radius: u32,
        /// Hide places rated below this value; unrated places are always hidden
        #[arg(long, default_value_t = 0.0)]
        min_rating: f64,
        /// Only include places open right now
        #[arg(long)]
        open_now: bool,
        /// Result ordering: name, distance or rating
        #[arg(long, default_value = "rating")]
        sort: SortKey,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// List saved places
    Saved {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Save a place, or unsave it if already saved
    Toggle {
        /// Provider place ID
        place_id: String,
    },
    /// Remove every saved place
    ClearSaved,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = nearby_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!(?config, "configuration loaded");

    let pipeline = wiring::build_pipeline(&config)?;

    match cli.command {
        Commands::Search {
            category,
            radius,
            min_rating,
            open_now,
            sort,
            json,
        } => {
            let criteria = nearby_core::SearchCriteria {
                category,
                radius_meters: radius,
                min_rating,
                open_now_only: open_now,
                sort_key: sort,
            };
            commands::run_search(&pipeline, &config, &criteria, json).await?;
        }
        Commands::Saved { json } => commands::run_saved(&pipeline, &config, json).await?,
        Commands::Toggle { place_id } => commands::run_toggle(&pipeline, &place_id).await?,
        Commands::ClearSaved => commands::run_clear_saved(&pipeline).await?,
    }

    Ok(())
}
