mod stores;

use clap::{Parser, Subcommand};
use foodmap_client::FoodmapClient;
use foodmap_core::UnsetPricePolicy;
use foodmap_engine::StaticSource;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "foodmap")]
#[command(about = "Browse and filter the store catalog")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List the tag vocabulary with store counts
    Tags,
    /// Filter stores by keyword, price ceiling and tags
    Search {
        /// Case-sensitive substring of the store name
        #[arg(long, default_value = "")]
        keyword: String,
        /// Highest price rank to keep (1 = cheapest)
        #[arg(long)]
        price: Option<u32>,
        /// Required tag; repeat to require several
        #[arg(long = "tag")]
        tags: Vec<String>,
        /// Behaviour when no price is given (unbounded or hide-all)
        #[arg(long, value_parser = foodmap_core::parse_unset_price_policy)]
        unset_price: Option<UnsetPricePolicy>,
        /// Print matching rows as JSON
        #[arg(long)]
        json: bool,
    },
    /// Fetch and print full details for one store
    Show {
        id: String,
        /// Print the merged store as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = foodmap_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(env = %config.env, base_url = %config.base_url, "configuration loaded");

    if let Some(path) = &config.catalog_file {
        let catalog = foodmap_core::load_catalog_file(path)?;
        let source = StaticSource::from(catalog);
        stores::run(&source, &config, cli.command).await
    } else {
        let client = FoodmapClient::from_config(&config)
            .map_err(|e| anyhow::anyhow!("failed to build store client: {e}"))?;
        stores::run(&client, &config, cli.command).await
    }
}

#[cfg(test)]
mod tests;
