use models::{CliApp, Result};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod cli;
mod config;
mod database;
mod export;
mod models;
mod scrape;

use config::{load_config, Config};
use database::create_db_pool;
use tokio::signal;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let config = match load_config("config.yml").await {
        Ok(config) => config,
        Err(e) => {
            warn!("Failed to load config.yml: {}. Using defaults.", e);
            Config::default()
        }
    };

    let directive = format!("angi_leads={}", config.logging.level);
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(directive.parse().unwrap()),
        )
        .init();

    tokio::fs::create_dir_all(&config.output.directory).await?;

    info!("Initializing catalog database...");
    let db_pool = create_db_pool(&config.site.catalog_db).await?;

    let app = CliApp::new(config, db_pool).await?;

    // A Ctrl-C lands between top-level awaits, so an in-flight page walk is
    // abandoned whole rather than leaving a half-enriched batch behind.
    tokio::select! {
        result = app.run() => {
            result?;
        }
        _ = signal::ctrl_c() => {
            info!("Received Ctrl+C, shutting down gracefully...");
        }
    }

    Ok(())
}
