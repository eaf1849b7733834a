use dialoguer::{theme::ColorfulTheme, Select};

use crate::{
    cli::cli::MenuAction,
    models::{CliApp, Result},
};
use tracing::error;

impl CliApp {
    pub async fn run(&self) -> Result<()> {
        println!("\n🚀 Welcome to Angi Leads!");
        println!("═══════════════════════════════════════");

        self.show_catalog_stats().await?;

        loop {
            let actions = vec![
                MenuAction::ScrapeListings,
                MenuAction::ImportCatalog,
                MenuAction::ShowCatalogStats,
                MenuAction::Exit,
            ];

            let selection = Select::with_theme(&ColorfulTheme::default())
                .with_prompt("\nSelect an action")
                .default(0)
                .items(&actions)
                .interact()?;

            match &actions[selection] {
                MenuAction::ScrapeListings => {
                    if let Err(e) = self.run_scrape().await {
                        error!("Scrape failed: {}", e);
                    }
                }
                MenuAction::ImportCatalog => {
                    if let Err(e) = self.run_import_catalog().await {
                        error!("Catalog import failed: {}", e);
                    }
                }
                MenuAction::ShowCatalogStats => {
                    if let Err(e) = self.show_catalog_stats().await {
                        error!("Failed to show catalog stats: {}", e);
                    }
                }
                MenuAction::Exit => {
                    println!("👋 Goodbye!");
                    break;
                }
            }
        }

        Ok(())
    }
}
