use crate::config::Config;
use crate::database::DbPool;
use crate::models::{CliApp, Result};

#[derive(Debug, Clone)]
pub enum MenuAction {
    ScrapeListings,
    ImportCatalog,
    ShowCatalogStats,
    Exit,
}

impl std::fmt::Display for MenuAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MenuAction::ScrapeListings => {
                write!(f, "🔍 Scrape company listings (state → cities → niche)")
            }
            MenuAction::ImportCatalog => {
                write!(f, "📥 Import states/cities/niches catalog from JSON")
            }
            MenuAction::ShowCatalogStats => write!(f, "📊 Show catalog statistics"),
            MenuAction::Exit => write!(f, "🚪 Exit"),
        }
    }
}

impl CliApp {
    pub async fn new(config: Config, db_pool: DbPool) -> Result<Self> {
        Ok(Self { config, db_pool })
    }
}
