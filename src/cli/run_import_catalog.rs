use serde::Deserialize;
use tracing::{info, warn};

use crate::database::{upsert_niche, upsert_state_with_cities};
use crate::models::{CliApp, Result};

const STATES_FILE: &str = "data/angi_states_and_cities.json";
const NICHES_FILE: &str = "data/angi_niches.json";

#[derive(Debug, Deserialize)]
struct StateImport {
    state_code: String,
    state_name: String,
    #[serde(default)]
    cities: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct NicheImport {
    niche_code: String,
    niche_name: String,
}

impl CliApp {
    /// Loads the catalog JSON files into sqlite. Re-running is harmless;
    /// rows already present are left alone.
    pub async fn run_import_catalog(&self) -> Result<()> {
        match tokio::fs::read_to_string(STATES_FILE).await {
            Ok(content) => {
                let states: Vec<StateImport> = serde_json::from_str(&content)?;
                let mut city_total = 0;
                for state in &states {
                    upsert_state_with_cities(
                        &self.db_pool,
                        &state.state_code,
                        &state.state_name,
                        &state.cities,
                    )
                    .await?;
                    city_total += state.cities.len();
                }
                info!(
                    "✅ Imported {} states with {} cities from {}",
                    states.len(),
                    city_total,
                    STATES_FILE
                );
            }
            Err(e) => warn!("Skipping states import ({}): {}", STATES_FILE, e),
        }

        match tokio::fs::read_to_string(NICHES_FILE).await {
            Ok(content) => {
                let niches: Vec<NicheImport> = serde_json::from_str(&content)?;
                for niche in &niches {
                    upsert_niche(&self.db_pool, &niche.niche_code, &niche.niche_name).await?;
                }
                info!("✅ Imported {} niches from {}", niches.len(), NICHES_FILE);
            }
            Err(e) => warn!("Skipping niches import ({}): {}", NICHES_FILE, e),
        }

        Ok(())
    }
}
