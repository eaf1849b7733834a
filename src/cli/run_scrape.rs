use dialoguer::{theme::ColorfulTheme, MultiSelect, Select};
use tracing::{info, warn};

use crate::database::{get_cities, get_niches, get_states};
use crate::export::{export_to_csv, filter_contactable};
use crate::models::{CliApp, Result};
use crate::scrape::{listing_url, ListingScraper};

impl CliApp {
    /// Interactive selection of one state, one or more cities and one niche,
    /// then a full listing walk per city. Companies without a phone number
    /// are dropped before the CSV export.
    pub async fn run_scrape(&self) -> Result<()> {
        let states = get_states(&self.db_pool).await?;
        if states.is_empty() {
            warn!("Catalog is empty. Import the catalog JSON files first.");
            return Ok(());
        }

        let state_labels: Vec<String> = states
            .iter()
            .map(|s| format!("{} ({})", s.name, s.code.to_uppercase()))
            .collect();
        let state_idx = Select::with_theme(&ColorfulTheme::default())
            .with_prompt("🌎 Select a state")
            .items(&state_labels)
            .interact()?;
        let state = &states[state_idx];

        let cities = get_cities(&self.db_pool, state.id).await?;
        if cities.is_empty() {
            warn!("No cities on record for {}.", state.name);
            return Ok(());
        }

        let city_labels: Vec<&str> = cities.iter().map(|c| c.slug.as_str()).collect();
        let city_indices = MultiSelect::with_theme(&ColorfulTheme::default())
            .with_prompt(format!("🏙️  Select one or more cities in {}", state.name))
            .items(&city_labels)
            .interact()?;
        if city_indices.is_empty() {
            warn!("No cities selected.");
            return Ok(());
        }

        let niches = get_niches(&self.db_pool).await?;
        if niches.is_empty() {
            warn!("No niches on record. Import the catalog JSON files first.");
            return Ok(());
        }

        let niche_labels: Vec<String> = niches
            .iter()
            .map(|n| format!("{} ({})", n.name, n.code))
            .collect();
        let niche_idx = Select::with_theme(&ColorfulTheme::default())
            .with_prompt("🛠️  Select a niche (service)")
            .items(&niche_labels)
            .interact()?;
        let niche = &niches[niche_idx];

        let scraper = ListingScraper::new(&self.config)?;
        let mut all_companies = Vec::new();

        for &city_idx in &city_indices {
            let city = &cities[city_idx];
            let url = listing_url(&self.config.site.origin, &state.code, &city.slug, &niche.code);
            info!("🔗 Scraping {} for {}: {}", city.slug, niche.name, url);

            let companies = scraper.scrape_listing(&url).await;
            info!("Collected {} companies from {}", companies.len(), city.slug);

            all_companies.extend(filter_contactable(companies));
        }

        let filename = format!(
            "{}/angi_results_{}_{}_{}.csv",
            self.config.output.directory,
            state.code,
            niche.code,
            chrono::Utc::now().format("%Y%m%d")
        );
        let written = export_to_csv(&all_companies, &filename)?;
        if written > 0 {
            println!("\n💾 Saved {} companies to {}", written, filename);
        } else {
            println!("\n⚠️ No companies with contact phones found.");
        }

        Ok(())
    }
}
