use crate::database::catalog_counts;
use crate::models::{CliApp, Result};

impl CliApp {
    pub async fn show_catalog_stats(&self) -> Result<()> {
        let counts = catalog_counts(&self.db_pool).await?;

        println!("\n📊 Catalog");
        println!("━━━━━━━━━━━━━━━━━━━━━━━━━━");
        println!("🌎 States: {}", counts.states);
        println!("🏙️  Cities: {}", counts.cities);
        println!("🛠️  Niches: {}", counts.niches);

        if counts.states == 0 {
            println!("💡 Catalog is empty — run the import first.");
        }

        Ok(())
    }
}
