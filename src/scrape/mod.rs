// src/scrape/mod.rs
pub mod cards;
pub mod fetcher;
pub mod profile;
pub mod types;
pub mod walker;

pub use walker::ListingScraper;

/// Canonical listing URL for one state/city/niche combination.
pub fn listing_url(origin: &str, state_code: &str, city_slug: &str, niche_code: &str) -> String {
    format!(
        "{}/companylist/us/{}/{}/{}.htm",
        origin.trim_end_matches('/'),
        state_code,
        city_slug,
        niche_code
    )
}
