// src/export.rs
use crate::models::Result;
use crate::scrape::types::{Company, NOT_AVAILABLE};
use std::io::Write;
use tracing::{info, warn};

const HEADER: &str = "name,profile_url,rating,reviews,phone,website,email";

/// Drops companies without a usable phone number; a lead we cannot call is
/// not a lead.
pub fn filter_contactable(companies: Vec<Company>) -> Vec<Company> {
    companies
        .into_iter()
        .filter(|c| c.phone != NOT_AVAILABLE)
        .collect()
}

/// Writes the retained companies to `filename` as CSV. When there is nothing
/// to write, no file is created and the caller just gets told so.
pub fn export_to_csv(companies: &[Company], filename: &str) -> Result<usize> {
    if companies.is_empty() {
        warn!("No companies with a phone number, skipping CSV export.");
        return Ok(0);
    }

    if let Some(parent) = std::path::Path::new(filename).parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut file = std::fs::File::create(filename)?;
    writeln!(file, "{}", HEADER)?;

    for company in companies {
        writeln!(
            file,
            "{},{},{},{},{},{},{}",
            csv_field(&company.name),
            csv_field(&company.profile_url),
            csv_field(&company.rating),
            csv_field(&company.reviews),
            csv_field(&company.phone),
            csv_field(&company.website),
            csv_field(&company.email),
        )?;
    }

    info!("💾 Saved {} companies to {}", companies.len(), filename);
    Ok(companies.len())
}

/// Business names routinely contain commas, so quote where CSV requires it.
fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
