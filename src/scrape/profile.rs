// src/scrape/profile.rs
use crate::scrape::types::ContactInfo;
use regex::Regex;
use scraper::{Html, Selector};
use tracing::debug;

/// Pulls phone, website and email out of one profile page.
///
/// Every lookup is a safe default-on-miss operation, so a malformed profile
/// document can never abort the batch it belongs to; it just comes back as
/// all-"N/A".
pub struct ProfileExtractor {
    phone_regex: Regex,
    email_regex: Regex,
    email_shape_regex: Regex,
    site_domain: String,
}

impl ProfileExtractor {
    pub fn new(site_domain: &str) -> Self {
        Self {
            // The phone number lives in a JSON blob inside a script tag,
            // sometimes with escaped quotes and sometimes plain.
            phone_regex: Regex::new(r#"\\?"phoneNumber\\?"\s*:\s*\\?"(\+1[0-9\-]+)\\?""#).unwrap(),
            email_regex: Regex::new(r#"Additional email\s*-\s*([^\\"]+)"#).unwrap(),
            // Loose on purpose, matching what the site actually embeds.
            email_shape_regex: Regex::new(r"^[^@\s]+@[^@\s]+\.[a-zA-Z0-9]+").unwrap(),
            site_domain: site_domain.to_string(),
        }
    }

    pub fn extract(&self, html: &str, url: &str) -> ContactInfo {
        let document = Html::parse_document(html);
        let mut contact = ContactInfo::default();

        let script_selector = Selector::parse("script").unwrap();
        for script in document.select(&script_selector) {
            let text = script.text().collect::<String>();
            if text.is_empty() {
                continue;
            }

            // Cheap substring pre-check before running the full pattern.
            if contact.phone == "N/A" && text.contains("+1") {
                if let Some(captures) = self.phone_regex.captures(&text) {
                    contact.phone = captures[1].to_string();
                }
            }

            if contact.email == "N/A" {
                if let Some(captures) = self.email_regex.captures(&text) {
                    let candidate = captures[1].trim();
                    if self.email_shape_regex.is_match(candidate) {
                        contact.email = candidate.trim_end_matches('.').to_string();
                    }
                }
            }
        }

        contact.website = self.extract_website(&document);

        debug!(
            "Profile {}: phone={}, website={}, email={}",
            url, contact.phone, contact.website, contact.email
        );
        contact
    }

    /// First outbound contact link in the business-info section. Links back
    /// into the scraped site itself are internal navigation, not the
    /// business's own website.
    fn extract_website(&self, document: &Html) -> String {
        let link_selector = Selector::parse("div.business-info a[role='link']").unwrap();

        document
            .select(&link_selector)
            .next()
            .and_then(|a| a.value().attr("href"))
            .filter(|href| !href.contains(&self.site_domain))
            .map(str::to_string)
            .unwrap_or_else(|| "N/A".to_string())
    }
}
