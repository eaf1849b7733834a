// src/scrape/walker.rs
use crate::config::Config;
use crate::models::Result;
use crate::scrape::cards::extract_cards;
use crate::scrape::fetcher::fetch_batch;
use crate::scrape::profile::ProfileExtractor;
use crate::scrape::types::{Company, FetchOutcome};
use reqwest::Client;
use std::time::Duration;
use tracing::{info, warn};
use url::Url;

pub struct ListingScraper {
    client: Client,
    extractor: ProfileExtractor,
    origin: String,
    profile_concurrency: usize,
    page_delay: Duration,
}

impl ListingScraper {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .user_agent("Mozilla/5.0 (compatible; LeadScraper/1.0)")
            .timeout(Duration::from_secs(config.scraping.request_timeout_seconds))
            .build()?;

        let origin = config.site.origin.trim_end_matches('/').to_string();
        let site_domain = site_domain(&origin)?;

        Ok(Self {
            client,
            extractor: ProfileExtractor::new(&site_domain),
            origin,
            profile_concurrency: config.scraping.profile_concurrency,
            page_delay: Duration::from_millis(config.scraping.page_delay_ms),
        })
    }

    /// Walks every result page of one listing URL, enriching each page's
    /// cards from their profile pages before moving on.
    ///
    /// Pages are strictly sequential because page n+1's existence is only
    /// known from page n's pagination footer; the profile fetches within a
    /// page run as one bounded-concurrency batch. A failed listing-page
    /// fetch ends the walk with whatever has been collected so far.
    pub async fn scrape_listing(&self, url: &str) -> Vec<Company> {
        let mut results = Vec::new();
        let mut page: u32 = 1;

        loop {
            let paged_url = if page > 1 {
                format!("{url}?page={page}")
            } else {
                url.to_string()
            };
            info!("📄 Scraping page {}: {}", page, paged_url);

            let html = match self.fetch_page(&paged_url).await {
                Ok(html) => html,
                Err(e) => {
                    warn!("Failed to fetch listing page {}: {}", paged_url, e);
                    return results;
                }
            };

            let (mut companies, page_state) = extract_cards(&html, &self.origin, page);
            if companies.is_empty() {
                warn!("No business cards found on page {}, stopping.", page);
                return results;
            }

            if let Some(state) = page_state {
                info!(
                    "🔎 Pagination: current={}, last={}",
                    state.current_page, state.last_page
                );
            }

            self.enrich_companies(&mut companies).await;
            results.extend(companies);

            // No footer means no further pages can be assumed.
            let is_last = page_state.map(|state| state.is_last()).unwrap_or(true);
            if is_last {
                info!("✅ All pages scraped ({} companies).", results.len());
                return results;
            }

            page += 1;
            if !self.page_delay.is_zero() {
                tokio::time::sleep(self.page_delay).await;
            }
        }
    }

    /// Fetches each enrichable card's profile page and merges the extracted
    /// contact fields back into the card at the same submission index.
    async fn enrich_companies(&self, companies: &mut [Company]) {
        let enrichable: Vec<usize> = companies
            .iter()
            .enumerate()
            .filter(|(_, c)| c.has_profile())
            .map(|(idx, _)| idx)
            .collect();

        if enrichable.is_empty() {
            return;
        }

        let urls: Vec<String> = enrichable
            .iter()
            .map(|&idx| companies[idx].profile_url.clone())
            .collect();

        info!(
            "Enriching {} of {} cards (concurrency {})",
            urls.len(),
            companies.len(),
            self.profile_concurrency
        );

        let outcomes = fetch_batch(&self.client, &urls, self.profile_concurrency).await;

        for (&idx, outcome) in enrichable.iter().zip(outcomes) {
            let company = &mut companies[idx];
            match outcome {
                FetchOutcome::Success(html) => {
                    let contact = self.extractor.extract(&html, &company.profile_url);
                    company.phone = contact.phone;
                    company.website = contact.website;
                    company.email = contact.email;
                }
                FetchOutcome::Failure(cause) => {
                    warn!("Failed profile request for {}: {}", company.name, cause);
                }
            }
        }
    }

    async fn fetch_page(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(format!("HTTP error: {}", response.status()).into());
        }

        Ok(response.text().await?)
    }
}

fn site_domain(origin: &str) -> Result<String> {
    let parsed = Url::parse(origin)?;
    let host = parsed
        .host_str()
        .ok_or_else(|| format!("listing origin has no host: {origin}"))?;
    Ok(host.trim_start_matches("www.").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config(origin: &str) -> Config {
        let mut config = Config::default();
        config.site.origin = origin.to_string();
        config.scraping.page_delay_ms = 0;
        config
    }

    fn card(name: &str, profile_path: &str) -> String {
        format!(
            r#"<article class="ProList_businessProCard__qvaeT">
                <h4>{name}</h4>
                <a data-testid="profile-link" href="{profile_path}">p</a>
            </article>"#
        )
    }

    fn footer(current: u32, last: u32) -> String {
        format!(
            r#"<div class="PaginationFooter_root__HoNjH">
                <button class="PaginationFooter_highlighted__tSL7o">{current}</button>
                <button data-testid="last-page">{last}</button>
            </div>"#
        )
    }

    fn profile_page(phone: &str) -> String {
        format!(r#"<script>{{"phoneNumber":"{phone}"}}</script>"#)
    }

    #[tokio::test]
    async fn stops_after_last_page() {
        let server = MockServer::start().await;

        let page1 = format!("{}{}", card("One", "/co/one.htm"), footer(1, 2));
        let page2 = format!("{}{}", card("Two", "/co/two.htm"), footer(2, 2));

        Mock::given(method("GET"))
            .and(path("/list.htm"))
            .and(query_param("page", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_string(page2))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/list.htm"))
            .respond_with(ResponseTemplate::new(200).set_body_string(page1))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/co/one.htm"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string(profile_page("+1111-111-1111")),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/co/two.htm"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string(profile_page("+1222-222-2222")),
            )
            .mount(&server)
            .await;

        let scraper = ListingScraper::new(&test_config(&server.uri())).unwrap();
        let results = scraper
            .scrape_listing(&format!("{}/list.htm", server.uri()))
            .await;

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].name, "One");
        assert_eq!(results[0].phone, "+1111-111-1111");
        assert_eq!(results[1].name, "Two");
        assert_eq!(results[1].phone, "+1222-222-2222");
    }

    #[tokio::test]
    async fn page_without_footer_is_the_only_page() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/list.htm"))
            .respond_with(ResponseTemplate::new(200).set_body_string(card("Solo", "/co/solo.htm")))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/co/solo.htm"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
            .mount(&server)
            .await;

        let scraper = ListingScraper::new(&test_config(&server.uri())).unwrap();
        let results = scraper
            .scrape_listing(&format!("{}/list.htm", server.uri()))
            .await;

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].phone, "N/A");
    }

    #[tokio::test]
    async fn empty_page_terminates_without_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/list.htm"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html><body></body></html>"))
            .mount(&server)
            .await;

        let scraper = ListingScraper::new(&test_config(&server.uri())).unwrap();
        let results = scraper
            .scrape_listing(&format!("{}/list.htm", server.uri()))
            .await;

        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn failed_listing_fetch_returns_accumulated_results() {
        let server = MockServer::start().await;

        let page1 = format!("{}{}", card("One", "/co/one.htm"), footer(1, 3));
        Mock::given(method("GET"))
            .and(path("/list.htm"))
            .and(query_param("page", "2"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/list.htm"))
            .respond_with(ResponseTemplate::new(200).set_body_string(page1))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/co/one.htm"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
            .mount(&server)
            .await;

        let scraper = ListingScraper::new(&test_config(&server.uri())).unwrap();
        let results = scraper
            .scrape_listing(&format!("{}/list.htm", server.uri()))
            .await;

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "One");
    }

    #[tokio::test]
    async fn one_failed_profile_leaves_defaults_on_that_card_only() {
        let server = MockServer::start().await;

        let mut page = String::new();
        for i in 0..10 {
            page.push_str(&card(&format!("Company {i}"), &format!("/co/{i}.htm")));
        }

        Mock::given(method("GET"))
            .and(path("/list.htm"))
            .respond_with(ResponseTemplate::new(200).set_body_string(page))
            .mount(&server)
            .await;
        for i in 0..10 {
            let template = if i == 3 {
                ResponseTemplate::new(500)
            } else {
                ResponseTemplate::new(200)
                    .set_body_string(profile_page(&format!("+1555-000-000{i}")))
            };
            Mock::given(method("GET"))
                .and(path(format!("/co/{i}.htm")))
                .respond_with(template)
                .mount(&server)
                .await;
        }

        let scraper = ListingScraper::new(&test_config(&server.uri())).unwrap();
        let results = scraper
            .scrape_listing(&format!("{}/list.htm", server.uri()))
            .await;

        assert_eq!(results.len(), 10);
        for (i, company) in results.iter().enumerate() {
            if i == 3 {
                assert_eq!(company.phone, "N/A");
                assert_eq!(company.website, "N/A");
                assert_eq!(company.email, "N/A");
            } else {
                assert_eq!(company.phone, format!("+1555-000-000{i}"));
            }
        }
    }
}
