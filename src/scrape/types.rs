// src/scrape/types.rs
use serde::{Deserialize, Serialize};

/// Sentinel used for every field whose markup node is absent.
pub const NOT_AVAILABLE: &str = "N/A";

/// One business summary entry from a listing page, enriched in place with
/// contact details from its profile page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Company {
    pub name: String,
    pub profile_url: String,
    pub rating: String,
    pub reviews: String,
    pub phone: String,
    pub website: String,
    pub email: String,
}

impl Company {
    /// A company can only be enriched when its card carried a profile link.
    pub fn has_profile(&self) -> bool {
        self.profile_url != NOT_AVAILABLE
    }
}

/// Contact fields pulled out of one profile page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub phone: String,
    pub website: String,
    pub email: String,
}

impl Default for ContactInfo {
    fn default() -> Self {
        Self {
            phone: NOT_AVAILABLE.to_string(),
            website: NOT_AVAILABLE.to_string(),
            email: NOT_AVAILABLE.to_string(),
        }
    }
}

/// Pagination footer reading for one listing page. When the footer has no
/// last-page button, `last_page` falls back to `current_page`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    pub current_page: u32,
    pub last_page: u32,
}

impl PageState {
    pub fn is_last(&self) -> bool {
        self.current_page >= self.last_page
    }
}

/// Terminal result of one profile fetch, always paired with the submission
/// index of the request that produced it.
#[derive(Debug)]
pub enum FetchOutcome {
    Success(String),
    Failure(String),
}
