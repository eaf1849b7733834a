// src/scrape/cards.rs
use crate::scrape::types::{Company, PageState, NOT_AVAILABLE};
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

/// Parses one listing page into its business cards and, when the page has a
/// pagination footer, the current/last page numbers.
///
/// Never fails: a missing node degrades the corresponding field to "N/A".
/// Profile hrefs starting with "/" are resolved against `origin`; absolute
/// hrefs pass through untouched.
pub fn extract_cards(html: &str, origin: &str, page: u32) -> (Vec<Company>, Option<PageState>) {
    let document = Html::parse_document(html);

    let card_selector = Selector::parse("article.ProList_businessProCard__qvaeT").unwrap();
    let name_selector = Selector::parse("h4").unwrap();
    let link_selector = Selector::parse("a[data-testid='profile-link']").unwrap();
    let rating_selector = Selector::parse(".RatingsLockup_ratingNumber__2CoLI").unwrap();
    let reviews_selector = Selector::parse(".RatingsLockup_reviewCount__u0DTP div").unwrap();

    let mut companies = Vec::new();

    for card in document.select(&card_selector) {
        let name = select_text(&card, &name_selector);
        let rating = select_text(&card, &rating_selector);
        let reviews = select_text(&card, &reviews_selector);

        let profile_url = card
            .select(&link_selector)
            .next()
            .and_then(|a| a.value().attr("href"))
            .map(|href| resolve_profile_url(href, origin))
            .unwrap_or_else(|| NOT_AVAILABLE.to_string());

        companies.push(Company {
            name,
            profile_url,
            rating,
            reviews,
            phone: NOT_AVAILABLE.to_string(),
            website: NOT_AVAILABLE.to_string(),
            email: NOT_AVAILABLE.to_string(),
        });
    }

    let page_state = extract_page_state(&document, page);
    debug!(
        "Extracted {} cards from page {} (pagination: {:?})",
        companies.len(),
        page,
        page_state
    );

    (companies, page_state)
}

fn select_text(card: &ElementRef, selector: &Selector) -> String {
    card.select(selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

fn resolve_profile_url(href: &str, origin: &str) -> String {
    if href.starts_with('/') {
        format!("{}{}", origin, href)
    } else {
        href.to_string()
    }
}

/// Reads the pagination footer. Absent footer means no further pages can be
/// assumed; a footer without a last-page button reports last = current.
fn extract_page_state(document: &Html, page: u32) -> Option<PageState> {
    let footer_selector = Selector::parse("div.PaginationFooter_root__HoNjH").unwrap();
    let current_selector = Selector::parse("button.PaginationFooter_highlighted__tSL7o").unwrap();
    let last_selector = Selector::parse("button[data-testid='last-page']").unwrap();

    let footer = document.select(&footer_selector).next()?;

    let current_page = footer
        .select(&current_selector)
        .next()
        .and_then(|el| el.text().collect::<String>().trim().parse().ok())
        .unwrap_or(page);

    let last_page = footer
        .select(&last_selector)
        .next()
        .and_then(|el| el.text().collect::<String>().trim().parse().ok())
        .unwrap_or(current_page);

    Some(PageState {
        current_page,
        last_page,
    })
}
