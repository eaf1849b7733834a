// src/scrape/fetcher.rs
use crate::scrape::types::FetchOutcome;
use futures::stream::{self, StreamExt};
use reqwest::Client;
use tracing::debug;

/// Fetches a batch of URLs with at most `concurrency` requests in flight.
///
/// Returns exactly one outcome per input URL, in submission order. Responses
/// are matched back to their request by index, never by arrival order, so an
/// early completion of a late submission cannot end up on the wrong record.
/// A transport fault (connect error, timeout, non-2xx status) becomes
/// `Failure` for its own index and leaves the rest of the batch running.
pub async fn fetch_batch(client: &Client, urls: &[String], concurrency: usize) -> Vec<FetchOutcome> {
    let mut outcomes: Vec<Option<FetchOutcome>> = Vec::with_capacity(urls.len());
    outcomes.resize_with(urls.len(), || None);

    let completed: Vec<(usize, FetchOutcome)> = stream::iter(urls.iter().enumerate())
        .map(|(idx, url)| {
            let client = client.clone();
            async move { (idx, fetch_one(&client, url).await) }
        })
        .buffer_unordered(concurrency.max(1))
        .collect()
        .await;

    for (idx, outcome) in completed {
        outcomes[idx] = Some(outcome);
    }

    // Every submitted index produced exactly one outcome.
    outcomes
        .into_iter()
        .map(|slot| slot.unwrap_or_else(|| FetchOutcome::Failure("missing outcome".to_string())))
        .collect()
}

async fn fetch_one(client: &Client, url: &str) -> FetchOutcome {
    debug!("Fetching: {}", url);

    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) => return FetchOutcome::Failure(e.to_string()),
    };

    if !response.status().is_success() {
        return FetchOutcome::Failure(format!("HTTP error: {}", response.status()));
    }

    match response.text().await {
        Ok(body) => FetchOutcome::Success(body),
        Err(e) => FetchOutcome::Failure(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn every_index_gets_exactly_one_outcome() {
        let server = MockServer::start().await;
        for i in 0..5 {
            Mock::given(method("GET"))
                .and(path(format!("/p/{i}")))
                .respond_with(ResponseTemplate::new(200).set_body_string(format!("body-{i}")))
                .mount(&server)
                .await;
        }

        let urls: Vec<String> = (0..5).map(|i| format!("{}/p/{i}", server.uri())).collect();
        let client = Client::new();
        let outcomes = fetch_batch(&client, &urls, 3).await;

        assert_eq!(outcomes.len(), 5);
        for (i, outcome) in outcomes.iter().enumerate() {
            match outcome {
                FetchOutcome::Success(body) => assert_eq!(body, &format!("body-{i}")),
                FetchOutcome::Failure(cause) => panic!("index {i} failed: {cause}"),
            }
        }
    }

    #[tokio::test]
    async fn index_fidelity_survives_shuffled_completion_order() {
        let server = MockServer::start().await;
        // Earlier submissions respond slower, so completions arrive roughly
        // in reverse submission order.
        for i in 0..4u64 {
            Mock::given(method("GET"))
                .and(path(format!("/p/{i}")))
                .respond_with(
                    ResponseTemplate::new(200)
                        .set_body_string(format!("body-{i}"))
                        .set_delay(Duration::from_millis((3 - i) * 80)),
                )
                .mount(&server)
                .await;
        }

        let urls: Vec<String> = (0..4).map(|i| format!("{}/p/{i}", server.uri())).collect();
        let client = Client::new();
        let outcomes = fetch_batch(&client, &urls, 4).await;

        for (i, outcome) in outcomes.iter().enumerate() {
            match outcome {
                FetchOutcome::Success(body) => assert_eq!(body, &format!("body-{i}")),
                FetchOutcome::Failure(cause) => panic!("index {i} failed: {cause}"),
            }
        }
    }

    #[tokio::test]
    async fn one_failure_does_not_cancel_siblings() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ok"))
            .respond_with(ResponseTemplate::new(200).set_body_string("fine"))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/broken"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let urls = vec![
            format!("{}/ok", server.uri()),
            format!("{}/broken", server.uri()),
            format!("{}/ok", server.uri()),
        ];
        let client = Client::new();
        let outcomes = fetch_batch(&client, &urls, 2).await;

        assert!(matches!(outcomes[0], FetchOutcome::Success(_)));
        assert!(matches!(outcomes[1], FetchOutcome::Failure(_)));
        assert!(matches!(outcomes[2], FetchOutcome::Success(_)));
    }
}
