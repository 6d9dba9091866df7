// src/fetch/page.rs
// =============================================================================
// Fetches the HTML of the target page.
//
// One GET, no retry. A failed fetch is reported and turned into None so the
// caller can give up on this address without treating it as a crash.
// =============================================================================

use reqwest::Client;
use tracing::{debug, warn};

use crate::error::{describe_request_error, ScrapeError};
use crate::report::Reporter;

// Fetches a page and returns its HTML, or None when anything went wrong
pub async fn fetch_page(client: &Client, url: &str, reporter: &Reporter) -> Option<String> {
    match try_fetch_page(client, url).await {
        Ok(html) => Some(html),
        Err(e) => {
            warn!(url, error = %e, "Page fetch failed");
            reporter.failure(&e.to_string());
            None
        }
    }
}

async fn try_fetch_page(client: &Client, url: &str) -> Result<String, ScrapeError> {
    let failure = |e: reqwest::Error| ScrapeError::FetchFailure {
        url: url.to_string(),
        reason: describe_request_error(&e),
    };

    debug!(url, "Fetching page");
    let response = client
        .get(url)
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .map_err(failure)?;

    let html = response.text().await.map_err(failure)?;
    debug!(url, bytes = html.len(), "Page fetched");
    Ok(html)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, USER_AGENT};
    use crate::fetch::build_client;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn direct_client(timeout: Duration) -> Client {
        let config = Config {
            proxy: None,
            timeout,
            ..Config::default()
        };
        build_client(&config).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_returns_body_and_sends_user_agent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/page"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>hi</html>"))
            .expect(1)
            .mount(&server)
            .await;

        let client = direct_client(Duration::from_secs(5));
        let url = format!("{}/page", server.uri());
        let html = fetch_page(&client, &url, &Reporter::plain()).await;
        assert_eq!(html.as_deref(), Some("<html>hi</html>"));

        let requests = server.received_requests().await.unwrap();
        let user_agent = requests[0].headers.get("user-agent").unwrap();
        assert_eq!(user_agent.to_str().unwrap(), USER_AGENT);
    }

    #[tokio::test]
    async fn test_fetch_error_status_is_no_content_without_retry() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .expect(1)
            .mount(&server)
            .await;

        let client = direct_client(Duration::from_secs(5));
        let url = format!("{}/page", server.uri());
        assert!(fetch_page(&client, &url, &Reporter::plain()).await.is_none());
    }

    #[tokio::test]
    async fn test_fetch_timeout_is_no_content() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
            .mount(&server)
            .await;

        let client = direct_client(Duration::from_millis(200));
        let url = format!("{}/slow", server.uri());
        assert!(fetch_page(&client, &url, &Reporter::plain()).await.is_none());
    }
}
