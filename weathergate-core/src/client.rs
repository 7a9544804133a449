//! HTTP client for the weatherstack `current` endpoint.
//!
//! The body comes back as raw text and is handed to the extraction layer
//! untouched; nothing here validates it as JSON.

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::Client;
use std::{fmt::Debug, time::Duration};

const DEFAULT_BASE_URL: &str = "http://api.weatherstack.com";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Seam for the weather fetch, so report assembly can be driven from a
/// canned body in tests.
#[async_trait]
pub trait WeatherFetcher: Send + Sync + Debug {
    async fn fetch_current(&self, city: &str) -> Result<String>;
}

#[derive(Debug, Clone)]
pub struct WeatherstackClient {
    api_key: String,
    base_url: String,
    http: Client,
}

impl WeatherstackClient {
    pub fn new(api_key: String) -> Result<Self> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string())
    }

    /// Point the client at a different base URL (tests use this).
    pub fn with_base_url(api_key: String, base_url: String) -> Result<Self> {
        // A hung fetch would otherwise block the whole run indefinitely.
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { api_key, base_url, http })
    }
}

#[async_trait]
impl WeatherFetcher for WeatherstackClient {
    async fn fetch_current(&self, city: &str) -> Result<String> {
        let url = format!("{}/current", self.base_url);

        tracing::debug!(%city, "requesting current weather");

        let res = self
            .http
            .get(&url)
            .query(&[("access_key", self.api_key.as_str()), ("query", city)])
            .send()
            .await
            .context("Failed to send request to weatherstack (current)")?;

        let status = res.status();
        let body = res.text().await.context("Failed to read weatherstack response body")?;

        if !status.is_success() {
            return Err(anyhow!(
                "weatherstack current request failed with status {}: {}",
                status,
                truncate_body(&body),
            ));
        }

        Ok(body)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() <= MAX {
        return body.to_string();
    }

    // Walk back to a char boundary so the slice cannot land inside a
    // multibyte character.
    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn returns_raw_body_on_success() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/current"))
            .and(query_param("access_key", "KEY"))
            .and(query_param("query", "Paris"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"current": {"temperature": 12.5}})),
            )
            .mount(&server)
            .await;

        let client = WeatherstackClient::with_base_url("KEY".into(), server.uri()).unwrap();
        let body = client.fetch_current("Paris").await.unwrap();

        assert!(body.contains("\"temperature\":12.5"));
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/current"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let client = WeatherstackClient::with_base_url("KEY".into(), server.uri()).unwrap();
        let err = client.fetch_current("Paris").await.unwrap_err();

        let msg = err.to_string();
        assert!(msg.contains("failed with status 500"));
        assert!(msg.contains("boom"));
    }

    #[tokio::test]
    async fn multibyte_error_body_surfaces_as_error_not_panic() {
        let server = MockServer::start().await;

        // 'é' straddles the 200-byte truncation point.
        let body = format!("{}é{}", "a".repeat(199), "b".repeat(50));
        Mock::given(method("GET"))
            .and(path("/current"))
            .respond_with(ResponseTemplate::new(500).set_body_string(body))
            .mount(&server)
            .await;

        let client = WeatherstackClient::with_base_url("KEY".into(), server.uri()).unwrap();
        let err = client.fetch_current("Paris").await.unwrap_err();

        assert!(err.to_string().contains("failed with status 500"));
    }

    #[test]
    fn truncation_backs_off_to_a_char_boundary() {
        let body = format!("{}é{}", "a".repeat(199), "b".repeat(50));
        let truncated = truncate_body(&body);

        // Byte 200 is inside the 'é', so the cut lands just before it.
        assert_eq!(truncated, format!("{}...", "a".repeat(199)));

        let short = "héllo";
        assert_eq!(truncate_body(short), "héllo");
    }
}
