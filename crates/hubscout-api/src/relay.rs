// Relay fetcher client. The Hub API sits behind an intermediary HTTP
// forwarder that fetches an arbitrary URL and hands back its JSON body;
// everything upstream-facing goes through here.

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::retry::{with_retry, RetryConfig};
use crate::{ApiError, Result};

const DEFAULT_RELAY_URL: &str = "https://fetch-url.onrender.com/fetch-url";

#[derive(Clone)]
pub struct RelayClient {
    client: reqwest::Client,
    base_url: String,
    retry_config: RetryConfig,
}

impl RelayClient {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_RELAY_URL.to_string())
    }

    /// For a self-hosted relay, or for pointing tests at a mock server.
    pub fn with_base_url(base_url: String) -> Self {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::USER_AGENT,
            reqwest::header::HeaderValue::from_static("hubscout/0.1.0"),
        );
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static("application/json"),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url,
            retry_config: RetryConfig::default(),
        }
    }

    /// Create client with custom retry configuration
    pub fn with_retry_config(mut self, retry_config: RetryConfig) -> Self {
        self.retry_config = retry_config;
        self
    }

    /// Fetch `target` through the relay and decode the forwarded JSON body.
    pub async fn fetch<T: DeserializeOwned>(&self, target: &str) -> Result<T> {
        let url = format!(
            "{}?isapi=1&url={}",
            self.base_url,
            urlencoding::encode(target)
        );

        with_retry(&self.retry_config, || async {
            debug!(target, "fetching through relay");

            let response = self.client.get(&url).send().await?;
            let status = response.status();

            if !status.is_success() {
                return Err(ApiError::Status(status));
            }

            // The relay forwards the body verbatim, so a decode failure here
            // means the upstream shape changed, not a relay fault.
            let body = response.text().await?;
            let decoded = serde_json::from_str(&body)?;
            Ok(decoded)
        })
        .await
    }
}

impl Default for RelayClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn encodes_target_url_as_query_param() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(query_param("isapi", "1"))
            .and(query_param("url", "https://example.com/api?a=1&b=2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true})))
            .expect(1)
            .mount(&server)
            .await;

        let relay = RelayClient::with_base_url(server.uri());
        let value: serde_json::Value = relay
            .fetch("https://example.com/api?a=1&b=2")
            .await
            .unwrap();

        assert_eq!(value["ok"], true);
    }

    #[tokio::test]
    async fn non_json_body_is_a_parse_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
            .mount(&server)
            .await;

        let relay =
            RelayClient::with_base_url(server.uri()).with_retry_config(RetryConfig::none());
        let result: Result<serde_json::Value> = relay.fetch("https://example.com").await;

        assert!(matches!(result, Err(ApiError::Parse(_))));
    }

    #[tokio::test]
    async fn upstream_error_status_is_surfaced() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(502))
            .mount(&server)
            .await;

        let relay =
            RelayClient::with_base_url(server.uri()).with_retry_config(RetryConfig::none());
        let result: Result<serde_json::Value> = relay.fetch("https://example.com").await;

        assert!(matches!(result, Err(ApiError::Status(s)) if s.as_u16() == 502));
    }
}
