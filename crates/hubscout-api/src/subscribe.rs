// Newsletter signup client. The endpoint's only contract is 2xx on success;
// rejected signups usually carry an `{error}` body worth surfacing.

use serde::Deserialize;
use tracing::debug;

use crate::{ApiError, Result};

pub struct SubscribeClient {
    client: reqwest::Client,
    endpoint: String,
}

#[derive(Deserialize)]
struct SubscribeRejection {
    error: Option<String>,
}

impl SubscribeClient {
    pub fn new(endpoint: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
        }
    }

    /// Submit an email address. Ok(()) means subscribed.
    pub async fn subscribe(&self, email: &str) -> Result<()> {
        debug!(endpoint = %self.endpoint, "submitting subscription");

        let response = self
            .client
            .post(&self.endpoint)
            .json(&serde_json::json!({ "email": email }))
            .send()
            .await?;

        if response.status().is_success() {
            return Ok(());
        }

        let status = response.status();
        let reason = response
            .json::<SubscribeRejection>()
            .await
            .ok()
            .and_then(|body| body.error)
            .unwrap_or_else(|| format!("status {status}"));

        Err(ApiError::SubscriptionRejected(reason))
    }
}
