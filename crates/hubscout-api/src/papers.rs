// Daily papers feed client.
//
// Papers don't come through the trending envelope; the Hub publishes a
// separate daily feed. Time-range filtering happens in the provider layer
// (hubscout-core) so this client stays a dumb fetch.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::relay::RelayClient;
use crate::Result;

const HUB_API_BASE: &str = "https://huggingface.co/api";

pub struct PapersClient {
    relay: RelayClient,
    base_url: String,
}

impl PapersClient {
    pub fn new(relay: RelayClient) -> Self {
        Self::with_base_url(relay, HUB_API_BASE.to_string())
    }

    pub fn with_base_url(relay: RelayClient, base_url: String) -> Self {
        Self { relay, base_url }
    }

    /// Fetch the most recent `limit` entries from the daily papers feed.
    pub async fn daily_papers(&self, limit: u32) -> Result<Vec<DailyPaper>> {
        let target = format!("{}/daily_papers?limit={}", self.base_url, limit);
        self.relay.fetch(&target).await
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyPaper {
    #[serde(default)]
    pub paper: Option<PaperData>,
    pub published_at: Option<DateTime<Utc>>,
    pub num_comments: Option<u64>,
    pub submitted_by: Option<SubmittedBy>,
    pub thumbnail: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaperData {
    pub id: Option<String>,
    pub title: Option<String>,
    pub upvotes: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedBy {
    pub fullname: Option<String>,
    pub avatar_url: Option<String>,
}
