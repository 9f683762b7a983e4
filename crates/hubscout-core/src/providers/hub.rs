// Hub provider - bridges the API clients with the source traits
use async_trait::async_trait;
use chrono::{Duration, Utc};
use hubscout_api::{HubClient, PapersClient};
use tracing::debug;

use crate::models::{DatasetRecord, ModelRecord, PaperRecord, SpaceRecord, TimeFrame};
use crate::normalize;
use crate::{Error, Result};

/// How many feed entries to pull before applying the time window. The
/// daily feed rarely exceeds a few dozen entries per month.
const PAPERS_FEED_LIMIT: u32 = 100;

/// Wrapper around the Hub clients that implements the source traits.
pub struct HubProvider {
    hub: HubClient,
    papers: PapersClient,
}

impl HubProvider {
    pub fn new(hub: HubClient, papers: PapersClient) -> Self {
        Self { hub, papers }
    }
}

#[async_trait]
impl crate::source::TrendingSource for HubProvider {
    async fn trending_models(&self, limit: u32) -> Result<Vec<ModelRecord>> {
        let envelope = self
            .hub
            .trending("model", limit)
            .await
            .map_err(|e| Error::Api(e.to_string()))?;

        Ok(normalize::normalize_models(envelope))
    }

    async fn trending_datasets(&self, limit: u32) -> Result<Vec<DatasetRecord>> {
        let envelope = self
            .hub
            .trending("dataset", limit)
            .await
            .map_err(|e| Error::Api(e.to_string()))?;

        Ok(normalize::normalize_datasets(envelope))
    }

    async fn trending_spaces(&self, limit: u32) -> Result<Vec<SpaceRecord>> {
        let envelope = self
            .hub
            .trending("space", limit)
            .await
            .map_err(|e| Error::Api(e.to_string()))?;

        Ok(normalize::normalize_spaces(envelope))
    }
}

#[async_trait]
impl crate::source::PapersSource for HubProvider {
    async fn papers(&self, time_frame: TimeFrame) -> Result<Vec<PaperRecord>> {
        let entries = self
            .papers
            .daily_papers(PAPERS_FEED_LIMIT)
            .await
            .map_err(|e| Error::Api(e.to_string()))?;

        let cutoff = Utc::now() - Duration::days(time_frame.window_days());
        let total = entries.len();

        // Entries without a publication date stay in; we can't judge them
        // and dropping silently would shrink the narrow windows to nothing.
        let windowed: Vec<_> = entries
            .into_iter()
            .filter(|entry| entry.published_at.map_or(true, |at| at >= cutoff))
            .collect();

        debug!(
            time_frame = %time_frame,
            kept = windowed.len(),
            total,
            "windowed daily papers feed"
        );

        Ok(normalize::normalize_papers(windowed))
    }
}
