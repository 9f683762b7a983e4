// Client side of the aggregation endpoints.
//
// The dashboard never talks to the Hub directly; it fetches from our own
// trending endpoints and decodes their per-type body shapes. The trait
// keeps the store testable without a live server.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use hubscout_core::models::{
    ContentType, DatasetRecord, ModelRecord, PaperRecord, SpaceRecord, TimeFrame,
};
use hubscout_core::{Error, Result};

/// One tab's worth of fetched content.
#[derive(Debug, Clone, PartialEq)]
pub enum TabContent {
    Papers(Vec<PaperRecord>),
    Models(Vec<ModelRecord>),
    Datasets(Vec<DatasetRecord>),
    Spaces(Vec<SpaceRecord>),
}

impl TabContent {
    pub fn content_type(&self) -> ContentType {
        match self {
            TabContent::Papers(_) => ContentType::Papers,
            TabContent::Models(_) => ContentType::Models,
            TabContent::Datasets(_) => ContentType::Datasets,
            TabContent::Spaces(_) => ContentType::Spaces,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            TabContent::Papers(list) => list.len(),
            TabContent::Models(list) => list.len(),
            TabContent::Datasets(list) => list.len(),
            TabContent::Spaces(list) => list.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContentFetcher: Send + Sync {
    async fn fetch(
        &self,
        tab: ContentType,
        time_frame: TimeFrame,
        limit: u32,
    ) -> Result<TabContent>;
}

/// Bodies are either the payload or `{"error": ...}`; the error form can
/// show up with any status, so it is checked on every decode.
#[derive(Deserialize)]
#[serde(untagged)]
enum ApiBody<T> {
    Failure { error: String },
    Data(T),
}

#[derive(Deserialize)]
struct ModelsBody {
    #[serde(default)]
    models: Vec<ModelRecord>,
}

#[derive(Deserialize)]
struct DatasetsBody {
    #[serde(default)]
    datasets: Vec<DatasetRecord>,
}

pub struct DashboardClient {
    client: reqwest::Client,
    base_url: String,
}

impl DashboardClient {
    pub fn new(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .user_agent("hubscout/0.1.0")
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to build HTTP client");

        Self { client, base_url }
    }

    async fn get_body<T: DeserializeOwned>(&self, url: String) -> Result<T> {
        debug!(%url, "fetching tab content");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        let text = response.text().await?;

        if let Ok(ApiBody::Failure { error }) = serde_json::from_str::<ApiBody<T>>(&text) {
            return Err(Error::Api(error));
        }

        if !status.is_success() {
            return Err(Error::Api(format!("HTTP error! status: {status}")));
        }

        match serde_json::from_str::<ApiBody<T>>(&text)? {
            ApiBody::Failure { error } => Err(Error::Api(error)),
            ApiBody::Data(data) => Ok(data),
        }
    }
}

#[async_trait]
impl ContentFetcher for DashboardClient {
    async fn fetch(
        &self,
        tab: ContentType,
        time_frame: TimeFrame,
        limit: u32,
    ) -> Result<TabContent> {
        match tab {
            ContentType::Papers => {
                let url = format!(
                    "{}/trending/papers?timeFrame={}",
                    self.base_url,
                    time_frame.as_param()
                );
                Ok(TabContent::Papers(self.get_body(url).await?))
            }
            ContentType::Models => {
                let url = format!("{}/trending/models?limit={}", self.base_url, limit);
                let body: ModelsBody = self.get_body(url).await?;
                Ok(TabContent::Models(body.models))
            }
            ContentType::Datasets => {
                let url = format!("{}/trending/datasets?limit={}", self.base_url, limit);
                let body: DatasetsBody = self.get_body(url).await?;
                Ok(TabContent::Datasets(body.datasets))
            }
            ContentType::Spaces => {
                let url = format!("{}/trending/spaces?limit={}", self.base_url, limit);
                Ok(TabContent::Spaces(self.get_body(url).await?))
            }
        }
    }
}
