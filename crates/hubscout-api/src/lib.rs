// HTTP clients for the upstream services: the relay fetcher, the Hub
// trending/papers APIs behind it, and the newsletter endpoint.

pub mod hub;
pub mod papers;
pub mod relay;
pub mod retry;
pub mod subscribe;

pub use hub::{HubClient, RepoData, TrendingEnvelope, TrendingItem};
pub use papers::{DailyPaper, PapersClient};
pub use relay::RelayClient;
pub use retry::{with_retry, RetryConfig};
pub use subscribe::SubscribeClient;

use thiserror::Error;

/// All the ways an upstream call can go wrong.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("request failed: {0}")]
    RequestFailed(String),

    #[error("upstream returned status {0}")]
    Status(reqwest::StatusCode),

    #[error("subscription rejected: {0}")]
    SubscriptionRejected(String),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ApiError {
    /// Whether retrying the same request could plausibly succeed.
    /// 4xx responses and parse failures won't get better on a second try.
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::Network(_) => true,
            ApiError::Status(status) => retry::is_retryable_status(*status),
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
