use thiserror::Error;

/// All the ways things can go wrong in hubscout
///
/// We use thiserror here because it generates the boilerplate for us.
/// Life's too short to manually implement Display and Error traits.
#[derive(Error, Debug)]
pub enum Error {
    #[error("API request failed: {0}")]
    Api(String),

    #[error("unexpected upstream shape: {0}")]
    UpstreamShape(String),

    #[error("cache operation failed: {0}")]
    Cache(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("subscription failed: {0}")]
    Subscription(String),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
