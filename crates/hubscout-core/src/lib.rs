// Core business logic lives here - records, normalization, config
pub mod config;
pub mod error;
pub mod models;
pub mod normalize;
pub mod providers;
pub mod source;

pub use config::Config;
pub use error::Error;
pub use models::{ContentType, DatasetRecord, ModelRecord, PaperRecord, SpaceRecord, TimeFrame};
pub use providers::HubProvider;
pub use source::{PapersSource, TrendingSource};

/// Result type alias because typing Result<T, Error> everywhere is tedious
pub type Result<T> = std::result::Result<T, Error>;
