use crate::models::{DatasetRecord, ModelRecord, PaperRecord, SpaceRecord, TimeFrame};
use crate::Result;

/// Trait for trending-content sources - makes testing easier and keeps
/// the endpoints decoupled from the concrete Hub client.
#[async_trait::async_trait]
pub trait TrendingSource: Send + Sync {
    async fn trending_models(&self, limit: u32) -> Result<Vec<ModelRecord>>;
    async fn trending_datasets(&self, limit: u32) -> Result<Vec<DatasetRecord>>;
    async fn trending_spaces(&self, limit: u32) -> Result<Vec<SpaceRecord>>;
}

/// Papers come from a separate feed with a time window instead of a limit.
#[async_trait::async_trait]
pub trait PapersSource: Send + Sync {
    async fn papers(&self, time_frame: TimeFrame) -> Result<Vec<PaperRecord>>;
}
