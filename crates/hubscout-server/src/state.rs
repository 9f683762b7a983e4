use std::sync::Arc;
use std::time::Duration;

use hubscout_cache::ResponseCache;
use hubscout_core::config::ServerConfig;
use hubscout_core::{PapersSource, TrendingSource};

/// Shared handler state. Trait objects so tests can swap the Hub provider
/// for doubles without touching the routes.
#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn TrendingSource>,
    pub papers: Arc<dyn PapersSource>,
    pub cache: Arc<ResponseCache>,
    pub default_limit: u32,
    pub cache_control: String,
}

impl AppState {
    pub fn new(
        source: Arc<dyn TrendingSource>,
        papers: Arc<dyn PapersSource>,
        config: &ServerConfig,
    ) -> Self {
        Self {
            source,
            papers,
            cache: Arc::new(ResponseCache::new(Duration::from_secs(config.cache_ttl_secs))),
            default_limit: config.default_limit,
            cache_control: config.cache_control(),
        }
    }
}
