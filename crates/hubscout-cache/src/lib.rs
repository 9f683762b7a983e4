// Caching layer: the in-memory TTL cache behind the aggregation endpoints
// and the SQLite store for the one client preference that survives restarts.

pub mod prefs;
pub mod response;

pub use prefs::PrefsStore;
pub use response::ResponseCache;
