// Time-based response cache for the aggregation endpoints.
//
// Key = content kind + request parameter, value = the serialized response
// body plus its insertion timestamp. An entry older than the TTL is a miss;
// the next request refreshes it synchronously. There is no background
// revalidation and no eviction beyond expiry - the key space is four kinds
// times a handful of parameters.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::debug;

#[derive(Debug, Clone)]
struct CacheEntry {
    body: serde_json::Value,
    cached_at: DateTime<Utc>,
}

pub struct ResponseCache {
    ttl: chrono::Duration,
    entries: Mutex<HashMap<(String, String), CacheEntry>>,
}

impl ResponseCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl: chrono::Duration::from_std(ttl).unwrap_or(chrono::Duration::zero()),
            entries: Mutex::new(HashMap::new()),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<(String, String), CacheEntry>> {
        // A poisoned cache map is still a valid cache map.
        match self.entries.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Fresh body for this key, if any. Expired entries are dropped on read.
    pub fn get(&self, kind: &str, param: &str) -> Option<serde_json::Value> {
        let key = (kind.to_string(), param.to_string());
        let mut entries = self.lock();

        match entries.get(&key) {
            Some(entry) if Utc::now() - entry.cached_at <= self.ttl => {
                debug!(kind, param, "response cache hit");
                Some(entry.body.clone())
            }
            Some(_) => {
                debug!(kind, param, "response cache entry expired");
                entries.remove(&key);
                None
            }
            None => None,
        }
    }

    pub fn set(&self, kind: &str, param: &str, body: serde_json::Value) {
        self.lock().insert(
            (kind.to_string(), param.to_string()),
            CacheEntry {
                body,
                cached_at: Utc::now(),
            },
        );
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Drop everything past its TTL. The read path already expires lazily;
    /// this exists for housekeeping on long-lived processes.
    pub fn purge_expired(&self) {
        let now = Utc::now();
        self.lock()
            .retain(|_, entry| now - entry.cached_at <= self.ttl);
    }

    #[cfg(test)]
    fn backdate(&self, kind: &str, param: &str, age: chrono::Duration) {
        let key = (kind.to_string(), param.to_string());
        if let Some(entry) = self.lock().get_mut(&key) {
            entry.cached_at = Utc::now() - age;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_entries_hit() {
        let cache = ResponseCache::new(Duration::from_secs(600));
        cache.set("models", "10", serde_json::json!({"models": []}));

        assert_eq!(
            cache.get("models", "10"),
            Some(serde_json::json!({"models": []}))
        );
        assert_eq!(cache.get("models", "25"), None);
        assert_eq!(cache.get("spaces", "10"), None);
    }

    #[test]
    fn entries_expire_after_ttl() {
        let cache = ResponseCache::new(Duration::from_secs(600));
        cache.set("models", "10", serde_json::json!({"models": []}));
        cache.backdate("models", "10", chrono::Duration::seconds(601));

        assert_eq!(cache.get("models", "10"), None);
        // The expired entry was dropped, not kept around.
        assert!(cache.is_empty());
    }

    #[test]
    fn kinds_do_not_collide() {
        let cache = ResponseCache::new(Duration::from_secs(600));
        cache.set("papers", "today", serde_json::json!([1]));
        cache.set("papers", "month", serde_json::json!([1, 2, 3]));

        assert_eq!(cache.get("papers", "today"), Some(serde_json::json!([1])));
        assert_eq!(
            cache.get("papers", "month"),
            Some(serde_json::json!([1, 2, 3]))
        );
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn purge_drops_only_expired_entries() {
        let cache = ResponseCache::new(Duration::from_secs(600));
        cache.set("models", "10", serde_json::json!(1));
        cache.set("datasets", "10", serde_json::json!(2));
        cache.backdate("models", "10", chrono::Duration::seconds(9000));

        cache.purge_expired();

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("datasets", "10"), Some(serde_json::json!(2)));
    }
}
