//! Short-lived cache of successful GET responses.

use std::collections::HashMap;

use crate::transport::HttpResponse;

/// Source of "now" for TTL checks
pub trait Clock {
    fn now_ms(&self) -> i64;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

#[derive(Debug, Clone)]
struct CachedResponse {
    response: HttpResponse,
    stored_at: i64,
}

#[derive(Debug, Clone, Default)]
pub struct ResponseCache {
    ttl_ms: i64,
    entries: HashMap<String, CachedResponse>,
}

impl ResponseCache {
    pub fn new(ttl_ms: u64) -> Self {
        Self {
            ttl_ms: i64::try_from(ttl_ms).unwrap_or(i64::MAX),
            entries: HashMap::new(),
        }
    }

    /// `get-{path}-{params}`; params are serialized in key order so equal
    /// queries share an entry
    pub fn key(path: &str, params: &[(&str, String)]) -> String {
        let mut sorted: Vec<_> = params.iter().collect();
        sorted.sort_by(|a, b| a.0.cmp(b.0));
        let params = serde_json::Map::from_iter(
            sorted
                .into_iter()
                .map(|(k, v)| (k.to_string(), serde_json::Value::String(v.clone()))),
        );
        format!("get-{}-{}", path, serde_json::Value::Object(params))
    }

    pub fn get(&mut self, key: &str, now_ms: i64) -> Option<HttpResponse> {
        let fresh = self
            .entries
            .get(key)
            .map(|entry| now_ms - entry.stored_at < self.ttl_ms)?;
        if fresh {
            self.entries.get(key).map(|entry| entry.response.clone())
        } else {
            self.entries.remove(key);
            None
        }
    }

    /// Only 2xx responses are kept
    pub fn put(&mut self, key: String, response: &HttpResponse, now_ms: i64) {
        if !response.is_success() {
            return;
        }
        self.entries.insert(
            key,
            CachedResponse {
                response: response.clone(),
                stored_at: now_ms,
            },
        );
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_ignores_param_order() {
        let a = ResponseCache::key("/sales/recent", &[("limit", "10".into()), ("page", "1".into())]);
        let b = ResponseCache::key("/sales/recent", &[("page", "1".into()), ("limit", "10".into())]);
        assert_eq!(a, b);
        assert_eq!(ResponseCache::key("/products", &[]), "get-/products-{}");
    }

    #[test]
    fn test_entries_expire() {
        let mut cache = ResponseCache::new(30_000);
        cache.put("k".into(), &HttpResponse::new(200, "{}"), 1_000);

        assert!(cache.get("k", 30_999).is_some());
        assert!(cache.get("k", 31_000).is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_errors_are_not_cached() {
        let mut cache = ResponseCache::new(30_000);
        cache.put("k".into(), &HttpResponse::new(500, "{}"), 0);
        assert!(cache.get("k", 1).is_none());
    }
}
