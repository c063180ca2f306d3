// src/utils/cache.rs

//! Bounded content cache keyed by URL.

use std::collections::HashMap;
use std::sync::Mutex;

/// Bounded url -> extracted-text cache shared across workers.
///
/// Purely an optimization: a miss triggers a refetch, so concurrent writers
/// racing on the same key is harmless. When the bound is reached the older
/// half of the entries (by insertion order) is evicted.
pub struct ContentCache {
    inner: Mutex<CacheInner>,
    capacity: usize,
}

#[derive(Default)]
struct CacheInner {
    entries: HashMap<String, String>,
    order: Vec<String>,
}

impl ContentCache {
    /// Create a cache holding at most `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Mutex::new(CacheInner::default()),
            capacity: capacity.max(2),
        }
    }

    /// Look up cached content for a URL.
    pub fn get(&self, url: &str) -> Option<String> {
        let inner = self.inner.lock().expect("cache lock poisoned");
        inner.entries.get(url).cloned()
    }

    /// Insert content, evicting the older half when the bound is reached.
    pub fn insert(&self, url: &str, content: &str) {
        let mut inner = self.inner.lock().expect("cache lock poisoned");
        if inner.entries.len() >= self.capacity {
            let evict_count = inner.order.len() / 2;
            let evicted: Vec<String> = inner.order.drain(..evict_count).collect();
            for key in evicted {
                inner.entries.remove(&key);
            }
        }
        if inner.entries.insert(url.to_string(), content.to_string()).is_none() {
            inner.order.push(url.to_string());
        }
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.inner.lock().expect("cache lock poisoned").entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_after_insert() {
        let cache = ContentCache::new(10);
        cache.insert("https://a", "isi a");
        assert_eq!(cache.get("https://a"), Some("isi a".to_string()));
        assert_eq!(cache.get("https://b"), None);
    }

    #[test]
    fn evicts_older_half_when_full() {
        let cache = ContentCache::new(4);
        for i in 0..4 {
            cache.insert(&format!("url{i}"), "content");
        }
        assert_eq!(cache.len(), 4);

        // Next insert triggers eviction of the two oldest entries.
        cache.insert("url4", "content");
        assert_eq!(cache.len(), 3);
        assert_eq!(cache.get("url0"), None);
        assert_eq!(cache.get("url1"), None);
        assert!(cache.get("url2").is_some());
        assert!(cache.get("url4").is_some());
    }

    #[test]
    fn reinserting_same_key_does_not_grow_order() {
        let cache = ContentCache::new(4);
        cache.insert("url", "one");
        cache.insert("url", "two");
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("url"), Some("two".to_string()));
    }
}
