// src/pipeline/registry.rs

//! Shared seen-URL registry.

use std::collections::HashSet;
use std::sync::Mutex;

/// Synchronized set of URLs claimed during a run.
///
/// Workers claim a URL before processing it; the claim is atomic
/// (test-and-set), so two workers can never produce sources for the same
/// URL. Add-only for the lifetime of a run.
#[derive(Default)]
pub struct UrlRegistry {
    seen: Mutex<HashSet<String>>,
}

impl UrlRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomically claim a URL. Returns false if it was already claimed.
    pub fn claim(&self, url: &str) -> bool {
        let mut seen = self.seen.lock().expect("registry lock poisoned");
        seen.insert(url.to_string())
    }

    /// Whether a URL has been claimed.
    pub fn contains(&self, url: &str) -> bool {
        let seen = self.seen.lock().expect("registry lock poisoned");
        seen.contains(url)
    }

    /// Number of claimed URLs.
    pub fn len(&self) -> usize {
        self.seen.lock().expect("registry lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
