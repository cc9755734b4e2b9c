// src/listings/cache.rs
use crate::listings::models::{Listing, ListingQuery};
use dashmap::DashMap;
use std::time::{Duration, Instant};

pub const DEFAULT_TTL: Duration = Duration::from_secs(30 * 60);

struct CacheEntry {
    listings: Vec<Listing>,
    fetched_at: Instant,
}

/// In-memory search results keyed by provider + query.
///
/// Entries expire lazily: a stale entry is simply ignored on read and left
/// where it is until the same key is written again. Shard locks are only
/// held for a single read or write, never across a provider call, so two
/// requests racing on the same cold key both fetch and the last write wins.
pub struct ListingsCache {
    ttl: Duration,
    entries: DashMap<String, CacheEntry>,
}

impl Default for ListingsCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

impl ListingsCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: DashMap::new(),
        }
    }

    /// "provider:{serialized query}"
    pub fn key(provider: &str, query: &ListingQuery) -> String {
        let serialized = serde_json::to_string(query).unwrap_or_else(|_| format!("{query:?}"));
        format!("{provider}:{serialized}")
    }

    fn is_fresh(&self, entry: &CacheEntry) -> bool {
        entry.fetched_at.elapsed() < self.ttl
    }

    pub fn get(&self, key: &str) -> Option<Vec<Listing>> {
        let entry = self.entries.get(key)?;
        self.is_fresh(&entry).then(|| entry.listings.clone())
    }

    /// Empty results are never stored, so a provider hiccup is retried on
    /// the next request instead of being served for the whole TTL.
    pub fn set(&self, key: String, listings: Vec<Listing>) {
        if listings.is_empty() {
            return;
        }
        self.entries.insert(
            key,
            CacheEntry {
                listings,
                fetched_at: Instant::now(),
            },
        );
    }

    /// Look a listing up by id across all live entries.
    pub fn find(&self, id: &str) -> Option<Listing> {
        self.entries
            .iter()
            .filter(|e| self.is_fresh(e.value()))
            .find_map(|e| e.listings.iter().find(|l| l.id == id).cloned())
    }
}
