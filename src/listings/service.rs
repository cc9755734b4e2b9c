// src/listings/service.rs
use crate::listings::cache::ListingsCache;
use crate::listings::error::ListingsError;
use crate::listings::models::{DebugInfo, Listing, ListingQuery, ListingsPage};
use crate::listings::providers::ListingProvider;
use std::sync::Arc;

/// The configured provider behind a shared cache.
///
/// Built once by `main` and handed to every request; the cache is injected
/// so tests (and anything else sharing it) can look inside.
pub struct ListingsService {
    provider: Box<dyn ListingProvider>,
    cache: Arc<ListingsCache>,
}

impl ListingsService {
    pub fn new(provider: Box<dyn ListingProvider>, cache: Arc<ListingsCache>) -> Self {
        Self { provider, cache }
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    pub fn search(&self, query: &ListingQuery, debug: bool) -> Result<ListingsPage, ListingsError> {
        let provider = self.provider.name();
        let key = ListingsCache::key(provider, query);

        let (listings, cache_hit) = match self.cache.get(&key) {
            Some(listings) => {
                tracing::debug!(provider, count = listings.len(), "listings cache hit");
                (listings, true)
            }
            None => {
                let listings = self.provider.fetch(query)?;
                tracing::info!(provider, count = listings.len(), page = query.page, "fetched listings");
                self.cache.set(key.clone(), listings.clone());
                (listings, false)
            }
        };

        Ok(ListingsPage {
            has_more: listings.len() >= query.limit,
            current_page: query.page,
            provider,
            debug: debug.then(|| DebugInfo {
                cache_key: key,
                cache_hit,
                location: self.provider.location(query),
            }),
            listings,
        })
    }

    /// A single listing: whatever a recent search cached, else the provider.
    pub fn find(&self, id: &str) -> Result<Option<Listing>, ListingsError> {
        if let Some(listing) = self.cache.find(id) {
            return Ok(Some(listing));
        }
        self.provider.fetch_one(id)
    }
}
