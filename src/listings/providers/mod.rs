// src/listings/providers/mod.rs
mod mock;
mod realtor;
mod redfin;
mod zillow;

pub use mock::MockProvider;
pub use realtor::RealtorProvider;
pub use redfin::RedfinProvider;
pub use zillow::ZillowProvider;

use crate::config::{ProviderConfig, RapidApiConfig};
use crate::listings::error::ListingsError;
use crate::listings::http::{get_json, HttpFetch};
use crate::listings::models::{Listing, ListingQuery};
use serde_json::Value;
use std::sync::Arc;
use url::Url;

/// A source of listings. One implementation per upstream, picked once at
/// start-up.
///
/// Adapters swallow ordinary upstream failures and return an empty list;
/// only rate limiting escapes as an error.
pub trait ListingProvider: Send + Sync {
    fn name(&self) -> &'static str;

    /// Location string this provider would search for `query`.
    fn location(&self, query: &ListingQuery) -> String;

    fn fetch(&self, query: &ListingQuery) -> Result<Vec<Listing>, ListingsError>;

    fn fetch_one(&self, id: &str) -> Result<Option<Listing>, ListingsError>;
}

pub fn build_provider(
    cfg: &ProviderConfig,
    default_location: &str,
    fetcher: Arc<dyn HttpFetch>,
) -> Box<dyn ListingProvider> {
    let default_location = default_location.to_string();
    match cfg {
        ProviderConfig::Mock => Box::new(MockProvider::new(default_location)),
        ProviderConfig::Zillow(api) => Box::new(ZillowProvider::new(
            RapidApi::new(api, fetcher),
            default_location,
        )),
        ProviderConfig::Realtor(api) => Box::new(RealtorProvider::new(
            RapidApi::new(api, fetcher),
            default_location,
        )),
        ProviderConfig::Redfin(api) => Box::new(RedfinProvider::new(
            RapidApi::new(api, fetcher),
            default_location,
        )),
    }
}

/// Shared plumbing for RapidAPI-hosted providers: base URL + auth headers.
pub struct RapidApi {
    key: String,
    host: String,
    fetcher: Arc<dyn HttpFetch>,
}

impl RapidApi {
    pub fn new(cfg: &RapidApiConfig, fetcher: Arc<dyn HttpFetch>) -> Self {
        Self {
            key: cfg.key.clone(),
            host: cfg.host.clone(),
            fetcher,
        }
    }

    pub fn get(
        &self,
        provider: &'static str,
        path: &str,
        params: &[(&'static str, String)],
    ) -> Result<Option<Value>, ListingsError> {
        let mut url = match Url::parse(&format!("https://{}{}", self.host, path)) {
            Ok(url) => url,
            Err(e) => {
                tracing::error!(provider, host = %self.host, error = %e, "bad provider URL");
                return Ok(None);
            }
        };
        if !params.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in params {
                pairs.append_pair(k, v);
            }
        }

        let headers = [
            ("X-RapidAPI-Key", self.key.as_str()),
            ("X-RapidAPI-Host", self.host.as_str()),
        ];
        get_json(self.fetcher.as_ref(), provider, &url, &headers)
    }
}

/// Map every item, dropping the ones without an id.
fn map_all(provider: &'static str, items: &[Value], map: fn(&Value) -> Option<Listing>) -> Vec<Listing> {
    let listings: Vec<Listing> = items.iter().filter_map(map).collect();
    let dropped = items.len() - listings.len();
    if dropped > 0 {
        tracing::debug!(provider, dropped, "skipped provider records without an id");
    }
    listings
}

/// Make a site-relative link absolute.
fn absolute_url(base: &str, link: Option<String>) -> Option<String> {
    link.map(|l| {
        if l.starts_with("http://") || l.starts_with("https://") {
            l
        } else {
            format!("{}/{}", base.trim_end_matches('/'), l.trim_start_matches('/'))
        }
    })
}
