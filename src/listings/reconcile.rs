// src/listings/reconcile.rs
use crate::listings::models::{Listing, SortBy};

/// Re-sort results whose provider ordering can't be trusted.
///
/// Sorting is stable. A missing price orders as 0, so unpriced listings land
/// first ascending and last descending.
pub fn reconcile(mut listings: Vec<Listing>, sort_by: Option<SortBy>) -> Vec<Listing> {
    match sort_by {
        Some(SortBy::PriceAsc) => listings.sort_by_key(|l| l.price.unwrap_or(0)),
        Some(SortBy::PriceDesc) => {
            listings.sort_by_key(|l| std::cmp::Reverse(l.price.unwrap_or(0)))
        }
        Some(SortBy::Newest) | None => {}
    }
    listings
}

/// Client-side `[offset, offset + limit)` slice.
pub fn window(listings: Vec<Listing>, offset: usize, limit: usize) -> Vec<Listing> {
    listings.into_iter().skip(offset).take(limit).collect()
}
