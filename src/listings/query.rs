// src/listings/query.rs
//! Translation of the shared `ListingQuery` into each provider's parameter
//! names and sort vocabulary.

use crate::listings::models::{ListingQuery, SortBy};

/// Provider-ready parameters plus whether the provider's own ordering can be
/// trusted. `resort` asks the adapter to run the reconciler afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderQuery {
    pub params: Vec<(&'static str, String)>,
    pub resort: bool,
}

impl ProviderQuery {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.as_str())
    }
}

fn push_filters(
    params: &mut Vec<(&'static str, String)>,
    q: &ListingQuery,
    names: [&'static str; 4],
) {
    let [min_price, max_price, beds, baths] = names;
    if let Some(v) = q.min_price {
        params.push((min_price, v.to_string()));
    }
    if let Some(v) = q.max_price {
        params.push((max_price, v.to_string()));
    }
    if let Some(v) = q.beds {
        params.push((beds, v.to_string()));
    }
    if let Some(v) = q.baths {
        params.push((baths, v.to_string()));
    }
}

fn price_sorted(q: &ListingQuery) -> bool {
    matches!(q.sort_by, Some(SortBy::PriceAsc | SortBy::PriceDesc))
}

/// Zillow pages are a fixed size, so the adapter picks the upstream `page`
/// and slices the window out of it.
pub fn zillow(q: &ListingQuery, default_location: &str, page: usize) -> ProviderQuery {
    let mut params = vec![
        ("location", q.location_or(default_location)),
        ("status_type", "ForSale".to_string()),
        ("page", page.to_string()),
    ];
    push_filters(&mut params, q, ["minPrice", "maxPrice", "bedsMin", "bathsMin"]);
    if let Some(sort) = q.sort_by {
        let sort = match sort {
            SortBy::PriceAsc => "Price_Low_High",
            SortBy::PriceDesc => "Price_High_Low",
            SortBy::Newest => "Newest",
        };
        params.push(("sort", sort.to_string()));
    }

    // Zillow's sort parameter is advisory at best.
    ProviderQuery {
        params,
        resort: price_sorted(q),
    }
}

pub fn realtor(q: &ListingQuery, default_location: &str) -> ProviderQuery {
    let (city, state) = realtor_place(q, default_location);

    let mut params = vec![("city", city)];
    if let Some(state) = state {
        params.push(("state_code", state));
    }
    params.push(("offset", q.offset.to_string()));
    params.push(("limit", q.limit.to_string()));
    push_filters(&mut params, q, ["price_min", "price_max", "beds_min", "baths_min"]);
    if let Some(sort) = q.sort_by {
        let sort = match sort {
            SortBy::PriceAsc => "price_low",
            SortBy::PriceDesc => "price_high",
            SortBy::Newest => "newest",
        };
        params.push(("sort", sort.to_string()));
    }

    ProviderQuery {
        params,
        resort: false,
    }
}

/// Realtor wants city and state separately; a free-text "City, ST" is split.
fn realtor_place(q: &ListingQuery, default_location: &str) -> (String, Option<String>) {
    if q.q.is_none() {
        if let Some(city) = &q.city {
            return (city.clone(), q.state_code.clone());
        }
    }

    let location = q.location_or(default_location);
    match location.rsplit_once(',') {
        Some((city, state)) if !state.trim().is_empty() => {
            (city.trim().to_string(), Some(state.trim().to_uppercase()))
        }
        _ => (location.trim().to_string(), q.state_code.clone()),
    }
}

/// Where a Redfin search is scoped: free text, or a resolved region id.
#[derive(Debug, Clone, PartialEq)]
pub enum RedfinScope<'a> {
    Location(&'a str),
    Region(&'a str),
}

/// Redfin's offset is unreliable, so the request asks for everything up to
/// the end of the wanted window and the adapter slices it afterwards.
pub fn redfin(q: &ListingQuery, scope: RedfinScope<'_>) -> ProviderQuery {
    let mut params = match scope {
        RedfinScope::Location(loc) => vec![("location", loc.to_string())],
        RedfinScope::Region(id) => vec![("regionId", id.to_string())],
    };
    params.push(("limit", q.offset.saturating_add(q.limit).to_string()));
    push_filters(&mut params, q, ["min_price", "max_price", "min_beds", "min_baths"]);
    if let Some(sort) = q.sort_by {
        let sort = match sort {
            SortBy::PriceAsc => "price-low-to-high",
            SortBy::PriceDesc => "price-high-to-low",
            SortBy::Newest => "newest",
        };
        params.push(("sort", sort.to_string()));
    }

    ProviderQuery {
        params,
        resort: price_sorted(q),
    }
}
