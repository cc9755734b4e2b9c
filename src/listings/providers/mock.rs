// src/listings/providers/mock.rs
use super::ListingProvider;
use crate::listings::error::ListingsError;
use crate::listings::models::{Listing, ListingQuery, SortBy};
use crate::listings::reconcile::window;
use std::sync::RwLock;

const MOCK_COUNT: usize = 24;
const BASE_PRICE: i64 = 510_000;
const PRICE_STEP: i64 = 10_000;
const STREETS: [&str; 6] = ["Main St", "Oak Ave", "Ward Pkwy", "Troost Ave", "Holmes Rd", "Grand Blvd"];
const TYPES: [&str; 3] = ["single_family", "townhouse", "condo"];

/// Deterministic in-process listings for development and tests.
///
/// Every search places the same 24 homes in whatever city was asked for.
/// The last searched location is remembered so a detail lookup reports the
/// city the listing was shown in.
pub struct MockProvider {
    default_location: String,
    last_location: RwLock<Option<String>>,
}

impl MockProvider {
    pub fn new(default_location: impl Into<String>) -> Self {
        Self {
            default_location: default_location.into(),
            last_location: RwLock::new(None),
        }
    }

    fn place(location: &str) -> (String, String) {
        match location.rsplit_once(',') {
            Some((city, state)) => (city.trim().to_string(), state.trim().to_uppercase()),
            None => (location.trim().to_string(), String::new()),
        }
    }

    fn listing(n: usize, city: &str, state: &str) -> Listing {
        let price = BASE_PRICE + (n as i64 - 1) * PRICE_STEP;
        let sqft = 1_600 + n as i64 * 45;
        Listing {
            id: n.to_string(),
            address: Some(format!("{} {}", 100 + n * 12, STREETS[n % STREETS.len()])),
            city: Some(city.to_string()),
            state: (!state.is_empty()).then(|| state.to_string()),
            zip_code: Some(format!("641{:02}", n % 40)),
            price: Some(price),
            beds: Some((2 + n % 4) as f64),
            baths: Some(1.5 + (n % 3) as f64 * 0.5),
            sqft: Some(sqft),
            photos: vec![format!("/static/mock/house-{}.jpg", n % 8 + 1)],
            description: Some(format!(
                "Well kept home on {} with an updated kitchen and a fenced yard.",
                STREETS[n % STREETS.len()]
            )),
            status: Some("for_sale".to_string()),
            property_type: Some(TYPES[n % TYPES.len()].to_string()),
            year_built: Some(1950 + (n as i64 * 3) % 70),
            price_per_sqft: None,
            hoa_dues: (n % TYPES.len() != 0).then_some(150 + n as i64 * 5),
            lot_size: Some(6_000 + n as i64 * 120),
            garage: Some(format!("{} car", 1 + n % 3)),
            url: Some(format!("/listings/{n}")),
            lat: Some(39.0997 + n as f64 * 0.002),
            lng: Some(-94.5786 - n as f64 * 0.002),
        }
        .with_derived_fields()
    }

    fn all(location: &str) -> Vec<Listing> {
        let (city, state) = Self::place(location);
        (1..=MOCK_COUNT)
            .map(|n| Self::listing(n, &city, &state))
            .collect()
    }
}

impl ListingProvider for MockProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn location(&self, query: &ListingQuery) -> String {
        query.location_or(&self.default_location)
    }

    fn fetch(&self, query: &ListingQuery) -> Result<Vec<Listing>, ListingsError> {
        let location = self.location(query);
        if let Ok(mut last) = self.last_location.write() {
            *last = Some(location.clone());
        }

        let mut listings: Vec<Listing> = Self::all(&location)
            .into_iter()
            .filter(|l| query.min_price.map_or(true, |min| l.price >= Some(min)))
            .filter(|l| query.max_price.map_or(true, |max| l.price <= Some(max)))
            .filter(|l| query.beds.map_or(true, |b| l.beds >= Some(b)))
            .filter(|l| query.baths.map_or(true, |b| l.baths >= Some(b)))
            .collect();

        // Generated in ascending price order already.
        if query.sort_by == Some(SortBy::PriceDesc) {
            listings.reverse();
        }

        Ok(window(listings, query.offset, query.limit))
    }

    fn fetch_one(&self, id: &str) -> Result<Option<Listing>, ListingsError> {
        let location = self
            .last_location
            .read()
            .ok()
            .and_then(|last| last.clone())
            .unwrap_or_else(|| self.default_location.clone());
        let (city, state) = Self::place(&location);
        Ok(id
            .parse::<usize>()
            .ok()
            .filter(|n| (1..=MOCK_COUNT).contains(n))
            .map(|n| Self::listing(n, &city, &state)))
    }
}
