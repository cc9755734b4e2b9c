// src/listings/providers/zillow.rs
use super::{absolute_url, map_all, ListingProvider, RapidApi};
use crate::listings::error::ListingsError;
use crate::listings::fields::{array_at, f64_at, i64_at, photos_at, str_at};
use crate::listings::models::{Listing, ListingQuery};
use crate::listings::query;
use crate::listings::reconcile::{reconcile, window};
use serde_json::Value;

const NAME: &str = "rapidapi_zillow";
const SEARCH_PATH: &str = "/propertyExtendedSearch";
const DETAIL_PATH: &str = "/property";
const SITE: &str = "https://www.zillow.com";
const RESULT_PATHS: [&str; 3] = ["/props", "/results", "/data"];

/// Rows per upstream search page.
const PAGE_SIZE: usize = 41;
/// Enough pages to cover any window of at most `MAX_LIMIT` rows.
const MAX_PAGES: usize = 3;

pub struct ZillowProvider {
    api: RapidApi,
    default_location: String,
}

impl ZillowProvider {
    pub fn new(api: RapidApi, default_location: String) -> Self {
        Self {
            api,
            default_location,
        }
    }
}

impl ListingProvider for ZillowProvider {
    fn name(&self) -> &'static str {
        NAME
    }

    fn location(&self, query: &ListingQuery) -> String {
        query.location_or(&self.default_location)
    }

    fn fetch(&self, q: &ListingQuery) -> Result<Vec<Listing>, ListingsError> {
        let first_page = q.offset / PAGE_SIZE + 1;
        let start = q.offset % PAGE_SIZE;
        let wanted = start + q.limit;

        let mut listings = Vec::new();
        let mut rows = 0;
        let mut resort = false;
        for page in first_page..first_page + MAX_PAGES {
            let pq = query::zillow(q, &self.default_location, page);
            resort = pq.resort;
            let Some(body) = self.api.get(NAME, SEARCH_PATH, &pq.params)? else {
                break;
            };
            let Some(items) = array_at(&body, &RESULT_PATHS) else {
                tracing::info!(provider = NAME, page, "search returned no properties");
                break;
            };

            rows += items.len();
            listings.extend(map_all(NAME, items, map_listing));
            if items.len() < PAGE_SIZE || rows >= wanted {
                break;
            }
        }

        let listings = if resort {
            reconcile(listings, q.sort_by)
        } else {
            listings
        };
        Ok(window(listings, start, q.limit))
    }

    fn fetch_one(&self, id: &str) -> Result<Option<Listing>, ListingsError> {
        let params = [("zpid", id.to_string())];
        Ok(self
            .api
            .get(NAME, DETAIL_PATH, &params)?
            .as_ref()
            .and_then(map_listing))
    }
}

// Search results (`props[]`) are flat; the detail document nests the address
// and keeps HOA/garage under `resoFacts`. Both shapes go through here.
fn map_listing(v: &Value) -> Option<Listing> {
    let id = str_at(v, &["/zpid", "/id"])?;

    Some(
        Listing {
            id,
            address: str_at(v, &["/streetAddress", "/address/streetAddress", "/address"]),
            city: str_at(v, &["/city", "/address/city"]),
            state: str_at(v, &["/state", "/address/state"]),
            zip_code: str_at(v, &["/zipcode", "/address/zipcode"]),
            price: i64_at(v, &["/price", "/unformattedPrice", "/price/value"]),
            beds: f64_at(v, &["/bedrooms", "/beds"]),
            baths: f64_at(v, &["/bathrooms", "/baths"]),
            sqft: i64_at(v, &["/livingArea", "/livingAreaValue", "/area"]),
            photos: photos_at(
                v,
                &["/carouselPhotos", "/photos", "/originalPhotos"],
                &["url", "href"],
                &["/imgSrc", "/hiResImageLink"],
            ),
            description: str_at(v, &["/description"]),
            status: str_at(v, &["/listingStatus", "/homeStatus"]),
            property_type: str_at(v, &["/propertyType", "/homeType"]),
            year_built: i64_at(v, &["/yearBuilt", "/resoFacts/yearBuilt"]),
            price_per_sqft: i64_at(v, &["/pricePerSquareFoot", "/resoFacts/pricePerSquareFoot"]),
            hoa_dues: i64_at(v, &["/monthlyHoaFee", "/hoaFee", "/resoFacts/hoaFee"]),
            lot_size: i64_at(v, &["/lotAreaValue", "/lotSize", "/resoFacts/lotSize"]),
            garage: str_at(v, &["/resoFacts/garageParkingCapacity", "/garage"]),
            url: absolute_url(SITE, str_at(v, &["/detailUrl", "/hdpUrl", "/url"])),
            lat: f64_at(v, &["/latitude", "/latLong/latitude"]),
            lng: f64_at(v, &["/longitude", "/latLong/longitude"]),
        }
        .with_derived_fields(),
    )
}
