// src/listings/providers/realtor.rs
use super::{absolute_url, map_all, ListingProvider, RapidApi};
use crate::listings::error::ListingsError;
use crate::listings::fields::{array_at, f64_at, i64_at, photos_at, str_at};
use crate::listings::models::{Listing, ListingQuery};
use crate::listings::query;
use serde_json::Value;

const NAME: &str = "rapidapi_realtor";
const SEARCH_PATH: &str = "/properties/v2/list-for-sale";
const DETAIL_PATH: &str = "/properties/v3/detail";
const SITE: &str = "https://www.realtor.com/realestateandhomes-detail";

pub struct RealtorProvider {
    api: RapidApi,
    default_location: String,
}

impl RealtorProvider {
    pub fn new(api: RapidApi, default_location: String) -> Self {
        Self {
            api,
            default_location,
        }
    }
}

impl ListingProvider for RealtorProvider {
    fn name(&self) -> &'static str {
        NAME
    }

    fn location(&self, query: &ListingQuery) -> String {
        query.location_or(&self.default_location)
    }

    fn fetch(&self, q: &ListingQuery) -> Result<Vec<Listing>, ListingsError> {
        let pq = query::realtor(q, &self.default_location);
        let Some(body) = self.api.get(NAME, SEARCH_PATH, &pq.params)? else {
            return Ok(Vec::new());
        };

        match array_at(
            &body,
            &["/properties", "/data/home_search/results", "/data/results"],
        ) {
            Some(items) => Ok(map_all(NAME, items, map_listing)),
            None => {
                tracing::info!(provider = NAME, "search returned no properties");
                Ok(Vec::new())
            }
        }
    }

    fn fetch_one(&self, id: &str) -> Result<Option<Listing>, ListingsError> {
        let params = [("property_id", id.to_string())];
        let Some(body) = self.api.get(NAME, DETAIL_PATH, &params)? else {
            return Ok(None);
        };

        let record = ["/data/home", "/data/property", "/properties/0"]
            .iter()
            .find_map(|p| body.pointer(p))
            .unwrap_or(&body);
        Ok(map_listing(record))
    }
}

// v2 list results carry a flat `address`; v3 documents nest it under
// `location.address` and move the numbers into `description`.
fn map_listing(v: &Value) -> Option<Listing> {
    let id = str_at(v, &["/property_id", "/listing_id"])?;

    Some(
        Listing {
            id,
            address: str_at(v, &["/address/line", "/location/address/line"]),
            city: str_at(v, &["/address/city", "/location/address/city"]),
            state: str_at(v, &["/address/state_code", "/location/address/state_code"]),
            zip_code: str_at(v, &["/address/postal_code", "/location/address/postal_code"]),
            price: i64_at(v, &["/price", "/list_price"]),
            beds: f64_at(v, &["/beds", "/description/beds"]),
            baths: f64_at(v, &["/baths", "/description/baths", "/baths_full"]),
            sqft: i64_at(v, &["/building_size/size", "/description/sqft"]),
            photos: photos_at(
                v,
                &["/photos"],
                &["href", "url"],
                &["/thumbnail", "/primary_photo/href"],
            ),
            description: str_at(v, &["/description/text", "/description"]),
            status: str_at(v, &["/prop_status", "/status"]),
            property_type: str_at(v, &["/prop_type", "/description/type"]),
            year_built: i64_at(v, &["/year_built", "/description/year_built"]),
            price_per_sqft: i64_at(v, &["/price_per_sqft"]),
            hoa_dues: i64_at(v, &["/hoa/fee", "/hoa_fee"]),
            lot_size: i64_at(v, &["/lot_size/size", "/description/lot_sqft"]),
            garage: str_at(v, &["/garage", "/description/garage"]),
            url: absolute_url(SITE, str_at(v, &["/rdc_web_url", "/href", "/permalink"])),
            lat: f64_at(v, &["/address/lat", "/location/address/coordinate/lat"]),
            lng: f64_at(v, &["/address/lon", "/location/address/coordinate/lon"]),
        }
        .with_derived_fields(),
    )
}
