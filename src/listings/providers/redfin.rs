// src/listings/providers/redfin.rs
use super::{absolute_url, map_all, ListingProvider, RapidApi};
use crate::listings::error::ListingsError;
use crate::listings::fields::{array_at, f64_at, i64_at, photos_at, str_at};
use crate::listings::models::{Listing, ListingQuery};
use crate::listings::query::{self, RedfinScope};
use crate::listings::reconcile::{reconcile, window};
use serde_json::Value;

const NAME: &str = "rapidapi_redfin";
const KEYWORD_PATH: &str = "/property/search-sale";
const REGION_PATH: &str = "/property/search";
const AUTOCOMPLETE_PATH: &str = "/property/auto-complete";
const DETAIL_PATH: &str = "/property/detail";
const SITE: &str = "https://www.redfin.com";

const RESULT_PATHS: [&str; 3] = ["/data", "/data/homes", "/homes"];
const REGION_ID_PATHS: [&str; 4] = ["/data/0/rows/0/id", "/data/0/id", "/data/rows/0/id", "/regionId"];
const SUGGESTION_PATHS: [&str; 4] = [
    "/suggestions",
    "/data/suggestions",
    "/suggestedLocations",
    "/alternateLocations",
];

/// Redfin's "sale" search.
///
/// Keyword search first. When it returns no rows at all the location is
/// resolved to a region id and the region-scoped search is tried; if that
/// finds nothing either,
/// the first alternate location suggested by the keyword response gets one
/// more keyword search. At most three searches per fetch.
pub struct RedfinProvider {
    api: RapidApi,
    default_location: String,
}

/// One search attempt: the requested window, how many rows upstream sent
/// before slicing, and the raw body for later steps.
struct Attempt {
    listings: Vec<Listing>,
    rows: usize,
    body: Option<Value>,
}

impl RedfinProvider {
    pub fn new(api: RapidApi, default_location: String) -> Self {
        Self {
            api,
            default_location,
        }
    }

    fn search(&self, q: &ListingQuery, scope: RedfinScope<'_>) -> Result<Attempt, ListingsError> {
        let path = match scope {
            RedfinScope::Location(_) => KEYWORD_PATH,
            RedfinScope::Region(_) => REGION_PATH,
        };
        let pq = query::redfin(q, scope);
        let body = self.api.get(NAME, path, &pq.params)?;

        let items = body.as_ref().and_then(|b| array_at(b, &RESULT_PATHS));
        let rows = items.map_or(0, |items| items.len());
        let listings = items
            .map(|items| map_all(NAME, items, map_listing))
            .unwrap_or_default();

        let listings = if pq.resort {
            reconcile(listings, q.sort_by)
        } else {
            listings
        };
        Ok(Attempt {
            listings: window(listings, q.offset, q.limit),
            rows,
            body,
        })
    }

    fn resolve_region(&self, location: &str) -> Result<Option<String>, ListingsError> {
        let params = [("location", location.to_string())];
        Ok(self
            .api
            .get(NAME, AUTOCOMPLETE_PATH, &params)?
            .and_then(|b| str_at(&b, &REGION_ID_PATHS)))
    }
}

/// First alternate location offered alongside an empty keyword result.
fn suggested_location(body: &Value) -> Option<String> {
    let first = array_at(body, &SUGGESTION_PATHS)?.first()?;
    match first {
        Value::String(s) => Some(s.trim().to_string()).filter(|s| !s.is_empty()),
        other => str_at(other, &["/name", "/location", "/display", "/label"]),
    }
}

impl ListingProvider for RedfinProvider {
    fn name(&self) -> &'static str {
        NAME
    }

    fn location(&self, query: &ListingQuery) -> String {
        query.location_or(&self.default_location)
    }

    fn fetch(&self, q: &ListingQuery) -> Result<Vec<Listing>, ListingsError> {
        let location = self.location(q);

        // A page past the end of a real result set is just empty; only a
        // search that found nothing at all moves down the chain.
        let keyword = self.search(q, RedfinScope::Location(&location))?;
        if keyword.rows > 0 {
            return Ok(keyword.listings);
        }

        if let Some(region) = self.resolve_region(&location)? {
            tracing::debug!(provider = NAME, %location, %region, "retrying by region");
            let by_region = self.search(q, RedfinScope::Region(&region))?;
            if by_region.rows > 0 {
                return Ok(by_region.listings);
            }
        }

        let alternate = keyword
            .body
            .as_ref()
            .and_then(suggested_location)
            .filter(|alt| !alt.eq_ignore_ascii_case(&location));
        if let Some(alternate) = alternate {
            tracing::debug!(provider = NAME, %location, %alternate, "retrying suggested location");
            return Ok(self.search(q, RedfinScope::Location(&alternate))?.listings);
        }

        tracing::info!(provider = NAME, %location, "no listings after fallbacks");
        Ok(Vec::new())
    }

    fn fetch_one(&self, id: &str) -> Result<Option<Listing>, ListingsError> {
        let params = [("propertyId", id.to_string())];
        let Some(body) = self.api.get(NAME, DETAIL_PATH, &params)? else {
            return Ok(None);
        };
        Ok(map_listing(body.get("data").unwrap_or(&body)))
    }
}

// Search rows wrap the record in `homeData`; detail documents do not.
fn map_listing(raw: &Value) -> Option<Listing> {
    let v = raw.get("homeData").unwrap_or(raw);
    let id = str_at(v, &["/propertyId", "/listingId", "/id"])?;

    Some(
        Listing {
            id,
            address: str_at(v, &["/addressInfo/formattedStreetLine", "/streetLine", "/address"]),
            city: str_at(v, &["/addressInfo/city", "/city"]),
            state: str_at(v, &["/addressInfo/state", "/state"]),
            zip_code: str_at(v, &["/addressInfo/zip", "/zip", "/postalCode"]),
            price: i64_at(v, &["/priceInfo/amount", "/price/value", "/price"]),
            beds: f64_at(v, &["/beds"]),
            baths: f64_at(v, &["/baths"]),
            sqft: i64_at(v, &["/sqftInfo/amount", "/sqFt/value", "/sqft"]),
            photos: photos_at(
                v,
                &["/photos", "/photoUrls"],
                &["url", "photoUrl"],
                &["/photoUrl"],
            ),
            description: str_at(v, &["/listingRemarks", "/remarks"]),
            status: str_at(v, &["/mlsStatus", "/status"]),
            property_type: str_at(v, &["/propertyType", "/uiPropertyType"]),
            year_built: i64_at(v, &["/yearBuilt/yearBuilt", "/yearBuilt/value", "/yearBuilt"]),
            price_per_sqft: i64_at(v, &["/pricePerSqFt/value", "/pricePerSqFt"]),
            hoa_dues: i64_at(v, &["/hoaDues/amount", "/hoa/value"]),
            lot_size: i64_at(v, &["/lotSize/amount", "/lotSize/value", "/lotSize"]),
            garage: str_at(v, &["/garage", "/parkingSpaces"]),
            url: absolute_url(SITE, str_at(v, &["/url"])),
            lat: f64_at(
                v,
                &["/addressInfo/centroid/centroid/latitude", "/latLong/value/latitude", "/latitude"],
            ),
            lng: f64_at(
                v,
                &["/addressInfo/centroid/centroid/longitude", "/latLong/value/longitude", "/longitude"],
            ),
        }
        .with_derived_fields(),
    )
}
