// src/listings/models.rs
use serde::Serialize;
use std::collections::HashMap;

pub const DEFAULT_LIMIT: usize = 12;
pub const MAX_LIMIT: usize = 50;
/// Deepest page a search may ask for.
pub const MAX_PAGE: usize = 500;

/// A property record as handed to the UI, whatever provider it came from.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip_code: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub beds: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub baths: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sqft: Option<i64>,

    pub photos: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year_built: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_per_sqft: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hoa_dues: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lot_size: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub garage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,
}

impl Listing {
    /// Fill `price_per_sqft` from price and sqft when the provider left it out.
    pub fn with_derived_fields(mut self) -> Self {
        if self.price_per_sqft.is_none() {
            if let (Some(price), Some(sqft)) = (self.price, self.sqft) {
                if sqft > 0 {
                    self.price_per_sqft = Some((price as f64 / sqft as f64).round() as i64);
                }
            }
        }
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortBy {
    PriceAsc,
    PriceDesc,
    Newest,
}

impl SortBy {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "price_asc" => Some(SortBy::PriceAsc),
            "price_desc" => Some(SortBy::PriceDesc),
            "newest" => Some(SortBy::Newest),
            _ => None,
        }
    }
}

/// Search parameters shared by every provider. Serialized form doubles as
/// the cache key, so field order here is part of the key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListingQuery {
    pub q: Option<String>,
    pub city: Option<String>,
    pub state_code: Option<String>,
    pub limit: usize,
    pub offset: usize,
    pub page: usize,
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
    pub beds: Option<f64>,
    pub baths: Option<f64>,
    pub sort_by: Option<SortBy>,
}

impl Default for ListingQuery {
    fn default() -> Self {
        Self {
            q: None,
            city: None,
            state_code: None,
            limit: DEFAULT_LIMIT,
            offset: 0,
            page: 1,
            min_price: None,
            max_price: None,
            beds: None,
            baths: None,
            sort_by: None,
        }
    }
}

impl ListingQuery {
    /// Build a query from decoded request parameters.
    ///
    /// Junk numbers are treated as absent rather than rejected; `limit` and
    /// `page` are clamped and `offset` always follows from `page`.
    pub fn from_params(params: &HashMap<String, String>) -> Self {
        let text = |key: &str| {
            params
                .get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };
        let number = |key: &str| text(key).and_then(|v| v.replace(',', "").parse::<f64>().ok());

        let limit = number("limit")
            .filter(|n| *n >= 1.0)
            .map(|n| (n as usize).min(MAX_LIMIT))
            .unwrap_or(DEFAULT_LIMIT);
        let page = number("page")
            .filter(|n| *n >= 1.0)
            .map(|n| (n as usize).min(MAX_PAGE))
            .unwrap_or(1);

        Self {
            q: text("q"),
            city: text("city"),
            state_code: text("state_code"),
            limit,
            offset: (page - 1) * limit,
            page,
            min_price: number("minPrice").map(|n| n as i64),
            max_price: number("maxPrice").map(|n| n as i64),
            beds: number("beds"),
            baths: number("baths"),
            sort_by: text("sortBy").as_deref().and_then(SortBy::parse),
        }
    }

    /// Free-text location: `q`, else "city, state", else the fallback.
    pub fn location_or(&self, fallback: &str) -> String {
        if let Some(q) = &self.q {
            return q.clone();
        }
        match (&self.city, &self.state_code) {
            (Some(city), Some(state)) => format!("{city}, {state}"),
            (Some(city), None) => city.clone(),
            (None, Some(state)) => state.clone(),
            (None, None) => fallback.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DebugInfo {
    pub cache_key: String,
    pub cache_hit: bool,
    pub location: String,
}

/// Body of a successful `GET /api/listings` search.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingsPage {
    pub listings: Vec<Listing>,
    pub provider: &'static str,
    pub has_more: bool,
    pub current_page: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug: Option<DebugInfo>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn defaults_when_nothing_given() {
        let q = ListingQuery::from_params(&HashMap::new());
        assert_eq!(q, ListingQuery::default());
    }

    #[test]
    fn page_drives_offset_and_limit_is_clamped() {
        let q = ListingQuery::from_params(&params(&[("limit", "500"), ("page", "3")]));
        assert_eq!(q.limit, MAX_LIMIT);
        assert_eq!(q.page, 3);
        assert_eq!(q.offset, 2 * MAX_LIMIT);
    }

    #[test]
    fn huge_page_is_clamped() {
        let q = ListingQuery::from_params(&params(&[("page", "99999999999999999999"), ("limit", "50")]));
        assert_eq!(q.page, MAX_PAGE);
        assert_eq!(q.offset, (MAX_PAGE - 1) * MAX_LIMIT);
    }

    #[test]
    fn junk_numbers_are_ignored() {
        let q = ListingQuery::from_params(&params(&[
            ("minPrice", "cheap"),
            ("maxPrice", "450,000"),
            ("beds", "2"),
            ("page", "0"),
            ("sortBy", "random"),
        ]));
        assert_eq!(q.min_price, None);
        assert_eq!(q.max_price, Some(450_000));
        assert_eq!(q.beds, Some(2.0));
        assert_eq!(q.page, 1);
        assert_eq!(q.sort_by, None);
    }

    #[test]
    fn location_prefers_free_text() {
        let mut q = ListingQuery::from_params(&params(&[
            ("city", "Kansas City"),
            ("state_code", "MO"),
        ]));
        assert_eq!(q.location_or("Omaha, NE"), "Kansas City, MO");

        q.q = Some("Overland Park".into());
        assert_eq!(q.location_or("Omaha, NE"), "Overland Park");

        assert_eq!(ListingQuery::default().location_or("Omaha, NE"), "Omaha, NE");
    }

    #[test]
    fn price_per_sqft_is_derived_only_when_missing() {
        let derived = Listing {
            id: "a".into(),
            price: Some(300_000),
            sqft: Some(1_500),
            ..Default::default()
        }
        .with_derived_fields();
        assert_eq!(derived.price_per_sqft, Some(200));

        let given = Listing {
            id: "b".into(),
            price: Some(300_000),
            sqft: Some(1_500),
            price_per_sqft: Some(210),
            ..Default::default()
        }
        .with_derived_fields();
        assert_eq!(given.price_per_sqft, Some(210));
    }

    #[test]
    fn absent_fields_are_omitted_from_json() {
        let json = serde_json::to_value(Listing {
            id: "7".into(),
            zip_code: Some("64111".into()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(json["id"], "7");
        assert_eq!(json["zipCode"], "64111");
        assert!(json.get("price").is_none());
        assert_eq!(json["photos"], serde_json::json!([]));
    }
}
