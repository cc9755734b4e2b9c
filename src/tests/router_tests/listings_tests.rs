use crate::listings::http::testing::StubFetcher;
use crate::tests::utils::{get, json_body, mock_app, redfin_app, zillow_app};
use serde_json::json;
use std::sync::Arc;

#[test]
fn mock_search_returns_first_six() {
    let app = mock_app();

    let resp = get(
        &app,
        "/api/listings?city=Kansas+City&state_code=MO&limit=6",
        None,
    );
    assert_eq!(resp.status(), 200);

    let body = json_body(resp);
    let listings = body["listings"].as_array().expect("listings array");
    let ids: Vec<&str> = listings.iter().filter_map(|l| l["id"].as_str()).collect();
    let prices: Vec<i64> = listings.iter().filter_map(|l| l["price"].as_i64()).collect();

    assert_eq!(ids, ["1", "2", "3", "4", "5", "6"]);
    assert_eq!(prices, [510_000, 520_000, 530_000, 540_000, 550_000, 560_000]);
    assert_eq!(listings[0]["city"], "Kansas City");
    assert_eq!(body["provider"], "mock");
    assert_eq!(body["hasMore"], true);
    assert_eq!(body["currentPage"], 1);
    assert!(body.get("debug").is_none());
}

#[test]
fn price_desc_is_non_increasing() {
    let app = mock_app();

    let body = json_body(get(&app, "/api/listings?sortBy=price_desc&limit=10&page=2", None));
    let prices: Vec<i64> = body["listings"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|l| l["price"].as_i64())
        .collect();

    assert_eq!(prices.len(), 10);
    assert!(prices.windows(2).all(|w| w[0] >= w[1]));
    assert_eq!(body["currentPage"], 2);
}

#[test]
fn debug_reports_cache_use() {
    let app = mock_app();
    let uri = "/api/listings?q=Lee%27s+Summit%2C+MO&debug=1";

    let first = json_body(get(&app, uri, None));
    let second = json_body(get(&app, uri, None));

    assert_eq!(first["debug"]["cacheHit"], false);
    assert_eq!(second["debug"]["cacheHit"], true);
    assert_eq!(second["debug"]["location"], "Lee's Summit, MO");
    assert_eq!(first["listings"], second["listings"]);
}

#[test]
fn redfin_cache_hit_skips_upstream() {
    let homes: Vec<_> = (1..=10)
        .map(|i| json!({ "homeData": { "propertyId": i, "priceInfo": { "amount": 400_000 + i } } }))
        .collect();
    let stub = Arc::new(StubFetcher::new().json(json!({ "data": homes })));
    let app = redfin_app(stub.clone());

    let first = json_body(get(&app, "/api/listings?city=Kansas+City&state_code=MO", None));
    let second = json_body(get(&app, "/api/listings?city=Kansas+City&state_code=MO", None));

    assert_eq!(first["listings"].as_array().unwrap().len(), 10);
    assert_eq!(first["listings"], second["listings"]);
    assert_eq!(first["provider"], "rapidapi_redfin");
    assert_eq!(first["hasMore"], false);
    assert_eq!(stub.calls(), 1);
}

#[test]
fn upstream_rate_limit_becomes_429() {
    let stub = Arc::new(StubFetcher::new().reply(429, r#"{"message":"Too many requests"}"#));
    let app = redfin_app(stub);

    let resp = get(&app, "/api/listings?city=Kansas+City", None);
    assert_eq!(resp.status(), 429);

    let body = json_body(resp);
    assert!(body["error"].as_str().unwrap().contains("try again"));
    assert!(body.get("listings").is_none());
}

#[test]
fn malformed_upstream_body_is_an_empty_page() {
    let stub = Arc::new(StubFetcher::new().reply(200, "upstream exploded <html>"));
    let app = redfin_app(stub);

    let resp = get(&app, "/api/listings", None);
    assert_eq!(resp.status(), 200);
    assert_eq!(json_body(resp)["listings"], json!([]));
}

#[test]
fn health_and_unknown_routes() {
    let app = mock_app();

    let health = get(&app, "/health", None);
    assert_eq!(health.status(), 200);
    assert_eq!(json_body(health)["provider"], "mock");

    let missing = get(&app, "/api/nope", None);
    assert_eq!(missing.status(), 404);
    assert_eq!(json_body(missing)["error"], "Not Found");
}

#[test]
fn redfin_page_past_the_end_is_empty() {
    let homes: Vec<_> = (1..=5)
        .map(|i| json!({ "homeData": { "propertyId": i, "priceInfo": { "amount": 300_000 + i } } }))
        .collect();
    let stub = Arc::new(StubFetcher::new().json(json!({
        "data": homes,
        "suggestions": [{ "name": "Independence, MO" }]
    })));
    let app = redfin_app(stub.clone());

    let resp = get(&app, "/api/listings?city=Kansas+City&state_code=MO&page=2&limit=12", None);
    assert_eq!(resp.status(), 200);

    let body = json_body(resp);
    assert_eq!(body["listings"], json!([]));
    assert_eq!(body["hasMore"], false);
    assert_eq!(body["currentPage"], 2);
    assert_eq!(stub.calls(), 1);
}

#[test]
fn zillow_second_page_continues_the_first() {
    let props: Vec<_> = (1..=41)
        .map(|zpid| json!({ "zpid": zpid, "price": 200_000 + zpid * 1_000 }))
        .collect();
    let stub = Arc::new(StubFetcher::new().json(json!({ "props": props })));
    let app = zillow_app(stub.clone());

    let body = json_body(get(&app, "/api/listings?page=2&limit=12", None));
    let ids: Vec<&str> = body["listings"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|l| l["id"].as_str())
        .collect();

    let want: Vec<String> = (13..=24).map(|n| n.to_string()).collect();
    assert_eq!(ids, want);
    assert_eq!(body["currentPage"], 2);
    assert!(stub.url(0).contains("page=1"));
}

#[test]
fn out_of_range_page_is_clamped_not_a_crash() {
    let app = mock_app();

    let resp = get(&app, "/api/listings?page=99999999999999999999", None);
    assert_eq!(resp.status(), 200);

    let body = json_body(resp);
    assert_eq!(body["listings"], json!([]));
    assert_eq!(body["currentPage"], 500);
}
