use crate::auth::require_approved_user;
use crate::db::Database;
use crate::errors::ServerError;
use crate::listings::{ListingQuery, ListingsService};
use crate::responses::{json_response, ResultResp};
use astra::Request;
use serde_json::json;
use std::collections::HashMap;

/// Everything a request handler can reach. Built once in `main`.
pub struct AppState {
    pub db: Database,
    pub listings: ListingsService,
}

pub fn handle(req: Request, state: &AppState) -> ResultResp {
    let method = req.method().as_str();
    let path = req.uri().path();

    match (method, path) {
        ("GET", "/health") => json_response(
            200,
            &json!({ "status": "ok", "provider": state.listings.provider_name() }),
        ),
        ("GET", "/api/listings") => {
            let params = parse_query(&req);
            match params.get("id") {
                Some(id) => listing_detail(&req, state, id),
                None => search_listings(state, &params),
            }
        }
        (_, "/api/listings") => Err(ServerError::MethodNotAllowed),
        _ => Err(ServerError::NotFound),
    }
}

fn search_listings(state: &AppState, params: &HashMap<String, String>) -> ResultResp {
    let query = ListingQuery::from_params(params);
    let debug = matches!(params.get("debug").map(String::as_str), Some("1" | "true"));

    let page = state.listings.search(&query, debug)?;
    json_response(200, &page)
}

fn listing_detail(req: &Request, state: &AppState, id: &str) -> ResultResp {
    let now = chrono::Utc::now().timestamp();
    let user = require_approved_user(&state.db, req, now)?;

    let id = id.trim();
    if id.is_empty() {
        return Err(ServerError::BadRequest("missing listing id".into()));
    }

    let listing = state.listings.find(id)?.ok_or(ServerError::NotFound)?;
    tracing::debug!(user_id = user.id, email = %user.email, listing_id = id, "listing detail served");
    json_response(200, &json!({ "listing": listing }))
}

/// Decoded query-string pairs; later duplicates win.
fn parse_query(req: &Request) -> HashMap<String, String> {
    req.uri()
        .query()
        .map(|q| url::form_urlencoded::parse(q.as_bytes()).into_owned().collect())
        .unwrap_or_default()
}
