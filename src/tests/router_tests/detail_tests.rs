use crate::router::handle;
use crate::tests::utils::{get, json_body, mock_app, revoke_session, signed_in_user};
use astra::Body;
use http::{Method, Request};

#[test]
fn detail_requires_session() {
    let app = mock_app();

    let resp = get(&app, "/api/listings?id=3", None);
    assert_eq!(resp.status(), 401);

    let resp = get(&app, "/api/listings?id=3", Some("not-a-real-token"));
    assert_eq!(resp.status(), 401);
}

#[test]
fn detail_requires_approval() {
    let app = mock_app();
    let token = signed_in_user(&app.state.db, "pending@example.com", false);

    let resp = get(&app, "/api/listings?id=3", Some(&token));
    assert_eq!(resp.status(), 403);
    assert_eq!(json_body(resp)["error"], "account awaiting approval");
}

#[test]
fn approved_user_gets_listing() {
    let app = mock_app();
    let token = signed_in_user(&app.state.db, "buyer@example.com", true);

    let resp = get(&app, "/api/listings?id=3", Some(&token));
    assert_eq!(resp.status(), 200);

    let body = json_body(resp);
    assert_eq!(body["listing"]["id"], "3");
    assert_eq!(body["listing"]["price"], 530_000);
}

#[test]
fn unknown_listing_is_404() {
    let app = mock_app();
    let token = signed_in_user(&app.state.db, "buyer@example.com", true);

    let resp = get(&app, "/api/listings?id=999", Some(&token));
    assert_eq!(resp.status(), 404);
}

#[test]
fn revoked_session_is_rejected() {
    let app = mock_app();
    let token = signed_in_user(&app.state.db, "gone@example.com", true);

    revoke_session(&app.state.db, &token);

    let resp = get(&app, "/api/listings?id=1", Some(&token));
    assert_eq!(resp.status(), 401);
}

#[test]
fn listings_only_accepts_get() {
    let app = mock_app();

    let req = Request::builder()
        .method(Method::POST)
        .uri("/api/listings")
        .body(Body::empty())
        .unwrap();

    match handle(req, &app.state) {
        Err(err) => assert_eq!(err.status(), 405),
        Ok(resp) => panic!("POST should be rejected, got {}", resp.status()),
    }
}

#[test]
fn detail_after_city_search_keeps_that_city() {
    let app = mock_app();
    let token = signed_in_user(&app.state.db, "buyer@example.com", true);

    get(&app, "/api/listings?city=Omaha&state_code=NE&limit=1", None);
    let body = json_body(get(&app, "/api/listings?id=2", Some(&token)));
    assert_eq!(body["listing"]["city"], "Omaha");
}
