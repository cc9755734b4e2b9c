use crate::auth::token::hash_token;
use crate::config::{ProviderConfig, RapidApiConfig};
use crate::db::{init_db, Database};
use crate::errors::ServerError;
use crate::listings::http::testing::StubFetcher;
use crate::listings::providers::{ListingProvider, MockProvider};
use crate::listings::{build_provider, ListingsCache, ListingsService};
use crate::router::{handle, AppState};
use astra::{Body, Response};
use base64::Engine;
use http::{Method, Request};
use rand::rngs::OsRng;
use rand::RngCore;
use rusqlite::{params, Connection};
use std::io::Read;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tempfile::TempDir;

pub const SESSION_TTL_SECS: i64 = 60 * 60 * 24 * 7;

/// App state plus the temp dir holding its database; the file goes away
/// when the test drops this.
pub struct TestApp {
    pub state: AppState,
    _dir: TempDir,
}

pub fn now_unix() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as i64
}

/// A fresh database file inside `dir`, built from the production schema.
pub fn init_test_db(dir: &TempDir) -> Database {
    let path = dir.path().join("listings_test.sqlite");
    let db = Database::new(path.to_string_lossy().into_owned());
    init_db(&db, "sql/schema.sql").unwrap_or_else(|e| panic!("Database initialization failed: {e}"));
    db
}

pub fn app_with(provider: Box<dyn ListingProvider>) -> TestApp {
    let dir = TempDir::new().expect("temp dir");
    TestApp {
        state: AppState {
            db: init_test_db(&dir),
            listings: ListingsService::new(provider, Arc::new(ListingsCache::default())),
        },
        _dir: dir,
    }
}

pub fn mock_app() -> TestApp {
    app_with(Box::new(MockProvider::new("Kansas City, MO")))
}

fn rapidapi(host: &str) -> RapidApiConfig {
    RapidApiConfig {
        key: "test-key".into(),
        host: host.into(),
    }
}

pub fn redfin_app(stub: Arc<StubFetcher>) -> TestApp {
    let cfg = ProviderConfig::Redfin(rapidapi("redfin.test"));
    app_with(build_provider(&cfg, "Kansas City, MO", stub))
}

pub fn zillow_app(stub: Arc<StubFetcher>) -> TestApp {
    let cfg = ProviderConfig::Zillow(rapidapi("zillow.test"));
    app_with(build_provider(&cfg, "Kansas City, MO", stub))
}

/// URL-safe random token, as the sign-in service issues them.
pub fn generate_token() -> String {
    let mut buf = [0u8; 32];
    OsRng.fill_bytes(&mut buf);
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(buf)
}

fn db_err(e: rusqlite::Error) -> ServerError {
    ServerError::DbError(e.to_string())
}

fn insert_user(conn: &Connection, email: &str, approved: bool, now: i64) -> Result<i64, ServerError> {
    conn.execute(
        "insert into users (email, is_approved, created_at) values (?, ?, ?)",
        params![email, approved, now],
    )
    .map_err(db_err)?;
    Ok(conn.last_insert_rowid())
}

fn insert_session(conn: &Connection, user_id: i64, now: i64) -> Result<String, ServerError> {
    let token = generate_token();
    conn.execute(
        "insert into sessions (user_id, token_hash, created_at, expires_at) values (?, ?, ?, ?)",
        params![user_id, hash_token(&token).as_slice(), now, now + SESSION_TTL_SECS],
    )
    .map_err(db_err)?;
    Ok(token)
}

/// Create a user with a live session; returns the raw cookie token.
pub fn signed_in_user(db: &Database, email: &str, approved: bool) -> String {
    let now = now_unix();
    db.with_conn(|conn| {
        let user_id = insert_user(conn, email, approved, now)?;
        insert_session(conn, user_id, now)
    })
    .expect("Failed to create session")
}

pub fn revoke_session(db: &Database, token: &str) {
    db.with_conn(|conn| {
        conn.execute(
            "update sessions set revoked_at = ? where token_hash = ?",
            params![now_unix(), hash_token(token).as_slice()],
        )
        .map_err(db_err)
    })
    .expect("Failed to revoke session");
}

pub fn get(app: &TestApp, uri: &str, session: Option<&str>) -> Response {
    let mut builder = Request::builder().method(Method::GET).uri(uri);
    if let Some(token) = session {
        builder = builder.header("Cookie", format!("theme=dark; session={token}"));
    }
    let req = builder.body(Body::empty()).unwrap();

    match handle(req, &app.state) {
        Ok(resp) => resp,
        Err(err) => crate::responses::error_to_response(err),
    }
}

pub fn json_body(resp: Response) -> serde_json::Value {
    let mut body = String::new();
    resp.into_body().reader().read_to_string(&mut body).unwrap();
    serde_json::from_str(&body).unwrap_or_else(|e| panic!("body is not JSON ({e}): {body}"))
}
