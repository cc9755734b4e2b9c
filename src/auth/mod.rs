pub mod sessions;
pub mod token;

use crate::db::users::{find_user, UserRow};
use crate::db::Database;
use crate::errors::ServerError;
use astra::Request;

pub const SESSION_COOKIE: &str = "session";

/// Pull the raw session token out of the `Cookie` header.
pub fn session_token(req: &Request) -> Option<String> {
    req.headers()
        .get_all("Cookie")
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// The signed-in user, who must also have been approved by an admin.
pub fn require_approved_user(db: &Database, req: &Request, now: i64) -> Result<UserRow, ServerError> {
    let token = session_token(req)
        .ok_or_else(|| ServerError::Unauthorized("sign in to view listing details".into()))?;

    db.with_conn(|conn| {
        let user_id = sessions::load_user_from_session(conn, &token, now)?
            .ok_or_else(|| ServerError::Unauthorized("session expired".into()))?;
        let user = find_user(conn, user_id)?
            .ok_or_else(|| ServerError::Unauthorized("unknown user".into()))?;

        if !user.is_approved {
            return Err(ServerError::Forbidden("account awaiting approval".into()));
        }
        Ok(user)
    })
}
