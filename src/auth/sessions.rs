// src/auth/sessions.rs
use crate::auth::token::hash_token;
use crate::errors::ServerError;
use rusqlite::{params, Connection, OptionalExtension};

/// User id behind a live (unexpired, unrevoked) session token.
///
/// Sessions are issued by the sign-in service; this side only checks them.
pub fn load_user_from_session(
    conn: &Connection,
    raw_token: &str,
    now: i64,
) -> Result<Option<i64>, ServerError> {
    let hash = hash_token(raw_token);

    conn.query_row(
        r#"
        select s.user_id
        from sessions s
        where s.token_hash = ?
          and s.expires_at > ?
          and s.revoked_at is null
        "#,
        params![hash.as_slice(), now],
        |row| row.get(0),
    )
    .optional()
    .map_err(|e| ServerError::DbError(format!("session lookup failed: {e}")))
}
