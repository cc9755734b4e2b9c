// src/db/users.rs
use crate::errors::ServerError;
use rusqlite::{params, Connection, OptionalExtension};

#[derive(Debug, Clone, PartialEq)]
pub struct UserRow {
    pub id: i64,
    pub email: String,
    pub is_approved: bool,
}

/// Accounts are created and approved elsewhere; requests only read them.
pub fn find_user(conn: &Connection, user_id: i64) -> Result<Option<UserRow>, ServerError> {
    conn.query_row(
        "select id, email, is_approved from users where id = ?",
        params![user_id],
        |row| {
            Ok(UserRow {
                id: row.get(0)?,
                email: row.get(1)?,
                is_approved: row.get(2)?,
            })
        },
    )
    .optional()
    .map_err(|e| ServerError::DbError(format!("user lookup failed: {e}")))
}
