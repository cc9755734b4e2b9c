use astra::Response;
// errors.rs
use std::fmt;

/// Errors originating from either the server logic
/// (routing, auth, missing resources) or downstream layers (DB, providers).
#[derive(Debug)]
pub enum ServerError {
    NotFound,
    MethodNotAllowed,
    BadRequest(String),
    Unauthorized(String),
    Forbidden(String),
    RateLimited(String),
    DbError(String),
    InternalError,
}

// Type alias commonly used by route handlers.
pub type ResultResp = Result<Response, ServerError>;

impl ServerError {
    pub fn status(&self) -> u16 {
        match self {
            ServerError::NotFound => 404,
            ServerError::MethodNotAllowed => 405,
            ServerError::BadRequest(_) => 400,
            ServerError::Unauthorized(_) => 401,
            ServerError::Forbidden(_) => 403,
            ServerError::RateLimited(_) => 429,
            ServerError::DbError(_) | ServerError::InternalError => 500,
        }
    }
}

impl fmt::Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServerError::NotFound => write!(f, "Not Found"),
            ServerError::MethodNotAllowed => write!(f, "Method Not Allowed"),
            ServerError::BadRequest(msg) => write!(f, "Bad Request: {msg}"),
            ServerError::Unauthorized(msg) => write!(f, "Unauthorized: {msg}"),
            ServerError::Forbidden(msg) => write!(f, "Forbidden: {msg}"),
            ServerError::RateLimited(msg) => write!(f, "Rate Limited: {msg}"),
            ServerError::DbError(msg) => write!(f, "Database Error: {msg}"),
            ServerError::InternalError => write!(f, "Internal Server Error"),
        }
    }
}

impl std::error::Error for ServerError {}

impl From<crate::listings::ListingsError> for ServerError {
    fn from(err: crate::listings::ListingsError) -> Self {
        match err {
            crate::listings::ListingsError::RateLimited { provider, status } => {
                tracing::warn!(provider, status, "listings request rate limited");
                ServerError::RateLimited(
                    "Listings are temporarily unavailable. Please try again in a few minutes.".into(),
                )
            }
        }
    }
}
