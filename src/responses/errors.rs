use crate::errors::ServerError;
use astra::{Body, Response, ResponseBuilder};
use serde_json::json;

/// Convert a ServerError into a JSON `{ "error": ... }` response.
///
/// Server-side failures are logged and answered with a generic message.
pub fn error_to_response(err: ServerError) -> Response {
    let status = err.status();
    let message = match &err {
        ServerError::NotFound => "Not Found".to_string(),
        ServerError::MethodNotAllowed => "Method Not Allowed".to_string(),
        ServerError::BadRequest(msg)
        | ServerError::Unauthorized(msg)
        | ServerError::Forbidden(msg)
        | ServerError::RateLimited(msg) => msg.clone(),
        ServerError::DbError(msg) => {
            tracing::error!(error = %msg, "database error");
            "Internal Server Error".to_string()
        }
        ServerError::InternalError => {
            tracing::error!("internal error");
            "Internal Server Error".to_string()
        }
    };

    let body = json!({ "error": message }).to_string();

    ResponseBuilder::new()
        .status(status)
        .header("Content-Type", mime::APPLICATION_JSON.as_ref())
        .body(Body::from(body))
        .unwrap_or_else(|_| Response::new(Body::from("Internal Server Error")))
}
