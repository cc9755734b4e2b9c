pub mod errors;
pub mod json;

pub use errors::error_to_response;
pub use json::json_response;

// Result alias used by every handler.
pub use crate::errors::ResultResp;
