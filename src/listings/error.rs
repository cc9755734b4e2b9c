use thiserror::Error;

/// Failures the listings layer lets escape to callers.
///
/// Everything else an upstream provider can do wrong (transport failure, bad
/// status, garbage body, unexpected shape) degrades to an empty result instead.
#[derive(Debug, Error)]
pub enum ListingsError {
    #[error("{provider} rate limited the request (HTTP {status})")]
    RateLimited { provider: &'static str, status: u16 },
}
