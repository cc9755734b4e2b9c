// src/listings/http.rs
use crate::listings::error::ListingsError;
use reqwest::blocking::Client;
use serde_json::Value;
use thiserror::Error;
use url::Url;

const USER_AGENT: &str = "listings-hub/0.1";

#[derive(Debug, Clone)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

/// A request that never produced a status line.
#[derive(Debug, Error)]
#[error("transport error: {0}")]
pub struct TransportError(String);

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        TransportError(e.to_string())
    }
}

/// The one place listing providers touch the network.
pub trait HttpFetch: Send + Sync {
    fn get(&self, url: &Url, headers: &[(&str, &str)]) -> Result<HttpReply, TransportError>;
}

pub struct ReqwestFetcher {
    client: Client,
}

impl ReqwestFetcher {
    pub fn new() -> Result<Self, TransportError> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;

        Ok(Self { client })
    }
}

impl HttpFetch for ReqwestFetcher {
    fn get(&self, url: &Url, headers: &[(&str, &str)]) -> Result<HttpReply, TransportError> {
        let mut req = self.client.get(url.as_str());
        for (name, value) in headers {
            req = req.header(*name, *value);
        }

        let resp = req.send()?;
        let status = resp.status().as_u16();
        let body = resp.text()?;

        Ok(HttpReply { status, body })
    }
}

/// GET a JSON document from a provider.
///
/// `Ok(None)` covers every failure the caller should shrug off (transport
/// errors, non-2xx, unparseable body). Only 429/403 come back as `Err`.
pub fn get_json(
    fetcher: &dyn HttpFetch,
    provider: &'static str,
    url: &Url,
    headers: &[(&str, &str)],
) -> Result<Option<Value>, ListingsError> {
    let reply = match fetcher.get(url, headers) {
        Ok(reply) => reply,
        Err(e) => {
            tracing::warn!(provider, path = url.path(), error = %e, "provider request failed");
            return Ok(None);
        }
    };

    if reply.status == 429 || reply.status == 403 {
        tracing::warn!(provider, status = reply.status, "provider rate limited");
        return Err(ListingsError::RateLimited {
            provider,
            status: reply.status,
        });
    }

    if !(200..300).contains(&reply.status) {
        tracing::warn!(provider, status = reply.status, path = url.path(), "provider returned error status");
        return Ok(None);
    }

    match serde_json::from_str::<Value>(&reply.body) {
        Ok(v) => Ok(Some(v)),
        Err(e) => {
            tracing::warn!(provider, error = %e, "provider body is not JSON");
            Ok(None)
        }
    }
}
