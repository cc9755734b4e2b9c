// src/config.rs
use std::net::SocketAddr;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_LOCATION: &str = "Kansas City, MO";
pub const ZILLOW_HOST: &str = "zillow-com1.p.rapidapi.com";
pub const REALTOR_HOST: &str = "realty-in-us.p.rapidapi.com";
pub const REDFIN_HOST: &str = "redfin-com-data.p.rapidapi.com";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("unknown LISTINGS_PROVIDER '{0}' (expected mock, rapidapi_zillow, rapidapi_realtor or rapidapi_redfin)")]
    UnknownProvider(String),

    #[error("{0} must be set for the selected listings provider")]
    MissingKey(&'static str),

    #[error("{name} has an invalid value '{value}'")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct RapidApiConfig {
    pub key: String,
    pub host: String,
}

/// Which listings provider the process talks to. Chosen once at start-up.
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderConfig {
    Mock,
    Zillow(RapidApiConfig),
    Realtor(RapidApiConfig),
    Redfin(RapidApiConfig),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub provider: ProviderConfig,
    pub default_location: String,
    pub cache_ttl: Duration,
    pub database_path: String,
    pub bind_addr: SocketAddr,
    pub workers: usize,
}

impl Config {
    /// Read configuration from the process environment (after `.env`).
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let rapidapi = |key_var: &'static str, host_var: &str, default_host: &str| {
            let key = var(key_var).ok_or(ConfigError::MissingKey(key_var))?;
            let host = var(host_var).unwrap_or_else(|| default_host.to_string());
            Ok::<_, ConfigError>(RapidApiConfig { key, host })
        };

        let provider = match var("LISTINGS_PROVIDER").as_deref().unwrap_or("mock") {
            "mock" => ProviderConfig::Mock,
            "rapidapi_zillow" => ProviderConfig::Zillow(rapidapi(
                "RAPIDAPI_ZILLOW_KEY",
                "RAPIDAPI_ZILLOW_HOST",
                ZILLOW_HOST,
            )?),
            "rapidapi_realtor" => ProviderConfig::Realtor(rapidapi(
                "RAPIDAPI_REALTOR_KEY",
                "RAPIDAPI_REALTOR_HOST",
                REALTOR_HOST,
            )?),
            "rapidapi_redfin" => ProviderConfig::Redfin(rapidapi(
                "RAPIDAPI_REDFIN_KEY",
                "RAPIDAPI_REDFIN_HOST",
                REDFIN_HOST,
            )?),
            other => return Err(ConfigError::UnknownProvider(other.to_string())),
        };

        let cache_ttl_secs: u64 = parse_or(var("LISTINGS_CACHE_TTL_SECS"), "LISTINGS_CACHE_TTL_SECS", 1800)?;
        let workers: usize = parse_or(var("SERVER_WORKERS"), "SERVER_WORKERS", 8)?;
        let bind_addr: SocketAddr = parse_or(
            var("BIND_ADDR"),
            "BIND_ADDR",
            SocketAddr::from(([127, 0, 0, 1], 3000)),
        )?;

        Ok(Self {
            provider,
            default_location: var("LISTINGS_DEFAULT_LOCATION")
                .unwrap_or_else(|| DEFAULT_LOCATION.to_string()),
            cache_ttl: Duration::from_secs(cache_ttl_secs),
            database_path: var("DATABASE_PATH").unwrap_or_else(|| "listings.sqlite3".to_string()),
            bind_addr,
            workers: workers.max(1),
        })
    }
}

fn parse_or<T: std::str::FromStr>(
    raw: Option<String>,
    name: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value.parse().map_err(|_| ConfigError::Invalid { name, value }),
    }
}
