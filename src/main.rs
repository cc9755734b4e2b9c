use crate::config::Config;
use crate::db::{init_db, Database};
use crate::listings::http::ReqwestFetcher;
use crate::listings::{build_provider, ListingsCache, ListingsService};
use crate::responses::error_to_response;
use crate::router::{handle, AppState};
use astra::Server;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

mod auth;
mod config;
mod db;
mod errors;
mod listings;
mod responses;
mod router;

#[cfg(test)]
mod tests;

fn main() {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };

    let db = Database::new(config.database_path.clone());
    if let Err(e) = init_db(&db, "sql/schema.sql") {
        tracing::error!(error = %e, "database initialization failed");
        std::process::exit(1);
    }

    let fetcher = match ReqwestFetcher::new() {
        Ok(f) => Arc::new(f),
        Err(e) => {
            tracing::error!(error = %e, "HTTP client setup failed");
            std::process::exit(1);
        }
    };

    // One cache for the life of the process.
    let cache = Arc::new(ListingsCache::new(config.cache_ttl));
    let provider = build_provider(&config.provider, &config.default_location, fetcher);
    let state = AppState {
        db,
        listings: ListingsService::new(provider, cache),
    };

    tracing::info!(
        addr = %config.bind_addr,
        provider = state.listings.provider_name(),
        workers = config.workers,
        "starting server"
    );

    let server = Server::bind(&config.bind_addr).max_workers(config.workers);

    let result = server.serve(move |req: astra::Request, _info| {
        let method = req.method().clone();
        let path = req.uri().path().to_string();

        match handle(req, &state) {
            Ok(resp) => resp,
            Err(err) => {
                tracing::debug!(%method, %path, error = %err, "request failed");
                error_to_response(err)
            }
        }
    });

    if let Err(e) = result {
        tracing::error!(error = %e, "server ended with error");
    }

    tracing::info!("server shut down");
}
