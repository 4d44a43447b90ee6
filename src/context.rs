//! Shared application context.
//!
//! [`AppContext`] is the struct shared across all route handlers via Axum
//! state. It is cheaply cloneable because it only holds the pool handle and
//! `Arc`s. There is no cross-request mutable state: each handler checks out
//! its own connection and drops it when the request finishes.

use std::sync::Arc;

use moviweb_core::config::Config;
use moviweb_db::pool::DbPool;

use crate::omdb::OmdbClient;

/// Application context shared by all request handlers (via Axum state).
#[derive(Clone)]
pub struct AppContext {
    /// Database connection pool.
    pub db: DbPool,
    /// Immutable application configuration snapshot.
    pub config: Arc<Config>,
    /// Title-metadata lookup client.
    pub omdb: Arc<OmdbClient>,
}

impl AppContext {
    /// Build a context from a config and an initialized pool.
    pub fn new(config: Config, db: DbPool) -> Self {
        let omdb = OmdbClient::new(
            config.metadata.api_key.clone().unwrap_or_default(),
            config.metadata.api_url.clone(),
        );
        Self {
            db,
            config: Arc::new(config),
            omdb: Arc::new(omdb),
        }
    }
}
