//! Shared test harness for integration tests.
//!
//! Provides [`TestHarness`] which creates an in-memory DB, default config,
//! and full [`AppContext`]. The [`with_server`] constructors start Axum on
//! a random port for HTTP-level testing; metadata-dependent tests point the
//! config at a wiremock server first.

use std::net::SocketAddr;

use moviweb::context::AppContext;
use moviweb::router::build_router;
use moviweb_core::config::Config;
use moviweb_db::pool::{init_memory_pool, DbPool};

/// Test harness wrapping a fully-constructed [`AppContext`] backed by an
/// in-memory database.
pub struct TestHarness {
    pub ctx: AppContext,
    pub db: DbPool,
}

impl TestHarness {
    /// Create a new harness with a custom configuration and in-memory DB.
    pub fn with_config(config: Config) -> Self {
        let db = init_memory_pool().expect("failed to create in-memory pool");
        let ctx = AppContext::new(config, db.clone());
        Self { ctx, db }
    }

    /// Start an Axum server on a random port and return the harness together
    /// with the bound socket address.
    pub async fn with_server() -> (Self, SocketAddr) {
        Self::with_server_config(Config::default()).await
    }

    /// Start an Axum server whose metadata lookups go to `api_url` (usually
    /// a wiremock server).
    pub async fn with_omdb_server(api_url: &str) -> (Self, SocketAddr) {
        let mut config = Config::default();
        config.metadata.api_key = Some("test-key".into());
        config.metadata.api_url = api_url.to_string();
        Self::with_server_config(config).await
    }

    /// Start an Axum server with custom config on a random port.
    pub async fn with_server_config(config: Config) -> (Self, SocketAddr) {
        let harness = Self::with_config(config);
        let app = build_router(harness.ctx.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind random port");
        let addr = listener.local_addr().expect("failed to get local addr");

        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        (harness, addr)
    }

    /// Get a database connection from the pool.
    pub fn conn(&self) -> moviweb_db::pool::PooledConnection {
        moviweb_db::pool::get_conn(&self.db).expect("failed to get db connection")
    }

    /// Create a user directly in the database, bypassing HTTP.
    pub fn create_user(&self, name: &str) -> moviweb_db::models::User {
        let conn = self.conn();
        moviweb_db::queries::users::create_user(&conn, name).expect("failed to create user")
    }
}
