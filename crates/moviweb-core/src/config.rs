//! Application configuration types.
//!
//! The top-level [`Config`] struct is deserialized from JSON and carries the
//! server, metadata-lookup, and session sub-configs. Every section defaults
//! sensibly so a completely empty `{}` file is valid. Credentials are then
//! overridden from the process environment ([`Config::apply_env`]), which is
//! how deployments are expected to supply them.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::Error;

/// Built-in fallback for the session-signing secret.
///
/// Only suitable for local development; `validate()` warns whenever a
/// deployment relies on it. Operators must always set `SECRET_KEY`.
pub const DEV_SESSION_SECRET: &str = "moviweb-dev-secret-do-not-deploy";

// ---------------------------------------------------------------------------
// Top-level Config
// ---------------------------------------------------------------------------

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub metadata: MetadataConfig,
    pub session: SessionConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            metadata: MetadataConfig::default(),
            session: SessionConfig::default(),
        }
    }
}

impl Config {
    /// Deserialize a `Config` from a JSON string.
    pub fn from_json(json_str: &str) -> Result<Self> {
        serde_json::from_str(json_str)
            .map_err(|e| Error::Validation(format!("config parse error: {e}")))
    }

    /// Load configuration from a file path, falling back to defaults if the
    /// path is `None` or the file does not exist.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };

        match std::fs::read_to_string(path) {
            Ok(contents) => Self::from_json(&contents).unwrap_or_else(|e| {
                tracing::warn!("Failed to parse config file {}: {e}", path.display());
                Self::default()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("No config file at {}; using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                tracing::warn!("Failed to read config file {}: {e}", path.display());
                Self::default()
            }
        }
    }

    /// Override credentials from the process environment.
    ///
    /// `OMDB_API_KEY` supplies the metadata-service credential and
    /// `SECRET_KEY` the session-signing secret. Environment values win over
    /// anything from the config file.
    pub fn apply_env(&mut self) {
        if let Ok(key) = std::env::var("OMDB_API_KEY") {
            if !key.is_empty() {
                self.metadata.api_key = Some(key);
            }
        }
        if let Ok(secret) = std::env::var("SECRET_KEY") {
            if !secret.is_empty() {
                self.session.secret = Some(secret);
            }
        }
    }

    /// The session-signing secret, falling back to the built-in development
    /// value when none is configured.
    pub fn session_secret(&self) -> &str {
        self.session.secret.as_deref().unwrap_or(DEV_SESSION_SECRET)
    }

    /// Return a list of validation warnings (non-fatal issues).
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.server.port == 0 {
            warnings.push("server.port is 0; a random port will be assigned".into());
        }

        if self.metadata.api_key.is_none() {
            warnings.push(
                "metadata.api_key is not set (OMDB_API_KEY); movie lookups will fail".into(),
            );
        }

        if self.metadata.api_url.is_empty() {
            warnings.push("metadata.api_url is empty".into());
        }

        if self.session.secret.is_none() {
            warnings.push(
                "session.secret is not set (SECRET_KEY); falling back to the built-in \
                 development secret. Never deploy like this"
                    .into(),
            );
        }

        warnings
    }
}

// ---------------------------------------------------------------------------
// Sub-configs
// ---------------------------------------------------------------------------

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub db_path: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 8080,
            db_path: PathBuf::from("./data/moviweb.db"),
        }
    }
}

/// Metadata-lookup service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MetadataConfig {
    /// API credential, usually supplied via `OMDB_API_KEY`.
    pub api_key: Option<String>,
    /// Base URL of the title-lookup endpoint.
    #[serde(default = "default_api_url")]
    pub api_url: String,
}

fn default_api_url() -> String {
    "https://www.omdbapi.com/".into()
}

impl Default for MetadataConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: default_api_url(),
        }
    }
}

/// Session-signing settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Signing secret, usually supplied via `SECRET_KEY`.
    pub secret: Option<String>,
}
