//! Process configuration.
//!
//! Built once at startup from the environment and passed by reference into
//! the components that need it; nothing reads the environment after this.

use std::env;
use std::path::PathBuf;

use chrono::Duration;

pub const DEFAULT_TOKEN_VALIDITY_HOURS: i64 = 24;
pub const DEFAULT_VERBOSITY: u8 = 3;

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Installation secret the token codec signs with.
    pub secret: String,

    /// How long an issued token stays valid.
    pub token_validity: Duration,

    /// Path of the single token slot file.
    pub token_path: PathBuf,

    /// Path of the JSON data file.
    pub data_path: PathBuf,

    /// Default message verbosity (overridable per invocation).
    pub verbosity: u8,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let secret = env::var("EVENTCRM_SECRET").unwrap_or_else(|_| {
            tracing::warn!("EVENTCRM_SECRET not set; using insecure dev default");
            "dev-secret".to_string()
        });

        let hours = env::var("EVENTCRM_TOKEN_VALIDITY_HOURS")
            .ok()
            .and_then(|raw| raw.parse::<i64>().ok())
            .unwrap_or(DEFAULT_TOKEN_VALIDITY_HOURS);

        let token_path = env::var_os("EVENTCRM_TOKEN_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(".eventcrm-token"));

        let data_path = env::var_os("EVENTCRM_DATA_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("eventcrm-records.json"));

        let verbosity = env::var("EVENTCRM_VERBOSITY")
            .ok()
            .and_then(|raw| raw.parse::<u8>().ok())
            .unwrap_or(DEFAULT_VERBOSITY);

        Self {
            secret,
            token_validity: Duration::hours(hours),
            token_path,
            data_path,
            verbosity,
        }
    }
}
