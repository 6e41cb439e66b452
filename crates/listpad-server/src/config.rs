//! Server configuration for Listpad.
//!
//! Loads configuration from environment variables with sensible defaults.
//! All settings can be overridden via `LISTPAD_*` environment variables.

use std::net::SocketAddr;
use std::time::Duration;

use listpad_core::form::SUCCESS_DELAY;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind the HTTP listener to.
    pub bind_addr: SocketAddr,
    /// Where listings are written.
    pub store: StoreBackendType,
    /// Log level filter (e.g., `info`, `debug`, `warn`).
    pub log_level: String,
    /// Time between a successful insert and the redirect to `/thank-you`.
    pub success_delay: Duration,
    /// How long an untouched form view is kept.
    pub view_ttl: Duration,
    /// Interval between idle-view sweeps.
    pub view_sweep_interval: Duration,
}

/// Supported listing store backends.
#[derive(Clone, PartialEq, Eq)]
pub enum StoreBackendType {
    /// In-memory (development only, data lost on restart).
    Memory,
    /// Direct PostgreSQL connection.
    Postgres { url: String },
    /// Hosted database REST endpoint.
    Rest { url: String, api_key: String },
}

impl std::fmt::Debug for StoreBackendType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Memory => f.write_str("Memory"),
            Self::Postgres { .. } => f.write_str("Postgres"),
            Self::Rest { url, .. } => f
                .debug_struct("Rest")
                .field("url", url)
                .finish_non_exhaustive(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
            store: StoreBackendType::Memory,
            log_level: "info".to_owned(),
            success_delay: SUCCESS_DELAY,
            view_ttl: Duration::from_secs(1800),
            view_sweep_interval: Duration::from_secs(60),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `PORT`: port to bind on (binds to `0.0.0.0`)
    /// - `LISTPAD_BIND_ADDR`: full bind address (overrides `PORT`, default: `127.0.0.1:8080`)
    /// - `LISTPAD_STORE`: `memory`, `postgres`, or `rest` (default: `memory`)
    /// - `DATABASE_URL`: PostgreSQL connection string (for `postgres`)
    /// - `LISTPAD_REST_URL`: hosted project URL (for `rest`)
    /// - `LISTPAD_REST_KEY`: hosted project API key (for `rest`)
    /// - `LISTPAD_LOG_LEVEL`: log filter (default: `info`)
    /// - `LISTPAD_SUCCESS_DELAY_MS`: post-success delay (default: `4000`)
    /// - `LISTPAD_VIEW_TTL_SECS`: idle form view lifetime (default: `1800`)
    /// - `LISTPAD_VIEW_SWEEP_SECS`: idle view sweep interval (default: `60`)
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    #[must_use]
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        // Priority: LISTPAD_BIND_ADDR > PORT > default
        let bind_addr = if let Some(addr) = get("LISTPAD_BIND_ADDR") {
            addr.parse().unwrap_or(defaults.bind_addr)
        } else if let Some(port_str) = get("PORT") {
            let port: u16 = port_str.parse().unwrap_or(8080);
            SocketAddr::from(([0, 0, 0, 0], port))
        } else {
            defaults.bind_addr
        };

        let store = match get("LISTPAD_STORE")
            .unwrap_or_else(|| "memory".to_owned())
            .to_lowercase()
            .as_str()
        {
            "postgres" | "postgresql" => StoreBackendType::Postgres {
                url: get("DATABASE_URL")
                    .unwrap_or_else(|| "postgres://localhost/listpad".to_owned()),
            },
            "rest" => StoreBackendType::Rest {
                url: get("LISTPAD_REST_URL").unwrap_or_else(|| "http://localhost:54321".to_owned()),
                api_key: get("LISTPAD_REST_KEY").unwrap_or_default(),
            },
            _ => StoreBackendType::Memory,
        };

        let log_level = get("LISTPAD_LOG_LEVEL").unwrap_or(defaults.log_level);

        let millis = |key: &str, default: Duration| {
            get(key)
                .and_then(|v| v.parse().ok())
                .map_or(default, Duration::from_millis)
        };
        let secs = |key: &str, default: Duration| {
            get(key)
                .and_then(|v| v.parse().ok())
                .map_or(default, Duration::from_secs)
        };

        Self {
            bind_addr,
            store,
            log_level,
            success_delay: millis("LISTPAD_SUCCESS_DELAY_MS", defaults.success_delay),
            view_ttl: secs("LISTPAD_VIEW_TTL_SECS", defaults.view_ttl),
            view_sweep_interval: secs("LISTPAD_VIEW_SWEEP_SECS", defaults.view_sweep_interval)
                .max(Duration::from_secs(1)),
        }
    }
}
