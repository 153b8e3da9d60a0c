//! Server configuration for `capturebox`.
//!
//! Loads configuration from environment variables with sensible defaults.
//! All settings can be overridden via `CAPTUREBOX_*` environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;

use capturebox_core::session::DEFAULT_NOTE_CONTENT;

/// Default listening port on all interfaces.
const DEFAULT_PORT: u16 = 3000;

/// Default request body ceiling: 50 MiB, enough for base64 camera frames.
pub const DEFAULT_BODY_LIMIT: usize = 50 * 1024 * 1024;

/// Server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address to bind the HTTP listener to.
    pub bind_addr: SocketAddr,
    /// Public root. Static assets are served from here and uploads are
    /// stored under `<public_dir>/uploads`.
    pub public_dir: PathBuf,
    /// Maximum accepted request body, in bytes.
    pub body_limit: usize,
    /// Reject decoded images that do not start with the PNG signature.
    pub require_png: bool,
    /// Placeholder text rendered with each session note.
    pub note_content: String,
    /// Log level filter (e.g., `info`, `debug`, `warn`).
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT)),
            public_dir: PathBuf::from("./public"),
            body_limit: DEFAULT_BODY_LIMIT,
            require_png: false,
            note_content: DEFAULT_NOTE_CONTENT.to_owned(),
            log_level: "info".to_owned(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `CAPTUREBOX_BIND_ADDR` — full bind address (overrides `PORT`)
    /// - `PORT` — port to bind on `0.0.0.0` (default: `3000`)
    /// - `CAPTUREBOX_PUBLIC_DIR` — public root (default: `./public`)
    /// - `CAPTUREBOX_BODY_LIMIT` — body ceiling in bytes (default: 50 MiB)
    /// - `CAPTUREBOX_REQUIRE_PNG` — enforce the PNG signature (default: `false`)
    /// - `CAPTUREBOX_NOTE_CONTENT` — session note placeholder text
    /// - `CAPTUREBOX_LOG_LEVEL` — log filter (default: `info`)
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup.
    ///
    /// Unparseable values fall back to their defaults.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        // Priority: CAPTUREBOX_BIND_ADDR > PORT > default 0.0.0.0:3000
        let bind_addr = if let Some(addr) = lookup("CAPTUREBOX_BIND_ADDR") {
            addr.parse().unwrap_or(defaults.bind_addr)
        } else if let Some(port) = lookup("PORT") {
            let port: u16 = port.parse().unwrap_or(DEFAULT_PORT);
            SocketAddr::from(([0, 0, 0, 0], port))
        } else {
            defaults.bind_addr
        };

        let public_dir = lookup("CAPTUREBOX_PUBLIC_DIR")
            .map_or(defaults.public_dir, PathBuf::from);

        let body_limit = lookup("CAPTUREBOX_BODY_LIMIT")
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.body_limit);

        let require_png = lookup("CAPTUREBOX_REQUIRE_PNG")
            .is_some_and(|v| v == "true" || v == "1");

        let note_content = lookup("CAPTUREBOX_NOTE_CONTENT").unwrap_or(defaults.note_content);

        let log_level = lookup("CAPTUREBOX_LOG_LEVEL").unwrap_or(defaults.log_level);

        Self {
            bind_addr,
            public_dir,
            body_limit,
            require_png,
            note_content,
            log_level,
        }
    }
}
