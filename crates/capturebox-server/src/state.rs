//! Shared application state for `capturebox` server.
//!
//! A single [`AppState`] is constructed at startup, after the upload tree
//! has been bootstrapped, and shared across all Axum handlers via `Arc`.
//! Nothing in it changes after construction.

use std::sync::Arc;

use capturebox_core::{BootstrapReport, ClientLog, ImageStore, StorageLayout};

use crate::config::ServerConfig;

/// Shared application state passed to all HTTP handlers.
#[derive(Debug)]
pub struct AppState {
    /// Writer for `uploads/log.txt`.
    pub client_log: ClientLog,
    /// Writer for `uploads/images/`.
    pub images: ImageStore,
    /// Result of the startup bootstrap.
    pub bootstrap: BootstrapReport,
    /// Reject images lacking the PNG signature.
    pub require_png: bool,
    /// Placeholder text for session notes.
    pub note_content: String,
}

impl AppState {
    /// Assemble state from the configuration and a finished bootstrap.
    #[must_use]
    pub fn new(
        config: &ServerConfig,
        layout: &StorageLayout,
        bootstrap: BootstrapReport,
    ) -> Arc<Self> {
        Arc::new(Self {
            client_log: ClientLog::new(&layout.log_file),
            images: ImageStore::new(&layout.images_dir),
            bootstrap,
            require_png: config.require_png,
            note_content: config.note_content.clone(),
        })
    }
}
