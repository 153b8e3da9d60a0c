//! Core library for `capturebox`.
//!
//! Owns everything that touches the upload directory tree: the on-disk
//! layout, the startup bootstrapper that creates and probes it, session
//! and filename generation, client log records and the append-only log
//! file, and base64 image payloads with their store. This crate knows
//! nothing about HTTP; the server crate maps its errors onto responses.

pub mod bootstrap;
pub mod client_log;
pub mod error;
pub mod ids;
pub mod image;
pub mod image_store;
pub mod layout;
pub mod record;
pub mod session;

pub use bootstrap::{BootstrapReport, bootstrap};
pub use client_log::ClientLog;
pub use error::{IngestError, StartupError, StorageError};
pub use image_store::ImageStore;
pub use layout::StorageLayout;
pub use record::{ClientData, ClientDataRequest, LogRecord};
pub use session::SessionNote;
