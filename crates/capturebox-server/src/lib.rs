//! `capturebox` HTTP server.
//!
//! Wires the core library into an Axum server: the capture page at `/`,
//! the two ingestion routes, a health route, and static assets under
//! `/static`.

pub mod app;
pub mod config;
pub mod error;
pub mod extract;
pub mod routes;
pub mod state;
