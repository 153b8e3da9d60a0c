//! HTTP routes.
//!
//! - `GET  /`                 — capture page ([`page`])
//! - `POST /log-client-data`  — client data ingestion ([`client_data`])
//! - `POST /save-image`       — image ingestion ([`images`])
//! - `GET  /health`           — bootstrap status ([`health`])
//!
//! Static assets under `/static` are mounted in [`crate::app`].

pub mod client_data;
pub mod health;
pub mod images;
pub mod page;
