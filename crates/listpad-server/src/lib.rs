//! Listpad HTTP server.
//!
//! Serves the listing form at `/`, runs submissions against the configured
//! [`ListingStore`](listpad_storage::ListingStore), and shows the thank-you
//! page at `/thank-you`.

pub mod config;
pub mod error;
pub mod render;
pub mod routes;
pub mod state;
pub mod views;
