//! Listing store abstraction for Listpad.
//!
//! This crate defines the [`ListingStore`] trait: the single insert call the
//! submission workflow makes against the remote `listings` table. It knows
//! nothing about forms, validation, or views: records reaching this layer
//! have already passed every field check.
//!
//! Three implementations are provided:
//!
//! - [`PostgresStore`]: direct `PostgreSQL` access via `sqlx` (feature `postgres-backend`)
//! - [`RestStore`]: hosted database REST endpoint, PostgREST style (feature `rest-backend`)
//! - [`MemoryStore`]: in-memory, for development and tests

mod error;
mod memory;
#[cfg(feature = "postgres-backend")]
mod postgres_backend;
mod record;
#[cfg(feature = "rest-backend")]
mod rest_backend;

pub use error::StoreError;
pub use memory::MemoryStore;
#[cfg(feature = "postgres-backend")]
pub use postgres_backend::PostgresStore;
pub use record::{LISTINGS_TABLE, ListingRecord};
#[cfg(feature = "rest-backend")]
pub use rest_backend::RestStore;

/// A remote store that accepts new listings.
///
/// The contract is deliberately narrow: one record in, success or an error
/// out. There is no partial success, no idempotency key, and no retry at
/// this layer.
///
/// Implementations must be safe to share across async tasks (`Send + Sync`).
#[async_trait::async_trait]
pub trait ListingStore: Send + Sync + 'static {
    /// Short backend name used in logs and the health endpoint.
    fn name(&self) -> &str;

    /// Insert one record into the `listings` collection.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] for any failure: transport, rejection by the
    /// remote service, or a constraint violation. Callers treat all variants
    /// the same way.
    async fn insert(&self, record: &ListingRecord) -> Result<(), StoreError>;
}
