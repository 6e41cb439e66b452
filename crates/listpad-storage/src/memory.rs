//! In-memory listing store.
//!
//! Keeps every inserted record in a `Vec` behind a `RwLock`. Nothing is
//! persisted: all data is lost when the process exits. Used for local
//! development and as the real backend in unit and integration tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::RwLock;

use crate::{LISTINGS_TABLE, ListingRecord, ListingStore, StoreError};

/// An in-memory listing store.
///
/// Clones share the same underlying records. An outage switch makes every
/// insert fail with [`StoreError::Unavailable`], which is how the failure
/// path of the workflow is exercised without a network.
///
/// # Examples
///
/// ```
/// # use listpad_storage::{ListingRecord, ListingStore, MemoryStore};
/// # #[tokio::main]
/// # async fn main() {
/// let store = MemoryStore::new();
/// let record = ListingRecord {
///     name: "Acme".to_owned(),
///     website: "acme.io".to_owned(),
///     about: "Rockets, anvils, and portable holes.".to_owned(),
///     contact_number: "5551234567".to_owned(),
/// };
/// store.insert(&record).await.unwrap();
/// assert_eq!(store.len().await, 1);
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Arc<RwLock<Vec<ListingRecord>>>,
    unavailable: Arc<AtomicBool>,
}

impl MemoryStore {
    /// Create a new empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle the outage switch. While set, every insert fails.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Snapshot of every record inserted so far, oldest first.
    pub async fn records(&self) -> Vec<ListingRecord> {
        self.records.read().await.clone()
    }

    /// Number of records inserted so far.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Whether no record has been inserted yet.
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait::async_trait]
impl ListingStore for MemoryStore {
    #[allow(clippy::unnecessary_literal_bound)]
    fn name(&self) -> &str {
        "memory"
    }

    async fn insert(&self, record: &ListingRecord) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable {
                name: self.name().to_owned(),
            });
        }

        let mut records = self.records.write().await;
        records.push(record.clone());
        tracing::debug!(table = LISTINGS_TABLE, total = records.len(), "listing stored in memory");
        Ok(())
    }
}
