//! In-memory registration store.

use super::{NewRegistration, StorageError, StoredRegistration};
use tokio::sync::RwLock;
use tracing::debug;

/// In-memory store for testing or when no database is configured.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<Vec<StoredRegistration>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record, assigning the next sequential id.
    pub async fn insert(&self, record: &NewRegistration) -> Result<i64, StorageError> {
        let mut records = self.records.write().await;
        let id = records.len() as i64 + 1;
        records.push(StoredRegistration::from_new(id, record));

        debug!(id, "Memory store: inserted registration");
        Ok(id)
    }

    /// Snapshot of all stored records in insertion order.
    pub async fn list(&self) -> Vec<StoredRegistration> {
        self.records.read().await.clone()
    }

    pub async fn count(&self) -> usize {
        self.records.read().await.len()
    }
}
