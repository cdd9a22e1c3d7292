//! Persistence for registration records.

mod memory;
mod sql;

pub use memory::MemoryStore;
pub use sql::SqlStore;

use std::fmt;
use thiserror::Error;

/// Storage failures, carrying the reason reported by the backend.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StorageError {
    #[error("Could not connect to database: {0}")]
    Connection(String),

    #[error("Query failed: {0}")]
    Query(String),
}

/// A validated registration ready to be inserted.
///
/// Only the password hash is held; the plaintext never reaches storage.
#[derive(Clone, PartialEq, Eq)]
pub struct NewRegistration {
    pub full_name: String,
    pub mobile: String,
    pub password_hash: String,
    pub email: String,
    /// Seconds since the Unix epoch
    pub created_at: i64,
}

impl fmt::Debug for NewRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewRegistration")
            .field("full_name", &self.full_name)
            .field("mobile", &self.mobile)
            .field("password_hash", &"[REDACTED]")
            .field("email", &self.email)
            .field("created_at", &self.created_at)
            .finish()
    }
}

/// A persisted registration row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredRegistration {
    pub id: i64,
    pub full_name: String,
    pub mobile: String,
    pub password_hash: String,
    pub email: String,
    pub created_at: i64,
}

impl StoredRegistration {
    pub(crate) fn from_new(id: i64, record: &NewRegistration) -> Self {
        Self {
            id,
            full_name: record.full_name.clone(),
            mobile: record.mobile.clone(),
            password_hash: record.password_hash.clone(),
            email: record.email.clone(),
            created_at: record.created_at,
        }
    }
}

/// Storage backend for registrations.
pub enum Store {
    /// Relational database reached through sqlx
    Sql(SqlStore),
    /// In-memory only (no persistence)
    Memory(MemoryStore),
}

impl Store {
    /// Database-backed store for the given connection URL.
    pub fn sql(url: impl Into<String>) -> Self {
        Store::Sql(SqlStore::new(url))
    }

    /// Force memory store.
    pub fn memory() -> Self {
        Store::Memory(MemoryStore::new())
    }

    /// Insert one registration, returning its assigned id when the
    /// backend reports one.
    pub async fn insert(&self, record: &NewRegistration) -> Result<Option<i64>, StorageError> {
        match self {
            Store::Sql(s) => s.insert(record).await,
            Store::Memory(s) => s.insert(record).await.map(Some),
        }
    }

    /// Short backend name for logs and health output.
    pub fn backend(&self) -> &'static str {
        match self {
            Store::Sql(_) => "sql",
            Store::Memory(_) => "memory",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> NewRegistration {
        NewRegistration {
            full_name: "Jane Doe".into(),
            mobile: "9876543210".into(),
            password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".into(),
            email: "jane@example.com".into(),
            created_at: 1_700_000_000,
        }
    }

    #[test]
    fn test_new_registration_debug_hides_hash() {
        let rendered = format!("{:?}", record());
        assert!(!rendered.contains("argon2id"));
        assert!(rendered.contains("jane@example.com"));
    }

    #[test]
    fn test_stored_registration_from_new() {
        let stored = StoredRegistration::from_new(7, &record());

        assert_eq!(stored.id, 7);
        assert_eq!(stored.email, "jane@example.com");
        assert_eq!(stored.password_hash, record().password_hash);
        assert_eq!(stored.created_at, 1_700_000_000);
    }

    #[tokio::test]
    async fn test_store_memory_variant() {
        let store = Store::memory();
        assert_eq!(store.backend(), "memory");

        let id = store.insert(&record()).await.unwrap();
        assert_eq!(id, Some(1));
    }
}
