//! Relational registration store backed by sqlx.

use super::{NewRegistration, StorageError};
use secrecy::{ExposeSecret, SecretString};
use sqlx::AnyConnection;
use sqlx::Connection;
use tracing::{debug, instrument, warn};

/// Field values are always bound, never spliced into the statement text.
const INSERT_REGISTRATION: &str = "INSERT INTO registration \
     (reg_nm, reg_mno, reg_pwd, reg_email, reg_time) \
     VALUES (?, ?, ?, ?, ?)";

/// Database store that opens one connection per insert.
///
/// Nothing is connected at construction, so an unreachable database only
/// affects the request that tries to write.
pub struct SqlStore {
    url: SecretString,
}

impl SqlStore {
    /// Create a store for a MySQL or SQLite connection URL.
    pub fn new(url: impl Into<String>) -> Self {
        sqlx::any::install_default_drivers();
        Self {
            url: SecretString::new(url.into()),
        }
    }

    /// Insert one registration row.
    #[instrument(skip(self, record), fields(email = %record.email))]
    pub async fn insert(&self, record: &NewRegistration) -> Result<Option<i64>, StorageError> {
        let mut conn = AnyConnection::connect(self.url.expose_secret())
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        let result = sqlx::query(INSERT_REGISTRATION)
            .bind(record.full_name.as_str())
            .bind(record.mobile.as_str())
            .bind(record.password_hash.as_str())
            .bind(record.email.as_str())
            .bind(record.created_at)
            .execute(&mut conn)
            .await;

        if let Err(e) = conn.close().await {
            warn!("Failed to close database connection cleanly: {}", e);
        }

        let result = result.map_err(|e| StorageError::Query(e.to_string()))?;
        let id = result.last_insert_id();

        debug!(id = ?id, rows = result.rows_affected(), "Inserted registration");
        Ok(id)
    }
}
