//! In-memory flash storage with TTL expiration.

use crate::error::FlashError;
use crate::types::Flash;
use std::collections::HashMap;
use std::sync::{Arc, Weak};
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

/// Entry in the flash store with expiration tracking.
struct FlashEntry<T> {
    flash: Flash<T>,
    expires_at: Instant,
}

type Entries<T> = RwLock<HashMap<String, FlashEntry<T>>>;

/// Longest time an unread flash is kept. Larger TTLs are clamped to this
/// so expiry instants cannot overflow.
pub const MAX_TTL: Duration = Duration::from_secs(365 * 24 * 60 * 60);

/// In-memory flash store keyed by session id.
///
/// Each session holds at most one pending value. [`FlashStore::take`]
/// removes the value it returns, so a value is observed at most once.
/// Values nobody reads are dropped after the configured TTL.
pub struct FlashStore<T> {
    entries: Arc<Entries<T>>,
    ttl: Duration,
}

impl<T> Clone for FlashStore<T> {
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
            ttl: self.ttl,
        }
    }
}

impl<T: Send + Sync + 'static> FlashStore<T> {
    /// Create a new flash store.
    ///
    /// Spawns a background task that purges expired entries every
    /// `cleanup_interval`. The task exits once every handle to the store
    /// has been dropped. Must be called from within a Tokio runtime.
    ///
    /// A `ttl` above [`MAX_TTL`] is clamped to it.
    pub fn new(ttl: Duration, cleanup_interval: Duration) -> Self {
        let ttl = if ttl > MAX_TTL {
            warn!("Flash TTL {:?} exceeds maximum, using {:?}", ttl, MAX_TTL);
            MAX_TTL
        } else {
            ttl
        };

        let store = Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        };

        let entries = Arc::downgrade(&store.entries);
        tokio::spawn(async move {
            cleanup_loop(entries, cleanup_interval).await;
        });

        info!(
            "In-memory flash store initialized (ttl={:?}, cleanup_interval={:?})",
            ttl, cleanup_interval
        );

        store
    }

    /// Store a value for a session, replacing anything still pending.
    #[instrument(skip_all)]
    pub async fn put(&self, session_id: &str, value: T) -> Result<(), FlashError> {
        if session_id.is_empty() {
            return Err(FlashError::EmptyKey);
        }

        let mut entries = self.entries.write().await;
        let replaced = entries
            .insert(
                session_id.to_string(),
                FlashEntry {
                    flash: Flash::new(value),
                    expires_at: Instant::now() + self.ttl,
                },
            )
            .is_some();

        if replaced {
            debug!("Replaced pending flash");
        }

        Ok(())
    }

    /// Remove and return the pending value for a session.
    ///
    /// Expired values are discarded and reported as absent.
    #[instrument(skip_all)]
    pub async fn take(&self, session_id: &str) -> Option<Flash<T>> {
        let mut entries = self.entries.write().await;
        let entry = entries.remove(session_id)?;

        if entry.expires_at <= Instant::now() {
            debug!("Discarded expired flash");
            return None;
        }

        Some(entry.flash)
    }

    /// Number of sessions with an unexpired pending value.
    pub async fn pending_count(&self) -> usize {
        let entries = self.entries.read().await;
        let now = Instant::now();
        entries
            .values()
            .filter(|entry| entry.expires_at > now)
            .count()
    }

    /// Effective time an unread flash is kept.
    #[cfg(test)]
    pub(crate) fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Number of entries held, including expired ones not yet purged.
    #[cfg(test)]
    pub(crate) async fn stored_count(&self) -> usize {
        self.entries.read().await.len()
    }
}

/// Periodically remove expired entries until the store is dropped.
async fn cleanup_loop<T>(entries: Weak<Entries<T>>, interval: Duration) {
    loop {
        tokio::time::sleep(interval).await;

        let Some(shared) = entries.upgrade() else {
            debug!("Flash store dropped, stopping cleanup");
            return;
        };

        let now = Instant::now();
        let mut entries = shared.write().await;
        let before_count = entries.len();

        entries.retain(|_, entry| entry.expires_at > now);

        let removed = before_count - entries.len();
        if removed > 0 {
            debug!("Cleaned up {} expired flashes", removed);
        }
    }
}
