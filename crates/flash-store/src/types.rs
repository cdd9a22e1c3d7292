//! Flash entry types.

use chrono::{DateTime, Duration, Utc};

/// A value waiting to be shown once to the session that stored it.
#[derive(Debug, Clone)]
pub struct Flash<T> {
    pub value: T,
    pub stored_at: DateTime<Utc>,
}

impl<T> Flash<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            stored_at: Utc::now(),
        }
    }

    /// Time since the value was stored.
    pub fn age(&self) -> Duration {
        Utc::now() - self.stored_at
    }

    /// Unwrap the stored value.
    pub fn into_inner(self) -> T {
        self.value
    }
}
