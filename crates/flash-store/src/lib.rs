//! Per-session flash storage.
//!
//! A flash is a value written at the end of one request and consumed by
//! the next page view of the same session. Reads are destructive, and
//! unread flashes expire after a configurable TTL.

mod error;
mod store;
mod types;

pub use error::FlashError;
pub use store::{FlashStore, MAX_TTL};
pub use types::Flash;
