//! Storefront registration service.
//!
//! Serves the customer registration form and processes its submissions:
//! - Validates every field group and reports all failures at once
//! - Stores valid registrations with an Argon2id password hash
//! - Carries the outcome across the post/redirect boundary as read-once
//!   session feedback

pub mod api;
pub mod config;
pub mod error;
pub mod registration;
pub mod render;
pub mod session;
pub mod storage;

pub use config::Config;
pub use error::RegistrationError;
pub use registration::{process_submission, Feedback, Submission};
pub use session::SessionCookies;
pub use storage::{Store, StorageError};
