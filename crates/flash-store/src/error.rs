//! Flash storage errors.

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum FlashError {
    #[error("Session key must not be empty")]
    EmptyKey,
}
