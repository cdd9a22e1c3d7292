//! Registration submissions, their validation, and the processing flow.

mod password;
mod processor;
mod validation;

pub use password::{hash_password, verify_password};
pub use processor::{process_submission, SUCCESS_MESSAGE};
pub use validation::{validate, MIN_MOBILE_DIGITS, MIN_PASSWORD_LEN};

use std::fmt;
use thiserror::Error;

/// One registration attempt, before validation.
///
/// Name, email and mobile number are expected to be trimmed already;
/// passwords are kept exactly as typed.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Submission {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub mobile: String,
}

impl fmt::Debug for Submission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Submission")
            .field("full_name", &self.full_name)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("confirm_password", &"[REDACTED]")
            .field("mobile", &self.mobile)
            .finish()
    }
}

/// A logical input of the form. Password and confirmation form one group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Email,
    Password,
    Mobile,
}

impl Field {
    /// Name of the HTML input this field group is anchored to.
    pub fn form_key(self) -> &'static str {
        match self {
            Field::Name => "nm",
            Field::Email => "email",
            Field::Password => "pwd",
            Field::Mobile => "mno",
        }
    }
}

/// Validation rule that rejected a field group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationErrorKind {
    #[error("missing field")]
    MissingField,
    #[error("invalid format")]
    InvalidFormat,
    #[error("values do not match")]
    Mismatch,
    #[error("too short")]
    TooShort,
    #[error("not numeric")]
    NotNumeric,
}

/// A failed rule for one field group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub kind: ValidationErrorKind,
}

impl FieldError {
    pub fn new(field: Field, kind: ValidationErrorKind) -> Self {
        Self { field, kind }
    }

    /// Message shown next to the field.
    pub fn message(&self) -> &'static str {
        use ValidationErrorKind::*;
        match (self.field, self.kind) {
            (Field::Name, _) => "Enter Full Name",
            (Field::Email, MissingField) => "Enter Email",
            (Field::Email, _) => "Enter valid Email",
            (Field::Password, MissingField) => "Enter Password and Confirm Password",
            (Field::Password, Mismatch) => "Passwords do not match",
            (Field::Password, _) => "Password must be at least 6 characters",
            (Field::Mobile, MissingField) => "Enter Mobile Number",
            (Field::Mobile, NotNumeric) => "Mobile Number must be numeric",
            (Field::Mobile, _) => "Mobile Number must be at least 10 digits",
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// A message destined for the next page view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackMessage {
    /// Field the message belongs to, or `None` for page-level messages
    pub field: Option<Field>,
    pub text: String,
}

impl FeedbackMessage {
    pub fn general(text: impl Into<String>) -> Self {
        Self {
            field: None,
            text: text.into(),
        }
    }
}

impl From<FieldError> for FeedbackMessage {
    fn from(error: FieldError) -> Self {
        Self {
            field: Some(error.field),
            text: error.message().to_string(),
        }
    }
}

/// Result of processing one submission, shown once on the next render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feedback {
    Success(String),
    Errors(Vec<FeedbackMessage>),
}

impl Feedback {
    pub fn from_field_errors(errors: Vec<FieldError>) -> Self {
        Feedback::Errors(errors.into_iter().map(FeedbackMessage::from).collect())
    }

    /// Single page-level error.
    pub fn failure(text: impl Into<String>) -> Self {
        Feedback::Errors(vec![FeedbackMessage::general(text)])
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Feedback::Success(_))
    }
}
