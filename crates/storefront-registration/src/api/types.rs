//! API request and response types.

use crate::registration::Submission;
use serde::{Deserialize, Serialize};

/// Registration form body, as posted by the page.
///
/// Missing fields deserialize as empty strings and unknown fields are
/// ignored; nothing outside these five names reaches the processor.
#[derive(Default, Deserialize)]
#[serde(default)]
pub struct RegistrationForm {
    /// Full name
    pub nm: String,

    /// Email address
    pub email: String,

    /// Password
    pub pwd: String,

    /// Password confirmation
    pub cpwd: String,

    /// Mobile number
    pub mno: String,
}

impl From<RegistrationForm> for Submission {
    fn from(form: RegistrationForm) -> Self {
        Submission {
            full_name: form.nm.trim().to_string(),
            email: form.email.trim().to_string(),
            password: form.pwd,
            confirm_password: form.cpwd,
            mobile: form.mno.trim().to_string(),
        }
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub storage_backend: String,
    pub pending_feedback: usize,
}
