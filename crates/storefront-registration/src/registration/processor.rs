//! Registration processing: validate, hash, persist, report.

use super::{hash_password, validate, Feedback, Submission};
use crate::error::RegistrationError;
use crate::storage::{NewRegistration, Store};
use chrono::Utc;
use tracing::{error, info, instrument, warn};

/// Message shown after a registration is stored.
pub const SUCCESS_MESSAGE: &str = "Registered Successfully";

/// Run one submission through validation and, if it passes, storage.
///
/// Never fails: every outcome, including storage and hashing failures, is
/// reported as [`Feedback`] for the next page view. Storage is only touched
/// when every field group is valid, and then exactly once.
#[instrument(skip_all, fields(email = %submission.email))]
pub async fn process_submission(submission: &Submission, store: &Store) -> Feedback {
    if let Err(errors) = validate(submission) {
        info!(error_count = errors.len(), "Registration rejected by validation");
        return Feedback::from_field_errors(errors);
    }

    let password_hash = match hash_off_runtime(submission.password.clone()).await {
        Ok(hash) => hash,
        Err(e) => {
            error!("Failed to hash password: {}", e);
            return Feedback::failure(format!("Registration Failed: {}", e));
        }
    };

    let record = NewRegistration {
        full_name: submission.full_name.clone(),
        mobile: submission.mobile.clone(),
        password_hash,
        email: submission.email.clone(),
        created_at: Utc::now().timestamp(),
    };

    match store.insert(&record).await {
        Ok(id) => {
            info!(id = ?id, backend = store.backend(), "Registration stored");
            Feedback::Success(SUCCESS_MESSAGE.to_string())
        }
        Err(e) => {
            warn!(backend = store.backend(), "Registration storage failed: {}", e);
            Feedback::failure(format!("Registration Failed: {}", e))
        }
    }
}

/// Argon2 is CPU and memory heavy, so it runs on the blocking pool.
async fn hash_off_runtime(password: String) -> Result<String, RegistrationError> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| RegistrationError::Hashing(e.to_string()))?
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registration::{verify_password, Field, FeedbackMessage};
    use crate::storage::MemoryStore;

    fn jane() -> Submission {
        Submission {
            full_name: "Jane Doe".into(),
            email: "jane@example.com".into(),
            password: "secret1".into(),
            confirm_password: "secret1".into(),
            mobile: "9876543210".into(),
        }
    }

    fn memory(store: &Store) -> &MemoryStore {
        match store {
            Store::Memory(m) => m,
            Store::Sql(_) => unreachable!(),
        }
    }

    #[tokio::test]
    async fn test_valid_submission_is_stored_hashed() {
        let store = Store::memory();

        let before = Utc::now().timestamp();
        let feedback = process_submission(&jane(), &store).await;
        let after = Utc::now().timestamp();

        assert_eq!(feedback, Feedback::Success(SUCCESS_MESSAGE.into()));

        let records = memory(&store).list().await;
        assert_eq!(records.len(), 1);

        let record = &records[0];
        assert_eq!(record.email, "jane@example.com");
        assert_eq!(record.full_name, "Jane Doe");
        assert_eq!(record.mobile, "9876543210");
        assert_ne!(record.password_hash, "secret1");
        assert!(!record.password_hash.contains("secret1"));
        assert!(verify_password("secret1", &record.password_hash).unwrap());
        assert!(record.created_at >= before && record.created_at <= after);
    }

    #[tokio::test]
    async fn test_hash_off_runtime_produces_verifiable_hash() {
        let hash = hash_off_runtime("secret1".to_string()).await.unwrap();
        assert!(verify_password("secret1", &hash).unwrap());
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_hashing_leaves_runtime_free() {
        let store = Store::memory();
        let other_task = tokio::spawn(async {
            tokio::task::yield_now().await;
        });

        let feedback = process_submission(&jane(), &store).await;

        assert!(feedback.is_success());
        // Runs to completion while the hash is computed elsewhere
        assert!(other_task.is_finished());
    }

    #[tokio::test]
    async fn test_empty_name_does_not_touch_storage() {
        let store = Store::memory();
        let submission = Submission {
            full_name: "  ".into(),
            ..jane()
        };

        let feedback = process_submission(&submission, &store).await;

        assert_eq!(
            feedback,
            Feedback::Errors(vec![FeedbackMessage {
                field: Some(Field::Name),
                text: "Enter Full Name".into(),
            }])
        );
        assert_eq!(memory(&store).count().await, 0);
    }

    #[tokio::test]
    async fn test_multiple_groups_reported_together() {
        let store = Store::memory();
        let submission = Submission {
            email: "not-an-email".into(),
            confirm_password: "secret2".into(),
            mobile: "12345".into(),
            ..jane()
        };

        let feedback = process_submission(&submission, &store).await;

        match feedback {
            Feedback::Errors(messages) => {
                let texts: Vec<&str> = messages.iter().map(|m| m.text.as_str()).collect();
                assert_eq!(
                    texts,
                    vec![
                        "Enter valid Email",
                        "Passwords do not match",
                        "Mobile Number must be at least 10 digits",
                    ]
                );
            }
            other => panic!("expected errors, got {:?}", other),
        }
        assert_eq!(memory(&store).count().await, 0);
    }

    #[tokio::test]
    async fn test_storage_failure_becomes_feedback() {
        let dir = tempfile::TempDir::new().unwrap();
        let url = format!(
            "sqlite://{}",
            dir.path().join("absent").join("registration.db").display()
        );
        let store = Store::sql(url);

        let feedback = process_submission(&jane(), &store).await;

        match feedback {
            Feedback::Errors(messages) => {
                assert_eq!(messages.len(), 1);
                assert_eq!(messages[0].field, None);
                assert!(messages[0]
                    .text
                    .starts_with("Registration Failed: Could not connect to database"));
            }
            other => panic!("expected errors, got {:?}", other),
        }
    }
}
