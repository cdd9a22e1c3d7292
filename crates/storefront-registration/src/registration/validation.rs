//! Field-group validation rules.
//!
//! Every field group is checked and all failing groups are reported.
//! Within a group the rules are ordered and only the first that applies
//! is reported.

use super::{Field, FieldError, Submission, ValidationErrorKind};
use validator::ValidateEmail;

/// Minimum password length, in characters.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Minimum number of digits in a mobile number.
pub const MIN_MOBILE_DIGITS: usize = 10;

/// Validate a submission, returning every failing field group in form order.
pub fn validate(submission: &Submission) -> Result<(), Vec<FieldError>> {
    let checks = [
        (Field::Name, check_name(submission)),
        (Field::Email, check_email(submission)),
        (Field::Password, check_password(submission)),
        (Field::Mobile, check_mobile(submission)),
    ];

    let errors: Vec<FieldError> = checks
        .into_iter()
        .filter_map(|(field, kind)| kind.map(|kind| FieldError::new(field, kind)))
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_name(submission: &Submission) -> Option<ValidationErrorKind> {
    if submission.full_name.trim().is_empty() {
        return Some(ValidationErrorKind::MissingField);
    }
    None
}

fn check_email(submission: &Submission) -> Option<ValidationErrorKind> {
    let email = &submission.email;
    if email.trim().is_empty() {
        return Some(ValidationErrorKind::MissingField);
    }
    if !email.validate_email() || !domain_has_dot(email) {
        return Some(ValidationErrorKind::InvalidFormat);
    }
    None
}

/// The grammar check accepts single-label domains; storefront addresses
/// must have a dotted domain with no empty labels.
fn domain_has_dot(email: &str) -> bool {
    match email.rsplit_once('@') {
        Some((_, domain)) => {
            domain.contains('.') && domain.split('.').all(|label| !label.is_empty())
        }
        None => false,
    }
}

fn check_password(submission: &Submission) -> Option<ValidationErrorKind> {
    let password = &submission.password;
    let confirm = &submission.confirm_password;

    if password.is_empty() || confirm.is_empty() {
        Some(ValidationErrorKind::MissingField)
    } else if password != confirm {
        Some(ValidationErrorKind::Mismatch)
    } else if password.chars().count() < MIN_PASSWORD_LEN {
        Some(ValidationErrorKind::TooShort)
    } else {
        None
    }
}

fn check_mobile(submission: &Submission) -> Option<ValidationErrorKind> {
    let mobile = &submission.mobile;

    if mobile.trim().is_empty() {
        Some(ValidationErrorKind::MissingField)
    } else if !mobile.chars().all(|c| c.is_ascii_digit()) {
        Some(ValidationErrorKind::NotNumeric)
    } else if mobile.len() < MIN_MOBILE_DIGITS {
        Some(ValidationErrorKind::TooShort)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ValidationErrorKind::*;

    fn valid() -> Submission {
        Submission {
            full_name: "Jane Doe".into(),
            email: "jane@example.com".into(),
            password: "secret1".into(),
            confirm_password: "secret1".into(),
            mobile: "9876543210".into(),
        }
    }

    fn errors_for(submission: &Submission, field: Field) -> Vec<ValidationErrorKind> {
        validate(submission)
            .err()
            .unwrap_or_default()
            .into_iter()
            .filter(|e| e.field == field)
            .map(|e| e.kind)
            .collect()
    }

    #[test]
    fn test_valid_submission_passes() {
        assert_eq!(validate(&valid()), Ok(()));
    }

    #[test]
    fn test_empty_name() {
        for name in ["", "   ", "\t\n"] {
            let submission = Submission {
                full_name: name.into(),
                ..valid()
            };
            assert_eq!(errors_for(&submission, Field::Name), vec![MissingField]);
        }
    }

    #[test]
    fn test_email_rules() {
        let missing = Submission {
            email: "".into(),
            ..valid()
        };
        assert_eq!(errors_for(&missing, Field::Email), vec![MissingField]);

        for bad in ["jane", "jane@", "@example.com", "jane@example", "jane@example.", "a b@example.com"] {
            let submission = Submission {
                email: bad.into(),
                ..valid()
            };
            assert_eq!(errors_for(&submission, Field::Email), vec![InvalidFormat], "{}", bad);
        }

        for good in ["jane@example.com", "jane.doe+shop@mail.example.co.uk"] {
            let submission = Submission {
                email: good.into(),
                ..valid()
            };
            assert!(errors_for(&submission, Field::Email).is_empty(), "{}", good);
        }
    }

    #[test]
    fn test_password_missing_either() {
        let no_password = Submission {
            password: "".into(),
            ..valid()
        };
        assert_eq!(errors_for(&no_password, Field::Password), vec![MissingField]);

        let no_confirm = Submission {
            confirm_password: "".into(),
            ..valid()
        };
        assert_eq!(errors_for(&no_confirm, Field::Password), vec![MissingField]);
    }

    #[test]
    fn test_password_mismatch_wins_over_length() {
        let submission = Submission {
            password: "abc".into(),
            confirm_password: "abd".into(),
            ..valid()
        };
        assert_eq!(errors_for(&submission, Field::Password), vec![Mismatch]);
    }

    #[test]
    fn test_password_too_short() {
        let submission = Submission {
            password: "12345".into(),
            confirm_password: "12345".into(),
            ..valid()
        };
        assert_eq!(errors_for(&submission, Field::Password), vec![TooShort]);

        let exactly_six = Submission {
            password: "123456".into(),
            confirm_password: "123456".into(),
            ..valid()
        };
        assert!(errors_for(&exactly_six, Field::Password).is_empty());
    }

    #[test]
    fn test_password_length_counts_characters() {
        let submission = Submission {
            password: "ééééé".into(),
            confirm_password: "ééééé".into(),
            ..valid()
        };
        assert_eq!(errors_for(&submission, Field::Password), vec![TooShort]);
    }

    #[test]
    fn test_mobile_non_digit_regardless_of_length() {
        for mobile in ["12a", "98765-43210", "+919876543210", "1e10", "98765432１0"] {
            let submission = Submission {
                mobile: mobile.into(),
                ..valid()
            };
            assert_eq!(errors_for(&submission, Field::Mobile), vec![NotNumeric], "{}", mobile);
        }
    }

    #[test]
    fn test_mobile_too_short_and_missing() {
        let short = Submission {
            mobile: "12345".into(),
            ..valid()
        };
        assert_eq!(errors_for(&short, Field::Mobile), vec![TooShort]);

        let missing = Submission {
            mobile: "".into(),
            ..valid()
        };
        assert_eq!(errors_for(&missing, Field::Mobile), vec![MissingField]);
    }

    #[test]
    fn test_all_groups_collected_in_form_order() {
        let errors = validate(&Submission::default()).unwrap_err();

        let fields: Vec<Field> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec![Field::Name, Field::Email, Field::Password, Field::Mobile]);
        assert!(errors.iter().all(|e| e.kind == MissingField));
    }
}
