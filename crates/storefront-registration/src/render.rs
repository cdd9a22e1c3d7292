//! Registration page rendering.

use crate::error::RegistrationError;
use crate::registration::{Feedback, Field};
use askama::Template;

/// Route the form posts to.
pub const PROCESS_PATH: &str = "/registration/process";

/// Messages for one field group, anchored to its form input.
#[derive(Debug)]
pub struct FieldMessages {
    pub key: &'static str,
    pub messages: Vec<String>,
}

impl FieldMessages {
    fn new(field: Field) -> Self {
        Self {
            key: field.form_key(),
            messages: Vec::new(),
        }
    }
}

/// The registration form, with any feedback from the previous submission
/// placed next to the field it concerns.
#[derive(Debug, Template)]
#[template(path = "registration.html")]
pub struct RegistrationPage {
    pub action: &'static str,
    pub success: Option<String>,
    pub general_errors: Vec<String>,
    pub name_errors: FieldMessages,
    pub email_errors: FieldMessages,
    pub password_errors: FieldMessages,
    pub mobile_errors: FieldMessages,
}

impl RegistrationPage {
    pub fn new(feedback: Option<Feedback>) -> Self {
        let mut page = Self {
            action: PROCESS_PATH,
            success: None,
            general_errors: Vec::new(),
            name_errors: FieldMessages::new(Field::Name),
            email_errors: FieldMessages::new(Field::Email),
            password_errors: FieldMessages::new(Field::Password),
            mobile_errors: FieldMessages::new(Field::Mobile),
        };

        match feedback {
            None => {}
            Some(Feedback::Success(message)) => page.success = Some(message),
            Some(Feedback::Errors(messages)) => {
                for message in messages {
                    let bucket = match message.field {
                        None => &mut page.general_errors,
                        Some(Field::Name) => &mut page.name_errors.messages,
                        Some(Field::Email) => &mut page.email_errors.messages,
                        Some(Field::Password) => &mut page.password_errors.messages,
                        Some(Field::Mobile) => &mut page.mobile_errors.messages,
                    };
                    bucket.push(message.text);
                }
            }
        }

        page
    }
}

/// Render the page to HTML.
pub fn render_page(feedback: Option<Feedback>) -> Result<String, RegistrationError> {
    Ok(RegistrationPage::new(feedback).render()?)
}
