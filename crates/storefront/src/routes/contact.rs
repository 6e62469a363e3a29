//! Contact form route handler.
//!
//! Messages are not delivered anywhere; accepted submissions are logged and
//! acknowledged with a reference id.

use axum::{Json, extract::rejection::JsonRejection};
use serde::{Deserialize, Serialize};
use stride_core::Email;
use tracing::instrument;
use uuid::Uuid;

use crate::error::{AppError, Result, add_breadcrumb};

const MIN_NAME_CHARS: usize = 2;
const MIN_SUBJECT_CHARS: usize = 4;
const MIN_MESSAGE_CHARS: usize = 10;

/// Contact form data.
#[derive(Debug, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message: String,
    /// Privacy policy consent.
    #[serde(default)]
    pub privacy: bool,
}

/// A contact form that passed validation.
#[derive(Debug)]
pub struct ContactSubmission {
    pub name: String,
    pub email: Email,
    pub subject: String,
    pub message: String,
}

/// Response for an accepted submission.
#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub success: bool,
    pub reference: Uuid,
}

fn long_enough(value: &str, min: usize) -> bool {
    value.chars().count() >= min
}

impl ContactForm {
    /// Check fields in form order and report the first failure.
    ///
    /// # Errors
    ///
    /// Returns `AppError::BadRequest` with a message fit for display.
    pub fn validate(self) -> Result<ContactSubmission> {
        let name = self.name.trim();
        if !long_enough(name, MIN_NAME_CHARS) {
            return Err(AppError::BadRequest(
                "Name must be at least 2 characters".to_string(),
            ));
        }

        let email = Email::parse(&self.email)
            .map_err(|_| AppError::BadRequest("Please enter a valid email address".to_string()))?;

        let subject = self.subject.trim();
        if !long_enough(subject, MIN_SUBJECT_CHARS) {
            return Err(AppError::BadRequest(
                "Subject must be at least 4 characters".to_string(),
            ));
        }

        let message = self.message.trim();
        if !long_enough(message, MIN_MESSAGE_CHARS) {
            return Err(AppError::BadRequest(
                "Message must be at least 10 characters".to_string(),
            ));
        }

        if !self.privacy {
            return Err(AppError::BadRequest(
                "You must agree to the Privacy Policy".to_string(),
            ));
        }

        Ok(ContactSubmission {
            name: name.to_string(),
            email,
            subject: subject.to_string(),
            message: message.to_string(),
        })
    }
}

/// POST /api/contact
#[instrument(skip(form))]
pub async fn submit(
    form: std::result::Result<Json<ContactForm>, JsonRejection>,
) -> Result<Json<ContactResponse>> {
    let Json(form) = form?;
    let submission = form.validate()?;
    let reference = Uuid::new_v4();

    add_breadcrumb("contact", "Message received", None);
    tracing::info!(
        %reference,
        name = %submission.name,
        email_domain = submission.email.domain(),
        subject = %submission.subject,
        message_chars = submission.message.chars().count(),
        "Contact message received"
    );

    Ok(Json(ContactResponse {
        success: true,
        reference,
    }))
}
