use std::sync::Arc;

use chrono::Utc;
use once_cell::sync::Lazy;
use regex::Regex;
use shared::{
    domain::{ContactId, ContactMessage},
    error::ContactError,
    protocol::{ContactAck, ContactSubmission},
};
use storage::ContactStore;
use tracing::{error, info, warn};

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

#[derive(Clone)]
pub struct ApiContext {
    pub contacts: Arc<dyn ContactStore>,
}

impl ApiContext {
    pub fn new(contacts: impl ContactStore + 'static) -> Self {
        Self {
            contacts: Arc::new(contacts),
        }
    }
}

/// Contact fields that passed validation, exactly as submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedContact {
    pub name: String,
    pub email: String,
    pub message: String,
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

pub fn validate_submission(submission: &ContactSubmission) -> Result<ValidatedContact, ContactError> {
    let (Some(name), Some(email), Some(message)) = (
        required(&submission.name),
        required(&submission.email),
        required(&submission.message),
    ) else {
        return Err(ContactError::missing_fields());
    };

    if !is_valid_email(email) {
        return Err(ContactError::invalid_email());
    }

    Ok(ValidatedContact {
        name: name.to_string(),
        email: email.to_string(),
        message: message.to_string(),
    })
}

/// Validates one submission, stores it once and acknowledges it.
///
/// Duplicate submissions are stored twice. A storage failure is logged with
/// its cause; the returned error renders as a generic message.
pub async fn submit_contact(
    ctx: &ApiContext,
    submission: ContactSubmission,
) -> Result<ContactAck, ContactError> {
    let contact = validate_submission(&submission).inspect_err(|err| {
        warn!(reason = %err, "rejected contact submission");
    })?;

    let record = ContactMessage::new(contact.name, contact.email, contact.message, Utc::now());
    let contact_id = store(ctx, &record).await?;

    info!(contact_id = contact_id.0, "contact message stored");
    Ok(ContactAck::sent())
}

async fn store(ctx: &ApiContext, record: &ContactMessage) -> Result<ContactId, ContactError> {
    ctx.contacts
        .insert_contact_message(record)
        .await
        .map_err(|err| {
            error!(error = %format!("{err:#}"), "failed to store contact message");
            ContactError::Storage(err)
        })
}

fn required(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|value| !value.is_empty())
}
