use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::protocol::{
    INTERNAL_ERROR_MESSAGE, INVALID_EMAIL_MESSAGE, METHOD_NOT_ALLOWED_MESSAGE,
    REQUIRED_FIELDS_MESSAGE,
};

#[derive(Debug, Error)]
pub enum ContactError {
    #[error("{0}")]
    Validation(String),
    #[error("failed to store contact message: {0:#}")]
    Storage(#[source] anyhow::Error),
}

impl ContactError {
    pub fn missing_fields() -> Self {
        Self::Validation(REQUIRED_FIELDS_MESSAGE.to_string())
    }

    pub fn invalid_email() -> Self {
        Self::Validation(INVALID_EMAIL_MESSAGE.to_string())
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// HTTP status the error surfaces as.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::Storage(_) => 500,
        }
    }

    /// Client-facing body. Storage causes are never included.
    pub fn to_body(&self) -> ErrorBody {
        match self {
            Self::Validation(message) => ErrorBody::new(message.clone()),
            Self::Storage(_) => ErrorBody::failure(INTERNAL_ERROR_MESSAGE),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    pub message: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: None,
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: Some(false),
            message: message.into(),
        }
    }

    pub fn method_not_allowed() -> Self {
        Self::new(METHOD_NOT_ALLOWED_MESSAGE)
    }
}
