use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const CONTACT_ROUTE: &str = "/api/contact";

pub const SUCCESS_MESSAGE: &str = "Message sent successfully! Thank you for reaching out.";
pub const REQUIRED_FIELDS_MESSAGE: &str = "All fields are required";
pub const INVALID_EMAIL_MESSAGE: &str = "Invalid email format";
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error. Please try again later.";
pub const METHOD_NOT_ALLOWED_MESSAGE: &str = "Only POST allowed";

/// Raw contact form body. Every field is optional so that a missing field is
/// reported as a validation failure instead of a decode failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactSubmission {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ContactSubmission {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: Some(name.into()),
            email: Some(email.into()),
            message: Some(message.into()),
        }
    }

    /// Picks the string fields out of an arbitrary JSON value. Fields that are
    /// absent or not strings come back as `None`.
    pub fn from_json(value: &Value) -> Self {
        let field = |key: &str| value.get(key).and_then(Value::as_str).map(str::to_owned);
        Self {
            name: field("name"),
            email: field("email"),
            message: field("message"),
        }
    }

    pub fn from_slice(body: &[u8]) -> Self {
        serde_json::from_slice::<Value>(body)
            .map(|value| Self::from_json(&value))
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactAck {
    pub success: bool,
    pub message: String,
}

impl ContactAck {
    pub fn sent() -> Self {
        Self {
            success: true,
            message: SUCCESS_MESSAGE.to_string(),
        }
    }
}
