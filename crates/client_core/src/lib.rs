//! HTTP client for the portfolio contact endpoint.

use reqwest::Client;
use shared::{
    error::ErrorBody,
    protocol::{ContactAck, ContactSubmission, CONTACT_ROUTE},
};
use thiserror::Error;
use tracing::debug;
use url::Url;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid server url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server rejected submission ({status}): {message}")]
    Rejected { status: u16, message: String },
}

impl ClientError {
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Rejected { status, .. } if (400..500).contains(status))
    }
}

#[derive(Clone)]
pub struct ContactClient {
    http: Client,
    endpoint: Url,
}

impl ContactClient {
    pub fn new(server_url: &str) -> Result<Self, ClientError> {
        Self::with_client(server_url, Client::new())
    }

    pub fn with_client(server_url: &str, http: Client) -> Result<Self, ClientError> {
        let endpoint = Url::parse(server_url)?.join(CONTACT_ROUTE)?;
        Ok(Self { http, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub async fn send(
        &self,
        name: &str,
        email: &str,
        message: &str,
    ) -> Result<ContactAck, ClientError> {
        self.submit(&ContactSubmission::new(name, email, message))
            .await
    }

    /// Posts one submission. Non-2xx responses come back as
    /// [`ClientError::Rejected`] carrying the server's message.
    pub async fn submit(&self, submission: &ContactSubmission) -> Result<ContactAck, ClientError> {
        let response = self
            .http
            .post(self.endpoint.clone())
            .json(submission)
            .send()
            .await?;

        let status = response.status();
        debug!(%status, endpoint = %self.endpoint, "contact submission answered");
        if status.is_success() {
            return Ok(response.json::<ContactAck>().await?);
        }

        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.message,
            Err(_) => status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string(),
        };
        Err(ClientError::Rejected {
            status: status.as_u16(),
            message,
        })
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
