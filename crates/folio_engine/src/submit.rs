use std::time::Duration;

use folio_logging::folio_info;
use serde::Serialize;
use thiserror::Error;
use url::Url;

/// Body posted to the form endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    /// Lets form relays set the reply address.
    #[serde(rename = "_replyto")]
    pub reply_to: String,
}

impl ContactMessage {
    pub fn new(name: String, email: String, subject: String, message: String) -> Self {
        let reply_to = email.clone();
        Self {
            name,
            email,
            subject,
            message,
            reply_to,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("no form endpoint configured")]
    NotConfigured,
    #[error("form endpoint answered with status {0}")]
    HttpStatus(u16),
    #[error("form endpoint timed out")]
    Timeout,
    #[error("network error: {0}")]
    Network(String),
    #[error("cancelled")]
    Cancelled,
}

#[async_trait::async_trait]
pub trait ContactSubmitter: Send + Sync {
    async fn submit(&self, message: &ContactMessage) -> Result<(), SubmitError>;
}

/// Posts the message as JSON; any 2xx status counts as delivered.
#[derive(Debug, Clone)]
pub struct ReqwestSubmitter {
    endpoint: Option<Url>,
    timeout: Duration,
}

impl ReqwestSubmitter {
    pub fn new(endpoint: Option<Url>, timeout: Duration) -> Self {
        Self { endpoint, timeout }
    }
}

#[async_trait::async_trait]
impl ContactSubmitter for ReqwestSubmitter {
    async fn submit(&self, message: &ContactMessage) -> Result<(), SubmitError> {
        let endpoint = self.endpoint.as_ref().ok_or(SubmitError::NotConfigured)?;
        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|err| SubmitError::Network(err.to_string()))?;

        let response = client
            .post(endpoint.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .json(message)
            .send()
            .await
            .map_err(|err| {
                if err.is_timeout() {
                    SubmitError::Timeout
                } else {
                    SubmitError::Network(err.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SubmitError::HttpStatus(status.as_u16()));
        }
        folio_info!("contact message accepted by {} ({})", endpoint, status);
        Ok(())
    }
}
