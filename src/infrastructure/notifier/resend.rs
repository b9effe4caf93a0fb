//! Resend email notifier

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::NotifierConfig;
use crate::domain::notifier::{DeliveryReceipt, EmailMessage, Notifier};
use crate::domain::DomainError;

const DEFAULT_RESEND_BASE_URL: &str = "https://api.resend.com";

#[derive(Debug, Deserialize)]
struct SendResponse {
    id: String,
}

/// Notifier backed by the Resend HTTP API
#[derive(Debug)]
pub struct ResendNotifier {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    from_email: String,
}

impl ResendNotifier {
    /// Build from configuration; the API key comes from `RESEND_API_KEY`.
    pub fn from_config(config: &NotifierConfig) -> Result<Self, DomainError> {
        let api_key = std::env::var("RESEND_API_KEY").map_err(|_| {
            DomainError::configuration("RESEND_API_KEY environment variable is required")
        })?;

        Ok(Self::new(api_key, config.from_email.clone()))
    }

    pub fn new(api_key: impl Into<String>, from_email: impl Into<String>) -> Self {
        Self::with_base_url(api_key, from_email, DEFAULT_RESEND_BASE_URL)
    }

    pub fn with_base_url(
        api_key: impl Into<String>,
        from_email: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            from_email: from_email.into(),
        }
    }
}

#[async_trait]
impl Notifier for ResendNotifier {
    async fn send(&self, message: &EmailMessage) -> Result<DeliveryReceipt, DomainError> {
        let body = serde_json::json!({
            "from": self.from_email,
            "to": [message.to],
            "subject": message.subject,
            "text": message.body,
        });

        let response = self
            .client
            .post(format!("{}/emails", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| DomainError::collaborator("notifier", e.to_string()))?;

        if !response.status().is_success() {
            return Err(DomainError::collaborator(
                "notifier",
                format!("send returned {}", response.status()),
            ));
        }

        let sent: SendResponse = response
            .json()
            .await
            .map_err(|e| DomainError::collaborator("notifier", format!("malformed response: {e}")))?;

        Ok(DeliveryReceipt {
            message_id: sent.id,
        })
    }
}
