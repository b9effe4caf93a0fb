//! REST CRM client
//!
//! Talks to a live CRM instance over its REST API. Authentication state is
//! an explicit per-client context rather than module-level state: the token
//! cache lives inside the client and refresh is guarded by an async mutex,
//! so concurrent first use performs a single authentication.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use tokio::sync::Mutex;
use tracing::debug;

use crate::config::CrmConfig;
use crate::domain::crm::{FieldUpdates, RecordSource};
use crate::domain::lead::LeadRecord;
use crate::domain::ticket::TicketRecord;
use crate::domain::DomainError;

#[derive(Debug, Clone)]
struct CachedToken {
    access_token: String,
    expires_at: DateTime<Utc>,
}

impl CachedToken {
    fn is_valid(&self, now: DateTime<Utc>) -> bool {
        // Refresh a minute early so in-flight requests don't race expiry
        self.expires_at - Duration::seconds(60) > now
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: i64,
}

fn default_expires_in() -> i64 {
    3600
}

/// REST record source with an internally synchronized token context
#[derive(Debug)]
pub struct RestCrm {
    client: reqwest::Client,
    base_url: String,
    token_url: String,
    client_id: String,
    client_secret: String,
    token: Mutex<Option<CachedToken>>,
}

impl RestCrm {
    /// Build the client from configuration; the client secret is taken from
    /// the `CRM_CLIENT_SECRET` environment variable.
    pub fn from_config(config: &CrmConfig) -> Result<Self, DomainError> {
        if config.base_url.is_empty() || config.token_url.is_empty() {
            return Err(DomainError::configuration(
                "CRM rest backend requires crm.base_url and crm.token_url",
            ));
        }

        let client_secret = std::env::var("CRM_CLIENT_SECRET").map_err(|_| {
            DomainError::configuration("CRM_CLIENT_SECRET environment variable is required")
        })?;

        Ok(Self {
            client: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token_url: config.token_url.clone(),
            client_id: config.client_id.clone(),
            client_secret,
            token: Mutex::new(None),
        })
    }

    /// Return a valid access token, refreshing under the lock if needed.
    ///
    /// The lock is held across the refresh call: concurrent callers queue
    /// behind the first and reuse the token it obtained.
    async fn access_token(&self) -> Result<String, DomainError> {
        let mut cached = self.token.lock().await;

        if let Some(token) = cached.as_ref() {
            if token.is_valid(Utc::now()) {
                return Ok(token.access_token.clone());
            }
        }

        debug!("CRM token absent or expiring, authenticating");

        let response = self
            .client
            .post(&self.token_url)
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
            ])
            .send()
            .await
            .map_err(|e| DomainError::collaborator("crm", format!("token request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(DomainError::collaborator(
                "crm",
                format!("token endpoint returned {}", response.status()),
            ));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| DomainError::collaborator("crm", format!("malformed token response: {e}")))?;

        let access_token = token.access_token.clone();
        *cached = Some(CachedToken {
            access_token: token.access_token,
            expires_at: Utc::now() + Duration::seconds(token.expires_in),
        });

        Ok(access_token)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<Option<T>, DomainError> {
        let token = self.access_token().await?;

        let response = self
            .client
            .get(format!("{}{}", self.base_url, path))
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| DomainError::collaborator("crm", e.to_string()))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !response.status().is_success() {
            return Err(DomainError::collaborator(
                "crm",
                format!("GET {} returned {}", path, response.status()),
            ));
        }

        let body = response
            .json()
            .await
            .map_err(|e| DomainError::collaborator("crm", format!("malformed response: {e}")))?;

        Ok(Some(body))
    }

    async fn send_json(
        &self,
        method: reqwest::Method,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<serde_json::Value, DomainError> {
        let token = self.access_token().await?;

        let response = self
            .client
            .request(method, format!("{}{}", self.base_url, path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await
            .map_err(|e| DomainError::collaborator("crm", e.to_string()))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(DomainError::not_found(format!("record at {path} not found")));
        }

        if !response.status().is_success() {
            return Err(DomainError::collaborator(
                "crm",
                format!("{} returned {}", path, response.status()),
            ));
        }

        response
            .json()
            .await
            .map_err(|e| DomainError::collaborator("crm", format!("malformed response: {e}")))
    }
}

#[async_trait]
impl RecordSource for RestCrm {
    async fn fetch_new_leads(&self, limit: usize) -> Result<Vec<LeadRecord>, DomainError> {
        Ok(self
            .get_json(&format!("/leads?status=new&limit={limit}"))
            .await?
            .unwrap_or_default())
    }

    async fn fetch_lead(&self, id: &str) -> Result<Option<LeadRecord>, DomainError> {
        self.get_json(&format!("/leads/{id}")).await
    }

    async fn fetch_new_cases(&self, limit: usize) -> Result<Vec<TicketRecord>, DomainError> {
        Ok(self
            .get_json(&format!("/cases?status=open&limit={limit}"))
            .await?
            .unwrap_or_default())
    }

    async fn fetch_case(&self, id: &str) -> Result<Option<TicketRecord>, DomainError> {
        self.get_json(&format!("/cases/{id}")).await
    }

    async fn update_fields(&self, id: &str, fields: FieldUpdates) -> Result<(), DomainError> {
        let body = serde_json::Value::Object(fields.into_iter().collect());
        self.send_json(reqwest::Method::PATCH, &format!("/records/{id}"), &body)
            .await?;
        Ok(())
    }

    async fn assign_owner(&self, id: &str, owner_id: &str) -> Result<(), DomainError> {
        let mut fields = HashMap::new();
        fields.insert("owner_id".to_string(), serde_json::json!(owner_id));
        self.update_fields(id, fields).await
    }

    async fn create_task(
        &self,
        id: &str,
        subject: &str,
        body: &str,
    ) -> Result<String, DomainError> {
        let payload = serde_json::json!({
            "record_id": id,
            "subject": subject,
            "body": body,
        });

        let created = self
            .send_json(reqwest::Method::POST, "/tasks", &payload)
            .await?;

        created
            .get("id")
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .ok_or_else(|| DomainError::collaborator("crm", "task response missing id"))
    }

    async fn post_comment(&self, id: &str, text: &str) -> Result<(), DomainError> {
        let payload = serde_json::json!({ "text": text });
        self.send_json(
            reqwest::Method::POST,
            &format!("/records/{id}/comments"),
            &payload,
        )
        .await?;
        Ok(())
    }
}
