//! Record source boundary trait

use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt::Debug;

use crate::domain::lead::LeadRecord;
use crate::domain::ticket::TicketRecord;
use crate::domain::DomainError;

/// Field name → new value map for record updates
pub type FieldUpdates = HashMap<String, serde_json::Value>;

/// Boundary to the CRM system holding leads and support cases.
///
/// Lookups by id resolve to `Ok(None)` when the record does not exist;
/// mutation of a missing record surfaces `DomainError::NotFound`. Transport
/// and authentication failures surface as `DomainError::Collaborator` and
/// propagate out of the pipeline untouched.
#[async_trait]
pub trait RecordSource: Send + Sync + Debug {
    /// Fetch up to `limit` leads not yet routed
    async fn fetch_new_leads(&self, limit: usize) -> Result<Vec<LeadRecord>, DomainError>;

    /// Fetch a lead by id
    async fn fetch_lead(&self, id: &str) -> Result<Option<LeadRecord>, DomainError>;

    /// Fetch up to `limit` open cases not yet triaged
    async fn fetch_new_cases(&self, limit: usize) -> Result<Vec<TicketRecord>, DomainError>;

    /// Fetch a case by id
    async fn fetch_case(&self, id: &str) -> Result<Option<TicketRecord>, DomainError>;

    /// Update arbitrary fields on a record
    async fn update_fields(&self, id: &str, fields: FieldUpdates) -> Result<(), DomainError>;

    /// Reassign a record to a new owner
    async fn assign_owner(&self, id: &str, owner_id: &str) -> Result<(), DomainError>;

    /// Create a follow-up task attached to a record; returns the task id
    async fn create_task(
        &self,
        id: &str,
        subject: &str,
        body: &str,
    ) -> Result<String, DomainError>;

    /// Post a comment on a record
    async fn post_comment(&self, id: &str, text: &str) -> Result<(), DomainError>;
}
