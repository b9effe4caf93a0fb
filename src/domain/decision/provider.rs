//! Smart decision boundary trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::{ClassificationResult, ComplaintClassification, ScoreResult};
use crate::domain::erp::ErpOrderContext;
use crate::domain::lead::{EnrichedContext, LeadRecord};
use crate::domain::ticket::TicketRecord;
use crate::domain::DomainError;

/// Boundary to the smart (LLM-backed) decision service.
///
/// Implementations must return the full declared schema or an error; partial
/// or malformed output is a failure, absorbed by the hybrid port. Nothing in
/// the core ever calls a provider directly.
#[async_trait]
pub trait DecisionProvider: Send + Sync + Debug {
    /// Score a lead with full reasoning
    async fn score_lead(
        &self,
        lead: &LeadRecord,
        enriched: &EnrichedContext,
    ) -> Result<ScoreResult, DomainError>;

    /// Categorize a support ticket
    async fn classify_ticket(
        &self,
        ticket: &TicketRecord,
        context: &ErpOrderContext,
    ) -> Result<ClassificationResult, DomainError>;

    /// Classify a complaint as product-vs-IT
    async fn classify_complaint(
        &self,
        ticket: &TicketRecord,
    ) -> Result<ComplaintClassification, DomainError>;

    /// Provider name for logging and error tagging
    fn provider_name(&self) -> &'static str;
}
