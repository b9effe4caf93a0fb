//! Hybrid decision port
//!
//! The single point where smart-call failures are absorbed. Every method
//! here is infallible: the smart path is attempted when enabled, and any
//! error or schema problem falls back to the deterministic engine with the
//! provenance tagged accordingly.

use std::sync::Arc;

use tracing::warn;

use super::{
    ClassificationResult, ComplaintClassification, DecisionProvider, ModelUsed, ScoreResult,
};
use crate::domain::complaint::ComplaintClassifier;
use crate::domain::erp::ErpOrderContext;
use crate::domain::lead::{EnrichedContext, LeadRecord, LeadScorer};
use crate::domain::ticket::{TicketClassifier, TicketRecord};

/// Wraps the smart decision boundary with deterministic fallbacks.
///
/// Construction without a provider yields a port that always runs the
/// deterministic engine directly (`model_used = rule-based`).
#[derive(Debug, Clone)]
pub struct HybridDecisionPort {
    provider: Option<Arc<dyn DecisionProvider>>,
    scorer: LeadScorer,
    ticket_classifier: TicketClassifier,
    complaint_classifier: ComplaintClassifier,
}

impl HybridDecisionPort {
    /// Port with a smart provider attached
    pub fn new(provider: Arc<dyn DecisionProvider>) -> Self {
        Self {
            provider: Some(provider),
            scorer: LeadScorer::new(),
            ticket_classifier: TicketClassifier::new(),
            complaint_classifier: ComplaintClassifier::new(),
        }
    }

    /// Port that only ever runs the deterministic engine
    pub fn deterministic() -> Self {
        Self {
            provider: None,
            scorer: LeadScorer::new(),
            ticket_classifier: TicketClassifier::new(),
            complaint_classifier: ComplaintClassifier::new(),
        }
    }

    fn smart(&self, use_llm: bool) -> Option<&Arc<dyn DecisionProvider>> {
        if use_llm { self.provider.as_ref() } else { None }
    }

    /// Score a lead. Never fails.
    pub async fn score_lead(
        &self,
        lead: &LeadRecord,
        enriched: &EnrichedContext,
        use_llm: bool,
    ) -> ScoreResult {
        if let Some(provider) = self.smart(use_llm) {
            match provider.score_lead(lead, enriched).await {
                Ok(result) => return result.tagged(ModelUsed::Llm),
                Err(error) => {
                    warn!(
                        provider = provider.provider_name(),
                        %error,
                        "smart lead scoring failed, falling back to rules"
                    );
                    return self.scorer.score(lead, enriched).tagged(ModelUsed::Fallback);
                }
            }
        }

        self.scorer.score(lead, enriched)
    }

    /// Categorize a ticket. Never fails.
    ///
    /// Tickets without content short-circuit to the explicit unclassifiable
    /// result before any smart call is made.
    pub async fn classify_ticket(
        &self,
        ticket: &TicketRecord,
        context: &ErpOrderContext,
        use_llm: bool,
    ) -> ClassificationResult {
        if !ticket.has_content() {
            return ClassificationResult::no_content();
        }

        if let Some(provider) = self.smart(use_llm) {
            match provider.classify_ticket(ticket, context).await {
                Ok(result) => return result.tagged(ModelUsed::Llm),
                Err(error) => {
                    warn!(
                        provider = provider.provider_name(),
                        %error,
                        "smart ticket classification failed, falling back to rules"
                    );
                    return self
                        .ticket_classifier
                        .classify(ticket)
                        .tagged(ModelUsed::Fallback);
                }
            }
        }

        self.ticket_classifier.classify(ticket)
    }

    /// Classify a complaint. Never fails.
    pub async fn classify_complaint(
        &self,
        ticket: &TicketRecord,
        use_llm: bool,
    ) -> ComplaintClassification {
        if !ticket.has_content() {
            return ComplaintClassification::no_content();
        }

        if let Some(provider) = self.smart(use_llm) {
            match provider.classify_complaint(ticket).await {
                Ok(result) => return result.tagged(ModelUsed::Llm),
                Err(error) => {
                    warn!(
                        provider = provider.provider_name(),
                        %error,
                        "smart complaint classification failed, falling back to rules"
                    );
                    return self
                        .complaint_classifier
                        .classify(ticket)
                        .tagged(ModelUsed::Fallback);
                }
            }
        }

        self.complaint_classifier.classify(ticket)
    }
}
