//! Ticket triage workflow state

use serde::Serialize;

use super::{TicketDecision, TicketRecord};
use crate::domain::decision::ClassificationResult;
use crate::domain::erp::ErpOrderContext;
use crate::domain::kb::KbSuggestion;
use crate::domain::workflow::WorkflowState;

/// State threaded through the ticket triage pipeline
#[derive(Debug, Clone, Default, Serialize)]
pub struct TicketFlowState {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticket: Option<TicketRecord>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub classification: Option<ClassificationResult>,

    pub order_context: ErpOrderContext,

    pub kb_suggestions: Vec<KbSuggestion>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub decision: Option<TicketDecision>,

    pub use_llm: bool,

    /// Ordered audit trail of executed actions
    pub actions_done: Vec<String>,
}

impl TicketFlowState {
    pub fn new(ticket: Option<TicketRecord>, use_llm: bool) -> Self {
        Self {
            ticket,
            use_llm,
            ..Self::default()
        }
    }
}

/// Partial update produced by a ticket pipeline step
#[derive(Debug, Default)]
pub struct TicketPatch {
    /// Replace; `Some(None)` explicitly clears the ticket
    pub ticket: Option<Option<TicketRecord>>,

    pub classification: Option<ClassificationResult>,
    pub order_context: Option<ErpOrderContext>,

    /// Replace (the retrieval step sets the whole suggestion list at once)
    pub kb_suggestions: Option<Vec<KbSuggestion>>,

    pub decision: Option<TicketDecision>,

    /// Appended to the audit trail
    pub actions_done: Vec<String>,
}

impl TicketPatch {
    pub fn actions(actions: impl IntoIterator<Item = String>) -> Self {
        Self {
            actions_done: actions.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.actions_done.push(action.into());
        self
    }
}

impl WorkflowState for TicketFlowState {
    type Patch = TicketPatch;

    fn apply(&mut self, patch: TicketPatch) {
        if let Some(ticket) = patch.ticket {
            self.ticket = ticket;
        }
        if let Some(classification) = patch.classification {
            self.classification = Some(classification);
        }
        if let Some(order_context) = patch.order_context {
            self.order_context = order_context;
        }
        if let Some(kb_suggestions) = patch.kb_suggestions {
            self.kb_suggestions = kb_suggestions;
        }
        if let Some(decision) = patch.decision {
            self.decision = Some(decision);
        }
        self.actions_done.extend(patch.actions_done);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::decision::{ModelUsed, TicketCategory};

    #[test]
    fn test_classification_replaced_by_last_writer() {
        let mut state = TicketFlowState::new(None, false);

        state.apply(TicketPatch {
            classification: Some(ClassificationResult::new(
                TicketCategory::Howto,
                0.4,
                false,
                "first",
                ModelUsed::RuleBased,
            )),
            ..TicketPatch::default()
        });
        state.apply(TicketPatch {
            classification: Some(ClassificationResult::new(
                TicketCategory::Outage,
                0.9,
                true,
                "second",
                ModelUsed::Llm,
            )),
            ..TicketPatch::default()
        });

        let classification = state.classification.unwrap();
        assert_eq!(classification.category, TicketCategory::Outage);
        assert_eq!(classification.model_used, ModelUsed::Llm);
    }

    #[test]
    fn test_audit_trail_never_reordered() {
        let mut state = TicketFlowState::new(None, false);

        for step in ["fetch", "classify", "context", "decide", "act"] {
            state.apply(TicketPatch::actions([format!("{step}:done")]));
        }

        assert_eq!(
            state.actions_done,
            vec!["fetch:done", "classify:done", "context:done", "decide:done", "act:done"]
        );
    }
}
