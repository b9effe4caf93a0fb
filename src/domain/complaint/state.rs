//! Complaint classification workflow state

use serde::Serialize;

use super::ComplaintDecision;
use crate::domain::decision::ComplaintClassification;
use crate::domain::ticket::TicketRecord;
use crate::domain::workflow::WorkflowState;

/// State threaded through the complaint classification pipeline
#[derive(Debug, Clone, Default, Serialize)]
pub struct ComplaintFlowState {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticket: Option<TicketRecord>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub classification: Option<ComplaintClassification>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub decision: Option<ComplaintDecision>,

    pub use_llm: bool,

    /// Ordered audit trail of executed actions
    pub actions_done: Vec<String>,
}

impl ComplaintFlowState {
    pub fn new(ticket: Option<TicketRecord>, use_llm: bool) -> Self {
        Self {
            ticket,
            use_llm,
            ..Self::default()
        }
    }
}

/// Partial update produced by a complaint pipeline step
#[derive(Debug, Default)]
pub struct ComplaintPatch {
    /// Replace; `Some(None)` explicitly clears the ticket
    pub ticket: Option<Option<TicketRecord>>,

    pub classification: Option<ComplaintClassification>,
    pub decision: Option<ComplaintDecision>,

    /// Appended to the audit trail
    pub actions_done: Vec<String>,
}

impl ComplaintPatch {
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

impl WorkflowState for ComplaintFlowState {
    type Patch = ComplaintPatch;

    fn apply(&mut self, patch: ComplaintPatch) {
        if let Some(ticket) = patch.ticket {
            self.ticket = ticket;
        }
        if let Some(classification) = patch.classification {
            self.classification = Some(classification);
        }
        if let Some(decision) = patch.decision {
            self.decision = Some(decision);
        }
        self.actions_done.extend(patch.actions_done);
    }
}
