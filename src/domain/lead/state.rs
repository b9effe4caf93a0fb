//! Lead qualification workflow state

use serde::Serialize;

use super::{EnrichedContext, LeadRecord, RouteDecision};
use crate::domain::decision::ScoreResult;
use crate::domain::workflow::WorkflowState;

/// State threaded through the lead qualification pipeline.
///
/// `lead`, `enriched`, `score` and `route` are Replace fields;
/// `actions_done` is the Append-only audit trail.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LeadFlowState {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lead: Option<LeadRecord>,

    pub enriched: EnrichedContext,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<ScoreResult>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub route: Option<RouteDecision>,

    /// Whether the smart scoring path is enabled for this run
    pub use_llm: bool,

    /// Ordered audit trail of executed actions
    pub actions_done: Vec<String>,
}

impl LeadFlowState {
    /// Fresh state for one pipeline invocation
    pub fn new(lead: Option<LeadRecord>, use_llm: bool) -> Self {
        Self {
            lead,
            use_llm,
            ..Self::default()
        }
    }
}

/// Partial update produced by a lead pipeline step
#[derive(Debug, Default)]
pub struct LeadPatch {
    /// Replace; `Some(None)` explicitly clears the lead
    pub lead: Option<Option<LeadRecord>>,

    pub enriched: Option<EnrichedContext>,
    pub score: Option<ScoreResult>,
    pub route: Option<RouteDecision>,

    /// Appended to the audit trail
    pub actions_done: Vec<String>,
}

impl LeadPatch {
    /// Patch contributing only audit-trail entries
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

impl WorkflowState for LeadFlowState {
    type Patch = LeadPatch;

    fn apply(&mut self, patch: LeadPatch) {
        if let Some(lead) = patch.lead {
            self.lead = lead;
        }
        if let Some(enriched) = patch.enriched {
            self.enriched = enriched;
        }
        if let Some(score) = patch.score {
            self.score = Some(score);
        }
        if let Some(route) = patch.route {
            self.route = Some(route);
        }
        self.actions_done.extend(patch.actions_done);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::decision::ModelUsed;

    #[test]
    fn test_replace_fields_take_last_writer() {
        let mut state = LeadFlowState::new(None, false);

        state.apply(LeadPatch {
            score: Some(ScoreResult::new(0.2, 1.0, "first", ModelUsed::RuleBased)),
            ..LeadPatch::default()
        });
        state.apply(LeadPatch {
            score: Some(ScoreResult::new(0.8, 1.0, "second", ModelUsed::RuleBased)),
            ..LeadPatch::default()
        });

        assert_eq!(state.score.unwrap().score, 0.8);
    }

    #[test]
    fn test_append_field_accumulates_in_step_order() {
        let mut state = LeadFlowState::new(None, false);

        state.apply(LeadPatch::actions(["fetch:1".to_string()]));
        state.apply(LeadPatch::actions([
            "enrich:1".to_string(),
            "enrich:2".to_string(),
        ]));
        state.apply(LeadPatch::actions([]));
        state.apply(LeadPatch::actions(["act:1".to_string()]));

        assert_eq!(state.actions_done, vec!["fetch:1", "enrich:1", "enrich:2", "act:1"]);
    }

    #[test]
    fn test_absent_fields_are_untouched() {
        let lead = LeadRecord::new("L-1", "Kim", "Globex");
        let mut state = LeadFlowState::new(Some(lead.clone()), true);

        state.apply(LeadPatch::actions(["noop".to_string()]));

        assert_eq!(state.lead, Some(lead));
        assert!(state.use_llm);
    }

    #[test]
    fn test_explicit_clear() {
        let mut state = LeadFlowState::new(Some(LeadRecord::new("L-1", "Kim", "Globex")), false);

        state.apply(LeadPatch {
            lead: Some(None),
            ..LeadPatch::default()
        });

        assert!(state.lead.is_none());
    }
}
