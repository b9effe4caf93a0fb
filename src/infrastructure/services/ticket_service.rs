//! Ticket triage pipeline
//!
//! Fetch → RetrieveContext → Classify → Decide → Act, over the shared
//! executor.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::domain::crm::{FieldUpdates, RecordSource};
use crate::domain::decision::{ClassificationResult, HybridDecisionPort};
use crate::domain::erp::{EnrichmentSource, ErpOrderContext};
use crate::domain::kb::search_articles;
use crate::domain::ticket::{
    route_ticket, PriorityChange, TicketAction, TicketFlowState, TicketPatch, TicketRecord,
};
use crate::domain::workflow::{PipelineError, PipelineExecutor, PipelineStep};
use crate::domain::DomainError;

/// Runs the ticket triage pipeline end to end
pub struct TicketTriageService {
    executor: PipelineExecutor<TicketFlowState>,
}

impl std::fmt::Debug for TicketTriageService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TicketTriageService").finish()
    }
}

impl TicketTriageService {
    pub fn new(
        crm: Arc<dyn RecordSource>,
        erp: Arc<dyn EnrichmentSource>,
        decisions: HybridDecisionPort,
        config: Arc<AppConfig>,
    ) -> Self {
        let executor = PipelineExecutor::new()
            .with_step(FetchTicketStep { crm: crm.clone() })
            .with_step(RetrieveContextStep { erp })
            .with_step(ClassifyTicketStep { decisions })
            .with_step(DecideActionStep)
            .with_step(ExecuteTicketActionsStep { crm, config });

        Self { executor }
    }

    /// Run the pipeline; when no case is given the record source supplies
    /// the next open one.
    pub async fn run(
        &self,
        ticket: Option<TicketRecord>,
        use_llm: bool,
    ) -> Result<TicketFlowState, PipelineError<TicketFlowState>> {
        info!(use_llm, "starting ticket triage pipeline");

        let state = self
            .executor
            .run(TicketFlowState::new(ticket, use_llm))
            .await?;

        info!(
            category = state.classification.as_ref().map(|c| c.category.as_str()),
            action = state.decision.as_ref().map(|d| d.action.as_str()),
            actions = state.actions_done.len(),
            "ticket triage pipeline complete"
        );

        Ok(state)
    }
}

struct FetchTicketStep {
    crm: Arc<dyn RecordSource>,
}

#[async_trait]
impl PipelineStep<TicketFlowState> for FetchTicketStep {
    fn name(&self) -> &'static str {
        "fetch_ticket"
    }

    async fn run(&self, state: &TicketFlowState) -> Result<TicketPatch, DomainError> {
        if let Some(ref ticket) = state.ticket {
            return Ok(TicketPatch::actions([format!(
                "fetch_ticket:existing:{}",
                ticket.id
            )]));
        }

        let mut cases = self.crm.fetch_new_cases(1).await?;

        match cases.pop() {
            Some(ticket) => {
                let action = format!("fetch_ticket:fetched:{}", ticket.id);
                Ok(TicketPatch {
                    ticket: Some(Some(ticket)),
                    ..TicketPatch::default()
                }
                .with_action(action))
            }
            None => {
                warn!("no open cases to triage");
                Ok(TicketPatch::actions(["fetch_ticket:none_found".to_string()]))
            }
        }
    }
}

struct RetrieveContextStep {
    erp: Arc<dyn EnrichmentSource>,
}

#[async_trait]
impl PipelineStep<TicketFlowState> for RetrieveContextStep {
    fn name(&self) -> &'static str {
        "retrieve_context"
    }

    async fn run(&self, state: &TicketFlowState) -> Result<TicketPatch, DomainError> {
        let Some(ref ticket) = state.ticket else {
            return Ok(TicketPatch::actions(["retrieve_context:no_ticket".to_string()]));
        };

        // Case subjects rarely carry the account name; the simulator keys
        // partners off it when they do, and an unmatched lookup is fine.
        let partner = self.erp.lookup_partner(&ticket.subject).await?;

        let context = match partner {
            Some(partner) => {
                let orders = self.erp.list_orders(&partner.id, 10).await?;
                ErpOrderContext::from_orders(partner.id, &orders)
            }
            None => ErpOrderContext::empty(),
        };

        let action = match context.partner_id {
            Some(ref id) => format!("retrieve_context:bp={id}"),
            None => "retrieve_context:no_partner".to_string(),
        };

        Ok(TicketPatch {
            order_context: Some(context),
            ..TicketPatch::default()
        }
        .with_action(action))
    }
}

struct ClassifyTicketStep {
    decisions: HybridDecisionPort,
}

#[async_trait]
impl PipelineStep<TicketFlowState> for ClassifyTicketStep {
    fn name(&self) -> &'static str {
        "classify_ticket"
    }

    async fn run(&self, state: &TicketFlowState) -> Result<TicketPatch, DomainError> {
        let Some(ref ticket) = state.ticket else {
            return Ok(TicketPatch {
                classification: Some(ClassificationResult::no_content()),
                ..TicketPatch::default()
            }
            .with_action("classify_ticket:no_ticket"));
        };

        let classification = self
            .decisions
            .classify_ticket(ticket, &state.order_context, state.use_llm)
            .await;

        let action = format!(
            "classify_ticket:{}:{}:{:.2}",
            classification.model_used, classification.category, classification.confidence
        );

        Ok(TicketPatch {
            classification: Some(classification),
            ..TicketPatch::default()
        }
        .with_action(action))
    }
}

struct DecideActionStep;

#[async_trait]
impl PipelineStep<TicketFlowState> for DecideActionStep {
    fn name(&self) -> &'static str {
        "decide_action"
    }

    async fn run(&self, state: &TicketFlowState) -> Result<TicketPatch, DomainError> {
        let Some(ref classification) = state.classification else {
            return Ok(TicketPatch::actions(["decide_action:no_classification".to_string()]));
        };

        let query = state
            .ticket
            .as_ref()
            .map(|t| t.content())
            .unwrap_or_default();
        let suggestions = search_articles(&query, Some(classification.category), 3);

        let mut decision = route_ticket(classification.category, &suggestions);

        // The classifier can demand escalation beyond what the category
        // policy would do (e.g. an LLM flag on a billing ticket)
        if classification.requires_escalation && decision.action != TicketAction::Escalate {
            decision.action = TicketAction::Escalate;
            decision.escalation_reason = Some(format!(
                "Flagged for escalation: {}",
                classification.reasoning
            ));
            if decision.priority_change.is_none() {
                decision.priority_change = Some(PriorityChange::High);
            }
        }

        let action = format!("decide_action:{}", decision.action);

        Ok(TicketPatch {
            kb_suggestions: Some(suggestions),
            decision: Some(decision),
            ..TicketPatch::default()
        }
        .with_action(action))
    }
}

struct ExecuteTicketActionsStep {
    crm: Arc<dyn RecordSource>,
    config: Arc<AppConfig>,
}

#[async_trait]
impl PipelineStep<TicketFlowState> for ExecuteTicketActionsStep {
    fn name(&self) -> &'static str {
        "execute_ticket_actions"
    }

    async fn run(&self, state: &TicketFlowState) -> Result<TicketPatch, DomainError> {
        let Some(ref ticket) = state.ticket else {
            return Ok(TicketPatch::actions(["execute_actions:no_ticket".to_string()]));
        };
        let Some(ref decision) = state.decision else {
            return Ok(TicketPatch::actions(["execute_actions:no_decision".to_string()]));
        };

        let mut actions = Vec::new();

        if let Some(ref template) = decision.response_template {
            self.crm.post_comment(&ticket.id, template).await?;
            actions.push(format!("crm:post_comment:{}", decision.action));
        }

        match decision.action {
            TicketAction::Escalate => {
                let owner = &self.config.routing.escalation_owner_id;
                self.crm.assign_owner(&ticket.id, owner).await?;
                actions.push(format!("crm:escalate:{owner}"));

                let mut fields = FieldUpdates::new();
                fields.insert("status".to_string(), serde_json::json!("Escalated"));
                if let Some(priority) = decision.priority_change {
                    fields.insert("priority".to_string(), serde_json::json!(priority.as_str()));
                }
                self.crm.update_fields(&ticket.id, fields).await?;

                if let Some(priority) = decision.priority_change {
                    actions.push(format!("crm:update_priority:{priority}"));
                }
            }
            TicketAction::AutoReply | TicketAction::RequestInfo => {
                let mut fields = FieldUpdates::new();
                fields.insert(
                    "status".to_string(),
                    serde_json::json!("Waiting on Customer"),
                );
                self.crm.update_fields(&ticket.id, fields).await?;
                actions.push("crm:update_status:Waiting on Customer".to_string());
            }
        }

        Ok(TicketPatch::actions(actions))
    }
}
