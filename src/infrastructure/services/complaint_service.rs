//! Complaint classification pipeline
//!
//! Fetch → Classify → Decide → Act, over the shared executor.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::domain::complaint::{
    route_complaint, ComplaintAction, ComplaintFlowState, ComplaintPatch,
};
use crate::domain::crm::RecordSource;
use crate::domain::decision::HybridDecisionPort;
use crate::domain::notifier::{EmailMessage, Notifier};
use crate::domain::ticket::TicketRecord;
use crate::domain::workflow::{PipelineError, PipelineExecutor, PipelineStep};
use crate::domain::DomainError;

/// Runs the complaint classification pipeline end to end
pub struct ComplaintService {
    executor: PipelineExecutor<ComplaintFlowState>,
}

impl std::fmt::Debug for ComplaintService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComplaintService").finish()
    }
}

impl ComplaintService {
    pub fn new(
        crm: Arc<dyn RecordSource>,
        notifier: Arc<dyn Notifier>,
        decisions: HybridDecisionPort,
        config: Arc<AppConfig>,
    ) -> Self {
        let executor = PipelineExecutor::new()
            .with_step(FetchComplaintStep { crm: crm.clone() })
            .with_step(ClassifyComplaintStep { decisions })
            .with_step(DecideComplaintStep {
                config: config.clone(),
            })
            .with_step(ExecuteComplaintActionsStep { crm, notifier });

        Self { executor }
    }

    pub async fn run(
        &self,
        ticket: Option<TicketRecord>,
        use_llm: bool,
    ) -> Result<ComplaintFlowState, PipelineError<ComplaintFlowState>> {
        info!(use_llm, "starting complaint classification pipeline");

        let state = self
            .executor
            .run(ComplaintFlowState::new(ticket, use_llm))
            .await?;

        info!(
            action = state.decision.as_ref().map(|d| d.action.as_str()),
            actions = state.actions_done.len(),
            "complaint classification pipeline complete"
        );

        Ok(state)
    }
}

struct FetchComplaintStep {
    crm: Arc<dyn RecordSource>,
}

#[async_trait]
impl PipelineStep<ComplaintFlowState> for FetchComplaintStep {
    fn name(&self) -> &'static str {
        "fetch_complaint"
    }

    async fn run(&self, state: &ComplaintFlowState) -> Result<ComplaintPatch, DomainError> {
        if let Some(ref ticket) = state.ticket {
            return Ok(ComplaintPatch::actions([format!(
                "fetch_complaint:existing:{}",
                ticket.id
            )]));
        }

        let mut cases = self.crm.fetch_new_cases(1).await?;

        match cases.pop() {
            Some(ticket) => {
                let action = format!("fetch_complaint:fetched:{}", ticket.id);
                Ok(ComplaintPatch {
                    ticket: Some(Some(ticket)),
                    ..ComplaintPatch::default()
                }
                .with_action(action))
            }
            None => {
                warn!("no open cases to classify");
                Ok(ComplaintPatch::actions(["fetch_complaint:none_found".to_string()]))
            }
        }
    }
}

struct ClassifyComplaintStep {
    decisions: HybridDecisionPort,
}

#[async_trait]
impl PipelineStep<ComplaintFlowState> for ClassifyComplaintStep {
    fn name(&self) -> &'static str {
        "classify_complaint"
    }

    async fn run(&self, state: &ComplaintFlowState) -> Result<ComplaintPatch, DomainError> {
        let Some(ref ticket) = state.ticket else {
            return Ok(ComplaintPatch::actions(["classify_complaint:no_ticket".to_string()]));
        };

        let classification = self
            .decisions
            .classify_complaint(ticket, state.use_llm)
            .await;

        let action = format!(
            "classify_complaint:{}:{}",
            classification.model_used, classification.product_category
        );

        Ok(ComplaintPatch {
            classification: Some(classification),
            ..ComplaintPatch::default()
        }
        .with_action(action))
    }
}

struct DecideComplaintStep {
    config: Arc<AppConfig>,
}

#[async_trait]
impl PipelineStep<ComplaintFlowState> for DecideComplaintStep {
    fn name(&self) -> &'static str {
        "decide_complaint"
    }

    async fn run(&self, state: &ComplaintFlowState) -> Result<ComplaintPatch, DomainError> {
        let Some(ref classification) = state.classification else {
            return Ok(ComplaintPatch::actions(["decide_complaint:no_classification".to_string()]));
        };

        let decision = route_complaint(classification, &self.config.notifier.recipients);
        let action = format!("decide_complaint:{}", decision.action);

        Ok(ComplaintPatch {
            decision: Some(decision),
            ..ComplaintPatch::default()
        }
        .with_action(action))
    }
}

struct ExecuteComplaintActionsStep {
    crm: Arc<dyn RecordSource>,
    notifier: Arc<dyn Notifier>,
}

impl ExecuteComplaintActionsStep {
    fn analysis_body(state: &ComplaintFlowState, ticket: &TicketRecord) -> String {
        let classification = state.classification.as_ref();
        let decision = state.decision.as_ref();

        let mut body = format!(
            "Complaint analysis for case {}\n\nSubject: {}\n\n{}\n",
            ticket.id,
            ticket.subject,
            classification
                .map(|c| {
                    format!(
                        "Product complaint: {}\nIT support: {}\nProduct category: {}\nConfidence: {:.2}\nReasoning: {}",
                        c.is_product_complaint,
                        c.is_it_support,
                        c.product_category,
                        c.confidence,
                        c.reasoning
                    )
                })
                .unwrap_or_default()
        );

        if let Some(url) = decision.and_then(|d| d.redirect_url.as_deref()) {
            if !url.is_empty() {
                body.push_str(&format!("\nSelf-service portal: {url}\n"));
            }
        }

        body
    }
}

#[async_trait]
impl PipelineStep<ComplaintFlowState> for ExecuteComplaintActionsStep {
    fn name(&self) -> &'static str {
        "execute_complaint_actions"
    }

    async fn run(&self, state: &ComplaintFlowState) -> Result<ComplaintPatch, DomainError> {
        let Some(ref ticket) = state.ticket else {
            return Ok(ComplaintPatch::actions(["execute_actions:no_ticket".to_string()]));
        };
        let Some(ref decision) = state.decision else {
            return Ok(ComplaintPatch::actions(["execute_actions:no_decision".to_string()]));
        };

        let mut actions = Vec::new();

        let recipient_tag = match decision.action {
            ComplaintAction::EmailProductExpert => "product_expert",
            ComplaintAction::EmailServicesAgent => "services_agent",
        };

        // Notify the responsible advisor; a notifier failure is recorded in
        // the audit trail, the run itself continues
        if decision.recipient_email.is_empty() {
            warn!("complaint notification skipped, no recipient configured");
            actions.push(format!("email:{recipient_tag}:failed"));
        } else {
            let subject = match decision.action {
                ComplaintAction::EmailProductExpert => {
                    format!("[Product Complaint] {}", ticket.subject)
                }
                ComplaintAction::EmailServicesAgent => {
                    format!("[IT Support] {}", ticket.subject)
                }
            };

            let message = EmailMessage::new(
                decision.recipient_email.clone(),
                subject,
                Self::analysis_body(state, ticket),
            );

            match self.notifier.send(&message).await {
                Ok(_) => actions.push(format!("email:{recipient_tag}:{}", decision.recipient_email)),
                Err(error) => {
                    warn!(%error, "complaint notification failed");
                    actions.push(format!("email:{recipient_tag}:failed"));
                }
            }
        }

        // Leave the analysis on the case for the next human reader
        self.crm
            .post_comment(&ticket.id, &format!("{}\n\n{}", decision.reason, Self::analysis_body(state, ticket)))
            .await?;
        actions.push("crm:post_comment:analysis".to_string());

        Ok(ComplaintPatch::actions(actions))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::crm::MockRecordSource;
    use crate::domain::decision::{MockDecisionProvider, ModelUsed, ProductCategory};
    use crate::domain::notifier::mock::MockNotifier;

    fn test_config() -> Arc<AppConfig> {
        let mut config = AppConfig::default();
        config.notifier.recipients.product_expert_email = "products@example.com".to_string();
        config.notifier.recipients.services_agent_email = "services@example.com".to_string();
        config.notifier.recipients.notification_email = "ops@example.com".to_string();
        config.notifier.recipients.it_portal_url = "https://it.example.com/portal".to_string();
        Arc::new(config)
    }

    fn service_with(
        crm: Arc<MockRecordSource>,
        notifier: Arc<MockNotifier>,
        decisions: HybridDecisionPort,
    ) -> ComplaintService {
        ComplaintService::new(crm, notifier, decisions, test_config())
    }

    #[tokio::test]
    async fn test_product_complaint_emails_product_expert() {
        let ticket = TicketRecord::new(
            "500-1",
            "Broken switch",
            "The industrial switch stopped forwarding traffic after two days",
        );
        let crm = Arc::new(MockRecordSource::new());
        let notifier = Arc::new(MockNotifier::new());
        let service = service_with(crm.clone(), notifier.clone(), HybridDecisionPort::deterministic());

        let state = service.run(Some(ticket), false).await.unwrap();

        let classification = state.classification.clone().unwrap();
        assert!(classification.is_product_complaint);
        assert_eq!(classification.product_category, ProductCategory::Switches);

        let decision = state.decision.clone().unwrap();
        assert_eq!(decision.action, ComplaintAction::EmailProductExpert);

        let sent = notifier.sent_messages();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "products@example.com");
        assert!(sent[0].subject.starts_with("[Product Complaint]"));

        assert!(crm
            .recorded_mutations()
            .iter()
            .any(|m| m.starts_with("post_comment:500-1")));
    }

    #[tokio::test]
    async fn test_it_support_emails_services_agent_with_redirect() {
        let ticket = TicketRecord::new("500-2", "Locked out", "I forgot my portal password");
        let notifier = Arc::new(MockNotifier::new());
        let service = service_with(
            Arc::new(MockRecordSource::new()),
            notifier.clone(),
            HybridDecisionPort::deterministic(),
        );

        let state = service.run(Some(ticket), false).await.unwrap();

        let decision = state.decision.unwrap();
        assert_eq!(decision.action, ComplaintAction::EmailServicesAgent);
        assert_eq!(
            decision.redirect_url.as_deref(),
            Some("https://it.example.com/portal")
        );

        let sent = notifier.sent_messages();
        assert_eq!(sent[0].to, "services@example.com");
        assert!(sent[0].body.contains("https://it.example.com/portal"));
    }

    #[tokio::test]
    async fn test_smart_classification_used_when_available() {
        let smart = crate::domain::decision::ComplaintClassification::new(
            true,
            false,
            ProductCategory::Software,
            0.85,
            "firmware regression reported",
            ModelUsed::RuleBased,
        );
        let provider = Arc::new(MockDecisionProvider::new().with_complaint(smart));
        let service = service_with(
            Arc::new(MockRecordSource::new()),
            Arc::new(MockNotifier::new()),
            HybridDecisionPort::new(provider),
        );

        let ticket = TicketRecord::new("500-3", "Device acting up", "It reboots at random");
        let state = service.run(Some(ticket), true).await.unwrap();

        let classification = state.classification.unwrap();
        assert_eq!(classification.model_used, ModelUsed::Llm);
        assert_eq!(classification.product_category, ProductCategory::Software);
    }

    #[tokio::test]
    async fn test_notifier_failure_recorded_and_comment_still_posted() {
        let ticket = TicketRecord::new("500-4", "Broken cable", "The fiber arrived damaged");
        let crm = Arc::new(MockRecordSource::new());
        let notifier = Arc::new(MockNotifier::new().with_error("smtp down"));
        let service = service_with(crm.clone(), notifier, HybridDecisionPort::deterministic());

        let state = service.run(Some(ticket), false).await.unwrap();

        assert!(state
            .actions_done
            .iter()
            .any(|a| a == "email:product_expert:failed"));
        assert!(crm
            .recorded_mutations()
            .iter()
            .any(|m| m.starts_with("post_comment:500-4")));
    }
}
