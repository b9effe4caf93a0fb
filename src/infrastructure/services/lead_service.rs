//! Lead qualification pipeline
//!
//! Fetch → Enrich → Score → Route → Act, over the shared executor.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::domain::crm::{FieldUpdates, RecordSource};
use crate::domain::decision::{HybridDecisionPort, ModelUsed, ScoreResult};
use crate::domain::erp::EnrichmentSource;
use crate::domain::lead::{
    route_lead, EnrichedContext, LeadFlowState, LeadPatch, LeadRecord, OwnerType,
};
use crate::domain::notifier::{EmailMessage, Notifier};
use crate::domain::workflow::{PipelineError, PipelineExecutor, PipelineStep};
use crate::domain::DomainError;

/// Runs the lead qualification pipeline end to end
pub struct LeadQualificationService {
    executor: PipelineExecutor<LeadFlowState>,
}

impl std::fmt::Debug for LeadQualificationService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LeadQualificationService").finish()
    }
}

impl LeadQualificationService {
    pub fn new(
        crm: Arc<dyn RecordSource>,
        erp: Arc<dyn EnrichmentSource>,
        notifier: Arc<dyn Notifier>,
        decisions: HybridDecisionPort,
        config: Arc<AppConfig>,
    ) -> Self {
        let executor = PipelineExecutor::new()
            .with_step(FetchLeadStep { crm: crm.clone() })
            .with_step(EnrichLeadStep { erp })
            .with_step(ScoreLeadStep { decisions })
            .with_step(RouteLeadStep {
                config: config.clone(),
            })
            .with_step(ExecuteLeadActionsStep {
                crm,
                notifier,
                config,
            });

        Self { executor }
    }

    /// Run the pipeline; when no lead is given the record source supplies
    /// the next new one.
    pub async fn run(
        &self,
        lead: Option<LeadRecord>,
        use_llm: bool,
    ) -> Result<LeadFlowState, PipelineError<LeadFlowState>> {
        info!(use_llm, "starting lead qualification pipeline");

        let state = self.executor.run(LeadFlowState::new(lead, use_llm)).await?;

        info!(
            score = state.score.as_ref().map(|s| s.score),
            route = state.route.as_ref().map(|r| r.owner_type.as_str()),
            actions = state.actions_done.len(),
            "lead qualification pipeline complete"
        );

        Ok(state)
    }
}

struct FetchLeadStep {
    crm: Arc<dyn RecordSource>,
}

#[async_trait]
impl PipelineStep<LeadFlowState> for FetchLeadStep {
    fn name(&self) -> &'static str {
        "fetch_lead"
    }

    async fn run(&self, state: &LeadFlowState) -> Result<LeadPatch, DomainError> {
        if let Some(ref lead) = state.lead {
            return Ok(LeadPatch::actions([format!(
                "fetch_lead:existing:{}",
                lead.id
            )]));
        }

        let mut leads = self.crm.fetch_new_leads(1).await?;

        match leads.pop() {
            Some(lead) => {
                let action = format!("fetch_lead:fetched:{}", lead.id);
                Ok(LeadPatch {
                    lead: Some(Some(lead)),
                    ..LeadPatch::default()
                }
                .with_action(action))
            }
            None => {
                warn!("no new leads to qualify");
                Ok(LeadPatch::actions(["fetch_lead:none_found".to_string()]))
            }
        }
    }
}

struct EnrichLeadStep {
    erp: Arc<dyn EnrichmentSource>,
}

#[async_trait]
impl PipelineStep<LeadFlowState> for EnrichLeadStep {
    fn name(&self) -> &'static str {
        "enrich_lead"
    }

    async fn run(&self, state: &LeadFlowState) -> Result<LeadPatch, DomainError> {
        let Some(ref lead) = state.lead else {
            return Ok(LeadPatch::actions(["enrich_lead:no_lead".to_string()]));
        };

        if lead.company.trim().is_empty() {
            return Ok(LeadPatch {
                enriched: Some(EnrichedContext::empty()),
                ..LeadPatch::default()
            }
            .with_action("enrich_lead:no_company"));
        }

        let Some(partner) = self.erp.lookup_partner(&lead.company).await? else {
            return Ok(LeadPatch {
                enriched: Some(EnrichedContext::empty()),
                ..LeadPatch::default()
            }
            .with_action(format!("enrich_lead:bp_not_found:{}", lead.company)));
        };

        let orders = self.erp.list_orders(&partner.id, 10).await?;
        let enriched = EnrichedContext::from_partner(&partner, &orders, Utc::now());
        let action = format!(
            "enrich_lead:success:bp={}:orders={}",
            partner.id,
            orders.len()
        );

        Ok(LeadPatch {
            enriched: Some(enriched),
            ..LeadPatch::default()
        }
        .with_action(action))
    }
}

struct ScoreLeadStep {
    decisions: HybridDecisionPort,
}

#[async_trait]
impl PipelineStep<LeadFlowState> for ScoreLeadStep {
    fn name(&self) -> &'static str {
        "score_lead"
    }

    async fn run(&self, state: &LeadFlowState) -> Result<LeadPatch, DomainError> {
        let Some(ref lead) = state.lead else {
            let score = ScoreResult::new(0.0, 1.0, "No lead data provided", ModelUsed::RuleBased);
            return Ok(LeadPatch {
                score: Some(score),
                ..LeadPatch::default()
            }
            .with_action("score_lead:no_lead"));
        };

        let score = self
            .decisions
            .score_lead(lead, &state.enriched, state.use_llm)
            .await;
        let action = format!("score_lead:{}:score={:.2}", score.model_used, score.score);

        Ok(LeadPatch {
            score: Some(score),
            ..LeadPatch::default()
        }
        .with_action(action))
    }
}

struct RouteLeadStep {
    config: Arc<AppConfig>,
}

#[async_trait]
impl PipelineStep<LeadFlowState> for RouteLeadStep {
    fn name(&self) -> &'static str {
        "route_lead"
    }

    async fn run(&self, state: &LeadFlowState) -> Result<LeadPatch, DomainError> {
        let score = state.score.as_ref();
        let value = score.map(|s| s.score).unwrap_or(0.0);

        let mut route = route_lead(value);
        let owner_id = self.config.owner_id_for(route.owner_type).to_string();
        route = route.with_owner_id(owner_id);

        // Surface smart-path reasoning to the sales team alongside the band
        if let Some(score) = score {
            if score.model_used == ModelUsed::Llm && !score.reasoning.is_empty() {
                route.reason = format!("{}\n\nAI analysis: {}", route.reason, score.reasoning);
            }
        }

        let action = format!("route_lead:{}:{}", route.owner_type, route.priority);

        Ok(LeadPatch {
            route: Some(route),
            ..LeadPatch::default()
        }
        .with_action(action))
    }
}

struct ExecuteLeadActionsStep {
    crm: Arc<dyn RecordSource>,
    notifier: Arc<dyn Notifier>,
    config: Arc<AppConfig>,
}

impl ExecuteLeadActionsStep {
    fn follow_up_body(state: &LeadFlowState, lead: &LeadRecord) -> String {
        let score = state.score.as_ref().map(|s| s.score).unwrap_or(0.0);
        let route = state.route.as_ref();

        let mut body = format!(
            "Lead Qualification Summary:\n- Score: {:.2}\n- Company: {}\n- Industry: {}\n- Routing: {} ({})\n",
            score,
            lead.company,
            lead.industry.as_deref().unwrap_or("N/A"),
            route.map(|r| r.owner_type.as_str()).unwrap_or("N/A"),
            route.map(|r| r.reason.as_str()).unwrap_or(""),
        );

        if state.enriched.has_partner() {
            body.push_str(&format!(
                "\nERP Context:\n- Business Partner: {}\n- Total Orders: {}\n- Lifetime Revenue: ${:.2}\n- Credit Rating: {}\n",
                state.enriched.partner_id.as_deref().unwrap_or("N/A"),
                state.enriched.total_orders,
                state.enriched.total_order_value,
                state.enriched.credit_rating.as_deref().unwrap_or("N/A"),
            ));
        }

        body
    }
}

#[async_trait]
impl PipelineStep<LeadFlowState> for ExecuteLeadActionsStep {
    fn name(&self) -> &'static str {
        "execute_lead_actions"
    }

    async fn run(&self, state: &LeadFlowState) -> Result<LeadPatch, DomainError> {
        let Some(ref lead) = state.lead else {
            return Ok(LeadPatch::actions(["execute_actions:no_lead".to_string()]));
        };

        let mut actions = Vec::new();
        let route = state.route.as_ref();
        let score = state.score.as_ref().map(|s| s.score).unwrap_or(0.0);

        if let Some(route) = route {
            if !route.owner_id.is_empty() {
                self.crm.assign_owner(&lead.id, &route.owner_id).await?;
                actions.push(format!("crm:assign_owner:{}", route.owner_id));
            }

            let status = match route.owner_type {
                OwnerType::AccountExecutive => "Working - Contacted",
                OwnerType::SalesDevelopment => "Open - Not Contacted",
                OwnerType::Nurture => "Nurturing",
            };

            let mut fields = FieldUpdates::new();
            fields.insert("status".to_string(), serde_json::json!(status));
            self.crm.update_fields(&lead.id, fields).await?;
            actions.push(format!("crm:update_status:{status}"));

            let subject = format!("[{}] Follow up with {}", route.priority, lead.name);
            let body = Self::follow_up_body(state, lead);
            let task_id = self.crm.create_task(&lead.id, &subject, &body).await?;
            actions.push(format!("crm:create_task:{task_id}"));
        }

        // High-value alert; a notifier failure is recorded, not fatal
        if score >= self.config.routing.alert_threshold {
            let to = &self.config.notifier.recipients.notification_email;
            let reasoning = state
                .score
                .as_ref()
                .map(|s| s.reasoning.clone())
                .unwrap_or_default();

            let message = EmailMessage::new(
                to.clone(),
                format!("High-value lead: {} (score {:.2})", lead.company, score),
                format!("{}\n\n{}", Self::follow_up_body(state, lead), reasoning),
            );

            if to.is_empty() {
                warn!("high-value alert skipped, no notification recipient configured");
                actions.push("email:lead_alert:failed".to_string());
            } else {
                match self.notifier.send(&message).await {
                    Ok(receipt) => {
                        actions.push(format!("email:lead_alert:{}", receipt.message_id));
                    }
                    Err(error) => {
                        warn!(%error, "high-value lead alert failed");
                        actions.push("email:lead_alert:failed".to_string());
                    }
                }
            }
        }

        Ok(LeadPatch::actions(actions))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::crm::MockRecordSource;
    use crate::domain::decision::MockDecisionProvider;
    use crate::domain::erp::{MockEnrichmentSource, PartnerRecord, SalesOrder};
    use crate::domain::lead::Priority;
    use crate::domain::notifier::mock::MockNotifier;
    use chrono::Duration;

    fn enterprise_lead() -> LeadRecord {
        LeadRecord::new("00Q-1", "Jordan Kim", "Globex")
            .with_title("CTO")
            .with_employee_count(12_000)
            .with_annual_revenue(600_000_000.0)
            .with_industry("Technology")
            .with_rating("Hot")
            .with_source("Partner Referral")
    }

    fn small_lead() -> LeadRecord {
        LeadRecord::new("00Q-2", "Sam Novak", "Corner Bakery")
            .with_title("Analyst")
            .with_employee_count(5)
            .with_annual_revenue(50_000.0)
            .with_industry("Retail")
            .with_rating("Cold")
            .with_source("Cold Call")
    }

    fn test_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.notifier.recipients.notification_email = "sales-ops@example.com".to_string();
        config
    }

    fn service_with(
        crm: Arc<MockRecordSource>,
        erp: MockEnrichmentSource,
        notifier: Arc<MockNotifier>,
        decisions: HybridDecisionPort,
    ) -> LeadQualificationService {
        LeadQualificationService::new(crm, Arc::new(erp), notifier, decisions, Arc::new(test_config()))
    }

    #[tokio::test]
    async fn test_enterprise_lead_routes_to_ae_p1() {
        let crm = Arc::new(MockRecordSource::new());
        let now = Utc::now();
        let erp = MockEnrichmentSource::new()
            .with_partner(PartnerRecord::new("BP-7", "Globex").with_credit_rating("A+"))
            .with_orders(vec![
                SalesOrder::new("SO-1", "BP-7", 900_000.0, now - Duration::days(15)),
                SalesOrder::new("SO-2", "BP-7", 400_000.0, now - Duration::days(250)),
            ]);
        let notifier = Arc::new(MockNotifier::new());
        let service = service_with(
            crm.clone(),
            erp,
            notifier.clone(),
            HybridDecisionPort::deterministic(),
        );

        let state = service.run(Some(enterprise_lead()), false).await.unwrap();

        let score = state.score.unwrap();
        assert!(score.score >= 0.75);

        let route = state.route.unwrap();
        assert_eq!(route.owner_type, OwnerType::AccountExecutive);
        assert_eq!(route.priority, Priority::P1);
        assert_eq!(route.owner_id, "owner-ae");

        // Side effects hit the CRM and the notifier fired the alert
        let mutations = crm.recorded_mutations();
        assert!(mutations.iter().any(|m| m.starts_with("assign_owner:00Q-1:owner-ae")));
        assert!(mutations.iter().any(|m| m.starts_with("create_task:00Q-1")));
        assert!(state.actions_done.iter().any(|a| a.starts_with("email:lead_alert:")));
    }

    #[tokio::test]
    async fn test_weak_lead_routes_to_nurture_without_alert() {
        let crm = Arc::new(MockRecordSource::new());
        let notifier = Arc::new(MockNotifier::new());
        let service = service_with(
            crm,
            MockEnrichmentSource::new(),
            notifier.clone(),
            HybridDecisionPort::deterministic(),
        );

        let state = service.run(Some(small_lead()), false).await.unwrap();

        let score = state.score.unwrap();
        assert!(score.score < 0.45);
        assert_eq!(state.route.unwrap().owner_type, OwnerType::Nurture);
        assert!(notifier.sent_messages().is_empty());
    }

    #[tokio::test]
    async fn test_lead_fetched_when_not_provided() {
        let crm = Arc::new(MockRecordSource::new().with_lead(small_lead()));
        let service = service_with(
            crm,
            MockEnrichmentSource::new(),
            Arc::new(MockNotifier::new()),
            HybridDecisionPort::deterministic(),
        );

        let state = service.run(None, false).await.unwrap();

        assert_eq!(state.lead.unwrap().id, "00Q-2");
        assert!(state
            .actions_done
            .iter()
            .any(|a| a == "fetch_lead:fetched:00Q-2"));
    }

    #[tokio::test]
    async fn test_smart_failure_still_completes_with_fallback() {
        let provider = Arc::new(MockDecisionProvider::new().with_error("always down"));
        let crm = Arc::new(MockRecordSource::new());
        let service = service_with(
            crm,
            MockEnrichmentSource::new(),
            Arc::new(MockNotifier::new()),
            HybridDecisionPort::new(provider),
        );

        let state = service.run(Some(enterprise_lead()), true).await.unwrap();

        let score = state.score.unwrap();
        assert_eq!(score.model_used, ModelUsed::Fallback);
        assert!(state.route.is_some());
        assert!(state
            .actions_done
            .iter()
            .any(|a| a.starts_with("score_lead:fallback:")));
    }

    #[tokio::test]
    async fn test_crm_failure_propagates_with_audit_trail() {
        let crm = Arc::new(MockRecordSource::new().with_error("connection refused"));
        let service = service_with(
            crm,
            MockEnrichmentSource::new(),
            Arc::new(MockNotifier::new()),
            HybridDecisionPort::deterministic(),
        );

        let error = service.run(Some(small_lead()), false).await.unwrap_err();

        assert_eq!(error.step, "execute_lead_actions");
        assert!(matches!(error.source, DomainError::Collaborator { .. }));
        // Steps before the failure left their audit entries behind
        assert!(error
            .state
            .actions_done
            .iter()
            .any(|a| a.starts_with("score_lead:")));
    }

    #[tokio::test]
    async fn test_notifier_failure_is_recorded_not_fatal() {
        let crm = Arc::new(MockRecordSource::new());
        let notifier = Arc::new(MockNotifier::new().with_error("smtp down"));
        let service = service_with(
            crm,
            MockEnrichmentSource::new(),
            notifier,
            HybridDecisionPort::deterministic(),
        );

        let state = service.run(Some(enterprise_lead()), false).await.unwrap();

        assert!(state.actions_done.iter().any(|a| a == "email:lead_alert:failed"));
    }

    #[tokio::test]
    async fn test_no_leads_available_completes_gracefully() {
        let crm = Arc::new(MockRecordSource::new());
        let service = service_with(
            crm,
            MockEnrichmentSource::new(),
            Arc::new(MockNotifier::new()),
            HybridDecisionPort::deterministic(),
        );

        let state = service.run(None, false).await.unwrap();

        assert!(state.lead.is_none());
        assert!(state.actions_done.contains(&"fetch_lead:none_found".to_string()));
        assert!(state.actions_done.contains(&"execute_actions:no_lead".to_string()));
    }
}
