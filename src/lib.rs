//! PMP RevOps Automation Engine
//!
//! Lead qualification and support triage as linear record-processing
//! pipelines: fetch, enrich, score/classify, route, act. Every LLM-backed
//! decision point sits behind a hybrid port with a deterministic rule-based
//! fallback, so a run always completes with a usable decision.

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use tracing::info;

use api::AppState;
use config::{CrmBackend, NotifierBackend};
use domain::crm::RecordSource;
use domain::decision::HybridDecisionPort;
use domain::erp::EnrichmentSource;
use domain::notifier::Notifier;
use infrastructure::crm::{InMemoryCrm, RestCrm};
use infrastructure::erp::InMemoryErp;
use infrastructure::llm::OpenAiDecisionClient;
use infrastructure::notifier::{LogNotifier, ResendNotifier};
use infrastructure::services::{ComplaintService, LeadQualificationService, TicketTriageService};

/// Wire collaborators and pipeline services from configuration
pub async fn create_app_state(config: AppConfig) -> anyhow::Result<AppState> {
    let config = Arc::new(config);

    let crm: Arc<dyn RecordSource> = match config.crm.backend {
        CrmBackend::Memory => {
            info!("CRM backend: in-memory simulator");
            Arc::new(InMemoryCrm::with_demo_data())
        }
        CrmBackend::Rest => {
            info!("CRM backend: rest ({})", config.crm.base_url);
            Arc::new(RestCrm::from_config(&config.crm)?)
        }
    };

    let erp: Arc<dyn EnrichmentSource> = Arc::new(InMemoryErp::with_demo_data());

    let notifier: Arc<dyn Notifier> = match config.notifier.backend {
        NotifierBackend::Log => Arc::new(LogNotifier::new()),
        NotifierBackend::Resend => {
            info!("Notifier backend: resend");
            Arc::new(ResendNotifier::from_config(&config.notifier)?)
        }
    };

    let decisions = if config.llm.enabled {
        info!("Smart decision path enabled (model: {})", config.llm.model);
        HybridDecisionPort::new(Arc::new(OpenAiDecisionClient::from_config(&config.llm)?))
    } else {
        info!("Smart decision path disabled, deterministic engine only");
        HybridDecisionPort::deterministic()
    };

    let lead_service = Arc::new(LeadQualificationService::new(
        crm.clone(),
        erp.clone(),
        notifier.clone(),
        decisions.clone(),
        config.clone(),
    ));

    let ticket_service = Arc::new(TicketTriageService::new(
        crm.clone(),
        erp,
        decisions.clone(),
        config.clone(),
    ));

    let complaint_service = Arc::new(ComplaintService::new(
        crm.clone(),
        notifier,
        decisions,
        config.clone(),
    ));

    Ok(AppState::new(
        lead_service,
        ticket_service,
        complaint_service,
        crm,
        config,
    ))
}
