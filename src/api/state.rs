//! Shared application state for the HTTP surface

use std::sync::Arc;

use crate::config::AppConfig;
use crate::domain::crm::RecordSource;
use crate::infrastructure::services::{
    ComplaintService, LeadQualificationService, TicketTriageService,
};

/// Application state handed to every handler
#[derive(Debug, Clone)]
pub struct AppState {
    pub lead_service: Arc<LeadQualificationService>,
    pub ticket_service: Arc<TicketTriageService>,
    pub complaint_service: Arc<ComplaintService>,

    /// Record source, exposed for by-id lookups from the CLI
    pub crm: Arc<dyn RecordSource>,

    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(
        lead_service: Arc<LeadQualificationService>,
        ticket_service: Arc<TicketTriageService>,
        complaint_service: Arc<ComplaintService>,
        crm: Arc<dyn RecordSource>,
        config: Arc<AppConfig>,
    ) -> Self {
        Self {
            lead_service,
            ticket_service,
            complaint_service,
            crm,
            config,
        }
    }

    /// Effective smart-path flag for a run: the request override wins,
    /// otherwise the configured default applies.
    pub fn resolve_use_llm(&self, requested: Option<bool>) -> bool {
        requested.unwrap_or(self.config.llm.enabled)
    }
}
