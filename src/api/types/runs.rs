//! Request/response types for the run endpoints

use serde::{Deserialize, Serialize};

use crate::domain::lead::LeadRecord;
use crate::domain::ticket::TicketRecord;

/// Request to run the lead qualification pipeline
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RunLeadRequest {
    /// Lead to qualify; omitted means "fetch the next new lead"
    #[serde(default)]
    pub lead: Option<LeadRecord>,

    /// Overrides the configured smart-path default for this run
    #[serde(default)]
    pub use_llm: Option<bool>,
}

/// Request to run a ticket-based pipeline
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RunTicketRequest {
    /// Case to process; omitted means "fetch the next open case"
    #[serde(default)]
    pub case: Option<TicketRecord>,

    #[serde(default)]
    pub use_llm: Option<bool>,
}

/// Response wrapper naming the workflow that produced the state
#[derive(Debug, Clone, Serialize)]
pub struct RunResponse<S: Serialize> {
    pub workflow: &'static str,
    pub state: S,
}

impl<S: Serialize> RunResponse<S> {
    pub fn new(workflow: &'static str, state: S) -> Self {
        Self { workflow, state }
    }
}
