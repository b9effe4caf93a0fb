//! Pipeline run endpoints

use axum::{extract::State, Json};

use crate::api::state::AppState;
use crate::api::types::{
    from_pipeline_error, ApiError, RunLeadRequest, RunResponse, RunTicketRequest,
};
use crate::domain::complaint::ComplaintFlowState;
use crate::domain::lead::LeadFlowState;
use crate::domain::ticket::TicketFlowState;

/// POST /v1/runs/lead
pub async fn run_lead(
    State(state): State<AppState>,
    request: Option<Json<RunLeadRequest>>,
) -> Result<Json<RunResponse<LeadFlowState>>, ApiError> {
    let request = request.map(|Json(r)| r).unwrap_or_default();
    let use_llm = state.resolve_use_llm(request.use_llm);

    let final_state = state
        .lead_service
        .run(request.lead, use_llm)
        .await
        .map_err(|e| from_pipeline_error(e, |s| s.actions_done.clone()))?;

    Ok(Json(RunResponse::new("lead_qualification", final_state)))
}

/// POST /v1/runs/ticket
pub async fn run_ticket(
    State(state): State<AppState>,
    request: Option<Json<RunTicketRequest>>,
) -> Result<Json<RunResponse<TicketFlowState>>, ApiError> {
    let request = request.map(|Json(r)| r).unwrap_or_default();
    let use_llm = state.resolve_use_llm(request.use_llm);

    let final_state = state
        .ticket_service
        .run(request.case, use_llm)
        .await
        .map_err(|e| from_pipeline_error(e, |s| s.actions_done.clone()))?;

    Ok(Json(RunResponse::new("ticket_triage", final_state)))
}

/// POST /v1/runs/complaint
pub async fn run_complaint(
    State(state): State<AppState>,
    request: Option<Json<RunTicketRequest>>,
) -> Result<Json<RunResponse<ComplaintFlowState>>, ApiError> {
    let request = request.map(|Json(r)| r).unwrap_or_default();
    let use_llm = state.resolve_use_llm(request.use_llm);

    let final_state = state
        .complaint_service
        .run(request.case, use_llm)
        .await
        .map_err(|e| from_pipeline_error(e, |s| s.actions_done.clone()))?;

    Ok(Json(RunResponse::new("complaint_classification", final_state)))
}
