//! API error types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::domain::workflow::PipelineError;
use crate::domain::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiErrorType {
    InvalidRequestError,
    NotFoundError,
    CollaboratorError,
    ServerError,
}

/// Error response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorDetail {
    pub message: String,

    #[serde(rename = "type")]
    pub error_type: ApiErrorType,

    /// Pipeline step that failed, when the error came out of a run
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step: Option<String>,

    /// Audit trail of actions completed before the failure
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub actions_done: Vec<String>,
}

/// API error with status code
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub response: ApiErrorResponse,
}

impl ApiError {
    pub fn new(status: StatusCode, error_type: ApiErrorType, message: impl Into<String>) -> Self {
        Self {
            status,
            response: ApiErrorResponse {
                error: ApiErrorDetail {
                    message: message.into(),
                    error_type,
                    step: None,
                    actions_done: Vec::new(),
                },
            },
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            ApiErrorType::InvalidRequestError,
            message,
        )
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, ApiErrorType::NotFoundError, message)
    }

    pub fn with_step(mut self, step: impl Into<String>) -> Self {
        self.response.error.step = Some(step.into());
        self
    }

    pub fn with_actions_done(mut self, actions: Vec<String>) -> Self {
        self.response.error.actions_done = actions;
        self
    }
}

impl From<DomainError> for ApiError {
    fn from(error: DomainError) -> Self {
        match &error {
            DomainError::NotFound { .. } => Self::not_found(error.to_string()),
            DomainError::Validation { .. } | DomainError::ContentMissing { .. } => {
                Self::bad_request(error.to_string())
            }
            DomainError::Collaborator { .. } => Self::new(
                StatusCode::BAD_GATEWAY,
                ApiErrorType::CollaboratorError,
                error.to_string(),
            ),
            _ => Self::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiErrorType::ServerError,
                error.to_string(),
            ),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.response)).into_response()
    }
}

/// Convert a pipeline failure, keeping the failed step and the audit trail
/// of whatever completed before it.
pub fn from_pipeline_error<S, F>(error: PipelineError<S>, actions_of: F) -> ApiError
where
    S: Debug,
    F: FnOnce(&S) -> Vec<String>,
{
    let actions = actions_of(&error.state);
    ApiError::from(error.source)
        .with_step(error.step)
        .with_actions_done(actions)
}
