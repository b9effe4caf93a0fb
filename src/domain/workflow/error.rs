//! Pipeline failure type

use std::fmt::Debug;

use thiserror::Error;

use crate::domain::DomainError;

/// A pipeline run that stopped at a failing step.
///
/// Carries the state as merged up to (but not including) the failed step, so
/// the audit trail of actions already taken survives the failure.
#[derive(Debug, Error)]
#[error("pipeline step '{step}' failed: {source}")]
pub struct PipelineError<S: Debug> {
    /// Name of the step that failed
    pub step: &'static str,

    /// State as of the last successfully merged step
    pub state: S,

    #[source]
    pub source: DomainError,
}
