//! Pipeline step contract

use async_trait::async_trait;

use super::WorkflowState;
use crate::domain::DomainError;

/// A single named step in a pipeline.
///
/// A step reads any field written by an earlier step but never mutates the
/// running state directly: it returns a patch, merged by the executor. A
/// step that cannot produce its update returns an error, which the executor
/// propagates unmodified (recoverable decision failures are absorbed inside
/// the hybrid port before they ever reach a step boundary).
#[async_trait]
pub trait PipelineStep<S: WorkflowState>: Send + Sync {
    /// Step name, used for tracing and failure attribution
    fn name(&self) -> &'static str;

    /// Produce this step's partial update
    async fn run(&self, state: &S) -> Result<S::Patch, DomainError>;
}
