//! Pipeline executor
//!
//! Runs an ordered list of steps against an initial state: strictly in
//! order, no branching, no skipping, no parallelism. Each step's patch is
//! merged before the next step starts. Tracing here is an observer only and
//! not part of the contract.

use std::time::Instant;

use tracing::debug;

use super::{PipelineError, PipelineStep, WorkflowState};

/// Executes a fixed, linear sequence of pipeline steps
pub struct PipelineExecutor<S: WorkflowState> {
    steps: Vec<Box<dyn PipelineStep<S>>>,
}

impl<S: WorkflowState> PipelineExecutor<S> {
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    pub fn with_step(mut self, step: impl PipelineStep<S> + 'static) -> Self {
        self.steps.push(Box::new(step));
        self
    }

    /// Ordered step names, for tracing and introspection
    pub fn step_names(&self) -> Vec<&'static str> {
        self.steps.iter().map(|s| s.name()).collect()
    }

    /// Run every step to completion against the initial state.
    ///
    /// There is no cancellation mid-pipeline. The executor performs no error
    /// handling of its own: the first step error aborts the run, and the
    /// returned failure names the step and carries the state as merged so
    /// far (the audit trail is never discarded).
    pub async fn run(&self, initial: S) -> Result<S, PipelineError<S>> {
        let mut state = initial;

        for step in &self.steps {
            let started = Instant::now();

            match step.run(&state).await {
                Ok(patch) => {
                    state.apply(patch);
                    debug!(
                        step = step.name(),
                        elapsed_ms = started.elapsed().as_millis() as u64,
                        "pipeline step complete"
                    );
                }
                Err(source) => {
                    return Err(PipelineError {
                        step: step.name(),
                        state,
                        source,
                    });
                }
            }
        }

        Ok(state)
    }
}

impl<S: WorkflowState> Default for PipelineExecutor<S> {
    fn default() -> Self {
        Self::new()
    }
}
