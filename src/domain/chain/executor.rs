//! Chain resolver - runs dependent steps in order, stopping at the first failure

use std::sync::Arc;
use std::time::Instant;

use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::error::{ChainError, StepFailure};
use super::result::{ChainReport, ChainResult, StepResult};
use super::state::ChainState;
use super::step::Step;
use crate::domain::DomainError;

/// An ordered, immutable sequence of dependent steps.
///
/// Built once per invocation and consumed by running it.
#[derive(Debug, Clone)]
pub struct Chain {
    steps: Vec<Arc<dyn Step>>,
}

impl Chain {
    /// Create a chain; at least one step is required
    pub fn new(steps: Vec<Arc<dyn Step>>) -> Result<Self, DomainError> {
        if steps.is_empty() {
            return Err(DomainError::validation("Chain has no steps"));
        }

        Ok(Self { steps })
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn step_names(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.name()).collect()
    }

    /// Run the chain to its terminal outcome
    pub async fn resolve(self, input: Value) -> ChainResult {
        self.execute(input, &CancellationToken::new()).await.result
    }

    /// Run the chain, aborting before the next step once `cancel` fires
    pub async fn resolve_with_cancel(
        self,
        input: Value,
        cancel: &CancellationToken,
    ) -> ChainResult {
        self.execute(input, cancel).await.result
    }

    /// Run the chain and keep a trace of every invoked step
    pub async fn execute(self, input: Value, cancel: &CancellationToken) -> ChainReport {
        let start = Instant::now();
        let len = self.steps.len();
        let mut step_results = Vec::with_capacity(len);
        let mut state = ChainState::start(input);

        for step in &self.steps {
            let Some((index, value)) = state.take_input() else {
                break;
            };

            let outcome = if cancel.is_cancelled() {
                warn!("Chain cancelled before step {} ('{}')", index, step.name());
                Err(StepFailure::Cancelled)
            } else {
                debug!("Executing step '{}' (index {})", step.name(), index);
                let step_start = Instant::now();
                let outcome = step.run(value).await;

                step_results.push(StepResult {
                    index,
                    name: step.name().to_string(),
                    success: outcome.is_ok(),
                    latency_ms: step_start.elapsed().as_millis() as u64,
                });

                outcome.inspect_err(|failure| {
                    warn!(step = step.name(), index, "Step failed: {}", failure);
                })
            };

            let outcome = outcome.map_err(|failure| ChainError::new(index, step.name(), failure));
            state = state.advance(outcome, len);

            if state.is_terminal() {
                break;
            }
        }

        let result = state.finish();
        let total_latency_ms = start.elapsed().as_millis() as u64;

        info!(
            success = result.is_success(),
            steps_run = step_results.len(),
            total_latency_ms,
            "Chain finished"
        );

        ChainReport {
            result,
            step_results,
            total_latency_ms,
        }
    }
}

/// Build a chain from `steps` and resolve it against `initial_input`
pub async fn build_chain(
    steps: Vec<Arc<dyn Step>>,
    initial_input: Value,
) -> Result<ChainResult, DomainError> {
    Ok(Chain::new(steps)?.resolve(initial_input).await)
}
