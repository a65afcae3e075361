//! Chain outcome and execution report

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::ChainError;

/// Terminal outcome of a chain; exactly one variant is ever produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ChainResult {
    Success { value: Value },
    Failure { error: ChainError },
}

impl ChainResult {
    pub fn success(value: Value) -> Self {
        Self::Success { value }
    }

    pub fn failure(error: ChainError) -> Self {
        Self::Failure { error }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn value(&self) -> Option<&Value> {
        match self {
            Self::Success { value } => Some(value),
            Self::Failure { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&ChainError> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { error } => Some(error),
        }
    }

    pub fn into_result(self) -> Result<Value, ChainError> {
        match self {
            Self::Success { value } => Ok(value),
            Self::Failure { error } => Err(error),
        }
    }
}

impl From<Result<Value, ChainError>> for ChainResult {
    fn from(result: Result<Value, ChainError>) -> Self {
        match result {
            Ok(value) => Self::success(value),
            Err(error) => Self::failure(error),
        }
    }
}

/// Trace record for one invoked step
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepResult {
    /// Position of the step in the chain
    pub index: usize,
    /// Step name
    pub name: String,
    /// Whether the step produced a value
    pub success: bool,
    /// Latency in milliseconds
    pub latency_ms: u64,
}

/// Outcome plus per-step trace of a chain execution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainReport {
    pub result: ChainResult,
    /// Only steps that were actually invoked appear here
    pub step_results: Vec<StepResult>,
    pub total_latency_ms: u64,
}
