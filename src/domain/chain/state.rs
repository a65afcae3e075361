//! Per-execution chain state machine

use serde_json::Value;

use super::error::ChainError;
use super::result::ChainResult;

/// Accumulator carried through the fold over a chain's steps.
///
/// `Pending { index, .. }` names the next step to run and holds its input.
/// Running the last step successfully moves to `Succeeded`.
#[derive(Debug, Clone, PartialEq)]
pub enum ChainState {
    Pending { index: usize, value: Value },
    Succeeded(Value),
    Failed(ChainError),
}

impl ChainState {
    pub fn start(input: Value) -> Self {
        Self::Pending {
            index: 0,
            value: input,
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending { .. })
    }

    /// Hand out the next step's index and input.
    ///
    /// The pending value is moved out; the state must be advanced before it
    /// is read again. Terminal states yield `None`.
    pub fn take_input(&mut self) -> Option<(usize, Value)> {
        match self {
            Self::Pending { index, value } => Some((*index, std::mem::take(value))),
            _ => None,
        }
    }

    /// Apply the outcome of the step at the current index.
    ///
    /// Terminal states absorb every further outcome unchanged.
    pub fn advance(self, outcome: Result<Value, ChainError>, len: usize) -> Self {
        let Self::Pending { index, .. } = self else {
            return self;
        };

        match outcome {
            Ok(value) if index + 1 >= len => Self::Succeeded(value),
            Ok(value) => Self::Pending {
                index: index + 1,
                value,
            },
            Err(error) => Self::Failed(error),
        }
    }

    /// Map the final accumulator to an outcome
    pub fn finish(self) -> ChainResult {
        let outcome = match self {
            Self::Pending { value, .. } | Self::Succeeded(value) => Ok(value),
            Self::Failed(error) => Err(error),
        };

        ChainResult::from(outcome)
    }
}
