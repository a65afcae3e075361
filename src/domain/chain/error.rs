//! Chain failure types

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::http::TransportError;

/// Failure category of a chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Transport,
    UnexpectedStatus,
    Parse,
    Cancelled,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Transport => "transport",
            Self::UnexpectedStatus => "unexpected_status",
            Self::Parse => "parse",
            Self::Cancelled => "cancelled",
        };
        write!(f, "{}", name)
    }
}

/// What a single step reports when it cannot produce a value
#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StepFailure {
    #[error("Transport error: {message}")]
    Transport { message: String },

    #[error("Unexpected status {status} from '{locator}'")]
    UnexpectedStatus {
        locator: String,
        status: u16,
        body: String,
    },

    #[error("Parse error: {message}")]
    Parse { body: String, message: String },

    #[error("Chain cancelled")]
    Cancelled,
}

impl StepFailure {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    pub fn unexpected_status(
        locator: impl Into<String>,
        status: u16,
        body: impl Into<String>,
    ) -> Self {
        Self::UnexpectedStatus {
            locator: locator.into(),
            status,
            body: body.into(),
        }
    }

    pub fn parse(body: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            body: body.into(),
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Transport { .. } => ErrorKind::Transport,
            Self::UnexpectedStatus { .. } => ErrorKind::UnexpectedStatus,
            Self::Parse { .. } => ErrorKind::Parse,
            Self::Cancelled => ErrorKind::Cancelled,
        }
    }
}

impl From<TransportError> for StepFailure {
    fn from(error: TransportError) -> Self {
        Self::transport(error.message)
    }
}

/// A step failure pinned to the position it happened at
#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize, Deserialize)]
#[error("Step {step_index} ('{step_name}') failed: {failure}")]
pub struct ChainError {
    pub step_index: usize,
    pub step_name: String,
    pub failure: StepFailure,
}

impl ChainError {
    pub fn new(step_index: usize, step_name: impl Into<String>, failure: StepFailure) -> Self {
        Self {
            step_index,
            step_name: step_name.into(),
            failure,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.failure.kind()
    }

    /// Observed status code, for `UnexpectedStatus` failures
    pub fn status_code(&self) -> Option<u16> {
        match &self.failure {
            StepFailure::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_kinds() {
        let not_found = StepFailure::unexpected_status("posts", 404, "");
        let cases = [
            (StepFailure::transport("refused"), ErrorKind::Transport),
            (not_found, ErrorKind::UnexpectedStatus),
            (StepFailure::parse("oops", "bad"), ErrorKind::Parse),
            (StepFailure::Cancelled, ErrorKind::Cancelled),
        ];

        for (failure, kind) in cases {
            assert_eq!(failure.kind(), kind);
        }
    }

    #[test]
    fn test_error_display() {
        let failure = StepFailure::unexpected_status("blogs/42/posts/Hello", 404, "not found");
        let err = ChainError::new(2, "fetch_post", failure);

        assert_eq!(
            err.to_string(),
            "Step 2 ('fetch_post') failed: Unexpected status 404 from 'blogs/42/posts/Hello'"
        );
        assert_eq!(err.kind(), ErrorKind::UnexpectedStatus);
        assert_eq!(err.status_code(), Some(404));
    }

    #[test]
    fn test_status_code_absent_for_other_kinds() {
        let err = ChainError::new(0, "fetch_user", StepFailure::transport("timed out"));
        assert_eq!(err.status_code(), None);
    }

    #[test]
    fn test_from_transport_error() {
        let failure: StepFailure = TransportError::new("dns failure").into();
        assert_eq!(failure, StepFailure::transport("dns failure"));
    }

    #[test]
    fn test_serialization() {
        let failure = StepFailure::parse("<html>", "expected value");
        let err = ChainError::new(1, "fetch_blog", failure);
        let json = serde_json::to_value(&err).unwrap();

        assert_eq!(json["step_index"], 1);
        assert_eq!(json["failure"]["kind"], "parse");
        assert_eq!(json["failure"]["body"], "<html>");
    }
}
