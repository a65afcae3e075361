//! Request issuer trait and the values it produces

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[cfg(test)]
use mockall::automock;

/// A completed response, whatever its status
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpResponse {
    /// Status code as reported by the server
    pub status: u16,
    /// Raw response body
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn ok(body: impl Into<String>) -> Self {
        Self::new(200, body)
    }
}

/// The request could not complete at all (DNS, connect, timeout, bad URL)
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct TransportError {
    pub message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Issues a single request for a resource locator.
///
/// Implementations own connection handling, base locators, headers and
/// timeouts. Callers only ever see a completed response or a transport
/// failure.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RequestIssuer: Send + Sync {
    async fn get(&self, locator: &str) -> Result<HttpResponse, TransportError>;
}
