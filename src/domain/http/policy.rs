//! Which status codes count as a successful step

use serde::{Deserialize, Serialize};

/// Status acceptance policy applied to every fetch step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusPolicy {
    /// Only 200 is accepted; anything else fails the step
    #[default]
    OkOnly,
    /// Any 2xx status is accepted
    AnySuccess,
}

impl StatusPolicy {
    pub fn accepts(&self, status: u16) -> bool {
        match self {
            Self::OkOnly => status == 200,
            Self::AnySuccess => (200..300).contains(&status),
        }
    }
}
