//! request-chain
//!
//! Sequential dependent-request resolution:
//! - Ordered steps where each step's output feeds the next
//! - Short-circuit on the first failure with a typed error channel
//! - Optional cancellation checked before every step
//! - A user -> blog -> post -> comments example over HTTP

pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use crate::config::AppConfig;
pub use domain::{Chain, ChainError, ChainResult, ErrorKind, Step, build_chain};
