//! Dependent chain domain - step contract, resolver and outcomes

mod error;
mod executor;
mod result;
mod state;
mod step;

pub use error::{ChainError, ErrorKind, StepFailure};
pub use executor::{Chain, build_chain};
pub use result::{ChainReport, ChainResult, StepResult};
pub use state::ChainState;
pub use step::{FetchStep, FnStep, Step};
