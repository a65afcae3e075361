//! Domain layer - chain resolution and the blog example built on it

pub mod blog;
pub mod chain;
pub mod error;
pub mod http;

pub use blog::{Blog, BlogPost, Comment, CommentsChainBuilder, RouteTemplates, User};
pub use chain::{
    Chain, ChainError, ChainReport, ChainResult, ChainState, ErrorKind, FetchStep, FnStep, Step,
    StepFailure, StepResult, build_chain,
};
pub use error::DomainError;
pub use http::{HttpResponse, RequestIssuer, StatusPolicy, TransportError};
