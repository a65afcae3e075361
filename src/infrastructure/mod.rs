//! Infrastructure layer - HTTP collaborator and logging setup

pub mod http_client;
pub mod logging;

pub use http_client::HttpClient;
