//! Request-issuing collaborator - the only thing a fetch step talks to

mod issuer;
mod policy;

pub use issuer::{HttpResponse, RequestIssuer, TransportError};
pub use policy::StatusPolicy;

#[cfg(test)]
pub use issuer::MockRequestIssuer;
