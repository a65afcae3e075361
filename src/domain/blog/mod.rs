//! Blog example - the user -> blog -> post -> comments walk

mod chain;
mod entity;
mod routes;

pub use chain::CommentsChainBuilder;
pub use entity::{Blog, BlogPost, Comment, User};
pub use routes::{LocatorTemplate, RouteTemplates, Routes};
