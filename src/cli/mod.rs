//! CLI module for request-chain
//!
//! Provides subcommands:
//! - `comments`: fetch a post's comments starting from one or more usernames

pub mod comments;

use clap::{Parser, Subcommand};

/// request-chain - resolve dependent API lookups one step at a time
#[derive(Parser)]
#[command(name = "request-chain")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Fetch the comments of a user's blog post
    Comments(comments::CommentsArgs),
}
