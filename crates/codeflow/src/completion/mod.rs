//! Chat-completion collaborator
//!
//! Composes the outbound prompt, sends it to a hosted endpoint and turns
//! the answer into a session action.

mod client;
mod config;
mod prompt;

pub use client::*;
pub use config::*;
pub use prompt::*;
