//! Core abstractions for the flow pipeline
//!
//! Model types, errors, the database trait, fenced block extraction and
//! logging live here; everything else builds on them.

mod database;
mod error;
mod extract;
pub mod logging;
mod text;
mod types;

pub use database::*;
pub use error::*;
pub use extract::*;
pub use logging::*;
pub use text::*;
pub use types::*;
