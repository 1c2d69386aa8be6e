//! Diagram storage, preview and interchange
//!
//! The database owns placed nodes and edges, the preview module flattens
//! them into exportable text, and the document module reads and writes the
//! JSON form used by the CLI and browser hosts.

mod database;
mod document;
mod preview;

pub use database::*;
pub use document::*;
pub use preview::*;
