//! Codeflow - turn AI-generated code snippets into an exportable flow
//!
//! A completion response is split into fenced code blocks, each response
//! becomes an item, items are placed on a diagram and connected, and the
//! connected nodes are flattened into one text file.
//!
//! # Quick Start
//!
//! ```rust
//! use codeflow::{extract_code_blocks, generate_preview, EdgeData, NodeData};
//!
//! let blocks = extract_code_blocks("Setup:\n```\npip install x\n```\nRun:\n```\nx run\n```");
//! assert_eq!(blocks, vec!["pip install x", "x run"]);
//!
//! let nodes = vec![
//!     NodeData::new("item-1", "Setup", &blocks[0]),
//!     NodeData::new("item-2", "Run", &blocks[1]),
//! ];
//! let edges = vec![EdgeData::new("item-1", "item-2")];
//! assert_eq!(generate_preview(&nodes, &edges), "pip install x\n\n---\n\nx run");
//! ```
//!
//! # Sessions
//!
//! For the full workflow, drive a [`session::SessionState`] with actions:
//!
//! ```rust
//! use codeflow::prelude::*;
//!
//! let state = SessionState::new()
//!     .apply(Action::ItemCreated { name: Some("Setup".into()), completion: "```a```".into() })?
//!     .apply(Action::ItemCreated { name: Some("Run".into()), completion: "```b```".into() })?
//!     .apply(Action::PlaceItem { item_id: "item-1".into() })?
//!     .apply(Action::PlaceItem { item_id: "item-2".into() })?
//!     .apply(Action::Connect { source: "item-1".into(), target: "item-2".into() })?;
//!
//! let export = state.export();
//! assert_eq!(export.file_name, "flow-diagram.py");
//! assert_eq!(export.content, "a\n\n---\n\nb");
//! # Ok::<(), codeflow::FlowError>(())
//! ```

pub mod completion;
pub mod core;
pub mod diagram;
pub mod session;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use core::*;
pub use diagram::generate_preview;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::completion::{
        compose_prompt, request_item, CompletionConfig, CompletionRequest, CompletionService,
    };
    pub use crate::core::{
        extract_code_blocks, CompletionError, Database, EdgeData, ExportFormat, FlowError, Item,
        NodeData, UploadedFile,
    };
    pub use crate::diagram::{generate_preview, linearize, DiagramDatabase, DiagramDocument};
    pub use crate::session::{reduce, Action, Export, SessionState};

    #[cfg(not(target_arch = "wasm32"))]
    pub use crate::completion::HttpCompletionClient;
}

/// Preview text for a JSON diagram document
///
/// # Example
/// ```rust
/// let json = r#"{"nodes":[{"id":"a","label":"A","fullText":"x"}],"edges":[]}"#;
/// assert_eq!(codeflow::preview_document(json).unwrap(), "");
/// ```
pub fn preview_document(json: &str) -> Result<String, FlowError> {
    Ok(diagram::DiagramDocument::from_json(json)?.preview())
}
