//! Session state and its reducer
//!
//! A session is a sequence of immutable [`SessionState`] snapshots. Every
//! user event becomes an [`Action`], and [`reduce`] produces the next
//! snapshot or an error that leaves the previous one untouched.

use tracing::{debug, info, span, trace, Level};

use crate::completion::{compose_prompt, CompletionRequest};
use crate::core::{
    extract_code_blocks, Database, ExportFormat, FlowError, Item, NodeData, UploadedFile,
};
use crate::diagram::DiagramDatabase;

/// One user event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Replace the prompt text
    SetPrompt(String),
    /// Replace the name given to the next item
    SetPromptName(String),
    /// A file finished reading and joins the upload list
    FileUploaded { name: String, content: String },
    /// Drop one uploaded file
    RemoveUploadedFile { id: String },
    /// A completion request succeeded
    ItemCreated {
        name: Option<String>,
        completion: String,
    },
    /// Place an item on the diagram as a node
    PlaceItem { item_id: String },
    /// Connect two placed nodes
    Connect { source: String, target: String },
    /// Remove the most recent connection
    UndoConnection,
    /// Clear nodes, edges and items
    Reset,
    /// Choose the download extension
    SelectFormat(ExportFormat),
}

/// Everything the user is working on in one session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    input_text: String,
    prompt_name: String,
    diagram: DiagramDatabase,
    items: Vec<Item>,
    uploaded_files: Vec<UploadedFile>,
    selected_format: ExportFormat,
    /// Counter behind `item-<n>` ids and default `Prompt <n>` names; reset clears it
    next_id: usize,
    /// Counter behind `file-<n>` ids; survives reset since uploads do
    next_file_id: usize,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            input_text: String::new(),
            prompt_name: String::new(),
            diagram: DiagramDatabase::new(),
            items: Vec::new(),
            uploaded_files: Vec::new(),
            selected_format: ExportFormat::default(),
            next_id: 1,
            next_file_id: 1,
        }
    }
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input_text(&self) -> &str {
        &self.input_text
    }

    pub fn prompt_name(&self) -> &str {
        &self.prompt_name
    }

    pub fn diagram(&self) -> &DiagramDatabase {
        &self.diagram
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn uploaded_files(&self) -> &[UploadedFile] {
        &self.uploaded_files
    }

    pub fn selected_format(&self) -> ExportFormat {
        self.selected_format
    }

    pub fn get_item(&self, id: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Preview of the current diagram
    pub fn preview(&self) -> String {
        self.diagram.preview()
    }

    /// Capture the inputs for a "create item" request
    pub fn completion_request(&self) -> CompletionRequest {
        CompletionRequest {
            prompt: compose_prompt(&self.input_text, &self.uploaded_files),
            name: Some(self.prompt_name.clone()).filter(|name| !name.is_empty()),
        }
    }

    /// Apply an action, producing the next snapshot
    pub fn apply(&self, action: Action) -> Result<SessionState, FlowError> {
        reduce(self, action)
    }
}

/// The session reducer
///
/// Never mutates `state`; on error the caller keeps the old snapshot.
pub fn reduce(state: &SessionState, action: Action) -> Result<SessionState, FlowError> {
    let reduce_span = span!(Level::DEBUG, "reduce");
    let _enter = reduce_span.enter();
    trace!(?action, "Applying action");

    let mut next = state.clone();

    match action {
        Action::SetPrompt(text) => next.input_text = text,
        Action::SetPromptName(name) => next.prompt_name = name,
        Action::FileUploaded { name, content } => {
            let id = format!("file-{}", next.next_file_id);
            next.next_file_id += 1;
            debug!(file_id = %id, file_name = %name, content_len = content.len(), "File uploaded");
            next.uploaded_files.push(UploadedFile::new(id, name, content));
        }
        Action::RemoveUploadedFile { id } => {
            let before = next.uploaded_files.len();
            next.uploaded_files.retain(|file| file.id != id);
            if next.uploaded_files.len() == before {
                return Err(FlowError::unknown_file(id));
            }
        }
        Action::ItemCreated { name, completion } => {
            let id = format!("item-{}", next.next_id);
            if next.get_item(&id).is_some() {
                return Err(FlowError::duplicate_item(id));
            }
            let name = name
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| format!("Prompt {}", next.next_id));
            let blocks = extract_code_blocks(completion.trim());
            info!(item_id = %id, item_name = %name, block_count = blocks.len(), "Item created");

            next.items.push(Item::new(id, name, blocks.join("\n\n")));
            next.next_id += 1;
            next.input_text.clear();
            next.prompt_name.clear();
        }
        Action::PlaceItem { item_id } => {
            let item = next
                .get_item(&item_id)
                .ok_or_else(|| FlowError::unknown_item(item_id.as_str()))?;
            let node = NodeData::from(item);
            next.diagram.add_node(node)?;
        }
        Action::Connect { source, target } => {
            next.diagram.connect(&source, &target)?;
        }
        Action::UndoConnection => {
            next.diagram.pop_edge();
        }
        Action::Reset => {
            info!(
                node_count = next.diagram.node_count(),
                edge_count = next.diagram.edge_count(),
                item_count = next.items.len(),
                "Resetting diagram"
            );
            next.diagram.clear();
            next.items.clear();
            next.next_id = 1;
        }
        Action::SelectFormat(format) => next.selected_format = format,
    }

    Ok(next)
}
