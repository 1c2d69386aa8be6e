//! Core type definitions for the flow diagram
//!
//! This module contains the fundamental types used throughout Codeflow:
//! nodes, edges, generated items, uploaded files and export formats.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::FlowError;

/// File extensions accepted as prompt uploads
pub const ACCEPTED_UPLOAD_EXTENSIONS: &[&str] = &[".txt", ".js", ".py", ".html", ".css", ".json"];

/// Returns true if `name` ends with one of [`ACCEPTED_UPLOAD_EXTENSIONS`]
pub fn is_accepted_upload(name: &str) -> bool {
    let lower = name.to_lowercase();
    ACCEPTED_UPLOAD_EXTENSIONS
        .iter()
        .any(|ext| lower.ends_with(ext))
}

/// Extension used for the downloaded flow file
///
/// Controls nothing but the file name; the content is always the preview text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
pub enum ExportFormat {
    /// `.java`
    #[serde(rename = ".java")]
    Java,
    /// `.py`
    #[default]
    #[serde(rename = ".py")]
    Python,
    /// `.js`
    #[serde(rename = ".js")]
    JavaScript,
    /// `.jsx`
    #[serde(rename = ".jsx")]
    Jsx,
    /// `.ts`
    #[serde(rename = ".ts")]
    TypeScript,
    /// `.tsx`
    #[serde(rename = ".tsx")]
    Tsx,
    /// `.cpp`
    #[serde(rename = ".cpp")]
    Cpp,
    /// `.c`
    #[serde(rename = ".c")]
    C,
}

impl ExportFormat {
    /// All formats, in the order they are offered to the user
    pub fn all() -> &'static [ExportFormat] {
        &[
            ExportFormat::Java,
            ExportFormat::Python,
            ExportFormat::JavaScript,
            ExportFormat::Jsx,
            ExportFormat::TypeScript,
            ExportFormat::Tsx,
            ExportFormat::Cpp,
            ExportFormat::C,
        ]
    }

    /// The extension including the leading dot
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Java => ".java",
            ExportFormat::Python => ".py",
            ExportFormat::JavaScript => ".js",
            ExportFormat::Jsx => ".jsx",
            ExportFormat::TypeScript => ".ts",
            ExportFormat::Tsx => ".tsx",
            ExportFormat::Cpp => ".cpp",
            ExportFormat::C => ".c",
        }
    }

    /// Human readable language name
    pub fn language(&self) -> &'static str {
        match self {
            ExportFormat::Java => "Java",
            ExportFormat::Python => "Python",
            ExportFormat::JavaScript => "JavaScript",
            ExportFormat::Jsx => "JavaScript (JSX)",
            ExportFormat::TypeScript => "TypeScript",
            ExportFormat::Tsx => "TypeScript (TSX)",
            ExportFormat::Cpp => "C++",
            ExportFormat::C => "C",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = FlowError;

    /// Accepts the extension with or without its leading dot, case-insensitively
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let normalized = trimmed.trim_start_matches('.').to_lowercase();
        ExportFormat::all()
            .iter()
            .copied()
            .find(|format| &format.extension()[1..] == normalized.as_str())
            .ok_or_else(|| FlowError::unsupported_format(trimmed))
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// A node placed on the diagram
///
/// Serialized with `fullText` so documents written by browser hosts load as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeData {
    /// Unique identifier for the node (the placed item's id)
    pub id: String,
    /// Display label
    pub label: String,
    /// Payload written to the preview
    pub full_text: String,
}

impl NodeData {
    /// Create a new node
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        full_text: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            full_text: full_text.into(),
        }
    }
}

impl From<&Item> for NodeData {
    fn from(item: &Item) -> Self {
        Self::new(item.id.clone(), item.name.clone(), item.text.clone())
    }
}

/// A connection between two nodes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeData {
    /// Edge identifier
    pub id: String,
    /// Source node ID
    pub source: String,
    /// Target node ID
    pub target: String,
}

impl EdgeData {
    /// Create a new edge with the conventional `edge-<source>-<target>` id
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        let source = source.into();
        let target = target.into();
        Self {
            id: Self::id_for(&source, &target),
            source,
            target,
        }
    }

    /// Create a new edge with an explicit id
    pub fn with_id(
        id: impl Into<String>,
        source: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
        }
    }

    /// The id [`EdgeData::new`] assigns for a source/target pair
    pub fn id_for(source: &str, target: &str) -> String {
        format!("edge-{}-{}", source, target)
    }

    /// Returns true if `node_id` is this edge's source or target
    pub fn touches(&self, node_id: &str) -> bool {
        self.source == node_id || self.target == node_id
    }

    /// Returns true if the edge starts and ends on the same node
    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }
}

/// A named bundle of extracted code fragments waiting to be placed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub name: String,
    pub text: String,
}

impl Item {
    pub fn new(id: impl Into<String>, name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            text: text.into(),
        }
    }
}

/// Raw text content merged into the next completion request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedFile {
    pub id: String,
    pub name: String,
    pub content: String,
}

impl UploadedFile {
    pub fn new(id: impl Into<String>, name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            content: content.into(),
        }
    }
}
