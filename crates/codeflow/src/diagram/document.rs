//! JSON diagram documents
//!
//! A document is `{ "nodes": [...], "edges": [...] }`. Nodes are accepted
//! either flat (`{ id, label, fullText }`) or in the canvas shape browser
//! hosts produce (`{ id, data: { label, fullText }, position, ... }`).
//! Edge ids are optional on input.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{generate_preview, DiagramDatabase};
use crate::core::{Database, EdgeData, FlowError, NodeData};

/// Nodes and edges exactly as they appear in a document
///
/// No invariants are enforced here; the preview is defined for any
/// collection. Use [`DiagramDocument::into_database`] to validate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagramDocument {
    #[serde(default, deserialize_with = "deserialize_nodes")]
    pub nodes: Vec<NodeData>,
    #[serde(default, deserialize_with = "deserialize_edges")]
    pub edges: Vec<EdgeData>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NodeRepr {
    Canvas { id: String, data: CanvasData },
    Flat(NodeData),
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CanvasData {
    #[serde(default)]
    label: String,
    #[serde(default)]
    full_text: String,
}

#[derive(Deserialize)]
struct EdgeRepr {
    #[serde(default)]
    id: Option<String>,
    source: String,
    target: String,
}

fn deserialize_nodes<'de, D>(deserializer: D) -> Result<Vec<NodeData>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Vec::<NodeRepr>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .map(|repr| match repr {
            NodeRepr::Canvas { id, data } => NodeData::new(id, data.label, data.full_text),
            NodeRepr::Flat(node) => node,
        })
        .collect())
}

fn deserialize_edges<'de, D>(deserializer: D) -> Result<Vec<EdgeData>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Vec::<EdgeRepr>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .map(|repr| match repr.id {
            Some(id) => EdgeData::with_id(id, repr.source, repr.target),
            None => EdgeData::new(repr.source, repr.target),
        })
        .collect())
}

impl DiagramDocument {
    pub fn new(nodes: Vec<NodeData>, edges: Vec<EdgeData>) -> Self {
        Self { nodes, edges }
    }

    /// Parse a document from JSON text
    pub fn from_json(input: &str) -> Result<Self, FlowError> {
        let document: DiagramDocument = serde_json::from_str(input)
            .map_err(|e| FlowError::invalid_document(e.to_string()))?;
        debug!(
            node_count = document.nodes.len(),
            edge_count = document.edges.len(),
            "Parsed diagram document"
        );
        Ok(document)
    }

    /// Serialize the document as pretty-printed JSON
    pub fn to_json(&self) -> Result<String, FlowError> {
        serde_json::to_string_pretty(self).map_err(|e| FlowError::invalid_document(e.to_string()))
    }

    /// Snapshot a database into a document
    pub fn from_database(database: &DiagramDatabase) -> Self {
        Self::new(
            database.nodes().cloned().collect(),
            database.edges().cloned().collect(),
        )
    }

    /// Load the document into a database, enforcing node and edge invariants
    pub fn into_database(self) -> Result<DiagramDatabase, FlowError> {
        let mut database = DiagramDatabase::new();
        for node in self.nodes {
            database.add_node(node)?;
        }
        for edge in self.edges {
            database.add_edge(edge)?;
        }
        Ok(database)
    }

    /// Preview text for the document as written
    pub fn preview(&self) -> String {
        generate_preview(&self.nodes, &self.edges)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_document() {
        let doc = DiagramDocument::from_json(
            r#"{
                "nodes": [
                    {"id": "item-1", "label": "One", "fullText": "print(1)"},
                    {"id": "item-2", "label": "Two", "fullText": "print(2)"}
                ],
                "edges": [{"id": "e1", "source": "item-1", "target": "item-2"}]
            }"#,
        )
        .unwrap();
        assert_eq!(doc.nodes.len(), 2);
        assert_eq!(doc.edges[0].id, "e1");
        assert_eq!(doc.preview(), "print(1)\n\n---\n\nprint(2)");
    }

    #[test]
    fn test_canvas_document() {
        let doc = DiagramDocument::from_json(
            r#"{
                "nodes": [
                    {"id": "item-1", "type": "default", "position": {"x": 10, "y": 20},
                     "data": {"label": "One", "fullText": "a"}}
                ],
                "edges": [{"source": "item-1", "target": "item-1"}]
            }"#,
        )
        .unwrap();
        assert_eq!(doc.nodes[0], NodeData::new("item-1", "One", "a"));
        assert_eq!(doc.edges[0].id, "edge-item-1-item-1");
        assert_eq!(doc.preview(), "a");
    }

    #[test]
    fn test_missing_collections_default_to_empty() {
        let doc = DiagramDocument::from_json("{}").unwrap();
        assert!(doc.nodes.is_empty());
        assert!(doc.edges.is_empty());
        assert_eq!(doc.preview(), "");
    }

    #[test]
    fn test_invalid_json() {
        let result = DiagramDocument::from_json("{ not json");
        assert!(matches!(result, Err(FlowError::InvalidDocument { .. })));
    }

    #[test]
    fn test_into_database_validates_edges() {
        let doc = DiagramDocument::new(
            vec![NodeData::new("a", "A", "")],
            vec![EdgeData::new("a", "b")],
        );
        assert!(matches!(
            doc.into_database(),
            Err(FlowError::UnknownNode { .. })
        ));
    }

    #[test]
    fn test_json_roundtrip_through_database() {
        let mut db = DiagramDatabase::new();
        db.add_node(NodeData::new("a", "A", "x")).unwrap();
        db.add_node(NodeData::new("b", "B", "y")).unwrap();
        db.connect("a", "b").unwrap();

        let json = DiagramDocument::from_database(&db).to_json().unwrap();
        let restored = DiagramDocument::from_json(&json)
            .unwrap()
            .into_database()
            .unwrap();
        assert_eq!(restored, db);
    }
}
