//! Diagram database implementation
//!
//! Stores placed nodes and the connections drawn between them. Both
//! collections keep insertion order, which the preview uses as its
//! tie-break.

use std::collections::HashSet;
use tracing::{debug, trace};

use crate::core::{Database, EdgeData, FlowError, NodeData};

/// Diagram database
///
/// Node ids are unique. Edge endpoints must name existing nodes when the
/// edge is added.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiagramDatabase {
    /// Nodes in insertion order
    nodes: Vec<NodeData>,
    /// Edges in insertion order
    edges: Vec<EdgeData>,
    /// Node IDs present in `nodes`
    node_ids: HashSet<String>,
}

impl DiagramDatabase {
    /// Create a new empty database
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a node exists
    pub fn has_node(&self, id: &str) -> bool {
        self.node_ids.contains(id)
    }

    /// Nodes as a slice, in insertion order
    pub fn node_slice(&self) -> &[NodeData] {
        &self.nodes
    }

    /// Edges as a slice, in insertion order
    pub fn edge_slice(&self) -> &[EdgeData] {
        &self.edges
    }

    /// Number of edges touching `node_id`; a self-loop counts once
    pub fn degree(&self, node_id: &str) -> usize {
        self.edges.iter().filter(|e| e.touches(node_id)).count()
    }

    /// Returns true if a connection from `source` to `target` already exists
    pub fn has_connection(&self, source: &str, target: &str) -> bool {
        self.edges
            .iter()
            .any(|e| e.source == source && e.target == target)
    }

    /// Connect two existing nodes with a conventionally named edge
    pub fn connect(&mut self, source: &str, target: &str) -> Result<bool, FlowError> {
        self.add_edge(EdgeData::new(source, target))
    }

    /// Render the linearized preview of this diagram
    pub fn preview(&self) -> String {
        super::generate_preview(&self.nodes, &self.edges)
    }
}

impl Database for DiagramDatabase {
    type Node = NodeData;
    type Edge = EdgeData;

    fn add_node(&mut self, node: NodeData) -> Result<(), FlowError> {
        trace!(node_id = %node.id, node_label = %node.label, "Adding node to database");
        if self.node_ids.contains(&node.id) {
            return Err(FlowError::duplicate_node(node.id));
        }
        self.node_ids.insert(node.id.clone());
        self.nodes.push(node);
        debug!(node_count = self.node_count(), "Node added");
        Ok(())
    }

    fn add_edge(&mut self, edge: EdgeData) -> Result<bool, FlowError> {
        trace!(
            edge_id = %edge.id,
            edge_source = %edge.source,
            edge_target = %edge.target,
            "Adding edge to database"
        );
        for endpoint in [&edge.source, &edge.target] {
            if !self.has_node(endpoint) {
                return Err(FlowError::unknown_node(endpoint.as_str()));
            }
        }
        if self.has_connection(&edge.source, &edge.target) {
            debug!(edge_id = %edge.id, "Connection already exists, ignoring");
            return Ok(false);
        }
        self.edges.push(edge);
        debug!(edge_count = self.edge_count(), "Edge added");
        Ok(true)
    }

    fn pop_edge(&mut self) -> Option<EdgeData> {
        let edge = self.edges.pop();
        if let Some(ref removed) = edge {
            debug!(edge_id = %removed.id, edge_count = self.edge_count(), "Edge removed");
        }
        edge
    }

    fn get_node(&self, id: &str) -> Option<&NodeData> {
        self.nodes.iter().find(|n| n.id == id)
    }

    fn nodes(&self) -> impl Iterator<Item = &NodeData> {
        self.nodes.iter()
    }

    fn edges(&self) -> impl Iterator<Item = &EdgeData> {
        self.edges.iter()
    }

    fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
        self.node_ids.clear();
    }

    fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn edge_count(&self) -> usize {
        self.edges.len()
    }
}
