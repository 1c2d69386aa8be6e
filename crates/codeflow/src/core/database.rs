//! Core database trait for diagram data storage
//!
//! This trait defines the interface for storing and managing diagram data.

use super::FlowError;

/// Core trait for diagram databases
///
/// A database owns nodes and edges for one diagram. Implementations keep
/// insertion order, since preview ordering falls back to it on ties.
pub trait Database: Send + Sync {
    /// The node data type for this database
    type Node: Clone + Send + Sync;

    /// The edge data type for this database
    type Edge: Clone + Send + Sync;

    /// Add a node to the database
    fn add_node(&mut self, node: Self::Node) -> Result<(), FlowError>;

    /// Add an edge to the database
    ///
    /// Returns `Ok(false)` when an identical connection already exists and
    /// nothing was added.
    fn add_edge(&mut self, edge: Self::Edge) -> Result<bool, FlowError>;

    /// Remove and return the most recently added edge
    fn pop_edge(&mut self) -> Option<Self::Edge>;

    /// Get a node by ID
    fn get_node(&self, id: &str) -> Option<&Self::Node>;

    /// Iterate over all nodes
    fn nodes(&self) -> impl Iterator<Item = &Self::Node>;

    /// Iterate over all edges
    fn edges(&self) -> impl Iterator<Item = &Self::Edge>;

    /// Clear all data from the database
    fn clear(&mut self);

    /// Get the number of nodes
    fn node_count(&self) -> usize;

    /// Get the number of edges
    fn edge_count(&self) -> usize;
}
