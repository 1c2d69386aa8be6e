//! Preview linearization
//!
//! Flattens the connected part of a diagram into one text blob:
//! nodes without edges are dropped, the rest are ordered by degree
//! (highest first, ties in collection order) and their payloads are
//! joined with a `---` rule.

use std::collections::HashMap;
use tracing::{debug, span, trace, Level};

use crate::core::{EdgeData, NodeData};

/// Separator placed between consecutive payloads in the preview
pub const PREVIEW_SEPARATOR: &str = "\n\n---\n\n";

/// Count, for every node id mentioned by an edge, the edges touching it
///
/// A self-loop contributes one to its node.
pub fn degrees(edges: &[EdgeData]) -> HashMap<&str, usize> {
    let mut degrees: HashMap<&str, usize> = HashMap::new();
    for edge in edges {
        *degrees.entry(edge.source.as_str()).or_default() += 1;
        if !edge.is_self_loop() {
            *degrees.entry(edge.target.as_str()).or_default() += 1;
        }
    }
    degrees
}

/// Order the connected nodes for the preview
///
/// Returns borrowed nodes with degree >= 1, sorted by degree descending.
/// The sort is stable, so equal degrees keep their order in `nodes`.
pub fn linearize<'a>(nodes: &'a [NodeData], edges: &[EdgeData]) -> Vec<&'a NodeData> {
    let degrees = degrees(edges);

    let mut ranked: Vec<(&NodeData, usize)> = nodes
        .iter()
        .filter_map(|node| {
            degrees
                .get(node.id.as_str())
                .map(|&degree| (node, degree))
        })
        .collect();

    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    for (node, degree) in &ranked {
        trace!(node_id = %node.id, degree, "Ranked node");
    }

    ranked.into_iter().map(|(node, _)| node).collect()
}

/// Produce the preview text for a diagram
///
/// # Example
/// ```
/// use codeflow::{generate_preview, EdgeData, NodeData};
///
/// let nodes = vec![
///     NodeData::new("a", "A", "first"),
///     NodeData::new("b", "B", "second"),
///     NodeData::new("c", "C", "unused"),
/// ];
/// let edges = vec![EdgeData::new("a", "b")];
/// assert_eq!(generate_preview(&nodes, &edges), "first\n\n---\n\nsecond");
/// assert_eq!(generate_preview(&[], &[]), "");
/// ```
pub fn generate_preview(nodes: &[NodeData], edges: &[EdgeData]) -> String {
    let preview_span = span!(
        Level::DEBUG,
        "generate_preview",
        node_count = nodes.len(),
        edge_count = edges.len()
    );
    let _enter = preview_span.enter();

    let ordered = linearize(nodes, edges);
    debug!(connected = ordered.len(), "Linearized diagram");

    ordered
        .iter()
        .map(|node| node.full_text.as_str())
        .collect::<Vec<_>>()
        .join(PREVIEW_SEPARATOR)
}
