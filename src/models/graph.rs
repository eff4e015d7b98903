//! The graph model: nodes with positions plus an ordered edge list.

use serde::{Deserialize, Serialize};

use super::{Edge, Node};
use crate::error::ValidationError;
use crate::parser::{parse_edges, parse_nodes};

/// Nodes and edges of the graph being explored.
///
/// Always built whole from text input; there is no incremental editing.
/// Edge endpoints are guaranteed to index into `nodes` and labels are unique.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphModel {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl GraphModel {
    /// Parse and validate node and edge text together.
    ///
    /// Nothing is produced unless both inputs are valid.
    pub fn parse(nodes_text: &str, edges_text: &str) -> Result<Self, ValidationError> {
        let nodes = parse_nodes(nodes_text)?;
        let edges = parse_edges(edges_text, nodes.len())?;
        Ok(Self { nodes, edges })
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Label of the node at `index`, if it exists.
    pub fn label(&self, index: usize) -> Option<&str> {
        self.nodes.get(index).map(|n| n.label.as_str())
    }

    /// Labels for a sequence of node indices, skipping unknown indices.
    pub fn labels<'a>(&'a self, indices: &'a [usize]) -> impl Iterator<Item = &'a str> + 'a {
        indices.iter().filter_map(move |&i| self.label(i))
    }

    /// Neighbors of `node` in edge order, treating every edge as undirected.
    pub fn undirected_neighbors(&self, node: usize) -> impl Iterator<Item = usize> + '_ {
        self.edges.iter().filter_map(move |e| e.other_end(node))
    }

    /// Targets of edges whose origin is `node`, in edge order.
    pub fn outgoing_neighbors(&self, node: usize) -> impl Iterator<Item = usize> + '_ {
        self.edges.iter().filter_map(move |e| e.target_from(node))
    }
}
