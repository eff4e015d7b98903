//! Node and edge models.

use serde::{Deserialize, Serialize};

/// A labelled vertex with a 2D canvas position.
///
/// A node's index in [`GraphModel::nodes`](super::GraphModel) is its identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Unique, non-empty label.
    pub label: String,
    /// Horizontal canvas position.
    pub x: f64,
    /// Vertical canvas position.
    pub y: f64,
}

impl Node {
    /// Creates a node at its placeholder grid slot.
    ///
    /// Slots fill rows of five, 100 units apart, starting at (100, 100).
    /// Layout replaces these positions for every node reachable from the root.
    pub fn at_grid_slot(label: impl Into<String>, index: usize) -> Self {
        Self {
            label: label.into(),
            x: 100.0 + 100.0 * (index % 5) as f64,
            y: 100.0 + 100.0 * (index / 5) as f64,
        }
    }
}

/// An edge between two node indices, kept in input order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub from: usize,
    pub to: usize,
}

impl Edge {
    pub fn new(from: usize, to: usize) -> Self {
        Self { from, to }
    }

    /// Whether both endpoints are the same node.
    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }

    /// The endpoint opposite `node`, treating the edge as undirected.
    pub fn other_end(&self, node: usize) -> Option<usize> {
        if self.from == node {
            Some(self.to)
        } else if self.to == node {
            Some(self.from)
        } else {
            None
        }
    }

    /// The target if `node` is the origin side of this edge.
    pub fn target_from(&self, node: usize) -> Option<usize> {
        (self.from == node).then_some(self.to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_slot_wraps_after_five() {
        let first = Node::at_grid_slot("A", 0);
        assert_eq!((first.x, first.y), (100.0, 100.0));

        let fifth = Node::at_grid_slot("E", 4);
        assert_eq!((fifth.x, fifth.y), (500.0, 100.0));

        let sixth = Node::at_grid_slot("F", 5);
        assert_eq!((sixth.x, sixth.y), (100.0, 200.0));
    }

    #[test]
    fn test_other_end() {
        let edge = Edge::new(1, 3);
        assert_eq!(edge.other_end(1), Some(3));
        assert_eq!(edge.other_end(3), Some(1));
        assert_eq!(edge.other_end(2), None);
    }

    #[test]
    fn test_target_from_is_origin_side_only() {
        let edge = Edge::new(1, 3);
        assert_eq!(edge.target_from(1), Some(3));
        assert_eq!(edge.target_from(3), None);
    }

    #[test]
    fn test_self_loop() {
        assert!(Edge::new(2, 2).is_self_loop());
        assert!(!Edge::new(2, 0).is_self_loop());
        assert_eq!(Edge::new(2, 2).other_end(2), Some(2));
    }
}
