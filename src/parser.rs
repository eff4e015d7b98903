//! Parsing and validation of user-entered node and edge text.
//!
//! Nodes are comma-separated labels (`A, B, C`). Edges are `from-to` index
//! pairs joined by `;` (`0-1;1-2`). Both parsers are all-or-nothing: the
//! first bad entry aborts with a [`ValidationError`] and nothing is returned.

use std::collections::HashSet;

use crate::error::ValidationError;
use crate::models::{Edge, Node};

/// Parse comma-separated node labels.
///
/// Labels are trimmed and must be non-empty and unique. Each node gets its
/// placeholder grid position until layout runs.
pub fn parse_nodes(text: &str) -> Result<Vec<Node>, ValidationError> {
    let labels: Vec<&str> = text.trim().split(',').map(str::trim).collect();

    if labels.iter().any(|label| label.is_empty()) {
        return Err(ValidationError::EmptyLabel);
    }

    let mut seen = HashSet::with_capacity(labels.len());
    for label in &labels {
        if !seen.insert(*label) {
            return Err(ValidationError::DuplicateLabel {
                label: label.to_string(),
            });
        }
    }

    Ok(labels
        .into_iter()
        .enumerate()
        .map(|(i, label)| Node::at_grid_slot(label, i))
        .collect())
}

/// Parse `;`-separated `from-to` edges against a graph of `node_count` nodes.
///
/// Blank input means "no edges". Otherwise every token must hold exactly two
/// integer endpoints in `[0, node_count)`.
pub fn parse_edges(text: &str, node_count: usize) -> Result<Vec<Edge>, ValidationError> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(Vec::new());
    }

    text.split(';')
        .map(|token| parse_edge(token.trim(), node_count))
        .collect()
}

fn parse_edge(token: &str, node_count: usize) -> Result<Edge, ValidationError> {
    let parts: Vec<&str> = token.split('-').collect();
    let [from, to] = parts.as_slice() else {
        return Err(ValidationError::MalformedEdge {
            token: token.to_string(),
        });
    };

    let from = parse_endpoint(from, token, node_count)?;
    let to = parse_endpoint(to, token, node_count)?;
    Ok(Edge::new(from, to))
}

fn parse_endpoint(part: &str, token: &str, node_count: usize) -> Result<usize, ValidationError> {
    let part = part.trim();
    let index: i64 = match part.parse() {
        Ok(index) => index,
        // Integers beyond i64 are still indices, just never valid ones.
        Err(_) if is_integer(part) => i64::MAX,
        Err(_) => {
            return Err(ValidationError::NonNumericEndpoint {
                token: token.to_string(),
            })
        }
    };

    usize::try_from(index)
        .ok()
        .filter(|&i| i < node_count)
        .ok_or_else(|| ValidationError::IndexOutOfRange {
            token: token.to_string(),
            index,
            node_count,
        })
}

fn is_integer(s: &str) -> bool {
    let digits = s.strip_prefix('+').unwrap_or(s);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}
