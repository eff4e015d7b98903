//! BFS traversal as a step-at-a-time state machine.
//!
//! Each call to [`Traversal::step`] performs one visible phase of the
//! traversal and returns a fresh [`TraversalSnapshot`]. Timing lives in the
//! animator; this module has no notion of time.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::models::GraphModel;

/// Which edges a dequeued node may expand along.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expansion {
    /// Only from an edge's `from` side to its `to` side.
    #[default]
    OriginOnly,
    /// Along either side, the same way layout discovers levels.
    Undirected,
}

/// Queue / processing / processed / path at one point of the traversal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TraversalSnapshot {
    /// Discovered nodes waiting to be processed, front first.
    pub queue: Vec<usize>,
    /// Node currently highlighted as being processed.
    pub processing: Option<usize>,
    /// Processed nodes in processing order.
    pub processed: Vec<usize>,
    /// Nodes in the order they were dequeued for processing.
    pub path: Vec<usize>,
}

impl TraversalSnapshot {
    pub fn is_queued(&self, node: usize) -> bool {
        self.queue.contains(&node)
    }

    pub fn is_processed(&self, node: usize) -> bool {
        self.processed.contains(&node)
    }

    /// Already queued, processing or processed.
    fn is_discovered(&self, node: usize) -> bool {
        self.processing == Some(node) || self.is_queued(node) || self.is_processed(node)
    }
}

/// Lifecycle of a traversal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TraversalState {
    #[default]
    Idle,
    Stepping(TraversalSnapshot),
    Completed { final_path: Vec<usize> },
}

/// One visible phase of the traversal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// A node was dequeued and is now highlighted.
    Processing(TraversalSnapshot),
    /// The highlighted node was committed and its neighbors queued.
    Expanded(TraversalSnapshot),
    /// The queue ran dry. Carries the processed nodes in order.
    Completed(Vec<usize>),
}

/// Breadth-first traversal advanced one phase at a time.
#[derive(Debug, Clone)]
pub struct Traversal {
    root: usize,
    expansion: Expansion,
    state: TraversalState,
}

impl Traversal {
    /// Create an idle traversal rooted at `root`.
    ///
    /// `root` must index into the graph later passed to [`step`](Self::step).
    pub fn new(root: usize, expansion: Expansion) -> Self {
        Self {
            root,
            expansion,
            state: TraversalState::Idle,
        }
    }

    pub fn root(&self) -> usize {
        self.root
    }

    pub fn state(&self) -> &TraversalState {
        &self.state
    }

    pub fn is_completed(&self) -> bool {
        matches!(self.state, TraversalState::Completed { .. })
    }

    /// Advance one phase. Returns `None` once completed.
    pub fn step(&mut self, graph: &GraphModel) -> Option<Step> {
        let current = match std::mem::take(&mut self.state) {
            TraversalState::Idle => TraversalSnapshot {
                queue: vec![self.root],
                ..Default::default()
            },
            TraversalState::Stepping(snapshot) => snapshot,
            done @ TraversalState::Completed { .. } => {
                self.state = done;
                return None;
            }
        };

        let step = match current.processing {
            Some(node) => self.expand(graph, current, node),
            None => self.dequeue(current),
        };

        self.state = match &step {
            Step::Processing(snapshot) | Step::Expanded(snapshot) => {
                TraversalState::Stepping(snapshot.clone())
            }
            Step::Completed(final_path) => TraversalState::Completed {
                final_path: final_path.clone(),
            },
        };

        Some(step)
    }

    /// Run to completion without pauses and return the final path.
    pub fn run_to_end(&mut self, graph: &GraphModel) -> Vec<usize> {
        while let Some(step) = self.step(graph) {
            if let Step::Completed(path) = step {
                return path;
            }
        }
        match &self.state {
            TraversalState::Completed { final_path } => final_path.clone(),
            _ => Vec::new(),
        }
    }

    fn dequeue(&self, current: TraversalSnapshot) -> Step {
        let mut queue: VecDeque<usize> = current.queue.into();
        let mut path = current.path;

        // Skip anything processed since it was queued
        while let Some(node) = queue.pop_front() {
            if current.processed.contains(&node) {
                tracing::trace!(node, "skipping already processed node");
                continue;
            }
            path.push(node);
            return Step::Processing(TraversalSnapshot {
                queue: queue.into(),
                processing: Some(node),
                processed: current.processed,
                path,
            });
        }

        Step::Completed(current.processed)
    }

    fn expand(&self, graph: &GraphModel, current: TraversalSnapshot, node: usize) -> Step {
        let mut next = TraversalSnapshot {
            queue: current.queue,
            processing: None,
            processed: current.processed,
            path: current.path,
        };
        next.processed.push(node);

        let neighbors: Vec<usize> = match self.expansion {
            Expansion::OriginOnly => graph.outgoing_neighbors(node).collect(),
            Expansion::Undirected => graph.undirected_neighbors(node).collect(),
        };
        for neighbor in neighbors {
            if !next.is_discovered(neighbor) {
                next.queue.push(neighbor);
            }
        }

        Step::Expanded(next)
    }
}
