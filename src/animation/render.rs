//! Rendering interface and the text narration renderer.

use std::io::Write;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::Serialize;

use super::traversal::TraversalSnapshot;
use crate::models::{Edge, GraphModel, Node};

/// Which moment of the traversal a frame shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FramePhase {
    /// Root queued, nothing processed yet.
    Started,
    /// A node was dequeued and is highlighted.
    Processing,
    /// The highlighted node was committed and its neighbors queued.
    Expanded,
}

/// Everything a renderer needs to draw one state of the traversal.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub graph: &'a GraphModel,
    pub snapshot: &'a TraversalSnapshot,
    pub phase: FramePhase,
}

/// Fill state of a node, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeStyle {
    Processing,
    Queued,
    Processed,
    Idle,
    /// Part of the highlighted final path.
    FinalPath,
}

/// Stroke kind of an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeStyle {
    Normal,
    SelfLoop,
}

impl EdgeStyle {
    pub fn of(edge: &Edge) -> Self {
        if edge.is_self_loop() {
            EdgeStyle::SelfLoop
        } else {
            EdgeStyle::Normal
        }
    }
}

impl<'a> Frame<'a> {
    pub fn nodes(&self) -> &'a [Node] {
        &self.graph.nodes
    }

    pub fn edges(&self) -> &'a [Edge] {
        &self.graph.edges
    }

    pub fn node_style(&self, node: usize) -> NodeStyle {
        if self.snapshot.processing == Some(node) {
            NodeStyle::Processing
        } else if self.snapshot.is_queued(node) {
            NodeStyle::Queued
        } else if self.snapshot.is_processed(node) {
            NodeStyle::Processed
        } else {
            NodeStyle::Idle
        }
    }

    /// Styles for every node, by index.
    pub fn node_styles(&self) -> Vec<NodeStyle> {
        (0..self.graph.node_count())
            .map(|i| self.node_style(i))
            .collect()
    }
}

/// Receives traversal frames.
///
/// Called synchronously from the animation task. Implementations only get
/// shared references and cannot influence the traversal.
pub trait Renderer: Send + Sync {
    /// Draw one state of the traversal.
    fn render(&self, frame: &Frame<'_>);

    /// Draw the finished traversal path on top of the graph.
    fn highlight_path(&self, graph: &GraphModel, path: &[usize]);

    /// Remove everything drawn for the current traversal.
    fn clear(&self);
}

/// Forwards every call to each inner renderer in order.
#[derive(Default, Clone)]
pub struct FanoutRenderer {
    renderers: Vec<Arc<dyn Renderer>>,
}

impl FanoutRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, renderer: Arc<dyn Renderer>) -> Self {
        self.renderers.push(renderer);
        self
    }
}

impl Renderer for FanoutRenderer {
    fn render(&self, frame: &Frame<'_>) {
        for renderer in &self.renderers {
            renderer.render(frame);
        }
    }

    fn highlight_path(&self, graph: &GraphModel, path: &[usize]) {
        for renderer in &self.renderers {
            renderer.highlight_path(graph, path);
        }
    }

    fn clear(&self) {
        for renderer in &self.renderers {
            renderer.clear();
        }
    }
}

/// The four text panels shown next to the canvas.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatePanels {
    pub queue: String,
    pub processing: String,
    pub processed: String,
    pub path: String,
}

impl StatePanels {
    pub fn from_snapshot(graph: &GraphModel, snapshot: &TraversalSnapshot) -> Self {
        Self {
            queue: join_labels(graph, &snapshot.queue, " => "),
            processing: snapshot
                .processing
                .and_then(|n| graph.label(n))
                .unwrap_or_default()
                .to_string(),
            processed: join_labels(graph, &snapshot.processed, ", "),
            path: join_labels(graph, &snapshot.path, " => "),
        }
    }
}

/// Labels of `nodes` joined by `sep`.
pub fn join_labels(graph: &GraphModel, nodes: &[usize], sep: &str) -> String {
    graph.labels(nodes).collect::<Vec<_>>().join(sep)
}

/// Writes a line-oriented narration of the traversal to `W`.
pub struct NarrationRenderer<W> {
    out: Mutex<W>,
}

impl<W: Write + Send> NarrationRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    /// Access the underlying writer.
    pub fn writer(&self) -> MutexGuard<'_, W> {
        self.out.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_lines(&self, lines: &[String]) {
        let mut out = self.writer();
        for line in lines {
            if let Err(e) = writeln!(out, "{line}") {
                tracing::warn!("narration write failed: {}", e);
                return;
            }
        }
        let _ = out.flush();
    }
}

impl<W: Write + Send> Renderer for NarrationRenderer<W> {
    fn render(&self, frame: &Frame<'_>) {
        let graph = frame.graph;
        let snapshot = frame.snapshot;
        let panels = StatePanels::from_snapshot(graph, snapshot);

        let lines = match frame.phase {
            FramePhase::Started => vec![
                format!(
                    "Start Node: {}",
                    snapshot
                        .queue
                        .first()
                        .and_then(|&n| graph.label(n))
                        .unwrap_or_default()
                ),
                format!("Queue: {}", panels.queue),
            ],
            FramePhase::Processing => vec![
                format!("Processing: {}", panels.processing),
                format!("Path: {}", panels.path),
            ],
            FramePhase::Expanded => {
                let visited = snapshot
                    .processed
                    .last()
                    .and_then(|&n| graph.label(n))
                    .unwrap_or_default();
                vec![
                    format!("Visited: {visited}"),
                    format!("Processed: {}", panels.processed),
                    format!("Queue: {}", panels.queue),
                ]
            }
        };

        self.write_lines(&lines);
    }

    fn highlight_path(&self, graph: &GraphModel, path: &[usize]) {
        self.write_lines(&[
            format!("Path: {}", join_labels(graph, path, " => ")),
            "Completed traversal".to_string(),
        ]);
    }

    fn clear(&self) {
        self.write_lines(&["Traversal reset".to_string()]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph() -> GraphModel {
        GraphModel::parse("A,B,C,D", "0-1;2-2").unwrap()
    }

    fn snapshot() -> TraversalSnapshot {
        TraversalSnapshot {
            queue: vec![2, 3],
            processing: Some(1),
            processed: vec![0],
            path: vec![0, 1],
        }
    }

    #[test]
    fn test_node_style_priority() {
        let g = graph();
        let s = snapshot();
        let frame = Frame {
            graph: &g,
            snapshot: &s,
            phase: FramePhase::Processing,
        };
        assert_eq!(
            frame.node_styles(),
            vec![
                NodeStyle::Processed,
                NodeStyle::Processing,
                NodeStyle::Queued,
                NodeStyle::Queued,
            ]
        );
    }

    #[test]
    fn test_edge_style() {
        let g = graph();
        let styles: Vec<_> = g.edges.iter().map(EdgeStyle::of).collect();
        assert_eq!(styles, vec![EdgeStyle::Normal, EdgeStyle::SelfLoop]);
    }

    #[test]
    fn test_state_panels() {
        let panels = StatePanels::from_snapshot(&graph(), &snapshot());
        assert_eq!(panels.queue, "C => D");
        assert_eq!(panels.processing, "B");
        assert_eq!(panels.processed, "A");
        assert_eq!(panels.path, "A => B");
    }

    #[test]
    fn test_state_panels_empty_snapshot() {
        let panels = StatePanels::from_snapshot(&graph(), &TraversalSnapshot::default());
        assert_eq!(panels, StatePanels::default());
    }

    #[test]
    fn test_narration_lines() {
        let g = graph();
        let renderer = NarrationRenderer::new(Vec::new());
        let s = TraversalSnapshot {
            queue: vec![1],
            processing: None,
            processed: vec![0],
            path: vec![0],
        };
        renderer.render(&Frame {
            graph: &g,
            snapshot: &s,
            phase: FramePhase::Expanded,
        });
        renderer.highlight_path(&g, &[0, 1]);

        let text = String::from_utf8(renderer.writer().clone()).unwrap();
        assert_eq!(
            text,
            "Visited: A\nProcessed: A\nQueue: B\nPath: A => B\nCompleted traversal\n"
        );
    }

    #[test]
    fn test_fanout_forwards_to_all() {
        let g = graph();
        let first = Arc::new(NarrationRenderer::new(Vec::new()));
        let second = Arc::new(NarrationRenderer::new(Vec::new()));
        let fanout = FanoutRenderer::new().with(first.clone()).with(second.clone());

        fanout.clear();
        fanout.highlight_path(&g, &[0]);

        for renderer in [first, second] {
            let text = String::from_utf8(renderer.writer().clone()).unwrap();
            assert_eq!(text, "Traversal reset\nPath: A\nCompleted traversal\n");
        }
    }
}
