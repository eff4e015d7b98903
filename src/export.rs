//! SVG export of the graph canvas.

use std::fmt::Write;
use std::sync::{Mutex, PoisonError};

use crate::animation::{EdgeStyle, Frame, NodeStyle, Renderer};
use crate::models::GraphModel;

/// Canvas drawing parameters.
#[derive(Debug, Clone)]
pub struct SvgExporter {
    /// Canvas width; grows to fit nodes placed further right.
    pub min_width: f64,
    pub node_radius: f64,
    /// Radius of the ring drawn around a node with a self-loop.
    pub self_loop_radius: f64,
    /// Stroke width of the final path overlay.
    pub path_stroke_width: f64,
    pub font_size: f64,
}

impl Default for SvgExporter {
    fn default() -> Self {
        Self {
            min_width: 600.0,
            node_radius: 20.0,
            self_loop_radius: 30.0,
            path_stroke_width: 3.0,
            font_size: 12.0,
        }
    }
}

const FINAL_PATH_COLOR: &str = "orange";
const SELF_LOOP_COLOR: &str = "green";

fn fill_for(style: NodeStyle) -> &'static str {
    match style {
        NodeStyle::Processing => "yellow",
        NodeStyle::Queued => "blue",
        NodeStyle::Processed => "red",
        NodeStyle::Idle => "white",
        NodeStyle::FinalPath => FINAL_PATH_COLOR,
    }
}

impl SvgExporter {
    /// Export the graph with per-node styles and an optional path overlay.
    ///
    /// `styles` is indexed by node; missing entries render as idle.
    pub fn export(
        &self,
        graph: &GraphModel,
        canvas_height: f64,
        styles: &[NodeStyle],
        final_path: &[usize],
    ) -> String {
        let width = graph
            .nodes
            .iter()
            .map(|n| n.x + self.self_loop_radius + self.node_radius)
            .fold(self.min_width, f64::max);

        let mut out = String::with_capacity(256 + graph.node_count() * 160);

        let _ = write!(
            out,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" \
             width=\"{width}\" height=\"{canvas_height}\" \
             viewBox=\"0 0 {width} {canvas_height}\">"
        );
        let _ = write!(
            out,
            "<rect width=\"100%\" height=\"100%\" fill=\"white\"/>\
             <g font-family=\"sans-serif\" font-size=\"{}\">",
            self.font_size
        );

        for edge in &graph.edges {
            let (Some(from), Some(to)) = (graph.nodes.get(edge.from), graph.nodes.get(edge.to))
            else {
                continue;
            };
            match EdgeStyle::of(edge) {
                EdgeStyle::Normal => {
                    let _ = write!(
                        out,
                        "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"black\"/>",
                        from.x, from.y, to.x, to.y
                    );
                }
                EdgeStyle::SelfLoop => {
                    let _ = write!(
                        out,
                        "<circle cx=\"{}\" cy=\"{}\" r=\"{}\" fill=\"none\" stroke=\"{SELF_LOOP_COLOR}\"/>",
                        from.x, from.y, self.self_loop_radius
                    );
                }
            }
        }

        for pair in final_path.windows(2) {
            let (Some(from), Some(to)) = (graph.nodes.get(pair[0]), graph.nodes.get(pair[1]))
            else {
                continue;
            };
            let _ = write!(
                out,
                "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"{FINAL_PATH_COLOR}\" stroke-width=\"{}\"/>",
                from.x, from.y, to.x, to.y, self.path_stroke_width
            );
        }

        for (index, node) in graph.nodes.iter().enumerate() {
            let style = if final_path.contains(&index) {
                NodeStyle::FinalPath
            } else {
                styles.get(index).copied().unwrap_or(NodeStyle::Idle)
            };
            let stroke_width = if style == NodeStyle::FinalPath {
                self.path_stroke_width
            } else {
                1.0
            };
            let _ = write!(
                out,
                "<circle cx=\"{}\" cy=\"{}\" r=\"{}\" fill=\"{}\" stroke=\"black\" stroke-width=\"{stroke_width}\"/>",
                node.x,
                node.y,
                self.node_radius,
                fill_for(style)
            );
            let _ = write!(
                out,
                "<text x=\"{}\" y=\"{}\" fill=\"black\">",
                node.x - 5.0,
                node.y + 5.0
            );
            svg_escape_into(&mut out, &node.label);
            out.push_str("</text>");
        }

        out.push_str("</g></svg>");
        out
    }

    /// Export one animation frame.
    pub fn export_frame(&self, frame: &Frame<'_>, canvas_height: f64) -> String {
        self.export(frame.graph, canvas_height, &frame.node_styles(), &[])
    }
}

/// SVG-escape a string into the output buffer.
fn svg_escape_into(out: &mut String, s: &str) {
    for c in s.chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            _ => out.push(c),
        }
    }
}

#[derive(Default)]
struct Canvas {
    svg: String,
    styles: Vec<NodeStyle>,
}

/// Keeps the most recent frame as an SVG document.
pub struct SvgRenderer {
    exporter: SvgExporter,
    canvas_height: f64,
    canvas: Mutex<Canvas>,
}

impl SvgRenderer {
    pub fn new(exporter: SvgExporter, canvas_height: f64) -> Self {
        Self {
            exporter,
            canvas_height,
            canvas: Mutex::new(Canvas::default()),
        }
    }

    /// The latest rendered SVG; empty after a clear.
    pub fn svg(&self) -> String {
        self.canvas
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .svg
            .clone()
    }
}

impl Renderer for SvgRenderer {
    fn render(&self, frame: &Frame<'_>) {
        let styles = frame.node_styles();
        let svg = self
            .exporter
            .export(frame.graph, self.canvas_height, &styles, &[]);
        let mut canvas = self.canvas.lock().unwrap_or_else(PoisonError::into_inner);
        canvas.svg = svg;
        canvas.styles = styles;
    }

    fn highlight_path(&self, graph: &GraphModel, path: &[usize]) {
        let mut canvas = self.canvas.lock().unwrap_or_else(PoisonError::into_inner);
        canvas.svg = self
            .exporter
            .export(graph, self.canvas_height, &canvas.styles, path);
    }

    fn clear(&self) {
        *self.canvas.lock().unwrap_or_else(PoisonError::into_inner) = Canvas::default();
    }
}
