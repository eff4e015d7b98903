//! Explorer session: the current graph, its layout, and the animator.

use std::sync::Arc;

use crate::animation::{Animation, BfsAnimator, Renderer, Scheduler, TokioScheduler};
use crate::config::Config;
use crate::error::{AppError, ValidationError};
use crate::layout::{self, LayoutReport, LayoutSettings};
use crate::models::{GraphModel, Preset};

/// One user's session with the explorer.
///
/// Every submission replaces the graph wholesale. A rejected submission
/// leaves the previous graph and layout exactly as they were.
pub struct GraphExplorer<S: Scheduler = TokioScheduler> {
    layout: LayoutSettings,
    animator: BfsAnimator<S>,
    graph: Option<Arc<GraphModel>>,
    report: Option<LayoutReport>,
}

impl GraphExplorer<TokioScheduler> {
    /// Session on real timers, configured from `config`.
    pub fn from_config(config: &Config) -> Self {
        Self::from_config_with_scheduler(config, TokioScheduler)
    }
}

impl<S: Scheduler> GraphExplorer<S> {
    /// Session configured from `config`, pausing through `scheduler`.
    pub fn from_config_with_scheduler(config: &Config, scheduler: S) -> Self {
        let animator = BfsAnimator::with_scheduler(
            scheduler,
            config.animation.timings(),
            config.traversal.expansion,
        )
        .with_root(config.traversal.root);
        Self::with_animator(config.layout.settings(), animator)
    }

    pub fn with_animator(layout: LayoutSettings, animator: BfsAnimator<S>) -> Self {
        Self {
            layout,
            animator,
            graph: None,
            report: None,
        }
    }

    /// Predefined graphs available to [`load_preset`](Self::load_preset).
    pub fn presets() -> &'static [Preset] {
        Preset::all()
    }

    pub fn graph(&self) -> Option<&GraphModel> {
        self.graph.as_deref()
    }

    pub fn layout_report(&self) -> Option<&LayoutReport> {
        self.report.as_ref()
    }

    /// Canvas height for the current layout, or the minimum with no graph.
    pub fn canvas_height(&self) -> f64 {
        self.report
            .as_ref()
            .map(|r| r.canvas_height)
            .unwrap_or(self.layout.min_canvas_height)
    }

    pub fn is_animating(&self) -> bool {
        self.animator.is_active()
    }

    /// Replace the graph with one of the predefined graphs.
    pub fn load_preset(&mut self, name: &str) -> Result<&GraphModel, AppError> {
        let preset = Preset::find(name).ok_or_else(|| AppError::UnknownPreset(name.to_string()))?;
        tracing::info!("Loading predefined graph '{}'", preset.name);
        Ok(self.submit(preset.nodes, preset.edges)?)
    }

    /// Validate, lay out and commit a new graph.
    ///
    /// Any running animation is cancelled once the new graph is committed.
    pub fn submit(
        &mut self,
        nodes_text: &str,
        edges_text: &str,
    ) -> Result<&GraphModel, ValidationError> {
        let mut graph = GraphModel::parse(nodes_text, edges_text).map_err(|e| {
            tracing::warn!(code = e.code(), "Rejected graph input: {}", e);
            e
        })?;

        let report = layout::apply_layout(&mut graph, &self.layout);
        tracing::info!(
            nodes = graph.node_count(),
            edges = graph.edges.len(),
            levels = report.levels.map.len(),
            canvas_height = report.canvas_height,
            "Committed graph"
        );

        self.animator.cancel();
        self.report = Some(report);
        let committed: &GraphModel = self.graph.insert(Arc::new(graph));
        Ok(committed)
    }

    /// Lay the current graph out again and animate a traversal of it.
    ///
    /// Cancels any traversal that is still running.
    pub fn start_traversal(&mut self, renderer: Arc<dyn Renderer>) -> Result<Animation, AppError> {
        let graph = match self.graph.as_mut() {
            Some(graph) if !graph.is_empty() => graph,
            _ => return Err(AppError::NoGraph),
        };
        let root = self.animator.root();
        if root >= graph.node_count() {
            return Err(AppError::RootOutOfRange {
                root,
                node_count: graph.node_count(),
            });
        }

        // Positions stay fixed for the animation; a still-running previous
        // animation keeps its own copy.
        self.report = Some(layout::apply_layout(Arc::make_mut(graph), &self.layout));

        Ok(self.animator.start(Arc::clone(graph), renderer))
    }

    /// Cancel any running traversal and clear its rendering.
    pub fn reset(&mut self) {
        self.animator.cancel();
    }
}
