//! Run subcommand - animate a traversal with text narration.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;

use super::GraphSource;
use crate::animation::{FanoutRenderer, ImmediateScheduler, NarrationRenderer, Renderer, Scheduler};
use crate::config::Config;
use crate::export::{SvgExporter, SvgRenderer};
use crate::services::GraphExplorer;

/// Animate a breadth-first traversal of a graph.
#[derive(Parser)]
pub struct RunCommand {
    #[command(flatten)]
    pub source: GraphSource,

    /// Skip the pauses between steps
    #[arg(long)]
    pub instant: bool,

    /// Write the final canvas as SVG to this path
    #[arg(long)]
    pub svg: Option<PathBuf>,
}

impl RunCommand {
    /// Run the traversal animation.
    pub async fn run(self) -> color_eyre::Result<()> {
        let config = Config::load()?;

        if self.instant {
            self.animate(GraphExplorer::from_config_with_scheduler(&config, ImmediateScheduler))
                .await
        } else {
            self.animate(GraphExplorer::from_config(&config)).await
        }
    }

    async fn animate<S: Scheduler>(&self, mut explorer: GraphExplorer<S>) -> color_eyre::Result<()> {
        let (nodes, edges) = self.source.texts()?;
        explorer.submit(&nodes, &edges)?;

        let svg = self
            .svg
            .as_ref()
            .map(|_| Arc::new(SvgRenderer::new(SvgExporter::default(), explorer.canvas_height())));

        let mut renderer = FanoutRenderer::new().with(Arc::new(NarrationRenderer::new(std::io::stdout())));
        if let Some(svg) = &svg {
            renderer = renderer.with(svg.clone());
        }
        let renderer: Arc<dyn Renderer> = Arc::new(renderer);

        let animation = explorer.start_traversal(renderer)?;

        tokio::select! {
            result = animation.finished() => {
                let path = result?;
                tracing::debug!(?path, "traversal finished");
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Interrupted, resetting traversal");
                explorer.reset();
                return Ok(());
            }
        }

        if let (Some(path), Some(svg)) = (&self.svg, &svg) {
            std::fs::write(path, svg.svg())?;
            tracing::info!("Wrote final canvas to {}", path.display());
        }

        Ok(())
    }
}
