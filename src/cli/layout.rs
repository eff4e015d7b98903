//! Layout subcommand - validate a graph and print its BFS levels.

use clap::Parser;
use serde::Serialize;

use super::GraphSource;
use crate::animation::join_labels;
use crate::config::Config;
use crate::layout::LayoutReport;
use crate::models::GraphModel;
use crate::services::GraphExplorer;

/// Print the level layout of a graph.
#[derive(Parser)]
pub struct LayoutCommand {
    #[command(flatten)]
    pub source: GraphSource,

    /// Print the graph and layout as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct LayoutOutput<'a> {
    graph: &'a GraphModel,
    layout: &'a LayoutReport,
}

impl LayoutCommand {
    /// Run the layout command.
    pub fn run(self) -> color_eyre::Result<()> {
        let config = Config::load()?;
        let (nodes, edges) = self.source.texts()?;

        let mut explorer = GraphExplorer::from_config(&config);
        explorer.submit(&nodes, &edges)?;

        let (Some(graph), Some(report)) = (explorer.graph(), explorer.layout_report()) else {
            return Err(color_eyre::eyre::eyre!("layout produced no graph"));
        };

        if self.json {
            let output = LayoutOutput {
                graph,
                layout: report,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
            return Ok(());
        }

        for (level, members) in &report.levels.map {
            println!("Level {}: {}", level, join_labels(graph, members, ", "));
        }
        for node in &graph.nodes {
            println!("{}\t({}, {})", node.label, node.x, node.y);
        }
        println!("Canvas height: {}", report.canvas_height);

        Ok(())
    }
}
