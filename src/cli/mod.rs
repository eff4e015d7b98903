//! CLI module for graph-explorer.
//!
//! Subcommands:
//! - `layout`: Validate a graph and print its BFS level layout
//! - `run`: Animate a BFS traversal with narration
//! - `presets`: List the predefined graphs

mod layout;
mod presets;
mod run;

use clap::{Args, Parser, Subcommand};

use crate::error::AppError;
use crate::models::Preset;

pub use layout::LayoutCommand;
pub use run::RunCommand;

/// graph-explorer - breadth-first search explorer
#[derive(Parser)]
#[command(name = "graph-explorer")]
#[command(about = "Lay out a graph by BFS level and animate a breadth-first traversal")]
#[command(version)]
pub struct App {
    /// Run in verbose mode
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Validate a graph and print its level layout
    Layout(LayoutCommand),

    /// Animate a breadth-first traversal
    Run(RunCommand),

    /// List the predefined graphs
    Presets,
}

impl App {
    /// Run the CLI application.
    pub async fn run(self) -> color_eyre::Result<()> {
        match self.command {
            Command::Layout(cmd) => cmd.run(),
            Command::Run(cmd) => cmd.run().await,
            Command::Presets => presets::run_presets(),
        }
    }
}

/// Where the graph comes from: typed text or a predefined graph.
#[derive(Args, Debug, Clone)]
pub struct GraphSource {
    /// Comma-separated node labels, e.g. "A,B,C"
    #[arg(long, requires = "edges", conflicts_with = "preset")]
    pub nodes: Option<String>,

    /// Edges as from-to index pairs joined by ';', e.g. "0-1;1-2"
    #[arg(long, requires = "nodes", conflicts_with = "preset")]
    pub edges: Option<String>,

    /// Name of a predefined graph (see `presets`)
    #[arg(long, short)]
    pub preset: Option<String>,
}

impl GraphSource {
    /// Node and edge text to submit.
    pub fn texts(&self) -> Result<(String, String), AppError> {
        if let Some(name) = &self.preset {
            let preset = Preset::find(name).ok_or_else(|| AppError::UnknownPreset(name.clone()))?;
            return Ok((preset.nodes.to_string(), preset.edges.to_string()));
        }
        match (&self.nodes, &self.edges) {
            (Some(nodes), Some(edges)) => Ok((nodes.clone(), edges.clone())),
            _ => Err(AppError::NoGraph),
        }
    }
}
