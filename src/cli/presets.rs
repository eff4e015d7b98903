//! Presets command handler.

use color_eyre::Result;

use crate::animation::TokioScheduler;
use crate::services::GraphExplorer;

/// Print every predefined graph.
pub fn run_presets() -> Result<()> {
    for preset in GraphExplorer::<TokioScheduler>::presets() {
        println!("{}\tnodes: {}\tedges: {}", preset.name, preset.nodes, preset.edges);
    }
    Ok(())
}
