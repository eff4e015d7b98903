//! Domain models for the explored graph.

mod graph;
mod node;
mod preset;

pub use graph::GraphModel;
pub use node::{Edge, Node};
pub use preset::Preset;
