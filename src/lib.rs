//! graph-explorer - breadth-first search explorer
//!
//! Parses a graph from text, lays it out by BFS level, and animates a
//! breadth-first traversal step by step through a pluggable renderer.

pub mod animation;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod layout;
pub mod models;
pub mod parser;
pub mod services;

pub use animation::{BfsAnimator, Renderer};
pub use error::{AppError, ValidationError};
pub use models::{Edge, GraphModel, Node};
pub use services::GraphExplorer;
