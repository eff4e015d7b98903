//! Application error types.

use thiserror::Error;

/// Rejected node or edge input.
///
/// Raised before any graph state is touched, so the previously committed
/// graph is always left as it was.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Node input is invalid. Ensure all nodes have non-empty labels.")]
    EmptyLabel,

    #[error("Node input contains duplicate label '{label}'. Ensure all nodes have unique labels.")]
    DuplicateLabel { label: String },

    #[error("Invalid edge format: '{token}'. Edges should be formatted as 'from-to', separated by ';'.")]
    MalformedEdge { token: String },

    #[error("Invalid edge: '{token}'. Both endpoints must be numeric node indices.")]
    NonNumericEndpoint { token: String },

    #[error("Invalid edge: '{token}'. Node index {index} is out of range for {node_count} nodes.")]
    IndexOutOfRange {
        token: String,
        index: i64,
        node_count: usize,
    },
}

impl ValidationError {
    /// Stable machine-readable code for the error kind.
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::EmptyLabel => "EMPTY_LABEL",
            ValidationError::DuplicateLabel { .. } => "DUPLICATE_LABEL",
            ValidationError::MalformedEdge { .. } => "MALFORMED_EDGE",
            ValidationError::NonNumericEndpoint { .. } => "NON_NUMERIC_ENDPOINT",
            ValidationError::IndexOutOfRange { .. } => "INDEX_OUT_OF_RANGE",
        }
    }
}

/// Why an animation did not produce a final path.
#[derive(Error, Debug)]
pub enum AnimationError {
    #[error("Traversal was cancelled")]
    Cancelled,

    #[error("Traversal task aborted: {0}")]
    Aborted(String),
}

/// Application-level errors for graph-explorer.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Animation error: {0}")]
    Animation(#[from] AnimationError),

    #[error("Unknown predefined graph: {0}")]
    UnknownPreset(String),

    #[error("No graph loaded. Submit nodes and edges or load a predefined graph first.")]
    NoGraph,

    #[error("Start node {root} is out of range for {node_count} node(s)")]
    RootOutOfRange { root: usize, node_count: usize },

    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
