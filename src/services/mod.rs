//! Service layer.

mod explorer;

pub use explorer::GraphExplorer;
