//! BFS traversal animation.
//!
//! ## Module Structure
//!
//! - `traversal` - Step-at-a-time BFS state machine and snapshots
//! - `scheduler` - Delay primitives between animation phases
//! - `render` - Renderer interface, node styles, narration renderer
//! - `animator` - Drives a traversal on a tokio task with cancellation

mod animator;
mod render;
mod scheduler;
mod traversal;

pub use animator::{Animation, AnimationTimings, BfsAnimator};
pub use render::{
    join_labels, EdgeStyle, FanoutRenderer, Frame, FramePhase, NarrationRenderer, NodeStyle, Renderer,
    StatePanels,
};
pub use scheduler::{ImmediateScheduler, Scheduler, TokioScheduler};
pub use traversal::{Expansion, Step, Traversal, TraversalSnapshot, TraversalState};
