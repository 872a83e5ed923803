//! Input tree types.
//!
//! The input tree is the single source of truth for a diagram. It arrives
//! already parsed from the session collaborator (or as JSON) and is never
//! mutated by the engine; every layout pass projects it from scratch.

mod node;

pub use node::{InputNode, NodeId};
