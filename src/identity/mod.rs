mod graph;
mod load;
mod parse;

#[cfg(test)]
pub(crate) use graph::fixtures;
pub use graph::{EdgeKind, IdentityEdge, IdentityNode, IdentitySnapshot, Origin};
pub use load::load_snapshot;
