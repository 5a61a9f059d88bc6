//! Node records

use serde::{Deserialize, Serialize};
use std::fmt;

/// A node in the graph
///
/// The base record carries nothing beyond its identity, which lives in the
/// store as the map key. Layers built on top of the store attach payloads
/// by keeping their own data keyed by [`NodeId`](super::NodeId).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {}

impl Node {
    pub fn new() -> Self {
        Node {}
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<node>")
    }
}
