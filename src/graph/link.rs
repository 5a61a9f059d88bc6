//! Link records
//!
//! A link is stored as an ordered pair `(x, y)` but the graph treats it as
//! undirected: both endpoints discover the link when traversing.

use super::types::NodeId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A bidirectional link between two nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// First endpoint
    pub x: NodeId,

    /// Second endpoint
    pub y: NodeId,
}

impl Link {
    pub fn new(x: NodeId, y: NodeId) -> Self {
        Link { x, y }
    }

    /// Both endpoints, in storage order
    pub fn endpoints(&self) -> [NodeId; 2] {
        [self.x, self.y]
    }

    /// Check if `node` is one of the endpoints
    pub fn touches(&self, node: NodeId) -> bool {
        self.x == node || self.y == node
    }

    /// The endpoint opposite to `node`
    ///
    /// A self-loop is its own opposite. Returns `None` when `node` is not an
    /// endpoint at all.
    pub fn other(&self, node: NodeId) -> Option<NodeId> {
        if self.x == node {
            Some(self.y)
        } else if self.y == node {
            Some(self.x)
        } else {
            None
        }
    }

    /// Check if this link connects two specific nodes (in either direction)
    pub fn connects(&self, node1: NodeId, node2: NodeId) -> bool {
        (self.x == node1 && self.y == node2) || (self.x == node2 && self.y == node1)
    }

    pub fn is_loop(&self) -> bool {
        self.x == self.y
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
