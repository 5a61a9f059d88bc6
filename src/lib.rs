//! Mute node graph
//!
//! A graph of nodes joined by bidirectional links, addressed through typed
//! handles and accessed through proxies that validate themselves against
//! the live graph before every use.
//!
//! # Guarantees
//!
//! - No stored link refers to a node that is not in the graph. Link insertion
//!   checks both endpoints; erasing a node erases its links.
//! - Handles are never reused. Each handle type has a high-water mark that
//!   only moves forward, including past explicitly chosen handles.
//! - A proxy to an erased node or link reports `ProxyExpired` instead of
//!   returning stale data.
//!
//! ## Example Usage
//!
//! ```rust
//! use mute::graph::{ErrorKind, Link, Node, NodeGraph, NodeId};
//!
//! let graph = NodeGraph::new();
//!
//! // Create nodes 1, 2 and 3
//! for id in 1..=3 {
//!     graph.insert_node_at(Node::new(), NodeId::new(id)).unwrap();
//! }
//! let [n1, n2, n3] = [1, 2, 3].map(|id| NodeId::new(id).unwrap());
//!
//! // Link them into a path
//! graph.insert_link(Link::new(n1, n2)).unwrap();
//! graph.insert_link(Link::new(n2, n3)).unwrap();
//!
//! let middle = graph.lookup_node(n2).unwrap();
//! assert_eq!(middle.links().unwrap().len(), 2);
//! assert_eq!(middle.neighbors().unwrap().len(), 2);
//!
//! // Proxies expire with their node
//! let first = graph.lookup_node(n1).unwrap();
//! graph.erase_node(n1);
//! assert_eq!(first.links().unwrap_err().kind(), ErrorKind::ProxyExpired);
//! ```

#![warn(clippy::all)]

pub mod graph;
pub mod protocol;
pub mod render;

// Re-export main types for convenience
pub use graph::{
    ErrorKind, GraphConfig, GraphError, GraphResult, Link, LinkId, LinkProxy, Node, NodeGraph,
    NodeId, NodeProxy, SharedGraph,
};

pub use protocol::MessageKind;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}
