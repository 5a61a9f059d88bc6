//! Core node graph implementation
//!
//! This module implements the handle-addressed graph model:
//! - Typed node and link handles with forward-only allocation
//! - Bidirectional links that may only join nodes present in the graph
//! - Proxies that re-validate their handle on every access

pub mod alloc;
pub mod link;
pub mod node;
pub mod proxy;
pub mod shared;
pub mod store;
pub mod types;

// Re-export main types
pub use alloc::IdAllocator;
pub use link::Link;
pub use node::Node;
pub use proxy::{LinkProxy, NodeProxy};
pub use shared::SharedGraph;
pub use store::{ErrorKind, GraphConfig, GraphError, GraphResult, NodeGraph};
pub use types::{Handle, InvalidHandle, LinkId, NodeId};
