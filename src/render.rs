//! Text rendering of graph objects for diagnostics
//!
//! Graph types render themselves through `Display`. The wrappers here render
//! collections of them so a whole traversal result fits on one log line:
//!
//! ```rust
//! use mute::graph::{Link, Node, NodeGraph};
//! use mute::render::List;
//!
//! let graph = NodeGraph::new();
//! let a = graph.insert_node(Node::new()).id();
//! let b = graph.insert_node(Node::new()).id();
//! graph.insert_link(Link::new(a, b)).unwrap();
//!
//! let neighbors = graph.lookup_node(a).unwrap().neighbors().unwrap();
//! assert_eq!(List(&neighbors).to_string(), "[<node 2>]");
//! ```

use std::fmt;

/// Renders a sequence as `[a, b, c]`
pub struct List<'a, T>(pub &'a [T]);

impl<T: fmt::Display> fmt::Display for List<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, item) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", item)?;
        }
        f.write_str("]")
    }
}

/// Renders key/value pairs as `{k: v, k: v}`
pub struct Map<'a, K, V>(pub &'a [(K, V)]);

impl<K: fmt::Display, V: fmt::Display> fmt::Display for Map<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (key, value)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}: {}", key, value)?;
        }
        f.write_str("}")
    }
}
