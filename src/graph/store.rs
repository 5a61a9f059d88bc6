//! In-memory node graph storage
//!
//! The store is the sole owner of node and link records. Callers never hold
//! references into it; they hold proxies, which are a store reference plus
//! a handle and re-check the handle on every access.
//!
//! Records live behind a `RefCell` so that erasure can happen while proxies
//! (shared borrows of the store) are still around. Every method takes the
//! borrow for the duration of one check-and-dereference and releases it
//! before returning.

use super::alloc::IdAllocator;
use super::link::Link;
use super::node::Node;
use super::proxy::{LinkProxy, NodeProxy};
use super::types::{LinkId, NodeId};
use indexmap::{IndexMap, IndexSet};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur during graph operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("No node with id {0} exists")]
    NodeNotFound(NodeId),

    #[error("No link with id {0} exists")]
    LinkNotFound(LinkId),

    #[error("Link between node {x} and node {y} is to a non-existing node")]
    DanglingLink { x: NodeId, y: NodeId },

    #[error("A node with the id {0} already exists")]
    NodeAlreadyExists(NodeId),

    #[error("A link with the id {0} already exists")]
    LinkAlreadyExists(LinkId),

    #[error("Node with id {0} has been removed from the graph")]
    NodeExpired(NodeId),

    #[error("Link with id {0} has been removed from the graph")]
    LinkExpired(LinkId),
}

/// Logical error categories, independent of which entity was involved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A handle is absent from its mapping (lookup or link endpoint)
    KeyNotFound,
    /// An explicit handle is already in use
    KeyAlreadyExists,
    /// A proxy was used after its entity was erased
    ProxyExpired,
}

impl GraphError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GraphError::NodeNotFound(_)
            | GraphError::LinkNotFound(_)
            | GraphError::DanglingLink { .. } => ErrorKind::KeyNotFound,
            GraphError::NodeAlreadyExists(_) | GraphError::LinkAlreadyExists(_) => {
                ErrorKind::KeyAlreadyExists
            }
            GraphError::NodeExpired(_) | GraphError::LinkExpired(_) => ErrorKind::ProxyExpired,
        }
    }
}

pub type GraphResult<T> = Result<T, GraphError>;

/// Store configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Number of nodes to reserve space for up front
    pub node_capacity: usize,
    /// Number of links to reserve space for up front
    pub link_capacity: usize,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            node_capacity: 1024,
            link_capacity: 4096,
        }
    }
}

#[derive(Debug)]
struct Records {
    /// NodeId -> Node, in insertion order
    nodes: IndexMap<NodeId, Node>,

    /// LinkId -> Link, in insertion order
    links: IndexMap<LinkId, Link>,

    /// NodeId -> incident links, in link insertion order.
    /// Has an entry for every live node, possibly empty.
    adjacency: FxHashMap<NodeId, IndexSet<LinkId>>,

    top_node: IdAllocator<NodeId>,
    top_link: IdAllocator<LinkId>,

    /// Handles of erased records. They stay unusable so that a proxy to an
    /// erased entity never resolves again.
    retired_nodes: FxHashSet<NodeId>,
    retired_links: FxHashSet<LinkId>,
}

/// Graph container for nodes with links
///
/// Maintains referential integrity: no stored link ever refers to a node
/// that is not in the graph. Erasing a node cascades to its links.
#[derive(Debug)]
pub struct NodeGraph {
    records: RefCell<Records>,
}

impl NodeGraph {
    /// Create a new empty graph
    pub fn new() -> Self {
        Self::with_config(GraphConfig::default())
    }

    pub fn with_config(config: GraphConfig) -> Self {
        let mut adjacency = FxHashMap::default();
        adjacency.reserve(config.node_capacity);

        NodeGraph {
            records: RefCell::new(Records {
                nodes: IndexMap::with_capacity(config.node_capacity),
                links: IndexMap::with_capacity(config.link_capacity),
                adjacency,
                top_node: IdAllocator::new(),
                top_link: IdAllocator::new(),
                retired_nodes: FxHashSet::default(),
                retired_links: FxHashSet::default(),
            }),
        }
    }

    /// Node lookup
    pub fn lookup_node(&self, id: NodeId) -> GraphResult<NodeProxy<'_>> {
        if !self.contains_node(id) {
            return Err(GraphError::NodeNotFound(id));
        }
        Ok(NodeProxy::new(self, id))
    }

    /// Link lookup
    pub fn lookup_link(&self, id: LinkId) -> GraphResult<LinkProxy<'_>> {
        if !self.contains_link(id) {
            return Err(GraphError::LinkNotFound(id));
        }
        Ok(LinkProxy::new(self, id))
    }

    /// Insert a node under a freshly allocated id
    ///
    /// # Panics
    ///
    /// When the node id space is exhausted, see [`IdAllocator::allocate_next`].
    pub fn insert_node(&self, node: Node) -> NodeProxy<'_> {
        let mut guard = self.records.borrow_mut();
        let records = &mut *guard;

        let id = records.top_node.allocate_next();
        records.nodes.insert(id, node);
        records.adjacency.insert(id, IndexSet::new());
        drop(guard);

        debug!("Inserted node {}", id);
        NodeProxy::new(self, id)
    }

    /// Insert a node under `id`, or a fresh id when `id` is `None`
    ///
    /// An id is taken while its node is live and stays taken after the node
    /// is erased.
    pub fn insert_node_at(&self, node: Node, id: Option<NodeId>) -> GraphResult<NodeProxy<'_>> {
        let Some(id) = id else {
            return Ok(self.insert_node(node));
        };

        let mut guard = self.records.borrow_mut();
        let records = &mut *guard;

        if records.nodes.contains_key(&id) || records.retired_nodes.contains(&id) {
            debug!("Rejected node insertion: id {} is taken", id);
            return Err(GraphError::NodeAlreadyExists(id));
        }

        records.top_node.observe(id);
        records.nodes.insert(id, node);
        records.adjacency.insert(id, IndexSet::new());
        drop(guard);

        debug!("Inserted node {}", id);
        Ok(NodeProxy::new(self, id))
    }

    /// Insert a link under a freshly allocated id
    ///
    /// Fails without side effects if either endpoint is not in the graph.
    ///
    /// # Panics
    ///
    /// When the link id space is exhausted, see [`IdAllocator::allocate_next`].
    pub fn insert_link(&self, link: Link) -> GraphResult<LinkProxy<'_>> {
        let mut guard = self.records.borrow_mut();
        let records = &mut *guard;

        Self::check_endpoints(records, &link)?;

        let id = records.top_link.allocate_next();
        Self::store_link(records, id, link);
        drop(guard);

        debug!("Inserted link {} {}", id, link);
        Ok(LinkProxy::new(self, id))
    }

    /// Insert a link under `id`, or a fresh id when `id` is `None`
    ///
    /// Like node ids, link ids of erased links cannot be used again.
    pub fn insert_link_at(&self, link: Link, id: Option<LinkId>) -> GraphResult<LinkProxy<'_>> {
        let Some(id) = id else {
            return self.insert_link(link);
        };

        let mut guard = self.records.borrow_mut();
        let records = &mut *guard;

        Self::check_endpoints(records, &link)?;

        if records.links.contains_key(&id) || records.retired_links.contains(&id) {
            debug!("Rejected link insertion: id {} is taken", id);
            return Err(GraphError::LinkAlreadyExists(id));
        }

        records.top_link.observe(id);
        Self::store_link(records, id, link);
        drop(guard);

        debug!("Inserted link {} {}", id, link);
        Ok(LinkProxy::new(self, id))
    }

    /// Erase a node and all its incident links
    ///
    /// Returns the removed record, or `None` if no such node exists.
    pub fn erase_node(&self, id: NodeId) -> Option<Node> {
        let mut guard = self.records.borrow_mut();
        let records = &mut *guard;

        let node = records.nodes.shift_remove(&id)?;
        records.retired_nodes.insert(id);
        let incident = records.adjacency.remove(&id).unwrap_or_default();

        for link_id in &incident {
            let Some(link) = records.links.shift_remove(link_id) else {
                continue;
            };
            records.retired_links.insert(*link_id);
            if let Some(other) = link.other(id).filter(|&other| other != id) {
                if let Some(adj) = records.adjacency.get_mut(&other) {
                    adj.shift_remove(link_id);
                }
            }
        }
        drop(guard);

        debug!("Erased node {} with {} incident links", id, incident.len());
        Some(node)
    }

    /// Erase a link
    ///
    /// Returns the removed record, or `None` if no such link exists.
    pub fn erase_link(&self, id: LinkId) -> Option<Link> {
        let mut guard = self.records.borrow_mut();
        let records = &mut *guard;

        let link = records.links.shift_remove(&id)?;
        records.retired_links.insert(id);
        for endpoint in link.endpoints() {
            if let Some(adj) = records.adjacency.get_mut(&endpoint) {
                adj.shift_remove(&id);
            }
        }
        drop(guard);

        debug!("Erased link {}", id);
        Some(link)
    }

    /// Remove every node and link
    ///
    /// The high-water marks are kept and the cleared ids are retired, so ids
    /// used before clearing are never used again.
    pub fn clear(&self) {
        let mut guard = self.records.borrow_mut();
        let records = &mut *guard;

        records.retired_nodes.extend(records.nodes.drain(..).map(|(id, _)| id));
        records.retired_links.extend(records.links.drain(..).map(|(id, _)| id));
        records.adjacency.clear();
    }

    pub fn contains_node(&self, id: NodeId) -> bool {
        self.records.borrow().nodes.contains_key(&id)
    }

    pub fn contains_link(&self, id: LinkId) -> bool {
        self.records.borrow().links.contains_key(&id)
    }

    pub fn node_count(&self) -> usize {
        self.records.borrow().nodes.len()
    }

    pub fn link_count(&self) -> usize {
        self.records.borrow().links.len()
    }

    /// Live node ids, in insertion order
    pub fn node_ids(&self) -> Vec<NodeId> {
        self.records.borrow().nodes.keys().copied().collect()
    }

    /// Live link ids, in insertion order
    pub fn link_ids(&self) -> Vec<LinkId> {
        self.records.borrow().links.keys().copied().collect()
    }

    /// Proxies for every live node
    pub fn nodes(&self) -> Vec<NodeProxy<'_>> {
        self.node_ids()
            .into_iter()
            .map(|id| NodeProxy::new(self, id))
            .collect()
    }

    /// Proxies for every live link
    pub fn links(&self) -> Vec<LinkProxy<'_>> {
        self.link_ids()
            .into_iter()
            .map(|id| LinkProxy::new(self, id))
            .collect()
    }

    pub fn node_high_water(&self) -> Option<NodeId> {
        self.records.borrow().top_node.high_water()
    }

    pub fn link_high_water(&self) -> Option<LinkId> {
        self.records.borrow().top_link.high_water()
    }

    pub(crate) fn node_record(&self, id: NodeId) -> Option<Node> {
        self.records.borrow().nodes.get(&id).copied()
    }

    pub(crate) fn link_record(&self, id: LinkId) -> Option<Link> {
        self.records.borrow().links.get(&id).copied()
    }

    /// Links touching `id`, `None` if the node is gone
    pub(crate) fn incident_links(&self, id: NodeId) -> Option<Vec<LinkId>> {
        let records = self.records.borrow();
        records
            .adjacency
            .get(&id)
            .map(|adj| adj.iter().copied().collect())
    }

    /// Opposite endpoint of every link touching `id`, `None` if the node is gone
    pub(crate) fn neighbor_ids(&self, id: NodeId) -> Option<Vec<NodeId>> {
        let records = self.records.borrow();
        let adj = records.adjacency.get(&id)?;
        Some(
            adj.iter()
                .filter_map(|link_id| records.links.get(link_id))
                .filter_map(|link| link.other(id))
                .collect(),
        )
    }

    fn check_endpoints(records: &Records, link: &Link) -> GraphResult<()> {
        if !records.nodes.contains_key(&link.x) || !records.nodes.contains_key(&link.y) {
            debug!("Rejected dangling link ({}, {})", link.x, link.y);
            return Err(GraphError::DanglingLink {
                x: link.x,
                y: link.y,
            });
        }
        Ok(())
    }

    fn store_link(records: &mut Records, id: LinkId, link: Link) {
        records.links.insert(id, link);
        for endpoint in link.endpoints() {
            records.adjacency.entry(endpoint).or_default().insert(id);
        }
    }
}

impl Default for NodeGraph {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: u64) -> NodeId {
        NodeId::new(id).unwrap()
    }

    fn link(id: u64) -> LinkId {
        LinkId::new(id).unwrap()
    }

    #[test]
    fn test_insert_and_lookup_node() {
        let graph = NodeGraph::new();
        let id = graph.insert_node(Node::new()).id();

        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.lookup_node(id).unwrap().id(), id);
    }

    #[test]
    fn test_lookup_missing() {
        let graph = NodeGraph::new();
        assert_eq!(
            graph.lookup_node(node(5)).unwrap_err(),
            GraphError::NodeNotFound(node(5))
        );
        assert_eq!(
            graph.lookup_link(link(5)).unwrap_err(),
            GraphError::LinkNotFound(link(5))
        );
    }

    #[test]
    fn test_explicit_node_id_collision() {
        let graph = NodeGraph::new();
        graph.insert_node_at(Node::new(), Some(node(3))).unwrap();

        let err = graph.insert_node_at(Node::new(), Some(node(3))).unwrap_err();
        assert_eq!(err, GraphError::NodeAlreadyExists(node(3)));
        assert_eq!(err.kind(), ErrorKind::KeyAlreadyExists);
        assert_eq!(graph.node_count(), 1);
    }

    #[test]
    fn test_none_means_auto() {
        let graph = NodeGraph::new();
        let a = graph.insert_node_at(Node::new(), None).unwrap().id();
        let b = graph.insert_node_at(Node::new(), None).unwrap().id();
        assert_eq!(a, node(1));
        assert_eq!(b, node(2));
    }

    #[test]
    fn test_auto_allocation_skips_explicit_ids() {
        let graph = NodeGraph::new();
        for _ in 0..3 {
            graph.insert_node(Node::new());
        }
        graph.insert_node_at(Node::new(), Some(node(10))).unwrap();

        let next = graph.insert_node(Node::new()).id();
        assert_eq!(next, node(11));
        assert_eq!(graph.node_high_water(), Some(node(11)));
    }

    #[test]
    fn test_explicit_low_id_keeps_mark() {
        let graph = NodeGraph::new();
        graph.insert_node_at(Node::new(), Some(node(10))).unwrap();
        graph.insert_node_at(Node::new(), Some(node(2))).unwrap();
        assert_eq!(graph.insert_node(Node::new()).id(), node(11));
    }

    #[test]
    fn test_ids_not_reused_after_erase() {
        let graph = NodeGraph::new();
        let a = graph.insert_node(Node::new()).id();
        graph.erase_node(a);
        let b = graph.insert_node(Node::new()).id();
        assert_ne!(a, b);
        assert_eq!(b, node(2));
    }

    #[test]
    fn test_erased_ids_cannot_be_reinserted() {
        let graph = NodeGraph::new();
        let a = graph.insert_node(Node::new()).id();
        let b = graph.insert_node(Node::new()).id();
        let ab = graph.insert_link(Link::new(a, b)).unwrap().id();

        graph.erase_link(ab);
        assert_eq!(
            graph.insert_link_at(Link::new(a, b), Some(ab)).unwrap_err(),
            GraphError::LinkAlreadyExists(ab)
        );

        graph.erase_node(a);
        assert_eq!(
            graph.insert_node_at(Node::new(), Some(a)).unwrap_err(),
            GraphError::NodeAlreadyExists(a)
        );
        assert_eq!(graph.node_count(), 1);
    }

    #[test]
    fn test_cleared_ids_cannot_be_reinserted() {
        let graph = NodeGraph::new();
        let a = graph.insert_node(Node::new()).id();
        graph.clear();

        let err = graph.insert_node_at(Node::new(), Some(a)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::KeyAlreadyExists);
        assert_eq!(graph.node_count(), 0);
    }

    #[test]
    fn test_dangling_link_rejected() {
        let graph = NodeGraph::new();
        let a = graph.insert_node(Node::new()).id();

        let err = graph.insert_link(Link::new(a, node(99))).unwrap_err();
        assert_eq!(err, GraphError::DanglingLink { x: a, y: node(99) });
        assert_eq!(err.kind(), ErrorKind::KeyNotFound);
        assert_eq!(graph.link_count(), 0);
        // A failed insertion allocates nothing
        assert_eq!(graph.link_high_water(), None);
    }

    #[test]
    fn test_explicit_link_id_collision() {
        let graph = NodeGraph::new();
        let a = graph.insert_node(Node::new()).id();
        let b = graph.insert_node(Node::new()).id();
        graph.insert_link_at(Link::new(a, b), Some(link(7))).unwrap();

        let err = graph
            .insert_link_at(Link::new(b, a), Some(link(7)))
            .unwrap_err();
        assert_eq!(err, GraphError::LinkAlreadyExists(link(7)));
        assert_eq!(graph.link_record(link(7)), Some(Link::new(a, b)));
        assert_eq!(graph.insert_link(Link::new(a, b)).unwrap().id(), link(8));
    }

    #[test]
    fn test_dangling_checked_before_collision() {
        let graph = NodeGraph::new();
        let a = graph.insert_node(Node::new()).id();
        graph.insert_link_at(Link::new(a, a), Some(link(1))).unwrap();

        let err = graph
            .insert_link_at(Link::new(a, node(42)), Some(link(1)))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::KeyNotFound);
    }

    #[test]
    fn test_erase_node_cascades() {
        let graph = NodeGraph::new();
        let a = graph.insert_node(Node::new()).id();
        let b = graph.insert_node(Node::new()).id();
        let c = graph.insert_node(Node::new()).id();
        graph.insert_link(Link::new(a, b)).unwrap();
        let bc = graph.insert_link(Link::new(b, c)).unwrap().id();

        assert_eq!(graph.erase_node(a), Some(Node::new()));
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.link_ids(), vec![bc]);
        assert_eq!(graph.incident_links(b), Some(vec![bc]));
        assert_eq!(graph.incident_links(a), None);
    }

    #[test]
    fn test_erase_missing_is_noop() {
        let graph = NodeGraph::new();
        assert_eq!(graph.erase_node(node(1)), None);
        assert_eq!(graph.erase_link(link(1)), None);
    }

    #[test]
    fn test_erase_link_updates_adjacency() {
        let graph = NodeGraph::new();
        let a = graph.insert_node(Node::new()).id();
        let b = graph.insert_node(Node::new()).id();
        let ab = graph.insert_link(Link::new(a, b)).unwrap().id();

        assert_eq!(graph.erase_link(ab), Some(Link::new(a, b)));
        assert_eq!(graph.incident_links(a), Some(vec![]));
        assert_eq!(graph.incident_links(b), Some(vec![]));
        assert_eq!(graph.node_count(), 2);
    }

    #[test]
    fn test_erase_node_with_self_loop() {
        let graph = NodeGraph::new();
        let a = graph.insert_node(Node::new()).id();
        let b = graph.insert_node(Node::new()).id();
        graph.insert_link(Link::new(a, a)).unwrap();
        graph.insert_link(Link::new(a, b)).unwrap();

        graph.erase_node(a);
        assert_eq!(graph.link_count(), 0);
        assert_eq!(graph.incident_links(b), Some(vec![]));
    }

    #[test]
    fn test_insertion_order_preserved() {
        let graph = NodeGraph::new();
        graph.insert_node_at(Node::new(), Some(node(5))).unwrap();
        graph.insert_node_at(Node::new(), Some(node(2))).unwrap();
        graph.insert_node_at(Node::new(), Some(node(9))).unwrap();
        graph.erase_node(node(2));

        assert_eq!(graph.node_ids(), vec![node(5), node(9)]);
    }

    #[test]
    fn test_clear_keeps_high_water() {
        let graph = NodeGraph::new();
        let a = graph.insert_node(Node::new()).id();
        let b = graph.insert_node(Node::new()).id();
        graph.insert_link(Link::new(a, b)).unwrap();

        graph.clear();
        assert_eq!(graph.node_count(), 0);
        assert_eq!(graph.link_count(), 0);
        assert_eq!(graph.insert_node(Node::new()).id(), node(3));
    }

    #[test]
    fn test_with_config() {
        let graph = NodeGraph::with_config(GraphConfig {
            node_capacity: 4,
            link_capacity: 4,
        });
        for _ in 0..10 {
            graph.insert_node(Node::new());
        }
        assert_eq!(graph.node_count(), 10);
    }

    #[test]
    fn test_config_partial_deserialize() {
        let config: GraphConfig = serde_json::from_str(r#"{"node_capacity": 8}"#).unwrap();
        assert_eq!(config.node_capacity, 8);
        assert_eq!(config.link_capacity, GraphConfig::default().link_capacity);
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            GraphError::NodeNotFound(node(4)).to_string(),
            "No node with id 4 exists"
        );
        assert_eq!(
            GraphError::DanglingLink { x: node(1), y: node(99) }.to_string(),
            "Link between node 1 and node 99 is to a non-existing node"
        );
        assert_eq!(
            GraphError::LinkExpired(link(2)).to_string(),
            "Link with id 2 has been removed from the graph"
        );
    }
}
