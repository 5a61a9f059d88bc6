//! Proxies for accessing nodes and links
//!
//! A proxy is a store reference plus a handle. It owns nothing and does not
//! keep the entity alive. Every data-bearing method checks that the handle
//! is still live before touching the record and reports
//! [`GraphError::NodeExpired`] / [`GraphError::LinkExpired`] otherwise.
//!
//! Once the entity is erased a proxy stays expired: the store retires the
//! handle, so neither automatic allocation nor explicit insertion can bind
//! it to a new record.

use super::link::Link;
use super::node::Node;
use super::store::{GraphError, GraphResult, NodeGraph};
use super::types::{LinkId, NodeId};
use std::fmt;

/// Proxy for accessing a node
#[derive(Clone, Copy)]
pub struct NodeProxy<'g> {
    graph: &'g NodeGraph,
    id: NodeId,
}

impl<'g> NodeProxy<'g> {
    pub(crate) fn new(graph: &'g NodeGraph, id: NodeId) -> Self {
        NodeProxy { graph, id }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Check if the node is still in the graph
    pub fn is_live(&self) -> bool {
        self.graph.contains_node(self.id)
    }

    fn check(&self) -> GraphResult<()> {
        if self.is_live() {
            Ok(())
        } else {
            Err(GraphError::NodeExpired(self.id))
        }
    }

    /// Copy of the node record
    pub fn node(&self) -> GraphResult<Node> {
        self.graph
            .node_record(self.id)
            .ok_or(GraphError::NodeExpired(self.id))
    }

    /// Links with this node as either endpoint, in link insertion order
    pub fn links(&self) -> GraphResult<Vec<LinkProxy<'g>>> {
        let ids = self
            .graph
            .incident_links(self.id)
            .ok_or(GraphError::NodeExpired(self.id))?;

        Ok(ids
            .into_iter()
            .map(|id| LinkProxy::new(self.graph, id))
            .collect())
    }

    /// Nodes on the far side of each incident link
    ///
    /// One entry per link: parallel links yield the same neighbor more than
    /// once, and a self-loop yields this node exactly once.
    pub fn neighbors(&self) -> GraphResult<Vec<NodeProxy<'g>>> {
        let ids = self
            .graph
            .neighbor_ids(self.id)
            .ok_or(GraphError::NodeExpired(self.id))?;

        Ok(ids
            .into_iter()
            .map(|id| NodeProxy::new(self.graph, id))
            .collect())
    }

    /// Number of incident links
    pub fn degree(&self) -> GraphResult<usize> {
        self.check()?;
        Ok(self.graph.incident_links(self.id).map_or(0, |ids| ids.len()))
    }
}

impl PartialEq for NodeProxy<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.graph, other.graph) && self.id == other.id
    }
}

impl Eq for NodeProxy<'_> {}

impl fmt::Debug for NodeProxy<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeProxy").field("id", &self.id).finish()
    }
}

impl fmt::Display for NodeProxy<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<node {}>", self.id)
    }
}

/// Proxy for accessing a link
#[derive(Clone, Copy)]
pub struct LinkProxy<'g> {
    graph: &'g NodeGraph,
    id: LinkId,
}

impl<'g> LinkProxy<'g> {
    pub(crate) fn new(graph: &'g NodeGraph, id: LinkId) -> Self {
        LinkProxy { graph, id }
    }

    pub fn id(&self) -> LinkId {
        self.id
    }

    /// Check if the link is still in the graph
    pub fn is_live(&self) -> bool {
        self.graph.contains_link(self.id)
    }

    /// Copy of the link record
    pub fn link(&self) -> GraphResult<Link> {
        self.graph
            .link_record(self.id)
            .ok_or(GraphError::LinkExpired(self.id))
    }

    /// Node at the `x` end
    pub fn a(&self) -> GraphResult<NodeProxy<'g>> {
        let link = self.link()?;
        Ok(NodeProxy::new(self.graph, link.x))
    }

    /// Node at the `y` end
    pub fn b(&self) -> GraphResult<NodeProxy<'g>> {
        let link = self.link()?;
        Ok(NodeProxy::new(self.graph, link.y))
    }

    pub fn endpoints(&self) -> GraphResult<(NodeProxy<'g>, NodeProxy<'g>)> {
        let link = self.link()?;
        Ok((
            NodeProxy::new(self.graph, link.x),
            NodeProxy::new(self.graph, link.y),
        ))
    }

    /// The endpoint opposite to `node`, `None` if `node` is not an endpoint
    pub fn other(&self, node: NodeId) -> GraphResult<Option<NodeProxy<'g>>> {
        let link = self.link()?;
        Ok(link.other(node).map(|id| NodeProxy::new(self.graph, id)))
    }
}

impl PartialEq for LinkProxy<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.graph, other.graph) && self.id == other.id
    }
}

impl Eq for LinkProxy<'_> {}

impl fmt::Debug for LinkProxy<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LinkProxy").field("id", &self.id).finish()
    }
}

impl fmt::Display for LinkProxy<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.endpoints() {
            Ok((a, b)) => write!(f, "<link {} {} {}>", self.id, a, b),
            Err(_) => write!(f, "<link {} expired>", self.id),
        }
    }
}
