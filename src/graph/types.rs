//! Handle types for the node graph
//!
//! Nodes and links are addressed by opaque integer handles. The two handle
//! types are distinct: a node handle and a link handle with the same numeric
//! value are not interchangeable. Zero is never a valid handle, so "allocate
//! automatically" is expressed as `None` at insertion time rather than as a
//! reserved value of the handle type itself.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU64;

/// Common behaviour of graph handles, used by the id allocator
pub trait Handle: Copy + Ord + fmt::Display {
    /// Human readable kind of entity the handle denotes ("node", "link")
    const KIND: &'static str;

    fn from_raw(raw: NonZeroU64) -> Self;

    fn raw(self) -> NonZeroU64;
}

/// Unique identifier for a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct NodeId(NonZeroU64);

impl NodeId {
    /// Create a node id, `None` for the zero value
    pub fn new(id: u64) -> Option<Self> {
        NonZeroU64::new(id).map(NodeId)
    }

    pub fn as_u64(&self) -> u64 {
        self.0.get()
    }
}

impl Handle for NodeId {
    const KIND: &'static str = "node";

    fn from_raw(raw: NonZeroU64) -> Self {
        NodeId(raw)
    }

    fn raw(self) -> NonZeroU64 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u64> for NodeId {
    type Error = InvalidHandle;

    fn try_from(id: u64) -> Result<Self, Self::Error> {
        NodeId::new(id).ok_or(InvalidHandle)
    }
}

/// Unique identifier for a link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct LinkId(NonZeroU64);

impl LinkId {
    /// Create a link id, `None` for the zero value
    pub fn new(id: u64) -> Option<Self> {
        NonZeroU64::new(id).map(LinkId)
    }

    pub fn as_u64(&self) -> u64 {
        self.0.get()
    }
}

impl Handle for LinkId {
    const KIND: &'static str = "link";

    fn from_raw(raw: NonZeroU64) -> Self {
        LinkId(raw)
    }

    fn raw(self) -> NonZeroU64 {
        self.0
    }
}

impl fmt::Display for LinkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u64> for LinkId {
    type Error = InvalidHandle;

    fn try_from(id: u64) -> Result<Self, Self::Error> {
        LinkId::new(id).ok_or(InvalidHandle)
    }
}

/// Returned when converting zero into a handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("0 is not a valid graph handle")]
pub struct InvalidHandle;
