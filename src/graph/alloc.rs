//! High-water-mark handle allocation
//!
//! Handles are never reused: the mark only moves forward, both when a handle
//! is allocated automatically and when the caller picks one explicitly.

use super::types::Handle;
use std::num::NonZeroU64;

/// Forward-only allocator for one handle type
#[derive(Debug, Clone)]
pub struct IdAllocator<H: Handle> {
    top: Option<H>,
}

impl<H: Handle> IdAllocator<H> {
    pub fn new() -> Self {
        Self { top: None }
    }

    /// Largest handle allocated or observed so far
    pub fn high_water(&self) -> Option<H> {
        self.top
    }

    /// Allocate the successor of the high-water mark and advance the mark
    ///
    /// # Panics
    ///
    /// When the underlying `u64` space is exhausted. Wrapping around would
    /// hand out handles that are already in use.
    pub fn allocate_next(&mut self) -> H {
        let next = match self.top {
            None => NonZeroU64::MIN,
            Some(top) => top
                .raw()
                .checked_add(1)
                .unwrap_or_else(|| panic!("{} id space exhausted", H::KIND)),
        };
        let id = H::from_raw(next);
        self.top = Some(id);
        id
    }

    /// Advance the mark to at least `id` without allocating
    pub fn observe(&mut self, id: H) {
        if self.top.map_or(true, |top| id > top) {
            self.top = Some(id);
        }
    }
}

impl<H: Handle> Default for IdAllocator<H> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::types::{LinkId, NodeId};

    fn node(id: u64) -> NodeId {
        NodeId::new(id).unwrap()
    }

    #[test]
    fn test_allocation_starts_at_one() {
        let mut alloc = IdAllocator::<NodeId>::new();
        assert_eq!(alloc.high_water(), None);
        assert_eq!(alloc.allocate_next(), node(1));
        assert_eq!(alloc.allocate_next(), node(2));
        assert_eq!(alloc.high_water(), Some(node(2)));
    }

    #[test]
    fn test_observe_advances() {
        let mut alloc = IdAllocator::<NodeId>::new();
        alloc.observe(node(10));
        assert_eq!(alloc.high_water(), Some(node(10)));
        assert_eq!(alloc.allocate_next(), node(11));
    }

    #[test]
    fn test_observe_never_decreases() {
        let mut alloc = IdAllocator::<LinkId>::new();
        alloc.observe(LinkId::new(8).unwrap());
        alloc.observe(LinkId::new(3).unwrap());
        assert_eq!(alloc.high_water(), LinkId::new(8));
        assert_eq!(alloc.allocate_next(), LinkId::new(9).unwrap());
    }

    #[test]
    #[should_panic(expected = "node id space exhausted")]
    fn test_overflow_is_fatal() {
        let mut alloc = IdAllocator::<NodeId>::new();
        alloc.observe(node(u64::MAX));
        alloc.allocate_next();
    }
}
