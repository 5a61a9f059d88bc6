//! Shared graph access for async callers
//!
//! `NodeGraph` itself is single-threaded. When several tasks need the same
//! graph, every lookup, insertion and erasure is serialized through one lock.
//! Proxies borrow from the lock guard, so a proxy's liveness check and the
//! dereference that follows always happen under the lock that would block a
//! concurrent erase.

use super::store::{GraphConfig, NodeGraph};
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};

/// Cloneable handle to a lock-protected graph
#[derive(Debug, Clone)]
pub struct SharedGraph {
    inner: Arc<Mutex<NodeGraph>>,
}

impl SharedGraph {
    pub fn new(graph: NodeGraph) -> Self {
        Self {
            inner: Arc::new(Mutex::new(graph)),
        }
    }

    pub fn with_config(config: GraphConfig) -> Self {
        Self::new(NodeGraph::with_config(config))
    }

    /// Acquire exclusive access to the graph
    ///
    /// Proxies obtained through the guard cannot outlive it.
    pub async fn lock(&self) -> MutexGuard<'_, NodeGraph> {
        self.inner.lock().await
    }

    /// Run `f` with the graph locked
    pub async fn with<R>(&self, f: impl FnOnce(&NodeGraph) -> R) -> R {
        let graph = self.inner.lock().await;
        f(&*graph)
    }
}

impl Default for SharedGraph {
    fn default() -> Self {
        Self::new(NodeGraph::new())
    }
}
