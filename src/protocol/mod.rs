//! Network protocol module
//!
//! Declares the message kinds a client/server protocol over the node graph
//! will exchange. Transport and encoding are not implemented.

pub mod message;

// Re-export main types
pub use message::{MessageKind, UnknownMessageKind};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_exports() {
        // Ensure types are accessible
        let _ = MessageKind::Hello;
    }
}
