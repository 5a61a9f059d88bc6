//! Message kinds of the wire protocol
//!
//! Only the set of kinds is fixed here. There is no encoding, framing or
//! handler yet; the numeric codes are stable so that a future codec can put
//! them on the wire directly.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Unknown message kind code {0}")]
pub struct UnknownMessageKind(pub i32);

/// Protocol message kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(i32)]
pub enum MessageKind {
    // Basic protocol
    Hello = 0,
    Ping = 1,
    Pong = 2,

    // Node management
    Sync = 3,
    Create = 4,
    Destroy = 5,
    Move = 6,
}

impl MessageKind {
    pub const ALL: [MessageKind; 7] = [
        MessageKind::Hello,
        MessageKind::Ping,
        MessageKind::Pong,
        MessageKind::Sync,
        MessageKind::Create,
        MessageKind::Destroy,
        MessageKind::Move,
    ];

    /// Numeric code of this kind
    pub fn code(self) -> i32 {
        self as i32
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MessageKind::Hello => "HELLO",
            MessageKind::Ping => "PING",
            MessageKind::Pong => "PONG",
            MessageKind::Sync => "SYNC",
            MessageKind::Create => "CREATE",
            MessageKind::Destroy => "DESTROY",
            MessageKind::Move => "MOVE",
        }
    }

    /// Check if the kind manipulates graph nodes
    pub fn is_node_management(self) -> bool {
        matches!(
            self,
            MessageKind::Sync | MessageKind::Create | MessageKind::Destroy | MessageKind::Move
        )
    }
}

impl TryFrom<i32> for MessageKind {
    type Error = UnknownMessageKind;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        MessageKind::ALL
            .into_iter()
            .find(|kind| kind.code() == code)
            .ok_or(UnknownMessageKind(code))
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
