//! # Packets and Traversal Points
//!
//! A packet crosses the interception pipeline four times: PRE and POST
//! processing, once inbound (read by the server) and once outbound (sent by
//! the server).
//!
//! ```text
//!            ┌──────────── Inbound ────────────┐ ┌──────────── Outbound ───────────┐
//! read ──→ [PRE] ──→ process ──→ [POST]          [PRE] ──→ deliver ──→ [POST]
//!          Unprocessed            Processed      Unprocessed            Processed
//!          Incoming               Incoming       Outgoing               Outgoing
//! ```

use crate::address::Jid;
use crate::categories::{PacketCategory, TrafficCategory};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Namespace of chat-state notifications (typing indicators and friends).
pub const CHAT_STATES_NAMESPACE: &str = "http://jabber.org/protocol/chatstates";

/// Kind of a packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PacketKind {
    Message,
    Iq,
    Presence,
    /// Roster push or query. A specialised IQ.
    Roster,
}

impl PacketKind {
    /// Name used in rejection texts.
    pub fn name(&self) -> &'static str {
        match self {
            PacketKind::Message => "Message",
            PacketKind::Iq => "IQ",
            PacketKind::Presence => "Presence",
            PacketKind::Roster => "Roster",
        }
    }

    /// Categories this kind belongs to. Rosters are IQs too.
    pub fn categories(&self) -> &'static [PacketCategory] {
        match self {
            PacketKind::Message => &[PacketCategory::Message],
            PacketKind::Iq => &[PacketCategory::Iq],
            PacketKind::Presence => &[PacketCategory::Presence],
            PacketKind::Roster => &[PacketCategory::Roster, PacketCategory::Iq],
        }
    }
}

impl fmt::Display for PacketKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A direct child element of a packet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildElement {
    /// Local element name.
    pub name: String,
    /// Namespace URI.
    pub namespace: String,
}

impl ChildElement {
    pub fn new(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
        }
    }
}

/// Minimal packet model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Packet {
    pub kind: PacketKind,
    /// Stanza id, if the sender supplied one.
    pub id: Option<String>,
    pub from: Option<Jid>,
    pub to: Option<Jid>,
    /// Direct child elements, in document order.
    pub children: Vec<ChildElement>,
}

impl Packet {
    /// Empty packet of the given kind.
    pub fn new(kind: PacketKind) -> Self {
        Self {
            kind,
            id: None,
            from: None,
            to: None,
            children: Vec::new(),
        }
    }

    pub fn message() -> Self {
        Self::new(PacketKind::Message)
    }

    pub fn iq() -> Self {
        Self::new(PacketKind::Iq)
    }

    pub fn presence() -> Self {
        Self::new(PacketKind::Presence)
    }

    pub fn roster() -> Self {
        Self::new(PacketKind::Roster)
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn with_from(mut self, from: Jid) -> Self {
        self.from = Some(from);
        self
    }

    #[must_use]
    pub fn with_to(mut self, to: Jid) -> Self {
        self.to = Some(to);
        self
    }

    #[must_use]
    pub fn with_child(mut self, child: ChildElement) -> Self {
        self.children.push(child);
        self
    }

    /// `true` for a message whose sole child is a chat-state notification.
    pub fn is_chat_state_notification(&self) -> bool {
        if self.kind != PacketKind::Message {
            return false;
        }
        match self.children.as_slice() {
            [only] => only.namespace.eq_ignore_ascii_case(CHAT_STATES_NAMESPACE),
            _ => false,
        }
    }
}

/// The connection that read a packet or that a packet will be sent to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub address: Jid,
}

impl Session {
    pub fn new(address: Jid) -> Self {
        Self { address }
    }
}

/// Packet direction relative to the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Read by the server.
    Inbound,
    /// Sent by the server.
    Outbound,
}

/// Processing stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Before the read/send is performed. Rejection is possible.
    Pre,
    /// After the read/send is performed. The packet can no longer be recalled.
    Post,
}

/// One of the four points at which the pipeline is invoked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TraversalPoint {
    pub direction: Direction,
    pub stage: Stage,
}

impl TraversalPoint {
    pub const INBOUND_PRE: Self = Self::new(Direction::Inbound, Stage::Pre);
    pub const INBOUND_POST: Self = Self::new(Direction::Inbound, Stage::Post);
    pub const OUTBOUND_PRE: Self = Self::new(Direction::Outbound, Stage::Pre);
    pub const OUTBOUND_POST: Self = Self::new(Direction::Outbound, Stage::Post);

    pub const fn new(direction: Direction, stage: Stage) -> Self {
        Self { direction, stage }
    }

    /// Build from the routing layer's `(incoming, processed)` flags.
    pub const fn from_flags(incoming: bool, processed: bool) -> Self {
        let direction = if incoming {
            Direction::Inbound
        } else {
            Direction::Outbound
        };
        let stage = if processed { Stage::Post } else { Stage::Pre };
        Self::new(direction, stage)
    }

    pub fn is_incoming(&self) -> bool {
        self.direction == Direction::Inbound
    }

    pub fn is_processed(&self) -> bool {
        self.stage == Stage::Post
    }

    /// The two traffic categories describing this point.
    pub fn traffic_categories(&self) -> [TrafficCategory; 2] {
        let stage = match self.stage {
            Stage::Pre => TrafficCategory::Unprocessed,
            Stage::Post => TrafficCategory::Processed,
        };
        let direction = match self.direction {
            Direction::Inbound => TrafficCategory::Incoming,
            Direction::Outbound => TrafficCategory::Outgoing,
        };
        [stage, direction]
    }
}

impl fmt::Display for TraversalPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let direction = match self.direction {
            Direction::Inbound => "inbound",
            Direction::Outbound => "outbound",
        };
        let stage = match self.stage {
            Stage::Pre => "pre",
            Stage::Post => "post",
        };
        write!(f, "{}/{}", direction, stage)
    }
}
