//! # Room Events
//!
//! Lifecycle and messaging events raised by the multi-user chat layer. Each
//! event has a vetoable "before" form and a plain notification form; both
//! carry the same payload.

use crate::address::Jid;
use crate::categories::RoomEventCategory;
use crate::packet::Packet;
use std::fmt;

/// A room lifecycle or messaging event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoomEvent {
    RoomCreated {
        room: Jid,
        /// The user creating the room.
        owner: Jid,
    },
    RoomDestroyed {
        room: Jid,
    },
    OccupantJoined {
        room: Jid,
        user: Jid,
        nickname: String,
    },
    OccupantLeft {
        room: Jid,
        user: Jid,
    },
    NicknameChanged {
        room: Jid,
        user: Jid,
        old_nickname: String,
        new_nickname: String,
    },
    /// A message sent to the whole room.
    MessageReceived {
        room: Jid,
        user: Jid,
        nickname: String,
        message: Packet,
    },
    /// A message sent by one occupant to another.
    PrivateMessageReceived {
        to: Jid,
        from: Jid,
        message: Packet,
    },
    SubjectChanged {
        room: Jid,
        user: Jid,
        subject: String,
    },
}

impl RoomEvent {
    /// The guarded category of this event's "before" form.
    pub fn category(&self) -> RoomEventCategory {
        match self {
            RoomEvent::RoomCreated { .. } => RoomEventCategory::BeforeCreated,
            RoomEvent::RoomDestroyed { .. } => RoomEventCategory::BeforeDestroyed,
            RoomEvent::OccupantJoined { .. } => RoomEventCategory::BeforeJoined,
            RoomEvent::OccupantLeft { .. } => RoomEventCategory::BeforeLeft,
            RoomEvent::NicknameChanged { .. } => RoomEventCategory::BeforeNickChanged,
            RoomEvent::MessageReceived { .. } => RoomEventCategory::BeforeMessageReceived,
            RoomEvent::PrivateMessageReceived { .. } => {
                RoomEventCategory::BeforePrivateMessageReceived
            }
            RoomEvent::SubjectChanged { .. } => RoomEventCategory::BeforeSubjectChanged,
        }
    }

    /// Short verb used in log lines.
    pub fn name(&self) -> &'static str {
        match self {
            RoomEvent::RoomCreated { .. } => "room_created",
            RoomEvent::RoomDestroyed { .. } => "room_destroyed",
            RoomEvent::OccupantJoined { .. } => "occupant_joined",
            RoomEvent::OccupantLeft { .. } => "occupant_left",
            RoomEvent::NicknameChanged { .. } => "nickname_changed",
            RoomEvent::MessageReceived { .. } => "message_received",
            RoomEvent::PrivateMessageReceived { .. } => "private_message_received",
            RoomEvent::SubjectChanged { .. } => "subject_changed",
        }
    }

    /// The room the event concerns. Private messages report the recipient's
    /// room address.
    pub fn room(&self) -> &Jid {
        match self {
            RoomEvent::RoomCreated { room, .. }
            | RoomEvent::RoomDestroyed { room }
            | RoomEvent::OccupantJoined { room, .. }
            | RoomEvent::OccupantLeft { room, .. }
            | RoomEvent::NicknameChanged { room, .. }
            | RoomEvent::MessageReceived { room, .. }
            | RoomEvent::SubjectChanged { room, .. } => room,
            RoomEvent::PrivateMessageReceived { to, .. } => to,
        }
    }
}

impl fmt::Display for RoomEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name(), self.room())
    }
}
