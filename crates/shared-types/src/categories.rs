//! # Guarded Categories
//!
//! Every traffic dimension a required component can guard is a closed
//! enumeration with a wildcard `All` member.
//!
//! | Enumeration | Members |
//! |-------------|---------|
//! | [`TrafficCategory`] | All, Incoming, Outgoing, Processed, Unprocessed |
//! | [`PacketCategory`] | All, Presence, IQ, Message, Roster |
//! | [`RoomEventCategory`] | All, one `Before*` member per room event kind |
//!
//! Category names double as the persisted tokens, so [`Category::as_str`]
//! and [`FromStr`] must stay in lock-step.

use crate::errors::UnknownCategory;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeSet;
use std::fmt;
use std::hash::Hash;
use std::str::FromStr;
use tracing::warn;

/// Separator used when a set of categories is rendered as a single value.
pub const CATEGORY_DELIMITER: char = ',';

/// A member of a closed category enumeration.
pub trait Category:
    Copy
    + Eq
    + Ord
    + Hash
    + fmt::Debug
    + fmt::Display
    + FromStr<Err = UnknownCategory>
    + Send
    + Sync
    + 'static
{
    /// The wildcard member.
    const ALL: Self;
    /// Every member, in declaration order.
    const VARIANTS: &'static [Self];
    /// Human-readable enumeration name (used in diagnostics).
    const KIND: &'static str;

    /// Persisted token for this member.
    fn as_str(&self) -> &'static str;
}

macro_rules! category_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $token:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl Category for $name {
            const ALL: Self = $name::All;
            const VARIANTS: &'static [Self] = &[$($name::$variant),+];
            const KIND: &'static str = $kind;

            fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $token),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownCategory;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($token => Ok($name::$variant),)+
                    _ => Err(UnknownCategory {
                        kind: $kind,
                        token: s.to_string(),
                    }),
                }
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let token = String::deserialize(deserializer)?;
                token.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

category_enum! {
    /// Where a packet is in its traversal of the server.
    ///
    /// `Incoming`/`Outgoing` describe direction, `Unprocessed`/`Processed`
    /// describe the PRE/POST stage.
    TrafficCategory, "traffic" {
        /// Every traversal point.
        All => "All",
        /// Packets read by the server.
        Incoming => "Incoming",
        /// Packets sent by the server.
        Outgoing => "Outgoing",
        /// Packets after processing (POST).
        Processed => "Processed",
        /// Packets before processing (PRE).
        Unprocessed => "Unprocessed",
    }
}

category_enum! {
    /// Packet kinds a required interceptor can guard.
    PacketCategory, "packet" {
        /// Every packet kind.
        All => "All",
        Presence => "Presence",
        /// Info/query packets (rosters included).
        Iq => "IQ",
        Message => "Message",
        Roster => "Roster",
    }
}

category_enum! {
    /// Room events a required listener can guard, one per vetoable verb.
    RoomEventCategory, "room event" {
        /// Every room event.
        All => "All",
        BeforeCreated => "BeforeCreated",
        BeforeDestroyed => "BeforeDestroyed",
        BeforeJoined => "BeforeJoined",
        BeforeLeft => "BeforeLeft",
        BeforeNickChanged => "BeforeNickChanged",
        BeforeMessageReceived => "BeforeMessageReceived",
        BeforePrivateMessageReceived => "BeforePrivateMessageReceived",
        BeforeSubjectChanged => "BeforeSubjectChanged",
    }
}

/// An ordered set of categories from one enumeration.
///
/// Iteration follows declaration order, which keeps the persisted form
/// deterministic.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct CategorySet<C: Category> {
    members: BTreeSet<C>,
}

impl<C: Category> CategorySet<C> {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            members: BTreeSet::new(),
        }
    }

    /// The singleton `{All}`.
    #[must_use]
    pub fn wildcard() -> Self {
        std::iter::once(C::ALL).collect()
    }

    /// Insert a member. Returns `true` if it was not present.
    pub fn insert(&mut self, category: C) -> bool {
        self.members.insert(category)
    }

    /// Literal membership test.
    #[must_use]
    pub fn contains(&self, category: C) -> bool {
        self.members.contains(&category)
    }

    /// Membership test honouring the wildcard.
    #[must_use]
    pub fn matches(&self, category: C) -> bool {
        self.contains(C::ALL) || self.contains(category)
    }

    /// `true` if the set is exactly `{All}`.
    #[must_use]
    pub fn is_wildcard(&self) -> bool {
        self.members.len() == 1 && self.contains(C::ALL)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = C> + '_ {
        self.members.iter().copied()
    }

    /// Union `other` into this set.
    pub fn absorb(&mut self, other: &Self) {
        self.members.extend(other.members.iter().copied());
    }

    /// If `All` is a member, drop every other member.
    pub fn collapse_wildcard(&mut self) {
        if self.contains(C::ALL) && self.members.len() > 1 {
            self.members.clear();
            self.members.insert(C::ALL);
        }
    }

    /// Render as a delimited property value. `All` is never enumerated
    /// alongside other members.
    #[must_use]
    pub fn to_property(&self) -> String {
        if self.contains(C::ALL) {
            return C::ALL.as_str().to_string();
        }
        let mut rendered = String::new();
        for (i, member) in self.members.iter().enumerate() {
            if i > 0 {
                rendered.push(CATEGORY_DELIMITER);
            }
            rendered.push_str(member.as_str());
        }
        rendered
    }

    /// Parse a delimited property value.
    ///
    /// Tokens are trimmed, empty tokens skipped and unknown tokens logged and
    /// skipped. A parsed `All` collapses the set immediately.
    #[must_use]
    pub fn from_property(raw: &str) -> Self {
        let mut set = Self::new();
        for token in raw.split(CATEGORY_DELIMITER).map(str::trim) {
            if token.is_empty() {
                continue;
            }
            match token.parse::<C>() {
                Ok(category) if category == C::ALL => return Self::wildcard(),
                Ok(category) => {
                    set.insert(category);
                }
                Err(e) => warn!(token, kind = C::KIND, "{}", e),
            }
        }
        set
    }
}

impl<C: Category> Default for CategorySet<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Category> fmt::Debug for CategorySet<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.members.iter()).finish()
    }
}

impl<C: Category> FromIterator<C> for CategorySet<C> {
    fn from_iter<I: IntoIterator<Item = C>>(iter: I) -> Self {
        Self {
            members: iter.into_iter().collect(),
        }
    }
}

impl<C: Category> Extend<C> for CategorySet<C> {
    fn extend<I: IntoIterator<Item = C>>(&mut self, iter: I) {
        self.members.extend(iter);
    }
}

impl<C: Category, const N: usize> From<[C; N]> for CategorySet<C> {
    fn from(members: [C; N]) -> Self {
        members.into_iter().collect()
    }
}
