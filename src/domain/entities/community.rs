//! Community (Discord guild) entity.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::emoji::Emoji;

/// Identifier of the synthetic community holding manually added emoji.
pub const EXTRA_COMMUNITY_ID: &str = "0";

/// Display name of the synthetic community holding manually added emoji.
pub const EXTRA_COMMUNITY_NAME: &str = "Extra";

/// Unique identifier for a community.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommunityId(String);

impl CommunityId {
    /// Creates a new community ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the inner string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CommunityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CommunityId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for CommunityId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// A named group owning a set of custom emoji.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Community {
    id: CommunityId,
    name: String,
    emoji: Vec<Emoji>,
}

impl Community {
    /// Creates a community with no emoji loaded yet.
    #[must_use]
    pub fn new(id: impl Into<CommunityId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            emoji: Vec::new(),
        }
    }

    /// Creates the local community that collects manually added emoji.
    #[must_use]
    pub fn extra() -> Self {
        Self::new(EXTRA_COMMUNITY_ID, EXTRA_COMMUNITY_NAME)
    }

    /// Returns the community ID.
    #[must_use]
    pub const fn id(&self) -> &CommunityId {
        &self.id
    }

    /// Returns the community name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the emoji in server order.
    #[must_use]
    pub fn emoji(&self) -> &[Emoji] {
        &self.emoji
    }

    /// Returns true if this is the manual-add community.
    #[must_use]
    pub fn is_extra(&self) -> bool {
        self.id.as_str() == EXTRA_COMMUNITY_ID
    }

    /// Replaces the emoji list with a freshly fetched one.
    pub fn set_emoji(&mut self, emoji: Vec<Emoji>) {
        self.emoji = emoji;
    }

    /// Appends an emoji unless one with the same ID is already present.
    ///
    /// Returns true if the emoji was added.
    pub fn push_emoji(&mut self, emoji: Emoji) -> bool {
        if self.emoji.iter().any(|e| e.id() == emoji.id()) {
            return false;
        }
        self.emoji.push(emoji);
        true
    }
}
