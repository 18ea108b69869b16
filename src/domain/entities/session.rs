//! Process-scoped session state.

use super::community::Community;
use super::credential::Credential;
use super::emoji::Emoji;

/// Credential and community inventory for one pipeline owner.
///
/// Nothing here is persisted; only the cache directory outlives the process.
#[derive(Debug, Default)]
pub struct SessionState {
    credential: Option<Credential>,
    communities: Vec<Community>,
}

impl SessionState {
    /// Creates an empty, unauthenticated session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the held credential, if any.
    #[must_use]
    pub const fn credential(&self) -> Option<&Credential> {
        self.credential.as_ref()
    }

    /// Stores the credential for subsequent requests.
    pub fn set_credential(&mut self, credential: Credential) {
        self.credential = Some(credential);
    }

    /// Returns whether a credential is held.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.credential.is_some()
    }

    /// Returns all communities, the manual-add one first when present.
    #[must_use]
    pub fn communities(&self) -> &[Community] {
        &self.communities
    }

    /// Replaces server communities, keeping the manual-add community.
    pub fn replace_communities(&mut self, fetched: Vec<Community>) {
        let extra = self
            .communities
            .iter()
            .position(Community::is_extra)
            .map(|idx| self.communities.remove(idx));

        self.communities = extra.into_iter().chain(fetched).collect();
    }

    /// Adds a manually entered emoji to the manual-add community.
    ///
    /// Returns true if it was not already listed there.
    pub fn add_extra_emoji(&mut self, emoji: Emoji) -> bool {
        if !self.communities.first().is_some_and(Community::is_extra) {
            self.communities.insert(0, Community::extra());
        }
        self.communities[0].push_emoji(emoji)
    }

    /// Returns the total number of emoji across communities.
    #[must_use]
    pub fn emoji_count(&self) -> usize {
        self.communities.iter().map(|c| c.emoji().len()).sum()
    }
}
