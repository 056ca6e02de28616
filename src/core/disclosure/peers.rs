//! Per-viewer presentation context

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::presentation::present;
use super::types::{DisclosurePresentation, UserId, UserIdentity};

/// Users the viewer shares at least one mutually revealed conversation with
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RevealedPeerSet(HashSet<UserId>);

impl RevealedPeerSet {
    pub fn contains(&self, user_id: &UserId) -> bool {
        self.0.contains(user_id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &UserId> {
        self.0.iter()
    }
}

impl FromIterator<UserId> for RevealedPeerSet {
    fn from_iter<I: IntoIterator<Item = UserId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Everything needed to render authors for one viewer.
///
/// Built once per render request. A mutual reveal in any conversation
/// between the viewer and an author unlocks that author's details for this
/// viewer everywhere, and for nobody else.
#[derive(Debug, Clone, Default)]
pub struct PresentationContext {
    pub viewer: Option<UserId>,
    pub revealed_peers: RevealedPeerSet,
}

impl PresentationContext {
    pub fn new(viewer: UserId, revealed_peers: RevealedPeerSet) -> Self {
        Self {
            viewer: Some(viewer),
            revealed_peers,
        }
    }

    /// Signed-out viewer: public visibility levels only
    pub fn anonymous_viewer() -> Self {
        Self::default()
    }

    pub fn force_reveal_for(&self, author: &UserId) -> bool {
        self.viewer.is_some() && self.revealed_peers.contains(author)
    }

    pub fn present_author(&self, author: &UserIdentity) -> DisclosurePresentation {
        let viewer_is_owner = self.viewer == Some(author.id);
        present(author, viewer_is_owner, self.force_reveal_for(&author.id))
    }

    pub fn present_all<'a, I>(&self, authors: I) -> Vec<DisclosurePresentation>
    where
        I: IntoIterator<Item = &'a UserIdentity>,
    {
        authors
            .into_iter()
            .map(|author| self.present_author(author))
            .collect()
    }
}
