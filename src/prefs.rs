use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use crate::wardrobe::{ItemId, UserId};

/// Like/dislike state for one user, passed into each query as an explicit
/// snapshot rather than shared mutable state. The two sets stay disjoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PreferenceSnapshot {
    liked: HashSet<ItemId>,
    disliked: HashSet<ItemId>,
}

impl PreferenceSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_liked(&self, id: &ItemId) -> bool {
        self.liked.contains(id)
    }

    pub fn is_disliked(&self, id: &ItemId) -> bool {
        self.disliked.contains(id)
    }

    pub fn has_liked(&self) -> bool {
        !self.liked.is_empty()
    }

    /// Like an item; liking again un-likes it. A liked item leaves the
    /// disliked set.
    pub fn toggle_like(&mut self, id: ItemId) {
        if !self.liked.remove(&id) {
            self.disliked.remove(&id);
            self.liked.insert(id);
        }
    }

    /// Dislike an item; disliking again clears it. A disliked item leaves the
    /// liked set.
    pub fn toggle_dislike(&mut self, id: ItemId) {
        if !self.disliked.remove(&id) {
            self.liked.remove(&id);
            self.disliked.insert(id);
        }
    }
}

/// Session-scoped preference state, one snapshot per user. Queries clone the
/// snapshot at call time so in-flight queries never observe later toggles.
#[derive(Debug, Default)]
pub struct PreferenceBoard {
    inner: Mutex<HashMap<UserId, PreferenceSnapshot>>,
}

impl PreferenceBoard {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<UserId, PreferenceSnapshot>> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn toggle_like(&self, user: &UserId, id: ItemId) {
        self.lock().entry(user.clone()).or_default().toggle_like(id);
    }

    pub fn toggle_dislike(&self, user: &UserId, id: ItemId) {
        self.lock().entry(user.clone()).or_default().toggle_dislike(id);
    }

    pub fn snapshot(&self, user: &UserId) -> PreferenceSnapshot {
        self.lock().get(user).cloned().unwrap_or_default()
    }
}
