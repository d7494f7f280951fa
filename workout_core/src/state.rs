//! Mutable per-session user state.
//!
//! Two pieces of state live for the length of a session:
//! - the limitation profile (active issue tags)
//! - completion flags for individual exercises
//!
//! Neither is persisted; both are owned by the session.

use crate::IssueTag;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// The set of currently active limitations
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct UserProfile {
    issues: BTreeSet<IssueTag>,
}

impl UserProfile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Activate a limitation. Returns false if it was already active.
    pub fn add(&mut self, tag: impl Into<IssueTag>) -> bool {
        self.issues.insert(tag.into())
    }

    /// Deactivate a limitation. Returns false if it wasn't active.
    pub fn remove(&mut self, tag: &str) -> bool {
        self.issues.remove(tag)
    }

    /// Flip a limitation and return whether it is now active
    pub fn toggle(&mut self, tag: impl Into<IssueTag>) -> bool {
        let tag = tag.into();
        if self.issues.remove(tag.as_str()) {
            tracing::debug!("Limitation {} deactivated", tag);
            false
        } else {
            tracing::debug!("Limitation {} activated", tag);
            self.issues.insert(tag);
            true
        }
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.issues.contains(tag)
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Active tags in sorted order
    pub fn iter(&self) -> impl Iterator<Item = &IssueTag> {
        self.issues.iter()
    }

    pub fn clear(&mut self) {
        self.issues.clear();
    }
}

impl<T: Into<IssueTag>> FromIterator<T> for UserProfile {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            issues: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Completion flags keyed by section and exercise index
///
/// Entries are created on first toggle; a missing entry reads as "not done".
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct CompletionState {
    entries: BTreeMap<String, BTreeMap<usize, bool>>,
}

impl CompletionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_done(&self, section: &str, index: usize) -> bool {
        self.entries
            .get(section)
            .and_then(|flags| flags.get(&index))
            .copied()
            .unwrap_or(false)
    }

    /// Flip the flag and return its new value
    pub fn toggle(&mut self, section: &str, index: usize) -> bool {
        let flag = self
            .entries
            .entry(section.to_string())
            .or_default()
            .entry(index)
            .or_insert(false);
        *flag = !*flag;
        *flag
    }

    /// Number of entries currently set, across every section ever toggled
    pub fn completed_count(&self) -> usize {
        self.entries
            .values()
            .flat_map(|flags| flags.values())
            .filter(|done| **done)
            .count()
    }

    /// Number of entries set within one section
    pub fn completed_in_section(&self, section: &str) -> usize {
        self.entries
            .get(section)
            .map(|flags| flags.values().filter(|done| **done).count())
            .unwrap_or(0)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
