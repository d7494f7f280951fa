//! Session driver: the mutable runtime state layered over a loaded document.
//!
//! A session is either **Unloaded** (only loading is valid) or **Loaded**
//! (toggles and queries are valid). Reset is the only way back to Unloaded
//! and always clears completion state; whether the limitation profile is
//! cleared too is governed by [`SessionConfig::reset_profile_on_reload`].

use crate::config::SessionConfig;
use crate::engine::{self, ResolvedSection};
use crate::{
    CompletionState, Config, Error, IssueTag, Result, Summary, UserProfile, WorkoutDocument,
};
use std::path::Path;
use uuid::Uuid;

/// Macro-state of a session
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionPhase {
    Unloaded,
    Loaded,
}

#[derive(Clone, Debug)]
pub struct Session {
    id: Uuid,
    policy: SessionConfig,
    document: Option<WorkoutDocument>,
    profile: UserProfile,
    completion: CompletionState,
}

impl Session {
    pub fn new(policy: SessionConfig, profile: UserProfile) -> Self {
        let id = Uuid::new_v4();
        tracing::debug!(session = %id, "New session with {} active limitations", profile.len());
        Self {
            id,
            policy,
            document: None,
            profile,
            completion: CompletionState::new(),
        }
    }

    /// Session using the configured lifecycle policy and starting limitations
    pub fn from_config(config: &Config) -> Self {
        let profile = config
            .profile
            .limitations
            .iter()
            .map(|tag| IssueTag::new(tag.trim()))
            .collect();
        Self::new(config.session, profile)
    }

    pub fn phase(&self) -> SessionPhase {
        if self.document.is_some() {
            SessionPhase::Loaded
        } else {
            SessionPhase::Unloaded
        }
    }

    pub fn document(&self) -> Option<&WorkoutDocument> {
        self.document.as_ref()
    }

    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    pub fn completion(&self) -> &CompletionState {
        &self.completion
    }

    /// Install a document from its JSON text
    ///
    /// Only valid while Unloaded. On a parse failure nothing is installed and
    /// the session stays Unloaded.
    pub fn load(&mut self, raw: &str) -> Result<&WorkoutDocument> {
        if self.document.is_some() {
            return Err(Error::State(
                "a document is already loaded; reset the session first".into(),
            ));
        }

        let doc = match WorkoutDocument::from_json_str(raw) {
            Ok(doc) => doc,
            Err(e) => {
                tracing::warn!(session = %self.id, "Failed to load document: {}", e);
                return Err(e);
            }
        };

        tracing::info!(
            session = %self.id,
            "Loaded document with {} sections and {} exercises",
            doc.section_count(),
            doc.exercise_count()
        );

        self.completion.clear();
        Ok(&*self.document.insert(doc))
    }

    /// Read a document file and install it
    pub fn load_path(&mut self, path: &Path) -> Result<&WorkoutDocument> {
        if self.document.is_some() {
            return Err(Error::State(
                "a document is already loaded; reset the session first".into(),
            ));
        }
        let raw = std::fs::read_to_string(path)?;
        self.load(&raw)
    }

    /// Drop the document and return to Unloaded
    pub fn reset(&mut self) {
        self.document = None;
        self.completion.clear();
        if self.policy.reset_profile_on_reload {
            self.profile.clear();
        }
        tracing::info!(
            session = %self.id,
            "Session reset ({} limitations kept)",
            self.profile.len()
        );
    }

    /// Reset, then load a new document
    pub fn reload(&mut self, raw: &str) -> Result<&WorkoutDocument> {
        self.reset();
        self.load(raw)
    }

    /// Flip a limitation and return whether it is now active
    pub fn toggle_issue(&mut self, tag: impl Into<IssueTag>) -> Result<bool> {
        self.require_loaded()?;
        Ok(self.profile.toggle(tag))
    }

    /// Flip the completion flag of an exercise and return its new value
    pub fn toggle_completion(&mut self, section: &str, index: usize) -> Result<bool> {
        let doc = self.require_loaded()?;
        let len = doc
            .section(section)
            .map(|s| s.exercises.len())
            .ok_or_else(|| Error::Document(format!("no section named `{}`", section)))?;
        if index >= len {
            return Err(Error::Document(format!(
                "section `{}` has {} exercises, index {} is out of range",
                section, len, index
            )));
        }

        let done = self.completion.toggle(section, index);
        tracing::debug!(session = %self.id, "{}[{}] done = {}", section, index, done);
        Ok(done)
    }

    pub fn summary(&self) -> Result<Summary> {
        let doc = self.require_loaded()?;
        Ok(engine::summarize(doc, &self.completion, &self.profile))
    }

    /// Every exercise resolved against the current profile
    pub fn plan(&self) -> Result<Vec<ResolvedSection>> {
        let doc = self.require_loaded()?;
        Ok(engine::plan(doc, &self.profile, &self.completion))
    }

    fn require_loaded(&self) -> Result<&WorkoutDocument> {
        self.document
            .as_ref()
            .ok_or_else(|| Error::State("no workout document is loaded".into()))
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SessionConfig::default(), UserProfile::new())
    }
}
