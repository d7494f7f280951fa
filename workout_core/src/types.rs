//! Core domain types for the workout session engine.
//!
//! This module defines the fundamental types used throughout the system:
//! - Workout documents, sections and exercises
//! - Exercise options (variants) and their open-ended kinds
//! - Limitation tags
//! - Session summaries

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::borrow::Borrow;
use std::fmt;

// ============================================================================
// Limitation Tags
// ============================================================================

/// An opaque identifier naming a body-area limitation (e.g. "knee")
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct IssueTag(String);

impl IssueTag {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for IssueTag {
    fn from(tag: &str) -> Self {
        Self(tag.to_string())
    }
}

impl From<String> for IssueTag {
    fn from(tag: String) -> Self {
        Self(tag)
    }
}

impl Borrow<str> for IssueTag {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IssueTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Exercise Options
// ============================================================================

/// Kind of an exercise option
///
/// The set of kinds is open: anything that isn't one of the recognized
/// values is kept verbatim in `Other` so it can be displayed as-is.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(from = "String", into = "String")]
pub enum OptionKind {
    Standard,
    AlternativeEasy,
    Physio,
    Other(String),
}

impl OptionKind {
    /// The raw string used in documents
    pub fn as_str(&self) -> &str {
        match self {
            OptionKind::Standard => "standard",
            OptionKind::AlternativeEasy => "alternative_easy",
            OptionKind::Physio => "physio",
            OptionKind::Other(raw) => raw,
        }
    }

    /// Human-readable label; unrecognized kinds are shown verbatim
    pub fn label(&self) -> &str {
        match self {
            OptionKind::Standard => "Standard",
            OptionKind::AlternativeEasy => "Easier",
            OptionKind::Physio => "Physio",
            OptionKind::Other(raw) => raw,
        }
    }
}

/// An option with no `type` field is an unrecognized, empty kind
impl Default for OptionKind {
    fn default() -> Self {
        OptionKind::Other(String::new())
    }
}

impl From<String> for OptionKind {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "standard" => OptionKind::Standard,
            "alternative_easy" => OptionKind::AlternativeEasy,
            "physio" => OptionKind::Physio,
            _ => OptionKind::Other(raw),
        }
    }
}

impl From<&str> for OptionKind {
    fn from(raw: &str) -> Self {
        OptionKind::from(raw.to_string())
    }
}

impl From<OptionKind> for String {
    fn from(kind: OptionKind) -> Self {
        match kind {
            OptionKind::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for OptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One concrete way to perform an exercise
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExerciseOption {
    #[serde(rename = "type", default, deserialize_with = "lenient_kind")]
    pub kind: OptionKind,
    #[serde(default, deserialize_with = "lenient")]
    pub description: String,
}

impl ExerciseOption {
    pub fn new(kind: impl Into<OptionKind>, description: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            description: description.into(),
        }
    }
}

// ============================================================================
// Exercises and Sections
// ============================================================================

/// A single prescribed movement entry within a section
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Exercise {
    #[serde(default, deserialize_with = "lenient")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient")]
    pub detail: String,
    #[serde(default, deserialize_with = "lenient")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient_list")]
    pub contraindicated_for: Vec<IssueTag>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub options: Vec<ExerciseOption>,
}

/// A named, ordered group of exercises (e.g. "warm-up")
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct Section {
    pub key: String,
    pub exercises: Vec<Exercise>,
}

/// A loaded workout document
///
/// Immutable once loaded; sections keep the field order of the source.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WorkoutDocument {
    pub(crate) date: Option<String>,
    pub(crate) goal: Option<String>,
    pub(crate) sections: Vec<Section>,
}

// ============================================================================
// Summary
// ============================================================================

/// Rolled-up session statistics
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Summary {
    pub total_sections: usize,
    pub total_completed: usize,
    pub total_exercises: usize,
    pub active_limitations: usize,
}

// ============================================================================
// Lenient field readers
// ============================================================================
//
// Exercise fields never fail a load. `null` or a value of the wrong shape
// reads the same as a missing field.

fn lenient<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).unwrap_or_default())
}

/// A non-array reads as empty; unreadable elements are skipped
fn lenient_list<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) => Ok(items
            .into_iter()
            .filter_map(|item| T::deserialize(item).ok())
            .collect()),
        _ => Ok(Vec::new()),
    }
}

/// A non-string `type` is kept as its JSON text
fn lenient_kind<'de, D>(deserializer: D) -> std::result::Result<OptionKind, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => OptionKind::default(),
        Value::String(raw) => OptionKind::from(raw),
        other => OptionKind::Other(other.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_kind_recognized_values() {
        assert_eq!(OptionKind::from("standard"), OptionKind::Standard);
        assert_eq!(OptionKind::from("alternative_easy"), OptionKind::AlternativeEasy);
        assert_eq!(OptionKind::from("physio"), OptionKind::Physio);
    }

    #[test]
    fn test_option_kind_unknown_kept_verbatim() {
        let kind = OptionKind::from("Band-Assisted");
        assert_eq!(kind, OptionKind::Other("Band-Assisted".into()));
        assert_eq!(kind.label(), "Band-Assisted");
        assert_eq!(String::from(kind), "Band-Assisted");
    }

    #[test]
    fn test_option_serializes_type_field() {
        let opt = ExerciseOption::new("alternative_easy", "Knee push-up");
        let json = serde_json::to_value(&opt).unwrap();
        assert_eq!(json["type"], "alternative_easy");
        assert_eq!(json["description"], "Knee push-up");
    }

    #[test]
    fn test_exercise_missing_fields_default() {
        let ex: Exercise = serde_json::from_str(r#"{"name": "Plank"}"#).unwrap();
        assert_eq!(ex.name, "Plank");
        assert_eq!(ex.detail, "");
        assert!(ex.contraindicated_for.is_empty());
        assert!(ex.options.is_empty());
    }

    #[test]
    fn test_exercise_null_fields_default() {
        let ex: Exercise = serde_json::from_str(
            r#"{"name": "Plank", "detail": null, "contraindicated_for": null, "options": null}"#,
        )
        .unwrap();
        assert_eq!(ex.detail, "");
        assert!(ex.contraindicated_for.is_empty());
        assert!(ex.options.is_empty());
    }

    #[test]
    fn test_exercise_wrong_typed_fields_default() {
        let ex: Exercise = serde_json::from_str(
            r#"{"name": 7, "detail": ["3x10"], "description": {"a": 1},
                "contraindicated_for": "knee", "options": {"type": "physio"}}"#,
        )
        .unwrap();
        assert_eq!(ex, Exercise::default());
    }

    #[test]
    fn test_exercise_lists_skip_unreadable_elements() {
        let ex: Exercise = serde_json::from_str(
            r#"{"name": "Lunge",
                "contraindicated_for": ["knee", 3, null, "hip"],
                "options": [42, {"type": "physio", "description": "Split squat"}]}"#,
        )
        .unwrap();
        let tags: Vec<&str> = ex.contraindicated_for.iter().map(|t| t.as_str()).collect();
        assert_eq!(tags, vec!["knee", "hip"]);
        assert_eq!(ex.options, vec![ExerciseOption::new("physio", "Split squat")]);
    }

    #[test]
    fn test_option_non_string_type_kept_as_text() {
        let opt: ExerciseOption =
            serde_json::from_str(r#"{"type": 3, "description": "Wall sit"}"#).unwrap();
        assert_eq!(opt.kind, OptionKind::Other("3".into()));
        assert_eq!(opt.kind.label(), "3");

        let opt: ExerciseOption = serde_json::from_str(r#"{"type": null}"#).unwrap();
        assert_eq!(opt.kind, OptionKind::default());
    }

    #[test]
    fn test_option_without_type() {
        let opt: ExerciseOption = serde_json::from_str(r#"{"description": "Wall sit"}"#).unwrap();
        assert_eq!(opt.kind, OptionKind::Other(String::new()));
        assert_eq!(opt.description, "Wall sit");
    }
}
