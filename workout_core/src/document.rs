//! Workout document loading and structural queries.
//!
//! A document is a JSON object. Array-valued fields are sections, `date` and
//! `goal` are metadata, and every other field is ignored.

use crate::{Exercise, Result, Section, WorkoutDocument};
use chrono::{DateTime, NaiveDate};
use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use serde_json::Value;
use std::fmt;
use std::path::Path;

impl WorkoutDocument {
    /// Parse a document from its JSON text
    ///
    /// Fails only if the text isn't JSON or the top level isn't an object.
    /// Malformed exercises and fields fall back to empty defaults.
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let doc: WorkoutDocument = serde_json::from_str(raw)?;
        tracing::debug!(
            "Parsed document: {} sections, {} exercises",
            doc.section_count(),
            doc.exercise_count()
        );
        Ok(doc)
    }

    /// Read and parse a document file
    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let doc = Self::from_json_str(&contents)?;
        tracing::info!("Loaded workout document from {:?}", path);
        Ok(doc)
    }

    /// Build a document directly from parts
    pub fn new(date: Option<String>, goal: Option<String>, sections: Vec<Section>) -> Self {
        Self {
            date,
            goal,
            sections,
        }
    }

    pub fn date(&self) -> Option<&str> {
        self.date.as_deref()
    }

    pub fn goal(&self) -> Option<&str> {
        self.goal.as_deref()
    }

    /// Date as a calendar day, if it's `YYYY-MM-DD` or an RFC 3339 timestamp
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        let raw = self.date.as_deref()?.trim();
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
    }

    /// Sections in source order
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Look up a section by key
    pub fn section(&self, key: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.key == key)
    }

    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Total number of exercises across all sections
    pub fn exercise_count(&self) -> usize {
        self.sections.iter().map(|s| s.exercises.len()).sum()
    }
}

impl<'de> Deserialize<'de> for WorkoutDocument {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(DocumentVisitor)
    }
}

struct DocumentVisitor;

impl<'de> Visitor<'de> for DocumentVisitor {
    type Value = WorkoutDocument;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a workout document object")
    }

    fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut doc = WorkoutDocument::default();

        while let Some(key) = map.next_key::<String>()? {
            match map.next_value::<Value>()? {
                Value::Array(items) => {
                    let exercises = items
                        .into_iter()
                        .map(|item| {
                            Exercise::deserialize(item).unwrap_or_else(|e| {
                                tracing::warn!(
                                    "Unreadable exercise in `{}` ({}), left empty",
                                    key,
                                    e
                                );
                                Exercise::default()
                            })
                        })
                        .collect::<Vec<_>>();

                    // A repeated key keeps its first position and takes the later value
                    if let Some(existing) = doc.sections.iter_mut().find(|s| s.key == key) {
                        existing.exercises = exercises;
                    } else {
                        doc.sections.push(Section { key, exercises });
                    }
                }
                Value::String(s) if key == "date" => doc.date = Some(s),
                Value::String(s) if key == "goal" => doc.goal = Some(s),
                other => {
                    tracing::trace!("Ignoring non-section field `{}`: {}", key, other);
                }
            }
        }

        Ok(doc)
    }
}
