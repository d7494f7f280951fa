//! Variant resolution engine.
//!
//! Pure functions over a loaded document and explicitly passed user state:
//! - Conflict detection between exercises and the limitation profile
//! - Selection of the safest available option for each exercise
//! - Circuit classification and decomposition into steps
//! - Session summary rollup
//!
//! Nothing here caches; every result is recomputed from its inputs.

use crate::{
    CompletionState, Exercise, ExerciseOption, IssueTag, OptionKind, Summary, UserProfile,
    WorkoutDocument,
};
use serde::Serialize;
use std::borrow::Cow;

/// Name keywords (lowercase) that mark an exercise as a circuit
pub const CIRCUIT_KEYWORDS: [&str; 4] = ["emom", "amrap", "for time", "tabata"];

/// Description of the fallback option used when an exercise has no options
pub const NO_VARIANT_DESCRIPTION: &str = "No variant available";

/// An exercise with its variant resolved against a profile
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct ResolvedExercise {
    pub section: String,
    pub index: usize,
    pub name: String,
    pub detail: String,
    pub description: String,
    pub option: ExerciseOption,
    pub conflict: bool,
    pub conflicting_issues: Vec<IssueTag>,
    /// Sub-exercises of a circuit; `None` for ordinary exercises
    pub circuit_steps: Option<Vec<String>>,
    pub completed: bool,
}

/// A section with all of its exercises resolved
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct ResolvedSection {
    pub key: String,
    pub completed: usize,
    pub exercises: Vec<ResolvedExercise>,
}

/// Whether any of the exercise's contraindications is in the profile
pub fn has_conflict(exercise: &Exercise, profile: &UserProfile) -> bool {
    exercise
        .contraindicated_for
        .iter()
        .any(|tag| profile.contains(tag.as_str()))
}

/// The contraindications that are active in the profile, in document order
pub fn conflicting_issues(exercise: &Exercise, profile: &UserProfile) -> Vec<IssueTag> {
    let mut issues: Vec<IssueTag> = Vec::new();
    for tag in &exercise.contraindicated_for {
        if profile.contains(tag.as_str()) && !issues.contains(tag) {
            issues.push(tag.clone());
        }
    }
    issues
}

/// Pick the option to present for an exercise
///
/// ## Resolution order
///
/// 1. **On conflict**: the first `physio` option, else the first
///    `alternative_easy` option.
/// 2. **Default**: the first listed option. A conflicting exercise without a
///    safer variant lands here too; its conflict flag is unaffected.
/// 3. **No options**: a standard placeholder option.
pub fn resolve<'a>(exercise: &'a Exercise, profile: &UserProfile) -> Cow<'a, ExerciseOption> {
    if has_conflict(exercise, profile) {
        let safer = first_of_kind(exercise, &OptionKind::Physio)
            .or_else(|| first_of_kind(exercise, &OptionKind::AlternativeEasy));

        if let Some(option) = safer {
            tracing::debug!(
                "Conflict on `{}`, using {} variant",
                exercise.name,
                option.kind
            );
            return Cow::Borrowed(option);
        }

        tracing::debug!(
            "Conflict on `{}` but no safer variant is listed",
            exercise.name
        );
    }

    match exercise.options.first() {
        Some(option) => Cow::Borrowed(option),
        None => Cow::Owned(ExerciseOption::new(
            OptionKind::Standard,
            NO_VARIANT_DESCRIPTION,
        )),
    }
}

fn first_of_kind<'a>(exercise: &'a Exercise, kind: &OptionKind) -> Option<&'a ExerciseOption> {
    exercise.options.iter().find(|opt| &opt.kind == kind)
}

/// Whether the exercise is a time- or round-based circuit
pub fn is_circuit(exercise: &Exercise) -> bool {
    let name = exercise.name.to_lowercase();
    CIRCUIT_KEYWORDS.iter().any(|keyword| name.contains(keyword))
}

/// Split a circuit option's description into its sub-exercises
///
/// Pieces are trimmed and empty pieces dropped; an empty description yields
/// an empty list.
pub fn circuit_steps(option: &ExerciseOption) -> Vec<String> {
    option
        .description
        .split(',')
        .map(str::trim)
        .filter(|step| !step.is_empty())
        .map(str::to_string)
        .collect()
}

/// Flip a completion flag, returning the updated state
pub fn toggle_completion(state: &CompletionState, section: &str, index: usize) -> CompletionState {
    let mut next = state.clone();
    next.toggle(section, index);
    next
}

/// Roll up session statistics from the current state
///
/// `total_completed` counts every completion entry that is set, whether or
/// not it addresses an exercise in `document`.
pub fn summarize(
    document: &WorkoutDocument,
    completion: &CompletionState,
    profile: &UserProfile,
) -> Summary {
    Summary {
        total_sections: document.section_count(),
        total_completed: completion.completed_count(),
        total_exercises: document.exercise_count(),
        active_limitations: profile.len(),
    }
}

/// Resolve one exercise into its presentable form
pub fn resolve_exercise(
    section: &str,
    index: usize,
    exercise: &Exercise,
    profile: &UserProfile,
    completion: &CompletionState,
) -> ResolvedExercise {
    let option = resolve(exercise, profile).into_owned();
    let circuit_steps = is_circuit(exercise).then(|| circuit_steps(&option));

    ResolvedExercise {
        section: section.to_string(),
        index,
        name: exercise.name.clone(),
        detail: exercise.detail.clone(),
        description: exercise.description.clone(),
        conflict: has_conflict(exercise, profile),
        conflicting_issues: conflicting_issues(exercise, profile),
        circuit_steps,
        completed: completion.is_done(section, index),
        option,
    }
}

/// Resolve every exercise of the document, section by section
pub fn plan(
    document: &WorkoutDocument,
    profile: &UserProfile,
    completion: &CompletionState,
) -> Vec<ResolvedSection> {
    document
        .sections()
        .iter()
        .map(|section| {
            let exercises: Vec<ResolvedExercise> = section
                .exercises
                .iter()
                .enumerate()
                .map(|(index, exercise)| {
                    resolve_exercise(&section.key, index, exercise, profile, completion)
                })
                .collect();

            ResolvedSection {
                key: section.key.clone(),
                completed: completion.completed_in_section(&section.key),
                exercises,
            }
        })
        .collect()
}
