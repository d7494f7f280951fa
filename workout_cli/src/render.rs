//! Terminal rendering of resolved workouts.

use chrono::NaiveDate;
use workout_core::{
    Catalog, OptionKind, ResolvedExercise, ResolvedSection, Summary, WorkoutDocument,
};

pub fn header(doc: &WorkoutDocument) {
    let date = match (doc.parsed_date(), doc.date()) {
        (Some(day), _) => long_date(day),
        (None, Some(raw)) => raw.to_string(),
        (None, None) => "Undated".to_string(),
    };

    println!("\n╭─────────────────────────────────────────╮");
    println!("│  WORKOUT  {}", date);
    if let Some(goal) = doc.goal() {
        println!("│  Goal: {}", goal);
    }
    println!("╰─────────────────────────────────────────╯");
}

fn long_date(day: NaiveDate) -> String {
    day.format("%A, %B %-d, %Y").to_string()
}

pub fn sections(sections: &[ResolvedSection], catalog: &Catalog) {
    for section in sections {
        println!();
        let mut counts = format!("{} exercises", section.exercises.len());
        if section.completed > 0 {
            counts.push_str(&format!(", {} completed", section.completed));
        }
        println!("{}  ({})", catalog.section_title(&section.key), counts);

        for exercise in &section.exercises {
            render_exercise(exercise);
        }
    }
}

fn render_exercise(exercise: &ResolvedExercise) {
    let check = if exercise.completed { "x" } else { " " };
    let number = exercise.index + 1;

    match &exercise.circuit_steps {
        Some(steps) => {
            println!(
                "  [{}] {}. {}  {}",
                check,
                number,
                exercise.name.to_uppercase(),
                exercise.detail
            );
            if steps.is_empty() {
                println!("        (no circuit steps listed)");
            }
            for (i, step) in steps.iter().enumerate() {
                println!("        {}) {}", i + 1, step);
            }
        }
        None => {
            println!(
                "  [{}] {}. {}  [{}]  {}",
                check,
                number,
                exercise.name,
                exercise.option.kind.label(),
                exercise.detail
            );
            println!("        {}", exercise.option.description);
        }
    }

    if exercise.conflict {
        let issues: Vec<&str> = exercise
            .conflicting_issues
            .iter()
            .map(|tag| tag.as_str())
            .collect();
        if is_adapted(exercise) {
            println!("        ⚠ Adapted for: {}", issues.join(", "));
        } else {
            println!("        ⚠ Not adapted, contraindicated for: {}", issues.join(", "));
        }
    }

    if !exercise.description.is_empty() {
        println!("        ℹ {}", exercise.description);
    }
}

/// Whether resolution picked a safer variant
fn is_adapted(exercise: &ResolvedExercise) -> bool {
    matches!(exercise.option.kind, OptionKind::Physio | OptionKind::AlternativeEasy)
}

pub fn summary(summary: &Summary) {
    println!();
    println!("─────────────────────────────────────────");
    println!("  Sections:     {}", summary.total_sections);
    println!("  Completed:    {}", summary.total_completed);
    println!("  Exercises:    {}", summary.total_exercises);
    println!("  Limitations:  {}", summary.active_limitations);
}
