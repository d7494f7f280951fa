#![forbid(unsafe_code)]

//! Core domain model and business logic for the wod workout player.
//!
//! This crate provides:
//! - Domain types (documents, sections, exercises, options)
//! - Document loading
//! - Variant resolution engine
//! - Session state (limitation profile, completion flags)
//! - Display catalog and configuration

pub mod types;
pub mod error;
pub mod document;
pub mod state;
pub mod engine;
pub mod session;
pub mod catalog;
pub mod config;
pub mod logging;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use state::{CompletionState, UserProfile};
pub use engine::{
    circuit_steps, conflicting_issues, has_conflict, is_circuit, resolve, summarize,
    toggle_completion, ResolvedExercise, ResolvedSection,
};
pub use session::{Session, SessionPhase};
pub use catalog::Catalog;
pub use config::Config;
