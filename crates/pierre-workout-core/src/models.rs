// ABOUTME: Workout domain models shared across the planner pipeline
// ABOUTME: Profiles, feedback, leaf and grouped exercises, sections, plans and history entries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Workout Models
//!
//! Exercises are modelled as a tagged variant: an [`ExerciseLeaf`] is a single
//! movement with optional prescription fields, and an [`ExerciseGroup`] is a
//! named cluster of leaves (a circuit round or a superset pair). Because a
//! group holds `ExerciseLeaf` values directly, groups can never nest.
//!
//! On the wire the variants are untagged: a leaf is `{name, sets?, reps?, duration?, details?}` and a group
//! is `{name, exercises: [...]}`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::errors::{AppError, AppResult};

// ============================================================================
// Loosely-typed enumerations
// ============================================================================

/// Declares an enum parsed from free text by exact match, keeping any
/// other value (including a different casing) verbatim so it can be echoed
/// back into prompts and storage.
macro_rules! free_text_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($(#[$vmeta:meta])* $variant:ident => $text:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $($(#[$vmeta])* $variant,)+
            /// Any other value, kept verbatim
            Other(String),
        }

        impl $name {
            /// String form used in prompts and storage
            #[must_use]
            pub fn as_str(&self) -> &str {
                match self {
                    $(Self::$variant => $text,)+
                    Self::Other(value) => value,
                }
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                match value.as_str() {
                    $($text => Self::$variant,)+
                    _ => Self::Other(value),
                }
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::from(value.to_owned())
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                match value {
                    $name::Other(text) => text,
                    other => other.as_str().to_owned(),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

free_text_enum! {
    /// Self-reported training experience
    ExperienceLevel {
        /// New to structured training
        Beginner => "beginner",
    }
}

free_text_enum! {
    /// How hard the previous session felt
    Difficulty {
        /// Session felt easy
        Easy => "easy",
        /// Session felt too hard
        Hard => "hard",
    }
}

free_text_enum! {
    /// Muscle soreness after the previous session
    Soreness {
        /// Severe soreness; timed work is shortened
        Severe => "severe",
    }
}

// ============================================================================
// Request-side models
// ============================================================================

/// Profile of the user requesting a plan; immutable per request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Display name, also the identity key for history lookups
    pub name: String,
    /// Age in years
    pub age: u32,
    /// Gender as stated by the user
    pub gender: String,
    /// Training goal (free text)
    pub goal: String,
    /// Experience level
    pub experience: ExperienceLevel,
    /// Available equipment
    #[serde(default)]
    pub equipment: Vec<String>,
    /// Planned training days per week
    pub days_per_week: u32,
    /// Structure the main workout as circuits
    #[serde(default)]
    pub include_circuit: Option<bool>,
    /// Structure the main workout as supersets
    #[serde(default)]
    pub include_superset: Option<bool>,
}

impl UserProfile {
    /// Whether circuit structuring was requested
    #[must_use]
    pub fn wants_circuit(&self) -> bool {
        self.include_circuit.unwrap_or(false)
    }

    /// Whether superset structuring was requested
    #[must_use]
    pub fn wants_superset(&self) -> bool {
        self.include_superset.unwrap_or(false)
    }

    /// Check the fields the pipeline relies on
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the name is blank or `days_per_week` is zero.
    pub fn validate(&self) -> AppResult<()> {
        if self.name.trim().is_empty() {
            return Err(AppError::invalid_input("Profile name must not be empty"));
        }
        if self.days_per_week == 0 {
            return Err(AppError::invalid_input(
                "days_per_week must be a positive integer",
            ));
        }
        Ok(())
    }
}

/// Feedback about the previous session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    /// Perceived difficulty
    #[serde(default)]
    pub difficulty: Option<Difficulty>,
    /// Perceived soreness
    #[serde(default)]
    pub soreness: Option<Soreness>,
    /// Energy level (free text)
    #[serde(default)]
    pub energy_level: Option<String>,
}

// ============================================================================
// Exercises
// ============================================================================

/// A single named movement with an optional prescription
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseLeaf {
    /// Exercise name
    pub name: String,
    /// Number of sets
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sets: Option<u32>,
    /// Repetitions per set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reps: Option<u32>,
    /// Duration of the form `<number> <unit>`, kept verbatim
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    /// Free-text details as written by the model
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ExerciseLeaf {
    /// Create a leaf with only a name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set sets and reps
    #[must_use]
    pub const fn with_sets_reps(mut self, sets: u32, reps: u32) -> Self {
        self.sets = Some(sets);
        self.reps = Some(reps);
        self
    }

    /// Set the duration string
    #[must_use]
    pub fn with_duration(mut self, duration: impl Into<String>) -> Self {
        self.duration = Some(duration.into());
        self
    }

    /// Set the details string
    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// A named cluster of leaves: a circuit round or a superset pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseGroup {
    /// Group name, e.g. `Circuit Round 1`
    pub name: String,
    /// Member exercises, in order
    pub exercises: Vec<ExerciseLeaf>,
}

/// Either a leaf exercise or a group of leaves
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Exercise {
    /// Group variant; listed first so `{name, exercises}` never decodes as a leaf
    Group(ExerciseGroup),
    /// Leaf variant
    Leaf(ExerciseLeaf),
}

impl Exercise {
    /// Name of the leaf or group
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Group(group) => &group.name,
            Self::Leaf(leaf) => &leaf.name,
        }
    }

    /// Whether this is a group
    #[must_use]
    pub const fn is_group(&self) -> bool {
        matches!(self, Self::Group(_))
    }
}

impl From<ExerciseLeaf> for Exercise {
    fn from(leaf: ExerciseLeaf) -> Self {
        Self::Leaf(leaf)
    }
}

impl From<ExerciseGroup> for Exercise {
    fn from(group: ExerciseGroup) -> Self {
        Self::Group(group)
    }
}

// ============================================================================
// Sections and plans
// ============================================================================

/// Labeled phase of a workout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SectionKind {
    /// Static warm-up block
    #[serde(rename = "Warm-up")]
    WarmUp,
    /// Generated main block
    #[serde(rename = "Main Workout")]
    Main,
    /// Static cool-down block
    #[serde(rename = "Cool-down")]
    CoolDown,
    /// Circuit block
    #[serde(rename = "Circuit")]
    Circuit,
    /// Superset block
    #[serde(rename = "Superset")]
    Superset,
}

impl SectionKind {
    /// Display label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::WarmUp => "Warm-up",
            Self::Main => "Main Workout",
            Self::CoolDown => "Cool-down",
            Self::Circuit => "Circuit",
            Self::Superset => "Superset",
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A labeled, ordered list of exercises
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Section label
    pub section: SectionKind,
    /// Exercises in this section
    pub exercises: Vec<Exercise>,
}

impl Section {
    /// Create a section
    #[must_use]
    pub const fn new(section: SectionKind, exercises: Vec<Exercise>) -> Self {
        Self { section, exercises }
    }

    /// True when the section is all leaves or all groups (empty counts as uniform)
    #[must_use]
    pub fn is_uniform(&self) -> bool {
        let groups = self.exercises.iter().filter(|e| e.is_group()).count();
        groups == 0 || groups == self.exercises.len()
    }
}

/// Ordered sequence of sections
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkoutPlan {
    sections: Vec<Section>,
}

impl WorkoutPlan {
    /// Create a plan from sections
    #[must_use]
    pub const fn new(sections: Vec<Section>) -> Self {
        Self { sections }
    }

    /// All sections in order
    #[must_use]
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// First section with the given label
    #[must_use]
    pub fn section(&self, kind: SectionKind) -> Option<&Section> {
        self.sections.iter().find(|s| s.section == kind)
    }

    /// Return a plan whose main section holds `exercises` instead of its current content
    #[must_use]
    pub fn with_main_exercises(mut self, exercises: Vec<Exercise>) -> Self {
        if let Some(main) = self
            .sections
            .iter_mut()
            .find(|s| s.section == SectionKind::Main)
        {
            main.exercises = exercises;
        }
        self
    }
}

// ============================================================================
// History
// ============================================================================

/// One persisted plan generation for a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Entry identifier
    pub id: Uuid,
    /// Owner of the entry
    pub user_name: String,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Plan that was generated
    pub workout_plan: WorkoutPlan,
    /// Feedback that preceded the plan
    pub feedback: Option<Feedback>,
}

impl HistoryEntry {
    /// Create an entry stamped with the current time
    pub fn new(
        user_name: impl Into<String>,
        workout_plan: WorkoutPlan,
        feedback: Option<Feedback>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_name: user_name.into(),
            created_at: Utc::now(),
            workout_plan,
            feedback,
        }
    }
}

// ============================================================================
// API payloads
// ============================================================================

/// Inbound plan generation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutRequest {
    /// User profile
    pub profile: UserProfile,
    /// Feedback on the previous session
    #[serde(default)]
    pub previous_feedback: Option<Feedback>,
}

/// Outbound plan generation response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutPlanResponse {
    /// Status message
    pub message: String,
    /// User name the plan was generated for
    pub user: String,
    /// Generated plan
    pub workout_plan: WorkoutPlan,
    /// File name of the rendered PDF
    pub pdf_file: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_free_text_enum_parsing() {
        assert_eq!(Difficulty::from("easy"), Difficulty::Easy);
        assert_eq!(Difficulty::from("hard"), Difficulty::Hard);
        assert_eq!(
            Difficulty::from("moderate"),
            Difficulty::Other("moderate".to_owned())
        );
        assert_eq!(Soreness::from("severe"), Soreness::Severe);
        assert_eq!(ExperienceLevel::from("advanced").as_str(), "advanced");
    }

    #[test]
    fn test_free_text_enum_matching_is_exact() {
        assert_eq!(Difficulty::from(" Hard "), Difficulty::Other(" Hard ".to_owned()));
        assert_eq!(Difficulty::from("HARD").as_str(), "HARD");
        assert_eq!(Soreness::from("SEVERE"), Soreness::Other("SEVERE".to_owned()));
        assert_eq!(String::from(Difficulty::from("Easy")), "Easy");
    }

    #[test]
    fn test_exercise_json_shapes() {
        let leaf: Exercise = serde_json::from_value(json!({"name": "Plank", "duration": "30 sec"})).unwrap();
        assert_eq!(
            leaf,
            Exercise::Leaf(ExerciseLeaf::new("Plank").with_duration("30 sec"))
        );

        let group: Exercise = serde_json::from_value(json!({
            "name": "Superset 1",
            "exercises": [{"name": "Squat", "sets": 3, "reps": 10}]
        }))
        .unwrap();
        assert!(group.is_group());
        assert_eq!(group.name(), "Superset 1");

        let value = serde_json::to_value(ExerciseLeaf::new("Lunge").with_sets_reps(2, 12)).unwrap();
        assert_eq!(value, json!({"name": "Lunge", "sets": 2, "reps": 12}));
    }

    #[test]
    fn test_plan_serializes_as_section_list() {
        let plan = WorkoutPlan::new(vec![Section::new(
            SectionKind::WarmUp,
            vec![ExerciseLeaf::new("Jumping Jacks").with_duration("2 min").into()],
        )]);
        let value = serde_json::to_value(&plan).unwrap();
        assert_eq!(
            value,
            json!([{"section": "Warm-up", "exercises": [{"name": "Jumping Jacks", "duration": "2 min"}]}])
        );
    }

    #[test]
    fn test_with_main_exercises_replaces_only_main() {
        let plan = WorkoutPlan::new(vec![
            Section::new(SectionKind::WarmUp, vec![ExerciseLeaf::new("A").into()]),
            Section::new(SectionKind::Main, vec![ExerciseLeaf::new("B").into()]),
        ]);
        let plan = plan.with_main_exercises(vec![ExerciseLeaf::new("C").into()]);

        assert_eq!(plan.section(SectionKind::WarmUp).unwrap().exercises[0].name(), "A");
        assert_eq!(plan.section(SectionKind::Main).unwrap().exercises[0].name(), "C");
    }

    #[test]
    fn test_profile_validation() {
        let mut profile: UserProfile = serde_json::from_value(json!({
            "name": "Sam", "age": 30, "gender": "female", "goal": "strength",
            "experience": "beginner", "days_per_week": 3, "include_circuit": null
        }))
        .unwrap();
        assert!(profile.validate().is_ok());
        assert!(!profile.wants_circuit());
        assert!(profile.equipment.is_empty());

        profile.days_per_week = 0;
        assert!(profile.validate().is_err());
    }
}
