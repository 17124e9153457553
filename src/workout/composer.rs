// ABOUTME: Composes parsed exercises into the main workout section and the full three-part plan
// ABOUTME: Chooses circuit, superset or flat layout and owns the static warm-up and cool-down tables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Plan composition
//!
//! Layout precedence is circuit, then superset, then flat. Grouping needs at
//! least [`MIN_EXERCISES_FOR_GROUPING`] parsed exercises; with fewer the main
//! section falls back to the flat layout regardless of the requested flags.

use std::fmt;

use crate::constants::workout::{
    GROUP_COUNT, GROUP_SIZE, MIN_EXERCISES_FOR_GROUPING, TARGET_EXERCISE_COUNT,
};
use crate::models::{Exercise, ExerciseGroup, ExerciseLeaf, Section, SectionKind, WorkoutPlan};

/// Shape chosen for the main section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainLayout {
    /// Groups named `Circuit Round N`
    Circuit,
    /// Groups named `Superset N`
    Superset,
    /// Up to five plain leaves
    Flat,
}

impl MainLayout {
    /// Pick the layout for `parsed_count` exercises and the requested structure flags
    #[must_use]
    pub const fn choose(parsed_count: usize, want_circuit: bool, want_superset: bool) -> Self {
        if parsed_count < MIN_EXERCISES_FOR_GROUPING {
            Self::Flat
        } else if want_circuit {
            Self::Circuit
        } else if want_superset {
            Self::Superset
        } else {
            Self::Flat
        }
    }

    fn group_name(self, ordinal: usize) -> String {
        match self {
            Self::Circuit => format!("Circuit Round {ordinal}"),
            Self::Superset => format!("Superset {ordinal}"),
            Self::Flat => String::new(),
        }
    }
}

impl fmt::Display for MainLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Circuit => "circuit",
            Self::Superset => "superset",
            Self::Flat => "flat",
        };
        f.write_str(label)
    }
}

/// Build the main-section exercise list from parsed leaves
///
/// Grouped layouts consume exactly the first four leaves and drop the rest.
/// The flat layout keeps at most the first five.
#[must_use]
pub fn compose_main_workout(
    parsed: Vec<ExerciseLeaf>,
    want_circuit: bool,
    want_superset: bool,
) -> (MainLayout, Vec<Exercise>) {
    let layout = MainLayout::choose(parsed.len(), want_circuit, want_superset);

    let exercises = match layout {
        MainLayout::Flat => parsed
            .into_iter()
            .take(TARGET_EXERCISE_COUNT)
            .map(Exercise::Leaf)
            .collect(),
        MainLayout::Circuit | MainLayout::Superset => {
            let mut leaves = parsed.into_iter();
            (1..=GROUP_COUNT)
                .map(|ordinal| {
                    Exercise::Group(ExerciseGroup {
                        name: layout.group_name(ordinal),
                        exercises: leaves.by_ref().take(GROUP_SIZE).collect(),
                    })
                })
                .collect()
        }
    };

    (layout, exercises)
}

/// Wrap a main section with the static warm-up and cool-down
#[must_use]
pub fn assemble_plan(main_exercises: Vec<Exercise>) -> WorkoutPlan {
    WorkoutPlan::new(vec![
        Section::new(SectionKind::WarmUp, template_exercises(&WARM_UP)),
        Section::new(SectionKind::Main, main_exercises),
        Section::new(SectionKind::CoolDown, template_exercises(&COOL_DOWN)),
    ])
}

// ============================================================================
// Static tables
// ============================================================================

struct TemplateExercise {
    name: &'static str,
    prescription: Prescription,
}

enum Prescription {
    Timed(&'static str),
    Counted { sets: u32, reps: u32 },
}

impl TemplateExercise {
    const fn timed(name: &'static str, duration: &'static str) -> Self {
        Self {
            name,
            prescription: Prescription::Timed(duration),
        }
    }

    const fn counted(name: &'static str, sets: u32, reps: u32) -> Self {
        Self {
            name,
            prescription: Prescription::Counted { sets, reps },
        }
    }

    fn to_exercise(&self) -> Exercise {
        let leaf = ExerciseLeaf::new(self.name);
        let leaf = match self.prescription {
            Prescription::Timed(duration) => leaf.with_duration(duration),
            Prescription::Counted { sets, reps } => leaf.with_sets_reps(sets, reps),
        };
        Exercise::Leaf(leaf)
    }
}

const WARM_UP: [TemplateExercise; 5] = [
    TemplateExercise::timed("Jumping Jacks", "2 min"),
    TemplateExercise::counted("Arm Circles", 2, 15),
    TemplateExercise::timed("Mountain Climbers", "30 sec"),
    TemplateExercise::counted("Inchworm Walkouts", 2, 10),
    TemplateExercise::counted("Wall Angels", 2, 15),
];

const COOL_DOWN: [TemplateExercise; 6] = [
    TemplateExercise::timed("Child's Pose", "1 min"),
    TemplateExercise::timed("Chest Stretch", "30 sec each side"),
    TemplateExercise::timed("Hamstring Stretch", "30 sec"),
    TemplateExercise::timed("Seated Hamstring Stretch", "30 sec"),
    TemplateExercise::timed("Quad Stretch", "30 sec"),
    TemplateExercise::timed("Doorway Chest Stretch", "30 sec"),
];

fn template_exercises(table: &[TemplateExercise]) -> Vec<Exercise> {
    table.iter().map(TemplateExercise::to_exercise).collect()
}
