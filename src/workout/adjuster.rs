// ABOUTME: Feedback adjuster scaling sets, reps and durations of main-workout exercises
// ABOUTME: Applies difficulty and soreness feedback at leaf granularity, including inside groups
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Feedback adjustment
//!
//! | feedback            | sets              | reps              | duration                 |
//! |---------------------|-------------------|-------------------|--------------------------|
//! | difficulty `easy`   | `max(1, s - 1)`   | `max(5, r - 3)`   | unchanged                |
//! | difficulty `hard`   | `s + 1`           | `r + 3`           | unchanged                |
//! | soreness `severe`   | unchanged         | unchanged         | `max(10, floor(n*0.75))` |
//!
//! Adjustment is applied once per generation. Calling it again with the same
//! feedback adjusts again: the function is not idempotent for any field it
//! touches.

use tracing::debug;

use crate::constants::workout::{
    MIN_DURATION_VALUE, MIN_REPS, MIN_SETS, REP_STEP, SORENESS_DURATION_FACTOR,
};
use crate::models::{Difficulty, Exercise, ExerciseGroup, ExerciseLeaf, Feedback, Soreness};

/// Adjust a main-section exercise list for the given feedback
///
/// Without feedback the input is returned unchanged. Group names and order are
/// preserved; only leaf prescriptions change.
#[must_use]
pub fn adjust_for_feedback(feedback: Option<&Feedback>, exercises: &[Exercise]) -> Vec<Exercise> {
    let Some(feedback) = feedback else {
        return exercises.to_vec();
    };

    debug!(
        difficulty = ?feedback.difficulty,
        soreness = ?feedback.soreness,
        "Adjusting main workout for feedback"
    );

    exercises
        .iter()
        .map(|exercise| match exercise {
            Exercise::Leaf(leaf) => Exercise::Leaf(adjust_leaf(feedback, leaf)),
            Exercise::Group(group) => Exercise::Group(ExerciseGroup {
                name: group.name.clone(),
                exercises: group
                    .exercises
                    .iter()
                    .map(|leaf| adjust_leaf(feedback, leaf))
                    .collect(),
            }),
        })
        .collect()
}

/// Adjust a single leaf
#[must_use]
pub fn adjust_leaf(feedback: &Feedback, leaf: &ExerciseLeaf) -> ExerciseLeaf {
    let mut adjusted = leaf.clone();

    match feedback.difficulty {
        Some(Difficulty::Easy) => {
            adjusted.sets = leaf.sets.map(|sets| sets.saturating_sub(1).max(MIN_SETS));
            adjusted.reps = leaf
                .reps
                .map(|reps| reps.saturating_sub(REP_STEP).max(MIN_REPS));
        }
        Some(Difficulty::Hard) => {
            adjusted.sets = leaf.sets.map(|sets| sets.saturating_add(1));
            adjusted.reps = leaf.reps.map(|reps| reps.saturating_add(REP_STEP));
        }
        _ => {}
    }

    if feedback.soreness == Some(Soreness::Severe) {
        adjusted.duration = leaf.duration.as_deref().map(shorten_duration);
    }

    adjusted
}

/// Shorten a `<number> <unit>` duration for severe soreness
///
/// Only the first occurrence of the leading numeral is rewritten and the rest
/// of the string is kept verbatim. A leading token that is not an integer
/// leaves the duration unchanged, and so does one outside the `i64` range.
#[must_use]
pub fn shorten_duration(duration: &str) -> String {
    let Some(token) = duration.split_whitespace().next() else {
        return duration.to_owned();
    };
    let Ok(value) = token.parse::<i64>() else {
        return duration.to_owned();
    };

    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    let scaled = (value as f64 * SORENESS_DURATION_FACTOR).floor() as i64;
    let reduced = scaled.max(MIN_DURATION_VALUE);

    duration.replacen(token, &reduced.to_string(), 1)
}
