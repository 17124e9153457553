// ABOUTME: Prompt builder rendering a user profile, prior sessions and feedback into LLM request text
// ABOUTME: Deterministic template with fixed formatting and optional circuit or superset instructions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::workout::{GROUP_COUNT, GROUP_SIZE, PROMPT_HISTORY_LIMIT, TARGET_EXERCISE_COUNT};
use crate::models::{Difficulty, Feedback, HistoryEntry, Soreness, UserProfile};

/// Placeholder for feedback fields the user left out
const UNSPECIFIED: &str = "unspecified";

const FORMAT_INSTRUCTIONS: &str = "\nFormat each exercise as: Name - Description\n\
Include in the description: muscle group, sets, reps or duration\n\
Example: Squats - Quads and glutes, 3 sets x 12 reps\n";

/// Build the user prompt for a plan request
///
/// `prior_history` is ordered most-recent-last; only the last three entries are
/// rendered. The function is pure.
#[must_use]
pub fn build_prompt(
    profile: &UserProfile,
    prior_history: &[HistoryEntry],
    feedback: Option<&Feedback>,
) -> String {
    let equipment = if profile.equipment.is_empty() {
        "none".to_owned()
    } else {
        profile.equipment.join(", ")
    };

    let mut prompt = format!(
        "Create a workout plan with exactly {TARGET_EXERCISE_COUNT} exercises for a {}-year-old {} \
         with {} experience level. Goal: {}. Available equipment: {equipment}. \
         Workout days per week: {}.\n",
        profile.age, profile.gender, profile.experience, profile.goal, profile.days_per_week,
    );

    if !prior_history.is_empty() {
        prompt.push_str("\nPrevious workouts:\n");
        let skip = prior_history.len().saturating_sub(PROMPT_HISTORY_LIMIT);
        for entry in &prior_history[skip..] {
            prompt.push_str(&history_line(entry));
        }
    }

    if let Some(feedback) = feedback {
        prompt.push_str(&format!(
            "\nCurrent feedback: Difficulty={}, Soreness={}, Energy={}\n",
            feedback
                .difficulty
                .as_ref()
                .map_or(UNSPECIFIED, Difficulty::as_str),
            feedback
                .soreness
                .as_ref()
                .map_or(UNSPECIFIED, Soreness::as_str),
            feedback.energy_level.as_deref().unwrap_or(UNSPECIFIED),
        ));
    }

    prompt.push_str(FORMAT_INSTRUCTIONS);

    if profile.wants_circuit() {
        prompt.push_str(&format!(
            "Structure as {GROUP_COUNT} circuits with {GROUP_SIZE} exercises each.\n"
        ));
    } else if profile.wants_superset() {
        prompt.push_str(&format!(
            "Structure as {GROUP_COUNT} supersets with {GROUP_SIZE} exercises each.\n"
        ));
    }

    prompt
}

fn history_line(entry: &HistoryEntry) -> String {
    let plan = serde_json::to_string(&entry.workout_plan).unwrap_or_default();
    let mut line = format!("- {}: {plan}\n", entry.created_at.format("%Y-%m-%d"));
    if let Some(feedback) = &entry.feedback {
        let feedback = serde_json::to_string(feedback).unwrap_or_default();
        line.push_str(&format!("  Feedback: {feedback}\n"));
    }
    line
}
