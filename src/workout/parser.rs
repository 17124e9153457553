// ABOUTME: Parser converting free-text LLM exercise lists into structured exercise records
// ABOUTME: Splits "Name - details" lines and extracts sets, reps and duration by pattern search
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Exercise line parser
//!
//! A line is an exercise line iff it contains a dash separator. The text
//! before the first separator is the name and everything after it is the
//! details string. The en dash (U+2013) takes precedence over the ASCII
//! hyphen so that `Push-ups – 3 sets` keeps its hyphenated name. No
//! other dash character separates.
//!
//! Structured fields are found anywhere in the details, first match wins:
//!
//! | field    | pattern                                   |
//! |----------|-------------------------------------------|
//! | sets     | `<int> set` / `<int> sets`                |
//! | reps     | `<int> rep` / `<int> reps`                |
//! | duration | `<int> sec\|min\|minutes\|seconds` (any case), kept verbatim |

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::models::ExerciseLeaf;

/// En dash, preferred over the ASCII hyphen
const DASH_SEPARATOR: char = '\u{2013}';

/// ASCII fallback separator
const HYPHEN_SEPARATOR: char = '-';

// Stored as Option so a pattern failure degrades to "field not found"
static SETS_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"([0-9]+)\s*sets?").ok());

static REPS_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"([0-9]+)\s*reps?").ok());

static DURATION_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)[0-9]+\s*(?:sec|min|minutes|seconds)").ok());

/// Parse every exercise line of an LLM completion, in input order
///
/// Blank lines and lines without a separator are skipped. This never fails:
/// malformed input yields fewer (possibly zero) records.
#[must_use]
pub fn parse_exercises(raw_text: &str) -> Vec<ExerciseLeaf> {
    let exercises: Vec<ExerciseLeaf> = raw_text.lines().filter_map(parse_exercise_line).collect();
    debug!(count = exercises.len(), "Parsed exercises from model output");
    exercises
}

/// Parse a single line, returning `None` when it is not an exercise line
#[must_use]
pub fn parse_exercise_line(line: &str) -> Option<ExerciseLeaf> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let (name, details) = split_name_details(line)?;

    let exercise = ExerciseLeaf {
        name: name.to_owned(),
        sets: first_count(&SETS_PATTERN, details),
        reps: first_count(&REPS_PATTERN, details),
        duration: DURATION_PATTERN
            .as_ref()
            .and_then(|pattern| pattern.find(details))
            .map(|m| m.as_str().to_owned()),
        details: Some(details.to_owned()),
    };

    debug!(name = %exercise.name, "Parsed exercise");
    Some(exercise)
}

/// Split at the first en dash, or at the first hyphen when the line has none
fn split_name_details(line: &str) -> Option<(&str, &str)> {
    let separator = if line.contains(DASH_SEPARATOR) {
        DASH_SEPARATOR
    } else {
        HYPHEN_SEPARATOR
    };
    let index = line.find(separator)?;

    let name = line[..index].trim();
    let details = line[index + separator.len_utf8()..].trim();
    Some((name, details))
}

/// First captured positive integer for `pattern` in `text`
fn first_count(pattern: &LazyLock<Option<Regex>>, text: &str) -> Option<u32> {
    pattern
        .as_ref()?
        .captures(text)?
        .get(1)?
        .as_str()
        .parse::<u32>()
        .ok()
        .filter(|count| *count > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_prefers_dash_over_hyphen() {
        assert_eq!(
            split_name_details("Push-ups \u{2013} 3 sets"),
            Some(("Push-ups", "3 sets"))
        );
        assert_eq!(
            split_name_details("Squats - 3 sets - slow"),
            Some(("Squats", "3 sets - slow"))
        );
        assert_eq!(split_name_details("No separator here"), None);
        assert_eq!(split_name_details("Plank \u{2014} hold 30 sec"), None);
    }

    #[test]
    fn test_zero_count_is_not_extracted() {
        assert_eq!(first_count(&SETS_PATTERN, "0 sets"), None);
        assert_eq!(first_count(&SETS_PATTERN, "4 sets"), Some(4));
    }
}
