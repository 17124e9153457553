// ABOUTME: Workout plan generation service running the full request pipeline
// ABOUTME: History lookup, prompt, LLM call, parse, compose, adjust, persist, render, respond
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Workout Plan Service
//!
//! Flow for one request:
//!
//! 1. read up to three prior sessions for the user (newest first) and
//!    reverse them to most-recent-last
//! 2. build the prompt and request a completion
//! 3. parse, compose and assemble the plan
//! 4. adjust the main section with the submitted feedback
//! 5. append the history entry, then render the PDF
//!
//! The history write happens before rendering. A render failure therefore
//! leaves a history row without a PDF; the request still fails as a whole.
//! Concurrent requests for the same user are not sequenced between the
//! history read and write.

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use tracing::{debug, info, instrument};

use crate::constants::llm::LOG_PREVIEW_CHARS;
use crate::constants::messages::PLAN_GENERATED;
use crate::constants::workout::PROMPT_HISTORY_LIMIT;
use crate::errors::AppResult;
use crate::llm::{get_workout_coach_system_prompt, ChatRequest};
use crate::logging::AppLogger;
use crate::models::{
    Exercise, Feedback, HistoryEntry, SectionKind, WorkoutPlan, WorkoutPlanResponse,
    WorkoutRequest,
};
use crate::rendering::{pdf_file_name, render_plan_to_file};
use crate::resources::ServerResources;
use crate::workout::{
    adjust_for_feedback, assemble_plan, build_prompt, compose_main_workout, parse_exercises,
};

/// Plan generation over the shared server resources
#[derive(Clone)]
pub struct WorkoutPlanService {
    resources: Arc<ServerResources>,
}

impl WorkoutPlanService {
    /// Create a service
    #[must_use]
    pub const fn new(resources: Arc<ServerResources>) -> Self {
        Self { resources }
    }

    /// Generate, persist and render a plan for `request`
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for an unusable profile, a configuration or
    /// upstream error from the LLM call, a database error from the history
    /// store, or a render error from PDF output
    #[instrument(skip(self, request), fields(user = %request.profile.name))]
    pub async fn generate(&self, request: WorkoutRequest) -> AppResult<WorkoutPlanResponse> {
        let started = Instant::now();
        let WorkoutRequest {
            profile,
            previous_feedback,
        } = request;

        profile.validate()?;
        info!(
            goal = %profile.goal,
            experience = %profile.experience,
            "Generating workout plan for user: {}",
            profile.name
        );

        let mut prior_sessions = self
            .resources
            .history
            .recent_entries(&profile.name, PROMPT_HISTORY_LIMIT)
            .await?;
        prior_sessions.reverse();
        info!("Found {} previous sessions", prior_sessions.len());

        let prompt = build_prompt(&profile, &prior_sessions, previous_feedback.as_ref());
        debug!(
            "Generated prompt: {}...",
            prompt.chars().take(LOG_PREVIEW_CHARS).collect::<String>()
        );

        let completion = self.request_exercises(prompt).await?;

        let parsed = parse_exercises(&completion);
        info!("Parsed {} exercises", parsed.len());

        let (layout, main_exercises) =
            compose_main_workout(parsed, profile.wants_circuit(), profile.wants_superset());
        info!(layout = %layout, "Composed main workout");

        let plan = adjust_main_section(
            assemble_plan(main_exercises),
            previous_feedback.as_ref(),
        );

        let entry = HistoryEntry::new(profile.name.clone(), plan.clone(), previous_feedback);
        self.resources.history.append(&entry).await?;
        info!(entry_id = %entry.id, "Saved workout history");

        let file_name = pdf_file_name(&profile.name, Utc::now());
        render_plan_to_file(&plan, &self.resources.config.output.pdf_dir, &file_name).await?;

        AppLogger::log_plan_generated(
            &profile.name,
            &layout.to_string(),
            main_exercise_count(&plan),
            u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
        );

        Ok(WorkoutPlanResponse {
            message: PLAN_GENERATED.to_owned(),
            user: profile.name,
            workout_plan: plan,
            pdf_file: file_name,
        })
    }

    async fn request_exercises(&self, prompt: String) -> AppResult<String> {
        let llm_config = &self.resources.config.llm;
        let request = ChatRequest::prompt(get_workout_coach_system_prompt(), prompt)
            .with_temperature(llm_config.temperature)
            .with_max_tokens(llm_config.max_tokens);

        let response = self.resources.llm.complete(&request).await?;
        debug!(
            provider = self.resources.llm.name(),
            model = %response.model,
            "LLM response: {}...",
            response.content.chars().take(LOG_PREVIEW_CHARS).collect::<String>()
        );
        Ok(response.content)
    }
}

/// Replace the main section with its feedback-adjusted copy
fn adjust_main_section(plan: WorkoutPlan, feedback: Option<&Feedback>) -> WorkoutPlan {
    let Some(feedback) = feedback else {
        return plan;
    };
    let adjusted = plan
        .section(SectionKind::Main)
        .map(|main| adjust_for_feedback(Some(feedback), &main.exercises))
        .unwrap_or_default();
    plan.with_main_exercises(adjusted)
}

/// Leaves in the main section, counting group members
fn main_exercise_count(plan: &WorkoutPlan) -> usize {
    plan.section(SectionKind::Main).map_or(0, |main| {
        main.exercises
            .iter()
            .map(|exercise| match exercise {
                Exercise::Group(group) => group.exercises.len(),
                Exercise::Leaf(_) => 1,
            })
            .sum()
    })
}
