// ABOUTME: Integration tests for plan layout, pagination and PDF output
// ABOUTME: Uses the recording page writer to check positions and page breaks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(clippy::float_cmp)]
#![allow(missing_docs)]

use chrono::{TimeZone, Utc};
use pierre_workout_planner::models::{
    Exercise, ExerciseGroup, ExerciseLeaf, Section, SectionKind, WorkoutPlan,
};
use pierre_workout_planner::rendering::{
    leaf_line, pdf_file_name, render_plan_pdf, render_plan_to_file, DrawCommand, PageLayout,
    PlanRenderer, RecordingPageWriter,
};
use pierre_workout_planner::workout::assemble_plan;
use tempfile::TempDir;

fn record(plan: &WorkoutPlan) -> RecordingPageWriter {
    let mut writer = RecordingPageWriter::new();
    PlanRenderer::new(&mut writer, PageLayout::default())
        .render(plan)
        .unwrap();
    writer
}

fn long_plan(leaves: usize) -> WorkoutPlan {
    let exercises = (0..leaves)
        .map(|i| ExerciseLeaf::new(format!("Move {i}")).with_sets_reps(3, 10).into())
        .collect();
    WorkoutPlan::new(vec![Section::new(SectionKind::Main, exercises)])
}

#[test]
fn test_leaf_line_precedence() {
    assert_eq!(
        leaf_line(
            &ExerciseLeaf::new("Squats")
                .with_sets_reps(3, 12)
                .with_duration("30 sec")
        ),
        "- Squats, 3 sets x 12 reps"
    );
    assert_eq!(
        leaf_line(&ExerciseLeaf::new("Plank").with_duration("45 sec").with_details("Core")),
        "- Plank, 45 sec"
    );
    assert_eq!(
        leaf_line(&ExerciseLeaf::new("Walk").with_details("easy pace")),
        "- Walk, easy pace"
    );
    assert_eq!(leaf_line(&ExerciseLeaf::new("Rest")), "- Rest");
}

#[test]
fn test_title_sections_and_indentation() {
    let plan = WorkoutPlan::new(vec![Section::new(
        SectionKind::Main,
        vec![
            ExerciseLeaf::new("Squats").with_sets_reps(3, 12).into(),
            Exercise::Group(ExerciseGroup {
                name: "Superset 1".to_owned(),
                exercises: vec![ExerciseLeaf::new("Rows").with_sets_reps(3, 10)],
            }),
        ],
    )]);

    let writer = record(&plan);
    assert_eq!(
        writer.commands(),
        &[
            DrawCommand::Text { x: 100.0, y: 750.0, text: "Workout Plan".to_owned() },
            DrawCommand::Text { x: 100.0, y: 730.0, text: "Main Workout:".to_owned() },
            DrawCommand::Text { x: 110.0, y: 715.0, text: "- Squats, 3 sets x 12 reps".to_owned() },
            DrawCommand::Text { x: 110.0, y: 700.0, text: "Superset 1:".to_owned() },
            DrawCommand::Text { x: 120.0, y: 685.0, text: "- Rows, 3 sets x 10 reps".to_owned() },
        ]
    );
    assert_eq!(writer.page_count(), 1);
}

#[test]
fn test_assembled_plan_renders_all_sections_in_order() {
    let plan = assemble_plan(vec![ExerciseLeaf::new("Squats").with_sets_reps(3, 12).into()]);
    let writer = record(&plan);
    let headers: Vec<&str> = writer
        .texts()
        .into_iter()
        .filter(|t| t.ends_with(':'))
        .collect();
    assert_eq!(headers, vec!["Warm-up:", "Main Workout:", "Cool-down:"]);
}

#[test]
fn test_page_break_after_bottom_margin() {
    // header plus 50 leaves: 46 lines fit on the first page
    let writer = record(&long_plan(50));
    assert_eq!(writer.page_count(), 2);

    let commands = writer.commands();
    let break_at = commands
        .iter()
        .position(|c| *c == DrawCommand::NewPage)
        .unwrap();
    // title + 46 lines precede the break
    assert_eq!(break_at, 47);

    let DrawCommand::Text { y, .. } = &commands[break_at - 1] else {
        panic!("text expected before page break");
    };
    assert_eq!(*y, 55.0);

    let DrawCommand::Text { y, text, .. } = &commands[break_at + 1] else {
        panic!("text expected after page break");
    };
    assert_eq!(*y, 750.0);
    assert_eq!(text, "- Move 45, 3 sets x 10 reps");
}

#[test]
fn test_every_line_is_drawn_once() {
    let writer = record(&long_plan(120));
    // title + header + leaves
    assert_eq!(writer.texts().len(), 122);
    assert!(writer.page_count() >= 3);
}

#[test]
fn test_pdf_document_structure() {
    let plan = assemble_plan(vec![ExerciseLeaf::new("Squats").with_sets_reps(3, 12).into()]);
    let bytes = render_plan_pdf(&plan).unwrap();
    let text = String::from_utf8(bytes).unwrap();

    assert!(text.starts_with("%PDF-1.4\n"));
    assert!(text.ends_with("%%EOF\n"));
    assert!(text.contains("/BaseFont /Helvetica"));
    assert!(text.contains("(Workout Plan) Tj"));
    assert!(text.contains("(- Child's Pose, 1 min) Tj"));
    assert!(text.contains("/Count 1"));
}

#[test]
fn test_pdf_page_count_matches_layout() {
    let bytes = render_plan_pdf(&long_plan(50)).unwrap();
    let text = String::from_utf8(bytes).unwrap();
    assert!(text.contains("/Count 2"));
    assert!(text.contains("/Kids [4 0 R 6 0 R]"));
}

#[test]
fn test_pdf_file_name_is_path_safe() {
    let at = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();
    assert_eq!(pdf_file_name("Sam", at), "workout_Sam_20250102030405.pdf");
    assert_eq!(
        pdf_file_name("../etc/pass wd", at),
        "workout____etc_pass_wd_20250102030405.pdf"
    );
}

#[tokio::test]
async fn test_render_plan_to_file_creates_directory() {
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("nested").join("pdfs");
    let plan = assemble_plan(Vec::new());

    let path = render_plan_to_file(&plan, &target, "workout_Sam_20250102030405.pdf")
        .await
        .unwrap();

    assert_eq!(path, target.join("workout_Sam_20250102030405.pdf"));
    let bytes = tokio::fs::read(&path).await.unwrap();
    assert!(bytes.starts_with(b"%PDF-1.4"));
}
