// ABOUTME: Criterion benchmarks for the synchronous plan pipeline stages
// ABOUTME: Measures exercise parsing, composition with feedback adjustment and PDF rendering
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Criterion benchmarks for the plan pipeline.
//!
//! Everything between the LLM call and the file write is pure and CPU-bound,
//! so each stage is measured on its own for completions of increasing length.

#![allow(
    clippy::missing_docs_in_private_items,
    clippy::unwrap_used,
    missing_docs
)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use pierre_workout_planner::models::{Difficulty, Feedback, Soreness};
use pierre_workout_planner::rendering::render_plan_pdf;
use pierre_workout_planner::workout::{
    adjust_for_feedback, assemble_plan, compose_main_workout, parse_exercises,
};

const LINE_COUNTS: [usize; 3] = [5, 50, 500];

const LINE_TEMPLATES: [&str; 4] = [
    "Squats - Quads and glutes, 3 sets x 12 reps",
    "Push-ups \u{2013} Chest and triceps, 3 sets x 10 reps",
    "Plank - Core, 3 sets, 45 sec hold",
    "Jump Rope - Conditioning, 2 min",
];

fn completion(lines: usize) -> String {
    (0..lines)
        .map(|i| LINE_TEMPLATES[i % LINE_TEMPLATES.len()])
        .collect::<Vec<_>>()
        .join("\n")
}

fn feedback() -> Feedback {
    Feedback {
        difficulty: Some(Difficulty::Hard),
        soreness: Some(Soreness::Severe),
        energy_level: None,
    }
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_exercises");

    for lines in LINE_COUNTS {
        let text = completion(lines);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(lines), &text, |b, text| {
            b.iter(|| parse_exercises(black_box(text)));
        });
    }

    group.finish();
}

fn bench_compose_and_adjust(c: &mut Criterion) {
    let mut group = c.benchmark_group("compose_and_adjust");
    let parsed = parse_exercises(&completion(5));
    let feedback = feedback();

    for (label, circuit) in [("flat", false), ("circuit", true)] {
        group.bench_function(label, |b| {
            b.iter(|| {
                let (_, main) = compose_main_workout(black_box(parsed.clone()), circuit, false);
                let adjusted = adjust_for_feedback(Some(&feedback), &main);
                assemble_plan(adjusted)
            });
        });
    }

    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_plan_pdf");

    for lines in LINE_COUNTS {
        let (_, main) = compose_main_workout(parse_exercises(&completion(lines)), false, false);
        // flat layout keeps five leaves, so pad the main section to stress pagination
        let mut exercises = main;
        while exercises.len() < lines {
            exercises.extend_from_within(..exercises.len().min(lines - exercises.len()));
        }
        let plan = assemble_plan(exercises);

        group.bench_with_input(BenchmarkId::from_parameter(lines), &plan, |b, plan| {
            b.iter(|| render_plan_pdf(black_box(plan)).unwrap());
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_parse,
    bench_compose_and_adjust,
    bench_render
);
criterion_main!(benches);
