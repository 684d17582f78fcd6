// ABOUTME: Criterion benchmarks for chat intent routing and rest-day window computation
// ABOUTME: Measures per-message routing cost over a full 21-day plan
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Thryvin

//! Criterion benchmarks for the local chat router.
//!
//! Routing runs on every chat message before any network call, so it should
//! stay well under a millisecond even against a full window.

#![allow(
    clippy::missing_docs_in_private_items,
    clippy::unwrap_used,
    missing_docs
)]

use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use thryvin::coach::{normalize, IntentRouter, RouterContext};
use thryvin::models::{DayEntry, Exercise, PersonalBest, UserProfile, Workout, WorkoutStats};
use thryvin::schedule::{window_dates, RestDayPolicy};

const MESSAGES: [&str; 8] = [
    "What's today's workout?",
    "Is tomorrow a rest day?",
    "Can you change my plan for Friday?",
    "How's my progress this month?",
    "what about tomorrow",
    "I slept badly last night, should I still train hard?",
    "Which stretches help with tight hamstrings after squats?",
    "yes",
];

fn workout(title: &str) -> Workout {
    Workout {
        title: title.to_owned(),
        workout_type: "strength".to_owned(),
        difficulty: "intermediate".to_owned(),
        duration_minutes: 45,
        exercises: ["Back Squat", "Romanian Deadlift", "Walking Lunge", "Plank"]
            .iter()
            .map(|name| Exercise {
                name: (*name).to_owned(),
                sets: 3,
                reps: "8-10".to_owned(),
                rest_seconds: 90,
                weight: None,
                duration_seconds: None,
                notes: None,
            })
            .collect(),
        overview: String::new(),
        target_muscles: "Legs".to_owned(),
        calories: None,
    }
}

fn plan() -> Vec<DayEntry> {
    let anchor = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();
    let policy = RestDayPolicy::DaysPerWeek(4);
    window_dates(anchor, 21)
        .into_iter()
        .map(|date| {
            if policy.is_rest_day(date) {
                DayEntry::rest(date)
            } else {
                DayEntry::workout(date, workout(&format!("Session {date}")))
            }
        })
        .collect()
}

fn bench_route(c: &mut Criterion) {
    let days = plan();
    let stats = WorkoutStats {
        total_workouts: 40,
        total_minutes: 1_800,
        workouts_this_week: 2,
        current_streak_days: 2,
    };
    let bests = vec![PersonalBest {
        exercise: "Back Squat".to_owned(),
        weight: 120.0,
        achieved_on: NaiveDate::from_ymd_opt(2025, 2, 27).unwrap(),
    }];
    let today = NaiveDate::from_ymd_opt(2025, 3, 5).unwrap();
    let ctx = RouterContext::new(today, &days, &stats, &bests);
    let router = IntentRouter::default();

    let mut group = c.benchmark_group("intent_router");
    group.throughput(Throughput::Elements(MESSAGES.len() as u64));
    group.bench_function("route_mixed_messages", |b| {
        b.iter(|| {
            for message in MESSAGES {
                black_box(router.route(black_box(message), &ctx));
            }
        });
    });
    group.bench_function("normalize", |b| {
        b.iter(|| {
            for message in MESSAGES {
                black_box(normalize(black_box(message)));
            }
        });
    });
    group.finish();
}

fn bench_rest_policy(c: &mut Criterion) {
    let profile = UserProfile {
        days_per_week: Some(5),
        ..UserProfile::default()
    };
    let anchor = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();

    c.bench_function("rest_policy_window", |b| {
        b.iter(|| {
            let policy = RestDayPolicy::from_profile(black_box(&profile));
            window_dates(anchor, 21)
                .into_iter()
                .filter(|d| policy.is_rest_day(*d))
                .count()
        });
    });
}

criterion_group!(benches, bench_route, bench_rest_policy);
criterion_main!(benches);
