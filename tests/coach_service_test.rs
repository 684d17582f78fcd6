// ABOUTME: Tests for the coach chat service
// ABOUTME: History windowing, request shape, fallback replies, and proposal follow-ups
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Thryvin

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::{date, init_test_logging, monday, sample_workout, FakeCoach};
use thryvin::coach::{CoachService, PendingAction, ReplySource, RouterContext, FALLBACK_REPLY};
use thryvin::models::{DayEntry, MessageRole, WorkoutStats};

fn plan() -> Vec<DayEntry> {
    vec![
        DayEntry::workout(monday(), sample_workout("Lower Body", &["Back Squat"])),
        DayEntry::rest(date(2025, 3, 4)),
        DayEntry::workout(date(2025, 3, 5), sample_workout("Upper Body", &["Bench Press"])),
    ]
}

#[tokio::test]
async fn test_forwarded_request_carries_coach_and_context() {
    init_test_logging();
    let coach = FakeCoach::replying("Hydrate and sleep well.");
    let mut service = CoachService::new(coach.clone(), "coach-maya");
    let days = plan();
    let stats = WorkoutStats::default();

    let reply = service
        .handle_message(
            "Any tips for recovery?",
            RouterContext::new(monday(), &days, &stats, &[]),
        )
        .await;

    assert_eq!(reply.source, ReplySource::Coach);
    assert_eq!(reply.text, "Hydrate and sleep well.");
    let requests = coach.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].message, "Any tips for recovery?");
    assert_eq!(requests[0].coach_id, "coach-maya");
    assert_eq!(requests[0].context_mode, "in_app");
    assert!(requests[0].conversation_history.is_empty());
    assert_eq!(service.history().len(), 2);
}

#[tokio::test]
async fn test_only_last_ten_messages_are_sent() {
    init_test_logging();
    let coach = FakeCoach::replying("ok");
    let mut service = CoachService::new(coach.clone(), "default");
    let stats = WorkoutStats::default();

    for i in 0..8 {
        service
            .handle_message(
                &format!("question number {i}"),
                RouterContext::new(monday(), &[], &stats, &[]),
            )
            .await;
    }

    let last = coach.requests().pop().unwrap();
    assert_eq!(last.conversation_history.len(), 10);
    // 14 messages preceded the last one; the window starts at the 5th
    assert_eq!(last.conversation_history[0].content, "question number 2");
    assert_eq!(last.conversation_history[0].role, MessageRole::User);
    assert_eq!(last.conversation_history[9].role, MessageRole::Assistant);
    assert_eq!(service.history().len(), 16);
}

#[tokio::test]
async fn test_coach_failure_returns_fallback() {
    init_test_logging();
    let mut service = CoachService::new(FakeCoach::failing(), "default");
    let stats = WorkoutStats::default();

    let reply = service
        .handle_message(
            "Tell me about deload weeks",
            RouterContext::new(monday(), &[], &stats, &[]),
        )
        .await;

    assert_eq!(reply.source, ReplySource::Fallback);
    assert_eq!(reply.text, FALLBACK_REPLY);
    assert!(service
        .history()
        .iter()
        .all(|m| m.content != FALLBACK_REPLY));
}

#[tokio::test]
async fn test_local_answers_do_not_call_coach() {
    init_test_logging();
    let coach = FakeCoach::replying("unused");
    let mut service = CoachService::new(coach.clone(), "default");
    let days = plan();
    let stats = WorkoutStats::default();

    let reply = service
        .handle_message(
            "what's today's workout",
            RouterContext::new(monday(), &days, &stats, &[]),
        )
        .await;

    assert_eq!(reply.source, ReplySource::Local);
    assert!(reply.text.contains("Lower Body"));
    assert!(coach.requests().is_empty());
    assert_eq!(service.history().len(), 2);
}

#[tokio::test]
async fn test_accepted_proposal_shows_next_workout() {
    init_test_logging();
    let coach = FakeCoach::replying("unused");
    let mut service = CoachService::new(coach.clone(), "default");
    let days = plan();
    let stats = WorkoutStats::default();
    let today = date(2025, 3, 4);

    let reply = service
        .handle_message("rest day today?", RouterContext::new(today, &days, &stats, &[]))
        .await;
    assert!(reply.text.ends_with("Want to see your next workout on Wednesday?"));
    assert_eq!(
        service.pending(),
        Some(&PendingAction::ShowWorkout(date(2025, 3, 5)))
    );

    let reply = service
        .handle_message("yes", RouterContext::new(today, &days, &stats, &[]))
        .await;
    assert_eq!(reply.source, ReplySource::Local);
    assert!(reply.text.starts_with("Wednesday: Upper Body"));
    assert!(service.pending().is_none());
    assert!(coach.requests().is_empty());
}

#[tokio::test]
async fn test_declined_proposal() {
    init_test_logging();
    let mut service = CoachService::new(FakeCoach::replying("unused"), "default");
    let days = plan();
    let stats = WorkoutStats::default();
    let today = date(2025, 3, 4);

    service
        .handle_message("is today a rest day", RouterContext::new(today, &days, &stats, &[]))
        .await;
    let reply = service
        .handle_message("nope", RouterContext::new(today, &days, &stats, &[]))
        .await;

    assert!(reply.text.starts_with("No problem"));
    assert!(service.pending().is_none());
}

#[tokio::test]
async fn test_proposal_expires_after_one_message() {
    init_test_logging();
    let coach = FakeCoach::replying("Sure thing.");
    let mut service = CoachService::new(coach.clone(), "default");
    let days = plan();
    let stats = WorkoutStats::default();
    let today = date(2025, 3, 4);

    service
        .handle_message("rest day today?", RouterContext::new(today, &days, &stats, &[]))
        .await;
    service
        .handle_message("How long should I stretch?", RouterContext::new(today, &days, &stats, &[]))
        .await;
    let reply = service
        .handle_message("yes", RouterContext::new(today, &days, &stats, &[]))
        .await;

    assert_eq!(reply.source, ReplySource::Coach);
    assert_eq!(coach.requests().len(), 2);
}

#[tokio::test]
async fn test_empty_message_is_answered_locally() {
    init_test_logging();
    let coach = FakeCoach::replying("unused");
    let mut service = CoachService::new(coach.clone(), "default");
    let stats = WorkoutStats::default();

    let reply = service
        .handle_message("   ", RouterContext::new(monday(), &[], &stats, &[]))
        .await;

    assert_eq!(reply.source, ReplySource::Local);
    assert!(coach.requests().is_empty());
    assert!(service.history().is_empty());
}
