// ABOUTME: Coach chat and stats commands for thryvin-cli
// ABOUTME: Routes a single message through the coach service using the cached plan
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Thryvin

use thryvin::clock::Clock;
use thryvin::coach::{CoachService, ReplySource, RouterContext};
use tracing::debug;

use crate::helpers::display::display_stats;
use crate::App;

/// Answer one coach message
pub async fn ask(app: &App, message: &str) {
    let mut store = app.workout_store();
    if !store.load_cached().await {
        debug!("No cached plan; local answers will not see scheduled days");
    }
    let stats = store.history().stats().await;
    let bests = store.history().personal_bests().await;

    let mut coach = CoachService::new(app.api.clone(), &app.config.coach_id);
    let ctx = RouterContext::new(app.clock.today(), store.days(), &stats, &bests);
    let reply = coach.handle_message(message, ctx).await;

    let label = match reply.source {
        ReplySource::Local => "Thryvin",
        ReplySource::Coach | ReplySource::Fallback => "Coach",
    };
    println!("{label}: {}", reply.text);
}

/// Print stats and personal bests
pub async fn stats(app: &App) {
    let store = app.workout_store();
    let stats = store.history().stats().await;
    let bests = store.history().personal_bests().await;
    display_stats(&stats, &bests);
}
