// ABOUTME: Ordered first-match-wins intent rules for coach chat messages
// ABOUTME: Decides between a local read-only answer, a confirmation, or forwarding to the coach
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Thryvin

//! Intent router
//!
//! Rules are plain data: a name, a matcher and a handler, evaluated in list
//! order. The first matching rule decides. Order matters where phrase lists
//! overlap, e.g. "is tomorrow a rest day" must hit the rest-day rule before
//! the tomorrow rule.
//!
//! Requests to change the plan are never executed here; they are answered
//! with a pointer to the Edit Plan screen.

use crate::constants::coach::EDIT_PLAN_SCREEN;
use crate::models::{DayEntry, PersonalBest, WorkoutStats};
use chrono::NaiveDate;
use std::fmt::Write as _;
use tracing::debug;

/// Action proposed to the user and waiting for yes/no
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingAction {
    /// Show the workout scheduled on a date
    ShowWorkout(NaiveDate),
    /// Show the stats summary
    ShowStats,
}

/// What to do with a message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    /// Answer locally
    Local(String),
    /// Answer locally and ask the user to confirm a follow-up
    Propose {
        /// Reply text, ending with the question
        reply: String,
        /// Follow-up run on "yes"
        action: PendingAction,
    },
    /// The message answers a pending proposal
    Confirmation {
        /// The proposal being answered
        action: PendingAction,
        /// Whether the user agreed
        accepted: bool,
    },
    /// Send to the remote coach
    Forward,
}

/// Read-only view of the user's data used to answer locally
#[derive(Debug, Clone, Copy)]
pub struct RouterContext<'a> {
    /// User's current date
    pub today: NaiveDate,
    /// Scheduled days sorted by date
    pub days: &'a [DayEntry],
    /// Workout stats
    pub stats: &'a WorkoutStats,
    /// Personal bests
    pub personal_bests: &'a [PersonalBest],
    /// Proposal waiting for an answer
    pub pending: Option<&'a PendingAction>,
}

impl<'a> RouterContext<'a> {
    /// Context without a pending proposal
    #[must_use]
    pub const fn new(
        today: NaiveDate,
        days: &'a [DayEntry],
        stats: &'a WorkoutStats,
        personal_bests: &'a [PersonalBest],
    ) -> Self {
        Self {
            today,
            days,
            stats,
            personal_bests,
            pending: None,
        }
    }

    /// Scheduled entry for `date`
    #[must_use]
    pub fn day(&self, date: NaiveDate) -> Option<&'a DayEntry> {
        self.days.iter().find(|d| d.date == date)
    }
}

type Matcher = fn(&str, &RouterContext<'_>) -> bool;
type Handler = fn(&str, &RouterContext<'_>) -> RouteDecision;

/// One routing rule
#[derive(Clone, Copy)]
pub struct IntentRule {
    /// Rule name, used in logs
    pub name: &'static str,
    matcher: Matcher,
    handler: Handler,
}

const YES_PHRASES: &[&str] = &[
    "yes",
    "yeah",
    "yep",
    "yup",
    "sure",
    "ok",
    "okay",
    "please",
    "do it",
    "go ahead",
    "sounds good",
    "show me",
];

const NO_PHRASES: &[&str] = &[
    "no",
    "nope",
    "nah",
    "not now",
    "no thanks",
    "never mind",
    "nevermind",
    "cancel",
    "skip it",
];

/// Requests that need no plan noun to count as plan edits
const PLAN_CHANGE_PHRASES: &[&str] = &[
    "reschedule",
    "make it easier",
    "make it harder",
    "add a workout",
    "regenerate",
];

const PLAN_CHANGE_VERBS: &[&str] = &[
    "change", "swap", "switch", "modify", "edit", "update", "adjust", "replace", "move", "skip",
    "remove", "delete", "reschedule",
];

/// Adjectives that turn "make ..." into an edit request
const PLAN_CHANGE_ADJECTIVES: &[&str] = &[
    "easier", "harder", "shorter", "longer", "lighter", "heavier",
];

const PLAN_NOUNS: &[&str] = &[
    "workout", "workouts", "plan", "schedule", "session", "sessions", "routine", "program",
];

const REST_DAY_PHRASES: &[&str] = &[
    "rest day",
    "rest days",
    "day off",
    "days off",
    "recovery day",
    "when do i rest",
    "when can i rest",
    "should i rest",
];

const TODAY_PHRASES: &[&str] = &[
    "todays workout",
    "workout today",
    "workout for today",
    "training today",
    "what am i doing today",
    "what should i do today",
    "whats on today",
    "whats today",
    "what is today",
];

const TOMORROW_PHRASES: &[&str] = &[
    "tomorrows workout",
    "workout tomorrow",
    "workout for tomorrow",
    "whats tomorrow",
    "what is tomorrow",
    "what about tomorrow",
    "training tomorrow",
];

const STATS_PHRASES: &[&str] = &[
    "my stats",
    "stats",
    "statistics",
    "my progress",
    "progress",
    "personal best",
    "personal bests",
    "personal record",
    "pr",
    "prs",
    "streak",
    "how many workouts",
];

/// Confirmation replies are short; longer messages go through the other rules
const MAX_CONFIRMATION_WORDS: usize = 4;

/// Lowercase, drop apostrophes, turn other punctuation into spaces, collapse spaces
#[must_use]
pub fn normalize(message: &str) -> String {
    let cleaned: String = message
        .chars()
        .filter(|c| *c != '\'' && *c != '\u{2019}')
        .map(|c| {
            if c.is_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                ' '
            }
        })
        .collect();
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Whole-word phrase match on a normalized message
fn contains_phrase(normalized: &str, phrases: &[&str]) -> bool {
    let padded = format!(" {normalized} ");
    phrases
        .iter()
        .any(|phrase| padded.contains(&format!(" {phrase} ")))
}

/// An edit verb (or "make" plus an adjective like "easier") aimed at the plan
fn is_plan_change(normalized: &str) -> bool {
    if contains_phrase(normalized, PLAN_CHANGE_PHRASES) {
        return true;
    }
    let edits = contains_phrase(normalized, PLAN_CHANGE_VERBS)
        || (contains_phrase(normalized, &["make"])
            && contains_phrase(normalized, PLAN_CHANGE_ADJECTIVES));
    edits && contains_phrase(normalized, PLAN_NOUNS)
}

fn is_confirmation(normalized: &str, ctx: &RouterContext<'_>) -> bool {
    ctx.pending.is_some()
        && normalized.split(' ').count() <= MAX_CONFIRMATION_WORDS
        && (contains_phrase(normalized, NO_PHRASES) || contains_phrase(normalized, YES_PHRASES))
}

fn confirm(normalized: &str, ctx: &RouterContext<'_>) -> RouteDecision {
    match ctx.pending {
        Some(action) => RouteDecision::Confirmation {
            action: action.clone(),
            accepted: !contains_phrase(normalized, NO_PHRASES),
        },
        None => RouteDecision::Forward,
    }
}

fn plan_change(_: &str, _: &RouterContext<'_>) -> RouteDecision {
    RouteDecision::Local(format!(
        "I can't change your plan from the chat. Open the {EDIT_PLAN_SCREEN} screen to swap, \
         replace, or reschedule workouts."
    ))
}

fn rest_day(normalized: &str, ctx: &RouterContext<'_>) -> RouteDecision {
    if contains_phrase(normalized, &["tomorrow"]) {
        let entry = ctx.today.succ_opt().and_then(|date| ctx.day(date));
        return RouteDecision::Local(match entry {
            Some(day) if day.is_rest_day() => "Tomorrow is a rest day.".to_owned(),
            Some(_) => format!("No, tomorrow is a training day. {}", describe_day("Tomorrow", entry)),
            None => describe_day("Tomorrow", None),
        });
    }

    if ctx.day(ctx.today).is_some_and(DayEntry::is_rest_day) {
        let next_workout = ctx
            .days
            .iter()
            .find(|d| d.date > ctx.today && !d.is_rest_day());
        return match next_workout {
            Some(next) => RouteDecision::Propose {
                reply: format!(
                    "Today is a rest day. Recovery is part of the plan. Want to see your next \
                     workout on {}?",
                    next.date.format("%A")
                ),
                action: PendingAction::ShowWorkout(next.date),
            },
            None => RouteDecision::Local("Today is a rest day. Recovery is part of the plan.".to_owned()),
        };
    }

    let next_rest = ctx.days.iter().find(|d| d.date > ctx.today && d.is_rest_day());
    RouteDecision::Local(match next_rest {
        Some(rest) => format!("Your next rest day is {}.", rest.date.format("%A, %B %-d")),
        None => "There are no rest days left in your current plan.".to_owned(),
    })
}

fn today(_: &str, ctx: &RouterContext<'_>) -> RouteDecision {
    let entry = ctx.day(ctx.today);
    let reply = describe_day("Today", entry);
    if entry.is_some_and(|d| d.completed) {
        return RouteDecision::Propose {
            reply: format!("{reply} Want to see your stats?"),
            action: PendingAction::ShowStats,
        };
    }
    RouteDecision::Local(reply)
}

fn tomorrow(_: &str, ctx: &RouterContext<'_>) -> RouteDecision {
    let entry = ctx.today.succ_opt().and_then(|date| ctx.day(date));
    RouteDecision::Local(describe_day("Tomorrow", entry))
}

fn stats(_: &str, ctx: &RouterContext<'_>) -> RouteDecision {
    RouteDecision::Local(describe_stats(ctx.stats, ctx.personal_bests))
}

/// One-paragraph description of a scheduled day
#[must_use]
pub fn describe_day(label: &str, entry: Option<&DayEntry>) -> String {
    let Some(entry) = entry else {
        return format!(
            "{label} isn't in your plan yet. Your schedule may still be generating."
        );
    };
    let Some(workout) = entry.workout_content() else {
        return format!("{label} is a rest day.");
    };

    let mut text = format!(
        "{label}: {} ({} min, {} exercises)",
        workout.title,
        workout.duration_minutes,
        workout.exercises.len()
    );
    if !workout.exercises.is_empty() {
        let names: Vec<&str> = workout.exercises.iter().map(|e| e.name.as_str()).collect();
        let _ = write!(text, ": {}", names.join(", "));
    }
    text.push('.');
    if entry.completed {
        text.push_str(" Already completed, nice work.");
    }
    text
}

/// Stats summary sentence
#[must_use]
pub fn describe_stats(stats: &WorkoutStats, personal_bests: &[PersonalBest]) -> String {
    let mut text = format!(
        "You've completed {} workouts ({} minutes). This week: {}. Current streak: {} days.",
        stats.total_workouts, stats.total_minutes, stats.workouts_this_week, stats.current_streak_days
    );
    let top = personal_bests
        .iter()
        .max_by(|a, b| a.weight.total_cmp(&b.weight));
    if let Some(best) = top {
        let _ = write!(
            text,
            " Top personal best: {} at {} on {}.",
            best.exercise, best.weight, best.achieved_on
        );
    }
    text
}

/// Ordered intent rules
#[derive(Clone)]
pub struct IntentRouter {
    rules: Vec<IntentRule>,
}

impl Default for IntentRouter {
    fn default() -> Self {
        Self {
            rules: vec![
                IntentRule {
                    name: "confirmation",
                    matcher: is_confirmation,
                    handler: confirm,
                },
                IntentRule {
                    name: "plan_modification",
                    matcher: |m, _| is_plan_change(m),
                    handler: plan_change,
                },
                IntentRule {
                    name: "rest_day",
                    matcher: |m, _| contains_phrase(m, REST_DAY_PHRASES),
                    handler: rest_day,
                },
                IntentRule {
                    name: "today",
                    matcher: |m, _| contains_phrase(m, TODAY_PHRASES),
                    handler: today,
                },
                IntentRule {
                    name: "tomorrow",
                    matcher: |m, _| contains_phrase(m, TOMORROW_PHRASES),
                    handler: tomorrow,
                },
                IntentRule {
                    name: "stats",
                    matcher: |m, _| contains_phrase(m, STATS_PHRASES),
                    handler: stats,
                },
            ],
        }
    }
}

impl IntentRouter {
    /// Rule names in evaluation order
    pub fn rule_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules.iter().map(|r| r.name)
    }

    /// Name of the first rule matching `message`, if any
    #[must_use]
    pub fn matching_rule(&self, message: &str, ctx: &RouterContext<'_>) -> Option<&'static str> {
        let normalized = normalize(message);
        self.rules
            .iter()
            .find(|r| (r.matcher)(&normalized, ctx))
            .map(|r| r.name)
    }

    /// Route `message`; unmatched messages are forwarded
    #[must_use]
    pub fn route(&self, message: &str, ctx: &RouterContext<'_>) -> RouteDecision {
        let normalized = normalize(message);
        self.rules
            .iter()
            .find(|r| (r.matcher)(&normalized, ctx))
            .map_or(RouteDecision::Forward, |r| {
                debug!(rule = r.name, "Intent matched");
                (r.handler)(&normalized, ctx)
            })
    }
}
