// ABOUTME: Coach chat service combining the local intent router with the remote coach
// ABOUTME: Keeps conversation history and turns remote failures into a fallback reply
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Thryvin

//! # Coach chat
//!
//! [`CoachService::handle_message`] first asks the [`IntentRouter`] whether a
//! message can be answered from local data. Everything else is sent to the
//! remote coach together with the trailing conversation history.

mod intent;

pub use intent::{
    describe_day, describe_stats, normalize, IntentRouter, IntentRule, PendingAction,
    RouteDecision, RouterContext,
};

use crate::api::{CoachChatRequest, CoachClient};
use crate::constants::coach;
use crate::models::ChatMessage;
use std::sync::Arc;
use tracing::{debug, warn};

/// Reply shown when the remote coach cannot be reached
pub const FALLBACK_REPLY: &str =
    "I'm having trouble reaching your coach right now. Please try again in a moment.";

/// Reply to a declined proposal
const DECLINED_REPLY: &str = "No problem. Let me know if you need anything else.";

/// Messages kept in memory per conversation
const MAX_STORED_MESSAGES: usize = 100;

/// Where a reply came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplySource {
    /// Answered from local data
    Local,
    /// Answered by the remote coach
    Coach,
    /// Remote coach failed; canned reply
    Fallback,
}

/// Reply to one user message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoachReply {
    /// Text to show
    pub text: String,
    /// Origin of the text
    pub source: ReplySource,
}

impl CoachReply {
    fn local(text: String) -> Self {
        Self {
            text,
            source: ReplySource::Local,
        }
    }
}

/// Coach conversation for one user
pub struct CoachService {
    client: Arc<dyn CoachClient>,
    router: IntentRouter,
    coach_id: String,
    history: Vec<ChatMessage>,
    pending: Option<PendingAction>,
}

impl CoachService {
    /// Create a conversation with the coach persona `coach_id`
    #[must_use]
    pub fn new(client: Arc<dyn CoachClient>, coach_id: &str) -> Self {
        Self {
            client,
            router: IntentRouter::default(),
            coach_id: coach_id.to_owned(),
            history: Vec::new(),
            pending: None,
        }
    }

    /// Conversation so far, oldest first
    #[must_use]
    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    /// Proposal waiting for a yes/no answer
    #[must_use]
    pub const fn pending(&self) -> Option<&PendingAction> {
        self.pending.as_ref()
    }

    /// Answer `message`; never fails
    ///
    /// `ctx.pending` is ignored; the service tracks its own proposals.
    pub async fn handle_message(&mut self, message: &str, ctx: RouterContext<'_>) -> CoachReply {
        let message = message.trim();
        if message.is_empty() {
            return CoachReply::local("Ask me anything about your training.".to_owned());
        }

        // A proposal only survives one message
        let pending = self.pending.take();
        let ctx = RouterContext {
            pending: pending.as_ref(),
            ..ctx
        };

        let reply = match self.router.route(message, &ctx) {
            RouteDecision::Local(text) => CoachReply::local(text),
            RouteDecision::Propose { reply, action } => {
                self.pending = Some(action);
                CoachReply::local(reply)
            }
            RouteDecision::Confirmation { action, accepted } => {
                CoachReply::local(if accepted {
                    resolve(&action, &ctx)
                } else {
                    DECLINED_REPLY.to_owned()
                })
            }
            RouteDecision::Forward => return self.forward(message).await,
        };

        self.remember(ChatMessage::user(message));
        self.remember(ChatMessage::assistant(reply.text.clone()));
        reply
    }

    /// Send `message` to the remote coach with the trailing history
    async fn forward(&mut self, message: &str) -> CoachReply {
        let window_start = self.history.len().saturating_sub(coach::HISTORY_WINDOW);
        let request = CoachChatRequest {
            message: message.to_owned(),
            coach_id: self.coach_id.clone(),
            context_mode: coach::CONTEXT_MODE_IN_APP.to_owned(),
            conversation_history: self.history[window_start..].to_vec(),
        };

        debug!(
            coach.id = %self.coach_id,
            history = request.conversation_history.len(),
            "Forwarding message to coach"
        );
        self.remember(ChatMessage::user(message));

        match self.client.send_message(&request).await {
            Ok(text) => {
                self.remember(ChatMessage::assistant(text.clone()));
                CoachReply {
                    text,
                    source: ReplySource::Coach,
                }
            }
            Err(e) => {
                warn!(coach.id = %self.coach_id, error = %e, "Coach request failed; using fallback reply");
                CoachReply {
                    text: FALLBACK_REPLY.to_owned(),
                    source: ReplySource::Fallback,
                }
            }
        }
    }

    fn remember(&mut self, message: ChatMessage) {
        self.history.push(message);
        if self.history.len() > MAX_STORED_MESSAGES {
            let excess = self.history.len() - MAX_STORED_MESSAGES;
            self.history.drain(..excess);
        }
    }
}

/// Run an accepted proposal
fn resolve(action: &PendingAction, ctx: &RouterContext<'_>) -> String {
    match action {
        PendingAction::ShowWorkout(date) => {
            describe_day(&date.format("%A").to_string(), ctx.day(*date))
        }
        PendingAction::ShowStats => describe_stats(ctx.stats, ctx.personal_bests),
    }
}
