//! Chat simulator.
//!
//! Owns the session transcript and synthesizes assistant replies from
//! fixed templates keyed on role and scope. This deliberately stands in
//! for the inference collaborator: a real rewrite would swap the template
//! engine behind the same interface for an actual model call, which is why
//! the configured model id is carried through to the tracing spans.
//! Delivery is modeled as a cancellable delay to mirror call latency.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};
use uuid::Uuid;

use treasury_core::{AdminRole, ChatRole, Scope};

use crate::models::Identity;
use crate::task::{CancelToken, sleep_unless_cancelled};

/// Errors that can occur when sending a chat message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChatError {
    /// The input message was empty or whitespace-only.
    #[error("message is empty")]
    EmptyMessage,
}

/// A message in the session transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Unique message id.
    pub id: Uuid,
    /// Who sent the message.
    pub role: ChatRole,
    /// Message text.
    pub text: String,
    /// When the message was appended.
    pub sent_at: DateTime<Utc>,
}

/// Template-driven stand-in for a conversational AI call.
///
/// The transcript is append-only and session-scoped; [`clear`] exists for
/// session teardown, not for editing history.
///
/// [`clear`]: ChatSimulator::clear
#[derive(Debug)]
pub struct ChatSimulator {
    reply_latency: Duration,
    greeting_latency: Duration,
    model_id: String,
    transcript: Vec<ChatMessage>,
}

impl ChatSimulator {
    /// Create a simulator with the given delivery latencies.
    #[must_use]
    pub fn new(
        reply_latency: Duration,
        greeting_latency: Duration,
        model_id: impl Into<String>,
    ) -> Self {
        Self {
            reply_latency,
            greeting_latency,
            model_id: model_id.into(),
            transcript: Vec::new(),
        }
    }

    /// The session transcript, oldest first.
    #[must_use]
    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    /// Drop the transcript (session teardown).
    pub fn clear(&mut self) {
        self.transcript.clear();
    }

    /// Deliver the role-keyed welcome message after the greeting latency.
    ///
    /// Returns `None` when delivery was cancelled; nothing is appended in
    /// that case.
    #[instrument(skip_all, fields(model = %self.model_id))]
    pub async fn greet(&mut self, identity: &Identity, cancel: &CancelToken) -> Option<ChatMessage> {
        let text = greeting_text(identity);
        if !sleep_unless_cancelled(self.greeting_latency, cancel).await {
            debug!("greeting delivery cancelled");
            return None;
        }
        Some(self.append(ChatRole::Assistant, text))
    }

    /// Append the user message and deliver a synthesized reply after the
    /// reply latency.
    ///
    /// The user message is appended immediately. A cancelled delivery
    /// drops the reply (returning `Ok(None)`) but keeps the user message,
    /// matching a request superseded mid-flight.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::EmptyMessage`] for empty or whitespace-only
    /// input; the transcript is untouched.
    #[instrument(skip_all, fields(model = %self.model_id, scope = %scope))]
    pub async fn send(
        &mut self,
        identity: &Identity,
        scope: Scope,
        text: &str,
        cancel: &CancelToken,
    ) -> Result<Option<ChatMessage>, ChatError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ChatError::EmptyMessage);
        }

        self.append(ChatRole::User, text.to_string());

        let reply = reply_text(identity, scope);
        if !sleep_unless_cancelled(self.reply_latency, cancel).await {
            debug!("reply delivery cancelled");
            return Ok(None);
        }
        Ok(Some(self.append(ChatRole::Assistant, reply)))
    }

    fn append(&mut self, role: ChatRole, text: String) -> ChatMessage {
        let message = ChatMessage {
            id: Uuid::new_v4(),
            role,
            text,
            sent_at: Utc::now(),
        };
        self.transcript.push(message.clone());
        message
    }
}

/// Welcome message shown after login, keyed on role.
fn greeting_text(identity: &Identity) -> String {
    match identity.role {
        AdminRole::SuperAdmin => format!(
            "Welcome {}! I can help you analyze documents across all regions. \
             I have access to cross-regional data and can provide comparative insights.",
            identity.name
        ),
        AdminRole::RegionalAdmin(home) => format!(
            "Welcome {}! I can help you with {home} treasury operations and document analysis.",
            identity.name
        ),
    }
}

/// Assistant reply, keyed on role and the current visibility scope.
fn reply_text(identity: &Identity, scope: Scope) -> String {
    match identity.role {
        AdminRole::SuperAdmin => {
            let viewing = match scope {
                Scope::AllRegions => "all regions".to_string(),
                Scope::Region(region) => region.to_string(),
            };
            format!(
                "As your AI assistant with cross-regional access, I can analyze data \
                 from {viewing}. How can I help with your treasury analysis?"
            )
        }
        AdminRole::RegionalAdmin(home) => format!(
            "I'm analyzing your {home} treasury data. Based on your regional context, \
             I can help with budget analysis, document insights, and treasury \
             operations specific to {home}."
        ),
    }
}
