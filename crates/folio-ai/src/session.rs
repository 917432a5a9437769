//! Owned chat sessions over the portfolio content.
//!
//! A session is created explicitly and threaded through `send` calls by the
//! caller; there is no shared module-level conversation state, so several
//! independent sessions can run side by side.

use anyhow::Result;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use folio_storage::models::Project;

use crate::provider::ChatProvider;

const SYSTEM_INSTRUCTION: &str = "\
You are an AI assistant for OSAMA's professional portfolio.
OSAMA is a Backend Developer & Bot Maker, an expert in C# and Python.
He is passionate about clean code and automation.

His portfolio includes Discord bots, Telegram bots, web services, control
panels, PC software and AI agents.

Your goal is to answer visitor questions about Osama's skills, experience,
and the services he offers. Be professional, concise, and enthusiastic.
If asked about prices, suggest they look at the specific project card or
contact Osama directly for a quote.
If asked about technical details, emphasize his expertise in C# (.NET) and
Python (Django, FastAPI, scripting).";

/// Greeting shown before the first exchange.
pub const WELCOME_MESSAGE: &str =
    "Hi! I'm Osama's AI assistant. Ask me anything about his bots, software, or coding skills!";

/// Speaker of a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Model,
}

impl ChatRole {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Model => "model",
        }
    }
}

/// Single transcript entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub role: ChatRole,
    pub text: String,
    pub timestamp: i64,
}

impl ChatMessage {
    #[must_use]
    pub fn new(role: ChatRole, text: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            role,
            text,
            timestamp: Utc::now().timestamp_millis(),
        }
    }
}

/// One owned conversation with the portfolio assistant.
pub struct ChatSession {
    provider: Box<dyn ChatProvider>,
    system_instruction: String,
    transcript: Vec<ChatMessage>,
}

impl ChatSession {
    /// Start a session with the current project-list context baked into the
    /// system instruction.
    #[must_use]
    pub fn new(provider: Box<dyn ChatProvider>, context: &str) -> Self {
        Self {
            provider,
            system_instruction: format!(
                "{SYSTEM_INSTRUCTION}\n\nCurrent Project List Context:\n{context}"
            ),
            transcript: Vec::new(),
        }
    }

    /// Send a visitor message and return the assistant's reply. Both ends of
    /// the exchange are appended to the transcript.
    ///
    /// # Errors
    ///
    /// Returns an error when the provider fails; the visitor message is
    /// removed again so a retry re-sends a consistent transcript.
    pub async fn send(&mut self, text: &str) -> Result<String> {
        self.transcript
            .push(ChatMessage::new(ChatRole::User, text.to_string()));

        let reply = match self
            .provider
            .reply(&self.system_instruction, &self.transcript)
            .await
        {
            Ok(reply) => reply,
            Err(e) => {
                self.transcript.pop();
                return Err(e);
            }
        };

        self.transcript
            .push(ChatMessage::new(ChatRole::Model, reply.clone()));
        Ok(reply)
    }

    /// The conversation so far.
    #[must_use]
    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    /// Model identifier answering this session.
    #[must_use]
    pub fn model_name(&self) -> &str {
        self.provider.model_name()
    }
}

/// Render the current project list the way the assistant expects it.
#[must_use]
pub fn portfolio_context(projects: &[Project]) -> String {
    projects
        .iter()
        .map(|p| {
            format!(
                "- {} ({}): {}. Tech: {}",
                p.title,
                p.category,
                p.description,
                p.technologies.join(", ")
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
