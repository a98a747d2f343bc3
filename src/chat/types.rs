use serde::{Deserialize, Serialize};

use crate::storage::ThoughtType;
use crate::suggestions::InvestigationSnapshot;

/// Message in a chat conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Who sent the message.
    pub role: MessageRole,
    /// Message text.
    pub content: String,
}

/// Message role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// Instructions for the model.
    System,
    /// The investigator.
    User,
    /// The model.
    Assistant,
}

impl ChatMessage {
    /// Create a system message
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    /// Create an assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

/// Request body for `/v1/chat/completions`
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    /// Model name.
    pub model: String,
    /// Conversation, system prompt first.
    pub messages: Vec<ChatMessage>,
    /// Sampling temperature.
    pub temperature: f32,
    /// Always false; responses are read whole.
    pub stream: bool,
}

impl ChatRequest {
    /// Create a non-streaming request
    pub fn new(model: impl Into<String>, messages: Vec<ChatMessage>, temperature: f32) -> Self {
        Self {
            model: model.into(),
            messages,
            temperature,
            stream: false,
        }
    }
}

/// Response from `/v1/chat/completions`
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    /// Model that answered.
    #[serde(default)]
    pub model: Option<String>,
    /// Completion choices.
    pub choices: Vec<ChatChoice>,
    /// Token accounting.
    #[serde(default)]
    pub usage: Option<Usage>,
}

/// One completion choice
#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoice {
    /// Generated message.
    pub message: ChatMessage,
    /// Why generation stopped.
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Token usage information
#[derive(Debug, Clone, Deserialize)]
pub struct Usage {
    /// Tokens in the prompt.
    pub prompt_tokens: Option<u32>,
    /// Tokens in the reply.
    pub completion_tokens: Option<u32>,
    /// Sum of both.
    pub total_tokens: Option<u32>,
}

impl ChatResponse {
    /// Text of the first choice, if any.
    pub fn first_content(&self) -> Option<&str> {
        self.choices.first().map(|c| c.message.content.as_str())
    }
}

/// Summary of the thought a conversation is about, embedded in the system prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThoughtContext {
    /// Thought title.
    pub title: String,
    /// Kind of thought.
    #[serde(rename = "type")]
    pub thought_type: ThoughtType,
    /// Thought body.
    pub body: String,
    /// Confidence percentage, if set.
    pub confidence: Option<u8>,
    /// One line per attached evidence item.
    pub evidence_summary: String,
}

impl ThoughtContext {
    /// Build the context from a suggestion snapshot.
    pub fn from_snapshot(snapshot: &InvestigationSnapshot) -> Self {
        let mut lines = Vec::new();

        for e in &snapshot.evidence.supporting {
            let key = if e.is_key { ", key" } else { "" };
            lines.push(format!("- Supports: {} ({} reliability{})", e.title, e.reliability, key));
        }
        for e in &snapshot.evidence.contradicting {
            lines.push(format!("- Contradicts: {} ({} reliability)", e.title, e.reliability));
        }
        for e in &snapshot.evidence.context {
            lines.push(format!("- Context: {}", e.title));
        }

        let evidence_summary = if lines.is_empty() {
            "No evidence attached.".to_string()
        } else {
            lines.join("\n")
        };

        Self {
            title: snapshot.thought.title.clone(),
            thought_type: snapshot.thought.thought_type,
            body: snapshot.thought.body.clone(),
            confidence: snapshot.thought.confidence,
            evidence_summary,
        }
    }
}
