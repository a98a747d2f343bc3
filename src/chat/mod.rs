//! Chat completion client for the investigation assistant.
//!
//! This is a collaborator of the server only; the suggestion engine never
//! calls it.

mod client;
mod types;

pub use client::{ChatClient, CHAT_TEMPERATURE};
pub use types::{
    ChatChoice, ChatMessage, ChatRequest, ChatResponse, MessageRole, ThoughtContext, Usage,
};
