//! Server module for MCP protocol handling.
//!
//! This module provides:
//! - MCP server implementation over stdio
//! - Tool call handlers and routing
//! - Shared application state management

mod handlers;
mod mcp;

pub use handlers::*;
pub use mcp::*;

use std::sync::Arc;

use tracing::info;

use crate::chat::ChatClient;
use crate::config::Config;
use crate::error::ChatError;
use crate::storage::SqliteStorage;
use crate::suggestions::SuggestionEngine;

/// Application state shared across handlers.
pub struct AppState {
    /// Application configuration.
    pub config: Config,
    /// SQLite storage backend.
    pub storage: SqliteStorage,
    /// Suggestion engine reading from the same storage.
    pub engine: SuggestionEngine<SqliteStorage>,
    /// Chat client, present only when an API key is configured.
    pub chat: Option<ChatClient>,
}

impl AppState {
    /// Create new application state.
    ///
    /// A missing chat API key is not an error; the chat tool reports it on use.
    pub fn new(config: Config, storage: SqliteStorage) -> Result<Self, ChatError> {
        let chat = match ChatClient::new(&config.chat, config.request.clone()) {
            Ok(client) => {
                info!(model = %client.model(), base_url = %client.base_url(), "Chat assistant enabled");
                Some(client)
            }
            Err(ChatError::NotConfigured { message }) => {
                info!(reason = %message, "Chat assistant disabled");
                None
            }
            Err(e) => return Err(e),
        };

        Ok(Self::with_chat(config, storage, chat))
    }

    /// Create state with an explicit chat client (or none).
    pub fn with_chat(config: Config, storage: SqliteStorage, chat: Option<ChatClient>) -> Self {
        let engine = SuggestionEngine::new(storage.clone());
        Self {
            config,
            storage,
            engine,
            chat,
        }
    }

    /// Whether the chat tool can answer.
    pub fn chat_enabled(&self) -> bool {
        self.chat.is_some()
    }
}

/// Shared application state handle
pub type SharedState = Arc<AppState>;
