//! # MCP OSINT Board Server
//!
//! A Model Context Protocol (MCP) server for collaborative OSINT investigation
//! boards, with a rule-based engine that proposes next investigative steps.
//!
//! ## Features
//!
//! - **Boards**: questions, hypotheses, claims and observations connected on a canvas
//! - **Evidence**: sourced items linked to thoughts as supporting, contradicting or context
//! - **Proactive suggestions**: evidence gaps, contradictions, alternatives and
//!   entity verification steps, ranked by priority and capped at seven
//! - **Investigation assistant**: optional chat completion with the selected
//!   thought as context
//! - **Case export**: a Markdown draft of findings and open questions
//!
//! ## Architecture
//!
//! ```text
//! MCP Client → MCP Server (Rust) → SQLite (boards)
//!                    ↓
//!        Suggestion engine (pure rules)
//!                    ↓
//!        Chat completions (optional, HTTP)
//! ```
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use mcp_osint_board::{Config, AppState, McpServer};
//! use mcp_osint_board::storage::SqliteStorage;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env()?;
//!     let storage = SqliteStorage::new(&config.database).await?;
//!     let state = Arc::new(AppState::new(config, storage)?);
//!     McpServer::new(state).run().await?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]

/// Chat completion client for the investigation assistant.
pub mod chat;
/// Configuration management for the MCP server.
pub mod config;
/// Error types and result aliases for the application.
pub mod error;
/// Case draft export.
pub mod export;
/// System prompts for the investigation assistant.
pub mod prompts;
/// Demo investigation data.
pub mod seed;
/// MCP server implementation and request handling.
pub mod server;
/// SQLite storage layer for boards.
pub mod storage;
/// Proactive suggestion engine.
pub mod suggestions;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use server::{AppState, McpServer, SharedState};
