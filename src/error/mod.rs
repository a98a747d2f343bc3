use thiserror::Error;

/// Application-level errors
#[derive(Debug, Error)]
pub enum AppError {
    /// Invalid or missing configuration.
    #[error("Configuration error: {message}")]
    Config {
        /// What is wrong.
        message: String,
    },

    /// Storage layer failure.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Chat client failure.
    #[error("Chat error: {0}")]
    Chat(#[from] ChatError),

    /// Protocol failure.
    #[error("MCP protocol error: {0}")]
    Mcp(#[from] McpError),

    /// Unexpected internal failure.
    #[error("Internal error: {message}")]
    Internal {
        /// What went wrong.
        message: String,
    },
}

/// Storage layer errors
#[derive(Debug, Error)]
pub enum StorageError {
    /// Could not open the database.
    #[error("Database connection failed: {message}")]
    Connection {
        /// Underlying cause.
        message: String,
    },

    /// A query failed or returned unreadable data.
    #[error("Query failed: {message}")]
    Query {
        /// Underlying cause.
        message: String,
    },

    /// An update or delete targeted a missing row.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Record type, e.g. "Board".
        entity: &'static str,
        /// Requested ID.
        id: String,
    },

    /// Schema migration failed.
    #[error("Migration failed: {message}")]
    Migration {
        /// Underlying cause.
        message: String,
    },

    /// Raw sqlx error.
    #[error("SQLx error: {0}")]
    Sqlx(#[from] sqlx::Error),
}

/// Chat completion API errors
#[derive(Debug, Error)]
pub enum ChatError {
    /// No API key is configured.
    #[error("Chat is not configured: {message}")]
    NotConfigured {
        /// How to enable chat.
        message: String,
    },

    /// Transient failures persisted through every retry.
    #[error("Chat service unavailable: {message} (retries: {retries})")]
    Unavailable {
        /// Last failure seen.
        message: String,
        /// Attempts made.
        retries: u32,
    },

    /// Non-success HTTP status.
    #[error("API error: {status} - {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body.
        message: String,
    },

    /// Body could not be decoded or had no reply.
    #[error("Invalid response: {message}")]
    InvalidResponse {
        /// Decoding failure.
        message: String,
    },

    /// The request exceeded the configured timeout.
    #[error("Request timeout after {timeout_ms}ms")]
    Timeout {
        /// Configured timeout.
        timeout_ms: u64,
    },

    /// Transport-level failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// MCP protocol errors
#[derive(Debug, Error)]
pub enum McpError {
    /// No tool with this name.
    #[error("Unknown tool: {tool_name}")]
    UnknownTool {
        /// Requested tool name.
        tool_name: String,
    },

    /// Arguments missing or malformed.
    #[error("Invalid parameters for {tool_name}: {message}")]
    InvalidParameters {
        /// Tool being called.
        tool_name: String,
        /// What is wrong with the arguments.
        message: String,
    },

    /// The tool ran and failed.
    #[error("Tool execution failed: {message}")]
    ExecutionFailed {
        /// Failure text shown to the client.
        message: String,
    },

    /// Result could not be serialized.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Tool-specific errors with structured details
#[derive(Debug, Error)]
pub enum ToolError {
    /// An argument failed validation.
    #[error("Validation failed: {field} - {reason}")]
    Validation {
        /// Offending field.
        field: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A referenced record does not exist.
    #[error("Not found: {0}")]
    NotFound(String),
}

impl From<ToolError> for AppError {
    fn from(err: ToolError) -> Self {
        AppError::Internal {
            message: err.to_string(),
        }
    }
}

impl From<AppError> for McpError {
    fn from(err: AppError) -> Self {
        McpError::ExecutionFailed {
            message: err.to_string(),
        }
    }
}

impl From<StorageError> for McpError {
    fn from(err: StorageError) -> Self {
        McpError::ExecutionFailed {
            message: err.to_string(),
        }
    }
}

impl From<ChatError> for McpError {
    fn from(err: ChatError) -> Self {
        McpError::ExecutionFailed {
            message: err.to_string(),
        }
    }
}

impl From<ToolError> for McpError {
    fn from(err: ToolError) -> Self {
        McpError::ExecutionFailed {
            message: err.to_string(),
        }
    }
}

/// Result type alias for application errors
pub type AppResult<T> = Result<T, AppError>;

/// Result type alias for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Result type alias for chat operations
pub type ChatResult<T> = Result<T, ChatError>;

/// Result type alias for MCP operations
pub type McpResult<T> = Result<T, McpError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::Config {
            message: "missing key".to_string(),
        };
        assert_eq!(err.to_string(), "Configuration error: missing key");

        let err = AppError::Internal {
            message: "unexpected".to_string(),
        };
        assert_eq!(err.to_string(), "Internal error: unexpected");
    }

    #[test]
    fn test_storage_error_display() {
        let err = StorageError::Connection {
            message: "failed to connect".to_string(),
        };
        assert_eq!(err.to_string(), "Database connection failed: failed to connect");

        let err = StorageError::NotFound {
            entity: "Thought",
            id: "thought-456".to_string(),
        };
        assert_eq!(err.to_string(), "Thought not found: thought-456");

        let err = StorageError::Migration {
            message: "version mismatch".to_string(),
        };
        assert_eq!(err.to_string(), "Migration failed: version mismatch");
    }

    #[test]
    fn test_chat_error_display() {
        let err = ChatError::Unavailable {
            message: "server down".to_string(),
            retries: 3,
        };
        assert_eq!(
            err.to_string(),
            "Chat service unavailable: server down (retries: 3)"
        );

        let err = ChatError::Api {
            status: 401,
            message: "unauthorized".to_string(),
        };
        assert_eq!(err.to_string(), "API error: 401 - unauthorized");

        let err = ChatError::Timeout { timeout_ms: 5000 };
        assert_eq!(err.to_string(), "Request timeout after 5000ms");

        let err = ChatError::NotConfigured {
            message: "CHAT_API_KEY is not set".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Chat is not configured: CHAT_API_KEY is not set"
        );
    }

    #[test]
    fn test_mcp_error_display() {
        let err = McpError::UnknownTool {
            tool_name: "nonexistent".to_string(),
        };
        assert_eq!(err.to_string(), "Unknown tool: nonexistent");

        let err = McpError::InvalidParameters {
            tool_name: "ai_analyze".to_string(),
            message: "missing board_id".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid parameters for ai_analyze: missing board_id"
        );
    }

    #[test]
    fn test_tool_error_conversion_to_app_error() {
        let tool_err = ToolError::Validation {
            field: "title".to_string(),
            reason: "cannot be empty".to_string(),
        };
        let app_err: AppError = tool_err.into();
        assert!(matches!(app_err, AppError::Internal { .. }));
        assert!(app_err.to_string().contains("Validation failed"));
    }

    #[test]
    fn test_storage_error_conversion() {
        let storage_err = StorageError::NotFound {
            entity: "Board",
            id: "board-1".to_string(),
        };
        let app_err: AppError = storage_err.into();
        assert!(matches!(app_err, AppError::Storage(_)));

        let mcp_err: McpError = StorageError::Query {
            message: "bad".to_string(),
        }
        .into();
        assert!(matches!(mcp_err, McpError::ExecutionFailed { .. }));
    }

    #[test]
    fn test_chat_error_conversion_to_mcp_error() {
        let mcp_err: McpError = ChatError::Timeout { timeout_ms: 100 }.into();
        assert_eq!(
            mcp_err.to_string(),
            "Tool execution failed: Request timeout after 100ms"
        );
    }

    #[test]
    fn test_app_error_conversion_to_mcp_error() {
        let app_err = AppError::Config {
            message: "test error".to_string(),
        };
        let mcp_err: McpError = app_err.into();
        assert!(mcp_err.to_string().contains("Configuration error"));
    }
}
