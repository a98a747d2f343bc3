//! MCP protocol implementation for JSON-RPC 2.0 communication.
//!
//! Line-delimited JSON-RPC over stdio, plus the definitions and input
//! schemas of the board tools.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, error, info};

use super::{handle_tool_call, SharedState};

#[cfg(test)]
#[path = "mcp_tests.rs"]
mod mcp_tests;

/// Name reported in `serverInfo`.
pub const SERVER_NAME: &str = "mcp-osint-board";

/// MCP protocol revision implemented by this server.
pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// JSON-RPC 2.0 request structure.
#[derive(Debug, Deserialize)]
pub struct JsonRpcRequest {
    /// JSON-RPC version (must be "2.0").
    pub jsonrpc: String,
    /// Request identifier (None for notifications).
    pub id: Option<Value>,
    /// The method name to invoke.
    pub method: String,
    /// Optional parameters for the method.
    #[serde(default)]
    pub params: Option<Value>,
}

/// JSON-RPC 2.0 response structure.
#[derive(Debug, Serialize)]
pub struct JsonRpcResponse {
    /// JSON-RPC version (always "2.0").
    pub jsonrpc: String,
    /// Request identifier (null when the request could not be parsed).
    pub id: Value,
    /// The result on success (mutually exclusive with error).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    /// The error on failure (mutually exclusive with result).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

/// JSON-RPC 2.0 error object.
#[derive(Debug, Serialize)]
pub struct JsonRpcError {
    /// Error code (negative for predefined errors).
    pub code: i32,
    /// Human-readable error message.
    pub message: String,
    /// Optional additional error data.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// MCP server information returned during initialization.
#[derive(Debug, Serialize)]
pub struct ServerInfo {
    /// The server name identifier.
    pub name: String,
    /// The server version string.
    pub version: String,
}

/// MCP server capabilities advertised to clients.
#[derive(Debug, Serialize)]
pub struct Capabilities {
    /// Tool-related capabilities.
    pub tools: ToolCapabilities,
}

/// Tool-specific capabilities.
#[derive(Debug, Serialize)]
pub struct ToolCapabilities {
    /// Whether the tool list can change dynamically.
    #[serde(rename = "listChanged")]
    pub list_changed: bool,
}

/// Result of the MCP initialize handshake.
#[derive(Debug, Serialize)]
pub struct InitializeResult {
    /// The MCP protocol version supported.
    #[serde(rename = "protocolVersion")]
    pub protocol_version: String,
    /// Server capabilities.
    pub capabilities: Capabilities,
    /// Server identification information.
    #[serde(rename = "serverInfo")]
    pub server_info: ServerInfo,
}

/// MCP tool definition with JSON Schema.
#[derive(Debug, Clone, Serialize)]
pub struct Tool {
    /// Unique tool name (used in tool calls).
    pub name: String,
    /// Human-readable description of the tool.
    pub description: String,
    /// JSON Schema for the tool's input parameters.
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

/// Parameters for a tools/call request.
#[derive(Debug, Deserialize)]
pub struct ToolCallParams {
    /// The name of the tool to invoke.
    pub name: String,
    /// Optional arguments for the tool.
    #[serde(default)]
    pub arguments: Option<Value>,
}

/// Content item within a tool result.
#[derive(Debug, Serialize)]
pub struct ToolResultContent {
    /// The content type (e.g., "text").
    #[serde(rename = "type")]
    pub content_type: String,
    /// The text content of the result.
    pub text: String,
}

/// Result of a tool invocation.
#[derive(Debug, Serialize)]
pub struct ToolCallResult {
    /// The result content items.
    pub content: Vec<ToolResultContent>,
    /// Whether the result represents an error.
    #[serde(rename = "isError", skip_serializing_if = "Option::is_none")]
    pub is_error: Option<bool>,
}

impl JsonRpcResponse {
    /// Create a success response
    pub fn success(id: Option<Value>, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id: id.unwrap_or(Value::Null),
            result: Some(result),
            error: None,
        }
    }

    /// Create an error response
    pub fn error(id: Option<Value>, code: i32, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id: id.unwrap_or(Value::Null),
            result: None,
            error: Some(JsonRpcError {
                code,
                message: message.into(),
                data: None,
            }),
        }
    }
}

/// MCP Server running over stdio.
///
/// Handles JSON-RPC 2.0 messages over stdin/stdout for MCP protocol
/// communication with clients.
pub struct McpServer {
    /// Shared application state.
    state: SharedState,
}

impl McpServer {
    /// Create a new MCP server
    pub fn new(state: SharedState) -> Self {
        Self { state }
    }

    /// Run the server using async stdio
    pub async fn run(&self) -> std::io::Result<()> {
        info!(tools = all_tools().len(), "MCP OSINT Board Server starting...");

        let stdin = tokio::io::stdin();
        let mut stdout = tokio::io::stdout();
        let mut reader = BufReader::new(stdin);
        let mut line = String::new();

        loop {
            line.clear();
            let bytes_read = reader.read_line(&mut line).await?;

            // EOF reached
            if bytes_read == 0 {
                info!("EOF received, shutting down");
                break;
            }

            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            debug!(request = %trimmed, "Received request");

            let response = match serde_json::from_str::<JsonRpcRequest>(trimmed) {
                Ok(request) => self.handle_request(request).await,
                Err(e) => {
                    error!(error = %e, "Failed to parse request");
                    Some(JsonRpcResponse::error(
                        None,
                        -32700,
                        format!("Parse error: {}", e),
                    ))
                }
            };

            // Notifications get no response
            if let Some(response) = response {
                let response_json = serde_json::to_string(&response)?;
                debug!(response = %response_json, "Sending response");

                stdout.write_all(response_json.as_bytes()).await?;
                stdout.write_all(b"\n").await?;
                stdout.flush().await?;
            }
        }

        Ok(())
    }

    /// Handle a single JSON-RPC request.
    ///
    /// Returns `None` for notifications, which never get a response.
    pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        let is_notification = request.id.is_none();

        match request.method.as_str() {
            "initialize" => Some(self.handle_initialize(request.id)),
            "initialized" | "notifications/initialized" => {
                debug!("Received initialized notification");
                None
            }
            "notifications/cancelled" => {
                debug!("Received cancelled notification");
                None
            }
            "tools/list" => Some(self.handle_tools_list(request.id)),
            "tools/call" => Some(self.handle_tool_call(request.id, request.params).await),
            "ping" => Some(JsonRpcResponse::success(
                request.id,
                Value::Object(Default::default()),
            )),
            method => {
                if is_notification {
                    debug!(method = %method, "Unknown notification, ignoring");
                    None
                } else {
                    error!(method = %method, "Unknown method");
                    Some(JsonRpcResponse::error(
                        request.id,
                        -32601,
                        format!("Method not found: {}", method),
                    ))
                }
            }
        }
    }

    /// Handle initialize request
    fn handle_initialize(&self, id: Option<Value>) -> JsonRpcResponse {
        info!("Handling initialize request");

        let result = InitializeResult {
            protocol_version: PROTOCOL_VERSION.to_string(),
            capabilities: Capabilities {
                tools: ToolCapabilities {
                    list_changed: false,
                },
            },
            server_info: ServerInfo {
                name: SERVER_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        };

        match serde_json::to_value(result) {
            Ok(val) => JsonRpcResponse::success(id, val),
            Err(e) => {
                error!(error = %e, "Failed to serialize initialize result");
                JsonRpcResponse::error(id, -32603, format!("Internal error: {}", e))
            }
        }
    }

    /// Handle tools/list request
    fn handle_tools_list(&self, id: Option<Value>) -> JsonRpcResponse {
        info!("Handling tools/list request");

        let tools = all_tools();

        JsonRpcResponse::success(
            id,
            serde_json::json!({
                "tools": tools
            }),
        )
    }

    /// Handle tools/call request
    async fn handle_tool_call(&self, id: Option<Value>, params: Option<Value>) -> JsonRpcResponse {
        let params: ToolCallParams = match params {
            Some(p) => match serde_json::from_value(p) {
                Ok(p) => p,
                Err(e) => {
                    return JsonRpcResponse::error(id, -32602, format!("Invalid params: {}", e));
                }
            },
            None => {
                return JsonRpcResponse::error(id, -32602, "Missing params");
            }
        };

        info!(tool = %params.name, "Handling tool call");

        let (content, is_error) =
            match handle_tool_call(&self.state, &params.name, params.arguments).await {
                Ok(result) => {
                    let text = serde_json::to_string_pretty(&result).unwrap_or_else(|e| {
                        error!(error = %e, "Failed to serialize tool result");
                        format!("{{\"error\": \"Serialization failed: {}\"}}", e)
                    });
                    (
                        ToolResultContent {
                            content_type: "text".to_string(),
                            text,
                        },
                        None,
                    )
                }
                Err(e) => (
                    ToolResultContent {
                        content_type: "text".to_string(),
                        text: format!("Error: {}", e),
                    },
                    Some(true),
                ),
            };

        let tool_result = ToolCallResult {
            content: vec![content],
            is_error,
        };

        match serde_json::to_value(tool_result) {
            Ok(val) => JsonRpcResponse::success(id, val),
            Err(e) => {
                error!(error = %e, "Failed to serialize tool call result");
                JsonRpcResponse::error(id.clone(), -32603, format!("Internal error: {}", e))
            }
        }
    }
}

/// Every tool exposed by the server, in `tools/list` order.
pub fn all_tools() -> Vec<Tool> {
    vec![
        // Boards
        get_board_create_tool(),
        get_board_list_tool(),
        get_board_get_tool(),
        get_board_update_tool(),
        get_board_delete_tool(),
        // Thoughts
        get_thought_create_tool(),
        get_thought_get_tool(),
        get_thought_update_tool(),
        get_thought_delete_tool(),
        // Evidence
        get_evidence_create_tool(),
        get_evidence_list_tool(),
        get_evidence_delete_tool(),
        get_evidence_link_create_tool(),
        get_evidence_link_update_tool(),
        get_evidence_link_delete_tool(),
        // Connections
        get_connection_create_tool(),
        get_connection_list_tool(),
        get_connection_delete_tool(),
        // Discussion and activity
        get_comment_create_tool(),
        get_comment_list_tool(),
        get_activity_list_tool(),
        // Assistant
        get_ai_analyze_tool(),
        get_ai_chat_tool(),
        get_export_case_tool(),
    ]
}

const THOUGHT_TYPES: [&str; 4] = ["question", "hypothesis", "claim", "observation"];
const THOUGHT_STATUSES: [&str; 6] = [
    "open",
    "investigating",
    "supported",
    "disproved",
    "parked",
    "conflicted",
];
const EVIDENCE_RELATIONS: [&str; 3] = ["supports", "contradicts", "context"];

/// Schema for a single required id parameter.
fn id_schema(field: &str, description: &str) -> Value {
    serde_json::json!({
        "type": "object",
        "properties": {
            field: {
                "type": "string",
                "description": description
            }
        },
        "required": [field],
        "additionalProperties": false
    })
}

fn get_board_create_tool() -> Tool {
    Tool {
        name: "board_create".to_string(),
        description: "Create an investigation board.".to_string(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {
                "title": {
                    "type": "string",
                    "description": "Board title"
                },
                "id": {
                    "type": "string",
                    "description": "Optional board ID (generated when omitted)"
                },
                "created_by": {
                    "type": "string",
                    "description": "Creator user ID (default: system)"
                },
                "members": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "user_id": { "type": "string" },
                            "name": { "type": "string" },
                            "avatar": { "type": "string" },
                            "role": { "type": "string", "enum": ["viewer", "editor", "lead"] }
                        },
                        "required": ["user_id", "name"]
                    },
                    "description": "Board members"
                }
            },
            "required": ["title"],
            "additionalProperties": false
        }),
    }
}

fn get_board_list_tool() -> Tool {
    Tool {
        name: "board_list".to_string(),
        description: "List all boards in creation order.".to_string(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {},
            "additionalProperties": false
        }),
    }
}

fn get_board_get_tool() -> Tool {
    Tool {
        name: "board_get".to_string(),
        description: "Get a board with its thoughts, evidence, evidence links, connections and activity feed.".to_string(),
        input_schema: id_schema("board_id", "The board ID"),
    }
}

fn get_board_update_tool() -> Tool {
    Tool {
        name: "board_update".to_string(),
        description: "Rename, archive or re-staff a board.".to_string(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {
                "board_id": {
                    "type": "string",
                    "description": "The board ID"
                },
                "title": {
                    "type": "string",
                    "description": "New title"
                },
                "status": {
                    "type": "string",
                    "enum": ["active", "archived"],
                    "description": "New board status"
                },
                "members": {
                    "type": "array",
                    "items": { "type": "object" },
                    "description": "Replacement member list"
                }
            },
            "required": ["board_id"],
            "additionalProperties": false
        }),
    }
}

fn get_board_delete_tool() -> Tool {
    Tool {
        name: "board_delete".to_string(),
        description: "Delete a board and everything on it.".to_string(),
        input_schema: id_schema("board_id", "The board ID"),
    }
}

fn get_thought_create_tool() -> Tool {
    Tool {
        name: "thought_create".to_string(),
        description: "Place a question, hypothesis, claim or observation on a board.".to_string(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {
                "board_id": {
                    "type": "string",
                    "description": "The board ID"
                },
                "type": {
                    "type": "string",
                    "enum": THOUGHT_TYPES,
                    "description": "Kind of thought"
                },
                "title": {
                    "type": "string",
                    "description": "Short title"
                },
                "body": {
                    "type": "string",
                    "description": "Free-text body"
                },
                "confidence": {
                    "type": "integer",
                    "minimum": 0,
                    "maximum": 100,
                    "description": "Confidence percentage for hypotheses and claims"
                },
                "status": {
                    "type": "string",
                    "enum": THOUGHT_STATUSES,
                    "description": "Investigation status (default: open)"
                },
                "tags": {
                    "type": "array",
                    "items": { "type": "string" }
                },
                "owner": {
                    "type": "string",
                    "description": "Assigned owner user ID"
                },
                "position": {
                    "type": "object",
                    "properties": {
                        "x": { "type": "number" },
                        "y": { "type": "number" }
                    },
                    "required": ["x", "y"]
                },
                "user_id": {
                    "type": "string",
                    "description": "Acting user ID (default: system)"
                },
                "user_name": {
                    "type": "string",
                    "description": "Acting user display name"
                }
            },
            "required": ["board_id", "type", "title"],
            "additionalProperties": false
        }),
    }
}

fn get_thought_get_tool() -> Tool {
    Tool {
        name: "thought_get".to_string(),
        description: "Get a thought with its evidence links and comments.".to_string(),
        input_schema: id_schema("thought_id", "The thought ID"),
    }
}

fn get_thought_update_tool() -> Tool {
    Tool {
        name: "thought_update".to_string(),
        description: "Update a thought. Status and confidence changes are recorded in the activity feed.".to_string(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {
                "thought_id": {
                    "type": "string",
                    "description": "The thought ID"
                },
                "type": {
                    "type": "string",
                    "enum": THOUGHT_TYPES
                },
                "title": { "type": "string" },
                "body": { "type": "string" },
                "confidence": {
                    "type": "integer",
                    "minimum": 0,
                    "maximum": 100
                },
                "status": {
                    "type": "string",
                    "enum": THOUGHT_STATUSES
                },
                "tags": {
                    "type": "array",
                    "items": { "type": "string" }
                },
                "owner": { "type": "string" },
                "position": {
                    "type": "object",
                    "properties": {
                        "x": { "type": "number" },
                        "y": { "type": "number" }
                    },
                    "required": ["x", "y"]
                },
                "user_id": { "type": "string" },
                "user_name": { "type": "string" }
            },
            "required": ["thought_id"],
            "additionalProperties": false
        }),
    }
}

fn get_thought_delete_tool() -> Tool {
    Tool {
        name: "thought_delete".to_string(),
        description: "Delete a thought with its evidence links, connections and comments.".to_string(),
        input_schema: id_schema("thought_id", "The thought ID"),
    }
}

fn get_evidence_create_tool() -> Tool {
    Tool {
        name: "evidence_create".to_string(),
        description: "Add a piece of sourced evidence to a board.".to_string(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {
                "board_id": {
                    "type": "string",
                    "description": "The board ID"
                },
                "type": {
                    "type": "string",
                    "enum": ["profiler", "link_analysis", "url", "note", "case_artifact", "search_result"],
                    "description": "Evidence source type"
                },
                "title": { "type": "string" },
                "summary": { "type": "string" },
                "timestamp": {
                    "type": "string",
                    "format": "date-time",
                    "description": "When the evidence was observed (default: now)"
                },
                "reliability": {
                    "type": "string",
                    "enum": ["unknown", "low", "medium", "high"]
                },
                "extracted_entities": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "type": {
                                "type": "string",
                                "enum": ["domain", "ip", "email", "handle", "phone"]
                            },
                            "value": { "type": "string" }
                        },
                        "required": ["type", "value"]
                    }
                },
                "raw_payload": {
                    "type": "object",
                    "description": "Raw source data kept for previews"
                },
                "created_by": { "type": "string" }
            },
            "required": ["board_id", "type", "title"],
            "additionalProperties": false
        }),
    }
}

fn get_evidence_list_tool() -> Tool {
    Tool {
        name: "evidence_list".to_string(),
        description: "List the evidence on a board.".to_string(),
        input_schema: id_schema("board_id", "The board ID"),
    }
}

fn get_evidence_delete_tool() -> Tool {
    Tool {
        name: "evidence_delete".to_string(),
        description: "Delete an evidence item and its links.".to_string(),
        input_schema: id_schema("evidence_id", "The evidence ID"),
    }
}

fn get_evidence_link_create_tool() -> Tool {
    Tool {
        name: "evidence_link_create".to_string(),
        description: "Attach evidence to a thought as supporting, contradicting or context.".to_string(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {
                "thought_id": { "type": "string" },
                "evidence_id": { "type": "string" },
                "relation": {
                    "type": "string",
                    "enum": EVIDENCE_RELATIONS
                },
                "is_key": {
                    "type": "boolean",
                    "description": "Mark as key evidence for the thought"
                },
                "note": {
                    "type": "string",
                    "description": "Why this evidence relates"
                },
                "user_id": { "type": "string" },
                "user_name": { "type": "string" }
            },
            "required": ["thought_id", "evidence_id", "relation"],
            "additionalProperties": false
        }),
    }
}

fn get_evidence_link_update_tool() -> Tool {
    Tool {
        name: "evidence_link_update".to_string(),
        description: "Change the relation, key flag or note of an evidence link.".to_string(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {
                "link_id": { "type": "string" },
                "relation": {
                    "type": "string",
                    "enum": EVIDENCE_RELATIONS
                },
                "is_key": { "type": "boolean" },
                "note": { "type": "string" }
            },
            "required": ["link_id"],
            "additionalProperties": false
        }),
    }
}

fn get_evidence_link_delete_tool() -> Tool {
    Tool {
        name: "evidence_link_delete".to_string(),
        description: "Detach evidence from a thought.".to_string(),
        input_schema: id_schema("link_id", "The evidence link ID"),
    }
}

fn get_connection_create_tool() -> Tool {
    Tool {
        name: "connection_create".to_string(),
        description: "Connect two thoughts on the same board.".to_string(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {
                "board_id": { "type": "string" },
                "source_id": { "type": "string" },
                "target_id": { "type": "string" },
                "type": {
                    "type": "string",
                    "enum": ["supports", "contradicts", "related"],
                    "description": "Connection type (default: related)"
                }
            },
            "required": ["board_id", "source_id", "target_id"],
            "additionalProperties": false
        }),
    }
}

fn get_connection_list_tool() -> Tool {
    Tool {
        name: "connection_list".to_string(),
        description: "List the connections on a board.".to_string(),
        input_schema: id_schema("board_id", "The board ID"),
    }
}

fn get_connection_delete_tool() -> Tool {
    Tool {
        name: "connection_delete".to_string(),
        description: "Remove a connection between two thoughts.".to_string(),
        input_schema: id_schema("connection_id", "The connection ID"),
    }
}

fn get_comment_create_tool() -> Tool {
    Tool {
        name: "comment_create".to_string(),
        description: "Comment on a thought.".to_string(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {
                "thought_id": { "type": "string" },
                "content": { "type": "string" },
                "user_id": { "type": "string" },
                "user_name": { "type": "string" }
            },
            "required": ["thought_id", "content"],
            "additionalProperties": false
        }),
    }
}

fn get_comment_list_tool() -> Tool {
    Tool {
        name: "comment_list".to_string(),
        description: "List the comments on a thought, oldest first.".to_string(),
        input_schema: id_schema("thought_id", "The thought ID"),
    }
}

fn get_activity_list_tool() -> Tool {
    Tool {
        name: "activity_list".to_string(),
        description: "List a board's activity feed, newest first.".to_string(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {
                "board_id": { "type": "string" },
                "limit": {
                    "type": "integer",
                    "minimum": 1,
                    "description": "Maximum number of entries"
                }
            },
            "required": ["board_id"],
            "additionalProperties": false
        }),
    }
}

fn get_ai_analyze_tool() -> Tool {
    Tool {
        name: "ai_analyze".to_string(),
        description: "Suggest next investigative steps for a thought: evidence gaps, contradictions to resolve, alternatives to consider, entities to verify. Returns at most 7 suggestions, highest priority first.".to_string(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {
                "board_id": {
                    "type": "string",
                    "description": "The board ID"
                },
                "thought_id": {
                    "type": "string",
                    "description": "The thought to analyse"
                },
                "user_feedback": {
                    "type": "object",
                    "properties": {
                        "accepted_suggestion_ids": {
                            "type": "array",
                            "items": { "type": "string" }
                        },
                        "ignored_suggestion_ids": {
                            "type": "array",
                            "items": { "type": "string" },
                            "description": "Suggestions to leave out"
                        },
                        "completed_suggestion_ids": {
                            "type": "array",
                            "items": { "type": "string" }
                        }
                    }
                }
            },
            "required": ["board_id", "thought_id"],
            "additionalProperties": false
        }),
    }
}

fn get_ai_chat_tool() -> Tool {
    Tool {
        name: "ai_chat".to_string(),
        description: "Ask the investigation assistant. With board_id and thought_id the selected thought and its evidence are included as context. Requires CHAT_API_KEY.".to_string(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {
                "messages": {
                    "type": "array",
                    "minItems": 1,
                    "items": {
                        "type": "object",
                        "properties": {
                            "role": {
                                "type": "string",
                                "enum": ["system", "user", "assistant"]
                            },
                            "content": { "type": "string" }
                        },
                        "required": ["role", "content"]
                    },
                    "description": "Conversation so far"
                },
                "board_id": { "type": "string" },
                "thought_id": { "type": "string" }
            },
            "required": ["messages"],
            "additionalProperties": false
        }),
    }
}

fn get_export_case_tool() -> Tool {
    Tool {
        name: "export_case".to_string(),
        description: "Draft a case report for a board: summary, claims with key evidence, open questions and timeline, as data and Markdown.".to_string(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {
                "board_id": { "type": "string" },
                "user_id": { "type": "string" },
                "user_name": { "type": "string" }
            },
            "required": ["board_id"],
            "additionalProperties": false
        }),
    }
}
