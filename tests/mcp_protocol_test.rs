//! Integration tests for MCP protocol handling
//!
//! Drives the server with JSON-RPC request lines, exactly as a client would
//! send them over stdio, against an in-memory board store.

use std::path::PathBuf;
use std::sync::Arc;

use serde_json::{json, Value};

use mcp_osint_board::config::{
    ChatConfig, Config, DatabaseConfig, LogFormat, LoggingConfig, RequestConfig,
};
use mcp_osint_board::server::{AppState, JsonRpcRequest, McpServer};
use mcp_osint_board::storage::SqliteStorage;

async fn create_server() -> McpServer {
    let config = Config {
        database: DatabaseConfig {
            path: PathBuf::from(":memory:"),
            max_connections: 1,
        },
        logging: LoggingConfig {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        },
        request: RequestConfig::default(),
        chat: ChatConfig::default(),
    };
    let storage = SqliteStorage::new_in_memory().await.unwrap();
    McpServer::new(Arc::new(AppState::with_chat(config, storage, None)))
}

/// Send one request line and return the serialized response, if any.
async fn send(server: &McpServer, line: &str) -> Option<Value> {
    let request: JsonRpcRequest = serde_json::from_str(line).expect("valid request line");
    let response = server.handle_request(request).await?;
    Some(serde_json::to_value(response).unwrap())
}

/// Verify JSON-RPC 2.0 response structure
fn assert_valid_jsonrpc_response(response: &Value) {
    assert_eq!(response["jsonrpc"], "2.0", "Invalid JSON-RPC version");
    assert!(
        response.get("result").is_some() != response.get("error").is_some(),
        "Response must have exactly one of result or error"
    );
}

/// Call a tool and decode its text content.
async fn call(server: &McpServer, id: u64, name: &str, arguments: Value) -> (bool, Value) {
    let line = json!({
        "jsonrpc": "2.0",
        "id": id,
        "method": "tools/call",
        "params": { "name": name, "arguments": arguments }
    })
    .to_string();

    let response = send(server, &line).await.expect("requests get responses");
    assert_valid_jsonrpc_response(&response);
    assert_eq!(response["id"], id);

    let result = &response["result"];
    let is_error = result["isError"].as_bool().unwrap_or(false);
    let text = result["content"][0]["text"].as_str().unwrap();
    let value = serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()));
    (is_error, value)
}

#[cfg(test)]
mod protocol_tests {
    use super::*;

    #[tokio::test]
    async fn test_initialize_handshake() {
        let server = create_server().await;
        let response = send(
            &server,
            r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{"protocolVersion":"2024-11-05","capabilities":{},"clientInfo":{"name":"test-client","version":"1.0.0"}}}"#,
        )
        .await
        .unwrap();

        assert_valid_jsonrpc_response(&response);
        assert_eq!(response["result"]["serverInfo"]["name"], "mcp-osint-board");
        assert_eq!(response["result"]["protocolVersion"], "2024-11-05");

        let ack = send(
            &server,
            r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
        )
        .await;
        assert!(ack.is_none());
    }

    #[tokio::test]
    async fn test_string_id_is_preserved() {
        let server = create_server().await;
        let response = send(&server, r#"{"jsonrpc":"2.0","id":"req-abc","method":"ping"}"#)
            .await
            .unwrap();
        assert_eq!(response["id"], "req-abc");
        assert_eq!(response["result"], json!({}));
    }

    #[tokio::test]
    async fn test_invalid_tool_params() {
        let server = create_server().await;
        let response = send(
            &server,
            r#"{"jsonrpc":"2.0","id":5,"method":"tools/call","params":{"arguments":{}}}"#,
        )
        .await
        .unwrap();
        assert_eq!(response["error"]["code"], -32602);
    }

    #[tokio::test]
    async fn test_missing_arguments_is_tool_error() {
        let server = create_server().await;
        let response = send(
            &server,
            r#"{"jsonrpc":"2.0","id":6,"method":"tools/call","params":{"name":"board_get"}}"#,
        )
        .await
        .unwrap();

        assert_eq!(response["result"]["isError"], true);
        assert_eq!(
            response["result"]["content"][0]["text"],
            "Error: Invalid parameters for board_get: Missing arguments"
        );
    }
}

#[cfg(test)]
mod workflow_tests {
    use super::*;

    #[tokio::test]
    async fn test_board_workflow() {
        let server = create_server().await;

        let (is_error, board) = call(
            &server,
            1,
            "board_create",
            json!({ "title": "Gift card scam", "id": "b1", "created_by": "user-1" }),
        )
        .await;
        assert!(!is_error, "{board}");
        assert_eq!(board["id"], "b1");

        let (_, claim) = call(
            &server,
            2,
            "thought_create",
            json!({ "board_id": "b1", "type": "claim", "title": "Payment via gift cards", "confidence": 80 }),
        )
        .await;
        let claim_id = claim["id"].as_str().unwrap().to_string();

        let (_, evidence) = call(
            &server,
            3,
            "evidence_create",
            json!({
                "board_id": "b1",
                "type": "url",
                "title": "Checkout page",
                "reliability": "high",
                "extracted_entities": [{ "type": "domain", "value": "giftcard-refund.shop" }]
            }),
        )
        .await;
        let evidence_id = evidence["id"].as_str().unwrap().to_string();
        assert_eq!(evidence["extracted_entities"][0]["type"], "domain");

        let (is_error, link) = call(
            &server,
            4,
            "evidence_link_create",
            json!({ "thought_id": claim_id, "evidence_id": evidence_id, "relation": "supports" }),
        )
        .await;
        assert!(!is_error, "{link}");

        let (_, analysis) = call(
            &server,
            5,
            "ai_analyze",
            json!({ "board_id": "b1", "thought_id": claim_id }),
        )
        .await;
        let ids: Vec<_> = analysis["suggestions"]
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["id"].as_str().unwrap().to_string())
            .collect();
        assert!(ids.contains(&format!("rule-no-key-{}", claim_id)));
        assert!(ids.contains(&format!("rule-domain-profile-{}", claim_id)));

        let domain = analysis["suggestions"]
            .as_array()
            .unwrap()
            .iter()
            .find(|s| s["action_type"] == "RUN_TOOL")
            .unwrap();
        assert_eq!(domain["action_payload"]["tool"], "domain_profiler");
        assert_eq!(domain["action_payload"]["target"], "giftcard-refund.shop");
        assert_eq!(domain["category"], "VERIFICATION");

        // Marking the link as key clears the key-evidence suggestion
        let link_id = link["id"].as_str().unwrap();
        let (is_error, _) = call(
            &server,
            6,
            "evidence_link_update",
            json!({ "link_id": link_id, "is_key": true }),
        )
        .await;
        assert!(!is_error);

        let (_, analysis) = call(
            &server,
            7,
            "ai_analyze",
            json!({
                "board_id": "b1",
                "thought_id": claim_id,
                "user_feedback": { "ignored_suggestion_ids": [format!("rule-domain-profile-{}", claim_id)] }
            }),
        )
        .await;
        let remaining: Vec<_> = analysis["suggestions"]
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["id"].as_str().unwrap().to_string())
            .collect();
        assert!(!remaining.contains(&format!("rule-no-key-{}", claim_id)));
        assert!(!remaining.contains(&format!("rule-domain-profile-{}", claim_id)));

        let (_, full) = call(&server, 8, "board_get", json!({ "board_id": "b1" })).await;
        assert_eq!(full["thoughts"].as_array().unwrap().len(), 1);
        assert_eq!(full["evidence_links"][0]["is_key"], true);
        let kinds: Vec<_> = full["activity"]
            .as_array()
            .unwrap()
            .iter()
            .map(|a| a["type"].as_str().unwrap())
            .collect();
        assert_eq!(kinds, vec!["evidence_attached", "thought_created"]);

        let (is_error, _) = call(&server, 9, "board_delete", json!({ "board_id": "b1" })).await;
        assert!(!is_error);
        let (_, boards) = call(&server, 10, "board_list", json!({})).await;
        assert_eq!(boards["count"], 0);
    }

    #[tokio::test]
    async fn test_comments_and_connections() {
        let server = create_server().await;
        call(&server, 1, "board_create", json!({ "title": "Board", "id": "b1" })).await;

        let (_, question) = call(
            &server,
            2,
            "thought_create",
            json!({ "board_id": "b1", "type": "question", "title": "Who is behind it?" }),
        )
        .await;
        let (_, hypothesis) = call(
            &server,
            3,
            "thought_create",
            json!({ "board_id": "b1", "type": "hypothesis", "title": "Known crew" }),
        )
        .await;

        let (is_error, connection) = call(
            &server,
            4,
            "connection_create",
            json!({
                "board_id": "b1",
                "source_id": question["id"],
                "target_id": hypothesis["id"],
                "type": "related"
            }),
        )
        .await;
        assert!(!is_error, "{connection}");

        let (is_error, comment) = call(
            &server,
            5,
            "comment_create",
            json!({
                "thought_id": question["id"],
                "content": "Check the registrar history",
                "user_id": "user-1",
                "user_name": "Sarah Chen"
            }),
        )
        .await;
        assert!(!is_error, "{comment}");
        assert_eq!(comment["user_name"], "Sarah Chen");

        let (_, comments) =
            call(&server, 6, "comment_list", json!({ "thought_id": question["id"] })).await;
        assert_eq!(comments["count"], 1);

        let (_, activity) =
            call(&server, 7, "activity_list", json!({ "board_id": "b1", "limit": 1 })).await;
        assert_eq!(activity["count"], 1);
        assert_eq!(activity["activity"][0]["type"], "comment_added");

        let (is_error, _) = call(
            &server,
            8,
            "thought_delete",
            json!({ "thought_id": hypothesis["id"] }),
        )
        .await;
        assert!(!is_error);
        let (_, connections) =
            call(&server, 9, "connection_list", json!({ "board_id": "b1" })).await;
        assert_eq!(connections["count"], 0);
    }

    #[tokio::test]
    async fn test_unknown_board_is_tool_error() {
        let server = create_server().await;
        let (is_error, text) = call(
            &server,
            1,
            "thought_create",
            json!({ "board_id": "ghost", "type": "claim", "title": "Orphan" }),
        )
        .await;
        assert!(is_error);
        assert_eq!(
            text,
            json!("Error: Tool execution failed: Not found: Board ghost")
        );
    }
}
