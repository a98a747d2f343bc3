use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::str::FromStr;
use tracing::{info, warn};

use super::SharedState;
use crate::chat::{ChatMessage, ThoughtContext};
use crate::error::{ChatError, McpError, McpResult, ToolError};
use crate::export::CaseExport;
use crate::storage::{
    ActivityEntry, ActivityKind, Board, BoardMember, BoardStatus, Comment, Connection,
    ConnectionType, Entity, Evidence, EvidenceLink, EvidenceRelation, EvidenceSourceType,
    Position, Reliability, Storage, Thought, ThoughtStatus, ThoughtType,
};
use crate::suggestions::{build_snapshot, FeedbackMemory, Suggestion};

/// Route tool calls to appropriate handlers
pub async fn handle_tool_call(
    state: &SharedState,
    tool_name: &str,
    arguments: Option<Value>,
) -> McpResult<Value> {
    info!(tool = %tool_name, "Routing tool call");

    match tool_name {
        // Boards
        "board_create" => handle_board_create(state, arguments).await,
        "board_list" => handle_board_list(state).await,
        "board_get" => handle_board_get(state, arguments).await,
        "board_update" => handle_board_update(state, arguments).await,
        "board_delete" => handle_board_delete(state, arguments).await,
        // Thoughts
        "thought_create" => handle_thought_create(state, arguments).await,
        "thought_get" => handle_thought_get(state, arguments).await,
        "thought_update" => handle_thought_update(state, arguments).await,
        "thought_delete" => handle_thought_delete(state, arguments).await,
        // Evidence and links
        "evidence_create" => handle_evidence_create(state, arguments).await,
        "evidence_list" => handle_evidence_list(state, arguments).await,
        "evidence_delete" => handle_evidence_delete(state, arguments).await,
        "evidence_link_create" => handle_evidence_link_create(state, arguments).await,
        "evidence_link_update" => handle_evidence_link_update(state, arguments).await,
        "evidence_link_delete" => handle_evidence_link_delete(state, arguments).await,
        // Connections
        "connection_create" => handle_connection_create(state, arguments).await,
        "connection_list" => handle_connection_list(state, arguments).await,
        "connection_delete" => handle_connection_delete(state, arguments).await,
        // Discussion and activity
        "comment_create" => handle_comment_create(state, arguments).await,
        "comment_list" => handle_comment_list(state, arguments).await,
        "activity_list" => handle_activity_list(state, arguments).await,
        // Assistant
        "ai_analyze" => handle_ai_analyze(state, arguments).await,
        "ai_chat" => handle_ai_chat(state, arguments).await,
        "export_case" => handle_export_case(state, arguments).await,
        _ => Err(McpError::UnknownTool {
            tool_name: tool_name.to_string(),
        }),
    }
}

// ============================================================================
// Shared parameter pieces
// ============================================================================

/// Who is performing an action, for activity entries.
#[derive(Debug, Clone, Deserialize)]
struct Actor {
    #[serde(default = "default_user_id")]
    user_id: String,
    #[serde(default = "default_user_name")]
    user_name: String,
}

fn default_user_id() -> String {
    "system".to_string()
}

fn default_user_name() -> String {
    "System".to_string()
}

#[derive(Debug, Deserialize)]
struct BoardIdParams {
    board_id: String,
}

#[derive(Debug, Deserialize)]
struct ThoughtIdParams {
    thought_id: String,
}

// ============================================================================
// Board handlers
// ============================================================================

#[derive(Debug, Deserialize)]
struct BoardCreateParams {
    title: String,
    #[serde(default)]
    id: Option<String>,
    #[serde(default = "default_user_id")]
    created_by: String,
    #[serde(default)]
    members: Vec<BoardMember>,
}

async fn handle_board_create(state: &SharedState, arguments: Option<Value>) -> McpResult<Value> {
    let params: BoardCreateParams = parse_arguments("board_create", arguments)?;
    require_non_empty("title", &params.title)?;

    let mut board = Board::new(params.title.trim(), params.created_by);
    if let Some(id) = params.id {
        board = board.with_id(id);
    }
    board.members = params.members;

    state.storage.create_board(&board).await?;
    info!(board_id = %board.id, "Board created");

    serde_json::to_value(board).map_err(McpError::Json)
}

async fn handle_board_list(state: &SharedState) -> McpResult<Value> {
    let boards = state.storage.list_boards().await?;
    Ok(json!({
        "count": boards.len(),
        "boards": boards,
    }))
}

async fn handle_board_get(state: &SharedState, arguments: Option<Value>) -> McpResult<Value> {
    let params: BoardIdParams = parse_arguments("board_get", arguments)?;

    let records = state
        .storage
        .load_board(&params.board_id)
        .await?
        .ok_or_else(|| ToolError::NotFound(format!("Board {}", params.board_id)))?;
    let activity = state.storage.get_board_activity(&params.board_id).await?;

    Ok(json!({
        "board": records.board,
        "thoughts": records.thoughts,
        "evidence": records.evidence,
        "evidence_links": records.evidence_links,
        "connections": records.connections,
        "activity": activity,
    }))
}

#[derive(Debug, Deserialize)]
struct BoardUpdateParams {
    board_id: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    members: Option<Vec<BoardMember>>,
}

async fn handle_board_update(state: &SharedState, arguments: Option<Value>) -> McpResult<Value> {
    let params: BoardUpdateParams = parse_arguments("board_update", arguments)?;
    let mut board = require_board(state, &params.board_id).await?;

    if let Some(title) = params.title {
        require_non_empty("title", &title)?;
        board.title = title.trim().to_string();
    }
    if let Some(status) = params.status {
        board.status = parse_label::<BoardStatus>("board_update", "status", &status)?;
    }
    if let Some(members) = params.members {
        board.members = members;
    }
    board.updated_at = Utc::now();

    state.storage.update_board(&board).await?;
    serde_json::to_value(board).map_err(McpError::Json)
}

async fn handle_board_delete(state: &SharedState, arguments: Option<Value>) -> McpResult<Value> {
    let params: BoardIdParams = parse_arguments("board_delete", arguments)?;
    state.storage.delete_board(&params.board_id).await?;
    info!(board_id = %params.board_id, "Board deleted");
    Ok(json!({ "deleted": true, "board_id": params.board_id }))
}

// ============================================================================
// Thought handlers
// ============================================================================

#[derive(Debug, Deserialize)]
struct ThoughtCreateParams {
    board_id: String,
    #[serde(rename = "type")]
    thought_type: String,
    title: String,
    #[serde(default)]
    body: String,
    #[serde(default)]
    confidence: Option<u8>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    owner: Option<String>,
    #[serde(default)]
    position: Option<Position>,
    #[serde(flatten)]
    actor: Actor,
}

async fn handle_thought_create(state: &SharedState, arguments: Option<Value>) -> McpResult<Value> {
    const TOOL: &str = "thought_create";
    let params: ThoughtCreateParams = parse_arguments(TOOL, arguments)?;
    require_non_empty("title", &params.title)?;
    require_board(state, &params.board_id).await?;

    let thought_type = parse_label::<ThoughtType>(TOOL, "type", &params.thought_type)?;
    let mut thought = Thought::new(&params.board_id, thought_type, params.title.trim())
        .with_body(params.body)
        .with_tags(params.tags)
        .with_created_by(&params.actor.user_id);

    if let Some(confidence) = params.confidence {
        thought = thought.with_confidence(validate_confidence(confidence)?);
    }
    if let Some(status) = params.status {
        thought = thought.with_status(parse_label::<ThoughtStatus>(TOOL, "status", &status)?);
    }
    if let Some(owner) = params.owner {
        thought = thought.with_owner(owner);
    }
    if let Some(position) = params.position {
        thought = thought.with_position(position.x, position.y);
    }

    state.storage.create_thought(&thought).await?;
    record_activity(
        state,
        &thought.board_id,
        ActivityKind::ThoughtCreated,
        &params.actor,
        json!({ "thought_id": thought.id, "title": thought.title, "type": thought.thought_type }),
    )
    .await;

    serde_json::to_value(thought).map_err(McpError::Json)
}

async fn handle_thought_get(state: &SharedState, arguments: Option<Value>) -> McpResult<Value> {
    let params: ThoughtIdParams = parse_arguments("thought_get", arguments)?;
    let thought = require_thought(state, &params.thought_id).await?;
    let evidence_links = state
        .storage
        .get_thought_evidence_links(&params.thought_id)
        .await?;
    let comments = state.storage.get_thought_comments(&params.thought_id).await?;

    Ok(json!({
        "thought": thought,
        "evidence_links": evidence_links,
        "comments": comments,
    }))
}

#[derive(Debug, Deserialize)]
struct ThoughtUpdateParams {
    thought_id: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    body: Option<String>,
    #[serde(default, rename = "type")]
    thought_type: Option<String>,
    #[serde(default)]
    confidence: Option<u8>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    tags: Option<Vec<String>>,
    #[serde(default)]
    owner: Option<String>,
    #[serde(default)]
    position: Option<Position>,
    #[serde(flatten)]
    actor: Actor,
}

async fn handle_thought_update(state: &SharedState, arguments: Option<Value>) -> McpResult<Value> {
    const TOOL: &str = "thought_update";
    let params: ThoughtUpdateParams = parse_arguments(TOOL, arguments)?;
    let mut thought = require_thought(state, &params.thought_id).await?;
    let previous_status = thought.status;
    let previous_confidence = thought.confidence;

    if let Some(title) = params.title {
        require_non_empty("title", &title)?;
        thought.title = title.trim().to_string();
    }
    if let Some(body) = params.body {
        thought.body = body;
    }
    if let Some(kind) = params.thought_type {
        thought.thought_type = parse_label::<ThoughtType>(TOOL, "type", &kind)?;
    }
    if let Some(confidence) = params.confidence {
        thought.confidence = Some(validate_confidence(confidence)?);
    }
    if let Some(status) = params.status {
        thought.status = parse_label::<ThoughtStatus>(TOOL, "status", &status)?;
    }
    if let Some(tags) = params.tags {
        thought.tags = tags;
    }
    if let Some(owner) = params.owner {
        thought.owner = Some(owner);
    }
    if let Some(position) = params.position {
        thought.position = position;
    }
    thought.updated_at = Utc::now();

    state.storage.update_thought(&thought).await?;

    if thought.status != previous_status {
        record_activity(
            state,
            &thought.board_id,
            ActivityKind::StatusChanged,
            &params.actor,
            json!({ "thought_id": thought.id, "from": previous_status, "to": thought.status }),
        )
        .await;
    }
    if thought.confidence != previous_confidence {
        record_activity(
            state,
            &thought.board_id,
            ActivityKind::ConfidenceChanged,
            &params.actor,
            json!({ "thought_id": thought.id, "from": previous_confidence, "to": thought.confidence }),
        )
        .await;
    }

    serde_json::to_value(thought).map_err(McpError::Json)
}

async fn handle_thought_delete(state: &SharedState, arguments: Option<Value>) -> McpResult<Value> {
    let params: ThoughtIdParams = parse_arguments("thought_delete", arguments)?;
    state.storage.delete_thought(&params.thought_id).await?;
    Ok(json!({ "deleted": true, "thought_id": params.thought_id }))
}

// ============================================================================
// Evidence handlers
// ============================================================================

#[derive(Debug, Deserialize)]
struct EvidenceCreateParams {
    board_id: String,
    #[serde(rename = "type")]
    source_type: String,
    title: String,
    #[serde(default)]
    summary: String,
    #[serde(default)]
    timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    reliability: Option<String>,
    #[serde(default)]
    extracted_entities: Vec<EntityParams>,
    #[serde(default)]
    raw_payload: Option<Value>,
    #[serde(default = "default_user_id")]
    created_by: String,
}

#[derive(Debug, Deserialize)]
struct EntityParams {
    #[serde(rename = "type")]
    kind: String,
    value: String,
}

async fn handle_evidence_create(state: &SharedState, arguments: Option<Value>) -> McpResult<Value> {
    const TOOL: &str = "evidence_create";
    let params: EvidenceCreateParams = parse_arguments(TOOL, arguments)?;
    require_non_empty("title", &params.title)?;
    require_board(state, &params.board_id).await?;

    let source_type = parse_label::<EvidenceSourceType>(TOOL, "type", &params.source_type)?;
    let mut evidence = Evidence::new(&params.board_id, source_type, params.title.trim())
        .with_summary(params.summary)
        .with_created_by(params.created_by);

    if let Some(timestamp) = params.timestamp {
        evidence.timestamp = timestamp;
    }
    if let Some(reliability) = params.reliability {
        evidence = evidence.with_reliability(parse_label::<Reliability>(
            TOOL,
            "reliability",
            &reliability,
        )?);
    }
    for entity in params.extracted_entities {
        let kind = parse_label(TOOL, "extracted_entities.type", &entity.kind)?;
        if entity.value.trim().is_empty() {
            continue;
        }
        evidence
            .extracted_entities
            .push(Entity::new(kind, entity.value.trim()));
    }
    if let Some(payload) = params.raw_payload {
        evidence = evidence.with_raw_payload(payload);
    }

    state.storage.create_evidence(&evidence).await?;
    serde_json::to_value(evidence).map_err(McpError::Json)
}

async fn handle_evidence_list(state: &SharedState, arguments: Option<Value>) -> McpResult<Value> {
    let params: BoardIdParams = parse_arguments("evidence_list", arguments)?;
    require_board(state, &params.board_id).await?;
    let evidence = state.storage.get_board_evidence(&params.board_id).await?;
    Ok(json!({ "count": evidence.len(), "evidence": evidence }))
}

async fn handle_evidence_delete(state: &SharedState, arguments: Option<Value>) -> McpResult<Value> {
    #[derive(Deserialize)]
    struct Params {
        evidence_id: String,
    }

    let params: Params = parse_arguments("evidence_delete", arguments)?;
    state.storage.delete_evidence(&params.evidence_id).await?;
    Ok(json!({ "deleted": true, "evidence_id": params.evidence_id }))
}

#[derive(Debug, Deserialize)]
struct EvidenceLinkCreateParams {
    thought_id: String,
    evidence_id: String,
    relation: String,
    #[serde(default)]
    is_key: bool,
    #[serde(default)]
    note: Option<String>,
    #[serde(flatten)]
    actor: Actor,
}

async fn handle_evidence_link_create(
    state: &SharedState,
    arguments: Option<Value>,
) -> McpResult<Value> {
    const TOOL: &str = "evidence_link_create";
    let params: EvidenceLinkCreateParams = parse_arguments(TOOL, arguments)?;
    let relation = parse_label::<EvidenceRelation>(TOOL, "relation", &params.relation)?;

    let thought = require_thought(state, &params.thought_id).await?;
    let evidence = state
        .storage
        .get_evidence(&params.evidence_id)
        .await?
        .ok_or_else(|| ToolError::NotFound(format!("Evidence {}", params.evidence_id)))?;
    if evidence.board_id != thought.board_id {
        return Err(ToolError::Validation {
            field: "evidence_id".to_string(),
            reason: "Evidence belongs to a different board".to_string(),
        }
        .into());
    }

    let mut link = EvidenceLink::new(&thought.id, &evidence.id, relation)
        .with_key(params.is_key)
        .with_created_by(&params.actor.user_id);
    if let Some(note) = params.note {
        link = link.with_note(note);
    }

    state.storage.create_evidence_link(&link).await?;
    record_activity(
        state,
        &thought.board_id,
        ActivityKind::EvidenceAttached,
        &params.actor,
        json!({
            "thought_id": thought.id,
            "evidence_id": evidence.id,
            "evidence_title": evidence.title,
            "relation": relation,
        }),
    )
    .await;

    serde_json::to_value(link).map_err(McpError::Json)
}

#[derive(Debug, Deserialize)]
struct EvidenceLinkUpdateParams {
    link_id: String,
    #[serde(default)]
    relation: Option<String>,
    #[serde(default)]
    is_key: Option<bool>,
    #[serde(default)]
    note: Option<String>,
}

async fn handle_evidence_link_update(
    state: &SharedState,
    arguments: Option<Value>,
) -> McpResult<Value> {
    const TOOL: &str = "evidence_link_update";
    let params: EvidenceLinkUpdateParams = parse_arguments(TOOL, arguments)?;

    let mut link = state
        .storage
        .get_evidence_link(&params.link_id)
        .await?
        .ok_or_else(|| ToolError::NotFound(format!("Evidence link {}", params.link_id)))?;

    if let Some(relation) = params.relation {
        link.relation = parse_label(TOOL, "relation", &relation)?;
    }
    if let Some(is_key) = params.is_key {
        link.is_key = is_key;
    }
    if let Some(note) = params.note {
        link.note = Some(note);
    }

    state.storage.update_evidence_link(&link).await?;
    serde_json::to_value(link).map_err(McpError::Json)
}

async fn handle_evidence_link_delete(
    state: &SharedState,
    arguments: Option<Value>,
) -> McpResult<Value> {
    #[derive(Deserialize)]
    struct Params {
        link_id: String,
    }

    let params: Params = parse_arguments("evidence_link_delete", arguments)?;
    state.storage.delete_evidence_link(&params.link_id).await?;
    Ok(json!({ "deleted": true, "link_id": params.link_id }))
}

// ============================================================================
// Connection handlers
// ============================================================================

#[derive(Debug, Deserialize)]
struct ConnectionCreateParams {
    board_id: String,
    source_id: String,
    target_id: String,
    #[serde(default, rename = "type")]
    connection_type: Option<String>,
}

async fn handle_connection_create(
    state: &SharedState,
    arguments: Option<Value>,
) -> McpResult<Value> {
    const TOOL: &str = "connection_create";
    let params: ConnectionCreateParams = parse_arguments(TOOL, arguments)?;

    if params.source_id == params.target_id {
        return Err(ToolError::Validation {
            field: "target_id".to_string(),
            reason: "A thought cannot be connected to itself".to_string(),
        }
        .into());
    }

    for id in [&params.source_id, &params.target_id] {
        let thought = require_thought(state, id).await?;
        if thought.board_id != params.board_id {
            return Err(ToolError::Validation {
                field: "board_id".to_string(),
                reason: format!("Thought {} is not on board {}", id, params.board_id),
            }
            .into());
        }
    }

    let connection_type = match params.connection_type {
        Some(kind) => parse_label::<ConnectionType>(TOOL, "type", &kind)?,
        None => ConnectionType::default(),
    };
    let connection = Connection::new(
        &params.board_id,
        &params.source_id,
        &params.target_id,
        connection_type,
    );

    state.storage.create_connection(&connection).await?;
    serde_json::to_value(connection).map_err(McpError::Json)
}

async fn handle_connection_list(state: &SharedState, arguments: Option<Value>) -> McpResult<Value> {
    let params: BoardIdParams = parse_arguments("connection_list", arguments)?;
    require_board(state, &params.board_id).await?;
    let connections = state.storage.get_board_connections(&params.board_id).await?;
    Ok(json!({ "count": connections.len(), "connections": connections }))
}

async fn handle_connection_delete(
    state: &SharedState,
    arguments: Option<Value>,
) -> McpResult<Value> {
    #[derive(Deserialize)]
    struct Params {
        connection_id: String,
    }

    let params: Params = parse_arguments("connection_delete", arguments)?;
    state.storage.delete_connection(&params.connection_id).await?;
    Ok(json!({ "deleted": true, "connection_id": params.connection_id }))
}

// ============================================================================
// Comment and activity handlers
// ============================================================================

#[derive(Debug, Deserialize)]
struct CommentCreateParams {
    thought_id: String,
    content: String,
    #[serde(flatten)]
    actor: Actor,
}

async fn handle_comment_create(state: &SharedState, arguments: Option<Value>) -> McpResult<Value> {
    let params: CommentCreateParams = parse_arguments("comment_create", arguments)?;
    require_non_empty("content", &params.content)?;
    let thought = require_thought(state, &params.thought_id).await?;

    let comment = Comment::new(
        &thought.board_id,
        &thought.id,
        &params.actor.user_id,
        &params.actor.user_name,
        params.content.trim(),
    );

    state.storage.create_comment(&comment).await?;
    record_activity(
        state,
        &thought.board_id,
        ActivityKind::CommentAdded,
        &params.actor,
        json!({ "thought_id": thought.id, "comment_id": comment.id }),
    )
    .await;

    serde_json::to_value(comment).map_err(McpError::Json)
}

async fn handle_comment_list(state: &SharedState, arguments: Option<Value>) -> McpResult<Value> {
    let params: ThoughtIdParams = parse_arguments("comment_list", arguments)?;
    require_thought(state, &params.thought_id).await?;
    let comments = state.storage.get_thought_comments(&params.thought_id).await?;
    Ok(json!({ "count": comments.len(), "comments": comments }))
}

#[derive(Debug, Deserialize)]
struct ActivityListParams {
    board_id: String,
    #[serde(default)]
    limit: Option<usize>,
}

async fn handle_activity_list(state: &SharedState, arguments: Option<Value>) -> McpResult<Value> {
    let params: ActivityListParams = parse_arguments("activity_list", arguments)?;
    require_board(state, &params.board_id).await?;

    let mut activity = state.storage.get_board_activity(&params.board_id).await?;
    if let Some(limit) = params.limit {
        activity.truncate(limit);
    }
    Ok(json!({ "count": activity.len(), "activity": activity }))
}

// ============================================================================
// Assistant handlers
// ============================================================================

#[derive(Debug, Deserialize)]
struct AnalyzeParams {
    board_id: String,
    thought_id: String,
    #[serde(default)]
    user_feedback: FeedbackMemory,
}

/// Result of `ai_analyze`.
#[derive(Debug, Serialize)]
pub struct AnalyzeResult {
    /// Ranked suggestions, highest priority first.
    pub suggestions: Vec<Suggestion>,
    /// When the analysis ran.
    pub analysis_timestamp: DateTime<Utc>,
    /// The analysed thought.
    pub thought_id: String,
}

async fn handle_ai_analyze(state: &SharedState, arguments: Option<Value>) -> McpResult<Value> {
    let params: AnalyzeParams = parse_arguments("ai_analyze", arguments)?;

    // The engine answers unknown ids with an empty list; report them here instead.
    require_board(state, &params.board_id).await?;
    let thought = require_thought(state, &params.thought_id).await?;
    if thought.board_id != params.board_id {
        return Err(ToolError::NotFound(format!(
            "Thought {} on board {}",
            params.thought_id, params.board_id
        ))
        .into());
    }

    let suggestions = state
        .engine
        .generate(&params.board_id, &params.thought_id, &params.user_feedback)
        .await?;

    let result = AnalyzeResult {
        suggestions,
        analysis_timestamp: Utc::now(),
        thought_id: params.thought_id,
    };
    serde_json::to_value(result).map_err(McpError::Json)
}

#[derive(Debug, Deserialize)]
struct ChatParams {
    messages: Vec<ChatMessage>,
    #[serde(default)]
    board_id: Option<String>,
    #[serde(default)]
    thought_id: Option<String>,
}

async fn handle_ai_chat(state: &SharedState, arguments: Option<Value>) -> McpResult<Value> {
    let params: ChatParams = parse_arguments("ai_chat", arguments)?;

    let Some(client) = &state.chat else {
        return Err(ChatError::NotConfigured {
            message: "set CHAT_API_KEY to enable the assistant".to_string(),
        }
        .into());
    };

    if params.messages.is_empty() {
        return Err(McpError::InvalidParameters {
            tool_name: "ai_chat".to_string(),
            message: "messages must not be empty".to_string(),
        });
    }

    let context = match (&params.board_id, &params.thought_id) {
        (Some(board_id), Some(thought_id)) => thought_context(state, board_id, thought_id).await?,
        _ => None,
    };

    let reply = client.complete(&params.messages, context.as_ref()).await?;

    Ok(json!({
        "reply": reply,
        "model": client.model(),
        "with_context": context.is_some(),
    }))
}

/// Snapshot-derived context for a thought, `None` when it cannot be resolved.
async fn thought_context(
    state: &SharedState,
    board_id: &str,
    thought_id: &str,
) -> McpResult<Option<ThoughtContext>> {
    let Some(records) = state.storage.load_board(board_id).await? else {
        warn!(board_id = %board_id, "Chat context board not found");
        return Ok(None);
    };

    let snapshot = build_snapshot(
        &records.board,
        records.thought(thought_id),
        &records.thoughts,
        &records.evidence,
        &records.evidence_links,
        &records.connections,
        &FeedbackMemory::default(),
    );
    Ok(snapshot.as_ref().map(ThoughtContext::from_snapshot))
}

#[derive(Debug, Deserialize)]
struct ExportParams {
    board_id: String,
    #[serde(flatten)]
    actor: Actor,
}

async fn handle_export_case(state: &SharedState, arguments: Option<Value>) -> McpResult<Value> {
    let params: ExportParams = parse_arguments("export_case", arguments)?;

    let records = state
        .storage
        .load_board(&params.board_id)
        .await?
        .ok_or_else(|| ToolError::NotFound(format!("Board {}", params.board_id)))?;

    let export = CaseExport::from_records(&records);
    let markdown = export.to_markdown();

    record_activity(
        state,
        &params.board_id,
        ActivityKind::ExportCreated,
        &params.actor,
        json!({ "findings": export.findings.len(), "open_questions": export.open_questions.len() }),
    )
    .await;

    Ok(json!({
        "export": export,
        "markdown": markdown,
    }))
}

// ============================================================================
// Helpers
// ============================================================================

/// Parse tool arguments into a typed struct
fn parse_arguments<T: serde::de::DeserializeOwned>(
    tool_name: &str,
    arguments: Option<Value>,
) -> McpResult<T> {
    match arguments {
        Some(args) => serde_json::from_value(args).map_err(|e| McpError::InvalidParameters {
            tool_name: tool_name.to_string(),
            message: e.to_string(),
        }),
        None => Err(McpError::InvalidParameters {
            tool_name: tool_name.to_string(),
            message: "Missing arguments".to_string(),
        }),
    }
}

/// Parse an enum label leniently ("LinkAnalysis", "link_analysis").
fn parse_label<T: FromStr<Err = String>>(tool_name: &str, field: &str, value: &str) -> McpResult<T> {
    value.parse().map_err(|e| McpError::InvalidParameters {
        tool_name: tool_name.to_string(),
        message: format!("{}: {}", field, e),
    })
}

fn require_non_empty(field: &str, value: &str) -> Result<(), ToolError> {
    if value.trim().is_empty() {
        return Err(ToolError::Validation {
            field: field.to_string(),
            reason: "must not be empty".to_string(),
        });
    }
    Ok(())
}

fn validate_confidence(confidence: u8) -> Result<u8, ToolError> {
    if confidence > 100 {
        return Err(ToolError::Validation {
            field: "confidence".to_string(),
            reason: format!("must be between 0 and 100, got {}", confidence),
        });
    }
    Ok(confidence)
}

async fn require_board(state: &SharedState, board_id: &str) -> McpResult<Board> {
    state
        .storage
        .get_board(board_id)
        .await?
        .ok_or_else(|| ToolError::NotFound(format!("Board {}", board_id)).into())
}

async fn require_thought(state: &SharedState, thought_id: &str) -> McpResult<Thought> {
    state
        .storage
        .get_thought(thought_id)
        .await?
        .ok_or_else(|| ToolError::NotFound(format!("Thought {}", thought_id)).into())
}

/// Append an activity entry. The feed is advisory, so a failed write is only logged.
async fn record_activity(
    state: &SharedState,
    board_id: &str,
    kind: ActivityKind,
    actor: &Actor,
    details: Value,
) {
    let entry = ActivityEntry::new(board_id, kind, &actor.user_id, &actor.user_name, details);
    if let Err(e) = state.storage.log_activity(&entry).await {
        warn!(board_id = %board_id, kind = %kind, error = %e, "Failed to record activity");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_arguments_missing() {
        let result: McpResult<BoardIdParams> = parse_arguments("board_get", None);
        match result {
            Err(McpError::InvalidParameters { tool_name, message }) => {
                assert_eq!(tool_name, "board_get");
                assert_eq!(message, "Missing arguments");
            }
            other => panic!("unexpected: {:?}", other.map(|p| p.board_id)),
        }
    }

    #[test]
    fn test_parse_arguments_missing_field() {
        let result: McpResult<AnalyzeParams> =
            parse_arguments("ai_analyze", Some(json!({ "board_id": "b1" })));
        assert!(matches!(result, Err(McpError::InvalidParameters { .. })));
    }

    #[test]
    fn test_analyze_params_default_feedback() {
        let params: AnalyzeParams = parse_arguments(
            "ai_analyze",
            Some(json!({ "board_id": "b1", "thought_id": "t1" })),
        )
        .unwrap();
        assert!(params.user_feedback.ignored_suggestion_ids.is_empty());
    }

    #[test]
    fn test_actor_defaults() {
        let params: CommentCreateParams = parse_arguments(
            "comment_create",
            Some(json!({ "thought_id": "t1", "content": "Check the registrar" })),
        )
        .unwrap();
        assert_eq!(params.actor.user_id, "system");
        assert_eq!(params.actor.user_name, "System");
    }

    #[test]
    fn test_parse_label_is_lenient() {
        let kind: ThoughtType = parse_label("thought_create", "type", "Hypothesis").unwrap();
        assert_eq!(kind, ThoughtType::Hypothesis);

        let err = parse_label::<ThoughtType>("thought_create", "type", "theory").unwrap_err();
        assert!(err.to_string().contains("type: Unknown thought type: theory"));
    }

    #[test]
    fn test_validate_confidence() {
        assert_eq!(validate_confidence(100).unwrap(), 100);
        assert!(validate_confidence(101).is_err());
    }
}
