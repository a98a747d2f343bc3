//! Storage layer for investigation boards.
//!
//! This module defines the persisted records (boards, thoughts, evidence,
//! evidence links, connections, comments, activity) and the [`Storage`]
//! trait, with a SQLite-backed implementation in [`SqliteStorage`].

mod sqlite;

pub use sqlite::SqliteStorage;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::StorageResult;

/// Normalize an enum label for lenient parsing ("LinkAnalysis", "link_analysis"
/// and "link-analysis" all compare equal).
fn normalize_label(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Implements `as_str`, `Display` and a lenient `FromStr` for a unit enum.
macro_rules! labeled_enum {
    ($name:ident, $what:literal, { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $name {
            /// Canonical snake_case label, identical to the serde representation.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = normalize_label(s);
                $(
                    if wanted == normalize_label($text) {
                        return Ok($name::$variant);
                    }
                )+
                Err(format!("Unknown {}: {}", $what, s))
            }
        }
    };
}

// ============================================================================
// Enumerations
// ============================================================================

/// Lifecycle state of a board.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoardStatus {
    /// Under active investigation.
    #[default]
    Active,
    /// Closed and kept for reference.
    Archived,
}

labeled_enum!(BoardStatus, "board status", {
    Active => "active",
    Archived => "archived",
});

/// Role of a board member.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberRole {
    /// Read-only access.
    #[default]
    Viewer,
    /// Can add and edit records.
    Editor,
    /// Owns the investigation.
    Lead,
}

labeled_enum!(MemberRole, "member role", {
    Viewer => "viewer",
    Editor => "editor",
    Lead => "lead",
});

/// Kind of investigative unit placed on a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThoughtType {
    /// An open question driving the investigation.
    Question,
    /// A candidate explanation to be tested.
    Hypothesis,
    /// An assertion the investigator intends to stand behind.
    Claim,
    /// A neutral recorded fact.
    Observation,
}

labeled_enum!(ThoughtType, "thought type", {
    Question => "question",
    Hypothesis => "hypothesis",
    Claim => "claim",
    Observation => "observation",
});

impl ThoughtType {
    /// Whether a confidence percentage is meaningful for this type.
    pub fn carries_confidence(&self) -> bool {
        matches!(self, ThoughtType::Hypothesis | ThoughtType::Claim)
    }
}

/// Investigation status of a thought.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThoughtStatus {
    /// Not yet worked on.
    #[default]
    Open,
    /// Being actively worked on.
    Investigating,
    /// Backed by the evidence.
    Supported,
    /// Refuted by the evidence.
    Disproved,
    /// Set aside for now.
    Parked,
    /// Evidence points both ways.
    Conflicted,
}

labeled_enum!(ThoughtStatus, "thought status", {
    Open => "open",
    Investigating => "investigating",
    Supported => "supported",
    Disproved => "disproved",
    Parked => "parked",
    Conflicted => "conflicted",
});

impl ThoughtStatus {
    /// Open or still being investigated.
    pub fn is_unresolved(&self) -> bool {
        matches!(self, ThoughtStatus::Open | ThoughtStatus::Investigating)
    }
}

/// How an evidence item relates to a thought.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvidenceRelation {
    /// Evidence backs the thought.
    Supports,
    /// Evidence argues against the thought.
    Contradicts,
    /// Background only.
    Context,
}

labeled_enum!(EvidenceRelation, "evidence relation", {
    Supports => "supports",
    Contradicts => "contradicts",
    Context => "context",
});

/// Where an evidence item came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvidenceSourceType {
    /// Output of a domain, IP or phone profiler.
    Profiler,
    /// Output of a link analysis run.
    LinkAnalysis,
    /// A captured web page.
    Url,
    /// A free-text analyst note.
    #[default]
    Note,
    /// An artifact from a related case.
    CaseArtifact,
    /// A search engine result.
    SearchResult,
}

labeled_enum!(EvidenceSourceType, "evidence source type", {
    Profiler => "profiler",
    LinkAnalysis => "link_analysis",
    Url => "url",
    Note => "note",
    CaseArtifact => "case_artifact",
    SearchResult => "search_result",
});

/// Assessed reliability of an evidence source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reliability {
    /// Not assessed.
    #[default]
    Unknown,
    /// Weak or unverified source.
    Low,
    /// Plausible source.
    Medium,
    /// Corroborated or authoritative source.
    High,
}

labeled_enum!(Reliability, "reliability", {
    Unknown => "unknown",
    Low => "low",
    Medium => "medium",
    High => "high",
});

impl Reliability {
    /// Low or unknown reliability.
    pub fn is_weak(&self) -> bool {
        matches!(self, Reliability::Low | Reliability::Unknown)
    }
}

/// Type of an entity extracted from evidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// Domain name.
    Domain,
    /// IP address.
    Ip,
    /// Email address.
    Email,
    /// Social media or forum handle.
    Handle,
    /// Phone number.
    Phone,
}

labeled_enum!(EntityKind, "entity kind", {
    Domain => "domain",
    Ip => "ip",
    Email => "email",
    Handle => "handle",
    Phone => "phone",
});

/// Type of a thought-to-thought connection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionType {
    /// Source thought backs the target.
    Supports,
    /// Source thought argues against the target.
    Contradicts,
    /// Thoughts are related without direction of support.
    #[default]
    Related,
}

labeled_enum!(ConnectionType, "connection type", {
    Supports => "supports",
    Contradicts => "contradicts",
    Related => "related",
});

/// Kind of entry in a board's activity feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    /// A thought was added to the board.
    ThoughtCreated,
    /// Evidence was linked to a thought.
    EvidenceAttached,
    /// A thought's status changed.
    StatusChanged,
    /// A thought's confidence changed.
    ConfidenceChanged,
    /// A case draft was exported.
    ExportCreated,
    /// A comment was posted on a thought.
    CommentAdded,
}

labeled_enum!(ActivityKind, "activity kind", {
    ThoughtCreated => "thought_created",
    EvidenceAttached => "evidence_attached",
    StatusChanged => "status_changed",
    ConfidenceChanged => "confidence_changed",
    ExportCreated => "export_created",
    CommentAdded => "comment_added",
});

// ============================================================================
// Records
// ============================================================================

/// An investigation board.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Board {
    /// Unique board identifier.
    pub id: String,
    /// Board title.
    pub title: String,
    /// Active or archived.
    #[serde(default)]
    pub status: BoardStatus,
    /// User who created the board.
    pub created_by: String,
    /// When the board was created.
    pub created_at: DateTime<Utc>,
    /// When the board was last updated.
    pub updated_at: DateTime<Utc>,
    /// Board members and their roles.
    #[serde(default)]
    pub members: Vec<BoardMember>,
}

/// A member of a board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardMember {
    /// Member user ID.
    pub user_id: String,
    /// Display name.
    pub name: String,
    /// Avatar URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    /// Access role on the board.
    #[serde(default)]
    pub role: MemberRole,
}

/// Canvas position of a thought. Irrelevant to suggestion logic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Horizontal offset.
    pub x: f64,
    /// Vertical offset.
    pub y: f64,
}

/// A question, hypothesis, claim or observation placed on a board.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Thought {
    /// Unique thought identifier.
    pub id: String,
    /// Owning board ID.
    pub board_id: String,
    /// Kind of thought.
    #[serde(rename = "type")]
    pub thought_type: ThoughtType,
    /// Short title.
    pub title: String,
    /// Free-text body.
    #[serde(default)]
    pub body: String,
    /// Confidence percentage (0-100), meaningful for hypotheses and claims.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<u8>,
    /// Investigation status.
    #[serde(default)]
    pub status: ThoughtStatus,
    /// Free-form tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Assigned owner.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    /// Creator user ID.
    pub created_by: String,
    /// When the thought was created.
    pub created_at: DateTime<Utc>,
    /// When the thought was last updated.
    pub updated_at: DateTime<Utc>,
    /// Position on the board canvas.
    #[serde(default)]
    pub position: Position,
}

/// An entity extracted from an evidence item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    /// Entity type.
    #[serde(rename = "type")]
    pub kind: EntityKind,
    /// Raw entity value, e.g. a domain name.
    pub value: String,
}

/// A discrete piece of sourced information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Evidence {
    /// Unique evidence identifier.
    pub id: String,
    /// Owning board ID.
    pub board_id: String,
    /// Source type.
    #[serde(rename = "type")]
    pub source_type: EvidenceSourceType,
    /// Short title.
    pub title: String,
    /// Summary text.
    #[serde(default)]
    pub summary: String,
    /// When the evidence was observed.
    pub timestamp: DateTime<Utc>,
    /// Assessed reliability.
    #[serde(default)]
    pub reliability: Reliability,
    /// Entities extracted from the evidence.
    #[serde(default)]
    pub extracted_entities: Vec<Entity>,
    /// Raw source payload for previews.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_payload: Option<serde_json::Value>,
    /// Creator user ID.
    pub created_by: String,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
}

/// Classified relationship between one evidence item and one thought.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvidenceLink {
    /// Unique link identifier.
    pub id: String,
    /// Linked thought ID.
    pub node_id: String,
    /// Linked evidence ID.
    pub evidence_id: String,
    /// Supports, contradicts or context.
    pub relation: EvidenceRelation,
    /// Why this evidence relates.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Marks the strongest evidence for the thought.
    #[serde(default)]
    pub is_key: bool,
    /// Creator user ID.
    pub created_by: String,
    /// When the link was created.
    pub created_at: DateTime<Utc>,
}

/// Directed edge between two thoughts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Connection {
    /// Unique connection identifier.
    pub id: String,
    /// Owning board ID.
    pub board_id: String,
    /// Thought the edge starts at.
    pub source_id: String,
    /// Thought the edge points to.
    pub target_id: String,
    /// Kind of relationship.
    #[serde(rename = "type", default)]
    pub connection_type: ConnectionType,
}

/// A discussion comment on a thought.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    /// Unique comment identifier.
    pub id: String,
    /// Thought the comment is attached to.
    pub thought_id: String,
    /// Owning board ID.
    pub board_id: String,
    /// Author user ID.
    pub user_id: String,
    /// Author display name.
    pub user_name: String,
    /// Comment text.
    pub content: String,
    /// When the comment was posted.
    pub created_at: DateTime<Utc>,
    /// Whether the discussion is resolved.
    #[serde(default)]
    pub resolved: bool,
    /// Whether the comment is pinned to the top.
    #[serde(default)]
    pub is_pinned: bool,
}

/// An entry in a board's activity feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityEntry {
    /// Unique entry identifier.
    pub id: String,
    /// Board the activity happened on.
    pub board_id: String,
    /// What happened.
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    /// Acting user ID.
    pub user_id: String,
    /// Acting user display name.
    pub user_name: String,
    /// When it happened.
    pub timestamp: DateTime<Utc>,
    /// Kind-specific details (thought ID, old and new values, ...).
    pub details: serde_json::Value,
}

/// Point-in-time read of everything on one board.
///
/// Evidence links are the links whose thought belongs to the board.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardRecords {
    /// The board itself.
    pub board: Board,
    /// Thoughts in creation order.
    pub thoughts: Vec<Thought>,
    /// Evidence in creation order.
    pub evidence: Vec<Evidence>,
    /// Links attached to the board's thoughts.
    pub evidence_links: Vec<EvidenceLink>,
    /// Thought-to-thought connections.
    pub connections: Vec<Connection>,
}

impl BoardRecords {
    /// Find a thought on this board by ID.
    pub fn thought(&self, id: &str) -> Option<&Thought> {
        self.thoughts.iter().find(|t| t.id == id)
    }

    /// Find an evidence item on this board by ID.
    pub fn evidence_item(&self, id: &str) -> Option<&Evidence> {
        self.evidence.iter().find(|e| e.id == id)
    }

    /// Links attached to the given thought, in stored order.
    pub fn links_for<'a>(&'a self, thought_id: &'a str) -> impl Iterator<Item = &'a EvidenceLink> {
        self.evidence_links
            .iter()
            .filter(move |l| l.node_id == thought_id)
    }
}

// ============================================================================
// Constructors
// ============================================================================

impl Board {
    /// Create a new active board
    pub fn new(title: impl Into<String>, created_by: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            status: BoardStatus::Active,
            created_by: created_by.into(),
            created_at: now,
            updated_at: now,
            members: Vec::new(),
        }
    }

    /// Use a fixed ID
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Add a member
    pub fn with_member(mut self, member: BoardMember) -> Self {
        self.members.push(member);
        self
    }
}

impl BoardMember {
    /// Create a new member
    pub fn new(user_id: impl Into<String>, name: impl Into<String>, role: MemberRole) -> Self {
        Self {
            user_id: user_id.into(),
            name: name.into(),
            avatar: None,
            role,
        }
    }
}

impl Thought {
    /// Create a new open thought on a board
    pub fn new(
        board_id: impl Into<String>,
        thought_type: ThoughtType,
        title: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            board_id: board_id.into(),
            thought_type,
            title: title.into(),
            body: String::new(),
            confidence: None,
            status: ThoughtStatus::Open,
            tags: Vec::new(),
            owner: None,
            created_by: "system".to_string(),
            created_at: now,
            updated_at: now,
            position: Position::default(),
        }
    }

    /// Use a fixed ID
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Set the body text
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Set the confidence percentage (clamped to 100)
    pub fn with_confidence(mut self, confidence: u8) -> Self {
        self.confidence = Some(confidence.min(100));
        self
    }

    /// Set the status
    pub fn with_status(mut self, status: ThoughtStatus) -> Self {
        self.status = status;
        self
    }

    /// Set the tags
    pub fn with_tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Set the owner
    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    /// Set the creator
    pub fn with_created_by(mut self, user_id: impl Into<String>) -> Self {
        self.created_by = user_id.into();
        self
    }

    /// Set the canvas position
    pub fn with_position(mut self, x: f64, y: f64) -> Self {
        self.position = Position { x, y };
        self
    }
}

impl Entity {
    /// Create a new entity
    pub fn new(kind: EntityKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }
}

impl Evidence {
    /// Create a new evidence item of unknown reliability
    pub fn new(
        board_id: impl Into<String>,
        source_type: EvidenceSourceType,
        title: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            board_id: board_id.into(),
            source_type,
            title: title.into(),
            summary: String::new(),
            timestamp: now,
            reliability: Reliability::Unknown,
            extracted_entities: Vec::new(),
            raw_payload: None,
            created_by: "system".to_string(),
            created_at: now,
        }
    }

    /// Use a fixed ID
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Set the summary
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    /// Set the reliability
    pub fn with_reliability(mut self, reliability: Reliability) -> Self {
        self.reliability = reliability;
        self
    }

    /// Append an extracted entity
    pub fn with_entity(mut self, kind: EntityKind, value: impl Into<String>) -> Self {
        self.extracted_entities.push(Entity::new(kind, value));
        self
    }

    /// Attach a raw payload
    pub fn with_raw_payload(mut self, payload: serde_json::Value) -> Self {
        self.raw_payload = Some(payload);
        self
    }

    /// Set the creator
    pub fn with_created_by(mut self, user_id: impl Into<String>) -> Self {
        self.created_by = user_id.into();
        self
    }
}

impl EvidenceLink {
    /// Link an evidence item to a thought
    pub fn new(
        node_id: impl Into<String>,
        evidence_id: impl Into<String>,
        relation: EvidenceRelation,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            node_id: node_id.into(),
            evidence_id: evidence_id.into(),
            relation,
            note: None,
            is_key: false,
            created_by: "system".to_string(),
            created_at: Utc::now(),
        }
    }

    /// Use a fixed ID
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Mark or unmark as key evidence
    pub fn with_key(mut self, is_key: bool) -> Self {
        self.is_key = is_key;
        self
    }

    /// Attach a note
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Set the creator
    pub fn with_created_by(mut self, user_id: impl Into<String>) -> Self {
        self.created_by = user_id.into();
        self
    }
}

impl Connection {
    /// Connect two thoughts
    pub fn new(
        board_id: impl Into<String>,
        source_id: impl Into<String>,
        target_id: impl Into<String>,
        connection_type: ConnectionType,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            board_id: board_id.into(),
            source_id: source_id.into(),
            target_id: target_id.into(),
            connection_type,
        }
    }

    /// Use a fixed ID
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// The endpoint opposite `thought_id`, if the connection touches it.
    pub fn other_endpoint(&self, thought_id: &str) -> Option<&str> {
        if self.source_id == thought_id {
            Some(&self.target_id)
        } else if self.target_id == thought_id {
            Some(&self.source_id)
        } else {
            None
        }
    }
}

impl Comment {
    /// Create a new comment on a thought
    pub fn new(
        board_id: impl Into<String>,
        thought_id: impl Into<String>,
        user_id: impl Into<String>,
        user_name: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            thought_id: thought_id.into(),
            board_id: board_id.into(),
            user_id: user_id.into(),
            user_name: user_name.into(),
            content: content.into(),
            created_at: Utc::now(),
            resolved: false,
            is_pinned: false,
        }
    }

    /// Use a fixed ID
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }
}

impl ActivityEntry {
    /// Create a new activity entry timestamped now
    pub fn new(
        board_id: impl Into<String>,
        kind: ActivityKind,
        user_id: impl Into<String>,
        user_name: impl Into<String>,
        details: serde_json::Value,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            board_id: board_id.into(),
            kind,
            user_id: user_id.into(),
            user_name: user_name.into(),
            timestamp: Utc::now(),
            details,
        }
    }
}

// ============================================================================
// Storage trait
// ============================================================================

/// Storage interface for board persistence.
///
/// Deletes cascade: removing a board removes everything on it, removing a
/// thought removes its evidence links, connections and comments, and removing
/// an evidence item removes its links.
#[async_trait]
pub trait Storage: Send + Sync {
    // Board operations

    /// Create a new board.
    async fn create_board(&self, board: &Board) -> StorageResult<()>;
    /// Get a board by ID.
    async fn get_board(&self, id: &str) -> StorageResult<Option<Board>>;
    /// List all boards.
    async fn list_boards(&self) -> StorageResult<Vec<Board>>;
    /// Update an existing board.
    async fn update_board(&self, board: &Board) -> StorageResult<()>;
    /// Delete a board and everything on it.
    async fn delete_board(&self, id: &str) -> StorageResult<()>;

    // Thought operations

    /// Create a new thought.
    async fn create_thought(&self, thought: &Thought) -> StorageResult<()>;
    /// Get a thought by ID.
    async fn get_thought(&self, id: &str) -> StorageResult<Option<Thought>>;
    /// Get all thoughts on a board.
    async fn get_board_thoughts(&self, board_id: &str) -> StorageResult<Vec<Thought>>;
    /// Update an existing thought.
    async fn update_thought(&self, thought: &Thought) -> StorageResult<()>;
    /// Delete a thought.
    async fn delete_thought(&self, id: &str) -> StorageResult<()>;

    // Evidence operations

    /// Create a new evidence item.
    async fn create_evidence(&self, evidence: &Evidence) -> StorageResult<()>;
    /// Get an evidence item by ID.
    async fn get_evidence(&self, id: &str) -> StorageResult<Option<Evidence>>;
    /// Get all evidence on a board.
    async fn get_board_evidence(&self, board_id: &str) -> StorageResult<Vec<Evidence>>;
    /// Delete an evidence item.
    async fn delete_evidence(&self, id: &str) -> StorageResult<()>;

    // Evidence link operations

    /// Create a new evidence link.
    async fn create_evidence_link(&self, link: &EvidenceLink) -> StorageResult<()>;
    /// Get an evidence link by ID.
    async fn get_evidence_link(&self, id: &str) -> StorageResult<Option<EvidenceLink>>;
    /// Get links attached to a thought.
    async fn get_thought_evidence_links(&self, thought_id: &str)
        -> StorageResult<Vec<EvidenceLink>>;
    /// Get links attached to any thought on a board.
    async fn get_board_evidence_links(&self, board_id: &str) -> StorageResult<Vec<EvidenceLink>>;
    /// Update relation, key flag and note of a link.
    async fn update_evidence_link(&self, link: &EvidenceLink) -> StorageResult<()>;
    /// Delete an evidence link.
    async fn delete_evidence_link(&self, id: &str) -> StorageResult<()>;

    // Connection operations

    /// Create a new connection.
    async fn create_connection(&self, connection: &Connection) -> StorageResult<()>;
    /// Get all connections on a board.
    async fn get_board_connections(&self, board_id: &str) -> StorageResult<Vec<Connection>>;
    /// Delete a connection.
    async fn delete_connection(&self, id: &str) -> StorageResult<()>;

    // Comment operations

    /// Create a new comment.
    async fn create_comment(&self, comment: &Comment) -> StorageResult<()>;
    /// Get a comment by ID.
    async fn get_comment(&self, id: &str) -> StorageResult<Option<Comment>>;
    /// Get all comments on a thought.
    async fn get_thought_comments(&self, thought_id: &str) -> StorageResult<Vec<Comment>>;
    /// Update the resolved and pinned flags of a comment.
    async fn update_comment(&self, comment: &Comment) -> StorageResult<()>;

    // Activity operations

    /// Append an activity entry.
    async fn log_activity(&self, entry: &ActivityEntry) -> StorageResult<()>;
    /// Get a board's activity, newest first.
    async fn get_board_activity(&self, board_id: &str) -> StorageResult<Vec<ActivityEntry>>;

    /// Read a board and all of its records.
    ///
    /// Returns `None` when the board does not exist. A board without children
    /// yields empty collections.
    async fn load_board(&self, board_id: &str) -> StorageResult<Option<BoardRecords>> {
        let Some(board) = self.get_board(board_id).await? else {
            return Ok(None);
        };

        let thoughts = self.get_board_thoughts(board_id).await?;
        let evidence = self.get_board_evidence(board_id).await?;
        let evidence_links = self.get_board_evidence_links(board_id).await?;
        let connections = self.get_board_connections(board_id).await?;

        Ok(Some(BoardRecords {
            board,
            thoughts,
            evidence,
            evidence_links,
            connections,
        }))
    }
}
