use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use tracing::{debug, info};

use super::{
    ActivityEntry, Board, Comment, Connection, Entity, Evidence, EvidenceLink, Position, Storage,
    Thought,
};
use crate::config::DatabaseConfig;
use crate::error::{StorageError, StorageResult};

/// Static migrator that embeds migrations at compile time
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

const BOARD_COLUMNS: &str = "id, title, status, created_by, created_at, updated_at, members";

const THOUGHT_COLUMNS: &str = "id, board_id, type AS thought_type, title, body, confidence, \
     status, tags, owner, created_by, created_at, updated_at, position_x, position_y";

const EVIDENCE_COLUMNS: &str = "id, board_id, type AS source_type, title, summary, timestamp, \
     reliability, extracted_entities, raw_payload, created_by, created_at";

const LINK_COLUMNS: &str =
    "l.id, l.node_id, l.evidence_id, l.relation, l.note, l.is_key, l.created_by, l.created_at";

const CONNECTION_COLUMNS: &str =
    "id, board_id, source_id, target_id, type AS connection_type";

const COMMENT_COLUMNS: &str =
    "id, thought_id, board_id, user_id, user_name, content, created_at, resolved, is_pinned";

const ACTIVITY_COLUMNS: &str =
    "id, board_id, type AS kind, user_id, user_name, timestamp, details";

/// SQLite-backed storage implementation
#[derive(Clone)]
pub struct SqliteStorage {
    pool: SqlitePool,
}

impl SqliteStorage {
    /// Create a new SQLite storage instance
    pub async fn new(config: &DatabaseConfig) -> StorageResult<Self> {
        // Ensure parent directory exists
        if let Some(parent) = config.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| StorageError::Connection {
                    message: format!("Failed to create database directory: {}", e),
                })?;
            }
        }

        let database_url = format!("sqlite://{}?mode=rwc", config.path.display());

        let options = SqliteConnectOptions::from_str(&database_url)
            .map_err(|e| StorageError::Connection {
                message: format!("Invalid database URL: {}", e),
            })?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .connect_with(options)
            .await
            .map_err(|e| StorageError::Connection {
                message: format!("Failed to connect to database: {}", e),
            })?;

        let storage = Self { pool };
        storage.run_migrations().await?;

        Ok(storage)
    }

    /// Create an in-memory storage instance.
    ///
    /// Uses a single long-lived connection, since every SQLite in-memory
    /// connection is its own database.
    pub async fn new_in_memory() -> StorageResult<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(|e| StorageError::Connection {
                message: format!("Invalid database URL: {}", e),
            })?
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .map_err(|e| StorageError::Connection {
                message: format!("Failed to open in-memory database: {}", e),
            })?;

        let storage = Self { pool };
        storage.run_migrations().await?;

        Ok(storage)
    }

    /// Run database migrations using embedded sqlx migrations
    async fn run_migrations(&self) -> StorageResult<()> {
        info!("Running database migrations...");

        MIGRATOR
            .run(&self.pool)
            .await
            .map_err(|e| StorageError::Migration {
                message: format!("Failed to run migrations: {}", e),
            })?;

        info!("Database migrations completed successfully");
        Ok(())
    }

    async fn delete_by_id(
        &self,
        table: &'static str,
        entity: &'static str,
        id: &str,
    ) -> StorageResult<()> {
        let sql = format!("DELETE FROM {} WHERE id = ?", table);
        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound {
                entity,
                id: id.to_string(),
            });
        }

        debug!(table, id, "Deleted row");
        Ok(())
    }
}

#[async_trait]
impl Storage for SqliteStorage {
    async fn create_board(&self, board: &Board) -> StorageResult<()> {
        let members = to_json(&board.members)?;

        sqlx::query(
            r#"
            INSERT INTO boards (id, title, status, created_by, created_at, updated_at, members)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&board.id)
        .bind(&board.title)
        .bind(board.status.as_str())
        .bind(&board.created_by)
        .bind(board.created_at.to_rfc3339())
        .bind(board.updated_at.to_rfc3339())
        .bind(&members)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get_board(&self, id: &str) -> StorageResult<Option<Board>> {
        let sql = format!("SELECT {} FROM boards WHERE id = ?", BOARD_COLUMNS);
        let row: Option<BoardRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Board::try_from).transpose()
    }

    async fn list_boards(&self) -> StorageResult<Vec<Board>> {
        let sql = format!("SELECT {} FROM boards ORDER BY rowid ASC", BOARD_COLUMNS);
        let rows: Vec<BoardRow> = sqlx::query_as(&sql).fetch_all(&self.pool).await?;

        rows.into_iter().map(Board::try_from).collect()
    }

    async fn update_board(&self, board: &Board) -> StorageResult<()> {
        let members = to_json(&board.members)?;

        let result = sqlx::query(
            r#"
            UPDATE boards
            SET title = ?, status = ?, updated_at = ?, members = ?
            WHERE id = ?
            "#,
        )
        .bind(&board.title)
        .bind(board.status.as_str())
        .bind(board.updated_at.to_rfc3339())
        .bind(&members)
        .bind(&board.id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound {
                entity: "Board",
                id: board.id.clone(),
            });
        }

        Ok(())
    }

    async fn delete_board(&self, id: &str) -> StorageResult<()> {
        self.delete_by_id("boards", "Board", id).await
    }

    async fn create_thought(&self, thought: &Thought) -> StorageResult<()> {
        let tags = to_json(&thought.tags)?;

        sqlx::query(
            r#"
            INSERT INTO thoughts (id, board_id, type, title, body, confidence, status, tags,
                                  owner, created_by, created_at, updated_at, position_x, position_y)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&thought.id)
        .bind(&thought.board_id)
        .bind(thought.thought_type.as_str())
        .bind(&thought.title)
        .bind(&thought.body)
        .bind(thought.confidence.map(i64::from))
        .bind(thought.status.as_str())
        .bind(&tags)
        .bind(&thought.owner)
        .bind(&thought.created_by)
        .bind(thought.created_at.to_rfc3339())
        .bind(thought.updated_at.to_rfc3339())
        .bind(thought.position.x)
        .bind(thought.position.y)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get_thought(&self, id: &str) -> StorageResult<Option<Thought>> {
        let sql = format!("SELECT {} FROM thoughts WHERE id = ?", THOUGHT_COLUMNS);
        let row: Option<ThoughtRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Thought::try_from).transpose()
    }

    async fn get_board_thoughts(&self, board_id: &str) -> StorageResult<Vec<Thought>> {
        let sql = format!(
            "SELECT {} FROM thoughts WHERE board_id = ? ORDER BY rowid ASC",
            THOUGHT_COLUMNS
        );
        let rows: Vec<ThoughtRow> = sqlx::query_as(&sql)
            .bind(board_id)
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(Thought::try_from).collect()
    }

    async fn update_thought(&self, thought: &Thought) -> StorageResult<()> {
        let tags = to_json(&thought.tags)?;

        let result = sqlx::query(
            r#"
            UPDATE thoughts
            SET type = ?, title = ?, body = ?, confidence = ?, status = ?, tags = ?, owner = ?,
                updated_at = ?, position_x = ?, position_y = ?
            WHERE id = ?
            "#,
        )
        .bind(thought.thought_type.as_str())
        .bind(&thought.title)
        .bind(&thought.body)
        .bind(thought.confidence.map(i64::from))
        .bind(thought.status.as_str())
        .bind(&tags)
        .bind(&thought.owner)
        .bind(thought.updated_at.to_rfc3339())
        .bind(thought.position.x)
        .bind(thought.position.y)
        .bind(&thought.id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound {
                entity: "Thought",
                id: thought.id.clone(),
            });
        }

        Ok(())
    }

    async fn delete_thought(&self, id: &str) -> StorageResult<()> {
        self.delete_by_id("thoughts", "Thought", id).await
    }

    async fn create_evidence(&self, evidence: &Evidence) -> StorageResult<()> {
        let entities = to_json(&evidence.extracted_entities)?;
        let raw_payload = evidence.raw_payload.as_ref().map(to_json).transpose()?;

        sqlx::query(
            r#"
            INSERT INTO evidence (id, board_id, type, title, summary, timestamp, reliability,
                                  extracted_entities, raw_payload, created_by, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&evidence.id)
        .bind(&evidence.board_id)
        .bind(evidence.source_type.as_str())
        .bind(&evidence.title)
        .bind(&evidence.summary)
        .bind(evidence.timestamp.to_rfc3339())
        .bind(evidence.reliability.as_str())
        .bind(&entities)
        .bind(&raw_payload)
        .bind(&evidence.created_by)
        .bind(evidence.created_at.to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get_evidence(&self, id: &str) -> StorageResult<Option<Evidence>> {
        let sql = format!("SELECT {} FROM evidence WHERE id = ?", EVIDENCE_COLUMNS);
        let row: Option<EvidenceRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Evidence::try_from).transpose()
    }

    async fn get_board_evidence(&self, board_id: &str) -> StorageResult<Vec<Evidence>> {
        let sql = format!(
            "SELECT {} FROM evidence WHERE board_id = ? ORDER BY rowid ASC",
            EVIDENCE_COLUMNS
        );
        let rows: Vec<EvidenceRow> = sqlx::query_as(&sql)
            .bind(board_id)
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(Evidence::try_from).collect()
    }

    async fn delete_evidence(&self, id: &str) -> StorageResult<()> {
        self.delete_by_id("evidence", "Evidence", id).await
    }

    async fn create_evidence_link(&self, link: &EvidenceLink) -> StorageResult<()> {
        sqlx::query(
            r#"
            INSERT INTO evidence_links (id, node_id, evidence_id, relation, note, is_key,
                                        created_by, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&link.id)
        .bind(&link.node_id)
        .bind(&link.evidence_id)
        .bind(link.relation.as_str())
        .bind(&link.note)
        .bind(link.is_key)
        .bind(&link.created_by)
        .bind(link.created_at.to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get_evidence_link(&self, id: &str) -> StorageResult<Option<EvidenceLink>> {
        let sql = format!("SELECT {} FROM evidence_links l WHERE l.id = ?", LINK_COLUMNS);
        let row: Option<EvidenceLinkRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(EvidenceLink::try_from).transpose()
    }

    async fn get_thought_evidence_links(
        &self,
        thought_id: &str,
    ) -> StorageResult<Vec<EvidenceLink>> {
        let sql = format!(
            "SELECT {} FROM evidence_links l WHERE l.node_id = ? ORDER BY l.rowid ASC",
            LINK_COLUMNS
        );
        let rows: Vec<EvidenceLinkRow> = sqlx::query_as(&sql)
            .bind(thought_id)
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(EvidenceLink::try_from).collect()
    }

    async fn get_board_evidence_links(&self, board_id: &str) -> StorageResult<Vec<EvidenceLink>> {
        let sql = format!(
            r#"
            SELECT {}
            FROM evidence_links l
            JOIN thoughts t ON t.id = l.node_id
            WHERE t.board_id = ?
            ORDER BY l.rowid ASC
            "#,
            LINK_COLUMNS
        );
        let rows: Vec<EvidenceLinkRow> = sqlx::query_as(&sql)
            .bind(board_id)
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(EvidenceLink::try_from).collect()
    }

    async fn update_evidence_link(&self, link: &EvidenceLink) -> StorageResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE evidence_links
            SET relation = ?, note = ?, is_key = ?
            WHERE id = ?
            "#,
        )
        .bind(link.relation.as_str())
        .bind(&link.note)
        .bind(link.is_key)
        .bind(&link.id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound {
                entity: "Evidence link",
                id: link.id.clone(),
            });
        }

        Ok(())
    }

    async fn delete_evidence_link(&self, id: &str) -> StorageResult<()> {
        self.delete_by_id("evidence_links", "Evidence link", id)
            .await
    }

    async fn create_connection(&self, connection: &Connection) -> StorageResult<()> {
        sqlx::query(
            r#"
            INSERT INTO connections (id, board_id, source_id, target_id, type)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&connection.id)
        .bind(&connection.board_id)
        .bind(&connection.source_id)
        .bind(&connection.target_id)
        .bind(connection.connection_type.as_str())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get_board_connections(&self, board_id: &str) -> StorageResult<Vec<Connection>> {
        let sql = format!(
            "SELECT {} FROM connections WHERE board_id = ? ORDER BY rowid ASC",
            CONNECTION_COLUMNS
        );
        let rows: Vec<ConnectionRow> = sqlx::query_as(&sql)
            .bind(board_id)
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(Connection::try_from).collect()
    }

    async fn delete_connection(&self, id: &str) -> StorageResult<()> {
        self.delete_by_id("connections", "Connection", id).await
    }

    async fn create_comment(&self, comment: &Comment) -> StorageResult<()> {
        sqlx::query(
            r#"
            INSERT INTO comments (id, thought_id, board_id, user_id, user_name, content,
                                  created_at, resolved, is_pinned)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&comment.id)
        .bind(&comment.thought_id)
        .bind(&comment.board_id)
        .bind(&comment.user_id)
        .bind(&comment.user_name)
        .bind(&comment.content)
        .bind(comment.created_at.to_rfc3339())
        .bind(comment.resolved)
        .bind(comment.is_pinned)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get_comment(&self, id: &str) -> StorageResult<Option<Comment>> {
        let sql = format!("SELECT {} FROM comments WHERE id = ?", COMMENT_COLUMNS);
        let row: Option<CommentRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Comment::from))
    }

    async fn get_thought_comments(&self, thought_id: &str) -> StorageResult<Vec<Comment>> {
        let sql = format!(
            "SELECT {} FROM comments WHERE thought_id = ? ORDER BY rowid ASC",
            COMMENT_COLUMNS
        );
        let rows: Vec<CommentRow> = sqlx::query_as(&sql)
            .bind(thought_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Comment::from).collect())
    }

    async fn update_comment(&self, comment: &Comment) -> StorageResult<()> {
        let result = sqlx::query("UPDATE comments SET resolved = ?, is_pinned = ? WHERE id = ?")
            .bind(comment.resolved)
            .bind(comment.is_pinned)
            .bind(&comment.id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound {
                entity: "Comment",
                id: comment.id.clone(),
            });
        }

        Ok(())
    }

    async fn log_activity(&self, entry: &ActivityEntry) -> StorageResult<()> {
        let details = to_json(&entry.details)?;

        sqlx::query(
            r#"
            INSERT INTO activities (id, board_id, type, user_id, user_name, timestamp, details)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&entry.id)
        .bind(&entry.board_id)
        .bind(entry.kind.as_str())
        .bind(&entry.user_id)
        .bind(&entry.user_name)
        .bind(entry.timestamp.to_rfc3339())
        .bind(&details)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get_board_activity(&self, board_id: &str) -> StorageResult<Vec<ActivityEntry>> {
        let sql = format!(
            "SELECT {} FROM activities WHERE board_id = ? ORDER BY rowid DESC",
            ACTIVITY_COLUMNS
        );
        let rows: Vec<ActivityRow> = sqlx::query_as(&sql)
            .bind(board_id)
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(ActivityEntry::try_from).collect()
    }
}

// ============================================================================
// Column helpers
// ============================================================================

fn to_json<T: Serialize + ?Sized>(value: &T) -> StorageResult<String> {
    serde_json::to_string(value).map_err(|e| StorageError::Query {
        message: format!("Failed to encode JSON column: {}", e),
    })
}

fn from_json<T: DeserializeOwned>(value: &str, column: &str) -> StorageResult<T> {
    serde_json::from_str(value).map_err(|e| StorageError::Query {
        message: format!("Malformed JSON in column {}: {}", column, e),
    })
}

fn parse_label<T: FromStr<Err = String>>(value: &str) -> StorageResult<T> {
    value
        .parse()
        .map_err(|message| StorageError::Query { message })
}

fn parse_timestamp(value: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}

// Internal row types for SQLx mapping

#[derive(sqlx::FromRow)]
struct BoardRow {
    id: String,
    title: String,
    status: String,
    created_by: String,
    created_at: String,
    updated_at: String,
    members: String,
}

impl TryFrom<BoardRow> for Board {
    type Error = StorageError;

    fn try_from(row: BoardRow) -> StorageResult<Self> {
        Ok(Self {
            status: parse_label(&row.status)?,
            members: from_json(&row.members, "boards.members")?,
            created_at: parse_timestamp(&row.created_at),
            updated_at: parse_timestamp(&row.updated_at),
            id: row.id,
            title: row.title,
            created_by: row.created_by,
        })
    }
}

#[derive(sqlx::FromRow)]
struct ThoughtRow {
    id: String,
    board_id: String,
    thought_type: String,
    title: String,
    body: String,
    confidence: Option<i64>,
    status: String,
    tags: String,
    owner: Option<String>,
    created_by: String,
    created_at: String,
    updated_at: String,
    position_x: f64,
    position_y: f64,
}

impl TryFrom<ThoughtRow> for Thought {
    type Error = StorageError;

    fn try_from(row: ThoughtRow) -> StorageResult<Self> {
        Ok(Self {
            thought_type: parse_label(&row.thought_type)?,
            status: parse_label(&row.status)?,
            confidence: row.confidence.and_then(|c| u8::try_from(c).ok()),
            tags: from_json(&row.tags, "thoughts.tags")?,
            created_at: parse_timestamp(&row.created_at),
            updated_at: parse_timestamp(&row.updated_at),
            position: Position {
                x: row.position_x,
                y: row.position_y,
            },
            id: row.id,
            board_id: row.board_id,
            title: row.title,
            body: row.body,
            owner: row.owner,
            created_by: row.created_by,
        })
    }
}

#[derive(sqlx::FromRow)]
struct EvidenceRow {
    id: String,
    board_id: String,
    source_type: String,
    title: String,
    summary: String,
    timestamp: String,
    reliability: String,
    extracted_entities: String,
    raw_payload: Option<String>,
    created_by: String,
    created_at: String,
}

impl TryFrom<EvidenceRow> for Evidence {
    type Error = StorageError;

    fn try_from(row: EvidenceRow) -> StorageResult<Self> {
        let extracted_entities: Vec<Entity> =
            from_json(&row.extracted_entities, "evidence.extracted_entities")?;

        Ok(Self {
            source_type: parse_label(&row.source_type)?,
            reliability: parse_label(&row.reliability)?,
            extracted_entities,
            raw_payload: row.raw_payload.and_then(|s| serde_json::from_str(&s).ok()),
            timestamp: parse_timestamp(&row.timestamp),
            created_at: parse_timestamp(&row.created_at),
            id: row.id,
            board_id: row.board_id,
            title: row.title,
            summary: row.summary,
            created_by: row.created_by,
        })
    }
}

#[derive(sqlx::FromRow)]
struct EvidenceLinkRow {
    id: String,
    node_id: String,
    evidence_id: String,
    relation: String,
    note: Option<String>,
    is_key: bool,
    created_by: String,
    created_at: String,
}

impl TryFrom<EvidenceLinkRow> for EvidenceLink {
    type Error = StorageError;

    fn try_from(row: EvidenceLinkRow) -> StorageResult<Self> {
        Ok(Self {
            relation: parse_label(&row.relation)?,
            created_at: parse_timestamp(&row.created_at),
            id: row.id,
            node_id: row.node_id,
            evidence_id: row.evidence_id,
            note: row.note,
            is_key: row.is_key,
            created_by: row.created_by,
        })
    }
}

#[derive(sqlx::FromRow)]
struct ConnectionRow {
    id: String,
    board_id: String,
    source_id: String,
    target_id: String,
    connection_type: String,
}

impl TryFrom<ConnectionRow> for Connection {
    type Error = StorageError;

    fn try_from(row: ConnectionRow) -> StorageResult<Self> {
        Ok(Self {
            connection_type: parse_label(&row.connection_type)?,
            id: row.id,
            board_id: row.board_id,
            source_id: row.source_id,
            target_id: row.target_id,
        })
    }
}

#[derive(sqlx::FromRow)]
struct CommentRow {
    id: String,
    thought_id: String,
    board_id: String,
    user_id: String,
    user_name: String,
    content: String,
    created_at: String,
    resolved: bool,
    is_pinned: bool,
}

impl From<CommentRow> for Comment {
    fn from(row: CommentRow) -> Self {
        Self {
            created_at: parse_timestamp(&row.created_at),
            id: row.id,
            thought_id: row.thought_id,
            board_id: row.board_id,
            user_id: row.user_id,
            user_name: row.user_name,
            content: row.content,
            resolved: row.resolved,
            is_pinned: row.is_pinned,
        }
    }
}

#[derive(sqlx::FromRow)]
struct ActivityRow {
    id: String,
    board_id: String,
    kind: String,
    user_id: String,
    user_name: String,
    timestamp: String,
    details: String,
}

impl TryFrom<ActivityRow> for ActivityEntry {
    type Error = StorageError;

    fn try_from(row: ActivityRow) -> StorageResult<Self> {
        Ok(Self {
            kind: parse_label(&row.kind)?,
            details: from_json(&row.details, "activities.details")?,
            timestamp: parse_timestamp(&row.timestamp),
            id: row.id,
            board_id: row.board_id,
            user_id: row.user_id,
            user_name: row.user_name,
        })
    }
}
