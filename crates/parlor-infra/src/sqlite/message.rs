//! SQLite message repository implementation.
//!
//! Implements `MessageRepository` from `parlor-core` using sqlx with split
//! read/write pools. Messages are ordered by their millisecond `created_at`
//! rather than the display-only `time` column.

use chrono::{DateTime, Utc};
use parlor_core::repository::message::MessageRepository;
use parlor_types::error::RepositoryError;
use parlor_types::message::{BROADCAST, Message, MessageKind};
use sqlx::Row;
use uuid::Uuid;

use super::participant::parse_millis;
use super::pool::DatabasePool;

/// SQLite-backed implementation of `MessageRepository`.
pub struct SqliteMessageRepository {
    pool: DatabasePool,
}

impl SqliteMessageRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

// ---------------------------------------------------------------------------
// Internal row types
// ---------------------------------------------------------------------------

struct MessageRow {
    id: String,
    sender: String,
    recipient: String,
    text: String,
    kind: String,
    time: String,
    created_at: i64,
}

impl MessageRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            sender: row.try_get("sender")?,
            recipient: row.try_get("recipient")?,
            text: row.try_get("text")?,
            kind: row.try_get("kind")?,
            time: row.try_get("time")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn into_message(self) -> Result<Message, RepositoryError> {
        let id = self
            .id
            .parse::<Uuid>()
            .map_err(|e| RepositoryError::Query(format!("invalid UUID: {e}")))?;
        let kind = self
            .kind
            .parse::<MessageKind>()
            .map_err(RepositoryError::Query)?;

        Ok(Message {
            id,
            from: self.sender,
            to: self.recipient,
            text: self.text,
            kind,
            time: self.time,
            created_at: parse_millis(self.created_at)?,
        })
    }
}

fn messages_from_rows(rows: &[sqlx::sqlite::SqliteRow]) -> Result<Vec<Message>, RepositoryError> {
    let mut msgs = Vec::with_capacity(rows.len());
    for row in rows {
        let r = MessageRow::from_row(row).map_err(|e| RepositoryError::Query(e.to_string()))?;
        msgs.push(r.into_message()?);
    }
    Ok(msgs)
}

fn millis(dt: &DateTime<Utc>) -> i64 {
    dt.timestamp_millis()
}

// ---------------------------------------------------------------------------
// MessageRepository impl
// ---------------------------------------------------------------------------

impl MessageRepository for SqliteMessageRepository {
    async fn save(&self, msg: &Message) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"INSERT INTO messages (id, sender, recipient, text, kind, time, created_at)
               VALUES (?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(msg.id.to_string())
        .bind(&msg.from)
        .bind(&msg.to)
        .bind(&msg.text)
        .bind(msg.kind.as_str())
        .bind(&msg.time)
        .bind(millis(&msg.created_at))
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(())
    }

    async fn find(&self, id: &Uuid) -> Result<Option<Message>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM messages WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        match row {
            Some(row) => {
                let r = MessageRow::from_row(&row)
                    .map_err(|e| RepositoryError::Query(e.to_string()))?;
                Ok(Some(r.into_message()?))
            }
            None => Ok(None),
        }
    }

    async fn list_visible_to(&self, participant: &str) -> Result<Vec<Message>, RepositoryError> {
        // UUIDv7 ids break ties between messages created in the same millisecond.
        let rows = sqlx::query(
            r#"SELECT * FROM messages
               WHERE recipient = ? OR recipient = ? OR sender = ?
               ORDER BY created_at DESC, id DESC"#,
        )
        .bind(BROADCAST)
        .bind(participant)
        .bind(participant)
        .fetch_all(&self.pool.reader)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        messages_from_rows(&rows)
    }

    async fn update(&self, msg: &Message) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            r#"UPDATE messages
               SET sender = ?, recipient = ?, text = ?, kind = ?, time = ?, created_at = ?
               WHERE id = ?"#,
        )
        .bind(&msg.from)
        .bind(&msg.to)
        .bind(&msg.text)
        .bind(msg.kind.as_str())
        .bind(&msg.time)
        .bind(millis(&msg.created_at))
        .bind(msg.id.to_string())
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: &Uuid) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM messages WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool.writer)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
