//! SQLite participant repository implementation.
//!
//! Implements `ParticipantRepository` from `parlor-core` against the `users`
//! table. Heartbeats are stored as Unix milliseconds so that staleness checks
//! are plain integer comparisons.

use chrono::{DateTime, Utc};
use parlor_core::repository::participant::ParticipantRepository;
use parlor_types::error::RepositoryError;
use parlor_types::participant::Participant;
use sqlx::Row;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `ParticipantRepository`.
pub struct SqliteParticipantRepository {
    pool: DatabasePool,
}

impl SqliteParticipantRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

fn participant_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Participant, RepositoryError> {
    let name: String = row
        .try_get("name")
        .map_err(|e| RepositoryError::Query(e.to_string()))?;
    let last_status: i64 = row
        .try_get("last_status")
        .map_err(|e| RepositoryError::Query(e.to_string()))?;
    Ok(Participant {
        name,
        last_status: parse_millis(last_status)?,
    })
}

pub(crate) fn parse_millis(ms: i64) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::from_timestamp_millis(ms)
        .ok_or_else(|| RepositoryError::Query(format!("invalid timestamp: {ms}")))
}

impl ParticipantRepository for SqliteParticipantRepository {
    async fn insert(&self, participant: &Participant) -> Result<(), RepositoryError> {
        let result = sqlx::query("INSERT INTO users (name, last_status) VALUES (?, ?)")
            .bind(&participant.name)
            .bind(participant.last_status.timestamp_millis())
            .execute(&self.pool.writer)
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db_err)) if db_err.message().contains("UNIQUE") => {
                Err(RepositoryError::Conflict(format!(
                    "participant '{}' already exists",
                    participant.name
                )))
            }
            Err(e) => Err(RepositoryError::Query(e.to_string())),
        }
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Participant>, RepositoryError> {
        let row = sqlx::query("SELECT name, last_status FROM users WHERE name = ?")
            .bind(name)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        row.as_ref().map(participant_from_row).transpose()
    }

    async fn list(&self) -> Result<Vec<Participant>, RepositoryError> {
        let rows = sqlx::query("SELECT name, last_status FROM users ORDER BY rowid")
            .fetch_all(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        rows.iter().map(participant_from_row).collect()
    }

    async fn touch(&self, name: &str, at: DateTime<Utc>) -> Result<bool, RepositoryError> {
        let result = sqlx::query("UPDATE users SET last_status = ? WHERE name = ?")
            .bind(at.timestamp_millis())
            .bind(name)
            .execute(&self.pool.writer)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_stale(&self, cutoff: DateTime<Utc>) -> Result<Vec<Participant>, RepositoryError> {
        let rows = sqlx::query("SELECT name, last_status FROM users WHERE last_status < ?")
            .bind(cutoff.timestamp_millis())
            .fetch_all(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        rows.iter().map(participant_from_row).collect()
    }

    async fn delete(&self, name: &str) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM users WHERE name = ?")
            .bind(name)
            .execute(&self.pool.writer)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }
}
