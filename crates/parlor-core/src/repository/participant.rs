//! Participant repository trait definition.

use chrono::{DateTime, Utc};
use parlor_types::error::RepositoryError;
use parlor_types::participant::Participant;

/// Repository trait for participant persistence.
///
/// Names are unique: the implementation must reject a second insert of the
/// same name with `RepositoryError::Conflict`, even under concurrent inserts.
///
/// Uses native async fn in traits (Rust 2024 edition, no async_trait macro).
pub trait ParticipantRepository: Send + Sync {
    /// Insert a new participant. Returns `Conflict` if the name already exists.
    fn insert(
        &self,
        participant: &Participant,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Look up a participant by name.
    fn find_by_name(
        &self,
        name: &str,
    ) -> impl std::future::Future<Output = Result<Option<Participant>, RepositoryError>> + Send;

    /// List every participant (unordered).
    fn list(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<Participant>, RepositoryError>> + Send;

    /// Set the last heartbeat of `name`. Returns `true` if the participant existed.
    fn touch(
        &self,
        name: &str,
        at: DateTime<Utc>,
    ) -> impl std::future::Future<Output = Result<bool, RepositoryError>> + Send;

    /// Participants whose last heartbeat is strictly before `cutoff`.
    fn list_stale(
        &self,
        cutoff: DateTime<Utc>,
    ) -> impl std::future::Future<Output = Result<Vec<Participant>, RepositoryError>> + Send;

    /// Remove a participant. Returns `true` if a row was deleted.
    fn delete(
        &self,
        name: &str,
    ) -> impl std::future::Future<Output = Result<bool, RepositoryError>> + Send;
}
