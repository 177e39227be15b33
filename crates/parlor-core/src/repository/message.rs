//! Message repository trait definition.
//!
//! Defines the storage interface for the room's message log. The
//! infrastructure layer (parlor-infra) implements this trait with SQLite
//! persistence.

use parlor_types::error::RepositoryError;
use parlor_types::message::Message;
use uuid::Uuid;

/// Repository trait for message persistence.
pub trait MessageRepository: Send + Sync {
    /// Append a message to the log.
    fn save(
        &self,
        msg: &Message,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Fetch a single message by id.
    fn find(
        &self,
        id: &Uuid,
    ) -> impl std::future::Future<Output = Result<Option<Message>, RepositoryError>> + Send;

    /// Messages `participant` may read (broadcast, addressed to them, or sent
    /// by them), ordered by creation time DESC.
    fn list_visible_to(
        &self,
        participant: &str,
    ) -> impl std::future::Future<Output = Result<Vec<Message>, RepositoryError>> + Send;

    /// Overwrite every field of the stored message with the same id.
    /// Returns `true` if the message existed.
    fn update(
        &self,
        msg: &Message,
    ) -> impl std::future::Future<Output = Result<bool, RepositoryError>> + Send;

    /// Remove a message. Returns `true` if it existed.
    fn delete(
        &self,
        id: &Uuid,
    ) -> impl std::future::Future<Output = Result<bool, RepositoryError>> + Send;
}
