//! Room service: registration, heartbeats, and the message log.
//!
//! RoomService validates requests, resolves the caller's self-reported name
//! against the participant store, and reads/writes the two repositories.
//! Nothing here is transactional: registration performs two independent
//! writes (participant, then join notice).

use chrono::Utc;
use parlor_types::error::{ChatError, RepositoryError};
use parlor_types::message::{JOIN_TEXT, Message, MessageRequest};
use parlor_types::participant::{Participant, RegisterRequest, validate_name};
use tracing::{debug, info};
use uuid::Uuid;

use crate::repository::message::MessageRepository;
use crate::repository::participant::ParticipantRepository;

/// Orchestrates participant and message operations.
///
/// Generic over `ParticipantRepository` and `MessageRepository` to maintain
/// clean architecture (parlor-core never depends on parlor-infra).
pub struct RoomService<P: ParticipantRepository, M: MessageRepository> {
    participants: P,
    messages: M,
}

impl<P: ParticipantRepository, M: MessageRepository> RoomService<P, M> {
    /// Create a new room service with the given repositories.
    pub fn new(participants: P, messages: M) -> Self {
        Self {
            participants,
            messages,
        }
    }

    /// Access the participant repository.
    pub fn participants(&self) -> &P {
        &self.participants
    }

    /// Access the message repository.
    pub fn messages(&self) -> &M {
        &self.messages
    }

    // --- Participants ---

    /// Register a new participant and announce it to the room.
    pub async fn register(&self, request: RegisterRequest) -> Result<Participant, ChatError> {
        let name = validate_name(&request.name).map_err(ChatError::Validation)?;
        let now = Utc::now();

        let participant = Participant::new(name.clone(), now);
        self.participants
            .insert(&participant)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => ChatError::NameTaken(name.clone()),
                other => ChatError::Storage(other.to_string()),
            })?;

        self.messages
            .save(&Message::status(name.as_str(), JOIN_TEXT, now))
            .await?;

        info!(participant = %name, "participant joined");
        Ok(participant)
    }

    /// List every participant currently in the room.
    pub async fn list_participants(&self) -> Result<Vec<Participant>, ChatError> {
        Ok(self.participants.list().await?)
    }

    /// Record a liveness signal for `name`.
    pub async fn heartbeat(&self, name: &str) -> Result<(), ChatError> {
        if self.participants.touch(name, Utc::now()).await? {
            debug!(participant = %name, "heartbeat");
            Ok(())
        } else {
            Err(ChatError::ParticipantNotFound(name.to_string()))
        }
    }

    // --- Messages ---

    /// Post a message on behalf of `sender`.
    pub async fn post_message(
        &self,
        sender: &str,
        request: &MessageRequest,
    ) -> Result<Message, ChatError> {
        self.require_participant(sender).await?;
        let content = request.validate().map_err(ChatError::Validation)?;

        let message = Message::authored(sender, content, Utc::now());
        self.messages.save(&message).await?;

        debug!(participant = %sender, message_id = %message.id, "message posted");
        Ok(message)
    }

    /// Messages visible to `caller`, newest first.
    ///
    /// `limit` keeps the first `limit` entries of the newest-first ordering;
    /// it must be a positive integer when present.
    pub async fn list_messages(
        &self,
        caller: &str,
        limit: Option<i64>,
    ) -> Result<Vec<Message>, ChatError> {
        self.require_participant(caller).await?;

        let limit = match limit {
            Some(n) if n <= 0 => {
                return Err(ChatError::InvalidLimit(format!(
                    "limit must be a positive integer, got {n}"
                )));
            }
            Some(n) => Some(usize::try_from(n).unwrap_or(usize::MAX)),
            None => None,
        };

        let mut visible = self.messages.list_visible_to(caller).await?;
        if let Some(limit) = limit {
            visible.truncate(limit);
        }
        Ok(visible)
    }

    /// Replace the content of a message owned by `caller`.
    ///
    /// The id is kept; sender, recipient, text, type and time are rewritten.
    pub async fn edit_message(
        &self,
        caller: &str,
        message_id: &str,
        request: &MessageRequest,
    ) -> Result<Message, ChatError> {
        self.require_participant(caller).await?;
        let content = request.validate().map_err(ChatError::Validation)?;
        let existing = self.owned_message(caller, message_id).await?;

        let mut updated = Message::authored(caller, content, Utc::now());
        updated.id = existing.id;

        if !self.messages.update(&updated).await? {
            return Err(ChatError::MessageNotFound);
        }

        debug!(participant = %caller, message_id = %updated.id, "message edited");
        Ok(updated)
    }

    /// Permanently remove a message owned by `caller`.
    pub async fn delete_message(&self, caller: &str, message_id: &str) -> Result<(), ChatError> {
        self.require_participant(caller).await?;
        let existing = self.owned_message(caller, message_id).await?;

        if !self.messages.delete(&existing.id).await? {
            return Err(ChatError::MessageNotFound);
        }

        debug!(participant = %caller, message_id = %existing.id, "message deleted");
        Ok(())
    }

    // --- Helpers ---

    /// Resolve the caller's self-reported name to a registered participant.
    async fn require_participant(&self, name: &str) -> Result<Participant, ChatError> {
        if name.trim().is_empty() {
            return Err(ChatError::MissingIdentity);
        }
        self.participants
            .find_by_name(name)
            .await?
            .ok_or_else(|| ChatError::UnknownSender(name.to_string()))
    }

    /// Load a message and check that `caller` sent it.
    async fn owned_message(&self, caller: &str, message_id: &str) -> Result<Message, ChatError> {
        let id = message_id
            .parse::<Uuid>()
            .map_err(|_| ChatError::MessageNotFound)?;
        let message = self
            .messages
            .find(&id)
            .await?
            .ok_or(ChatError::MessageNotFound)?;
        if message.from != caller {
            return Err(ChatError::NotMessageOwner);
        }
        Ok(message)
    }
}
