use thiserror::Error;

/// Errors surfaced by room operations (registration, messaging, heartbeat).
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("invalid limit: {0}")]
    InvalidLimit(String),

    #[error("name '{0}' is already taken")]
    NameTaken(String),

    #[error("missing User header")]
    MissingIdentity,

    #[error("'{0}' is not a registered participant")]
    UnknownSender(String),

    #[error("participant '{0}' not found")]
    ParticipantNotFound(String),

    #[error("message not found")]
    MessageNotFound,

    #[error("message belongs to another participant")]
    NotMessageOwner,

    #[error("storage error: {0}")]
    Storage(String),
}

impl From<RepositoryError> for ChatError {
    fn from(e: RepositoryError) -> Self {
        ChatError::Storage(e.to_string())
    }
}

/// Errors from repository operations (used by trait definitions in parlor-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("query error: {0}")]
    Query(String),

    #[error("conflict: {0}")]
    Conflict(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_error_display() {
        let err = ChatError::NameTaken("Ana".to_string());
        assert_eq!(err.to_string(), "name 'Ana' is already taken");
    }

    #[test]
    fn test_repository_error_display() {
        let err = RepositoryError::Query("syntax error".to_string());
        assert_eq!(err.to_string(), "query error: syntax error");
    }

    #[test]
    fn test_repository_error_becomes_storage() {
        let err: ChatError = RepositoryError::Query("disk I/O error".to_string()).into();
        assert!(matches!(err, ChatError::Storage(ref msg) if msg == "query error: disk I/O error"));

        let err: ChatError = RepositoryError::Conflict("Ana".to_string()).into();
        assert!(matches!(err, ChatError::Storage(ref msg) if msg == "conflict: Ana"));
    }
}
