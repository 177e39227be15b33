//! Application error type mapping to HTTP status codes.
//!
//! Unknown callers are 422 on the message endpoints but 404 on `/status`;
//! the room service reports those as different `ChatError` variants.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use parlor_types::error::ChatError;

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Room-level errors.
    Chat(ChatError),
}

impl From<ChatError> for AppError {
    fn from(e: ChatError) -> Self {
        AppError::Chat(e)
    }
}

impl AppError {
    /// HTTP status and machine-readable code for this error.
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Chat(ChatError::Validation(_)) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR")
            }
            AppError::Chat(ChatError::InvalidLimit(_)) => {
                (StatusCode::BAD_REQUEST, "INVALID_LIMIT")
            }
            AppError::Chat(ChatError::NameTaken(_)) => (StatusCode::CONFLICT, "NAME_TAKEN"),
            AppError::Chat(ChatError::MissingIdentity) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "MISSING_USER")
            }
            AppError::Chat(ChatError::UnknownSender(_)) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "UNKNOWN_USER")
            }
            AppError::Chat(ChatError::ParticipantNotFound(_)) => {
                (StatusCode::NOT_FOUND, "PARTICIPANT_NOT_FOUND")
            }
            AppError::Chat(ChatError::MessageNotFound) => {
                (StatusCode::NOT_FOUND, "MESSAGE_NOT_FOUND")
            }
            AppError::Chat(ChatError::NotMessageOwner) => {
                (StatusCode::UNAUTHORIZED, "UNAUTHORIZED")
            }
            AppError::Chat(ChatError::Storage(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR")
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        let AppError::Chat(err) = &self;
        let message = err.to_string();

        if status.is_server_error() {
            tracing::error!(code, error = %message, "request failed");
        }

        let body = json!({
            "errors": [{
                "code": code,
                "message": message,
            }]
        });

        (
            status,
            [(axum::http::header::CONTENT_TYPE, "application/json")],
            body.to_string(),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (ChatError::Validation("x".into()), StatusCode::UNPROCESSABLE_ENTITY),
            (ChatError::InvalidLimit("x".into()), StatusCode::BAD_REQUEST),
            (ChatError::NameTaken("Ana".into()), StatusCode::CONFLICT),
            (ChatError::MissingIdentity, StatusCode::UNPROCESSABLE_ENTITY),
            (ChatError::UnknownSender("x".into()), StatusCode::UNPROCESSABLE_ENTITY),
            (ChatError::ParticipantNotFound("x".into()), StatusCode::NOT_FOUND),
            (ChatError::MessageNotFound, StatusCode::NOT_FOUND),
            (ChatError::NotMessageOwner, StatusCode::UNAUTHORIZED),
            (ChatError::Storage("disk".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, expected) in cases {
            let (status, _) = AppError::from(err).status_and_code();
            assert_eq!(status, expected);
        }
    }

    #[test]
    fn test_into_response_status() {
        let resp = AppError::from(ChatError::NameTaken("Ana".into())).into_response();
        assert_eq!(resp.status(), StatusCode::CONFLICT);
    }
}
