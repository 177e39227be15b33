//! Caller identity extractor.
//!
//! The caller names itself in the `User` header. The name is not a credential;
//! handlers check it against the participant store through the room service.
//!
//! Header bytes are read as UTF-8 when valid, otherwise as Latin-1, since
//! browser clients send accented names either way.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use parlor_types::error::ChatError;

use crate::http::error::AppError;

/// Name of the header carrying the caller's display name.
pub const USER_HEADER: &str = "user";

/// The caller's self-reported display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity(pub String);

impl<S: Send + Sync> FromRequestParts<S> for Identity {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(USER_HEADER)
            .ok_or(AppError::Chat(ChatError::MissingIdentity))?;

        let name = decode_header(value.as_bytes());
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::Chat(ChatError::MissingIdentity));
        }

        Ok(Identity(name.to_string()))
    }
}

fn decode_header(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}
