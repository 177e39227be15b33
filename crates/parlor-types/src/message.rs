//! Chat message domain types for Parlor.
//!
//! Defines the `Message` record stored in the room log, the user-facing
//! request body used by post/edit, and the room-wide constants for the
//! broadcast target and the join/leave notices.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Recipient value meaning "everyone in the room".
pub const BROADCAST: &str = "Todos";

/// Text of the status message appended when a participant registers.
pub const JOIN_TEXT: &str = "entra na sala...";

/// Text of the status message appended when a participant is evicted.
pub const LEAVE_TEXT: &str = "sai da sala...";

/// Kind of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    /// Ordinary message, visible according to its recipient.
    Message,
    /// Private message addressed to a single participant.
    PrivateMessage,
    /// System-generated join/leave notice.
    Status,
}

impl MessageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageKind::Message => "message",
            MessageKind::PrivateMessage => "private_message",
            MessageKind::Status => "status",
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MessageKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "message" => Ok(MessageKind::Message),
            "private_message" => Ok(MessageKind::PrivateMessage),
            "status" => Ok(MessageKind::Status),
            other => Err(format!("invalid message type: '{other}'")),
        }
    }
}

/// A message in the room log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// UUIDv7 assigned at creation; preserved across edits.
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub from: String,
    /// Recipient name, or [`BROADCAST`].
    pub to: String,
    pub text: String,
    #[serde(rename = "type")]
    pub kind: MessageKind,
    /// Wall-clock time of creation, `HH:MM:SS`.
    pub time: String,
    /// Full creation timestamp; the ordering key for retrieval.
    #[serde(rename = "createdAt", with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Build a user-authored message from validated content.
    pub fn authored(from: impl Into<String>, content: MessageContent, at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::now_v7(),
            from: from.into(),
            to: content.to,
            text: content.text,
            kind: content.kind,
            time: format_time(&at),
            created_at: at,
        }
    }

    /// Build a broadcast status notice (join/leave) for `name`.
    pub fn status(name: impl Into<String>, text: &str, at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::now_v7(),
            from: name.into(),
            to: BROADCAST.to_string(),
            text: text.to_string(),
            kind: MessageKind::Status,
            time: format_time(&at),
            created_at: at,
        }
    }

    /// Whether `participant` may read this message.
    pub fn is_visible_to(&self, participant: &str) -> bool {
        self.to == BROADCAST || self.to == participant || self.from == participant
    }
}

/// Format a timestamp the way messages display it.
pub fn format_time(at: &DateTime<Utc>) -> String {
    at.format("%H:%M:%S").to_string()
}

/// Request body for posting or editing a message.
///
/// Fields default to empty so that missing keys surface as validation
/// errors rather than deserialization failures.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageRequest {
    #[serde(default)]
    pub to: String,
    #[serde(default)]
    pub text: String,
    #[serde(rename = "type", default)]
    pub kind: String,
}

/// Validated message content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageContent {
    pub to: String,
    pub text: String,
    pub kind: MessageKind,
}

impl MessageRequest {
    /// Validate the body, reporting every problem at once.
    ///
    /// Status messages are system-generated and cannot be posted by users.
    pub fn validate(&self) -> Result<MessageContent, String> {
        let mut problems = Vec::new();

        let to = self.to.trim();
        if to.is_empty() {
            problems.push("\"to\" is not allowed to be empty".to_string());
        }
        let text = self.text.trim();
        if text.is_empty() {
            problems.push("\"text\" is not allowed to be empty".to_string());
        }
        let kind = match self.kind.parse::<MessageKind>() {
            Ok(MessageKind::Status) | Err(_) => {
                problems.push("\"type\" must be one of [message, private_message]".to_string());
                None
            }
            Ok(kind) => Some(kind),
        };

        match kind {
            Some(kind) if problems.is_empty() => Ok(MessageContent {
                to: to.to_string(),
                text: text.to_string(),
                kind,
            }),
            _ => Err(problems.join("; ")),
        }
    }
}
