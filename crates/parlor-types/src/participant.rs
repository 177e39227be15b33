//! Participant domain types.
//!
//! A participant is identified solely by its display name. The only state it
//! carries is the time of its last liveness signal.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered chat-room participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// Unique display name.
    pub name: String,
    /// Last heartbeat, serialized as Unix milliseconds.
    #[serde(rename = "lastStatus", with = "chrono::serde::ts_milliseconds")]
    pub last_status: DateTime<Utc>,
}

impl Participant {
    /// Create a participant whose last heartbeat is `at`.
    pub fn new(name: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            last_status: at,
        }
    }

    /// Whether more than `threshold` has elapsed between the last heartbeat and `now`.
    pub fn is_stale(&self, now: DateTime<Utc>, threshold: chrono::Duration) -> bool {
        now - self.last_status > threshold
    }
}

/// Request body for `POST /participants`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: String,
}

/// Normalize and validate a display name.
///
/// Returns the trimmed name, or an error message when nothing is left.
pub fn validate_name(raw: &str) -> Result<String, String> {
    let name = raw.trim();
    if name.is_empty() {
        return Err("\"name\" is not allowed to be empty".to_string());
    }
    Ok(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_participant_serializes_last_status_as_millis() {
        let at = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
        let p = Participant::new("Ana", at);
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["name"], "Ana");
        assert_eq!(json["lastStatus"], 1_700_000_000_123i64);
    }

    #[test]
    fn test_is_stale_is_strict() {
        let at = Utc.timestamp_opt(1_000, 0).unwrap();
        let p = Participant::new("Ana", at);
        let threshold = Duration::seconds(10);
        assert!(!p.is_stale(at + Duration::seconds(10), threshold));
        assert!(p.is_stale(at + Duration::milliseconds(10_001), threshold));
    }

    #[test]
    fn test_validate_name() {
        assert_eq!(validate_name("  Ana ").unwrap(), "Ana");
        assert!(validate_name("").is_err());
        assert!(validate_name("   ").is_err());
    }

    #[test]
    fn test_register_request_missing_name_defaults_empty() {
        let req: RegisterRequest = serde_json::from_str("{}").unwrap();
        assert!(req.name.is_empty());
    }
}
