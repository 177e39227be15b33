//! Query parameter extractors for list endpoints.

use serde::Deserialize;

use parlor_types::error::ChatError;

/// Query parameters for `GET /messages`.
///
/// `limit` is kept as text so that non-numeric values are reported as an
/// invalid limit rather than a generic query rejection.
#[derive(Debug, Deserialize, Default)]
pub struct MessageListQuery {
    pub limit: Option<String>,
}

impl MessageListQuery {
    /// Parse `limit` into an integer; range checks happen in the room service.
    pub fn limit(&self) -> Result<Option<i64>, ChatError> {
        match &self.limit {
            None => Ok(None),
            Some(raw) => raw.trim().parse::<i64>().map(Some).map_err(|_| {
                ChatError::InvalidLimit(format!("limit must be a positive integer, got '{raw}'"))
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(limit: Option<&str>) -> MessageListQuery {
        MessageListQuery {
            limit: limit.map(str::to_string),
        }
    }

    #[test]
    fn test_limit_parsing() {
        assert_eq!(query(None).limit().unwrap(), None);
        assert_eq!(query(Some("5")).limit().unwrap(), Some(5));
        assert_eq!(query(Some("-1")).limit().unwrap(), Some(-1));
        assert!(matches!(query(Some("abc")).limit(), Err(ChatError::InvalidLimit(_))));
        assert!(matches!(query(Some("")).limit(), Err(ChatError::InvalidLimit(_))));
    }
}
