//! Thought items
//!
//! A thought is a short text item placed in one quadrant of a board.

use crate::types::quadrant::Quadrant;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// A single board thought.
///
/// Ids are opaque strings: the backend issues integer row ids for database
/// boards and UUIDs for JSON boards, so the client never interprets them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thought {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    pub content: String,
    pub quadrant: Quadrant,
}

impl Thought {
    pub fn new(id: impl Into<String>, content: impl Into<String>, quadrant: Quadrant) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            quadrant,
        }
    }

    /// A thought with a locally generated id, used when the server response
    /// did not carry one back.
    pub fn placeholder(content: impl Into<String>, quadrant: Quadrant) -> Self {
        Self::new(Uuid::new_v4().to_string(), content, quadrant)
    }
}

/// Accept both string and integer ids from the backend.
pub(crate) fn de_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number id, got {other}"
        ))),
    }
}
