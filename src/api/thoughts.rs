//! Thought endpoints
//!
//! Add, edit, move and delete thoughts, plus the quadrant refresh.

use crate::api::{Ack, ApiClient, ApiError};
use crate::types::quadrant::Quadrant;
use crate::types::thought::Thought;
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Debug, Serialize)]
struct AddThoughtRequest<'a> {
    content: &'a str,
    quadrant: Quadrant,
    board_id: &'a str,
}

#[derive(Debug, Deserialize)]
struct AddThoughtResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    thought: Option<Thought>,
}

#[derive(Debug, Serialize)]
struct MoveThoughtRequest<'a> {
    thought_id: &'a str,
    quadrant: Quadrant,
    board_id: &'a str,
}

impl ApiClient {
    /// Add a thought. The response carries the stored thought with its
    /// server-issued id; if the backend omits it, a placeholder id keeps the
    /// mirror usable until the next refresh. Duplicate content in the same
    /// quadrant comes back as HTTP 409 (`ApiError::is_duplicate`).
    pub async fn add_thought(
        &self,
        board_id: &str,
        quadrant: Quadrant,
        content: &str,
    ) -> Result<Thought, ApiError> {
        let resp: AddThoughtResponse = self
            .post_json(
                "/add_thought",
                &AddThoughtRequest {
                    content,
                    quadrant,
                    board_id,
                },
            )
            .await?;

        if !resp.success {
            return Err(ApiError::Rejected(
                resp.error
                    .unwrap_or_else(|| "Unknown server error".to_string()),
            ));
        }
        Ok(resp
            .thought
            .unwrap_or_else(|| Thought::placeholder(content, quadrant)))
    }

    pub async fn edit_thought(&self, thought_id: &str, content: &str) -> Result<(), ApiError> {
        let ack: Ack = self
            .post_json(
                "/edit_thought",
                &json!({ "thought_id": thought_id, "content": content }),
            )
            .await?;
        ack.into_result()
    }

    pub async fn delete_thought(&self, thought_id: &str) -> Result<(), ApiError> {
        let ack: Ack = self
            .post_json("/delete_thought", &json!({ "thought_id": thought_id }))
            .await?;
        ack.into_result()
    }

    pub async fn move_thought(
        &self,
        board_id: &str,
        thought_id: &str,
        quadrant: Quadrant,
    ) -> Result<(), ApiError> {
        let ack: Ack = self
            .post_json(
                "/move_thought",
                &MoveThoughtRequest {
                    thought_id,
                    quadrant,
                    board_id,
                },
            )
            .await?;
        ack.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_request_wire_shape() {
        let req = AddThoughtRequest {
            content: "ship the beta",
            quadrant: Quadrant::Plan,
            board_id: "7",
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["content"], "ship the beta");
        assert_eq!(json["quadrant"], "plan");
        assert_eq!(json["board_id"], "7");
    }

    #[test]
    fn test_add_response_with_thought() {
        let resp: AddThoughtResponse = serde_json::from_str(
            r#"{"success": true, "thought": {"id": 9, "content": "ship", "quadrant": "plan"}}"#,
        )
        .unwrap();
        assert!(resp.success);
        assert_eq!(resp.thought.unwrap().id, "9");
    }

    #[test]
    fn test_add_response_rejection() {
        let resp: AddThoughtResponse = serde_json::from_str(
            r#"{"success": false, "error": "Missing content or board_id"}"#,
        )
        .unwrap();
        assert!(!resp.success);
        assert!(resp.thought.is_none());
    }
}
