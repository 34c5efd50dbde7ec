//! Assistant endpoints
//!
//! Interactive mode, auto-categorized thought entry, conversation reset and
//! the board summary views.

use crate::api::{Ack, ApiClient, ApiError};
use crate::assist::reply::SuggestionPayload;
use crate::types::board::QuadrantSnapshot;
use crate::types::message::HistoryTurn;
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Debug, Serialize)]
struct InteractiveRequest<'a> {
    board_id: &'a str,
    user_input: &'a str,
    quadrants: &'a QuadrantSnapshot,
    history: &'a [HistoryTurn<'a>],
}

/// One `/interactive_gaps` exchange
#[derive(Debug, Default, Deserialize)]
pub struct AssistTurn {
    #[serde(default)]
    pub reply: Option<String>,
    #[serde(default)]
    pub suggestions: SuggestionPayload,
    #[serde(default)]
    error: Option<String>,
}

/// One `/ai_conversation` exchange. Fields are checked in the original
/// priority order: thoughts, then followup, then error, then reply.
#[derive(Debug, Default, Deserialize)]
pub struct ConversationOutcome {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub thoughts: Vec<AutoThought>,
    #[serde(default)]
    pub followup: Option<String>,
    #[serde(default)]
    pub reply: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// A thought the auto-categorizer reports back; either bare text or an
/// object carrying the quadrant it chose.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AutoThought {
    Text(String),
    Item {
        content: String,
        #[serde(default)]
        quadrant: Option<String>,
    },
}

impl AutoThought {
    pub fn content(&self) -> &str {
        match self {
            AutoThought::Text(text) => text,
            AutoThought::Item { content, .. } => content,
        }
    }
}

#[derive(Debug, Deserialize)]
struct SummaryResponse {
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    reply: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl ApiClient {
    /// One interactive-mode turn. An empty `user_input` runs the backend's
    /// initialization exchange for a fresh conversation.
    pub async fn interactive_gaps(
        &self,
        board_id: &str,
        user_input: &str,
        quadrants: &QuadrantSnapshot,
        history: &[HistoryTurn<'_>],
    ) -> Result<AssistTurn, ApiError> {
        let mut turn: AssistTurn = self
            .post_json(
                "/interactive_gaps",
                &InteractiveRequest {
                    board_id,
                    user_input,
                    quadrants,
                    history,
                },
            )
            .await?;
        if let Some(error) = turn.error.take() {
            return Err(ApiError::Rejected(error));
        }
        Ok(turn)
    }

    /// Hand raw input to the auto-categorizer.
    pub async fn ai_conversation(
        &self,
        board_id: &str,
        content: &str,
    ) -> Result<ConversationOutcome, ApiError> {
        self.post_json(
            "/ai_conversation",
            &json!({ "content": content, "board_id": board_id }),
        )
        .await
    }

    /// Clear the server-side conversation history for a board.
    pub async fn reset_conversation(&self, board_id: &str) -> Result<(), ApiError> {
        let ack: Ack = self
            .post_json("/reset_conversation", &json!({ "board_id": board_id }))
            .await?;
        ack.into_result()
    }

    pub async fn board_summary(&self, board_id: &str) -> Result<String, ApiError> {
        self.summary_text("/board_summary", board_id).await
    }

    pub async fn board_ai_summary(&self, board_id: &str) -> Result<String, ApiError> {
        self.summary_text("/board_ai_summary", board_id).await
    }

    pub async fn board_alignment(&self, board_id: &str) -> Result<String, ApiError> {
        self.summary_text("/board_alignment", board_id).await
    }

    async fn summary_text(&self, path: &str, board_id: &str) -> Result<String, ApiError> {
        let resp: SummaryResponse = self
            .post_json(path, &json!({ "board_id": board_id }))
            .await?;
        if let Some(error) = resp.error {
            return Err(ApiError::Rejected(error));
        }
        resp.summary
            .or(resp.reply)
            .filter(|text| !text.trim().is_empty())
            .ok_or_else(|| ApiError::Rejected("Empty summary from server".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interactive_request_shape() {
        let snapshot = QuadrantSnapshot::default();
        let req = InteractiveRequest {
            board_id: "7",
            user_input: "help me plan",
            quadrants: &snapshot,
            history: &[],
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["board_id"], "7");
        assert_eq!(json["user_input"], "help me plan");
        assert!(json["quadrants"]["goal"].as_array().unwrap().is_empty());
        assert!(json["history"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_assist_turn_with_suggestions() {
        let turn: AssistTurn = serde_json::from_str(
            r#"{"reply": "placed it",
                "suggestions": {"add_to_quadrant": [{"quadrant": "plan", "thought": "cut scope"}]}}"#,
        )
        .unwrap();
        assert_eq!(turn.reply.as_deref(), Some("placed it"));
        assert_eq!(turn.suggestions.add_to_quadrant.len(), 1);
    }

    #[test]
    fn test_assist_turn_defaults() {
        let turn: AssistTurn = serde_json::from_str(r#"{"reply": "just words"}"#).unwrap();
        assert!(turn.suggestions.is_empty());
    }

    #[test]
    fn test_conversation_outcome_mixed_thoughts() {
        let outcome: ConversationOutcome = serde_json::from_str(
            r#"{"success": true,
                "message": "Thought(s) added!",
                "thoughts": ["plain text", {"content": "typed", "quadrant": "goal"}]}"#,
        )
        .unwrap();
        assert!(outcome.success);
        assert_eq!(outcome.thoughts.len(), 2);
        assert_eq!(outcome.thoughts[0].content(), "plain text");
        assert_eq!(outcome.thoughts[1].content(), "typed");
    }

    #[test]
    fn test_summary_response_variants() {
        let with_summary: SummaryResponse =
            serde_json::from_str(r#"{"success": true, "summary": "all aligned"}"#).unwrap();
        assert_eq!(with_summary.summary.as_deref(), Some("all aligned"));

        let with_reply: SummaryResponse = serde_json::from_str(r#"{"reply": "text"}"#).unwrap();
        assert_eq!(with_reply.reply.as_deref(), Some("text"));
    }
}
