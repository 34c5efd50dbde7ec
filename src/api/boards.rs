//! Board endpoints
//!
//! List, create, rename, delete, import and export boards.

use crate::api::{Ack, ApiClient, ApiError};
use crate::types::board::{BoardExport, BoardSummary};
use crate::types::thought::de_id;
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Debug, Deserialize)]
struct BoardsResponse {
    #[serde(default)]
    boards: Vec<BoardSummary>,
}

#[derive(Debug, Deserialize)]
struct CreatedResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(default, deserialize_with = "de_opt_id")]
    board_id: Option<String>,
}

fn de_opt_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    de_id(deserializer).map(Some)
}

#[derive(Debug, Serialize)]
struct RenameRequest<'a> {
    board_id: &'a str,
    name: &'a str,
}

impl ApiClient {
    pub async fn list_boards(&self) -> Result<Vec<BoardSummary>, ApiError> {
        let resp: BoardsResponse = self.get_json("/list_boards").await?;
        Ok(resp.boards)
    }

    /// Create a board; returns the new board id.
    pub async fn create_board(&self, name: &str) -> Result<String, ApiError> {
        let resp: CreatedResponse = self
            .post_json("/create_board", &json!({ "name": name }))
            .await?;
        Self::created_board_id(resp)
    }

    pub async fn rename_board(&self, board_id: &str, name: &str) -> Result<(), ApiError> {
        let ack: Ack = self
            .post_json("/rename_board", &RenameRequest { board_id, name })
            .await?;
        ack.into_result()
    }

    pub async fn delete_board(&self, board_id: &str) -> Result<(), ApiError> {
        let ack: Ack = self
            .post_json("/delete_board", &json!({ "board_id": board_id }))
            .await?;
        ack.into_result()
    }

    /// Import a previously exported board; returns the new board id.
    pub async fn import_board(&self, board: &BoardExport) -> Result<String, ApiError> {
        let resp: CreatedResponse = self.post_json("/import_board", board).await?;
        Self::created_board_id(resp)
    }

    pub async fn export_board(&self, board_id: &str) -> Result<BoardExport, ApiError> {
        self.get_json(&format!("/export_board?board_id={board_id}"))
            .await
    }

    fn created_board_id(resp: CreatedResponse) -> Result<String, ApiError> {
        if !resp.success {
            return Err(ApiError::Rejected(
                resp.error
                    .unwrap_or_else(|| "Unknown server error".to_string()),
            ));
        }
        resp.board_id
            .ok_or_else(|| ApiError::Rejected("Server returned no board id".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boards_response_accepts_integer_ids() {
        let resp: BoardsResponse = serde_json::from_str(
            r#"{"boards": [{"id": 3, "name": "Roadmap", "created_at": null}]}"#,
        )
        .unwrap();
        assert_eq!(resp.boards[0].id, "3");
        assert_eq!(resp.boards[0].name, "Roadmap");
    }

    #[test]
    fn test_created_response_shapes() {
        let ok: CreatedResponse =
            serde_json::from_str(r#"{"success": true, "board_id": 12}"#).unwrap();
        assert_eq!(ApiClient::created_board_id(ok).unwrap(), "12");

        let rejected: CreatedResponse =
            serde_json::from_str(r#"{"success": false, "error": "A board with this name already exists"}"#)
                .unwrap();
        assert!(matches!(
            ApiClient::created_board_id(rejected),
            Err(ApiError::Rejected(msg)) if msg.contains("already exists")
        ));

        let missing_id: CreatedResponse = serde_json::from_str(r#"{"success": true}"#).unwrap();
        assert!(ApiClient::created_board_id(missing_id).is_err());
    }

    #[test]
    fn test_export_payload_shape() {
        let export: BoardExport = serde_json::from_str(
            r#"{"success": true, "title": "Roadmap",
                "thoughts": [{"id": 1, "content": "ship", "quadrant": "plan"}]}"#,
        )
        .unwrap();
        assert_eq!(export.title, "Roadmap");
        assert_eq!(export.thoughts.len(), 1);
    }
}
