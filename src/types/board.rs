//! Board wire types
//!
//! Shapes exchanged with the board endpoints: listings, export payloads and
//! the quadrant snapshot the chat endpoints expect.

use crate::types::quadrant::Quadrant;
use crate::types::thought::{de_id, Thought};
use serde::{Deserialize, Serialize};

/// One entry of the `/list_boards` response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSummary {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl BoardSummary {
    /// Human-readable creation date; invalid or missing dates render as
    /// "Unknown" instead of failing the listing.
    pub fn created_label(&self) -> String {
        self.created_at
            .as_deref()
            .and_then(|raw| chrono::DateTime::parse_from_rfc3339(raw).ok())
            .map(|dt| dt.format("%Y-%m-%d").to_string())
            .or_else(|| {
                // The backend emits naive isoformat timestamps for DB boards
                self.created_at.as_deref().and_then(|raw| {
                    chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
                        .ok()
                        .map(|dt| dt.format("%Y-%m-%d").to_string())
                })
            })
            .unwrap_or_else(|| "Unknown".to_string())
    }
}

/// Full board payload used by `/export_board` and `/import_board`.
///
/// The backend keys the board name as `title` in this payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardExport {
    pub title: String,
    #[serde(default)]
    pub thoughts: Vec<Thought>,
}

/// Per-quadrant thought contents, the `quadrants` field of chat requests and
/// the whole `/get_quadrants` response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuadrantSnapshot {
    #[serde(default)]
    pub status: Vec<String>,
    #[serde(default)]
    pub goal: Vec<String>,
    #[serde(default)]
    pub analysis: Vec<String>,
    #[serde(default)]
    pub plan: Vec<String>,
}

impl QuadrantSnapshot {
    pub fn get(&self, quadrant: Quadrant) -> &[String] {
        match quadrant {
            Quadrant::Status => &self.status,
            Quadrant::Goal => &self.goal,
            Quadrant::Analysis => &self.analysis,
            Quadrant::Plan => &self.plan,
        }
    }

    pub fn push(&mut self, quadrant: Quadrant, content: impl Into<String>) {
        let list = match quadrant {
            Quadrant::Status => &mut self.status,
            Quadrant::Goal => &mut self.goal,
            Quadrant::Analysis => &mut self.analysis,
            Quadrant::Plan => &mut self.plan,
        };
        list.push(content.into());
    }

    pub fn is_empty(&self) -> bool {
        Quadrant::ALL.iter().all(|q| self.get(*q).is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_created_label_handles_bad_dates() {
        let mut b = BoardSummary {
            id: "1".to_string(),
            name: "b".to_string(),
            created_at: Some("not-a-date".to_string()),
        };
        assert_eq!(b.created_label(), "Unknown");

        b.created_at = None;
        assert_eq!(b.created_label(), "Unknown");

        b.created_at = Some("2025-03-14T09:26:53.589793".to_string());
        assert_eq!(b.created_label(), "2025-03-14");
    }

    #[test]
    fn test_snapshot_round_trip() {
        let mut snap = QuadrantSnapshot::default();
        snap.push(Quadrant::Goal, "win");
        snap.push(Quadrant::Status, "behind");
        let json = serde_json::to_value(&snap).unwrap();
        assert_eq!(json["goal"][0], "win");
        let back: QuadrantSnapshot = serde_json::from_value(json).unwrap();
        assert_eq!(back, snap);
        assert!(!back.is_empty());
    }

    #[test]
    fn test_snapshot_defaults_missing_quadrants() {
        let snap: QuadrantSnapshot = serde_json::from_str(r#"{"goal": ["g"]}"#).unwrap();
        assert_eq!(snap.goal, vec!["g".to_string()]);
        assert!(snap.status.is_empty());
    }
}
