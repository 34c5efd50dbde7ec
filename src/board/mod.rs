//! Client-side board mirror
//!
//! The transient in-memory copy of the server board. Every mutation goes
//! through the backend first; this mirror is what the quadrant grid renders
//! and what AI directives are resolved against, so the view stays current
//! without refetching after each call.

use crate::types::board::QuadrantSnapshot;
use crate::types::quadrant::Quadrant;
use crate::types::thought::Thought;

/// Normalize thought content for duplicate checks: trim, casefold, collapse
/// runs of whitespace. Matches the comparison the backend applies before
/// rejecting a duplicate add.
pub fn normalize_content(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// In-memory mirror of one board
#[derive(Debug, Clone, Default)]
pub struct BoardState {
    pub id: String,
    pub name: String,
    thoughts: Vec<Thought>,
}

impl BoardState {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            thoughts: Vec::new(),
        }
    }

    pub fn is_loaded(&self) -> bool {
        !self.id.is_empty()
    }

    pub fn len(&self) -> usize {
        self.thoughts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.thoughts.is_empty()
    }

    /// Thoughts of one quadrant, in insertion order
    pub fn in_quadrant(&self, quadrant: Quadrant) -> impl Iterator<Item = &Thought> {
        self.thoughts.iter().filter(move |t| t.quadrant == quadrant)
    }

    pub fn thought(&self, id: &str) -> Option<&Thought> {
        self.thoughts.iter().find(|t| t.id == id)
    }

    /// Resolve a thought by normalized content, the way AI directives name
    /// thoughts by text rather than id. First match across quadrants wins.
    pub fn find_by_content(&self, content: &str) -> Option<&Thought> {
        let needle = normalize_content(content);
        if needle.is_empty() {
            return None;
        }
        self.thoughts
            .iter()
            .find(|t| normalize_content(&t.content) == needle)
    }

    /// Whether a quadrant already holds this content (normalized)
    pub fn contains(&self, quadrant: Quadrant, content: &str) -> bool {
        let needle = normalize_content(content);
        self.in_quadrant(quadrant)
            .any(|t| normalize_content(&t.content) == needle)
    }

    pub fn insert(&mut self, thought: Thought) {
        self.thoughts.push(thought);
    }

    pub fn remove(&mut self, id: &str) -> Option<Thought> {
        let idx = self.thoughts.iter().position(|t| t.id == id)?;
        Some(self.thoughts.remove(idx))
    }

    /// Move a thought to another quadrant. Reinserts at the end of the
    /// target quadrant, matching how the server-rendered lists ordered a
    /// moved item after reload.
    pub fn relocate(&mut self, id: &str, quadrant: Quadrant) -> bool {
        match self.remove(id) {
            Some(mut thought) => {
                thought.quadrant = quadrant;
                self.thoughts.push(thought);
                true
            }
            None => false,
        }
    }

    pub fn rewrite(&mut self, id: &str, content: impl Into<String>) -> bool {
        match self.thoughts.iter_mut().find(|t| t.id == id) {
            Some(thought) => {
                thought.content = content.into();
                true
            }
            None => false,
        }
    }

    /// Replace the whole thought set (refresh from `/export_board`)
    pub fn replace_all(&mut self, thoughts: Vec<Thought>) {
        self.thoughts = thoughts;
    }

    /// Per-quadrant content snapshot for the chat endpoints
    pub fn snapshot(&self) -> QuadrantSnapshot {
        let mut snap = QuadrantSnapshot::default();
        for thought in &self.thoughts {
            snap.push(thought.quadrant, thought.content.clone());
        }
        snap
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> BoardState {
        let mut board = BoardState::new("7", "Quarterly");
        board.insert(Thought::new("1", "Ship the beta", Quadrant::Goal));
        board.insert(Thought::new("2", "Two engineers out", Quadrant::Status));
        board.insert(Thought::new("3", "Cut scope", Quadrant::Plan));
        board
    }

    #[test]
    fn test_normalize_content() {
        assert_eq!(normalize_content("  Ship   the Beta "), "ship the beta");
        assert_eq!(normalize_content("a\n b"), "a b");
        assert_eq!(normalize_content("   "), "");
    }

    #[test]
    fn test_quadrant_filtering() {
        let board = sample();
        assert_eq!(board.in_quadrant(Quadrant::Goal).count(), 1);
        assert_eq!(board.in_quadrant(Quadrant::Analysis).count(), 0);
        assert_eq!(board.len(), 3);
    }

    #[test]
    fn test_contains_is_normalized() {
        let board = sample();
        assert!(board.contains(Quadrant::Goal, "  ship THE beta"));
        assert!(!board.contains(Quadrant::Plan, "ship the beta"));
    }

    #[test]
    fn test_find_by_content() {
        let board = sample();
        assert_eq!(board.find_by_content("cut scope").map(|t| t.id.as_str()), Some("3"));
        assert!(board.find_by_content("missing").is_none());
        assert!(board.find_by_content("   ").is_none());
    }

    #[test]
    fn test_relocate_appends_to_target() {
        let mut board = sample();
        board.insert(Thought::new("4", "Hire a contractor", Quadrant::Plan));
        assert!(board.relocate("3", Quadrant::Analysis));

        let plans: Vec<_> = board.in_quadrant(Quadrant::Plan).map(|t| t.id.as_str()).collect();
        assert_eq!(plans, vec!["4"]);
        assert_eq!(
            board.thought("3").map(|t| t.quadrant),
            Some(Quadrant::Analysis)
        );
        assert!(!board.relocate("99", Quadrant::Goal));
    }

    #[test]
    fn test_remove_and_rewrite() {
        let mut board = sample();
        assert!(board.rewrite("2", "Three engineers out"));
        assert_eq!(
            board.thought("2").map(|t| t.content.as_str()),
            Some("Three engineers out")
        );
        assert!(board.remove("2").is_some());
        assert!(board.remove("2").is_none());
        assert!(!board.rewrite("2", "gone"));
    }

    #[test]
    fn test_snapshot_shape() {
        let board = sample();
        let snap = board.snapshot();
        assert_eq!(snap.get(Quadrant::Goal), ["Ship the beta".to_string()]);
        assert_eq!(snap.get(Quadrant::Status).len(), 1);
        assert!(snap.get(Quadrant::Analysis).is_empty());
    }
}
