//! Quadrant categories
//!
//! The four GAPS categories a thought can belong to.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the four GAPS board categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quadrant {
    Goal,
    Analysis,
    Plan,
    Status,
}

impl Quadrant {
    /// All quadrants in board display order
    pub const ALL: [Quadrant; 4] = [
        Quadrant::Goal,
        Quadrant::Analysis,
        Quadrant::Plan,
        Quadrant::Status,
    ];

    /// The lowercase singular wire name (`"goal"`, `"analysis"`, ...)
    pub fn as_str(&self) -> &'static str {
        match self {
            Quadrant::Goal => "goal",
            Quadrant::Analysis => "analysis",
            Quadrant::Plan => "plan",
            Quadrant::Status => "status",
        }
    }

    /// Capitalized label for the UI
    pub fn label(&self) -> &'static str {
        match self {
            Quadrant::Goal => "Goal",
            Quadrant::Analysis => "Analysis",
            Quadrant::Plan => "Plan",
            Quadrant::Status => "Status",
        }
    }

    /// Parse a quadrant word the way the backend does: case-insensitive,
    /// accepting plural forms and words that extend a singular name after a
    /// trailing `s` strip ("Statuses" -> `Status`). Unknown words yield
    /// `None`; callers pick their own fallback.
    pub fn parse_lenient(word: &str) -> Option<Quadrant> {
        let w = word.trim().to_lowercase();
        match w.as_str() {
            "goal" | "goals" => return Some(Quadrant::Goal),
            "analysis" | "analyses" => return Some(Quadrant::Analysis),
            "plan" | "plans" => return Some(Quadrant::Plan),
            "status" | "statuses" => return Some(Quadrant::Status),
            _ => {}
        }

        let stripped = w.strip_suffix('s').unwrap_or(&w);
        if stripped.is_empty() {
            return None;
        }
        Quadrant::ALL
            .into_iter()
            .find(|q| stripped.starts_with(q.as_str()))
    }
}

impl fmt::Display for Quadrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names() {
        assert_eq!(Quadrant::Goal.as_str(), "goal");
        assert_eq!(Quadrant::Analysis.to_string(), "analysis");
        assert_eq!(
            serde_json::to_string(&Quadrant::Status).unwrap(),
            "\"status\""
        );
        let q: Quadrant = serde_json::from_str("\"plan\"").unwrap();
        assert_eq!(q, Quadrant::Plan);
    }

    #[test]
    fn test_parse_lenient_singular_and_plural() {
        assert_eq!(Quadrant::parse_lenient("goal"), Some(Quadrant::Goal));
        assert_eq!(Quadrant::parse_lenient("Goals"), Some(Quadrant::Goal));
        assert_eq!(
            Quadrant::parse_lenient("analyses"),
            Some(Quadrant::Analysis)
        );
        assert_eq!(
            Quadrant::parse_lenient("STATUSES"),
            Some(Quadrant::Status)
        );
    }

    #[test]
    fn test_parse_lenient_extended_words() {
        // "statuse" (after the plural strip) still starts with "status"
        assert_eq!(Quadrant::parse_lenient("statuse"), Some(Quadrant::Status));
        assert_eq!(Quadrant::parse_lenient("  plan  "), Some(Quadrant::Plan));
    }

    #[test]
    fn test_parse_lenient_rejects_unknown() {
        assert_eq!(Quadrant::parse_lenient("quadrant"), None);
        assert_eq!(Quadrant::parse_lenient(""), None);
        assert_eq!(Quadrant::parse_lenient("s"), None);
    }
}
