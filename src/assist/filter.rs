//! Suggestion filtering
//!
//! Drops directives that restate conversation mechanics instead of board
//! content, and collapses duplicates within one reply: exact duplicates
//! under normalization, and near-duplicates by word overlap after stripping
//! common lead-ins ("i want to ...").

use crate::assist::reply::BoardDirective;
use crate::board::normalize_content;
use std::collections::HashSet;

/// The onboarding line the assistant opens fresh conversations with; it must
/// never land on the board as a thought.
pub const ONBOARDING_OFFER: &str = "welcome! i use the gaps model to help clarify and solve \
problems. would you like a quick intro to how it works, or are you already familiar with gaps?";

/// Phrases marking a suggestion as meta-conversation rather than content
const META_PHRASES: &[&str] = &[
    "quadrants are currently empty",
    "quadrants are empty",
    "user requested a summary",
    "user requested recommendations",
    "provide recommendations for how to proceed",
    "need recommendations",
    "should start with goals",
    "should start with",
    "recommendations for how to proceed",
    "i can help you solve problems",
    "what gap is on your mind",
    "what problem are you hoping to solve",
    "tell me about your goals",
    "which area would you like to start",
    "anything more for goals",
    "anything else you want to add",
    "ok? anything more",
    "want to move or edit it",
    "edit wording or move it",
    "how do you think this might be impacting",
    "what do you think about",
    "does that sound right",
    "make sense?",
    "sound good?",
    "i see you have a goal",
    "what would you like to work on next",
    "goals, status, analysis, or plans",
    "which quadrant should we work on",
    "what should we focus on",
];

/// Lead-ins stripped before comparing suggestions for similarity
const LEAD_INS: &[&str] = &["i want to ", "we need to ", "goal is to ", "plan to "];

/// Word-overlap similarity above which two suggestions count as the same
const SIMILARITY_THRESHOLD: f64 = 0.8;

/// Whether a suggestion's text is conversation mechanics, not board content.
pub fn is_meta_suggestion(content: &str) -> bool {
    let text = normalize_content(content);
    if text == ONBOARDING_OFFER {
        return true;
    }
    META_PHRASES.iter().any(|phrase| text.contains(phrase))
}

fn comparison_key(content: &str) -> String {
    let mut text = normalize_content(content);
    for lead_in in LEAD_INS {
        if let Some(rest) = text.strip_prefix(lead_in) {
            text = rest.to_string();
            break;
        }
    }
    text
}

fn word_overlap(a: &str, b: &str) -> f64 {
    let a_words: HashSet<&str> = a.split_whitespace().collect();
    let b_words: HashSet<&str> = b.split_whitespace().collect();
    if a_words.is_empty() || b_words.is_empty() {
        return 0.0;
    }
    let overlap = a_words.intersection(&b_words).count();
    overlap as f64 / a_words.len().max(b_words.len()) as f64
}

/// Filter one reply's directives: drop meta-content adds and collapse
/// duplicates. Moves and deletes only dedup exactly; similarity collapsing
/// is for adds, where the assistant tends to rephrase the same thought.
pub fn filter_directives(directives: Vec<BoardDirective>) -> Vec<BoardDirective> {
    let mut seen_adds: Vec<String> = Vec::new();
    let mut seen_exact: HashSet<String> = HashSet::new();
    let mut kept = Vec::new();

    for directive in directives {
        match &directive {
            BoardDirective::Add { content, quadrant } => {
                if is_meta_suggestion(content) {
                    tracing::debug!("Filtered meta-suggestion: {content}");
                    continue;
                }
                let key = comparison_key(content);
                if key.is_empty() {
                    continue;
                }
                if seen_adds
                    .iter()
                    .any(|seen| word_overlap(seen, &key) >= SIMILARITY_THRESHOLD)
                {
                    tracing::debug!("Filtered near-duplicate suggestion: {content}");
                    continue;
                }
                if !seen_exact.insert(format!("add:{}:{key}", quadrant)) {
                    continue;
                }
                seen_adds.push(key);
            }
            BoardDirective::Move { content, quadrant } => {
                let key = format!("move:{}:{}", quadrant, normalize_content(content));
                if !seen_exact.insert(key) {
                    continue;
                }
            }
            BoardDirective::Delete { content } => {
                let key = format!("delete:{}", normalize_content(content));
                if !seen_exact.insert(key) {
                    continue;
                }
            }
        }
        kept.push(directive);
    }

    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::quadrant::Quadrant;

    fn add(content: &str, quadrant: Quadrant) -> BoardDirective {
        BoardDirective::Add {
            content: content.to_string(),
            quadrant,
        }
    }

    #[test]
    fn test_meta_suggestions_are_detected() {
        assert!(is_meta_suggestion("The quadrants are currently empty."));
        assert!(is_meta_suggestion("What would you like to work on next?"));
        assert!(is_meta_suggestion(
            "Welcome! I use the GAPS model to help clarify and solve problems. \
             Would you like a quick intro to how it works, or are you already familiar with GAPS?"
        ));
        assert!(!is_meta_suggestion("Ship the beta by June"));
    }

    #[test]
    fn test_exact_duplicates_collapse() {
        let kept = filter_directives(vec![
            add("Cut scope", Quadrant::Plan),
            add("  cut   SCOPE ", Quadrant::Plan),
        ]);
        assert_eq!(kept.len(), 1);
    }

    #[test]
    fn test_lead_in_variants_collapse() {
        let kept = filter_directives(vec![
            add("Ship the beta by June", Quadrant::Goal),
            add("We need to ship the beta by June", Quadrant::Goal),
        ]);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].content(), "Ship the beta by June");
    }

    #[test]
    fn test_word_overlap_near_duplicates_collapse() {
        let kept = filter_directives(vec![
            add("hire two more backend engineers soon", Quadrant::Plan),
            add("hire two more backend engineers", Quadrant::Plan),
        ]);
        assert_eq!(kept.len(), 1);
    }

    #[test]
    fn test_distinct_suggestions_survive() {
        let kept = filter_directives(vec![
            add("Cut scope", Quadrant::Plan),
            add("Hire a contractor", Quadrant::Plan),
            BoardDirective::Delete {
                content: "Old idea".to_string(),
            },
        ]);
        assert_eq!(kept.len(), 3);
    }

    #[test]
    fn test_meta_adds_are_dropped_but_moves_kept() {
        let kept = filter_directives(vec![
            add("what should we focus on?", Quadrant::Goal),
            BoardDirective::Move {
                content: "Cut scope".to_string(),
                quadrant: Quadrant::Analysis,
            },
        ]);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].verb(), "Move");
    }

    #[test]
    fn test_duplicate_moves_collapse() {
        let m = BoardDirective::Move {
            content: "Cut scope".to_string(),
            quadrant: Quadrant::Analysis,
        };
        let kept = filter_directives(vec![m.clone(), m]);
        assert_eq!(kept.len(), 1);
    }
}
