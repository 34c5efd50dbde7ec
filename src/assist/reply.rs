//! Assistant reply parsing
//!
//! Splits a raw assistant reply into the user-facing message and the board
//! directives it carries. Directives arrive as a JSON payload, fenced in
//! markdown or sitting brace-balanced at the start of the text, with prose
//! confirmation patterns as the fallback for replies that announce an action
//! without emitting the payload.

use crate::assist::patterns;
use crate::types::quadrant::Quadrant;
use serde::{Deserialize, Serialize};

/// Message shown when a reply was nothing but a payload
const DEFAULT_PAYLOAD_MESSAGE: &str =
    "I'd suggest reviewing the categorizations above. Does that placement work for you?";

/// A board action recovered from an assistant reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardDirective {
    Add { content: String, quadrant: Quadrant },
    Move { content: String, quadrant: Quadrant },
    Delete { content: String },
}

impl BoardDirective {
    pub fn content(&self) -> &str {
        match self {
            BoardDirective::Add { content, .. }
            | BoardDirective::Move { content, .. }
            | BoardDirective::Delete { content } => content,
        }
    }

    /// Short verb for notifications and suggestion cards
    pub fn verb(&self) -> &'static str {
        match self {
            BoardDirective::Add { .. } => "Add",
            BoardDirective::Move { .. } => "Move",
            BoardDirective::Delete { .. } => "Delete",
        }
    }
}

/// Wire shape of the embedded suggestion payload.
///
/// `add_to_quadrant` is the key the backend has always emitted; move and
/// delete use the matching keys. Item fields are lenient: quadrant words go
/// through `Quadrant::parse_lenient`, delete items may be bare strings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SuggestionPayload {
    #[serde(default)]
    pub add_to_quadrant: Vec<AddSuggestion>,
    #[serde(default)]
    pub move_thought: Vec<MoveSuggestion>,
    #[serde(default)]
    pub delete_thought: Vec<DeleteSuggestion>,
}

impl SuggestionPayload {
    pub fn is_empty(&self) -> bool {
        self.add_to_quadrant.is_empty()
            && self.move_thought.is_empty()
            && self.delete_thought.is_empty()
    }

    /// Convert the payload into directives, dropping items with unknown
    /// quadrant words or empty thought text.
    pub fn directives(&self) -> Vec<BoardDirective> {
        let mut out = Vec::new();

        for item in &self.add_to_quadrant {
            let content = item.thought.trim();
            if content.is_empty() {
                continue;
            }
            if let Some(quadrant) = Quadrant::parse_lenient(&item.quadrant) {
                out.push(BoardDirective::Add {
                    content: content.to_string(),
                    quadrant,
                });
            }
        }

        for item in &self.move_thought {
            let content = item.thought.trim();
            if content.is_empty() {
                continue;
            }
            if let Some(quadrant) = Quadrant::parse_lenient(&item.quadrant) {
                out.push(BoardDirective::Move {
                    content: content.to_string(),
                    quadrant,
                });
            }
        }

        for item in &self.delete_thought {
            let content = item.content().trim();
            if !content.is_empty() {
                out.push(BoardDirective::Delete {
                    content: content.to_string(),
                });
            }
        }

        out
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddSuggestion {
    pub quadrant: String,
    pub thought: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveSuggestion {
    pub thought: String,
    #[serde(alias = "to_quadrant")]
    pub quadrant: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DeleteSuggestion {
    Text(String),
    Item { thought: String },
}

impl DeleteSuggestion {
    pub fn content(&self) -> &str {
        match self {
            DeleteSuggestion::Text(text) => text,
            DeleteSuggestion::Item { thought } => thought,
        }
    }
}

/// Result of parsing one assistant reply
#[derive(Debug, Clone, Default)]
pub struct ParsedReply {
    /// User-facing message with any payload stripped
    pub message: String,
    pub directives: Vec<BoardDirective>,
}

/// Parse an assistant reply.
///
/// `last_user_input` feeds the bare confirmation form ("The goal has been
/// added") which names no thought text of its own.
pub fn parse_reply(text: &str, last_user_input: Option<&str>) -> ParsedReply {
    let (payload, message) = extract_payload(text);
    let had_payload = payload.is_some();

    let mut directives = payload
        .as_ref()
        .map(SuggestionPayload::directives)
        .unwrap_or_default();

    // Prose confirmations fill in whatever the payload did not carry. The
    // scans run over the original text so confirmations sitting before a
    // fenced payload still match.
    if !directives
        .iter()
        .any(|d| matches!(d, BoardDirective::Add { .. }))
    {
        directives.extend(patterns::scan_add(text, last_user_input));
    }
    if !directives
        .iter()
        .any(|d| matches!(d, BoardDirective::Move { .. }))
    {
        directives.extend(patterns::scan_move(text));
    }
    if !directives
        .iter()
        .any(|d| matches!(d, BoardDirective::Delete { .. }))
    {
        directives.extend(patterns::scan_delete(text));
    }

    let message = if message.is_empty() && had_payload {
        DEFAULT_PAYLOAD_MESSAGE.to_string()
    } else {
        message
    };

    ParsedReply {
        message,
        directives,
    }
}

/// Split a reply into its suggestion payload (if any) and the remaining
/// user-facing message.
fn extract_payload(text: &str) -> (Option<SuggestionPayload>, String) {
    let trimmed = text.trim();

    if let Some((inner, before, after)) = extract_fenced_block(trimmed) {
        if let Ok(payload) = serde_json::from_str::<SuggestionPayload>(inner.trim()) {
            let message = join_nonempty(before.trim(), after.trim());
            return (Some(payload), message);
        }
    }

    if trimmed.starts_with('{') {
        if let Some(end) = balanced_object_end(trimmed) {
            let (json_part, rest) = trimmed.split_at(end);
            if let Ok(payload) = serde_json::from_str::<SuggestionPayload>(json_part) {
                return (Some(payload), rest.trim().to_string());
            }
        }
    }

    (None, trimmed.to_string())
}

/// First ``` fenced block, with the text before and after it. The language
/// tag line, if any, is dropped.
fn extract_fenced_block(text: &str) -> Option<(&str, &str, &str)> {
    let open = text.find("```")?;
    let before = &text[..open];
    let rest = &text[open + 3..];
    let body = match rest.find('\n') {
        Some(newline) if rest[..newline].trim().chars().all(char::is_alphanumeric) => {
            &rest[newline + 1..]
        }
        _ => rest,
    };
    let close = body.find("```")?;
    let after = &body[close + 3..];
    Some((&body[..close], before, after))
}

/// Byte offset one past the close of a `{...}` object starting the text,
/// with string-aware brace counting. `None` when the object never closes.
fn balanced_object_end(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escape = false;

    for (i, ch) in text.char_indices() {
        if in_string {
            if escape {
                escape = false;
            } else if ch == '\\' {
                escape = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }

        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(i + ch.len_utf8());
                }
            }
            _ => {}
        }
    }

    None
}

fn join_nonempty(a: &str, b: &str) -> String {
    match (a.is_empty(), b.is_empty()) {
        (true, true) => String::new(),
        (false, true) => a.to_string(),
        (true, false) => b.to_string(),
        (false, false) => format!("{a} {b}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leading_payload_and_message() {
        let reply = r#"{"add_to_quadrant": [{"quadrant": "plan", "thought": "Cut scope"}]}

Here's how I'd proceed."#;
        let parsed = parse_reply(reply, None);
        assert_eq!(parsed.message, "Here's how I'd proceed.");
        assert_eq!(
            parsed.directives,
            vec![BoardDirective::Add {
                content: "Cut scope".to_string(),
                quadrant: Quadrant::Plan,
            }]
        );
    }

    #[test]
    fn test_fenced_payload() {
        let reply = "Let me place those for you.\n```json\n{\"add_to_quadrant\": [{\"quadrant\": \"goals\", \"thought\": \"Ship the beta\"}]}\n```\nDoes that look right?";
        let parsed = parse_reply(reply, None);
        assert_eq!(
            parsed.message,
            "Let me place those for you. Does that look right?"
        );
        assert_eq!(
            parsed.directives,
            vec![BoardDirective::Add {
                content: "Ship the beta".to_string(),
                quadrant: Quadrant::Goal,
            }]
        );
    }

    #[test]
    fn test_payload_only_gets_default_message() {
        let reply = r#"{"add_to_quadrant": [{"quadrant": "status", "thought": "Two engineers out"}]}"#;
        let parsed = parse_reply(reply, None);
        assert_eq!(parsed.message, super::DEFAULT_PAYLOAD_MESSAGE);
        assert_eq!(parsed.directives.len(), 1);
    }

    #[test]
    fn test_move_and_delete_payload_keys() {
        let reply = r#"{"move_thought": [{"thought": "Cut scope", "to_quadrant": "analysis"}],
                        "delete_thought": ["Old idea", {"thought": "Stale note"}]}
Done."#;
        let parsed = parse_reply(reply, None);
        assert_eq!(
            parsed.directives,
            vec![
                BoardDirective::Move {
                    content: "Cut scope".to_string(),
                    quadrant: Quadrant::Analysis,
                },
                BoardDirective::Delete {
                    content: "Old idea".to_string(),
                },
                BoardDirective::Delete {
                    content: "Stale note".to_string(),
                },
            ]
        );
        assert_eq!(parsed.message, "Done.");
    }

    #[test]
    fn test_prose_confirmation_fallback() {
        let reply = "Great. 'Hire a contractor' has been added to the plan quadrant.";
        let parsed = parse_reply(reply, None);
        assert_eq!(
            parsed.directives,
            vec![BoardDirective::Add {
                content: "Hire a contractor".to_string(),
                quadrant: Quadrant::Plan,
            }]
        );
        // The prose stays visible; only payloads are stripped
        assert!(parsed.message.contains("Hire a contractor"));
    }

    #[test]
    fn test_payload_suppresses_prose_scan_of_same_kind() {
        // A reply both emitting the payload and narrating the add must not
        // produce the add twice.
        let reply = r#"{"add_to_quadrant": [{"quadrant": "plan", "thought": "Cut scope"}]}
'Cut scope' has been added to the plan quadrant."#;
        let parsed = parse_reply(reply, None);
        assert_eq!(parsed.directives.len(), 1);
    }

    #[test]
    fn test_bare_confirmation_uses_last_user_input() {
        let reply = "The goal has been added.";
        let parsed = parse_reply(reply, Some("double revenue by Q3"));
        assert_eq!(
            parsed.directives,
            vec![BoardDirective::Add {
                content: "double revenue by Q3".to_string(),
                quadrant: Quadrant::Goal,
            }]
        );

        // Without a user turn to borrow text from there is nothing to add
        assert!(parse_reply(reply, None).directives.is_empty());
    }

    #[test]
    fn test_unknown_quadrant_word_is_dropped() {
        let reply = r#"{"add_to_quadrant": [{"quadrant": "backlog", "thought": "x"},
                                            {"quadrant": "plan", "thought": "y"}]} ok"#;
        let parsed = parse_reply(reply, None);
        assert_eq!(parsed.directives.len(), 1);
        assert_eq!(parsed.directives[0].content(), "y");
    }

    #[test]
    fn test_plain_reply_passes_through() {
        let reply = "What would you like to explore next?";
        let parsed = parse_reply(reply, None);
        assert!(parsed.directives.is_empty());
        assert_eq!(parsed.message, reply);
    }

    #[test]
    fn test_unclosed_brace_is_not_a_payload() {
        let reply = "{\"add_to_quadrant\": [ oops, never closed";
        let parsed = parse_reply(reply, None);
        assert!(parsed.directives.is_empty());
        assert_eq!(parsed.message, reply);
    }

    #[test]
    fn test_braces_inside_strings_are_ignored() {
        let reply = r#"{"add_to_quadrant": [{"quadrant": "goal", "thought": "use {curly} style"}]} fine"#;
        let parsed = parse_reply(reply, None);
        assert_eq!(parsed.directives[0].content(), "use {curly} style");
        assert_eq!(parsed.message, "fine");
    }
}
