//! Prose confirmation patterns
//!
//! The assistant sometimes announces an action conversationally instead of
//! emitting the JSON payload ("'X' has been added to the plan quadrant").
//! These scans recover the directive from that phrasing. Scans are
//! sequential and first-match-wins per action kind; quadrant words go
//! through the lenient parser.

use crate::assist::reply::BoardDirective;
use crate::types::quadrant::Quadrant;
use once_cell::sync::Lazy;
use regex::Regex;

static ADD_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r#"(?i)['"](.+?)['"] has been added to the (\w+) quadrant"#,
        r#"(?i)['"](.+?)['"] was added to the (\w+) quadrant"#,
        r#"(?i)['"](.+?)['"] has been added as (?:a |an )?(\w+)"#,
        r#"(?i)['"](.+?)['"] was added as (?:a |an )?(\w+)"#,
        r#"(?i)added ['"](.+?)['"] to the (\w+) quadrant"#,
        r#"(?i)added ['"](.+?)['"] as (?:a |an )?(\w+)"#,
    ]
    .iter()
    .map(|pat| Regex::new(pat).expect("add confirmation pattern"))
    .collect()
});

/// Bare confirmation naming only the quadrant; the thought text comes from
/// the user's last message.
static ADD_BARE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:the )?(goal|status|analysis|plan) has been added\.?")
        .expect("bare add confirmation pattern")
});

static MOVE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r#"(?i)moved ['"](.+?)['"] to the (\w+) quadrant"#,
        r#"(?i)['"](.+?)['"] has been moved to (?:the )?(\w+)"#,
        r#"(?i)['"](.+?)['"] was moved to (?:the )?(\w+)"#,
    ]
    .iter()
    .map(|pat| Regex::new(pat).expect("move confirmation pattern"))
    .collect()
});

static DELETE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r#"(?i)removed ['"](.+?)['"] from the \w+ quadrant"#,
        r#"(?i)deleted ['"](.+?)['"]"#,
        r#"(?i)['"](.+?)['"] has been (?:deleted|removed)"#,
        r#"(?i)['"](.+?)['"] was (?:deleted|removed)"#,
    ]
    .iter()
    .map(|pat| Regex::new(pat).expect("delete confirmation pattern"))
    .collect()
});

/// Scan for an add confirmation.
pub fn scan_add(text: &str, last_user_input: Option<&str>) -> Option<BoardDirective> {
    for pattern in ADD_PATTERNS.iter() {
        if let Some(caps) = pattern.captures(text) {
            let content = caps[1].trim().to_string();
            let quadrant = Quadrant::parse_lenient(&caps[2])?;
            if content.is_empty() {
                return None;
            }
            return Some(BoardDirective::Add { content, quadrant });
        }
    }

    if let Some(caps) = ADD_BARE.captures(text) {
        let quadrant = Quadrant::parse_lenient(&caps[1])?;
        let content = last_user_input?.trim().to_string();
        if content.is_empty() {
            return None;
        }
        return Some(BoardDirective::Add { content, quadrant });
    }

    None
}

/// Scan for a move confirmation.
pub fn scan_move(text: &str) -> Option<BoardDirective> {
    for pattern in MOVE_PATTERNS.iter() {
        if let Some(caps) = pattern.captures(text) {
            let content = caps[1].trim().to_string();
            let quadrant = Quadrant::parse_lenient(&caps[2])?;
            if content.is_empty() {
                return None;
            }
            return Some(BoardDirective::Move { content, quadrant });
        }
    }
    None
}

/// Scan for a delete confirmation.
pub fn scan_delete(text: &str) -> Option<BoardDirective> {
    for pattern in DELETE_PATTERNS.iter() {
        if let Some(caps) = pattern.captures(text) {
            let content = caps[1].trim().to_string();
            if content.is_empty() {
                return None;
            }
            return Some(BoardDirective::Delete { content });
        }
    }
    None
}
