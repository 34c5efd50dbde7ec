//! Chat feed
//!
//! Feed items for the interactive panel: transcript bubbles, status lines,
//! and suggestion cards with their per-directive apply buttons.

use crate::app::AppState;
use crate::assist::conversation::ConversationLog;
use crate::assist::reconciler::commit;
use crate::assist::reply::BoardDirective;
use crate::assist::ApplyOutcome;
use crate::types::message::ChatRole;
use dioxus::prelude::*;

/// Lifecycle of one rendered suggestion
#[derive(Clone, Debug, PartialEq)]
pub enum SuggestionState {
    Pending,
    Applied,
    Duplicate,
    NotFound,
    Failed(String),
}

#[derive(Clone, Debug, PartialEq)]
pub struct SuggestionEntry {
    pub directive: BoardDirective,
    pub state: SuggestionState,
}

impl SuggestionEntry {
    pub fn pending(directive: BoardDirective) -> Self {
        Self {
            directive,
            state: SuggestionState::Pending,
        }
    }
}

/// One rendered item of the chat feed
#[derive(Clone, Debug, PartialEq)]
pub enum FeedItem {
    User(String),
    Assistant(String),
    /// Italic system line (reset notice, errors, auto-apply results)
    Status(String),
    Suggestions(Vec<SuggestionEntry>),
}

/// Rebuild the feed from a cached transcript (suggestion cards are not
/// cached; only turns survive a reload).
pub fn feed_from_log(log: &ConversationLog) -> Vec<FeedItem> {
    log.messages()
        .iter()
        .map(|m| match m.role {
            ChatRole::User => FeedItem::User(m.content.clone()),
            ChatRole::Assistant => FeedItem::Assistant(m.content.clone()),
        })
        .collect()
}

/// Apply one suggestion card entry and record the outcome on the card.
fn apply_entry(app_state: &AppState, feed_index: usize, entry_index: usize) {
    let app_state = app_state.clone();
    spawn(async move {
        let directive = {
            let feed = app_state.feed.peek();
            match feed.get(feed_index) {
                Some(FeedItem::Suggestions(entries)) => {
                    match entries.get(entry_index) {
                        Some(entry) if entry.state == SuggestionState::Pending => {
                            entry.directive.clone()
                        }
                        _ => return,
                    }
                }
                _ => return,
            }
        };

        let snapshot = (*app_state.board.peek()).clone();
        let outcome = app_state
            .reconciler
            .apply(&app_state.api, &snapshot, &directive)
            .await;

        let mut board = app_state.board;
        let new_state = match &outcome {
            ApplyOutcome::Applied(applied) => {
                commit(&mut board.write(), applied);
                match &directive {
                    BoardDirective::Add { quadrant, .. } => {
                        app_state.notify(format!("Thought added to {quadrant}!"), false)
                    }
                    BoardDirective::Move { quadrant, .. } => {
                        app_state.notify(format!("Thought moved to {quadrant}!"), false)
                    }
                    BoardDirective::Delete { .. } => app_state.notify("Thought deleted!", false),
                }
                SuggestionState::Applied
            }
            ApplyOutcome::Duplicate => SuggestionState::Duplicate,
            ApplyOutcome::NotFound => {
                app_state.notify(
                    "Only removed from suggestions. No matching thought found in quadrants.",
                    false,
                );
                SuggestionState::NotFound
            }
            ApplyOutcome::Failed(message) => {
                app_state.notify(format!("Failed to save thought: {message}"), true);
                SuggestionState::Failed(message.clone())
            }
        };

        let mut feed = app_state.feed;
        let mut items = feed.write();
        if let Some(FeedItem::Suggestions(entries)) = items.get_mut(feed_index) {
            if let Some(entry) = entries.get_mut(entry_index) {
                entry.state = new_state;
            }
        }
    });
}

#[component]
pub fn FeedView() -> Element {
    let app_state = use_context::<AppState>();
    let feed = (*app_state.feed.read()).clone();

    rsx! {
        div {
            class: "chat-feed",
            if feed.is_empty() {
                div { class: "chat-status", "Start a conversation by typing below." }
            }
            for (index, item) in feed.into_iter().enumerate() {
                match item {
                    FeedItem::User(text) => rsx! {
                        div { key: "{index}", class: "chat-message chat-user",
                            b { "You: " }
                            span { "{text}" }
                        }
                    },
                    FeedItem::Assistant(text) => rsx! {
                        div { key: "{index}", class: "chat-message chat-assistant",
                            b { "AI: " }
                            span { "{text}" }
                        }
                    },
                    FeedItem::Status(text) => rsx! {
                        div { key: "{index}", class: "chat-status", "{text}" }
                    },
                    FeedItem::Suggestions(entries) => rsx! {
                        SuggestionBlock { key: "{index}", feed_index: index, entries }
                    },
                }
            }
        }
    }
}

#[component]
fn SuggestionBlock(feed_index: usize, entries: Vec<SuggestionEntry>) -> Element {
    let app_state = use_context::<AppState>();

    rsx! {
        div {
            class: "suggestion-block",
            div { class: "suggestion-label", "AI suggests the following:" }
            for (entry_index, entry) in entries.into_iter().enumerate() {
                {
                    let app_state = app_state.clone();
                    let (prefix, body) = describe_directive(&entry.directive);
                    rsx! {
                        div {
                            key: "{entry_index}",
                            class: "suggestion-item",
                            span { class: "suggestion-quadrant", "{prefix}" }
                            span { class: "suggestion-thought", "{body}" }
                            match &entry.state {
                                SuggestionState::Pending => rsx! {
                                    button {
                                        class: "btn-small btn-primary",
                                        onclick: move |_| apply_entry(&app_state, feed_index, entry_index),
                                        "{apply_label(&entry.directive)}"
                                    }
                                },
                                SuggestionState::Applied => rsx! {
                                    span { class: "suggestion-done", "{done_label(&entry.directive)}" }
                                },
                                SuggestionState::Duplicate => rsx! {
                                    span { class: "suggestion-muted", "Already on the board" }
                                },
                                SuggestionState::NotFound => rsx! {
                                    span { class: "suggestion-muted", "No matching thought" }
                                },
                                SuggestionState::Failed(message) => rsx! {
                                    span { class: "suggestion-error", "Failed: {message}" }
                                },
                            }
                        }
                    }
                }
            }
        }
    }
}

fn describe_directive(directive: &BoardDirective) -> (String, String) {
    match directive {
        BoardDirective::Add { content, quadrant } => {
            (format!("{}:", quadrant.label()), content.clone())
        }
        BoardDirective::Move { content, quadrant } => (
            format!("Move to {}:", quadrant.label()),
            content.clone(),
        ),
        BoardDirective::Delete { content } => ("Delete:".to_string(), content.clone()),
    }
}

fn apply_label(directive: &BoardDirective) -> &'static str {
    match directive {
        BoardDirective::Add { .. } => "Add to Quadrant",
        BoardDirective::Move { .. } => "Move",
        BoardDirective::Delete { .. } => "Delete",
    }
}

fn done_label(directive: &BoardDirective) -> &'static str {
    match directive {
        BoardDirective::Add { .. } => "Added!",
        BoardDirective::Move { .. } => "Moved!",
        BoardDirective::Delete { .. } => "Deleted!",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::message::ChatMessage;
    use crate::types::quadrant::Quadrant;

    #[test]
    fn test_feed_from_empty_log() {
        let log = ConversationLog::default();
        assert!(feed_from_log(&log).is_empty());
    }

    #[test]
    fn test_turn_mapping() {
        let messages = vec![ChatMessage::user("hi"), ChatMessage::assistant("hello")];
        let feed: Vec<FeedItem> = messages
            .iter()
            .map(|m| match m.role {
                ChatRole::User => FeedItem::User(m.content.clone()),
                ChatRole::Assistant => FeedItem::Assistant(m.content.clone()),
            })
            .collect();
        assert_eq!(
            feed,
            vec![
                FeedItem::User("hi".to_string()),
                FeedItem::Assistant("hello".to_string())
            ]
        );
    }

    #[test]
    fn test_directive_labels() {
        let add = BoardDirective::Add {
            content: "x".to_string(),
            quadrant: Quadrant::Plan,
        };
        assert_eq!(apply_label(&add), "Add to Quadrant");
        assert_eq!(done_label(&add), "Added!");
        assert_eq!(describe_directive(&add).0, "Plan:");

        let delete = BoardDirective::Delete {
            content: "x".to_string(),
        };
        assert_eq!(apply_label(&delete), "Delete");
        assert_eq!(describe_directive(&delete).0, "Delete:");
    }
}
