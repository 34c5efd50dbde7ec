//! Interactive mode panel
//!
//! The chat panel where the user converses with the facilitator AI. Every
//! assistant turn runs through the reconciliation layer: parse the reply,
//! filter directives, then either render suggestion cards or auto-apply,
//! depending on settings. The panel minimizes to a floating icon and its
//! open state persists across restarts.

pub mod input;
pub mod message;

use crate::api::assist::AssistTurn;
use crate::app::AppState;
use crate::assist::conversation::RESET_NOTICE;
use crate::assist::filter::filter_directives;
use crate::assist::reconciler::commit;
use crate::assist::reply::{parse_reply, BoardDirective};
use crate::assist::ApplyOutcome;
use crate::types::message::{ChatMessage, HistoryTurn};
use dioxus::prelude::*;
use input::ChatInput;
use message::{FeedItem, FeedView, SuggestionEntry};

/// Message used when the backend sent suggestions without any reply text
const CATEGORIZED_MESSAGE: &str =
    "I've categorized your input. What would you like to explore next?";

const CONTACT_ERROR: &str = "Error contacting AI. Please try again.";

/// Reset the conversation everywhere: local transcript, cache, feed,
/// reconciler session, and the server-side history.
pub fn reset_conversation_flow(app_state: &AppState) {
    let mut app_state = app_state.clone();
    spawn(async move {
        let board_id = app_state.board.peek().id.clone();
        if board_id.is_empty() {
            return;
        }
        app_state.conversation.write().reset();
        app_state
            .feed
            .set(vec![FeedItem::Status(RESET_NOTICE.to_string())]);
        app_state.reconciler.reset();

        match app_state.api.reset_conversation(&board_id).await {
            Ok(()) => app_state.notify("Interactive conversation has been reset", false),
            Err(err) => app_state.notify_api_error("Failed to reset conversation", &err),
        }
    });
}

fn clear_reset_notice(feed: &mut Vec<FeedItem>) {
    if feed.len() == 1 {
        if let FeedItem::Status(text) = &feed[0] {
            if text == RESET_NOTICE {
                feed.clear();
            }
        }
    }
}

/// First exchange of a fresh conversation: empty input plus the current
/// quadrants; the backend answers with its greeting or categorization.
fn init_conversation(app_state: &AppState, mut busy: Signal<bool>) {
    busy.set(true);
    let mut app_state = app_state.clone();
    spawn(async move {
        let board_id = app_state.board.peek().id.clone();
        if board_id.is_empty() {
            app_state.feed.write().push(FeedItem::Status(
                "No board selected. Please select a board first.".to_string(),
            ));
            busy.set(false);
            return;
        }

        let snapshot = app_state.board.peek().snapshot();
        let result = app_state
            .api
            .interactive_gaps(&board_id, "", &snapshot, &[])
            .await;
        match result {
            Ok(turn) => handle_turn(&app_state, turn, None).await,
            Err(err) => {
                app_state.notify_api_error("Interactive mode", &err);
                app_state
                    .feed
                    .write()
                    .push(FeedItem::Status(CONTACT_ERROR.to_string()));
            }
        }
        busy.set(false);
    });
}

/// One user turn of the conversation.
fn send_message(app_state: &AppState, mut busy: Signal<bool>, text: String) {
    let mut app_state = app_state.clone();
    spawn(async move {
        let board_id = app_state.board.peek().id.clone();
        if board_id.is_empty() || text.trim().is_empty() {
            return;
        }

        busy.set(true);
        app_state.conversation.write().push_user(&text);
        {
            let mut feed = app_state.feed.write();
            clear_reset_notice(&mut feed);
            feed.push(FeedItem::User(text.clone()));
        }

        let snapshot = app_state.board.peek().snapshot();
        let messages: Vec<ChatMessage> = app_state.conversation.peek().messages().to_vec();
        let history: Vec<HistoryTurn> = messages.iter().map(HistoryTurn::from).collect();

        let result = app_state
            .api
            .interactive_gaps(&board_id, &text, &snapshot, &history)
            .await;
        match result {
            Ok(turn) => handle_turn(&app_state, turn, Some(&text)).await,
            Err(err) => {
                app_state.notify_api_error("Interactive mode", &err);
                app_state
                    .feed
                    .write()
                    .push(FeedItem::Status(CONTACT_ERROR.to_string()));
            }
        }
        busy.set(false);
    });
}

/// Reconcile one assistant turn into the transcript, the feed, and board
/// directives.
async fn handle_turn(app_state: &AppState, turn: AssistTurn, user_text: Option<&str>) {
    let mut app_state = app_state.clone();
    let reply_text = turn.reply.unwrap_or_default();
    let mut directives = turn.suggestions.directives();

    if reply_text.trim().is_empty() && directives.is_empty() {
        app_state
            .feed
            .write()
            .push(FeedItem::Status("No response from AI.".to_string()));
        return;
    }

    let last_user = user_text.map(String::from).or_else(|| {
        app_state
            .conversation
            .peek()
            .last_user_input()
            .map(String::from)
    });

    let message = if reply_text.trim().is_empty() {
        // Suggestions without reply text: categorization happened silently
        CATEGORIZED_MESSAGE.to_string()
    } else {
        let parsed = parse_reply(&reply_text, last_user.as_deref());
        directives.extend(parsed.directives);
        parsed.message
    };

    app_state.conversation.write().push_assistant(&message);
    {
        let mut feed = app_state.feed.write();
        clear_reset_notice(&mut feed);
        feed.push(FeedItem::Assistant(message));
    }

    let directives = filter_directives(directives);
    if directives.is_empty() {
        return;
    }

    if app_state.settings.peek().auto_apply_suggestions {
        app_state
            .feed
            .write()
            .push(FeedItem::Status("Adding items to quadrants...".to_string()));
        auto_apply(&app_state, directives).await;
    } else {
        app_state.feed.write().push(FeedItem::Suggestions(
            directives.into_iter().map(SuggestionEntry::pending).collect(),
        ));
    }
}

/// Apply a whole batch of directives immediately; failures and duplicates
/// never stop the rest of the batch.
async fn auto_apply(app_state: &AppState, directives: Vec<BoardDirective>) {
    let mut app_state = app_state.clone();
    let mut applied = 0usize;
    let mut skipped = 0usize;

    for directive in &directives {
        let snapshot = (*app_state.board.peek()).clone();
        match app_state
            .reconciler
            .apply(&app_state.api, &snapshot, directive)
            .await
        {
            ApplyOutcome::Applied(mutation) => {
                commit(&mut app_state.board.write(), &mutation);
                applied += 1;
            }
            ApplyOutcome::Duplicate | ApplyOutcome::NotFound => skipped += 1,
            ApplyOutcome::Failed(message) => {
                skipped += 1;
                app_state.notify(format!("Failed to save thought: {message}"), true);
            }
        }
    }

    let summary = if skipped > 0 {
        format!("✓ Applied {applied} item(s), {skipped} skipped")
    } else {
        format!("✓ Applied {applied} item(s)")
    };
    app_state.feed.write().push(FeedItem::Status(summary));
    if applied > 0 {
        app_state.notify("Thought(s) added!", false);
    }
}

#[component]
pub fn ChatPanel() -> Element {
    let app_state = use_context::<AppState>();
    let mut panel = app_state.panel;
    let busy = use_signal(|| false);
    let mut info_open = use_signal(|| false);

    // A panel restored open runs the initialization exchange as soon as a
    // board is available.
    {
        let app_state = app_state.clone();
        use_effect(move || {
            let board_loaded = app_state.board.read().is_loaded();
            let state = *app_state.panel.read();
            if board_loaded
                && state.chat_open
                && !state.chat_minimized
                && app_state.conversation.read().is_empty()
                && app_state.feed.read().is_empty()
                && !*busy.peek()
            {
                init_conversation(&app_state, busy);
            }
        });
    }

    let state = *panel.read();

    // Launcher button when the panel is fully closed
    if !state.chat_open {
        // Opening with an empty transcript triggers the init exchange via
        // the effect above.
        let open = {
            let app_state = app_state.clone();
            move |_| {
                {
                    let mut p = panel.write();
                    p.chat_open = true;
                    p.chat_minimized = false;
                }
                app_state.persist_panel();
            }
        };
        return rsx! {
            button { class: "chat-launcher", onclick: open, "💬 Interactive Mode" }
        };
    }

    // Minimized: just the floating restore icon
    if state.chat_minimized {
        let restore = {
            let app_state = app_state.clone();
            move |_| {
                panel.write().chat_minimized = false;
                app_state.persist_panel();
            }
        };
        return rsx! {
            button { class: "chat-minimized-icon", title: "Restore Interactive Mode", onclick: restore, "💬" }
        };
    }

    let minimize = {
        let app_state = app_state.clone();
        move |_| {
            panel.write().chat_minimized = true;
            app_state.persist_panel();
        }
    };

    let close = {
        let app_state = app_state.clone();
        move |_| {
            let mut p = panel.write();
            p.chat_open = false;
            p.chat_minimized = false;
            drop(p);
            app_state.persist_panel();
        }
    };

    let on_send = {
        let app_state = app_state.clone();
        move |text: String| send_message(&app_state, busy, text)
    };

    let on_reset = {
        let app_state = app_state.clone();
        move |_| {
            info_open.set(false);
            reset_conversation_flow(&app_state);
        }
    };

    rsx! {
        div {
            class: "chat-panel",

            div {
                class: "chat-header",
                h2 { "Interactive Mode" }
                div {
                    class: "chat-header-buttons",
                    div {
                        class: "chat-info",
                        button {
                            class: "icon-button",
                            title: "Info",
                            onclick: move |evt| {
                                evt.stop_propagation();
                                let open = *info_open.peek();
                                info_open.set(!open);
                            },
                            "ⓘ"
                        }
                        if info_open() {
                            div {
                                class: "menu-dropdown chat-info-dropdown",
                                a { class: "menu-item", onclick: on_reset, "Reset conversation" }
                            }
                        }
                    }
                    button { class: "icon-button", title: "Minimize", onclick: minimize, "—" }
                    button { class: "icon-button", title: "Close", onclick: close, "×" }
                }
            }

            FeedView {}

            ChatInput { on_send, busy: busy() }
        }
    }
}
