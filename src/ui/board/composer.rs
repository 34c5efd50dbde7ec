//! New-thought composer
//!
//! The input under the grid. With a quadrant selected it adds directly;
//! on "Auto" the text goes to the backend categorizer, which may add
//! thoughts, ask a follow-up question (shown as the placeholder), or just
//! reply conversationally in the strip below the input.

use crate::app::{refresh_board, AppState};
use crate::assist::filter::is_meta_suggestion;
use crate::types::quadrant::Quadrant;
use dioxus::prelude::*;

const DEFAULT_PLACEHOLDER: &str = "What's on your mind? (AI will help organize your thoughts)";

#[component]
pub fn Composer() -> Element {
    let app_state = use_context::<AppState>();
    let mut text = use_signal(String::new);
    let mut target = use_signal(|| "auto".to_string());
    let mut busy = use_signal(|| false);
    let mut button_label = use_signal(|| "Add".to_string());
    let mut placeholder = use_signal(|| DEFAULT_PLACEHOLDER.to_string());
    // Conversational replies shown under the composer in auto mode
    let mut replies = use_signal(Vec::<String>::new);

    let submit = {
        let app_state = app_state.clone();
        move |_| {
            let content = text.peek().trim().to_string();
            if content.is_empty() || *busy.peek() {
                return;
            }
            let board_id = app_state.board.peek().id.clone();
            if board_id.is_empty() {
                app_state.notify("Thought and board are required!", true);
                return;
            }

            busy.set(true);
            let mut app_state = app_state.clone();
            let selected = (*target.peek()).clone();

            spawn(async move {
                match Quadrant::parse_lenient(&selected) {
                    // Manual add into the chosen quadrant
                    Some(quadrant) => {
                        button_label.set("Adding...".to_string());
                        match app_state.api.add_thought(&board_id, quadrant, &content).await {
                            Ok(thought) => {
                                app_state.board.write().insert(thought);
                                app_state.notify("Thought added!", false);
                                text.set(String::new());
                            }
                            Err(err) if err.is_duplicate() => {
                                app_state.notify(
                                    "This thought already exists in that quadrant.",
                                    true,
                                );
                            }
                            Err(err) => {
                                app_state.notify_api_error("Failed to add thought", &err)
                            }
                        }
                        button_label.set("Add".to_string());
                    }
                    // Auto: let the categorizer decide
                    None => {
                        button_label.set("Thinking...".to_string());
                        match app_state.api.ai_conversation(&board_id, &content).await {
                            Ok(outcome) => {
                                let added: Vec<String> = outcome
                                    .thoughts
                                    .iter()
                                    .map(|t| t.content().trim().to_string())
                                    .filter(|t| !t.is_empty() && !is_meta_suggestion(t))
                                    .collect();

                                if outcome.success && !added.is_empty() {
                                    text.set(String::new());
                                    placeholder.set(DEFAULT_PLACEHOLDER.to_string());
                                    app_state.notify("Thought(s) added!", false);
                                    refresh_board(&app_state).await;
                                    button_label.set("Add".to_string());
                                } else if outcome.success && outcome.followup.is_some() {
                                    let followup = outcome.followup.unwrap_or_default();
                                    text.set(String::new());
                                    placeholder.set(followup.clone());
                                    app_state.notify(format!("AI: {followup}"), false);
                                    button_label.set("Respond".to_string());
                                } else if let Some(error) = outcome.error {
                                    app_state.notify(format!("AI error: {error}"), true);
                                    button_label.set("Add".to_string());
                                } else if let Some(reply) = outcome.reply {
                                    replies.write().push(reply);
                                    text.set(String::new());
                                    placeholder.set(DEFAULT_PLACEHOLDER.to_string());
                                    button_label.set("Add".to_string());
                                } else {
                                    app_state.notify("Unexpected AI response.", true);
                                    button_label.set("Add".to_string());
                                }
                            }
                            Err(err) => {
                                app_state.notify_api_error("AI error", &err);
                                button_label.set("Add".to_string());
                            }
                        }
                    }
                }
                busy.set(false);
            });
        }
    };

    let on_keydown = {
        let mut submit = submit.clone();
        move |evt: KeyboardEvent| {
            if evt.key() == Key::Enter && !evt.modifiers().contains(Modifiers::SHIFT) {
                evt.prevent_default();
                submit(());
            }
        }
    };

    rsx! {
        div {
            class: "composer",

            div {
                class: "composer-row",
                input {
                    class: "composer-input",
                    value: "{text}",
                    placeholder: "{placeholder}",
                    oninput: move |evt| text.set(evt.value()),
                    onkeydown: on_keydown,
                }
                select {
                    class: "composer-select",
                    value: "{target}",
                    onchange: move |evt: FormEvent| target.set(evt.value()),
                    option { value: "auto", "Auto" }
                    for q in Quadrant::ALL {
                        option { value: "{q}", "{q.label()}" }
                    }
                }
                button {
                    class: "btn-primary",
                    disabled: busy(),
                    onclick: move |_| submit.clone()(()),
                    "{button_label}"
                }
            }

            if !replies.read().is_empty() {
                div {
                    class: "composer-replies",
                    for (i, reply) in replies.read().iter().enumerate() {
                        div { key: "{i}", class: "composer-reply", b { "AI: " } "{reply}" }
                    }
                }
            }
        }
    }
}
