//! Thought card
//!
//! A single thought with its controls: inline edit, a move select, delete,
//! and drag-to-move (press on the card, release over a quadrant).

use crate::app::AppState;
use crate::types::quadrant::Quadrant;
use crate::types::thought::Thought;
use crate::ui::board::quadrant::move_thought_flow;
use crate::ui::components::confirm_dialog::confirm_delete_thought;
use dioxus::prelude::*;

/// Push an edited thought to the backend, then mirror it locally. A draft
/// that is empty or unchanged is treated as a cancel.
fn submit_edit(
    app_state: AppState,
    thought_id: String,
    original: String,
    mut editing: Signal<bool>,
    draft: Signal<String>,
) {
    let new_content = draft.peek().trim().to_string();
    editing.set(false);
    if new_content.is_empty() || new_content == original.trim() {
        return;
    }

    let mut app_state = app_state;
    spawn(async move {
        match app_state.api.edit_thought(&thought_id, &new_content).await {
            Ok(()) => {
                app_state.board.write().rewrite(&thought_id, new_content);
                app_state.notify("Thought updated!", false);
            }
            Err(err) => app_state.notify_api_error("Failed to update thought", &err),
        }
    });
}

#[component]
pub fn ThoughtCard(thought: Thought) -> Element {
    let app_state = use_context::<AppState>();
    let mut dragging = app_state.dragging;
    let mut editing = use_signal(|| false);
    let mut draft = use_signal(String::new);

    let thought_id = thought.id.clone();
    let content = thought.content.clone();
    let current_quadrant = thought.quadrant;

    let start_edit = {
        let content = content.clone();
        move |_| {
            draft.set(content.clone());
            editing.set(true);
        }
    };

    let save_on_click = {
        let app_state = app_state.clone();
        let thought_id = thought_id.clone();
        let content = content.clone();
        move |_| {
            submit_edit(
                app_state.clone(),
                thought_id.clone(),
                content.clone(),
                editing,
                draft,
            );
        }
    };

    let save_on_key = {
        let app_state = app_state.clone();
        let thought_id = thought_id.clone();
        let content = content.clone();
        move |evt: KeyboardEvent| {
            if evt.key() == Key::Enter {
                submit_edit(
                    app_state.clone(),
                    thought_id.clone(),
                    content.clone(),
                    editing,
                    draft,
                );
            } else if evt.key() == Key::Escape {
                editing.set(false);
            }
        }
    };

    let on_move_select = {
        let app_state = app_state.clone();
        let thought_id = thought_id.clone();
        move |evt: FormEvent| {
            if let Some(target) = Quadrant::parse_lenient(&evt.value()) {
                if target != current_quadrant {
                    move_thought_flow(&app_state, thought_id.clone(), target);
                }
            }
        }
    };

    let on_delete = {
        let app_state = app_state.clone();
        let thought_id = thought_id.clone();
        move |_| confirm_delete_thought(&app_state, thought_id.clone())
    };

    let on_mouse_down = {
        let thought_id = thought_id.clone();
        move |_| dragging.set(Some(thought_id.clone()))
    };

    rsx! {
        li {
            class: "thought-item",
            onmousedown: on_mouse_down,

            if editing() {
                div {
                    class: "thought-edit",
                    input {
                        class: "thought-edit-input",
                        value: "{draft}",
                        autofocus: true,
                        oninput: move |evt| draft.set(evt.value()),
                        onkeydown: save_on_key,
                    }
                    button { class: "btn-small", onclick: save_on_click, "Save" }
                }
            } else {
                span { class: "thought-content", "{content}" }
                div {
                    class: "thought-controls",
                    button {
                        class: "icon-button",
                        title: "Edit",
                        onclick: start_edit,
                        "✏️"
                    }
                    select {
                        class: "move-select",
                        onchange: on_move_select,
                        option { value: "", selected: true, "Move to..." }
                        for q in Quadrant::ALL {
                            if q != current_quadrant {
                                option { value: "{q}", "{q.label()}" }
                            }
                        }
                    }
                    button {
                        class: "icon-button",
                        title: "Delete",
                        onclick: on_delete,
                        "🗑️"
                    }
                }
            }
        }
    }
}
