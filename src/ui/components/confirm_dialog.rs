//! Confirmation dialog
//!
//! Replaces the native confirm with an in-app modal carrying a "don't ask
//! again for deletions" checkbox. The opt-out persists in settings and
//! short-circuits future delete confirmations.

use crate::app::{refresh_boards, AppState};
use crate::board::BoardState;
use dioxus::prelude::*;

/// What the dialog will do on confirm
#[derive(Clone, Debug, PartialEq)]
pub enum ConfirmAction {
    DeleteThought { id: String },
    DeleteBoard { id: String },
}

/// A pending confirmation
#[derive(Clone, Debug, PartialEq)]
pub struct ConfirmRequest {
    pub message: String,
    pub show_checkbox: bool,
    pub action: ConfirmAction,
}

/// Ask before deleting a thought, unless the user opted out of delete
/// confirmations.
pub fn confirm_delete_thought(app_state: &AppState, id: String) {
    if app_state.settings.peek().skip_delete_confirm {
        run_action(app_state.clone(), ConfirmAction::DeleteThought { id });
        return;
    }
    let mut confirm = app_state.confirm;
    confirm.set(Some(ConfirmRequest {
        message: "Are you sure you want to delete this thought?".to_string(),
        show_checkbox: true,
        action: ConfirmAction::DeleteThought { id },
    }));
}

/// Ask before deleting a board. Board deletion always confirms; the opt-out
/// only covers thought deletions.
pub fn confirm_delete_board(app_state: &AppState, id: String) {
    let mut confirm = app_state.confirm;
    confirm.set(Some(ConfirmRequest {
        message: "Are you sure you want to delete this board? This action cannot be undone."
            .to_string(),
        show_checkbox: false,
        action: ConfirmAction::DeleteBoard { id },
    }));
}

fn run_action(app_state: AppState, action: ConfirmAction) {
    let mut app_state = app_state;
    spawn(async move {
        match action {
            ConfirmAction::DeleteThought { id } => {
                match app_state.api.delete_thought(&id).await {
                    Ok(()) => {
                        app_state.board.write().remove(&id);
                        app_state.notify("Thought deleted!", false);
                    }
                    Err(err) => app_state.notify_api_error("Failed to delete thought", &err),
                }
            }
            ConfirmAction::DeleteBoard { id } => {
                match app_state.api.delete_board(&id).await {
                    Ok(()) => {
                        if app_state.board.peek().id == id {
                            app_state.board.set(BoardState::default());
                            let mut settings = app_state.settings.write();
                            settings.last_board_id = None;
                            drop(settings);
                            app_state.persist_settings();
                        }
                        app_state.notify("Board deleted successfully!", false);
                        refresh_boards(&app_state).await;
                    }
                    Err(err) => app_state.notify_api_error("Failed to delete board", &err),
                }
            }
        }
    });
}

#[component]
pub fn ConfirmDialog() -> Element {
    let app_state = use_context::<AppState>();
    let mut confirm = app_state.confirm;
    let mut dont_ask = use_signal(|| false);

    let Some(request) = confirm.read().as_ref().cloned() else {
        return rsx! { div {} };
    };

    let on_cancel = move |_| {
        dont_ask.set(false);
        confirm.set(None);
    };

    let on_ok = {
        let mut app_state = app_state.clone();
        let request = request.clone();
        move |_| {
            if request.show_checkbox && dont_ask() {
                let mut settings = app_state.settings.write();
                settings.skip_delete_confirm = true;
                drop(settings);
                app_state.persist_settings();
            }
            dont_ask.set(false);
            confirm.set(None);
            run_action(app_state.clone(), request.action.clone());
        }
    };

    rsx! {
        div {
            class: "modal-overlay",
            onclick: on_cancel,

            div {
                class: "modal-content confirm-modal",
                onclick: |evt| evt.stop_propagation(),

                p { class: "confirm-message", "{request.message}" }

                if request.show_checkbox {
                    label {
                        class: "confirm-checkbox",
                        input {
                            r#type: "checkbox",
                            checked: dont_ask(),
                            onchange: move |evt| dont_ask.set(evt.checked()),
                        }
                        "Don't ask again for deletions"
                    }
                }

                div {
                    class: "modal-buttons",
                    button { class: "btn-ghost", onclick: on_cancel, "Cancel" }
                    button { class: "btn-danger", onclick: on_ok, "Delete" }
                }
            }
        }
    }
}
