//! Board management
//!
//! The board menu and its modals: open, create, rename, delete,
//! import/export, the summary views, and the conversation reset.

use crate::app::{open_board, refresh_boards, AppState};
use crate::storage::{get_data_dir, sanitize_file_stem, StorageError};
use crate::types::board::BoardExport;
use crate::ui::chat::reset_conversation_flow;
use crate::ui::components::confirm_dialog::confirm_delete_board;
use dioxus::prelude::*;
use std::fs;
use std::path::PathBuf;

/// Which board modal is showing
#[derive(Clone, Debug, PartialEq)]
enum BoardModal {
    Open,
    Create,
    Rename,
    Import,
    Summary { title: String, body: String },
}

fn write_export(export: &BoardExport, board_id: &str) -> Result<PathBuf, StorageError> {
    let dir = get_data_dir()?.join("exports");
    fs::create_dir_all(&dir)?;
    let stem = sanitize_file_stem(&format!("{}_{board_id}", export.title.replace(' ', "_")));
    let path = dir.join(format!("{stem}.json"));
    fs::write(&path, serde_json::to_string_pretty(export)?)?;
    Ok(path)
}

fn export_board_flow(app_state: &AppState) {
    let app_state = app_state.clone();
    spawn(async move {
        let board_id = app_state.board.peek().id.clone();
        match app_state.api.export_board(&board_id).await {
            Ok(export) => match write_export(&export, &board_id) {
                Ok(path) => {
                    app_state.notify(format!("Board exported to {}", path.display()), false)
                }
                Err(e) => app_state.notify(format!("Failed to write export: {e}"), true),
            },
            Err(err) => app_state.notify_api_error("Failed to export board", &err),
        }
    });
}

fn summary_flow(app_state: &AppState, mut modal: Signal<Option<BoardModal>>, which: &'static str) {
    let app_state = app_state.clone();
    spawn(async move {
        let board_id = app_state.board.peek().id.clone();
        let result = match which {
            "Board Summary" => app_state.api.board_summary(&board_id).await,
            "AI Summary" => app_state.api.board_ai_summary(&board_id).await,
            _ => app_state.api.board_alignment(&board_id).await,
        };
        match result {
            Ok(body) => modal.set(Some(BoardModal::Summary {
                title: which.to_string(),
                body,
            })),
            Err(err) => app_state.notify_api_error(which, &err),
        }
    });
}

#[component]
pub fn BoardMenu() -> Element {
    let app_state = use_context::<AppState>();
    let mut menu_open = use_signal(|| false);
    let modal = use_signal(|| None::<BoardModal>);

    let has_board = app_state.board.read().is_loaded();

    // Every item closes the dropdown before acting
    let item = |label: &'static str, action: MenuAction| {
        let app_state = app_state.clone();
        let mut modal = modal;
        rsx! {
            a {
                class: "menu-item",
                onclick: move |_| {
                    menu_open.set(false);
                    match &action {
                        MenuAction::Modal(m) => {
                            if matches!(m, BoardModal::Open) {
                                let app_state = app_state.clone();
                                spawn(async move { refresh_boards(&app_state).await; });
                            }
                            modal.set(Some(m.clone()));
                        }
                        MenuAction::Export => export_board_flow(&app_state),
                        MenuAction::DeleteBoard => {
                            let id = app_state.board.peek().id.clone();
                            confirm_delete_board(&app_state, id);
                        }
                        MenuAction::Summary(which) => summary_flow(&app_state, modal, *which),
                        MenuAction::ResetConversation => reset_conversation_flow(&app_state),
                    }
                },
                "{label}"
            }
        }
    };

    rsx! {
        div {
            class: "board-menu",
            button {
                class: "icon-button menu-icon",
                onclick: move |evt| {
                    evt.stop_propagation();
                    let open = *menu_open.peek();
                    menu_open.set(!open);
                },
                "☰"
            }

            if menu_open() {
                div {
                    class: "menu-dropdown",
                    onclick: |evt| evt.stop_propagation(),
                    {item("Open Board", MenuAction::Modal(BoardModal::Open))}
                    {item("Create Board", MenuAction::Modal(BoardModal::Create))}
                    if has_board {
                        {item("Rename Board", MenuAction::Modal(BoardModal::Rename))}
                        {item("Export Data", MenuAction::Export)}
                    }
                    {item("Import Data", MenuAction::Modal(BoardModal::Import))}
                    if has_board {
                        {item("Delete Board", MenuAction::DeleteBoard)}
                        div { class: "menu-separator" }
                        {item("Board Summary", MenuAction::Summary("Board Summary"))}
                        {item("AI Summary", MenuAction::Summary("AI Summary"))}
                        {item("Alignment", MenuAction::Summary("Alignment"))}
                        {item("Reset Conversation", MenuAction::ResetConversation)}
                    }
                }
            }

            BoardModals { modal }
        }
    }
}

#[derive(Clone, PartialEq)]
enum MenuAction {
    Modal(BoardModal),
    Export,
    DeleteBoard,
    Summary(&'static str),
    ResetConversation,
}

#[component]
fn BoardModals(modal: Signal<Option<BoardModal>>) -> Element {
    let app_state = use_context::<AppState>();
    let mut modal = modal;
    let mut name_input = use_signal(String::new);
    let mut path_input = use_signal(String::new);

    let Some(current) = modal.read().as_ref().cloned() else {
        return rsx! { div {} };
    };

    let close = move |_| modal.set(None);

    match current {
        BoardModal::Open => {
            let boards = (*app_state.boards.read()).clone();
            let current_id = app_state.board.read().id.clone();
            rsx! {
                div {
                    class: "modal-overlay",
                    onclick: close,
                    div {
                        class: "modal-content",
                        onclick: |evt| evt.stop_propagation(),
                        h2 { "Open Board" }
                        div {
                            class: "board-list",
                            if boards.is_empty() {
                                p { class: "muted", "No boards found. Create a new board to get started." }
                            }
                            for summary in boards {
                                {
                                    let app_state = app_state.clone();
                                    let id = summary.id.clone();
                                    let marker = if summary.id == current_id { " (current)" } else { "" };
                                    rsx! {
                                        div {
                                            key: "{summary.id}",
                                            class: "board-item",
                                            onclick: move |_| {
                                                let app_state = app_state.clone();
                                                let id = id.clone();
                                                modal.set(None);
                                                app_state.notify("Loading board...", false);
                                                spawn(async move { open_board(&app_state, &id).await; });
                                            },
                                            strong { "{summary.name}" }
                                            "{marker}"
                                            div { class: "muted", "Created: {summary.created_label()}" }
                                        }
                                    }
                                }
                            }
                        }
                        div {
                            class: "modal-buttons",
                            button { class: "btn-ghost", onclick: close, "Close" }
                        }
                    }
                }
            }
        }
        BoardModal::Create => {
            let create = {
                let app_state = app_state.clone();
                move |_| {
                    let name = name_input.peek().trim().to_string();
                    if name.is_empty() {
                        app_state.notify("Please enter a board name.", true);
                        return;
                    }
                    let app_state = app_state.clone();
                    modal.set(None);
                    name_input.set(String::new());
                    spawn(async move {
                        match app_state.api.create_board(&name).await {
                            Ok(board_id) => {
                                app_state.notify("Board created successfully!", false);
                                open_board(&app_state, &board_id).await;
                            }
                            Err(err) => {
                                app_state.notify_api_error("Failed to create board", &err)
                            }
                        }
                    });
                }
            };
            let mut create_key = create.clone();
            rsx! {
                div {
                    class: "modal-overlay",
                    onclick: close,
                    div {
                        class: "modal-content",
                        onclick: |evt| evt.stop_propagation(),
                        h2 { "Create Board" }
                        input {
                            class: "modal-input",
                            placeholder: "Board name",
                            value: "{name_input}",
                            autofocus: true,
                            oninput: move |evt| name_input.set(evt.value()),
                            onkeydown: move |evt: KeyboardEvent| {
                                if evt.key() == Key::Enter {
                                    create_key(());
                                }
                            },
                        }
                        div {
                            class: "modal-buttons",
                            button { class: "btn-ghost", onclick: close, "Cancel" }
                            button { class: "btn-primary", onclick: move |_| create.clone()(()), "Create" }
                        }
                    }
                }
            }
        }
        BoardModal::Rename => {
            let rename = {
                let app_state = app_state.clone();
                move |_| {
                    let name = name_input.peek().trim().to_string();
                    if name.is_empty() {
                        app_state.notify("Please enter a board name.", true);
                        return;
                    }
                    let app_state = app_state.clone();
                    modal.set(None);
                    name_input.set(String::new());
                    spawn(async move {
                        let board_id = app_state.board.peek().id.clone();
                        match app_state.api.rename_board(&board_id, &name).await {
                            Ok(()) => {
                                let mut board = app_state.board;
                                board.write().name = name;
                                app_state.notify("Board renamed!", false);
                                refresh_boards(&app_state).await;
                            }
                            Err(err) => {
                                app_state.notify_api_error("Failed to rename board", &err)
                            }
                        }
                    });
                }
            };
            rsx! {
                div {
                    class: "modal-overlay",
                    onclick: close,
                    div {
                        class: "modal-content",
                        onclick: |evt| evt.stop_propagation(),
                        h2 { "Rename Board" }
                        input {
                            class: "modal-input",
                            placeholder: "New board name",
                            value: "{name_input}",
                            autofocus: true,
                            oninput: move |evt| name_input.set(evt.value()),
                        }
                        div {
                            class: "modal-buttons",
                            button { class: "btn-ghost", onclick: close, "Cancel" }
                            button { class: "btn-primary", onclick: move |_| rename.clone()(()), "Rename" }
                        }
                    }
                }
            }
        }
        BoardModal::Import => {
            let import = {
                let app_state = app_state.clone();
                move |_| {
                    let path = path_input.peek().trim().to_string();
                    if path.is_empty() {
                        app_state.notify("Please enter a file path.", true);
                        return;
                    }
                    let app_state = app_state.clone();
                    modal.set(None);
                    path_input.set(String::new());
                    spawn(async move {
                        let parsed = fs::read_to_string(&path)
                            .map_err(|e| e.to_string())
                            .and_then(|json| {
                                serde_json::from_str::<BoardExport>(&json).map_err(|e| e.to_string())
                            });
                        match parsed {
                            Ok(export) => match app_state.api.import_board(&export).await {
                                Ok(board_id) => {
                                    app_state.notify("Board imported successfully!", false);
                                    open_board(&app_state, &board_id).await;
                                    refresh_boards(&app_state).await;
                                }
                                Err(err) => {
                                    app_state.notify_api_error("Failed to import board", &err)
                                }
                            },
                            Err(e) => {
                                app_state.notify(format!("Could not read board file: {e}"), true)
                            }
                        }
                    });
                }
            };
            rsx! {
                div {
                    class: "modal-overlay",
                    onclick: close,
                    div {
                        class: "modal-content",
                        onclick: |evt| evt.stop_propagation(),
                        h2 { "Import Board" }
                        p { class: "muted", "Path to a board JSON export" }
                        input {
                            class: "modal-input",
                            placeholder: "/path/to/board.json",
                            value: "{path_input}",
                            autofocus: true,
                            oninput: move |evt| path_input.set(evt.value()),
                        }
                        div {
                            class: "modal-buttons",
                            button { class: "btn-ghost", onclick: close, "Cancel" }
                            button { class: "btn-primary", onclick: move |_| import.clone()(()), "Import" }
                        }
                    }
                }
            }
        }
        BoardModal::Summary { title, body } => rsx! {
            div {
                class: "modal-overlay",
                onclick: close,
                div {
                    class: "modal-content summary-modal",
                    onclick: |evt| evt.stop_propagation(),
                    h2 { "{title}" }
                    div { class: "summary-body", "{body}" }
                    div {
                        class: "modal-buttons",
                        button { class: "btn-ghost", onclick: close, "Close" }
                    }
                }
            }
        },
    }
}
