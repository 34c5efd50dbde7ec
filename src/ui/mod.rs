//! UI components
//!
//! This module contains all user interface components built with Dioxus.

pub mod board;
pub mod boards;
pub mod chat;
pub mod components;

use crate::app::AppState;
use board::composer::Composer;
use board::BoardView;
use boards::BoardMenu;
use chat::ChatPanel;
use components::confirm_dialog::ConfirmDialog;
use components::notification::NotificationStack;
use dioxus::prelude::*;

/// Application layout: header with the board menu, the quadrant grid with
/// the composer beneath it, and the overlays (chat panel, confirm dialog,
/// toasts).
#[component]
pub fn Layout() -> Element {
    let app_state = use_context::<AppState>();
    let mut dragging = app_state.dragging;
    let board = app_state.board.read();
    let theme = app_state.settings.read().theme.clone();
    let font_size = app_state.settings.read().font_size.clone();

    let board_title = if board.is_loaded() {
        board.name.clone()
    } else {
        "No board selected".to_string()
    };
    let is_loaded = board.is_loaded();
    drop(board);

    rsx! {
        div {
            class: "app-shell",
            "data-theme": "{theme}",
            "data-font": "{font_size}",
            // Releases that never land on a quadrant end the drag
            onmouseup: move |_| {
                if dragging.peek().is_some() {
                    dragging.set(None);
                }
            },

            header {
                class: "app-header",
                h1 { class: "app-title", "GAPS Board" }
                span { class: "board-title", "{board_title}" }
                BoardMenu {}
            }

            main {
                class: "app-main",
                if is_loaded {
                    BoardView {}
                    Composer {}
                } else {
                    div {
                        class: "empty-board-hint",
                        p { "Open or create a board from the menu to get started." }
                    }
                }
            }

            ChatPanel {}
            ConfirmDialog {}
            NotificationStack {}
        }
    }
}
