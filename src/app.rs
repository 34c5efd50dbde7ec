//! Root Dioxus application component
//!
//! This module contains the main App component, the shared application
//! state, and the startup sequence (CSRF scrape, board restore).

use crate::api::{ApiClient, ApiError};
use crate::assist::conversation::ConversationLog;
use crate::assist::Reconciler;
use crate::board::BoardState;
use crate::storage::panel::{load_panel_state, save_panel_state, PanelState};
use crate::storage::settings::{load_settings, save_settings, AppSettings};
use crate::types::board::BoardSummary;
use crate::ui::chat::message::FeedItem;
use crate::ui::components::confirm_dialog::ConfirmRequest;
use crate::ui::Layout;
use dioxus::prelude::*;
use std::sync::Arc;

/// A transient toast notification
#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    pub id: u64,
    pub text: String,
    pub is_error: bool,
}

/// Global application state shared across components
#[derive(Clone)]
pub struct AppState {
    pub api: Arc<ApiClient>,
    pub reconciler: Arc<Reconciler>,
    pub board: Signal<BoardState>,
    pub boards: Signal<Vec<BoardSummary>>,
    pub conversation: Signal<ConversationLog>,
    /// Rendered chat feed; holds suggestion cards alongside the transcript
    pub feed: Signal<Vec<FeedItem>>,
    pub settings: Signal<AppSettings>,
    pub panel: Signal<PanelState>,
    pub notices: Signal<Vec<Notice>>,
    pub confirm: Signal<Option<ConfirmRequest>>,
    /// Thought id being dragged between quadrants, if any
    pub dragging: Signal<Option<String>>,
    notice_seq: Signal<u64>,
}

impl AppState {
    pub fn new() -> Self {
        tracing::info!("AppState initialized");
        let settings = load_settings();

        Self {
            api: Arc::new(ApiClient::new(&settings.server_url)),
            reconciler: Arc::new(Reconciler::new()),
            board: Signal::new(BoardState::default()),
            boards: Signal::new(Vec::new()),
            conversation: Signal::new(ConversationLog::default()),
            feed: Signal::new(Vec::new()),
            settings: Signal::new(settings),
            panel: Signal::new(load_panel_state()),
            notices: Signal::new(Vec::new()),
            confirm: Signal::new(None),
            dragging: Signal::new(None),
            notice_seq: Signal::new(0),
        }
    }

    /// Show a transient toast; it clears itself after three seconds.
    pub fn notify(&self, text: impl Into<String>, is_error: bool) {
        let mut notices = self.notices;
        let mut seq = self.notice_seq;
        let id = {
            let mut seq = seq.write();
            *seq += 1;
            *seq
        };
        notices.write().push(Notice {
            id,
            text: text.into(),
            is_error,
        });
        spawn(async move {
            tokio::time::sleep(std::time::Duration::from_secs(3)).await;
            notices.write().retain(|n| n.id != id);
        });
    }

    /// Report an API failure; quota exhaustion gets its dedicated message.
    pub fn notify_api_error(&self, context: &str, err: &ApiError) {
        tracing::error!("{context}: {err}");
        match err {
            ApiError::QuotaExhausted => self.notify(err.to_string(), true),
            _ => self.notify(format!("{context}: {err}"), true),
        }
    }

    /// Persist the current settings, logging failures.
    pub fn persist_settings(&self) {
        if let Err(e) = save_settings(&self.settings.peek()) {
            tracing::warn!("Failed to save settings: {e}");
        }
    }

    /// Persist the chat panel state, logging failures.
    pub fn persist_panel(&self) {
        if let Err(e) = save_panel_state(*self.panel.peek()) {
            tracing::warn!("Failed to save panel state: {e}");
        }
    }
}

/// Switch the app onto a board: fetch its full contents, swap the mirror,
/// reload the cached conversation, and remember it for the next start.
pub async fn open_board(app_state: &AppState, board_id: &str) {
    let mut app_state = app_state.clone();
    match app_state.api.export_board(board_id).await {
        Ok(export) => {
            let mut board = BoardState::new(board_id, export.title);
            board.replace_all(export.thoughts);
            tracing::info!("Opened board {board_id} ({} thoughts)", board.len());
            app_state.board.set(board);

            let log = ConversationLog::load(board_id);
            app_state.feed.set(crate::ui::chat::message::feed_from_log(&log));
            app_state.conversation.set(log);
            app_state.reconciler.reset();

            {
                let mut settings = app_state.settings.write();
                settings.last_board_id = Some(board_id.to_string());
            }
            app_state.persist_settings();
        }
        Err(err) => app_state.notify_api_error("Failed to load board", &err),
    }
}

/// Re-fetch the current board's thoughts into the mirror, for flows where
/// the server changed the board behind the client (auto-categorization).
pub async fn refresh_board(app_state: &AppState) {
    let mut app_state = app_state.clone();
    let board_id = app_state.board.peek().id.clone();
    if board_id.is_empty() {
        return;
    }
    match app_state.api.export_board(&board_id).await {
        Ok(export) => {
            let mut board = app_state.board.write();
            board.name = export.title;
            board.replace_all(export.thoughts);
        }
        Err(err) => app_state.notify_api_error("Failed to refresh board", &err),
    }
}

/// Refresh the board list from the server.
pub async fn refresh_boards(app_state: &AppState) {
    let mut app_state = app_state.clone();
    match app_state.api.list_boards().await {
        Ok(boards) => app_state.boards.set(boards),
        Err(err) => app_state.notify_api_error("Failed to load boards", &err),
    }
}

#[component]
pub fn App() -> Element {
    let app_state = AppState::new();
    use_context_provider(|| app_state);

    {
        let app_state = use_context::<AppState>();
        use_effect(move || {
            let app_state = app_state.clone();
            spawn(async move {
                if let Err(e) = app_state.api.refresh_csrf_token().await {
                    tracing::warn!("CSRF token refresh failed: {e}");
                }
                refresh_boards(&app_state).await;
                let last_board = app_state.settings.peek().last_board_id.clone();
                if let Some(board_id) = last_board {
                    open_board(&app_state, &board_id).await;
                }
            });
        });
    }

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("/assets/main.css") }
        Layout {}
    }
}
