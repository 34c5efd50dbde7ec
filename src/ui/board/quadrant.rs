//! Quadrant panel
//!
//! One cell of the grid: the quadrant title and its thoughts. Also the drop
//! target for drag moves: releasing a dragged card over a panel moves the
//! thought there.

use crate::app::AppState;
use crate::types::quadrant::Quadrant;
use crate::ui::board::thought_card::ThoughtCard;
use dioxus::prelude::*;

/// Move a thought through the backend, then mirror the move locally.
pub fn move_thought_flow(app_state: &AppState, thought_id: String, target: Quadrant) {
    let mut app_state = app_state.clone();
    spawn(async move {
        let board_id = app_state.board.peek().id.clone();
        match app_state
            .api
            .move_thought(&board_id, &thought_id, target)
            .await
        {
            Ok(()) => {
                app_state.board.write().relocate(&thought_id, target);
                app_state.notify(format!("Thought moved to {target}!"), false);
            }
            Err(err) => app_state.notify_api_error("Failed to move thought", &err),
        }
    });
}

#[component]
pub fn QuadrantPanel(quadrant: Quadrant) -> Element {
    let app_state = use_context::<AppState>();
    let mut dragging = app_state.dragging;
    let board = app_state.board.read();

    let thoughts: Vec<_> = board.in_quadrant(quadrant).cloned().collect();
    let count = thoughts.len();
    drop(board);

    let drop_ready = dragging.read().is_some();
    let panel_class = if drop_ready {
        "quadrant-panel drag-over"
    } else {
        "quadrant-panel"
    };

    let on_mouse_up = {
        let app_state = app_state.clone();
        move |_| {
            if let Some(thought_id) = dragging.write().take() {
                let already_there = app_state
                    .board
                    .peek()
                    .thought(&thought_id)
                    .map(|t| t.quadrant == quadrant)
                    .unwrap_or(true);
                if !already_there {
                    move_thought_flow(&app_state, thought_id, quadrant);
                }
            }
        }
    };

    rsx! {
        section {
            class: "{panel_class}",
            onmouseup: on_mouse_up,

            div {
                class: "quadrant-header",
                h2 { "{quadrant.label()}" }
                span { class: "quadrant-count", "{count}" }
            }

            ul {
                class: "thought-list",
                for thought in thoughts {
                    ThoughtCard { key: "{thought.id}", thought }
                }
            }
        }
    }
}
