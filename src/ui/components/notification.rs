//! Toast notifications
//!
//! Transient messages in the corner of the window; errors get the error
//! styling, and each toast removes itself after a few seconds (see
//! `AppState::notify`).

use crate::app::AppState;
use dioxus::prelude::*;

#[component]
pub fn NotificationStack() -> Element {
    let app_state = use_context::<AppState>();
    let notices = app_state.notices.read();

    if notices.is_empty() {
        return rsx! { div {} };
    }

    rsx! {
        div {
            class: "notification-stack",
            for notice in notices.iter() {
                div {
                    key: "{notice.id}",
                    class: if notice.is_error { "notification notification-error" } else { "notification" },
                    "{notice.text}"
                }
            }
        }
    }
}
