//! Chat input component

use dioxus::prelude::*;

/// Estimate how many rows the textarea needs based on content
fn compute_rows(text: &str) -> usize {
    let newlines = text.chars().filter(|&c| c == '\n').count();
    // Each visual line ~ 60 chars for the panel width
    let wrap_lines: usize = text
        .lines()
        .map(|line| {
            if line.is_empty() {
                0
            } else {
                (line.len().saturating_sub(1)) / 60
            }
        })
        .sum();
    let total = newlines + wrap_lines + 1;
    total.clamp(1, 6)
}

#[component]
pub fn ChatInput(on_send: EventHandler<String>, busy: bool) -> Element {
    let mut text = use_signal(String::new);

    let handle_keydown = move |evt: KeyboardEvent| {
        if evt.key() == Key::Enter && !evt.modifiers().contains(Modifiers::SHIFT) {
            evt.prevent_default();
            if !busy && !text.peek().trim().is_empty() {
                on_send.call((*text.peek()).clone());
                text.set(String::new());
            }
        }
    };

    let handle_click = move |_| {
        if !busy && !text.peek().trim().is_empty() {
            on_send.call((*text.peek()).clone());
            text.set(String::new());
        }
    };

    let can_send = !busy && !text.read().trim().is_empty();
    let rows = compute_rows(&text.read());

    rsx! {
        div {
            class: "chat-input-row",
            textarea {
                class: "chat-input",
                rows: "{rows}",
                placeholder: "Ask the facilitator...",
                value: "{text}",
                oninput: move |evt| text.set(evt.value()),
                onkeydown: handle_keydown,
            }
            button {
                class: if can_send { "btn-primary chat-send" } else { "btn-primary chat-send disabled" },
                disabled: !can_send,
                title: "Send (Enter)",
                onclick: handle_click,
                if busy { "..." } else { "Send" }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_rows() {
        assert_eq!(compute_rows(""), 1);
        assert_eq!(compute_rows("short line"), 1);
        assert_eq!(compute_rows("a\nb\nc"), 3);
        // A long single line wraps
        let long = "x".repeat(200);
        assert!(compute_rows(&long) > 1);
        // Never taller than the cap
        let very_long = "y\n".repeat(50);
        assert_eq!(compute_rows(&very_long), 6);
    }
}
