//! Interactive-mode conversation log
//!
//! The per-board transcript behind the chat panel. Turns append as they are
//! exchanged and mirror to the on-disk cache so reopening the panel (or the
//! app) restores the conversation instead of replaying the backend's
//! initialization exchange.

use crate::storage::conversations::{clear_conversation, load_conversation, save_conversation};
use crate::types::message::ChatMessage;

/// Placeholder shown by the panel after a reset or before the first exchange
pub const RESET_NOTICE: &str =
    "Conversation has been reset. Start a new conversation by typing below.";

#[derive(Debug, Clone, Default)]
pub struct ConversationLog {
    board_id: String,
    messages: Vec<ChatMessage>,
}

impl ConversationLog {
    /// Load the conversation for a board from the cache.
    pub fn load(board_id: impl Into<String>) -> Self {
        let board_id = board_id.into();
        let messages = load_conversation(&board_id);
        Self { board_id, messages }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Whether the panel should run the initialization exchange on open
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn push_user(&mut self, content: impl Into<String>) {
        self.push(ChatMessage::user(content));
    }

    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.push(ChatMessage::assistant(content));
    }

    fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
        if let Err(e) = save_conversation(&self.board_id, &self.messages) {
            tracing::warn!("Failed to cache conversation: {e}");
        }
    }

    /// Most recent user turn, for the bare add-confirmation form
    pub fn last_user_input(&self) -> Option<&str> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.role == crate::types::message::ChatRole::User)
            .map(|m| m.content.as_str())
    }

    /// Clear the local transcript and its cache. Server-side history is
    /// cleared separately through `/reset_conversation`.
    pub fn reset(&mut self) {
        self.messages.clear();
        if let Err(e) = clear_conversation(&self.board_id) {
            tracing::warn!("Failed to clear conversation cache: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::message::ChatRole;

    #[test]
    fn test_last_user_input() {
        let mut log = ConversationLog {
            board_id: String::new(), // empty id: cache writes are no-ops we ignore
            messages: Vec::new(),
        };
        assert_eq!(log.last_user_input(), None);

        log.messages.push(ChatMessage::user("first"));
        log.messages.push(ChatMessage::assistant("reply"));
        log.messages.push(ChatMessage::user("second"));
        log.messages.push(ChatMessage::assistant("reply two"));
        assert_eq!(log.last_user_input(), Some("second"));
    }

    #[test]
    fn test_messages_in_order() {
        let log = ConversationLog {
            board_id: String::new(),
            messages: vec![ChatMessage::user("hi"), ChatMessage::assistant("hello")],
        };
        assert_eq!(log.messages().len(), 2);
        assert_eq!(log.messages()[0].role, ChatRole::User);
        assert_eq!(log.messages()[1].content, "hello");
    }
}
