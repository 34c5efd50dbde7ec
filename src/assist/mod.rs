//! AI-reply reconciliation
//!
//! The layer between the assistant's free-form chat replies and the board.
//! Replies carry directives three ways: an embedded JSON payload, a fenced
//! JSON block, or plain-prose confirmations ("'X' has been added to the plan
//! quadrant"). This module parses all three into `BoardDirective`s, filters
//! out meta-conversation and duplicates, and applies the survivors through
//! the API and the board mirror without a refetch.

pub mod conversation;
pub mod filter;
pub mod patterns;
pub mod reconciler;
pub mod reply;

pub use reconciler::{Applied, ApplyOutcome, Reconciler};
pub use reply::{parse_reply, BoardDirective, ParsedReply, SuggestionPayload};
