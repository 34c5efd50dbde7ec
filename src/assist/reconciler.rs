//! Directive application
//!
//! Turns parsed directives into backend calls plus board-mirror updates.
//! Overlapping confirmation phrasings, payload-plus-prose replies and
//! double-clicked suggestion buttons all funnel into the same directive
//! keys, so an in-flight/applied key set is what stands between the board
//! and duplicate adds. One directive failing never aborts the rest of a
//! reply's batch.

use crate::api::{ApiClient, ApiError};
use crate::assist::reply::BoardDirective;
use crate::board::{normalize_content, BoardState};
use crate::types::quadrant::Quadrant;
use crate::types::thought::Thought;
use dashmap::DashSet;

/// Mirror mutation produced by a successfully applied directive
#[derive(Debug, Clone)]
pub enum Applied {
    Added(Thought),
    Moved { id: String, quadrant: Quadrant },
    Deleted { id: String },
}

/// Outcome of applying one directive
#[derive(Debug, Clone)]
pub enum ApplyOutcome {
    Applied(Applied),
    /// Already on the board, already applied, or currently being applied
    Duplicate,
    /// Directive names a thought the board does not hold
    NotFound,
    Failed(String),
}

/// Applies directives, deduplicating across the session.
#[derive(Default)]
pub struct Reconciler {
    in_flight: DashSet<String>,
    applied: DashSet<String>,
}

impl Reconciler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget session history, on board switch or conversation reset.
    pub fn reset(&self) {
        self.in_flight.clear();
        self.applied.clear();
    }

    fn directive_key(directive: &BoardDirective) -> String {
        match directive {
            BoardDirective::Add { content, quadrant } => {
                format!("add:{}:{}", quadrant, normalize_content(content))
            }
            BoardDirective::Move { content, quadrant } => {
                format!("move:{}:{}", quadrant, normalize_content(content))
            }
            BoardDirective::Delete { content } => {
                format!("delete:{}", normalize_content(content))
            }
        }
    }

    /// Apply one directive against a snapshot of the board mirror.
    ///
    /// The caller folds the returned `Applied` mutation into its live board
    /// state; the snapshot only serves resolution and duplicate checks.
    pub async fn apply(
        &self,
        api: &ApiClient,
        board: &BoardState,
        directive: &BoardDirective,
    ) -> ApplyOutcome {
        let key = Self::directive_key(directive);

        if self.applied.contains(&key) || !self.in_flight.insert(key.clone()) {
            tracing::debug!("Skipping duplicate directive: {key}");
            return ApplyOutcome::Duplicate;
        }

        let outcome = self.apply_inner(api, board, directive).await;
        self.in_flight.remove(&key);

        match &outcome {
            ApplyOutcome::Applied(_) | ApplyOutcome::Duplicate => {
                self.applied.insert(key);
            }
            ApplyOutcome::NotFound | ApplyOutcome::Failed(_) => {}
        }
        outcome
    }

    async fn apply_inner(
        &self,
        api: &ApiClient,
        board: &BoardState,
        directive: &BoardDirective,
    ) -> ApplyOutcome {
        match directive {
            BoardDirective::Add { content, quadrant } => {
                if board.contains(*quadrant, content) {
                    return ApplyOutcome::Duplicate;
                }
                match api.add_thought(&board.id, *quadrant, content).await {
                    Ok(thought) => ApplyOutcome::Applied(Applied::Added(thought)),
                    Err(err) if err.is_duplicate() => ApplyOutcome::Duplicate,
                    Err(err) => Self::failed("add", err),
                }
            }
            BoardDirective::Move { content, quadrant } => {
                let thought = match board.find_by_content(content) {
                    Some(thought) => thought,
                    None => return ApplyOutcome::NotFound,
                };
                if thought.quadrant == *quadrant {
                    return ApplyOutcome::Duplicate;
                }
                match api.move_thought(&board.id, &thought.id, *quadrant).await {
                    Ok(()) => ApplyOutcome::Applied(Applied::Moved {
                        id: thought.id.clone(),
                        quadrant: *quadrant,
                    }),
                    Err(err) => Self::failed("move", err),
                }
            }
            BoardDirective::Delete { content } => {
                let thought = match board.find_by_content(content) {
                    Some(thought) => thought,
                    None => return ApplyOutcome::NotFound,
                };
                match api.delete_thought(&thought.id).await {
                    Ok(()) => ApplyOutcome::Applied(Applied::Deleted {
                        id: thought.id.clone(),
                    }),
                    Err(err) => Self::failed("delete", err),
                }
            }
        }
    }

    fn failed(action: &str, err: ApiError) -> ApplyOutcome {
        tracing::error!("Failed to {action} thought: {err}");
        ApplyOutcome::Failed(err.to_string())
    }
}

/// Fold an applied mutation into the live board mirror.
pub fn commit(board: &mut BoardState, applied: &Applied) {
    match applied {
        Applied::Added(thought) => board.insert(thought.clone()),
        Applied::Moved { id, quadrant } => {
            board.relocate(id, *quadrant);
        }
        Applied::Deleted { id } => {
            board.remove(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn add(content: &str, quadrant: Quadrant) -> BoardDirective {
        BoardDirective::Add {
            content: content.to_string(),
            quadrant,
        }
    }

    #[test]
    fn test_directive_keys_normalize() {
        let a = Reconciler::directive_key(&add("Cut Scope", Quadrant::Plan));
        let b = Reconciler::directive_key(&add("  cut  scope ", Quadrant::Plan));
        assert_eq!(a, b);

        let other_quadrant = Reconciler::directive_key(&add("cut scope", Quadrant::Goal));
        assert_ne!(a, other_quadrant);

        let delete = Reconciler::directive_key(&BoardDirective::Delete {
            content: "cut scope".to_string(),
        });
        assert_ne!(a, delete);
    }

    #[test]
    fn test_in_flight_guard_blocks_second_attempt() {
        let reconciler = Reconciler::new();
        let key = Reconciler::directive_key(&add("x", Quadrant::Goal));
        assert!(reconciler.in_flight.insert(key.clone()));
        // Second arrival of the same directive while the first is mid-save
        assert!(!reconciler.in_flight.insert(key));
    }

    #[test]
    fn test_reset_forgets_history() {
        let reconciler = Reconciler::new();
        reconciler.applied.insert("add:goal:x".to_string());
        reconciler.reset();
        assert!(!reconciler.applied.contains("add:goal:x"));
    }

    #[test]
    fn test_commit_mutations() {
        let mut board = BoardState::new("7", "b");
        commit(
            &mut board,
            &Applied::Added(Thought::new("1", "Cut scope", Quadrant::Plan)),
        );
        assert!(board.contains(Quadrant::Plan, "cut scope"));

        commit(
            &mut board,
            &Applied::Moved {
                id: "1".to_string(),
                quadrant: Quadrant::Analysis,
            },
        );
        assert!(board.contains(Quadrant::Analysis, "cut scope"));

        commit(&mut board, &Applied::Deleted { id: "1".to_string() });
        assert!(board.is_empty());
    }
}
