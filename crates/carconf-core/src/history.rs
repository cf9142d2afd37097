//! Completion transition history for a configurator session.
//!
//! Every change of [`CompletionState`] is recorded with the part that caused
//! it and the counts at that moment. The log is informational only; it is
//! never replayed.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::PartId;
use crate::completion::CompletionState;

/// A recorded completion state change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionTransition {
    /// Session the transition belongs to.
    pub session: Uuid,
    /// Sequence number (monotonically increasing per session, starting at 1).
    pub sequence: u64,
    /// State before the transition.
    pub from_state: CompletionState,
    /// State after the transition.
    pub to_state: CompletionState,
    /// Part whose toggle caused the transition.
    pub part: PartId,
    /// Selected parts after the toggle.
    pub selected: usize,
    /// Catalog size.
    pub total: usize,
}

/// Ordered list of completion transitions for one session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitionLog {
    session: Uuid,
    entries: Vec<CompletionTransition>,
    next_sequence: u64,
}

impl TransitionLog {
    /// Create an empty log for a new session.
    pub fn new(session: Uuid) -> Self {
        Self {
            session,
            entries: Vec::new(),
            next_sequence: 1,
        }
    }

    /// Append a transition, assigning the next sequence number.
    pub fn record(
        &mut self,
        from_state: CompletionState,
        to_state: CompletionState,
        part: PartId,
        selected: usize,
        total: usize,
    ) -> &CompletionTransition {
        let entry = CompletionTransition {
            session: self.session,
            sequence: self.next_sequence,
            from_state,
            to_state,
            part,
            selected,
            total,
        };
        self.next_sequence += 1;
        self.entries.push(entry);
        &self.entries[self.entries.len() - 1]
    }

    pub fn session(&self) -> Uuid {
        self.session
    }

    pub fn entries(&self) -> &[CompletionTransition] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Most recent transition, if any.
    pub fn last(&self) -> Option<&CompletionTransition> {
        self.entries.last()
    }
}
