//! Completion state machine.
//!
//! A session is either still being configured or fully assembled. The
//! controller only reports an event when the state actually changes, so a
//! completed build is announced once per episode and a drop below the full
//! count is announced once per drop.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Whether the build is complete.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompletionState {
    /// Some parts are still missing.
    #[default]
    Configuring,
    /// Every catalog part is selected.
    Completed,
}

impl CompletionState {
    /// The state the machine moves to for the given counts.
    fn target(selected: usize, total: usize) -> Self {
        if selected >= total {
            CompletionState::Completed
        } else {
            CompletionState::Configuring
        }
    }
}

impl fmt::Display for CompletionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompletionState::Configuring => write!(f, "CONFIGURING"),
            CompletionState::Completed => write!(f, "COMPLETED"),
        }
    }
}

/// Effect emitted when the completion state changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompletionEvent {
    /// Entered `Completed`.
    Reached,
    /// Left `Completed`.
    Reverted,
}

/// Tracks completion across selection changes.
#[derive(Debug, Clone, Default)]
pub struct CompletionController {
    state: CompletionState,
    episodes: u64,
}

impl CompletionController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a real selection change. Returns the event to emit, if any.
    pub fn on_selection_changed(
        &mut self,
        selected: usize,
        total: usize,
    ) -> Option<CompletionEvent> {
        let next = CompletionState::target(selected, total);
        if next == self.state {
            return None;
        }

        self.state = next;
        match next {
            CompletionState::Completed => {
                self.episodes += 1;
                Some(CompletionEvent::Reached)
            }
            CompletionState::Configuring => Some(CompletionEvent::Reverted),
        }
    }

    pub fn state(&self) -> CompletionState {
        self.state
    }

    pub fn is_complete(&self) -> bool {
        self.state == CompletionState::Completed
    }

    /// Number of times `Completed` has been entered.
    pub fn episodes(&self) -> u64 {
        self.episodes
    }

    /// Force `Configuring` and zero the episode count without emitting an
    /// event.
    pub fn reset(&mut self) {
        self.state = CompletionState::Configuring;
        self.episodes = 0;
    }
}
