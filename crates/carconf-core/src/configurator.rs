//! The configurator session: the single entry point for selection changes.
//!
//! A [`Configurator`] owns the selection flags, the cart, the completion
//! machine, and the transition log for one session. Each effective change
//! runs to completion, including every hook call, before the method returns.
//!
//! Hook order for an add (remove is symmetric):
//!
//! 1. `on_part_visual_change(id, true)`
//! 2. `on_external_add(external_id)`
//! 3. `on_completion_reached` / `on_completion_reverted`, if the state changed
//! 4. `on_selection_render(ordered, names)`

use serde::{Deserialize, Serialize};
use tracing::{debug, debug_span, info};
use uuid::Uuid;

use crate::cart::CartMembership;
use crate::catalog::{ExternalId, PartId, PartRegistry};
use crate::completion::{CompletionController, CompletionEvent, CompletionState};
use crate::error::{ConfiguratorError, Result};
use crate::history::{CompletionTransition, TransitionLog};
use crate::hooks::ConfiguratorHooks;
use crate::selection::SelectionSet;

/// What an effective selection change did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToggleOutcome {
    /// Part that changed.
    pub part: PartId,
    /// Its cart-service id.
    pub external_id: ExternalId,
    /// Whether the part is now selected.
    pub selected: bool,
    /// Cart size after the change.
    pub cart_len: usize,
    /// Completion event emitted by this change, if any.
    pub completion: Option<CompletionEvent>,
}

/// Read-only summary of a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionReport {
    pub session: Uuid,
    pub selection: Vec<PartId>,
    pub total: usize,
    pub state: CompletionState,
    pub episodes: u64,
    pub transitions: Vec<CompletionTransition>,
}

/// One configurator session over a fixed catalog.
pub struct Configurator<H: ConfiguratorHooks> {
    session: Uuid,
    registry: PartRegistry,
    selection: SelectionSet,
    cart: CartMembership,
    completion: CompletionController,
    history: TransitionLog,
    hooks: H,
}

impl<H: ConfiguratorHooks> Configurator<H> {
    /// Start a session over `registry`, reporting effects to `hooks`.
    pub fn new(registry: PartRegistry, hooks: H) -> Self {
        let session = Uuid::new_v4();
        let selection = SelectionSet::new(&registry);
        debug!(%session, parts = registry.len(), "configurator session started");
        Self {
            session,
            registry,
            selection,
            cart: CartMembership::new(),
            completion: CompletionController::new(),
            history: TransitionLog::new(session),
            hooks,
        }
    }

    // --- Selection changes ---

    /// Flip the selection of `id`.
    ///
    /// Fails with [`ConfiguratorError::UnknownPart`] for an id outside the
    /// catalog, leaving all state untouched and calling no hooks.
    pub fn toggle_part(&mut self, id: &str) -> Result<ToggleOutcome> {
        let (part, external_id) = self.part_key(id)?;
        let selected = !self.selection.is_selected(id)?;
        if selected {
            self.selection.select(id)?;
        } else {
            self.selection.deselect(id)?;
        }
        Ok(self.propagate(part, external_id, selected))
    }

    /// Select `id` if it is not already selected.
    ///
    /// Returns `Ok(None)` without calling any hook when it already was.
    pub fn add_part(&mut self, id: &str) -> Result<Option<ToggleOutcome>> {
        let (part, external_id) = self.part_key(id)?;
        if !self.selection.select(id)? {
            debug!(part = id, "already selected");
            return Ok(None);
        }
        Ok(Some(self.propagate(part, external_id, true)))
    }

    /// Deselect `id` if it is selected.
    ///
    /// Returns `Ok(None)` without calling any hook when it was not.
    pub fn remove_part(&mut self, id: &str) -> Result<Option<ToggleOutcome>> {
        let (part, external_id) = self.part_key(id)?;
        if !self.selection.deselect(id)? {
            debug!(part = id, "not selected");
            return Ok(None);
        }
        Ok(Some(self.propagate(part, external_id, false)))
    }

    /// Restart the session under a new session id.
    ///
    /// Selection, cart, episode count and transition log are cleared.
    /// Completion is forced back to `Configuring` without
    /// `on_completion_reverted`; a single render with the empty selection is
    /// emitted so the host display matches.
    pub fn reset(&mut self) {
        let previous = self.session;
        self.session = Uuid::new_v4();
        debug!(
            %previous,
            session = %self.session,
            cleared = self.cart.len(),
            "session reset"
        );
        self.selection.clear();
        self.cart.clear();
        self.completion.reset();
        self.history = TransitionLog::new(self.session);
        self.hooks
            .on_selection_render(self.cart.as_slice(), &self.registry);
    }

    fn part_key(&self, id: &str) -> Result<(PartId, ExternalId)> {
        let part = self
            .registry
            .lookup(id)
            .map_err(|_| ConfiguratorError::UnknownPart(id.to_string()))?;
        Ok((part.id.clone(), part.external_id))
    }

    /// Carry an effective selection change through the cart, the hooks, and
    /// the completion machine. The selection flag has already been updated.
    fn propagate(&mut self, part: PartId, external_id: ExternalId, selected: bool) -> ToggleOutcome {
        let _span = debug_span!("selection_change", session = %self.session, part = %part)
            .entered();

        let cart_len = if selected {
            self.cart.add(&part)
        } else {
            self.cart.remove(part.as_str())
        };
        debug_assert_eq!(cart_len, self.selection.selected_count());

        let name = self.registry.name_of(part.as_str()).unwrap_or_default();
        if selected {
            debug!(part_name = name, external_id, "adding part");
        } else {
            debug!(part_name = name, external_id, "removing part");
        }

        self.hooks.on_part_visual_change(&part, selected);
        if selected {
            self.hooks.on_external_add(external_id);
        } else {
            self.hooks.on_external_remove(external_id);
        }

        let total = self.registry.len();
        let from_state = self.completion.state();
        let completion = self.completion.on_selection_changed(cart_len, total);
        if let Some(event) = completion {
            self.history.record(
                from_state,
                self.completion.state(),
                part.clone(),
                cart_len,
                total,
            );
            match event {
                CompletionEvent::Reached => {
                    info!(episode = self.completion.episodes(), "build complete");
                    self.hooks.on_completion_reached();
                }
                CompletionEvent::Reverted => {
                    info!(selected = cart_len, total, "build no longer complete");
                    self.hooks.on_completion_reverted();
                }
            }
        }

        self.hooks
            .on_selection_render(self.cart.as_slice(), &self.registry);

        ToggleOutcome {
            part,
            external_id,
            selected,
            cart_len,
            completion,
        }
    }

    // --- Queries ---

    /// Selected part ids in cart order.
    pub fn current_selection(&self) -> Vec<PartId> {
        self.cart.snapshot()
    }

    pub fn is_complete(&self) -> bool {
        self.completion.is_complete()
    }

    pub fn completion_state(&self) -> CompletionState {
        self.completion.state()
    }

    pub fn is_selected(&self, id: &str) -> Result<bool> {
        self.selection.is_selected(id)
    }

    pub fn selected_count(&self) -> usize {
        self.selection.selected_count()
    }

    /// Number of parts needed for completion.
    pub fn total_parts(&self) -> usize {
        self.registry.len()
    }

    pub fn registry(&self) -> &PartRegistry {
        &self.registry
    }

    pub fn session_id(&self) -> Uuid {
        self.session
    }

    /// Completion transitions recorded so far.
    pub fn transitions(&self) -> &[CompletionTransition] {
        self.history.entries()
    }

    /// Summary of the session suitable for serialization.
    pub fn report(&self) -> SessionReport {
        SessionReport {
            session: self.session,
            selection: self.current_selection(),
            total: self.total_parts(),
            state: self.completion.state(),
            episodes: self.completion.episodes(),
            transitions: self.history.entries().to_vec(),
        }
    }

    // --- Hooks ---

    pub fn hooks(&self) -> &H {
        &self.hooks
    }

    pub fn hooks_mut(&mut self) -> &mut H {
        &mut self.hooks
    }

    /// End the session and hand the collaborators back to the host.
    pub fn into_hooks(self) -> H {
        self.hooks
    }
}
