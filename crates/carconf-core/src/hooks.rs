//! Callback interface to external collaborators.
//!
//! The configurator never renders, notifies, or talks to a cart service
//! itself. A host supplies an implementation of [`ConfiguratorHooks`] at
//! construction and the configurator invokes it after each state change.
//! Hooks return nothing: a collaborator handles its own failures.

use std::fmt;

use crate::catalog::{ExternalId, PartId, PartRegistry};

/// Side effects requested by the configurator. Every method defaults to a
/// no-op so hosts only implement what they present.
pub trait ConfiguratorHooks {
    /// Current selection in cart order, with the catalog for name lookup.
    /// Called at the end of every effective toggle.
    fn on_selection_render(&mut self, _ordered: &[PartId], _names: &PartRegistry) {}

    /// A part's selected marker changed.
    fn on_part_visual_change(&mut self, _id: &PartId, _selected: bool) {}

    /// A part entered the cart; keyed by the cart service's id.
    fn on_external_add(&mut self, _external_id: ExternalId) {}

    /// A part left the cart; keyed by the cart service's id.
    fn on_external_remove(&mut self, _external_id: ExternalId) {}

    /// Every part is now selected.
    fn on_completion_reached(&mut self) {}

    /// The build is no longer complete.
    fn on_completion_reverted(&mut self) {}
}

/// A host with no presentation.
impl ConfiguratorHooks for () {}

impl<H: ConfiguratorHooks + ?Sized> ConfiguratorHooks for Box<H> {
    fn on_selection_render(&mut self, ordered: &[PartId], names: &PartRegistry) {
        (**self).on_selection_render(ordered, names)
    }

    fn on_part_visual_change(&mut self, id: &PartId, selected: bool) {
        (**self).on_part_visual_change(id, selected)
    }

    fn on_external_add(&mut self, external_id: ExternalId) {
        (**self).on_external_add(external_id)
    }

    fn on_external_remove(&mut self, external_id: ExternalId) {
        (**self).on_external_remove(external_id)
    }

    fn on_completion_reached(&mut self) {
        (**self).on_completion_reached()
    }

    fn on_completion_reverted(&mut self) {
        (**self).on_completion_reverted()
    }
}

type RenderFn = Box<dyn FnMut(&[PartId], &PartRegistry)>;
type VisualFn = Box<dyn FnMut(&PartId, bool)>;
type SyncFn = Box<dyn FnMut(ExternalId)>;
type NotifyFn = Box<dyn FnMut()>;

/// [`ConfiguratorHooks`] assembled from individual closures.
///
/// ```
/// use carconf_core::{CallbackHooks, Configurator, PartRegistry};
///
/// let hooks = CallbackHooks::new().with_completion_reached(|| println!("done"));
/// let mut cfg = Configurator::new(PartRegistry::car_default().unwrap(), hooks);
/// cfg.toggle_part("car-body").unwrap();
/// ```
#[derive(Default)]
pub struct CallbackHooks {
    render: Option<RenderFn>,
    visual: Option<VisualFn>,
    external_add: Option<SyncFn>,
    external_remove: Option<SyncFn>,
    reached: Option<NotifyFn>,
    reverted: Option<NotifyFn>,
}

impl CallbackHooks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set the render callback.
    pub fn with_render(mut self, f: impl FnMut(&[PartId], &PartRegistry) + 'static) -> Self {
        self.render = Some(Box::new(f));
        self
    }

    /// Builder: set the visual-state callback.
    pub fn with_visual_change(mut self, f: impl FnMut(&PartId, bool) + 'static) -> Self {
        self.visual = Some(Box::new(f));
        self
    }

    /// Builder: set the external add callback.
    pub fn with_external_add(mut self, f: impl FnMut(ExternalId) + 'static) -> Self {
        self.external_add = Some(Box::new(f));
        self
    }

    /// Builder: set the external remove callback.
    pub fn with_external_remove(mut self, f: impl FnMut(ExternalId) + 'static) -> Self {
        self.external_remove = Some(Box::new(f));
        self
    }

    /// Builder: set the completion callback.
    pub fn with_completion_reached(mut self, f: impl FnMut() + 'static) -> Self {
        self.reached = Some(Box::new(f));
        self
    }

    /// Builder: set the reversion callback.
    pub fn with_completion_reverted(mut self, f: impl FnMut() + 'static) -> Self {
        self.reverted = Some(Box::new(f));
        self
    }
}

impl fmt::Debug for CallbackHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackHooks")
            .field("render", &self.render.is_some())
            .field("visual", &self.visual.is_some())
            .field("external_add", &self.external_add.is_some())
            .field("external_remove", &self.external_remove.is_some())
            .field("reached", &self.reached.is_some())
            .field("reverted", &self.reverted.is_some())
            .finish()
    }
}

impl ConfiguratorHooks for CallbackHooks {
    fn on_selection_render(&mut self, ordered: &[PartId], names: &PartRegistry) {
        if let Some(f) = self.render.as_mut() {
            f(ordered, names);
        }
    }

    fn on_part_visual_change(&mut self, id: &PartId, selected: bool) {
        if let Some(f) = self.visual.as_mut() {
            f(id, selected);
        }
    }

    fn on_external_add(&mut self, external_id: ExternalId) {
        if let Some(f) = self.external_add.as_mut() {
            f(external_id);
        }
    }

    fn on_external_remove(&mut self, external_id: ExternalId) {
        if let Some(f) = self.external_remove.as_mut() {
            f(external_id);
        }
    }

    fn on_completion_reached(&mut self) {
        if let Some(f) = self.reached.as_mut() {
            f();
        }
    }

    fn on_completion_reverted(&mut self) {
        if let Some(f) = self.reverted.as_mut() {
            f();
        }
    }
}
