//! Selection core for the car configurator.
//!
//! A user assembles a car by selecting every part in a fixed catalog. The
//! [`Configurator`] keeps three views consistent under any sequence of
//! toggles: the per-part [`SelectionSet`], the ordered [`CartMembership`],
//! and the [`CompletionController`] state. Completion is signaled once per
//! fully assembled episode and reverted once when a part is removed again.
//!
//! Rendering, cart-service sync, and notifications are left to the host,
//! which receives them through [`ConfiguratorHooks`].

pub mod cart;
pub mod catalog;
pub mod completion;
pub mod configurator;
pub mod error;
pub mod history;
pub mod hooks;
pub mod selection;

pub use cart::CartMembership;
pub use catalog::{default_parts, ExternalId, Part, PartId, PartRegistry};
pub use completion::{CompletionController, CompletionEvent, CompletionState};
pub use configurator::{Configurator, SessionReport, ToggleOutcome};
pub use error::{ConfiguratorError, Result};
pub use history::{CompletionTransition, TransitionLog};
pub use hooks::{CallbackHooks, ConfiguratorHooks};
pub use selection::SelectionSet;
