//! Terminal collaborators for a configurator session.
//!
//! [`ConsoleHost`] renders the selection, announces cart changes, and shows
//! the success state. [`LocalCart`] stands in for the external cart service.
//!
//! The success banner and title flash are scheduled by the completion hook
//! and played by the command loop through [`ConsoleHost::play_pending`] once
//! the configurator call has returned, so the final render always comes
//! first and the delay never runs inside a selection change.
//! Both swallow their own I/O failures and log them; a collaborator error
//! never reaches the configurator.

use std::io::Write;
use std::thread;
use std::time::Duration;

use carconf_core::{ConfiguratorHooks, ExternalId, PartId, PartRegistry};
use tracing::{info, warn};

use crate::manifest::PresentationConfig;

/// Title shown once every part is selected.
pub const COMPLETE_TITLE: &str = "🎉 Car Complete! 🎉";

const FLASH_ASSEMBLED: &str = " 🚗 Car assembled 🚗";
const FLASH_CONGRATS: &str = "🎉 Congratulations! 🎉";

/// Screen-reader style announcement for a cart of `count` parts.
pub fn announcement(count: usize) -> String {
    match count {
        0 => "Cart is empty".to_string(),
        1 => "Cart updated. 1 part selected.".to_string(),
        n => format!("Cart updated. {n} parts selected."),
    }
}

/// Title frames flashed after completion.
pub fn title_flash_frames(frames: u32) -> Vec<&'static str> {
    (0..frames)
        .map(|i| if i % 2 == 1 { FLASH_CONGRATS } else { FLASH_ASSEMBLED })
        .collect()
}

/// Local mirror of the external cart, keyed by external product id.
#[derive(Debug, Clone, Default)]
pub struct LocalCart {
    items: Vec<ExternalId>,
}

impl LocalCart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[ExternalId] {
        &self.items
    }
}

impl ConfiguratorHooks for LocalCart {
    fn on_external_add(&mut self, external_id: ExternalId) {
        if !self.items.contains(&external_id) {
            self.items.push(external_id);
        }
        info!("Local cart: product {external_id} added");
    }

    fn on_external_remove(&mut self, external_id: ExternalId) {
        self.items.retain(|id| *id != external_id);
        info!("Local cart: product {external_id} removed");
    }
}

/// Console presentation of a session, writing to `W`.
pub struct ConsoleHost<W: Write> {
    out: W,
    presentation: PresentationConfig,
    cart: LocalCart,
    title: String,
    celebration_pending: bool,
}

impl<W: Write> ConsoleHost<W> {
    pub fn new(out: W, presentation: PresentationConfig) -> Self {
        let title = presentation.title.clone();
        Self {
            out,
            presentation,
            cart: LocalCart::new(),
            title,
            celebration_pending: false,
        }
    }

    /// Current window title.
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn cart(&self) -> &LocalCart {
        &self.cart
    }

    /// The underlying writer, for session output that is not a hook.
    pub fn writer(&mut self) -> &mut W {
        &mut self.out
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Whether a completion is waiting for its banner.
    pub fn celebration_pending(&self) -> bool {
        self.celebration_pending
    }

    /// Show the success banner scheduled by the last completion, after the
    /// configured delay, then flash the title. Does nothing when no
    /// completion is pending.
    pub fn play_pending(&mut self) {
        if !self.celebration_pending {
            return;
        }
        self.celebration_pending = false;

        Self::pause(self.presentation.success_delay_ms);
        self.emit("*** Congratulations! You selected every part and assembled the car. ***");
        self.set_title(COMPLETE_TITLE);

        if self.presentation.flash_title {
            for frame in title_flash_frames(self.presentation.flash_frames) {
                Self::pause(self.presentation.flash_interval_ms);
                self.set_title(frame);
            }
        }
    }

    /// Return to the initial presentation after a session reset: empty local
    /// cart, nothing pending and the configuring title.
    pub fn restart(&mut self) {
        self.cart = LocalCart::new();
        self.celebration_pending = false;
        let title = self.presentation.title.clone();
        self.set_title(&title);
    }

    fn emit(&mut self, text: &str) {
        if let Err(e) = writeln!(self.out, "{text}") {
            warn!("console write failed: {e}");
        }
    }

    fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
        self.emit(&format!("Title: {title}"));
    }

    fn pause(ms: u64) {
        if ms > 0 {
            thread::sleep(Duration::from_millis(ms));
        }
    }
}

impl<W: Write> ConfiguratorHooks for ConsoleHost<W> {
    fn on_selection_render(&mut self, ordered: &[PartId], names: &PartRegistry) {
        let mut text = format!("Selected parts ({}/{}):", ordered.len(), names.len());
        if ordered.is_empty() {
            text.push_str("\n  (none)");
        }
        for (i, id) in ordered.iter().enumerate() {
            let name = names.name_of(id.as_str()).unwrap_or(id.as_str());
            text.push_str(&format!("\n  {}. {name}", i + 1));
        }
        text.push('\n');
        text.push_str(&announcement(ordered.len()));
        self.emit(&text);
    }

    fn on_part_visual_change(&mut self, id: &PartId, selected: bool) {
        let line = if selected {
            format!("[x] {id} (selected - toggle to remove)")
        } else {
            format!("[ ] {id} (toggle to add)")
        };
        self.emit(&line);
    }

    fn on_external_add(&mut self, external_id: ExternalId) {
        self.cart.on_external_add(external_id);
    }

    fn on_external_remove(&mut self, external_id: ExternalId) {
        self.cart.on_external_remove(external_id);
    }

    fn on_completion_reached(&mut self) {
        self.celebration_pending = true;
    }

    fn on_completion_reverted(&mut self) {
        self.celebration_pending = false;
        self.emit("Build incomplete, showing car diagram.");
        let title = self.presentation.title.clone();
        self.set_title(&title);
    }
}
