//! Per-part selection flags over a fixed catalog domain.

use std::collections::HashMap;

use crate::catalog::{PartId, PartRegistry};
use crate::error::{ConfiguratorError, Result};

/// Selection flag for every part in the catalog.
///
/// The key set is fixed at construction; ids outside it are rejected rather
/// than inserted.
#[derive(Debug, Clone)]
pub struct SelectionSet {
    flags: HashMap<PartId, bool>,
    selected: usize,
}

impl SelectionSet {
    /// Create a selection set with every catalog part unselected.
    pub fn new(registry: &PartRegistry) -> Self {
        let flags = registry
            .all_parts()
            .iter()
            .map(|p| (p.id.clone(), false))
            .collect();
        Self { flags, selected: 0 }
    }

    /// Mark a part selected. Returns `false` if it already was.
    pub fn select(&mut self, id: &str) -> Result<bool> {
        self.set(id, true)
    }

    /// Mark a part unselected. Returns `false` if it already was.
    pub fn deselect(&mut self, id: &str) -> Result<bool> {
        self.set(id, false)
    }

    fn set(&mut self, id: &str, value: bool) -> Result<bool> {
        let flag = self
            .flags
            .get_mut(id)
            .ok_or_else(|| ConfiguratorError::UnknownPart(id.to_string()))?;

        if *flag == value {
            return Ok(false);
        }

        *flag = value;
        if value {
            self.selected += 1;
        } else {
            self.selected -= 1;
        }
        Ok(true)
    }

    pub fn is_selected(&self, id: &str) -> Result<bool> {
        self.flags
            .get(id)
            .copied()
            .ok_or_else(|| ConfiguratorError::UnknownPart(id.to_string()))
    }

    /// Number of selected parts.
    pub fn selected_count(&self) -> usize {
        self.selected
    }

    /// Size of the domain (the full catalog).
    pub fn domain_len(&self) -> usize {
        self.flags.len()
    }

    /// Unselect every part.
    pub fn clear(&mut self) {
        self.flags.values_mut().for_each(|flag| *flag = false);
        self.selected = 0;
    }
}
