//! Ordered, duplicate-free cart of selected parts.

use crate::catalog::PartId;

/// Selected part ids in the order they were added.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CartMembership {
    items: Vec<PartId>,
}

impl CartMembership {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `id` unless it is already present. Returns the new length.
    pub fn add(&mut self, id: &PartId) -> usize {
        if !self.contains(id.as_str()) {
            self.items.push(id.clone());
        }
        self.items.len()
    }

    /// Remove `id` if present, keeping the order of the rest. Returns the new length.
    pub fn remove(&mut self, id: &str) -> usize {
        if let Some(pos) = self.items.iter().position(|item| item == id) {
            self.items.remove(pos);
        }
        self.items.len()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.items.iter().any(|item| item == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Owned copy of the current ordering.
    pub fn snapshot(&self) -> Vec<PartId> {
        self.items.clone()
    }

    /// Borrowed view of the current ordering.
    pub fn as_slice(&self) -> &[PartId] {
        &self.items
    }

    /// Empty the cart. Only used on a full session reset.
    pub fn clear(&mut self) {
        self.items.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> PartId {
        PartId::from(s)
    }

    #[test]
    fn add_appends_in_order() {
        let mut cart = CartMembership::new();
        assert_eq!(cart.add(&id("a")), 1);
        assert_eq!(cart.add(&id("b")), 2);
        assert_eq!(cart.add(&id("c")), 3);
        assert_eq!(cart.snapshot(), vec![id("a"), id("b"), id("c")]);
    }

    #[test]
    fn add_duplicate_is_noop() {
        let mut cart = CartMembership::new();
        cart.add(&id("a"));
        cart.add(&id("b"));
        assert_eq!(cart.add(&id("a")), 2);
        assert_eq!(cart.snapshot(), vec![id("a"), id("b")]);
    }

    #[test]
    fn remove_preserves_relative_order() {
        let mut cart = CartMembership::new();
        for s in ["a", "b", "c", "d"] {
            cart.add(&id(s));
        }
        assert_eq!(cart.remove("b"), 3);
        assert_eq!(cart.snapshot(), vec![id("a"), id("c"), id("d")]);
        assert!(!cart.contains("b"));
    }

    #[test]
    fn remove_absent_is_noop() {
        let mut cart = CartMembership::new();
        cart.add(&id("a"));
        assert_eq!(cart.remove("z"), 1);
        assert_eq!(cart.snapshot(), vec![id("a")]);
    }

    #[test]
    fn snapshot_is_detached() {
        let mut cart = CartMembership::new();
        cart.add(&id("a"));
        let mut snap = cart.snapshot();
        snap.push(id("b"));
        snap.clear();
        assert_eq!(cart.len(), 1);
        assert!(cart.contains("a"));
    }

    #[test]
    fn clear_empties() {
        let mut cart = CartMembership::new();
        cart.add(&id("a"));
        cart.add(&id("b"));
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.add(&id("b")), 1);
    }
}
