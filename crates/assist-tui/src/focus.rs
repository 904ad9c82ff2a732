//! FocusRing — keyboard focus cycling between the visible panes.

use crate::action::ComponentId;

pub struct FocusRing {
    items: Vec<ComponentId>,
    current: usize,
}

impl FocusRing {
    pub fn new(items: Vec<ComponentId>) -> Self {
        Self { items, current: 0 }
    }

    pub fn current(&self) -> Option<ComponentId> {
        self.items.get(self.current).copied()
    }

    pub fn next(&mut self) -> Option<ComponentId> {
        if self.items.is_empty() {
            return None;
        }
        self.current = (self.current + 1) % self.items.len();
        self.current()
    }

    pub fn prev(&mut self) -> Option<ComponentId> {
        if self.items.is_empty() {
            return None;
        }
        self.current = self.current.checked_sub(1).unwrap_or(self.items.len() - 1);
        self.current()
    }

    /// Focus `id` if it is in the ring. Returns whether focus moved there.
    pub fn set(&mut self, id: ComponentId) -> bool {
        match self.items.iter().position(|&x| x == id) {
            Some(pos) => {
                self.current = pos;
                true
            }
            None => false,
        }
    }

    pub fn is_focused(&self, id: ComponentId) -> bool {
        self.current() == Some(id)
    }

    /// Replace the ring contents when panes appear or disappear.
    /// Focus stays on the same pane if it survived, else falls back to `fallback`.
    pub fn set_items(&mut self, items: Vec<ComponentId>, fallback: ComponentId) {
        let old = self.current();
        self.items = items;
        if let Some(id) = old {
            if self.set(id) {
                return;
            }
        }
        if !self.set(fallback) {
            self.current = 0;
        }
    }
}

impl Default for FocusRing {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}
