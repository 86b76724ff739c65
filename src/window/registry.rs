use std::collections::BTreeMap;

use super::{Window, WindowId};

/// Authoritative map from window id to window state.
///
/// Ids come from a monotonic counter, so ordering by id is insertion order.
#[derive(Debug)]
pub struct WindowRegistry<C> {
    windows: BTreeMap<WindowId, Window<C>>,
    next_id: u64,
}

impl<C> Default for WindowRegistry<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> WindowRegistry<C> {
    pub fn new() -> Self {
        Self {
            windows: BTreeMap::new(),
            next_id: 1,
        }
    }

    pub fn register(&mut self, mut window: Window<C>) -> WindowId {
        let id = WindowId::new(self.next_id);
        self.next_id = self.next_id.saturating_add(1);
        window.set_id(id);
        self.windows.insert(id, window);
        id
    }

    /// Removes the entry. Absent ids are not an error.
    pub fn unregister(&mut self, id: WindowId) -> Option<Window<C>> {
        self.windows.remove(&id)
    }

    pub fn get(&self, id: WindowId) -> Option<&Window<C>> {
        self.windows.get(&id)
    }

    pub fn get_mut(&mut self, id: WindowId) -> Option<&mut Window<C>> {
        self.windows.get_mut(&id)
    }

    pub fn contains(&self, id: WindowId) -> bool {
        self.windows.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Window<C>> {
        self.windows.values()
    }

    pub fn ids(&self) -> Vec<WindowId> {
        self.windows.keys().copied().collect()
    }

    pub fn ids_matching<P>(&self, mut predicate: P) -> Vec<WindowId>
    where
        P: FnMut(&Window<C>) -> bool,
    {
        self.windows
            .values()
            .filter(|w| predicate(w))
            .map(|w| w.id())
            .collect()
    }

    /// Applies `action` to every window accepted by `predicate`, in insertion
    /// order.
    pub fn for_each<P, A>(&mut self, mut predicate: P, mut action: A)
    where
        P: FnMut(&Window<C>) -> bool,
        A: FnMut(&mut Window<C>),
    {
        for window in self.windows.values_mut() {
            if predicate(window) {
                action(window);
            }
        }
    }
}
