use crate::window::{WindowId, WindowRegistry};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskbarEntry {
    pub id: WindowId,
    pub label: String,
    pub active: bool,
}

/// Derived view of the registry: one entry per registered window, minimized
/// windows included.
#[derive(Debug, Default, Clone)]
pub struct Taskbar {
    entries: Vec<TaskbarEntry>,
}

impl Taskbar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the entries wholesale from the registry.
    pub fn rebuild<C>(&mut self, registry: &WindowRegistry<C>) {
        self.entries = registry
            .iter()
            .map(|w| TaskbarEntry {
                id: w.id(),
                label: w.title().to_string(),
                active: w.is_shown(),
            })
            .collect();
        tracing::trace!(entries = self.entries.len(), "taskbar rebuilt");
    }

    pub fn entries(&self) -> &[TaskbarEntry] {
        &self.entries
    }

    pub fn entry(&self, index: usize) -> Option<&TaskbarEntry> {
        self.entries.get(index)
    }

    pub fn entry_for(&self, id: WindowId) -> Option<&TaskbarEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::{Geometry, Window, WindowKind, ZOrder};

    fn window(title: &str) -> Window<()> {
        Window::new(
            WindowKind::Generic,
            title.to_string(),
            Geometry::default(),
            ZOrder::new(101),
            (),
            None,
        )
    }

    #[test]
    fn rebuild_mirrors_registry() {
        let mut reg = WindowRegistry::new();
        let a = reg.register(window("A"));
        let b = reg.register(window("B"));
        if let Some(w) = reg.get_mut(b) {
            w.toggle_visibility();
        }
        let mut bar = Taskbar::new();
        bar.rebuild(&reg);
        assert_eq!(bar.len(), 2);
        assert_eq!(bar.entry_for(a).map(|e| e.active), Some(true));
        assert_eq!(bar.entry_for(b).map(|e| e.active), Some(false));
        assert_eq!(bar.entry(1).map(|e| e.label.as_str()), Some("B"));
    }

    #[test]
    fn rebuild_replaces_previous_entries() {
        let mut reg = WindowRegistry::new();
        let a = reg.register(window("A"));
        let mut bar = Taskbar::new();
        bar.rebuild(&reg);
        assert_eq!(bar.len(), 1);
        reg.unregister(a);
        bar.rebuild(&reg);
        assert!(bar.is_empty());
        assert!(bar.entry_for(a).is_none());
    }
}
