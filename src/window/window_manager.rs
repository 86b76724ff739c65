use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{
    CloseGuard, Geometry, Point, Size, Window, WindowId, WindowKind, WindowRegistry, ZOrder,
    ZOrderAllocator,
};
use crate::constants::{SPAWN_OFFSET_MAX, SPAWN_OFFSET_MIN};
use crate::layout::floating::{HeaderDrag, ResizeDrag, maximized_geometry};
use crate::taskbar::Taskbar;

/// Handle for one pointer session, returned by `begin_drag` / `begin_resize`
/// and passed back on every move and on release. A token stops working as
/// soon as another session starts or the session ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionToken(u64);

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "session_{}", self.0)
    }
}

#[derive(Debug, Clone, Copy)]
enum PointerSession {
    Drag(SessionToken, HeaderDrag),
    Resize(SessionToken, ResizeDrag),
}

impl PointerSession {
    fn token(&self) -> SessionToken {
        match self {
            Self::Drag(token, _) | Self::Resize(token, _) => *token,
        }
    }

    fn window(&self) -> WindowId {
        match self {
            Self::Drag(_, drag) => drag.id,
            Self::Resize(_, drag) => drag.id,
        }
    }
}

/// Owns every window of one desktop: registry, z-order counter, taskbar and
/// the single active pointer session.
///
/// Nothing here fails loudly. Operations on ids that are no longer
/// registered return `false` / `None` and leave state untouched.
pub struct WindowManager<C> {
    registry: WindowRegistry<C>,
    z_order: ZOrderAllocator,
    taskbar: Taskbar,
    desktop: Size,
    session: Option<PointerSession>,
    next_session: u64,
    // ids closed since the last drain; collaborators drain via `take_closed_windows`
    closed_windows: Vec<WindowId>,
    rng: StdRng,
}

impl<C> Default for WindowManager<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> WindowManager<C> {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Deterministic spawn offsets, for tests and reproducible sessions.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            registry: WindowRegistry::new(),
            z_order: ZOrderAllocator::new(),
            taskbar: Taskbar::new(),
            desktop: Size::new(1024, 768),
            session: None,
            next_session: 1,
            closed_windows: Vec::new(),
            rng,
        }
    }

    pub fn desktop_size(&self) -> Size {
        self.desktop
    }

    /// Updates the desktop area. Maximized windows are refitted so they keep
    /// filling it; their cached restore geometry is untouched.
    pub fn set_desktop_size(&mut self, size: Size) {
        if self.desktop == size {
            return;
        }
        self.desktop = size;
        let full = maximized_geometry(size);
        self.registry
            .for_each(|w| w.is_maximized(), |w| w.set_geometry(full));
    }

    pub fn registry(&self) -> &WindowRegistry<C> {
        &self.registry
    }

    pub fn get(&self, id: WindowId) -> Option<&Window<C>> {
        self.registry.get(id)
    }

    pub fn get_mut(&mut self, id: WindowId) -> Option<&mut Window<C>> {
        self.registry.get_mut(id)
    }

    pub fn contains(&self, id: WindowId) -> bool {
        self.registry.contains(id)
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    pub fn windows(&self) -> impl Iterator<Item = &Window<C>> {
        self.registry.iter()
    }

    pub fn for_each<P, A>(&mut self, predicate: P, action: A)
    where
        P: FnMut(&Window<C>) -> bool,
        A: FnMut(&mut Window<C>),
    {
        self.registry.for_each(predicate, action);
    }

    pub fn ids_matching<P>(&self, predicate: P) -> Vec<WindowId>
    where
        P: FnMut(&Window<C>) -> bool,
    {
        self.registry.ids_matching(predicate)
    }

    pub fn ids_of_kind(&self, kind: WindowKind) -> Vec<WindowId> {
        self.registry.ids_matching(|w| w.kind() == kind)
    }

    /// Creates and registers a window above every existing one.
    pub fn create(
        &mut self,
        kind: WindowKind,
        title: impl Into<String>,
        content: C,
        close_guard: Option<CloseGuard<C>>,
    ) -> WindowId {
        let x = self.rng.gen_range(SPAWN_OFFSET_MIN..=SPAWN_OFFSET_MAX);
        let y = self.rng.gen_range(SPAWN_OFFSET_MIN..=SPAWN_OFFSET_MAX);
        let z = self.z_order.next();
        let window = Window::new(
            kind,
            title.into(),
            Geometry::at(x, y),
            z,
            content,
            close_guard,
        );
        let id = self.registry.register(window);
        tracing::debug!(window_id = %id, ?kind, z = %z, x, y, "opened window");
        self.taskbar.rebuild(&self.registry);
        id
    }

    /// Moves the window above all others. One allocation per call.
    pub fn raise(&mut self, id: WindowId) -> bool {
        if !self.registry.contains(id) {
            tracing::trace!(window_id = %id, "raise ignored: window gone");
            return false;
        }
        let z = self.z_order.next();
        if let Some(window) = self.registry.get_mut(id) {
            window.set_z_order(z);
        }
        true
    }

    /// Toggles between shown and minimized.
    pub fn minimize(&mut self, id: WindowId) -> bool {
        let Some(window) = self.registry.get_mut(id) else {
            tracing::trace!(window_id = %id, "minimize ignored: window gone");
            return false;
        };
        window.toggle_visibility();
        tracing::debug!(window_id = %id, visibility = ?window.visibility(), "toggled visibility");
        self.taskbar.rebuild(&self.registry);
        true
    }

    /// Toggles maximized state. Entering caches the current geometry,
    /// leaving restores it exactly.
    pub fn maximize(&mut self, id: WindowId) -> bool {
        let full = maximized_geometry(self.desktop);
        let Some(window) = self.registry.get_mut(id) else {
            tracing::trace!(window_id = %id, "maximize ignored: window gone");
            return false;
        };
        if window.is_maximized() {
            window.leave_maximized();
        } else {
            window.enter_maximized(full);
        }
        tracing::debug!(window_id = %id, maximized = window.is_maximized(), "toggled maximize");
        self.taskbar.rebuild(&self.registry);
        true
    }

    /// Closes the window unless its guard vetoes. Returns whether it closed.
    pub fn close(&mut self, id: WindowId) -> bool {
        let Some(window) = self.registry.get_mut(id) else {
            tracing::trace!(window_id = %id, "close ignored: window gone");
            return false;
        };
        if !window.allows_close() {
            tracing::debug!(window_id = %id, "close vetoed by guard");
            return false;
        }
        self.remove(id);
        true
    }

    /// Closes every window matching `predicate`, each guard deciding for its
    /// own window. Returns the ids that actually closed.
    pub fn close_all<P>(&mut self, predicate: P) -> Vec<WindowId>
    where
        P: FnMut(&Window<C>) -> bool,
    {
        let targets = self.registry.ids_matching(predicate);
        targets.into_iter().filter(|id| self.close(*id)).collect()
    }

    pub fn close_all_windows(&mut self) -> Vec<WindowId> {
        self.close_all(|_| true)
    }

    /// Removes the window without consulting its guard.
    pub fn force_close(&mut self, id: WindowId) -> bool {
        if !self.registry.contains(id) {
            return false;
        }
        self.remove(id);
        true
    }

    pub fn force_close_matching<P>(&mut self, predicate: P) -> Vec<WindowId>
    where
        P: FnMut(&Window<C>) -> bool,
    {
        let targets = self.registry.ids_matching(predicate);
        targets
            .into_iter()
            .filter(|id| self.force_close(*id))
            .collect()
    }

    fn remove(&mut self, id: WindowId) {
        if self.session.is_some_and(|s| s.window() == id) {
            self.session = None;
        }
        if self.registry.unregister(id).is_some() {
            tracing::debug!(window_id = %id, "closed window");
            self.closed_windows.push(id);
            self.taskbar.rebuild(&self.registry);
        }
    }

    /// Drains the ids closed since the previous call.
    pub fn take_closed_windows(&mut self) -> Vec<WindowId> {
        std::mem::take(&mut self.closed_windows)
    }

    pub fn taskbar(&self) -> &Taskbar {
        &self.taskbar
    }

    /// Taskbar click: toggles the entry's window between shown and minimized.
    pub fn activate_taskbar_entry(&mut self, index: usize) -> bool {
        let Some(id) = self.taskbar.entry(index).map(|e| e.id) else {
            return false;
        };
        self.minimize(id)
    }

    /// Window with the highest z-order, minimized windows included.
    pub fn focused(&self) -> Option<&Window<C>> {
        self.registry.iter().max_by_key(|w| w.z_order())
    }

    /// Window with the highest z-order among shown windows.
    pub fn focused_shown(&self) -> Option<&Window<C>> {
        self.registry
            .iter()
            .filter(|w| w.is_shown())
            .max_by_key(|w| w.z_order())
    }

    /// Shown window ids, bottom to top.
    pub fn draw_order(&self) -> Vec<WindowId> {
        let mut shown: Vec<(ZOrder, WindowId)> = self
            .registry
            .iter()
            .filter(|w| w.is_shown())
            .map(|w| (w.z_order(), w.id()))
            .collect();
        shown.sort();
        shown.into_iter().map(|(_, id)| id).collect()
    }

    /// Topmost shown window under the pointer.
    pub fn window_at(&self, point: Point) -> Option<WindowId> {
        self.registry
            .iter()
            .filter(|w| w.is_shown() && w.geometry().contains(point))
            .max_by_key(|w| w.z_order())
            .map(|w| w.id())
    }

    fn next_token(&mut self) -> SessionToken {
        let token = SessionToken(self.next_session);
        self.next_session = self.next_session.saturating_add(1);
        token
    }

    fn install_session(&mut self, session: PointerSession) {
        if let Some(prev) = self.session.replace(session) {
            tracing::trace!(token = %prev.token(), "pointer session superseded");
        }
    }

    /// Starts moving the window with the pointer and raises it.
    pub fn begin_drag(&mut self, id: WindowId, pointer: Point) -> Option<SessionToken> {
        let origin = self.registry.get(id)?.geometry().origin();
        self.raise(id);
        let token = self.next_token();
        self.install_session(PointerSession::Drag(
            token,
            HeaderDrag::begin(id, origin, pointer),
        ));
        tracing::trace!(window_id = %id, token = %token, "drag started");
        Some(token)
    }

    pub fn drag_to(&mut self, token: SessionToken, pointer: Point) -> bool {
        let Some(PointerSession::Drag(active, drag)) = self.session else {
            return false;
        };
        if active != token {
            return false;
        }
        let Some(window) = self.registry.get_mut(drag.id) else {
            return false;
        };
        let origin = drag.origin_for(pointer);
        let mut geometry = window.geometry();
        geometry.x = origin.x;
        geometry.y = origin.y;
        window.set_geometry(geometry);
        true
    }

    /// Starts resizing from the bottom-right grip and raises the window.
    pub fn begin_resize(&mut self, id: WindowId, pointer: Point) -> Option<SessionToken> {
        let start_size = self.registry.get(id)?.geometry().resolved_size();
        self.raise(id);
        let token = self.next_token();
        self.install_session(PointerSession::Resize(
            token,
            ResizeDrag::begin(id, start_size, pointer),
        ));
        tracing::trace!(window_id = %id, token = %token, "resize started");
        Some(token)
    }

    pub fn resize_to(&mut self, token: SessionToken, pointer: Point) -> bool {
        let Some(PointerSession::Resize(active, drag)) = self.session else {
            return false;
        };
        if active != token {
            return false;
        }
        let Some(window) = self.registry.get_mut(drag.id) else {
            return false;
        };
        let size = drag.size_for(pointer);
        let mut geometry = window.geometry();
        geometry.width = Some(size.width);
        geometry.height = Some(size.height);
        window.set_geometry(geometry);
        true
    }

    /// Pointer release, wherever it happens. Stale tokens are ignored.
    pub fn end_pointer_session(&mut self, token: SessionToken) -> bool {
        if self.session.is_some_and(|s| s.token() == token) {
            self.session = None;
            tracing::trace!(token = %token, "pointer session ended");
            return true;
        }
        false
    }

    pub fn active_session(&self) -> Option<(SessionToken, WindowId)> {
        self.session.map(|s| (s.token(), s.window()))
    }
}

impl<C> fmt::Debug for WindowManager<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WindowManager")
            .field("windows", &self.registry.len())
            .field("desktop", &self.desktop)
            .field("z_order", &self.z_order.current())
            .field("session", &self.session)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{MIN_WINDOW_HEIGHT, MIN_WINDOW_WIDTH, TASKBAR_HEIGHT};
    use crate::window::Visibility;
    use std::collections::BTreeSet;

    fn wm() -> WindowManager<()> {
        WindowManager::with_seed(7)
    }

    fn open(wm: &mut WindowManager<()>, title: &str) -> WindowId {
        wm.create(WindowKind::Generic, title, (), None)
    }

    fn guarded(wm: &mut WindowManager<()>, title: &str, allow: bool) -> WindowId {
        wm.create(WindowKind::Generic, title, (), Some(Box::new(move |_| allow)))
    }

    fn z(wm: &WindowManager<()>, id: WindowId) -> ZOrder {
        wm.get(id).map(|w| w.z_order()).expect("window present")
    }

    #[test]
    fn spawn_offset_within_range() {
        let mut wm = wm();
        for i in 0..50 {
            let id = open(&mut wm, &format!("w{i}"));
            let g = wm.get(id).map(|w| w.geometry()).expect("window present");
            assert!((SPAWN_OFFSET_MIN..=SPAWN_OFFSET_MAX).contains(&g.x));
            assert!((SPAWN_OFFSET_MIN..=SPAWN_OFFSET_MAX).contains(&g.y));
            assert_eq!(g.width, None);
            assert_eq!(g.height, None);
        }
    }

    #[test]
    fn ids_unique_and_never_reused() {
        let mut wm = wm();
        let mut seen = BTreeSet::new();
        for i in 0..20 {
            assert!(seen.insert(open(&mut wm, &format!("w{i}"))));
        }
        let victims: Vec<WindowId> = seen.iter().copied().take(10).collect();
        for id in victims {
            assert!(wm.close(id));
        }
        for i in 0..10 {
            assert!(seen.insert(open(&mut wm, &format!("again{i}"))));
        }
    }

    #[test]
    fn creation_raises_above_existing() {
        let mut wm = wm();
        let a = open(&mut wm, "A");
        let b = open(&mut wm, "B");
        assert!(z(&wm, b) > z(&wm, a));
    }

    #[test]
    fn minimize_toggles_and_syncs_taskbar() {
        let mut wm = wm();
        let a = open(&mut wm, "A");
        assert!(wm.minimize(a));
        assert_eq!(wm.get(a).map(|w| w.visibility()), Some(Visibility::Minimized));
        assert_eq!(wm.taskbar().entry_for(a).map(|e| e.active), Some(false));
        assert!(wm.minimize(a));
        assert_eq!(wm.get(a).map(|w| w.visibility()), Some(Visibility::Shown));
        assert_eq!(wm.taskbar().entry_for(a).map(|e| e.active), Some(true));
        assert!(!wm.minimize(WindowId::new(999)));
    }

    #[test]
    fn maximize_round_trip_is_exact() {
        let mut wm = wm();
        wm.set_desktop_size(Size::new(1280, 800));
        let a = open(&mut wm, "A");
        let before = wm.get(a).map(|w| w.geometry()).expect("window present");

        assert!(wm.maximize(a));
        let full = wm.get(a).map(|w| w.geometry()).expect("window present");
        assert_eq!(full, Geometry::sized(0, 0, 1280, 800 - TASKBAR_HEIGHT));
        assert_eq!(wm.get(a).and_then(|w| w.restore_geometry()), Some(before));

        assert!(wm.maximize(a));
        assert_eq!(wm.get(a).map(|w| w.geometry()), Some(before));

        // twice more after a resize so the sizes are explicit
        let t = wm.begin_resize(a, Point::new(0, 0)).expect("token");
        wm.resize_to(t, Point::new(17, 33));
        wm.end_pointer_session(t);
        let sized = wm.get(a).map(|w| w.geometry()).expect("window present");
        wm.maximize(a);
        wm.maximize(a);
        assert_eq!(wm.get(a).map(|w| w.geometry()), Some(sized));
    }

    #[test]
    fn maximized_windows_follow_desktop_resize() {
        let mut wm = wm();
        let a = open(&mut wm, "A");
        let before = wm.get(a).map(|w| w.geometry()).expect("window present");
        wm.maximize(a);
        wm.set_desktop_size(Size::new(640, 480));
        assert_eq!(
            wm.get(a).map(|w| w.geometry()),
            Some(Geometry::sized(0, 0, 640, 480 - TASKBAR_HEIGHT))
        );
        wm.maximize(a);
        assert_eq!(wm.get(a).map(|w| w.geometry()), Some(before));
    }

    #[test]
    fn guarded_close() {
        let mut wm = wm();
        let keep = guarded(&mut wm, "keep", false);
        let go = guarded(&mut wm, "go", true);
        let plain = open(&mut wm, "plain");
        assert!(!wm.close(keep));
        assert!(wm.contains(keep));
        assert!(wm.close(go));
        assert!(!wm.contains(go));
        assert!(wm.close(plain));
        assert!(!wm.contains(plain));
        assert_eq!(wm.take_closed_windows(), vec![go, plain]);
        assert!(wm.take_closed_windows().is_empty());
    }

    #[test]
    fn close_missing_is_noop() {
        let mut wm = wm();
        let a = open(&mut wm, "A");
        assert!(wm.close(a));
        assert!(!wm.close(a));
        assert!(!wm.maximize(a));
        assert!(!wm.raise(a));
    }

    #[test]
    fn close_all_partial_failure() {
        let mut wm = wm();
        let first = open(&mut wm, "first");
        let second = guarded(&mut wm, "second", false);
        let third = open(&mut wm, "third");
        let closed = wm.close_all_windows();
        assert_eq!(closed, vec![first, third]);
        assert_eq!(wm.registry().ids(), vec![second]);
        assert_eq!(wm.taskbar().len(), 1);
    }

    #[test]
    fn force_close_ignores_guard() {
        let mut wm: WindowManager<()> = wm();
        let a = wm.create(WindowKind::FileExplorer, "File Explorer", (), Some(Box::new(|_| false)));
        let b = wm.create(WindowKind::Notepad, "Notepad", (), None);
        let closed = wm.force_close_matching(|w| w.kind() == WindowKind::FileExplorer);
        assert_eq!(closed, vec![a]);
        assert!(wm.contains(b));
    }

    #[test]
    fn taskbar_matches_registry_after_mixed_operations() {
        let mut wm = wm();
        let a = open(&mut wm, "A");
        let b = open(&mut wm, "B");
        let c = open(&mut wm, "C");
        wm.minimize(b);
        wm.close(a);
        let d = open(&mut wm, "D");
        wm.minimize(d);
        wm.minimize(d);
        wm.minimize(c);

        let expected: Vec<(String, bool)> = wm
            .windows()
            .map(|w| (w.title().to_string(), w.is_shown()))
            .collect();
        let actual: Vec<(String, bool)> = wm
            .taskbar()
            .entries()
            .iter()
            .map(|e| (e.label.clone(), e.active))
            .collect();
        assert_eq!(actual, expected);
    }

    #[test]
    fn taskbar_activation_toggles_visibility() {
        let mut wm = wm();
        let a = open(&mut wm, "A");
        assert!(wm.activate_taskbar_entry(0));
        assert_eq!(wm.get(a).map(|w| w.is_shown()), Some(false));
        assert!(wm.activate_taskbar_entry(0));
        assert_eq!(wm.get(a).map(|w| w.is_shown()), Some(true));
        assert!(!wm.activate_taskbar_entry(3));
    }

    #[test]
    fn focus_follows_highest_z_order() {
        let mut wm = wm();
        let a = open(&mut wm, "A");
        let b = open(&mut wm, "B");
        let c = open(&mut wm, "C");
        wm.raise(c);
        wm.raise(b);
        assert_eq!(wm.focused().map(|w| w.id()), Some(b));
        wm.begin_drag(a, Point::new(60, 60));
        assert_eq!(wm.focused().map(|w| w.id()), Some(a));
    }

    #[test]
    fn focused_includes_minimized_but_focused_shown_does_not() {
        let mut wm = wm();
        let a = open(&mut wm, "A");
        let b = open(&mut wm, "B");
        wm.minimize(b);
        assert_eq!(wm.focused().map(|w| w.id()), Some(b));
        assert_eq!(wm.focused_shown().map(|w| w.id()), Some(a));
        assert!(WindowManager::<()>::with_seed(1).focused().is_none());
    }

    #[test]
    fn drag_moves_by_captured_offset() {
        let mut wm = wm();
        let a = open(&mut wm, "A");
        let origin = wm.get(a).map(|w| w.geometry().origin()).expect("window present");
        let grab = Point::new(origin.x + 12, origin.y + 4);
        let z_before = z(&wm, a);
        let token = wm.begin_drag(a, grab).expect("token");
        let z_after = z(&wm, a);
        assert!(z_after > z_before);

        assert!(wm.drag_to(token, Point::new(312, 204)));
        assert!(wm.drag_to(token, Point::new(-100, -50)));
        assert_eq!(
            wm.get(a).map(|w| w.geometry().origin()),
            Some(Point::new(-112, -54))
        );
        // moves do not allocate new z-orders
        assert_eq!(z(&wm, a), z_after);
        assert!(wm.end_pointer_session(token));
        assert!(!wm.drag_to(token, Point::new(0, 0)));
        assert_eq!(
            wm.get(a).map(|w| w.geometry().origin()),
            Some(Point::new(-112, -54))
        );
    }

    #[test]
    fn resize_respects_floors() {
        let mut wm = wm();
        let a = open(&mut wm, "A");
        let token = wm.begin_resize(a, Point::new(500, 400)).expect("token");
        assert!(wm.resize_to(token, Point::new(-5000, -5000)));
        let g = wm.get(a).map(|w| w.geometry()).expect("window present");
        assert_eq!(g.width, Some(MIN_WINDOW_WIDTH));
        assert_eq!(g.height, Some(MIN_WINDOW_HEIGHT));
        assert!(wm.resize_to(token, Point::new(600, 450)));
        let g = wm.get(a).map(|w| w.geometry()).expect("window present");
        assert_eq!(g.width, Some(500));
        assert_eq!(g.height, Some(350));
        // drag tokens do not drive resizes
        assert!(!wm.drag_to(token, Point::new(0, 0)));
    }

    #[test]
    fn new_session_supersedes_old_token() {
        let mut wm = wm();
        let a = open(&mut wm, "A");
        let b = open(&mut wm, "B");
        let first = wm.begin_drag(a, Point::new(60, 60)).expect("token");
        let second = wm.begin_resize(b, Point::new(60, 60)).expect("token");
        assert_ne!(first, second);
        assert!(!wm.drag_to(first, Point::new(0, 0)));
        assert!(!wm.end_pointer_session(first));
        assert_eq!(wm.active_session(), Some((second, b)));
        assert!(wm.end_pointer_session(second));
        assert_eq!(wm.active_session(), None);
    }

    #[test]
    fn closing_dragged_window_makes_late_events_noops() {
        let mut wm = wm();
        let a = open(&mut wm, "A");
        let token = wm.begin_drag(a, Point::new(60, 60)).expect("token");
        assert!(wm.close(a));
        assert!(!wm.drag_to(token, Point::new(10, 10)));
        assert!(!wm.end_pointer_session(token));
        assert!(wm.begin_drag(a, Point::new(0, 0)).is_none());
        assert!(wm.begin_resize(a, Point::new(0, 0)).is_none());
    }

    #[test]
    fn window_at_picks_topmost_shown() {
        let mut wm = wm();
        let a = open(&mut wm, "A");
        let b = open(&mut wm, "B");
        let p = Point::new(160, 160);
        assert_eq!(wm.window_at(p), Some(b));
        wm.minimize(b);
        assert_eq!(wm.window_at(p), Some(a));
        assert_eq!(wm.draw_order(), vec![a]);
        assert_eq!(wm.window_at(Point::new(-1, -1)), None);
    }
}
