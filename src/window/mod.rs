pub mod decorator;
pub mod registry;
pub mod z_order;

mod window_manager;

use std::fmt;

use crate::constants::{DEFAULT_WINDOW_HEIGHT, DEFAULT_WINDOW_WIDTH};

pub use registry::WindowRegistry;
pub use window_manager::{SessionToken, WindowManager};
pub use z_order::{ZOrder, ZOrderAllocator};

/// Opaque window identifier. Allocated by the registry and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WindowId(u64);

impl WindowId {
    pub(crate) fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "win_{}", self.0)
    }
}

/// What a window is, set once at creation.
///
/// Collaborators query this instead of comparing display titles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WindowKind {
    FileExplorer,
    Notepad,
    RecycleBin,
    Wallpapers,
    Generic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Shown,
    Minimized,
}

/// Pointer position in desktop pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Signed origin with an optional size. `None` means the size is automatic
/// and has not been set by a resize or maximize yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Geometry {
    pub x: i32,
    pub y: i32,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl Geometry {
    pub const fn at(x: i32, y: i32) -> Self {
        Self {
            x,
            y,
            width: None,
            height: None,
        }
    }

    pub const fn sized(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width: Some(width),
            height: Some(height),
        }
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Size with automatic dimensions replaced by the defaults.
    pub fn resolved_size(&self) -> Size {
        Size {
            width: self.width.unwrap_or(DEFAULT_WINDOW_WIDTH),
            height: self.height.unwrap_or(DEFAULT_WINDOW_HEIGHT),
        }
    }

    pub fn contains(&self, point: Point) -> bool {
        let size = self.resolved_size();
        let right = self.x as i64 + size.width as i64;
        let bottom = self.y as i64 + size.height as i64;
        (point.x as i64) >= self.x as i64
            && (point.x as i64) < right
            && (point.y as i64) >= self.y as i64
            && (point.y as i64) < bottom
    }
}

/// Predicate consulted before a window closes. Returning `false` vetoes the
/// close and leaves the window fully interactive.
pub type CloseGuard<C> = Box<dyn FnMut(&C) -> bool>;

/// One on-screen panel and the collaborator content it carries.
pub struct Window<C> {
    id: WindowId,
    kind: WindowKind,
    title: String,
    geometry: Geometry,
    restore_geometry: Option<Geometry>,
    z_order: ZOrder,
    visibility: Visibility,
    maximized: bool,
    close_guard: Option<CloseGuard<C>>,
    content: C,
}

impl<C> Window<C> {
    pub(crate) fn new(
        kind: WindowKind,
        title: String,
        geometry: Geometry,
        z_order: ZOrder,
        content: C,
        close_guard: Option<CloseGuard<C>>,
    ) -> Self {
        Self {
            id: WindowId::new(0),
            kind,
            title,
            geometry,
            restore_geometry: None,
            z_order,
            visibility: Visibility::Shown,
            maximized: false,
            close_guard,
            content,
        }
    }

    pub fn id(&self) -> WindowId {
        self.id
    }

    pub(crate) fn set_id(&mut self, id: WindowId) {
        self.id = id;
    }

    pub fn kind(&self) -> WindowKind {
        self.kind
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    pub(crate) fn set_geometry(&mut self, geometry: Geometry) {
        self.geometry = geometry;
    }

    pub fn z_order(&self) -> ZOrder {
        self.z_order
    }

    pub(crate) fn set_z_order(&mut self, z_order: ZOrder) {
        self.z_order = z_order;
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn is_shown(&self) -> bool {
        self.visibility == Visibility::Shown
    }

    pub(crate) fn toggle_visibility(&mut self) {
        self.visibility = match self.visibility {
            Visibility::Shown => Visibility::Minimized,
            Visibility::Minimized => Visibility::Shown,
        };
    }

    pub fn is_maximized(&self) -> bool {
        self.maximized
    }

    pub fn restore_geometry(&self) -> Option<Geometry> {
        self.restore_geometry
    }

    pub(crate) fn enter_maximized(&mut self, full: Geometry) {
        self.restore_geometry = Some(self.geometry);
        self.geometry = full;
        self.maximized = true;
    }

    pub(crate) fn leave_maximized(&mut self) {
        if let Some(prev) = self.restore_geometry.take() {
            self.geometry = prev;
        }
        self.maximized = false;
    }

    pub fn content(&self) -> &C {
        &self.content
    }

    pub fn content_mut(&mut self) -> &mut C {
        &mut self.content
    }

    pub fn has_close_guard(&self) -> bool {
        self.close_guard.is_some()
    }

    /// Runs the close guard, if any. Windows without a guard always allow the
    /// close.
    pub(crate) fn allows_close(&mut self) -> bool {
        match self.close_guard.as_mut() {
            Some(guard) => guard(&self.content),
            None => true,
        }
    }
}

impl<C> fmt::Debug for Window<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Window")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("title", &self.title)
            .field("geometry", &self.geometry)
            .field("z_order", &self.z_order)
            .field("visibility", &self.visibility)
            .field("maximized", &self.maximized)
            .field("guarded", &self.close_guard.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auto_size_resolves_to_defaults() {
        let g = Geometry::at(10, 20);
        assert_eq!(
            g.resolved_size(),
            Size::new(DEFAULT_WINDOW_WIDTH, DEFAULT_WINDOW_HEIGHT)
        );
        let sized = Geometry::sized(0, 0, 300, 250);
        assert_eq!(sized.resolved_size(), Size::new(300, 250));
    }

    #[test]
    fn contains_handles_negative_origin() {
        let g = Geometry::sized(-50, -10, 100, 40);
        assert!(g.contains(Point::new(-50, -10)));
        assert!(g.contains(Point::new(49, 29)));
        assert!(!g.contains(Point::new(50, 0)));
        assert!(!g.contains(Point::new(0, 30)));
    }

    #[test]
    fn guard_sees_content() {
        let mut w = Window::new(
            WindowKind::Notepad,
            "Notepad".into(),
            Geometry::default(),
            ZOrder::new(101),
            true,
            Some(Box::new(|clean: &bool| *clean)),
        );
        assert!(w.allows_close());
        *w.content_mut() = false;
        assert!(!w.allows_close());
    }

    #[test]
    fn maximize_cache_is_exact() {
        let mut w = Window::new(
            WindowKind::Generic,
            "x".into(),
            Geometry::at(70, 90),
            ZOrder::new(101),
            (),
            None,
        );
        w.enter_maximized(Geometry::sized(0, 0, 800, 560));
        assert!(w.is_maximized());
        assert_eq!(w.restore_geometry(), Some(Geometry::at(70, 90)));
        w.leave_maximized();
        assert_eq!(w.geometry(), Geometry::at(70, 90));
        assert_eq!(w.restore_geometry(), None);
    }
}
