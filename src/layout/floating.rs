use crate::constants::{MIN_WINDOW_HEIGHT, MIN_WINDOW_WIDTH, TASKBAR_HEIGHT};
use crate::window::{Geometry, Point, Size, WindowId};

/// Title-bar drag in progress. The offset is the pointer position relative
/// to the window's top-left corner when the drag started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderDrag {
    pub id: WindowId,
    pub offset_x: i32,
    pub offset_y: i32,
}

impl HeaderDrag {
    pub fn begin(id: WindowId, origin: Point, pointer: Point) -> Self {
        Self {
            id,
            offset_x: pointer.x.saturating_sub(origin.x),
            offset_y: pointer.y.saturating_sub(origin.y),
        }
    }

    /// Origin the window should take for the current pointer position.
    pub fn origin_for(&self, pointer: Point) -> Point {
        Point::new(
            pointer.x.saturating_sub(self.offset_x),
            pointer.y.saturating_sub(self.offset_y),
        )
    }
}

/// Resize-grip drag in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeDrag {
    pub id: WindowId,
    pub start_pointer: Point,
    pub start_size: Size,
}

impl ResizeDrag {
    pub fn begin(id: WindowId, start_size: Size, pointer: Point) -> Self {
        Self {
            id,
            start_pointer: pointer,
            start_size,
        }
    }

    pub fn size_for(&self, pointer: Point) -> Size {
        apply_resize_drag(self.start_size, self.start_pointer, pointer)
    }
}

/// New size for a bottom-right grip drag. The minimums are hard floors no
/// matter where the pointer goes.
pub fn apply_resize_drag(start: Size, start_pointer: Point, pointer: Point) -> Size {
    let dx = pointer.x as i64 - start_pointer.x as i64;
    let dy = pointer.y as i64 - start_pointer.y as i64;
    let width = (start.width as i64 + dx).clamp(MIN_WINDOW_WIDTH as i64, u32::MAX as i64);
    let height = (start.height as i64 + dy).clamp(MIN_WINDOW_HEIGHT as i64, u32::MAX as i64);
    Size::new(width as u32, height as u32)
}

/// Geometry of a maximized window: the whole desktop minus the taskbar strip.
pub fn maximized_geometry(desktop: Size) -> Geometry {
    Geometry::sized(
        0,
        0,
        desktop.width,
        desktop.height.saturating_sub(TASKBAR_HEIGHT),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_drag_keeps_grab_offset() {
        let id = WindowId::new(1);
        let drag = HeaderDrag::begin(id, Point::new(100, 80), Point::new(130, 90));
        assert_eq!(drag.offset_x, 30);
        assert_eq!(drag.offset_y, 10);
        assert_eq!(drag.origin_for(Point::new(30, 10)), Point::new(0, 0));
        // no clamping: the window may leave the desktop
        assert_eq!(drag.origin_for(Point::new(0, 0)), Point::new(-30, -10));
    }

    #[test]
    fn resize_grows_with_pointer() {
        let start = Size::new(400, 300);
        let res = apply_resize_drag(start, Point::new(500, 400), Point::new(560, 450));
        assert_eq!(res, Size::new(460, 350));
    }

    #[test]
    fn resize_never_goes_below_floor() {
        let start = Size::new(400, 300);
        let origin = Point::new(500, 400);
        for (dx, dy) in [(-10_000, -10_000), (-151, -101), (-150, -100), (0, -5000)] {
            let res = apply_resize_drag(start, origin, Point::new(500 + dx, 400 + dy));
            assert!(res.width >= MIN_WINDOW_WIDTH, "width {} for dx {dx}", res.width);
            assert!(res.height >= MIN_WINDOW_HEIGHT, "height {} for dy {dy}", res.height);
        }
        let exact = apply_resize_drag(start, origin, Point::new(350, 300));
        assert_eq!(exact, Size::new(MIN_WINDOW_WIDTH, MIN_WINDOW_HEIGHT));
    }

    #[test]
    fn resize_handles_extreme_pointer_values() {
        let start = Size::new(300, 250);
        let res = apply_resize_drag(start, Point::new(i32::MAX, i32::MAX), Point::new(i32::MIN, i32::MIN));
        assert_eq!(res, Size::new(MIN_WINDOW_WIDTH, MIN_WINDOW_HEIGHT));
    }

    #[test]
    fn maximized_reserves_taskbar() {
        let g = maximized_geometry(Size::new(1024, 768));
        assert_eq!(g, Geometry::sized(0, 0, 1024, 768 - TASKBAR_HEIGHT));
        let tiny = maximized_geometry(Size::new(10, 10));
        assert_eq!(tiny.height, Some(0));
    }
}
