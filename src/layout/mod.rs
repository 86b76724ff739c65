pub mod floating;

use ratatui::prelude::Rect;

use crate::constants::{CELL_HEIGHT_PX, CELL_WIDTH_PX};
use crate::window::{Geometry, Point, Size};

/// Clickable areas recorded while drawing, hit-tested on the next pointer
/// event. Later entries win, matching draw order.
#[derive(Debug, Clone)]
pub struct RegionMap<T: Copy> {
    regions: Vec<(T, Rect)>,
}

impl<T: Copy> Default for RegionMap<T> {
    fn default() -> Self {
        Self {
            regions: Vec::new(),
        }
    }
}

impl<T: Copy> RegionMap<T> {
    pub fn clear(&mut self) {
        self.regions.clear();
    }

    pub fn push(&mut self, target: T, rect: Rect) {
        if rect.width > 0 && rect.height > 0 {
            self.regions.push((target, rect));
        }
    }

    pub fn hit_test(&self, column: u16, row: u16) -> Option<T> {
        self.regions
            .iter()
            .rev()
            .find(|(_, rect)| rect_contains(*rect, column, row))
            .map(|(target, _)| *target)
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

pub fn rect_contains(rect: Rect, column: u16, row: u16) -> bool {
    if rect.width == 0 || rect.height == 0 {
        return false;
    }
    let max_x = rect.x.saturating_add(rect.width);
    let max_y = rect.y.saturating_add(rect.height);
    column >= rect.x && column < max_x && row >= rect.y && row < max_y
}

/// Desktop pixel under the centre of a terminal cell.
pub fn cell_to_point(column: u16, row: u16) -> Point {
    Point::new(
        (column as u32 * CELL_WIDTH_PX + CELL_WIDTH_PX / 2) as i32,
        (row as u32 * CELL_HEIGHT_PX + CELL_HEIGHT_PX / 2) as i32,
    )
}

/// Desktop size in pixels for a terminal area.
pub fn desktop_size_for(area: Rect) -> Size {
    Size::new(
        area.width as u32 * CELL_WIDTH_PX,
        area.height as u32 * CELL_HEIGHT_PX,
    )
}

/// Signed cell rectangle covering a window geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRect {
    pub x: i32,
    pub y: i32,
    pub width: u16,
    pub height: u16,
}

impl CellRect {
    pub fn from_geometry(geometry: Geometry) -> Self {
        let size = geometry.resolved_size();
        let cw = CELL_WIDTH_PX as i32;
        let ch = CELL_HEIGHT_PX as i32;
        Self {
            x: geometry.x.div_euclid(cw),
            y: geometry.y.div_euclid(ch),
            width: (size.width / CELL_WIDTH_PX).clamp(1, u16::MAX as u32) as u16,
            height: (size.height / CELL_HEIGHT_PX).clamp(1, u16::MAX as u32) as u16,
        }
    }

    /// Part of the rectangle visible inside `bounds`.
    pub fn visible(&self, bounds: Rect) -> Rect {
        let left = self.x.max(bounds.x as i32);
        let top = self.y.max(bounds.y as i32);
        let right = (self.x + self.width as i32).min(bounds.x as i32 + bounds.width as i32);
        let bottom = (self.y + self.height as i32).min(bounds.y as i32 + bounds.height as i32);
        if right <= left || bottom <= top {
            return Rect::default();
        }
        Rect {
            x: left as u16,
            y: top as u16,
            width: (right - left) as u16,
            height: (bottom - top) as u16,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_map_prefers_last_pushed() {
        let mut map = RegionMap::default();
        map.push(
            1u8,
            Rect {
                x: 0,
                y: 0,
                width: 10,
                height: 10,
            },
        );
        map.push(
            2u8,
            Rect {
                x: 5,
                y: 5,
                width: 10,
                height: 10,
            },
        );
        assert_eq!(map.hit_test(6, 6), Some(2));
        assert_eq!(map.hit_test(1, 1), Some(1));
        assert_eq!(map.hit_test(100, 100), None);
        map.push(3u8, Rect::default());
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn rect_contains_edge_cases() {
        let empty = Rect {
            x: 0,
            y: 0,
            width: 0,
            height: 5,
        };
        assert!(!rect_contains(empty, 0, 0));
        let r = Rect {
            x: 1,
            y: 1,
            width: 3,
            height: 3,
        };
        assert!(rect_contains(r, 1, 1));
        assert!(!rect_contains(r, 4, 1));
    }

    #[test]
    fn cell_rect_round_trips_through_pixels() {
        let g = Geometry::sized(80, 100, 400, 300);
        let cells = CellRect::from_geometry(g);
        assert_eq!(
            cells,
            CellRect {
                x: 10,
                y: 5,
                width: 50,
                height: 15
            }
        );
        let p = cell_to_point(10, 5);
        assert!(g.contains(p));
    }

    #[test]
    fn cell_rect_visible_clips_negative_offsets() {
        let bounds = Rect {
            x: 0,
            y: 0,
            width: 80,
            height: 24,
        };
        let rect = CellRect {
            x: -5,
            y: 3,
            width: 20,
            height: 6,
        };
        let visible = rect.visible(bounds);
        assert_eq!(visible.x, 0);
        assert_eq!(visible.y, 3);
        assert_eq!(visible.width, 15);
        assert_eq!(visible.height, 6);
    }
}
