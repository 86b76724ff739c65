use ratatui::layout::Rect;

use crate::desktop::HitTarget;
use crate::layout::{CellRect, RegionMap};
use crate::ui::UiFrame;

pub mod dialog_overlay;
pub mod status_bar;
pub mod taskbar_view;

pub use dialog_overlay::DialogOverlay;
pub use status_bar::StatusBar;
pub use taskbar_view::TaskbarView;

pub use crate::component_context::ComponentContext;

/// Something that draws itself into a rectangle and knows which parts of it
/// are clickable.
pub trait Component {
    fn render(&self, frame: &mut UiFrame<'_>, area: Rect, ctx: &ComponentContext);

    /// Reports clickable areas in the same coordinates `render` drew in.
    fn hit_regions(&self, _area: Rect, _ctx: &ComponentContext, _sink: &mut RegionSink<'_>) {}
}

/// Translates component-local rectangles to screen cells before recording
/// them, clipping to what is actually visible.
pub struct RegionSink<'a> {
    regions: &'a mut RegionMap<HitTarget>,
    origin_x: i32,
    origin_y: i32,
    bounds: Rect,
}

impl<'a> RegionSink<'a> {
    pub fn new(
        regions: &'a mut RegionMap<HitTarget>,
        origin_x: i32,
        origin_y: i32,
        bounds: Rect,
    ) -> Self {
        Self {
            regions,
            origin_x,
            origin_y,
            bounds,
        }
    }

    pub fn push(&mut self, target: HitTarget, local: Rect) {
        let rect = CellRect {
            x: self.origin_x + local.x as i32,
            y: self.origin_y + local.y as i32,
            width: local.width,
            height: local.height,
        };
        self.regions.push(target, rect.visible(self.bounds));
    }
}
