use ratatui::layout::Rect;
use ratatui::style::Style;

use crate::ui::{UiFrame, safe_set_string, truncate_to_width};

/// One-row strip with left-aligned text and an optional right-aligned tail.
pub struct StatusBar {
    left: String,
    right: String,
    style: Style,
}

impl StatusBar {
    pub fn new() -> Self {
        Self {
            left: String::new(),
            right: String::new(),
            style: Style::default(),
        }
    }

    pub fn set_left<T: Into<String>>(&mut self, value: T) {
        self.left = value.into();
    }

    pub fn set_right<T: Into<String>>(&mut self, value: T) {
        self.right = value.into();
    }

    pub fn set_style(&mut self, style: Style) {
        self.style = style;
    }
}

impl Default for StatusBar {
    fn default() -> Self {
        Self::new()
    }
}

impl super::Component for StatusBar {
    fn render(&self, frame: &mut UiFrame<'_>, area: Rect, _ctx: &super::ComponentContext) {
        if area.height == 0 || area.width == 0 {
            return;
        }
        frame.fill(Rect { height: 1, ..area }, self.style);
        let (x, y) = (area.x, area.y);
        let width = area.width as usize;
        let bounds = area.intersection(frame.area());
        let buffer = frame.buffer_mut();

        // the right text wins the space it needs; left is cut short
        let right = truncate_to_width(&self.right, width.saturating_sub(1));
        let right_width = right.chars().count();
        let left_room = if right_width == 0 {
            width
        } else {
            width.saturating_sub(right_width + 2)
        };
        let left = truncate_to_width(&self.left, left_room.saturating_sub(1));
        safe_set_string(buffer, bounds, x.saturating_add(1), y, &left, self.style);

        if right_width > 0 {
            let start_x = x.saturating_add((width - right_width - 1) as u16);
            safe_set_string(buffer, bounds, start_x, y, &right, self.style);
        }
    }
}
