//! Window chrome in terminal cells: title bar with its three buttons, side
//! and bottom borders, and the resize grip in the bottom-right corner.

use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};

use super::Geometry;
use crate::layout::CellRect;
use crate::theme;
use crate::ui::UiFrame;

pub const MINIMIZE_LABEL: &str = "[_]";
pub const MAXIMIZE_LABEL: &str = "[□]";
pub const CLOSE_LABEL: &str = "[x]";
const BUTTON_WIDTH: u16 = 3;
const GRIP_SYMBOL: &str = "◢";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowChrome {
    pub frame: CellRect,
    pub title_bar: CellRect,
    pub minimize: CellRect,
    pub maximize: CellRect,
    pub close: CellRect,
    pub body: CellRect,
    pub grip: CellRect,
}

impl WindowChrome {
    pub fn for_geometry(geometry: Geometry) -> Self {
        let frame = CellRect::from_geometry(geometry);
        let right = frame.x + frame.width as i32;
        let bottom = frame.y + frame.height as i32;
        // buttons sit right-aligned with one blank between them
        let button = |slot: i32| CellRect {
            x: right - (BUTTON_WIDTH as i32 + 1) * slot,
            y: frame.y,
            width: BUTTON_WIDTH,
            height: 1,
        };
        Self {
            frame,
            title_bar: CellRect {
                height: 1,
                ..frame
            },
            minimize: button(3),
            maximize: button(2),
            close: button(1),
            body: CellRect {
                x: frame.x + 1,
                y: frame.y + 1,
                width: frame.width.saturating_sub(2),
                height: frame.height.saturating_sub(2),
            },
            grip: CellRect {
                x: right - 1,
                y: bottom - 1,
                width: 1,
                height: 1,
            },
        }
    }

    /// Columns left for the title text, between the left edge and the
    /// minimize button.
    pub fn title_width(&self) -> usize {
        (self.minimize.x - self.frame.x - 2).max(0) as usize
    }
}

/// Paints the chrome. Later windows paint over earlier ones, so nothing here
/// needs to know about occlusion.
pub fn draw_chrome(
    frame: &mut UiFrame<'_>,
    chrome: &WindowChrome,
    bounds: Rect,
    title: &str,
    focused: bool,
) {
    let visible = chrome.frame.visible(bounds);
    if visible.width == 0 || visible.height == 0 {
        return;
    }
    let border = Style::default()
        .bg(theme::window_bg())
        .fg(theme::title_bg(focused));
    frame.fill(visible, Style::default().bg(theme::window_bg()));

    let mut header = Style::default()
        .bg(theme::title_bg(focused))
        .fg(theme::title_fg());
    if focused {
        header = header.add_modifier(Modifier::BOLD);
    }
    frame.fill(chrome.title_bar.visible(bounds), header);
    let title: String = title.chars().take(chrome.title_width()).collect();
    frame.set_string_signed(bounds, chrome.frame.x + 1, chrome.frame.y, &title, header);
    for (rect, label) in [
        (chrome.minimize, MINIMIZE_LABEL),
        (chrome.maximize, MAXIMIZE_LABEL),
        (chrome.close, CLOSE_LABEL),
    ] {
        let style = if label == CLOSE_LABEL {
            header.fg(theme::close_button_fg())
        } else {
            header
        };
        frame.set_string_signed(bounds, rect.x, rect.y, label, style);
    }

    let left = chrome.frame.x;
    let right = chrome.frame.x + chrome.frame.width as i32 - 1;
    let bottom = chrome.frame.y + chrome.frame.height as i32 - 1;
    for y in chrome.frame.y + 1..bottom {
        frame.set_string_signed(bounds, left, y, "│", border);
        frame.set_string_signed(bounds, right, y, "│", border);
    }
    if bottom > chrome.frame.y {
        let inner = chrome.frame.width.saturating_sub(2) as usize;
        let line = format!("└{}┘", "─".repeat(inner));
        frame.set_string_signed(bounds, left, bottom, &line, border);
        frame.set_string_signed(
            bounds,
            chrome.grip.x,
            chrome.grip.y,
            GRIP_SYMBOL,
            border.add_modifier(Modifier::BOLD),
        );
    }
}
