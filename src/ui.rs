//! Drawing surface and the top-level desktop render pass.
//!
//! `UiFrame` wraps a ratatui buffer and clips every draw call to the visible
//! area. Windows may sit partly off-screen (negative origins are legal), so
//! window content is painted into an offscreen buffer at its full size and
//! then composited with [`UiFrame::blit_from_signed`].

use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::{StatefulWidget, Widget};

use crate::components::{
    Component, ComponentContext, DialogOverlay, RegionSink, StatusBar, TaskbarView,
};
use crate::apps::Wallpaper;
use crate::constants::{CELL_HEIGHT_PX, TASKBAR_HEIGHT};
use crate::desktop::{Desktop, HitTarget};
use crate::keybindings::Action;
use crate::layout::{CellRect, RegionMap};
use crate::store::Storage;
use crate::theme;
use crate::window::decorator::{WindowChrome, draw_chrome};

/// Wrapper around a ratatui buffer that clamps drawing to the visible area.
pub struct UiFrame<'a> {
    area: Rect,
    buffer: &'a mut Buffer,
}

impl<'a> UiFrame<'a> {
    pub fn new(frame: &'a mut Frame<'_>) -> Self {
        let area = frame.area();
        let buffer = frame.buffer_mut();
        Self { area, buffer }
    }

    /// Frame over an arbitrary buffer, used for offscreen window content.
    pub fn from_parts(area: Rect, buffer: &'a mut Buffer) -> Self {
        Self { area, buffer }
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn buffer_mut(&mut self) -> &mut Buffer {
        self.buffer
    }

    fn clip_rect(&self, rect: Rect) -> Option<Rect> {
        let clipped = rect.intersection(self.area);
        if clipped.width == 0 || clipped.height == 0 {
            None
        } else {
            Some(clipped)
        }
    }

    pub fn render_widget<W>(&mut self, widget: W, area: Rect)
    where
        W: Widget,
    {
        if let Some(clipped) = self.clip_rect(area) {
            widget.render(clipped, self.buffer);
        }
    }

    pub fn render_stateful_widget<W>(&mut self, widget: W, area: Rect, state: &mut W::State)
    where
        W: StatefulWidget,
    {
        if let Some(clipped) = self.clip_rect(area) {
            widget.render(clipped, self.buffer, state);
        }
    }

    /// Paints `rect` with blanks in `style`.
    pub fn fill(&mut self, rect: Rect, style: Style) {
        let Some(clipped) = self.clip_rect(rect) else {
            return;
        };
        for y in clipped.y..clipped.y.saturating_add(clipped.height) {
            for x in clipped.x..clipped.x.saturating_add(clipped.width) {
                if let Some(cell) = self.buffer.cell_mut((x, y)) {
                    cell.reset();
                    cell.set_symbol(" ");
                    cell.set_style(style);
                }
            }
        }
    }

    /// Fills `rect` with `wallpaper`'s gradient, stretched to the rect.
    pub fn paint_gradient(&mut self, wallpaper: &Wallpaper, rect: Rect, truecolor: bool) {
        let Some(visible) = self.clip_rect(rect) else {
            return;
        };
        for y in visible.top()..visible.bottom() {
            for x in visible.left()..visible.right() {
                let rgb = wallpaper.color_at(x - rect.x, y - rect.y, rect.width, rect.height);
                if let Some(cell) = self.buffer.cell_mut((x, y)) {
                    cell.reset();
                    cell.set_symbol(" ");
                    cell.set_bg(theme::rgb_to_color(rgb, truecolor));
                }
            }
        }
    }

    /// Copies `src` (whose area starts at the origin) so that its top-left
    /// lands on `dest`, which may be partly or wholly off-screen.
    pub fn blit_from_signed(&mut self, src: &Buffer, dest: CellRect) {
        let frame_x0 = self.area.x as i32;
        let frame_y0 = self.area.y as i32;
        let frame_x1 = frame_x0 + self.area.width as i32;
        let frame_y1 = frame_y0 + self.area.height as i32;
        for sy in 0..dest.height as i32 {
            let dy = dest.y + sy;
            if dy < frame_y0 || dy >= frame_y1 {
                continue;
            }
            for sx in 0..dest.width as i32 {
                let dx = dest.x + sx;
                if dx < frame_x0 || dx >= frame_x1 {
                    continue;
                }
                if let (Some(src_cell), Some(dst_cell)) = (
                    src.cell((sx as u16, sy as u16)),
                    self.buffer.cell_mut((dx as u16, dy as u16)),
                ) {
                    *dst_cell = src_cell.clone();
                }
            }
        }
    }

    /// Writes `text` starting at a signed column, dropping whatever falls
    /// outside `bounds`.
    pub fn set_string_signed(&mut self, bounds: Rect, x: i32, y: i32, text: &str, style: Style) {
        let bounds = bounds.intersection(self.area);
        if y < bounds.y as i32 || y >= bounds.y as i32 + bounds.height as i32 {
            return;
        }
        let skip = (bounds.x as i32 - x).max(0) as usize;
        let start = x.max(bounds.x as i32);
        let visible: String = text.chars().skip(skip).collect();
        if visible.is_empty() || start > u16::MAX as i32 {
            return;
        }
        safe_set_string(self.buffer, bounds, start as u16, y as u16, &visible, style);
    }
}

pub(crate) fn safe_set_string(
    buffer: &mut Buffer,
    bounds: Rect,
    x: u16,
    y: u16,
    text: &str,
    style: Style,
) {
    if bounds.width == 0 || bounds.height == 0 {
        return;
    }
    let max_x = bounds.x.saturating_add(bounds.width);
    let max_y = bounds.y.saturating_add(bounds.height);
    if x < bounds.x || x >= max_x || y < bounds.y || y >= max_y {
        return;
    }
    let available = max_x.saturating_sub(x);
    if available == 0 {
        return;
    }
    let text = truncate_to_width(text, available as usize);
    buffer.set_string(x, y, text, style);
}

pub(crate) fn truncate_to_width(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    value.chars().take(width).collect()
}

/// Rows at the bottom of the screen owned by the taskbar.
pub fn taskbar_rows() -> u16 {
    (TASKBAR_HEIGHT / CELL_HEIGHT_PX) as u16
}

/// Splits the screen into the window area and the taskbar strip.
pub fn split_screen(area: Rect) -> (Rect, Rect) {
    let rows = taskbar_rows().min(area.height);
    let desk = Rect {
        height: area.height - rows,
        ..area
    };
    let bar = Rect {
        y: area.y + desk.height,
        height: rows,
        ..area
    };
    (desk, bar)
}

/// Per-frame inputs that do not live on the desktop itself.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub truecolor: bool,
    pub clock: String,
}

/// Draws wallpaper, windows bottom to top, taskbar and dialog, recording
/// every clickable area into `regions` as it goes.
pub fn render_desktop<S: Storage>(
    frame: &mut UiFrame<'_>,
    desktop: &Desktop<S>,
    regions: &mut RegionMap<HitTarget>,
    options: &RenderOptions,
) {
    regions.clear();
    let area = frame.area();
    if area.width == 0 || area.height == 0 {
        return;
    }
    let (desk, bar) = split_screen(area);
    frame.paint_gradient(desktop.wallpaper(), desk, options.truecolor);
    regions.push(HitTarget::Desktop, desk);

    let focused = desktop.wm().focused_shown().map(|w| w.id());
    for id in desktop.wm().draw_order() {
        let Some(window) = desktop.wm().get(id) else {
            continue;
        };
        let chrome = WindowChrome::for_geometry(window.geometry());
        let ctx = ComponentContext::new(focused == Some(id))
            .with_window(id)
            .with_truecolor(options.truecolor);

        draw_chrome(frame, &chrome, desk, window.title(), ctx.focused());
        regions.push(HitTarget::Body(id), chrome.frame.visible(desk));

        let body = chrome.body;
        if body.width > 0 && body.height > 0 {
            let local = Rect::new(0, 0, body.width, body.height);
            let mut scratch = Buffer::empty(local);
            {
                let mut offscreen = UiFrame::from_parts(local, &mut scratch);
                offscreen.fill(
                    local,
                    Style::default().bg(theme::window_bg()).fg(theme::window_fg()),
                );
                window.content().render(&mut offscreen, local, &ctx);
            }
            frame.blit_from_signed(&scratch, body);
            let mut sink = RegionSink::new(regions, body.x, body.y, desk);
            window.content().hit_regions(local, &ctx, &mut sink);
        }

        regions.push(HitTarget::TitleBar(id), chrome.title_bar.visible(desk));
        regions.push(HitTarget::Minimize(id), chrome.minimize.visible(desk));
        regions.push(HitTarget::Maximize(id), chrome.maximize.visible(desk));
        regions.push(HitTarget::Close(id), chrome.close.visible(desk));
        regions.push(HitTarget::ResizeGrip(id), chrome.grip.visible(desk));
    }

    if bar.height > 0 {
        let view = TaskbarView::new(desktop.wm().taskbar(), &options.clock);
        let top = Rect { height: 1, ..bar };
        view.render(frame, top, &ComponentContext::default());
        view.record(top, regions);
        if bar.height > 1 {
            let hints = Rect {
                y: bar.y + 1,
                height: 1,
                ..bar
            };
            let mut status = StatusBar::new();
            status.set_left(shortcut_hints(desktop));
            status.set_right(desktop.wallpaper().name);
            status.set_style(Style::default().bg(theme::taskbar_bg()).fg(theme::muted_fg()));
            status.render(frame, hints, &ComponentContext::default());
        }
    }

    if let Some(dialog) = desktop.dialog() {
        let overlay = DialogOverlay::new(dialog);
        overlay.render(frame, area, &ComponentContext::default());
        overlay.record(area, regions);
    }
}

fn shortcut_hints<S: Storage>(desktop: &Desktop<S>) -> String {
    let kb = desktop.keybindings();
    [
        (Action::LaunchNotepad, "Notepad"),
        (Action::LaunchExplorer, "Files"),
        (Action::LaunchRecycleBin, "Bin"),
        (Action::LaunchWallpapers, "Wallpaper"),
        (Action::SaveAndClose, "Save+close"),
        (Action::DeleteDialog, "Delete"),
        (Action::CloseAll, "Close all"),
        (Action::Quit, "Quit"),
    ]
    .iter()
    .filter_map(|(action, label)| kb.first_combo(*action).map(|c| format!("{c} {label}")))
    .collect::<Vec<_>>()
    .join("  ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apps::Launcher;
    use crate::store::{FileStore, MemoryStorage};
    use crate::window::{Point, WindowManager};
    use std::time::Instant;

    fn render(desktop: &Desktop<MemoryStorage>, area: Rect) -> (Buffer, RegionMap<HitTarget>) {
        let mut buf = Buffer::empty(area);
        let mut regions = RegionMap::default();
        let options = RenderOptions {
            truecolor: true,
            clock: "12:34".into(),
        };
        let mut frame = UiFrame::from_parts(area, &mut buf);
        render_desktop(&mut frame, desktop, &mut regions, &options);
        (buf, regions)
    }

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .filter_map(|x| buf.cell((x, y)).map(|c| c.symbol().to_string()))
            .collect()
    }

    #[test]
    fn blit_from_signed_clips_negative_offsets() {
        let frame_area = Rect::new(0, 0, 4, 2);
        let mut dest = Buffer::empty(frame_area);
        let mut frame = UiFrame::from_parts(frame_area, &mut dest);
        let src_area = Rect::new(0, 0, 3, 2);
        let mut src = Buffer::empty(src_area);
        for y in 0..src_area.height {
            for x in 0..src_area.width {
                if let Some(cell) = src.cell_mut((x, y)) {
                    cell.set_symbol("#");
                }
            }
        }
        frame.blit_from_signed(
            &src,
            CellRect {
                x: -1,
                y: 0,
                width: 3,
                height: 2,
            },
        );
        assert_eq!(dest.cell((0, 0)).unwrap().symbol(), "#");
        assert_eq!(dest.cell((1, 0)).unwrap().symbol(), "#");
        assert_eq!(dest.cell((2, 0)).unwrap().symbol(), " ");
    }

    #[test]
    fn truncate_to_width_short_and_long() {
        assert_eq!(truncate_to_width("abc", 5), "abc");
        assert_eq!(truncate_to_width("abcdef", 3), "abc");
    }

    #[test]
    fn safe_set_string_writes_within_bounds() {
        let bounds = Rect::new(0, 0, 10, 2);
        let mut buf = Buffer::empty(bounds);
        safe_set_string(&mut buf, bounds, 1, 0, "hello", Style::default());
        assert_eq!(buf.cell((1, 0)).unwrap().symbol(), "h");
        safe_set_string(&mut buf, bounds, 100, 0, "x", Style::default());
    }

    #[test]
    fn signed_strings_drop_offscreen_prefix() {
        let area = Rect::new(0, 0, 6, 1);
        let mut buf = Buffer::empty(area);
        let mut frame = UiFrame::from_parts(area, &mut buf);
        frame.set_string_signed(area, -2, 0, "abcdef", Style::default());
        assert_eq!(row_text(&buf, 0), "cdef  ");
    }

    #[test]
    fn taskbar_takes_two_rows() {
        let (desk, bar) = split_screen(Rect::new(0, 0, 80, 24));
        assert_eq!(desk.height, 22);
        assert_eq!(bar.y, 22);
        assert_eq!(bar.height, 2);
    }

    #[test]
    fn regions_follow_window_stack() {
        let mut d = Desktop::new(
            FileStore::new(MemoryStorage::new()),
            WindowManager::with_seed(9),
        );
        let area = Rect::new(0, 0, 120, 40);
        d.set_desktop_size(crate::layout::desktop_size_for(area));
        let a = d.launch(Launcher::Explorer);
        let b = d.launch(Launcher::Wallpapers);
        let (_, regions) = render(&d, area);

        let ga = CellRect::from_geometry(d.wm().get(a).unwrap().geometry());
        let gb = CellRect::from_geometry(d.wm().get(b).unwrap().geometry());
        let title_b = (gb.x as u16 + 1, gb.y as u16);
        assert_eq!(
            regions.hit_test(title_b.0, title_b.1),
            Some(HitTarget::TitleBar(b))
        );

        d.pointer_down(HitTarget::Minimize(b), Point::new(0, 0), Instant::now());
        let (_, regions) = render(&d, area);
        assert_ne!(
            regions.hit_test(title_b.0, title_b.1),
            Some(HitTarget::TitleBar(b))
        );
        let grip = (
            (ga.x + ga.width as i32 - 1) as u16,
            (ga.y + ga.height as i32 - 1) as u16,
        );
        assert_eq!(
            regions.hit_test(grip.0, grip.1),
            Some(HitTarget::ResizeGrip(a))
        );
    }

    #[test]
    fn taskbar_shows_launchers_entries_and_clock() {
        let mut d = Desktop::new(
            FileStore::new(MemoryStorage::new()),
            WindowManager::with_seed(9),
        );
        d.launch(Launcher::RecycleBin);
        let area = Rect::new(0, 0, 140, 30);
        let (buf, regions) = render(&d, area);
        let top = row_text(&buf, 28);
        assert!(top.contains("Recycle Bin"));
        assert!(top.trim_end().ends_with("12:34"));
        assert_eq!(regions.hit_test(1, 28), Some(HitTarget::Launcher(Launcher::Notepad)));
        let hints = row_text(&buf, 29);
        assert!(hints.contains("F1 Notepad"));
        assert!(hints.contains("Ctrl+Q Quit"));
    }

    #[test]
    fn dialog_buttons_are_clickable() {
        let mut d = Desktop::new(
            FileStore::new(MemoryStorage::new()),
            WindowManager::with_seed(9),
        );
        d.launch(Launcher::Explorer);
        d.request_close_all();
        let area = Rect::new(0, 0, 100, 30);
        let (buf, regions) = render(&d, area);
        let (row, text) = (0..area.height)
            .map(|y| (y, row_text(&buf, y)))
            .find(|(_, t)| t.contains("[ OK ]"))
            .expect("button row drawn");
        let col = text.find("[ OK ]").map(|i| text[..i].chars().count()).unwrap() as u16;
        assert_eq!(regions.hit_test(col + 1, row), Some(HitTarget::DialogButton(0)));
    }
}
