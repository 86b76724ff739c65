use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};

use super::AppCommand;
use crate::components::{Component, ComponentContext, RegionSink};
use crate::desktop::HitTarget;
use crate::theme::{self, Rgb};
use crate::ui::{UiFrame, safe_set_string, truncate_to_width};

/// Swatches per grid row.
pub const GRID_COLUMNS: usize = 4;
const GRID_ROWS: usize = WALLPAPERS.len().div_ceil(GRID_COLUMNS);
const SET_LABEL: &str = "[ Set Wallpaper ]";
const CANCEL_LABEL: &str = "[ Cancel ]";

/// Diagonal two-stop gradient painted behind the windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Wallpaper {
    pub name: &'static str,
    pub from: Rgb,
    pub to: Rgb,
}

impl Wallpaper {
    const fn new(name: &'static str, from: u32, to: u32) -> Self {
        Self {
            name,
            from: Rgb::from_hex(from),
            to: Rgb::from_hex(to),
        }
    }

    /// Colour at `(x, y)` of a `width` x `height` area, blending along the
    /// top-left to bottom-right diagonal.
    pub fn color_at(&self, x: u16, y: u16, width: u16, height: u16) -> Rgb {
        let span = (width as f32 - 1.0).max(0.0) + (height as f32 - 1.0).max(0.0);
        if span <= 0.0 {
            return self.from;
        }
        self.from.lerp(self.to, (x as f32 + y as f32) / span)
    }

    pub fn find(name: &str) -> Option<&'static Wallpaper> {
        WALLPAPERS.iter().find(|w| w.name == name)
    }

    pub fn default_wallpaper() -> &'static Wallpaper {
        &WALLPAPERS[0]
    }
}

pub const WALLPAPERS: [Wallpaper; 8] = [
    Wallpaper::new("Ocean Blue", 0x1e3c72, 0x2a5298),
    Wallpaper::new("Sunset", 0xff6b35, 0xf7931e),
    Wallpaper::new("Forest", 0x134e5e, 0x71b280),
    Wallpaper::new("Purple Dream", 0x667eea, 0x764ba2),
    Wallpaper::new("Mint", 0x00d084, 0x00a67e),
    Wallpaper::new("Cherry", 0xeb3349, 0xf45c43),
    Wallpaper::new("Blueberry", 0x4facfe, 0x00f2fe),
    Wallpaper::new("Peach", 0xfa709a, 0xfee140),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PickerStage {
    #[default]
    Grid,
    Preview(usize),
    Applied(usize),
}

/// Grid of swatches, then a preview with set/cancel, then a confirmation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WallpaperPicker {
    cursor: usize,
    stage: PickerStage,
}

impl WallpaperPicker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn stage(&self) -> PickerStage {
        self.stage
    }

    pub fn preview(&mut self, index: usize) {
        if index < WALLPAPERS.len() && !matches!(self.stage, PickerStage::Applied(_)) {
            self.cursor = index;
            self.stage = PickerStage::Preview(index);
        }
    }

    /// Back to the grid without applying anything.
    pub fn cancel(&mut self) {
        if matches!(self.stage, PickerStage::Preview(_)) {
            self.stage = PickerStage::Grid;
        }
    }

    pub fn mark_applied(&mut self, index: usize) {
        self.stage = PickerStage::Applied(index);
    }

    pub fn previewed(&self) -> Option<usize> {
        match self.stage {
            PickerStage::Preview(index) => Some(index),
            _ => None,
        }
    }

    fn move_cursor(&mut self, delta: isize) {
        let last = WALLPAPERS.len() as isize - 1;
        self.cursor = (self.cursor as isize + delta).clamp(0, last) as usize;
    }

    pub fn handle_key(&mut self, key: &KeyEvent) -> Option<AppCommand> {
        match self.stage {
            PickerStage::Grid => match key.code {
                KeyCode::Left => self.move_cursor(-1),
                KeyCode::Right => self.move_cursor(1),
                KeyCode::Up => self.move_cursor(-(GRID_COLUMNS as isize)),
                KeyCode::Down => self.move_cursor(GRID_COLUMNS as isize),
                KeyCode::Enter | KeyCode::Char(' ') => self.preview(self.cursor),
                _ => {}
            },
            PickerStage::Preview(index) => match key.code {
                KeyCode::Enter => return Some(AppCommand::SetWallpaper(index)),
                KeyCode::Esc | KeyCode::Backspace => self.cancel(),
                _ => {}
            },
            PickerStage::Applied(_) => {}
        }
        None
    }
}

/// Swatch cells of the grid, in wallpaper order. Row 0 holds the heading.
fn swatch_rects(area: Rect) -> Vec<Rect> {
    let cell_width = area.width / GRID_COLUMNS as u16;
    let cell_height = area.height.saturating_sub(1) / GRID_ROWS as u16;
    if cell_width < 2 || cell_height < 2 {
        return Vec::new();
    }
    (0..WALLPAPERS.len())
        .map(|index| {
            let (row, col) = (index / GRID_COLUMNS, index % GRID_COLUMNS);
            Rect::new(
                area.x + col as u16 * cell_width,
                area.y + 1 + row as u16 * cell_height,
                cell_width - 1,
                cell_height,
            )
        })
        .collect()
}

/// Set and cancel buttons on the bottom row of the preview.
fn preview_buttons(area: Rect) -> Option<(Rect, Rect)> {
    if area.height < 3 {
        return None;
    }
    let y = area.y + area.height - 1;
    let set_width = SET_LABEL.chars().count() as u16;
    let set = Rect::new(area.x + 1, y, set_width, 1);
    let cancel = Rect::new(
        set.x + set_width + 2,
        y,
        CANCEL_LABEL.chars().count() as u16,
        1,
    );
    Some((set, cancel))
}

impl Component for WallpaperPicker {
    fn render(&self, frame: &mut UiFrame<'_>, area: Rect, ctx: &ComponentContext) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let base = Style::default().fg(theme::window_fg()).bg(theme::window_bg());
        let bounds = area.intersection(frame.area());
        match self.stage {
            PickerStage::Grid => {
                let heading = "Choose a wallpaper";
                safe_set_string(frame.buffer_mut(), bounds, area.x, area.y, heading, base);
                for (index, rect) in swatch_rects(area).into_iter().enumerate() {
                    let swatch = Rect {
                        height: rect.height - 1,
                        ..rect
                    };
                    frame.paint_gradient(&WALLPAPERS[index], swatch, ctx.truecolor());
                    let style = if index == self.cursor {
                        Style::default()
                            .bg(theme::selection_bg())
                            .fg(theme::selection_fg())
                            .add_modifier(Modifier::BOLD)
                    } else {
                        base
                    };
                    let label = truncate_to_width(WALLPAPERS[index].name, rect.width as usize);
                    safe_set_string(
                        frame.buffer_mut(),
                        bounds,
                        rect.x,
                        rect.y + rect.height - 1,
                        &label,
                        style,
                    );
                }
            }
            PickerStage::Preview(index) => {
                let wallpaper = &WALLPAPERS[index];
                let Some((set, cancel)) = preview_buttons(area) else {
                    return;
                };
                let swatch = Rect {
                    height: area.height - 2,
                    ..area
                };
                frame.paint_gradient(wallpaper, swatch, ctx.truecolor());
                let buffer = frame.buffer_mut();
                let caption = format!("Preview: {}", wallpaper.name);
                let caption_y = area.y + area.height - 2;
                safe_set_string(buffer, bounds, area.x + 1, caption_y, &caption, base);
                let button = Style::default()
                    .bg(theme::selection_bg())
                    .fg(theme::selection_fg())
                    .add_modifier(Modifier::BOLD);
                safe_set_string(buffer, bounds, set.x, set.y, SET_LABEL, button);
                safe_set_string(buffer, bounds, cancel.x, cancel.y, CANCEL_LABEL, base);
            }
            PickerStage::Applied(index) => {
                let y = area.y + area.height / 2;
                let success = base.fg(theme::success_fg()).add_modifier(Modifier::BOLD);
                let buffer = frame.buffer_mut();
                let message = "Wallpaper set successfully!";
                safe_set_string(buffer, bounds, area.x + 1, y, message, success);
                if let Some(wallpaper) = WALLPAPERS.get(index) {
                    let name_y = y.saturating_add(1);
                    safe_set_string(buffer, bounds, area.x + 1, name_y, wallpaper.name, base);
                }
            }
        }
    }

    fn hit_regions(&self, area: Rect, ctx: &ComponentContext, sink: &mut RegionSink<'_>) {
        let Some(id) = ctx.window() else {
            return;
        };
        match self.stage {
            PickerStage::Grid => {
                for (index, rect) in swatch_rects(area).into_iter().enumerate() {
                    sink.push(HitTarget::Swatch(id, index), rect);
                }
            }
            PickerStage::Preview(_) => {
                if let Some((set, cancel)) = preview_buttons(area) {
                    sink.push(HitTarget::WallpaperSet(id), set);
                    sink.push(HitTarget::WallpaperCancel(id), cancel);
                }
            }
            PickerStage::Applied(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn eight_named_wallpapers() {
        let names: Vec<&str> = WALLPAPERS.iter().map(|w| w.name).collect();
        assert_eq!(
            names,
            vec![
                "Ocean Blue",
                "Sunset",
                "Forest",
                "Purple Dream",
                "Mint",
                "Cherry",
                "Blueberry",
                "Peach"
            ]
        );
        assert_eq!(Wallpaper::find("Mint").map(|w| w.to), Some(Rgb(0x00, 0xa6, 0x7e)));
        assert!(Wallpaper::find("Plaid").is_none());
    }

    #[test]
    fn gradient_runs_corner_to_corner() {
        let w = Wallpaper::find("Sunset").expect("known wallpaper");
        assert_eq!(w.color_at(0, 0, 10, 5), w.from);
        assert_eq!(w.color_at(9, 4, 10, 5), w.to);
        assert_eq!(w.color_at(0, 0, 1, 1), w.from);
    }

    #[test]
    fn grid_preview_cancel_set_flow() {
        let mut p = WallpaperPicker::new();
        p.handle_key(&key(KeyCode::Down));
        p.handle_key(&key(KeyCode::Right));
        assert_eq!(p.cursor(), 5);
        p.handle_key(&key(KeyCode::Enter));
        assert_eq!(p.stage(), PickerStage::Preview(5));
        p.handle_key(&key(KeyCode::Esc));
        assert_eq!(p.stage(), PickerStage::Grid);
        p.handle_key(&key(KeyCode::Enter));
        assert_eq!(
            p.handle_key(&key(KeyCode::Enter)),
            Some(AppCommand::SetWallpaper(5))
        );
        p.mark_applied(5);
        assert_eq!(p.handle_key(&key(KeyCode::Enter)), None);
    }

    #[test]
    fn cursor_clamps_to_grid() {
        let mut p = WallpaperPicker::new();
        p.handle_key(&key(KeyCode::Up));
        assert_eq!(p.cursor(), 0);
        for _ in 0..20 {
            p.handle_key(&key(KeyCode::Right));
        }
        assert_eq!(p.cursor(), WALLPAPERS.len() - 1);
    }

    #[test]
    fn grid_regions_map_swatches() {
        use crate::layout::RegionMap;
        use crate::window::WindowId;

        let id = WindowId::new(4);
        let area = Rect::new(0, 0, 48, 13);
        let rects = swatch_rects(area);
        assert_eq!(rects.len(), WALLPAPERS.len());
        assert_eq!(rects[5], Rect::new(12, 7, 11, 6));

        let mut regions = RegionMap::default();
        let mut sink = RegionSink::new(&mut regions, 0, 0, area);
        let picker = WallpaperPicker::new();
        picker.hit_regions(area, &ComponentContext::new(true).with_window(id), &mut sink);
        assert_eq!(regions.hit_test(14, 8), Some(HitTarget::Swatch(id, 5)));
        // gap column between swatches
        assert_eq!(regions.hit_test(11, 8), None);
    }

    #[test]
    fn preview_offers_set_and_cancel() {
        use crate::layout::RegionMap;
        use crate::window::WindowId;
        use ratatui::buffer::Buffer;

        let id = WindowId::new(4);
        let area = Rect::new(0, 0, 40, 10);
        let mut picker = WallpaperPicker::new();
        picker.preview(1);
        let mut regions = RegionMap::default();
        let mut sink = RegionSink::new(&mut regions, 0, 0, area);
        let ctx = ComponentContext::new(true).with_window(id);
        picker.hit_regions(area, &ctx, &mut sink);
        assert_eq!(regions.hit_test(2, 9), Some(HitTarget::WallpaperSet(id)));
        assert_eq!(regions.hit_test(21, 9), Some(HitTarget::WallpaperCancel(id)));

        let mut buf = Buffer::empty(area);
        picker.render(&mut UiFrame::from_parts(area, &mut buf), area, &ctx);
        let row: String = (0..40)
            .filter_map(|x| buf.cell((x, 8)).map(|c| c.symbol().to_string()))
            .collect();
        assert!(row.starts_with(" Preview: Sunset"));
    }

    #[test]
    fn applied_stage_confirms() {
        use ratatui::buffer::Buffer;

        let mut picker = WallpaperPicker::new();
        picker.mark_applied(0);
        let area = Rect::new(0, 0, 40, 6);
        let mut buf = Buffer::empty(area);
        picker.render(
            &mut UiFrame::from_parts(area, &mut buf),
            area,
            &ComponentContext::default(),
        );
        let row: String = (0..40)
            .filter_map(|x| buf.cell((x, 3)).map(|c| c.symbol().to_string()))
            .collect();
        assert!(row.contains("Wallpaper set successfully!"));
    }
}
