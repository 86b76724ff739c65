use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use super::{Component, ComponentContext};
use crate::desktop::{Dialog, HitTarget};
use crate::layout::RegionMap;
use crate::theme;
use crate::ui::{UiFrame, safe_set_string};

const MIN_WIDTH: u16 = 30;
const BUTTON_GAP: u16 = 2;

/// Centred modal box for the active desktop dialog.
pub struct DialogOverlay<'a> {
    dialog: &'a Dialog,
}

impl<'a> DialogOverlay<'a> {
    pub fn new(dialog: &'a Dialog) -> Self {
        Self { dialog }
    }

    fn buttons_width(&self) -> u16 {
        let buttons = self.dialog.buttons();
        let labels: usize = buttons.iter().map(|b| b.chars().count()).sum();
        labels as u16 + BUTTON_GAP * buttons.len().saturating_sub(1) as u16
    }

    /// Box position for `area`: sized to the body and buttons, centred.
    pub fn rect_for(&self, area: Rect) -> Rect {
        let body = self.dialog.body();
        let body_width = body.lines().map(|l| l.chars().count()).max().unwrap_or(0) as u16;
        let title_width = self.dialog.title().chars().count() as u16 + 2;
        let width = body_width
            .max(self.buttons_width())
            .max(title_width)
            .saturating_add(4)
            .max(MIN_WIDTH)
            .min(area.width);
        // border, body, blank line, buttons, border
        let lines = body.lines().count().max(1) as u16;
        let height = lines.saturating_add(4).min(area.height);
        Rect {
            x: area.x + (area.width - width) / 2,
            y: area.y + (area.height - height) / 2,
            width,
            height,
        }
    }

    fn button_rects(&self, rect: Rect) -> Vec<Rect> {
        if rect.height < 3 {
            return Vec::new();
        }
        let y = rect.y + rect.height - 2;
        let mut x = rect.x + rect.width.saturating_sub(self.buttons_width()) / 2;
        self.dialog
            .buttons()
            .iter()
            .map(|label| {
                let width = label.chars().count() as u16;
                let button = Rect::new(x, y, width, 1);
                x = x.saturating_add(width + BUTTON_GAP);
                button
            })
            .collect()
    }

    /// Records the box (swallowing clicks) and each button.
    pub fn record(&self, area: Rect, regions: &mut RegionMap<HitTarget>) {
        let rect = self.rect_for(area);
        regions.push(HitTarget::Desktop, rect);
        for (index, button) in self.button_rects(rect).into_iter().enumerate() {
            regions.push(HitTarget::DialogButton(index), button.intersection(area));
        }
    }
}

impl Component for DialogOverlay<'_> {
    fn render(&self, frame: &mut UiFrame<'_>, area: Rect, _ctx: &ComponentContext) {
        let rect = self.rect_for(area);
        if rect.width < 3 || rect.height < 3 {
            return;
        }
        let base = Style::default().bg(theme::dialog_bg()).fg(theme::dialog_fg());
        frame.render_widget(Clear, rect);
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", self.dialog.title()))
            .border_style(base.fg(theme::dialog_border()))
            .style(base);
        let inner = block.inner(rect);
        frame.render_widget(block, rect);

        let body_rect = Rect {
            x: inner.x.saturating_add(1),
            width: inner.width.saturating_sub(2),
            height: inner.height.saturating_sub(2),
            ..inner
        };
        let paragraph = Paragraph::new(self.dialog.body())
            .alignment(Alignment::Left)
            .style(base)
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, body_rect);

        let selected = self.dialog.selected_button();
        let bounds = rect.intersection(frame.area());
        let buffer = frame.buffer_mut();
        for (index, (label, button)) in self
            .dialog
            .buttons()
            .iter()
            .zip(self.button_rects(rect))
            .enumerate()
        {
            let style = if index == selected {
                Style::default()
                    .bg(theme::dialog_selected_bg())
                    .fg(theme::dialog_fg())
                    .add_modifier(Modifier::BOLD)
            } else {
                base
            };
            safe_set_string(buffer, bounds, button.x, button.y, label, style);
        }
    }
}
