use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Paragraph;

use crate::components::{Component, ComponentContext};
use crate::theme;
use crate::ui::UiFrame;

/// Read-only view of one file's content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileViewer {
    name: String,
    text: String,
    scroll: usize,
}

impl FileViewer {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
            scroll: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn scroll(&self) -> usize {
        self.scroll
    }

    pub fn handle_key(&mut self, key: &KeyEvent) {
        let last = self.text.lines().count().saturating_sub(1);
        self.scroll = match key.code {
            KeyCode::Up => self.scroll.saturating_sub(1),
            KeyCode::Down => (self.scroll + 1).min(last),
            KeyCode::PageUp => self.scroll.saturating_sub(10),
            KeyCode::PageDown => (self.scroll + 10).min(last),
            KeyCode::Home => 0,
            KeyCode::End => last,
            _ => self.scroll,
        };
    }
}

impl Component for FileViewer {
    fn render(&self, frame: &mut UiFrame<'_>, area: Rect, _ctx: &ComponentContext) {
        let scroll = self.scroll.min(u16::MAX as usize) as u16;
        let paragraph = Paragraph::new(self.text.as_str())
            .style(Style::default().fg(theme::window_fg()).bg(theme::window_bg()))
            .scroll((scroll, 0));
        frame.render_widget(paragraph, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    #[test]
    fn scroll_stays_within_text() {
        let mut v = FileViewer::new("a.txt", "1\n2\n3");
        v.handle_key(&KeyEvent::new(KeyCode::PageDown, KeyModifiers::NONE));
        assert_eq!(v.scroll(), 2);
        v.handle_key(&KeyEvent::new(KeyCode::Up, KeyModifiers::NONE));
        assert_eq!(v.scroll(), 1);
        v.handle_key(&KeyEvent::new(KeyCode::Home, KeyModifiers::NONE));
        assert_eq!(v.scroll(), 0);
    }

    #[test]
    fn view_starts_at_scroll_line() {
        use ratatui::buffer::Buffer;

        let mut v = FileViewer::new("a.txt", "first\nsecond\nthird");
        v.handle_key(&KeyEvent::new(KeyCode::Down, KeyModifiers::NONE));
        let area = Rect::new(0, 0, 10, 2);
        let mut buf = Buffer::empty(area);
        v.render(
            &mut UiFrame::from_parts(area, &mut buf),
            area,
            &ComponentContext::default(),
        );
        assert_eq!(buf.cell((0, 0)).map(|c| c.symbol()), Some("s"));
        assert_eq!(buf.cell((0, 1)).map(|c| c.symbol()), Some("t"));
    }
}
