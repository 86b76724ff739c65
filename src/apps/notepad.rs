use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};

use super::AppCommand;
use crate::components::{Component, ComponentContext, RegionSink};
use crate::desktop::HitTarget;
use crate::theme;
use crate::ui::{UiFrame, safe_set_string, truncate_to_width};

const NAME_PREFIX: &str = "Name: ";
const SAVE_LABEL: &str = "[ Save ]";
const CURSOR: &str = "_";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NotepadField {
    Name,
    #[default]
    Text,
}

/// Single-document editor. Input always lands at the end of the focused
/// field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notepad {
    filename: String,
    text: String,
    saved: bool,
    field: NotepadField,
}

impl Notepad {
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            text: String::new(),
            saved: true,
            field: NotepadField::Text,
        }
    }

    /// Fresh document named after the current time in milliseconds.
    pub fn untitled(now_millis: i64) -> Self {
        Self::new(format!("Document{now_millis}.txt"))
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_saved(&self) -> bool {
        self.saved
    }

    pub fn field(&self) -> NotepadField {
        self.field
    }

    pub fn focus(&mut self, field: NotepadField) {
        self.field = field;
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.saved = false;
    }

    pub fn insert_char(&mut self, c: char) {
        match self.field {
            NotepadField::Name => self.filename.push(c),
            NotepadField::Text => {
                self.text.push(c);
                self.saved = false;
            }
        }
    }

    pub fn backspace(&mut self) {
        match self.field {
            NotepadField::Name => {
                self.filename.pop();
            }
            NotepadField::Text => {
                if self.text.pop().is_some() {
                    self.saved = false;
                }
            }
        }
    }

    /// Records a successful save under `name`, which may differ from the
    /// typed filename when that was empty.
    pub fn mark_saved(&mut self, name: impl Into<String>) {
        self.filename = name.into();
        self.saved = true;
    }

    pub fn handle_key(&mut self, key: &KeyEvent) -> Option<AppCommand> {
        let plain = key.modifiers.difference(KeyModifiers::SHIFT).is_empty();
        match key.code {
            KeyCode::Tab | KeyCode::BackTab => {
                self.field = match self.field {
                    NotepadField::Name => NotepadField::Text,
                    NotepadField::Text => NotepadField::Name,
                };
            }
            KeyCode::Enter if self.field == NotepadField::Name => {
                self.field = NotepadField::Text;
            }
            KeyCode::Enter => self.insert_char('\n'),
            KeyCode::Backspace => self.backspace(),
            KeyCode::Char(c) if plain => self.insert_char(c),
            _ => {}
        }
        None
    }
}

/// Rows between the separator and the save row.
fn text_rows(area: Rect) -> u16 {
    area.height.saturating_sub(3)
}

impl Component for Notepad {
    fn render(&self, frame: &mut UiFrame<'_>, area: Rect, ctx: &ComponentContext) {
        if area.height == 0 || area.width == 0 {
            return;
        }
        let bounds = area.intersection(frame.area());
        let width = area.width as usize;
        let base = Style::default().fg(theme::window_fg()).bg(theme::window_bg());
        let muted = base.fg(theme::muted_fg());
        let editing = |field| ctx.focused() && self.field == field;
        let buffer = frame.buffer_mut();

        let mut name = format!("{NAME_PREFIX}{}", self.filename);
        if editing(NotepadField::Name) {
            name.push_str(CURSOR);
        }
        let name_style = if self.field == NotepadField::Name {
            base.add_modifier(Modifier::BOLD)
        } else {
            base
        };
        safe_set_string(buffer, bounds, area.x, area.y, &name, name_style);
        if area.height > 1 {
            safe_set_string(buffer, bounds, area.x, area.y + 1, &"─".repeat(width), muted);
        }

        // only the tail of the document is shown; input lands at the end
        let rows = text_rows(area) as usize;
        let mut lines: Vec<String> = self.text.split('\n').map(str::to_string).collect();
        if editing(NotepadField::Text)
            && let Some(last) = lines.last_mut()
        {
            last.push_str(CURSOR);
        }
        let skip = lines.len().saturating_sub(rows);
        for (row, line) in lines.iter().skip(skip).enumerate() {
            let line = truncate_to_width(line, width);
            safe_set_string(buffer, bounds, area.x, area.y + 2 + row as u16, &line, base);
        }

        if area.height > 2 {
            let y = area.y + area.height - 1;
            let button = Style::default()
                .bg(theme::selection_bg())
                .fg(theme::selection_fg())
                .add_modifier(Modifier::BOLD);
            safe_set_string(buffer, bounds, area.x, y, SAVE_LABEL, button);
            let status = if self.saved { "Saved" } else { "Unsaved changes" };
            let x = area.x.saturating_add(SAVE_LABEL.chars().count() as u16 + 2);
            safe_set_string(buffer, bounds, x, y, status, muted);
        }
    }

    fn hit_regions(&self, area: Rect, ctx: &ComponentContext, sink: &mut RegionSink<'_>) {
        let Some(id) = ctx.window() else {
            return;
        };
        sink.push(
            HitTarget::NotepadField(id, NotepadField::Name),
            Rect { height: 1, ..area },
        );
        let rows = text_rows(area);
        if rows > 0 {
            sink.push(
                HitTarget::NotepadField(id, NotepadField::Text),
                Rect::new(area.x, area.y + 2, area.width, rows),
            );
        }
        if area.height > 2 {
            let width = (SAVE_LABEL.chars().count() as u16).min(area.width);
            sink.push(
                HitTarget::NotepadSave(id),
                Rect::new(area.x, area.y + area.height - 1, width, 1),
            );
        }
    }
}
