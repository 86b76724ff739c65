use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{List, ListItem, ListState, Paragraph};

use super::AppCommand;
use crate::components::{Component, ComponentContext, RegionSink};
use crate::desktop::HitTarget;
use crate::store::FileMap;
use crate::theme;
use crate::ui::UiFrame;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListMode {
    Files,
    Trash,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub name: String,
    pub chars: usize,
}

/// Snapshot of the files (or trash) mapping taken when the window opened.
/// Mutations refresh by reopening the window, never by patching the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileList {
    mode: ListMode,
    entries: Vec<FileEntry>,
    selected: usize,
}

impl FileList {
    pub fn files(map: FileMap) -> Self {
        Self::from_map(ListMode::Files, map)
    }

    pub fn trash(map: FileMap) -> Self {
        Self::from_map(ListMode::Trash, map)
    }

    fn from_map(mode: ListMode, map: FileMap) -> Self {
        let entries = map
            .into_iter()
            .map(|(name, content)| FileEntry {
                chars: content.chars().count(),
                name,
            })
            .collect();
        Self {
            mode,
            entries,
            selected: 0,
        }
    }

    pub fn mode(&self) -> ListMode {
        self.mode
    }

    pub fn entries(&self) -> &[FileEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn select(&mut self, index: usize) {
        self.selected = index.min(self.entries.len().saturating_sub(1));
    }

    pub fn move_selection(&mut self, delta: isize) {
        if self.entries.is_empty() {
            self.selected = 0;
            return;
        }
        if delta.is_negative() {
            self.selected = self.selected.saturating_sub(delta.unsigned_abs());
        } else {
            self.selected = (self.selected + delta as usize).min(self.entries.len() - 1);
        }
    }

    pub fn selected_name(&self) -> Option<&str> {
        self.entries.get(self.selected).map(|e| e.name.as_str())
    }

    pub fn label(&self, entry: &FileEntry) -> String {
        match self.mode {
            ListMode::Files => format!("{} ({} chars)", entry.name, entry.chars),
            ListMode::Trash => entry.name.clone(),
        }
    }

    pub fn empty_message(&self) -> &'static str {
        match self.mode {
            ListMode::Files => "No files",
            ListMode::Trash => "Recycle Bin is empty",
        }
    }

    /// Key help shown under the list.
    pub fn hint(&self) -> &'static str {
        match self.mode {
            ListMode::Files => "Enter open  Del delete  r rename  d duplicate",
            ListMode::Trash => "Enter restore  Del delete permanently",
        }
    }

    pub fn handle_key(&mut self, key: &KeyEvent) -> Option<AppCommand> {
        if !key.modifiers.difference(KeyModifiers::SHIFT).is_empty() {
            return None;
        }
        match key.code {
            KeyCode::Up => {
                self.move_selection(-1);
                return None;
            }
            KeyCode::Down => {
                self.move_selection(1);
                return None;
            }
            KeyCode::Home => {
                self.select(0);
                return None;
            }
            KeyCode::End => {
                self.select(usize::MAX);
                return None;
            }
            _ => {}
        }
        let name = self.selected_name()?.to_string();
        match (self.mode, key.code) {
            (ListMode::Files, KeyCode::Enter) => Some(AppCommand::OpenFile(name)),
            (ListMode::Files, KeyCode::Delete) => Some(AppCommand::ConfirmTrash(name)),
            (ListMode::Files, KeyCode::Char('r') | KeyCode::F(2)) => {
                Some(AppCommand::PromptRename(name))
            }
            (ListMode::Files, KeyCode::Char('d')) => Some(AppCommand::Duplicate(name)),
            (ListMode::Trash, KeyCode::Enter | KeyCode::Char('r')) => {
                Some(AppCommand::Restore(name))
            }
            (ListMode::Trash, KeyCode::Delete) => Some(AppCommand::ConfirmPurge(name)),
            _ => None,
        }
    }
}

impl FileList {
    /// Rows available for entries; the last row holds the key hint.
    fn list_rows(area: Rect) -> usize {
        area.height.saturating_sub(1) as usize
    }

    /// First visible entry, scrolled just far enough to keep the selection
    /// on screen.
    fn offset(&self, rows: usize) -> usize {
        (self.selected + 1).saturating_sub(rows.max(1))
    }
}

impl Component for FileList {
    fn render(&self, frame: &mut UiFrame<'_>, area: Rect, ctx: &ComponentContext) {
        if area.height == 0 {
            return;
        }
        let rows = Self::list_rows(area);
        let list_area = Rect {
            height: rows as u16,
            ..area
        };
        let muted = Style::default().fg(theme::muted_fg()).bg(theme::window_bg());
        if self.entries.is_empty() {
            frame.render_widget(Paragraph::new(self.empty_message()).style(muted), list_area);
        } else {
            let items: Vec<ListItem> = self
                .entries
                .iter()
                .map(|entry| ListItem::new(format!(" {}", self.label(entry))))
                .collect();
            let mut highlight = Style::default()
                .bg(theme::selection_bg())
                .fg(theme::selection_fg());
            if ctx.focused() {
                highlight = highlight.add_modifier(Modifier::BOLD);
            }
            let list = List::new(items)
                .style(Style::default().fg(theme::window_fg()).bg(theme::window_bg()))
                .highlight_style(highlight);
            let mut state = ListState::default()
                .with_offset(self.offset(rows))
                .with_selected(Some(self.selected));
            frame.render_stateful_widget(list, list_area, &mut state);
        }
        let hint_area = Rect {
            y: area.y + area.height - 1,
            height: 1,
            ..area
        };
        frame.render_widget(Paragraph::new(self.hint()).style(muted), hint_area);
    }

    fn hit_regions(&self, area: Rect, ctx: &ComponentContext, sink: &mut RegionSink<'_>) {
        let Some(id) = ctx.window() else {
            return;
        };
        let rows = Self::list_rows(area);
        let offset = self.offset(rows);
        let visible = self.entries.len().saturating_sub(offset).min(rows);
        for row in 0..visible {
            sink.push(
                HitTarget::ListRow(id, offset + row),
                Rect::new(area.x, area.y + row as u16, area.width, 1),
            );
        }
    }
}
