//! Content carried by desktop windows and the per-app key handling.

pub mod file_list;
pub mod notepad;
pub mod viewer;
pub mod wallpapers;

use std::fmt;

pub use file_list::{FileEntry, FileList, ListMode};
pub use notepad::{Notepad, NotepadField};
pub use viewer::FileViewer;
pub use wallpapers::{PickerStage, WALLPAPERS, Wallpaper, WallpaperPicker};

use crossterm::event::KeyEvent;
use ratatui::layout::Rect;

use crate::components::{Component, ComponentContext, RegionSink};
use crate::ui::UiFrame;
use crate::window::{CloseGuard, WindowKind};

/// Request raised by an app's key handling, carried out by the desktop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    OpenFile(String),
    ConfirmTrash(String),
    PromptRename(String),
    Duplicate(String),
    Restore(String),
    ConfirmPurge(String),
    SetWallpaper(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppContent {
    Notepad(Notepad),
    Explorer(FileList),
    RecycleBin(FileList),
    Wallpapers(WallpaperPicker),
    Viewer(FileViewer),
}

impl AppContent {
    pub fn kind(&self) -> WindowKind {
        match self {
            Self::Notepad(_) => WindowKind::Notepad,
            Self::Explorer(_) => WindowKind::FileExplorer,
            Self::RecycleBin(_) => WindowKind::RecycleBin,
            Self::Wallpapers(_) => WindowKind::Wallpapers,
            Self::Viewer(_) => WindowKind::Generic,
        }
    }

    /// Unsaved notepad edits. Other apps never hold unsaved state.
    pub fn has_unsaved_changes(&self) -> bool {
        matches!(self, Self::Notepad(pad) if !pad.is_saved())
    }

    /// Whether the content lists file items that delete shortcuts can target.
    pub fn has_file_items(&self) -> bool {
        match self {
            Self::Explorer(list) | Self::RecycleBin(list) => !list.is_empty(),
            _ => false,
        }
    }

    pub fn handle_key(&mut self, key: &KeyEvent) -> Option<AppCommand> {
        match self {
            Self::Notepad(pad) => pad.handle_key(key),
            Self::Explorer(list) | Self::RecycleBin(list) => list.handle_key(key),
            Self::Wallpapers(picker) => picker.handle_key(key),
            Self::Viewer(viewer) => {
                viewer.handle_key(key);
                None
            }
        }
    }

    /// Guard that keeps a window open while its content has unsaved changes.
    pub fn unsaved_changes_guard() -> CloseGuard<AppContent> {
        Box::new(|content: &AppContent| !content.has_unsaved_changes())
    }
}

impl AppContent {
    fn view(&self) -> &dyn Component {
        match self {
            Self::Notepad(pad) => pad,
            Self::Explorer(list) | Self::RecycleBin(list) => list,
            Self::Wallpapers(picker) => picker,
            Self::Viewer(viewer) => viewer,
        }
    }
}

impl Component for AppContent {
    fn render(&self, frame: &mut UiFrame<'_>, area: Rect, ctx: &ComponentContext) {
        self.view().render(frame, area, ctx);
    }

    fn hit_regions(&self, area: Rect, ctx: &ComponentContext, sink: &mut RegionSink<'_>) {
        self.view().hit_regions(area, ctx, sink);
    }
}

/// Taskbar launch buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Launcher {
    Notepad,
    Explorer,
    RecycleBin,
    Wallpapers,
}

impl Launcher {
    pub const ALL: [Launcher; 4] = [
        Launcher::Notepad,
        Launcher::Explorer,
        Launcher::RecycleBin,
        Launcher::Wallpapers,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Launcher::Notepad => "Notepad",
            Launcher::Explorer => "File Explorer",
            Launcher::RecycleBin => "Recycle Bin",
            Launcher::Wallpapers => "Wallpapers",
        }
    }

    pub fn short_label(self) -> &'static str {
        match self {
            Launcher::Notepad => "Note",
            Launcher::Explorer => "Files",
            Launcher::RecycleBin => "Bin",
            Launcher::Wallpapers => "Wall",
        }
    }
}

impl fmt::Display for Launcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}
