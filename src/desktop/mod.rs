//! The desktop session: apps, dialogs and shortcuts on top of the window
//! manager.

pub mod dialog;

use std::collections::VecDeque;
use std::time::{Duration, Instant};

pub use dialog::{ConfirmIntent, DeleteChoice, Dialog, DialogOutcome};

use crate::apps::{
    AppCommand, AppContent, FileList, FileViewer, Launcher, Notepad, NotepadField, WALLPAPERS,
    Wallpaper, WallpaperPicker,
};
use crate::constants::{SAVE_AND_CLOSE_DELAY_MS, WALLPAPER_CONFIRM_DELAY_MS};
use crate::error::StoreError;
use crate::keybindings::{Action, KeyBindings};
use crate::scheduler::Scheduler;
use crate::store::{FileMap, FileStore, Storage};
use crate::window::{Point, SessionToken, Size, WindowId, WindowKind, WindowManager};

use crossterm::event::KeyEvent;

/// Work deferred to a later tick. Each task belongs to the window it names
/// and is dropped if that window closes first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredTask {
    FinishSaveAndClose(WindowId),
    DismissWallpapers(WindowId),
}

impl DeferredTask {
    fn window(self) -> WindowId {
        match self {
            Self::FinishSaveAndClose(id) | Self::DismissWallpapers(id) => id,
        }
    }
}

/// What the pointer landed on, as resolved by the front-end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    Desktop,
    Launcher(Launcher),
    TaskbarEntry(usize),
    TitleBar(WindowId),
    Minimize(WindowId),
    Maximize(WindowId),
    Close(WindowId),
    ResizeGrip(WindowId),
    Body(WindowId),
    ListRow(WindowId, usize),
    Swatch(WindowId, usize),
    WallpaperSet(WindowId),
    WallpaperCancel(WindowId),
    NotepadSave(WindowId),
    NotepadField(WindowId, NotepadField),
    DialogButton(usize),
}

pub struct Desktop<S> {
    wm: WindowManager<AppContent>,
    store: FileStore<S>,
    scheduler: Scheduler<DeferredTask>,
    keybindings: KeyBindings,
    dialog: Option<Dialog>,
    queued_dialogs: VecDeque<Dialog>,
    wallpaper: &'static Wallpaper,
    pointer: Option<SessionToken>,
    quit: bool,
}

impl<S: Storage> Desktop<S> {
    /// Starts a session, restoring the saved wallpaper when there is one.
    pub fn new(store: FileStore<S>, wm: WindowManager<AppContent>) -> Self {
        let wallpaper = match store.wallpaper() {
            Ok(Some(name)) => Wallpaper::find(&name).unwrap_or_else(|| {
                tracing::warn!(wallpaper = %name, "unknown saved wallpaper");
                Wallpaper::default_wallpaper()
            }),
            Ok(None) => Wallpaper::default_wallpaper(),
            Err(err) => {
                tracing::warn!(error = %err, "failed to load saved wallpaper");
                Wallpaper::default_wallpaper()
            }
        };
        Self {
            wm,
            store,
            scheduler: Scheduler::new(),
            keybindings: KeyBindings::default(),
            dialog: None,
            queued_dialogs: VecDeque::new(),
            wallpaper,
            pointer: None,
            quit: false,
        }
    }

    pub fn wm(&self) -> &WindowManager<AppContent> {
        &self.wm
    }

    pub fn store(&self) -> &FileStore<S> {
        &self.store
    }

    pub fn keybindings(&self) -> &KeyBindings {
        &self.keybindings
    }

    pub fn dialog(&self) -> Option<&Dialog> {
        self.dialog.as_ref()
    }

    pub fn wallpaper(&self) -> &'static Wallpaper {
        self.wallpaper
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn request_quit(&mut self) {
        self.quit = true;
    }

    pub fn pending_tasks(&self) -> usize {
        self.scheduler.len()
    }

    pub fn next_due(&self) -> Option<Instant> {
        self.scheduler.next_due()
    }

    pub fn set_desktop_size(&mut self, size: Size) {
        self.wm.set_desktop_size(size);
    }

    fn open(&mut self, title: impl Into<String>, content: AppContent) -> WindowId {
        let kind = content.kind();
        let guard = (kind == WindowKind::Notepad).then(AppContent::unsaved_changes_guard);
        self.wm.create(kind, title, content, guard)
    }

    pub fn launch(&mut self, launcher: Launcher) -> WindowId {
        match launcher {
            Launcher::Notepad => self.open_notepad(),
            Launcher::Explorer => self.open_explorer(),
            Launcher::RecycleBin => self.open_recycle_bin(),
            Launcher::Wallpapers => self.open_wallpapers(),
        }
    }

    pub fn open_notepad(&mut self) -> WindowId {
        let pad = Notepad::untitled(chrono::Local::now().timestamp_millis());
        self.open(Launcher::Notepad.title(), AppContent::Notepad(pad))
    }

    pub fn open_explorer(&mut self) -> WindowId {
        let files = self.load_or_empty(|store| store.files());
        self.open(
            Launcher::Explorer.title(),
            AppContent::Explorer(FileList::files(files)),
        )
    }

    pub fn open_recycle_bin(&mut self) -> WindowId {
        let trash = self.load_or_empty(|store| store.trash());
        self.open(
            Launcher::RecycleBin.title(),
            AppContent::RecycleBin(FileList::trash(trash)),
        )
    }

    pub fn open_wallpapers(&mut self) -> WindowId {
        self.open(
            Launcher::Wallpapers.title(),
            AppContent::Wallpapers(WallpaperPicker::new()),
        )
    }

    /// Opens a read-only window for a saved file. Missing files open nothing.
    pub fn open_viewer(&mut self, name: &str) -> Option<WindowId> {
        match self.store.read(name) {
            Ok(Some(text)) => Some(self.open(name, AppContent::Viewer(FileViewer::new(name, text)))),
            Ok(None) => None,
            Err(err) => {
                self.report(err);
                None
            }
        }
    }

    fn load_or_empty(
        &mut self,
        load: impl FnOnce(&FileStore<S>) -> Result<FileMap, StoreError>,
    ) -> FileMap {
        match load(&self.store) {
            Ok(map) => map,
            Err(err) => {
                self.report(err);
                FileMap::new()
            }
        }
    }

    fn report(&mut self, err: StoreError) {
        tracing::warn!(error = %err, "store operation failed");
        self.present(Dialog::notice(err.to_string()));
    }

    /// Shows `dialog`, or queues it behind the one already open.
    fn present(&mut self, dialog: Dialog) {
        if self.dialog.is_none() {
            self.queued_dialogs.retain(|queued| queued != &dialog);
            self.dialog = Some(dialog);
        } else if self.dialog.as_ref() != Some(&dialog) && !self.queued_dialogs.contains(&dialog) {
            tracing::debug!(?dialog, "queueing dialog");
            self.queued_dialogs.push_back(dialog);
        }
    }

    /// Opens the next queued dialog once none is showing. Discard prompts
    /// whose windows have all closed are dropped.
    fn promote_queued_dialog(&mut self) {
        while self.dialog.is_none() {
            let Some(next) = self.queued_dialogs.pop_front() else {
                return;
            };
            if let Dialog::Confirm {
                intent: ConfirmIntent::Discard(ids),
                ..
            } = &next
                && !ids.iter().any(|id| self.wm.contains(*id))
            {
                continue;
            }
            self.dialog = Some(next);
        }
    }

    /// Drops every window matching `kind` and opens a single fresh one.
    fn refresh(&mut self, kind: WindowKind) {
        let closed = self.wm.force_close_matching(|w| w.kind() == kind);
        self.sync_closed();
        tracing::debug!(?kind, closed = closed.len(), "refreshing windows");
        match kind {
            WindowKind::FileExplorer => {
                self.open_explorer();
            }
            WindowKind::RecycleBin => {
                self.open_recycle_bin();
            }
            _ => {}
        }
    }

    pub fn refresh_explorers(&mut self) {
        self.refresh(WindowKind::FileExplorer);
    }

    pub fn refresh_recycle_bins(&mut self) {
        self.refresh(WindowKind::RecycleBin);
    }

    /// Cancels deferred work owned by windows that closed since the last call.
    fn sync_closed(&mut self) {
        for id in self.wm.take_closed_windows() {
            self.scheduler.cancel_for_window(id);
        }
    }

    /// Close button. A refusing guard turns into a discard confirmation.
    pub fn request_close(&mut self, id: WindowId) -> bool {
        if self.wm.close(id) {
            self.sync_closed();
            return true;
        }
        if self.wm.contains(id) {
            self.present(Dialog::confirm(
                "Discard unsaved changes?",
                ConfirmIntent::Discard(vec![id]),
            ));
        }
        false
    }

    pub fn request_close_all(&mut self) {
        if self.wm.is_empty() {
            return;
        }
        self.present(Dialog::confirm(
            "Close all open windows?",
            ConfirmIntent::CloseAll,
        ));
    }

    fn close_all(&mut self) {
        let closed = self.wm.close_all_windows();
        self.sync_closed();
        let refused = self.wm.ids_matching(|w| w.content().has_unsaved_changes());
        tracing::debug!(closed = closed.len(), refused = refused.len(), "closed all windows");
        if refused.is_empty() {
            return;
        }
        let message = match refused.len() {
            1 => "Discard unsaved changes?".to_string(),
            n => format!("Discard unsaved changes in {n} windows?"),
        };
        self.present(Dialog::confirm(message, ConfirmIntent::Discard(refused)));
    }

    /// Saves a notepad window. Returns the name written.
    pub fn save_notepad(&mut self, id: WindowId) -> Option<String> {
        let (name, text) = match self.wm.get(id).map(|w| w.content()) {
            Some(AppContent::Notepad(pad)) => (pad.filename().to_string(), pad.text().to_string()),
            _ => return None,
        };
        match self.store.save(&name, &text) {
            Ok(saved) => {
                if let Some(AppContent::Notepad(pad)) = self.wm.get_mut(id).map(|w| w.content_mut()) {
                    pad.mark_saved(saved.clone());
                }
                Some(saved)
            }
            Err(err) => {
                self.report(err);
                None
            }
        }
    }

    /// Saves the focused notepad now and closes it once the delay elapses.
    /// The focused window may be minimized.
    pub fn save_and_close(&mut self, now: Instant) {
        let Some(id) = self
            .wm
            .focused()
            .filter(|w| w.kind() == WindowKind::Notepad)
            .map(|w| w.id())
        else {
            return;
        };
        if self.save_notepad(id).is_some() {
            self.scheduler.schedule(
                now,
                Duration::from_millis(SAVE_AND_CLOSE_DELAY_MS),
                Some(id),
                DeferredTask::FinishSaveAndClose(id),
            );
        }
    }

    /// Offers recycle / permanent / cancel for the focused explorer's
    /// selected file.
    pub fn open_delete_dialog(&mut self) {
        let Some(window) = self.wm.focused() else {
            return;
        };
        if !window.content().has_file_items() {
            return;
        }
        if let AppContent::Explorer(list) = window.content()
            && let Some(name) = list.selected_name()
        {
            self.present(Dialog::delete(name));
        }
    }

    fn move_to_trash(&mut self, name: &str) {
        match self.store.move_to_trash(name) {
            Ok(()) => self.refresh_explorers(),
            Err(err) => self.report(err),
        }
    }

    fn delete_file(&mut self, name: &str) {
        match self.store.delete(name) {
            Ok(()) => self.refresh_explorers(),
            Err(err) => self.report(err),
        }
    }

    fn purge(&mut self, name: &str) {
        match self.store.delete_permanently(name) {
            Ok(()) => self.refresh_recycle_bins(),
            Err(err) => self.report(err),
        }
    }

    fn rename(&mut self, original: &str, value: &str) {
        match self.store.rename(original, value) {
            Ok(true) => self.refresh_explorers(),
            Ok(false) => {}
            Err(StoreError::AlreadyExists(_)) => {
                self.present(Dialog::notice("File already exists!"));
            }
            Err(err) => self.report(err),
        }
    }

    fn duplicate(&mut self, name: &str) {
        match self.store.duplicate(name) {
            Ok(_) => self.refresh_explorers(),
            Err(err) => self.report(err),
        }
    }

    fn restore(&mut self, name: &str) {
        match self.store.restore(name) {
            Ok(()) => {
                self.refresh_recycle_bins();
                self.present(Dialog::notice(format!("File '{name}' restored!")));
            }
            Err(StoreError::AlreadyExists(_)) => {
                self.present(Dialog::notice("File already exists in your computer!"));
            }
            Err(err) => self.report(err),
        }
    }

    /// Applies and persists a wallpaper, then dismisses the picker later.
    pub fn set_wallpaper(&mut self, id: WindowId, index: usize, now: Instant) {
        let Some(wallpaper) = WALLPAPERS.get(index) else {
            return;
        };
        self.wallpaper = wallpaper;
        tracing::info!(wallpaper = wallpaper.name, "wallpaper set");
        if let Err(err) = self.store.set_wallpaper(wallpaper.name) {
            self.report(err);
        }
        if let Some(AppContent::Wallpapers(picker)) = self.wm.get_mut(id).map(|w| w.content_mut()) {
            picker.mark_applied(index);
            self.scheduler.schedule(
                now,
                Duration::from_millis(WALLPAPER_CONFIRM_DELAY_MS),
                Some(id),
                DeferredTask::DismissWallpapers(id),
            );
        }
    }

    /// Runs deferred tasks that are due.
    pub fn tick(&mut self, now: Instant) {
        for task in self.scheduler.drain_due(now) {
            // an earlier task in this batch may have closed the owner
            if !self.wm.contains(task.window()) {
                continue;
            }
            tracing::trace!(?task, "running deferred task");
            match task {
                DeferredTask::FinishSaveAndClose(id) => {
                    self.refresh_explorers();
                    self.request_close(id);
                }
                DeferredTask::DismissWallpapers(id) => {
                    self.wm.force_close(id);
                    self.sync_closed();
                }
            }
        }
    }

    fn apply_outcome(&mut self, outcome: DialogOutcome) {
        match outcome {
            DialogOutcome::Pending => {}
            DialogOutcome::Dismissed | DialogOutcome::Chose(DeleteChoice::Cancel, _) => {
                self.dialog = None;
            }
            DialogOutcome::Confirmed(intent) => {
                self.dialog = None;
                self.run_intent(intent);
            }
            DialogOutcome::Cancelled(ConfirmIntent::DeleteFile(name)) => {
                self.dialog = Some(Dialog::delete(name));
            }
            DialogOutcome::Cancelled(_) => self.dialog = None,
            DialogOutcome::Chose(DeleteChoice::Recycle, name) => {
                self.dialog = None;
                self.move_to_trash(&name);
            }
            DialogOutcome::Chose(DeleteChoice::Permanent, name) => {
                self.dialog = Some(Dialog::confirm(
                    format!("Permanently delete '{name}'?"),
                    ConfirmIntent::DeleteFile(name),
                ));
            }
            DialogOutcome::Renamed { original, value } => {
                self.dialog = None;
                self.rename(&original, &value);
            }
        }
        self.promote_queued_dialog();
    }

    fn run_intent(&mut self, intent: ConfirmIntent) {
        match intent {
            ConfirmIntent::CloseAll => self.close_all(),
            ConfirmIntent::Discard(ids) => {
                for id in ids {
                    self.wm.force_close(id);
                }
                self.sync_closed();
            }
            ConfirmIntent::MoveToTrash(name) => self.move_to_trash(&name),
            ConfirmIntent::DeleteFile(name) => self.delete_file(&name),
            ConfirmIntent::Purge(name) => self.purge(&name),
        }
    }

    fn run_action(&mut self, action: Action, now: Instant) {
        match action {
            Action::SaveAndClose => self.save_and_close(now),
            Action::DeleteDialog => self.open_delete_dialog(),
            Action::CloseAll => self.request_close_all(),
            Action::LaunchNotepad => {
                self.launch(Launcher::Notepad);
            }
            Action::LaunchExplorer => {
                self.launch(Launcher::Explorer);
            }
            Action::LaunchRecycleBin => {
                self.launch(Launcher::RecycleBin);
            }
            Action::LaunchWallpapers => {
                self.launch(Launcher::Wallpapers);
            }
            Action::Quit => self.request_quit(),
            Action::ConfirmToggle
            | Action::ConfirmLeft
            | Action::ConfirmRight
            | Action::ConfirmAccept
            | Action::ConfirmCancel => {}
        }
    }

    fn run_command(&mut self, id: WindowId, command: AppCommand, now: Instant) {
        match command {
            AppCommand::OpenFile(name) => {
                self.open_viewer(&name);
            }
            AppCommand::ConfirmTrash(name) => {
                self.present(Dialog::confirm(
                    format!("Move '{name}' to Recycle Bin?"),
                    ConfirmIntent::MoveToTrash(name),
                ));
            }
            AppCommand::PromptRename(name) => self.present(Dialog::rename(name)),
            AppCommand::Duplicate(name) => self.duplicate(&name),
            AppCommand::Restore(name) => self.restore(&name),
            AppCommand::ConfirmPurge(name) => {
                self.present(Dialog::confirm(
                    format!("Permanently delete '{name}'?"),
                    ConfirmIntent::Purge(name),
                ));
            }
            AppCommand::SetWallpaper(index) => self.set_wallpaper(id, index, now),
        }
    }

    /// Keyboard input. Dialogs are modal; desktop shortcuts come next; the
    /// rest goes to the focused window, and is dropped while that window is
    /// minimized. Returns whether it was used.
    pub fn handle_key(&mut self, key: &KeyEvent, now: Instant) -> bool {
        if self.keybindings.matches(Action::Quit, key) {
            self.request_quit();
            return true;
        }
        if let Some(dialog) = self.dialog.as_mut() {
            let outcome = dialog.handle_key(key, &self.keybindings);
            self.apply_outcome(outcome);
            return true;
        }
        if let Some(action) = self.keybindings.first_match(&Action::GLOBAL, key) {
            self.run_action(action, now);
            return true;
        }
        let Some(id) = self
            .wm
            .focused()
            .filter(|w| w.is_shown())
            .map(|w| w.id())
        else {
            return false;
        };
        let command = self
            .wm
            .get_mut(id)
            .and_then(|w| w.content_mut().handle_key(key));
        if let Some(command) = command {
            self.run_command(id, command, now);
        }
        true
    }

    fn with_content(&mut self, id: WindowId, f: impl FnOnce(&mut AppContent)) {
        if let Some(window) = self.wm.get_mut(id) {
            f(window.content_mut());
        }
    }

    /// Pointer press at `point` (desktop pixels) on `target`.
    pub fn pointer_down(&mut self, target: HitTarget, point: Point, now: Instant) {
        if let Some(dialog) = &self.dialog {
            if let HitTarget::DialogButton(index) = target {
                let outcome = dialog.press(index);
                self.apply_outcome(outcome);
            }
            return;
        }
        match target {
            HitTarget::Desktop | HitTarget::DialogButton(_) => {}
            HitTarget::Launcher(launcher) => {
                self.launch(launcher);
            }
            HitTarget::TaskbarEntry(index) => {
                self.wm.activate_taskbar_entry(index);
            }
            HitTarget::TitleBar(id) => self.pointer = self.wm.begin_drag(id, point),
            HitTarget::ResizeGrip(id) => self.pointer = self.wm.begin_resize(id, point),
            HitTarget::Minimize(id) => {
                self.wm.minimize(id);
            }
            HitTarget::Maximize(id) => {
                self.wm.maximize(id);
            }
            HitTarget::Close(id) => {
                self.request_close(id);
            }
            HitTarget::Body(id) => {
                self.wm.raise(id);
            }
            HitTarget::ListRow(id, row) => {
                self.wm.raise(id);
                self.with_content(id, |content| {
                    if let AppContent::Explorer(list) | AppContent::RecycleBin(list) = content {
                        list.select(row);
                    }
                });
            }
            HitTarget::Swatch(id, index) => {
                self.wm.raise(id);
                self.with_content(id, |content| {
                    if let AppContent::Wallpapers(picker) = content {
                        picker.preview(index);
                    }
                });
            }
            HitTarget::WallpaperSet(id) => {
                self.wm.raise(id);
                let previewed = match self.wm.get(id).map(|w| w.content()) {
                    Some(AppContent::Wallpapers(picker)) => picker.previewed(),
                    _ => None,
                };
                if let Some(index) = previewed {
                    self.set_wallpaper(id, index, now);
                }
            }
            HitTarget::WallpaperCancel(id) => {
                self.with_content(id, |content| {
                    if let AppContent::Wallpapers(picker) = content {
                        picker.cancel();
                    }
                });
            }
            HitTarget::NotepadSave(id) => {
                self.wm.raise(id);
                if self.save_notepad(id).is_some() {
                    self.present(Dialog::notice("File saved!"));
                }
            }
            HitTarget::NotepadField(id, field) => {
                self.wm.raise(id);
                self.with_content(id, |content| {
                    if let AppContent::Notepad(pad) = content {
                        pad.focus(field);
                    }
                });
            }
        }
    }

    /// Pointer motion with the button held.
    pub fn pointer_move(&mut self, point: Point) -> bool {
        match self.pointer {
            Some(token) => self.wm.drag_to(token, point) || self.wm.resize_to(token, point),
            None => false,
        }
    }

    /// Button release, wherever it happens.
    pub fn pointer_up(&mut self) {
        if let Some(token) = self.pointer.take() {
            self.wm.end_pointer_session(token);
        }
    }
}
