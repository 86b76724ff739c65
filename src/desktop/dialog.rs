use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::keybindings::{Action, KeyBindings};
use crate::window::WindowId;

/// What a confirmed yes/no dialog goes on to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmIntent {
    CloseAll,
    /// Force-close windows whose guards refused.
    Discard(Vec<WindowId>),
    MoveToTrash(String),
    /// Permanent delete of a live file, reached from the delete dialog.
    DeleteFile(String),
    /// Permanent delete of a trashed file.
    Purge(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteChoice {
    Recycle,
    Permanent,
    Cancel,
}

impl DeleteChoice {
    const ORDER: [DeleteChoice; 3] = [
        DeleteChoice::Recycle,
        DeleteChoice::Permanent,
        DeleteChoice::Cancel,
    ];
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dialog {
    Confirm {
        message: String,
        intent: ConfirmIntent,
        selected_confirm: bool,
    },
    Delete {
        file: String,
        selected: usize,
    },
    Rename {
        original: String,
        value: String,
    },
    Notice {
        message: String,
    },
}

/// Result of feeding an input to the dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogOutcome {
    /// Still open.
    Pending,
    Dismissed,
    Confirmed(ConfirmIntent),
    Cancelled(ConfirmIntent),
    Chose(DeleteChoice, String),
    Renamed { original: String, value: String },
}

impl Dialog {
    pub fn confirm(message: impl Into<String>, intent: ConfirmIntent) -> Self {
        Self::Confirm {
            message: message.into(),
            intent,
            selected_confirm: true,
        }
    }

    pub fn delete(file: impl Into<String>) -> Self {
        Self::Delete {
            file: file.into(),
            selected: 0,
        }
    }

    pub fn rename(original: impl Into<String>) -> Self {
        let original = original.into();
        Self::Rename {
            value: original.clone(),
            original,
        }
    }

    pub fn notice(message: impl Into<String>) -> Self {
        Self::Notice {
            message: message.into(),
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Confirm { .. } => "Confirm",
            Self::Delete { .. } => "Delete Document",
            Self::Rename { .. } => "Rename",
            Self::Notice { .. } => "Notice",
        }
    }

    pub fn body(&self) -> String {
        match self {
            Self::Confirm { message, .. } | Self::Notice { message } => message.clone(),
            Self::Delete { file, .. } => format!("'{file}': select an action:"),
            Self::Rename { value, .. } => format!("Enter new filename:\n{value}_"),
        }
    }

    pub fn buttons(&self) -> &'static [&'static str] {
        match self {
            Self::Confirm { .. } => &["[ OK ]", "[ Cancel ]"],
            Self::Delete { .. } => &[
                "[ Move to Recycle Bin ]",
                "[ Delete Permanently ]",
                "[ Cancel ]",
            ],
            Self::Rename { .. } => &["[ Rename ]", "[ Cancel ]"],
            Self::Notice { .. } => &["[ OK ]"],
        }
    }

    pub fn selected_button(&self) -> usize {
        match self {
            Self::Confirm {
                selected_confirm, ..
            } => usize::from(!*selected_confirm),
            Self::Delete { selected, .. } => *selected,
            Self::Rename { .. } | Self::Notice { .. } => 0,
        }
    }

    fn cycle(&mut self, forward: bool) {
        match self {
            Self::Confirm {
                selected_confirm, ..
            } => *selected_confirm = !*selected_confirm,
            Self::Delete { selected, .. } => {
                let n = DeleteChoice::ORDER.len();
                *selected = if forward {
                    (*selected + 1) % n
                } else {
                    (*selected + n - 1) % n
                };
            }
            Self::Rename { .. } | Self::Notice { .. } => {}
        }
    }

    /// Activates button `index`, as a click or Enter on it would.
    pub fn press(&self, index: usize) -> DialogOutcome {
        match self {
            Self::Confirm { intent, .. } => match index {
                0 => DialogOutcome::Confirmed(intent.clone()),
                _ => DialogOutcome::Cancelled(intent.clone()),
            },
            Self::Delete { file, .. } => match DeleteChoice::ORDER.get(index) {
                Some(DeleteChoice::Cancel) | None => DialogOutcome::Dismissed,
                Some(choice) => DialogOutcome::Chose(*choice, file.clone()),
            },
            Self::Rename { original, value } => match index {
                0 => DialogOutcome::Renamed {
                    original: original.clone(),
                    value: value.clone(),
                },
                _ => DialogOutcome::Dismissed,
            },
            Self::Notice { .. } => DialogOutcome::Dismissed,
        }
    }

    fn cancel(&self) -> DialogOutcome {
        match self {
            Self::Confirm { intent, .. } => DialogOutcome::Cancelled(intent.clone()),
            _ => DialogOutcome::Dismissed,
        }
    }

    // typed text must not trigger the y/n shortcuts
    fn handle_text_key(&mut self, key: &KeyEvent) -> DialogOutcome {
        match key.code {
            KeyCode::Enter => return self.press(0),
            KeyCode::Esc => return DialogOutcome::Dismissed,
            _ => {}
        }
        let Self::Rename { value, .. } = self else {
            return DialogOutcome::Pending;
        };
        match key.code {
            KeyCode::Backspace => {
                value.pop();
            }
            KeyCode::Char(c) if key.modifiers.difference(KeyModifiers::SHIFT).is_empty() => {
                value.push(c);
            }
            _ => {}
        }
        DialogOutcome::Pending
    }

    pub fn handle_key(&mut self, key: &KeyEvent, kb: &KeyBindings) -> DialogOutcome {
        if matches!(self, Self::Rename { .. }) {
            return self.handle_text_key(key);
        }
        if kb.matches(Action::ConfirmCancel, key) {
            return self.cancel();
        }
        if kb.matches(Action::ConfirmAccept, key) {
            // `y` always means yes; Enter presses the highlighted button
            if key.code != KeyCode::Enter && matches!(self, Self::Confirm { .. }) {
                return self.press(0);
            }
            return self.press(self.selected_button());
        }
        if kb.matches(Action::ConfirmToggle, key) {
            self.cycle(key.code != KeyCode::BackTab);
        } else if kb.matches(Action::ConfirmLeft, key) {
            self.cycle(false);
        } else if kb.matches(Action::ConfirmRight, key) {
            self.cycle(true);
        }
        DialogOutcome::Pending
    }
}
