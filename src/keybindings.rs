use std::collections::HashMap;
use std::fmt;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Quit,
    // Desktop shortcuts
    SaveAndClose,
    DeleteDialog,
    CloseAll,
    LaunchNotepad,
    LaunchExplorer,
    LaunchRecycleBin,
    LaunchWallpapers,
    // Dialog navigation/actions
    ConfirmToggle,
    ConfirmLeft,
    ConfirmRight,
    ConfirmAccept,
    ConfirmCancel,
}

impl Action {
    /// Shortcuts handled by the desktop before the focused window sees the key.
    pub const GLOBAL: [Action; 7] = [
        Action::SaveAndClose,
        Action::DeleteDialog,
        Action::CloseAll,
        Action::LaunchNotepad,
        Action::LaunchExplorer,
        Action::LaunchRecycleBin,
        Action::LaunchWallpapers,
    ];
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Action::Quit => "Quit",
            Action::SaveAndClose => "Save document and close",
            Action::DeleteDialog => "Delete selected file",
            Action::CloseAll => "Close all windows",
            Action::LaunchNotepad => "Open Notepad",
            Action::LaunchExplorer => "Open File Explorer",
            Action::LaunchRecycleBin => "Open Recycle Bin",
            Action::LaunchWallpapers => "Open Wallpapers",
            Action::ConfirmToggle => "Dialog next button (Tab)",
            Action::ConfirmLeft => "Dialog previous button",
            Action::ConfirmRight => "Dialog next button",
            Action::ConfirmAccept => "Dialog accept",
            Action::ConfirmCancel => "Dialog cancel",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyCombo {
    pub code: KeyCode,
    pub mods: KeyModifiers,
}

impl KeyCombo {
    pub fn new(code: KeyCode, mods: KeyModifiers) -> Self {
        Self { code, mods }
    }

    pub fn ctrl(c: char) -> Self {
        Self::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    pub fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    /// Letter keys match either case, so Ctrl+S and Ctrl+Shift+S both save.
    pub fn matches(&self, key: &KeyEvent) -> bool {
        match (self.code, key.code) {
            (KeyCode::Char(a), KeyCode::Char(b)) if a.is_ascii_alphabetic() => {
                a.eq_ignore_ascii_case(&b)
                    && key.modifiers.difference(KeyModifiers::SHIFT) == self.mods
            }
            _ => key.code == self.code && key.modifiers == self.mods,
        }
    }

    pub fn display(&self) -> String {
        let mut parts = Vec::new();
        if self.mods.contains(KeyModifiers::CONTROL) {
            parts.push("Ctrl".to_string());
        }
        if self.mods.contains(KeyModifiers::SHIFT) {
            parts.push("Shift".to_string());
        }
        if self.mods.contains(KeyModifiers::ALT) {
            parts.push("Alt".to_string());
        }
        let code = match self.code {
            KeyCode::Char(c) => c.to_ascii_uppercase().to_string(),
            KeyCode::Esc => "Esc".to_string(),
            KeyCode::Enter => "Enter".to_string(),
            KeyCode::Tab => "Tab".to_string(),
            KeyCode::BackTab => "BackTab".to_string(),
            KeyCode::Left => "Left".to_string(),
            KeyCode::Right => "Right".to_string(),
            KeyCode::F(n) => format!("F{}", n),
            _ => format!("{:?}", self.code),
        };
        parts.push(code);
        parts.join("+")
    }
}

impl fmt::Display for KeyCombo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

#[derive(Debug, Clone)]
pub struct KeyBindings {
    map: HashMap<Action, Vec<KeyCombo>>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        use Action::*;
        let mut kb = Self::new();
        kb.add(Quit, KeyCombo::ctrl('q'));
        kb.add(SaveAndClose, KeyCombo::ctrl('s'));
        kb.add(DeleteDialog, KeyCombo::ctrl('d'));
        kb.add(CloseAll, KeyCombo::ctrl('x'));
        kb.add(LaunchNotepad, KeyCombo::plain(KeyCode::F(1)));
        kb.add(LaunchExplorer, KeyCombo::plain(KeyCode::F(2)));
        kb.add(LaunchRecycleBin, KeyCombo::plain(KeyCode::F(3)));
        kb.add(LaunchWallpapers, KeyCombo::plain(KeyCode::F(4)));
        // Dialogs
        kb.add(ConfirmToggle, KeyCombo::plain(KeyCode::Tab));
        kb.add(ConfirmToggle, KeyCombo::plain(KeyCode::BackTab));
        kb.add(ConfirmLeft, KeyCombo::plain(KeyCode::Left));
        kb.add(ConfirmRight, KeyCombo::plain(KeyCode::Right));
        kb.add(ConfirmAccept, KeyCombo::plain(KeyCode::Enter));
        kb.add(ConfirmAccept, KeyCombo::plain(KeyCode::Char('y')));
        kb.add(ConfirmCancel, KeyCombo::plain(KeyCode::Esc));
        kb.add(ConfirmCancel, KeyCombo::plain(KeyCode::Char('n')));
        kb
    }
}

impl KeyBindings {
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    pub fn add(&mut self, action: Action, combo: KeyCombo) {
        self.map.entry(action).or_default().push(combo);
    }

    pub fn matches(&self, action: Action, key: &KeyEvent) -> bool {
        self.map
            .get(&action)
            .is_some_and(|list| list.iter().any(|c| c.matches(key)))
    }

    /// First of `candidates` bound to `key`, in the order given.
    pub fn first_match(&self, candidates: &[Action], key: &KeyEvent) -> Option<Action> {
        candidates.iter().copied().find(|a| self.matches(*a, key))
    }

    /// Return the display strings for all combos mapped to `action`.
    pub fn combos_for(&self, action: Action) -> Vec<String> {
        self.map
            .get(&action)
            .map(|list| list.iter().map(|c| c.display()).collect())
            .unwrap_or_default()
    }

    /// Return the first `KeyCombo` mapped to `action`, if any.
    pub fn first_combo(&self, action: Action) -> Option<KeyCombo> {
        self.map.get(&action).and_then(|list| list.first().cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_quit() {
        let kb = KeyBindings::default();
        let ev = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL);
        assert!(kb.matches(Action::Quit, &ev));
    }

    #[test]
    fn ctrl_letters_ignore_case_and_shift() {
        let kb = KeyBindings::default();
        let upper = KeyEvent::new(
            KeyCode::Char('S'),
            KeyModifiers::CONTROL | KeyModifiers::SHIFT,
        );
        assert!(kb.matches(Action::SaveAndClose, &upper));
        let plain = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::NONE);
        assert!(!kb.matches(Action::SaveAndClose, &plain));
    }

    #[test]
    fn first_match_respects_candidate_order() {
        let kb = KeyBindings::default();
        let f3 = KeyEvent::new(KeyCode::F(3), KeyModifiers::NONE);
        assert_eq!(
            kb.first_match(&Action::GLOBAL, &f3),
            Some(Action::LaunchRecycleBin)
        );
        let a = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE);
        assert_eq!(kb.first_match(&Action::GLOBAL, &a), None);
    }

    #[test]
    fn combo_display() {
        let kb = KeyBindings::default();
        assert_eq!(
            kb.first_combo(Action::CloseAll).map(|c| c.display()),
            Some("Ctrl+X".to_string())
        );
        assert_eq!(kb.combos_for(Action::LaunchWallpapers), vec!["F4"]);
    }
}
