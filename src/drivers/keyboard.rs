use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Cleans up raw key events before they reach the desktop.
///
/// Shift+Tab arrives as `Tab` with SHIFT on some terminals and `BackTab` on
/// others; it always leaves here as `BackTab`. Release events are dropped.
/// Auto-repeat is kept for typing but dropped for function keys and control
/// chords, so holding F1 opens one notepad rather than dozens.
#[derive(Default)]
pub struct KeyboardNormalizer {
    esc_down: bool,
}

impl KeyboardNormalizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn normalize(&mut self, evt: Event) -> Option<Event> {
        match evt {
            Event::Key(mut key) => {
                if key.code == KeyCode::Tab && key.modifiers.contains(KeyModifiers::SHIFT) {
                    key.code = KeyCode::BackTab;
                    key.modifiers.remove(KeyModifiers::SHIFT);
                }
                match key.kind {
                    KeyEventKind::Release => {
                        if key.code == KeyCode::Esc {
                            self.esc_down = false;
                        }
                        return None;
                    }
                    KeyEventKind::Repeat if is_command(&key) => return None,
                    _ => {}
                }
                // windows consoles report a held Esc as a stream of presses
                if cfg!(windows) {
                    if key.code == KeyCode::Esc {
                        if self.esc_down {
                            return None;
                        }
                        self.esc_down = true;
                    } else {
                        self.esc_down = false;
                    }
                }
                Some(Event::Key(key))
            }
            other => Some(other),
        }
    }
}

fn is_command(key: &KeyEvent) -> bool {
    matches!(key.code, KeyCode::F(_))
        || key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
}
