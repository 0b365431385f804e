//! Key bindings for the explorer TUI.

use ftui::{KeyCode, KeyEvent, Modifiers};

/// Configurable key bindings for TUI navigation.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    /// Key to quit the application.
    pub quit: Vec<KeyEvent>,
    /// Key to drill into the highlighted series.
    pub confirm: Vec<KeyEvent>,
    /// Key to cancel/go back.
    pub cancel: Vec<KeyEvent>,
    /// Key to show help.
    pub help: Vec<KeyEvent>,
    /// Key to move the series cursor forward.
    pub next: Vec<KeyEvent>,
    /// Key to move the series cursor back.
    pub prev: Vec<KeyEvent>,
    /// Key to reset to the overview.
    pub reset: Vec<KeyEvent>,
    /// Key to cycle the color theme.
    pub theme: Vec<KeyEvent>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            quit: vec![
                KeyEvent::new(KeyCode::Char('q')),
                KeyEvent::new(KeyCode::Char('c')).with_modifiers(Modifiers::CTRL),
            ],
            confirm: vec![KeyEvent::new(KeyCode::Enter)],
            cancel: vec![KeyEvent::new(KeyCode::Escape)],
            help: vec![
                KeyEvent::new(KeyCode::Char('?')),
                KeyEvent::new(KeyCode::F(1)),
            ],
            next: vec![
                KeyEvent::new(KeyCode::Right),
                KeyEvent::new(KeyCode::Char('l')),
                KeyEvent::new(KeyCode::Tab),
            ],
            prev: vec![
                KeyEvent::new(KeyCode::Left),
                KeyEvent::new(KeyCode::Char('h')),
                KeyEvent::new(KeyCode::BackTab),
            ],
            reset: vec![KeyEvent::new(KeyCode::Char('r'))],
            theme: vec![KeyEvent::new(KeyCode::Char('t'))],
        }
    }
}

impl KeyBindings {
    fn matches_any(bindings: &[KeyEvent], key: &KeyEvent) -> bool {
        // Ignore KeyEventKind when matching: ftui will emit both Press and Repeat,
        // and we want bindings to apply to either.
        //
        // Modifier matching allows an extra SHIFT bit. Many terminals report SHIFT
        // even when the shifted character is already encoded in KeyCode::Char('?').
        bindings
            .iter()
            .any(|b| b.code == key.code && mods_match(b.modifiers, key.modifiers))
    }

    /// Check if a key event matches any quit binding.
    pub fn is_quit(&self, key: &KeyEvent) -> bool {
        Self::matches_any(&self.quit, key)
    }

    /// Check if a key event matches any confirm binding.
    pub fn is_confirm(&self, key: &KeyEvent) -> bool {
        Self::matches_any(&self.confirm, key)
    }

    /// Check if a key event matches any cancel binding.
    pub fn is_cancel(&self, key: &KeyEvent) -> bool {
        Self::matches_any(&self.cancel, key)
    }

    /// Check if a key event matches any help binding.
    pub fn is_help(&self, key: &KeyEvent) -> bool {
        Self::matches_any(&self.help, key)
    }

    /// Check if a key event matches any next binding.
    pub fn is_next(&self, key: &KeyEvent) -> bool {
        Self::matches_any(&self.next, key)
    }

    /// Check if a key event matches any prev binding.
    pub fn is_prev(&self, key: &KeyEvent) -> bool {
        Self::matches_any(&self.prev, key)
    }

    /// Check if a key event matches any reset binding.
    pub fn is_reset(&self, key: &KeyEvent) -> bool {
        Self::matches_any(&self.reset, key)
    }

    /// Check if a key event matches any theme binding.
    pub fn is_theme(&self, key: &KeyEvent) -> bool {
        Self::matches_any(&self.theme, key)
    }
}

fn mods_match(binding: Modifiers, observed: Modifiers) -> bool {
    observed == binding || observed == (binding | Modifiers::SHIFT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bindings() {
        let bindings = KeyBindings::default();

        let q_key = KeyEvent::new(KeyCode::Char('q'));
        assert!(bindings.is_quit(&q_key));

        let ctrl_c = KeyEvent::new(KeyCode::Char('c')).with_modifiers(Modifiers::CTRL);
        assert!(bindings.is_quit(&ctrl_c));

        // Esc is cancel by default; app state decides whether it quits.
        let esc = KeyEvent::new(KeyCode::Escape);
        assert!(!bindings.is_quit(&esc));
        assert!(bindings.is_cancel(&esc));

        let right = KeyEvent::new(KeyCode::Right);
        assert!(bindings.is_next(&right));

        let l = KeyEvent::new(KeyCode::Char('l'));
        assert!(bindings.is_next(&l));

        let r = KeyEvent::new(KeyCode::Char('r'));
        assert!(bindings.is_reset(&r));

        let t = KeyEvent::new(KeyCode::Char('t'));
        assert!(bindings.is_theme(&t));
        assert!(!bindings.is_reset(&t));
    }

    #[test]
    fn test_shifted_help_key_still_matches() {
        let bindings = KeyBindings::default();
        let shifted = KeyEvent::new(KeyCode::Char('?')).with_modifiers(Modifiers::SHIFT);
        assert!(bindings.is_help(&shifted));
    }
}
