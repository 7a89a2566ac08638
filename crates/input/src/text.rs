//! Single-line text entry for the login prompt.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Result of feeding a key to a [`TextField`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAction {
    /// Text changed (or the key was consumed without effect).
    Edited,
    Submit,
    Cancel,
    /// Ctrl-C.
    Quit,
    Ignored,
}

/// Editable line with a character limit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextField {
    value: String,
    max_chars: Option<usize>,
}

impl TextField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limit(max_chars: usize) -> Self {
        Self {
            value: String::new(),
            max_chars: Some(max_chars),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn len(&self) -> usize {
        self.value.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    pub fn clear(&mut self) {
        self.value.clear();
    }

    /// Take the value out, leaving the field empty.
    pub fn take(&mut self) -> String {
        std::mem::take(&mut self.value)
    }

    pub fn push(&mut self, ch: char) -> bool {
        if ch.is_control() || self.max_chars.is_some_and(|max| self.len() >= max) {
            return false;
        }
        self.value.push(ch);
        true
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> TextAction {
        if key.kind == KeyEventKind::Release {
            return TextAction::Ignored;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('c') => TextAction::Quit,
                KeyCode::Char('u') => {
                    self.clear();
                    TextAction::Edited
                }
                _ => TextAction::Ignored,
            };
        }
        match key.code {
            KeyCode::Enter => TextAction::Submit,
            KeyCode::Esc => TextAction::Cancel,
            KeyCode::Backspace => {
                self.value.pop();
                TextAction::Edited
            }
            KeyCode::Char(ch) => {
                self.push(ch);
                TextAction::Edited
            }
            _ => TextAction::Ignored,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::from(code)
    }

    #[test]
    fn test_typing_and_backspace() {
        let mut field = TextField::new();
        for ch in "Adaa".chars() {
            assert_eq!(field.handle_key(key(KeyCode::Char(ch))), TextAction::Edited);
        }
        field.handle_key(key(KeyCode::Backspace));
        assert_eq!(field.value(), "Ada");
        assert_eq!(field.handle_key(key(KeyCode::Enter)), TextAction::Submit);
        assert_eq!(field.take(), "Ada");
        assert!(field.is_empty());
    }

    #[test]
    fn test_limit_counts_chars() {
        let mut field = TextField::with_limit(3);
        for ch in "ñañu".chars() {
            field.push(ch);
        }
        assert_eq!(field.value(), "ñañ");
        assert_eq!(field.len(), 3);
    }

    #[test]
    fn test_control_keys() {
        let mut field = TextField::new();
        field.push('x');
        assert_eq!(
            field.handle_key(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL)),
            TextAction::Edited
        );
        assert!(field.is_empty());
        assert_eq!(
            field.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            TextAction::Quit
        );
        assert_eq!(field.handle_key(key(KeyCode::Esc)), TextAction::Cancel);
        assert_eq!(field.handle_key(key(KeyCode::Tab)), TextAction::Ignored);
    }
}
