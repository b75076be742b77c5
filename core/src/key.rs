//! Key events consumed by an IME session.

/// Label of the newline key on the on-screen keyboard (symbol-font glyph).
pub const NEW_LINE_LABEL: &str = "\u{F8A2}";

/// Label of the backspace key on the on-screen keyboard (symbol-font glyph).
pub const BACKSPACE_LABEL: &str = "\u{F55A}";

/// Key event types that the IME can process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEvent {
    /// ASCII letter typed into the current syllable
    Letter(char),
    /// Delete the last typed letter
    Backspace,
    /// Enter/newline: drop the syllable without converting it
    Enter,
    /// Commit the highlighted candidate
    Space,
    /// Select a candidate on the current page (0-based)
    Select(usize),
    Up,
    Down,
    PageUp,
    PageDown,
    /// Anything else; routed elsewhere by the host
    Other(char),
}

impl KeyEvent {
    /// Classify a single typed character.
    pub fn from_char(ch: char) -> Self {
        match ch {
            c if c.is_ascii_alphabetic() => KeyEvent::Letter(c),
            '\n' | '\r' => KeyEvent::Enter,
            '\u{8}' | '\u{7f}' => KeyEvent::Backspace,
            ' ' => KeyEvent::Space,
            c => KeyEvent::Other(c),
        }
    }

    /// Classify the label of an on-screen keyboard button.
    ///
    /// Returns `None` for an empty label.
    pub fn from_label(label: &str) -> Option<Self> {
        if label == "Enter" || label == NEW_LINE_LABEL {
            return Some(KeyEvent::Enter);
        }
        if label == BACKSPACE_LABEL {
            return Some(KeyEvent::Backspace);
        }
        let first = label.chars().next()?;
        Some(if first.is_ascii_alphabetic() {
            KeyEvent::Letter(first)
        } else {
            KeyEvent::Other(first)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_chars() {
        assert_eq!(KeyEvent::from_char('n'), KeyEvent::Letter('n'));
        assert_eq!(KeyEvent::from_char('Q'), KeyEvent::Letter('Q'));
        assert_eq!(KeyEvent::from_char('\n'), KeyEvent::Enter);
        assert_eq!(KeyEvent::from_char('\u{7f}'), KeyEvent::Backspace);
        assert_eq!(KeyEvent::from_char(' '), KeyEvent::Space);
        assert_eq!(KeyEvent::from_char('3'), KeyEvent::Other('3'));
        assert_eq!(KeyEvent::from_char('ü'), KeyEvent::Other('ü'));
    }

    #[test]
    fn classify_labels() {
        assert_eq!(KeyEvent::from_label("Enter"), Some(KeyEvent::Enter));
        assert_eq!(KeyEvent::from_label(NEW_LINE_LABEL), Some(KeyEvent::Enter));
        assert_eq!(KeyEvent::from_label(BACKSPACE_LABEL), Some(KeyEvent::Backspace));
        assert_eq!(KeyEvent::from_label("a"), Some(KeyEvent::Letter('a')));
        assert_eq!(KeyEvent::from_label("ABC"), Some(KeyEvent::Letter('A')));
        assert_eq!(KeyEvent::from_label("1#"), Some(KeyEvent::Other('1')));
        assert_eq!(KeyEvent::from_label(""), None);
    }
}
