//! Target text field collaborator and the commit instruction applied to it.

/// A text field the IME edits on commit.
pub trait TextTarget {
    /// Delete up to `count` characters before the cursor.
    fn delete_chars(&mut self, count: usize);

    /// Insert `text` at the cursor.
    fn insert_text(&mut self, text: &str);
}

/// Replace the typed syllable in the target field with a candidate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitAction {
    /// Characters to delete from the tail of the target field
    pub delete_count: usize,
    /// Text inserted after the deletion
    pub insert_text: String,
}

impl CommitAction {
    pub fn new<T: Into<String>>(delete_count: usize, insert_text: T) -> Self {
        Self {
            delete_count,
            insert_text: insert_text.into(),
        }
    }

    /// True for the no-op commit produced when nothing was composed.
    pub fn is_empty(&self) -> bool {
        self.delete_count == 0 && self.insert_text.is_empty()
    }

    /// Delete then insert.
    pub fn apply<T: TextTarget + ?Sized>(&self, target: &mut T) {
        target.delete_chars(self.delete_count);
        if !self.insert_text.is_empty() {
            target.insert_text(&self.insert_text);
        }
    }
}

/// `String`-backed text field with the cursor fixed at the end.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextField {
    text: String,
}

impl TextField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Append a character as the host keyboard would.
    pub fn push(&mut self, ch: char) {
        self.text.push(ch);
    }
}

impl TextTarget for TextField {
    fn delete_chars(&mut self, count: usize) {
        for _ in 0..count {
            if self.text.pop().is_none() {
                break;
            }
        }
    }

    fn insert_text(&mut self, text: &str) {
        self.text.push_str(text);
    }
}
