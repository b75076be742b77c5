//! Bounded buffer of typed syllable letters.
//!
//! The buffer stores the raw letters the user has typed for the current
//! syllable (e.g. "ni") and counts how many characters those keystrokes put
//! into the target text field. That count is what a commit deletes before
//! inserting the chosen candidate.

use crate::error::ImeError;

/// Default number of usable characters in a syllable buffer.
pub const DEFAULT_CAPACITY: usize = 15;

/// Input buffer holding ASCII letters only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputBuffer {
    text: String,
    capacity: usize,
    source_len: usize,
}

impl InputBuffer {
    /// Create an empty buffer with the default capacity.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create an empty buffer that holds at most `capacity` letters.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            text: String::with_capacity(capacity),
            capacity,
            source_len: 0,
        }
    }

    /// Current contents, used as the dictionary key.
    pub fn value(&self) -> &str {
        &self.text
    }

    /// Number of letters in the buffer.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.text.len() >= self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Characters this syllable has put into the target field.
    pub fn source_len(&self) -> usize {
        self.source_len
    }

    /// Append a letter, reporting why it was refused.
    pub fn try_append(&mut self, ch: char) -> Result<(), ImeError> {
        if !ch.is_ascii_alphabetic() {
            return Err(ImeError::InvalidKey(ch));
        }
        if self.is_full() {
            return Err(ImeError::BufferFull {
                capacity: self.capacity,
            });
        }
        self.text.push(ch);
        self.source_len += 1;
        Ok(())
    }

    /// Append a letter. Returns false if it was not a letter or the buffer
    /// is full; the buffer is unchanged in that case.
    pub fn append(&mut self, ch: char) -> bool {
        self.try_append(ch).is_ok()
    }

    /// Count a letter the host typed into the target field that the buffer
    /// could not hold. The syllable is unchanged, but a commit must still
    /// delete that character.
    pub fn record_overflow(&mut self) {
        self.source_len += 1;
    }

    /// Remove the last letter (backspace).
    /// Returns true if a letter was removed.
    pub fn delete_last(&mut self) -> bool {
        self.source_len = self.source_len.saturating_sub(1);
        self.text.pop().is_some()
    }

    /// Clear the buffer and zero the source-length counter.
    pub fn reset(&mut self) {
        self.text.clear();
        self.source_len = 0;
    }
}

impl Default for InputBuffer {
    fn default() -> Self {
        Self::new()
    }
}
