//! IME session: the input buffer, lookup engine and candidate surface of one
//! text-entry context.
//!
//! A session is an ordinary owned value; a host creates one per keyboard or
//! text field and feeds it key events. After each event the host reads the
//! candidate list (it is also pushed to the session's [`CandidateSurface`])
//! and applies any [`CommitAction`] to its text field.
//!
//! ```
//! use syllable_ime_core::{ImeSession, KeyEvent, KeyResult, TextField};
//!
//! let mut session = ImeSession::new();
//! session.set_dictionary(r#"{"ni":["你","尼"]}"#).unwrap();
//!
//! let mut field = TextField::new();
//! for ch in ['n', 'i'] {
//!     field.push(ch); // the host keyboard types the letter
//!     session.process_key(KeyEvent::Letter(ch)).unwrap();
//! }
//! assert_eq!(session.candidates().candidates(), ["你", "尼"]);
//!
//! if let KeyResult::Committed(action) = session.process_key(KeyEvent::Select(0)).unwrap() {
//!     action.apply(&mut field);
//! }
//! assert_eq!(field.text(), "你");
//! ```

use crate::candidate::CandidateList;
use crate::config::ImeConfig;
use crate::dictionary::Dictionary;
use crate::engine::LookupEngine;
use crate::error::ImeError;
use crate::input_buffer::InputBuffer;
use crate::key::KeyEvent;
use crate::surface::{CandidateSurface, NullSurface};
use crate::target::CommitAction;
use std::sync::Arc;
use tracing::debug;

/// Where a session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Buffer empty, no candidates
    Idle,
    /// At least one letter typed
    Composing,
    /// Resources released; the session must not be used again
    TornDown,
}

/// Result of processing a key event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyResult {
    /// Session state changed
    Handled,
    /// A candidate was chosen; the host applies the action to its text field
    Committed(CommitAction),
    /// The session ignored the key
    NotHandled,
}

/// One IME session.
pub struct ImeSession<S: CandidateSurface = NullSurface> {
    buffer: InputBuffer,
    candidates: CandidateList,
    /// `None` once torn down
    engine: Option<LookupEngine>,
    config: ImeConfig,
    surface: S,
}

impl ImeSession<NullSurface> {
    /// Session over the bundled dictionary with default settings and no
    /// display surface.
    pub fn new() -> Self {
        Self::with_surface(NullSurface)
    }
}

impl Default for ImeSession<NullSurface> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: CandidateSurface> ImeSession<S> {
    /// Session over the bundled dictionary, drawing candidates on `surface`.
    pub fn with_surface(surface: S) -> Self {
        Self::with_engine(LookupEngine::builtin(), ImeConfig::default(), surface)
    }

    /// Session built from `config`, loading its dictionary file if one is
    /// named. Invalid settings fail with [`ImeError::Config`].
    pub fn from_config(config: ImeConfig, surface: S) -> Result<Self, ImeError> {
        config.validate()?;
        let engine = match &config.dictionary {
            Some(path) => LookupEngine::new(Arc::new(Dictionary::load_json(path)?)),
            None => LookupEngine::builtin(),
        };
        Ok(Self::with_engine(engine, config, surface))
    }

    /// Session over an existing engine.
    pub fn with_engine(mut engine: LookupEngine, config: ImeConfig, surface: S) -> Self {
        engine.set_case_insensitive(config.case_insensitive_keys);
        let mut surface = surface;
        surface.clear();
        Self {
            buffer: InputBuffer::with_capacity(config.capacity),
            candidates: CandidateList::with_page_size(config.page_size),
            engine: Some(engine),
            config,
            surface,
        }
    }

    /// The lookup engine.
    pub fn engine(&self) -> Result<&LookupEngine, ImeError> {
        self.engine.as_ref().ok_or(ImeError::UseAfterTeardown)
    }

    fn engine_mut(&mut self) -> Result<&mut LookupEngine, ImeError> {
        self.engine.as_mut().ok_or(ImeError::UseAfterTeardown)
    }

    pub fn config(&self) -> &ImeConfig {
        &self.config
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn phase(&self) -> Phase {
        if self.engine.is_none() {
            Phase::TornDown
        } else if self.buffer.is_empty() {
            Phase::Idle
        } else {
            Phase::Composing
        }
    }

    /// Current syllable.
    pub fn value(&self) -> &str {
        self.buffer.value()
    }

    /// Characters a commit would delete from the target field.
    pub fn source_len(&self) -> usize {
        self.buffer.source_len()
    }

    pub fn input_buffer(&self) -> &InputBuffer {
        &self.buffer
    }

    pub fn candidates(&self) -> &CandidateList {
        &self.candidates
    }

    /// Re-query the dictionary for the current buffer value.
    fn refresh_candidates(&mut self) -> Result<(), ImeError> {
        let found = self.engine()?.lookup(self.buffer.value());
        self.candidates.set_candidates(found);
        self.redraw();
        Ok(())
    }

    fn redraw(&mut self) {
        if self.candidates.is_empty() {
            self.surface.clear();
        } else {
            self.surface.show(self.candidates.current_page_candidates());
        }
    }

    fn clear_state(&mut self) {
        self.buffer.reset();
        self.candidates.clear();
        self.surface.clear();
    }

    /// Append a letter and recompute candidates.
    /// Returns false if the letter was refused (not a letter, buffer full).
    pub fn append(&mut self, ch: char) -> Result<bool, ImeError> {
        match self.try_append(ch) {
            Ok(()) => Ok(true),
            Err(ImeError::UseAfterTeardown) => Err(ImeError::UseAfterTeardown),
            Err(e) => {
                debug!(error = %e, "letter refused");
                Ok(false)
            }
        }
    }

    /// Append a letter, reporting why it was refused.
    ///
    /// A letter refused because the buffer is full is still counted in
    /// [`source_len`](Self::source_len): the host has already typed it into
    /// its field, so the next commit deletes it too.
    pub fn try_append(&mut self, ch: char) -> Result<(), ImeError> {
        self.engine()?;
        if let Err(e) = self.buffer.try_append(ch) {
            if let ImeError::BufferFull { .. } = e {
                self.buffer.record_overflow();
            }
            return Err(e);
        }
        self.refresh_candidates()
    }

    /// Remove the last letter and recompute candidates.
    /// Returns true if a letter was removed.
    pub fn delete_last(&mut self) -> Result<bool, ImeError> {
        self.engine()?;
        let removed = self.buffer.delete_last();
        if self.buffer.is_empty() {
            self.clear_state();
            if removed {
                debug!("back to idle");
            }
        } else {
            self.refresh_candidates()?;
        }
        Ok(removed)
    }

    /// Drop the current syllable without committing it.
    pub fn reset(&mut self) -> Result<(), ImeError> {
        self.engine()?;
        self.clear_state();
        Ok(())
    }

    /// Commit candidate `index` (into the full list), reporting an empty
    /// buffer as [`ImeError::EmptyBufferCommit`].
    ///
    /// On error the session is unchanged.
    pub fn try_commit(&mut self, index: usize) -> Result<CommitAction, ImeError> {
        self.engine()?;
        if self.buffer.is_empty() {
            return Err(ImeError::EmptyBufferCommit);
        }
        let text = self
            .candidates
            .get(index)
            .ok_or(ImeError::CandidateOutOfRange {
                index,
                len: self.candidates.len(),
            })?
            .to_string();
        let action = CommitAction::new(self.buffer.source_len(), text);
        debug!(
            syllable = self.buffer.value(),
            delete = action.delete_count,
            text = %action.insert_text,
            "commit"
        );
        self.clear_state();
        Ok(action)
    }

    /// Commit candidate `index`. With nothing composed this is a no-op that
    /// returns an empty action.
    pub fn commit(&mut self, index: usize) -> Result<CommitAction, ImeError> {
        match self.try_commit(index) {
            Err(ImeError::EmptyBufferCommit) => {
                debug!("commit with empty buffer");
                self.clear_state();
                Ok(CommitAction::default())
            }
            other => other,
        }
    }

    /// Replace the dictionary with a serialized document and recompute
    /// candidates. A malformed document leaves the session with no
    /// candidates until a valid one is set.
    pub fn set_dictionary(&mut self, doc: &str) -> Result<(), ImeError> {
        self.engine_mut()?.set_dictionary(doc);
        self.refresh_candidates()
    }

    /// Replace the dictionary only if `doc` parses.
    pub fn try_set_dictionary(&mut self, doc: &str) -> Result<(), ImeError> {
        self.engine_mut()?.try_set_dictionary(doc)?;
        self.refresh_candidates()
    }

    /// Install a dictionary shared with other sessions.
    pub fn set_shared_dictionary(&mut self, dictionary: Arc<Dictionary>) -> Result<(), ImeError> {
        self.engine_mut()?.set_parsed(dictionary);
        self.refresh_candidates()
    }

    /// Process a key event and update session state.
    ///
    /// The host keeps doing its own text-field editing for typed keys; the
    /// session only tracks the syllable and reports commits.
    pub fn process_key(&mut self, key: KeyEvent) -> Result<KeyResult, ImeError> {
        self.engine()?;
        let composing = !self.buffer.is_empty();

        // Selection keys only mean "pick" while there is something to pick
        let key = match key {
            KeyEvent::Other(ch) if composing => match self.config.selection_key_index(ch) {
                Some(index) => KeyEvent::Select(index),
                None => key,
            },
            _ => key,
        };

        let result = match key {
            KeyEvent::Letter(ch) => {
                if self.append(ch)? {
                    KeyResult::Handled
                } else {
                    KeyResult::NotHandled
                }
            }
            KeyEvent::Backspace => {
                if self.delete_last()? {
                    KeyResult::Handled
                } else {
                    KeyResult::NotHandled
                }
            }
            KeyEvent::Enter if composing => {
                self.reset()?;
                KeyResult::Handled
            }
            KeyEvent::Space if composing => match self.candidates.selected_index() {
                Some(index) => KeyResult::Committed(self.try_commit(index)?),
                None => KeyResult::NotHandled,
            },
            KeyEvent::Select(page_index) if composing => {
                match self.candidates.global_index(page_index) {
                    Some(index) => KeyResult::Committed(self.try_commit(index)?),
                    None => KeyResult::NotHandled,
                }
            }
            KeyEvent::Up if composing => self.navigate(CandidateList::cursor_up),
            KeyEvent::Down if composing => self.navigate(CandidateList::cursor_down),
            KeyEvent::PageUp if composing => self.navigate(CandidateList::page_up),
            KeyEvent::PageDown if composing => self.navigate(CandidateList::page_down),
            _ => KeyResult::NotHandled,
        };
        Ok(result)
    }

    fn navigate(&mut self, step: fn(&mut CandidateList) -> bool) -> KeyResult {
        if step(&mut self.candidates) {
            self.redraw();
            KeyResult::Handled
        } else {
            KeyResult::NotHandled
        }
    }

    /// Release the dictionary and the candidate surface.
    ///
    /// Every later call on the session fails with
    /// [`ImeError::UseAfterTeardown`].
    pub fn teardown(&mut self) -> Result<(), ImeError> {
        if self.engine.take().is_none() {
            return Err(ImeError::UseAfterTeardown);
        }
        self.buffer.reset();
        self.candidates.clear();
        self.surface.release();
        debug!("session torn down");
        Ok(())
    }
}

impl<S: CandidateSurface> Drop for ImeSession<S> {
    fn drop(&mut self) {
        if self.engine.is_some() {
            let _ = self.teardown();
        }
    }
}
