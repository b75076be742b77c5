//! Dictionary lookup engine.
//!
//! The engine holds the configured dictionary source and answers lookups for
//! the current buffer value. A malformed document is recorded when it is
//! configured, and every lookup against it degrades to an empty result.

use crate::dictionary::Dictionary;
use crate::error::DictionaryError;
use std::sync::Arc;
use tracing::{debug, warn};

/// Outcome of a lookup that parsed successfully.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    /// Candidates in stored order.
    Hit(Vec<String>),
    /// The key is empty or not present.
    Miss,
}

impl Lookup {
    /// Candidates, empty on a miss.
    pub fn into_candidates(self) -> Vec<String> {
        match self {
            Lookup::Hit(candidates) => candidates,
            Lookup::Miss => Vec::new(),
        }
    }
}

/// What the engine currently looks keys up in.
#[derive(Debug, Clone)]
enum Source {
    Parsed(Arc<Dictionary>),
    Malformed(Arc<DictionaryError>),
}

/// Lookup engine over a swappable dictionary.
#[derive(Debug, Clone)]
pub struct LookupEngine {
    source: Source,
    case_insensitive: bool,
}

impl LookupEngine {
    /// Create an engine over an already-parsed dictionary.
    pub fn new(dictionary: Arc<Dictionary>) -> Self {
        Self {
            source: Source::Parsed(dictionary),
            case_insensitive: true,
        }
    }

    /// Create an engine over the bundled pinyin dictionary.
    pub fn builtin() -> Self {
        Self::new(Arc::new(Dictionary::builtin()))
    }

    /// Toggle the ASCII case-insensitive key fallback.
    pub fn set_case_insensitive(&mut self, enabled: bool) {
        self.case_insensitive = enabled;
    }

    pub fn is_case_insensitive(&self) -> bool {
        self.case_insensitive
    }

    /// Replace the dictionary with a serialized document.
    ///
    /// A document that fails to parse is kept as the active source, so later
    /// lookups return nothing until a valid dictionary is set.
    pub fn set_dictionary(&mut self, doc: &str) {
        self.source = match Dictionary::from_json_str(doc) {
            Ok(dict) => Source::Parsed(Arc::new(dict)),
            Err(e) => {
                warn!(error = %e, "dictionary rejected; lookups will return no candidates");
                Source::Malformed(Arc::new(e))
            }
        };
    }

    /// Replace the dictionary only if `doc` parses; otherwise keep the
    /// current one and return the error.
    pub fn try_set_dictionary(&mut self, doc: &str) -> Result<(), DictionaryError> {
        let dict = Dictionary::from_json_str(doc)?;
        self.source = Source::Parsed(Arc::new(dict));
        Ok(())
    }

    /// Install a dictionary shared with other engines.
    pub fn set_parsed(&mut self, dictionary: Arc<Dictionary>) {
        self.source = Source::Parsed(dictionary);
    }

    /// The active dictionary, or `None` when the last document was malformed.
    pub fn dictionary(&self) -> Option<Arc<Dictionary>> {
        match &self.source {
            Source::Parsed(dict) => Some(Arc::clone(dict)),
            Source::Malformed(_) => None,
        }
    }

    /// The parse error of the active document, if it was malformed.
    pub fn parse_error(&self) -> Option<&DictionaryError> {
        match &self.source {
            Source::Parsed(_) => None,
            Source::Malformed(e) => Some(e.as_ref()),
        }
    }

    /// Look up `key`, distinguishing a miss from a malformed dictionary.
    pub fn try_lookup(&self, key: &str) -> Result<Lookup, Arc<DictionaryError>> {
        let dict = match &self.source {
            Source::Parsed(dict) => Arc::clone(dict),
            Source::Malformed(e) => return Err(Arc::clone(e)),
        };
        if key.is_empty() {
            return Ok(Lookup::Miss);
        }
        let found = if self.case_insensitive {
            dict.get(key)
        } else {
            dict.get_exact(key)
        };
        Ok(match found {
            Some(candidates) => Lookup::Hit(candidates.to_vec()),
            None => Lookup::Miss,
        })
    }

    /// Candidates for `key` in stored order; empty on a miss or a malformed
    /// dictionary.
    pub fn lookup(&self, key: &str) -> Vec<String> {
        match self.try_lookup(key) {
            Ok(found) => {
                debug!(key, hit = matches!(found, Lookup::Hit(_)), "lookup");
                found.into_candidates()
            }
            Err(e) => {
                debug!(key, error = %e, "lookup against malformed dictionary");
                Vec::new()
            }
        }
    }
}

impl Default for LookupEngine {
    fn default() -> Self {
        Self::builtin()
    }
}
