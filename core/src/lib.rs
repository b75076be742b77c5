//! syllable-ime-core
//!
//! Candidate-matching core for a syllable dictionary input method: typed
//! letters accumulate into a bounded syllable, the syllable is looked up in a
//! JSON dictionary, and picking a candidate produces an instruction to replace
//! the typed letters in the host's text field.
//!
//! Public API:
//! - `InputBuffer` - Bounded letter buffer with the source-length counter
//! - `Dictionary` - Parsed key → candidates mapping
//! - `LookupEngine` - Swappable dictionary with lookup
//! - `CandidateList` - Paged candidates for the current syllable
//! - `ImeSession` - One IME instance driving the above from key events
//! - `CommitAction` / `TextTarget` - What a commit does to the host text field
//! - `CandidateSurface` - Where the host draws candidates
//! - `ImeConfig` - TOML configuration
//!
//! Rendering and text-field editing belong to the host; the core only talks
//! to them through `TextTarget` and `CandidateSurface`.

pub mod error;
pub use error::{ConfigError, DictionaryError, ImeError};

pub mod input_buffer;
pub use input_buffer::InputBuffer;

pub mod dictionary;
pub use dictionary::Dictionary;

pub mod engine;
pub use engine::{Lookup, LookupEngine};

pub mod candidate;
pub use candidate::CandidateList;

pub mod key;
pub use key::KeyEvent;

pub mod target;
pub use target::{CommitAction, TextField, TextTarget};

pub mod surface;
pub use surface::{CandidateSurface, NullSurface, RecordingSurface};

pub mod config;
pub use config::ImeConfig;

pub mod session;
pub use session::{ImeSession, KeyResult, Phase};
