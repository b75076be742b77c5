//! Syllable dictionary mapping a typed key to its candidate strings.
//!
//! Dictionaries are supplied as a JSON object whose values are arrays of
//! strings:
//!
//! ```json
//! { "ni": ["你", "尼"], "hao": ["好", "号"] }
//! ```
//!
//! The document is parsed once and indexed by key. Candidate order is kept
//! exactly as stored; there is no ranking. When a key appears more than once
//! the first occurrence is used, and a case-insensitive lookup resolves to
//! the first matching key in document order.

use crate::error::DictionaryError;
use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Bundled simplified-Chinese pinyin dictionary used when nothing else is
/// configured.
pub const BUILTIN_PINYIN_JSON: &str = include_str!("../data/zh_cn_pinyin.json");

/// Parsed, immutable syllable dictionary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dictionary {
    entries: HashMap<String, Vec<String>>,
    // ASCII-lowercased key -> stored key
    folded: HashMap<String, String>,
}

impl Dictionary {
    /// Create an empty dictionary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON object-of-string-arrays document.
    ///
    /// Invalid JSON, a non-object root, a non-array value or a non-string
    /// candidate all fail with [`DictionaryError::Parse`].
    pub fn from_json_str(doc: &str) -> Result<Self, DictionaryError> {
        let DocumentEntries(entries) = serde_json::from_str(doc)?;
        let dict = Self::from_entries(entries);
        debug!(keys = dict.len(), candidates = dict.candidate_count(), "parsed dictionary");
        Ok(dict)
    }

    /// Read and parse a dictionary file.
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self, DictionaryError> {
        let path = path.as_ref();
        let doc = fs::read_to_string(path).map_err(|source| DictionaryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&doc)
    }

    /// The bundled pinyin dictionary.
    pub fn builtin() -> Self {
        // The bundled document is validated by the tests below.
        Self::from_json_str(BUILTIN_PINYIN_JSON).unwrap_or_default()
    }

    /// Build from entries in document order. The first entry for a key is
    /// kept and later duplicates are ignored.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, Vec<String>)>,
    {
        let mut dict = Self::default();
        for (key, candidates) in entries {
            if let Entry::Vacant(slot) = dict.entries.entry(key) {
                dict.folded
                    .entry(slot.key().to_ascii_lowercase())
                    .or_insert_with(|| slot.key().clone());
                slot.insert(candidates);
            }
        }
        dict
    }

    /// Candidates stored under exactly `key`.
    pub fn get_exact(&self, key: &str) -> Option<&[String]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    /// Candidates for `key`, falling back to an ASCII case-insensitive match.
    pub fn get(&self, key: &str) -> Option<&[String]> {
        if let Some(found) = self.get_exact(key) {
            return Some(found);
        }
        self.folded
            .get(&key.to_ascii_lowercase())
            .and_then(|stored| self.get_exact(stored))
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of candidate strings across all keys.
    pub fn candidate_count(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    /// Keys in sorted order.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }
}

/// Top-level object entries in the order they appear, duplicates included.
struct DocumentEntries(Vec<(String, Vec<String>)>);

impl<'de> Deserialize<'de> for DocumentEntries {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = DocumentEntries;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an object mapping keys to arrays of strings")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry::<String, Vec<String>>()? {
                    entries.push(entry);
                }
                Ok(DocumentEntries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_lookup_in_stored_order() {
        let dict = Dictionary::from_json_str(r#"{"ni":["你","尼"],"hao":["好"]}"#).unwrap();
        assert_eq!(dict.len(), 2);
        assert_eq!(dict.get("ni"), Some(&["你".to_string(), "尼".to_string()][..]));
        assert_eq!(dict.get("xx"), None);
        assert_eq!(dict.candidate_count(), 3);
    }

    #[test]
    fn rejects_malformed_documents() {
        for doc in [
            "",
            "{",
            "not json",
            r#"["ni"]"#,
            r#"{"ni":"你"}"#,
            r#"{"ni":["你",1]}"#,
            r#"{"ni":[null]}"#,
        ] {
            assert!(
                matches!(Dictionary::from_json_str(doc), Err(DictionaryError::Parse(_))),
                "accepted {doc:?}"
            );
        }
    }

    #[test]
    fn empty_object_is_valid() {
        let dict = Dictionary::from_json_str("{}").unwrap();
        assert!(dict.is_empty());
        assert!(dict.get("a").is_none());
    }

    #[test]
    fn case_insensitive_fallback() {
        let dict = Dictionary::from_json_str(r#"{"ni":["你"],"Ma":["马"]}"#).unwrap();
        assert_eq!(dict.get("NI").unwrap()[0], "你");
        assert_eq!(dict.get("ma").unwrap()[0], "马");
        assert!(dict.get_exact("NI").is_none());
    }

    #[test]
    fn exact_match_wins_over_fold() {
        let dict = Dictionary::from_json_str(r#"{"ni":["你"],"NI":["尼"]}"#).unwrap();
        assert_eq!(dict.get("NI").unwrap()[0], "尼");
        assert_eq!(dict.get("ni").unwrap()[0], "你");
        // "Ni" folds to the first matching key in the document
        assert_eq!(dict.get("Ni").unwrap()[0], "你");

        let dict = Dictionary::from_json_str(r#"{"NI":["尼"],"ni":["你"]}"#).unwrap();
        assert_eq!(dict.get("Ni").unwrap()[0], "尼");
    }

    #[test]
    fn duplicate_key_keeps_first_occurrence() {
        let dict = Dictionary::from_json_str(r#"{"ni":["你"],"hao":["好"],"ni":["尼"]}"#).unwrap();
        assert_eq!(dict.len(), 2);
        assert_eq!(dict.get("ni").unwrap(), ["你"]);
        assert_eq!(dict.candidate_count(), 2);
    }

    #[test]
    fn duplicate_key_does_not_hide_a_later_parse_error() {
        assert!(Dictionary::from_json_str(r#"{"ni":["你"],"ni":[1]}"#).is_err());
    }

    #[test]
    fn builtin_dictionary_parses() {
        assert!(Dictionary::from_json_str(BUILTIN_PINYIN_JSON).is_ok());
        let dict = Dictionary::builtin();
        assert!(!dict.is_empty());
        assert_eq!(dict.get("ni").unwrap()[0], "你");
        assert_eq!(dict.get("zhong").unwrap()[0], "中");
    }

    #[test]
    fn load_json_from_file() {
        let tmp = std::env::temp_dir().join(format!(
            "syllable_ime_dict_test_{}.json",
            std::process::id()
        ));
        std::fs::write(&tmp, r#"{"wo":["我","握"]}"#).unwrap();
        let dict = Dictionary::load_json(&tmp).unwrap();
        assert_eq!(dict.keys(), vec!["wo"]);
        let _ = std::fs::remove_file(tmp);
    }

    #[test]
    fn load_json_missing_file_is_io_error() {
        let missing = std::env::temp_dir().join("syllable_ime_no_such_dict.json");
        assert!(matches!(
            Dictionary::load_json(&missing),
            Err(DictionaryError::Io { .. })
        ));
    }
}
