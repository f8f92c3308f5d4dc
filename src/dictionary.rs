//! Dictionary module
//!
//! A sorted, immutable word list with exact and prefix lookup, plus
//! loading from a word-per-line file.

use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::error::ConfigError;

#[derive(Error, Debug)]
pub enum DictionaryError {
    #[error("Dictionary file not found: {0}")]
    FileNotFound(PathBuf),
    #[error("Failed to read dictionary file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("Dictionary file is empty")]
    EmptyFile,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry {
    key: String,
    word: String,
}

/// Sorted word collection.
///
/// Entries are ordered by their lookup key (the word itself, or its lower
/// case form when the dictionary is case insensitive). Every lookup relies
/// on that order, which is established once at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dictionary {
    entries: Vec<Entry>,
    case_sensitive: bool,
}

impl Dictionary {
    /// Builds a dictionary from words in any order. Words that share a
    /// lookup key are collapsed to the first one.
    pub fn new<I, S>(words: I, case_sensitive: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut entries: Vec<Entry> = words
            .into_iter()
            .map(|w| Self::entry(w.into(), case_sensitive))
            .collect();
        entries.sort_by(|a, b| a.key.cmp(&b.key));
        entries.dedup_by(|a, b| a.key == b.key);
        Self {
            entries,
            case_sensitive,
        }
    }

    /// Builds a dictionary from words that are already sorted under the
    /// configured case rule, rejecting out-of-order input.
    pub fn from_sorted<I, S>(words: I, case_sensitive: bool) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let entries: Vec<Entry> = words
            .into_iter()
            .map(|w| Self::entry(w.into(), case_sensitive))
            .collect();
        if let Some(i) = entries.windows(2).position(|w| w[0].key > w[1].key) {
            return Err(ConfigError::UnsortedDictionary(i + 1));
        }
        Ok(Self {
            entries,
            case_sensitive,
        })
    }

    fn entry(word: String, case_sensitive: bool) -> Entry {
        let key = if case_sensitive {
            word.clone()
        } else {
            word.to_lowercase()
        };
        Entry { key, word }
    }

    pub fn is_case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.word.as_str())
    }

    /// Applies the dictionary's case rule to `text`.
    pub fn fold(&self, text: &str) -> String {
        if self.case_sensitive {
            text.to_string()
        } else {
            text.to_lowercase()
        }
    }

    /// Exact lookup of already folded text.
    fn find_folded(&self, key: &str) -> Option<&str> {
        self.entries
            .binary_search_by(|e| e.key.as_str().cmp(key))
            .ok()
            .map(|i| self.entries[i].word.as_str())
    }

    /// Returns the stored word matching `text` under the case rule.
    pub fn search(&self, text: &str) -> Option<&str> {
        self.find_folded(&self.fold(text))
    }

    pub fn contains(&self, text: &str) -> bool {
        self.search(text).is_some()
    }

    /// Index range of entries whose key starts with `prefix`, searched
    /// within `within`.
    fn prefix_range(&self, prefix: &str, within: (usize, usize)) -> (usize, usize) {
        let (lo, hi) = within;
        let slice = &self.entries[lo..hi];
        let start = slice.partition_point(|e| e.key.as_str() < prefix);
        let len = slice[start..].partition_point(|e| e.key.starts_with(prefix));
        (lo + start, lo + start + len)
    }

    /// Words beginning with `prefix` under the case rule, in sorted order.
    pub fn words_with_prefix(&self, prefix: &str) -> impl Iterator<Item = &str> {
        let (lo, hi) = self.prefix_range(&self.fold(prefix), (0, self.entries.len()));
        self.entries[lo..hi].iter().map(|e| e.word.as_str())
    }

    /// Dictionary words that are prefixes of already folded `text`,
    /// shortest first.
    ///
    /// The candidate range is narrowed one char at a time; once no word
    /// starts with the current prefix the search stops.
    pub(crate) fn prefixes_of_folded<'a>(&'a self, text: &str) -> Vec<&'a str> {
        let mut found = Vec::new();
        let mut range = (0, self.entries.len());
        for (end, c) in text.char_indices() {
            let prefix = &text[..end + c.len_utf8()];
            range = self.prefix_range(prefix, range);
            if range.0 == range.1 {
                break;
            }
            let first = &self.entries[range.0];
            if first.key == prefix {
                found.push(first.word.as_str());
            }
        }
        found
    }
}

/// Returns the dictionary file path.
///
/// Priority:
/// 1. Environment variable `PWD_POLICY_DICTIONARY_PATH`
/// 2. Default path `./assets/dictionary.txt`
pub fn get_dictionary_path() -> PathBuf {
    std::env::var("PWD_POLICY_DICTIONARY_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("./assets/dictionary.txt"))
}

/// Loads the dictionary named by `PWD_POLICY_DICTIONARY_PATH`.
///
/// # Errors
///
/// Returns error if:
/// - File does not exist
/// - File cannot be read
/// - File has no words
pub fn load_dictionary(case_sensitive: bool) -> Result<Dictionary, DictionaryError> {
    load_dictionary_from_path(get_dictionary_path(), case_sensitive)
}

/// Loads a dictionary from a word-per-line file.
///
/// Lines are trimmed and blank lines skipped; the words are sorted under
/// the requested case rule, so the file itself may be in any order.
pub fn load_dictionary_from_path<P: AsRef<Path>>(
    path: P,
    case_sensitive: bool,
) -> Result<Dictionary, DictionaryError> {
    let path = path.as_ref();

    if !path.exists() {
        #[cfg(feature = "tracing")]
        tracing::error!("Dictionary loading FAILED: FileNotFound {:?}", path);
        return Err(DictionaryError::FileNotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    let dictionary = Dictionary::new(
        content.lines().map(str::trim).filter(|l| !l.is_empty()),
        case_sensitive,
    );

    if dictionary.is_empty() {
        #[cfg(feature = "tracing")]
        tracing::error!("Dictionary loading FAILED: Empty file {:?}", path);
        return Err(DictionaryError::EmptyFile);
    }

    #[cfg(feature = "tracing")]
    tracing::info!("Dictionary loaded: {} words from {:?}", dictionary.len(), path);

    Ok(dictionary)
}
