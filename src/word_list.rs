use std::collections::HashMap;
use std::ffi::OsString;
use std::fmt::Debug;
use std::{fmt, fs};
use unicode_normalization::UnicodeNormalization;

use crate::types::WordId;

/// Given a word string from a dictionary file, turn it into the normalized form we partition.
#[must_use]
pub fn normalize_word(canonical: &str) -> String {
    canonical
        .to_lowercase()
        .nfc() // Normalize Unicode combining forms
        .filter(|c| !c.is_whitespace())
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WordListError {
    InvalidPath(String),
    InvalidWord(String),
}

impl fmt::Display for WordListError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let string = match self {
            WordListError::InvalidPath(path) => format!("Can’t read file: “{path}”"),
            WordListError::InvalidWord(word) => {
                format!("Word list contains invalid word: “{word}”")
            }
        };
        write!(f, "{string}")
    }
}

impl std::error::Error for WordListError {}

/// Configuration describing a source of words.
pub enum WordListSourceConfig {
    Memory { id: String, words: Vec<String> },
    File { id: String, path: OsString },
    FileContents { id: String, contents: &'static str },
}

impl WordListSourceConfig {
    /// The unique, persistent id of this source.
    #[must_use]
    pub fn id(&self) -> String {
        match self {
            WordListSourceConfig::Memory { id, .. }
            | WordListSourceConfig::FileContents { id, .. }
            | WordListSourceConfig::File { id, .. } => id.clone(),
        }
    }
}

/// Errors emitted while loading each source, keyed by source id.
pub type WordListSourceErrors = HashMap<String, Vec<WordListError>>;

/// Normalize a raw entry, recording an error instead if it isn't usable. Only non-empty words
/// over the single-byte alphabet are accepted.
fn parse_entry(raw: &str, errors: &mut Vec<WordListError>) -> Option<String> {
    let normalized = normalize_word(raw);
    if normalized.is_empty() || !normalized.is_ascii() {
        errors.push(WordListError::InvalidWord(raw.into()));
        return None;
    }
    Some(normalized)
}

/// Dictionary files have one word per line. Anything after a `;` (e.g. a score) is ignored, and
/// blank lines are skipped.
fn parse_word_list_file_contents(
    file_contents: &str,
    errors: &mut Vec<WordListError>,
) -> Vec<String> {
    file_contents
        .lines()
        .map_while(|line| {
            if errors.len() > 100 {
                return None;
            }

            let raw = line.split(';').next().unwrap_or_default().trim();
            if raw.is_empty() {
                return Some(None);
            }

            Some(parse_entry(raw, errors))
        })
        .flatten()
        .collect()
}

fn load_words_from_source(source: &WordListSourceConfig) -> (Vec<String>, Vec<WordListError>) {
    let mut errors = vec![];

    let entries = match source {
        WordListSourceConfig::Memory { words, .. } => words
            .iter()
            .filter_map(|word| parse_entry(word, &mut errors))
            .collect(),

        WordListSourceConfig::File { path, .. } => {
            if let Ok(contents) = fs::read_to_string(path) {
                parse_word_list_file_contents(&contents, &mut errors)
            } else {
                errors.push(WordListError::InvalidPath(path.to_string_lossy().into()));
                vec![]
            }
        }

        WordListSourceConfig::FileContents { contents, .. } => {
            parse_word_list_file_contents(contents, &mut errors)
        }
    };

    (entries, errors)
}

/// The words available to a game, in load order. Sources are read in priority order and a word
/// that appears more than once is only kept the first time.
pub struct WordList {
    /// All loaded words. A `WordId` is an index into this list.
    pub words: Vec<String>,

    /// The inverse of `words`.
    pub word_id_by_string: HashMap<String, WordId>,

    /// If given, words longer than this are skipped while loading.
    pub max_length: Option<usize>,

    source_errors: WordListSourceErrors,
}

impl WordList {
    /// Load every source in order, omitting any entries longer than `max_length`.
    #[must_use]
    pub fn new(source_configs: Vec<WordListSourceConfig>, max_length: Option<usize>) -> WordList {
        let mut instance = WordList {
            words: vec![],
            word_id_by_string: HashMap::new(),
            max_length,
            source_errors: HashMap::new(),
        };

        for source in &source_configs {
            let (entries, errors) = load_words_from_source(source);
            for word in entries {
                if max_length.is_some_and(|max_length| word.len() > max_length) {
                    continue;
                }
                instance.add_word(word);
            }
            instance.source_errors.insert(source.id(), errors);
        }

        instance
    }

    /// Add a normalized word if it isn't in the list yet, returning its id either way.
    pub fn add_word(&mut self, normalized_word: String) -> WordId {
        if let Some(&word_id) = self.word_id_by_string.get(&normalized_word) {
            return word_id;
        }

        let word_id = self.words.len();
        self.word_id_by_string.insert(normalized_word.clone(), word_id);
        self.words.push(normalized_word);
        word_id
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Borrow every word of exactly `length` letters, in load order. This is the usual input to
    /// `partition` at the start of a game.
    #[must_use]
    pub fn words_of_length(&self, length: usize) -> Vec<&str> {
        self.words
            .iter()
            .map(String::as_str)
            .filter(|word| word.len() == length)
            .collect()
    }

    /// For each source, return any errors it emitted while loading.
    #[must_use]
    pub fn get_source_errors(&self) -> &WordListSourceErrors {
        &self.source_errors
    }
}

impl Debug for WordList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WordList")
            .field("words", &self.words.len())
            .field("max_length", &self.max_length)
            .finish_non_exhaustive()
    }
}
