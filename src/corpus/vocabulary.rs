//! Distinct word lists extracted from plain text.

use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind, Read};
use std::path::Path;

use ahash::AHashSet;

use crate::error::{OrthovarError, Result};

/// Distinct words in first-seen order.
///
/// Words keep their case and spelling exactly as they appear in the text.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    words: Vec<String>,
    seen: AHashSet<String>,
    min_length: usize,
}

impl Vocabulary {
    /// Create an empty vocabulary admitting words of at least `min_length`
    /// characters.
    pub fn new(min_length: usize) -> Self {
        Vocabulary {
            words: Vec::new(),
            seen: AHashSet::new(),
            min_length,
        }
    }

    /// Add a word unless it is too short or already present.
    ///
    /// Returns whether the word was added.
    pub fn add_word(&mut self, word: &str) -> bool {
        let word = word.trim();
        if word.is_empty() || word.chars().count() < self.min_length || self.seen.contains(word) {
            return false;
        }
        self.seen.insert(word.to_string());
        self.words.push(word.to_string());
        true
    }

    /// Add every whitespace separated token of `text`.
    pub fn add_text(&mut self, text: &str) {
        for token in text.split_whitespace() {
            self.add_word(token);
        }
    }

    /// Build a vocabulary from a corpus held in memory.
    pub fn from_corpus(text: &str, min_length: usize) -> Self {
        let mut vocabulary = Vocabulary::new(min_length);
        vocabulary.add_text(text);
        vocabulary
    }

    /// Build a vocabulary from any reader, line by line.
    ///
    /// The text must be UTF-8; the first undecodable line is reported by number.
    pub fn from_reader<R: Read>(reader: R, min_length: usize) -> Result<Self> {
        let mut vocabulary = Vocabulary::new(min_length);
        for (number, line) in BufReader::new(reader).lines().enumerate() {
            let line = line.map_err(|e| match e.kind() {
                ErrorKind::InvalidData => {
                    OrthovarError::corpus(format!("line {} is not valid UTF-8", number + 1))
                }
                _ => OrthovarError::from(e),
            })?;
            vocabulary.add_text(&line);
        }
        Ok(vocabulary)
    }

    /// Load a vocabulary from a plain-text corpus file.
    pub fn load_from_file<P: AsRef<Path>>(path: P, min_length: usize) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(file, min_length)
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn contains(&self, word: &str) -> bool {
        self.seen.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn min_length(&self) -> usize {
        self.min_length
    }
}

impl From<Vocabulary> for Vec<String> {
    fn from(vocabulary: Vocabulary) -> Self {
        vocabulary.words
    }
}
