//! Spelling variants and the registry that counts them across a corpus.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// Printed in place of an empty before or after side.
pub const EMPTY_MARKER: char = '∅';

/// A `(before, after)` pair describing one contiguous edited span.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Variant {
    before: String,
    after: String,
}

impl Variant {
    pub fn new<B: Into<String>, A: Into<String>>(before: B, after: A) -> Self {
        Variant {
            before: before.into(),
            after: after.into(),
        }
    }

    pub fn before(&self) -> &str {
        &self.before
    }

    pub fn after(&self) -> &str {
        &self.after
    }

    /// The same alternation read in the other direction.
    pub fn inverse(&self) -> Variant {
        Variant::new(self.after.clone(), self.before.clone())
    }

    /// `"before/after"` with empty sides shown as `∅`.
    pub fn key(&self) -> String {
        format!("{}/{}", display_side(&self.before), display_side(&self.after))
    }

    /// The direction whose key sorts first, so that A->B and B->A share a key.
    pub fn canonical(&self) -> Variant {
        let inverse = self.inverse();
        if self.key() <= inverse.key() {
            self.clone()
        } else {
            inverse
        }
    }

    pub fn canonical_key(&self) -> String {
        self.canonical().key()
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

fn display_side(side: &str) -> Cow<'_, str> {
    if side.is_empty() {
        Cow::Owned(EMPTY_MARKER.to_string())
    } else {
        Cow::Borrowed(side)
    }
}

/// Count and example pairs recorded for one canonical variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantEntry {
    pub variant: Variant,
    pub count: usize,
    /// `(source, target)` word pairs in the order they were recorded.
    pub examples: Vec<(String, String)>,
}

/// Canonical variant counts and examples accumulated over a batch.
#[derive(Debug, Clone, Default)]
pub struct VariantRegistry {
    entries: AHashMap<String, VariantEntry>,
}

impl VariantRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one occurrence of `variant`, observed on `source -> target`.
    pub fn record(&mut self, variant: &Variant, source: &str, target: &str) {
        let canonical = variant.canonical();
        let entry = self
            .entries
            .entry(canonical.key())
            .or_insert_with(|| VariantEntry {
                variant: canonical,
                count: 0,
                examples: Vec::new(),
            });
        entry.count += 1;
        entry
            .examples
            .push((source.to_string(), target.to_string()));
    }

    /// Fold another registry into this one. Counts add up and the other
    /// registry's examples follow this one's.
    pub fn merge(&mut self, other: VariantRegistry) {
        for (key, theirs) in other.entries {
            match self.entries.get_mut(&key) {
                Some(ours) => {
                    ours.count += theirs.count;
                    ours.examples.extend(theirs.examples);
                }
                None => {
                    self.entries.insert(key, theirs);
                }
            }
        }
    }

    pub fn get(&self, variant: &Variant) -> Option<&VariantEntry> {
        self.entries.get(&variant.canonical_key())
    }

    /// Occurrences of `variant` in either direction.
    pub fn count(&self, variant: &Variant) -> usize {
        self.get(variant).map_or(0, |entry| entry.count)
    }

    pub fn examples(&self, variant: &Variant) -> &[(String, String)] {
        self.get(variant)
            .map(|entry| entry.examples.as_slice())
            .unwrap_or(&[])
    }

    /// Number of distinct canonical variants.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts.
    pub fn total_count(&self) -> usize {
        self.entries.values().map(|entry| entry.count).sum()
    }

    /// Entries by descending count, ties broken by ascending canonical key.
    pub fn ranked(&self) -> Vec<&VariantEntry> {
        let mut ranked: Vec<(&String, &VariantEntry)> = self.entries.iter().collect();
        ranked.sort_by(|a, b| b.1.count.cmp(&a.1.count).then_with(|| a.0.cmp(b.0)));
        ranked.into_iter().map(|(_, entry)| entry).collect()
    }

    /// Canonical key -> count, ordered by key.
    pub fn counts(&self) -> BTreeMap<String, usize> {
        self.entries
            .iter()
            .map(|(key, entry)| (key.clone(), entry.count))
            .collect()
    }

    /// Canonical key -> recorded `[source, target]` pairs, ordered by key.
    pub fn examples_by_key(&self) -> BTreeMap<String, Vec<[String; 2]>> {
        self.entries
            .iter()
            .map(|(key, entry)| {
                let pairs = entry
                    .examples
                    .iter()
                    .map(|(source, target)| [source.clone(), target.clone()])
                    .collect();
                (key.clone(), pairs)
            })
            .collect()
    }
}
