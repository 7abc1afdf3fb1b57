//! Sparse map of related word pairs and the operations relating them.
//!
//! The JSON form is an object from source word to an object from related word
//! to a list of `[command, from_index, to_index]` operations:
//!
//! ```json
//! {"colour":{"color":[["delete",4,4]]}}
//! ```

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::spelling::operation::EditOperation;

/// Source word -> related word -> operations turning the first into the second.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EditMap {
    entries: BTreeMap<String, BTreeMap<String, Vec<EditOperation>>>,
}

impl EditMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the operations relating `source` to `target`.
    pub fn insert(&mut self, source: &str, target: &str, ops: Vec<EditOperation>) {
        self.entries
            .entry(source.to_string())
            .or_default()
            .insert(target.to_string(), ops);
    }

    /// Whether `source -> target` was recorded in this direction.
    pub fn contains_pair(&self, source: &str, target: &str) -> bool {
        self.entries
            .get(source)
            .is_some_and(|related| related.contains_key(target))
    }

    pub fn get(&self, source: &str, target: &str) -> Option<&[EditOperation]> {
        self.entries
            .get(source)
            .and_then(|related| related.get(target))
            .map(Vec::as_slice)
    }

    /// Related words recorded for `source`.
    pub fn related(&self, source: &str) -> Option<&BTreeMap<String, Vec<EditOperation>>> {
        self.entries.get(source)
    }

    /// Number of source words with at least one recorded pair.
    pub fn source_count(&self) -> usize {
        self.entries.len()
    }

    /// Number of recorded pairs.
    pub fn pair_count(&self) -> usize {
        self.entries.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Source words with their related words, ordered by source.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeMap<String, Vec<EditOperation>>)> + '_ {
        self.entries
            .iter()
            .map(|(source, related)| (source.as_str(), related))
    }

    /// Every `(source, target, ops)` triple, ordered by source then target.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str, &[EditOperation])> + '_ {
        self.entries.iter().flat_map(|(source, related)| {
            related
                .iter()
                .map(move |(target, ops)| (source.as_str(), target.as_str(), ops.as_slice()))
        })
    }

    /// Parse the JSON form. Any structural error is fatal.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(BufReader::new(reader))?)
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    /// Compact JSON form.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn write_json<W: Write>(&self, writer: W) -> Result<()> {
        serde_json::to_writer(writer, self)?;
        Ok(())
    }

    /// Line-oriented dump, one `source : {related...}` line per source word.
    pub fn write_lines<W: Write>(&self, writer: W) -> Result<()> {
        let mut writer = BufWriter::new(writer);
        for (source, related) in &self.entries {
            let related = serde_json::to_string(related)?;
            writeln!(writer, "{source} : {related}")?;
        }
        writer.flush()?;
        Ok(())
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.write_json(&mut writer)?;
        writer.flush()?;
        Ok(())
    }
}
