//! Positional before/after templates built from edit operations.
//!
//! A template aligns the source word with the target word one entry per
//! position. Source characters own a content slot each; insertions live in the
//! gaps between slots (gap `k` sits before slot `k`, gap `len` after the last
//! slot), so applying them never shifts the index of another operation.
//! Entries without an operation are filler. A maximal run of non-filler
//! entries is a chunk, and only templates with exactly one chunk classify as a
//! [`Variant`].

use crate::error::{OrthovarError, Result};
use crate::spelling::operation::{EditOperation, OpCode};
use crate::spelling::variant::{EMPTY_MARKER, Variant};

/// Marker printed for positions no operation touched.
pub const FILLER_MARKER: char = '_';

/// One aligned position.
///
/// For filler entries `before` and `after` both hold the unchanged source
/// character. An insertion has no `before`, a deletion no `after`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateEntry {
    pub code: Option<OpCode>,
    pub before: Option<char>,
    pub after: Option<char>,
}

impl TemplateEntry {
    fn filler(ch: char) -> Self {
        TemplateEntry {
            code: None,
            before: Some(ch),
            after: Some(ch),
        }
    }

    fn edited(code: OpCode, before: Option<char>, after: Option<char>) -> Self {
        TemplateEntry {
            code: Some(code),
            before,
            after,
        }
    }

    pub fn is_filler(&self) -> bool {
        self.code.is_none()
    }
}

/// A contiguous run of edited entries.
#[derive(Debug, Clone, Copy)]
pub struct Chunk<'a> {
    entries: &'a [TemplateEntry],
}

impl<'a> Chunk<'a> {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Operation codes of the run, e.g. `"DRR"`.
    pub fn mask(&self) -> String {
        self.entries
            .iter()
            .filter_map(|entry| entry.code.map(|code| code.as_char()))
            .collect()
    }

    /// Characters the run removes or rewrites.
    pub fn before(&self) -> String {
        self.entries.iter().filter_map(|entry| entry.before).collect()
    }

    /// Characters the run produces.
    pub fn after(&self) -> String {
        self.entries.iter().filter_map(|entry| entry.after).collect()
    }
}

/// A single-span transformation extracted from a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// Operation codes of the edited span.
    pub mask: String,
    /// The span's before/after strings, in source -> target direction.
    pub variant: Variant,
}

/// The aligned operation codes and before/after characters of one word pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    entries: Vec<TemplateEntry>,
}

impl Template {
    /// Build the template for `ops` applied to `source`, looking inserted and
    /// replacement characters up in `target`.
    pub fn build(ops: &[EditOperation], source: &str, target: &str) -> Result<Self> {
        TemplateBuilder::new(source, target).build(ops)
    }

    pub fn entries(&self) -> &[TemplateEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximal runs of non-filler entries, left to right.
    pub fn chunks(&self) -> Vec<Chunk<'_>> {
        let mut chunks = Vec::new();
        let mut start = None;

        for (position, entry) in self.entries.iter().enumerate() {
            match (entry.is_filler(), start) {
                (false, None) => start = Some(position),
                (true, Some(begin)) => {
                    chunks.push(Chunk {
                        entries: &self.entries[begin..position],
                    });
                    start = None;
                }
                _ => {}
            }
        }
        if let Some(begin) = start {
            chunks.push(Chunk {
                entries: &self.entries[begin..],
            });
        }

        chunks
    }

    /// The single edited span, or `None` when there is no edit or when the
    /// edits are spread over several disjoint spans.
    pub fn classify(&self) -> Option<Classification> {
        match self.chunks().as_slice() {
            [chunk] => Some(Classification {
                mask: chunk.mask(),
                variant: Variant::new(chunk.before(), chunk.after()),
            }),
            _ => None,
        }
    }

    /// The word obtained by applying every operation to the source.
    pub fn target_word(&self) -> String {
        self.entries.iter().filter_map(|entry| entry.after).collect()
    }

    /// The three parallel rows: codes, before characters and after characters.
    ///
    /// Filler positions print as `_` in every row, missing characters as `∅`.
    pub fn render(&self) -> (String, String, String) {
        let mut codes = String::with_capacity(self.entries.len());
        let mut before = String::with_capacity(self.entries.len());
        let mut after = String::with_capacity(self.entries.len());

        for entry in &self.entries {
            match entry.code {
                None => {
                    codes.push(FILLER_MARKER);
                    before.push(FILLER_MARKER);
                    after.push(FILLER_MARKER);
                }
                Some(code) => {
                    codes.push(code.as_char());
                    before.push(entry.before.unwrap_or(EMPTY_MARKER));
                    after.push(entry.after.unwrap_or(EMPTY_MARKER));
                }
            }
        }

        (codes, before, after)
    }
}

/// Validates operations against one word pair and lays them out as a
/// [`Template`].
pub struct TemplateBuilder<'a> {
    source: &'a str,
    target: &'a str,
    source_chars: Vec<char>,
    target_chars: Vec<char>,
}

impl<'a> TemplateBuilder<'a> {
    pub fn new(source: &'a str, target: &'a str) -> Self {
        TemplateBuilder {
            source,
            target,
            source_chars: source.chars().collect(),
            target_chars: target.chars().collect(),
        }
    }

    /// Apply `ops` to content slots and gaps, then flatten them.
    ///
    /// Fails with [`OrthovarError::MalformedOperation`] when an operation
    /// points outside its words, when a transposition is not adjacent, or when
    /// two operations claim the same source character.
    pub fn build(&self, ops: &[EditOperation]) -> Result<Template> {
        let len = self.source_chars.len();
        let mut slots: Vec<Option<TemplateEntry>> = vec![None; len];
        let mut deferred: Vec<(usize, usize)> = Vec::new();

        for &op in ops {
            match op {
                EditOperation::Delete { index } => {
                    let before = self.source_char(op, index)?;
                    self.claim(&mut slots, op, index, TemplateEntry::edited(OpCode::Delete, Some(before), None))?;
                }
                EditOperation::Replace { index, target } => {
                    let before = self.source_char(op, index)?;
                    let after = self.target_char(op, target)?;
                    self.claim(
                        &mut slots,
                        op,
                        index,
                        TemplateEntry::edited(OpCode::Replace, Some(before), Some(after)),
                    )?;
                }
                EditOperation::Transpose { first, second } => {
                    if second != first + 1 {
                        return Err(self.malformed(op, "transposed positions are not adjacent"));
                    }
                    let left = self.source_char(op, first)?;
                    let right = self.source_char(op, second)?;
                    self.claim(
                        &mut slots,
                        op,
                        first,
                        TemplateEntry::edited(OpCode::Transpose, Some(left), Some(right)),
                    )?;
                    self.claim(
                        &mut slots,
                        op,
                        second,
                        TemplateEntry::edited(OpCode::Transpose, Some(right), Some(left)),
                    )?;
                }
                EditOperation::Insert { at, target } => {
                    // Gap `len` appends after the last character; anything past it is invalid.
                    if at > len {
                        return Err(self.malformed(
                            op,
                            format!("insertion gap {at} is past the end of a {len} character word"),
                        ));
                    }
                    self.target_char(op, target)?;
                    deferred.push((at, target));
                }
            }
        }

        // Within one gap inserted characters appear in target order.
        deferred.sort_by_key(|&(_, target)| target);
        let mut gaps: Vec<Vec<TemplateEntry>> = vec![Vec::new(); len + 1];
        for (at, target) in deferred {
            gaps[at].push(TemplateEntry::edited(
                OpCode::Insert,
                None,
                Some(self.target_chars[target]),
            ));
        }

        let mut entries = Vec::with_capacity(len + ops.len());
        for (position, gap) in gaps.into_iter().enumerate() {
            entries.extend(gap);
            if position < len {
                entries.push(
                    slots[position].unwrap_or_else(|| TemplateEntry::filler(self.source_chars[position])),
                );
            }
        }

        Ok(Template { entries })
    }

    fn source_char(&self, op: EditOperation, index: usize) -> Result<char> {
        self.source_chars.get(index).copied().ok_or_else(|| {
            self.malformed(
                op,
                format!("index {index} is outside the source word"),
            )
        })
    }

    fn target_char(&self, op: EditOperation, index: usize) -> Result<char> {
        self.target_chars.get(index).copied().ok_or_else(|| {
            self.malformed(
                op,
                format!("index {index} is outside the target word"),
            )
        })
    }

    fn claim(
        &self,
        slots: &mut [Option<TemplateEntry>],
        op: EditOperation,
        index: usize,
        entry: TemplateEntry,
    ) -> Result<()> {
        if slots[index].is_some() {
            return Err(self.malformed(
                op,
                format!("position {index} is already edited by another operation"),
            ));
        }
        slots[index] = Some(entry);
        Ok(())
    }

    fn malformed<S: Into<String>>(&self, op: EditOperation, reason: S) -> OrthovarError {
        OrthovarError::malformed_operation(self.source, self.target, op, reason)
    }
}

/// Build the template for one pair and classify it.
///
/// `Ok(None)` means the pair is not a single-span alternation and should be
/// skipped; errors are reserved for operations that do not fit the words.
pub fn build_template(
    ops: &[EditOperation],
    source: &str,
    target: &str,
) -> Result<Option<Classification>> {
    Ok(Template::build(ops, source, target)?.classify())
}

/// Replay `ops` on `source`, taking inserted and replacement characters from
/// `target`.
pub fn apply_operations(source: &str, target: &str, ops: &[EditOperation]) -> Result<String> {
    Ok(Template::build(ops, source, target)?.target_word())
}
