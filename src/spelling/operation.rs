//! Edit operations produced by the backtrace and consumed by the template builder.
//!
//! On the wire every operation is a three element list
//! `[command, from_index, to_index]` with `command` one of `insert`, `delete`,
//! `replace` or `transpose`:
//!
//! - `["delete", i, i]` removes source character `i`.
//! - `["replace", i, j]` rewrites source character `i` as target character `j`.
//! - `["transpose", i + 1, i]` swaps source characters `i` and `i + 1`; either
//!   index order is accepted when reading.
//! - `["insert", i, j]` inserts target character `j` right after source
//!   character `i`. An insertion before the first source character is written
//!   with `i = -1`.

use std::convert::TryFrom;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{OrthovarError, Result};

/// A single edit step anchored to positions in the source and/or target word.
///
/// All indices are character indices, not byte offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawOperation", into = "RawOperation")]
pub enum EditOperation {
    /// Insert `target[target]` into the gap `at` of the source, where gap `k`
    /// sits just before source character `k` (gap `len` is the end).
    Insert { at: usize, target: usize },
    /// Remove source character `index`.
    Delete { index: usize },
    /// Replace source character `index` with `target[target]`.
    Replace { index: usize, target: usize },
    /// Swap the adjacent source characters `first` and `second`.
    Transpose { first: usize, second: usize },
}

impl EditOperation {
    /// The wire command name.
    pub fn name(&self) -> &'static str {
        match self {
            EditOperation::Insert { .. } => "insert",
            EditOperation::Delete { .. } => "delete",
            EditOperation::Replace { .. } => "replace",
            EditOperation::Transpose { .. } => "transpose",
        }
    }

    /// The template code marking positions touched by this operation.
    pub fn code(&self) -> OpCode {
        match self {
            EditOperation::Insert { .. } => OpCode::Insert,
            EditOperation::Delete { .. } => OpCode::Delete,
            EditOperation::Replace { .. } => OpCode::Replace,
            EditOperation::Transpose { .. } => OpCode::Transpose,
        }
    }

    /// Build a transposition from two indices given in either order.
    pub fn transpose(a: usize, b: usize) -> Self {
        EditOperation::Transpose {
            first: a.min(b),
            second: a.max(b),
        }
    }

    /// The `(from_index, to_index)` pair of the wire form.
    pub fn indices(&self) -> (i64, i64) {
        match *self {
            // Gap `k` follows source character `k - 1`; gap 0 has none and is written as -1.
            EditOperation::Insert { at, target } => (at as i64 - 1, target as i64),
            EditOperation::Delete { index } => (index as i64, index as i64),
            EditOperation::Replace { index, target } => (index as i64, target as i64),
            EditOperation::Transpose { first, second } => (second as i64, first as i64),
        }
    }

    /// The operation that undoes this one when the roles of source and
    /// target are swapped.
    ///
    /// Only the kind is mirrored; positions are not remapped since they are
    /// relative to the other word.
    pub fn inverse_kind(&self) -> OpCode {
        match self {
            EditOperation::Insert { .. } => OpCode::Delete,
            EditOperation::Delete { .. } => OpCode::Insert,
            EditOperation::Replace { .. } => OpCode::Replace,
            EditOperation::Transpose { .. } => OpCode::Transpose,
        }
    }
}

impl fmt::Display for EditOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (from, to) = self.indices();
        write!(f, "[\"{}\", {from}, {to}]", self.name())
    }
}

/// Serialized form of an [`EditOperation`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawOperation(pub String, pub i64, pub i64);

impl From<EditOperation> for RawOperation {
    fn from(op: EditOperation) -> Self {
        let (from, to) = op.indices();
        RawOperation(op.name().to_string(), from, to)
    }
}

impl TryFrom<RawOperation> for EditOperation {
    type Error = OrthovarError;

    fn try_from(raw: RawOperation) -> Result<Self> {
        let RawOperation(command, from, to) = raw;
        match command.as_str() {
            "insert" => Ok(EditOperation::Insert {
                at: wire_index(&command, from.saturating_add(1))?,
                target: wire_index(&command, to)?,
            }),
            "delete" => Ok(EditOperation::Delete {
                index: wire_index(&command, from)?,
            }),
            "replace" => Ok(EditOperation::Replace {
                index: wire_index(&command, from)?,
                target: wire_index(&command, to)?,
            }),
            "transpose" => Ok(EditOperation::transpose(
                wire_index(&command, from)?,
                wire_index(&command, to)?,
            )),
            other => Err(OrthovarError::parse(format!(
                "unknown edit command '{other}'"
            ))),
        }
    }
}

fn wire_index(command: &str, value: i64) -> Result<usize> {
    usize::try_from(value)
        .map_err(|_| OrthovarError::parse(format!("negative index {value} in '{command}'")))
}

/// Per-position operation code in a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OpCode {
    Insert,
    Delete,
    Replace,
    Transpose,
}

impl OpCode {
    pub fn as_char(&self) -> char {
        match self {
            OpCode::Insert => 'I',
            OpCode::Delete => 'D',
            OpCode::Replace => 'R',
            OpCode::Transpose => 'T',
        }
    }
}

impl fmt::Display for OpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}
