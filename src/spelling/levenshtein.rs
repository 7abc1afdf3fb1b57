//! Bounded Damerau-Levenshtein distance and edit-operation backtrace.
//!
//! The distance is the restricted ("optimal string alignment") variant: every
//! insertion, deletion, substitution or swap of two adjacent characters costs 1.
//! Pairs whose distance exceeds [`MAX_EDIT_DISTANCE`] are never traced.

use std::cmp::min;

use crate::spelling::operation::EditOperation;

/// Largest distance for which edit operations are extracted.
pub const MAX_EDIT_DISTANCE: usize = 3;

/// Full `(len1 + 1) x (len2 + 1)` distance table for one word pair.
///
/// `get(i, j)` is the distance between the first `i` characters of the source
/// and the first `j` characters of the target.
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    rows: usize,
    cols: usize,
    cells: Vec<usize>,
}

impl DistanceMatrix {
    /// Fill the table for the given character sequences.
    pub fn new(source: &[char], target: &[char]) -> Self {
        let rows = source.len() + 1;
        let cols = target.len() + 1;
        let mut matrix = DistanceMatrix {
            rows,
            cols,
            cells: vec![0; rows * cols],
        };

        // Initialize first row and column
        for i in 0..rows {
            matrix.set(i, 0, i);
        }
        for j in 0..cols {
            matrix.set(0, j, j);
        }

        for i in 0..source.len() {
            for j in 0..target.len() {
                let cost = if source[i] == target[j] { 0 } else { 1 };

                let mut value = min(
                    min(
                        matrix.get(i, j + 1) + 1, // deletion
                        matrix.get(i + 1, j) + 1, // insertion
                    ),
                    matrix.get(i, j) + cost, // substitution
                );

                if i > 0 && j > 0 && source[i] == target[j - 1] && source[i - 1] == target[j] {
                    value = min(value, matrix.get(i - 1, j - 1) + cost); // transposition
                }

                matrix.set(i + 1, j + 1, value);
            }
        }

        matrix
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> usize {
        self.cells[i * self.cols + j]
    }

    #[inline]
    fn set(&mut self, i: usize, j: usize, value: usize) {
        self.cells[i * self.cols + j] = value;
    }

    /// Distance between the complete words.
    pub fn distance(&self) -> usize {
        self.get(self.rows - 1, self.cols - 1)
    }
}

/// Calculate the Damerau-Levenshtein (optimal string alignment) distance,
/// counting adjacent transpositions as a single edit.
pub fn damerau_levenshtein_distance(s1: &str, s2: &str) -> usize {
    let s1_chars: Vec<char> = s1.chars().collect();
    let s2_chars: Vec<char> = s2.chars().collect();

    if s1_chars.is_empty() {
        return s2_chars.len();
    }
    if s2_chars.is_empty() {
        return s1_chars.len();
    }

    DistanceMatrix::new(&s1_chars, &s2_chars).distance()
}

/// Compute one minimal sequence of edit operations turning `w1` into `w2`.
///
/// Returns an empty list when the words are equal or when their distance
/// exceeds [`MAX_EDIT_DISTANCE`].
pub fn compute_edit_operations(w1: &str, w2: &str) -> Vec<EditOperation> {
    compute_edit_operations_within(w1, w2, MAX_EDIT_DISTANCE)
}

/// Like [`compute_edit_operations`] with a caller supplied cutoff.
///
/// The cutoff is clamped to [`MAX_EDIT_DISTANCE`].
pub fn compute_edit_operations_within(w1: &str, w2: &str, max_distance: usize) -> Vec<EditOperation> {
    let max_distance = max_distance.min(MAX_EDIT_DISTANCE);
    let source: Vec<char> = w1.chars().collect();
    let target: Vec<char> = w2.chars().collect();

    // The distance can never be below the length difference.
    if source.len().abs_diff(target.len()) > max_distance {
        return Vec::new();
    }

    let matrix = DistanceMatrix::new(&source, &target);
    let distance = matrix.distance();
    if distance == 0 || distance > max_distance {
        return Vec::new();
    }

    backtrace(&matrix, &source, &target)
}

/// Direction taken by one non-transposition backtrace step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Diagonal,
    Left,
    Up,
}

impl Step {
    /// Pick the cheapest predecessor of `(i, j)`; ties resolve diagonal, then
    /// left, then up.
    fn choose(matrix: &DistanceMatrix, i: usize, j: usize) -> Step {
        if i == 0 {
            return Step::Left;
        }
        if j == 0 {
            return Step::Up;
        }

        let diagonal = matrix.get(i - 1, j - 1);
        let left = matrix.get(i, j - 1);
        let up = matrix.get(i - 1, j);

        if diagonal <= left && diagonal <= up {
            Step::Diagonal
        } else if left <= up {
            Step::Left
        } else {
            Step::Up
        }
    }
}

/// Walk the table from the bottom-right corner back to `(0, 0)`.
///
/// A transposition is taken whenever it applies and lowers the distance, before
/// any other step is considered.
fn backtrace(matrix: &DistanceMatrix, source: &[char], target: &[char]) -> Vec<EditOperation> {
    let mut i = source.len();
    let mut j = target.len();
    let mut ops = Vec::with_capacity(matrix.distance());

    while i > 0 || j > 0 {
        if i > 1
            && j > 1
            && source[i - 1] == target[j - 2]
            && source[i - 2] == target[j - 1]
            && matrix.get(i - 2, j - 2) < matrix.get(i, j)
        {
            ops.push(EditOperation::Transpose {
                first: i - 2,
                second: i - 1,
            });
            i -= 2;
            j -= 2;
            continue;
        }

        match Step::choose(matrix, i, j) {
            Step::Diagonal => {
                if matrix.get(i, j) > matrix.get(i - 1, j - 1) {
                    ops.push(EditOperation::Replace {
                        index: i - 1,
                        target: j - 1,
                    });
                }
                i -= 1;
                j -= 1;
            }
            Step::Left => {
                ops.push(EditOperation::Insert {
                    at: i,
                    target: j - 1,
                });
                j -= 1;
            }
            Step::Up => {
                ops.push(EditOperation::Delete { index: i - 1 });
                i -= 1;
            }
        }
    }

    ops.reverse();
    ops
}
