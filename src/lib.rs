//! # Orthovar
//!
//! Spelling-variant analysis for word corpora.
//!
//! ## Features
//!
//! - Bounded Damerau-Levenshtein distance with a deterministic operation backtrace
//! - Positional before/after templates with single-span classification
//! - Pairwise vocabulary scan into a sparse edit map
//! - Canonical variant counts ranked across a corpus
//! - Optional rayon-parallel scanning and aggregation

pub mod aggregate;
pub mod cli;
pub mod config;
pub mod corpus;
pub mod error;
pub mod spelling;

pub mod prelude {
    pub use crate::aggregate::{Aggregation, VariantAggregator, VariantReport};
    pub use crate::config::{OrthovarConfig, ValidationMode};
    pub use crate::corpus::{EditMap, PairEnumerator, Vocabulary};
    pub use crate::error::{OrthovarError, Result};
    pub use crate::spelling::{
        EditOperation, Template, Variant, VariantRegistry, apply_operations, build_template,
        compute_edit_operations,
    };
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
