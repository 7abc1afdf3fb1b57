//! Edit-operation alignment and spelling variant classification.
//!
//! This module turns a word pair into a minimal sequence of edit operations,
//! lays those operations out as a positional template, and reduces templates
//! with a single edited span to canonical before/after variants.

pub mod levenshtein;
pub mod operation;
pub mod template;
pub mod variant;

// Re-export commonly used types
pub use levenshtein::*;
pub use operation::*;
pub use template::*;
pub use variant::*;
