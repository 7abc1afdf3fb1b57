//! Corpus scanning: vocabulary extraction and pairwise edit maps.

pub mod edit_map;
pub mod enumerator;
pub mod vocabulary;

// Re-export commonly used types
pub use edit_map::*;
pub use enumerator::*;
pub use vocabulary::*;
