//! Variant aggregation over an edit map and ranked reporting.

pub mod aggregator;
pub mod report;

// Re-export commonly used types
pub use aggregator::*;
pub use report::*;
