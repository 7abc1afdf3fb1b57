//! Run configuration for corpus scanning and variant aggregation.
//!
//! Every section has defaults matching the command line tool; a JSON file can
//! override any subset of fields and explicit flags override the file.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{OrthovarError, Result};
use crate::spelling::levenshtein::MAX_EDIT_DISTANCE;

/// How the aggregator treats an operation record that does not fit its words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationMode {
    /// Abort the whole run on the first malformed record.
    Strict,
    /// Log the record and skip its word pair.
    #[default]
    BestEffort,
}

/// Vocabulary extraction settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorpusConfig {
    /// Shortest token, in characters, admitted to the vocabulary.
    pub min_length: usize,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        CorpusConfig { min_length: 4 }
    }
}

/// Pair enumeration settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnumeratorConfig {
    /// Largest edit distance recorded; at most [`MAX_EDIT_DISTANCE`].
    pub max_distance: usize,

    /// Pairs whose lengths differ by more than this are never compared.
    pub max_length_difference: usize,

    /// Compare pairs on a thread pool.
    pub parallel: bool,

    /// Thread pool size for parallel execution.
    /// If None, uses the number of CPU cores.
    pub thread_pool_size: Option<usize>,
}

impl Default for EnumeratorConfig {
    fn default() -> Self {
        EnumeratorConfig {
            max_distance: MAX_EDIT_DISTANCE,
            max_length_difference: 2,
            parallel: false,
            thread_pool_size: None,
        }
    }
}

/// Variant aggregation settings.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregatorConfig {
    pub validation: ValidationMode,

    /// Classify pairs on a thread pool.
    pub parallel: bool,

    /// Thread pool size for parallel execution.
    /// If None, uses the number of CPU cores.
    pub thread_pool_size: Option<usize>,
}

/// Complete configuration of a run.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OrthovarConfig {
    pub corpus: CorpusConfig,
    pub enumerator: EnumeratorConfig,
    pub aggregator: AggregatorConfig,
}

impl OrthovarConfig {
    /// Load a configuration from a JSON file; absent fields keep their defaults.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: OrthovarConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the engine cannot honour.
    pub fn validate(&self) -> Result<()> {
        if self.corpus.min_length == 0 {
            return Err(OrthovarError::invalid_config(
                "corpus.min_length must be at least 1",
            ));
        }
        if self.enumerator.max_distance == 0 || self.enumerator.max_distance > MAX_EDIT_DISTANCE {
            return Err(OrthovarError::invalid_config(format!(
                "enumerator.max_distance must be between 1 and {MAX_EDIT_DISTANCE}"
            )));
        }
        for (name, size) in [
            ("enumerator", self.enumerator.thread_pool_size),
            ("aggregator", self.aggregator.thread_pool_size),
        ] {
            if size == Some(0) {
                return Err(OrthovarError::invalid_config(format!(
                    "{name}.thread_pool_size must be at least 1"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = OrthovarConfig::default();
        assert_eq!(config.corpus.min_length, 4);
        assert_eq!(config.enumerator.max_distance, 3);
        assert_eq!(config.enumerator.max_length_difference, 2);
        assert!(!config.enumerator.parallel);
        assert_eq!(config.aggregator.validation, ValidationMode::BestEffort);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"corpus": {{"min_length": 6}}, "aggregator": {{"validation": "strict"}}}}"#
        )
        .unwrap();

        let config = OrthovarConfig::load_from_file(file.path()).unwrap();
        assert_eq!(config.corpus.min_length, 6);
        assert_eq!(config.enumerator, EnumeratorConfig::default());
        assert_eq!(config.aggregator.validation, ValidationMode::Strict);
    }

    #[test]
    fn test_distance_above_cutoff_is_rejected() {
        let mut config = OrthovarConfig::default();
        config.enumerator.max_distance = 4;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_threads_is_rejected() {
        let mut config = OrthovarConfig::default();
        config.aggregator.thread_pool_size = Some(0);
        assert!(config.validate().is_err());
    }
}
