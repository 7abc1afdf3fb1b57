//! Pairwise scan of a vocabulary into an [`EditMap`].
//!
//! Every unordered pair of distinct words is compared once, the earlier word
//! of the vocabulary acting as source. Pairs whose lengths differ too much are
//! skipped before the distance table is built. The scan is quadratic in the
//! vocabulary size and meant for small to medium word lists.

use std::time::Instant;

use log::{debug, info};
use rayon::ThreadPoolBuilder;
use rayon::prelude::*;

use crate::config::EnumeratorConfig;
use crate::corpus::edit_map::EditMap;
use crate::error::{OrthovarError, Result};
use crate::spelling::levenshtein::compute_edit_operations_within;
use crate::spelling::operation::EditOperation;

/// Summary of one enumeration run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnumerationStats {
    /// Words scanned.
    pub words: usize,
    /// Ordered pairs whose distance table was computed. A related pair is
    /// compared once and an unrelated one once per direction.
    pub compared: usize,
    /// Pairs skipped by the length filter.
    pub length_filtered: usize,
    /// Pairs written to the map.
    pub recorded: usize,
}

/// Builds the sparse edit map of a word list.
#[derive(Debug, Clone, Default)]
pub struct PairEnumerator {
    config: EnumeratorConfig,
}

impl PairEnumerator {
    pub fn new(config: EnumeratorConfig) -> Self {
        PairEnumerator { config }
    }

    pub fn config(&self) -> &EnumeratorConfig {
        &self.config
    }

    /// Compare every candidate pair of `words` and record the related ones.
    pub fn enumerate(&self, words: &[String]) -> Result<EditMap> {
        Ok(self.enumerate_with_stats(words)?.0)
    }

    /// Like [`enumerate`](Self::enumerate), also returning run statistics.
    pub fn enumerate_with_stats(&self, words: &[String]) -> Result<(EditMap, EnumerationStats)> {
        let start_time = Instant::now();
        let (map, stats) = if self.config.parallel {
            self.enumerate_parallel(words)?
        } else {
            self.enumerate_sequential(words)
        };

        info!(
            "Compared {} of {} words' pairs in {}ms: {} related pairs, {} skipped by length",
            stats.compared,
            stats.words,
            start_time.elapsed().as_millis(),
            stats.recorded,
            stats.length_filtered
        );
        Ok((map, stats))
    }

    /// Operations for one ordered pair, or `None` when the pair is filtered
    /// out or unrelated.
    fn compare(&self, w1: &str, w2: &str) -> Option<Vec<EditOperation>> {
        let ops = compute_edit_operations_within(w1, w2, self.config.max_distance);
        if ops.is_empty() { None } else { Some(ops) }
    }

    fn within_length_difference(&self, w1: &str, w2: &str) -> bool {
        w1.chars().count().abs_diff(w2.chars().count()) <= self.config.max_length_difference
    }

    fn enumerate_sequential(&self, words: &[String]) -> (EditMap, EnumerationStats) {
        let mut map = EditMap::new();
        let mut stats = EnumerationStats {
            words: words.len(),
            ..Default::default()
        };

        for (i, w1) in words.iter().enumerate() {
            for w2 in words {
                if w1 == w2 {
                    continue;
                }
                if !self.within_length_difference(w1, w2) {
                    stats.length_filtered += 1;
                    continue;
                }
                // Only one direction of an unordered pair is kept.
                if map.contains_pair(w2, w1) {
                    continue;
                }

                stats.compared += 1;
                if let Some(ops) = self.compare(w1, w2) {
                    map.insert(w1, w2, ops);
                    stats.recorded += 1;
                }
            }
            debug!("Processed {} / {} words", i + 1, words.len());
        }

        (map, stats)
    }

    /// Upper-triangle scan on a rayon pool. Distance is symmetric, so a pair
    /// found unrelated in one direction is unrelated in the other and the
    /// result equals the sequential scan.
    fn enumerate_parallel(&self, words: &[String]) -> Result<(EditMap, EnumerationStats)> {
        let thread_pool_size = self.config.thread_pool_size.unwrap_or_else(num_cpus::get);
        let thread_pool = ThreadPoolBuilder::new()
            .num_threads(thread_pool_size)
            .thread_name(|i| format!("pair-enumerator-{i}"))
            .build()
            .map_err(|e| OrthovarError::internal(format!("Failed to create thread pool: {e}")))?;

        let rows: Vec<(Vec<(usize, Vec<EditOperation>)>, usize, usize)> = thread_pool.install(|| {
            words
                .par_iter()
                .enumerate()
                .map(|(i, w1)| {
                    let mut related = Vec::new();
                    let mut compared = 0;
                    let mut length_filtered = 0;
                    for (j, w2) in words.iter().enumerate().skip(i + 1) {
                        if w1 == w2 {
                            continue;
                        }
                        if !self.within_length_difference(w1, w2) {
                            // The sequential scan meets this pair from both ends.
                            length_filtered += 2;
                            continue;
                        }
                        // The sequential scan compares an unrelated pair from both ends.
                        match self.compare(w1, w2) {
                            Some(ops) => {
                                compared += 1;
                                related.push((j, ops));
                            }
                            None => compared += 2,
                        }
                    }
                    (related, compared, length_filtered)
                })
                .collect()
        });

        let mut map = EditMap::new();
        let mut stats = EnumerationStats {
            words: words.len(),
            ..Default::default()
        };
        for (i, (related, compared, length_filtered)) in rows.into_iter().enumerate() {
            stats.compared += compared;
            stats.length_filtered += length_filtered;
            for (j, ops) in related {
                map.insert(&words[i], &words[j], ops);
                stats.recorded += 1;
            }
        }

        Ok((map, stats))
    }
}
