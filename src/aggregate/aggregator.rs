//! Classification of every edit map pair into a [`VariantRegistry`].

use std::time::Instant;

use log::{debug, info, warn};
use rayon::ThreadPoolBuilder;
use rayon::prelude::*;

use crate::config::{AggregatorConfig, ValidationMode};
use crate::corpus::edit_map::EditMap;
use crate::error::{OrthovarError, Result};
use crate::spelling::operation::EditOperation;
use crate::spelling::template::build_template;
use crate::spelling::variant::VariantRegistry;

/// Per-pair outcome counts of an aggregation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AggregationStats {
    /// Pairs examined.
    pub pairs: usize,
    /// Pairs reduced to a single-span variant.
    pub classified: usize,
    /// Pairs whose edits span several disjoint positions.
    pub rejected: usize,
    /// Pairs skipped because an operation did not fit the words.
    pub malformed: usize,
}

impl AggregationStats {
    pub fn merge(&mut self, other: AggregationStats) {
        self.pairs += other.pairs;
        self.classified += other.classified;
        self.rejected += other.rejected;
        self.malformed += other.malformed;
    }
}

/// Registry plus statistics, owned by one scan and finalized at its end.
#[derive(Debug, Clone, Default)]
pub struct Aggregation {
    pub registry: VariantRegistry,
    pub stats: AggregationStats,
}

impl Aggregation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Combine a partial result produced on another worker.
    pub fn merge(&mut self, other: Aggregation) {
        self.registry.merge(other.registry);
        self.stats.merge(other.stats);
    }
}

/// Turns an [`EditMap`] into canonical variant counts.
#[derive(Debug, Clone, Default)]
pub struct VariantAggregator {
    config: AggregatorConfig,
}

impl VariantAggregator {
    pub fn new(config: AggregatorConfig) -> Self {
        VariantAggregator { config }
    }

    pub fn config(&self) -> &AggregatorConfig {
        &self.config
    }

    /// Classify every pair of `map`.
    ///
    /// Multi-span pairs are skipped silently. Malformed records abort the run
    /// in strict mode and are logged and skipped otherwise.
    pub fn aggregate(&self, map: &EditMap) -> Result<Aggregation> {
        let start_time = Instant::now();
        let aggregation = if self.config.parallel {
            self.aggregate_parallel(map)?
        } else {
            self.aggregate_sequential(map)?
        };

        let stats = aggregation.stats;
        info!(
            "Classified {} of {} pairs into {} variants in {}ms ({} multi-span, {} malformed)",
            stats.classified,
            stats.pairs,
            aggregation.registry.len(),
            start_time.elapsed().as_millis(),
            stats.rejected,
            stats.malformed
        );
        Ok(aggregation)
    }

    /// Classify one pair into `aggregation`.
    pub fn process_pair(
        &self,
        aggregation: &mut Aggregation,
        source: &str,
        target: &str,
        ops: &[EditOperation],
    ) -> Result<()> {
        aggregation.stats.pairs += 1;
        match build_template(ops, source, target) {
            Ok(Some(classification)) => {
                aggregation
                    .registry
                    .record(&classification.variant, source, target);
                aggregation.stats.classified += 1;
            }
            Ok(None) => aggregation.stats.rejected += 1,
            Err(error) if error.is_malformed_operation() => match self.config.validation {
                ValidationMode::Strict => return Err(error),
                ValidationMode::BestEffort => {
                    warn!("Skipping pair: {error}");
                    aggregation.stats.malformed += 1;
                }
            },
            Err(error) => return Err(error),
        }
        Ok(())
    }

    fn aggregate_sequential(&self, map: &EditMap) -> Result<Aggregation> {
        let mut aggregation = Aggregation::new();
        let total = map.source_count();

        for (i, (source, related)) in map.iter().enumerate() {
            for (target, ops) in related {
                self.process_pair(&mut aggregation, source, target, ops)?;
            }
            debug!("Processed {} / {} words", i + 1, total);
        }

        Ok(aggregation)
    }

    /// Fold pairs into per-worker aggregations and merge them in input order.
    fn aggregate_parallel(&self, map: &EditMap) -> Result<Aggregation> {
        let thread_pool_size = self.config.thread_pool_size.unwrap_or_else(num_cpus::get);
        let thread_pool = ThreadPoolBuilder::new()
            .num_threads(thread_pool_size)
            .thread_name(|i| format!("variant-aggregator-{i}"))
            .build()
            .map_err(|e| OrthovarError::internal(format!("Failed to create thread pool: {e}")))?;

        let pairs: Vec<(&str, &str, &[EditOperation])> = map.pairs().collect();

        thread_pool.install(|| {
            pairs
                .par_iter()
                .try_fold(Aggregation::new, |mut aggregation, &(source, target, ops)| {
                    self.process_pair(&mut aggregation, source, target, ops)?;
                    Ok::<_, OrthovarError>(aggregation)
                })
                .try_reduce(Aggregation::new, |mut left, right| {
                    left.merge(right);
                    Ok(left)
                })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spelling::levenshtein::compute_edit_operations;
    use crate::spelling::variant::Variant;

    fn map_of(pairs: &[(&str, &str)]) -> EditMap {
        let mut map = EditMap::new();
        for (source, target) in pairs {
            map.insert(source, target, compute_edit_operations(source, target));
        }
        map
    }

    #[test]
    fn test_single_replace_end_to_end() {
        let aggregation = VariantAggregator::default()
            .aggregate(&map_of(&[("cat", "cot")]))
            .unwrap();

        let variant = Variant::new("a", "o");
        assert_eq!(aggregation.registry.count(&variant), 1);
        assert_eq!(
            aggregation.registry.examples(&variant),
            &[("cat".to_string(), "cot".to_string())]
        );
        assert_eq!(aggregation.stats.classified, 1);
    }

    #[test]
    fn test_inverse_pairs_share_a_key() {
        let aggregation = VariantAggregator::default()
            .aggregate(&map_of(&[("cat", "cot"), ("hot", "hat")]))
            .unwrap();

        assert_eq!(aggregation.registry.len(), 1);
        assert_eq!(aggregation.registry.count(&Variant::new("o", "a")), 2);
    }

    #[test]
    fn test_transposition_end_to_end() {
        let aggregation = VariantAggregator::default()
            .aggregate(&map_of(&[("sing", "sign")]))
            .unwrap();

        let entry = aggregation.registry.get(&Variant::new("ng", "gn")).unwrap();
        assert_eq!(entry.variant.key(), "gn/ng");
        assert_eq!(entry.count, 1);
    }

    #[test]
    fn test_multi_span_pairs_are_skipped() {
        let aggregation = VariantAggregator::default()
            .aggregate(&map_of(&[("abcdef", "abxdyf"), ("cat", "cot")]))
            .unwrap();

        assert_eq!(aggregation.stats.pairs, 2);
        assert_eq!(aggregation.stats.rejected, 1);
        assert_eq!(aggregation.registry.total_count(), 1);
    }

    #[test]
    fn test_malformed_record_modes() {
        let mut map = map_of(&[("cat", "cot")]);
        map.insert("dog", "dig", vec![EditOperation::Delete { index: 9 }]);

        let aggregation = VariantAggregator::default().aggregate(&map).unwrap();
        assert_eq!(aggregation.stats.malformed, 1);
        assert_eq!(aggregation.stats.classified, 1);

        let strict = VariantAggregator::new(AggregatorConfig {
            validation: ValidationMode::Strict,
            ..Default::default()
        });
        let error = strict.aggregate(&map).unwrap_err();
        assert!(error.is_malformed_operation());
        assert!(error.to_string().contains("dog -> dig"));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let map = map_of(&[
            ("cat", "cot"),
            ("hot", "hat"),
            ("color", "colour"),
            ("honor", "honour"),
            ("sing", "sign"),
            ("night", "nite"),
            ("abcdef", "abxdyf"),
            ("grey", "gray"),
            ("mat", "mot"),
        ]);

        let sequential = VariantAggregator::default().aggregate(&map).unwrap();
        let parallel = VariantAggregator::new(AggregatorConfig {
            parallel: true,
            thread_pool_size: Some(3),
            ..Default::default()
        })
        .aggregate(&map)
        .unwrap();

        assert_eq!(sequential.stats, parallel.stats);
        assert_eq!(
            sequential.registry.examples_by_key(),
            parallel.registry.examples_by_key()
        );
    }
}
