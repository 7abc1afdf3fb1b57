//! Ranked variant reports.

use std::collections::BTreeMap;
use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::spelling::variant::VariantRegistry;

/// One ranked report line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedVariant {
    /// Canonical `before/after` key.
    pub key: String,
    pub count: usize,
    pub examples: Vec<(String, String)>,
}

/// Variants ranked by descending count, ties in ascending key order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantReport {
    pub variants: Vec<RankedVariant>,
}

impl VariantReport {
    /// Rank the registry, keeping at most `limit` variants.
    pub fn from_registry(registry: &VariantRegistry, limit: Option<usize>) -> Self {
        let variants = registry
            .ranked()
            .into_iter()
            .take(limit.unwrap_or(usize::MAX))
            .map(|entry| RankedVariant {
                key: entry.variant.key(),
                count: entry.count,
                examples: entry.examples.clone(),
            })
            .collect();
        VariantReport { variants }
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    /// `(before/after) : count` lines in rank order.
    pub fn lines(&self) -> Vec<String> {
        self.variants
            .iter()
            .map(|variant| format!("({}) : {}", variant.key, variant.count))
            .collect()
    }

    /// Canonical key -> count.
    pub fn counts(&self) -> BTreeMap<String, usize> {
        self.variants
            .iter()
            .map(|variant| (variant.key.clone(), variant.count))
            .collect()
    }

    /// Canonical key -> `[source, target]` example pairs.
    pub fn examples(&self) -> BTreeMap<String, Vec<[String; 2]>> {
        self.variants
            .iter()
            .map(|variant| {
                let pairs = variant
                    .examples
                    .iter()
                    .map(|(source, target)| [source.clone(), target.clone()])
                    .collect();
                (variant.key.clone(), pairs)
            })
            .collect()
    }

    pub fn write_lines<W: Write>(&self, mut writer: W) -> Result<()> {
        for line in self.lines() {
            writeln!(writer, "{line}")?;
        }
        Ok(())
    }

    /// The key -> count object, compact or pretty printed.
    pub fn counts_json(&self, pretty: bool) -> Result<String> {
        let counts = self.counts();
        Ok(if pretty {
            serde_json::to_string_pretty(&counts)?
        } else {
            serde_json::to_string(&counts)?
        })
    }

    /// The key -> examples object, compact or pretty printed.
    pub fn examples_json(&self, pretty: bool) -> Result<String> {
        let examples = self.examples();
        Ok(if pretty {
            serde_json::to_string_pretty(&examples)?
        } else {
            serde_json::to_string(&examples)?
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spelling::variant::Variant;

    fn registry() -> VariantRegistry {
        let mut registry = VariantRegistry::new();
        registry.record(&Variant::new("s", "z"), "realise", "realize");
        registry.record(&Variant::new("z", "s"), "analyze", "analyse");
        registry.record(&Variant::new("", "u"), "color", "colour");
        registry.record(&Variant::new("u", ""), "honour", "honor");
        registry.record(&Variant::new("e", "a"), "grey", "gray");
        registry
    }

    #[test]
    fn test_lines_rank_by_count_then_key() {
        let report = VariantReport::from_registry(&registry(), None);
        assert_eq!(
            report.lines(),
            vec!["(s/z) : 2", "(u/∅) : 2", "(a/e) : 1"]
        );
    }

    #[test]
    fn test_limit() {
        let report = VariantReport::from_registry(&registry(), Some(1));
        assert_eq!(report.len(), 1);
        assert_eq!(report.variants[0].key, "s/z");
    }

    #[test]
    fn test_json_outputs() {
        let report = VariantReport::from_registry(&registry(), None);
        assert_eq!(
            report.counts_json(false).unwrap(),
            r#"{"a/e":1,"s/z":2,"u/∅":2}"#
        );

        let examples: serde_json::Value =
            serde_json::from_str(&report.examples_json(true).unwrap()).unwrap();
        assert_eq!(
            examples["s/z"],
            serde_json::json!([["realise", "realize"], ["analyze", "analyse"]])
        );
    }

    #[test]
    fn test_write_lines() {
        let mut buffer = Vec::new();
        VariantReport::from_registry(&registry(), Some(2))
            .write_lines(&mut buffer)
            .unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), "(s/z) : 2\n(u/∅) : 2\n");
    }
}
