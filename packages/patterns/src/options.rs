use serde::{Deserialize, Serialize};

/// Configuration options for pattern detection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PatternOptions {
    /// A group must repeat at least this often to be reported, unless its
    /// key is one of the single-occurrence section names (hero, cta, ...)
    pub min_pattern_occurrences: usize,

    /// Minimum confidence for groups keyed by id or tag name. Groups keyed
    /// by an explicit class or `data-component` always pass.
    pub similarity_threshold: f64,
}

impl Default for PatternOptions {
    fn default() -> Self {
        Self {
            min_pattern_occurrences: 2,
            similarity_threshold: 0.7,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let options: PatternOptions =
            serde_json::from_str(r#"{"minPatternOccurrences": 4}"#).unwrap();
        assert_eq!(options.min_pattern_occurrences, 4);
        assert_eq!(options.similarity_threshold, 0.7);
    }
}
