use crate::naming::NamingOptions;
use mockup_parser::ParseOptions;
use mockup_patterns::PatternOptions;
use serde::{Deserialize, Serialize};

/// Configuration options for component splitting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SplitOptions {
    /// Components nested deeper than this are not extracted; their content
    /// stays inline in the enclosing component
    pub max_component_depth: usize,

    /// Element children an element needs before a BEM block or container
    /// class makes it a component
    pub min_element_count: usize,

    /// CSS selectors whose matches always become components. They are
    /// evaluated by the parser, see [`SplitOptions::parse_options`].
    pub custom_component_selectors: Vec<String>,

    #[serde(flatten)]
    pub patterns: PatternOptions,

    #[serde(flatten)]
    pub naming: NamingOptions,
}

impl Default for SplitOptions {
    fn default() -> Self {
        Self {
            max_component_depth: 5,
            min_element_count: 2,
            custom_component_selectors: Vec::new(),
            patterns: PatternOptions::default(),
            naming: NamingOptions::default(),
        }
    }
}

impl SplitOptions {
    /// `base` extended with the custom component selectors, so a document
    /// parsed with it carries their matches
    pub fn parse_options(&self, base: &ParseOptions) -> ParseOptions {
        let mut options = base.clone();
        for selector in &self.custom_component_selectors {
            if !options.selectors.contains(selector) {
                options.selectors.push(selector.clone());
            }
        }
        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::naming::NamingConvention;

    #[test]
    fn test_deserialize_flat_config() {
        let options: SplitOptions = serde_json::from_str(
            r#"{"maxComponentDepth": 3, "minPatternOccurrences": 3, "namingConvention": "kebab-case"}"#,
        )
        .unwrap();
        assert_eq!(options.max_component_depth, 3);
        assert_eq!(options.min_element_count, 2);
        assert_eq!(options.patterns.min_pattern_occurrences, 3);
        assert_eq!(options.patterns.similarity_threshold, 0.7);
        assert_eq!(options.naming.naming_convention, NamingConvention::KebabCase);
    }

    #[test]
    fn test_parse_options_add_selectors_once() {
        let options = SplitOptions {
            custom_component_selectors: vec![".promo".into(), "aside > div".into()],
            ..Default::default()
        };
        let base = ParseOptions {
            selectors: vec![".promo".into()],
            max_depth: Some(4),
            ..Default::default()
        };
        let parse = options.parse_options(&base);
        assert_eq!(parse.selectors, vec![".promo".to_string(), "aside > div".to_string()]);
        assert_eq!(parse.max_depth, Some(4));
    }
}
