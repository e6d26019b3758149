use mockup_compiler_css::{CssOptions, CssStrategyKind};
use mockup_parser::ParseOptions;
use mockup_splitter::SplitOptions;
use serde::{Deserialize, Serialize};

/// Everything a conversion can be configured with, as one flat JSON bag:
/// parse and split options sit at the top level next to the CSS settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConvertOptions {
    #[serde(flatten)]
    pub parse: ParseOptions,

    #[serde(flatten)]
    pub split: SplitOptions,

    pub css_strategy: CssStrategyKind,

    pub css_options: CssOptions,

    /// Emit `.tsx` files with props interfaces
    pub typescript: bool,

    /// Emit a page component that renders the whole mockup
    pub generate_app: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            parse: ParseOptions::default(),
            split: SplitOptions::default(),
            css_strategy: CssStrategyKind::default(),
            css_options: CssOptions::default(),
            typescript: false,
            generate_app: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_json() {
        let options: ConvertOptions = serde_json::from_str(
            r#"{
                "maxDepth": 12,
                "includeComments": true,
                "minPatternOccurrences": 3,
                "maxComponentDepth": 2,
                "namingConvention": "kebab-case",
                "cssStrategy": "utility",
                "cssOptions": { "optimize": true },
                "typescript": true
            }"#,
        )
        .unwrap();

        assert_eq!(options.parse.max_depth, Some(12));
        assert!(options.parse.include_comments);
        assert!(options.parse.analyze);
        assert_eq!(options.split.patterns.min_pattern_occurrences, 3);
        assert_eq!(options.split.max_component_depth, 2);
        assert_eq!(options.css_strategy, CssStrategyKind::Utility);
        assert!(options.css_options.optimize);
        assert_eq!(options.css_options.file_name, "styles");
        assert!(options.typescript);
        assert!(options.generate_app);
    }
}
