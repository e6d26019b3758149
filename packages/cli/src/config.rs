use mockup_pipeline::ConvertOptions;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_CONFIG_NAME: &str = "mockup.config.json";

/// Mockup configuration file format. Conversion options sit at the top
/// level next to `outDir`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Where generated components are written
    #[serde(default = "default_out_dir")]
    pub out_dir: String,

    #[serde(flatten)]
    pub options: ConvertOptions,
}

fn default_out_dir() -> String {
    "components".to_string()
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &str) -> anyhow::Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            tracing::debug!(path = %config_path.display(), "loaded config");
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Get absolute path to the output directory
    pub fn get_out_dir(&self, cwd: &str) -> PathBuf {
        PathBuf::from(cwd).join(&self.out_dir)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            out_dir: default_out_dir(),
            options: ConvertOptions::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockup_compiler_css::CssStrategyKind;

    #[test]
    fn test_parse_config() {
        let json = r#"{
            "outDir": "src/components",
            "cssStrategy": "external",
            "cssOptions": { "fileName": "page" },
            "minPatternOccurrences": 3,
            "typescript": true
        }"#;

        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.out_dir, "src/components");
        assert_eq!(config.options.css_strategy, CssStrategyKind::External);
        assert_eq!(config.options.css_options.file_name, "page");
        assert_eq!(config.options.split.patterns.min_pattern_occurrences, 3);
        assert!(config.options.typescript);
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.out_dir, "components");
        assert_eq!(config.options.css_strategy, CssStrategyKind::Modules);
        assert!(!config.options.typescript);
    }

    #[test]
    fn test_missing_config_falls_back_to_defaults() {
        let config = Config::load("/nonexistent/mockup/dir").unwrap();
        assert_eq!(config.out_dir, "components");
    }
}
