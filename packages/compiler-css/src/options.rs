use crate::error::CssError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CssStrategyKind {
    /// Utility-class tokens (Tailwind style)
    Utility,
    /// Scoped CSS module with hashed class names
    #[default]
    Modules,
    /// Plain external stylesheet
    External,
}

impl CssStrategyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CssStrategyKind::Utility => "utility",
            CssStrategyKind::Modules => "modules",
            CssStrategyKind::External => "external",
        }
    }
}

impl fmt::Display for CssStrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CssStrategyKind {
    type Err = CssError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "utility" | "tailwind" => Ok(CssStrategyKind::Utility),
            "modules" | "module" | "css-modules" => Ok(CssStrategyKind::Modules),
            "external" | "css" => Ok(CssStrategyKind::External),
            other => Err(CssError::unknown_strategy(other)),
        }
    }
}

/// Options shared by every CSS strategy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CssOptions {
    /// Modules: share one class between identical declaration sets.
    /// External: merge rules with identical declaration sets.
    pub optimize: bool,

    /// Keep the original `style` attribute next to the generated class
    pub preserve_inline: bool,

    /// Modules: promote values used at least twice to custom properties
    pub use_css_variables: bool,

    /// External: prepend a `<link>` to the stylesheet to the returned HTML
    pub inject_link: bool,

    /// Stylesheet file name without extension
    pub file_name: String,

    /// Prefix of generated class names
    pub class_prefix: String,
}

impl Default for CssOptions {
    fn default() -> Self {
        Self {
            optimize: false,
            preserve_inline: false,
            use_css_variables: false,
            inject_link: false,
            file_name: "styles".into(),
            class_prefix: "mk-".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_kind_from_str() {
        assert_eq!("Tailwind".parse::<CssStrategyKind>(), Ok(CssStrategyKind::Utility));
        assert_eq!("modules".parse::<CssStrategyKind>(), Ok(CssStrategyKind::Modules));
        assert_eq!("external".parse::<CssStrategyKind>(), Ok(CssStrategyKind::External));
        assert!("sass".parse::<CssStrategyKind>().is_err());
    }

    #[test]
    fn test_options_from_json() {
        let options: CssOptions = serde_json::from_str(r#"{"optimize": false, "useCssVariables": true}"#).unwrap();
        assert!(!options.optimize);
        assert!(options.use_css_variables);
        assert_eq!(options.file_name, "styles");
    }
}
