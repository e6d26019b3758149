use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse category of a repeating pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternType {
    Card,
    Nav,
    List,
    Section,
    Unknown,
}

impl PatternType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PatternType::Card => "card",
            PatternType::Nav => "nav",
            PatternType::List => "list",
            PatternType::Section => "section",
            PatternType::Unknown => "unknown",
        }
    }
}

impl fmt::Display for PatternType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const CARD_KEYWORDS: &[&str] = &[
    "card", "tile", "product", "post", "testimonial", "feature", "pricing", "profile",
];
const NAV_KEYWORDS: &[&str] = &["nav", "menu", "link", "tabs", "breadcrumb", "pagination"];
const LIST_KEYWORDS: &[&str] = &["list", "item", "row", "entry", "ul", "ol"];
const SECTION_KEYWORDS: &[&str] = &[
    "section", "hero", "banner", "header", "footer", "cta", "modal", "sidebar", "newsletter",
    "search",
];

/// Lower-case a selector and fold BEM element separators (`__`) into `-`
pub fn normalize_selector(selector: &str) -> String {
    selector.to_ascii_lowercase().replace("__", "-")
}

/// Map a selector to a coarse category by keyword containment.
/// Card keywords are checked first, then navigation, list and section.
pub fn classify_pattern(selector: &str) -> PatternType {
    let normalized = normalize_selector(selector);
    let name = normalized.trim_start_matches(['.', '#']);

    let contains_any = |keywords: &[&str]| keywords.iter().any(|k| contains_keyword(name, k));

    if contains_any(CARD_KEYWORDS) {
        PatternType::Card
    } else if contains_any(NAV_KEYWORDS) {
        PatternType::Nav
    } else if contains_any(LIST_KEYWORDS) {
        PatternType::List
    } else if contains_any(SECTION_KEYWORDS) {
        PatternType::Section
    } else {
        PatternType::Unknown
    }
}

/// Plain substring containment, except that keywords of two letters or
/// fewer (`ul`, `ol`) must match a whole `-`-separated segment.
fn contains_keyword(name: &str, keyword: &str) -> bool {
    if keyword.len() <= 2 {
        name.split(|c: char| !c.is_ascii_alphanumeric())
            .any(|segment| segment == keyword)
    } else {
        name.contains(keyword)
    }
}
