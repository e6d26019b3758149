//! Stylesheet model, rule merging and deterministic class naming.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Declarations keyed by kebab-case property, in source order
pub type Declarations = IndexMap<String, String>;

/// CSS rule with selector and properties
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CssRule {
    pub selector: String,
    pub declarations: Declarations,
}

impl CssRule {
    pub fn new(selector: impl Into<String>, declarations: Declarations) -> Self {
        Self {
            selector: selector.into(),
            declarations,
        }
    }
}

/// Collection of CSS rules
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stylesheet {
    pub rules: Vec<CssRule>,
}

impl Stylesheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_rule(&mut self, rule: CssRule) {
        self.rules.push(rule);
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Convert to CSS text
    pub fn to_css(&self) -> String {
        let mut css = String::new();

        for (i, rule) in self.rules.iter().enumerate() {
            if i > 0 {
                css.push('\n');
            }
            css.push_str(&rule.selector);
            css.push_str(" {\n");

            for (key, value) in &rule.declarations {
                css.push_str("  ");
                css.push_str(key);
                css.push_str(": ");
                css.push_str(value);
                css.push_str(";\n");
            }

            css.push_str("}\n");
        }

        css
    }
}

/// `color: red; padding: 10px` in source order
pub fn declaration_text(declarations: &Declarations) -> String {
    declarations
        .iter()
        .map(|(key, value)| format!("{}: {}", key, value))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Order-independent key of a declaration set: `color:red;padding:10px`
pub fn declaration_key(declarations: &Declarations) -> String {
    let mut pairs: Vec<String> = declarations
        .iter()
        .map(|(key, value)| format!("{}:{}", key, value.trim()))
        .collect();
    pairs.sort();
    pairs.join(";")
}

/// Deterministic class name from a content key: CRC32 rendered in base 36
pub fn hashed_class_name(prefix: &str, key: &str) -> String {
    let hash = crc32fast::hash(key.as_bytes());
    format!("{}{}", prefix, to_base36(hash))
}

fn to_base36(mut value: u32) -> String {
    const DIGITS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if value == 0 {
        return "0".into();
    }
    let mut out = Vec::new();
    while value > 0 {
        out.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    out.reverse();
    String::from_utf8_lossy(&out).into_owned()
}

/// Merge rules whose declaration sets are identical into one rule with a
/// selector list. The first occurrence keeps its position.
pub fn merge_identical_rules(rules: Vec<CssRule>) -> Vec<CssRule> {
    let mut merged: IndexMap<String, CssRule> = IndexMap::new();

    for rule in rules {
        if rule.declarations.is_empty() {
            continue;
        }
        let key = declaration_key(&rule.declarations);
        match merged.get_mut(&key) {
            Some(existing) => {
                let already_listed = existing
                    .selector
                    .split(", ")
                    .any(|selector| selector == rule.selector);
                if !already_listed {
                    existing.selector.push_str(", ");
                    existing.selector.push_str(&rule.selector);
                }
            }
            None => {
                merged.insert(key, rule);
            }
        }
    }

    merged.into_values().collect()
}
