use crate::options::{CssOptions, CssStrategyKind};
use crate::stylesheet::{declaration_key, declaration_text, hashed_class_name, CssRule, Declarations};
use crate::{ExternalStrategy, ModuleStrategy, UtilityStrategy};
use indexmap::IndexMap;
use mockup_common::GeneratedFile;
use mockup_parser::attributes::{kebab_case_property, split_style_declarations};
use mockup_parser::{NodeId, ParseOptions, ParsedAttributes, ParsedDocument, Parser};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CssConversionResult {
    /// Markup with inline styles replaced by classes
    pub html: String,
    /// Generated stylesheet, empty for the utility strategy
    pub css: String,
    /// Generated class → the declarations it stands for
    pub class_name_map: IndexMap<String, String>,
    pub generated_files: Vec<GeneratedFile>,
    pub warnings: Vec<String>,
}

/// Result of converting an already parsed document. Node ids of `document`
/// match the input document.
#[derive(Debug, Clone)]
pub struct DocumentConversion {
    pub document: ParsedDocument,
    pub result: CssConversionResult,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CssStats {
    pub elements_processed: usize,
    pub declarations_processed: usize,
    pub classes_generated: usize,
    pub cache_hits: usize,
    pub unmapped_declarations: usize,
    pub variables_created: usize,
    pub rules_merged: usize,
}

/// Turns inline `style` attributes into a styling artifact.
///
/// Every conversion starts from a clean slate: caches, rules and stats from
/// a previous call are discarded.
pub trait CssStrategy {
    fn strategy_name(&self) -> &'static str;

    fn options(&self) -> &CssOptions;

    /// Rewrite every styled element of `doc`
    fn convert_document(&mut self, doc: &ParsedDocument) -> DocumentConversion;

    /// Stylesheet produced by the last conversion
    fn generate_css(&self) -> String;

    /// Counters of the last conversion
    fn stats(&self) -> CssStats;

    /// Split a `style` attribute into kebab-case declarations
    fn parse_inline_styles(&self, style: &str) -> Declarations {
        split_style_declarations(style)
            .into_iter()
            .map(|(property, value)| (normalize_property(&property), value))
            .collect()
    }

    /// Parse `html`, convert it and serialize the result
    fn convert(&mut self, html: &str) -> CssConversionResult {
        let options = ParseOptions {
            preserve_whitespace: true,
            include_comments: true,
            ..Default::default()
        };
        let doc = Parser::new().parse_tree(html, &options);
        self.convert_document(&doc).result
    }
}

pub fn create_strategy(kind: CssStrategyKind, options: CssOptions) -> Box<dyn CssStrategy> {
    match kind {
        CssStrategyKind::Utility => Box::new(UtilityStrategy::new(options)),
        CssStrategyKind::Modules => Box::new(ModuleStrategy::new(options)),
        CssStrategyKind::External => Box::new(ExternalStrategy::new(options)),
    }
}

fn normalize_property(property: &str) -> String {
    let property = property.trim();
    if property.starts_with("--") {
        property.to_string()
    } else {
        property.to_ascii_lowercase()
    }
}

/// Inline style of an element as kebab-case declarations
pub fn element_declarations(attributes: &ParsedAttributes) -> Declarations {
    attributes
        .style
        .iter()
        .flatten()
        .map(|(key, value)| (kebab_case_property(key), value.clone()))
        .collect()
}

/// Styled elements of a document in document order
pub fn styled_elements(doc: &ParsedDocument) -> Vec<NodeId> {
    doc.elements()
        .filter(|node| node.attributes.style.as_ref().is_some_and(|s| !s.is_empty()))
        .map(|node| node.id)
        .collect()
}

/// Add a class to an element and drop its inline style unless it is kept
pub fn apply_class(doc: &mut ParsedDocument, id: NodeId, class: &str, preserve_inline: bool) {
    if let Some(attributes) = doc.attributes_mut(id) {
        if !class.is_empty() {
            attributes.add_class(class);
        }
        if !preserve_inline {
            attributes.style = None;
        }
    }
}

/// Hashed class allocation shared by the module and external strategies
#[derive(Debug, Default)]
pub(crate) struct ClassRegistry {
    prefix: String,
    share_identical: bool,
    /// declaration key → class
    cache: HashMap<String, String>,
    /// class → hash seed, to detect CRC collisions
    owners: HashMap<String, String>,
    pub rules: Vec<CssRule>,
    pub class_name_map: IndexMap<String, String>,
    pub cache_hits: usize,
}

impl ClassRegistry {
    pub fn new(prefix: &str, share_identical: bool) -> Self {
        Self {
            prefix: prefix.to_string(),
            share_identical,
            ..Default::default()
        }
    }

    /// Class for one element's declarations. With sharing, identical sets map
    /// to one class; without it the element ordinal is part of the hash.
    pub fn class_for(&mut self, declarations: &Declarations, ordinal: usize) -> String {
        let key = declaration_key(declarations);
        if self.share_identical {
            if let Some(class) = self.cache.get(&key) {
                self.cache_hits += 1;
                return class.clone();
            }
        }

        let seed = if self.share_identical {
            key.clone()
        } else {
            format!("{}@{}", key, ordinal)
        };

        let mut class = hashed_class_name(&self.prefix, &seed);
        let mut salt = 0;
        while self.owners.get(&class).is_some_and(|owner| owner != &seed) {
            salt += 1;
            class = hashed_class_name(&self.prefix, &format!("{}#{}", seed, salt));
        }

        self.owners.insert(class.clone(), seed);
        self.cache.insert(key, class.clone());
        self.rules
            .push(CssRule::new(format!(".{}", class), declarations.clone()));
        self.class_name_map
            .insert(class.clone(), declaration_text(declarations));
        class
    }

    pub fn classes_generated(&self) -> usize {
        self.class_name_map.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decls(pairs: &[(&str, &str)]) -> Declarations {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_registry_sharing() {
        let style = decls(&[("color", "red"), ("padding", "10px")]);

        let mut shared = ClassRegistry::new("mk-", true);
        let a = shared.class_for(&style, 0);
        let b = shared.class_for(&style, 1);
        assert_eq!(a, b);
        assert_eq!(shared.cache_hits, 1);
        assert_eq!(shared.rules.len(), 1);

        let mut separate = ClassRegistry::new("mk-", false);
        let a = separate.class_for(&style, 0);
        let b = separate.class_for(&style, 1);
        assert_ne!(a, b);
        assert_eq!(separate.rules.len(), 2);
        assert_eq!(separate.class_name_map[&a], "color: red; padding: 10px");
    }

    #[test]
    fn test_registry_is_deterministic() {
        let style = decls(&[("margin", "0 auto")]);
        let first = ClassRegistry::new("mk-", false).class_for(&style, 3);
        let second = ClassRegistry::new("mk-", false).class_for(&style, 3);
        assert_eq!(first, second);
        assert!(first.starts_with("mk-"));
    }
}
