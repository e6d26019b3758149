//! Component name generation.
//!
//! Names come from a priority cascade over the element and its context
//! (explicit override, semantic tag, analysis result, special tags, classes,
//! parent name, tag name) and are then normalized: reserved-word escaping,
//! naming convention, prefix/suffix, length limit and finally uniqueness
//! against every name this generator has handed out since the last reset.

use convert_case::{Case, Casing};
use mockup_parser::{ParsedDocument, ParsedNode, SectionType, SemanticSection};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::LazyLock;

pub const MAX_NAME_LENGTH: usize = 49;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NamingConvention {
    #[default]
    #[serde(rename = "PascalCase")]
    PascalCase,
    #[serde(rename = "camelCase")]
    CamelCase,
    #[serde(rename = "kebab-case")]
    KebabCase,
    #[serde(rename = "UPPER_CASE")]
    UpperCase,
}

impl NamingConvention {
    pub fn apply(&self, name: &str) -> String {
        match self {
            NamingConvention::PascalCase => name.to_case(Case::Pascal),
            NamingConvention::CamelCase => name.to_case(Case::Camel),
            NamingConvention::KebabCase => name.to_case(Case::Kebab),
            NamingConvention::UpperCase => name.to_case(Case::UpperSnake),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NamingOptions {
    pub naming_convention: NamingConvention,
    pub component_prefix: Option<String>,
    pub component_suffix: Option<String>,
    /// Prefix semantic tag names with the parent component name
    /// (`CardHeader` instead of `Header`)
    pub parent_prefix: bool,
}

/// Everything the cascade may look at for one element
#[derive(Debug, Clone, Copy)]
pub struct NameContext<'a> {
    pub doc: &'a ParsedDocument,
    pub node: &'a ParsedNode,
    pub parent_name: Option<&'a str>,
    pub section: Option<&'a SemanticSection>,
}

impl<'a> NameContext<'a> {
    pub fn new(doc: &'a ParsedDocument, node: &'a ParsedNode) -> Self {
        Self {
            doc,
            node,
            parent_name: None,
            section: None,
        }
    }

    pub fn with_parent(mut self, parent_name: Option<&'a str>) -> Self {
        self.parent_name = parent_name;
        self
    }

    pub fn with_section(mut self, section: Option<&'a SemanticSection>) -> Self {
        self.section = section;
        self
    }
}

const SEMANTIC_TAG_NAMES: &[(&str, &str)] = &[
    ("header", "Header"),
    ("nav", "Navigation"),
    ("main", "MainContent"),
    ("footer", "Footer"),
    ("aside", "Sidebar"),
    ("article", "Article"),
    ("section", "Section"),
    ("form", "Form"),
    ("figure", "Figure"),
    ("table", "Table"),
    ("dialog", "Dialog"),
];

const TAG_NAMES: &[(&str, &str)] = &[
    ("p", "Paragraph"),
    ("h1", "Heading"),
    ("h2", "Heading"),
    ("h3", "Heading"),
    ("h4", "Heading"),
    ("h5", "Heading"),
    ("h6", "Heading"),
    ("ul", "List"),
    ("ol", "OrderedList"),
    ("li", "ListItem"),
    ("dl", "DescriptionList"),
    ("span", "Text"),
    ("div", "Container"),
    ("blockquote", "Quote"),
    ("figcaption", "Caption"),
    ("label", "Label"),
    ("input", "Input"),
    ("select", "Select"),
    ("textarea", "TextArea"),
    ("video", "Video"),
    ("audio", "Audio"),
    ("svg", "Icon"),
    ("i", "Icon"),
    ("tr", "TableRow"),
    ("td", "TableCell"),
    ("th", "TableHeader"),
];

const GENERIC_BUTTON_CLASSES: &[&str] = &[
    "btn",
    "button",
    "btn-primary",
    "btn-secondary",
    "btn-default",
    "btn-lg",
    "btn-sm",
    "primary",
    "secondary",
];

/// Identifiers a component may not be called, compared case-insensitively
const RESERVED_WORDS: &[&str] = &[
    "break", "case", "catch", "class", "const", "continue", "debugger", "default", "delete",
    "do", "else", "enum", "export", "extends", "false", "finally", "for", "function", "if",
    "implements", "import", "in", "instanceof", "interface", "let", "new", "null", "package",
    "private", "protected", "public", "return", "static", "super", "switch", "this", "throw",
    "true", "try", "typeof", "var", "void", "while", "with", "yield", "await", "async",
    "fragment", "component", "react", "children", "props", "state", "object", "array", "string",
    "number", "boolean", "symbol", "map", "set", "promise", "window", "document",
];

static UTILITY_CLASS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:[mp][trblxy]?-\d+|(?:w|h|gap|text|bg|border|rounded|shadow|font|leading|tracking|col|row|order|z|opacity|d|float|align|justify|items|self|flex|grid)-[\w.-]+|flex|grid|block|inline|inline-block|hidden|container|clearfix|sr-only|visible|invisible|relative|absolute|fixed|sticky)$",
    )
    .expect("utility class pattern is valid")
});

static TRAILING_INDEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-_]?\d+$").expect("trailing index pattern is valid"));

/// Whether a class is a layout/spacing utility rather than a name-bearing class
pub fn is_utility_class(class: &str) -> bool {
    UTILITY_CLASS.is_match(class)
}

/// Produces convention-compliant, unique component names.
///
/// Stateful: every name returned is registered, and no later call returns it
/// again until [`NameGenerator::reset`].
#[derive(Debug, Clone, Default)]
pub struct NameGenerator {
    options: NamingOptions,
    used: HashSet<String>,
    generic_counter: usize,
}

impl NameGenerator {
    pub fn new(options: NamingOptions) -> Self {
        Self {
            options,
            used: HashSet::new(),
            generic_counter: 0,
        }
    }

    pub fn options(&self) -> &NamingOptions {
        &self.options
    }

    /// Forget every name handed out so far
    pub fn reset(&mut self) {
        self.used.clear();
        self.generic_counter = 0;
    }

    /// Run the cascade for one element and register the result
    pub fn generate_name(&mut self, context: &NameContext<'_>) -> String {
        let raw = self.base_name(context);
        let name = self.finish(&raw);
        self.generate_unique_name(&name, &[])
    }

    /// Make `base` unique against `existing` and every name this generator
    /// has returned, appending `max(existing suffix) + 1` on collision.
    pub fn generate_unique_name(&mut self, base: &str, existing: &[String]) -> String {
        // names double as identifiers and file stems, so the cut carries no
        // ellipsis marker
        let base = truncate(base, MAX_NAME_LENGTH);
        let taken = |candidate: &str| {
            self.used.contains(candidate) || existing.iter().any(|name| name == candidate)
        };

        let unique = if !base.is_empty() && !taken(&base) {
            base
        } else {
            let mut next = self
                .used
                .iter()
                .map(|s| s.as_str())
                .chain(existing.iter().map(|s| s.as_str()))
                .filter_map(|name| numeric_suffix(name, &base))
                .max()
                .unwrap_or(1)
                + 1;
            loop {
                let suffix = next.to_string();
                let candidate = format!(
                    "{}{}",
                    truncate(&base, MAX_NAME_LENGTH.saturating_sub(suffix.len())),
                    suffix
                );
                if !taken(&candidate) {
                    break candidate;
                }
                next += 1;
            }
        };

        self.used.insert(unique.clone());
        unique
    }

    fn base_name(&mut self, context: &NameContext<'_>) -> String {
        let node = context.node;
        let tag = node.tag();

        if let Some(name) = explicit_name(node) {
            return name;
        }

        if let Some((_, name)) = SEMANTIC_TAG_NAMES.iter().find(|(t, _)| *t == tag) {
            return match context.parent_name.filter(|_| self.options.parent_prefix) {
                Some(parent) => format!("{}{}", pascal(parent), name),
                None => name.to_string(),
            };
        }

        if let Some(section) = context.section {
            if matches!(
                section.section_type,
                SectionType::Card | SectionType::Hero | SectionType::Custom(_)
            ) {
                return section.component_name.clone();
            }
        }

        match tag {
            "a" => return "Link".into(),
            "img" | "picture" => return "Image".into(),
            _ => {}
        }

        if is_button(node) {
            return button_name(node);
        }

        if let Some(name) = sibling_continuation(context) {
            return name;
        }

        if let Some(name) = class_derived_name(node) {
            return name;
        }

        if let Some(parent) = context.parent_name {
            return match tag {
                "div" | "span" => format!("{}Container", pascal(parent)),
                _ => format!("{}Section", pascal(parent)),
            };
        }

        if let Some((_, name)) = TAG_NAMES.iter().find(|(t, _)| *t == tag) {
            return name.to_string();
        }

        if !tag.is_empty() && tag.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return pascal(tag);
        }

        self.generic_counter += 1;
        format!("Component{}", self.generic_counter)
    }

    /// Reserved-word escaping, convention, prefix/suffix
    fn finish(&self, raw: &str) -> String {
        let mut name = pascal(raw);
        if name.is_empty() {
            name = "Component".into();
        }
        if is_reserved(&name) {
            name.push_str("Component");
        }
        if name.starts_with(|c: char| c.is_ascii_digit()) {
            name.insert_str(0, "Component");
        }

        let mut name = self.options.naming_convention.apply(&name);
        if let Some(prefix) = &self.options.component_prefix {
            name.insert_str(0, prefix);
        }
        if let Some(suffix) = &self.options.component_suffix {
            name.push_str(suffix);
        }
        name
    }
}

/// JavaScript binding for a component name. Names that already are
/// PascalCase identifiers pass through; any other convention is converted
/// back so JSX treats the tag as a component rather than an HTML element.
pub fn component_identifier(name: &str) -> String {
    let is_pascal = name.starts_with(|c: char| c.is_ascii_uppercase())
        && name.chars().all(|c| c.is_ascii_alphanumeric());
    if is_pascal {
        return name.to_string();
    }

    let mut identifier = pascal(name);
    if identifier.is_empty() || identifier.starts_with(|c: char| c.is_ascii_digit()) {
        identifier.insert_str(0, "Component");
    }
    identifier
}

pub fn is_reserved(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    RESERVED_WORDS.contains(&lower.as_str())
}

fn pascal(value: &str) -> String {
    let cleaned: String = value
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { ' ' })
        .collect();
    cleaned.to_case(Case::Pascal)
}

fn truncate(value: &str, max: usize) -> String {
    value.chars().take(max).collect()
}

/// `Card3` with base `Card` → 3; the bare base counts as 1
fn numeric_suffix(name: &str, base: &str) -> Option<usize> {
    let rest = name.strip_prefix(base)?;
    if rest.is_empty() {
        return Some(1);
    }
    if rest.chars().all(|c| c.is_ascii_digit()) {
        rest.parse().ok()
    } else {
        None
    }
}

fn explicit_name(node: &ParsedNode) -> Option<String> {
    ["data-component", "data-name"]
        .iter()
        .filter_map(|attr| node.attributes.get(attr))
        .map(pascal)
        .find(|name| !name.is_empty())
}

fn is_button(node: &ParsedNode) -> bool {
    match node.tag() {
        "button" => true,
        "input" => matches!(
            node.attributes.get("type"),
            Some("button") | Some("submit") | Some("reset")
        ),
        _ => node
            .classes()
            .iter()
            .any(|class| class.starts_with("btn") || class.contains("button")),
    }
}

fn button_name(node: &ParsedNode) -> String {
    let specific = node.classes().into_iter().find(|class| {
        !GENERIC_BUTTON_CLASSES.contains(class) && !is_utility_class(class)
    });

    let Some(class) = specific else {
        return "Button".into();
    };

    let mut name = pascal(class)
        .replace("Btn", "Button")
        .replace("ButtonButton", "Button");
    if !name.ends_with("Button") {
        name.push_str("Button");
    }
    name
}

/// Reuse the prefix of preceding siblings that share this element's tag and
/// first class, numbering this one after them (`Feature2`, `Feature3`).
fn sibling_continuation(context: &NameContext<'_>) -> Option<String> {
    let node = context.node;
    let parent = node.parent?;
    let first_class = node.classes().into_iter().next()?;
    let prefix = TRAILING_INDEX.replace(first_class, "").to_string();
    if prefix.is_empty() || is_utility_class(&prefix) {
        return None;
    }

    let mut preceding = 0;
    for sibling in context.doc.element_children(parent) {
        if sibling.id == node.id {
            break;
        }
        let matches = sibling.tag() == node.tag()
            && sibling
                .classes()
                .first()
                .is_some_and(|class| TRAILING_INDEX.replace(class, "") == prefix);
        if matches {
            preceding += 1;
        }
    }

    if preceding == 0 {
        return None;
    }
    Some(format!("{}{}", pascal(&prefix), preceding + 1))
}

/// `card__title` → `CardTitle`, `card--featured` → `Card`, otherwise the
/// first class that isn't a utility
fn class_derived_name(node: &ParsedNode) -> Option<String> {
    let classes = node.classes();

    if let Some(bem) = classes.iter().find(|class| class.contains("__")) {
        let without_modifier = bem.split("--").next().unwrap_or(*bem);
        let mut parts = without_modifier.splitn(2, "__");
        let block = parts.next().unwrap_or_default();
        let element = parts.next().unwrap_or_default();
        let name = format!("{}{}", pascal(block), pascal(element));
        if !name.is_empty() {
            return Some(name);
        }
    }

    classes
        .iter()
        .filter(|class| !is_utility_class(class))
        .map(|class| pascal(class.split("--").next().unwrap_or(*class)))
        .find(|name| !name.is_empty())
}
