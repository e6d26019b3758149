use crate::classify::{classify_pattern, normalize_selector, PatternType};
use crate::options::PatternOptions;
use crate::similarity::{group_similarity, sample_structure};
use indexmap::IndexMap;
use mockup_parser::{NodeId, ParseOptions, ParsedDocument, ParsedNode, Parser};
use serde::{Deserialize, Serialize};

/// Names that are worth reporting even when they occur only once
const SINGLE_OCCURRENCE_SECTIONS: &[&str] = &[
    "hero",
    "breadcrumb",
    "banner",
    "cta",
    "modal",
    "navbar",
    "sidebar",
    "pagination",
    "newsletter",
    "footer",
    "header",
    "search",
];

/// Elements that never form a pattern
const IGNORED_TAGS: &[&str] = &[
    "html", "head", "body", "script", "style", "meta", "link", "title", "br", "hr", "noscript",
];

/// Occurrence count at which the count term saturates
const COUNT_SATURATION: usize = 5;
const COUNT_WEIGHT: f64 = 0.3;
const SIMILARITY_WEIGHT: f64 = 0.7;
const IDENTICAL_STRUCTURE: f64 = 0.95;
const IDENTICAL_BONUS: f64 = 0.1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternDetectionResult {
    /// Name of the group (data-component value, id, class or tag)
    pub pattern: String,
    /// Selector that matches the group
    pub selector: String,
    pub count: usize,
    pub elements: Vec<NodeId>,
    pub confidence: f64,
    pub pattern_type: PatternType,
    pub sample_structure: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum GroupKey {
    DataComponent(String),
    Id(String),
    Class(String),
    Tag(String),
}

impl GroupKey {
    fn for_node(node: &ParsedNode) -> Option<Self> {
        if let Some(name) = node.attributes.get("data-component").filter(|v| !v.is_empty()) {
            return Some(GroupKey::DataComponent(name.to_string()));
        }
        if let Some(id) = node.attributes.id().filter(|v| !v.is_empty()) {
            return Some(GroupKey::Id(id.to_string()));
        }
        if let Some(class) = node.classes().first() {
            return Some(GroupKey::Class(class.to_string()));
        }
        Some(GroupKey::Tag(node.tag().to_string()))
    }

    fn name(&self) -> &str {
        match self {
            GroupKey::DataComponent(name)
            | GroupKey::Id(name)
            | GroupKey::Class(name)
            | GroupKey::Tag(name) => name,
        }
    }

    fn selector(&self) -> String {
        match self {
            GroupKey::DataComponent(name) => format!("[data-component=\"{}\"]", name),
            GroupKey::Id(id) => format!("#{}", id),
            GroupKey::Class(class) => format!(".{}", class),
            GroupKey::Tag(tag) => tag.clone(),
        }
    }

    /// Groups keyed by an author-chosen class or component name skip the
    /// similarity threshold
    fn is_explicit(&self) -> bool {
        matches!(self, GroupKey::DataComponent(_) | GroupKey::Class(_))
    }
}

/// Finds repeating structures (cards, list items, nav links) in markup
#[derive(Debug, Clone, Default)]
pub struct PatternDetector {
    options: PatternOptions,
}

impl PatternDetector {
    pub fn new(options: PatternOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &PatternOptions {
        &self.options
    }

    /// Detect patterns in raw HTML
    pub fn detect_patterns(&self, html: &str) -> Vec<PatternDetectionResult> {
        let doc = Parser::new().parse_tree(html, &ParseOptions::default());
        self.detect_in_document(&doc)
    }

    /// Detect patterns in an already parsed document. Element ids in the
    /// results refer to `doc`.
    pub fn detect_in_document(&self, doc: &ParsedDocument) -> Vec<PatternDetectionResult> {
        let mut groups: IndexMap<GroupKey, Vec<NodeId>> = IndexMap::new();

        for node in doc.elements() {
            if IGNORED_TAGS.contains(&node.tag()) {
                continue;
            }
            let Some(key) = GroupKey::for_node(node) else {
                continue;
            };
            // Bare tags only group containers, otherwise every <p> repeats
            if matches!(key, GroupKey::Tag(_)) && doc.element_children(node.id).next().is_none() {
                continue;
            }
            groups.entry(key).or_default().push(node.id);
        }

        let mut results = Vec::new();
        for (key, members) in groups {
            let count = members.len();
            let single_section = is_single_occurrence_section(key.name());
            if count < self.options.min_pattern_occurrences && !single_section {
                continue;
            }

            let similarity = group_similarity(doc, &members);
            let confidence = pattern_confidence(count, similarity);
            let threshold = if key.is_explicit() {
                0.0
            } else {
                self.options.similarity_threshold
            };
            if confidence < threshold {
                tracing::trace!(pattern = key.name(), confidence, "pattern below threshold");
                continue;
            }

            results.push(PatternDetectionResult {
                pattern: key.name().to_string(),
                selector: key.selector(),
                count,
                sample_structure: sample_structure(doc, members[0]),
                elements: members,
                confidence,
                pattern_type: classify_pattern(key.name()),
            });
        }

        tracing::debug!(patterns = results.len(), "pattern detection finished");
        results
    }
}

/// Combine the occurrence term and the similarity term. The identical
/// structure bonus needs at least two members: a lone element is trivially
/// identical to itself.
pub fn pattern_confidence(count: usize, similarity: f64) -> f64 {
    let count_term = count.min(COUNT_SATURATION) as f64 / COUNT_SATURATION as f64;
    let mut confidence = COUNT_WEIGHT * count_term + SIMILARITY_WEIGHT * similarity;
    if count >= 2 && similarity >= IDENTICAL_STRUCTURE {
        confidence += IDENTICAL_BONUS;
    }
    confidence.clamp(0.0, 1.0)
}

fn is_single_occurrence_section(name: &str) -> bool {
    normalize_selector(name)
        .split(|c: char| c == '-' || c == '_')
        .any(|segment| SINGLE_OCCURRENCE_SECTIONS.contains(&segment))
}
