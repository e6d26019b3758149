//! Semantic analysis: tags structurally meaningful regions of a parsed
//! document (header, navigation, cards, hero, ...) with a confidence score.

use crate::ast::{NodeId, ParsedDocument, ParsedNode};
use crate::selector::SelectorMatches;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SectionType {
    Header,
    Nav,
    Main,
    Article,
    Aside,
    Footer,
    Section,
    Figure,
    Form,
    Table,
    List,
    Card,
    Hero,
    Custom(String),
}

impl SectionType {
    pub fn as_str(&self) -> &str {
        match self {
            SectionType::Header => "header",
            SectionType::Nav => "nav",
            SectionType::Main => "main",
            SectionType::Article => "article",
            SectionType::Aside => "aside",
            SectionType::Footer => "footer",
            SectionType::Section => "section",
            SectionType::Figure => "figure",
            SectionType::Form => "form",
            SectionType::Table => "table",
            SectionType::List => "list",
            SectionType::Card => "card",
            SectionType::Hero => "hero",
            SectionType::Custom(name) => name,
        }
    }

    /// Section type for a semantic tag, if the tag is one
    pub fn from_tag(tag: &str) -> Option<Self> {
        Some(match tag {
            "header" => SectionType::Header,
            "nav" => SectionType::Nav,
            "main" => SectionType::Main,
            "article" => SectionType::Article,
            "aside" => SectionType::Aside,
            "footer" => SectionType::Footer,
            "section" => SectionType::Section,
            "figure" => SectionType::Figure,
            "form" => SectionType::Form,
            "table" => SectionType::Table,
            "ul" | "ol" | "dl" => SectionType::List,
            _ => return None,
        })
    }

    /// Default component name for sections of this type
    pub fn component_name(&self) -> String {
        match self {
            SectionType::Header => "Header".into(),
            SectionType::Nav => "Navigation".into(),
            SectionType::Main => "MainContent".into(),
            SectionType::Article => "Article".into(),
            SectionType::Aside => "Sidebar".into(),
            SectionType::Footer => "Footer".into(),
            SectionType::Section => "Section".into(),
            SectionType::Figure => "Figure".into(),
            SectionType::Form => "Form".into(),
            SectionType::Table => "Table".into(),
            SectionType::List => "List".into(),
            SectionType::Card => "Card".into(),
            SectionType::Hero => "Hero".into(),
            SectionType::Custom(name) => name
                .split(|c: char| !c.is_ascii_alphanumeric())
                .filter(|part| !part.is_empty())
                .map(|part| {
                    let mut chars = part.chars();
                    match chars.next() {
                        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                        None => String::new(),
                    }
                })
                .collect(),
        }
    }
}

impl From<String> for SectionType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "header" => SectionType::Header,
            "nav" => SectionType::Nav,
            "main" => SectionType::Main,
            "article" => SectionType::Article,
            "aside" => SectionType::Aside,
            "footer" => SectionType::Footer,
            "section" => SectionType::Section,
            "figure" => SectionType::Figure,
            "form" => SectionType::Form,
            "table" => SectionType::Table,
            "list" => SectionType::List,
            "card" => SectionType::Card,
            "hero" => SectionType::Hero,
            _ => SectionType::Custom(value),
        }
    }
}

impl From<SectionType> for String {
    fn from(value: SectionType) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for SectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Caller-supplied classification rule. Checked before any built-in rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SemanticRule {
    pub selector: String,
    #[serde(rename = "type")]
    pub section_type: SectionType,
    #[serde(default)]
    pub component_name: Option<String>,
    #[serde(default = "default_rule_confidence")]
    pub confidence: f64,
}

fn default_rule_confidence() -> f64 {
    0.95
}

impl SemanticRule {
    pub fn new(selector: impl Into<String>, section_type: SectionType) -> Self {
        Self {
            selector: selector.into(),
            section_type,
            component_name: None,
            confidence: default_rule_confidence(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SemanticSection {
    #[serde(rename = "type")]
    pub section_type: SectionType,
    /// Root node of the section
    pub node: NodeId,
    pub component_name: String,
    /// Every node of the section subtree, root first
    pub nodes: Vec<NodeId>,
    pub confidence: f64,
    pub reasoning: String,
}

struct ClassPattern {
    section_type: SectionType,
    tags: &'static [&'static str],
    classes: &'static [&'static str],
}

const TAG_IN_PATTERN_SCORE: f64 = 0.9;
const EXACT_CLASS_SCORE: f64 = 0.4;
const PARTIAL_CLASS_SCORE: f64 = 0.2;
const MIN_CLASS_CONFIDENCE: f64 = 0.5;

fn class_patterns() -> [ClassPattern; 2] {
    [
        ClassPattern {
            section_type: SectionType::Hero,
            tags: &["section", "div", "header"],
            classes: &["hero", "jumbotron", "banner", "masthead", "splash"],
        },
        ClassPattern {
            section_type: SectionType::Card,
            tags: &["article", "div", "li", "section"],
            classes: &["card", "tile", "panel", "product", "post"],
        },
    ]
}

struct Classification {
    section_type: SectionType,
    component_name: Option<String>,
    confidence: f64,
    reasoning: String,
}

#[derive(Debug, Default)]
pub struct SemanticAnalyzer {
    warnings: Vec<String>,
}

impl SemanticAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Warnings from the last `analyze` call (e.g. invalid rule selectors)
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Classify every element of the document and return the outermost
    /// sections in document order. When sections overlap, the shallower one
    /// wins.
    ///
    /// Custom rules match through the selector results recorded on the
    /// document, so `doc` must have been parsed with the same rules.
    pub fn analyze(
        &mut self,
        doc: &ParsedDocument,
        custom_rules: &[SemanticRule],
    ) -> Vec<SemanticSection> {
        self.warnings.clear();

        let rules: Vec<(&SelectorMatches, &SemanticRule)> = custom_rules
            .iter()
            .filter_map(|rule| match doc.selector(&rule.selector) {
                Some(matches) if matches.is_valid() => Some((matches, rule)),
                Some(matches) => {
                    let error = matches.error.clone().unwrap_or_default();
                    tracing::warn!("skipping semantic rule: {}", error);
                    self.warnings.push(error);
                    None
                }
                None => {
                    self.warnings.push(format!(
                        "Semantic rule '{}' skipped: selector was not evaluated for this document",
                        rule.selector
                    ));
                    None
                }
            })
            .collect();

        let mut candidates: Vec<(usize, SemanticSection)> = doc
            .elements()
            .filter_map(|node| {
                classify(node, &rules).map(|c| {
                    let component_name = c
                        .component_name
                        .unwrap_or_else(|| c.section_type.component_name());
                    (
                        node.depth,
                        SemanticSection {
                            section_type: c.section_type,
                            node: node.id,
                            component_name,
                            nodes: doc.subtree(node.id),
                            confidence: c.confidence,
                            reasoning: c.reasoning,
                        },
                    )
                })
            })
            .collect();

        candidates.sort_by(|(depth_a, a), (depth_b, b)| {
            depth_a
                .cmp(depth_b)
                .then(b.confidence.total_cmp(&a.confidence))
                .then(a.node.cmp(&b.node))
        });

        let mut claimed: HashSet<NodeId> = HashSet::new();
        let mut sections = Vec::new();
        for (_, section) in candidates {
            if claimed.contains(&section.node) {
                continue;
            }
            claimed.extend(section.nodes.iter().copied());
            sections.push(section);
        }

        sections.sort_by_key(|section| section.node);
        sections
    }
}

fn classify(node: &ParsedNode, rules: &[(&SelectorMatches, &SemanticRule)]) -> Option<Classification> {
    if let Some((_, rule)) = rules.iter().find(|(matches, _)| matches.contains(node.id)) {
        return Some(Classification {
            section_type: rule.section_type.clone(),
            component_name: rule.component_name.clone(),
            confidence: rule.confidence.clamp(0.0, 1.0),
            reasoning: format!("custom rule '{}' matched", rule.selector),
        });
    }

    let best = class_patterns()
        .into_iter()
        .filter_map(|pattern| class_score(node, &pattern).map(|(score, class)| (pattern, score, class)))
        .fold(None::<(ClassPattern, f64, String)>, |best, candidate| match best {
            Some(current) if current.1 >= candidate.1 => Some(current),
            _ => Some(candidate),
        });

    if let Some((pattern, score, class)) = best {
        if score >= MIN_CLASS_CONFIDENCE {
            return Some(Classification {
                reasoning: format!(
                    "class '{}' matches {} vocabulary (score {:.2})",
                    class, pattern.section_type, score
                ),
                section_type: pattern.section_type,
                component_name: None,
                confidence: score,
            });
        }
    }

    SectionType::from_tag(node.tag()).map(|section_type| Classification {
        section_type,
        component_name: None,
        confidence: 1.0,
        reasoning: format!("<{}> element", node.tag()),
    })
}

/// Weighted class score of a node against a vocabulary, with the class that
/// produced it. `None` when no class overlaps the vocabulary.
fn class_score(node: &ParsedNode, pattern: &ClassPattern) -> Option<(f64, String)> {
    let classes = node.classes();

    let exact = classes
        .iter()
        .find(|class| pattern.classes.contains(&class.to_ascii_lowercase().as_str()));

    let partial = classes.iter().find(|class| {
        let lower = class.to_ascii_lowercase();
        !lower.contains("__")
            && lower
                .split(['-', '_'])
                .any(|segment| pattern.classes.contains(&segment))
    });

    let (class_score, class) = match (exact, partial) {
        (Some(class), _) => (EXACT_CLASS_SCORE, *class),
        (None, Some(class)) => (PARTIAL_CLASS_SCORE, *class),
        (None, None) => return None,
    };

    let tag_score = if pattern.tags.contains(&node.tag()) {
        TAG_IN_PATTERN_SCORE
    } else {
        0.0
    };

    Some(((tag_score + class_score).min(1.0), class.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{ParseOptions, Parser};

    fn analyze(html: &str, rules: &[SemanticRule]) -> (ParsedDocument, Vec<SemanticSection>) {
        let options = ParseOptions {
            semantic_rules: rules.to_vec(),
            ..Default::default()
        };
        let doc = Parser::new().parse_tree(html, &options);
        let sections = SemanticAnalyzer::new().analyze(&doc, rules);
        (doc, sections)
    }

    #[test]
    fn test_direct_tag_match() {
        let (_, sections) = analyze("<div><header>h</header><footer>f</footer></div>", &[]);
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].section_type, SectionType::Header);
        assert_eq!(sections[0].confidence, 1.0);
        assert_eq!(sections[0].component_name, "Header");
        assert_eq!(sections[1].section_type, SectionType::Footer);
    }

    #[test]
    fn test_class_vocabulary_scores() {
        let (_, sections) = analyze(
            "<div><div class=\"card\">a</div><span class=\"hero-text\">b</span><section class=\"hero-banner\">c</section></div>",
            &[],
        );
        assert_eq!(sections.len(), 2);

        assert_eq!(sections[0].section_type, SectionType::Card);
        assert_eq!(sections[0].confidence, 1.0);

        // span.hero-text only scores 0.2 and is discarded; section.hero-banner
        // has the tag bonus and a partial overlap
        assert_eq!(sections[1].section_type, SectionType::Hero);
        assert!((sections[1].confidence - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_bem_elements_are_not_cards() {
        let (_, sections) = analyze("<div><div class=\"card__title\">x</div></div>", &[]);
        assert!(sections.is_empty());
    }

    #[test]
    fn test_custom_rules_take_precedence() {
        let rule = SemanticRule {
            selector: "header.promo".into(),
            section_type: SectionType::Custom("promo-strip".into()),
            component_name: None,
            confidence: 0.8,
        };
        let (_, sections) = analyze("<header class=\"promo\"><p>x</p></header>", &[rule]);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].section_type.as_str(), "promo-strip");
        assert_eq!(sections[0].component_name, "PromoStrip");
        assert_eq!(sections[0].confidence, 0.8);
    }

    #[test]
    fn test_rule_selectors_with_combinators_and_quotes() {
        let rules = [
            SemanticRule::new("div.plans > span.plan", SectionType::Card),
            SemanticRule::new(r#"[data-role="promo,strip"]"#, SectionType::Custom("promo".into())),
        ];
        let (_, sections) = analyze(
            r#"<div><div class="plans"><span class="plan">a</span></div><div data-role="promo,strip">b</div></div>"#,
            &rules,
        );
        let types: Vec<&str> = sections.iter().map(|s| s.section_type.as_str()).collect();
        assert_eq!(types, vec!["card", "promo"]);
    }

    #[test]
    fn test_invalid_rule_becomes_warning() {
        let rules = [SemanticRule::new("nav >", SectionType::Nav)];
        let options = ParseOptions {
            semantic_rules: rules.to_vec(),
            ..Default::default()
        };
        let doc = Parser::new().parse_tree("<nav>x</nav>", &options);
        let mut analyzer = SemanticAnalyzer::new();
        let sections = analyzer.analyze(&doc, &rules);
        assert_eq!(sections.len(), 1);
        assert_eq!(analyzer.warnings().len(), 1);
        assert!(analyzer.warnings()[0].contains("nav >"));

        let unevaluated = Parser::new().parse_tree("<nav>x</nav>", &ParseOptions::default());
        analyzer.analyze(&unevaluated, &[SemanticRule::new("nav", SectionType::Nav)]);
        assert_eq!(analyzer.warnings().len(), 1);
        assert!(analyzer.warnings()[0].contains("not evaluated"));
    }

    #[test]
    fn test_parents_win_over_children() {
        let (doc, sections) = analyze(
            "<div><header><nav><ul><li>a</li></ul></nav></header><main><article>x</article></main></div>",
            &[],
        );
        let types: Vec<&str> = sections.iter().map(|s| s.section_type.as_str()).collect();
        assert_eq!(types, vec!["header", "main"]);

        for a in &sections {
            for b in &sections {
                if a.node != b.node {
                    let a_set: HashSet<_> = a.nodes.iter().collect();
                    let b_set: HashSet<_> = b.nodes.iter().collect();
                    assert!(!(a_set.is_subset(&b_set) && a_set.len() < b_set.len()));
                }
            }
        }

        assert!(sections.windows(2).all(|w| w[0].node < w[1].node));
        assert_eq!(doc.node(sections[0].node).tag(), "header");
    }

    #[test]
    fn test_section_type_serde() {
        let json = serde_json::to_string(&SectionType::Nav).unwrap();
        assert_eq!(json, "\"nav\"");
        let custom: SectionType = serde_json::from_str("\"pricing\"").unwrap();
        assert_eq!(custom, SectionType::Custom("pricing".into()));
    }
}
