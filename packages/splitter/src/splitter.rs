//! Component boundary decisions.
//!
//! One decision per element, in document order: either the element is
//! *extracted* into a [`ComponentDefinition`] (and its descendants are
//! considered as nested components) or it is passed through and its children
//! are considered at the same nesting depth.

use crate::component::{BemType, ComponentDefinition, ComponentMetadata, ComponentRole, ComponentType};
use crate::error::{SplitError, SplitterResult};
use crate::instances::link_pattern_instances;
use crate::naming::{NameContext, NameGenerator};
use crate::options::SplitOptions;
use crate::role::{infer_role, suggest_props};
use crate::tree::ComponentTree;
use mockup_parser::{outer_html, NodeId, ParseOptions, ParsedDocument, ParsedNode, Parser, SelectorMatches};
use mockup_patterns::{PatternDetectionResult, PatternDetector};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

pub const SEMANTIC_CONFIDENCE: f64 = 0.95;
pub const CUSTOM_SELECTOR_CONFIDENCE: f64 = 0.9;
pub const BEM_BLOCK_CONFIDENCE: f64 = 0.7;
pub const CONTAINER_CONFIDENCE: f64 = 0.65;
pub const COMPLEX_CONFIDENCE: f64 = 0.6;

/// Text-to-markup ratio at or above which an element counts as mostly text
const MAX_TEXT_RATIO: f64 = 0.8;

const CONTAINER_KEYWORDS: &[&str] = &[
    "container", "wrapper", "section", "panel", "grid", "layout", "content", "box", "group",
    "inner",
];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitMetadata {
    pub total_components: usize,
    pub pattern_count: usize,
    /// Deepest component nesting level
    pub max_depth: usize,
    pub node_count: usize,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitResult {
    pub components: Vec<ComponentDefinition>,
    pub patterns: Vec<PatternDetectionResult>,
    pub tree: ComponentTree,
    pub metadata: SplitMetadata,
}

impl SplitResult {
    pub fn get(&self, id: &str) -> Option<&ComponentDefinition> {
        self.components.iter().find(|c| c.id == id)
    }

    pub fn by_node(&self, node: NodeId) -> Option<&ComponentDefinition> {
        self.components.iter().find(|c| c.node() == node)
    }

    pub fn by_name(&self, name: &str) -> Option<&ComponentDefinition> {
        self.components.iter().find(|c| c.name == name)
    }

    /// Component this one renders through, or the component itself when it
    /// keeps its own module
    pub fn representative<'a>(&'a self, component: &'a ComponentDefinition) -> &'a ComponentDefinition {
        component
            .instance_of
            .as_ref()
            .and_then(|instance| self.get(&instance.component))
            .unwrap_or(component)
    }

    /// Whether the component collapses onto an earlier instance of its pattern
    pub fn is_repeat(&self, component: &ComponentDefinition) -> bool {
        component.instance_of.is_some()
    }
}

/// Outcome of classifying one element
#[derive(Debug, Clone)]
struct Extraction {
    component_type: ComponentType,
    confidence: f64,
    reason: String,
    pattern: Option<(String, usize)>,
}

#[derive(Debug, Clone, Copy)]
struct Frame {
    node: NodeId,
    parent: Option<usize>,
    depth: usize,
}

/// Read-only inputs shared by every decision of one run
struct SplitContext<'a> {
    doc: &'a ParsedDocument,
    /// Custom component selectors with their recorded matches
    selectors: Vec<(String, &'a SelectorMatches)>,
    patterns: &'a [PatternDetectionResult],
    /// element → (pattern index, instance index)
    membership: HashMap<NodeId, (usize, usize)>,
    bem_blocks: HashSet<String>,
}

/// Decides which elements become standalone components.
///
/// All per-run state (ids, visited set, name registry) is cleared at the
/// start of every [`ComponentSplitter::split`] call, so one instance can be
/// reused across unrelated documents.
#[derive(Debug, Default)]
pub struct ComponentSplitter {
    options: SplitOptions,
    names: NameGenerator,
    extracted: HashMap<NodeId, String>,
    visited: HashSet<NodeId>,
    next_id: usize,
    warnings: Vec<String>,
}

impl ComponentSplitter {
    pub fn new(options: SplitOptions) -> Self {
        Self {
            names: NameGenerator::new(options.naming.clone()),
            options,
            ..Default::default()
        }
    }

    pub fn options(&self) -> &SplitOptions {
        &self.options
    }

    fn reset(&mut self) {
        self.names.reset();
        self.extracted.clear();
        self.visited.clear();
        self.next_id = 0;
        self.warnings.clear();
    }

    /// Parse `html` and split it
    pub fn split(&mut self, html: &str) -> SplitResult {
        let doc = Parser::new().parse(html, &self.options.parse_options(&ParseOptions::default()));
        self.split_document(&doc)
    }

    /// Null-aware entry point
    pub fn split_input(&mut self, html: Option<&str>) -> SplitterResult<SplitResult> {
        let html = html.ok_or_else(|| SplitError::from(mockup_parser::ParseError::missing_input()))?;
        Ok(self.split(html))
    }

    pub fn split_document(&mut self, doc: &ParsedDocument) -> SplitResult {
        self.reset();

        let patterns = PatternDetector::new(self.options.patterns.clone()).detect_in_document(doc);
        let mut components = {
            let context = SplitContext {
                doc,
                selectors: self.custom_selectors(doc),
                membership: pattern_membership(&patterns),
                patterns: &patterns,
                bem_blocks: bem_blocks(doc),
            };
            self.walk(&context)
        };
        self.assign_roles_and_props(doc, &mut components);
        link_pattern_instances(doc, &mut components);

        let (tree, tree_warnings) = ComponentTree::build(&components);
        self.warnings.extend(tree_warnings);

        let metadata = SplitMetadata {
            total_components: components.len(),
            pattern_count: patterns.len(),
            max_depth: components.iter().map(|c| c.depth).max().unwrap_or(0),
            node_count: doc.metadata.node_count,
            warnings: self.warnings.clone(),
        };

        tracing::debug!(
            components = metadata.total_components,
            patterns = metadata.pattern_count,
            "split document"
        );

        SplitResult {
            components,
            patterns,
            tree,
            metadata,
        }
    }

    fn custom_selectors<'a>(&mut self, doc: &'a ParsedDocument) -> Vec<(String, &'a SelectorMatches)> {
        let mut selectors = Vec::new();
        for source in &self.options.custom_component_selectors {
            match doc.selector(source) {
                Some(matches) if matches.is_valid() => selectors.push((source.clone(), matches)),
                Some(matches) => self.warnings.push(format!(
                    "Ignoring custom selector: {}",
                    matches.error.as_deref().unwrap_or(source)
                )),
                None => self.warnings.push(format!(
                    "Ignoring custom selector '{}': not evaluated when the document was parsed",
                    source
                )),
            }
        }
        selectors
    }

    fn walk(&mut self, context: &SplitContext<'_>) -> Vec<ComponentDefinition> {
        let doc = context.doc;
        let mut components: Vec<ComponentDefinition> = Vec::new();
        let mut stack = vec![Frame {
            node: doc.root,
            parent: None,
            depth: 0,
        }];

        while let Some(frame) = stack.pop() {
            if !self.visited.insert(frame.node) {
                continue;
            }
            let node = doc.node(frame.node);

            let mut next = frame;
            if node.is_element() && frame.depth < self.options.max_component_depth {
                if let Some(extraction) = self.classify(context, node) {
                    let index = self.extract(context, node, extraction, &mut components, frame);
                    next.parent = Some(index);
                    next.depth = frame.depth + 1;
                }
            }

            for child in node.children.iter().rev() {
                if doc.node(*child).is_element() {
                    stack.push(Frame {
                        node: *child,
                        ..next
                    });
                }
            }
        }

        components
    }

    /// Extraction rules in precedence order
    fn classify(&self, context: &SplitContext<'_>, node: &ParsedNode) -> Option<Extraction> {
        let tag = node.tag();

        if let Some(component_type) = ComponentType::from_semantic_tag(tag) {
            return Some(Extraction {
                component_type,
                confidence: SEMANTIC_CONFIDENCE,
                reason: format!("semantic <{}> element", tag),
                pattern: None,
            });
        }

        if let Some((selector, _)) = context.selectors.iter().find(|(_, matches)| matches.contains(node.id)) {
            return Some(Extraction {
                component_type: ComponentType::Custom,
                confidence: CUSTOM_SELECTOR_CONFIDENCE,
                reason: format!("matches custom selector {}", selector),
                pattern: None,
            });
        }

        if let Some((pattern_index, instance)) = context.membership.get(&node.id) {
            let pattern = &context.patterns[*pattern_index];
            return Some(Extraction {
                component_type: ComponentType::Pattern,
                confidence: pattern.confidence,
                reason: format!(
                    "instance {} of repeating pattern {} ({} occurrences)",
                    instance + 1,
                    pattern.selector,
                    pattern.count
                ),
                pattern: Some((pattern.pattern.clone(), *instance)),
            });
        }

        let element_children = context.doc.element_children(node.id).count();
        let classes = node.classes();
        if element_children >= self.options.min_element_count
            && !classes.is_empty()
            && text_ratio(context.doc, node) < MAX_TEXT_RATIO
        {
            if let Some(block) = classes.iter().find(|c| context.bem_blocks.contains(**c)) {
                return Some(Extraction {
                    component_type: ComponentType::Block,
                    confidence: BEM_BLOCK_CONFIDENCE,
                    reason: format!("BEM block .{}", block),
                    pattern: None,
                });
            }
            if let Some(class) = classes
                .iter()
                .find(|c| CONTAINER_KEYWORDS.iter().any(|k| c.contains(k)))
            {
                return Some(Extraction {
                    component_type: ComponentType::Container,
                    confidence: CONTAINER_CONFIDENCE,
                    reason: format!("container class .{}", class),
                    pattern: None,
                });
            }
        }

        let height = context.doc.element_height(node.id);
        if element_children >= 2 && height >= 2 {
            return Some(Extraction {
                component_type: ComponentType::Complex,
                confidence: COMPLEX_CONFIDENCE,
                reason: format!(
                    "complex structure ({} children, {} levels)",
                    element_children, height
                ),
                pattern: None,
            });
        }

        None
    }

    fn extract(
        &mut self,
        context: &SplitContext<'_>,
        node: &ParsedNode,
        extraction: Extraction,
        components: &mut Vec<ComponentDefinition>,
        frame: Frame,
    ) -> usize {
        let doc = context.doc;
        let id = format!("component-{}", self.next_id);
        self.next_id += 1;

        let parent_name = frame.parent.map(|index| components[index].name.clone());
        let section = doc.sections.iter().find(|section| section.node == node.id);
        let name = self.names.generate_name(
            &NameContext::new(doc, node)
                .with_parent(parent_name.as_deref())
                .with_section(section),
        );

        let classes = node.classes();
        let bem_type = if extraction.component_type == ComponentType::Block {
            Some(BemType::Block)
        } else {
            BemType::from_classes(&classes)
        };
        let (pattern_id, pattern_instance) = match extraction.pattern {
            Some((pattern, instance)) => (Some(pattern), Some(instance)),
            None => (None, None),
        };

        tracing::trace!(%id, %name, reason = %extraction.reason, "extracted component");

        let definition = ComponentDefinition {
            id: id.clone(),
            name,
            component_type: extraction.component_type,
            html: outer_html(doc, node.id),
            depth: frame.depth,
            classes: classes.iter().map(|c| c.to_string()).collect(),
            bem_type,
            role: ComponentRole::Unknown,
            pattern_id,
            instance_of: None,
            suggested_props: Vec::new(),
            metadata: ComponentMetadata {
                node_id: node.id,
                tag_name: node.tag().to_string(),
                confidence: extraction.confidence,
                reason: extraction.reason,
                element_count: doc.element_count(node.id),
                text_length: doc.text_content(node.id).trim().chars().count(),
                pattern_instance,
            },
            children: Vec::new(),
            parent_id: frame.parent.map(|index| components[index].id.clone()),
        };

        if let Some(parent) = frame.parent {
            components[parent].children.push(id.clone());
        }
        self.extracted.insert(node.id, id);
        components.push(definition);
        components.len() - 1
    }

    /// Roles and props only look at nodes that no nested component owns
    fn assign_roles_and_props(&self, doc: &ParsedDocument, components: &mut [ComponentDefinition]) {
        let mut owner: HashMap<NodeId, usize> = HashMap::new();
        // components are in document order, so nested ones overwrite parents
        for (index, component) in components.iter().enumerate() {
            for id in doc.subtree(component.node()) {
                owner.insert(id, index);
            }
        }

        for (index, component) in components.iter_mut().enumerate() {
            let node = doc.node(component.node());
            let owned: Vec<NodeId> = doc
                .subtree(node.id)
                .into_iter()
                .filter(|id| owner.get(id) == Some(&index))
                .collect();
            component.role = infer_role(doc, node, &owned);
            component.suggested_props =
                suggest_props(doc, node, &owned, component.role, !component.children.is_empty());
        }
    }

    /// Component id extracted for `node` during the last run
    pub fn component_for(&self, node: NodeId) -> Option<&str> {
        self.extracted.get(&node).map(|id| id.as_str())
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }
}

fn pattern_membership(patterns: &[PatternDetectionResult]) -> HashMap<NodeId, (usize, usize)> {
    let mut membership = HashMap::new();
    for (pattern_index, pattern) in patterns.iter().enumerate() {
        for (instance, id) in pattern.elements.iter().enumerate() {
            membership.entry(*id).or_insert((pattern_index, instance));
        }
    }
    membership
}

/// Every `block` that appears as `block__element` somewhere in the document
fn bem_blocks(doc: &ParsedDocument) -> HashSet<String> {
    doc.elements()
        .flat_map(|node| node.classes())
        .filter_map(|class| class.split_once("__").map(|(block, _)| block.to_string()))
        .filter(|block| !block.is_empty())
        .collect()
}

fn text_ratio(doc: &ParsedDocument, node: &ParsedNode) -> f64 {
    let markup = outer_html(doc, node.id).len();
    if markup == 0 {
        return 0.0;
    }
    doc.text_content(node.id).trim().len() as f64 / markup as f64
}
