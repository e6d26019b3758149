//! HTML → arena parser.
//!
//! Uses scraper's html5ever fragment parser (which repairs malformed markup)
//! and converts its tree into a [`ParsedDocument`] once, up front.

use crate::ast::{DocumentMetadata, NodeId, NodeKind, ParsedDocument, ParsedNode};
use crate::attributes::{AttributeExtractor, ParsedAttributes};
use crate::error::{ParseError, ParseResult};
use crate::id_generator::IDGenerator;
use crate::selector;
use crate::semantics::{SemanticAnalyzer, SemanticRule};
use indexmap::IndexMap;
use scraper::{Html, Node};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

/// Stage reported to progress callbacks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParseStage {
    Parsing,
    Analyzing,
    Complete,
}

/// Best-effort progress notification. Returned errors (and panics) are
/// logged and otherwise ignored.
pub type ProgressCallback = Arc<dyn Fn(ParseStage) -> Result<(), String> + Send + Sync>;

#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParseOptions {
    /// Nodes deeper than this are dropped together with their subtree
    pub max_depth: Option<usize>,
    /// Keep whitespace-only text nodes
    pub preserve_whitespace: bool,
    pub include_comments: bool,
    /// Custom classification rules forwarded to the semantic analyzer
    pub semantic_rules: Vec<SemanticRule>,
    /// Extra CSS selectors to match while parsing, recorded on
    /// [`ParsedDocument::selectors`]. Semantic rule selectors are added
    /// automatically.
    pub selectors: Vec<String>,
    /// Run semantic analysis after building the tree
    pub analyze: bool,
    #[serde(skip)]
    pub on_progress: Option<ProgressCallback>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_depth: None,
            preserve_whitespace: false,
            include_comments: false,
            semantic_rules: Vec::new(),
            selectors: Vec::new(),
            analyze: true,
            on_progress: None,
        }
    }
}

impl fmt::Debug for ParseOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParseOptions")
            .field("max_depth", &self.max_depth)
            .field("preserve_whitespace", &self.preserve_whitespace)
            .field("include_comments", &self.include_comments)
            .field("semantic_rules", &self.semantic_rules)
            .field("selectors", &self.selectors)
            .field("analyze", &self.analyze)
            .field("on_progress", &self.on_progress.as_ref().map(|_| "<callback>"))
            .finish()
    }
}

/// Reusable HTML parser. All per-document state is reset on every call.
#[derive(Debug, Default)]
pub struct Parser {
    ids: IDGenerator,
    extractor: AttributeExtractor,
    warnings: Vec<String>,
}

impl Parser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse HTML into a document, running semantic analysis unless
    /// `options.analyze` is off. Empty input yields an empty fragment.
    pub fn parse(&mut self, html: &str, options: &ParseOptions) -> ParsedDocument {
        self.ids.reset();
        self.warnings.clear();

        notify(options, ParseStage::Parsing);
        let mut doc = if html.trim().is_empty() {
            tracing::debug!("empty input, returning empty document");
            self.empty_document()
        } else {
            self.build_document(html, options)
        };

        if options.analyze && !doc.metadata.empty {
            notify(options, ParseStage::Analyzing);
            let mut analyzer = SemanticAnalyzer::new();
            doc.sections = analyzer.analyze(&doc, &options.semantic_rules);
            self.warnings.extend(analyzer.warnings().iter().cloned());
        }

        notify(options, ParseStage::Complete);
        tracing::debug!(
            nodes = doc.metadata.node_count,
            sections = doc.sections.len(),
            "parsed document"
        );
        doc
    }

    /// Null-aware entry point: missing input is the only parse failure
    pub fn parse_input(
        &mut self,
        html: Option<&str>,
        options: &ParseOptions,
    ) -> ParseResult<ParsedDocument> {
        match html {
            Some(html) => Ok(self.parse(html, options)),
            None => Err(ParseError::missing_input()),
        }
    }

    /// Build the node tree without semantic analysis
    pub fn parse_tree(&mut self, html: &str, options: &ParseOptions) -> ParsedDocument {
        let options = ParseOptions {
            analyze: false,
            ..options.clone()
        };
        self.parse(html, &options)
    }

    /// Warnings collected during the last parse (invalid custom rules, ...)
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    fn empty_document(&mut self) -> ParsedDocument {
        let root = self.ids.new_id();
        ParsedDocument {
            root,
            nodes: vec![fragment_node(root)],
            metadata: DocumentMetadata {
                node_count: 1,
                empty: true,
                ..Default::default()
            },
            sections: Vec::new(),
            selectors: IndexMap::new(),
        }
    }

    fn build_document(&mut self, html: &str, options: &ParseOptions) -> ParsedDocument {
        let fragment = Html::parse_fragment(html);
        let container = fragment.root_element();

        let top_level: Vec<_> = container
            .children()
            .filter(|child| is_significant(child.value(), options))
            .collect();

        let mut nodes: Vec<ParsedNode> = Vec::new();
        let mut stack = Vec::new();

        // whitespace between top-level nodes does not count against a
        // single element root
        let counted: Vec<_> = top_level
            .iter()
            .filter(|child| !matches!(child.value(), Node::Text(text) if text.text.trim().is_empty()))
            .copied()
            .collect();
        let single_element_root = counted.len() == 1 && matches!(counted[0].value(), Node::Element(_));

        let mut source_ids = HashMap::new();

        if single_element_root {
            stack.push((counted[0], None, 0usize));
        } else {
            let root = self.ids.new_id();
            nodes.push(fragment_node(root));
            for child in top_level.iter().rev() {
                stack.push((*child, Some(root), 1));
            }
        }

        while let Some((handle, parent, depth)) = stack.pop() {
            if options.max_depth.is_some_and(|max| depth > max) {
                tracing::trace!(depth, "dropping node beyond max depth");
                continue;
            }

            let (kind, tag_name, attributes, text) = match handle.value() {
                Node::Element(element) => {
                    let tag = element.name().to_ascii_lowercase();
                    let attributes = self.extractor.extract(&tag, element.attrs());
                    (NodeKind::Element, Some(tag), attributes, None)
                }
                Node::Text(text) => {
                    let content = text.text.to_string();
                    if content.trim().is_empty() && !options.preserve_whitespace {
                        continue;
                    }
                    (NodeKind::Text, None, ParsedAttributes::default(), Some(content))
                }
                Node::Comment(comment) if options.include_comments => (
                    NodeKind::Comment,
                    None,
                    ParsedAttributes::default(),
                    Some(comment.comment.to_string()),
                ),
                _ => continue,
            };

            let id = self.ids.new_id();
            if let Some(parent_id) = parent {
                nodes[NodeId::index(parent_id)].children.push(id);
            }
            if kind == NodeKind::Element {
                source_ids.insert(handle.id(), id);
            }

            nodes.push(ParsedNode {
                id,
                kind,
                tag_name,
                attributes,
                text,
                children: Vec::new(),
                depth,
                parent,
            });

            if kind == NodeKind::Element {
                for child in handle.children().collect::<Vec<_>>().into_iter().rev() {
                    stack.push((child, Some(id), depth + 1));
                }
            }
        }

        let sources = options
            .selectors
            .iter()
            .chain(options.semantic_rules.iter().map(|rule| &rule.selector))
            .map(String::as_str);
        let selectors = selector::evaluate(&fragment, sources, |element| {
            source_ids.get(&element.id()).copied()
        });

        let root = nodes.first().map(|node| node.id).unwrap_or(NodeId(0));
        let mut doc = ParsedDocument {
            root,
            metadata: DocumentMetadata::default(),
            nodes,
            sections: Vec::new(),
            selectors,
        };
        doc.metadata = collect_metadata(&doc);
        doc
    }
}

fn fragment_node(id: NodeId) -> ParsedNode {
    ParsedNode {
        id,
        kind: NodeKind::Fragment,
        tag_name: None,
        attributes: ParsedAttributes::default(),
        text: None,
        children: Vec::new(),
        depth: 0,
        parent: None,
    }
}

fn is_significant(node: &Node, options: &ParseOptions) -> bool {
    match node {
        Node::Element(_) => true,
        Node::Text(text) => options.preserve_whitespace || !text.text.trim().is_empty(),
        Node::Comment(_) => options.include_comments,
        _ => false,
    }
}

fn collect_metadata(doc: &ParsedDocument) -> DocumentMetadata {
    let mut metadata = DocumentMetadata {
        node_count: doc.nodes.len(),
        ..Default::default()
    };

    for node in &doc.nodes {
        match node.kind {
            NodeKind::Element => metadata.element_count += 1,
            NodeKind::Text => metadata.text_count += 1,
            NodeKind::Comment => metadata.comment_count += 1,
            NodeKind::Fragment => {}
        }
        metadata.max_depth = metadata.max_depth.max(node.depth);
        if metadata.title.is_none() && node.tag() == "title" {
            let title = doc.text_content(node.id).trim().to_string();
            if !title.is_empty() {
                metadata.title = Some(title);
            }
        }
    }

    metadata
}

fn notify(options: &ParseOptions, stage: ParseStage) {
    let Some(callback) = &options.on_progress else {
        return;
    };

    match catch_unwind(AssertUnwindSafe(|| callback(stage))) {
        Ok(Ok(())) => {}
        Ok(Err(err)) => tracing::warn!(?stage, "progress callback failed: {}", err),
        Err(_) => tracing::warn!(?stage, "progress callback panicked"),
    }
}

/// Parse HTML with default options
pub fn parse(html: &str) -> ParsedDocument {
    Parser::new().parse(html, &ParseOptions::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_single_element_becomes_root() {
        let doc = parse("<header><h1>Title</h1></header>");
        let root = doc.root_node();
        assert_eq!(root.kind, NodeKind::Element);
        assert_eq!(root.tag(), "header");
        assert_eq!(root.depth, 0);
        assert_eq!(root.id, NodeId(0));
    }

    #[test]
    fn test_multiple_roots_get_fragment() {
        let doc = parse("<div>a</div><div>b</div>");
        let root = doc.root_node();
        assert_eq!(root.kind, NodeKind::Fragment);
        assert_eq!(root.children.len(), 2);
        assert_eq!(doc.node(root.children[0]).depth, 1);
    }

    #[test]
    fn test_mixed_content_gets_fragment() {
        let doc = parse("hello <b>world</b>");
        assert_eq!(doc.root_node().kind, NodeKind::Fragment);
        assert_eq!(doc.root_node().children.len(), 2);
    }

    #[test]
    fn test_empty_input() {
        for input in ["", "   \n\t  "] {
            let doc = parse(input);
            assert!(doc.metadata.empty);
            assert_eq!(doc.nodes.len(), 1);
            assert_eq!(doc.root_node().kind, NodeKind::Fragment);
            assert!(doc.root_node().children.is_empty());
        }
    }

    #[test]
    fn test_missing_input_fails() {
        let result = Parser::new().parse_input(None, &ParseOptions::default());
        assert_eq!(result, Err(ParseError::MissingInput));
    }

    #[test]
    fn test_ids_in_document_order() {
        let doc = parse("<div><p>one</p><p>two</p></div>");
        let tags: Vec<String> = doc
            .nodes
            .iter()
            .map(|n| format!("{}:{}", n.id, n.tag_name.clone().unwrap_or_else(|| "#text".into())))
            .collect();
        assert_eq!(
            tags,
            vec!["node-0:div", "node-1:p", "node-2:#text", "node-3:p", "node-4:#text"]
        );
        for node in &doc.nodes {
            if let Some(parent) = node.parent {
                assert_eq!(node.depth, doc.node(parent).depth + 1);
            }
        }
    }

    #[test]
    fn test_whitespace_handling() {
        let html = "<ul>\n  <li>a</li>\n  <li>b</li>\n</ul>";
        let compact = parse(html);
        assert_eq!(compact.metadata.text_count, 2);

        let options = ParseOptions {
            preserve_whitespace: true,
            ..Default::default()
        };
        let preserved = Parser::new().parse(html, &options);
        assert!(preserved.metadata.text_count > 2);
    }

    #[test]
    fn test_surrounding_whitespace_keeps_single_root() {
        let options = ParseOptions {
            preserve_whitespace: true,
            ..Default::default()
        };
        let doc = Parser::new().parse("\n  <header><h1>Title</h1></header>\n", &options);
        let root = doc.root_node();
        assert_eq!(root.kind, NodeKind::Element);
        assert_eq!(root.tag(), "header");
        assert_eq!(root.id, NodeId(0));
        assert!(doc.nodes.iter().all(|n| n.kind != NodeKind::Fragment));

        let doc = Parser::new().parse("\n<p>a</p> text \n", &options);
        assert_eq!(doc.root_node().kind, NodeKind::Fragment);
    }

    #[test]
    fn test_comments_optional() {
        let html = "<div><!-- note --><span>x</span></div>";
        assert_eq!(parse(html).metadata.comment_count, 0);

        let options = ParseOptions {
            include_comments: true,
            ..Default::default()
        };
        let doc = Parser::new().parse(html, &options);
        assert_eq!(doc.metadata.comment_count, 1);
    }

    #[test]
    fn test_max_depth_drops_nodes() {
        let options = ParseOptions {
            max_depth: Some(1),
            ..Default::default()
        };
        let doc = Parser::new().parse("<div><section><p><b>deep</b></p></section></div>", &options);
        assert!(doc.nodes.iter().all(|n| n.depth <= 1));
        assert_eq!(doc.metadata.node_count, 2);
    }

    #[test]
    fn test_malformed_markup_is_repaired() {
        let doc = parse("<div><p><span>text");
        assert_eq!(doc.root_node().tag(), "div");
        assert!(doc.text_content(doc.root).contains("text"));
    }

    #[test]
    fn test_progress_stages_and_failing_callback() {
        let stages = Arc::new(Mutex::new(Vec::new()));
        let sink = stages.clone();
        let options = ParseOptions {
            on_progress: Some(Arc::new(move |stage| {
                sink.lock().unwrap().push(stage);
                Err("listener went away".to_string())
            })),
            ..Default::default()
        };

        let doc = Parser::new().parse("<main><p>x</p></main>", &options);
        assert_eq!(doc.root_node().tag(), "main");
        assert_eq!(
            *stages.lock().unwrap(),
            vec![ParseStage::Parsing, ParseStage::Analyzing, ParseStage::Complete]
        );
    }

    #[test]
    fn test_options_deserialize_camel_case() {
        let options: ParseOptions =
            serde_json::from_str(r#"{"maxDepth": 4, "preserveWhitespace": true}"#).unwrap();
        assert_eq!(options.max_depth, Some(4));
        assert!(options.preserve_whitespace);
        assert!(options.analyze);
    }
}
