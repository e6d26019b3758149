use crate::ast::{NodeId, NodeKind, ParsedDocument, ParsedNode};
use crate::visitor::{walk, Visitor, Walk};

/// Elements that never have a closing tag
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

pub fn is_void_element(tag: &str) -> bool {
    VOID_ELEMENTS.contains(&tag)
}

/// Serializer renders a parsed subtree back to HTML (`outerHTML`).
///
/// Fragment nodes render only their children. Text is escaped except inside
/// raw-text elements (`script`, `style`).
pub struct Serializer {
    output: String,
    raw_text_depth: usize,
}

impl Serializer {
    pub fn new() -> Self {
        Self {
            output: String::new(),
            raw_text_depth: 0,
        }
    }

    pub fn serialize(mut self, doc: &ParsedDocument, id: NodeId) -> String {
        walk(&mut self, doc, id);
        self.output
    }
}

impl Default for Serializer {
    fn default() -> Self {
        Self::new()
    }
}

impl Visitor for Serializer {
    fn enter_node(&mut self, _doc: &ParsedDocument, node: &ParsedNode) -> Walk {
        match node.kind {
            NodeKind::Fragment => {}
            NodeKind::Text => {
                let text = node.text.as_deref().unwrap_or("");
                if self.raw_text_depth > 0 {
                    self.output.push_str(text);
                } else {
                    self.output.push_str(&escape_text(text));
                }
            }
            NodeKind::Comment => {
                self.output.push_str("<!--");
                self.output.push_str(node.text.as_deref().unwrap_or(""));
                self.output.push_str("-->");
            }
            NodeKind::Element => {
                let tag = node.tag();
                self.output.push('<');
                self.output.push_str(tag);
                let attrs = node.attributes.to_html_string();
                if !attrs.is_empty() {
                    self.output.push(' ');
                    self.output.push_str(&attrs);
                }
                self.output.push('>');
                if node.attributes.has_danger_html {
                    self.raw_text_depth += 1;
                }
            }
        }
        Walk::Continue
    }

    fn exit_node(&mut self, _doc: &ParsedDocument, node: &ParsedNode) {
        if node.kind != NodeKind::Element {
            return;
        }
        if node.attributes.has_danger_html {
            self.raw_text_depth = self.raw_text_depth.saturating_sub(1);
        }
        if !is_void_element(node.tag()) {
            self.output.push_str("</");
            self.output.push_str(node.tag());
            self.output.push('>');
        }
    }
}

/// Render the subtree rooted at `id` as HTML
pub fn outer_html(doc: &ParsedDocument, id: NodeId) -> String {
    Serializer::new().serialize(doc, id)
}

/// Render only the children of `id`
pub fn inner_html(doc: &ParsedDocument, id: NodeId) -> String {
    doc.node(id)
        .children
        .iter()
        .map(|child| outer_html(doc, *child))
        .collect()
}

/// Render the whole document
pub fn serialize(doc: &ParsedDocument) -> String {
    outer_html(doc, doc.root)
}

pub fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
