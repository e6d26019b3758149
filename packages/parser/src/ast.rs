use crate::attributes::ParsedAttributes;
use crate::selector::SelectorMatches;
use crate::semantics::SemanticSection;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a node inside a [`ParsedDocument`] arena.
///
/// Ids are handed out in document order, starting at zero for every parse,
/// and render as `node-0`, `node-1`, ...
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node-{}", self.0)
    }
}

impl Serialize for NodeId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for NodeId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.strip_prefix("node-")
            .and_then(|n| n.parse::<u32>().ok())
            .map(NodeId)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid node id '{}'", raw)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Element,
    Text,
    Comment,
    Fragment,
}

/// A single node of the parsed tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedNode {
    pub id: NodeId,
    pub kind: NodeKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag_name: Option<String>,
    pub attributes: ParsedAttributes,
    /// Text or comment content
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    pub children: Vec<NodeId>,
    pub depth: usize,
    /// Back-reference to the parent, set once during parsing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<NodeId>,
}

impl ParsedNode {
    pub fn is_element(&self) -> bool {
        self.kind == NodeKind::Element
    }

    pub fn is_text(&self) -> bool {
        self.kind == NodeKind::Text
    }

    /// Tag name of an element, empty for every other kind
    pub fn tag(&self) -> &str {
        self.tag_name.as_deref().unwrap_or("")
    }

    pub fn classes(&self) -> Vec<&str> {
        self.attributes.classes()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.attributes.classes().contains(&class)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMetadata {
    pub node_count: usize,
    pub element_count: usize,
    pub text_count: usize,
    pub comment_count: usize,
    pub max_depth: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Set when the input was empty or whitespace only
    pub empty: bool,
}

/// Arena owning every node of one parse
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedDocument {
    pub root: NodeId,
    pub nodes: Vec<ParsedNode>,
    pub metadata: DocumentMetadata,
    pub sections: Vec<SemanticSection>,
    /// Caller-supplied selectors evaluated during the parse
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub selectors: IndexMap<String, SelectorMatches>,
}

impl ParsedDocument {
    pub fn get(&self, id: NodeId) -> Option<&ParsedNode> {
        self.nodes.get(id.index())
    }

    /// Look up a node that is known to belong to this document.
    ///
    /// Ids are only created by the parser, so indexing cannot go out of
    /// bounds for ids taken from the same document.
    pub fn node(&self, id: NodeId) -> &ParsedNode {
        &self.nodes[id.index()]
    }

    /// Matches of a selector requested through `ParseOptions::selectors` or
    /// a semantic rule; `None` when it was not evaluated for this document
    pub fn selector(&self, source: &str) -> Option<&SelectorMatches> {
        self.selectors.get(source)
    }

    pub fn root_node(&self) -> &ParsedNode {
        self.node(self.root)
    }

    /// Mutable access to a node's attributes, used by rewriting passes
    /// (CSS extraction) that keep the tree shape and ids intact.
    pub fn attributes_mut(&mut self, id: NodeId) -> Option<&mut ParsedAttributes> {
        self.nodes.get_mut(id.index()).map(|node| &mut node.attributes)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.metadata.empty
    }

    pub fn children(&self, id: NodeId) -> impl Iterator<Item = &ParsedNode> {
        self.node(id).children.iter().map(move |child| self.node(*child))
    }

    pub fn element_children(&self, id: NodeId) -> impl Iterator<Item = &ParsedNode> {
        self.children(id).filter(|child| child.is_element())
    }

    /// All ids of the subtree rooted at `id`, in document order, root included
    pub fn subtree(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            out.push(current);
            for child in self.node(current).children.iter().rev() {
                stack.push(*child);
            }
        }
        out
    }

    /// Concatenated text of a subtree
    pub fn text_content(&self, id: NodeId) -> String {
        let mut text = String::new();
        for node_id in self.subtree(id) {
            let node = self.node(node_id);
            if node.is_text() {
                if let Some(content) = &node.text {
                    text.push_str(content);
                }
            }
        }
        text
    }

    /// Number of element nodes in a subtree, root included
    pub fn element_count(&self, id: NodeId) -> usize {
        self.subtree(id)
            .into_iter()
            .filter(|node_id| self.node(*node_id).is_element())
            .count()
    }

    /// Height of the element subtree below `id` (0 for an element without
    /// element children)
    pub fn element_height(&self, id: NodeId) -> usize {
        let base = self.node(id).depth;
        self.subtree(id)
            .into_iter()
            .map(|node_id| self.node(node_id))
            .filter(|node| node.is_element())
            .map(|node| node.depth - base)
            .max()
            .unwrap_or(0)
    }

    /// Element nodes in document order
    pub fn elements(&self) -> impl Iterator<Item = &ParsedNode> {
        self.nodes.iter().filter(|node| node.is_element())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_id_display_and_serde() {
        let id = NodeId(7);
        assert_eq!(id.to_string(), "node-7");

        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"node-7\"");

        let back: NodeId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);

        assert!(serde_json::from_str::<NodeId>("\"7\"").is_err());
    }
}
