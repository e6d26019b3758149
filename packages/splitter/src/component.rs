use crate::naming::component_identifier;
use indexmap::IndexMap;
use mockup_parser::NodeId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why an element became a component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentType {
    Header,
    Nav,
    Main,
    Footer,
    Aside,
    Article,
    Section,
    /// Matched a caller-supplied selector
    Custom,
    /// Member of a repeating pattern
    Pattern,
    /// BEM block on a significant element
    Block,
    /// Container-keyword class on a significant element
    Container,
    /// Nested structure without any other signal
    Complex,
}

impl ComponentType {
    pub fn from_semantic_tag(tag: &str) -> Option<Self> {
        Some(match tag {
            "header" => ComponentType::Header,
            "nav" => ComponentType::Nav,
            "main" => ComponentType::Main,
            "footer" => ComponentType::Footer,
            "aside" => ComponentType::Aside,
            "article" => ComponentType::Article,
            "section" => ComponentType::Section,
            _ => return None,
        })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentType::Header => "header",
            ComponentType::Nav => "nav",
            ComponentType::Main => "main",
            ComponentType::Footer => "footer",
            ComponentType::Aside => "aside",
            ComponentType::Article => "article",
            ComponentType::Section => "section",
            ComponentType::Custom => "custom",
            ComponentType::Pattern => "pattern",
            ComponentType::Block => "block",
            ComponentType::Container => "container",
            ComponentType::Complex => "complex",
        }
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BemType {
    Block,
    Element,
    Modifier,
}

impl BemType {
    /// BEM role of the most specific class in the list
    pub fn from_classes(classes: &[&str]) -> Option<Self> {
        if classes.iter().any(|c| c.contains("--")) {
            Some(BemType::Modifier)
        } else if classes.iter().any(|c| c.contains("__")) {
            Some(BemType::Element)
        } else {
            None
        }
    }
}

/// Coarse category used to pick suggested props
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentRole {
    Semantic,
    Interactive,
    Media,
    Data,
    Navigation,
    Layout,
    Content,
    Unknown,
}

/// Where a suggested prop's default value comes from in the source markup
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum PropBinding {
    /// Text content of the node
    Text,
    /// Value of an attribute (html name)
    Attribute { name: String },
    /// Event handler attribute (`click`, `submit`)
    Event { event: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropSource {
    pub node: NodeId,
    pub binding: PropBinding,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestedProp {
    pub name: String,
    /// TypeScript type of the prop
    #[serde(rename = "type")]
    pub prop_type: String,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<PropSource>,
}

/// Link from a repeated pattern member to the earlier, structurally
/// identical instance it renders through
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstanceOf {
    /// Id of the representative component
    pub component: String,
    /// Props whose values differ from the representative's defaults
    pub props: IndexMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentMetadata {
    pub node_id: NodeId,
    pub tag_name: String,
    pub confidence: f64,
    pub reason: String,
    pub element_count: usize,
    pub text_length: usize,
    /// Index of this element within its repeating pattern
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern_instance: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentDefinition {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub component_type: ComponentType,
    /// outerHTML of the source element
    pub html: String,
    /// Nesting depth among components (0 for top-level components)
    pub depth: usize,
    pub classes: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bem_type: Option<BemType>,
    pub role: ComponentRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance_of: Option<InstanceOf>,
    pub suggested_props: Vec<SuggestedProp>,
    pub metadata: ComponentMetadata,
    /// Ids of directly nested components
    pub children: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
}

impl ComponentDefinition {
    pub fn node(&self) -> NodeId {
        self.metadata.node_id
    }

    pub fn confidence(&self) -> f64 {
        self.metadata.confidence
    }

    /// Identifier the component is declared and rendered as; `name` is also
    /// the module's file stem
    pub fn identifier(&self) -> String {
        component_identifier(&self.name)
    }
}
