//! # Mockup Parser
//!
//! Turns an HTML mockup into an arena of [`ParsedNode`]s with stable,
//! document-ordered ids, normalizes element attributes and tags semantic
//! sections (header, navigation, cards, hero, ...).

pub mod ast;
pub mod attributes;
pub mod error;
pub mod id_generator;
pub mod parser;
pub mod selector;
pub mod semantics;
pub mod serializer;
pub mod visitor;

pub use ast::{DocumentMetadata, NodeId, NodeKind, ParsedDocument, ParsedNode};
pub use attributes::{AttrValue, AttributeExtractor, EventHandler, ParsedAttributes};
pub use error::{ParseError, ParseResult};
pub use parser::{parse, ParseOptions, ParseStage, Parser, ProgressCallback};
pub use selector::SelectorMatches;
pub use semantics::{SectionType, SemanticAnalyzer, SemanticRule, SemanticSection};
pub use serializer::{inner_html, outer_html, serialize, Serializer};
pub use visitor::{walk, walk_document, Visitor, Walk};
