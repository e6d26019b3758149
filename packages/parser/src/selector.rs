//! Caller-supplied selectors (semantic rules, custom component selectors).
//!
//! Selectors are parsed and matched by scraper against the html5ever tree
//! while it is still alive; only the resulting arena ids are kept on the
//! document.

use crate::ast::NodeId;
use crate::error::ParseError;
use indexmap::IndexMap;
use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};

/// Result of evaluating one selector against a document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectorMatches {
    /// Matching elements in document order
    pub nodes: Vec<NodeId>,
    /// Set when the selector could not be parsed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SelectorMatches {
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.binary_search(&id).is_ok()
    }

    pub fn is_valid(&self) -> bool {
        self.error.is_none()
    }
}

/// Evaluate every distinct selector in `sources`. `lookup` maps a scraper
/// element to the arena node built from it; elements without one (dropped
/// by `maxDepth`, or the fragment container) never match.
pub(crate) fn evaluate<'s, I, F>(fragment: &Html, sources: I, lookup: F) -> IndexMap<String, SelectorMatches>
where
    I: IntoIterator<Item = &'s str>,
    F: Fn(ElementRef<'_>) -> Option<NodeId>,
{
    let mut evaluated = IndexMap::new();
    for source in sources {
        if evaluated.contains_key(source) {
            continue;
        }

        let matches = match Selector::parse(source) {
            Ok(selector) => {
                let mut nodes: Vec<NodeId> = fragment.select(&selector).filter_map(&lookup).collect();
                nodes.sort();
                SelectorMatches { nodes, error: None }
            }
            Err(err) => {
                let err = ParseError::invalid_selector(source, err.to_string());
                tracing::warn!("{}", err);
                SelectorMatches {
                    nodes: Vec::new(),
                    error: Some(err.to_string()),
                }
            }
        };
        evaluated.insert(source.to_string(), matches);
    }
    evaluated
}
