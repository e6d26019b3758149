//! Structural similarity between elements, measured on the multiset of
//! their child element tags.

use indexmap::IndexMap;
use mockup_parser::{NodeId, ParsedDocument};

pub type TagMultiset = IndexMap<String, usize>;

pub fn child_tag_multiset(doc: &ParsedDocument, id: NodeId) -> TagMultiset {
    let mut tags = TagMultiset::new();
    for child in doc.element_children(id) {
        *tags.entry(child.tag().to_string()).or_insert(0) += 1;
    }
    tags
}

/// Multiset Jaccard index: Σ min / Σ max over all tags. Two empty sets are
/// identical.
pub fn jaccard(a: &TagMultiset, b: &TagMultiset) -> f64 {
    let mut intersection = 0usize;
    let mut union = 0usize;

    for (tag, count_a) in a {
        let count_b = b.get(tag).copied().unwrap_or(0);
        intersection += (*count_a).min(count_b);
        union += (*count_a).max(count_b);
    }
    for (tag, count_b) in b {
        if !a.contains_key(tag) {
            union += count_b;
        }
    }

    if union == 0 {
        1.0
    } else {
        intersection as f64 / union as f64
    }
}

/// Mean pairwise similarity of a group. A single element is perfectly
/// similar to itself.
pub fn group_similarity(doc: &ParsedDocument, members: &[NodeId]) -> f64 {
    if members.len() < 2 {
        return 1.0;
    }

    let sets: Vec<TagMultiset> = members.iter().map(|id| child_tag_multiset(doc, *id)).collect();

    let mut total = 0.0;
    let mut pairs = 0usize;
    for i in 0..sets.len() {
        for j in (i + 1)..sets.len() {
            total += jaccard(&sets[i], &sets[j]);
            pairs += 1;
        }
    }

    total / pairs as f64
}

/// Tag skeleton of an element: `div>h3+p+a`
pub fn sample_structure(doc: &ParsedDocument, id: NodeId) -> String {
    let node = doc.node(id);
    let children: Vec<&str> = doc.element_children(id).map(|child| child.tag()).collect();
    if children.is_empty() {
        node.tag().to_string()
    } else {
        format!("{}>{}", node.tag(), children.join("+"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[(&str, usize)]) -> TagMultiset {
        items.iter().map(|(t, c)| (t.to_string(), *c)).collect()
    }

    #[test]
    fn test_jaccard() {
        assert_eq!(jaccard(&set(&[]), &set(&[])), 1.0);
        assert_eq!(jaccard(&set(&[("p", 1)]), &set(&[("p", 1)])), 1.0);
        assert_eq!(jaccard(&set(&[("p", 2)]), &set(&[("p", 1)])), 0.5);
        assert_eq!(jaccard(&set(&[("h3", 1), ("p", 1)]), &set(&[("h3", 1), ("a", 1)])), 1.0 / 3.0);
        assert_eq!(jaccard(&set(&[("p", 1)]), &set(&[])), 0.0);
    }

    #[test]
    fn test_group_similarity_and_structure() {
        let doc = mockup_parser::parse(
            "<div><div class=\"c\"><h3>a</h3><p>b</p></div><div class=\"c\"><h3>a</h3><p>b</p></div></div>",
        );
        let members: Vec<NodeId> = doc
            .elements()
            .filter(|n| n.has_class("c"))
            .map(|n| n.id)
            .collect();
        assert_eq!(group_similarity(&doc, &members), 1.0);
        assert_eq!(sample_structure(&doc, members[0]), "div>h3+p");
    }
}
