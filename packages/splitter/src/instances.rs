//! Collapsing repeated pattern members onto one component.
//!
//! A member only renders through an earlier instance when both trees have
//! the same shape and every difference between them is carried by a text
//! or attribute prop of the earlier instance. Anything else keeps its own
//! component so no markup is lost.

use crate::component::{ComponentDefinition, InstanceOf, PropBinding};
use indexmap::IndexMap;
use mockup_parser::attributes::html_name_for;
use mockup_parser::{NodeId, NodeKind, ParsedDocument, ParsedNode};

/// Point every pattern member at the first earlier member it can be
/// rendered through
pub fn link_pattern_instances(doc: &ParsedDocument, components: &mut [ComponentDefinition]) {
    for index in 0..components.len() {
        if components[index].pattern_id.is_none() || !components[index].children.is_empty() {
            continue;
        }

        let found = (0..index).find_map(|earlier| {
            let candidate = &components[earlier];
            let eligible = candidate.pattern_id == components[index].pattern_id
                && candidate.instance_of.is_none()
                && candidate.children.is_empty();
            if !eligible {
                return None;
            }
            instance_props(doc, candidate, &components[index]).map(|props| InstanceOf {
                component: candidate.id.clone(),
                props,
            })
        });

        if let Some(instance) = found {
            tracing::trace!(
                component = %components[index].id,
                representative = %instance.component,
                props = instance.props.len(),
                "collapsed pattern instance"
            );
            components[index].instance_of = Some(instance);
        }
    }
}

/// Props `instance` has to pass to render as `representative`, or `None`
/// when the two differ in a way no prop covers
pub fn instance_props(
    doc: &ParsedDocument,
    representative: &ComponentDefinition,
    instance: &ComponentDefinition,
) -> Option<IndexMap<String, String>> {
    let left = rendered_subtree(doc, representative.node());
    let right = rendered_subtree(doc, instance.node());
    if left.len() != right.len() {
        return None;
    }

    let mut bindings: IndexMap<(NodeId, PropBinding), &str> = IndexMap::new();
    for prop in &representative.suggested_props {
        if let Some(source) = &prop.source {
            bindings.insert((source.node, source.binding.clone()), prop.name.as_str());
        }
    }

    let mut props = IndexMap::new();
    for (a, b) in left.iter().zip(&right) {
        if a.kind != b.kind {
            return None;
        }
        match a.kind {
            NodeKind::Element => {
                if a.tag() != b.tag()
                    || a.attributes.class_name != b.attributes.class_name
                    || a.attributes.style != b.attributes.style
                    || a.attributes.events != b.attributes.events
                    || rendered_children(doc, a).count() != rendered_children(doc, b).count()
                {
                    return None;
                }
                for key in a.attributes.html.keys().chain(b.attributes.html.keys()) {
                    let (left_value, right_value) = (a.attributes.html.get(key), b.attributes.html.get(key));
                    if left_value == right_value {
                        continue;
                    }
                    let name = html_name_for(key).unwrap_or(key.as_str()).to_string();
                    let prop = bindings.get(&(a.id, PropBinding::Attribute { name }))?;
                    let value = right_value.and_then(|value| value.as_str())?;
                    props.insert(prop.to_string(), value.to_string());
                }
            }
            NodeKind::Text => {
                let (left_text, right_text) = (collapsed(a.text.as_deref()), collapsed(b.text.as_deref()));
                if left_text == right_text {
                    continue;
                }
                let parent = a.parent?;
                let prop = bindings.get(&(parent, PropBinding::Text))?;
                let value = b.parent.map(|id| collapsed(Some(&doc.text_content(id))))?;
                props.insert(prop.to_string(), value);
            }
            NodeKind::Comment | NodeKind::Fragment => {
                if a.text != b.text {
                    return None;
                }
            }
        }
    }

    Some(props)
}

/// Subtree in document order, without the whitespace-only text the code
/// generator drops
fn rendered_subtree(doc: &ParsedDocument, id: NodeId) -> Vec<&ParsedNode> {
    doc.subtree(id)
        .into_iter()
        .map(|id| doc.node(id))
        .filter(|node| !is_blank_text(node))
        .collect()
}

fn rendered_children<'a>(doc: &'a ParsedDocument, node: &ParsedNode) -> impl Iterator<Item = &'a ParsedNode> {
    doc.children(node.id).filter(|child| !is_blank_text(child))
}

fn is_blank_text(node: &ParsedNode) -> bool {
    node.is_text() && node.text.as_deref().map_or(true, |text| text.trim().is_empty())
}

fn collapsed(text: Option<&str>) -> String {
    text.unwrap_or("").split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use crate::ComponentSplitter;

    #[test]
    fn test_identical_rows_share_a_component() {
        let html = r#"<div class="page"><div class="row"><h2>Intro</h2><p>Hello</p></div><div class="row"><h2>Next</h2><p>Hello</p></div></div>"#;
        let result = ComponentSplitter::default().split(html);

        let second = result.by_name("Row2").unwrap();
        let instance = second.instance_of.as_ref().unwrap();
        assert_eq!(instance.component, result.by_name("Row").unwrap().id);
        assert_eq!(instance.props.len(), 1);
        assert_eq!(instance.props.get("title").map(String::as_str), Some("Next"));
    }

    #[test]
    fn test_different_shapes_stay_separate() {
        let html = r#"<div class="page"><div class="row"><h2>Intro</h2><p>Hello</p></div><div class="row"><form><input name="email"><button>Join</button></form></div></div>"#;
        let result = ComponentSplitter::default().split(html);

        let rows: Vec<_> = result
            .components
            .iter()
            .filter(|c| c.pattern_id.as_deref() == Some("row"))
            .collect();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|row| row.instance_of.is_none()));
        assert!(!result.is_repeat(rows[1]));
    }

    #[test]
    fn test_unbound_differences_stay_separate() {
        // span text is not bound to any prop
        let html = r#"<ul><li class="item"><span>a</span></li><li class="item"><span>b</span></li></ul>"#;
        let result = ComponentSplitter::default().split(html);
        assert!(result.components.iter().all(|c| c.instance_of.is_none()));

        let same = r#"<ul><li class="item"><span>a</span></li><li class="item"><span>a</span></li></ul>"#;
        let result = ComponentSplitter::default().split(same);
        let repeats = result.components.iter().filter(|c| c.instance_of.is_some()).count();
        assert_eq!(repeats, 1);
    }
}
