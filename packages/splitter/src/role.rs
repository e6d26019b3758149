//! Role inference and prop suggestions for extracted components.

use crate::component::{ComponentRole, PropBinding, PropSource, SuggestedProp};
use mockup_parser::{NodeId, ParsedDocument, ParsedNode};

const LANDMARK_TAGS: &[&str] = &["header", "main", "footer", "aside", "article", "section"];
const INTERACTIVE_TAGS: &[&str] = &[
    "form", "button", "input", "select", "textarea", "details", "dialog",
];
const MEDIA_TAGS: &[&str] = &[
    "img", "picture", "video", "audio", "figure", "svg", "canvas", "iframe",
];
const DATA_TAGS: &[&str] = &["table", "ul", "ol", "dl"];
const NAV_CLASS_KEYWORDS: &[&str] = &["nav", "menu", "breadcrumb", "pagination"];
const HEADING_TAGS: &[&str] = &["h1", "h2", "h3", "h4", "h5", "h6"];

/// Assign a coarse role from the component's root element and the nodes it
/// owns. Navigation is checked before the other landmarks.
pub fn infer_role(doc: &ParsedDocument, node: &ParsedNode, owned: &[NodeId]) -> ComponentRole {
    let tag = node.tag();
    let classes = node.classes();

    if tag == "nav"
        || classes
            .iter()
            .any(|class| NAV_CLASS_KEYWORDS.iter().any(|k| class.contains(k)))
    {
        return ComponentRole::Navigation;
    }
    if LANDMARK_TAGS.contains(&tag) {
        return ComponentRole::Semantic;
    }
    if INTERACTIVE_TAGS.contains(&tag) || !node.attributes.events.is_empty() {
        return ComponentRole::Interactive;
    }
    if MEDIA_TAGS.contains(&tag) {
        return ComponentRole::Media;
    }
    if DATA_TAGS.contains(&tag) {
        return ComponentRole::Data;
    }

    let owned_elements: Vec<&ParsedNode> = owned
        .iter()
        .map(|id| doc.node(*id))
        .filter(|n| n.is_element() && n.id != node.id)
        .collect();
    let media = owned_elements
        .iter()
        .filter(|n| MEDIA_TAGS.contains(&n.tag()))
        .count();
    if media > 0 && media * 2 >= owned_elements.len() {
        return ComponentRole::Media;
    }

    let has_own_text = doc
        .children(node.id)
        .any(|child| child.is_text() && child.text.as_deref().is_some_and(|t| !t.trim().is_empty()));
    let element_children = doc.element_children(node.id).count();

    if element_children >= 2 && !has_own_text {
        ComponentRole::Layout
    } else if has_own_text || owned.iter().any(|id| doc.node(*id).is_text()) {
        ComponentRole::Content
    } else {
        ComponentRole::Unknown
    }
}

/// Suggest props bound to nodes the component owns, in document order.
/// Each prop name is suggested at most once.
pub fn suggest_props(
    doc: &ParsedDocument,
    node: &ParsedNode,
    owned: &[NodeId],
    role: ComponentRole,
    has_child_components: bool,
) -> Vec<SuggestedProp> {
    let mut props = PropList::default();

    for id in owned {
        let current = doc.node(*id);
        if !current.is_element() {
            continue;
        }
        let tag = current.tag();

        if HEADING_TAGS.contains(&tag) {
            props.text("title", doc, current);
        } else if tag == "p" {
            props.text("description", doc, current);
        } else if tag == "img" {
            props.attribute("imageSrc", current, "src");
            props.attribute("imageAlt", current, "alt");
        } else if tag == "a" {
            props.attribute("href", current, "href");
            props.text("label", doc, current);
        } else if tag == "button" {
            props.text("label", doc, current);
        }

        for event in &current.attributes.events {
            match event.event_type.as_str() {
                "click" => props.event("onClick", "() => void", current, "click"),
                "submit" => props.event(
                    "onSubmit",
                    "(event: React.FormEvent<HTMLFormElement>) => void",
                    current,
                    "submit",
                ),
                _ => {}
            }
        }
    }

    if node.tag() == "form" {
        props.push(SuggestedProp {
            name: "onSubmit".into(),
            prop_type: "(event: React.FormEvent<HTMLFormElement>) => void".into(),
            required: false,
            default_value: None,
            source: None,
        });
    }

    if role == ComponentRole::Layout || has_child_components {
        props.push(SuggestedProp {
            name: "children".into(),
            prop_type: "React.ReactNode".into(),
            required: false,
            default_value: None,
            source: None,
        });
    }

    props.0
}

#[derive(Default)]
struct PropList(Vec<SuggestedProp>);

impl PropList {
    fn has(&self, name: &str) -> bool {
        self.0.iter().any(|prop| prop.name == name)
    }

    fn push(&mut self, prop: SuggestedProp) {
        if !self.has(&prop.name) {
            self.0.push(prop);
        }
    }

    /// Only nodes holding nothing but text; inline markup stays in the JSX
    fn text(&mut self, name: &str, doc: &ParsedDocument, node: &ParsedNode) {
        if self.has(name) || !doc.children(node.id).all(|child| child.is_text()) {
            return;
        }
        let text = doc.text_content(node.id);
        let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
        if text.is_empty() {
            return;
        }
        self.push(SuggestedProp {
            name: name.into(),
            prop_type: "string".into(),
            required: false,
            default_value: Some(text),
            source: Some(PropSource {
                node: node.id,
                binding: PropBinding::Text,
            }),
        });
    }

    fn attribute(&mut self, name: &str, node: &ParsedNode, attribute: &str) {
        let Some(value) = node.attributes.get(attribute) else {
            return;
        };
        self.push(SuggestedProp {
            name: name.into(),
            prop_type: "string".into(),
            required: false,
            default_value: Some(value.to_string()),
            source: Some(PropSource {
                node: node.id,
                binding: PropBinding::Attribute {
                    name: attribute.into(),
                },
            }),
        });
    }

    fn event(&mut self, name: &str, prop_type: &str, node: &ParsedNode, event: &str) {
        self.push(SuggestedProp {
            name: name.into(),
            prop_type: prop_type.into(),
            required: false,
            default_value: None,
            source: Some(PropSource {
                node: node.id,
                binding: PropBinding::Event {
                    event: event.into(),
                },
            }),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockup_parser::parse;

    fn role_of(html: &str) -> ComponentRole {
        let doc = parse(html);
        let root = doc.root_node();
        infer_role(&doc, root, &doc.subtree(root.id))
    }

    #[test]
    fn test_roles() {
        assert_eq!(role_of("<nav><a>x</a></nav>"), ComponentRole::Navigation);
        assert_eq!(role_of(r#"<div class="main-menu"><a>x</a></div>"#), ComponentRole::Navigation);
        assert_eq!(role_of("<footer><p>x</p></footer>"), ComponentRole::Semantic);
        assert_eq!(role_of("<form><input></form>"), ComponentRole::Interactive);
        assert_eq!(role_of(r#"<div onclick="go()"><p>x</p></div>"#), ComponentRole::Interactive);
        assert_eq!(role_of("<div><img src=a><img src=b></div>"), ComponentRole::Media);
        assert_eq!(role_of("<ul><li>a</li></ul>"), ComponentRole::Data);
        assert_eq!(role_of("<div><div>a</div><div>b</div></div>"), ComponentRole::Layout);
        assert_eq!(role_of("<div>Hello <b>world</b></div>"), ComponentRole::Content);
        assert_eq!(role_of("<div><br></div>"), ComponentRole::Unknown);
    }

    #[test]
    fn test_suggest_props() {
        let doc = parse(
            r#"<div class="card"><img src="a.png" alt="A"><h3>  Title
               here </h3><p>Body</p><p>Second</p><a href="/more">Read more</a><button onclick="buy()">Buy</button></div>"#,
        );
        let root = doc.root_node();
        let owned = doc.subtree(root.id);
        let props = suggest_props(&doc, root, &owned, ComponentRole::Content, false);
        let names: Vec<&str> = props.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["imageSrc", "imageAlt", "title", "description", "href", "label", "onClick"]
        );

        let title = &props[2];
        assert_eq!(title.default_value.as_deref(), Some("Title here"));
        assert_eq!(title.source.as_ref().map(|s| &s.binding), Some(&PropBinding::Text));
        assert_eq!(props[0].default_value.as_deref(), Some("a.png"));
        assert_eq!(props[4].default_value.as_deref(), Some("/more"));
        assert_eq!(props[5].default_value.as_deref(), Some("Read more"));
    }

    #[test]
    fn test_inline_markup_is_not_bound() {
        let doc = parse("<header><h1>Hello <em>world</em></h1><p>Plain</p></header>");
        let root = doc.root_node();
        let props = suggest_props(&doc, root, &doc.subtree(root.id), ComponentRole::Semantic, false);
        let names: Vec<&str> = props.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["description"]);
    }

    #[test]
    fn test_children_prop() {
        let doc = parse("<form><input name=q></form>");
        let root = doc.root_node();
        let props = suggest_props(&doc, root, &doc.subtree(root.id), ComponentRole::Interactive, true);
        let names: Vec<&str> = props.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["onSubmit", "children"]);
    }
}
