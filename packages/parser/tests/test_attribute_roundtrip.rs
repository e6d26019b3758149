use mockup_parser::{parse, AttrValue, ParsedAttributes};

fn root_attributes(html: &str) -> ParsedAttributes {
    let doc = parse(html);
    doc.root_node().attributes.clone()
}

#[test]
fn test_roundtrip_without_events() {
    let cases = [
        r#"<div class="a b" id="x" data-role="r" aria-label="Label" tabindex="1" hidden style="color: red; background-color: blue"></div>"#,
        r#"<label for="email" class="field__label">Email</label>"#,
        r#"<input type="checkbox" checked disabled name="agree">"#,
        r#"<a href="/x?a=1&amp;b=2" title="say &quot;hi&quot;">x</a>"#,
        r#"<div style="-webkit-transition: all 1s; --brand: #333"></div>"#,
    ];

    for html in cases {
        let original = root_attributes(html);
        let doc = parse(html);
        let tag = doc.root_node().tag().to_string();

        let rebuilt_html = format!("<{} {}></{}>", tag, original.to_html_string(), tag);
        let rebuilt = root_attributes(&rebuilt_html);

        assert!(
            original.equals(&rebuilt),
            "round trip changed attributes for {}:\n{:?}\n{:?}",
            html,
            original,
            rebuilt
        );
    }
}

#[test]
fn test_boolean_and_aliases_survive_parsing() {
    let attrs = root_attributes(r#"<input readonly maxlength="4" required>"#);
    assert_eq!(attrs.html.get("readonly"), Some(&AttrValue::Bool(true)));
    assert_eq!(attrs.html.get("required"), Some(&AttrValue::Bool(true)));
    assert_eq!(attrs.html.get("maxLength"), Some(&AttrValue::Text("4".into())));
}

#[test]
fn test_events_are_collected() {
    let attrs = root_attributes(r#"<button onclick="save()" onMouseEnter="hover()">Save</button>"#);
    let types: Vec<&str> = attrs.events.iter().map(|e| e.event_type.as_str()).collect();
    assert_eq!(types, vec!["click", "mouseenter"]);
    assert!(attrs.html.is_empty());
}
