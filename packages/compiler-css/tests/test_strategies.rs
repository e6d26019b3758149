/// Strategy behavior through the public factory: class sharing, inline
/// preservation and node id stability.
use mockup_compiler_css::{create_strategy, CssOptions, CssStrategy, CssStrategyKind};
use mockup_parser::{parse, NodeId};

const TWO_RED: &str = r#"<div class="wrap"><div style="color: red; padding: 10px;">One</div><div style="color: red; padding: 10px;">Two</div></div>"#;

fn strategy(kind: CssStrategyKind, options: CssOptions) -> Box<dyn CssStrategy> {
    create_strategy(kind, options)
}

#[test]
fn test_modules_optimize_shares_one_class() {
    let options = CssOptions {
        optimize: true,
        ..Default::default()
    };
    let mut modules = strategy(CssStrategyKind::Modules, options);
    let result = modules.convert(TWO_RED);

    assert_eq!(result.class_name_map.len(), 1);
    let (class, declarations) = result.class_name_map.first().unwrap();
    assert_eq!(declarations, "color: red; padding: 10px");
    assert_eq!(result.html.matches(class.as_str()).count(), 2);
    assert_eq!(result.css.matches('{').count(), 1);
    assert_eq!(modules.stats().cache_hits, 1);
    assert_eq!(modules.strategy_name(), "modules");
}

#[test]
fn test_hashing_is_deterministic() {
    let first = strategy(CssStrategyKind::Modules, CssOptions::default()).convert(TWO_RED);
    let second = strategy(CssStrategyKind::Modules, CssOptions::default()).convert(TWO_RED);
    assert_eq!(first.html, second.html);
    assert_eq!(first.css, second.css);
}

#[test]
fn test_state_resets_between_conversions() {
    let mut external = strategy(CssStrategyKind::External, CssOptions::default());
    external.convert(TWO_RED);
    let result = external.convert(r#"<p style="margin: 0">x</p>"#);
    assert_eq!(result.class_name_map.len(), 1);
    assert_eq!(external.stats().elements_processed, 1);
    assert_eq!(external.generate_css(), result.css);
}

#[test]
fn test_preserve_inline_for_every_strategy() {
    for kind in [
        CssStrategyKind::Utility,
        CssStrategyKind::Modules,
        CssStrategyKind::External,
    ] {
        let options = CssOptions {
            preserve_inline: true,
            ..Default::default()
        };
        let result = strategy(kind, options).convert(r#"<p style="display: flex">x</p>"#);
        assert!(result.html.contains(r#"style="display: flex""#), "{}", kind);
        assert!(result.html.contains("class="), "{}", kind);
    }
}

#[test]
fn test_convert_document_keeps_node_ids() {
    let doc = parse(TWO_RED);
    let mut modules = strategy(CssStrategyKind::Modules, CssOptions::default());
    let conversion = modules.convert_document(&doc);

    assert_eq!(conversion.document.len(), doc.len());
    let first_styled = NodeId(1);
    assert_eq!(doc.node(first_styled).tag(), "div");
    assert!(doc.node(first_styled).attributes.style.is_some());

    let converted = conversion.document.node(first_styled);
    assert!(converted.attributes.style.is_none());
    assert!(converted
        .classes()
        .iter()
        .any(|class| class.starts_with("mk-")));
}

#[test]
fn test_utility_warns_without_stylesheet() {
    let mut utility = strategy(CssStrategyKind::Utility, CssOptions::default());
    let result = utility.convert(r#"<span style="font-family: serif; color: white">x</span>"#);
    assert!(result.css.is_empty());
    assert!(result.generated_files.is_empty());
    assert_eq!(result.warnings.len(), 1);
    assert!(result.html.contains("text-white"));
}

#[test]
fn test_parse_inline_styles() {
    let modules = strategy(CssStrategyKind::Modules, CssOptions::default());
    let declarations = modules.parse_inline_styles("Color: red; background: url(a;b.png); --Gap: 4px");
    assert_eq!(declarations["color"], "red");
    assert_eq!(declarations["background"], "url(a;b.png)");
    assert_eq!(declarations["--Gap"], "4px");
}
