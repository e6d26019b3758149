/// Component splitting scenarios: boundary decisions, naming, pattern
/// membership, tree shape and per-run state reset.
use mockup_parser::{ParseOptions, Parser};
use mockup_splitter::{
    BemType, ComponentRole, ComponentSplitter, ComponentType, PropBinding, SplitOptions,
};
use std::collections::HashSet;

const CARD_GRID: &str = r#"
<div class="grid">
  <div class="card"><h3>Alpha</h3><p>First card</p></div>
  <div class="card"><h3>Beta</h3><p>Second card</p></div>
  <div class="card"><h3>Gamma</h3><p>Third card</p></div>
</div>
"#;

const PAGE: &str = r#"
<header class="site-header">
  <h1>Acme</h1>
  <nav><a href="/">Home</a><a href="/shop">Shop</a></nav>
</header>
<main>
  <section class="features">
    <div class="card"><h3>Fast</h3><p>Really fast</p></div>
    <div class="card"><h3>Cheap</h3><p>Really cheap</p></div>
  </section>
</main>
<footer><p>Acme Inc.</p></footer>
"#;

#[test]
fn test_single_header() {
    let mut splitter = ComponentSplitter::default();
    let result = splitter.split("<header><h1>Title</h1></header>");

    assert_eq!(result.components.len(), 1);
    let header = &result.components[0];
    assert_eq!(header.component_type, ComponentType::Header);
    assert_eq!(header.confidence(), 0.95);
    assert_eq!(header.name, "Header");
    assert_eq!(header.id, "component-0");
    assert_eq!(header.depth, 0);
    assert_eq!(header.role, ComponentRole::Semantic);
    assert_eq!(result.tree.root.as_deref(), Some("component-0"));
    assert_eq!(result.by_node(header.node()).map(|c| c.name.as_str()), Some("Header"));
    assert_eq!(splitter.component_for(header.node()), Some("component-0"));
}

#[test]
fn test_repeating_cards() {
    let mut splitter = ComponentSplitter::new(SplitOptions::default());
    let result = splitter.split(CARD_GRID);

    let card = result
        .patterns
        .iter()
        .find(|p| p.pattern == "card")
        .expect("card pattern");
    assert_eq!(card.count, 3);

    let cards: Vec<_> = result
        .components
        .iter()
        .filter(|c| c.pattern_id.as_deref() == Some("card"))
        .collect();
    assert_eq!(cards.len(), 3);
    assert_eq!(
        cards.iter().map(|c| c.name.as_str()).collect::<Vec<_>>(),
        vec!["Card", "Card2", "Card3"]
    );
    assert_eq!(
        cards
            .iter()
            .map(|c| c.metadata.pattern_instance)
            .collect::<Vec<_>>(),
        vec![Some(0), Some(1), Some(2)]
    );
    assert_eq!(result.representative(cards[2]).id, cards[0].id);
    assert!(result.is_repeat(cards[1]));
    assert!(!result.is_repeat(cards[0]));
    let props = &cards[1].instance_of.as_ref().expect("collapsed").props;
    assert_eq!(props.get("title").map(String::as_str), Some("Beta"));
    assert_eq!(props.get("description").map(String::as_str), Some("Second card"));
    for c in &cards {
        assert_eq!(c.component_type, ComponentType::Pattern);
        assert_eq!(c.confidence(), card.confidence);
    }

    let grid = &result.components[0];
    assert_eq!(grid.component_type, ComponentType::Container);
    assert_eq!(grid.confidence(), 0.65);
    assert_eq!(grid.children.len(), 3);
    assert_eq!(result.tree.children_of(&grid.id).len(), 3);
}

#[test]
fn test_card_props_bind_to_content() {
    let mut splitter = ComponentSplitter::default();
    let result = splitter.split(CARD_GRID);
    let first = result.by_name("Card").expect("first card");

    let title = first
        .suggested_props
        .iter()
        .find(|p| p.name == "title")
        .expect("title prop");
    assert_eq!(title.default_value.as_deref(), Some("Alpha"));
    assert_eq!(title.prop_type, "string");
    assert_eq!(
        title.source.as_ref().map(|s| s.binding.clone()),
        Some(PropBinding::Text)
    );

    let description = first
        .suggested_props
        .iter()
        .find(|p| p.name == "description")
        .expect("description prop");
    assert_eq!(description.default_value.as_deref(), Some("First card"));

    // the grid's headings belong to the cards
    let grid = &result.components[0];
    assert!(grid.suggested_props.iter().all(|p| p.name != "title"));
    assert!(grid.suggested_props.iter().any(|p| p.name == "children"));
}

#[test]
fn test_names_are_unique() {
    let mut splitter = ComponentSplitter::default();
    let result = splitter.split(PAGE);

    let mut seen = HashSet::new();
    for component in &result.components {
        assert!(seen.insert(component.name.clone()), "duplicate name {}", component.name);
    }
}

#[test]
fn test_page_tree() {
    let mut splitter = ComponentSplitter::default();
    let result = splitter.split(PAGE);

    let names: Vec<&str> = result.components.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["Header", "Navigation", "MainContent", "Section", "Card", "Card2", "Footer"]
    );

    let header = result.by_name("Header").expect("header");
    let nav = result.by_name("Navigation").expect("nav");
    assert_eq!(nav.parent_id.as_deref(), Some(header.id.as_str()));
    assert_eq!(nav.depth, 1);
    assert_eq!(nav.role, ComponentRole::Navigation);

    let section = result.by_name("Section").expect("section");
    let main = result.by_name("MainContent").expect("main");
    assert_eq!(section.parent_id.as_deref(), Some(main.id.as_str()));
    assert_eq!(result.tree.nodes[&section.id].parent_id.as_deref(), Some(main.id.as_str()));

    // top-level components are siblings of each other
    let footer = result.by_name("Footer").expect("footer");
    assert!(result.tree.nodes[&header.id].siblings.contains(&footer.id));
    assert_eq!(result.tree.root.as_deref(), Some(header.id.as_str()));
    assert!(result.metadata.warnings.is_empty());
    assert_eq!(result.metadata.total_components, 7);
    assert_eq!(result.metadata.max_depth, 2);
}

#[test]
fn test_max_component_depth() {
    let html = "<main><section><h2>x</h2><p>y</p></section></main>";
    let mut splitter = ComponentSplitter::new(SplitOptions {
        max_component_depth: 1,
        ..Default::default()
    });
    let result = splitter.split(html);
    assert_eq!(result.components.len(), 1);
    assert_eq!(result.components[0].component_type, ComponentType::Main);

    let mut unbounded = ComponentSplitter::default();
    assert_eq!(unbounded.split(html).components.len(), 2);
}

#[test]
fn test_custom_selectors() {
    let mut splitter = ComponentSplitter::new(SplitOptions {
        custom_component_selectors: vec![
            ".promo".into(),
            "div > div.promo".into(),
            r#"[data-x="a,b"]"#.into(),
            "p >".into(),
        ],
        ..Default::default()
    });
    let html = r#"<div><div class="promo">Half price</div><div data-x="a,b"><span>x</span></div><div data-x="a"><span>y</span></div></div>"#;
    let result = splitter.split(html);
    let doc = Parser::new().parse(html, &ParseOptions::default());

    let custom: Vec<_> = result
        .components
        .iter()
        .filter(|c| c.component_type == ComponentType::Custom)
        .collect();
    assert_eq!(custom.len(), 2);
    assert_eq!(custom[0].name, "Promo");
    assert_eq!(custom[0].confidence(), 0.9);
    assert_eq!(doc.node(custom[1].node()).attributes.get("data-x"), Some("a,b"));

    assert_eq!(result.metadata.warnings.len(), 1);
    assert!(result.metadata.warnings[0].contains("p >"));
}

#[test]
fn test_custom_selectors_need_evaluated_document() {
    let options = SplitOptions {
        custom_component_selectors: vec![".promo".into()],
        ..Default::default()
    };
    let html = r#"<div><div class="promo">Half price</div></div>"#;

    let bare = Parser::new().parse(html, &ParseOptions::default());
    let result = ComponentSplitter::new(options.clone()).split_document(&bare);
    assert!(result.components.iter().all(|c| c.component_type != ComponentType::Custom));
    assert_eq!(result.metadata.warnings.len(), 1);
    assert!(result.metadata.warnings[0].contains("not evaluated"));

    let evaluated = Parser::new().parse(html, &options.parse_options(&ParseOptions::default()));
    let result = ComponentSplitter::new(options).split_document(&evaluated);
    assert!(result.components.iter().any(|c| c.component_type == ComponentType::Custom));
    assert!(result.metadata.warnings.is_empty());
}

#[test]
fn test_bem_block() {
    let html = r#"<div><div class="profile"><h3 class="profile__name">Ada</h3><p class="profile__bio">Engineer</p></div></div>"#;
    let mut splitter = ComponentSplitter::default();
    let result = splitter.split(html);

    let block = result
        .components
        .iter()
        .find(|c| c.component_type == ComponentType::Block)
        .expect("bem block");
    assert_eq!(block.confidence(), 0.7);
    assert_eq!(block.bem_type, Some(BemType::Block));
    assert_eq!(block.name, "Profile");
}

#[test]
fn test_complex_structure_fallback() {
    let html = "<div><div><span><b>a</b></span><span>b</span></div></div>";
    let mut splitter = ComponentSplitter::default();
    let result = splitter.split(html);

    assert!(result
        .components
        .iter()
        .any(|c| c.component_type == ComponentType::Complex && c.confidence() == 0.6));
}

#[test]
fn test_plain_text_produces_nothing() {
    let mut splitter = ComponentSplitter::default();
    assert!(splitter.split("<p>Just a paragraph</p>").components.is_empty());
    assert!(splitter.split("").components.is_empty());
    assert!(splitter.split_input(None).is_err());
}

#[test]
fn test_state_resets_between_runs() {
    let mut splitter = ComponentSplitter::default();
    let first = splitter.split(PAGE);
    let _unrelated = splitter.split(CARD_GRID);
    let second = splitter.split(PAGE);

    assert_eq!(first, second);
    assert_eq!(second.components[0].id, "component-0");
    assert_eq!(second.components[0].name, "Header");
}
