/// Determinism tests - parsing identical input must produce identical
/// documents, ids included, and metadata must describe the arena exactly.
use mockup_parser::{parse, ParseOptions, ParsedDocument, Parser};

const MOCKUP: &str = r#"
<header class="site-header">
  <h1>Acme</h1>
  <nav class="main-nav">
    <a class="nav-link" href="/">Home</a>
    <a class="nav-link" href="/shop">Shop</a>
  </nav>
</header>
<main>
  <section class="hero"><h2>Big sale</h2><p>Everything must go</p></section>
  <div class="card"><h3>One</h3><p>First</p></div>
  <div class="card"><h3>Two</h3><p>Second</p></div>
</main>
<footer><p>&copy; Acme</p></footer>
"#;

#[test]
fn test_fresh_parsers_produce_identical_ids() {
    let results: Vec<ParsedDocument> = (0..5)
        .map(|_| Parser::new().parse(MOCKUP, &ParseOptions::default()))
        .collect();

    for i in 1..results.len() {
        assert_eq!(results[0], results[i], "Parse {} differs from parse 0", i);
    }
}

#[test]
fn test_reused_parser_resets_ids() {
    let mut parser = Parser::new();
    let first = parser.parse(MOCKUP, &ParseOptions::default());
    let _other = parser.parse("<div><span>unrelated</span></div>", &ParseOptions::default());
    let second = parser.parse(MOCKUP, &ParseOptions::default());

    let first_ids: Vec<String> = first.nodes.iter().map(|n| n.id.to_string()).collect();
    let second_ids: Vec<String> = second.nodes.iter().map(|n| n.id.to_string()).collect();
    assert_eq!(first_ids, second_ids);
    assert_eq!(first_ids[0], "node-0");
}

#[test]
fn test_node_count_matches_arena() {
    for html in [MOCKUP, "", "text only", "<p>a</p>", "<div><!-- c --></div>"] {
        let doc = parse(html);
        assert_eq!(doc.metadata.node_count, doc.nodes.len(), "input: {:?}", html);
    }
}

#[test]
fn test_ids_are_unique_and_ordered() {
    let doc = parse(MOCKUP);
    for (index, node) in doc.nodes.iter().enumerate() {
        assert_eq!(node.id.index(), index);
        for child in &node.children {
            assert!(*child > node.id, "children come after their parent");
            assert_eq!(doc.node(*child).parent, Some(node.id));
        }
    }
}

#[test]
fn test_sections_are_found() {
    let doc = parse(MOCKUP);
    let types: Vec<&str> = doc.sections.iter().map(|s| s.section_type.as_str()).collect();
    assert_eq!(types, vec!["header", "main", "footer"]);
}
