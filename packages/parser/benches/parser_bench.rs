use criterion::{black_box, criterion_group, criterion_main, Criterion};
use mockup_parser::{parse, ParseOptions, Parser};

fn parse_simple_mockup(c: &mut Criterion) {
    let source = r#"
        <header class="site-header">
            <h1>Acme</h1>
            <nav><a href="/">Home</a><a href="/about">About</a></nav>
        </header>
    "#;

    c.bench_function("parse_simple_mockup", |b| b.iter(|| parse(black_box(source))));
}

fn parse_card_grid(c: &mut Criterion) {
    let card = r#"
        <div class="card" style="padding: 16px; border-radius: 8px">
            <img src="/p.png" alt="Product">
            <h3 class="card__title">Product</h3>
            <p class="card__body">Short description of the product.</p>
            <button class="btn btn-primary" onclick="buy()">Buy</button>
        </div>
    "#;
    let source = format!("<main><section class=\"grid\">{}</section></main>", card.repeat(50));

    c.bench_function("parse_card_grid", |b| {
        b.iter(|| Parser::new().parse(black_box(&source), &ParseOptions::default()))
    });
}

fn parse_without_analysis(c: &mut Criterion) {
    let source = "<div><p>x</p></div>".repeat(200);

    c.bench_function("parse_tree_only", |b| {
        b.iter(|| Parser::new().parse_tree(black_box(&source), &ParseOptions::default()))
    });
}

criterion_group!(
    benches,
    parse_simple_mockup,
    parse_card_grid,
    parse_without_analysis
);
criterion_main!(benches);
