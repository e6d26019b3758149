use crate::config::Config;
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use mockup_parser::{ParsedDocument, Parser};
use mockup_splitter::{ComponentSplitter, SplitResult};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct AnalyzeArgs {
    /// HTML mockup to analyze
    pub path: String,

    /// Print the analysis as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn analyze(args: AnalyzeArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let input = PathBuf::from(cwd).join(&args.path);
    if !input.is_file() {
        return Err(anyhow!("Input file does not exist: {}", input.display()));
    }

    let source = fs::read_to_string(&input)?;
    let parse_options = config.options.split.parse_options(&config.options.parse);
    let doc = Parser::new().parse(&source, &parse_options);
    let split = ComponentSplitter::new(config.options.split.clone()).split_document(&doc);

    if args.json {
        let report = serde_json::json!({
            "metadata": doc.metadata,
            "sections": doc.sections,
            "patterns": split.patterns,
            "tree": split.tree,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_sections(&doc);
    print_patterns(&split);
    print_tree(&split);

    if !split.metadata.warnings.is_empty() {
        println!();
        for warning in &split.metadata.warnings {
            println!("{} {}", "warning:".yellow(), warning);
        }
    }

    Ok(())
}

fn print_sections(doc: &ParsedDocument) {
    println!("{}", "Sections".bright_blue().bold());
    if doc.sections.is_empty() {
        println!("  {}", "(none)".dimmed());
    }
    for section in &doc.sections {
        println!(
            "  {} {} {} {}",
            section.section_type.as_str().bright_white(),
            section.component_name,
            format!("({:.2})", section.confidence).dimmed(),
            format!("{} nodes", section.nodes.len()).dimmed()
        );
    }
    println!();
}

fn print_patterns(split: &SplitResult) {
    println!("{}", "Patterns".bright_blue().bold());
    if split.patterns.is_empty() {
        println!("  {}", "(none)".dimmed());
    }
    for pattern in &split.patterns {
        println!(
            "  {} ×{} {} {}",
            pattern.selector.bright_white(),
            pattern.count,
            pattern.pattern_type,
            format!("({:.2})", pattern.confidence).dimmed()
        );
    }
    println!();
}

fn print_tree(split: &SplitResult) {
    println!("{}", "Components".bright_blue().bold());
    let roots = split
        .components
        .iter()
        .filter(|component| component.parent_id.is_none());

    let mut stack: Vec<(&str, usize)> = roots.rev().map(|c| (c.id.as_str(), 0)).collect();
    while let Some((id, depth)) = stack.pop() {
        let Some(component) = split.get(id) else {
            continue;
        };
        println!(
            "  {}{} {}",
            "  ".repeat(depth),
            component.name.green(),
            format!("<{}>", component.component_type).dimmed()
        );
        for child in split.tree.children_of(id).iter().rev() {
            stack.push((child.as_str(), depth + 1));
        }
    }
}
