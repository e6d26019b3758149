use crate::config::Config;
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use mockup_common::{write_files, RealFileSystem};
use mockup_compiler_css::CssStrategyKind;
use mockup_pipeline::{ConvertOptions, Pipeline};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Args)]
pub struct ConvertArgs {
    /// HTML file or directory of mockups
    pub path: String,

    /// Output directory (overrides config)
    #[arg(short, long)]
    pub out_dir: Option<String>,

    /// Output to stdout instead of files
    #[arg(long)]
    pub stdout: bool,

    /// Emit TypeScript components
    #[arg(long)]
    pub typescript: bool,

    /// CSS strategy (utility, modules, external)
    #[arg(long)]
    pub css: Option<CssStrategyKind>,

    /// Print every generated file path and warning
    #[arg(short, long)]
    pub verbose: bool,
}

pub fn convert(args: ConvertArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let mut options = config.options.clone();
    if args.typescript {
        options.typescript = true;
    }
    if let Some(css) = args.css {
        options.css_strategy = css;
    }
    let out_dir = match &args.out_dir {
        Some(out) => PathBuf::from(cwd).join(out),
        None => config.get_out_dir(cwd),
    };

    let input = PathBuf::from(cwd).join(&args.path);
    if !input.exists() {
        return Err(anyhow!("Input path does not exist: {}", input.display()));
    }

    println!("{}", "🔨 Converting mockups...".bright_blue().bold());

    let html_files = if input.is_dir() {
        find_html_files(&input)
    } else {
        vec![input.clone()]
    };

    if html_files.is_empty() {
        println!("{}", "⚠️  No .html files found".yellow());
        return Ok(());
    }

    let mut pipeline = Pipeline::new();
    let mut success_count = 0;
    let mut error_count = 0;

    for html_file in &html_files {
        // one output directory per mockup when converting a whole tree
        let target = if input.is_dir() {
            let relative = html_file.strip_prefix(&input).unwrap_or(html_file);
            out_dir.join(relative.with_extension(""))
        } else {
            out_dir.clone()
        };

        match convert_file(&mut pipeline, html_file, &target, &options, &args) {
            Ok(count) => {
                success_count += 1;
                println!(
                    "  {} {} → {} files",
                    "✓".green(),
                    display_name(html_file, cwd),
                    count
                );
            }
            Err(e) => {
                error_count += 1;
                eprintln!(
                    "  {} {} - {}",
                    "✗".red(),
                    display_name(html_file, cwd),
                    e.to_string().red()
                );
            }
        }
    }

    println!();
    if error_count == 0 {
        println!("{} Converted {} mockups successfully", "✅".green(), success_count);
    } else {
        println!(
            "{} Converted {} mockups, {} errors",
            "⚠️".yellow(),
            success_count,
            error_count
        );
    }

    Ok(())
}

fn find_html_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|entry| entry.into_path())
        .filter(|path| {
            matches!(
                path.extension().and_then(|s| s.to_str()),
                Some("html") | Some("htm")
            )
        })
        .collect();
    files.sort();
    files
}

fn display_name(path: &Path, cwd: &str) -> String {
    path.strip_prefix(cwd).unwrap_or(path).display().to_string()
}

fn convert_file(
    pipeline: &mut Pipeline,
    html_file: &Path,
    out_dir: &Path,
    options: &ConvertOptions,
    args: &ConvertArgs,
) -> Result<usize> {
    let source = fs::read_to_string(html_file)?;
    let output = pipeline.convert(&source, options)?;

    for warning in &output.warnings {
        tracing::warn!(file = %html_file.display(), "{}", warning);
        if args.verbose {
            println!("    {} {}", "warning:".yellow(), warning);
        }
    }

    if args.stdout {
        for file in &output.files {
            println!("{}", format!("// {}", file.path).dimmed());
            println!("{}", file.content);
        }
        return Ok(output.files.len());
    }

    let mut sink = RealFileSystem::new(out_dir);
    let count = write_files(&mut sink, &output.files)?;
    if args.verbose {
        for file in &output.files {
            println!("    {}", sink.root().join(&file.path).display());
        }
    }
    Ok(count)
}
