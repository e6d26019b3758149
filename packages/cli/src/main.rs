mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{analyze, convert, init, AnalyzeArgs, ConvertArgs, InitArgs};
use tracing_subscriber::EnvFilter;

/// Mockup CLI - turn HTML mockups into React components
#[derive(Parser, Debug)]
#[command(name = "mockup")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a default mockup.config.json
    Init(InitArgs),

    /// Convert an HTML mockup (or a directory of them) into components
    Convert(ConvertArgs),

    /// Print sections, patterns and the component tree of a mockup
    Analyze(AnalyzeArgs),
}

fn init_logging(verbose: bool) {
    let filter = std::env::var("MOCKUP_LOG")
        .ok()
        .and_then(|value| EnvFilter::try_new(value).ok())
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new(if verbose { "debug" } else { "warn" }));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();

    let verbose = matches!(&cli.command, Command::Convert(args) if args.verbose);
    init_logging(verbose);

    let cwd = match std::env::current_dir() {
        Ok(dir) => dir.display().to_string(),
        Err(err) => {
            eprintln!("{} Cannot get current directory: {}", "Error:".red().bold(), err);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Command::Init(args) => init(args, &cwd),
        Command::Convert(args) => convert(args, &cwd),
        Command::Analyze(args) => analyze(args, &cwd),
    };

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
