use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use mockup_compiler_css::CssStrategyKind;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// CSS strategy (utility, modules, external)
    #[arg(short, long, default_value = "modules")]
    pub css: CssStrategyKind,

    /// Output directory for generated components
    #[arg(short, long, default_value = "components")]
    pub out_dir: String,

    /// Emit TypeScript components
    #[arg(long)]
    pub typescript: bool,

    /// Force overwrite existing config
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &str) -> Result<()> {
    let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    println!("{}", "📝 Initializing mockup project...".bright_blue().bold());

    let mut config = Config {
        out_dir: args.out_dir.clone(),
        ..Default::default()
    };
    config.options.css_strategy = args.css;
    config.options.typescript = args.typescript;

    let config_json = serde_json::to_string_pretty(&config)?;
    fs::write(&config_path, config_json)?;

    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);
    println!();
    println!("{}", "✅ Project initialized!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Run: mockup convert mockup.html");
    println!("  2. Check output in {}/", args.out_dir);

    Ok(())
}
