use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use prose_editor::{BlockType, Platform};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Block type used when a block toggle turns off
    #[arg(short, long, default_value = "paragraph")]
    pub default_block: String,

    /// Use Apple key bindings (Cmd instead of Ctrl)
    #[arg(long)]
    pub apple: bool,

    /// Force overwrite existing config
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &str) -> Result<()> {
    let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

    // Check if config already exists
    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    let mut config = Config::default();
    config.editor.default_block = args.default_block.parse::<BlockType>()?;
    if args.apple {
        config.editor.platform = Platform::Apple;
    }
    config.editor.validate()?;

    let config_json = serde_json::to_string_pretty(&config)?;
    fs::write(&config_path, config_json)?;

    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);
    println!();
    println!("Next steps:");
    println!("  1. Run: prose render value.json");
    println!("  2. Run: prose apply value.json script.json");

    Ok(())
}
