mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{apply, init, render, toolbar, ApplyArgs, InitArgs, RenderArgs, ToolbarArgs};
use config::Config;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// prose - rich-text document editing from the command line
#[derive(Parser, Debug)]
#[command(name = "prose")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Config file (defaults to prose.config.json in the current directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a prose.config.json
    Init(InitArgs),

    /// Render a value to HTML
    Render(RenderArgs),

    /// Apply a command script to a value
    Apply(ApplyArgs),

    /// Show which toolbar buttons are active for a value
    Toolbar(ToolbarArgs),
}

fn run(cli: Cli, cwd: &str) -> anyhow::Result<()> {
    let load = || Config::load(cwd, cli.config.as_deref());

    match cli.command {
        Command::Init(args) => init(args, cwd),
        Command::Render(args) => render(args, &load()?, cwd),
        Command::Apply(args) => apply(args, &load()?, cwd),
        Command::Toolbar(args) => toolbar(args, &load()?, cwd),
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = std::env::current_dir()
        .map_err(anyhow::Error::from)
        .and_then(|cwd| run(cli, &cwd.display().to_string()));

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
