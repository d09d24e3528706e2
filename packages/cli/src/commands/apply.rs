use super::load_value;
use crate::config::Config;
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use prose_editor::{Command, CommandOutcome, Editor};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ApplyArgs {
    /// Value JSON file
    pub value: PathBuf,

    /// JSON array of commands
    pub script: PathBuf,

    /// Write the resulting value here instead of stdout
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Overwrite the input value file
    #[arg(long)]
    pub in_place: bool,

    /// Stop at the first rejected command
    #[arg(long)]
    pub strict: bool,
}

pub fn apply(args: ApplyArgs, config: &Config, cwd: &str) -> Result<()> {
    let (value_path, value) = load_value(cwd, &args.value)?;
    let script_path = PathBuf::from(cwd).join(&args.script);
    let script = fs::read_to_string(&script_path)
        .with_context(|| format!("Cannot read {}", script_path.display()))?;
    let commands = Command::script_from_json(&script)
        .with_context(|| format!("Invalid command script in {}", script_path.display()))?;

    let mut editor = Editor::new(value, config.editor.clone())?;
    let mut rejected = 0;

    for (index, command) in commands.into_iter().enumerate() {
        let name = command.name();
        match editor.submit(command) {
            CommandOutcome::Changed => {
                eprintln!("  {} {} {}", "✓".green(), index, name);
            }
            CommandOutcome::Unchanged | CommandOutcome::Cancelled => {
                eprintln!("  {} {} {} {}", "·".dimmed(), index, name, "(no change)".dimmed());
            }
            CommandOutcome::Rejected(e) => {
                rejected += 1;
                eprintln!("  {} {} {} - {}", "✗".red(), index, name, e.to_string().red());
                if args.strict {
                    return Err(anyhow::anyhow!("Command {} ({}) rejected: {}", index, name, e));
                }
            }
        }
    }

    eprintln!();
    if rejected == 0 {
        eprintln!("{} Applied {} changes", "✅".green(), editor.version());
    } else {
        eprintln!(
            "{} Applied {} changes, {} rejected",
            "⚠️".yellow(),
            editor.version(),
            rejected
        );
    }

    let output = editor.value().to_json()?;
    let target = if args.in_place {
        Some(value_path)
    } else {
        args.out.map(|out| PathBuf::from(cwd).join(out))
    };
    match target {
        Some(path) => fs::write(path, output)?,
        None => println!("{}", output),
    }
    Ok(())
}
