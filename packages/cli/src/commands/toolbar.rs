use super::load_value;
use crate::config::Config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use prose_editor::{ButtonState, Editor};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ToolbarArgs {
    /// Value JSON file
    pub value: PathBuf,

    /// Print the state as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn toolbar(args: ToolbarArgs, config: &Config, cwd: &str) -> Result<()> {
    let (_, value) = load_value(cwd, &args.value)?;
    let editor = Editor::new(value, config.editor.clone())?;
    let state = editor.toolbar();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&state)?);
        return Ok(());
    }

    println!("{}", "Marks".bright_blue().bold());
    print_buttons(&state.marks);
    println!("{}", "Inlines".bright_blue().bold());
    print_buttons(&[ButtonState {
        name: "link",
        active: state.link,
    }]);
    println!("{}", "Blocks".bright_blue().bold());
    print_buttons(&state.blocks);
    Ok(())
}

fn print_buttons(buttons: &[ButtonState]) {
    for button in buttons {
        if button.active {
            println!("  {} {}", "●".green(), button.name.bold());
        } else {
            println!("  {} {}", "○".dimmed(), button.name.dimmed());
        }
    }
}
