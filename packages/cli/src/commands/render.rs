use super::load_value;
use crate::config::Config;
use anyhow::Result;
use clap::Args;
use prose_render::{to_html, Renderer};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Value JSON file
    pub value: PathBuf,

    /// Print the rendered node tree as JSON instead of HTML
    #[arg(long)]
    pub json: bool,

    /// Single-line HTML
    #[arg(long)]
    pub compact: bool,

    /// Write to a file instead of stdout
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

pub fn render(args: RenderArgs, config: &Config, cwd: &str) -> Result<()> {
    let (path, value) = load_value(cwd, &args.value)?;
    let rendered = Renderer::new().render_document(&value.document);
    tracing::info!(path = %path.display(), blocks = rendered.nodes.len(), "Rendered");

    let output = if args.json {
        serde_json::to_string_pretty(&rendered)?
    } else {
        let mut options = config.html.to_options();
        if args.compact {
            options.pretty = false;
        }
        to_html(&rendered, &options)
    };

    match args.out {
        Some(out) => fs::write(PathBuf::from(cwd).join(out), output)?,
        None => print!("{}", output),
    }
    Ok(())
}
