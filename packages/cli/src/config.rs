use prose_editor::EditorConfig;
use prose_render::HtmlOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_NAME: &str = "prose.config.json";

/// prose configuration file format
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Editor behaviour (default block, platform, prompts...)
    #[serde(flatten)]
    pub editor: EditorConfig,

    /// HTML output options
    #[serde(default)]
    pub html: HtmlConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HtmlConfig {
    /// Put blocks on their own lines
    pub pretty: bool,

    pub indent: String,

    /// Emit `data-key` attributes
    pub keys: bool,
}

impl Default for HtmlConfig {
    fn default() -> Self {
        let options = HtmlOptions::default();
        Self {
            pretty: options.pretty,
            indent: options.indent,
            keys: options.keys,
        }
    }
}

impl HtmlConfig {
    pub fn to_options(&self) -> HtmlOptions {
        HtmlOptions {
            pretty: self.pretty,
            indent: self.indent.clone(),
            keys: self.keys,
        }
    }
}

impl Config {
    /// Load config from a directory, or from an explicit file
    pub fn load(cwd: &str, explicit: Option<&Path>) -> anyhow::Result<Self> {
        let config_path = match explicit {
            Some(path) => PathBuf::from(cwd).join(path),
            None => PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            config.editor.validate()?;
            tracing::debug!(path = %config_path.display(), "Loaded config");
            Ok(config)
        } else if explicit.is_some() {
            Err(anyhow::anyhow!("Config file does not exist: {}", config_path.display()))
        } else {
            // Return default config if none exists
            Ok(Config::default())
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            editor: EditorConfig::default(),
            html: HtmlConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prose_editor::{BlockType, Platform};

    #[test]
    fn test_parse_config() {
        let json = r#"{
            "defaultBlock": "heading-one",
            "platform": "apple",
            "html": { "pretty": false }
        }"#;

        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.editor.default_block, BlockType::HeadingOne);
        assert_eq!(config.editor.platform, Platform::Apple);
        assert!(config.editor.auto_link_on_paste);
        assert!(!config.html.pretty);
        assert_eq!(config.html.indent, "  ");
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.editor.default_block, BlockType::Paragraph);
        assert!(config.html.pretty);
    }

    #[test]
    fn test_missing_explicit_config_fails() {
        let result = Config::load(".", Some(Path::new("does-not-exist.json")));
        assert!(result.is_err());
    }
}
