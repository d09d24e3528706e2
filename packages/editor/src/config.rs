use crate::errors::EditorError;
use crate::hotkeys::Platform;
use crate::links::{TEXT_PROMPT, URL_PROMPT};
use prose_model::BlockType;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Editor behaviour settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorConfig {
    /// Block type used when a block toggle turns off
    pub default_block: BlockType,

    /// Decides which key `mod` means in hotkeys
    pub platform: Platform,

    /// Turn pasted URLs into links over the selection
    pub auto_link_on_paste: bool,

    pub link_url_prompt: String,
    pub link_text_prompt: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            default_block: BlockType::Paragraph,
            platform: Platform::default(),
            auto_link_on_paste: true,
            link_url_prompt: URL_PROMPT.to_string(),
            link_text_prompt: TEXT_PROMPT.to_string(),
        }
    }
}

impl EditorConfig {
    pub fn from_json(json: &str) -> Result<Self, EditorError> {
        let config: EditorConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, EditorError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn validate(&self) -> Result<(), EditorError> {
        if self.default_block.is_list() || self.default_block == BlockType::ListItem {
            return Err(EditorError::Config(format!(
                "defaultBlock must be a leaf block type, got {}",
                self.default_block
            )));
        }
        Ok(())
    }
}
