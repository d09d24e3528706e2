//! Error types for the editor

use prose_common::{describe_issues, CommonError};
use prose_model::ModelError;
use thiserror::Error;

/// Why a command could not produce a new value
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    #[error("Schema violation: {0}")]
    SchemaViolation(String),

    #[error("Cancelled by user")]
    UserCancelled,

    #[error("Invalid paste content: {0}")]
    InvalidPasteContent(String),

    #[error("Model error: {0}")]
    Model(#[from] ModelError),
}

impl From<CommonError> for CommandError {
    fn from(e: CommonError) -> Self {
        match e {
            CommonError::Model(e) => CommandError::Model(e),
            CommonError::Schema(issues) => CommandError::SchemaViolation(describe_issues(&issues)),
        }
    }
}

pub type CommandResult<T> = Result<T, CommandError>;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    #[error("Command error: {0}")]
    Command(#[from] CommandError),

    #[error("Invalid config: {0}")]
    Config(String),
}
