use crate::schema::{describe_issues, SchemaIssue};
use prose_model::ModelError;
use thiserror::Error;

/// Common error type shared by the prose crates
#[derive(Error, Debug)]
pub enum CommonError {
    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    #[error("Schema violation: {}", describe_issues(.0))]
    Schema(Vec<SchemaIssue>),
}
