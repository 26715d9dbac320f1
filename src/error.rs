use std::path::PathBuf;

use thiserror::Error;

pub type ReportResult<T> = Result<T, ReportError>;

#[derive(Error, Debug)]
pub enum ReportError {
    /// Upload is not a readable table, or the identifier column is absent.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("No data found for zone '{zone}'.")]
    NotFound { zone: String },

    #[error("Template file not found: {}", .0.display())]
    MissingTemplate(PathBuf),

    #[error("Template rendering failed: {0}")]
    RenderFailure(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ReportError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        ReportError::InvalidInput(message.into())
    }

    pub fn render_failure(message: impl Into<String>) -> Self {
        ReportError::RenderFailure(message.into())
    }

    /// True for errors caused by the caller's input rather than the server.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ReportError::InvalidInput(_) | ReportError::NotFound { .. }
        )
    }
}
