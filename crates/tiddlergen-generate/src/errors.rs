use thiserror::Error;

use crate::generators::TemplateError;

/// Errors emitted by the generation engine.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("invalid options: {0}")]
    InvalidOptions(String),
    #[error("template error: {0}")]
    Template(#[from] TemplateError),
    #[error(transparent)]
    Core(#[from] tiddlergen_core::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
