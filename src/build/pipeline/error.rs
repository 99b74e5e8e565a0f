//! Pipeline error types.

use crate::build::fetch::{DecodeError, FetchError};
use crate::build::markdown::RenderError;
use crate::build::page::{AssetMissingError, WriteError};

use super::PipelineState;

/// Errors that can occur while a stage processes the document.
#[derive(thiserror::Error, Debug)]
pub enum PipelineError {
    #[error("fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("markdown rendering error: {0}")]
    Render(#[from] RenderError),

    #[error("missing asset: {0}")]
    AssetMissing(#[from] AssetMissingError),

    #[error("write error: {0}")]
    Write(#[from] WriteError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("stage '{stage}' failed: {message}")]
    Stage { stage: String, message: String },
}

impl PipelineError {
    /// Create a stage-specific error.
    pub fn stage(stage: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Stage {
            stage: stage.into(),
            message: message.into(),
        }
    }
}

/// A pipeline run that stopped at a stage.
///
/// Carries the failing stage, the cause and every state the run went
/// through, ending with `Failed`.
#[derive(thiserror::Error, Debug)]
#[error("{stage} stage failed: {source}")]
pub struct StageError {
    pub stage: &'static str,
    #[source]
    pub source: PipelineError,
    pub history: Vec<PipelineState>,
}
