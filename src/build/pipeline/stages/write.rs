//! Page writing stage.
//!
//! Composes the final page and writes it over the destination file.

use crate::build::page::publish;
use crate::build::pipeline::{
    PipelineContext, PipelineError, PipelineState, ProcessingDocument, Stage,
};

/// Stage that wraps the HTML fragment in the page skeleton, collapses
/// whitespace and writes the result to `ctx.destination`.
pub struct WriteStage;

impl Stage for WriteStage {
    fn name(&self) -> &'static str {
        "write"
    }

    fn state(&self) -> PipelineState {
        PipelineState::Writing
    }

    fn progress(&self, ctx: &PipelineContext) -> String {
        format!("Saving HTML to {}", ctx.destination.display())
    }

    fn process(
        &self,
        doc: &mut ProcessingDocument,
        ctx: &PipelineContext,
    ) -> Result<(), PipelineError> {
        let stylesheet = doc.stylesheet.as_deref().ok_or_else(|| {
            PipelineError::stage(
                "write",
                "no stylesheet loaded (was the stylesheet stage run?)",
            )
        })?;

        let bytes = publish(ctx.title, stylesheet, &doc.content, ctx.destination)?;
        tracing::info!(path = %ctx.destination.display(), bytes, "published page");

        doc.bytes_written = Some(bytes);
        Ok(())
    }
}
