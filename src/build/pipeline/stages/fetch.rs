//! Download stage.

use crate::build::pipeline::{
    PipelineContext, PipelineError, PipelineState, ProcessingDocument, Stage,
};

/// Stage that downloads the markdown document into `doc.content`.
pub struct FetchStage;

impl Stage for FetchStage {
    fn name(&self) -> &'static str {
        "fetch"
    }

    fn state(&self) -> PipelineState {
        PipelineState::Fetching
    }

    fn progress(&self, ctx: &PipelineContext) -> String {
        format!("Downloading markdown from {}", ctx.source_url)
    }

    fn process(
        &self,
        doc: &mut ProcessingDocument,
        ctx: &PipelineContext,
    ) -> Result<(), PipelineError> {
        doc.content = ctx.fetcher.fetch(ctx.source_url)?;
        Ok(())
    }
}
