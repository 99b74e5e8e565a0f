//! Stylesheet loading stage.

use crate::build::page::load_stylesheet;
use crate::build::pipeline::{
    PipelineContext, PipelineError, PipelineState, ProcessingDocument, Stage,
};

/// Stage that reads the stylesheet to inline into the page.
pub struct StylesheetStage;

impl Stage for StylesheetStage {
    fn name(&self) -> &'static str {
        "stylesheet"
    }

    fn state(&self) -> PipelineState {
        PipelineState::StylingLoaded
    }

    fn progress(&self, _ctx: &PipelineContext) -> String {
        "Applying GitHub CSS styles".to_string()
    }

    fn process(
        &self,
        doc: &mut ProcessingDocument,
        ctx: &PipelineContext,
    ) -> Result<(), PipelineError> {
        doc.stylesheet = Some(load_stylesheet(ctx.stylesheet_path)?);
        Ok(())
    }
}
