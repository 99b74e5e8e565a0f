//! Markdown rendering stage.

use crate::build::markdown::render_markdown;
use crate::build::pipeline::{
    PipelineContext, PipelineError, PipelineState, ProcessingDocument, Stage,
};

/// Stage that renders the downloaded markdown to an HTML fragment.
///
/// After this stage, `doc.content` holds HTML and the markdown is gone.
pub struct MarkdownStage;

impl Stage for MarkdownStage {
    fn name(&self) -> &'static str {
        "markdown"
    }

    fn state(&self) -> PipelineState {
        PipelineState::Rendering
    }

    fn progress(&self, _ctx: &PipelineContext) -> String {
        "Converting markdown to HTML".to_string()
    }

    fn process(
        &self,
        doc: &mut ProcessingDocument,
        ctx: &PipelineContext,
    ) -> Result<(), PipelineError> {
        doc.content = render_markdown(&doc.content, ctx.markdown_config)?;
        Ok(())
    }
}
