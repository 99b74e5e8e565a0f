//! Publishing pipeline.
//!
//! The pipeline moves one document through a series of stages:
//! 1. Fetch (download the markdown)
//! 2. Markdown rendering (to an HTML fragment)
//! 3. Stylesheet loading
//! 4. Page writing (template, whitespace collapse, output to disk)
//!
//! Stages run strictly in order. The first failure stops the run; no later
//! stage executes, so the output file is only touched once everything before
//! the write stage has succeeded.

mod context;
mod document;
mod error;
mod stages;

use std::io::Write;

pub use context::PipelineContext;
pub use document::ProcessingDocument;
pub use error::{PipelineError, StageError};

use stages::{FetchStage, MarkdownStage, StylesheetStage, WriteStage};

/// Where a pipeline run is.
///
/// `Start → Fetching → Rendering → StylingLoaded → Writing → Done`, with any
/// working state able to move to `Failed`. `Done` and `Failed` are terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineState {
    Start,
    Fetching,
    Rendering,
    StylingLoaded,
    Writing,
    Done,
    /// The run stopped; holds the error message.
    Failed(String),
}

/// A stage in the publishing pipeline.
pub trait Stage {
    /// Unique name for this stage (used in error reports).
    fn name(&self) -> &'static str;

    /// State the run is in while this stage works.
    fn state(&self) -> PipelineState;

    /// Human-readable line announcing the stage.
    fn progress(&self, ctx: &PipelineContext) -> String;

    /// Process the document through this stage.
    fn process(
        &self,
        doc: &mut ProcessingDocument,
        ctx: &PipelineContext,
    ) -> Result<(), PipelineError>;
}

/// Outcome of a successful run.
#[derive(Debug)]
pub struct PipelineRun {
    pub document: ProcessingDocument,
    /// Every state visited, from `Start` to `Done`
    pub history: Vec<PipelineState>,
}

/// The publishing pipeline.
///
/// The default pipeline is: fetch → markdown → stylesheet → write.
pub struct Pipeline {
    stages: Vec<Box<dyn Stage>>,
}

impl Pipeline {
    /// Create an empty pipeline with no stages.
    pub fn new() -> Self {
        Self { stages: Vec::new() }
    }

    /// Create the default pipeline with standard stages.
    pub fn default_pipeline() -> Self {
        let mut pipeline = Self::new();
        pipeline.add_stage(FetchStage);
        pipeline.add_stage(MarkdownStage);
        pipeline.add_stage(StylesheetStage);
        pipeline.add_stage(WriteStage);
        pipeline
    }

    /// Add a stage to the end of the pipeline.
    pub fn add_stage<S: Stage + 'static>(&mut self, stage: S) -> &mut Self {
        self.stages.push(Box::new(stage));
        self
    }

    /// Run every stage in order, announcing each one on `progress`.
    pub fn run(
        &self,
        ctx: &PipelineContext,
        progress: &mut dyn Write,
    ) -> Result<PipelineRun, StageError> {
        let mut history = vec![PipelineState::Start];
        let mut doc = ProcessingDocument::default();

        for stage in &self.stages {
            let state = stage.state();
            tracing::debug!(stage = stage.name(), ?state, "entering stage");
            history.push(state);

            let result = writeln!(progress, "{}", stage.progress(ctx))
                .map_err(PipelineError::from)
                .and_then(|()| stage.process(&mut doc, ctx));

            if let Err(source) = result {
                tracing::debug!(stage = stage.name(), error = %source, "stage failed");
                history.push(PipelineState::Failed(source.to_string()));
                return Err(StageError {
                    stage: stage.name(),
                    source,
                    history,
                });
            }
        }

        history.push(PipelineState::Done);
        Ok(PipelineRun {
            document: doc,
            history,
        })
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::default_pipeline()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::path::Path;

    use super::*;
    use crate::build::fetch::Fetch;
    use crate::config::MarkdownConfig;

    struct NoFetch;

    impl Fetch for NoFetch {
        fn fetch(&self, _url: &str) -> Result<String, PipelineError> {
            unreachable!("no stage in these tests fetches")
        }
    }

    /// Records its name into a shared log and optionally fails.
    ///
    /// Boxed stages must be 'static, so each test leaks its log.
    struct Recorder {
        name: &'static str,
        log: &'static RefCell<Vec<&'static str>>,
        fail: bool,
    }

    impl Stage for Recorder {
        fn name(&self) -> &'static str {
            self.name
        }

        fn state(&self) -> PipelineState {
            PipelineState::Rendering
        }

        fn progress(&self, _ctx: &PipelineContext) -> String {
            format!("running {}", self.name)
        }

        fn process(
            &self,
            doc: &mut ProcessingDocument,
            _ctx: &PipelineContext,
        ) -> Result<(), PipelineError> {
            self.log.borrow_mut().push(self.name);
            if self.fail {
                return Err(PipelineError::stage(self.name, "stage failure"));
            }
            doc.content.push_str(self.name);
            Ok(())
        }
    }

    fn with_context<T>(f: impl FnOnce(&PipelineContext) -> T) -> T {
        let markdown_config = MarkdownConfig::default();
        let ctx = PipelineContext {
            source_url: "https://example.com/doc.md",
            title: "T",
            stylesheet_path: Path::new("style.css"),
            destination: Path::new("out.html"),
            markdown_config: &markdown_config,
            fetcher: &NoFetch,
        };
        f(&ctx)
    }

    #[test]
    fn test_runs_stages_in_order() {
        let log: &'static RefCell<Vec<&'static str>> = Box::leak(Box::default());
        let mut pipeline = Pipeline::new();
        pipeline.add_stage(Recorder { name: "a", log, fail: false });
        pipeline.add_stage(Recorder { name: "b", log, fail: false });

        let mut progress: Vec<u8> = Vec::new();
        let run = with_context(|ctx| pipeline.run(ctx, &mut progress)).unwrap();

        assert_eq!(*log.borrow(), vec!["a", "b"]);
        assert_eq!(run.document.content, "ab");
        assert_eq!(String::from_utf8(progress).unwrap(), "running a\nrunning b\n");
        assert_eq!(run.history.first(), Some(&PipelineState::Start));
        assert_eq!(run.history.last(), Some(&PipelineState::Done));
    }

    #[test]
    fn test_stops_at_first_failure() {
        let log: &'static RefCell<Vec<&'static str>> = Box::leak(Box::default());
        let mut pipeline = Pipeline::new();
        pipeline.add_stage(Recorder { name: "a", log, fail: true });
        pipeline.add_stage(Recorder { name: "b", log, fail: false });

        let mut progress: Vec<u8> = Vec::new();
        let err = with_context(|ctx| pipeline.run(ctx, &mut progress)).unwrap_err();

        assert_eq!(err.stage, "a");
        assert_eq!(*log.borrow(), vec!["a"]);
        assert_eq!(String::from_utf8(progress).unwrap(), "running a\n");
        assert!(matches!(
            err.history.as_slice(),
            [PipelineState::Start, PipelineState::Rendering, PipelineState::Failed(reason)]
                if reason.contains("stage failure")
        ));
    }
}
