use std::io::Write;
use std::path::PathBuf;

use crate::config::Settings;

use super::fetch::{Fetch, FetchError, HttpFetcher};
use super::paths::{PAGE_TITLE, dataset_url, output_path, stylesheet_path};
use super::pipeline::{Pipeline, PipelineContext, PipelineState, StageError};

#[derive(Debug)]
pub struct BuildResult {
    pub source_url: String,
    pub destination: PathBuf,
    pub bytes: usize,
    pub history: Vec<PipelineState>,
}

pub struct Builder {
    settings: Settings,
    fetcher: Box<dyn Fetch>,
}

impl Builder {
    /// Create a builder that downloads over HTTP.
    pub fn new(settings: Settings) -> Result<Self, FetchError> {
        Ok(Self::with_fetcher(settings, HttpFetcher::new()?))
    }

    pub fn with_fetcher(settings: Settings, fetcher: impl Fetch + 'static) -> Self {
        Self {
            settings,
            fetcher: Box::new(fetcher),
        }
    }

    pub fn source_url(&self) -> String {
        dataset_url(
            &self.settings.amazon_s3_region,
            &self.settings.amazon_s3_bucket,
            &self.settings.amazon_s3_dataset_date,
        )
    }

    pub fn destination(&self) -> PathBuf {
        output_path(&self.settings.assets_root)
    }

    pub fn stylesheet_path(&self) -> PathBuf {
        stylesheet_path(&self.settings.base_dir)
    }

    /// Download, render and publish the page, writing progress lines to
    /// `progress`.
    pub fn build(&self, progress: &mut dyn Write) -> Result<BuildResult, StageError> {
        let source_url = self.source_url();
        let destination = self.destination();
        let stylesheet_path = self.stylesheet_path();

        let ctx = PipelineContext {
            source_url: &source_url,
            title: PAGE_TITLE,
            stylesheet_path: &stylesheet_path,
            destination: &destination,
            markdown_config: &self.settings.markdown,
            fetcher: self.fetcher.as_ref(),
        };

        let run = Pipeline::default_pipeline().run(&ctx, progress)?;
        tracing::debug!(history = ?run.history, "pipeline finished");

        Ok(BuildResult {
            bytes: run.document.bytes_written.unwrap_or_default(),
            source_url,
            destination,
            history: run.history,
        })
    }
}
