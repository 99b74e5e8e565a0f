//! Pipeline context for sharing inputs across stages.

use std::path::Path;

use crate::build::fetch::Fetch;
use crate::config::MarkdownConfig;

/// Everything the stages read but never modify.
///
/// Built once by the builder from settings; stages only see borrowed values.
pub struct PipelineContext<'a> {
    /// URL of the markdown document
    pub source_url: &'a str,

    /// Page title
    pub title: &'a str,

    /// Stylesheet inlined into the page
    pub stylesheet_path: &'a Path,

    /// File the page is written to
    pub destination: &'a Path,

    /// Markdown extensions to enable
    pub markdown_config: &'a MarkdownConfig,

    /// Retrieves the markdown document
    pub fetcher: &'a dyn Fetch,
}
