//! Settings type definitions.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

// =============================================================================
// Top-level settings
// =============================================================================

/// Everything a publishing run needs to locate its input, its stylesheet and
/// its output.
///
/// Keys mirror the environment variable names in lower case, so
/// `AMAZON_S3_REGION` in the environment and `amazon_s3_region` in the YAML
/// file set the same value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Storage region, used as the host prefix (e.g. `s3-sa-east-1`)
    pub amazon_s3_region: String,
    /// Bucket holding the datasets
    pub amazon_s3_bucket: String,
    /// Dataset release date, used as the file name prefix (e.g. `2017-05-21`)
    pub amazon_s3_dataset_date: String,
    /// Directory the HTML page is written into
    #[serde(default = "default_assets_root")]
    pub assets_root: PathBuf,
    /// Project directory holding `node_modules`
    #[serde(default = "default_base_dir")]
    pub base_dir: PathBuf,
    #[serde(default)]
    pub markdown: MarkdownConfig,
}

fn default_assets_root() -> PathBuf {
    PathBuf::from("assets")
}

fn default_base_dir() -> PathBuf {
    PathBuf::from(".")
}

// =============================================================================
// Markdown configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkdownConfig {
    /// Extensions to enable for markdown processing
    #[serde(default = "default_markdown_extensions")]
    pub extensions: Vec<String>,
}

fn default_markdown_extensions() -> Vec<String> {
    vec!["gfm".to_string()]
}

impl Default for MarkdownConfig {
    fn default() -> Self {
        Self {
            extensions: default_markdown_extensions(),
        }
    }
}
