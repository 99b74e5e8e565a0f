//! Source URL and filesystem path derivation.
//!
//! Everything a run touches is derived from settings here:
//! - The remote markdown document URL
//! - The HTML output file
//! - The GitHub markdown stylesheet shipped in `node_modules`

use std::path::{Path, PathBuf};

/// Host suffix of the object storage serving the datasets.
const STORAGE_HOST: &str = "amazonaws.com";

/// File name of the published page inside the assets root.
pub const OUTPUT_FILE_NAME: &str = "ceap-datasets.html";

/// Title of the published page.
pub const PAGE_TITLE: &str = "Quota for Exercising Parliamentary Activity (CEAP)";

/// Build the URL of the datasets description for a given release.
///
/// # Examples
/// ```ignore
/// dataset_url("s3-sa-east-1", "serenata", "2017-05-21")
///     => "https://s3-sa-east-1.amazonaws.com/serenata/2017-05-21-ceap-datasets.md"
/// ```
pub fn dataset_url(region: &str, bucket: &str, date: &str) -> String {
    format!("https://{region}.{STORAGE_HOST}/{bucket}/{date}-ceap-datasets.md")
}

/// Where the published page is written.
pub fn output_path(assets_root: &Path) -> PathBuf {
    assets_root.join(OUTPUT_FILE_NAME)
}

/// Where the GitHub markdown stylesheet is read from.
pub fn stylesheet_path(base_dir: &Path) -> PathBuf {
    base_dir
        .join("node_modules")
        .join("github-markdown-css")
        .join("github-markdown.css")
}
