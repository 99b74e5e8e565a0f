//! Page composition and publishing.
//!
//! Wraps the rendered fragment in a fixed HTML skeleton with the GitHub
//! markdown stylesheet inlined, collapses source indentation and writes the
//! result over the destination file.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use tempfile::NamedTempFile;

/// Inline layout styles for the page body.
const BODY_STYLE: &str = concat!(
    "box-sizing: border-box;",
    "min-width: 200px;",
    "max-width: 980px;",
    "margin: 0 auto;",
    "padding: 45px;",
);

/// Leading whitespace of the document, or a newline and the indentation after it.
///
/// `\x1c`-`\x1f` (file, group, record and unit separators) count as
/// whitespace here, as they do for `str::isspace`-style matching.
static INSIGNIFICANT_WHITESPACE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(^[\s\x1c-\x1f]*)|\n[\s\x1c-\x1f]*").expect("valid whitespace pattern")
});

#[derive(thiserror::Error, Debug)]
#[error("stylesheet not available at {path}: {source}")]
pub struct AssetMissingError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

#[derive(thiserror::Error, Debug)]
#[error("failed to write {path}: {source}")]
pub struct WriteError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

/// Read the stylesheet that gets inlined into the page.
pub fn load_stylesheet(path: &Path) -> Result<String, AssetMissingError> {
    std::fs::read_to_string(path).map_err(|source| AssetMissingError {
        path: path.to_path_buf(),
        source,
    })
}

/// Fill the page skeleton.
///
/// Each value is substituted once, so braces or placeholder-like text inside
/// the stylesheet or the body are copied through untouched.
pub fn compose_page(title: &str, stylesheet: &str, body: &str) -> String {
    format!(
        r#"
        <!DOCTYPE html>
        <html lang="en">
        <head>
            <meta charset="UTF-8">
            <title>{title}</title>
            <style>{stylesheet}</style>
        </head>
        <body class="markdown-body" style="{BODY_STYLE}">
          {body}
        </body>
        </html>
    "#
    )
}

/// Remove leading whitespace and every newline together with the whitespace
/// following it.
///
/// This is not HTML-aware: a line break inside text or `<pre>` content is
/// removed as well, so `"hello\n  world"` becomes `"helloworld"`.
pub fn minify(html: &str) -> String {
    INSIGNIFICANT_WHITESPACE.replace_all(html, "").into_owned()
}

/// Compose, minify and write the page to `destination`.
///
/// Returns the number of bytes written.
pub fn publish(
    title: &str,
    stylesheet: &str,
    body: &str,
    destination: &Path,
) -> Result<usize, WriteError> {
    let page = minify(&compose_page(title, stylesheet, body));
    write_atomic(destination, page.as_bytes())?;
    Ok(page.len())
}

/// Write `contents` next to `destination` and rename it into place, so the
/// destination holds either the old or the new document, never a partial one.
fn write_atomic(destination: &Path, contents: &[u8]) -> Result<(), WriteError> {
    let write_failed = |source| WriteError {
        path: destination.to_path_buf(),
        source,
    };

    let parent = match destination.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent).map_err(write_failed)?;

    let mut staged = NamedTempFile::new_in(parent).map_err(write_failed)?;
    staged.write_all(contents).map_err(write_failed)?;
    staged.as_file().sync_all().map_err(write_failed)?;
    staged
        .persist(destination)
        .map_err(|e| write_failed(e.error))?;

    Ok(())
}
