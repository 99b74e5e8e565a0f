//! Document state carried through the pipeline.

/// The document being published.
///
/// State evolves through the stages:
///
/// 1. After fetch: `content` = downloaded markdown
/// 2. After markdown: `content` = HTML fragment (the markdown is dropped)
/// 3. After stylesheet: `stylesheet` = CSS to inline
/// 4. After write: `bytes_written` = size of the published page
#[derive(Debug, Default)]
pub struct ProcessingDocument {
    /// Content being processed, markdown first and HTML after rendering.
    pub content: String,

    /// Stylesheet text.
    ///
    /// None until the stylesheet stage populates it.
    pub stylesheet: Option<String>,

    /// Number of bytes written to the destination.
    pub bytes_written: Option<usize>,
}
