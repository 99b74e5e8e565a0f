//! Default pipeline stages.
//!
//! 1. **FetchStage** - Download the markdown document
//! 2. **MarkdownStage** - Convert markdown to an HTML fragment
//! 3. **StylesheetStage** - Load the GitHub markdown stylesheet
//! 4. **WriteStage** - Wrap, collapse and write the page

mod fetch;
mod markdown;
mod stylesheet;
mod write;

pub use fetch::FetchStage;
pub use markdown::MarkdownStage;
pub use stylesheet::StylesheetStage;
pub use write::WriteStage;
