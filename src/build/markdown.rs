//! GitHub-flavored markdown rendering.
//!
//! pulldown-cmark covers tables, strikethrough and task lists natively. Bare
//! URL autolinking is not part of CommonMark, so it runs as a pass over the
//! event stream before the HTML writer.

use std::sync::LazyLock;

use pulldown_cmark::{
    CowStr, Event, LinkType, Options, Parser, Tag, TagEnd, TextMergeStream, html,
};
use regex::Regex;

use crate::config::MarkdownConfig;

#[derive(thiserror::Error, Debug)]
pub enum RenderError {
    #[error("invalid markdown extension: {0}")]
    InvalidExtension(String),
}

/// Bare `http(s)://` and `www.` URLs, up to the next whitespace or angle bracket.
///
/// What may precede a match and whether the host is a domain is checked in
/// `link_text`.
static BARE_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:https?://|www\.)[^\s<>]+").expect("valid URL pattern"));

/// Parser options and passes resolved from the configured extension names.
struct Extensions {
    options: Options,
    autolink: bool,
}

impl Extensions {
    fn from_config(config: &MarkdownConfig) -> Result<Self, RenderError> {
        let mut options = Options::empty();
        let mut autolink = false;

        for extension in &config.extensions {
            match extension.as_str() {
                "gfm" => {
                    options.insert(Options::ENABLE_TABLES);
                    options.insert(Options::ENABLE_STRIKETHROUGH);
                    options.insert(Options::ENABLE_TASKLISTS);
                    options.insert(Options::ENABLE_GFM);
                    autolink = true;
                }
                "autolink" => autolink = true,
                "footnotes" => options.insert(Options::ENABLE_FOOTNOTES),
                "strikethrough" => options.insert(Options::ENABLE_STRIKETHROUGH),
                "tables" => options.insert(Options::ENABLE_TABLES),
                "tasklists" => options.insert(Options::ENABLE_TASKLISTS),
                other => return Err(RenderError::InvalidExtension(other.to_string())),
            }
        }

        Ok(Self { options, autolink })
    }
}

/// Render markdown to an HTML fragment.
pub fn render_markdown(markdown: &str, config: &MarkdownConfig) -> Result<String, RenderError> {
    let extensions = Extensions::from_config(config)?;

    let parser = TextMergeStream::new(Parser::new_ext(markdown, extensions.options));

    let mut html_output = String::new();
    if extensions.autolink {
        html::push_html(&mut html_output, autolink(parser).into_iter());
    } else {
        html::push_html(&mut html_output, parser);
    }

    Ok(html_output)
}

/// Turn bare URLs in plain text into links.
///
/// Text inside links, images and code blocks is left alone.
fn autolink<'a>(events: impl Iterator<Item = Event<'a>>) -> Vec<Event<'a>> {
    let mut output = Vec::new();
    let mut opaque_depth = 0usize;

    for event in events {
        match event {
            Event::Start(Tag::Link { .. } | Tag::Image { .. } | Tag::CodeBlock(_)) => {
                opaque_depth += 1;
                output.push(event);
            }
            Event::End(TagEnd::Link | TagEnd::Image | TagEnd::CodeBlock) => {
                opaque_depth = opaque_depth.saturating_sub(1);
                output.push(event);
            }
            Event::Text(text) if opaque_depth == 0 && BARE_URL.is_match(&text) => {
                link_text(&text, &mut output);
            }
            _ => output.push(event),
        }
    }

    output
}

/// Split `text` around bare URLs, emitting link events for each URL.
fn link_text<'a>(text: &str, output: &mut Vec<Event<'a>>) {
    let mut last = 0;

    for found in BARE_URL.find_iter(text) {
        let start = found.start();
        if !at_link_boundary(&text[..start]) {
            continue;
        }

        let url = trim_url(found.as_str());
        if !has_domain(url) {
            continue;
        }

        let end = start + url.len();

        if start > last {
            output.push(Event::Text(CowStr::from(text[last..start].to_string())));
        }

        let dest_url = if url.starts_with("www.") {
            format!("http://{url}")
        } else {
            url.to_string()
        };

        output.push(Event::Start(Tag::Link {
            link_type: LinkType::Autolink,
            dest_url: CowStr::from(dest_url),
            title: CowStr::Borrowed(""),
            id: CowStr::Borrowed(""),
        }));
        output.push(Event::Text(CowStr::from(url.to_string())));
        output.push(Event::End(TagEnd::Link));

        last = end;
    }

    if last < text.len() {
        output.push(Event::Text(CowStr::from(text[last..].to_string())));
    }
}

/// A bare URL starts a link only at the beginning of text, after whitespace,
/// or after one of `*`, `_`, `~`, `(`.
fn at_link_boundary(before: &str) -> bool {
    match before.chars().last() {
        None => true,
        Some(c) => c.is_whitespace() || matches!(c, '*' | '_' | '~' | '('),
    }
}

/// Whether the host part of `url` is a dot-separated domain.
///
/// For `www.` links the `www` label counts, so `www.example` is a domain and
/// a lone `www` is not.
fn has_domain(url: &str) -> bool {
    let rest = if let Some(rest) = url.strip_prefix("https://") {
        rest
    } else if let Some(rest) = url.strip_prefix("http://") {
        rest
    } else if url.starts_with("www.") {
        url
    } else {
        return false;
    };

    let host = rest.split(['/', '?', '#']).next().unwrap_or_default();
    let host = host.split(':').next().unwrap_or_default();

    let mut labels = 0;
    for label in host.split('.') {
        if label.is_empty()
            || !label
                .chars()
                .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
        {
            return false;
        }
        labels += 1;
    }

    labels >= 2
}

/// Drop trailing punctuation that ends a sentence rather than the URL.
///
/// A closing parenthesis is kept only when it balances one inside the URL.
fn trim_url(url: &str) -> &str {
    let mut url = url;
    loop {
        let Some(last) = url.chars().last() else {
            return url;
        };

        let trailing = match last {
            '.' | ',' | ':' | ';' | '!' | '?' | '*' | '_' | '~' | '\'' | '"' => true,
            ')' => url.matches(')').count() > url.matches('(').count(),
            _ => false,
        };

        if !trailing {
            return url;
        }
        url = &url[..url.len() - last.len_utf8()];
    }
}
