//! Markdown import for runbook fields
//!
//! A field whose value starts with `MD://` names a markdown file, relative to
//! the record file it appears in. The file is rendered to HTML in place of
//! the reference. Anything else is taken literally.

use pulldown_cmark::{html, Options, Parser};
use std::path::Path;
use tracing::{error, info};

/// Prefix marking a field as an external markdown reference
pub const MARKDOWN_PREFIX: &str = "MD://";

/// Renders markdown text to HTML
pub trait MarkdownRenderer {
    fn render(&self, markdown: &str) -> String;
}

impl<F> MarkdownRenderer for F
where
    F: Fn(&str) -> String,
{
    fn render(&self, markdown: &str) -> String {
        self(markdown)
    }
}

/// CommonMark renderer with tables and strikethrough enabled
#[derive(Debug, Clone, Copy, Default)]
pub struct CommonMark;

impl MarkdownRenderer for CommonMark {
    fn render(&self, markdown: &str) -> String {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_STRIKETHROUGH);

        let parser = Parser::new_ext(markdown, options);
        let mut output = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut output, parser);
        output
    }
}

/// Resolve a possible `MD://` reference in `field`
///
/// `source_record` is the path of the YAML file the field was read from.
/// An unreadable reference is logged and the field is returned unchanged.
pub fn resolve(field: &str, source_record: &Path, renderer: &dyn MarkdownRenderer) -> String {
    let relative = match field.strip_prefix(MARKDOWN_PREFIX) {
        Some(rest) if !rest.is_empty() => rest,
        _ => return field.to_string(),
    };

    let base = source_record.parent().unwrap_or_else(|| Path::new(""));
    let path = base.join(relative);

    info!("Importing markdown from {}", path.display());

    match std::fs::read_to_string(&path) {
        Ok(markdown) => renderer.render(&markdown),
        Err(e) => {
            error!("Failed to import markdown from {}: {}", path.display(), e);
            field.to_string()
        }
    }
}
