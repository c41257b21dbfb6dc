//! HTML fragments rendered into CMDB attributes

use rust_embed::RustEmbed;
use serde::Serialize;
use thiserror::Error;
use tera::Tera;

use crate::entities::system::Link;

/// Embedded templates
#[derive(RustEmbed)]
#[folder = "templates/"]
struct EmbeddedTemplates;

const LINK_TABLE: &str = "links.html";

/// Template generator using Tera
pub struct TemplateGenerator {
    tera: Tera,
}

#[derive(Debug, Error, miette::Diagnostic)]
pub enum TemplateError {
    #[error("Template not found: {0}")]
    #[diagnostic(code(runbook::template::not_found))]
    NotFound(String),

    #[error("Template rendering error: {0}")]
    #[diagnostic(code(runbook::template::render))]
    RenderError(String),
}

#[derive(Serialize)]
struct LinkRow<'a> {
    name: &'a str,
    link: &'a str,
}

impl TemplateGenerator {
    /// Create a new template generator with embedded templates
    pub fn new() -> Result<Self, TemplateError> {
        let mut tera = Tera::default();
        tera.set_escape_fn(escape_html);

        for file in EmbeddedTemplates::iter() {
            let filename = file.as_ref();
            if let Some(content) = EmbeddedTemplates::get(filename) {
                let template_str = std::str::from_utf8(&content.data)
                    .map_err(|e| TemplateError::RenderError(e.to_string()))?;
                tera.add_raw_template(filename, template_str)
                    .map_err(|e| TemplateError::RenderError(e.to_string()))?;
            }
        }

        if !tera.get_template_names().any(|n| n == LINK_TABLE) {
            return Err(TemplateError::NotFound(LINK_TABLE.to_string()));
        }

        Ok(Self { tera })
    }

    /// Render links as a two-column `Name`/`Link` HTML table, in list order
    pub fn link_table(&self, links: &[Link]) -> Result<String, TemplateError> {
        let rows: Vec<LinkRow<'_>> = links
            .iter()
            .map(|l| LinkRow {
                name: &l.name,
                link: &l.link,
            })
            .collect();

        let mut context = tera::Context::new();
        context.insert("links", &rows);

        self.tera
            .render(LINK_TABLE, &context)
            .map_err(|e| TemplateError::RenderError(e.to_string()))
    }
}

/// Escape text content for HTML. Leaves `/` alone so URLs survive intact.
fn escape_html(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => output.push_str("&amp;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            '"' => output.push_str("&#34;"),
            '\'' => output.push_str("&#39;"),
            '+' => output.push_str("&#43;"),
            '\0' => output.push('\u{FFFD}'),
            _ => output.push(c),
        }
    }
    output
}
