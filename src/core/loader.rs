//! System record loading
//!
//! Reads a YAML record from disk, reports syntax errors with source spans,
//! and resolves markdown references relative to the record's own location.

use miette::Diagnostic;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

use crate::core::markdown::{self, MarkdownRenderer};
use crate::entities::System;
use crate::yaml::YamlSyntaxError;

/// Errors loading a record file. Both are fatal for the run.
#[derive(Debug, Error, Diagnostic)]
pub enum LoadError {
    #[error("Cannot read system file {}", path.display())]
    #[diagnostic(
        code(runbook::load::io),
        help("Check the --system-file / --global-system-file paths")
    )]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Syntax(#[from] YamlSyntaxError),
}

/// Parse a system record from YAML text
///
/// A document with no content (blank or comments only) yields an empty record.
pub fn parse_system(content: &str, filename: &str) -> Result<System, LoadError> {
    let blank = content.lines().all(|line| {
        let line = line.trim();
        line.is_empty() || line.starts_with('#')
    });
    if blank {
        return Ok(System::default());
    }
    serde_yml::from_str::<System>(content)
        .map_err(|e| YamlSyntaxError::from_serde_error(&e, content, filename).into())
}

/// Load a system record and resolve its troubleshooting markdown reference
pub fn load_system(path: &Path, renderer: &dyn MarkdownRenderer) -> Result<System, LoadError> {
    info!("Loading file {}", path.display());

    let content = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut system = parse_system(&content, &path.display().to_string())?;
    system.troubleshooting = markdown::resolve(&system.troubleshooting, path, renderer);

    debug!("Loaded system from {}: {:?}", path.display(), system);
    Ok(system)
}
