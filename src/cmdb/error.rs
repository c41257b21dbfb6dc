//! CMDB client errors

use miette::Diagnostic;
use thiserror::Error;

use crate::schema::template::TemplateError;

/// Errors that can occur talking to the CMDB
#[derive(Debug, Error, Diagnostic)]
pub enum CmdbError {
    #[error("No system code set")]
    #[diagnostic(
        code(runbook::cmdb::missing_system_code),
        help("Set 'systemCode' in the system file or the global defaults file")
    )]
    MissingSystemCode,

    #[error("Contact entry for {relationship_type} has no dataItemID")]
    #[diagnostic(
        code(runbook::cmdb::missing_data_item_id),
        help("Every contact entry needs the CMDB dataItemID of the contact or team")
    )]
    MissingDataItemId { relationship_type: String },

    #[error("Invalid CMDB endpoint '{endpoint}': {reason}")]
    #[diagnostic(
        code(runbook::cmdb::invalid_endpoint),
        help("Use an absolute http(s) URL, e.g. https://cmdb.example.com")
    )]
    InvalidEndpoint { endpoint: String, reason: String },

    #[error("{method} {url} failed: {message}")]
    #[diagnostic(code(runbook::cmdb::transport))]
    Transport {
        method: String,
        url: String,
        message: String,
    },

    #[error("{method} {url} returned HTTP {status}")]
    #[diagnostic(code(runbook::cmdb::status))]
    Status {
        method: String,
        url: String,
        status: u16,
    },

    #[error("System '{system_code}' not found in CMDB")]
    #[diagnostic(code(runbook::cmdb::not_found))]
    NotFound { system_code: String },

    #[error("Failed to encode request body: {0}")]
    #[diagnostic(code(runbook::cmdb::encode))]
    Encode(#[source] serde_json::Error),

    #[error("Failed to decode response from {url}: {source}")]
    #[diagnostic(code(runbook::cmdb::decode))]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Template(#[from] TemplateError),

    #[error("Error updating {step}")]
    #[diagnostic(
        code(runbook::cmdb::update_step),
        help("Relationship edges already deleted in this run are not restored; re-run the sync")
    )]
    Step {
        step: &'static str,
        #[source]
        source: Box<CmdbError>,
    },
}

impl CmdbError {
    /// The innermost error, looking through step context
    pub fn root(&self) -> &CmdbError {
        match self {
            CmdbError::Step { source, .. } => source.root(),
            other => other,
        }
    }

    /// The step that failed, if this error carries step context
    pub fn step(&self) -> Option<&'static str> {
        match self {
            CmdbError::Step { step, .. } => Some(*step),
            _ => None,
        }
    }
}
