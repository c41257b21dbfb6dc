//! Shared helper functions for CLI commands

use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use tabled::{builder::Builder, settings::Style};
use tracing::debug;

use crate::core::config::Settings;
use crate::core::{load_system, merge, CommonMark};
use crate::entities::{System, SystemAttributes};

/// Load the global defaults and the system file, then merge them
pub fn load_merged(settings: &Settings) -> Result<System> {
    let global = load_system(&settings.global_system_file, &CommonMark)?;
    let system = load_system(&settings.system_file, &CommonMark)?;

    let merged = merge(&global, &system);
    debug!("Final system: {:?}", merged);
    Ok(merged)
}

pub fn to_yaml<T: Serialize>(value: &T) -> Result<String> {
    serde_yml::to_string(value).into_diagnostic()
}

pub fn to_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).into_diagnostic()
}

/// Render attributes as a two-column field/value table
pub fn attributes_table(attrs: &SystemAttributes) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (field, value) in attrs.fields() {
        builder.push_record([field, value]);
    }
    builder.build().with(Style::rounded()).to_string()
}
