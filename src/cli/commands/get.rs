//! `runbook get` command - fetch a system's attributes from the CMDB

use miette::Result;

use crate::cli::helpers::{attributes_table, load_merged, to_json, to_yaml};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::cmdb::CmdbClient;

#[derive(clap::Args, Debug)]
pub struct GetArgs {
    /// System code to fetch (default: the systemCode of the merged runbook)
    pub system_code: Option<String>,
}

pub fn run(args: GetArgs, global: &GlobalOpts) -> Result<()> {
    let settings = global.settings();

    let system_code = match args.system_code {
        Some(code) => code,
        None => load_merged(&settings)?.system_code,
    };

    let client = CmdbClient::connect(&settings.cmdb_endpoint, settings.api_key()?, settings.timeout)?;
    let attributes = client.get_system(&system_code)?;

    let output = match global.format {
        OutputFormat::Json => to_json(&attributes)?,
        OutputFormat::Yaml => to_yaml(&attributes)?,
        OutputFormat::Auto | OutputFormat::Table => attributes_table(&attributes),
    };
    println!("{}", output);
    Ok(())
}
