//! `runbook sync` command - push the merged runbook to the CMDB

use console::style;
use miette::Result;
use serde_json::json;
use tracing::info;

use crate::cli::helpers::{load_merged, to_json};
use crate::cli::GlobalOpts;
use crate::cmdb::{CmdbClient, CmdbError};
use crate::entities::{ContactRole, Relationship};
use crate::schema::TemplateGenerator;

#[derive(clap::Args, Debug)]
pub struct SyncArgs {
    /// Print what would be sent instead of contacting the CMDB
    #[arg(long)]
    pub dry_run: bool,
}

pub fn run(args: SyncArgs, global: &GlobalOpts) -> Result<()> {
    let settings = global.settings();
    let system = load_merged(&settings)?;

    if system.system_code.is_empty() {
        return Err(CmdbError::MissingSystemCode.into());
    }

    if args.dry_run {
        let attributes = system.to_attributes(&TemplateGenerator::new()?)?;
        let code = system.system_code.as_str();
        let relationships: Vec<Relationship> = ContactRole::ALL
            .iter()
            .flat_map(|&role| {
                system.contact(role).entries.iter().map(move |entry| {
                    Relationship::system_contact(code, role.as_str(), entry.data_item_id.as_str())
                })
            })
            .collect();

        println!(
            "{}",
            to_json(&json!({
                "attributes": attributes,
                "relationships": relationships,
            }))?
        );
        return Ok(());
    }

    info!("Connecting to {}", settings.cmdb_endpoint);
    let client = CmdbClient::connect(&settings.cmdb_endpoint, settings.api_key()?, settings.timeout)?;
    client.update_system(&system)?;

    info!("Updated System {}", system.system_code);
    if !global.quiet {
        println!(
            "{} Updated system {} in {}",
            style("✓").green(),
            style(&system.system_code).cyan(),
            style(&settings.cmdb_endpoint).dim()
        );
    }
    Ok(())
}
