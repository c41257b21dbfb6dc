//! `runbook show` command - print the merged runbook

use miette::Result;

use crate::cli::helpers::{attributes_table, load_merged, to_json, to_yaml};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::schema::TemplateGenerator;

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Show the CMDB attribute record instead of the merged runbook
    #[arg(long)]
    pub attributes: bool,
}

pub fn run(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let settings = global.settings();
    let system = load_merged(&settings)?;

    if args.attributes {
        let attributes = system.to_attributes(&TemplateGenerator::new()?)?;
        let output = match global.format {
            OutputFormat::Json => to_json(&attributes)?,
            OutputFormat::Yaml => to_yaml(&attributes)?,
            OutputFormat::Auto | OutputFormat::Table => attributes_table(&attributes),
        };
        println!("{}", output);
        return Ok(());
    }

    match global.format {
        OutputFormat::Json => println!("{}", to_json(&system)?),
        OutputFormat::Auto | OutputFormat::Yaml => print!("{}", to_yaml(&system)?),
        OutputFormat::Table => {
            let attributes = system.to_attributes(&TemplateGenerator::new()?)?;
            println!("{}", attributes_table(&attributes));
        }
    }
    Ok(())
}
