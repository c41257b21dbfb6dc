//! `runbook validate` command - validate runbook files against the system schema

use console::style;
use miette::Result;
use std::path::PathBuf;

use crate::cli::GlobalOpts;
use crate::schema::Validator;

#[derive(clap::Args, Debug)]
pub struct ValidateArgs {
    /// Files to validate (default: the global defaults file and the system file)
    #[arg()]
    pub paths: Vec<PathBuf>,

    /// Continue validation after first error
    #[arg(long)]
    pub keep_going: bool,
}

pub fn run(args: ValidateArgs, global: &GlobalOpts) -> Result<()> {
    let validator = Validator::new()?;

    let files = if args.paths.is_empty() {
        let settings = global.settings();
        vec![settings.global_system_file, settings.system_file]
    } else {
        args.paths
    };

    let mut failed = 0;
    for path in &files {
        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                println!("{} {} - {}", style("✗").red(), path.display(), e);
                failed += 1;
                if !args.keep_going {
                    break;
                }
                continue;
            }
        };

        match validator.validate(&content, &path.display().to_string()) {
            Ok(()) => {
                if !global.quiet {
                    println!("{} {}", style("✓").green(), path.display());
                }
            }
            Err(e) => {
                failed += 1;
                println!(
                    "{} {} - {} error(s)",
                    style("✗").red(),
                    path.display(),
                    e.violation_count()
                );

                let report = miette::Report::new(e);
                println!("{:?}", report);

                if !args.keep_going {
                    break;
                }
            }
        }
    }

    match failed {
        0 => {
            if !global.quiet {
                println!("{} All files passed validation!", style("✓").green().bold());
            }
            Ok(())
        }
        1 => Err(miette::miette!("Validation failed: 1 file has errors")),
        n => Err(miette::miette!("Validation failed: {} files have errors", n)),
    }
}
