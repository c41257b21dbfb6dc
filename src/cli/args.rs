//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::cli::commands::{
    completions::CompletionsArgs, get::GetArgs, show::ShowArgs, sync::SyncArgs,
    validate::ValidateArgs,
};
use crate::core::config::{Config, Settings};

#[derive(Parser)]
#[command(name = "runbook")]
#[command(author, version, about = "Keep a system's CMDB record in step with its runbook")]
#[command(long_about = "Merges the global runbook defaults with a system's own runbook file, \
renders markdown troubleshooting docs, and pushes the result to the CMDB: \
contact relationships first, then the system's attributes.")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug, Default)]
pub struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "auto")]
    pub format: OutputFormat,

    /// Suppress non-essential output (errors only)
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable verbose output (debug logging)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Global default values for system information [default: cmdb/cmdb-global.yaml]
    #[arg(long, global = true, env = "GLOBAL_SYSTEM_FILE")]
    pub global_system_file: Option<PathBuf>,

    /// System-specific runbook file [default: cmdb/cmdb.yaml]
    #[arg(long, global = true, env = "SYSTEM_FILE")]
    pub system_file: Option<PathBuf>,

    /// CMDB endpoint (test/prod etc.) [default: https://cmdb.ft.com]
    #[arg(long, global = true, env = "CMDB_ENDPOINT")]
    pub cmdb_endpoint: Option<String>,

    /// API key to access the CMDB
    #[arg(long, global = true, env = "CMDB_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Per-request timeout in seconds [default: 30]
    #[arg(long, global = true, env = "CMDB_TIMEOUT")]
    pub timeout: Option<u64>,
}

impl GlobalOpts {
    /// Flags and environment as the highest-priority config layer
    pub fn config(&self) -> Config {
        Config {
            global_system_file: self.global_system_file.clone(),
            system_file: self.system_file.clone(),
            cmdb_endpoint: self.cmdb_endpoint.clone(),
            api_key: self.api_key.clone(),
            timeout_secs: self.timeout,
        }
    }

    /// Resolve settings from config files, environment and flags
    pub fn settings(&self) -> Settings {
        let mut config = Config::load();
        config.merge(self.config());
        config.resolve()
    }

    /// Default tracing filter for these options
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else if self.verbose {
            "debug"
        } else {
            "info"
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Push the merged runbook to the CMDB
    Sync(SyncArgs),

    /// Show the merged runbook without contacting the CMDB
    Show(ShowArgs),

    /// Fetch a system's current attributes from the CMDB
    Get(GetArgs),

    /// Validate runbook files against the system schema
    Validate(ValidateArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Automatically pick per command (yaml for records, table for attributes)
    #[default]
    Auto,
    /// YAML format (full fidelity)
    Yaml,
    /// JSON format (for programming)
    Json,
    /// Key/value table
    Table,
}
