use clap::Parser;
use miette::Result;
use runbook::cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Reset SIGPIPE to default behavior so piping to `head` etc. exits quietly
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    // A missing .env is fine
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    let global = cli.global;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(global.log_level()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Sync(args) => runbook::cli::commands::sync::run(args, &global),
        Commands::Show(args) => runbook::cli::commands::show::run(args, &global),
        Commands::Get(args) => runbook::cli::commands::get::run(args, &global),
        Commands::Validate(args) => runbook::cli::commands::validate::run(args, &global),
        Commands::Completions(args) => runbook::cli::commands::completions::run(args),
    }
}
