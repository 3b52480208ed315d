use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let settings = cli.settings.as_deref();

    match cli.command {
        Commands::Check {
            source,
            format,
            output,
        } => commands::handle_check(settings, &source, format, output, cli.verbose, cli.quiet),
        Commands::Apply {
            source,
            unit,
            sync_labels,
            dry_run,
            store,
            format,
        } => commands::handle_apply(
            settings,
            &source,
            commands::ApplyOptions {
                unit,
                sync_labels,
                dry_run,
                store,
            },
            format,
            cli.verbose,
            cli.quiet,
        ),
        Commands::Init { preset, path } => commands::handle_init(settings, preset, path, cli.quiet),
        Commands::Config {
            show,
            validate,
            config,
        } => commands::handle_config(settings, show, validate, config, cli.quiet),
    }
}

/// Logs go to stderr; `RUST_LOG` takes precedence over the flags.
fn init_tracing(verbose: bool, quiet: bool) {
    let default_level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}
