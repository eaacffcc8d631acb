mod cli;
mod commands;
mod config;
mod error;
mod output;

use clap::{ArgMatches, CommandFactory, FromArgMatches};
use tracing_subscriber::EnvFilter;

use shopfront_core::Catalog;

use crate::cli::{Cli, Command};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    init_tracing(cli.global.verbose);

    if let Err(err) = run(cli, &matches).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli, matches: &ArgMatches) -> Result<(), CliError> {
    let mut global = cli.global;
    match cli.command {
        // Config commands never touch the catalog API
        Command::Config(args) => {
            let defaults = config::load_config_or_default().defaults;
            config::apply_display_defaults(&mut global, matches, &defaults)?;
            commands::config_cmd::handle(args, &global)
        }

        Command::Completions(args) => {
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "shopfront", &mut std::io::stdout());
            Ok(())
        }

        cmd => {
            let cfg = config::load_config()?;
            config::apply_display_defaults(&mut global, matches, &cfg.defaults)?;
            let catalog_config = config::resolve_catalog_config(&cfg, &global)?;
            tracing::debug!(api_url = %catalog_config.api_url, "resolved catalog API");
            let catalog = Catalog::new(catalog_config)?;

            tracing::debug!(command = ?cmd, "dispatching command");
            commands::dispatch(cmd, &catalog, &global).await
        }
    }
}
