// src/main.rs

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };

    // stdout carries the manifest, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Convert {
            app,
            flathub,
            force,
            no_bootstrap,
            listing,
            container,
            runtime_version,
            output,
            format,
            fetch,
        } => {
            let config = fetch.load_config()?;
            let options = commands::ConvertOptions {
                app,
                flathub,
                force,
                no_bootstrap,
                listing,
                container,
                runtime_version,
                output,
                format,
            };
            commands::cmd_convert(&options, &config)
        }
        Commands::Module {
            name,
            revision,
            fetch,
        } => {
            let config = fetch.load_config()?;
            commands::cmd_module(&name, &revision, &config)
        }
        Commands::Search { term } => commands::cmd_search(&term),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Err(e) => match e.downcast_ref::<rpm2flatpak::Error>() {
            Some(rpm2flatpak::Error::BootstrapExit(code)) => std::process::exit(*code),
            _ => Err(e),
        },
        ok => ok,
    }
}
