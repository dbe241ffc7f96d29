// src/cli/mod.rs
//! CLI definitions for rpm2flatpak
//!
//! This module contains the command-line interface definitions using clap.
//! The command implementations are in the `commands` module.
//!
//! - `convert` - Build a flatpak manifest for an application
//! - `module` - Translate a single package and print its module
//! - `search` - Look up a Flathub application id

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use rpm2flatpak::config::{parse_define, ConvertConfig};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "rpm2flatpak")]
#[command(author = "rpm2flatpak Contributors")]
#[command(version)]
#[command(about = "Convert RPM component listings into flatpak-builder manifests", long_about = None)]
pub struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build a flatpak manifest for an application
    Convert {
        /// Application name, as known to fedmod
        app: String,

        /// Search term for the Flathub application to take defaults from
        #[arg(long)]
        flathub: Option<String>,

        /// Let fedmod overwrite existing files
        #[arg(short, long)]
        force: bool,

        /// Use existing container.yaml and listing instead of running fedmod
        #[arg(long)]
        no_bootstrap: bool,

        /// Component listing (default: <APP>.yaml)
        #[arg(long)]
        listing: Option<PathBuf>,

        /// Container description (default: container.yaml)
        #[arg(long, default_value = "container.yaml")]
        container: PathBuf,

        /// Runtime branch (default: f<VERSION_ID> of the host)
        #[arg(long)]
        runtime_version: Option<String>,

        /// Write the manifest here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Manifest format
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,

        #[command(flatten)]
        fetch: FetchArgs,
    },

    /// Translate one package and print its module
    Module {
        /// Package name
        name: String,

        /// Revision (branch, tag or commit) of the package repository
        #[arg(long = "ref", default_value = "rawhide")]
        revision: String,

        #[command(flatten)]
        fetch: FetchArgs,
    },

    /// Look up a Flathub application id
    Search {
        /// Case-insensitive substring of the id or name
        term: String,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Yaml,
}

/// Flags shared by commands that fetch recipes
#[derive(Args, Debug, Clone, Default)]
pub struct FetchArgs {
    /// Configuration file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Number of packages converted in parallel
    #[arg(short, long)]
    pub jobs: Option<usize>,

    /// HTTP timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Macro default, as NAME=VALUE (repeatable)
    #[arg(short = 'D', long = "define", value_name = "NAME=VALUE")]
    pub define: Vec<String>,
}

impl FetchArgs {
    /// Configuration file values with flag overrides applied
    pub fn load_config(&self) -> Result<ConvertConfig> {
        let mut config = match &self.config {
            Some(path) => ConvertConfig::load(path)
                .with_context(|| format!("Failed to load configuration: {}", path.display()))?,
            None => ConvertConfig::default(),
        };

        if let Some(jobs) = self.jobs {
            config.jobs = jobs;
        }
        if let Some(timeout) = self.timeout {
            config.timeout_secs = timeout;
        }
        for define in &self.define {
            let (name, value) = parse_define(define)?;
            config.defines.insert(name, value);
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_convert() {
        let cli = Cli::try_parse_from([
            "rpm2flatpak",
            "convert",
            "gnome-calculator",
            "--no-bootstrap",
            "--format",
            "yaml",
            "-j",
            "8",
            "-D",
            "dist=.fc41",
        ])
        .unwrap();

        match cli.command {
            Commands::Convert {
                app,
                no_bootstrap,
                format,
                fetch,
                container,
                ..
            } => {
                assert_eq!(app, "gnome-calculator");
                assert!(no_bootstrap);
                assert_eq!(format, OutputFormat::Yaml);
                assert_eq!(container, PathBuf::from("container.yaml"));

                let config = fetch.load_config().unwrap();
                assert_eq!(config.jobs, 8);
                assert_eq!(config.defines.get("dist").map(String::as_str), Some(".fc41"));
            }
            _ => panic!("expected convert"),
        }
    }

    #[test]
    fn test_parse_module_ref() {
        let cli = Cli::try_parse_from(["rpm2flatpak", "-v", "module", "foo", "--ref", "f41"])
            .unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Module { name, revision, .. } => {
                assert_eq!(name, "foo");
                assert_eq!(revision, "f41");
            }
            _ => panic!("expected module"),
        }
    }

    #[test]
    fn test_invalid_define() {
        let args = FetchArgs {
            define: vec!["novalue".to_string()],
            ..Default::default()
        };
        assert!(args.load_config().is_err());
    }
}
