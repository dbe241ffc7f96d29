// src/commands/convert.rs

//! Convert command: component listing to flatpak manifest

use super::write_output;
use crate::cli::OutputFormat;
use anyhow::{Context, Result};
use rpm2flatpak::bootstrap::{run_bootstrap, BootstrapOptions};
use rpm2flatpak::config::ConvertConfig;
use rpm2flatpak::flathub::{finish_args, FlathubClient};
use rpm2flatpak::manifest::skeleton::OS_RELEASE_PATH;
use rpm2flatpak::manifest::{read_listing, read_os_version, read_skeleton, runtime_version_for};
use rpm2flatpak::repository::RepositoryClient;
use rpm2flatpak::{
    CliProgress, Converter, HttpRecipeFetcher, LogProgress, Manifest, ProgressTracker,
};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use tracing::info;

/// Everything the convert command was asked to do
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    pub app: String,
    pub flathub: Option<String>,
    pub force: bool,
    pub no_bootstrap: bool,
    pub listing: Option<PathBuf>,
    pub container: PathBuf,
    pub runtime_version: Option<String>,
    pub output: Option<PathBuf>,
    pub format: OutputFormat,
}

/// Build a flatpak manifest for `options.app`
///
/// Skipped packages and classification warnings are printed to stderr
/// after the manifest has been written.
pub fn cmd_convert(options: &ConvertOptions, config: &ConvertConfig) -> Result<()> {
    let flathub_id = match &options.flathub {
        Some(term) => {
            let client = FlathubClient::new(
                RepositoryClient::with_settings(config.timeout(), config.max_retries)
                    .context("Failed to create HTTP client")?,
            );
            let id = client
                .search(term)
                .with_context(|| format!("Flathub lookup failed for '{term}'"))?;
            info!("Using Flathub application {}", id);
            Some((client, id))
        }
        None => None,
    };

    if !options.no_bootstrap {
        // BootstrapExit passes through untouched so main can exit with its status
        run_bootstrap(&bootstrap_options(options), Path::new("."))?;
    }

    let runtime_version = match &options.runtime_version {
        Some(version) => version.clone(),
        None => {
            let os_version = read_os_version(Path::new(OS_RELEASE_PATH))
                .context("Failed to determine the host OS version")?;
            runtime_version_for(&os_version)
        }
    };

    let mut skeleton = read_skeleton(&options.container, config, &runtime_version)
        .with_context(|| format!("Failed to read {}", options.container.display()))?;

    if let Some((client, id)) = &flathub_id {
        let published = client
            .fetch_manifest(id)
            .with_context(|| format!("Failed to fetch the Flathub manifest of {id}"))?;
        if let Some(args) = finish_args(&published) {
            info!("Using {} finish-args from Flathub", args.len());
            skeleton.finish_args = args;
        }
    }

    let listing_path = options
        .listing
        .clone()
        .unwrap_or_else(|| PathBuf::from(format!("{}.yaml", options.app)));
    let entries = read_listing(&listing_path)
        .with_context(|| format!("Failed to read listing: {}", listing_path.display()))?;

    let fetcher = HttpRecipeFetcher::from_config(config).context("Failed to create recipe fetcher")?;
    let converter = Converter::new(&fetcher, config);
    let progress: Box<dyn ProgressTracker> = if std::io::stderr().is_terminal() {
        Box::new(CliProgress::new("Converting packages", entries.len() as u64))
    } else {
        Box::new(LogProgress::new("convert"))
    };
    let mut report = converter.convert_all(&entries, progress.as_ref())?;

    let mut manifest = Manifest::from_skeleton(skeleton);
    manifest.modules = std::mem::take(&mut report.modules);

    let text = match options.format {
        OutputFormat::Json => manifest.to_json()? + "\n",
        OutputFormat::Yaml => manifest.to_yaml()?,
    };
    write_output(&text, options.output.as_deref())?;

    for line in report.warning_lines() {
        eprintln!("WARNING: {line}");
    }

    Ok(())
}

/// The bootstrap gets the user's Flathub term, not the resolved id
fn bootstrap_options(options: &ConvertOptions) -> BootstrapOptions {
    BootstrapOptions {
        app_name: options.app.clone(),
        flathub: options.flathub.clone(),
        force: options.force,
    }
}
