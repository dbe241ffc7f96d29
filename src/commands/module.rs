// src/commands/module.rs

//! Module command: translate a single package

use super::write_output;
use anyhow::{anyhow, Context, Result};
use rpm2flatpak::config::ConvertConfig;
use rpm2flatpak::{Converter, HttpRecipeFetcher, PackageEntry, PackageOutcome};

/// Fetch one package at `revision` and print its module as JSON
pub fn cmd_module(name: &str, revision: &str, config: &ConvertConfig) -> Result<()> {
    let fetcher = HttpRecipeFetcher::from_config(config).context("Failed to create recipe fetcher")?;
    let converter = Converter::new(&fetcher, config);

    let entry = PackageEntry {
        name: name.to_string(),
        revision: revision.to_string(),
        is_private: false,
    };

    match converter.convert_package(&entry) {
        PackageOutcome::Converted { module, warnings } => {
            let json = serde_json::to_string_pretty(&module)
                .context("Failed to serialize module")?;
            write_output(&(json + "\n"), None)?;
            for warning in warnings {
                eprintln!("WARNING: {warning}");
            }
            Ok(())
        }
        PackageOutcome::Skipped(reason) => Err(anyhow!("{name}: {reason}")),
    }
}
