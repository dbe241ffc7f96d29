// src/commands/mod.rs
//! Command handlers for the rpm2flatpak CLI

mod convert;
mod module;
mod search;

pub use convert::{cmd_convert, ConvertOptions};
pub use module::cmd_module;
pub use search::cmd_search;

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Write `text` to `output`, or to stdout when no path is given
pub(crate) fn write_output(text: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, text)
                .with_context(|| format!("Failed to write output file: {}", path.display()))?;
            eprintln!("Manifest written to: {}", path.display());
        }
        None => print!("{text}"),
    }
    Ok(())
}
