// src/bootstrap.rs

//! Bootstrap via `fedmod rpm2flatpak`
//!
//! fedmod writes `container.yaml` and `<app>.yaml` (the component listing)
//! into the working directory. Both are inputs to the conversion.

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::info;

/// Name of the bootstrap executable
pub const FEDMOD: &str = "fedmod";

/// Options for one bootstrap invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BootstrapOptions {
    pub app_name: String,
    /// Flathub search term, passed through for fedmod to resolve
    pub flathub: Option<String>,
    /// Overwrite existing output files
    pub force: bool,
}

impl BootstrapOptions {
    /// Arguments passed to fedmod
    pub fn args(&self) -> Vec<String> {
        let mut args = vec!["rpm2flatpak".to_string()];
        if let Some(term) = &self.flathub {
            args.push(format!("--flathub={term}"));
        }
        if self.force {
            args.push("--force".to_string());
        }
        args.push(self.app_name.clone());
        args
    }
}

/// Locate the fedmod executable on `PATH`
pub fn find_fedmod() -> Result<PathBuf> {
    which::which(FEDMOD).map_err(|e| {
        Error::BootstrapError(format!("{FEDMOD} not found in PATH ({e}); install fedmod or pass --no-bootstrap"))
    })
}

/// Run fedmod in `workdir`
///
/// A non-zero exit status is returned as [`Error::BootstrapExit`] so the
/// caller can exit with the same code.
pub fn run_bootstrap(options: &BootstrapOptions, workdir: &Path) -> Result<()> {
    let fedmod = find_fedmod()?;
    let args = options.args();
    info!("Running {} {}", fedmod.display(), args.join(" "));

    let status = Command::new(&fedmod)
        .args(&args)
        .current_dir(workdir)
        .stdout(Stdio::null())
        .status()
        .map_err(|e| Error::BootstrapError(format!("Failed to run {}: {e}", fedmod.display())))?;

    if status.success() {
        Ok(())
    } else {
        Err(Error::BootstrapExit(status.code().unwrap_or(1)))
    }
}
