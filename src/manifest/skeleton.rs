// src/manifest/skeleton.rs

//! Manifest skeleton from `container.yaml` and the host OS release
//!
//! ```yaml
//! flatpak:
//!   id: org.gnome.Calculator
//!   command: gnome-calculator
//!   finish-args: |-
//!     --share=ipc
//!     --socket=wayland
//! ```

use super::model::Skeleton;
use crate::config::ConvertConfig;
use crate::error::{Error, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// Default location of the OS release file
pub const OS_RELEASE_PATH: &str = "/etc/os-release";

#[derive(Deserialize)]
struct ContainerDocument {
    flatpak: FlatpakSection,
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
struct FlatpakSection {
    id: String,
    command: String,
    #[serde(default)]
    finish_args: Option<FinishArgs>,
}

/// `finish-args` is a newline-separated string in fedmod output, but a list
/// is accepted too
#[derive(Deserialize)]
#[serde(untagged)]
enum FinishArgs {
    Text(String),
    List(Vec<String>),
}

impl FinishArgs {
    fn into_vec(self) -> Vec<String> {
        let items: Vec<String> = match self {
            FinishArgs::Text(text) => text.lines().map(str::to_string).collect(),
            FinishArgs::List(list) => list,
        };
        items
            .into_iter()
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty())
            .collect()
    }
}

/// Build a skeleton from `container.yaml` text
pub fn skeleton_from_container(
    content: &str,
    config: &ConvertConfig,
    runtime_version: &str,
) -> Result<Skeleton> {
    let document: ContainerDocument = serde_yaml::from_str(content)
        .map_err(|e| Error::ParseError(format!("Invalid container.yaml: {e}")))?;
    let flatpak = document.flatpak;

    Ok(Skeleton {
        app_id: flatpak.id,
        runtime: config.runtime.clone(),
        runtime_version: runtime_version.to_string(),
        sdk: config.sdk.clone(),
        command: flatpak.command,
        finish_args: flatpak.finish_args.map(FinishArgs::into_vec).unwrap_or_default(),
    })
}

/// Read `container.yaml` and build a skeleton
pub fn read_skeleton(path: &Path, config: &ConvertConfig, runtime_version: &str) -> Result<Skeleton> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::IoError(format!("Failed to read {}: {e}", path.display()))
    })?;
    skeleton_from_container(&content, config, runtime_version)
}

/// Parse `KEY=value` lines of an os-release file, unquoting values
pub fn parse_os_release(content: &str) -> HashMap<String, String> {
    content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .filter_map(|l| l.split_once('='))
        .map(|(k, v)| {
            let v = v.trim();
            let v = v
                .strip_prefix('"')
                .and_then(|v| v.strip_suffix('"'))
                .or_else(|| v.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')))
                .unwrap_or(v);
            (k.trim().to_string(), v.to_string())
        })
        .collect()
}

/// `VERSION_ID` of the host OS
pub fn read_os_version(path: &Path) -> Result<String> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::IoError(format!("Failed to read {}: {e}", path.display()))
    })?;
    parse_os_release(&content)
        .remove("VERSION_ID")
        .ok_or_else(|| Error::NotFoundError(format!("VERSION_ID not set in {}", path.display())))
}

/// Runtime branch for an OS version (`41` → `f41`)
pub fn runtime_version_for(os_version: &str) -> String {
    format!("f{}", os_version.trim())
}
