// src/manifest/model.rs

//! flatpak-builder manifest records
//!
//! Field presence is decided by constructors rather than by mutating loose
//! maps: a patch record can never carry a checksum, a fallback module never
//! carries `config-opts`, and so on.

use crate::classify::Checksum;
use crate::error::{Error, Result};
use serde::Serialize;
use strum_macros::{AsRefStr, Display};

/// Artifact kind of a module source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, AsRefStr, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SourceKind {
    File,
    Archive,
    Git,
    Patch,
}

/// Where a source comes from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    /// Downloadable URL
    Url(String),
    /// Path relative to the manifest
    Path(String),
}

/// One entry of a module's `sources`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceRecord {
    #[serde(rename = "type")]
    kind: SourceKind,
    #[serde(flatten)]
    location: Location,
    #[serde(flatten)]
    checksum: Option<Checksum>,
}

impl SourceRecord {
    /// A remote file, archive or git source
    ///
    /// `Patch` is not a remote kind; use [`SourceRecord::patch`].
    pub fn remote(kind: SourceKind, url: impl Into<String>, checksum: Option<Checksum>) -> Self {
        debug_assert!(kind != SourceKind::Patch, "patches are built with SourceRecord::patch");
        Self {
            kind,
            location: Location::Url(url.into()),
            checksum,
        }
    }

    /// A file shipped next to the recipe
    pub fn local_file(path: impl Into<String>, checksum: Option<Checksum>) -> Self {
        Self {
            kind: SourceKind::File,
            location: Location::Path(path.into()),
            checksum,
        }
    }

    /// A patch applied to the sources; never checksummed
    pub fn patch(path: impl Into<String>) -> Self {
        Self {
            kind: SourceKind::Patch,
            location: Location::Path(path.into()),
            checksum: None,
        }
    }

    pub fn kind(&self) -> SourceKind {
        self.kind
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn url(&self) -> Option<&str> {
        match &self.location {
            Location::Url(url) => Some(url),
            Location::Path(_) => None,
        }
    }

    pub fn path(&self) -> Option<&str> {
        match &self.location {
            Location::Path(path) => Some(path),
            Location::Url(_) => None,
        }
    }

    pub fn checksum(&self) -> Option<&Checksum> {
        self.checksum.as_ref()
    }
}

/// One buildable unit of the manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ModuleRecord {
    pub name: String,
    pub buildsystem: String,
    /// Empty for native modules, absent for `simple` ones
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_opts: Option<Vec<String>>,
    /// Present only for `simple` modules
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build_commands: Option<Vec<String>>,
    pub sources: Vec<SourceRecord>,
}

/// Manifest fields supplied before any module is attached
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skeleton {
    pub app_id: String,
    pub runtime: String,
    pub runtime_version: String,
    pub sdk: String,
    pub command: String,
    pub finish_args: Vec<String>,
}

/// A complete flatpak-builder manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Manifest {
    pub app_id: String,
    pub runtime: String,
    pub runtime_version: String,
    pub sdk: String,
    pub command: String,
    pub finish_args: Vec<String>,
    pub modules: Vec<ModuleRecord>,
}

impl Manifest {
    /// Start a manifest with no modules
    pub fn from_skeleton(skeleton: Skeleton) -> Self {
        Self {
            app_id: skeleton.app_id,
            runtime: skeleton.runtime,
            runtime_version: skeleton.runtime_version,
            sdk: skeleton.sdk,
            command: skeleton.command,
            finish_args: skeleton.finish_args,
            modules: Vec::new(),
        }
    }

    /// Pretty JSON with a 4-space indent
    pub fn to_json(&self) -> Result<String> {
        pretty_json(self)
    }

    pub fn to_yaml(&self) -> Result<String> {
        yaml(self)
    }
}

fn pretty_json<T: Serialize>(value: &T) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value
        .serialize(&mut ser)
        .map_err(|e| Error::SerializeError(format!("Failed to serialize manifest: {e}")))?;
    String::from_utf8(buf)
        .map_err(|e| Error::SerializeError(format!("Manifest is not valid UTF-8: {e}")))
}

fn yaml<T: Serialize>(value: &T) -> Result<String> {
    serde_yaml::to_string(value)
        .map_err(|e| Error::SerializeError(format!("Failed to serialize manifest: {e}")))
}
