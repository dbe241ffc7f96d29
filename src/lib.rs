// src/lib.rs

//! rpm2flatpak
//!
//! Translates an RPM component listing, whose packages are built from
//! `.spec` recipes in dist-git, into a flatpak-builder manifest.
//!
//! # Architecture
//!
//! - Repository: fetch each package's recipe and checksum manifest
//! - Recipe: lenient spec parsing (stages, sources, patches, macros)
//! - Classify: build system and source kinds, checksum lookup
//! - Manifest: typed output records and module assembly
//! - Convert: bounded parallel per-package pipeline with order-stable results

pub mod bootstrap;
pub mod classify;
pub mod config;
pub mod convert;
mod error;
pub mod flathub;
pub mod manifest;
pub mod progress;
pub mod recipe;
pub mod repository;

pub use classify::{BuildSystemDecision, Checksum, ChecksumManifest, NativeBuildSystem};
pub use config::ConvertConfig;
pub use convert::{
    ClassificationWarning, ConversionReport, Converter, PackageOutcome, SkipReason, SkippedPackage,
};
pub use error::{Error, Result};
pub use manifest::{Manifest, ModuleRecord, PackageEntry, Skeleton, SourceKind, SourceRecord};
pub use progress::{CliProgress, LogProgress, ProgressTracker, SilentProgress};
pub use recipe::{parse_spec, ParseError, Recipe};
pub use repository::{FetchError, FetchedRecipe, HttpRecipeFetcher, RecipeSource};
