// src/classify/mod.rs

//! Classification of recipe contents
//!
//! - [`buildsystem`]: which flatpak-builder build system a recipe maps to
//! - [`source`]: which kind of source each declaration is
//! - [`checksum`]: published digests from the package's checksum manifest

pub mod buildsystem;
pub mod checksum;
pub mod source;

pub use buildsystem::{
    classify_build_system, BuildSystemDecision, NativeBuildSystem, FALLBACK_BUILDSYSTEM,
};
pub use checksum::{Checksum, ChecksumEntry, ChecksumManifest};
pub use source::{classify_patch, classify_source, source_filename, source_kind};
