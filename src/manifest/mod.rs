// src/manifest/mod.rs

//! flatpak-builder manifests
//!
//! - [`model`]: the output records (`Manifest`, `ModuleRecord`, `SourceRecord`)
//! - [`listing`]: the input component listing (`PackageEntry`)
//! - [`skeleton`]: manifest fields seeded from `container.yaml` and the OS
//! - [`assemble`]: combining one package's classification into a module

mod assemble;
pub mod listing;
mod model;
pub mod skeleton;

pub use assemble::assemble;
pub use listing::{parse_listing, read_listing, ListingError, PackageEntry};
pub use model::{Location, Manifest, ModuleRecord, Skeleton, SourceKind, SourceRecord};
pub use skeleton::{read_os_version, read_skeleton, runtime_version_for, skeleton_from_container};
