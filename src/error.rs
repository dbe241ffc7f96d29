// src/error.rs

//! Crate-level error type
//!
//! Errors here are fatal for a run: they abort before (or instead of) any
//! per-package work. Per-package problems use the narrower
//! [`FetchError`](crate::repository::FetchError) and
//! [`ParseError`](crate::recipe::ParseError) types and are downgraded to
//! skip reasons by the conversion pipeline.

use crate::manifest::ListingError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Serialization error: {0}")]
    SerializeError(String),

    #[error("Invalid component listing: {0}")]
    ListingError(#[from] ListingError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Initialization error: {0}")]
    InitError(String),

    #[error("Download error: {0}")]
    DownloadError(String),

    #[error("Not found: {0}")]
    NotFoundError(String),

    #[error("Bootstrap failed: {0}")]
    BootstrapError(String),

    #[error("Bootstrap tool exited with status {0}")]
    BootstrapExit(i32),
}

/// Result type for fatal operations
pub type Result<T> = std::result::Result<T, Error>;
