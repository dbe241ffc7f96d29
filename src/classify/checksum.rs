// src/classify/checksum.rs

//! Checksum manifest (`sources` file) parsing and lookup
//!
//! Two line formats are recognized:
//!
//! ```text
//! SHA512 (foo-1.0.tar.gz) = 3b1c...   # BSD style, current dist-git
//! 5d41402abc4b2a76b9719d911017c592  foo-1.0.tar.gz   # legacy md5 style
//! ```
//!
//! Lines in neither format are ignored.

use regex::Regex;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::sync::LazyLock;

static BSD_LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z0-9-]+)\s*\((.+)\)\s*=\s*([0-9A-Fa-f]+)$").expect("valid checksum regex")
});

static LEGACY_LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9A-Fa-f]{32,128})\s+\*?(\S+)$").expect("valid legacy checksum regex")
});

/// A published digest for one artifact
///
/// Serializes as a single `{"<algorithm>": "<digest>"}` entry so it can be
/// flattened into a source record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checksum {
    /// Lowercase algorithm name (`sha512`, `sha256`, `md5`, ...)
    pub algorithm: String,
    pub digest: String,
}

impl Serialize for Checksum {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.algorithm, &self.digest)?;
        map.end()
    }
}

/// One parsed manifest row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecksumEntry {
    pub filename: String,
    pub checksum: Checksum,
}

/// A parsed checksum manifest
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChecksumManifest {
    entries: Vec<ChecksumEntry>,
}

impl ChecksumManifest {
    pub fn parse(content: &str) -> Self {
        let entries = content
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .filter_map(parse_line)
            .collect();
        Self { entries }
    }

    /// The first row for `filename`
    pub fn lookup(&self, filename: &str) -> Option<&Checksum> {
        self.entries
            .iter()
            .find(|e| e.filename == filename)
            .map(|e| &e.checksum)
    }

    pub fn entries(&self) -> &[ChecksumEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn parse_line(line: &str) -> Option<ChecksumEntry> {
    if let Some(caps) = BSD_LINE_RE.captures(line) {
        return Some(ChecksumEntry {
            filename: caps[2].to_string(),
            checksum: Checksum {
                algorithm: caps[1].to_ascii_lowercase(),
                digest: caps[3].to_string(),
            },
        });
    }

    let caps = LEGACY_LINE_RE.captures(line)?;
    let algorithm = match caps[1].len() {
        32 => "md5",
        40 => "sha1",
        64 => "sha256",
        128 => "sha512",
        _ => return None,
    };
    Some(ChecksumEntry {
        filename: caps[2].to_string(),
        checksum: Checksum {
            algorithm: algorithm.to_string(),
            digest: caps[1].to_string(),
        },
    })
}
