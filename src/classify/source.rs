// src/classify/source.rs

//! Source and patch classification
//!
//! The artifact kind is inferred from the shape of the (macro-expanded)
//! declaration, first match wins:
//! 1. not `http://` or `https://` → `file` (with `url` if the value has
//!    another scheme, with `path` otherwise)
//! 2. file name contains `tar` → `archive`
//! 3. file name contains `git` → `git`
//! 4. file name has a known archive extension → `archive`, otherwise a
//!    remote `file`
//!
//! The file name is the last path segment, or the `#/name` fragment RPM
//! uses to rename downloads.

use super::checksum::ChecksumManifest;
use crate::manifest::{SourceKind, SourceRecord};

/// Extensions of archives whose names do not contain `tar`
const ARCHIVE_EXTENSIONS: &[&str] = &[
    ".zip", ".tgz", ".tbz", ".tbz2", ".txz", ".tzst", ".7z", ".rpm", ".deb",
];

/// Whether a declaration points at an HTTP(S) resource
pub fn is_remote(url_or_path: &str) -> bool {
    let lower = url_or_path.trim_start().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Whether a declaration is a URL of any scheme (`ftp://`, `file://`, ...)
pub fn has_scheme(url_or_path: &str) -> bool {
    url_or_path
        .trim_start()
        .split_once("://")
        .is_some_and(|(scheme, _)| {
            scheme
                .chars()
                .next()
                .is_some_and(|c| c.is_ascii_alphabetic())
                && scheme
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        })
}

/// The file name a declaration downloads to
pub fn source_filename(url_or_path: &str) -> &str {
    if let Some((_, renamed)) = url_or_path.split_once("#/") {
        if !renamed.is_empty() {
            return renamed.rsplit('/').next().unwrap_or(renamed);
        }
    }

    let without_fragment = url_or_path.split('#').next().unwrap_or(url_or_path);
    let without_query = without_fragment.split('?').next().unwrap_or(without_fragment);
    without_query.rsplit('/').next().unwrap_or(without_query)
}

/// Infer the artifact kind of a source declaration
pub fn source_kind(url_or_path: &str) -> SourceKind {
    if !is_remote(url_or_path) {
        return SourceKind::File;
    }

    let filename = source_filename(url_or_path);
    if filename.contains("tar") {
        SourceKind::Archive
    } else if filename.contains("git") {
        SourceKind::Git
    } else {
        let lower = filename.to_ascii_lowercase();
        if ARCHIVE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext)) {
            SourceKind::Archive
        } else {
            SourceKind::File
        }
    }
}

/// Build the source record for one declaration
///
/// The checksum is the first manifest row for the declaration's file name,
/// if any.
pub fn classify_source(url_or_path: &str, checksums: &ChecksumManifest) -> SourceRecord {
    let value = url_or_path.trim();
    let checksum = checksums.lookup(source_filename(value)).cloned();

    if is_remote(value) {
        SourceRecord::remote(source_kind(value), value, checksum)
    } else if has_scheme(value) {
        // Not classified, but still a location flatpak-builder downloads
        SourceRecord::remote(SourceKind::File, value, checksum)
    } else {
        SourceRecord::local_file(value, checksum)
    }
}

/// Build the record for a patch declaration
pub fn classify_patch(_label: &str, path: &str) -> SourceRecord {
    SourceRecord::patch(path.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_file() {
        assert_eq!(source_kind("foo.desktop"), SourceKind::File);
        assert_eq!(source_kind("ftp://example.org/foo.tar.gz"), SourceKind::File);

        let record = classify_source("foo.desktop", &ChecksumManifest::default());
        assert_eq!(record.path(), Some("foo.desktop"));
        assert!(record.url().is_none());
    }

    #[test]
    fn test_other_schemes_keep_url() {
        let checksums = ChecksumManifest::parse("SHA256 (foo-1.0.tar.gz) = beef\n");
        let record = classify_source("ftp://ftp.example.org/pub/foo-1.0.tar.gz", &checksums);

        assert_eq!(record.kind(), SourceKind::File);
        assert_eq!(record.url(), Some("ftp://ftp.example.org/pub/foo-1.0.tar.gz"));
        assert!(record.path().is_none());
        assert_eq!(record.checksum().unwrap().digest, "beef");

        assert!(has_scheme("git+ssh://example.org/foo.git"));
        assert!(!has_scheme("foo-%{version}.tar.gz"));
        assert!(!has_scheme("://broken"));
    }

    #[test]
    fn test_archive_before_git() {
        assert_eq!(
            source_kind("https://example.org/foo-1.0.tar.gz"),
            SourceKind::Archive
        );
        assert_eq!(
            source_kind("https://example.org/libgit2-1.7.tar.xz"),
            SourceKind::Archive
        );
    }

    #[test]
    fn test_git() {
        assert_eq!(
            source_kind("https://example.org/acme/foo.git"),
            SourceKind::Git
        );
    }

    #[test]
    fn test_only_last_segment_is_inspected() {
        // "tar" and "git" in directories do not count
        assert_eq!(
            source_kind("https://github.com/tarball/foo.zip"),
            SourceKind::Archive
        );
        assert_eq!(
            source_kind("https://gitlab.example.org/foo/icon.png"),
            SourceKind::File
        );
    }

    #[test]
    fn test_fragment_rename() {
        let url = "https://github.com/acme/foo/archive/v1.0.zip#/foo-1.0.zip";
        assert_eq!(source_filename(url), "foo-1.0.zip");
        assert_eq!(source_kind(url), SourceKind::Archive);

        let checksums = ChecksumManifest::parse("SHA512 (foo-1.0.zip) = abc\n");
        let record = classify_source(url, &checksums);
        assert_eq!(record.checksum().unwrap().digest, "abc");
        assert_eq!(record.url(), Some(url));
    }

    #[test]
    fn test_query_string_ignored() {
        assert_eq!(
            source_filename("https://example.org/download/foo.tar.gz?raw=true"),
            "foo.tar.gz"
        );
    }

    #[test]
    fn test_checksum_attachment_is_best_effort() {
        let checksums = ChecksumManifest::parse("SHA512 (other.tar.gz) = 1234\n");
        let record = classify_source("https://example.org/foo-1.0.tar.gz", &checksums);
        assert_eq!(record.kind(), SourceKind::Archive);
        assert!(record.checksum().is_none());
    }

    #[test]
    fn test_classification_is_idempotent() {
        let checksums = ChecksumManifest::parse("SHA256 (foo-1.0.tar.gz) = deadbeef\n");
        let url = "https://example.org/foo-1.0.tar.gz";
        assert_eq!(classify_source(url, &checksums), classify_source(url, &checksums));
    }

    #[test]
    fn test_patch_record() {
        let record = classify_patch("Patch0", "foo-fix.patch");
        assert_eq!(record.kind(), SourceKind::Patch);
        assert_eq!(record.path(), Some("foo-fix.patch"));
        assert!(record.checksum().is_none());
    }
}
