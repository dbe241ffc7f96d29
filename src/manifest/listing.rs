// src/manifest/listing.rs

//! Component listing input
//!
//! The listing is the modulemd-style document produced by the bootstrap
//! tool. Only `data.components.rpms` is read:
//!
//! ```yaml
//! data:
//!   components:
//!     rpms:
//!       foo:
//!         ref: f41
//!         rationale: Runtime dependency
//!       bar:
//!         ref: main
//!         repository: https://git.example.org/rpms/bar
//! ```
//!
//! Entry order is preserved; it becomes the module order of the manifest.

use crate::error::{Error, Result};
use serde::Deserialize;
use serde_yaml::{Mapping, Value};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ListingError {
    #[error("not a valid YAML document: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("missing data.components.rpms")]
    MissingComponents,

    #[error("entry '{name}': {reason}")]
    InvalidEntry { name: String, reason: String },
}

/// One package of the listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageEntry {
    pub name: String,
    /// Branch, tag or commit to fetch the recipe at
    pub revision: String,
    /// A `repository` override is present; the canonical fetch path must
    /// not be used
    pub is_private: bool,
}

#[derive(Deserialize)]
struct ListingDocument {
    data: Option<ListingData>,
}

#[derive(Deserialize)]
struct ListingData {
    components: Option<Components>,
}

#[derive(Deserialize)]
struct Components {
    rpms: Option<Mapping>,
}

#[derive(Deserialize)]
struct ComponentSpec {
    #[serde(rename = "ref")]
    revision: Option<Value>,
    repository: Option<Value>,
}

/// Parse a listing document
pub fn parse_listing(content: &str) -> std::result::Result<Vec<PackageEntry>, ListingError> {
    let document: ListingDocument = serde_yaml::from_str(content)?;
    let rpms = document
        .data
        .and_then(|d| d.components)
        .and_then(|c| c.rpms)
        .ok_or(ListingError::MissingComponents)?;

    rpms.into_iter().map(|(key, value)| parse_entry(key, value)).collect()
}

/// Read and parse a listing file
pub fn read_listing(path: &Path) -> Result<Vec<PackageEntry>> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::IoError(format!("Failed to read listing {}: {e}", path.display()))
    })?;
    Ok(parse_listing(&content)?)
}

fn parse_entry(key: Value, value: Value) -> std::result::Result<PackageEntry, ListingError> {
    let name = scalar_string(&key).ok_or_else(|| ListingError::InvalidEntry {
        name: format!("{key:?}"),
        reason: "package name is not a string".to_string(),
    })?;

    if !value.is_mapping() {
        return Err(ListingError::InvalidEntry {
            name,
            reason: "expected a mapping with a 'ref' field".to_string(),
        });
    }
    let spec: ComponentSpec =
        serde_yaml::from_value(value).map_err(|e| ListingError::InvalidEntry {
            name: name.clone(),
            reason: e.to_string(),
        })?;

    let is_private = spec.repository.is_some();
    let revision = match spec.revision.as_ref().map(scalar_string) {
        Some(Some(revision)) => revision,
        Some(None) => {
            return Err(ListingError::InvalidEntry {
                name,
                reason: "'ref' is not a string".to_string(),
            });
        }
        None if is_private => String::new(),
        None => {
            return Err(ListingError::InvalidEntry {
                name,
                reason: "missing 'ref'".to_string(),
            });
        }
    };

    Ok(PackageEntry {
        name,
        revision,
        is_private,
    })
}

fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING: &str = r#"
document: modulemd
version: 2
data:
  name: gnome-calculator
  components:
    rpms:
      zeta:
        rationale: Runtime dependency
        ref: f41
        buildorder: 10
      alpha:
        ref: 0123abcd
      bar:
        ref: main
        repository: https://git.example.org/rpms/bar
"#;

    #[test]
    fn test_order_is_preserved() {
        let entries = parse_listing(LISTING).unwrap();
        let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["zeta", "alpha", "bar"]);
        assert_eq!(entries[0].revision, "f41");
        assert_eq!(entries[1].revision, "0123abcd");
    }

    #[test]
    fn test_repository_marks_private() {
        let entries = parse_listing(LISTING).unwrap();
        assert!(!entries[0].is_private);
        assert!(entries[2].is_private);
    }

    #[test]
    fn test_numeric_ref() {
        let entries =
            parse_listing("data:\n  components:\n    rpms:\n      foo:\n        ref: 41\n").unwrap();
        assert_eq!(entries[0].revision, "41");
    }

    #[test]
    fn test_missing_components_is_fatal() {
        assert!(matches!(
            parse_listing("data:\n  name: x\n"),
            Err(ListingError::MissingComponents)
        ));
    }

    #[test]
    fn test_missing_ref_is_fatal() {
        let err = parse_listing("data:\n  components:\n    rpms:\n      foo:\n        rationale: x\n")
            .unwrap_err();
        assert!(err.to_string().contains("foo"));
    }

    #[test]
    fn test_invalid_yaml_is_fatal() {
        assert!(matches!(
            parse_listing("data: [unclosed"),
            Err(ListingError::Yaml(_))
        ));
    }

    #[test]
    fn test_empty_rpms() {
        let entries = parse_listing("data:\n  components:\n    rpms: {}\n").unwrap();
        assert!(entries.is_empty());
    }
}
