// src/repository/fetcher.rs

//! Recipe and checksum manifest retrieval
//!
//! A [`RecipeSource`] returns the raw `.spec` text and the raw `sources`
//! checksum manifest for one package at one revision. The HTTP
//! implementation renders both URLs from templates with `{name}` and `{ref}`
//! placeholders.

use crate::config::ConvertConfig;
use crate::error::Result;
use thiserror::Error;
use tracing::debug;

use super::client::RepositoryClient;

/// Fedora dist-git location of a package's spec file
pub const DEFAULT_RECIPE_URL: &str =
    "https://src.fedoraproject.org/rpms/{name}/raw/{ref}/f/{name}.spec";

/// Fedora dist-git location of a package's lookaside `sources` file
pub const DEFAULT_CHECKSUM_URL: &str =
    "https://src.fedoraproject.org/rpms/{name}/raw/{ref}/f/sources";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("{url} not found")]
    NotFound { url: String },

    #[error("{url} unreachable: {reason}")]
    Unreachable { url: String, reason: String },

    #[error("access to {url} denied")]
    Unauthorized { url: String },
}

/// Raw documents for one package
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchedRecipe {
    /// The `.spec` text
    pub recipe: String,
    /// The checksum manifest text; empty if the package publishes none
    pub checksums: String,
}

/// Anything that can produce a package's recipe and checksum manifest
///
/// Implementations must be thread-safe: the conversion pipeline calls
/// `fetch` from several worker threads at once.
pub trait RecipeSource: Send + Sync {
    fn fetch(&self, name: &str, revision: &str) -> std::result::Result<FetchedRecipe, FetchError>;
}

/// A URL with `{name}` and `{ref}` placeholders
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlTemplate(String);

impl UrlTemplate {
    pub fn new(template: impl Into<String>) -> Self {
        Self(template.into())
    }

    pub fn render(&self, name: &str, revision: &str) -> String {
        self.0.replace("{name}", name).replace("{ref}", revision)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Fetches recipes over HTTP from a dist-git style host
pub struct HttpRecipeFetcher {
    client: RepositoryClient,
    recipe_url: UrlTemplate,
    checksum_url: UrlTemplate,
}

impl HttpRecipeFetcher {
    pub fn new(
        client: RepositoryClient,
        recipe_url: UrlTemplate,
        checksum_url: UrlTemplate,
    ) -> Self {
        Self {
            client,
            recipe_url,
            checksum_url,
        }
    }

    /// Build a fetcher from the run configuration
    pub fn from_config(config: &ConvertConfig) -> Result<Self> {
        let client = RepositoryClient::with_settings(config.timeout(), config.max_retries)?;
        Ok(Self::new(
            client,
            UrlTemplate::new(config.recipe_url.clone()),
            UrlTemplate::new(config.checksum_url.clone()),
        ))
    }
}

impl RecipeSource for HttpRecipeFetcher {
    fn fetch(&self, name: &str, revision: &str) -> std::result::Result<FetchedRecipe, FetchError> {
        let recipe = self.client.get_text(&self.recipe_url.render(name, revision))?;

        let checksum_url = self.checksum_url.render(name, revision);
        let checksums = checksum_manifest_text(self.client.get_text(&checksum_url))?;

        Ok(FetchedRecipe { recipe, checksums })
    }
}

/// Body of a checksum manifest request
///
/// A package without a manifest publishes no checksums, so `NotFound` is an
/// empty manifest. Any other failure fails the package.
fn checksum_manifest_text(
    result: std::result::Result<String, FetchError>,
) -> std::result::Result<String, FetchError> {
    match result {
        Err(FetchError::NotFound { url }) => {
            debug!("No checksum manifest at {}", url);
            Ok(String::new())
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_templates_render() {
        let recipe = UrlTemplate::new(DEFAULT_RECIPE_URL);
        assert_eq!(
            recipe.render("gnome-calculator", "f41"),
            "https://src.fedoraproject.org/rpms/gnome-calculator/raw/f41/f/gnome-calculator.spec"
        );

        let sums = UrlTemplate::new(DEFAULT_CHECKSUM_URL);
        assert_eq!(
            sums.render("foo", "abc123"),
            "https://src.fedoraproject.org/rpms/foo/raw/abc123/f/sources"
        );
    }

    #[test]
    fn test_checksum_manifest_found() {
        let text = "SHA512 (foo-1.0.tar.gz) = abcd\n".to_string();
        assert_eq!(checksum_manifest_text(Ok(text.clone())), Ok(text));
    }

    #[test]
    fn test_missing_checksum_manifest_is_empty() {
        let missing = Err(FetchError::NotFound {
            url: "https://example.org/foo/sources".to_string(),
        });
        assert_eq!(checksum_manifest_text(missing), Ok(String::new()));
    }

    #[test]
    fn test_other_checksum_failures_fail_the_package() {
        let unreachable = FetchError::Unreachable {
            url: "https://example.org/foo/sources".to_string(),
            reason: "HTTP 502 Bad Gateway".to_string(),
        };
        assert_eq!(
            checksum_manifest_text(Err(unreachable.clone())),
            Err(unreachable)
        );

        let denied = FetchError::Unauthorized {
            url: "https://example.org/foo/sources".to_string(),
        };
        assert_eq!(checksum_manifest_text(Err(denied.clone())), Err(denied));
    }

    #[test]
    fn test_fetch_error_display_names_url() {
        let err = FetchError::NotFound {
            url: "https://example.org/x.spec".to_string(),
        };
        assert!(err.to_string().contains("x.spec"));
    }
}
