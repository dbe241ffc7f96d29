// src/flathub.rs

//! Flathub application lookup
//!
//! Resolves a search term to exactly one Flathub application id and fetches
//! that application's published manifest, whose `finish-args` are reused for
//! the generated manifest.

use crate::error::{Error, Result};
use crate::repository::{FetchError, RepositoryClient};
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;
use std::sync::LazyLock;
use tracing::{debug, info};

/// Flathub application list endpoint
pub const FLATHUB_APPS_URL: &str = "https://flathub.org/api/v1/apps";

/// Base of the raw manifest files of Flathub repositories
pub const FLATHUB_RAW_BASE: &str = "https://raw.githubusercontent.com/flathub";

static C_COMMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)/\*.*?\*/").expect("valid comment regex"));

/// One entry of the Flathub application list
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlathubApp {
    pub flatpak_app_id: String,
    pub name: String,
}

/// Apps whose id or name contains `term`, case-insensitively
pub fn find_matches<'a>(apps: &'a [FlathubApp], term: &str) -> Vec<&'a FlathubApp> {
    let term = term.to_lowercase();
    apps.iter()
        .filter(|app| {
            app.flatpak_app_id.to_lowercase().contains(&term)
                || app.name.to_lowercase().contains(&term)
        })
        .collect()
}

/// The single app id matching `term`
///
/// Zero or several matches is an error; several matches are listed with
/// aligned ids so the user can pick one.
pub fn resolve_app_id(apps: &[FlathubApp], term: &str) -> Result<String> {
    let matches = find_matches(apps, term);
    match matches.as_slice() {
        [] => Err(Error::NotFoundError(format!(
            "No match found on flathub.org for '{term}'"
        ))),
        [app] => Ok(app.flatpak_app_id.clone()),
        many => {
            let width = many.iter().map(|a| a.flatpak_app_id.len()).max().unwrap_or(0);
            let listing: Vec<String> = many
                .iter()
                .map(|a| format!("  {:width$} {}", a.flatpak_app_id, a.name, width = width))
                .collect();
            Err(Error::NotFoundError(format!(
                "Multiple matches found on flathub.org for '{term}':\n{}",
                listing.join("\n")
            )))
        }
    }
}

/// Remove `/* ... */` comments, which flatpak-builder tolerates in JSON
///
/// Comment markers inside string literals are not special-cased.
pub fn strip_json_comments(text: &str) -> String {
    C_COMMENT_RE.replace_all(text, "").into_owned()
}

/// `finish-args` of a published manifest, if it has any
pub fn finish_args(manifest: &Value) -> Option<Vec<String>> {
    manifest.get("finish-args")?.as_array().map(|args| {
        args.iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect()
    })
}

/// Flathub API and manifest client
pub struct FlathubClient {
    client: RepositoryClient,
    apps_url: String,
    raw_base: String,
}

impl FlathubClient {
    pub fn new(client: RepositoryClient) -> Self {
        Self {
            client,
            apps_url: FLATHUB_APPS_URL.to_string(),
            raw_base: FLATHUB_RAW_BASE.to_string(),
        }
    }

    /// Download the application list
    pub fn list_apps(&self) -> Result<Vec<FlathubApp>> {
        info!("Fetching application list from {}", self.apps_url);
        let body = self
            .client
            .get_text(&self.apps_url)
            .map_err(|e| Error::DownloadError(e.to_string()))?;
        serde_json::from_str(&body)
            .map_err(|e| Error::ParseError(format!("Invalid Flathub app list: {e}")))
    }

    /// Resolve a search term to one app id
    pub fn search(&self, term: &str) -> Result<String> {
        let apps = self.list_apps()?;
        resolve_app_id(&apps, term)
    }

    /// Fetch the published manifest of `app_id`
    ///
    /// Tries `<id>.json`, `<id>.yaml` and `<id>.yml` on the default branch.
    pub fn fetch_manifest(&self, app_id: &str) -> Result<Value> {
        for (file_name, is_yaml) in [
            (format!("{app_id}.json"), false),
            (format!("{app_id}.yaml"), true),
            (format!("{app_id}.yml"), true),
        ] {
            let url = format!("{}/{}/master/{}", self.raw_base, app_id, file_name);
            let body = match self.client.get_text(&url) {
                Ok(body) => body,
                Err(FetchError::NotFound { .. }) => {
                    debug!("No manifest at {}", url);
                    continue;
                }
                Err(e) => return Err(Error::DownloadError(e.to_string())),
            };

            return parse_manifest(&body, is_yaml);
        }

        Err(Error::NotFoundError(format!(
            "No published manifest found for {app_id}"
        )))
    }
}

fn parse_manifest(body: &str, is_yaml: bool) -> Result<Value> {
    if is_yaml {
        serde_yaml::from_str(body)
            .map_err(|e| Error::ParseError(format!("Invalid Flathub manifest: {e}")))
    } else {
        serde_json::from_str(&strip_json_comments(body))
            .map_err(|e| Error::ParseError(format!("Invalid Flathub manifest: {e}")))
    }
}
