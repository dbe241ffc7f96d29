// src/recipe/parser.rs

//! Lenient line-oriented RPM spec parser
//!
//! This is not a grammar for the RPM spec file format. It recognizes section
//! headers, preamble tags, `Source`/`Patch` declarations and
//! `%global`/`%define` macros, and keeps every other line as opaque stage
//! content.

use super::format::{Recipe, Stage};
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Malformed recipe: {0}")]
    Malformed(String),
}

/// Section keywords that open a new stage
const SECTION_KEYWORDS: &[&str] = &[
    "prep",
    "conf",
    "build",
    "install",
    "check",
    "clean",
    "files",
    "changelog",
    "description",
    "package",
    "pre",
    "post",
    "preun",
    "postun",
    "pretrans",
    "posttrans",
    "preinstall",
    "postinstall",
    "verifyscript",
    "generate_buildrequires",
    "triggerin",
    "triggerun",
    "triggerpostun",
    "triggerprein",
    "filetriggerin",
    "filetriggerun",
    "filetriggerpostun",
    "transfiletriggerin",
    "transfiletriggerun",
    "transfiletriggerpostun",
    "sourcelist",
    "patchlist",
];

/// Tags whose values become lowercase macros of the same name
const MACRO_TAGS: &[&str] = &["name", "version", "release", "epoch", "summary", "license", "url"];

static SOURCE_PATCH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?i)(source|patch)(\d*)\s*:\s*(\S.*?)\s*$").expect("valid source/patch regex")
});

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z][A-Za-z0-9]*)(\([^)]*\))?\s*:\s*(.*?)\s*$").expect("valid tag regex")
});

static DEFINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^%(global|define)\s+([A-Za-z_][A-Za-z0-9_]*)(\([^)]*\))?\s+(.*?)\s*$")
        .expect("valid define regex")
});

/// Parse spec text into a [`Recipe`]
///
/// Fails only when the text has no recognizable structure at all: no
/// non-blank lines, or neither a preamble tag nor a section header.
pub fn parse_spec(content: &str) -> Result<Recipe, ParseError> {
    let mut recipe = Recipe::default();
    let mut current: Option<Stage> = None;
    let mut saw_line = false;
    let mut saw_tag = false;

    for raw in content.lines() {
        let line = raw.trim_end();
        if line.trim().is_empty() {
            continue;
        }
        saw_line = true;

        if let Some((keyword, args)) = section_header(line) {
            if let Some(stage) = current.take() {
                recipe.stages.push(stage);
            }
            current = Some(Stage {
                name: keyword.to_string(),
                args,
                lines: Vec::new(),
            });
            continue;
        }

        let in_changelog = current.as_ref().is_some_and(|s| s.name == "changelog");
        if !in_changelog {
            if let Some(caps) = DEFINE_RE.captures(line.trim_start()) {
                if caps.get(3).is_none() {
                    recipe.macros.define(&caps[2], &caps[4]);
                } else {
                    debug!("Skipping parametric macro definition: {}", &caps[2]);
                }
            }
        }

        match current.as_mut() {
            Some(stage) => {
                // Subpackages may declare their own sources and patches
                if stage.name == "package" {
                    parse_declaration(&mut recipe, line.trim_start());
                }
                stage.lines.push(line.to_string());
            }
            None => {
                if parse_preamble_line(&mut recipe, line.trim_start()) {
                    saw_tag = true;
                }
            }
        }
    }

    if let Some(stage) = current.take() {
        recipe.stages.push(stage);
    }

    if !saw_line {
        return Err(ParseError::Malformed("document is empty".to_string()));
    }
    if !saw_tag && recipe.stages.is_empty() {
        return Err(ParseError::Malformed(
            "no preamble tags or section headers found".to_string(),
        ));
    }

    debug!(
        "Parsed recipe: {} stages, {} sources, {} patches, {} macros",
        recipe.stages.len(),
        recipe.sources.len(),
        recipe.patches.len(),
        recipe.macros.len()
    );

    Ok(recipe)
}

/// Recognize a section header line, returning the keyword and its arguments
fn section_header(line: &str) -> Option<(&str, Option<String>)> {
    let rest = line.strip_prefix('%')?;
    let mut parts = rest.splitn(2, char::is_whitespace);
    let keyword = parts.next()?;
    if !SECTION_KEYWORDS.contains(&keyword) {
        return None;
    }
    let args = parts
        .next()
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .map(str::to_string);
    Some((keyword, args))
}

/// Record a `Source`/`Patch` declaration; returns true if the line was one
fn parse_declaration(recipe: &mut Recipe, line: &str) -> bool {
    let Some(caps) = SOURCE_PATCH_RE.captures(line) else {
        return false;
    };
    let kind = caps[1].to_ascii_lowercase();
    let label = if kind == "source" {
        format!("Source{}", &caps[2])
    } else {
        format!("Patch{}", &caps[2])
    };
    let value = caps[3].to_string();

    let declarations = if kind == "source" {
        &mut recipe.sources
    } else {
        &mut recipe.patches
    };
    if !declarations.insert(label.clone(), value) {
        debug!("Ignoring duplicate declaration of {}", label);
    }
    true
}

/// Handle one preamble line; returns true if it was a tag
fn parse_preamble_line(recipe: &mut Recipe, line: &str) -> bool {
    if parse_declaration(recipe, line) {
        return true;
    }

    if let Some(caps) = TAG_RE.captures(line) {
        let tag = caps[1].to_ascii_lowercase();
        if MACRO_TAGS.contains(&tag.as_str()) && !recipe.macros.contains(&tag) {
            recipe.macros.define(tag, &caps[3]);
        }
        return true;
    }

    false
}
