// src/recipe/format.rs

//! Structured model of an RPM spec recipe
//!
//! The parser fills these types from raw spec text; nothing downstream of
//! the parser ever looks at the raw text again.

use super::macros;
use std::collections::HashMap;

/// One `%section` block of a spec file, in document order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stage {
    /// Section keyword without the `%` sigil (`build`, `install`, `files`, ...)
    pub name: String,
    /// Anything after the keyword on the header line (`-n foo`, `devel`)
    pub args: Option<String>,
    /// Non-blank body lines, right-trimmed, as written
    pub lines: Vec<String>,
}

impl Stage {
    /// Body lines that are not shell comments
    pub fn commands(&self) -> impl Iterator<Item = &str> {
        self.lines
            .iter()
            .map(|l| l.as_str())
            .filter(|l| !l.trim_start().starts_with('#'))
    }
}

/// Labeled declarations (`Source0`, `Patch3`, ...) in declaration order
///
/// Labels are unique: the first declaration of a label wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Declarations {
    entries: Vec<(String, String)>,
}

impl Declarations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a declaration; returns false (and keeps the existing value) if
    /// the label was already declared
    pub fn insert(&mut self, label: impl Into<String>, value: impl Into<String>) -> bool {
        let label = label.into();
        if self.entries.iter().any(|(l, _)| *l == label) {
            return false;
        }
        self.entries.push((label, value.into()));
        true
    }

    pub fn get(&self, label: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(l, v)| (l.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Macro name to replacement text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MacroTable {
    values: HashMap<String, String>,
}

impl MacroTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Define (or redefine) a macro
    pub fn define(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(|v| v.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MacroTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = MacroTable::new();
        for (k, v) in iter {
            table.define(k, v);
        }
        table
    }
}

/// A parsed spec recipe
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Recipe {
    /// Every `%section` in document order, unknown ones included
    pub stages: Vec<Stage>,
    /// `Source`/`SourceN` declarations, unexpanded
    pub sources: Declarations,
    /// `Patch`/`PatchN` declarations, unexpanded
    pub patches: Declarations,
    /// `%global`/`%define` macros plus tag-derived ones (`name`, `version`, ...)
    pub macros: MacroTable,
}

impl Recipe {
    /// First stage with the given keyword (without `%`)
    pub fn stage(&self, name: &str) -> Option<&Stage> {
        self.stages.iter().find(|s| s.name == name)
    }

    /// The first command line of `%build`
    pub fn build_invocation(&self) -> Option<&str> {
        self.stage("build").and_then(|s| s.commands().next())
    }

    /// First whitespace-delimited token of the build invocation
    pub fn build_tool(&self) -> Option<&str> {
        self.build_invocation()
            .and_then(|line| line.split_whitespace().next())
    }

    /// `%build` command lines verbatim, comments dropped
    pub fn build_commands(&self) -> Vec<String> {
        self.stage("build")
            .map(|s| s.commands().map(|l| l.trim().to_string()).collect())
            .unwrap_or_default()
    }

    /// Expand macro references in `text`
    ///
    /// Recipe macros shadow `defaults`. Unknown `%{name}` references are left
    /// in place.
    pub fn expand(&self, text: &str, defaults: &MacroTable) -> String {
        macros::expand(text, &|name| {
            self.macros.get(name).or_else(|| defaults.get(name))
        })
    }

    /// Source declarations with macros expanded, in declaration order
    pub fn expanded_sources(&self, defaults: &MacroTable) -> Vec<(String, String)> {
        self.sources
            .iter()
            .map(|(label, value)| (label.to_string(), self.expand(value, defaults)))
            .collect()
    }
}
