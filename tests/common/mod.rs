// tests/common/mod.rs

//! Shared test utilities and helpers for integration tests.

#![allow(dead_code)]

use rpm2flatpak::{ConvertConfig, FetchError, FetchedRecipe, PackageEntry, RecipeSource};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::thread;
use std::time::Duration;

/// In-memory recipe source
///
/// Packages without a registered recipe fail with `NotFound`. Every call to
/// `fetch` is recorded.
#[derive(Default)]
pub struct MockSource {
    recipes: HashMap<String, FetchedRecipe>,
    failures: HashMap<String, FetchError>,
    delays: HashMap<String, Duration>,
    calls: AtomicUsize,
    fetched: Mutex<Vec<String>>,
}

impl MockSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_recipe(mut self, name: &str, recipe: &str, checksums: &str) -> Self {
        self.recipes.insert(
            name.to_string(),
            FetchedRecipe {
                recipe: recipe.to_string(),
                checksums: checksums.to_string(),
            },
        );
        self
    }

    pub fn with_failure(mut self, name: &str, error: FetchError) -> Self {
        self.failures.insert(name.to_string(), error);
        self
    }

    pub fn with_delay(mut self, name: &str, delay: Duration) -> Self {
        self.delays.insert(name.to_string(), delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn fetched(&self) -> Vec<String> {
        self.fetched.lock().unwrap().clone()
    }
}

impl RecipeSource for MockSource {
    fn fetch(&self, name: &str, revision: &str) -> Result<FetchedRecipe, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.fetched.lock().unwrap().push(name.to_string());

        if let Some(delay) = self.delays.get(name) {
            thread::sleep(*delay);
        }
        if let Some(error) = self.failures.get(name) {
            return Err(error.clone());
        }
        self.recipes
            .get(name)
            .cloned()
            .ok_or_else(|| FetchError::NotFound {
                url: format!("mock://{name}/{revision}/{name}.spec"),
            })
    }
}

/// A public listing entry
pub fn entry(name: &str, revision: &str) -> PackageEntry {
    PackageEntry {
        name: name.to_string(),
        revision: revision.to_string(),
        is_private: false,
    }
}

/// A listing entry that overrides its repository
pub fn private_entry(name: &str) -> PackageEntry {
    PackageEntry {
        name: name.to_string(),
        revision: String::new(),
        is_private: true,
    }
}

/// Configuration with `jobs` workers and default everything else
pub fn config_with_jobs(jobs: usize) -> ConvertConfig {
    ConvertConfig {
        jobs,
        ..ConvertConfig::default()
    }
}

/// A minimal recipe using `tool` as its first build command
pub fn recipe_with_build(name: &str, tool: &str) -> String {
    format!(
        "Name: {name}\nVersion: 1.0\nSource0: https://example.org/{name}-%{{version}}.tar.gz\n\n%build\n{tool}\n"
    )
}
