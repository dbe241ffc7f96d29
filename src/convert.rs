// src/convert.rs

//! Package-to-module conversion pipeline
//!
//! Each package goes through fetch → parse → classify → assemble on its own.
//! Packages run on a dedicated rayon pool of `jobs` threads; results land
//! in a buffer indexed by input position, so module order always matches
//! listing order no matter which package finishes first.
//!
//! Failures never cross package boundaries: a package that cannot be
//! fetched or parsed is recorded with a [`SkipReason`] and left out of the
//! module list.

use crate::classify::{
    classify_build_system, classify_patch, classify_source, BuildSystemDecision, ChecksumManifest,
};
use crate::config::ConvertConfig;
use crate::error::{Error, Result};
use crate::manifest::{assemble, ModuleRecord, PackageEntry, SourceRecord};
use crate::progress::ProgressTracker;
use crate::recipe::{parse_spec, MacroTable, ParseError};
use crate::repository::{FetchError, FetchedRecipe, RecipeSource};
use rayon::prelude::*;
use std::fmt;
use strum_macros::IntoStaticStr;
use tracing::{debug, info, warn};

/// Why a package has no module
#[derive(Debug, Clone, PartialEq, Eq, IntoStaticStr)]
pub enum SkipReason {
    /// The entry overrides its repository; the canonical location is not used
    PrivateRepository,
    FetchFailed(FetchError),
    ParseFailed(ParseError),
}

impl SkipReason {
    /// Variant name, for warning output
    pub fn kind(&self) -> &'static str {
        self.into()
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PrivateRepository => write!(f, "private repository in use"),
            Self::FetchFailed(e) => write!(f, "fetch failed: {e}"),
            Self::ParseFailed(e) => write!(f, "{e}"),
        }
    }
}

/// Non-fatal findings about a converted package
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassificationWarning {
    /// The build tool is not one flatpak-builder knows; the module is
    /// `simple` and its build commands need review
    UnsupportedBuildSystem { package: String, tool: Option<String> },
}

impl fmt::Display for ClassificationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedBuildSystem {
                package,
                tool: Some(tool),
            } => write!(
                f,
                "{package}: unsupported build system '{tool}', using 'simple' (review build-commands)"
            ),
            Self::UnsupportedBuildSystem {
                package,
                tool: None,
            } => write!(
                f,
                "{package}: no %build command found, using 'simple' (review build-commands)"
            ),
        }
    }
}

/// A package left out of the manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedPackage {
    pub name: String,
    pub reason: SkipReason,
}

impl fmt::Display for SkippedPackage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: skipped ({}): {}", self.name, self.reason.kind(), self.reason)
    }
}

/// Result of converting one package
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackageOutcome {
    Converted {
        module: ModuleRecord,
        warnings: Vec<ClassificationWarning>,
    },
    Skipped(SkipReason),
}

/// Everything a conversion run produced
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversionReport {
    /// Modules in listing order
    pub modules: Vec<ModuleRecord>,
    /// Skipped packages in listing order
    pub skipped: Vec<SkippedPackage>,
    pub warnings: Vec<ClassificationWarning>,
}

impl ConversionReport {
    /// One line per skipped package and per warning
    pub fn warning_lines(&self) -> Vec<String> {
        self.skipped
            .iter()
            .map(ToString::to_string)
            .chain(self.warnings.iter().map(ToString::to_string))
            .collect()
    }

    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty() && self.warnings.is_empty()
    }
}

/// Translate already-fetched documents into a module
///
/// Pure apart from logging.
pub fn translate(
    entry: &PackageEntry,
    fetched: &FetchedRecipe,
    defaults: &MacroTable,
) -> std::result::Result<(ModuleRecord, Vec<ClassificationWarning>), ParseError> {
    let recipe = parse_spec(&fetched.recipe)?;
    let checksums = ChecksumManifest::parse(&fetched.checksums);

    let decision = classify_build_system(recipe.build_tool());
    let mut warnings = Vec::new();
    match &decision {
        BuildSystemDecision::Native(native) => {
            info!("Build system for {}: {}", entry.name, native);
        }
        BuildSystemDecision::Fallback { tool } => {
            let warning = ClassificationWarning::UnsupportedBuildSystem {
                package: entry.name.clone(),
                tool: tool.clone(),
            };
            warn!("{}", warning);
            warnings.push(warning);
        }
    }

    let sources: Vec<SourceRecord> = recipe
        .expanded_sources(defaults)
        .iter()
        .map(|(_, value)| classify_source(value, &checksums))
        .collect();

    let patches: Vec<SourceRecord> = recipe
        .patches
        .iter()
        .map(|(label, path)| classify_patch(label, &recipe.expand(path, defaults)))
        .collect();

    debug!(
        "{}: {} sources, {} patches",
        entry.name,
        sources.len(),
        patches.len()
    );

    let module = assemble(entry, &recipe, &decision, sources, patches);
    Ok((module, warnings))
}

/// Runs the per-package pipeline over a listing
pub struct Converter<'a> {
    source: &'a dyn RecipeSource,
    defaults: MacroTable,
    jobs: usize,
}

impl<'a> Converter<'a> {
    pub fn new(source: &'a dyn RecipeSource, config: &ConvertConfig) -> Self {
        Self {
            source,
            defaults: config.macro_defaults(),
            jobs: config.jobs(),
        }
    }

    /// Fetch and translate a single package
    pub fn convert_package(&self, entry: &PackageEntry) -> PackageOutcome {
        if entry.is_private {
            warn!("Private repository in use for {}, skipping", entry.name);
            return PackageOutcome::Skipped(SkipReason::PrivateRepository);
        }

        debug!("Fetching {} at {}", entry.name, entry.revision);
        let fetched = match self.source.fetch(&entry.name, &entry.revision) {
            Ok(fetched) => fetched,
            Err(e) => {
                warn!("Failed to fetch {}: {}", entry.name, e);
                return PackageOutcome::Skipped(SkipReason::FetchFailed(e));
            }
        };

        match translate(entry, &fetched, &self.defaults) {
            Ok((module, warnings)) => PackageOutcome::Converted { module, warnings },
            Err(e) => {
                warn!("Failed to parse recipe for {}: {}", entry.name, e);
                PackageOutcome::Skipped(SkipReason::ParseFailed(e))
            }
        }
    }

    /// Convert every package of a listing
    ///
    /// Only thread pool creation can fail; per-package failures are in the
    /// report.
    pub fn convert_all(
        &self,
        entries: &[PackageEntry],
        progress: &dyn ProgressTracker,
    ) -> Result<ConversionReport> {
        info!(
            "Converting {} packages with {} parallel jobs",
            entries.len(),
            self.jobs
        );
        progress.start(entries.len() as u64);

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.jobs)
            .thread_name(|i| format!("convert-{i}"))
            .build()
            .map_err(|e| Error::InitError(format!("Failed to create worker pool: {e}")))?;

        // collect() on an indexed parallel iterator keeps input order
        let outcomes: Vec<PackageOutcome> = pool.install(|| {
            entries
                .par_iter()
                .map(|entry| {
                    let outcome = self.convert_package(entry);
                    let converted = matches!(outcome, PackageOutcome::Converted { .. });
                    progress.package_finished(&entry.name, converted);
                    outcome
                })
                .collect()
        });

        let mut report = ConversionReport::default();
        for (entry, outcome) in entries.iter().zip(outcomes) {
            match outcome {
                PackageOutcome::Converted { module, warnings } => {
                    report.modules.push(module);
                    report.warnings.extend(warnings);
                }
                PackageOutcome::Skipped(reason) => report.skipped.push(SkippedPackage {
                    name: entry.name.clone(),
                    reason,
                }),
            }
        }

        let summary = format!(
            "{} modules, {} skipped",
            report.modules.len(),
            report.skipped.len()
        );
        progress.finish(&summary, report.skipped.is_empty());
        info!("Conversion finished: {}", summary);

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str) -> PackageEntry {
        PackageEntry {
            name: name.to_string(),
            revision: "abc123".to_string(),
            is_private: false,
        }
    }

    #[test]
    fn test_translate_unresolved_macro_is_kept() {
        let fetched = FetchedRecipe {
            recipe: "Name: foo\nSource0: https://example.org/foo-%{version}.tar.gz\n%build\n%cmake\n"
                .to_string(),
            checksums: String::new(),
        };
        let (module, warnings) = translate(&entry("foo"), &fetched, &MacroTable::new()).unwrap();

        assert!(warnings.is_empty());
        assert_eq!(
            module.sources[0].url(),
            Some("https://example.org/foo-%{version}.tar.gz")
        );
    }

    #[test]
    fn test_translate_expands_patch_paths() {
        let fetched = FetchedRecipe {
            recipe: "Name: foo\nPatch0: %{name}-fix.patch\n%build\n%meson\n".to_string(),
            checksums: String::new(),
        };
        let (module, _) = translate(&entry("foo"), &fetched, &MacroTable::new()).unwrap();
        assert_eq!(module.sources[0].path(), Some("foo-fix.patch"));
    }

    #[test]
    fn test_translate_fallback_warns() {
        let fetched = FetchedRecipe {
            recipe: "Name: foo\n%build\n./build.sh --fast\n".to_string(),
            checksums: String::new(),
        };
        let (module, warnings) = translate(&entry("foo"), &fetched, &MacroTable::new()).unwrap();

        assert_eq!(module.buildsystem, "simple");
        assert_eq!(
            warnings,
            vec![ClassificationWarning::UnsupportedBuildSystem {
                package: "foo".to_string(),
                tool: Some("./build.sh".to_string()),
            }]
        );
    }

    #[test]
    fn test_translate_malformed() {
        let fetched = FetchedRecipe::default();
        assert!(translate(&entry("foo"), &fetched, &MacroTable::new()).is_err());
    }

    #[test]
    fn test_skip_reason_display() {
        let skipped = SkippedPackage {
            name: "bar".to_string(),
            reason: SkipReason::PrivateRepository,
        };
        assert_eq!(
            skipped.to_string(),
            "bar: skipped (PrivateRepository): private repository in use"
        );

        let reason = SkipReason::FetchFailed(FetchError::NotFound {
            url: "https://e.org/x.spec".to_string(),
        });
        assert_eq!(reason.kind(), "FetchFailed");
    }
}
