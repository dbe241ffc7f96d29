// src/progress.rs

//! Progress reporting for package conversion
//!
//! The pipeline reports one event per finished package through
//! [`ProgressTracker`]. Trackers are shared by the worker threads, so
//! implementations keep their counters in atomics.
//!
//! - `CliProgress`: indicatif bar on stderr
//! - `LogProgress`: tracing lines at every tenth of the listing
//! - `SilentProgress`: counters only

use indicatif::{ProgressBar, ProgressStyle};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use tracing::{info, warn};

/// Receives package-level conversion events
pub trait ProgressTracker: Send + Sync {
    /// A run over `total` packages is starting
    fn start(&self, total: u64);

    /// One package is done; `converted` is false if it was skipped
    fn package_finished(&self, name: &str, converted: bool);

    /// The run is over; `clean` is false if any package was skipped
    fn finish(&self, summary: &str, clean: bool);

    /// Packages finished so far
    fn completed(&self) -> u64;

    /// Packages skipped so far
    fn skipped(&self) -> u64;
}

/// Shared counters of the trackers
#[derive(Debug, Default)]
struct Counters {
    total: AtomicU64,
    completed: AtomicU64,
    skipped: AtomicU64,
    finished: AtomicBool,
}

impl Counters {
    /// Record one package, returning the completed count before and after
    fn record(&self, converted: bool) -> (u64, u64) {
        if !converted {
            self.skipped.fetch_add(1, Ordering::Relaxed);
        }
        let before = self.completed.fetch_add(1, Ordering::Relaxed);
        (before, before + 1)
    }
}

/// No output
#[derive(Debug, Default)]
pub struct SilentProgress {
    counters: Counters,
}

impl SilentProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_finished(&self) -> bool {
        self.counters.finished.load(Ordering::Relaxed)
    }
}

impl ProgressTracker for SilentProgress {
    fn start(&self, total: u64) {
        self.counters.total.store(total, Ordering::Relaxed);
    }

    fn package_finished(&self, _name: &str, converted: bool) {
        self.counters.record(converted);
    }

    fn finish(&self, _summary: &str, _clean: bool) {
        self.counters.finished.store(true, Ordering::Relaxed);
    }

    fn completed(&self) -> u64 {
        self.counters.completed.load(Ordering::Relaxed)
    }

    fn skipped(&self) -> u64 {
        self.counters.skipped.load(Ordering::Relaxed)
    }
}

/// Progress as tracing log lines
///
/// Used when stderr is not a terminal.
#[derive(Debug)]
pub struct LogProgress {
    name: String,
    counters: Counters,
}

impl LogProgress {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            counters: Counters::default(),
        }
    }
}

impl ProgressTracker for LogProgress {
    fn start(&self, total: u64) {
        self.counters.total.store(total, Ordering::Relaxed);
        info!("{}: {} packages", self.name, total);
    }

    fn package_finished(&self, name: &str, converted: bool) {
        let (before, after) = self.counters.record(converted);
        let total = self.counters.total.load(Ordering::Relaxed);
        let interval = (total / 10).max(1);

        if !converted {
            warn!("{}: {} skipped", self.name, name);
        }
        if total > 0 && after / interval > before / interval {
            info!("{}: {}% ({}/{})", self.name, after * 100 / total, after, total);
        }
    }

    fn finish(&self, summary: &str, clean: bool) {
        self.counters.finished.store(true, Ordering::Relaxed);
        if clean {
            info!("{}: {}", self.name, summary);
        } else {
            warn!("{}: {}", self.name, summary);
        }
    }

    fn completed(&self) -> u64 {
        self.counters.completed.load(Ordering::Relaxed)
    }

    fn skipped(&self) -> u64 {
        self.counters.skipped.load(Ordering::Relaxed)
    }
}

/// Terminal progress bar
pub struct CliProgress {
    bar: ProgressBar,
    counters: Counters,
}

impl CliProgress {
    pub fn new(operation: &str, total: u64) -> Self {
        let bar = ProgressBar::new(total);
        let style = ProgressStyle::default_bar()
            .template("{prefix} [{bar:40.green/dim}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("##-");
        bar.set_style(style);
        bar.set_prefix(operation.to_string());

        let counters = Counters::default();
        counters.total.store(total, Ordering::Relaxed);
        Self { bar, counters }
    }
}

impl ProgressTracker for CliProgress {
    fn start(&self, total: u64) {
        self.counters.total.store(total, Ordering::Relaxed);
        self.bar.set_length(total);
    }

    fn package_finished(&self, name: &str, converted: bool) {
        self.counters.record(converted);
        if converted {
            self.bar.set_message(name.to_string());
        } else {
            self.bar.set_message(format!("{name} (skipped)"));
        }
        self.bar.inc(1);
    }

    fn finish(&self, summary: &str, clean: bool) {
        self.counters.finished.store(true, Ordering::Relaxed);
        if clean {
            self.bar.finish_with_message(summary.to_string());
        } else {
            self.bar.abandon_with_message(summary.to_string());
        }
    }

    fn completed(&self) -> u64 {
        self.counters.completed.load(Ordering::Relaxed)
    }

    fn skipped(&self) -> u64 {
        self.counters.skipped.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_silent_counts_skips() {
        let progress = SilentProgress::new();
        progress.start(3);
        progress.package_finished("foo", true);
        progress.package_finished("bar", false);

        assert_eq!(progress.completed(), 2);
        assert_eq!(progress.skipped(), 1);
        assert!(!progress.is_finished());
        progress.finish("1 modules, 1 skipped", false);
        assert!(progress.is_finished());
    }

    #[test]
    fn test_log_progress() {
        let progress = LogProgress::new("convert");
        progress.start(4);
        for name in ["a", "b", "c", "d"] {
            progress.package_finished(name, true);
        }
        assert_eq!(progress.completed(), 4);
        assert_eq!(progress.skipped(), 0);
    }

    #[test]
    fn test_log_progress_without_start() {
        let progress = LogProgress::new("convert");
        progress.package_finished("a", false);
        assert_eq!(progress.skipped(), 1);
    }

    #[test]
    fn test_cli_progress_counts() {
        let progress = CliProgress::new("Converting", 5);
        progress.package_finished("foo", true);
        progress.package_finished("bar", true);
        assert_eq!(progress.completed(), 2);
        assert_eq!(progress.bar.position(), 2);
        progress.finish("done", true);
    }

    #[test]
    fn test_counters_are_shared_across_threads() {
        let progress = SilentProgress::new();
        std::thread::scope(|s| {
            for _ in 0..4 {
                s.spawn(|| {
                    for _ in 0..25 {
                        progress.package_finished("pkg", true);
                    }
                });
            }
        });
        assert_eq!(progress.completed(), 100);
    }
}
