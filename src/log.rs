//! The session log: filtering, deduplication and fail-fast bookkeeping for
//! diagnostics, plus the side channel used in verbose mode.

use crate::config::ValidatorConfig;
use crate::enums::{ResourceKind, Severity};
use crate::error::LogEntry;
use std::collections::HashSet;

/// Receives every accepted entry as it is logged when `verbose` is set.
pub trait DiagnosticSink {
    fn accept(&self, entry: &LogEntry);
}

/// Default sink: one `tracing` event per entry.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn accept(&self, entry: &LogEntry) {
        match entry.severity {
            Severity::Error => tracing::error!(
                target: "iiif_validator",
                path = %entry.path,
                kind = %entry.kind,
                "{}",
                entry.message
            ),
            Severity::Warning => tracing::warn!(
                target: "iiif_validator",
                path = %entry.path,
                kind = %entry.kind,
                "{}",
                entry.message
            ),
        }
    }
}

/// What happened to an entry handed to [`SessionLog::record`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Stored,
    /// Its severity is not being collected.
    Filtered,
    /// An equivalent entry is already stored and `unique_logging` is set.
    Duplicate,
    /// Fail-fast already triggered; no further errors are accepted.
    Sealed,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct DedupKey {
    kind: ResourceKind,
    field: Option<String>,
    message: String,
}

impl DedupKey {
    fn of(entry: &LogEntry) -> Self {
        Self {
            kind: entry.kind,
            field: entry.field().map(str::to_string),
            message: entry.message.clone(),
        }
    }
}

/// Diagnostics collected by one `validate()` call.
#[derive(Debug, Default)]
pub struct SessionLog {
    entries: Vec<LogEntry>,
    seen: HashSet<DedupKey>,
    halted_at: Option<usize>,
}

impl SessionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.entries.clear();
        self.seen.clear();
        self.halted_at = None;
    }

    /// Apply the collection, deduplication and fail-fast policies to `entry`
    /// and store it if it survives. `depth` is the resource nesting depth the
    /// entry was logged at; it is remembered when the entry triggers
    /// fail-fast.
    pub fn record(
        &mut self,
        entry: LogEntry,
        config: &ValidatorConfig,
        sink: &dyn DiagnosticSink,
        depth: usize,
    ) -> Outcome {
        let collected = match entry.severity {
            Severity::Error => config.collect_errors,
            Severity::Warning => config.collect_warnings,
        };
        if !collected {
            return Outcome::Filtered;
        }
        if entry.is_error() && self.halted_at.is_some() {
            return Outcome::Sealed;
        }
        if config.unique_logging && !self.seen.insert(DedupKey::of(&entry)) {
            return Outcome::Duplicate;
        }

        if config.verbose {
            sink.accept(&entry);
        }
        if entry.is_error() && config.fail_fast {
            self.halted_at = Some(depth);
        }
        self.entries.push(entry);
        Outcome::Stored
    }

    /// Depth at which fail-fast triggered, if it has.
    pub fn halted_at(&self) -> Option<usize> {
        self.halted_at
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn errors(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter().filter(|e| e.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries
            .iter()
            .filter(|e| e.severity == Severity::Warning)
    }

    pub fn is_valid(&self) -> bool {
        self.errors().next().is_none()
    }

    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings().count()
    }
}
