//! Diagnostics collected while normalizing one input.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Change notes and per-stage counts for a single pipeline invocation.
///
/// A fresh record is created for every input; it is never shared between
/// invocations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostics {
    /// Human-readable change notes, in stage order
    pub notes: Vec<String>,

    /// Lines dropped as boilerplate, in document order
    pub removed_lines: Vec<String>,

    /// Number of changes made by each stage that changed something
    pub stage_counts: BTreeMap<String, usize>,
}

impl Diagnostics {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a note.
    pub fn note(&mut self, note: impl Into<String>) {
        let note = note.into();
        log::info!("{}", note);
        self.notes.push(note);
    }

    /// Add `count` changes for `stage`, with a note in the `"<label>: N changes"` form.
    ///
    /// Zero counts are ignored.
    pub fn record(&mut self, stage: &str, label: &str, count: usize) {
        if count == 0 {
            return;
        }
        *self.stage_counts.entry(stage.to_string()).or_insert(0) += count;
        self.note(format!("{}: {} changes", label, count));
    }

    /// Record a line dropped as boilerplate.
    pub fn remove_line(&mut self, line: impl Into<String>) {
        self.removed_lines.push(line.into());
    }

    /// Changes counted for a stage (0 if it changed nothing).
    pub fn count(&self, stage: &str) -> usize {
        self.stage_counts.get(stage).copied().unwrap_or(0)
    }

    /// Total changes across all stages.
    pub fn total_changes(&self) -> usize {
        self.stage_counts.values().sum()
    }

    /// Whether no stage changed anything.
    pub fn is_unchanged(&self) -> bool {
        self.stage_counts.is_empty() && self.removed_lines.is_empty()
    }
}
