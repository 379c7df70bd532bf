//! The single sink for all diagnostic entries produced while validating or
//! transforming a dataset (spec §4.6, §6, §7).
//!
//! A [`Report`] is append-only: entries accumulate from many local failures
//! without aborting the construction that produced them, and are serialized
//! once at the end of a run.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How serious a [`ReportEntry`] is.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    /// Informational; the input was accepted as-is or healed without
    /// materially changing the result.
    Warning,
    /// The offending element was dropped or the operation failed locally;
    /// the parent construction continues.
    Error,
    /// The containing road or dataset could not be processed at all.
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Severity::Warning => "WARNING",
            Severity::Error => "ERROR",
            Severity::Fatal => "FATAL",
        };
        write!(f, "{s}")
    }
}

/// One diagnostic entry: a message, where it occurred, how serious it is,
/// and whether the system healed the input rather than dropping it.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportEntry {
    /// Human-readable description.
    pub message: String,
    /// Where the issue occurred (an identifier path, e.g.
    /// `"road/12/lanesection/0/lane/-2"`).
    pub location: String,
    /// How serious the entry is.
    pub severity: Severity,
    /// `true` if the system repaired the offending input (e.g. re-sorted
    /// lane IDs) rather than dropping the element or aborting.
    pub was_healed: bool,
}

impl ReportEntry {
    /// Builds a new entry.
    pub fn new(message: impl Into<String>, location: impl Into<String>, severity: Severity, was_healed: bool) -> Self {
        ReportEntry { message: message.into(), location: location.into(), severity, was_healed }
    }

    /// A non-healed warning at `location`.
    pub fn warning(message: impl Into<String>, location: impl Into<String>) -> Self {
        Self::new(message, location, Severity::Warning, false)
    }

    /// A non-healed error at `location`.
    pub fn error(message: impl Into<String>, location: impl Into<String>) -> Self {
        Self::new(message, location, Severity::Error, false)
    }

    /// A non-healed fatal entry at `location`.
    pub fn fatal(message: impl Into<String>, location: impl Into<String>) -> Self {
        Self::new(message, location, Severity::Fatal, false)
    }

    /// A healed warning at `location` (input was repaired, not dropped).
    pub fn healed(message: impl Into<String>, location: impl Into<String>) -> Self {
        Self::new(message, location, Severity::Warning, true)
    }
}

/// Per-severity entry counts, emitted alongside the entry list.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug, Serialize, Deserialize)]
pub struct Summary {
    /// Count of [`Severity::Warning`] entries.
    pub warnings: usize,
    /// Count of [`Severity::Error`] entries.
    pub errors: usize,
    /// Count of [`Severity::Fatal`] entries.
    pub fatals: usize,
}

/// An append-only collection of [`ReportEntry`]s, serializable to the JSON
/// schema in spec §6: `{ entries: [...], summary: {...} }`.
#[derive(Clone, PartialEq, Default, Debug, Serialize, Deserialize)]
pub struct Report {
    entries: Vec<ReportEntry>,
}

impl Report {
    /// An empty report.
    pub fn new() -> Self { Report::default() }

    /// Appends one entry.
    pub fn push(&mut self, entry: ReportEntry) { self.entries.push(entry); }

    /// Appends a warning.
    pub fn warn(&mut self, message: impl Into<String>, location: impl Into<String>) {
        self.push(ReportEntry::warning(message, location));
    }

    /// Appends an error.
    pub fn error(&mut self, message: impl Into<String>, location: impl Into<String>) {
        self.push(ReportEntry::error(message, location));
    }

    /// Appends a fatal entry.
    pub fn fatal(&mut self, message: impl Into<String>, location: impl Into<String>) {
        self.push(ReportEntry::fatal(message, location));
    }

    /// All entries, in insertion order.
    pub fn entries(&self) -> &[ReportEntry] { &self.entries }

    /// `true` iff no [`Severity::Fatal`] entry was recorded (exit code 0
    /// per spec §6).
    pub fn is_success(&self) -> bool { !self.entries.iter().any(|e| e.severity == Severity::Fatal) }

    /// Per-severity counts.
    pub fn summary(&self) -> Summary {
        let mut summary = Summary::default();
        for e in &self.entries {
            match e.severity {
                Severity::Warning => summary.warnings += 1,
                Severity::Error => summary.errors += 1,
                Severity::Fatal => summary.fatals += 1,
            }
        }
        summary
    }

    /// Merges `other`'s entries into `self`, in order. Used to combine
    /// per-road reports produced by independent (possibly concurrent)
    /// worker tasks (spec §5).
    pub fn merge(&mut self, other: Report) { self.entries.extend(other.entries); }

    /// Serializes to the JSON schema in spec §6.
    pub fn to_json(&self) -> serde_json::Result<String> {
        #[derive(Serialize)]
        struct Schema<'a> {
            entries: &'a [ReportEntry],
            summary: Summary,
        }
        serde_json::to_string_pretty(&Schema { entries: &self.entries, summary: self.summary() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fatal_entry_marks_report_unsuccessful() {
        let mut report = Report::new();
        report.warn("benign", "road/1");
        assert!(report.is_success());
        report.fatal("broken", "road/1");
        assert!(!report.is_success());
    }

    #[test]
    fn summary_counts_by_severity() {
        let mut report = Report::new();
        report.warn("a", "x");
        report.error("b", "x");
        report.error("c", "x");
        report.fatal("d", "x");
        let summary = report.summary();
        assert_eq!(summary, Summary { warnings: 1, errors: 2, fatals: 1 });
    }

    #[test]
    fn merge_preserves_order() {
        let mut a = Report::new();
        a.warn("first", "x");
        let mut b = Report::new();
        b.warn("second", "x");
        a.merge(b);
        assert_eq!(a.entries().len(), 2);
        assert_eq!(a.entries()[0].message, "first");
        assert_eq!(a.entries()[1].message, "second");
    }

    #[test]
    fn json_uses_camel_case_schema_fields() {
        let mut report = Report::new();
        report.push(ReportEntry::healed("reordered lanes", "road/1/section/0"));
        let json = report.to_json().unwrap();
        assert!(json.contains("\"wasHealed\""));
        assert!(json.contains("reordered lanes"));
    }
}
