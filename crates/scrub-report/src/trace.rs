//! Collecting observer and report aggregation.

use std::collections::BTreeMap;

use scrub_clean::{RuleEvent, RuleObserver, error_kind};
use scrub_model::CleanError;
use serde::{Deserialize, Serialize};

/// One item that failed cleaning, with the error collapsed to a stable
/// kind plus its rendered message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldFailure {
    pub field: String,
    pub kind: String,
    pub message: String,
}

/// Observer that records every rule application and failure it sees.
///
/// Attach one trace per cleaning run, then call [`RuleTrace::report`]
/// to aggregate what happened.
#[derive(Debug, Clone, Default)]
pub struct RuleTrace {
    events: Vec<RuleEvent>,
    failures: Vec<FieldFailure>,
}

impl RuleTrace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[RuleEvent] {
        &self.events
    }

    pub fn failures(&self) -> &[FieldFailure] {
        &self.failures
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty() && self.failures.is_empty()
    }

    /// Aggregate the collected events into per-field summaries.
    pub fn report(&self) -> CleanReport {
        let mut fields: BTreeMap<String, FieldSummary> = BTreeMap::new();
        for event in &self.events {
            let summary = fields
                .entry(event.field.clone())
                .or_insert_with(|| FieldSummary::new(&event.field));
            *summary.rules.entry(event.rule.to_string()).or_insert(0) += 1;
        }
        for failure in &self.failures {
            let summary = fields
                .entry(failure.field.clone())
                .or_insert_with(|| FieldSummary::new(&failure.field));
            summary.failures += 1;
        }
        CleanReport {
            total_events: self.events.len(),
            total_failures: self.failures.len(),
            fields: fields.into_values().collect(),
        }
    }
}

impl RuleObserver for RuleTrace {
    fn rule_applied(&mut self, event: RuleEvent) {
        self.events.push(event);
    }

    fn item_failed(&mut self, field: &str, error: &CleanError) {
        self.failures.push(FieldFailure {
            field: field.to_string(),
            kind: error_kind(error).to_string(),
            message: error.to_string(),
        });
    }
}

/// Rule applications and failures for one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSummary {
    pub field: String,
    /// Rule name to application count, sorted by rule name.
    pub rules: BTreeMap<String, usize>,
    pub failures: usize,
}

impl FieldSummary {
    fn new(field: &str) -> Self {
        Self { field: field.to_string(), rules: BTreeMap::new(), failures: 0 }
    }

    pub fn applied(&self) -> usize {
        self.rules.values().sum()
    }
}

/// Aggregated view of a cleaning run, serializable for machine output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanReport {
    pub total_events: usize,
    pub total_failures: usize,
    /// Sorted by field name.
    pub fields: Vec<FieldSummary>,
}

impl CleanReport {
    /// Global rule name to application count, across all fields.
    pub fn rule_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for field in &self.fields {
            for (rule, count) in &field.rules {
                *counts.entry(rule.clone()).or_insert(0) += count;
            }
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scrub_clean::{Cleaner, TextCleaner};
    use scrub_model::BatchErrorPolicy;

    #[test]
    fn trace_collects_events_per_field() {
        let cleaner = TextCleaner::default();
        let mut trace = RuleTrace::new();
        cleaner
            .clean_observed("  Hello WORLD  ", "greeting", &mut trace)
            .unwrap();
        cleaner.clean_observed("plain", "note", &mut trace).unwrap();

        let report = trace.report();
        assert_eq!(report.fields.len(), 1);
        assert_eq!(report.fields[0].field, "greeting");
        assert_eq!(report.fields[0].rules["trim_whitespace"], 1);
        assert_eq!(report.fields[0].rules["convert_case"], 1);
    }

    #[test]
    fn batch_failures_are_traced() {
        use scrub_clean::NumberCleaner;

        let cleaner = NumberCleaner::default();
        let mut trace = RuleTrace::new();
        cleaner
            .clean_batch_observed(
                &["1", "nope", "3"],
                BatchErrorPolicy::Collect,
                "amount",
                &mut trace,
            )
            .unwrap();

        assert_eq!(trace.failures().len(), 1);
        assert_eq!(trace.failures()[0].field, "amount");
        let report = trace.report();
        assert_eq!(report.total_failures, 1);
    }

    #[test]
    fn rule_counts_aggregate_across_fields() {
        let cleaner = TextCleaner::default();
        let mut trace = RuleTrace::new();
        cleaner.clean_observed(" A ", "first", &mut trace).unwrap();
        cleaner.clean_observed(" B ", "second", &mut trace).unwrap();

        let counts = trace.report().rule_counts();
        assert_eq!(counts["trim_whitespace"], 2);
    }

    #[test]
    fn report_serializes_to_json() {
        let cleaner = TextCleaner::default();
        let mut trace = RuleTrace::new();
        cleaner.clean_observed("  X  ", "field", &mut trace).unwrap();

        let json = serde_json::to_value(trace.report()).unwrap();
        assert_eq!(json["total_events"], 2);
        assert_eq!(json["fields"][0]["field"], "field");
    }
}
