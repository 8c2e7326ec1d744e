//! Optional rule-application reporting seam.
//!
//! Cleaners emit one [`RuleEvent`] per pipeline rule that changed a value.
//! The observer is a plain callback, not a hard dependency: `clean` routes
//! through a no-op observer, and batch failures are always reported both to
//! the observer and to the `tracing` channel so no error disappears
//! silently.

use scrub_model::CleanError;

/// One applied rule: which field, which rule, and the value before/after.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleEvent {
    /// Field (column) name supplied by the caller; empty for ad-hoc calls.
    pub field: String,
    /// Stable rule identifier, e.g. `"trim_whitespace"`.
    pub rule: &'static str,
    /// Value entering the rule.
    pub before: String,
    /// Value leaving the rule.
    pub after: String,
}

impl RuleEvent {
    pub fn new(field: &str, rule: &'static str, before: &str, after: &str) -> Self {
        Self {
            field: field.to_string(),
            rule,
            before: before.to_string(),
            after: after.to_string(),
        }
    }
}

/// Listener for rule applications and per-item failures.
pub trait RuleObserver {
    /// Called after a rule changed a value.
    fn rule_applied(&mut self, event: RuleEvent);

    /// Called when an item fails to clean (batch collect mode, or any
    /// observed single-item failure).
    fn item_failed(&mut self, _field: &str, _error: &CleanError) {}
}

/// Observer that discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl RuleObserver for NoopObserver {
    fn rule_applied(&mut self, _event: RuleEvent) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder(Vec<RuleEvent>);

    impl RuleObserver for Recorder {
        fn rule_applied(&mut self, event: RuleEvent) {
            self.0.push(event);
        }
    }

    #[test]
    fn recorder_sees_events() {
        let mut recorder = Recorder::default();
        recorder.rule_applied(RuleEvent::new("name", "trim_whitespace", " x ", "x"));
        assert_eq!(recorder.0.len(), 1);
        assert_eq!(recorder.0[0].rule, "trim_whitespace");
    }
}
